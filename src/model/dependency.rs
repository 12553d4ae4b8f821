//! Dependency tree model.
//!
//! The tree arrives pre-resolved from the build tool as a JSON document;
//! these types deserialize it. Each node records the artifact, the outcome
//! the resolution process assigned to it, and, for conflict omissions, the
//! artifact that won.
//!
//! ```json
//! {
//!   "artifact": { "group": "app", "name": "root", "type": "jar", "version": "1.0" },
//!   "state": "included",
//!   "children": [
//!     {
//!       "artifact": { "group": "lib", "name": "core", "version": "2.1" },
//!       "state": "omitted_for_conflict",
//!       "related": { "group": "lib", "name": "core", "version": "2.0" }
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

fn default_kind() -> String {
    "jar".to_owned()
}

/// Coordinates of one artifact in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    pub group: String,
    pub name: String,
    /// Artifact type ("jar", "war", ...); serialized as `type` and
    /// defaulting to "jar" when the document omits it.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub version: String,
}

impl ArtifactCoordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            kind: kind.into(),
            version: version.into(),
        }
    }

    /// Version-free grouping key: `group:name:type`.
    ///
    /// Two versions of the same artifact share a key; the resolver keys
    /// both its resolved map and its conflict map on it.
    #[must_use]
    pub fn qualified_key(&self) -> String {
        format!("{}:{}:{}", self.group, self.name, self.kind)
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group, self.name, self.kind, self.version
        )
    }
}

/// Outcome the external resolution process recorded for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InclusionState {
    /// Present on the final classpath
    Included,
    /// Dropped in favor of another version of the same artifact
    OmittedForConflict,
    /// Dropped to break a dependency cycle
    OmittedForCycle,
    /// Dropped as an exact duplicate of an already-selected node
    OmittedForDuplicate,
}

/// A node of the externally-materialized dependency tree.
///
/// Navigation is downward only; nodes do not point back at their parents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyNode {
    pub artifact: ArtifactCoordinate,
    pub state: InclusionState,
    /// For conflict omissions, the artifact the resolution kept instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<ArtifactCoordinate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub fn new(artifact: ArtifactCoordinate, state: InclusionState) -> Self {
        Self {
            artifact,
            state,
            related: None,
            children: Vec::new(),
        }
    }

    /// Attach the winning artifact for a conflict omission.
    #[must_use]
    pub fn with_related(mut self, related: ArtifactCoordinate) -> Self {
        self.related = Some(related);
        self
    }

    /// Attach child nodes.
    #[must_use]
    pub fn with_children(mut self, children: Vec<DependencyNode>) -> Self {
        self.children = children;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_key_is_version_free() {
        let v1 = ArtifactCoordinate::new("org.example", "core", "jar", "1.0");
        let v2 = ArtifactCoordinate::new("org.example", "core", "jar", "2.0");
        assert_eq!(v1.qualified_key(), "org.example:core:jar");
        assert_eq!(v1.qualified_key(), v2.qualified_key());
    }

    #[test]
    fn test_display_includes_version() {
        let c = ArtifactCoordinate::new("org.example", "core", "jar", "1.0");
        assert_eq!(c.to_string(), "org.example:core:jar:1.0");
    }

    #[test]
    fn test_deserialize_tree_document() {
        let doc = r#"{
            "artifact": { "group": "app", "name": "root", "type": "jar", "version": "1.0" },
            "state": "included",
            "children": [
                {
                    "artifact": { "group": "lib", "name": "core", "version": "2.1" },
                    "state": "omitted_for_conflict",
                    "related": { "group": "lib", "name": "core", "version": "2.0" }
                }
            ]
        }"#;

        let node: DependencyNode = serde_json::from_str(doc).expect("valid tree document");
        assert_eq!(node.artifact.qualified_key(), "app:root:jar");
        assert_eq!(node.state, InclusionState::Included);
        assert_eq!(node.children.len(), 1);

        let child = &node.children[0];
        assert_eq!(child.state, InclusionState::OmittedForConflict);
        // "type" defaults to jar when the document omits it
        assert_eq!(child.artifact.kind, "jar");
        assert_eq!(
            child.related.as_ref().map(|r| r.version.as_str()),
            Some("2.0")
        );
        assert!(child.children.is_empty());
    }

    #[test]
    fn test_state_serialization_is_snake_case() {
        let state = serde_json::to_string(&InclusionState::OmittedForConflict).unwrap();
        assert_eq!(state, "\"omitted_for_conflict\"");
    }
}
