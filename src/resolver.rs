//! Dependency conflict analysis.
//!
//! Consumes the externally-materialized dependency tree and classifies
//! every node by its inclusion state: included nodes define the resolved
//! version per artifact key, conflict omissions are checked against the
//! version policy, and cycle or duplicate omissions carry no signal.

use crate::error::{AnalysisError, ErrorContext, Result};
use crate::model::{ArtifactCoordinate, DependencyNode, InclusionState};
use crate::utils::is_incompatible;
use indexmap::IndexSet;
use std::collections::BTreeMap;
use std::path::Path;

/// Everything the resolver learned from one tree.
#[derive(Debug, Default)]
pub struct ResolutionOutcome {
    /// The version kept on the classpath, one per qualified key.
    pub resolved_by_key: BTreeMap<String, ArtifactCoordinate>,
    /// Incompatibly-omitted coordinates per qualified key, in discovery
    /// order and without duplicates.
    pub conflicts_by_key: BTreeMap<String, IndexSet<ArtifactCoordinate>>,
}

impl ResolutionOutcome {
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts_by_key.is_empty()
    }
}

/// Analyze a dependency tree. Pure pre-order walk, no I/O.
#[must_use]
pub fn resolve_tree(root: &DependencyNode) -> ResolutionOutcome {
    let mut outcome = ResolutionOutcome::default();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node, &mut outcome);
        // children pushed in reverse so the leftmost is processed next
        for child in node.children.iter().rev() {
            stack.push(child);
        }
    }
    outcome
}

fn visit(node: &DependencyNode, outcome: &mut ResolutionOutcome) {
    let key = node.artifact.qualified_key();
    match node.state {
        InclusionState::Included => {
            // First Included for a key wins; a correctly-built tree never
            // offers a second.
            outcome
                .resolved_by_key
                .entry(key)
                .or_insert_with(|| node.artifact.clone());
        }
        InclusionState::OmittedForConflict => {
            let Some(related) = node.related.as_ref() else {
                tracing::warn!(
                    "Conflict-omitted node {} names no related artifact; skipping",
                    node.artifact
                );
                return;
            };
            if !is_incompatible(&node.artifact.version, &related.version) {
                tracing::debug!(
                    "Omission of {} in favor of {} is version-compatible",
                    node.artifact,
                    related
                );
                return;
            }
            let conflicts = outcome.conflicts_by_key.entry(key.clone()).or_default();
            conflicts.insert(node.artifact.clone());
            // The winner is listed only when it lives under a different
            // key; same-key winners are already named by resolved_by_key.
            if related.qualified_key() != key {
                conflicts.insert(related.clone());
            }
        }
        InclusionState::OmittedForCycle | InclusionState::OmittedForDuplicate => {}
    }
}

/// Load a dependency tree document from disk.
pub fn load_tree(path: &Path) -> Result<DependencyNode> {
    let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
    serde_json::from_str(&content).with_context(|| format!("in {}", path.display()))
}
