//! JSON report rendering.

use super::types::AnalysisReport;

/// Render the report as pretty-printed JSON.
pub fn render_json(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentEntry;
    use crate::registry::ComponentRegistry;
    use crate::utils::digest_bytes;

    #[test]
    fn test_json_structure_round_trips_through_value() {
        let registry = ComponentRegistry::new();
        registry.put(
            "com.example.Foo",
            ComponentEntry::new("com.example.Foo", "a.jar:Foo.class", digest_bytes(b"a")),
        );
        registry.put(
            "com.example.Foo",
            ComponentEntry::new("com.example.Foo", "b.jar:Foo.class", digest_bytes(b"b")),
        );
        let report = AnalysisReport::build(&registry.snapshot(), None, &[], None);

        let rendered = render_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["verdict"], "fail");
        assert_eq!(value["counts"]["duplicate_groups"], 1);
        assert_eq!(value["duplicates"][0]["identity"], "com.example.Foo");
        assert_eq!(
            value["duplicates"][0]["entries"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
        assert!(value["metadata"]["generated_at"].is_string());
    }
}
