#![no_main]
use libfuzzer_sys::fuzz_target;

use classpath_tools::model::DependencyNode;
use classpath_tools::resolver::resolve_tree;

/// Fuzz dependency tree deserialization and resolution together.
///
/// Documents that deserialize are walked in full, so the resolver sees
/// arbitrary shapes of states, related artifacts, and nesting.
fuzz_target!(|data: &[u8]| {
    if let Ok(root) = serde_json::from_slice::<DependencyNode>(data) {
        let _ = resolve_tree(&root);
    }
});
