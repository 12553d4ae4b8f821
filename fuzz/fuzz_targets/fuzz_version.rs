#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the lenient version parser and the compatibility policy.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = classpath_tools::utils::parse_lenient(s);
        if let Some((a, b)) = s.split_once('|') {
            let _ = classpath_tools::utils::is_incompatible(a, b);
        }
    }
});
