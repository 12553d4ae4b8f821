#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the class file identity reader.
///
/// Exercises the constant pool walk on arbitrary bytes; any input must
/// produce a name or a malformed-unit error, never a panic.
fuzz_target!(|data: &[u8]| {
    let _ = classpath_tools::scanner::declared_class_name("fuzz.class", data);
});
