#![no_main]

use libfuzzer_sys::fuzz_target;
use symcheck::features::frontend::parse_fixture;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let _ = parse_fixture("fuzz.c", source);
    }
});
