#![no_main]

use libfuzzer_sys::fuzz_target;
use symcheck::config::VerifierConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        // Any input either loads or yields a ConfigError, never a panic
        let _ = VerifierConfig::from_yaml_str(yaml_str);
    }
});
