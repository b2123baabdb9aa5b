#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Attempt to parse the startup summary
        // This should not panic regardless of input
        let _ = submetrics::boot_timing::parse(input);
    }
});
