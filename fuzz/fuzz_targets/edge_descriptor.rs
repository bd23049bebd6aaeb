#![no_main]

use libfuzzer_sys::fuzz_target;
use tracegroup::stats::parse_edge_descriptor;

fuzz_target!(|data: &[u8]| {
    // Descriptor parsing must reject garbage with an error, never panic
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_edge_descriptor(input);
    }
});
