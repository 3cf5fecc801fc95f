#![no_main]
use libfuzzer_sys::fuzz_target;

use bmpdump::{BmpPermissiveness, DumpRequest, SliceSource};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic, in either strictness mode.
    for permissiveness in [BmpPermissiveness::Permissive, BmpPermissiveness::Strict] {
        let request = DumpRequest::new().permissiveness(permissiveness);
        let mut sink = std::io::sink();
        let Ok(output) = request.dump(&mut SliceSource::new(data), &mut sink, enough::Unstoppable)
        else {
            continue;
        };
        assert!(output.scan.bytes_count >= 14);
        let _ = output.to_string();
    }
});
