#![no_main]
use libfuzzer_sys::fuzz_target;

use bmpdump::{DumpRequest, ReaderSource, SliceSource};

fuzz_target!(|data: &[u8]| {
    // The in-memory and streaming backends must decode identically.
    let request = DumpRequest::new();
    let mem = request.collect(&mut SliceSource::new(data), enough::Unstoppable);
    let stream = request.collect(&mut ReaderSource::new(data), enough::Unstoppable);

    match (mem, stream) {
        (Ok((mem_out, mem_px)), Ok((stream_out, stream_px))) => {
            assert_eq!(mem_px, stream_px, "pixel mismatch");
            assert_eq!(mem_out.scan, stream_out.scan);
            assert_eq!(mem_out.file_header, stream_out.file_header);
            assert_eq!(mem_out.dib_header, stream_out.dib_header);
        }
        (Err(_), Err(_)) => {}
        (mem, stream) => panic!("backends disagree: {mem:?} vs {stream:?}"),
    }
});
