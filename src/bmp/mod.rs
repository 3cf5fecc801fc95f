//! Uncompressed 24-bit BMP decoding: fixed headers, then padded BGR rows.

mod decode;
mod header;
pub mod layout;

pub use decode::{EarlyStop, ScanReport, StopCause, decode_rows};
pub use header::{
    BmpPermissiveness, DibHeader, FileHeader, read_dib_header, read_file_header,
    validate_headers,
};
