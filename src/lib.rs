//! # bmpdump
//!
//! Streaming decoder for uncompressed 24-bit Windows BMP files that turns
//! every pixel into a `row col blue green red` text line.
//!
//! ## What gets decoded
//!
//! - The 14-byte file header and the 40-byte `BITMAPINFOHEADER`, read through
//!   declarative little-endian layouts ([`bmp::layout`]).
//! - `height` rows of `3 * width` BGR bytes, each followed by `width % 4`
//!   padding bytes, in file order. Rows start right after the DIB header.
//!
//! A stream that ends inside the pixel data is not an error: the scan stops,
//! whatever was read is kept, and [`ScanReport::early_stop`] says why.
//!
//! ## Non-Goals
//!
//! - RLE, bitfields, or embedded JPEG/PNG payloads
//! - Palettes and bit depths other than 24
//! - Flipping bottom-up images
//!
//! ## Usage
//!
//! ```no_run
//! use bmpdump::{Channels, DumpRequest, SliceSource};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your BMP bytes
//! let mut out = Vec::new();
//!
//! let output = DumpRequest::new()
//!     .channels(Channels::All)
//!     .dump(&mut SliceSource::new(data), &mut out, Unstoppable)?;
//! println!("{output}");
//! # Ok::<(), bmpdump::BmpDumpError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod error;
mod limits;
mod pixel;
mod report;
mod source;

pub mod bmp;

// Re-exports
pub use bmp::{BmpPermissiveness, DibHeader, EarlyStop, FileHeader, ScanReport, StopCause};
pub use decode::{DumpOutput, DumpRequest};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BmpDumpError;
pub use limits::Limits;
pub use pixel::{Channels, PixelRecord};
pub use report::{ReportBody, format_header_report, format_stream_length};
pub use source::{ByteSource, ReaderSource, SliceSource, SourceState};
