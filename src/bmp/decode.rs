//! 24-bit row decoder.
//!
//! Rows are read straight after the DIB header, top to bottom in file
//! order, with no vertical flip. Each row is `3 * width` packed BGR bytes
//! followed by `width % 4` padding bytes.

use enough::Stop;

use super::header::DibHeader;
use super::layout::FILE_HEADER_SIZE;
use crate::error::BmpDumpError;
use crate::pixel::PixelRecord;
use crate::source::{ByteSource, SourceState};

/// Largest slice requested from the source at once while filling a row.
/// The row buffer only grows as bytes actually arrive.
const ROW_CHUNK: usize = 64 * 1024;

// ── Scan results ────────────────────────────────────────────────────

/// Why the row scan ended before `height` rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopCause {
    /// The stream ended at a row boundary or inside the padding.
    EndOfStream,
    /// The stream ended partway through a row's pixel bytes.
    ShortRead { expected: u64, obtained: u64 },
    /// The source reported a device error.
    IoFault(String),
}

/// Where and why the row scan stopped early.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EarlyStop {
    /// Row being read when the stream gave out.
    pub row: u32,
    pub cause: StopCause,
}

/// Totals from one pass over the pixel data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanReport {
    /// Rows whose pixel bytes and padding were all read.
    pub rows_completed: u32,
    pub pixels_emitted: u64,
    /// Running byte count, seeded with `14 + header_size` (the declared DIB
    /// size) plus every row and padding byte actually obtained.
    pub bytes_count: u64,
    pub early_stop: Option<EarlyStop>,
}

impl ScanReport {
    fn seeded(dib: &DibHeader) -> Self {
        Self {
            rows_completed: 0,
            pixels_emitted: 0,
            bytes_count: FILE_HEADER_SIZE as u64 + u64::from(dib.header_size),
            early_stop: None,
        }
    }

    /// Whether every declared row was read.
    pub fn is_complete(&self) -> bool {
        self.early_stop.is_none()
    }
}

// ── Row loop ────────────────────────────────────────────────────────

/// Decode `dib.height` rows from `source`, handing each pixel to `emit`.
///
/// End of stream and device faults stop the scan and are recorded in the
/// returned report; pixels from a partial row are still emitted. Only
/// errors from `emit` and cancellation through `stop` are returned as `Err`.
pub fn decode_rows<S, F>(
    source: &mut S,
    dib: &DibHeader,
    stop: &dyn Stop,
    mut emit: F,
) -> Result<ScanReport, BmpDumpError>
where
    S: ByteSource + ?Sized,
    F: FnMut(PixelRecord) -> Result<(), BmpDumpError>,
{
    let mut report = ScanReport::seeded(dib);
    let row_bytes = dib.row_bytes();
    let padding = u64::from(dib.row_padding());

    // Zero width: rows carry no bytes and no padding.
    if row_bytes == 0 {
        report.rows_completed = dib.height;
        return Ok(report);
    }

    for row in 0..dib.height {
        if row % 16 == 0 {
            stop.check()?;
        }

        let buf = read_row(source, row_bytes);
        let obtained = buf.len() as u64;
        report.bytes_count += obtained;

        for (col, bgr) in buf.chunks_exact(3).enumerate() {
            emit(PixelRecord::from_bgr(row, col as u32, bgr))?;
            report.pixels_emitted += 1;
        }

        if source.state().is_ready() && padding > 0 {
            log::trace!("row {row}: reading {padding} padding bytes");
            report.bytes_count += source.skip(padding);
        }

        let cause = match source.state() {
            SourceState::Ready => {
                report.rows_completed += 1;
                continue;
            }
            SourceState::EndOfStream if obtained > 0 && obtained < row_bytes => {
                StopCause::ShortRead {
                    expected: row_bytes,
                    obtained,
                }
            }
            SourceState::EndOfStream => StopCause::EndOfStream,
            SourceState::Fault(msg) => StopCause::IoFault(msg.clone()),
        };
        log::warn!("pixel data ended early at row {row}: {cause}");
        report.early_stop = Some(EarlyStop { row, cause });
        break;
    }

    Ok(report)
}

/// Read up to `row_bytes` bytes into a buffer owned by this one row.
fn read_row<S>(source: &mut S, row_bytes: u64) -> Vec<u8>
where
    S: ByteSource + ?Sized,
{
    let mut buf = Vec::new();
    let mut left = row_bytes;
    while left > 0 {
        let want = left.min(ROW_CHUNK as u64) as usize;
        let start = buf.len();
        buf.resize(start + want, 0);
        let got = source.read_into(&mut buf[start..]);
        buf.truncate(start + got);
        if got < want {
            break;
        }
        left -= want as u64;
    }
    buf
}
