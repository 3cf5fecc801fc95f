//! Human-readable header listings and the end-of-run console report.

use core::fmt;

use crate::bmp::{DibHeader, EarlyStop, FileHeader, StopCause};
use crate::decode::DumpOutput;

const RULE: &str = "--------------------";

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---------- BITMAP HEADER ----------")?;
        writeln!(f, "magic: {}", self.magic().escape_ascii())?;
        writeln!(f, "file_size: {}", self.file_size)?;
        write!(f, "data_offset: {}", self.offset)
    }
}

impl fmt::Display for DibHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---------- DIB HEADER ----------")?;
        writeln!(f, "header_size: {}", self.header_size)?;
        writeln!(f, "width: {}", self.width)?;
        writeln!(f, "height: {}", self.height)?;
        writeln!(f, "planes: {}", self.planes)?;
        writeln!(f, "bits_per_pixel: {}", self.bits_per_pixel)?;
        writeln!(f, "compression_method: {}", self.compression_method)?;
        writeln!(f, "image_size: {}", self.image_size)?;
        writeln!(f, "h_res: {}", self.h_res)?;
        writeln!(f, "w_res: {}", self.w_res)?;
        writeln!(f, "colors_count: {}", self.colors_count)?;
        write!(f, "important_colors: {}", self.important_colors)
    }
}

/// Both headers, one labelled field per line.
pub fn format_header_report(file: &FileHeader, dib: &DibHeader) -> String {
    format!("{file}\n{dib}\n")
}

impl fmt::Display for StopCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopCause::EndOfStream => f.write_str("end of stream reached"),
            StopCause::ShortRead { expected, obtained } => write!(
                f,
                "end of stream reached (short read: {obtained} of {expected} row bytes)"
            ),
            StopCause::IoFault(msg) => write!(f, "I/O fault: {msg}"),
        }
    }
}

impl fmt::Display for EarlyStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stopped reading at row {}: {}", self.row, self.cause)
    }
}

/// The line that opens the console report.
pub fn format_stream_length(len: Option<u64>) -> String {
    match len {
        Some(len) => format!("stream length: {len}"),
        None => "stream length: unknown".to_owned(),
    }
}

/// Console report minus its opening stream length line.
pub struct ReportBody<'a>(&'a DumpOutput);

impl DumpOutput {
    /// Everything [`DumpOutput`]'s `Display` prints after the stream length,
    /// for callers that printed that line before the headers were read.
    pub fn report_body(&self) -> ReportBody<'_> {
        ReportBody(self)
    }
}

impl fmt::Display for ReportBody<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let out = self.0;
        write!(f, "{}", format_header_report(&out.file_header, &out.dib_header))?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "reading bitmap data at pos: {}", out.data_start)?;
        if let Some(stop) = &out.scan.early_stop {
            writeln!(f, "{stop}")?;
        }
        write!(f, "read {} bytes", out.scan.bytes_count)
    }
}

impl fmt::Display for DumpOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", format_stream_length(self.stream_len))?;
        write!(f, "{}", self.report_body())
    }
}
