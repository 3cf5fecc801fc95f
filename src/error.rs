use enough::StopReason;

/// Errors from BMP header decoding and pixel dumping.
///
/// Stream faults inside the pixel data never surface here; the row decoder
/// turns them into an early stop recorded on [`crate::ScanReport`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpDumpError {
    #[error("truncated {header} header: need {needed} bytes, got {got}")]
    Truncated {
        header: &'static str,
        needed: usize,
        got: usize,
    },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("I/O fault while reading headers: {0}")]
    Io(String),

    #[error("failed to write pixel dump")]
    Sink(#[source] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpDumpError {
    fn from(r: StopReason) -> Self {
        BmpDumpError::Cancelled(r)
    }
}
