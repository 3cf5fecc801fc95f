use crate::error::BmpDumpError;

/// Caps on the geometry a DIB header may declare before any row is read.
///
/// `None` means no cap. The pixel count is `width * height` in `u64`, with
/// the raw (unsigned) height.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    pub max_pixels: Option<u64>,
}

impl Limits {
    /// Whether no cap is set at all.
    pub fn is_unlimited(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BmpDumpError> {
        let (width, height) = (u64::from(width), u64::from(height));
        let caps = [
            ("width", width, self.max_width),
            ("height", height, self.max_height),
            ("pixel count", width * height, self.max_pixels),
        ];
        for (what, value, cap) in caps {
            if let Some(cap) = cap
                && value > cap
            {
                log::debug!("{what} {value} over cap {cap}");
                return Err(BmpDumpError::LimitExceeded(format!(
                    "{what} {value} exceeds limit {cap}"
                )));
            }
        }
        Ok(())
    }
}
