//! BMP file header and DIB header decoding.

use super::layout::{
    DIB_HEADER_LAYOUT, DIB_HEADER_SIZE, FILE_HEADER_LAYOUT, FILE_HEADER_SIZE, read_fields,
};
use crate::error::BmpDumpError;
use crate::source::{ByteSource, SourceState};

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly decoded headers are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Reject anything the row decoder does not actually understand:
    /// magic other than `BM`, planes != 1, bit depth != 24, any
    /// compression, or a DIB header shorter than 40 bytes.
    Strict,

    /// Default behavior. Pass every header value through unchanged and
    /// only log what looks wrong.
    #[default]
    Permissive,
}

// ── Headers ─────────────────────────────────────────────────────────

/// The 14-byte `BITMAPFILEHEADER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// First magic byte, `b'B'` in a Windows bitmap.
    pub cntrl_1: u8,
    /// Second magic byte, `b'M'` in a Windows bitmap.
    pub cntrl_2: u8,
    /// Declared total file size.
    pub file_size: u32,
    pub reserved: u32,
    /// Declared start of pixel data. Reported only; rows are read straight
    /// after the DIB header.
    pub offset: u32,
}

impl FileHeader {
    pub fn magic(&self) -> [u8; 2] {
        [self.cntrl_1, self.cntrl_2]
    }

    pub fn has_bmp_magic(&self) -> bool {
        self.magic() == *b"BM"
    }
}

/// The 40-byte `BITMAPINFOHEADER`.
///
/// `width` and `height` are kept as the raw 32-bit values from the file.
/// A negative (top-down) height is not reinterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DibHeader {
    /// Declared size of this header. Only 40 bytes are ever read.
    pub header_size: u32,
    pub width: u32,
    pub height: u32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression_method: u32,
    pub image_size: u32,
    pub h_res: u32,
    pub w_res: u32,
    pub colors_count: u32,
    pub important_colors: u32,
}

impl DibHeader {
    /// Packed BGR bytes in one row.
    pub fn row_bytes(&self) -> u64 {
        3 * u64::from(self.width)
    }

    /// Padding after each row: `width % 4`, which rounds a 24-bit row up to
    /// a multiple of four bytes.
    pub fn row_padding(&self) -> u32 {
        self.width % 4
    }

    /// Bytes one row occupies on disk, padding included.
    pub fn row_stride(&self) -> u64 {
        self.row_bytes() + u64::from(self.row_padding())
    }

    /// Whether the height field, read as signed, marks top-down row order.
    pub fn is_top_down(&self) -> bool {
        (self.height as i32) < 0
    }
}

// ── Decoding ────────────────────────────────────────────────────────

/// Read the 14-byte file header from the current position.
///
/// Magic bytes are not checked here; see [`validate_headers`].
pub fn read_file_header<S>(source: &mut S) -> Result<FileHeader, BmpDumpError>
where
    S: ByteSource + ?Sized,
{
    let fields = read_fields(source, &FILE_HEADER_LAYOUT);
    ensure_complete(source, "file", FILE_HEADER_SIZE, fields.consumed)?;

    let [cntrl_1, cntrl_2, file_size, reserved, offset] = fields.values;
    Ok(FileHeader {
        cntrl_1: cntrl_1 as u8,
        cntrl_2: cntrl_2 as u8,
        file_size,
        reserved,
        offset,
    })
}

/// Read the 40-byte DIB header that follows the file header.
pub fn read_dib_header<S>(source: &mut S) -> Result<DibHeader, BmpDumpError>
where
    S: ByteSource + ?Sized,
{
    let fields = read_fields(source, &DIB_HEADER_LAYOUT);
    ensure_complete(source, "DIB", DIB_HEADER_SIZE, fields.consumed)?;

    let [
        header_size,
        width,
        height,
        planes,
        bits_per_pixel,
        compression_method,
        image_size,
        h_res,
        w_res,
        colors_count,
        important_colors,
    ] = fields.values;

    let dib = DibHeader {
        header_size,
        width,
        height,
        planes: planes as u16,
        bits_per_pixel: bits_per_pixel as u16,
        compression_method,
        image_size,
        h_res,
        w_res,
        colors_count,
        important_colors,
    };
    log::debug!(
        "DIB header: {}x{} {}bpp, compression {}, declared size {}",
        dib.width,
        dib.height,
        dib.bits_per_pixel,
        dib.compression_method,
        dib.header_size
    );
    Ok(dib)
}

fn ensure_complete<S>(
    source: &S,
    header: &'static str,
    needed: usize,
    got: usize,
) -> Result<(), BmpDumpError>
where
    S: ByteSource + ?Sized,
{
    match source.state() {
        SourceState::Ready => Ok(()),
        SourceState::EndOfStream => Err(BmpDumpError::Truncated {
            header,
            needed,
            got,
        }),
        SourceState::Fault(msg) => Err(BmpDumpError::Io(msg.clone())),
    }
}

/// Check the headers against what the 24-bit row decoder supports.
///
/// In [`BmpPermissiveness::Strict`] the first problem is returned as an
/// error. Otherwise every problem is logged and the headers pass.
pub fn validate_headers(
    file: &FileHeader,
    dib: &DibHeader,
    permissiveness: BmpPermissiveness,
) -> Result<(), BmpDumpError> {
    let strict = permissiveness == BmpPermissiveness::Strict;
    let report = |err: BmpDumpError| -> Result<(), BmpDumpError> {
        if strict {
            return Err(err);
        }
        log::warn!("{err}; continuing anyway");
        Ok(())
    };

    if !file.has_bmp_magic() {
        report(BmpDumpError::InvalidHeader(format!(
            "magic bytes are {:02x?}, expected \"BM\"",
            file.magic()
        )))?;
    }
    if (dib.header_size as usize) < DIB_HEADER_SIZE {
        report(BmpDumpError::InvalidHeader(format!(
            "DIB header size {} is smaller than {DIB_HEADER_SIZE}",
            dib.header_size
        )))?;
    }
    if dib.planes != 1 {
        report(BmpDumpError::InvalidHeader(format!(
            "planes field is {}, expected 1",
            dib.planes
        )))?;
    }
    if dib.bits_per_pixel != 24 {
        report(BmpDumpError::UnsupportedVariant(format!(
            "bit depth {} (only 24 is decoded)",
            dib.bits_per_pixel
        )))?;
    }
    if dib.compression_method != 0 {
        report(BmpDumpError::UnsupportedVariant(format!(
            "compression method {} (only BI_RGB is decoded)",
            dib.compression_method
        )))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SliceSource;

    fn header_bytes(width: u32, height: u32, bpp: u16) -> Vec<u8> {
        let mut b = Vec::with_capacity(54);
        b.extend_from_slice(b"BM");
        b.extend_from_slice(&1234u32.to_le_bytes());
        b.extend_from_slice(&0u32.to_le_bytes());
        b.extend_from_slice(&54u32.to_le_bytes());
        b.extend_from_slice(&40u32.to_le_bytes());
        b.extend_from_slice(&width.to_le_bytes());
        b.extend_from_slice(&height.to_le_bytes());
        b.extend_from_slice(&1u16.to_le_bytes());
        b.extend_from_slice(&bpp.to_le_bytes());
        for v in [0u32, 48, 2835, 2835, 0, 0] {
            b.extend_from_slice(&v.to_le_bytes());
        }
        b
    }

    #[test]
    fn reads_both_headers_and_stops_at_54() {
        let mut data = header_bytes(4, 2, 24);
        data.extend_from_slice(&[0xEE; 24]);
        let mut src = SliceSource::new(&data);

        let file = read_file_header(&mut src).unwrap();
        assert_eq!(src.position(), 14);
        let dib = read_dib_header(&mut src).unwrap();
        assert_eq!(src.position(), 54);

        assert!(file.has_bmp_magic());
        assert_eq!(file.file_size, 1234);
        assert_eq!(file.offset, 54);
        assert_eq!(dib.header_size, 40);
        assert_eq!((dib.width, dib.height), (4, 2));
        assert_eq!(dib.planes, 1);
        assert_eq!(dib.bits_per_pixel, 24);
        assert_eq!(dib.image_size, 48);
        assert_eq!((dib.h_res, dib.w_res), (2835, 2835));
    }

    #[test]
    fn truncated_file_header() {
        let data = b"BM\x10\x00";
        let mut src = SliceSource::new(data);
        match read_file_header(&mut src) {
            Err(BmpDumpError::Truncated {
                header,
                needed,
                got,
            }) => {
                assert_eq!(header, "file");
                assert_eq!(needed, 14);
                assert_eq!(got, 4);
            }
            other => panic!("expected truncation, got {other:?}"),
        }
    }

    #[test]
    fn truncated_dib_header() {
        let data = header_bytes(4, 2, 24);
        let mut src = SliceSource::new(&data[..30]);
        read_file_header(&mut src).unwrap();
        let err = read_dib_header(&mut src).unwrap_err();
        assert!(matches!(
            err,
            BmpDumpError::Truncated {
                header: "DIB",
                needed: 40,
                got: 16
            }
        ));
    }

    #[test]
    fn negative_height_is_kept_raw() {
        let data = header_bytes(2, (-3i32) as u32, 24);
        let mut src = SliceSource::new(&data);
        read_file_header(&mut src).unwrap();
        let dib = read_dib_header(&mut src).unwrap();
        assert_eq!(dib.height, 0xFFFF_FFFD);
        assert!(dib.is_top_down());
    }

    #[test]
    fn padding_law() {
        let dib = |width| DibHeader {
            header_size: 40,
            width,
            height: 1,
            planes: 1,
            bits_per_pixel: 24,
            compression_method: 0,
            image_size: 0,
            h_res: 0,
            w_res: 0,
            colors_count: 0,
            important_colors: 0,
        };
        assert_eq!(dib(3).row_padding(), 3);
        assert_eq!(dib(3).row_stride(), 12);
        assert_eq!(dib(4).row_padding(), 0);
        assert_eq!(dib(4).row_stride(), 12);
        assert_eq!(dib(1).row_stride(), 4);
    }

    #[test]
    fn permissive_accepts_odd_headers() {
        let mut data = header_bytes(4, 2, 8);
        data[0] = b'X';
        let mut src = SliceSource::new(&data);
        let file = read_file_header(&mut src).unwrap();
        let dib = read_dib_header(&mut src).unwrap();
        assert!(validate_headers(&file, &dib, BmpPermissiveness::Permissive).is_ok());
    }

    #[test]
    fn strict_rejects_bad_magic_and_depth() {
        let mut data = header_bytes(4, 2, 24);
        data[1] = b'A';
        let mut src = SliceSource::new(&data);
        let file = read_file_header(&mut src).unwrap();
        let dib = read_dib_header(&mut src).unwrap();
        assert!(matches!(
            validate_headers(&file, &dib, BmpPermissiveness::Strict),
            Err(BmpDumpError::InvalidHeader(_))
        ));

        let data = header_bytes(4, 2, 32);
        let mut src = SliceSource::new(&data);
        let file = read_file_header(&mut src).unwrap();
        let dib = read_dib_header(&mut src).unwrap();
        assert!(matches!(
            validate_headers(&file, &dib, BmpPermissiveness::Strict),
            Err(BmpDumpError::UnsupportedVariant(_))
        ));
    }
}
