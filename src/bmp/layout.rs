//! Fixed binary layouts of the BMP file header and BITMAPINFOHEADER.
//!
//! Each header is described as an ordered list of little-endian fields and
//! read by one generic routine, so field order and widths live in a single
//! table instead of a hand-written sequence of reads.

use crate::source::ByteSource;

/// Width of one little-endian header field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldWidth {
    U8,
    U16,
    U32,
}

impl FieldWidth {
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }
}

/// One named field of a header layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub width: FieldWidth,
}

const fn field(name: &'static str, width: FieldWidth) -> Field {
    Field { name, width }
}

/// `BITMAPFILEHEADER`: magic, file size, reserved, pixel data offset.
pub const FILE_HEADER_LAYOUT: [Field; 5] = [
    field("cntrl_1", FieldWidth::U8),
    field("cntrl_2", FieldWidth::U8),
    field("file_size", FieldWidth::U32),
    field("reserved", FieldWidth::U32),
    field("offset", FieldWidth::U32),
];

/// `BITMAPINFOHEADER`, the 40-byte DIB header.
pub const DIB_HEADER_LAYOUT: [Field; 11] = [
    field("header_size", FieldWidth::U32),
    field("width", FieldWidth::U32),
    field("height", FieldWidth::U32),
    field("planes", FieldWidth::U16),
    field("bits_per_pixel", FieldWidth::U16),
    field("compression_method", FieldWidth::U32),
    field("image_size", FieldWidth::U32),
    field("h_res", FieldWidth::U32),
    field("w_res", FieldWidth::U32),
    field("colors_count", FieldWidth::U32),
    field("important_colors", FieldWidth::U32),
];

/// Total encoded size of a layout in bytes.
pub const fn layout_size(layout: &[Field]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < layout.len() {
        total += layout[i].width.bytes();
        i += 1;
    }
    total
}

pub const FILE_HEADER_SIZE: usize = layout_size(&FILE_HEADER_LAYOUT);
pub const DIB_HEADER_SIZE: usize = layout_size(&DIB_HEADER_LAYOUT);

/// Values decoded from a layout, in layout order, widened to u32.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldValues<const N: usize> {
    pub values: [u32; N],
    /// Bytes the source actually delivered. Less than the layout size when
    /// the stream ended early; the missing bytes decoded as 0.
    pub consumed: usize,
}

/// Read every field of `layout` from `source`, in order.
pub fn read_fields<S, const N: usize>(source: &mut S, layout: &[Field; N]) -> FieldValues<N>
where
    S: ByteSource + ?Sized,
{
    let start = source.position();
    let mut values = [0u32; N];
    for (value, f) in values.iter_mut().zip(layout) {
        *value = match f.width {
            FieldWidth::U8 => u32::from(source.read_u8()),
            FieldWidth::U16 => u32::from(source.read_u16_le()),
            FieldWidth::U32 => source.read_u32_le(),
        };
    }
    FieldValues {
        values,
        consumed: (source.position() - start) as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SliceSource;

    #[test]
    fn header_sizes() {
        assert_eq!(FILE_HEADER_SIZE, 14);
        assert_eq!(DIB_HEADER_SIZE, 40);
    }

    #[test]
    fn mixed_widths_decode_in_order() {
        let layout = [
            field("a", FieldWidth::U8),
            field("b", FieldWidth::U16),
            field("c", FieldWidth::U32),
        ];
        let data = [0x42, 0x10, 0x20, 0x01, 0x02, 0x03, 0x04, 0xFF];
        let mut src = SliceSource::new(&data);
        let fields = read_fields(&mut src, &layout);
        assert_eq!(fields.values, [0x42, 0x2010, 0x0403_0201]);
        assert_eq!(fields.consumed, 7);
        assert_eq!(src.remaining(), &[0xFF]);
    }

    #[test]
    fn short_stream_zero_fills_and_counts() {
        let data = [b'B', b'M', 0x36];
        let mut src = SliceSource::new(&data);
        let fields = read_fields(&mut src, &FILE_HEADER_LAYOUT);
        assert_eq!(fields.values, [u32::from(b'B'), u32::from(b'M'), 0x36, 0, 0]);
        assert_eq!(fields.consumed, 3);
    }

    #[test]
    fn field_names_are_unique() {
        for layout in [&FILE_HEADER_LAYOUT[..], &DIB_HEADER_LAYOUT[..]] {
            for (i, a) in layout.iter().enumerate() {
                assert!(layout[i + 1..].iter().all(|b| b.name != a.name));
            }
        }
    }
}
