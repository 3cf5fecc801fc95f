use std::io::{self, Write};

/// One decoded pixel, in file order.
///
/// Channels are kept in BMP's on-disk BGR order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRecord {
    pub row: u32,
    pub col: u32,
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl PixelRecord {
    /// Build a record from one packed BGR triplet.
    pub(crate) fn from_bgr(row: u32, col: u32, bgr: &[u8]) -> Self {
        Self {
            row,
            col,
            blue: bgr[0],
            green: bgr[1],
            red: bgr[2],
        }
    }

    /// Write this pixel as one dump line.
    pub fn write_line<W: Write + ?Sized>(&self, out: &mut W, channels: Channels) -> io::Result<()> {
        match channels {
            Channels::All => writeln!(
                out,
                "{} {} {} {} {}",
                self.row, self.col, self.blue, self.green, self.red
            ),
            Channels::Blue => writeln!(out, "{} {} {}", self.row, self.col, self.blue),
        }
    }
}

#[cfg(feature = "rgb")]
impl From<PixelRecord> for rgb::RGB8 {
    fn from(p: PixelRecord) -> Self {
        rgb::RGB8 {
            r: p.red,
            g: p.green,
            b: p.blue,
        }
    }
}

/// Which color channels a dump line carries.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Channels {
    /// `<row> <col> <blue> <green> <red>`
    #[default]
    All,
    /// `<row> <col> <blue>`
    Blue,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL: PixelRecord = PixelRecord {
        row: 1,
        col: 2,
        blue: 255,
        green: 0,
        red: 7,
    };

    #[test]
    fn all_channels_line() {
        let mut out = Vec::new();
        PIXEL.write_line(&mut out, Channels::All).unwrap();
        assert_eq!(out, b"1 2 255 0 7\n");
    }

    #[test]
    fn blue_only_line() {
        let mut out = Vec::new();
        PIXEL.write_line(&mut out, Channels::Blue).unwrap();
        assert_eq!(out, b"1 2 255\n");
    }

    #[test]
    fn bgr_triplet_order() {
        let p = PixelRecord::from_bgr(0, 0, &[10, 20, 30]);
        assert_eq!((p.blue, p.green, p.red), (10, 20, 30));
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn converts_to_rgb8() {
        let px: rgb::RGB8 = PIXEL.into();
        assert_eq!((px.r, px.g, px.b), (7, 0, 255));
    }
}
