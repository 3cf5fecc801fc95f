#![allow(dead_code)]

/// Build an uncompressed 24-bit BMP. `bgr` holds `width * height` triplets
/// in file row order; each row gets `width % 4` padding bytes of 0xEE.
pub fn bmp24(width: u32, height: u32, bgr: &[[u8; 3]]) -> Vec<u8> {
    assert_eq!(bgr.len(), (width * height) as usize);
    let pad = (width % 4) as usize;
    let stride = width as usize * 3 + pad;
    let file_size = 54 + stride * height as usize;

    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&((stride * height as usize) as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(out.len(), 54);

    for row in bgr.chunks_exact(width.max(1) as usize) {
        for px in row {
            out.extend_from_slice(px);
        }
        out.extend(std::iter::repeat_n(0xEE, pad));
    }
    out
}

pub fn checkerboard(w: u32, h: u32) -> Vec<[u8; 3]> {
    let mut pixels = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            if (x + y) % 2 == 0 {
                pixels.push([200, 220, 240]);
            } else {
                pixels.push([10, 40, 70]);
            }
        }
    }
    pixels
}

pub fn noise_pattern(w: u32, h: u32) -> Vec<[u8; 3]> {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    (0..w * h).map(|_| [next(), next(), next()]).collect()
}
