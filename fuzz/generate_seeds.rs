#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp24(width: u32, height: u32, fill: u8) -> Vec<u8> {
    let stride = (3 * width + width % 4) as usize;
    let size = 54 + stride * height as usize;
    let mut bmp = vec![fill; size];
    bmp[..54].fill(0);
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(size as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp
}

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_backends"] {
        fs::create_dir_all(dir).unwrap();

        for (w, h) in [(1, 1), (2, 2), (3, 2), (4, 2), (5, 3)] {
            fs::write(format!("{dir}/bmp_{w}x{h}.bmp"), bmp24(w, h, 0x5a)).unwrap();
        }

        // Truncated/malformed seeds for edge coverage
        let full = bmp24(3, 3, 0x11);
        fs::write(format!("{dir}/header_only.bmp"), &full[..54]).unwrap();
        fs::write(format!("{dir}/mid_row.bmp"), &full[..60]).unwrap();
        fs::write(format!("{dir}/no_last_pad.bmp"), &full[..full.len() - 1]).unwrap();
        let mut top_down = bmp24(2, 2, 0x22);
        top_down[22..26].copy_from_slice(&(-2i32).to_le_bytes());
        fs::write(format!("{dir}/top_down.bmp"), top_down).unwrap();
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();

        println!("Generated seed corpus in {dir}/");
    }
}
