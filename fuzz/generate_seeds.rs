#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp24(width: i32, height: i32, bgr: [u8; 3]) -> Vec<u8> {
    let w = width.unsigned_abs() as usize;
    let h = height.unsigned_abs() as usize;
    let stride = (w * 3 + 3) & !3;
    let size = 54 + stride * h;
    let mut bmp = vec![0u8; size];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(size as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes()); // negative = top-down
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    for row in bmp[54..].chunks_exact_mut(stride) {
        for px in row[..w * 3].chunks_exact_mut(3) {
            px.copy_from_slice(&bgr);
        }
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp24(1, 1, [0x00, 0x00, 0xff])).unwrap();
    fs::write(format!("{dir}/bmp_4x4_red.bmp"), bmp24(4, 4, [0x00, 0x00, 0xff])).unwrap();
    fs::write(format!("{dir}/bmp_5x3_padded.bmp"), bmp24(5, 3, [0x10, 0x80, 0xf0])).unwrap();
    fs::write(format!("{dir}/bmp_7x6_topdown.bmp"), bmp24(7, -6, [0x40, 0x40, 0x40])).unwrap();

    // Truncated/malformed seeds for edge coverage
    let mut short = bmp24(8, 8, [1, 2, 3]);
    short.truncate(100);
    fs::write(format!("{dir}/bmp_truncated.bin"), short).unwrap();
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/not_bmp.bin"), b"P6\n2 2\n255\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}
