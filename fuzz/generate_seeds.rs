#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(image_type: u8, cmap_len: u16, cmap_bits: u8, w: u16, h: u16, bpp: u8, desc: u8) -> Vec<u8> {
    let mut h18 = vec![0u8; 18];
    h18[1] = u8::from(cmap_len > 0);
    h18[2] = image_type;
    h18[5..7].copy_from_slice(&cmap_len.to_le_bytes());
    h18[7] = cmap_bits;
    h18[12..14].copy_from_slice(&w.to_le_bytes());
    h18[14..16].copy_from_slice(&h.to_le_bytes());
    h18[16] = bpp;
    h18[17] = desc;
    h18
}

fn main() {
    use std::fs;
    for target in ["fuzz_decode", "fuzz_pipeline"] {
        let dir = format!("fuzz/corpus/{target}");
        fs::create_dir_all(&dir).unwrap();

        // Truecolor 2x2, bottom-left
        let mut tga = header(2, 0, 0, 2, 2, 24, 0x00);
        tga.extend_from_slice(&[0, 0, 255, 0, 255, 0, 255, 0, 0, 128, 128, 128]);
        fs::write(format!("{dir}/rgb_2x2.tga"), tga).unwrap();

        // BGRA 3x1, top-right, 8 alpha bits
        let mut tga = header(2, 0, 0, 3, 1, 32, 0x38);
        tga.extend_from_slice(&[1, 2, 3, 255, 4, 5, 6, 128, 7, 8, 9, 0]);
        fs::write(format!("{dir}/rgba_3x1.tga"), tga).unwrap();

        // Grayscale 3x3
        let mut tga = header(3, 0, 0, 3, 3, 8, 0x20);
        tga.extend_from_slice(&[0, 32, 64, 96, 128, 160, 192, 224, 255]);
        fs::write(format!("{dir}/gray_3x3.tga"), tga).unwrap();

        // RLE truecolor 5x1: repeat 4, raw 1
        let mut tga = header(10, 0, 0, 5, 1, 24, 0x00);
        tga.extend_from_slice(&[0x83, 10, 20, 30, 0x00, 40, 50, 60]);
        fs::write(format!("{dir}/rle_rgb_5x1.tga"), tga).unwrap();

        // Colormapped 2x2 with a 3-entry 24-bit map
        let mut tga = header(1, 3, 24, 2, 2, 8, 0x00);
        tga.extend_from_slice(&[255, 0, 0, 0, 255, 0, 0, 0, 255]);
        tga.extend_from_slice(&[0, 1, 2, 1]);
        fs::write(format!("{dir}/mapped_2x2.tga"), tga).unwrap();

        // RLE colormapped 4x1
        let mut tga = header(9, 2, 32, 4, 1, 8, 0x00);
        tga.extend_from_slice(&[0, 0, 0, 255, 255, 255, 255, 255]);
        tga.extend_from_slice(&[0x81, 0, 0x01, 1, 0]);
        fs::write(format!("{dir}/rle_mapped_4x1.tga"), tga).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/short_header.bin"), &header(2, 0, 0, 1, 1, 24, 0)[..10]).unwrap();
        fs::write(format!("{dir}/depth_16.bin"), header(2, 0, 0, 1, 1, 16, 0)).unwrap();
        fs::write(format!("{dir}/truncated_rle.bin"), {
            let mut t = header(10, 0, 0, 64, 64, 32, 0);
            t.push(0xFF);
            t
        })
        .unwrap();
    }

    println!("Generated seed corpus in fuzz/corpus/");
}
