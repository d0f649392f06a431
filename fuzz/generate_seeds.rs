#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // PBM 2x2, ASCII and packed
    fs::write(format!("{dir}/pbm_plain_2x2.pbm"), b"P1\n2 2\n0 1\n1 0\n").unwrap();
    fs::write(format!("{dir}/pbm_2x2.pbm"), b"P4\n2 2\n\x60").unwrap();

    // PGM 3x2, ASCII with comment and binary 16-bit
    let pgm = b"P2\n# seed\n3 2\n15\n0 5 10\n15 7 3\n";
    fs::write(format!("{dir}/pgm_plain_3x2.pgm"), pgm).unwrap();
    let pgm16 = b"P5\n2 1\n65535\n\x00\x00\xff\xff";
    fs::write(format!("{dir}/pgm16_2x1.pgm"), pgm16).unwrap();

    // PPM 2x2, ASCII and binary
    fs::write(format!("{dir}/ppm_plain_1x1.ppm"), b"P3 1 1 255 10 20 30").unwrap();
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/ppm_2x2.ppm"), ppm).unwrap();

    // PAM RGBA 1x1 and gray+alpha
    let pam = b"P7\nWIDTH 1\nHEIGHT 1\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n\
        \xff\x00\x00\xff";
    fs::write(format!("{dir}/pam_rgba_1x1.pam"), pam).unwrap();
    let pam_ga = b"P7\nWIDTH 2\nHEIGHT 1\nDEPTH 2\nMAXVAL 3\nENDHDR\n\x03\x01\x00\x03";
    fs::write(format!("{dir}/pam_ga_2x1.pam"), pam_ga).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/p7_no_endhdr.bin"), b"P7\nWIDTH 1\nHEIGHT 1\n").unwrap();
    fs::write(format!("{dir}/p2_bad_int.bin"), b"P2 2 2 25x5").unwrap();

    println!("Generated seed corpus in {dir}/");
}
