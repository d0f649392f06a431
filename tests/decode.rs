//! Decode every sub-format from hand-written files, plus each failure class.

use std::io::{self, Read};

use enough::{StopReason, Unstoppable};
use zenpam::*;

/// Decode without printing the expected failures to stderr.
fn quiet(data: &[u8]) -> Result<DecodeOutput, PnmError> {
    let mut sink = SilentSink;
    DecodeRequest::new(data)
        .with_sink(&mut sink)
        .decode(Unstoppable)
}

fn kind_of(data: &[u8]) -> ErrorKind {
    quiet(data).expect_err("decode should fail").kind()
}

const GRAY_80: u32 = 0x8080_80FF;

// ── PBM ──────────────────────────────────────────────────────────────

#[test]
fn p1_checkerboard() {
    let out = decode(b"P1\n2 2\n0 1\n1 0\n", Unstoppable).unwrap();
    assert_eq!((out.width, out.height), (2, 2));
    assert_eq!(out.format, PnmFormat::PlainPbm);
    assert_eq!(out.pixels(), &[WHITE, BLACK, BLACK, WHITE]);
}

#[test]
fn p1_comments_between_pixels() {
    let out = decode(b"P1\n# header\n3 1\n1# pixel comment 0 0\n0\n1\n", Unstoppable).unwrap();
    assert_eq!(out.pixels(), &[BLACK, WHITE, BLACK]);
}

#[test]
fn p1_truncated() {
    assert_eq!(kind_of(b"P1\n2 2\n0 1\n1"), ErrorKind::Truncated);
}

#[test]
fn p4_packed_bits() {
    // 8x2: 0b1000_0001, 0b0111_1110
    let out = decode(b"P4\n8 2\n\x81\x7e", Unstoppable).unwrap();
    assert_eq!(out.format, PnmFormat::Pbm);
    let px = out.pixels();
    assert_eq!(px[0], BLACK);
    assert!(px[1..7].iter().all(|&p| p == WHITE));
    assert_eq!(px[7], BLACK);
    assert_eq!(px[8], WHITE);
    assert!(px[9..15].iter().all(|&p| p == BLACK));
    assert_eq!(px[15], WHITE);
}

#[test]
fn p4_truncated() {
    assert_eq!(kind_of(b"P4\n8 2\n\x81"), ErrorKind::Truncated);
}

// ── PGM ──────────────────────────────────────────────────────────────

#[test]
fn p2_comment_does_not_change_values() {
    let with = decode(b"P2\n#note\n2 1\n255\n0 255\n", Unstoppable).unwrap();
    let without = decode(b"P2\n2 1\n255\n0 255\n", Unstoppable).unwrap();
    assert_eq!(with, without);
    assert_eq!(with.pixels(), &[0x0000_00FF, 0xFFFF_FFFF]);
}

#[test]
fn p2_scales_small_maxval() {
    let out = decode(b"P2 3 1 4 0 2 4", Unstoppable).unwrap();
    assert_eq!(out.pixels(), &[0x0000_00FF, 0x7F7F_7FFF, 0xFFFF_FFFF]);
}

#[test]
fn p2_sample_over_maxval() {
    assert_eq!(kind_of(b"P2 2 1 100 50 101"), ErrorKind::Range);
}

#[test]
fn p2_malformed_sample() {
    let err = quiet(b"P2 2 1 255 12 3x").unwrap_err();
    assert!(matches!(err, PnmError::MalformedInteger { found: 'x' }));
}

#[test]
fn p5_8bit() {
    let out = decode(b"P5\n3 1\n255\n\x00\x80\xff", Unstoppable).unwrap();
    assert_eq!(out.pixels(), &[0x0000_00FF, GRAY_80, 0xFFFF_FFFF]);
}

#[test]
fn p5_16bit() {
    let out = decode(b"P5\n2 1\n65535\n\x00\x00\xff\xff", Unstoppable).unwrap();
    assert_eq!(out.pixels(), &[0x0000_00FF, 0xFFFF_FFFF]);
}

#[test]
fn p5_16bit_odd_length() {
    assert_eq!(kind_of(b"P5\n2 1\n65535\n\x00\x00\xff"), ErrorKind::Truncated);
}

#[test]
fn p5_binary_byte_may_look_like_whitespace() {
    // first pixel is 0x0A, a line feed
    let out = decode(b"P5 2 1 255\n\x0a\x20", Unstoppable).unwrap();
    assert_eq!(out.pixels(), &[0x0A0A_0AFF, 0x2020_20FF]);
}

// ── PPM ──────────────────────────────────────────────────────────────

#[test]
fn p3_rgb() {
    let out = decode(b"P3\n2 1\n255\n255 0 0   0 128 255\n", Unstoppable).unwrap();
    assert_eq!(out.pixels(), &[0xFF00_00FF, 0x0080_FFFF]);
}

#[test]
fn p3_missing_sample() {
    assert_eq!(kind_of(b"P3\n1 1\n255\n1 2\n"), ErrorKind::Truncated);
}

#[test]
fn p6_rgb() {
    let out = decode(b"P6\n2 1\n255\n\x0a\x14\x1e\xff\x00\x80", Unstoppable).unwrap();
    assert_eq!(out.format, PnmFormat::Ppm);
    assert_eq!(out.pixels(), &[0x0A14_1EFF, 0xFF00_80FF]);
}

#[test]
fn p6_truncated_pixel_data() {
    let err = quiet(b"P6\n2 2\n255\n\x00\x00\x00\x00\x00").unwrap_err();
    assert!(matches!(err, PnmError::UnexpectedEof(_)));
}

// ── PAM ──────────────────────────────────────────────────────────────

#[test]
fn p7_rgba_keeps_alpha() {
    let out = decode(
        b"P7\nWIDTH 1\nHEIGHT 1\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n\x0a\x14\x1e\x28",
        Unstoppable,
    )
    .unwrap();
    assert_eq!(out.pixels(), &[0x0A14_1E28]);
}

#[test]
fn p7_gray() {
    let out = decode(
        b"P7\nWIDTH 2\nHEIGHT 1\nDEPTH 1\nMAXVAL 255\nENDHDR\n\x80\xff",
        Unstoppable,
    )
    .unwrap();
    assert_eq!(out.pixels(), &[GRAY_80, 0xFFFF_FFFF]);
}

#[test]
fn p7_gray_alpha_16bit() {
    let out = decode(
        b"P7\nWIDTH 1\nHEIGHT 1\nDEPTH 2\nMAXVAL 65535\nENDHDR\n\xff\xff\x00\x00",
        Unstoppable,
    )
    .unwrap();
    assert_eq!(out.pixels(), &[0xFFFF_FF00]);
}

#[test]
fn p7_rgb() {
    let out = decode(
        b"P7 WIDTH 1 HEIGHT 2 DEPTH 3 MAXVAL 1 ENDHDR \x01\x00\x01\x00\x01\x00",
        Unstoppable,
    )
    .unwrap();
    assert_eq!(out.pixels(), &[0xFF00_FFFF, 0x00FF_00FF]);
}

#[test]
fn p7_unknown_key_similar_to_known_one() {
    let out = decode(
        b"P7\nWIDTHX 9\nWIDTH 1\nHEIGHT 1\nDEPTH 1\nMAXVAL 255\nENDHDR\n\x00",
        Unstoppable,
    )
    .unwrap();
    assert_eq!(out.width, 1);
    assert_eq!(out.pixels(), &[0x0000_00FF]);
}

#[test]
fn p7_comments_in_header() {
    let out = decode(
        b"P7\n# c\nWIDTH 1 # width\nHEIGHT 1\nDEPTH 1\nMAXVAL 255\nENDHDR\n\xff",
        Unstoppable,
    )
    .unwrap();
    assert_eq!(out.pixels(), &[0xFFFF_FFFF]);
}

#[test]
fn p7_missing_endhdr() {
    assert_eq!(kind_of(b"P7\nWIDTH 1\nHEIGHT 1\n"), ErrorKind::Format);
}

#[test]
fn p7_depth_out_of_range() {
    for depth in ["0", "5"] {
        let data = format!(
            "P7\nWIDTH 1\nHEIGHT 1\nDEPTH {depth}\nMAXVAL 255\nENDHDR\n\x00\x00\x00\x00\x00"
        );
        let err = quiet(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PnmError::OutOfRange { field: "depth", .. }), "{err}");
    }
}

#[test]
fn p7_missing_width() {
    let err = quiet(b"P7\nHEIGHT 1\nDEPTH 1\nMAXVAL 255\nENDHDR\n\x00").unwrap_err();
    assert!(matches!(err, PnmError::ZeroDimension("width")));
}

// ── Header failures ──────────────────────────────────────────────────

#[test]
fn invalid_magic() {
    for data in [&b""[..], &b"P"[..], &b"P0 1 1"[..], &b"P8"[..], &b"GIF89a"[..]] {
        let err = quiet(data).unwrap_err();
        assert!(matches!(err, PnmError::UnrecognizedFormat));
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}

#[test]
fn maxval_rejected_before_allocation() {
    // No pixel data and a zero memory budget: only header validation can fail
    // these, and it must do so before the allocation limit is consulted.
    let limits = Limits {
        max_buffer_bytes: Some(0),
        ..Limits::default()
    };
    for data in [&b"P5 1 1 0\n"[..], &b"P5 1 1 70000\n"[..]] {
        let mut sink = SilentSink;
        let err = DecodeRequest::new(data)
            .with_limits(&limits)
            .with_sink(&mut sink)
            .decode(Unstoppable)
            .unwrap_err();
        assert!(matches!(err, PnmError::OutOfRange { field: "maxval", .. }), "{err}");
    }
}

#[test]
fn zero_width_and_height() {
    let err = quiet(b"P6 0 1 255\n").unwrap_err();
    assert_eq!(err.to_string(), "width must be at least 1");
    let err = quiet(b"P4 1 0\n").unwrap_err();
    assert_eq!(err.to_string(), "height must be at least 1");
}

#[test]
fn header_truncated() {
    assert_eq!(kind_of(b"P3 1"), ErrorKind::Truncated);
    assert_eq!(kind_of(b"P6\n# only a comment"), ErrorKind::Truncated);
}

#[test]
fn header_integer_overflow() {
    let err = quiet(b"P5 99999999999999999999999 1 255\n").unwrap_err();
    assert!(matches!(err, PnmError::IntegerOverflow));
    assert_eq!(err.to_string(), "integer does not fit in 32 bits");
}

#[test]
fn header_malformed_integer() {
    let err = quiet(b"P3 1 1 2.5\n").unwrap_err();
    assert!(matches!(err, PnmError::MalformedInteger { found: '.' }));
}

#[test]
fn limits_are_enforced() {
    let limits = Limits {
        max_width: Some(2),
        ..Limits::default()
    };
    let mut sink = SilentSink;
    let err = DecodeRequest::new(b"P5 3 1 255\n\x00\x00\x00")
        .with_limits(&limits)
        .with_sink(&mut sink)
        .decode(Unstoppable)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Limit);
}

// ── Sinks, sources, cancellation ─────────────────────────────────────

#[test]
fn collecting_sink_sees_structured_error() {
    let mut sink = CollectingSink::default();
    let _ = DecodeRequest::new(b"P2 1 1 10 11")
        .with_sink(&mut sink)
        .decode(Unstoppable);
    assert_eq!(
        sink.diagnostics,
        [Diagnostic {
            kind: ErrorKind::Range,
            message: "pixel value 11 greater than maxval 10".into(),
        }]
    );
}

#[test]
fn reader_source_matches_slice() {
    let data = b"P7\nWIDTH 2\nHEIGHT 2\nDEPTH 3\nMAXVAL 300\nENDHDR\n\
        \x00\x00\x00\x96\x01\x2c\x01\x2c\x00\x00\x00\x00\
        \x00\x01\x00\x02\x00\x03\x00\x04\x00\x05\x00\x06";
    let from_slice = decode(data, Unstoppable).unwrap();
    let from_reader = decode_reader(std::io::Cursor::new(&data[..]), Unstoppable).unwrap();
    assert_eq!(from_slice, from_reader);
    assert_eq!(from_slice.pixels()[0], 0x007F_FFFF);
}

#[test]
fn decode_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("zenpam-test-{}.pgm", std::process::id()));
    std::fs::write(&path, b"P5 1 1 255\n\x80").unwrap();
    let out = decode_file(&path, Unstoppable);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(out.unwrap().pixels(), &[GRAY_80]);
}

#[test]
fn decode_file_missing() {
    let path = std::env::temp_dir().join("zenpam-test-does-not-exist.ppm");
    let err = decode_file(&path, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn open_failure_goes_to_the_sink() {
    let path = std::env::temp_dir().join("zenpam-test-does-not-exist.pam");
    let mut sink = CollectingSink::default();
    let err = DecodeRequest::from_file(&path)
        .with_sink(&mut sink)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PnmError::Io(_)));
    assert_eq!(sink.diagnostics.len(), 1);
    assert_eq!(sink.diagnostics[0].kind, ErrorKind::Io);
}

/// Serves `data[..fail_at]`, then fails every read.
struct BrokenReader {
    data: &'static [u8],
    fail_at: usize,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_at == 0 {
            return Err(io::Error::other("device unplugged"));
        }
        let n = buf.len().min(self.fail_at).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        self.fail_at -= n;
        Ok(n)
    }
}

#[test]
fn reader_failing_mid_header() {
    let reader = BrokenReader {
        data: b"P6\n2 2\n255\n",
        fail_at: 4,
    };
    let mut sink = CollectingSink::default();
    let err = DecodeRequest::from_reader(reader)
        .with_sink(&mut sink)
        .decode(Unstoppable)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains("device unplugged"), "{err}");
    assert_eq!(sink.diagnostics.len(), 1);
}

#[test]
fn reader_failing_mid_pixels() {
    let reader = BrokenReader {
        data: b"P5 4 1 255\n\x00\x01\x02\x03",
        fail_at: 13,
    };
    let mut sink = SilentSink;
    let err = DecodeRequest::from_reader(reader)
        .with_sink(&mut sink)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PnmError::Io(_)));
}

/// Interrupts before every successful read.
struct InterruptingReader {
    data: &'static [u8],
    interrupt: bool,
}

impl Read for InterruptingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::ErrorKind::Interrupted.into());
        }
        let n = buf.len().min(1).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn interrupted_reads_are_retried() {
    let reader = InterruptingReader {
        data: b"P2 2 1 255 0 255",
        interrupt: false,
    };
    let out = decode_reader(reader, Unstoppable).unwrap();
    assert_eq!(out.pixels(), &[0x0000_00FF, 0xFFFF_FFFF]);
}

struct AlwaysStop;

impl Stop for AlwaysStop {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

#[test]
fn cancellation_is_reported() {
    let mut sink = SilentSink;
    let err = DecodeRequest::new(b"P5 1 1 255\n\x00")
        .with_sink(&mut sink)
        .decode(AlwaysStop)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[test]
fn image_info_probe() {
    let info = ImageInfo::from_bytes(b"P3\n640 480\n1023\n").unwrap();
    assert_eq!(info.format, PnmFormat::PlainPpm);
    assert_eq!((info.width, info.height, info.maxval), (640, 480, 1023));
    assert_eq!(info.channels, Channels::Rgb);
    assert!(info.format.is_plain());

    let info = ImageInfo::from_reader(&b"P4 9 9\n"[..]).unwrap();
    assert_eq!(info.maxval, 1);
}
