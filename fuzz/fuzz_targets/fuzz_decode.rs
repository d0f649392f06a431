#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpam::{DecodeRequest, ImageInfo, Limits, SilentSink};

fuzz_target!(|data: &[u8]| {
    // Keep allocations bounded; the header alone can ask for gigabytes.
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Limits::default()
    };
    let mut sink = SilentSink;

    // Must never panic
    let decoded = DecodeRequest::new(data)
        .with_limits(&limits)
        .with_sink(&mut sink)
        .decode(enough::Unstoppable);

    if let Ok(out) = decoded {
        assert_eq!(out.pixels().len(), out.width as usize * out.height as usize);
        let info = ImageInfo::from_bytes(data).expect("header decoded once already");
        assert_eq!((info.width, info.height), (out.width, out.height));
    }
});
