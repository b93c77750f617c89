#![no_main]
use libfuzzer_sys::fuzz_target;
use targatex::{DecodeRequest, ImageInfo, Limits, LoadFlags};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };

    // Probe and decode must never panic
    let _ = ImageInfo::from_bytes(data);
    for flags in [
        LoadFlags::NO_RESCALE,
        LoadFlags::ORIGIN_TOP_LEFT | LoadFlags::NO_RESCALE | LoadFlags::ALPHA_MAP,
    ] {
        let Ok(image) = DecodeRequest::new(data)
            .with_flags(flags)
            .with_limits(&limits)
            .decode(enough::Unstoppable)
        else {
            continue;
        };
        assert_eq!(
            image.pixels().len(),
            image.width() as usize * image.height() as usize * image.bytes_per_pixel()
        );
    }
});
