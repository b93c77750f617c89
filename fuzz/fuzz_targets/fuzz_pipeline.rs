#![no_main]
use libfuzzer_sys::fuzz_target;
use targatex::*;

fuzz_target!(|data: &[u8]| {
    // Decoded images must rescale to powers of two and halve down to 1x1
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let Ok(image) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    assert!(image.width().is_power_of_two());
    assert!(image.height().is_power_of_two());

    let levels = MipChain::new(&image).count() as u32;
    assert_eq!(levels, mip_level_count(image.width(), image.height()));
});
