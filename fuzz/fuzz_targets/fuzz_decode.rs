#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probe and full decode must never panic
    let _ = zengray::probe(data);
    let limits = zengray::Limits::max_pixels(1 << 22);
    let _ = zengray::DecodeRequest::new(data)
        .with_limits(&limits)
        .with_threads(2)
        .decode(enough::Unstoppable);
});
