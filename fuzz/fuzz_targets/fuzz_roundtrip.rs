#![no_main]
use libfuzzer_sys::fuzz_target;
use zengray::bmp::GRAY_PIXEL_OFFSET;
use zengray::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits::max_pixels(1 << 20);
    let Ok(gray) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // Encoded output must carry the same dimensions and samples, rows bottom-up
    let encoded = encode_bmp(&gray, enough::Unstoppable).expect("encode of decoded image failed");
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    let stride = row_stride(w, 1).unwrap();
    assert_eq!(encoded.len(), GRAY_PIXEL_OFFSET + stride * h);
    for y in 0..h {
        let start = GRAY_PIXEL_OFFSET + (h - 1 - y) * stride;
        assert_eq!(&encoded[start..start + w], gray.row(y as u32).unwrap());
    }

    // Rotations must invert each other
    let cw = rotate_clockwise(&gray);
    assert_eq!(rotate_counterclockwise(&cw), gray);
});
