/// Integer luma: `floor(0.30 R + 0.59 G + 0.11 B)`.
///
/// Evaluated exactly in integers so white maps to 255 instead of the 254
/// that floating-point weights can truncate to.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((30 * u32::from(r) + 59 * u32::from(g) + 11 * u32::from(b)) / 100) as u8
}

/// Convert one packed BGR scanline to gray.
///
/// `bgr` must hold at least `3 * gray.len()` bytes; trailing row padding is
/// ignored.
#[inline]
pub(crate) fn bgr_row_to_gray(bgr: &[u8], gray: &mut [u8]) {
    for (out, px) in gray.iter_mut().zip(bgr.chunks_exact(3)) {
        *out = luma(px[2], px[1], px[0]);
    }
}
