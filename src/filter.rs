//! 5×5 Gaussian blur.

use crate::image::GrayImage;
use crate::parallel::{num_threads, parallel_rows};

/// Integer Gaussian weights; each is divided by [`KERNEL_SUM`].
pub const GAUSSIAN_KERNEL: [[u32; 5]; 5] = [
    [1, 4, 7, 4, 1],
    [4, 16, 26, 16, 4],
    [7, 26, 41, 26, 7],
    [4, 16, 26, 16, 4],
    [1, 4, 7, 4, 1],
];

pub const KERNEL_SUM: u32 = 273;

const RADIUS: usize = 2;

/// Blur with [`GAUSSIAN_KERNEL`].
///
/// Pixels within two of any edge are copied through unchanged; interior
/// sums are truncated, not rounded. Images narrower or shorter than 5
/// pixels come back unchanged.
pub fn gaussian_blur(image: &GrayImage) -> GrayImage {
    gaussian_blur_with_threads(image, num_threads())
}

pub fn gaussian_blur_with_threads(image: &GrayImage, threads: usize) -> GrayImage {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let src = image.pixels();
    let mut out = vec![0u8; src.len()];

    if w > 2 * RADIUS && h > 2 * RADIUS {
        parallel_rows(&mut out, w, RADIUS..h - RADIUS, threads, |rows, band| {
            for (y, out_row) in rows.zip(band.chunks_exact_mut(w)) {
                for x in RADIUS..w - RADIUS {
                    out_row[x] = convolve_at(src, w, x, y);
                }
            }
        });
    }

    // Border pass: disjoint from the interior writes above.
    for y in 0..h {
        let row = y * w..(y + 1) * w;
        if y < RADIUS || y + RADIUS >= h {
            out[row.clone()].copy_from_slice(&src[row]);
            continue;
        }
        for x in (0..w).filter(|&x| x < RADIUS || x + RADIUS >= w) {
            out[y * w + x] = src[y * w + x];
        }
    }

    GrayImage::from_parts(image.width(), image.height(), out)
}

#[inline]
fn convolve_at(src: &[u8], w: usize, x: usize, y: usize) -> u8 {
    let mut sum = 0u32;
    for (ky, weights) in GAUSSIAN_KERNEL.iter().enumerate() {
        let start = (y + ky - RADIUS) * w + x - RADIUS;
        for (px, &k) in src[start..start + 5].iter().zip(weights) {
            sum += u32::from(*px) * k;
        }
    }
    // max is 255 * 273 / 273, so the quotient always fits
    (sum / KERNEL_SUM) as u8
}
