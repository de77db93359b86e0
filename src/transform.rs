//! 90° rotations.
//!
//! Both rotations swap the dimensions: a `w`x`h` input yields an `h`x`w`
//! output. Work is partitioned over output rows; output row `r` is built
//! from source column `r` (clockwise) or `w - 1 - r` (counterclockwise), so
//! every worker writes only its own contiguous band. This splits the work by
//! source column rather than by source row; the output is identical.

use crate::image::GrayImage;
use crate::parallel::{num_threads, parallel_rows};

/// Rotate 90° clockwise: `out[x * h + (h - 1 - y)] = in[y * w + x]`.
pub fn rotate_clockwise(image: &GrayImage) -> GrayImage {
    rotate_clockwise_with_threads(image, num_threads())
}

/// Rotate 90° counterclockwise: `out[(w - 1 - x) * h + y] = in[y * w + x]`.
pub fn rotate_counterclockwise(image: &GrayImage) -> GrayImage {
    rotate_counterclockwise_with_threads(image, num_threads())
}

pub fn rotate_clockwise_with_threads(image: &GrayImage, threads: usize) -> GrayImage {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let src = image.pixels();
    let mut out = vec![0u8; src.len()];

    parallel_rows(&mut out, h, 0..w, threads, |rows, band| {
        for (x, out_row) in rows.zip(band.chunks_exact_mut(h)) {
            // out_row[h - 1 - y] = in[y][x]
            for (y, dst) in out_row.iter_mut().rev().enumerate() {
                *dst = src[y * w + x];
            }
        }
    });

    GrayImage::from_parts(image.height(), image.width(), out)
}

pub fn rotate_counterclockwise_with_threads(image: &GrayImage, threads: usize) -> GrayImage {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let src = image.pixels();
    let mut out = vec![0u8; src.len()];

    parallel_rows(&mut out, h, 0..w, threads, |rows, band| {
        for (r, out_row) in rows.zip(band.chunks_exact_mut(h)) {
            let x = w - 1 - r;
            for (y, dst) in out_row.iter_mut().enumerate() {
                *dst = src[y * w + x];
            }
        }
    });

    GrayImage::from_parts(image.height(), image.width(), out)
}
