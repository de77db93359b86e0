//! # zengray
//!
//! 24-bit BMP to 8-bit grayscale BMP codec with parallel rotation and
//! Gaussian blur.
//!
//! ## Pipeline
//!
//! - **Decode**: uncompressed 24-bit BMP → [`GrayImage`], converted with
//!   truncating integer luma `floor(0.30 R + 0.59 G + 0.11 B)`. Bottom-up and
//!   top-down (negative height) files both decode top row first.
//! - **Transform**: [`rotate_clockwise`], [`rotate_counterclockwise`],
//!   [`gaussian_blur`] (fixed 5×5 kernel, borders passed through).
//! - **Encode**: [`GrayImage`] → 8-bit BMP with an identity grayscale palette.
//!
//! Every pixel pass is fork-join: the work is split into contiguous row
//! blocks, one rayon task per block, joined before the call returns. See
//! [`parallel`].
//!
//! ## Non-Goals
//!
//! - Any input depth other than 24-bit, any output depth other than 8-bit
//! - Compressed BMP variants (RLE, bitfields)
//! - Resizing or configurable kernels
//!
//! ## Usage
//!
//! ```no_run
//! use zengray::{Unstoppable, decode_file, encode_file, rotate_clockwise};
//!
//! let gray = decode_file("input.bmp", Unstoppable)?;
//! let rotated = rotate_clockwise(&gray);
//! assert_eq!(rotated.width(), gray.height());
//! drop(gray);
//! encode_file("rotated.bmp", &rotated, Unstoppable)?;
//! # Ok::<(), zengray::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod encode;
mod error;
mod filter;
mod image;
mod limits;
mod luma;
mod transform;

pub mod bmp;
pub mod parallel;
pub mod pipeline;

// Re-exports
pub use bmp::{ImageInfo, probe, row_stride};
pub use decode::{DecodeRequest, decode_bmp, decode_file};
pub use encode::{encode_bmp, encode_file};
pub use enough::{Stop, Unstoppable};
pub use error::BmpError;
pub use filter::{GAUSSIAN_KERNEL, KERNEL_SUM, gaussian_blur, gaussian_blur_with_threads};
pub use image::GrayImage;
pub use limits::Limits;
pub use luma::luma;
pub use parallel::parallel_for;
pub use transform::{
    rotate_clockwise, rotate_clockwise_with_threads, rotate_counterclockwise,
    rotate_counterclockwise_with_threads,
};
