//! BMP container: 24-bit decode to gray, 8-bit palettized encode.
//!
//! Use top-level [`crate::decode_file`], [`crate::encode_file`], etc. for the
//! full codec; this module exposes the header layout for callers that need
//! to inspect files directly.

mod decode;
mod encode;
mod header;

pub use header::{
    FILE_HEADER_SIZE, FileHeader, GRAY_PIXEL_OFFSET, INFO_HEADER_SIZE, InfoHeader, PALETTE_SIZE,
    SIGNATURE, row_stride,
};

use crate::error::BmpError;
use crate::image::GrayImage;
use crate::limits::Limits;
use enough::Stop;

/// Header summary of a decodable 24-bit BMP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Rows are stored top row first (negative header height).
    pub top_down: bool,
    /// Bytes per stored scanline, padding included.
    pub row_stride: usize,
    pub pixel_offset: u32,
}

/// Validate headers without touching pixel data.
pub fn probe(data: &[u8]) -> Result<ImageInfo, BmpError> {
    let header = decode::parse_header(data)?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        top_down: header.info.is_top_down(),
        row_stride: header.stride,
        pixel_offset: header.file.pixel_offset,
    })
}

/// Decode 24-bit BMP data to grayscale.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    threads: usize,
    stop: &dyn Stop,
) -> Result<GrayImage, BmpError> {
    decode::decode_gray(data, limits, threads, stop)
}

/// Encode to 8-bit palettized BMP.
pub(crate) fn encode(image: &GrayImage, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    encode::encode_gray8(image, stop)
}
