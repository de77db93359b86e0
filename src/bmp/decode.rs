//! 24-bit uncompressed BMP decoder with parallel luma conversion.

use enough::Stop;

use super::header::{FileHeader, InfoHeader, row_stride};
use crate::error::BmpError;
use crate::image::{GrayImage, checked_len};
use crate::limits::Limits;
use crate::luma::bgr_row_to_gray;
use crate::parallel::parallel_rows;

/// Parsed and validated 24-bit BMP header.
pub(crate) struct BmpHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
    pub width: u32,
    pub height: u32,
    /// Bytes per stored scanline, padding included.
    pub stride: usize,
}

impl BmpHeader {
    fn pixel_range(&self, data_len: usize) -> Result<core::ops::Range<usize>, BmpError> {
        let start = self.file.pixel_offset as usize;
        let end = self
            .stride
            .checked_mul(self.height as usize)
            .and_then(|size| size.checked_add(start))
            .ok_or(BmpError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })?;
        if end > data_len {
            return Err(BmpError::TruncatedData {
                needed: end,
                actual: data_len,
            });
        }
        Ok(start..end)
    }
}

/// Parse both headers and reject anything but positive-width, non-zero-height,
/// uncompressed 24-bit data.
pub(crate) fn parse_header(data: &[u8]) -> Result<BmpHeader, BmpError> {
    let file = FileHeader::parse(data)?;
    let info = InfoHeader::parse(data)?;

    if info.width <= 0 || info.height == 0 {
        return Err(BmpError::InvalidDimensions {
            width: info.width.into(),
            height: info.height.into(),
        });
    }
    if info.bit_count != 24 {
        return Err(BmpError::UnsupportedVariant(format!(
            "{} bits per pixel, only 24 is supported",
            info.bit_count
        )));
    }
    if info.compression != 0 {
        return Err(BmpError::UnsupportedVariant(format!(
            "compression type {}, only uncompressed is supported",
            info.compression
        )));
    }

    let width = info.width as u32;
    let height = info.height.unsigned_abs();
    let stride = row_stride(width as usize, 3)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;

    Ok(BmpHeader {
        file,
        info,
        width,
        height,
        stride,
    })
}

/// Decode 24-bit BGR rows into a top-row-first grayscale image.
pub(crate) fn decode_gray(
    data: &[u8],
    limits: Option<&Limits>,
    threads: usize,
    stop: &dyn Stop,
) -> Result<GrayImage, BmpError> {
    let header = parse_header(data)?;
    let (width, height) = (header.width, header.height);
    let out_len = checked_len(width, height)?;
    if let Some(limits) = limits {
        limits.check(width, height, out_len)?;
    }

    let src = &data[header.pixel_range(data.len())?];
    let top_down = header.info.is_top_down();
    log::debug!(
        "bmp: {width}x{height} 24bpp, stride {}, offset {}, {}",
        header.stride,
        header.file.pixel_offset,
        if top_down { "top-down" } else { "bottom-up" }
    );

    stop.check()?;

    let w = width as usize;
    let h = height as usize;
    let stride = header.stride;
    let mut pixels = vec![0u8; out_len];
    parallel_rows(&mut pixels, w, 0..h, threads, |rows, band| {
        for (y, gray_row) in rows.zip(band.chunks_exact_mut(w)) {
            let stored = if top_down { y } else { h - 1 - y };
            let start = stored * stride;
            bgr_row_to_gray(&src[start..start + w * 3], gray_row);
        }
    });

    Ok(GrayImage::from_parts(width, height, pixels))
}
