//! BMP encoder: 8-bit indexed with an identity grayscale palette.

use enough::Stop;

use super::header::{FileHeader, InfoHeader, row_stride, write_gray_palette};
use crate::error::BmpError;
use crate::image::GrayImage;

/// Encode a grayscale image as a bottom-up 8-bit palettized BMP.
pub(crate) fn encode_gray8(image: &GrayImage, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let (width, height) = (image.width(), image.height());
    let too_large = || BmpError::DimensionsTooLarge { width, height };

    let w = width as usize;
    let h = height as usize;
    let row_stride = row_stride(w, 1).ok_or_else(too_large)?;
    let image_size = row_stride.checked_mul(h).ok_or_else(too_large)?;
    let image_size = u32::try_from(image_size).map_err(|_| too_large())?;
    let info = InfoHeader::gray8(width, height, image_size)?;
    let file = FileHeader::gray8(image_size).ok_or_else(too_large)?;
    let file_size = file.file_size as usize;

    let mut out = Vec::with_capacity(file_size);
    file.write_to(&mut out);
    info.write_to(&mut out);
    write_gray_palette(&mut out);

    let pad_bytes = row_stride - w;
    for (i, row) in image.pixels().chunks_exact(w).rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        out.extend_from_slice(row);
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}
