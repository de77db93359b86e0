use std::fs::File;
use std::io::Write;
use std::path::Path;

use enough::Stop;

use crate::error::BmpError;
use crate::image::GrayImage;

/// Encode a grayscale image as an 8-bit palettized BMP in memory.
pub fn encode_bmp(image: &GrayImage, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    crate::bmp::encode(image, &stop)
}

/// Encode a grayscale image and write it to `path`.
///
/// The file is only created once encoding has succeeded, so an encode error
/// never leaves a partial file behind.
pub fn encode_file(
    path: impl AsRef<Path>,
    image: &GrayImage,
    stop: impl Stop,
) -> Result<(), BmpError> {
    let bytes = encode_bmp(image, stop)?;
    write_file(path.as_ref(), &bytes)
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<(), BmpError> {
    let mut file = File::create(path).map_err(|source| {
        log::error!("cannot open {} for writing: {source}", path.display());
        BmpError::FileOpen {
            path: path.to_path_buf(),
            source,
        }
    })?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|source| BmpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
