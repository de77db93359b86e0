use std::fs::File;
use std::io::Read;
use std::path::Path;

use enough::Stop;

use crate::error::BmpError;
use crate::image::GrayImage;
use crate::limits::Limits;
use crate::parallel::num_threads;

/// Builder for decoding a 24-bit BMP with optional limits and worker count.
///
/// ```no_run
/// use zengray::{DecodeRequest, Limits, Unstoppable};
///
/// let data = std::fs::read("input.bmp")?;
/// let limits = Limits::max_pixels(64 * 1024 * 1024);
/// let gray = DecodeRequest::new(&data)
///     .with_limits(&limits)
///     .with_threads(4)
///     .decode(Unstoppable)?;
/// println!("{}x{}", gray.width(), gray.height());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    threads: Option<usize>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            threads: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Worker threads for the grayscale pass. Defaults to [`num_threads`].
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<GrayImage, BmpError> {
        let threads = self.threads.unwrap_or_else(num_threads);
        crate::bmp::decode(self.data, self.limits, threads, &stop)
    }
}

/// Decode an in-memory 24-bit BMP to grayscale.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<GrayImage, BmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Read and decode a 24-bit BMP file.
pub fn decode_file(path: impl AsRef<Path>, stop: impl Stop) -> Result<GrayImage, BmpError> {
    let data = read_file(path.as_ref())?;
    decode_bmp(&data, stop)
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, BmpError> {
    let mut file = File::open(path).map_err(|source| {
        log::error!("cannot open {} for reading: {source}", path.display());
        BmpError::FileOpen {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|source| BmpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(data)
}
