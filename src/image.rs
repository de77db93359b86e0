use crate::error::BmpError;

/// Owned 8-bit grayscale raster, row-major, one byte per pixel.
///
/// Row 0 is the top of the picture. `pixels().len() == width * height`
/// always holds; every constructor checks it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// Wrap an existing pixel buffer.
    ///
    /// Fails with [`BmpError::InvalidDimensions`] if either dimension is zero
    /// and [`BmpError::BufferSizeMismatch`] if the buffer length is wrong.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BmpError> {
        let expected = checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(BmpError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image filled with a single value.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self, BmpError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![value; len],
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> u8,
    ) -> Result<Self, BmpError> {
        let len = checked_len(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Caller guarantees `pixels.len() == width * height` and both are non-zero.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Sample at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.pixels[start..start + w])
    }

    /// Size of the pixel buffer in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.pixels.len()
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, u8> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }
}

pub(crate) fn checked_len(width: u32, height: u32) -> Result<usize, BmpError> {
    if width == 0 || height == 0 {
        return Err(BmpError::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}
