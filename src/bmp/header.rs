//! Fixed-layout BMP file header and BITMAPINFOHEADER.

use crate::error::BmpError;

/// `"BM"` read as a little-endian `u16`.
pub const SIGNATURE: u16 = 0x4D42;
pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;
/// 256 entries of (B, G, R, reserved).
pub const PALETTE_SIZE: usize = 256 * 4;
/// Pixel offset of every file the encoder writes: 14 + 40 + 1024.
pub const GRAY_PIXEL_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;

/// Bytes per scanline for `width` pixels of `bytes_per_pixel` bytes, rounded
/// up to a multiple of 4. `None` on overflow.
pub fn row_stride(width: usize, bytes_per_pixel: usize) -> Option<usize> {
    width
        .checked_mul(bytes_per_pixel)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

/// BITMAPFILEHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub pixel_offset: u32,
}

/// BITMAPINFOHEADER (40-byte DIB header).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Negative height marks top-down row order.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

// ── Little-endian cursor over a header slice ─────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        buf
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }
}

fn require(data: &[u8], needed: usize) -> Result<(), BmpError> {
    if data.len() < needed {
        return Err(BmpError::TruncatedData {
            needed,
            actual: data.len(),
        });
    }
    Ok(())
}

impl FileHeader {
    /// Header for an 8-bit palettized image with `image_size` bytes of rows.
    ///
    /// `None` if the total file size does not fit the 32-bit size field.
    pub(crate) fn gray8(image_size: u32) -> Option<Self> {
        let pixel_offset = GRAY_PIXEL_OFFSET as u32;
        Some(Self {
            signature: SIGNATURE,
            file_size: pixel_offset.checked_add(image_size)?,
            reserved1: 0,
            reserved2: 0,
            pixel_offset,
        })
    }

    /// Parse the first 14 bytes of `data`.
    ///
    /// Fails with [`BmpError::TruncatedData`] on short input and
    /// [`BmpError::InvalidFormat`] if the signature is not `BM`.
    pub fn parse(data: &[u8]) -> Result<Self, BmpError> {
        if let [lo, hi, ..] = *data {
            let signature = u16::from_le_bytes([lo, hi]);
            if signature != SIGNATURE {
                return Err(BmpError::InvalidFormat(format!(
                    "bad signature {signature:#06x}, expected {SIGNATURE:#06x}"
                )));
            }
        }
        require(data, FILE_HEADER_SIZE)?;
        let mut c = Cursor::new(data, 0);
        Ok(Self {
            signature: c.u16(),
            file_size: c.u32(),
            reserved1: c.u16(),
            reserved2: c.u16(),
            pixel_offset: c.u32(),
        })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signature.to_le_bytes());
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.pixel_offset.to_le_bytes());
    }
}

impl InfoHeader {
    /// Header for a bottom-up 8-bit image using the full 256-entry palette.
    ///
    /// Fails with [`BmpError::DimensionsTooLarge`] if either dimension does
    /// not fit the signed header fields.
    pub(crate) fn gray8(width: u32, height: u32, image_size: u32) -> Result<Self, BmpError> {
        let too_large = |_| BmpError::DimensionsTooLarge { width, height };
        Ok(Self {
            header_size: INFO_HEADER_SIZE as u32,
            width: i32::try_from(width).map_err(too_large)?,
            height: i32::try_from(height).map_err(too_large)?, // positive = bottom-up
            planes: 1,
            bit_count: 8,
            compression: 0,
            image_size,
            x_pels_per_meter: 0,
            y_pels_per_meter: 0,
            colors_used: 256,
            colors_important: 0,
        })
    }

    /// Parse the 40 bytes following the file header.
    pub fn parse(data: &[u8]) -> Result<Self, BmpError> {
        require(data, FILE_HEADER_SIZE + INFO_HEADER_SIZE)?;
        let mut c = Cursor::new(data, FILE_HEADER_SIZE);
        Ok(Self {
            header_size: c.u32(),
            width: c.i32(),
            height: c.i32(),
            planes: c.u16(),
            bit_count: c.u16(),
            compression: c.u32(),
            image_size: c.u32(),
            x_pels_per_meter: c.i32(),
            y_pels_per_meter: c.i32(),
            colors_used: c.u32(),
            colors_important: c.u32(),
        })
    }

    /// Rows are stored top row first.
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_important.to_le_bytes());
    }
}

/// Append the identity grayscale palette: entry `i` is `(i, i, i, 0)`.
pub(crate) fn write_gray_palette(out: &mut Vec<u8>) {
    for i in 0..=255u8 {
        out.extend_from_slice(&[i, i, i, 0]);
    }
}
