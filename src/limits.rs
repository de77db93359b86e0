use crate::BmpError;

/// Resource limits applied while decoding.
///
/// All fields default to `None` (no limit). Limits are checked after the
/// headers are parsed and before the grayscale buffer is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded grayscale buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Limits with only a pixel-count bound.
    pub fn max_pixels(max_pixels: u64) -> Self {
        Self {
            max_pixels: Some(max_pixels),
            ..Self::default()
        }
    }

    /// Check a `width`x`height` gray image whose buffer needs `bytes` bytes.
    pub(crate) fn check(&self, width: u32, height: u32, bytes: usize) -> Result<(), BmpError> {
        let exceeded = |what: &str, value: u64, limit: u64| {
            BmpError::LimitExceeded(format!("{what} {value} exceeds limit {limit}"))
        };

        if let Some(max_w) = self.max_width.filter(|&m| u64::from(width) > m) {
            return Err(exceeded("width", width.into(), max_w));
        }
        if let Some(max_h) = self.max_height.filter(|&m| u64::from(height) > m) {
            return Err(exceeded("height", height.into(), max_h));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max_px) = self.max_pixels.filter(|&m| pixels > m) {
            return Err(exceeded("pixel count", pixels, max_px));
        }
        if let Some(max_mem) = self.max_memory_bytes.filter(|&m| bytes as u64 > m) {
            return Err(exceeded("allocation bytes", bytes as u64, max_mem));
        }
        Ok(())
    }
}
