#![allow(dead_code)]

/// Build an uncompressed 24-bit BMP. `rgb(x, y)` gives the color of the
/// pixel at column `x`, row `y` counted from the top of the picture.
pub fn bmp24(width: u32, height: u32, top_down: bool, rgb: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let stride = (width as usize * 3 + 3) & !3;
    let image_size = stride * height as usize;
    let mut out = Vec::with_capacity(54 + image_size);

    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((54 + image_size) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());

    let stored_height = if top_down {
        -(height as i32)
    } else {
        height as i32
    };
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&stored_height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for stored in 0..height {
        let y = if top_down { stored } else { height - 1 - stored };
        for x in 0..width {
            let [r, g, b] = rgb(x, y);
            out.extend_from_slice(&[b, g, r]);
        }
        out.extend(std::iter::repeat_n(0xEE, stride - width as usize * 3));
    }
    out
}

/// Solid-color 24-bit BMP, stored bottom-up.
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    bmp24(width, height, false, |_, _| rgb)
}

/// Deterministic xorshift noise for transform tests.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

pub fn le_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

pub fn le_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

pub fn le_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(data[offset..offset + 2].try_into().unwrap())
}

/// A [`enough::Stop`] that allows `remaining` checks, then reports
/// [`enough::StopReason::Cancelled`] on every check after that.
pub struct StopAfter {
    remaining: std::sync::atomic::AtomicUsize,
}

impl StopAfter {
    pub fn new(checks: usize) -> Self {
        Self {
            remaining: std::sync::atomic::AtomicUsize::new(checks),
        }
    }
}

impl enough::Stop for StopAfter {
    fn check(&self) -> Result<(), enough::StopReason> {
        use std::sync::atomic::Ordering;
        self.remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| enough::StopReason::Cancelled)
    }
}
