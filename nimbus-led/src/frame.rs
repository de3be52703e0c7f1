//! Pixel frame buffer and colour math
//!
//! All math is 8-bit fixed point; no floats on the display MCU.

use heapless::Vec;
use smart_leds::RGB8;

/// Maximum number of LEDs on the strip
pub const MAX_LEDS: usize = 64;

pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// One rendered frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: Vec<RGB8, MAX_LEDS>,
}

impl Frame {
    /// Create a black frame of `len` pixels (clamped to `MAX_LEDS`)
    pub fn new(len: usize) -> Self {
        let mut pixels = Vec::new();
        for _ in 0..len.min(MAX_LEDS) {
            // Cannot fail: bounded by capacity
            let _ = pixels.push(BLACK);
        }
        Self { pixels }
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the frame has no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel data, strip order
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    /// Mutable pixel data
    pub fn pixels_mut(&mut self) -> &mut [RGB8] {
        &mut self.pixels
    }

    /// Get a single pixel
    pub fn get(&self, index: usize) -> Option<RGB8> {
        self.pixels.get(index).copied()
    }

    /// Set a single pixel; out of range indices are ignored
    pub fn set(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: RGB8) {
        for pixel in self.pixels.iter_mut() {
            *pixel = color;
        }
    }

    /// Scale the whole frame by `level` (255 = unchanged)
    pub fn apply_brightness(&mut self, level: u8) {
        if level == u8::MAX {
            return;
        }
        for pixel in self.pixels.iter_mut() {
            *pixel = scale(*pixel, level);
        }
    }
}

fn scale_channel(value: u8, level: u8) -> u8 {
    ((u16::from(value) * (u16::from(level) + 1)) >> 8) as u8
}

/// Scale a colour by `level / 256`, with 255 passing the colour through
pub fn scale(color: RGB8, level: u8) -> RGB8 {
    RGB8 {
        r: scale_channel(color.r, level),
        g: scale_channel(color.g, level),
        b: scale_channel(color.b, level),
    }
}

fn blend_channel(from: u8, to: u8, amount: u8) -> u8 {
    let from = u16::from(from);
    let to = u16::from(to);
    let amount = u16::from(amount);
    ((from * (255 - amount) + to * amount) / 255) as u8
}

/// Linear blend: `amount` 0 gives `from`, 255 gives `to`
pub fn blend(from: RGB8, to: RGB8, amount: u8) -> RGB8 {
    RGB8 {
        r: blend_channel(from.r, to.r, amount),
        g: blend_channel(from.g, to.g, amount),
        b: blend_channel(from.b, to.b, amount),
    }
}

/// Position within a repeating period, as 0..=255
pub fn sawtooth(t_ms: u32, period_ms: u32) -> u8 {
    if period_ms == 0 {
        return 0;
    }
    ((u64::from(t_ms % period_ms) * 256) / u64::from(period_ms)) as u8
}

/// Triangle wave over `period_ms`: 0 → 255 → 0
pub fn triangle(t_ms: u32, period_ms: u32) -> u8 {
    let phase = sawtooth(t_ms, period_ms);
    if phase < 128 {
        phase * 2
    } else {
        (255 - phase) * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clamped_to_max() {
        assert_eq!(Frame::new(10).len(), 10);
        assert_eq!(Frame::new(MAX_LEDS + 5).len(), MAX_LEDS);
        assert!(Frame::new(0).is_empty());
    }

    #[test]
    fn test_set_out_of_range_ignored() {
        let mut frame = Frame::new(3);
        frame.set(5, RGB8::new(1, 2, 3));
        frame.set(1, RGB8::new(1, 2, 3));
        assert_eq!(frame.get(1), Some(RGB8::new(1, 2, 3)));
        assert_eq!(frame.get(5), None);
    }

    #[test]
    fn test_scale() {
        let white = RGB8::new(255, 255, 255);
        assert_eq!(scale(white, 255), white);
        assert_eq!(scale(white, 0), BLACK);
        assert_eq!(scale(RGB8::new(200, 100, 0), 127), RGB8::new(100, 50, 0));
    }

    #[test]
    fn test_blend_endpoints() {
        let a = RGB8::new(10, 20, 30);
        let b = RGB8::new(200, 150, 100);
        assert_eq!(blend(a, b, 0), a);
        assert_eq!(blend(a, b, 255), b);
    }

    #[test]
    fn test_triangle() {
        assert_eq!(triangle(0, 1000), 0);
        assert!(triangle(500, 1000) >= 254);
        assert!(triangle(999, 1000) < 4);
        assert_eq!(triangle(1000, 1000), 0);
        assert_eq!(triangle(123, 0), 0);
    }

    #[test]
    fn test_brightness() {
        let mut frame = Frame::new(2);
        frame.fill(RGB8::new(200, 200, 200));
        frame.apply_brightness(255);
        assert_eq!(frame.get(0), Some(RGB8::new(200, 200, 200)));
        frame.apply_brightness(0);
        assert_eq!(frame.get(1), Some(BLACK));
    }
}
