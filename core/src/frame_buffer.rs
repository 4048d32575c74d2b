use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

const PIXEL_COUNT: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// # FrameBuffer
/// The 64x32 monochrome display, one byte per pixel holding 0 (off) or 1 (on).
///
/// Pixels are stored row-major: the pixel at column `x`, row `y` lives at
/// `y * DISPLAY_WIDTH + x`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FrameBuffer {
    pixels: [u8; PIXEL_COUNT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [0; PIXEL_COUNT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [0; PIXEL_COUNT];
    }

    /// XOR a sprite onto the display with its top-left corner at `(x, y)`.
    ///
    /// Each byte of `sprite` is one 8 pixel row, most significant bit leftmost.
    /// Coordinates wrap around both edges of the display.
    /// Returns whether any lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (usize::from(y) + row) % DISPLAY_HEIGHT;
            for column in 0..8 {
                if byte & (0x80 >> column) == 0 {
                    continue;
                }
                let px = (usize::from(x) + column) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[py * DISPLAY_WIDTH + px];
                collision |= *pixel == 1;
                *pixel ^= 1;
            }
        }
        collision
    }

    /// The pixel at column `x`, row `y`; both wrap like sprite coordinates
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[(y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + x % DISPLAY_WIDTH] == 1
    }

    /// The display one row at a time, top first
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(DISPLAY_WIDTH)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&p| p == 1).count()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_sets_pixels_msb_first() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(1, 2, &[0b1010_0000]);
        assert!(fb.pixel(1, 2));
        assert!(!fb.pixel(2, 2));
        assert!(fb.pixel(3, 2));
        assert_eq!(fb.lit(), 2);
    }

    #[test]
    fn test_draw_twice_erases_and_collides() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.draw_sprite(10, 10, &[0xFF]));
        assert_eq!(fb.lit(), 8);
        assert!(fb.draw_sprite(10, 10, &[0xFF]));
        assert_eq!(fb.lit(), 0);
    }

    #[test]
    fn test_draw_xors() {
        let mut fb = FrameBuffer::new();
        // 0 1 0 1 -> set
        fb.draw_sprite(2, 0, &[0b0101_0000]);
        // 1 1 0 0 -> draw xor
        let collision = fb.draw_sprite(2, 0, &[0b1100_0000]);
        assert!(collision);
        assert_eq!(fb.as_slice()[2..6], [1, 0, 0, 1]);
    }

    #[test]
    fn test_draw_wraps_horizontally() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(63, 0, &[0b1100_0000]);
        assert!(fb.pixel(63, 0));
        assert!(fb.pixel(0, 0));
        assert!(!fb.pixel(0, 1));
    }

    #[test]
    fn test_draw_wraps_vertically() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 31, &[0x80, 0x80]);
        assert!(fb.pixel(0, 31));
        assert!(fb.pixel(0, 0));
    }

    #[test]
    fn test_clear() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 0, &[0xFF; 15]);
        fb.clear();
        assert_eq!(fb, FrameBuffer::new());
    }

    #[test]
    fn test_rows_are_row_major() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(5, 1, &[0x80]);
        let rows: Vec<&[u8]> = fb.rows().collect();
        assert_eq!(rows.len(), DISPLAY_HEIGHT);
        assert_eq!(rows[1][5], 1);
        assert_eq!(fb.as_slice()[DISPLAY_WIDTH + 5], 1);
    }
}
