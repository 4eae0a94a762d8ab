/// internal resolution of the CHIP-8 display
pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// The 64x32 monochrome frame buffer the interpreter draws into. Rows are
/// indexed by y, columns by x; `true` is a lit pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; SCREEN_WIDTH]; SCREEN_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];
    }

    /// is the pixel at (x, y) lit; coordinates wrap
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y % SCREEN_HEIGHT][x % SCREEN_WIDTH]
    }

    /// XOR a sprite onto the screen with its top-left corner at (x, y).
    ///
    /// Each byte of `rows` is one 8 pixel row, most significant bit on the
    /// left. Sprites wrap around both edges rather than clipping. Returns
    /// true if any lit pixel was switched off.
    pub fn blit(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in rows.iter().enumerate() {
            let py = (y as usize + row) % SCREEN_HEIGHT;
            for col in 0..8 {
                if (byte >> (7 - col)) & 0x1 == 0 {
                    continue;
                }
                let px = (x as usize + col) % SCREEN_WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel;
                *pixel ^= true;
            }
        }
        collision
    }

    /// (x, y) of every pixel in the given state
    pub fn coords(&self, lit: bool) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(move |(_, p)| **p == lit)
                .map(move |(x, _)| (x, y))
        })
    }

    pub fn lit_count(&self) -> usize {
        self.coords(true).count()
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
    fn test_new_is_dark() {
        let fb = FrameBuffer::new();
        assert_eq!(fb.lit_count(), 0);
        assert_eq!(fb.coords(false).count(), SCREEN_WIDTH * SCREEN_HEIGHT);
    }

    #[test]
    fn test_blit_msb_first() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.blit(0, 0, &[0b1000_0001]));
        assert!(fb.get(0, 0));
        assert!(fb.get(7, 0));
        assert_eq!(fb.lit_count(), 2);
    }

    #[test]
    fn test_blit_twice_cancels_with_collision() {
        let mut fb = FrameBuffer::new();
        let sprite = [0xf0, 0x90, 0x90, 0x90, 0xf0];
        assert!(!fb.blit(10, 5, &sprite));
        assert_eq!(fb.lit_count(), 14);
        assert!(fb.blit(10, 5, &sprite));
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_blit_wraps_horizontally() {
        let mut fb = FrameBuffer::new();
        fb.blit(63, 0, &[0xff]);
        assert!(fb.get(63, 0));
        for x in 0..7 {
            assert!(fb.get(x, 0), "column {} should be lit", x);
        }
        assert!(!fb.get(7, 0));
    }

    #[test]
    fn test_blit_wraps_vertically() {
        let mut fb = FrameBuffer::new();
        fb.blit(0, 31, &[0x80, 0x80]);
        assert!(fb.get(0, 31));
        assert!(fb.get(0, 0));
    }

    #[test]
    fn test_collision_is_sticky() {
        let mut fb = FrameBuffer::new();
        fb.blit(0, 0, &[0x80]);
        // first row collides, second doesn't; the flag stays set
        assert!(fb.blit(0, 0, &[0x80, 0x80]));
        assert!(!fb.get(0, 0));
        assert!(fb.get(0, 1));
    }

    #[test]
    fn test_clear() {
        let mut fb = FrameBuffer::new();
        fb.blit(3, 3, &[0xff, 0xff]);
        fb.clear();
        assert_eq!(fb.lit_count(), 0);
    }
}
