//! Custom character bitmaps for the CGRAM
//!
//! The HD44780 holds eight user-defined 5x8 characters. Each is eight row
//! bytes, top row first, with pixel columns in bits 4..0 (bit 4 is the left
//! edge). The eighth row is shared with the underline cursor and is usually
//! left blank.
//!
//! ```text
//!  ARROW_UP
//!  ..#..  0b00100
//!  .#.#.  0b01010
//!  #...#  0b10001
//!  ..#..  0b00100
//!  ..#..  0b00100
//!  ..#..  0b00100
//!  .....  0b00000
//!  .....  0b00000
//! ```
//!
//! ## Example
//!
//! ```
//! use hd44780_gpio::glyph::{Glyph, ARROW_UP};
//!
//! // Bits above the 5 pixel columns are dropped
//! let solid = Glyph::new([0xFF; 8]);
//! assert_eq!(solid.as_bytes(), &[0x1F; 8]);
//!
//! assert!(ARROW_UP.pixel(2, 0));
//! assert!(!ARROW_UP.pixel(0, 0));
//! ```

/// Pixel columns per glyph
pub const GLYPH_WIDTH: u8 = 5;

/// Pixel rows per glyph
pub const GLYPH_HEIGHT: u8 = 8;

const ROW_MASK: u8 = (1 << GLYPH_WIDTH) - 1;

/// A 5x8 character bitmap
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Glyph([u8; 8]);

impl Glyph {
    /// Build a glyph from eight rows, top first, keeping the lower 5 bits
    pub const fn new(rows: [u8; 8]) -> Self {
        let mut masked = [0u8; 8];
        let mut index = 0;
        while index < masked.len() {
            masked[index] = rows[index] & ROW_MASK;
            index += 1;
        }
        Self(masked)
    }

    /// Row bytes in the order the CGRAM expects them
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Whether the pixel at `(x, y)` is lit, `(0, 0)` being top left
    ///
    /// Returns false outside the 5x8 cell.
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return false;
        }
        self.0[y as usize] & (1 << (GLYPH_WIDTH - 1 - x)) != 0
    }
}

impl From<[u8; 8]> for Glyph {
    fn from(rows: [u8; 8]) -> Self {
        Self::new(rows)
    }
}

/// Arrow pointing up
pub const ARROW_UP: Glyph = Glyph::new([
    0b00100, 0b01010, 0b10001, 0b00100, 0b00100, 0b00100, 0b00000, 0b00000,
]);

/// Arrow pointing down
pub const ARROW_DOWN: Glyph = Glyph::new([
    0b00000, 0b00100, 0b00100, 0b00100, 0b10001, 0b01010, 0b00100, 0b00000,
]);

/// Arrow pointing right
pub const ARROW_RIGHT: Glyph = Glyph::new([
    0b00000, 0b00100, 0b00010, 0b11001, 0b00010, 0b00100, 0b00000, 0b00000,
]);

/// Arrow pointing left
pub const ARROW_LEFT: Glyph = Glyph::new([
    0b00000, 0b00100, 0b01000, 0b10011, 0b01000, 0b00100, 0b00000, 0b00000,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_masked_to_five_bits() {
        let glyph = Glyph::new([0xE0, 0xFF, 0x20, 0x1F, 0, 0, 0, 0x81]);
        assert_eq!(glyph.as_bytes(), &[0x00, 0x1F, 0x00, 0x1F, 0, 0, 0, 0x01]);
        assert_eq!(Glyph::from([0xFF; 8]), Glyph::new([0x1F; 8]));
    }

    #[test]
    fn test_pixel_bit_order() {
        let glyph = Glyph::new([0b10000, 0b00001, 0, 0, 0, 0, 0, 0]);
        assert!(glyph.pixel(0, 0));
        assert!(!glyph.pixel(4, 0));
        assert!(glyph.pixel(4, 1));
        assert!(!glyph.pixel(5, 1));
        assert!(!glyph.pixel(0, 8));
    }

    #[test]
    fn test_arrows_leave_cursor_row_blank() {
        for glyph in [ARROW_UP, ARROW_DOWN, ARROW_RIGHT, ARROW_LEFT] {
            assert_eq!(glyph.as_bytes()[7], 0);
        }
    }

    #[test]
    fn test_up_and_down_arrows_are_mirrored() {
        let up = ARROW_UP.as_bytes();
        let down = ARROW_DOWN.as_bytes();
        for row in 0..6 {
            assert_eq!(up[row], down[6 - row]);
        }
    }

    #[test]
    fn test_left_and_right_arrows_are_mirrored() {
        for y in 0..GLYPH_HEIGHT {
            for x in 0..GLYPH_WIDTH {
                let right = ARROW_RIGHT.pixel(x, y);
                let left = ARROW_LEFT.pixel(GLYPH_WIDTH - 1 - x, y);
                assert_eq!(right, left, "({x}, {y})");
            }
        }
    }
}
