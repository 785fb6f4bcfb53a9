//! Panel geometry and DDRAM address translation
//!
//! The HD44780 keeps one DDRAM buffer per display and maps panel rows onto it
//! at fixed offsets. Two-row panels place row 1 at 0x40. Four-row panels are
//! electrically a two-line display folded in half, so rows 2 and 3 continue
//! rows 0 and 1 at 0x14 and 0x54:
//!
//! | Row | 20x4 offset | other panels |
//! |-----|-------------|--------------|
//! | 0   | 0x00        | 0x00         |
//! | 1   | 0x40        | 0x40         |
//! | 2   | 0x14        | n/a          |
//! | 3   | 0x54        | n/a          |
//!
//! ## Example
//!
//! ```
//! use hd44780_gpio::{geometry::ddram_address, PanelType};
//!
//! // Third row of a 20x4 panel starts at DDRAM 0x14
//! assert_eq!(ddram_address(PanelType::Lcd20x4, 0, 2), 0x80 | 0x14);
//!
//! // Second row of a 16x2 panel starts at DDRAM 0x40
//! assert_eq!(ddram_address(PanelType::Lcd16x2, 3, 1), 0x80 | 0x43);
//! ```

use crate::command::SET_DDRAM_ADDR;
use crate::config::PanelType;

/// Value returned by [`ddram_address`] for a row the panel does not have
///
/// This is not a usable instruction: 0xFF would select DDRAM address 0x7F,
/// which is outside every supported panel. Callers that need a checked
/// write should use [`Display::write_char_at`](crate::Display::write_char_at),
/// which rejects out-of-range positions.
pub const INVALID_ADDRESS: u8 = 0xFF;

/// Character grid and DDRAM layout of a panel type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Visible characters per row
    pub columns: u8,
    /// Visible rows
    pub rows: u8,
    /// DDRAM offset of the first character of each row, one entry per row
    pub row_offsets: &'static [u8],
}

impl PanelGeometry {
    /// Whether `(column, row)` is a visible character cell
    pub fn contains(&self, column: u8, row: u8) -> bool {
        column < self.columns && row < self.rows
    }
}

const TWO_ROW_OFFSETS: [u8; 2] = [0x00, 0x40];
const FOUR_ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

static LCD_8X2: PanelGeometry = PanelGeometry {
    columns: 8,
    rows: 2,
    row_offsets: &TWO_ROW_OFFSETS,
};

static LCD_16X2: PanelGeometry = PanelGeometry {
    columns: 16,
    rows: 2,
    row_offsets: &TWO_ROW_OFFSETS,
};

static LCD_20X2: PanelGeometry = PanelGeometry {
    columns: 20,
    rows: 2,
    row_offsets: &TWO_ROW_OFFSETS,
};

static LCD_20X4: PanelGeometry = PanelGeometry {
    columns: 20,
    rows: 4,
    row_offsets: &FOUR_ROW_OFFSETS,
};

static LCD_40X2: PanelGeometry = PanelGeometry {
    columns: 40,
    rows: 2,
    row_offsets: &TWO_ROW_OFFSETS,
};

/// Look up the geometry of a panel type
pub fn geometry(panel: PanelType) -> &'static PanelGeometry {
    match panel {
        PanelType::Lcd8x2 => &LCD_8X2,
        PanelType::Lcd16x2 => &LCD_16X2,
        PanelType::Lcd20x2 => &LCD_20X2,
        PanelType::Lcd20x4 => &LCD_20X4,
        PanelType::Lcd40x2 => &LCD_40X2,
    }
}

/// Translate a character cell into a complete set-DDRAM-address instruction
///
/// Returns `0x80 + row_offset + column`. The column is not range checked,
/// matching the controller's own wrap-around arithmetic. A row the panel
/// does not have yields [`INVALID_ADDRESS`].
///
/// # Example
///
/// ```
/// use hd44780_gpio::{geometry::{ddram_address, INVALID_ADDRESS}, PanelType};
///
/// assert_eq!(ddram_address(PanelType::Lcd20x4, 5, 3), 0xD4 + 5);
/// assert_eq!(ddram_address(PanelType::Lcd16x2, 0, 2), INVALID_ADDRESS);
/// ```
pub fn ddram_address(panel: PanelType, column: u8, row: u8) -> u8 {
    match geometry(panel).row_offsets.get(row as usize) {
        Some(offset) => SET_DDRAM_ADDR.wrapping_add(offset.wrapping_add(column)),
        None => INVALID_ADDRESS,
    }
}

/// Software-tracked cursor position used by the character stream
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Column, counted from 0 at the left
    pub column: u8,
    /// Row, counted from 0 at the top
    pub row: u8,
}

impl Position {
    /// Create a new position
    pub const fn new(column: u8, row: u8) -> Self {
        Self { column, row }
    }

    /// Position after a newline: first column of the next row, wrapping to
    /// the top row past the last one
    pub fn next_line(self, geometry: &PanelGeometry) -> Self {
        let row = self.row.saturating_add(1);
        Self {
            column: 0,
            row: if row >= geometry.rows { 0 } else { row },
        }
    }

    /// Position after writing one character
    ///
    /// Moves one column right and continues on the next row once the last
    /// column has been written.
    pub fn advance(self, geometry: &PanelGeometry) -> Self {
        let column = self.column.saturating_add(1);
        if column >= geometry.columns {
            self.next_line(geometry)
        } else {
            Self { column, ..self }
        }
    }
}
