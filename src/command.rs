//! HD44780 instruction set
//!
//! This module defines the instruction bytes and flag bits understood by the
//! HD44780 controller. Instructions are sent with the RS pin low, character
//! and glyph bytes with RS high.
//!
//! ## Instruction Structure
//!
//! Each instruction is identified by its highest set bit; the bits below it
//! are flags. A complete instruction is the instruction bit OR'ed with its
//! flags:
//!
//! | Instruction        | Bit  | Flags                              |
//! |--------------------|------|------------------------------------|
//! | Clear display      | 0x01 | none                               |
//! | Return home        | 0x02 | none                               |
//! | Entry mode set     | 0x04 | I/D (0x02), S (0x01)               |
//! | Display control    | 0x08 | D (0x04), C (0x02), B (0x01)       |
//! | Cursor/display shift | 0x10 | S/C (0x08), R/L (0x04)           |
//! | Function set       | 0x20 | DL (0x10), N (0x08), F (0x04)      |
//! | Set CGRAM address  | 0x40 | 6-bit address                      |
//! | Set DDRAM address  | 0x80 | 7-bit address                      |
//!
//! ## Example
//!
//! ```
//! use hd44780_gpio::command;
//!
//! // 4-bit bus, two display lines, 5x8 font
//! let function_set = command::FUNCTION_SET | command::BUS_4BIT | command::TWO_LINE;
//! assert_eq!(function_set, 0x28);
//!
//! // Display on, cursor and blink off
//! let display_control = command::DISPLAY_CONTROL | command::DISPLAY_ON;
//! assert_eq!(display_control, 0x0C);
//! ```

// Instructions

/// Clear display instruction (0x01)
///
/// Fills DDRAM with spaces and moves the address counter to 0.
/// Takes up to 1.52ms to execute.
pub const CLEAR_DISPLAY: u8 = 0x01;

/// Return home instruction (0x02)
///
/// Moves the address counter to 0 and undoes any display shift.
/// Takes up to 1.52ms to execute.
pub const RETURN_HOME: u8 = 0x02;

/// Entry mode set instruction (0x04)
///
/// Combined with [`ENTRY_LEFT`] and [`ENTRY_SHIFT_INCREMENT`].
pub const ENTRY_MODE_SET: u8 = 0x04;

/// Display on/off control instruction (0x08)
///
/// Combined with [`DISPLAY_ON`], [`CURSOR_ON`] and [`BLINK_ON`].
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Cursor or display shift instruction (0x10)
///
/// Combined with [`DISPLAY_MOVE`] and [`MOVE_RIGHT`]. Does not change DDRAM.
pub const CURSOR_SHIFT: u8 = 0x10;

/// Function set instruction (0x20)
///
/// Combined with [`BUS_8BIT`], [`TWO_LINE`] and [`FONT_5X10`].
pub const FUNCTION_SET: u8 = 0x20;

/// Set CGRAM address instruction (0x40)
///
/// The lower 6 bits select the glyph row; glyph `n` starts at `n << 3`.
pub const SET_CGRAM_ADDR: u8 = 0x40;

/// Set DDRAM address instruction (0x80)
///
/// The lower 7 bits select the display position.
pub const SET_DDRAM_ADDR: u8 = 0x80;

// Entry mode flags

/// Cursor moves right after each write (I/D = 1)
pub const ENTRY_LEFT: u8 = 0x02;
/// Cursor moves left after each write (I/D = 0)
pub const ENTRY_RIGHT: u8 = 0x00;
/// Whole display shifts on each write (S = 1)
pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;
/// Display does not shift on write (S = 0)
pub const ENTRY_SHIFT_DECREMENT: u8 = 0x00;

// Display control flags

/// Display visible (D = 1)
pub const DISPLAY_ON: u8 = 0x04;
/// Underline cursor visible (C = 1)
pub const CURSOR_ON: u8 = 0x02;
/// Cursor position blinks (B = 1)
pub const BLINK_ON: u8 = 0x01;

// Cursor/display shift flags

/// Shift the whole display instead of the cursor (S/C = 1)
pub const DISPLAY_MOVE: u8 = 0x08;
/// Move the cursor only (S/C = 0)
pub const CURSOR_MOVE: u8 = 0x00;
/// Shift to the right (R/L = 1)
pub const MOVE_RIGHT: u8 = 0x04;
/// Shift to the left (R/L = 0)
pub const MOVE_LEFT: u8 = 0x00;

// Function set flags

/// 8-bit data bus (DL = 1)
pub const BUS_8BIT: u8 = 0x10;
/// 4-bit data bus (DL = 0)
pub const BUS_4BIT: u8 = 0x00;
/// Two display lines (N = 1)
///
/// Four-row panels are also driven in two-line mode; the controller only
/// knows one or two lines.
pub const TWO_LINE: u8 = 0x08;
/// One display line (N = 0)
pub const ONE_LINE: u8 = 0x00;
/// 5x10 dot font (F = 1), only valid in one-line mode
pub const FONT_5X10: u8 = 0x04;
/// 5x8 dot font (F = 0)
pub const FONT_5X8: u8 = 0x00;

// 4-bit initialization nibbles

/// Upper nibble of an 8-bit function set, sent alone during initialization
///
/// Sent three times to bring the controller into a known 8-bit state
/// regardless of what it was doing before.
pub const INIT_NIBBLE_8BIT: u8 = 0x03;

/// Upper nibble of a 4-bit function set, sent alone after the resync
pub const INIT_NIBBLE_4BIT: u8 = 0x02;

/// Number of user-definable glyph slots in CGRAM
pub const GLYPH_SLOTS: u8 = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_set_two_line_4bit() {
        assert_eq!(FUNCTION_SET | BUS_4BIT | TWO_LINE | FONT_5X8, 0x28);
    }

    #[test]
    fn test_default_entry_mode() {
        assert_eq!(ENTRY_MODE_SET | ENTRY_LEFT | ENTRY_SHIFT_DECREMENT, 0x06);
    }

    #[test]
    fn test_scroll_commands() {
        assert_eq!(CURSOR_SHIFT | DISPLAY_MOVE | MOVE_LEFT, 0x18);
        assert_eq!(CURSOR_SHIFT | DISPLAY_MOVE | MOVE_RIGHT, 0x1C);
    }
}
