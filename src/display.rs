//! Core display operations

use log::{debug, warn};

use crate::command::{
    BLINK_ON, BUS_4BIT, CLEAR_DISPLAY, CURSOR_ON, CURSOR_SHIFT, DISPLAY_CONTROL, DISPLAY_MOVE,
    DISPLAY_ON, ENTRY_LEFT, ENTRY_MODE_SET, ENTRY_SHIFT_DECREMENT, ENTRY_SHIFT_INCREMENT,
    FONT_5X8, FUNCTION_SET, GLYPH_SLOTS, INIT_NIBBLE_4BIT, INIT_NIBBLE_8BIT, MOVE_LEFT,
    MOVE_RIGHT, ONE_LINE, RETURN_HOME, SET_CGRAM_ADDR, TWO_LINE,
};
use crate::config::{Config, PanelType};
use crate::error::Error;
use crate::geometry::{self, PanelGeometry, Position};
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Display and entry mode changes accepted by [`Display::set_mode`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Show the display contents
    DisplayOn,
    /// Blank the display, DDRAM is kept
    DisplayOff,
    /// Show the underline cursor
    CursorOn,
    /// Hide the underline cursor
    CursorOff,
    /// Blink the character cell at the cursor
    BlinkOn,
    /// Stop blinking
    BlinkOff,
    /// Shift the visible window one column left, DDRAM is untouched
    ScrollLeft,
    /// Shift the visible window one column right, DDRAM is untouched
    ScrollRight,
    /// Cursor advances to the right after each write
    LeftToRight,
    /// Cursor advances to the left after each write
    RightToLeft,
    /// Shift the whole display on each write ("right justify" from the cursor)
    AutoscrollOn,
    /// Keep the display still on each write ("left justify" from the cursor)
    AutoscrollOff,
}

/// Controller registers mirrored in software
///
/// The HD44780 is write-only in this wiring, so the driver keeps its own copy
/// of every flag it has set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerState {
    /// Entry mode flags (`ENTRY_LEFT`, `ENTRY_SHIFT_INCREMENT`)
    pub entry_mode: u8,
    /// Display control flags (`DISPLAY_ON`, `CURSOR_ON`, `BLINK_ON`)
    pub display_control: u8,
    /// Where the character stream continues
    pub cursor: Position,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            entry_mode: ENTRY_LEFT | ENTRY_SHIFT_DECREMENT,
            display_control: 0,
            cursor: Position::default(),
        }
    }
}

/// Core display driver for HD44780
///
/// Sequences instruction and data bytes through a [`DisplayInterface`] and
/// keeps the controller state the hardware cannot report back. All operations
/// block until the controller has executed them.
///
/// ## Example
///
/// ```rust,no_run
/// use core::fmt::Write;
/// use hd44780_gpio::{Builder, DataPins, Display, Interface, Mode, PanelType};
/// # use core::convert::Infallible;
/// # use embedded_hal::delay::DelayNs;
/// # use embedded_hal::digital::OutputPin;
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// let bus = DataPins::new(MockPin, MockPin, MockPin, MockPin);
/// let interface = Interface::new(MockPin, MockPin, bus, MockDelay);
/// let config = match Builder::new().panel(PanelType::Lcd20x4).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
///
/// let mut display = Display::new(interface, config);
/// let _ = display.init();
/// let _ = writeln!(display, "Hello World!");
/// let _ = display.set_mode(Mode::BlinkOn);
/// ```
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Byte transfer layer
    interface: I,
    /// Display configuration
    config: Config,
    /// Software copy of the controller registers
    state: ControllerState,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Applies the configured timing to the interface. Nothing is sent until
    /// [`init`](Self::init) is called.
    pub fn new(mut interface: I, config: Config) -> Self {
        interface.configure(&config.timing);
        Self {
            interface,
            config,
            state: ControllerState::default(),
        }
    }

    /// Bring the controller into 4-bit mode and a known state
    ///
    /// Must run once after power-on before any other operation. Running it
    /// again resynchronizes a controller that has lost nibble alignment.
    ///
    /// Display, cursor and blink are switched off during the sequence; the
    /// display is switched back on at the end unless
    /// [`Config::display_on_after_init`] is false.
    pub fn init(&mut self) -> DisplayResult<I> {
        let timing = self.config.timing;
        debug!("Initializing {:?} panel", self.config.panel);

        self.interface.delay_us(timing.power_on_us);

        // Whatever mode the controller is in, three 0x3 nibbles leave it in
        // 8-bit mode with nibble alignment restored
        for _ in 0..3 {
            self.write_nibble(INIT_NIBBLE_8BIT)?;
            self.interface.delay_us(timing.init_retry_us);
        }
        self.write_nibble(INIT_NIBBLE_4BIT)?;
        self.interface.delay_us(timing.command_settle_us);

        let lines = if self.rows() > 1 { TWO_LINE } else { ONE_LINE };
        self.send_command(FUNCTION_SET | BUS_4BIT | lines | FONT_5X8)?;

        self.state = ControllerState::default();
        self.send_command(DISPLAY_CONTROL | self.state.display_control)?;
        self.clear()?;
        self.send_command(ENTRY_MODE_SET | self.state.entry_mode)?;

        if self.config.display_on_after_init {
            self.set_mode(Mode::DisplayOn)?;
        }

        debug!("Initialization complete");
        Ok(())
    }

    /// Clear the display and move the cursor to (0, 0)
    pub fn clear(&mut self) -> DisplayResult<I> {
        self.send_command(CLEAR_DISPLAY)?;
        self.interface.delay_us(self.config.timing.long_settle_us);
        self.locate(0, 0);
        Ok(())
    }

    /// Move the cursor to (0, 0) and undo any display shift
    ///
    /// DDRAM contents are kept.
    pub fn return_home(&mut self) -> DisplayResult<I> {
        self.send_command(RETURN_HOME)?;
        self.interface.delay_us(self.config.timing.long_settle_us);
        self.locate(0, 0);
        Ok(())
    }

    /// Set where the character stream continues
    ///
    /// Only the software cursor moves; nothing is sent to the controller
    /// until the next streamed character.
    pub fn locate(&mut self, column: u8, row: u8) {
        self.state.cursor = Position::new(column, row);
    }

    /// Write one character code at a cell, bypassing the stream cursor
    ///
    /// Codes 0..=7 show the glyphs defined with
    /// [`define_glyph`](Self::define_glyph).
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the cell is outside the panel; nothing
    /// is sent in that case.
    pub fn write_char_at(&mut self, column: u8, row: u8, code: u8) -> DisplayResult<I> {
        if !self.geometry().contains(column, row) {
            return Err(Error::OutOfBounds { column, row });
        }
        let address = self.address(column, row);
        self.send_command(address)?;
        self.send_data(code)
    }

    /// Change one display or entry mode setting
    ///
    /// Each mode changes exactly one flag and re-sends the instruction that
    /// owns it. [`Mode::ScrollLeft`] and [`Mode::ScrollRight`] only shift the
    /// visible window and leave no state behind.
    pub fn set_mode(&mut self, mode: Mode) -> DisplayResult<I> {
        debug!("Setting mode {:?}", mode);
        match mode {
            Mode::DisplayOn => self.update_display_control(DISPLAY_ON, true),
            Mode::DisplayOff => self.update_display_control(DISPLAY_ON, false),
            Mode::CursorOn => self.update_display_control(CURSOR_ON, true),
            Mode::CursorOff => self.update_display_control(CURSOR_ON, false),
            Mode::BlinkOn => self.update_display_control(BLINK_ON, true),
            Mode::BlinkOff => self.update_display_control(BLINK_ON, false),
            Mode::ScrollLeft => self.send_command(CURSOR_SHIFT | DISPLAY_MOVE | MOVE_LEFT),
            Mode::ScrollRight => self.send_command(CURSOR_SHIFT | DISPLAY_MOVE | MOVE_RIGHT),
            Mode::LeftToRight => self.update_entry_mode(ENTRY_LEFT, true),
            Mode::RightToLeft => self.update_entry_mode(ENTRY_LEFT, false),
            Mode::AutoscrollOn => self.update_entry_mode(ENTRY_SHIFT_INCREMENT, true),
            Mode::AutoscrollOff => self.update_entry_mode(ENTRY_SHIFT_INCREMENT, false),
        }
    }

    /// Load a custom 5x8 glyph into one of the eight CGRAM slots
    ///
    /// Each bitmap byte is one row, top first, with the lower 5 bits used.
    /// Slots above 7 are ignored.
    pub fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) -> DisplayResult<I> {
        if slot >= GLYPH_SLOTS {
            warn!("Ignoring glyph for slot {}", slot);
            return Ok(());
        }
        self.send_command(SET_CGRAM_ADDR | ((slot & 0x07) << 3))?;
        // CGRAM address auto-increments after each row
        for row in bitmap {
            self.send_data(*row)?;
        }
        Ok(())
    }

    /// Feed one byte into the character stream
    ///
    /// `\n` moves the cursor to the start of the next row without touching
    /// the display. Any other byte is written at the cursor, which then
    /// advances and wraps to the next row after the last column. Both wrap
    /// from the last row back to the first.
    pub fn put_byte(&mut self, byte: u8) -> DisplayResult<I> {
        let geometry = self.geometry();
        if byte == b'\n' {
            self.state.cursor = self.state.cursor.next_line(geometry);
            return Ok(());
        }
        let Position { column, row } = self.state.cursor;
        self.write_char_at(column, row, byte)?;
        self.state.cursor = self.state.cursor.advance(geometry);
        Ok(())
    }

    /// Feed a sequence of bytes into the character stream
    pub fn write_bytes(&mut self, bytes: &[u8]) -> DisplayResult<I> {
        for byte in bytes {
            self.put_byte(*byte)?;
        }
        Ok(())
    }

    /// Read from the character stream
    ///
    /// Reading is not supported by this wiring; always `None`.
    #[allow(clippy::unused_self, clippy::needless_pass_by_ref_mut)]
    pub fn read_byte(&mut self) -> Option<u8> {
        None
    }

    /// Set-DDRAM-address instruction for a cell
    ///
    /// See [`geometry::ddram_address`] for the out-of-range behavior.
    pub fn address(&self, column: u8, row: u8) -> u8 {
        geometry::ddram_address(self.config.panel, column, row)
    }

    /// Number of visible rows
    pub fn rows(&self) -> u8 {
        self.geometry().rows
    }

    /// Number of visible columns
    pub fn columns(&self) -> u8 {
        self.geometry().columns
    }

    /// Geometry of the configured panel
    pub fn geometry(&self) -> &'static PanelGeometry {
        geometry::geometry(self.config.panel)
    }

    /// Configured panel format
    pub fn panel(&self) -> PanelType {
        self.config.panel
    }

    /// Where the character stream continues
    pub fn cursor(&self) -> Position {
        self.state.cursor
    }

    /// Current display control flags
    pub fn display_control(&self) -> u8 {
        self.state.display_control
    }

    /// Current entry mode flags
    pub fn entry_mode(&self) -> u8 {
        self.state.entry_mode
    }

    /// Software copy of the controller registers
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.interface
    }

    fn update_display_control(&mut self, flag: u8, on: bool) -> DisplayResult<I> {
        set_flag(&mut self.state.display_control, flag, on);
        self.send_command(DISPLAY_CONTROL | self.state.display_control)
    }

    fn update_entry_mode(&mut self, flag: u8, on: bool) -> DisplayResult<I> {
        set_flag(&mut self.state.entry_mode, flag, on);
        self.send_command(ENTRY_MODE_SET | self.state.entry_mode)
    }

    /// Send an initialization nibble to the controller
    fn write_nibble(&mut self, nibble: u8) -> DisplayResult<I> {
        self.interface.write_nibble(nibble).map_err(Error::Interface)
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: u8) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}

fn set_flag(flags: &mut u8, flag: u8, on: bool) {
    if on {
        *flags |= flag;
    } else {
        *flags &= !flag;
    }
}

impl<I> core::fmt::Write for Display<I>
where
    I: DisplayInterface,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_bytes(s.as_bytes())
            .map_err(|_| core::fmt::Error)
    }
}
