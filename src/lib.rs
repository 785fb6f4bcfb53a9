//! HD44780 Character LCD Driver
//!
//! A driver for HD44780-compatible character displays wired in 4-bit mode to
//! plain GPIO pins.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - 8x2, 16x2, 20x2, 20x4 and 40x2 panels
//! - Character stream with newline and line wrap via [`core::fmt::Write`]
//! - Eight custom glyphs
//! - Optional RW pin, held low when wired
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::fmt::Write;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use hd44780_gpio::{glyph, Builder, DataPins, Display, Interface, Mode, PanelType};
//!
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (rs, en, d4, d5, d6, d7) = (MockPin, MockPin, MockPin, MockPin, MockPin, MockPin);
//! # let delay = MockDelay;
//! let bus = DataPins::new(d4, d5, d6, d7);
//! let interface = Interface::new(rs, en, bus, delay);
//! let config = match Builder::new().panel(PanelType::Lcd16x2).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.init();
//!
//! let _ = display.define_glyph(0, glyph::ARROW_DOWN.as_bytes());
//! let _ = writeln!(display, "Hello World!");
//! let _ = display.write_char_at(0, 1, 0);
//! let _ = display.set_mode(Mode::BlinkOn);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// HD44780 instruction set
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Panel geometry and DDRAM addressing
pub mod geometry;
/// Custom character bitmaps
pub mod glyph;
/// Hardware interface abstraction
pub mod interface;

pub use config::{Builder, Config, PanelType, Timing};
pub use display::{ControllerState, Display, Mode};
pub use error::{BuilderError, Error};
pub use geometry::{PanelGeometry, Position};
pub use glyph::Glyph;
pub use interface::InterfaceError;
pub use interface::{DataPins, DisplayInterface, Interface, NibbleBus, NoPin};
