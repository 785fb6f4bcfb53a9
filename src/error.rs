//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Timing values below the datasheet minimum
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - GPIO errors from the pins
//!
//! The HD44780 protocol itself has no acknowledgement, so a miswired or
//! unpowered panel is not detectable and never shows up as an error.
//!
//! ## Example
//!
//! ```
//! use hd44780_gpio::{Builder, BuilderError};
//!
//! let result = Builder::new().command_settle_us(5).build();
//! assert!(matches!(result, Err(BuilderError::InvalidTiming { .. })));
//! ```

use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Character cell outside the panel
    ///
    /// Returned by positioned writes when `column >= columns()` or
    /// `row >= rows()`.
    OutOfBounds {
        /// Requested column
        column: u8,
        /// Requested row
        row: u8,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::OutOfBounds { column, row } => {
                write!(f, "Position out of bounds: column={column}, row={row}")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// A timing value is shorter than the controller tolerates
    InvalidTiming {
        /// Name of the [`Timing`](crate::config::Timing) field
        parameter: &'static str,
        /// Requested value in microseconds
        value: u32,
        /// Smallest accepted value in microseconds
        minimum: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidTiming {
                parameter,
                value,
                minimum,
            } => write!(
                f,
                "Invalid timing: {parameter} = {value}us (minimum {minimum}us)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
