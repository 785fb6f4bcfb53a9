//! Display configuration types and builder

pub use crate::error::BuilderError;

/// Supported panel formats
///
/// Each format selects a fixed [`PanelGeometry`](crate::geometry::PanelGeometry).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelType {
    /// 8 columns, 2 rows
    Lcd8x2,
    /// 16 columns, 2 rows
    #[default]
    Lcd16x2,
    /// 20 columns, 2 rows
    Lcd20x2,
    /// 20 columns, 4 rows
    Lcd20x4,
    /// 40 columns, 2 rows
    Lcd40x2,
}

/// Smallest settle time the datasheet allows after a regular instruction
pub const MIN_COMMAND_SETTLE_US: u32 = 37;

/// Smallest settle time the datasheet allows after clear/return home
pub const MIN_LONG_SETTLE_US: u32 = 1_520;

/// Smallest spacing between the three resync nibbles during initialization
pub const MIN_INIT_RETRY_US: u32 = 2_000;

/// Smallest wait after power-on before the first nibble
pub const MIN_POWER_ON_US: u32 = 15_000;

/// Protocol timing in microseconds
///
/// The defaults follow the HD44780 datasheet at 270kHz oscillator frequency.
/// Slower clones may need longer settle times; shorter values than the
/// datasheet minimum are rejected by [`Builder::build`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Wait after power-on before the first nibble is sent
    pub power_on_us: u32,
    /// Wait after each of the three resync nibbles
    pub init_retry_us: u32,
    /// Width of each enable level, and the data setup time before it
    pub enable_pulse_us: u32,
    /// Wait after every byte for the controller to execute it
    pub command_settle_us: u32,
    /// Additional wait after clear display and return home
    pub long_settle_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            power_on_us: MIN_POWER_ON_US,
            // Datasheet asks for 4.1ms after the first resync nibble
            init_retry_us: 4_100,
            enable_pulse_us: 1,
            command_settle_us: 40,
            long_settle_us: 2_000,
        }
    }
}

impl Timing {
    fn validate(&self) -> Result<(), BuilderError> {
        let checks = [
            ("power_on_us", self.power_on_us, MIN_POWER_ON_US),
            ("init_retry_us", self.init_retry_us, MIN_INIT_RETRY_US),
            ("enable_pulse_us", self.enable_pulse_us, 1),
            (
                "command_settle_us",
                self.command_settle_us,
                MIN_COMMAND_SETTLE_US,
            ),
            ("long_settle_us", self.long_settle_us, MIN_LONG_SETTLE_US),
        ];
        for (parameter, value, minimum) in checks {
            if value < minimum {
                return Err(BuilderError::InvalidTiming {
                    parameter,
                    value,
                    minimum,
                });
            }
        }
        Ok(())
    }
}

/// Display configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Panel format
    pub panel: PanelType,
    /// Protocol timing
    pub timing: Timing,
    /// Switch the display on at the end of initialization
    ///
    /// The init sequence itself leaves display, cursor and blink off.
    pub display_on_after_init: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            panel: PanelType::default(),
            timing: Timing::default(),
            display_on_after_init: true,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use hd44780_gpio::{Builder, PanelType};
///
/// let config = match Builder::new().panel(PanelType::Lcd20x4).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.panel, PanelType::Lcd20x4);
/// assert_eq!(config.timing.command_settle_us, 40);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values (16x2 panel, datasheet timing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the panel format
    pub fn panel(mut self, panel: PanelType) -> Self {
        self.config.panel = panel;
        self
    }

    /// Replace all protocol timing
    pub fn timing(mut self, timing: Timing) -> Self {
        self.config.timing = timing;
        self
    }

    /// Set the wait after each byte
    pub fn command_settle_us(mut self, us: u32) -> Self {
        self.config.timing.command_settle_us = us;
        self
    }

    /// Set the additional wait after clear display and return home
    pub fn long_settle_us(mut self, us: u32) -> Self {
        self.config.timing.long_settle_us = us;
        self
    }

    /// Set whether the display is switched on after initialization
    pub fn display_on_after_init(mut self, value: bool) -> Self {
        self.config.display_on_after_init = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidTiming` if any timing value is below the
    /// datasheet minimum
    pub fn build(self) -> Result<Config, BuilderError> {
        self.config.timing.validate()?;
        Ok(self.config)
    }
}
