//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for transferring bytes to the HD44780 over a 4-bit parallel bus.
//!
//! ## Hardware Requirements
//!
//! - 4 data lines wired to DB4..DB7 (output)
//! - **RS**: Register select (output, low=instruction, high=data)
//! - **E**: Enable strobe (output, data latched on the falling edge)
//! - **RW**: Read/write (output, optional). When left out, tie the panel's RW
//!   pin to ground; when wired, it is held low for every transfer.
//!
//! ## Transfer Timing
//!
//! Every byte goes out as two nibbles, high nibble first:
//!
//! ```text
//!  DB4..7  ==X==== high ====X==== low =====X==========
//!  E       ___|‾‾‾|____________|‾‾‾|_______________
//!             >=1us             >=1us      >=40us settle
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use hd44780_gpio::{DataPins, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! let bus = DataPins::new(MockPin, MockPin, MockPin, MockPin);
//! let mut interface = Interface::new(MockPin, MockPin, bus, MockDelay);
//!
//! // Function set: 4-bit bus, two lines
//! let _ = interface.send_command(0x28);
//!
//! // Character 'A'
//! let _ = interface.send_data(b'A');
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use core::marker::PhantomData;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType, OutputPin, PinState};
use log::trace;

use crate::config::Timing;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the byte transfer layer below the display controller
///
/// This trait abstracts over different wirings, allowing the
/// [`Display`](crate::display::Display) to work with any implementation that
/// can push bytes to the controller and wait.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Implementations
/// must honor the HD44780 timing themselves: every `send_*` call returns only
/// after the controller has had time to execute the byte.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Apply protocol timing
    ///
    /// Called once by [`Display::new`](crate::display::Display::new) with the
    /// configured [`Timing`].
    fn configure(&mut self, timing: &Timing);

    /// Send a single instruction nibble
    ///
    /// Only used during initialization, while the controller may still be in
    /// 8-bit mode. Sets RS low, presents `nibble` (lower 4 bits) on the bus and
    /// strobes E once. Does not wait for execution; the caller does.
    fn write_nibble(&mut self, nibble: u8) -> InterfaceResult<(), Self::Error>;

    /// Send an instruction byte to the controller
    ///
    /// The implementation must:
    /// 1. Set RS low (instruction register)
    /// 2. Transfer the byte as two nibbles, high nibble first
    /// 3. Wait for the controller to execute it
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send a data byte to the controller
    ///
    /// Same as [`send_command`](Self::send_command) with RS high. The byte is
    /// written to DDRAM or CGRAM, whichever address was set last.
    fn send_data(&mut self, data: u8) -> InterfaceResult<(), Self::Error>;

    /// Block for the given number of microseconds
    fn delay_us(&mut self, us: u32);
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Four data lines that together carry one nibble
///
/// Implemented for [`DataPins`] (four distinct pin types) and for `[P; 4]`
/// (four pins of one type, e.g. type-erased HAL pins ordered DB4..DB7).
pub trait NibbleBus {
    /// Error reported by the underlying pins
    type Error: Debug;

    /// Drive DB4..DB7 with bits 0..3 of `nibble`
    fn write_nibble(&mut self, nibble: u8) -> InterfaceResult<(), Self::Error>;
}

/// DB4..DB7 data pins of possibly different types
#[derive(Debug)]
pub struct DataPins<D4, D5, D6, D7> {
    d4: D4,
    d5: D5,
    d6: D6,
    d7: D7,
}

impl<D4, D5, D6, D7> DataPins<D4, D5, D6, D7> {
    /// Group the four data pins, DB4 first
    pub fn new(d4: D4, d5: D5, d6: D6, d7: D7) -> Self {
        Self { d4, d5, d6, d7 }
    }

    /// Give the pins back
    pub fn release(self) -> (D4, D5, D6, D7) {
        (self.d4, self.d5, self.d6, self.d7)
    }
}

impl<D4, D5, D6, D7, E> NibbleBus for DataPins<D4, D5, D6, D7>
where
    D4: OutputPin<Error = E>,
    D5: OutputPin<Error = E>,
    D6: OutputPin<Error = E>,
    D7: OutputPin<Error = E>,
    E: digital::Error,
{
    type Error = E;

    fn write_nibble(&mut self, nibble: u8) -> InterfaceResult<(), E> {
        self.d4.set_state(bit(nibble, 0))?;
        self.d5.set_state(bit(nibble, 1))?;
        self.d6.set_state(bit(nibble, 2))?;
        self.d7.set_state(bit(nibble, 3))?;
        Ok(())
    }
}

impl<P: OutputPin> NibbleBus for [P; 4] {
    type Error = P::Error;

    fn write_nibble(&mut self, nibble: u8) -> InterfaceResult<(), P::Error> {
        for (index, pin) in self.iter_mut().enumerate() {
            pin.set_state(bit(nibble, index as u8))?;
        }
        Ok(())
    }
}

fn bit(value: u8, index: u8) -> PinState {
    PinState::from(value & (1 << index) != 0)
}

/// Placeholder for a pin that is not wired
///
/// Used as the RW type by [`Interface::new`]. Never driven.
#[derive(Debug)]
pub struct NoPin<E = Infallible>(PhantomData<E>);

impl<E> Default for NoPin<E> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<E: digital::Error> ErrorType for NoPin<E> {
    type Error = E;
}

impl<E: digital::Error> OutputPin for NoPin<E> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// 4-bit parallel interface implementation for HD44780
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 GPIO and delay traits.
/// Owns all pins and the delay provider; they can be taken back with
/// [`release`](Self::release).
///
/// ## Type Parameters
///
/// * `RS` - Register select pin implementing [`OutputPin`]
/// * `EN` - Enable pin implementing [`OutputPin`]
/// * `BUS` - Data lines implementing [`NibbleBus`]
/// * `RW` - Read/write pin implementing [`OutputPin`], [`NoPin`] when not wired
/// * `DELAY` - Delay provider implementing [`DelayNs`]
#[derive(Debug)]
pub struct Interface<RS, EN, BUS, RW, DELAY> {
    /// Register select pin (low=instruction, high=data)
    rs: RS,
    /// Enable strobe
    en: EN,
    /// DB4..DB7
    bus: BUS,
    /// Read/write pin, held low when present
    rw: Option<RW>,
    /// Blocking delay provider
    delay: DELAY,
    /// Width of each enable level in microseconds
    enable_pulse_us: u32,
    /// Execution wait after each byte in microseconds
    settle_us: u32,
}

impl<RS, EN, BUS, DELAY> Interface<RS, EN, BUS, NoPin<RS::Error>, DELAY>
where
    RS: OutputPin,
    EN: OutputPin,
    BUS: NibbleBus,
    DELAY: DelayNs,
{
    /// Create a new Interface for a panel with RW tied to ground
    ///
    /// # Arguments
    ///
    /// * `rs` - Register select pin
    /// * `en` - Enable pin
    /// * `bus` - Data lines DB4..DB7
    /// * `delay` - Blocking delay provider
    pub fn new(rs: RS, en: EN, bus: BUS, delay: DELAY) -> Self {
        Self::build(rs, en, bus, None, delay)
    }
}

impl<RS, EN, BUS, RW, DELAY> Interface<RS, EN, BUS, RW, DELAY>
where
    RS: OutputPin,
    EN: OutputPin,
    BUS: NibbleBus,
    RW: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new Interface for a panel with its RW pin wired
    ///
    /// RW is driven low before every transfer; the driver never reads.
    pub fn with_rw(rs: RS, en: EN, bus: BUS, rw: RW, delay: DELAY) -> Self {
        Self::build(rs, en, bus, Some(rw), delay)
    }

    fn build(rs: RS, en: EN, bus: BUS, rw: Option<RW>, delay: DELAY) -> Self {
        let timing = Timing::default();
        Self {
            rs,
            en,
            bus,
            rw,
            delay,
            enable_pulse_us: timing.enable_pulse_us,
            settle_us: timing.command_settle_us,
        }
    }

    /// Width of each enable level in microseconds
    pub fn enable_pulse_us(&self) -> u32 {
        self.enable_pulse_us
    }

    /// Execution wait after each byte in microseconds
    pub fn settle_us(&self) -> u32 {
        self.settle_us
    }

    /// Give the pins and the delay provider back
    pub fn release(self) -> (RS, EN, BUS, Option<RW>, DELAY) {
        (self.rs, self.en, self.bus, self.rw, self.delay)
    }
}

impl<RS, EN, BUS, RW, DELAY, PinErr> Interface<RS, EN, BUS, RW, DELAY>
where
    RS: OutputPin<Error = PinErr>,
    EN: OutputPin<Error = PinErr>,
    BUS: NibbleBus<Error = PinErr>,
    RW: OutputPin<Error = PinErr>,
    DELAY: DelayNs,
    PinErr: Debug,
{
    /// Set RS and hold RW in write mode
    fn select(&mut self, rs: PinState) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.rs.set_state(rs).map_err(InterfaceError::Pin)?;
        if let Some(rw) = self.rw.as_mut() {
            rw.set_low().map_err(InterfaceError::Pin)?;
        }
        Ok(())
    }

    /// Present one nibble and latch it with an enable pulse
    fn strobe_nibble(&mut self, nibble: u8) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.bus
            .write_nibble(nibble & 0x0F)
            .map_err(InterfaceError::Pin)?;
        // Address setup before the rising edge
        self.delay.delay_us(self.enable_pulse_us);
        self.en.set_high().map_err(InterfaceError::Pin)?;
        self.delay.delay_us(self.enable_pulse_us);
        self.en.set_low().map_err(InterfaceError::Pin)?;
        self.delay.delay_us(self.enable_pulse_us);
        Ok(())
    }

    /// Transfer one byte with RS already selected
    fn write_byte(&mut self, value: u8) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.strobe_nibble(value >> 4)?;
        self.strobe_nibble(value & 0x0F)?;
        self.delay.delay_us(self.settle_us);
        Ok(())
    }
}

impl<RS, EN, BUS, RW, DELAY, PinErr> DisplayInterface for Interface<RS, EN, BUS, RW, DELAY>
where
    RS: OutputPin<Error = PinErr>,
    EN: OutputPin<Error = PinErr>,
    BUS: NibbleBus<Error = PinErr>,
    RW: OutputPin<Error = PinErr>,
    DELAY: DelayNs,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn configure(&mut self, timing: &Timing) {
        self.enable_pulse_us = timing.enable_pulse_us;
        self.settle_us = timing.command_settle_us;
    }

    fn write_nibble(&mut self, nibble: u8) -> InterfaceResult<(), Self::Error> {
        trace!("Writing nibble: {:04b}", nibble & 0x0F);
        self.select(PinState::Low)?;
        self.strobe_nibble(nibble)
    }

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        trace!("Sending command: {:08b}", command);
        self.select(PinState::Low)?;
        self.write_byte(command)
    }

    fn send_data(&mut self, data: u8) -> InterfaceResult<(), Self::Error> {
        trace!("Sending data: {:08b}", data);
        self.select(PinState::High)?;
        self.write_byte(data)
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Line {
        Rs,
        Rw,
        En,
        Data(u8),
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Set(Line, bool),
        Delay(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct RecordingPin {
        line: Line,
        log: Log,
    }

    impl ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Set(self.line, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Set(self.line, true));
            Ok(())
        }
    }

    struct RecordingDelay {
        log: Log,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::Delay(ns));
        }
    }

    type TestBus = DataPins<RecordingPin, RecordingPin, RecordingPin, RecordingPin>;

    fn pin(line: Line, log: &Log) -> RecordingPin {
        RecordingPin {
            line,
            log: Rc::clone(log),
        }
    }

    fn bus(log: &Log) -> TestBus {
        DataPins::new(
            pin(Line::Data(0), log),
            pin(Line::Data(1), log),
            pin(Line::Data(2), log),
            pin(Line::Data(3), log),
        )
    }

    fn interface_without_rw(
        log: &Log,
    ) -> Interface<RecordingPin, RecordingPin, TestBus, NoPin, RecordingDelay> {
        Interface::new(
            pin(Line::Rs, log),
            pin(Line::En, log),
            bus(log),
            RecordingDelay {
                log: Rc::clone(log),
            },
        )
    }

    fn interface_with_rw(
        log: &Log,
    ) -> Interface<RecordingPin, RecordingPin, TestBus, RecordingPin, RecordingDelay> {
        Interface::with_rw(
            pin(Line::Rs, log),
            pin(Line::En, log),
            bus(log),
            pin(Line::Rw, log),
            RecordingDelay {
                log: Rc::clone(log),
            },
        )
    }

    /// Replays the log and returns `(rs, nibble)` at every falling edge of E
    fn latched(log: &[Event]) -> Vec<(bool, u8)> {
        let mut rs = false;
        let mut data = 0u8;
        let mut en = false;
        let mut out = Vec::new();
        for event in log {
            match *event {
                Event::Set(Line::Rs, level) => rs = level,
                Event::Set(Line::Data(bit), level) => {
                    if level {
                        data |= 1 << bit;
                    } else {
                        data &= !(1 << bit);
                    }
                }
                Event::Set(Line::En, level) => {
                    if en && !level {
                        out.push((rs, data));
                    }
                    en = level;
                }
                Event::Set(Line::Rw, _) | Event::Delay(_) => {}
            }
        }
        out
    }

    fn total_delay_ns(events: &[Event]) -> u64 {
        events
            .iter()
            .map(|event| match event {
                Event::Delay(ns) => u64::from(*ns),
                Event::Set(..) => 0,
            })
            .sum()
    }

    fn en_edges(log: &[Event]) -> Vec<usize> {
        log.iter()
            .enumerate()
            .filter(|(_, event)| matches!(event, Event::Set(Line::En, _)))
            .map(|(index, _)| index)
            .collect()
    }

    #[test]
    fn test_command_sent_high_nibble_first_with_rs_low() {
        let log = Log::default();
        let mut interface = interface_without_rw(&log);
        interface.send_command(0x28).unwrap();
        assert_eq!(latched(&log.borrow()), [(false, 0x2), (false, 0x8)]);
    }

    #[test]
    fn test_data_sent_with_rs_high() {
        let log = Log::default();
        let mut interface = interface_without_rw(&log);
        interface.send_data(b'H').unwrap();
        assert_eq!(latched(&log.borrow()), [(true, 0x4), (true, 0x8)]);
    }

    #[test]
    fn test_enable_levels_held_at_least_one_microsecond() {
        let log = Log::default();
        let mut interface = interface_without_rw(&log);
        interface.send_data(0xA5).unwrap();

        let log = log.borrow();
        let edges = en_edges(&log);
        assert_eq!(edges.len(), 4);
        for pair in edges.windows(2) {
            assert!(total_delay_ns(&log[pair[0]..pair[1]]) >= 1_000);
        }
    }

    #[test]
    fn test_data_stable_while_enable_high() {
        let log = Log::default();
        let mut interface = interface_without_rw(&log);
        interface.send_command(0xFF).unwrap();

        let log = log.borrow();
        let edges = en_edges(&log);
        for pulse in edges.chunks(2) {
            let changed = log[pulse[0]..pulse[1]]
                .iter()
                .any(|event| matches!(event, Event::Set(Line::Data(_), _)));
            assert!(!changed);
        }
    }

    #[test]
    fn test_byte_followed_by_execution_settle() {
        let log = Log::default();
        let mut interface = interface_without_rw(&log);
        interface.send_command(0x06).unwrap();

        let log = log.borrow();
        let last_edge = *en_edges(&log).last().unwrap();
        assert!(total_delay_ns(&log[last_edge..]) >= 40_000);
    }

    #[test]
    fn test_configure_applies_settle_time() {
        let log = Log::default();
        let mut interface = interface_without_rw(&log);
        let timing = Timing {
            command_settle_us: 120,
            enable_pulse_us: 2,
            ..Timing::default()
        };
        interface.configure(&timing);
        assert_eq!(interface.settle_us(), 120);
        assert_eq!(interface.enable_pulse_us(), 2);

        interface.send_command(0x06).unwrap();
        let log = log.borrow();
        let last_edge = *en_edges(&log).last().unwrap();
        assert!(total_delay_ns(&log[last_edge..]) >= 120_000);
    }

    #[test]
    fn test_single_nibble_has_one_pulse_and_no_settle() {
        let log = Log::default();
        let mut interface = interface_without_rw(&log);
        interface.write_nibble(0x3).unwrap();

        let log = log.borrow();
        assert_eq!(latched(&log), [(false, 0x3)]);
        let last_edge = *en_edges(&log).last().unwrap();
        assert!(total_delay_ns(&log[last_edge..]) < 40_000);
    }

    #[test]
    fn test_rw_held_low_when_wired() {
        let log = Log::default();
        let mut interface = interface_with_rw(&log);
        interface.send_data(b'x').unwrap();
        interface.send_command(0x01).unwrap();

        let log = log.borrow();
        let rw_events: Vec<_> = log
            .iter()
            .filter(|event| matches!(event, Event::Set(Line::Rw, _)))
            .collect();
        assert_eq!(rw_events.len(), 2);
        assert!(rw_events.iter().all(|e| **e == Event::Set(Line::Rw, false)));

        let first_rw = log
            .iter()
            .position(|e| matches!(e, Event::Set(Line::Rw, _)))
            .unwrap();
        assert!(first_rw < en_edges(&log)[0]);
    }

    #[test]
    fn test_absent_rw_is_never_driven() {
        let log = Log::default();
        let mut interface = interface_without_rw(&log);
        interface.send_data(b'x').unwrap();
        interface.write_nibble(0x2).unwrap();
        assert!(
            !log.borrow()
                .iter()
                .any(|event| matches!(event, Event::Set(Line::Rw, _)))
        );
    }

    #[test]
    fn test_data_pins_map_db4_to_lsb() {
        let log = Log::default();
        let mut pins = bus(&log);
        pins.write_nibble(0b1001).unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Set(Line::Data(0), true),
                Event::Set(Line::Data(1), false),
                Event::Set(Line::Data(2), false),
                Event::Set(Line::Data(3), true),
            ]
        );

        let (d4, _, _, d7) = pins.release();
        assert_eq!(d4.line, Line::Data(0));
        assert_eq!(d7.line, Line::Data(3));
    }

    #[test]
    fn test_pin_array_bus_expectations() {
        use embedded_hal_mock::eh1::delay::NoopDelay;
        use embedded_hal_mock::eh1::digital::{
            Mock as PinMock, State as PinLevel, Transaction as PinTransaction,
        };

        let low = || PinTransaction::set(PinLevel::Low);
        let high = || PinTransaction::set(PinLevel::High);

        // 0x28: high nibble 0b0010, low nibble 0b1000
        let rs = PinMock::new(&[low()]);
        let rw = PinMock::new(&[low()]);
        let en = PinMock::new(&[high(), low(), high(), low()]);
        let data = [
            PinMock::new(&[low(), low()]),
            PinMock::new(&[high(), low()]),
            PinMock::new(&[low(), low()]),
            PinMock::new(&[low(), high()]),
        ];

        let mut interface = Interface::with_rw(rs, en, data, rw, NoopDelay::new());
        interface.send_command(0x28).unwrap();

        let (mut rs, mut en, data, rw, _) = interface.release();
        rs.done();
        en.done();
        for mut pin in data {
            pin.done();
        }
        if let Some(mut rw) = rw {
            rw.done();
        }
    }
}
