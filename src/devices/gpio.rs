//! Digital I/O port.
//!
//! One 8-bit port with three registers.
//!
//! ## Register Map (offsets from device base address)
//!
//! | Offset | Register | Access | Description |
//! |--------|----------|--------|-------------|
//! | 0 | PDR  | R/W | Direction, bit = 1 makes the pin an output |
//! | 1 | PODR | R/W | Output data latch |
//! | 2 | PIDR | R   | Input data, driven by the host |
//!
//! Bus writes to PIDR are ignored; the host sets input pins with
//! [`Gpio::set_input_bit`].

use super::Peripheral;
use crate::address_map::GPIO_PORT0_BASE;

/// Single 8-bit digital I/O port.
///
/// # Example
///
/// ```rust
/// use rxsim::{Gpio, Peripheral};
///
/// let mut port = Gpio::new();
///
/// // Pin 0 output, driven high
/// port.write8(Gpio::PDR_OFFSET, 0x01);
/// port.write8(Gpio::PODR_OFFSET, 0x01);
/// assert!(port.output_bit(0));
///
/// // Host presses a switch on pin 4
/// port.set_input_bit(4, true);
/// assert_eq!(port.read8(Gpio::PIDR_OFFSET), 0x10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Gpio {
    direction: u8,
    output_data: u8,
    input_data: u8,
}

impl Gpio {
    pub const PDR_OFFSET: u32 = 0;
    pub const PODR_OFFSET: u32 = 1;
    pub const PIDR_OFFSET: u32 = 2;

    /// Creates a port with every pin an input and all latches clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives input pin `bit` (0-7) from outside the chip.
    pub fn set_input_bit(&mut self, bit: u8, level: bool) {
        let mask = 1 << (bit & 0x07);
        if level {
            self.input_data |= mask;
        } else {
            self.input_data &= !mask;
        }
    }

    /// Returns the output latch for pin `bit` (0-7).
    pub fn output_bit(&self, bit: u8) -> bool {
        self.output_data & (1 << (bit & 0x07)) != 0
    }

    /// Returns the level seen on pin `bit`: the output latch if the pin is an
    /// output, the input latch otherwise.
    pub fn read_pin(&self, bit: u8) -> bool {
        let mask = 1 << (bit & 0x07);
        if self.direction & mask != 0 {
            self.output_data & mask != 0
        } else {
            self.input_data & mask != 0
        }
    }

    /// Output latch bits for pins configured as outputs.
    pub fn output_byte(&self) -> u8 {
        self.output_data & self.direction
    }
}

impl Peripheral for Gpio {
    fn base_address(&self) -> u32 {
        GPIO_PORT0_BASE
    }

    fn size(&self) -> u32 {
        3
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn read8(&self, offset: u32) -> u8 {
        match offset {
            Self::PDR_OFFSET => self.direction,
            Self::PODR_OFFSET => self.output_data,
            Self::PIDR_OFFSET => self.input_data,
            _ => 0x00,
        }
    }

    fn write8(&mut self, offset: u32, value: u8) {
        match offset {
            Self::PDR_OFFSET => self.direction = value,
            Self::PODR_OFFSET => self.output_data = value,
            _ => {}
        }
    }
}
