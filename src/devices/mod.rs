//! Peripheral support for the RX simulator.
//!
//! Peripherals are independent register files that share one capability
//! contract, the [`Peripheral`] trait. They are addressed by offset within
//! their own block, not through the CPU's address space: nothing routes CPU
//! loads and stores into them yet. An external scheduler drives them by
//! calling [`Peripheral::tick`] with the cycles the CPU consumed.
//!
//! # Architecture
//!
//! - **Peripheral trait**: reset, sized register access, tick
//! - **InterruptController**: priority-ordered pending requests and vector lookup
//! - **Implementations**: digital I/O port, compare match timer, serial transmit
//!
//! # Example
//!
//! ```rust
//! use rxsim::{CompareMatchTimer, InterruptController, Peripheral};
//!
//! let mut interrupts = InterruptController::new();
//! let mut timer = CompareMatchTimer::new();
//!
//! timer.write32(CompareMatchTimer::COMPARE_OFFSET, 100);
//! timer.write8(CompareMatchTimer::ENABLE_OFFSET, 1);
//! timer.write8(CompareMatchTimer::INTERRUPT_ENABLE_OFFSET, 1);
//!
//! timer.tick(100, &mut interrupts);
//! assert!(interrupts.has_pending());
//! ```

// Peripheral implementations
pub mod gpio;
pub mod interrupts;
pub mod timer;
pub mod uart;

// Re-export device types
pub use gpio::Gpio;
pub use interrupts::{InterruptController, InterruptRequest};
pub use timer::CompareMatchTimer;
pub use uart::SerialTx;

/// Capability contract shared by all peripherals.
///
/// Implementors provide 8-bit register semantics; 16- and 32-bit access are
/// composed from them little-endian, lowest offset first.
///
/// # Design
///
/// - **Offset-based**: the peripheral sees offsets from its own base address
/// - **No panics**: undefined offsets read 0 and ignore writes
/// - **Immutable read**: reads never have side effects
///
/// # Examples
///
/// ```rust
/// use rxsim::{InterruptController, Peripheral};
///
/// struct Latch {
///     value: u8,
/// }
///
/// impl Peripheral for Latch {
///     fn base_address(&self) -> u32 {
///         0x0008_F000
///     }
///
///     fn size(&self) -> u32 {
///         1
///     }
///
///     fn reset(&mut self) {
///         self.value = 0;
///     }
///
///     fn read8(&self, offset: u32) -> u8 {
///         if offset == 0 { self.value } else { 0 }
///     }
///
///     fn write8(&mut self, offset: u32, value: u8) {
///         if offset == 0 {
///             self.value = value;
///         }
///     }
/// }
///
/// let mut latch = Latch { value: 0 };
/// latch.write32(0, 0x1234_5678);
/// assert_eq!(latch.read8(0), 0x78);
/// assert_eq!(latch.read32(0), 0x78);
/// ```
pub trait Peripheral {
    /// Where this block would sit in the global address map.
    fn base_address(&self) -> u32;

    /// Number of bytes in the register file.
    fn size(&self) -> u32;

    /// Returns every register to its power-on value.
    fn reset(&mut self);

    /// Reads the register byte at `offset`; undefined offsets read 0.
    fn read8(&self, offset: u32) -> u8;

    /// Writes the register byte at `offset`; undefined offsets are ignored.
    fn write8(&mut self, offset: u32, value: u8);

    /// Advances internal state by `cycles` elapsed CPU cycles.
    ///
    /// Peripherals that raise interrupts post them to `interrupts`.
    fn tick(&mut self, _cycles: u64, _interrupts: &mut InterruptController) {}

    /// Reads a little-endian halfword.
    fn read16(&self, offset: u32) -> u16 {
        u16::from_le_bytes([self.read8(offset), self.read8(offset.wrapping_add(1))])
    }

    /// Reads a little-endian word.
    fn read32(&self, offset: u32) -> u32 {
        u32::from_le_bytes([
            self.read8(offset),
            self.read8(offset.wrapping_add(1)),
            self.read8(offset.wrapping_add(2)),
            self.read8(offset.wrapping_add(3)),
        ])
    }

    /// Writes a little-endian halfword.
    fn write16(&mut self, offset: u32, value: u16) {
        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.write8(offset.wrapping_add(i as u32), byte);
        }
    }

    /// Writes a little-endian word.
    fn write32(&mut self, offset: u32, value: u32) {
        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.write8(offset.wrapping_add(i as u32), byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Simple test peripheral for unit testing
    struct TestPeripheral {
        data: Vec<u8>,
        ticks: u64,
    }

    impl TestPeripheral {
        fn new(size: usize) -> Self {
            Self {
                data: vec![0; size],
                ticks: 0,
            }
        }
    }

    impl Peripheral for TestPeripheral {
        fn base_address(&self) -> u32 {
            0
        }

        fn size(&self) -> u32 {
            self.data.len() as u32
        }

        fn reset(&mut self) {
            self.data.fill(0);
            self.ticks = 0;
        }

        fn read8(&self, offset: u32) -> u8 {
            self.data.get(offset as usize).copied().unwrap_or(0)
        }

        fn write8(&mut self, offset: u32, value: u8) {
            if let Some(slot) = self.data.get_mut(offset as usize) {
                *slot = value;
            }
        }

        fn tick(&mut self, cycles: u64, _interrupts: &mut InterruptController) {
            self.ticks += cycles;
        }
    }

    #[test]
    fn test_wide_access_composes_bytes() {
        let mut dev = TestPeripheral::new(8);
        dev.write32(0, 0xAABB_CCDD);
        assert_eq!(dev.read8(0), 0xDD);
        assert_eq!(dev.read8(3), 0xAA);
        assert_eq!(dev.read16(2), 0xAABB);

        dev.write16(4, 0x1122);
        assert_eq!(dev.read32(4), 0x0000_1122);
    }

    #[test]
    fn test_wide_access_past_end() {
        let mut dev = TestPeripheral::new(2);
        dev.write32(0, 0x4433_2211);
        assert_eq!(dev.read32(0), 0x0000_2211);
    }

    #[test]
    fn test_tick_and_reset() {
        let mut dev = TestPeripheral::new(1);
        let mut interrupts = InterruptController::new();
        dev.write8(0, 5);
        dev.tick(10, &mut interrupts);
        assert_eq!(dev.ticks, 10);

        dev.reset();
        assert_eq!(dev.read8(0), 0);
        assert_eq!(dev.ticks, 0);
        assert!(!interrupts.has_pending());
    }
}
