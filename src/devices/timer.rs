//! Compare match timer.
//!
//! A 32-bit up-counter that restarts from zero when it reaches the
//! compare-reload value, optionally raising an interrupt each time.
//!
//! ## Register Map (offsets from device base address)
//!
//! | Offset | Register | Access | Description |
//! |--------|----------|--------|-------------|
//! | 0-3 | CMCNT | R/W | Counter, little-endian |
//! | 4-7 | CMCOR | R/W | Compare-reload value, little-endian (default 1000) |
//! | 8   | STR   | R/W | Nonzero starts the counter |
//! | 9   | CMIE  | R/W | Nonzero enables the compare-match interrupt |
//!
//! On a compare match the counter is cleared, not reduced by the period, so
//! a single large tick produces at most one interrupt.

use super::{InterruptController, Peripheral};
use crate::address_map::CMT0_BASE;

/// Compare-reload value after reset.
pub const TIMER_DEFAULT_COMPARE: u32 = 1000;

/// Priority of the compare-match interrupt.
pub const TIMER_INTERRUPT_PRIORITY: u8 = 3;

/// Vector number of the compare-match interrupt (CMI0).
pub const TIMER_INTERRUPT_VECTOR: u32 = 28;

/// Compare match timer channel.
///
/// # Example
///
/// ```rust
/// use rxsim::{CompareMatchTimer, InterruptController};
///
/// let mut interrupts = InterruptController::new();
/// let mut timer = CompareMatchTimer::new();
/// timer.set_enabled(true);
/// timer.set_interrupt_enabled(true);
///
/// timer.advance(999, &mut interrupts);
/// assert_eq!(timer.counter(), 999);
/// assert!(!interrupts.has_pending());
///
/// timer.advance(1, &mut interrupts);
/// assert_eq!(timer.counter(), 0);
/// assert_eq!(interrupts.pop_next().map(|r| r.priority), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct CompareMatchTimer {
    counter: u32,
    compare: u32,
    enable: u8,
    interrupt_enable: u8,
}

impl CompareMatchTimer {
    pub const COUNTER_OFFSET: u32 = 0;
    pub const COMPARE_OFFSET: u32 = 4;
    pub const ENABLE_OFFSET: u32 = 8;
    pub const INTERRUPT_ENABLE_OFFSET: u32 = 9;

    /// Label attached to the interrupts this timer raises.
    pub const SOURCE: &'static str = "CMT0";

    /// Creates a stopped timer with the default compare value.
    pub fn new() -> Self {
        Self {
            counter: 0,
            compare: TIMER_DEFAULT_COMPARE,
            enable: 0,
            interrupt_enable: 0,
        }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn compare(&self) -> u32 {
        self.compare
    }

    pub fn is_enabled(&self) -> bool {
        self.enable != 0
    }

    pub fn is_interrupt_enabled(&self) -> bool {
        self.interrupt_enable != 0
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enable = u8::from(enabled);
    }

    pub fn set_interrupt_enabled(&mut self, enabled: bool) {
        self.interrupt_enable = u8::from(enabled);
    }

    /// Counts `cycles` if running; on a compare match clears the counter and,
    /// when enabled, requests the compare-match interrupt.
    ///
    /// Returns true if a compare match happened.
    pub fn advance(&mut self, cycles: u64, interrupts: &mut InterruptController) -> bool {
        if !self.is_enabled() {
            return false;
        }

        let count = u64::from(self.counter) + cycles;
        if count < u64::from(self.compare) {
            self.counter = count as u32;
            return false;
        }

        self.counter = 0;
        log::debug!("{} compare match at {}", Self::SOURCE, self.compare);
        if self.is_interrupt_enabled() {
            interrupts.request_interrupt(
                TIMER_INTERRUPT_VECTOR,
                TIMER_INTERRUPT_PRIORITY,
                Self::SOURCE,
            );
        }
        true
    }
}

impl Default for CompareMatchTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Peripheral for CompareMatchTimer {
    fn base_address(&self) -> u32 {
        CMT0_BASE
    }

    fn size(&self) -> u32 {
        10
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn read8(&self, offset: u32) -> u8 {
        match offset {
            0..=3 => self.counter.to_le_bytes()[offset as usize],
            4..=7 => self.compare.to_le_bytes()[(offset - 4) as usize],
            Self::ENABLE_OFFSET => self.enable,
            Self::INTERRUPT_ENABLE_OFFSET => self.interrupt_enable,
            _ => 0x00,
        }
    }

    fn write8(&mut self, offset: u32, value: u8) {
        match offset {
            0..=3 => {
                let mut bytes = self.counter.to_le_bytes();
                bytes[offset as usize] = value;
                self.counter = u32::from_le_bytes(bytes);
            }
            4..=7 => {
                let mut bytes = self.compare.to_le_bytes();
                bytes[(offset - 4) as usize] = value;
                self.compare = u32::from_le_bytes(bytes);
            }
            Self::ENABLE_OFFSET => self.enable = value,
            Self::INTERRUPT_ENABLE_OFFSET => self.interrupt_enable = value,
            _ => {}
        }
    }

    fn tick(&mut self, cycles: u64, interrupts: &mut InterruptController) {
        self.advance(cycles, interrupts);
    }
}
