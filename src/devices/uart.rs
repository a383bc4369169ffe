//! Serial transmit channel.
//!
//! Models the transmit half of an SCI channel: one write-only data register
//! whose every write becomes an output character.

use super::Peripheral;
use crate::address_map::SCI0_BASE;

/// Transmit-only serial channel.
///
/// ## Register Map (offsets from device base address)
///
/// | Offset | Register | Access | Description |
/// |--------|----------|--------|-------------|
/// | 0      | TDR      | W      | Transmit data |
///
/// ## Transmit Behavior
///
/// - **Immediate**: each write appends one character to the transmit log and
///   invokes the transmit callback, if set
/// - **No receive path**: reads always return 0
///
/// # Example
///
/// ```rust
/// use rxsim::{Peripheral, SerialTx};
///
/// let mut sci = SerialTx::new();
///
/// for byte in b"OK\n" {
///     sci.write8(SerialTx::TDR_OFFSET, *byte);
/// }
///
/// assert_eq!(sci.tx_log(), "OK\n");
/// assert_eq!(sci.read8(SerialTx::TDR_OFFSET), 0);
/// ```
pub struct SerialTx {
    tx_log: String,

    // Transmit callback
    on_transmit: Option<Box<dyn Fn(u8)>>,
}

impl SerialTx {
    pub const TDR_OFFSET: u32 = 0;

    /// Creates a channel with an empty transmit log and no callback.
    pub fn new() -> Self {
        Self {
            tx_log: String::new(),
            on_transmit: None,
        }
    }

    /// Set callback for transmitted bytes.
    ///
    /// The callback runs synchronously inside the register write, after the
    /// byte has been appended to the log.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rxsim::SerialTx;
    ///
    /// let mut sci = SerialTx::new();
    ///
    /// sci.set_transmit_callback(|byte| {
    ///     print!("{}", byte as char);
    /// });
    /// ```
    pub fn set_transmit_callback<F>(&mut self, callback: F)
    where
        F: Fn(u8) + 'static,
    {
        self.on_transmit = Some(Box::new(callback));
    }

    /// Everything transmitted since construction or the last clear.
    pub fn tx_log(&self) -> &str {
        &self.tx_log
    }

    pub fn clear_tx_log(&mut self) {
        self.tx_log.clear();
    }

    fn transmit(&mut self, value: u8) {
        self.tx_log.push(char::from(value));
        log::trace!("SCI0 TX 0x{:02X}", value);

        if let Some(ref callback) = self.on_transmit {
            callback(value);
        }
    }
}

impl Default for SerialTx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SerialTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTx")
            .field("tx_log", &self.tx_log)
            .field("on_transmit", &self.on_transmit.is_some())
            .finish()
    }
}

impl Peripheral for SerialTx {
    fn base_address(&self) -> u32 {
        SCI0_BASE
    }

    fn size(&self) -> u32 {
        1
    }

    /// Clears the transmit log; the callback stays installed.
    fn reset(&mut self) {
        self.tx_log.clear();
    }

    fn read8(&self, _offset: u32) -> u8 {
        0x00
    }

    fn write8(&mut self, offset: u32, value: u8) {
        if offset == Self::TDR_OFFSET {
            self.transmit(value);
        }
    }
}
