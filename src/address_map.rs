//! # Address Map
//!
//! Fixed address-range constants for the simulated RX65N-style part. All
//! windows are inclusive on both ends.
//!
//! | Region | Start | End |
//! |--------|-------|-----|
//! | On-chip RAM (256KB) | `0x0000_0000` | `0x0003_FFFF` |
//! | Peripheral I/O window 1 | `0x0008_0000` | `0x000F_FFFF` |
//! | Data flash (32KB) | `0x0010_0000` | `0x0010_7FFF` |
//! | Peripheral I/O window 2 | `0x007F_C000` | `0x007F_FFFF` |
//! | Code flash / ROM (2MB) | `0xFFE0_0000` | `0xFFFF_FFFF` |
//! | Fixed vector table | `0xFFFF_FF80` | `0xFFFF_FFFF` |
//!
//! The fixed vector table lives inside the ROM window, so the reset vector is
//! seeded with an ordinary ROM load. The assembler's load layout and the CPU's
//! reset-vector read both depend on these values.

/// First byte of on-chip RAM.
pub const RAM_START: u32 = 0x0000_0000;

/// Last byte of on-chip RAM.
pub const RAM_END: u32 = 0x0003_FFFF;

/// First byte of the primary peripheral I/O register window.
pub const PERIPHERAL_IO_1_START: u32 = 0x0008_0000;

/// Last byte of the primary peripheral I/O register window.
pub const PERIPHERAL_IO_1_END: u32 = 0x000F_FFFF;

/// First byte of the E2 data flash.
pub const DATA_FLASH_START: u32 = 0x0010_0000;

/// Last byte of the E2 data flash.
pub const DATA_FLASH_END: u32 = 0x0010_7FFF;

/// First byte of the secondary peripheral I/O register window.
pub const PERIPHERAL_IO_2_START: u32 = 0x007F_C000;

/// Last byte of the secondary peripheral I/O register window.
pub const PERIPHERAL_IO_2_END: u32 = 0x007F_FFFF;

/// First byte of code flash.
pub const ROM_START: u32 = 0xFFE0_0000;

/// Last byte of code flash.
pub const ROM_END: u32 = 0xFFFF_FFFF;

/// Base of the fixed vector table. Vector `n` occupies `base + n * 4`.
pub const VECTOR_TABLE_BASE: u32 = 0xFFFF_FF80;

/// Last byte of the fixed vector table.
pub const VECTOR_TABLE_END: u32 = 0xFFFF_FFFF;

/// Vector number of the reset slot in the fixed table.
pub const RESET_VECTOR_NUMBER: u32 = 31;

/// Address holding the 32-bit little-endian program start address.
pub const RESET_VECTOR: u32 = VECTOR_TABLE_BASE + RESET_VECTOR_NUMBER * 4;

/// Size of the RAM backing buffer in bytes.
pub const RAM_SIZE: usize = (RAM_END - RAM_START) as usize + 1;

/// Size of the ROM backing buffer in bytes.
pub const ROM_SIZE: usize = (ROM_END - ROM_START) as usize + 1;

/// Base of the PORT0 digital I/O registers (PDR/PODR/PIDR block).
pub const GPIO_PORT0_BASE: u32 = 0x0008_C000;

/// Base of compare match timer channel 0.
pub const CMT0_BASE: u32 = 0x0008_8000;

/// Base of serial communication interface channel 0 transmit data register.
pub const SCI0_BASE: u32 = 0x0008_A003;

/// Returns true if `addr` falls inside the inclusive window `[start, end]`.
pub const fn in_window(addr: u32, start: u32, end: u32) -> bool {
    addr >= start && addr <= end
}
