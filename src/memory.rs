//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from a
//! specific memory implementation, and `AddressSpace`, the RAM/ROM-windowed
//! implementation the simulator runs on.
//!
//! ## Design Principles
//!
//! - No bus errors: every address has a defined result
//! - Unmapped reads return 0, unmapped writes are ignored
//! - Multi-byte access is little-endian and built from 8-bit access
//! - ROM survives `reset()`, RAM does not

use crate::address_map::{in_window, RAM_END, RAM_SIZE, RAM_START, ROM_END, ROM_SIZE, ROM_START};
use crate::opcodes::NOP_OPCODE;

/// Memory bus trait for CPU to read/write bytes.
///
/// Implementors supply the two 8-bit primitives; 16- and 32-bit access are
/// provided in terms of them, least significant byte at the lowest address.
/// A multi-byte access never wraps: bytes that would lie past `0xFFFF_FFFF`
/// are unmapped, reading 0 and dropping writes.
///
/// # Examples
///
/// ```
/// use rxsim::{AddressSpace, MemoryBus};
///
/// let mut mem = AddressSpace::new();
/// mem.write32(0x100, 0x1234_5678);
/// assert_eq!(mem.read8(0x100), 0x78);
/// assert_eq!(mem.read16(0x102), 0x1234);
/// ```
pub trait MemoryBus {
    /// Reads a byte. Must never panic.
    fn read8(&self, addr: u32) -> u8;

    /// Writes a byte. Must never panic; read-only or unmapped targets may ignore it.
    fn write8(&mut self, addr: u32, value: u8);

    /// Reads a little-endian halfword.
    fn read16(&self, addr: u32) -> u16 {
        u16::from_le_bytes([self.read8(addr), byte_at(self, addr, 1)])
    }

    /// Reads a little-endian word.
    fn read32(&self, addr: u32) -> u32 {
        u32::from_le_bytes([
            self.read8(addr),
            byte_at(self, addr, 1),
            byte_at(self, addr, 2),
            byte_at(self, addr, 3),
        ])
    }

    /// Writes a little-endian halfword.
    fn write16(&mut self, addr: u32, value: u16) {
        for (offset, byte) in (0..).zip(value.to_le_bytes()) {
            set_byte_at(self, addr, offset, byte);
        }
    }

    /// Writes a little-endian word.
    fn write32(&mut self, addr: u32, value: u32) {
        for (offset, byte) in (0..).zip(value.to_le_bytes()) {
            set_byte_at(self, addr, offset, byte);
        }
    }
}

/// Byte `offset` past `addr`, or 0 beyond the top of the address space.
fn byte_at<M: MemoryBus + ?Sized>(bus: &M, addr: u32, offset: u32) -> u8 {
    addr.checked_add(offset).map_or(0, |a| bus.read8(a))
}

/// Writes byte `offset` past `addr`; dropped beyond the top of the address space.
fn set_byte_at<M: MemoryBus + ?Sized>(bus: &mut M, addr: u32, offset: u32, value: u8) {
    if let Some(a) = addr.checked_add(offset) {
        bus.write8(a, value);
    }
}

/// Backing window an address resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ram,
    Rom,
}

/// Flat 32-bit address space backed by separate RAM and ROM buffers.
///
/// RAM covers `RAM_START..=RAM_END` and starts zeroed. ROM covers
/// `ROM_START..=ROM_END` and starts filled with the no-op opcode, so an
/// untouched ROM executes as an endless run of NOPs. Everything else is
/// unmapped.
///
/// ROM is writable through the bus: the simulator has no flash programming
/// sequence, so loads and stores land directly in the buffer.
///
/// # Examples
///
/// ```
/// use rxsim::{AddressSpace, MemoryBus};
/// use rxsim::address_map::{RESET_VECTOR, ROM_START};
///
/// let mut mem = AddressSpace::new();
/// assert_eq!(mem.read8(ROM_START), 0x03); // NOP fill
///
/// mem.load(&ROM_START.to_le_bytes(), RESET_VECTOR);
/// assert_eq!(mem.read32(RESET_VECTOR), ROM_START);
///
/// // Unmapped address
/// mem.write8(0x0100_0000, 0xAA);
/// assert_eq!(mem.read8(0x0100_0000), 0x00);
/// ```
pub struct AddressSpace {
    ram: Box<[u8]>,
    rom: Box<[u8]>,
}

impl AddressSpace {
    /// Creates an address space with zeroed RAM and NOP-filled ROM.
    pub fn new() -> Self {
        Self {
            ram: vec![0; RAM_SIZE].into_boxed_slice(),
            rom: vec![NOP_OPCODE; ROM_SIZE].into_boxed_slice(),
        }
    }

    /// Classifies an address as RAM, ROM, or unmapped (`None`).
    pub fn region_of(&self, addr: u32) -> Option<Region> {
        if in_window(addr, RAM_START, RAM_END) {
            Some(Region::Ram)
        } else if in_window(addr, ROM_START, ROM_END) {
            Some(Region::Rom)
        } else {
            None
        }
    }

    /// Clears RAM. ROM models non-volatile program memory and is left intact.
    pub fn reset(&mut self) {
        self.ram.fill(0);
    }

    /// Copies `data` into whichever window `offset` falls in.
    ///
    /// Bytes that would run past the end of that window are dropped. If
    /// `offset` is in neither window the whole call is dropped with a warning.
    /// Returns the number of bytes actually stored.
    pub fn load(&mut self, data: &[u8], offset: u32) -> usize {
        let (buffer, start) = match self.region_of(offset) {
            Some(Region::Ram) => (&mut self.ram, RAM_START),
            Some(Region::Rom) => (&mut self.rom, ROM_START),
            None => {
                log::warn!(
                    "load of {} bytes at 0x{:08X} is outside RAM and ROM; ignored",
                    data.len(),
                    offset
                );
                return 0;
            }
        };

        let index = (offset - start) as usize;
        let count = data.len().min(buffer.len() - index);
        buffer[index..index + count].copy_from_slice(&data[..count]);

        if count < data.len() {
            log::debug!(
                "load at 0x{:08X} truncated from {} to {} bytes",
                offset,
                data.len(),
                count
            );
        } else {
            log::debug!("loaded {} bytes at 0x{:08X}", count, offset);
        }
        count
    }

    /// Reads `len` consecutive bytes starting at `start`.
    ///
    /// Bytes past the top of the address space read as 0.
    pub fn dump(&self, start: u32, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| u32::try_from(i).map_or(0, |i| byte_at(self, start, i)))
            .collect()
    }

    /// Renders a hex/ASCII listing, 16 bytes per line.
    ///
    /// ```
    /// use rxsim::AddressSpace;
    ///
    /// let mut mem = AddressSpace::new();
    /// mem.load(b"Hi", 0x10);
    /// let text = mem.dump_hex(0x10, 4);
    /// assert!(text.starts_with("00000010: 48 69 00 00"));
    /// assert!(text.ends_with("Hi.."));
    /// ```
    pub fn dump_hex(&self, start: u32, len: usize) -> String {
        const BYTES_PER_LINE: usize = 16;

        let data = self.dump(start, len);
        data.chunks(BYTES_PER_LINE)
            .enumerate()
            .map(|(line, chunk)| {
                let addr = start.wrapping_add((line * BYTES_PER_LINE) as u32);
                let hex = chunk
                    .iter()
                    .map(|b| format!("{:02X}", b))
                    .collect::<Vec<_>>()
                    .join(" ");
                let ascii: String = chunk
                    .iter()
                    .map(|&b| if (0x20..0x7F).contains(&b) { b as char } else { '.' })
                    .collect();
                format!(
                    "{:08X}: {:<width$} {}",
                    addr,
                    hex,
                    ascii,
                    width = BYTES_PER_LINE * 3 - 1
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for AddressSpace {
    fn read8(&self, addr: u32) -> u8 {
        match self.region_of(addr) {
            Some(Region::Ram) => self.ram[(addr - RAM_START) as usize],
            Some(Region::Rom) => self.rom[(addr - ROM_START) as usize],
            None => {
                log::trace!("read from unmapped address 0x{:08X}", addr);
                0
            }
        }
    }

    fn write8(&mut self, addr: u32, value: u8) {
        match self.region_of(addr) {
            Some(Region::Ram) => self.ram[(addr - RAM_START) as usize] = value,
            Some(Region::Rom) => self.rom[(addr - ROM_START) as usize] = value,
            None => log::trace!("write to unmapped address 0x{:08X} ignored", addr),
        }
    }
}
