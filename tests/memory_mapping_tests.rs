//! Integration tests for the RAM/ROM address space.
//!
//! These tests verify window placement, the total read/write contract for
//! unmapped addresses, and load semantics.

use rxsim::address_map::{
    DATA_FLASH_START, PERIPHERAL_IO_1_START, PERIPHERAL_IO_2_START, RAM_END, RAM_SIZE, RAM_START,
    RESET_VECTOR, ROM_END, ROM_SIZE, ROM_START, VECTOR_TABLE_BASE,
};
use rxsim::{AddressSpace, MemoryBus, Region, CPU};

#[test]
fn test_ram_read_write() {
    let mut memory = AddressSpace::new();

    memory.write8(RAM_START, 0x42);
    memory.write8(0x0000_0100, 0xAA);
    memory.write8(RAM_END, 0xFF);

    assert_eq!(memory.read8(RAM_START), 0x42);
    assert_eq!(memory.read8(0x0000_0100), 0xAA);
    assert_eq!(memory.read8(RAM_END), 0xFF);
}

#[test]
fn test_little_endian_access() {
    let mut memory = AddressSpace::new();

    memory.write32(0x10, 0x1234_5678);
    assert_eq!(memory.read8(0x10), 0x78);
    assert_eq!(memory.read8(0x13), 0x12);
    assert_eq!(memory.read16(0x10), 0x5678);
    assert_eq!(memory.read16(0x12), 0x1234);

    memory.write16(0x20, 0xBEEF);
    assert_eq!(memory.read32(0x20), 0x0000_BEEF);
}

#[test]
fn test_rom_is_writable_through_bus_and_nop_filled() {
    let mut memory = AddressSpace::new();

    assert_eq!(memory.read8(ROM_START), 0x03);
    assert_eq!(memory.read8(ROM_END), 0x03);

    memory.write8(ROM_START, 0x55);
    assert_eq!(memory.read8(ROM_START), 0x55);
}

#[test]
fn test_window_sizes() {
    assert_eq!(RAM_SIZE, 0x4_0000);
    assert_eq!(ROM_SIZE, 0x20_0000);
    assert_eq!(RESET_VECTOR, 0xFFFF_FFFC);
    assert!(VECTOR_TABLE_BASE >= ROM_START);
}

#[test]
fn test_boundary_addresses_are_unmapped() {
    let mut memory = AddressSpace::new();

    // One past the end of RAM and one before the start of ROM
    for addr in [RAM_END + 1, ROM_START - 1] {
        assert_eq!(memory.region_of(addr), None);
        memory.write8(addr, 0xAA);
        assert_eq!(memory.read8(addr), 0x00, "0x{:08X} should read 0", addr);
    }

    // The windows themselves end exactly where they should
    assert_eq!(memory.region_of(RAM_END), Some(Region::Ram));
    assert_eq!(memory.region_of(ROM_START), Some(Region::Rom));
}

#[test]
fn test_multibyte_access_does_not_wrap_past_rom_end() {
    let mut memory = AddressSpace::new();
    memory.write8(RAM_START, 0x11);
    memory.write8(RAM_START + 1, 0x22);

    // Low two bytes land at the top of ROM, the high two fall off the end
    memory.write32(ROM_END - 1, 0xAABB_CCDD);
    assert_eq!(memory.read8(ROM_END - 1), 0xDD);
    assert_eq!(memory.read8(ROM_END), 0xCC);
    assert_eq!(memory.read8(RAM_START), 0x11);
    assert_eq!(memory.read8(RAM_START + 1), 0x22);

    assert_eq!(memory.read32(ROM_END - 1), 0x0000_CCDD);
    assert_eq!(memory.read16(ROM_END), 0x00CC);

    memory.write16(ROM_END, 0x3344);
    assert_eq!(memory.read8(ROM_END), 0x44);
    assert_eq!(memory.read8(RAM_START), 0x11);

    let dumped = memory.dump(ROM_END, 3);
    assert_eq!(dumped, vec![0x44, 0x00, 0x00]);
}

#[test]
fn test_fetch_at_rom_end_does_not_read_ram() {
    let mut memory = AddressSpace::new();
    memory.write32(RAM_START, 0x1234_5678);
    memory.load(&[0xFB, 0x12, 0x01], ROM_END - 2);

    let mut cpu = CPU::new(memory);
    cpu.set_pc(ROM_END - 2);
    assert_eq!(cpu.step(), 2);

    // The immediate bytes lie past the top of the address space and read 0
    assert_eq!(cpu.register(1), 0);
}

#[test]
fn test_peripheral_and_flash_windows_are_unmapped() {
    let mut memory = AddressSpace::new();

    for addr in [PERIPHERAL_IO_1_START, DATA_FLASH_START, PERIPHERAL_IO_2_START] {
        memory.write32(addr, 0xFFFF_FFFF);
        assert_eq!(memory.read32(addr), 0);
    }
}

#[test]
fn test_word_access_straddling_window_end() {
    let mut memory = AddressSpace::new();

    memory.write32(RAM_END - 1, 0xAABB_CCDD);

    // Only the two in-window bytes stick
    assert_eq!(memory.read8(RAM_END - 1), 0xDD);
    assert_eq!(memory.read8(RAM_END), 0xCC);
    assert_eq!(memory.read32(RAM_END - 1), 0x0000_CCDD);
}

#[test]
fn test_load_into_ram_and_rom() {
    let mut memory = AddressSpace::new();

    assert_eq!(memory.load(&[1, 2, 3], 0x100), 3);
    assert_eq!(memory.dump(0x100, 3), vec![1, 2, 3]);

    assert_eq!(memory.load(&[0xCF, 0x12], ROM_START + 4), 2);
    assert_eq!(memory.dump(ROM_START + 4, 2), vec![0xCF, 0x12]);
}

#[test]
fn test_load_truncates_at_window_end() {
    let mut memory = AddressSpace::new();

    let stored = memory.load(&[9, 9, 9, 9], RAM_END - 1);

    assert_eq!(stored, 2);
    assert_eq!(memory.read8(RAM_END), 9);
    assert_eq!(memory.read8(RAM_END + 1), 0);
}

#[test]
fn test_load_outside_windows_is_dropped() {
    let mut memory = AddressSpace::new();

    assert_eq!(memory.load(&[1, 2, 3], PERIPHERAL_IO_1_START), 0);
    assert_eq!(memory.read8(PERIPHERAL_IO_1_START), 0);
}

#[test]
fn test_reset_clears_ram_keeps_rom() {
    let mut memory = AddressSpace::new();
    memory.write8(0x40, 0x11);
    memory.write8(ROM_START, 0x22);

    memory.reset();

    assert_eq!(memory.read8(0x40), 0x00);
    assert_eq!(memory.read8(ROM_START), 0x22);
}

#[test]
fn test_dump_hex_format() {
    let mut memory = AddressSpace::new();
    memory.load(b"Hello, RX!", 0x200);

    let text = memory.dump_hex(0x200, 16);

    assert!(text.starts_with("00000200: 48 65 6C 6C 6F"));
    assert!(text.contains("Hello, RX!"));
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_cpu_sees_memory_writes() {
    let mut memory = AddressSpace::new();
    memory.write32(RESET_VECTOR, 0x0000_0400);
    let mut cpu = CPU::new(memory);

    cpu.memory_mut().load(&[0xCF, 0x21], 0x400);
    cpu.set_register(2, 77);
    cpu.step();

    assert_eq!(cpu.register(1), 77);
}
