//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary register contents and instruction bytes,
//! then executes a few instructions to find edge cases and crashes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rxsim::address_map::{RAM_START, RESET_VECTOR};
use rxsim::{AddressSpace, MemoryBus, CPU};

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Initial general purpose registers
    registers: [u32; 16],
    /// Where execution starts
    start: u32,
    /// Bytes placed at the start address
    code: [u8; 32],
    /// Flags to preset
    flag_c: bool,
    flag_o: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = AddressSpace::new();

    // Keep code inside RAM so every byte lands
    let start = RAM_START + (input.start % 0x3_0000);
    memory.load(&input.code, start);
    memory.write32(RESET_VECTOR, start);

    let mut cpu = CPU::new(memory);
    for (index, &value) in input.registers.iter().enumerate() {
        cpu.set_register(index as u8, value);
    }
    cpu.set_flag_c(input.flag_c);
    cpu.set_flag_o(input.flag_o);

    for _ in 0..8 {
        let pc_before = cpu.pc();
        let cycles = cpu.step();

        // Every instruction costs one or two cycles and moves PC forward
        assert!(cycles == 1 || cycles == 2);
        let advanced = cpu.pc().wrapping_sub(pc_before);
        assert!(advanced >= 1 && advanced <= 7);
    }

    // No instruction in the subset touches C or O
    assert_eq!(cpu.flag_c(), input.flag_c);
    assert_eq!(cpu.flag_o(), input.flag_o);
});
