//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary byte sequences to the disassembler
//! to find edge cases and crashes in instruction decoding.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rxsim::{assemble, disassemble, format_instruction, Instruction};

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u32,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let instructions = disassemble(&input.bytes, input.start_address);

    let mut total_size: usize = 0;
    let mut expected_address = input.start_address;

    for instr in &instructions {
        assert_eq!(instr.address, expected_address);
        assert!(instr.size_bytes >= 1 && instr.size_bytes <= 7);
        assert_eq!(instr.bytes.len(), instr.size_bytes as usize);

        // Recognized instructions reassemble to the same bytes
        if !matches!(instr.instruction, Instruction::Unrecognized { .. }) {
            let output = assemble(&format_instruction(instr));
            assert!(output.is_ok());
            assert_eq!(output.bytes, instr.bytes);
        }

        total_size += instr.size_bytes as usize;
        expected_address = expected_address.wrapping_add(u32::from(instr.size_bytes));
    }

    assert_eq!(total_size, input.bytes.len());
});
