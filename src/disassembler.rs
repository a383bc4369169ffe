//! RX Disassembler Module
//!
//! Converts machine code into assembler-accepted text by walking it with the
//! same pattern table the CPU decodes with.

pub mod decoder;
pub mod formatter;

pub use formatter::{format_instruction, format_listing};

use crate::opcodes::Instruction;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledInstruction {
    /// Address where this instruction starts
    pub address: u32,

    /// Decoded form; `Unrecognized` for bytes no pattern matches
    pub instruction: Instruction,

    /// Raw encoding
    pub bytes: Vec<u8>,

    /// Total size in bytes
    pub size_bytes: u8,

    /// Cycle cost
    pub cycles: u8,
}

/// Disassemble a byte slice into a vector of instructions
///
/// # Arguments
///
/// * `bytes` - The machine code to disassemble
/// * `start_address` - Address of `bytes[0]`, used for the listing
///
/// # Returns
///
/// One entry per decoded instruction. Bytes that start no known encoding, and
/// a trailing encoding cut short by the end of `bytes`, come back one byte at
/// a time as `Unrecognized`.
///
/// # Examples
///
/// ```
/// use rxsim::{disassemble, format_instruction};
///
/// let listing = disassemble(&[0x03, 0xCF, 0x12], 0xFFE0_0000);
/// assert_eq!(listing.len(), 2);
/// assert_eq!(listing[1].address, 0xFFE0_0001);
/// assert_eq!(format_instruction(&listing[1]), "MOV.L R1, R2");
/// ```
pub fn disassemble(bytes: &[u8], start_address: u32) -> Vec<DisassembledInstruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = start_address;

    while offset < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[offset..], address);
        offset += instr.size_bytes as usize;
        address = address.wrapping_add(u32::from(instr.size_bytes));
        instructions.push(instr);
    }

    instructions
}
