//! Instruction decoder for the RX disassembler

use crate::disassembler::DisassembledInstruction;
use crate::opcodes::decode_bytes;

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The address of this instruction
///
/// An empty slice decodes as an unrecognized zero byte; callers stop at the
/// end of their input before that happens.
pub fn decode_instruction(bytes: &[u8], address: u32) -> DisassembledInstruction {
    let decoded = decode_bytes(bytes);
    let size = (decoded.size_bytes as usize).min(bytes.len());

    DisassembledInstruction {
        address,
        instruction: decoded.instruction,
        bytes: bytes[..size].to_vec(),
        size_bytes: decoded.size_bytes,
        cycles: decoded.cycles,
    }
}
