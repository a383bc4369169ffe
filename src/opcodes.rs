//! # Opcode Pattern Table
//!
//! The single source of truth for instruction encodings. The CPU, the
//! disassembler and the assembler's encoders all agree on these byte layouts.
//!
//! | Bytes (hex) | Instruction | Size | Cycles |
//! |-------------|-------------|------|--------|
//! | `03` | `NOP` | 1 | 1 |
//! | `FB 12 0d` imm32 | `MOV.L #imm, Rd` | 7 | 2 |
//! | `CF sd` | `MOV.L Rs, Rd` | 2 | 1 |
//! | `72 2d` imm32 | `ADD.L #imm, Rd` | 6 | 2 |
//!
//! Anything else decodes as [`Instruction::Unrecognized`], one byte, one cycle.
//!
//! Patterns are matched in table order and the first match wins. Each byte of
//! a pattern is a `(mask, value)` pair so register nibbles can vary freely.

use crate::memory::MemoryBus;

/// Opcode byte of `NOP`; also the ROM fill value.
pub const NOP_OPCODE: u8 = 0x03;

/// First byte of `MOV.L #imm32, Rd`.
pub const MOV_IMM_OPCODE: u8 = 0xFB;

/// Second byte of `MOV.L #imm32, Rd`.
pub const MOV_IMM_SUBOP: u8 = 0x12;

/// First byte of `MOV.L Rs, Rd`.
pub const MOV_REG_OPCODE: u8 = 0xCF;

/// First byte of `ADD.L #imm32, Rd`.
pub const ADD_IMM_OPCODE: u8 = 0x72;

/// High nibble of the second byte of `ADD.L #imm32, Rd`.
pub const ADD_IMM_SUBOP: u8 = 0x20;

/// Longest encoding in the table.
pub const MAX_INSTRUCTION_SIZE: usize = 7;

/// A decoded instruction with its operand fields extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `NOP`
    Nop,
    /// `MOV.L #imm, Rd`
    MovImm { rd: u8, imm: u32 },
    /// `MOV.L Rs, Rd`
    MovReg { rs: u8, rd: u8 },
    /// `ADD.L #imm, Rd`
    AddImm { rd: u8, imm: u32 },
    /// A byte that starts no known encoding.
    Unrecognized { opcode: u8 },
}

impl Instruction {
    /// Assembler mnemonic for this instruction.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Nop => "NOP",
            Instruction::MovImm { .. } | Instruction::MovReg { .. } => "MOV.L",
            Instruction::AddImm { .. } => "ADD.L",
            Instruction::Unrecognized { .. } => ".BYTE",
        }
    }
}

/// One row of the decode table.
#[derive(Clone, Copy)]
pub struct OpcodePattern {
    /// Mnemonic, for listings and table lookups.
    pub mnemonic: &'static str,

    /// `(mask, value)` per leading byte; byte `i` matches when
    /// `bytes[i] & mask == value`.
    pub pattern: &'static [(u8, u8)],

    /// Total encoding length in bytes.
    pub size_bytes: u8,

    /// Cycle cost.
    pub cycles: u8,

    /// Extracts operand fields from a full-length encoding.
    pub decode: fn(&[u8]) -> Instruction,
}

impl OpcodePattern {
    /// True if the leading bytes of `bytes` match this pattern.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        bytes.len() >= self.pattern.len()
            && self
                .pattern
                .iter()
                .zip(bytes)
                .all(|(&(mask, value), &byte)| byte & mask == value)
    }
}

fn imm32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn decode_nop(_: &[u8]) -> Instruction {
    Instruction::Nop
}

fn decode_mov_imm(bytes: &[u8]) -> Instruction {
    Instruction::MovImm {
        rd: bytes[2] & 0x0F,
        imm: imm32(&bytes[3..7]),
    }
}

fn decode_mov_reg(bytes: &[u8]) -> Instruction {
    Instruction::MovReg {
        rs: bytes[1] >> 4,
        rd: bytes[1] & 0x0F,
    }
}

fn decode_add_imm(bytes: &[u8]) -> Instruction {
    Instruction::AddImm {
        rd: bytes[1] & 0x0F,
        imm: imm32(&bytes[2..6]),
    }
}

/// Ordered decode table. Earlier rows take priority.
pub static OPCODE_PATTERNS: &[OpcodePattern] = &[
    OpcodePattern {
        mnemonic: "NOP",
        pattern: &[(0xFF, NOP_OPCODE)],
        size_bytes: 1,
        cycles: 1,
        decode: decode_nop,
    },
    OpcodePattern {
        mnemonic: "MOV.L",
        pattern: &[(0xFF, MOV_IMM_OPCODE), (0xFF, MOV_IMM_SUBOP), (0xF0, 0x00)],
        size_bytes: 7,
        cycles: 2,
        decode: decode_mov_imm,
    },
    OpcodePattern {
        mnemonic: "MOV.L",
        pattern: &[(0xFF, MOV_REG_OPCODE)],
        size_bytes: 2,
        cycles: 1,
        decode: decode_mov_reg,
    },
    OpcodePattern {
        mnemonic: "ADD.L",
        pattern: &[(0xFF, ADD_IMM_OPCODE), (0xF0, ADD_IMM_SUBOP)],
        size_bytes: 6,
        cycles: 2,
        decode: decode_add_imm,
    },
];

/// Size and cost charged for a byte no pattern recognizes.
pub const UNRECOGNIZED_SIZE: u8 = 1;
pub const UNRECOGNIZED_CYCLES: u8 = 1;

/// Result of decoding one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub instruction: Instruction,
    pub size_bytes: u8,
    pub cycles: u8,
}

/// Decodes the instruction at the start of `bytes`.
///
/// A matching pattern whose full encoding does not fit in `bytes` is treated
/// as unrecognized, so a truncated stream never reads past its end.
///
/// # Examples
///
/// ```
/// use rxsim::opcodes::{decode_bytes, Instruction};
///
/// let decoded = decode_bytes(&[0xCF, 0x12]);
/// assert_eq!(decoded.instruction, Instruction::MovReg { rs: 1, rd: 2 });
/// assert_eq!(decoded.size_bytes, 2);
/// ```
pub fn decode_bytes(bytes: &[u8]) -> Decoded {
    let matched = OPCODE_PATTERNS
        .iter()
        .find(|p| p.matches(bytes) && bytes.len() >= p.size_bytes as usize);

    match matched {
        Some(p) => Decoded {
            instruction: (p.decode)(bytes),
            size_bytes: p.size_bytes,
            cycles: p.cycles,
        },
        None => Decoded {
            instruction: Instruction::Unrecognized {
                opcode: bytes.first().copied().unwrap_or(0),
            },
            size_bytes: UNRECOGNIZED_SIZE,
            cycles: UNRECOGNIZED_CYCLES,
        },
    }
}

/// Fetches the longest possible encoding at `pc` from `memory` and decodes it.
///
/// Bytes past a window read as 0 through the bus contract, and so do bytes
/// that would lie past the top of the address space.
pub fn decode<M: MemoryBus>(memory: &M, pc: u32) -> Decoded {
    let mut window = [0u8; MAX_INSTRUCTION_SIZE];
    for (offset, byte) in (0u32..).zip(window.iter_mut()) {
        *byte = pc.checked_add(offset).map_or(0, |addr| memory.read8(addr));
    }
    decode_bytes(&window)
}
