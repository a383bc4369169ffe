//! Instruction encoder for the RX assembler
//!
//! Lines are matched against [`INSTRUCTION_TABLE`] in order by mnemonic and
//! operand-kind signature; the first entry that matches encodes the line.

use crate::addressing::OperandKind;
use crate::addressing::OperandKind::{Immediate as Imm, Register as Reg};
use crate::assembler::parser::{parse_immediate, parse_register, SourceLine};
use crate::assembler::AssemblerErrorKind;
use crate::opcodes::{
    Instruction, ADD_IMM_OPCODE, ADD_IMM_SUBOP, MOV_IMM_OPCODE, MOV_IMM_SUBOP, MOV_REG_OPCODE,
    NOP_OPCODE,
};

/// One assemblable instruction form.
#[derive(Clone, Copy)]
pub struct InstructionForm {
    pub mnemonic: &'static str,

    /// Operand kinds, in source order.
    pub signature: &'static [OperandKind],

    /// Builds the instruction from operand tokens already known to match
    /// `signature`.
    pub build: fn(&[String]) -> Result<Instruction, AssemblerErrorKind>,
}

/// Ordered instruction table. Earlier rows take priority.
pub static INSTRUCTION_TABLE: &[InstructionForm] = &[
    InstructionForm {
        mnemonic: "NOP",
        signature: &[],
        build: build_nop,
    },
    InstructionForm {
        mnemonic: "MOV.L",
        signature: &[Imm, Reg],
        build: build_mov_imm,
    },
    InstructionForm {
        mnemonic: "MOV.L",
        signature: &[Reg, Reg],
        build: build_mov_reg,
    },
    InstructionForm {
        mnemonic: "ADD.L",
        signature: &[Imm, Reg],
        build: build_add_imm,
    },
];

fn build_nop(_: &[String]) -> Result<Instruction, AssemblerErrorKind> {
    Ok(Instruction::Nop)
}

fn build_mov_imm(ops: &[String]) -> Result<Instruction, AssemblerErrorKind> {
    Ok(Instruction::MovImm {
        imm: parse_immediate(&ops[0])?,
        rd: parse_register(&ops[1])?,
    })
}

fn build_mov_reg(ops: &[String]) -> Result<Instruction, AssemblerErrorKind> {
    Ok(Instruction::MovReg {
        rs: parse_register(&ops[0])?,
        rd: parse_register(&ops[1])?,
    })
}

fn build_add_imm(ops: &[String]) -> Result<Instruction, AssemblerErrorKind> {
    Ok(Instruction::AddImm {
        imm: parse_immediate(&ops[0])?,
        rd: parse_register(&ops[1])?,
    })
}

/// Encodes a parsed line into machine code.
pub fn encode_line(line: &SourceLine) -> Result<Vec<u8>, AssemblerErrorKind> {
    let kinds: Vec<OperandKind> = line
        .operands
        .iter()
        .map(|op| OperandKind::classify(op))
        .collect();

    let form = INSTRUCTION_TABLE
        .iter()
        .find(|f| f.mnemonic == line.mnemonic && f.signature == kinds.as_slice())
        .ok_or_else(|| AssemblerErrorKind::UnknownInstruction {
            mnemonic: line.mnemonic.clone(),
            signature: describe_signature(&kinds),
        })?;

    let instruction = (form.build)(&line.operands)?;
    Ok(encode_instruction(&instruction))
}

/// Emits the byte encoding of a decoded instruction.
///
/// Register fields are masked to four bits. `Unrecognized` emits its single
/// opcode byte.
pub fn encode_instruction(instruction: &Instruction) -> Vec<u8> {
    match *instruction {
        Instruction::Nop => vec![NOP_OPCODE],
        Instruction::MovImm { rd, imm } => {
            let mut bytes = vec![MOV_IMM_OPCODE, MOV_IMM_SUBOP, rd & 0x0F];
            bytes.extend_from_slice(&imm.to_le_bytes());
            bytes
        }
        Instruction::MovReg { rs, rd } => {
            vec![MOV_REG_OPCODE, ((rs & 0x0F) << 4) | (rd & 0x0F)]
        }
        Instruction::AddImm { rd, imm } => {
            let mut bytes = vec![ADD_IMM_OPCODE, ADD_IMM_SUBOP | (rd & 0x0F)];
            bytes.extend_from_slice(&imm.to_le_bytes());
            bytes
        }
        Instruction::Unrecognized { opcode } => vec![opcode],
    }
}

fn describe_signature(kinds: &[OperandKind]) -> String {
    if kinds.is_empty() {
        return "no operands".to_string();
    }
    kinds
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(", ")
}
