//! # Instruction Implementations
//!
//! Each instruction is a standalone function taking the CPU by exclusive
//! reference plus its decoded operand fields. Handlers only update registers
//! and flags; the CPU advances PC and charges cycles after the handler returns.
//!
//! ## Categories
//!
//! - **control**: NOP
//! - **transfer**: MOV.L #imm, Rd and MOV.L Rs, Rd
//! - **alu**: ADD.L #imm, Rd
//! - **flags**: shared Z/S update

pub mod alu;
pub mod control;
pub mod flags;
pub mod transfer;

use crate::opcodes::Instruction;
use crate::{MemoryBus, CPU};

/// Dispatches a decoded instruction to its handler.
///
/// `Unrecognized` is a no-op here; fault reporting belongs to the caller.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, instruction: Instruction) {
    match instruction {
        Instruction::Nop => control::execute_nop(cpu),
        Instruction::MovImm { rd, imm } => transfer::execute_mov_imm(cpu, rd, imm),
        Instruction::MovReg { rs, rd } => transfer::execute_mov_reg(cpu, rs, rd),
        Instruction::AddImm { rd, imm } => alu::execute_add_imm(cpu, rd, imm),
        Instruction::Unrecognized { .. } => {}
    }
}
