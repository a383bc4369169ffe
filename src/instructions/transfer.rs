//! # Register Transfer Instructions
//!
//! - MOV.L #imm, Rd: Load a 32-bit immediate into Rd
//! - MOV.L Rs, Rd: Copy Rs into Rd

use super::flags::update_zero_and_sign;
use crate::{MemoryBus, CPU};

/// Executes MOV.L #imm, Rd.
///
/// Updates Z and S from the stored value.
pub(crate) fn execute_mov_imm<M: MemoryBus>(cpu: &mut CPU<M>, rd: u8, imm: u32) {
    cpu.set_register(rd, imm);
    update_zero_and_sign(cpu, imm);
}

/// Executes MOV.L Rs, Rd.
///
/// Rs is left unchanged. Updates Z and S from the copied value.
pub(crate) fn execute_mov_reg<M: MemoryBus>(cpu: &mut CPU<M>, rs: u8, rd: u8) {
    let value = cpu.register(rs);
    cpu.set_register(rd, value);
    update_zero_and_sign(cpu, value);
}
