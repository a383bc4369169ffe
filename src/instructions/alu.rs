//! # Arithmetic Instructions
//!
//! - ADD.L #imm, Rd: Add a 32-bit immediate to Rd
//!
//! The result wraps modulo 2^32. Carry and overflow are not computed, so the
//! C and O flags keep whatever value they had.

use super::flags::update_zero_and_sign;
use crate::{MemoryBus, CPU};

/// Executes ADD.L #imm, Rd.
pub(crate) fn execute_add_imm<M: MemoryBus>(cpu: &mut CPU<M>, rd: u8, imm: u32) {
    let result = cpu.register(rd).wrapping_add(imm);
    cpu.set_register(rd, result);
    update_zero_and_sign(cpu, result);
}
