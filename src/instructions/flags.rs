//! # Flag Updates
//!
//! Z and S are recomputed from the 32-bit result after every move or add.
//! O and C are left alone by the modeled subset.

use crate::{MemoryBus, CPU};

/// Sets Z if `result` is zero and S if bit 31 of `result` is set.
pub(crate) fn update_zero_and_sign<M: MemoryBus>(cpu: &mut CPU<M>, result: u32) {
    cpu.psw.z = result == 0;
    cpu.psw.s = result & 0x8000_0000 != 0;
}
