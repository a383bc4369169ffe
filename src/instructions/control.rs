//! # Control Instructions
//!
//! - NOP: No Operation

use crate::{MemoryBus, CPU};

/// Executes NOP. No register or flag changes.
pub(crate) fn execute_nop<M: MemoryBus>(_cpu: &mut CPU<M>) {}
