//! # RX Instruction-Set Simulator Core
//!
//! A fetch-decode-execute simulator for a small subset of a 32-bit RX65N-style
//! microcontroller, plus the text assembler that produces the exact byte
//! encodings its decoder understands.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxsim::{assemble, AddressSpace, MemoryBus, CPU};
//! use rxsim::address_map::{RESET_VECTOR, ROM_START};
//!
//! let program = assemble("MOV.L #0x10, R1\nMOV.L R1, R2\nADD.L #1, R2");
//! assert!(program.errors.is_empty());
//!
//! // Place the code in ROM and point the reset vector at it
//! let mut memory = AddressSpace::new();
//! memory.load(&program.bytes, ROM_START);
//! memory.write32(RESET_VECTOR, ROM_START);
//!
//! let mut cpu = CPU::new(memory);
//! cpu.run(5);
//!
//! assert_eq!(cpu.register(1), 0x10);
//! assert_eq!(cpu.register(2), 0x11);
//! ```
//!
//! ## Architecture
//!
//! - **Total memory contract**: every address reads and writes without error;
//!   unmapped reads are 0 and unmapped writes vanish
//! - **Table-driven decode**: one ordered pattern table feeds the CPU, the
//!   disassembler, and (by construction) the assembler's encoders
//! - **Recoverable faults**: unknown opcodes and bad source lines are reported,
//!   never fatal
//! - **Standalone peripherals**: GPIO, timer and serial transmit share one
//!   register-file trait and are driven by an external scheduler via `tick`
//!
//! ## Modules
//!
//! - `address_map` - Fixed address windows and the reset vector
//! - `memory` - MemoryBus trait and the RAM/ROM address space
//! - `cpu` - CPU state and execution logic
//! - `opcodes` - Ordered instruction pattern table
//! - `devices` - Peripheral trait, interrupt controller, GPIO, timer, serial
//! - `assembler` - Source text to machine code
//! - `disassembler` - Machine code to listing

pub mod address_map;
pub mod addressing;
pub mod assembler;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod memory;
pub mod opcodes;
pub mod wasm;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::OperandKind;
pub use assembler::{assemble, AssemblerError, AssemblerErrorKind, AssemblerOutput};
pub use cpu::{CpuSnapshot, Psw, CPU};
pub use devices::{
    CompareMatchTimer, Gpio, InterruptController, InterruptRequest, Peripheral, SerialTx,
};
pub use disassembler::{disassemble, format_instruction, format_listing, DisassembledInstruction};
pub use memory::{AddressSpace, MemoryBus, Region};
pub use opcodes::{Instruction, OPCODE_PATTERNS};

/// Recoverable faults raised while executing.
///
/// Faults are reported and recorded on the CPU, never returned as errors from
/// `step` or `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionFault {
    /// No pattern matched the byte at PC; PC was advanced by one.
    #[error("unrecognized opcode 0x{opcode:02X} at PC=0x{pc:08X}")]
    UnrecognizedOpcode { opcode: u8, pc: u32 },
}
