//! RX Assembler Module
//!
//! Converts assembly source text into the exact byte encodings the decoder
//! recognizes.
//!
//! Assembly is line-independent. A line that fails contributes no bytes and
//! one [`AssemblerError`]; every other line still assembles. Callers decide
//! what to do with a partially failed result, typically refusing to load it.
//!
//! # Syntax
//!
//! ```text
//! ; comment line
//! // also a comment line
//! NOP
//! MOV.L #0x1000, R1      ; hex immediate
//! MOV.L #-1, R2          ; decimal, two's complement
//! MOV.L R1, R3
//! ADD.L #4, SP
//! ```
//!
//! Mnemonics and registers are case-insensitive.

pub mod encoder;
pub mod parser;
pub mod source_map;

pub use source_map::{OffsetRange, SourceMap};

/// Complete output from assembling source code
#[derive(Debug, Clone, Default)]
pub struct AssemblerOutput {
    /// Machine code for every line that assembled, in source order
    pub bytes: Vec<u8>,

    /// One entry per failed line, in source order
    pub errors: Vec<AssemblerError>,

    /// Byte range emitted by each source line
    pub source_map: SourceMap,
}

impl AssemblerOutput {
    /// Returns true if every line assembled.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// An error on one source line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Line {line}: {kind}")]
pub struct AssemblerError {
    /// Line number where the error occurred (1-indexed)
    pub line: usize,

    /// What went wrong
    pub kind: AssemblerErrorKind,
}

/// Classification of assembly errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblerErrorKind {
    /// No table entry has this mnemonic with these operand kinds.
    #[error("unknown instruction or operand combination: {mnemonic} ({signature})")]
    UnknownInstruction { mnemonic: String, signature: String },

    /// Register token is not `SP` or `R0`..`R15`.
    #[error("invalid register: {0}")]
    InvalidRegister(String),

    /// Immediate token is not a number.
    #[error("invalid immediate value: {0}")]
    InvalidImmediate(String),

    /// Immediate does not fit in 32 bits.
    #[error("immediate value out of range: {0}")]
    ImmediateOutOfRange(String),
}

/// Assemble source code into machine code
///
/// # Arguments
///
/// * `source` - The assembly source code text
///
/// # Returns
///
/// The concatenated bytes of every line that assembled together with the
/// errors of every line that did not.
///
/// # Examples
///
/// ```
/// use rxsim::assemble;
///
/// let output = assemble("MOV.L #1, R1\nMOV.L #2, R99");
///
/// assert_eq!(output.bytes, vec![0xFB, 0x12, 0x01, 0x01, 0x00, 0x00, 0x00]);
/// assert_eq!(output.errors.len(), 1);
/// assert_eq!(output.errors[0].to_string(), "Line 2: invalid register: R99");
/// ```
pub fn assemble(source: &str) -> AssemblerOutput {
    let mut output = AssemblerOutput::default();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;

        let Some(parsed) = parser::parse_line(text) else {
            continue;
        };

        match encoder::encode_line(&parsed) {
            Ok(encoded) => {
                let start = output.bytes.len() as u32;
                output.bytes.extend_from_slice(&encoded);
                output.source_map.add_mapping(
                    OffsetRange {
                        start,
                        end: output.bytes.len() as u32,
                    },
                    line,
                );
            }
            Err(kind) => output.errors.push(AssemblerError { line, kind }),
        }
    }

    log::debug!(
        "assembled {} bytes with {} error(s)",
        output.bytes.len(),
        output.errors.len()
    );
    output
}
