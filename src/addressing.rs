//! # Operand Kinds
//!
//! The modeled subset has two addressing modes: an immediate value encoded
//! in the instruction, and a general purpose register. Operand text that is
//! neither is classified `Unknown` and never matches an instruction.

/// Lexical class of an assembler operand.
///
/// Classification looks only at the token's shape, not whether the value is
/// valid: `R99` is a `Register` operand that later fails to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// `#` followed by a value.
    ///
    /// Example: `MOV.L #0x10, R1`
    Immediate,

    /// `R<n>`, `SP` or `PC`.
    ///
    /// Example: `MOV.L R1, R2`
    Register,

    /// Anything else.
    Unknown,
}

impl OperandKind {
    /// Classifies an upper-cased, trimmed operand token.
    ///
    /// ```
    /// use rxsim::OperandKind;
    ///
    /// assert_eq!(OperandKind::classify("#42"), OperandKind::Immediate);
    /// assert_eq!(OperandKind::classify("R15"), OperandKind::Register);
    /// assert_eq!(OperandKind::classify("SP"), OperandKind::Register);
    /// assert_eq!(OperandKind::classify("[R1]"), OperandKind::Unknown);
    /// ```
    pub fn classify(token: &str) -> Self {
        if token.starts_with('#') {
            OperandKind::Immediate
        } else if token.starts_with('R') || token == "SP" || token == "PC" {
            OperandKind::Register
        } else {
            OperandKind::Unknown
        }
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            OperandKind::Immediate => "immediate",
            OperandKind::Register => "register",
            OperandKind::Unknown => "unknown",
        }
    }
}
