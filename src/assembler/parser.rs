//! Assembly source parser

use crate::assembler::AssemblerErrorKind;
use std::num::IntErrorKind;

/// A parsed, upper-cased line of assembly source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Mnemonic (e.g., "MOV.L")
    pub mnemonic: String,

    /// Trimmed operand tokens, in source order
    pub operands: Vec<String>,
}

/// Splits one source line into a mnemonic and operands.
///
/// Returns `None` for blank lines and comment lines. A trailing `;` comment
/// is dropped before splitting.
pub fn parse_line(text: &str) -> Option<SourceLine> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with("//") {
        return None;
    }

    let code = match trimmed.find(';') {
        Some(pos) => trimmed[..pos].trim_end(),
        None => trimmed,
    };
    let code = code.to_ascii_uppercase();

    let (mnemonic, rest) = match code.split_once(char::is_whitespace) {
        Some((mnemonic, rest)) => (mnemonic, rest.trim()),
        None => (code.as_str(), ""),
    };

    let operands = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(|op| op.trim().to_string()).collect()
    };

    Some(SourceLine {
        mnemonic: mnemonic.to_string(),
        operands,
    })
}

/// Parses an immediate operand (`#0X1F`, `#31`, `#-1`) into its 32-bit
/// encoding.
///
/// Hex values cover 0..=0xFFFFFFFF. Decimal values cover -2^31..=2^32-1;
/// negatives encode as two's complement. Anything wider is an
/// [`ImmediateOutOfRange`](AssemblerErrorKind::ImmediateOutOfRange) error
/// rather than being reduced modulo 2^32.
pub fn parse_immediate(token: &str) -> Result<u32, AssemblerErrorKind> {
    let digits = token.strip_prefix('#').unwrap_or(token).to_ascii_uppercase();

    let range_error = |kind: &IntErrorKind| match kind {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            AssemblerErrorKind::ImmediateOutOfRange(token.to_string())
        }
        _ => AssemblerErrorKind::InvalidImmediate(token.to_string()),
    };

    if let Some(hex) = digits.strip_prefix("0X") {
        return u32::from_str_radix(hex, 16).map_err(|e| range_error(e.kind()));
    }

    let value: i64 = digits.parse().map_err(|e: std::num::ParseIntError| range_error(e.kind()))?;
    if value < i64::from(i32::MIN) || value > i64::from(u32::MAX) {
        return Err(AssemblerErrorKind::ImmediateOutOfRange(token.to_string()));
    }
    Ok(value as u32)
}

/// Parses a register operand: `SP` is R0, `R<n>` is n for n in 0..=15.
pub fn parse_register(token: &str) -> Result<u8, AssemblerErrorKind> {
    let upper = token.to_ascii_uppercase();
    if upper == "SP" {
        return Ok(0);
    }

    upper
        .strip_prefix('R')
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|&n| n <= 15)
        .ok_or_else(|| AssemblerErrorKind::InvalidRegister(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(mnemonic: &str, operands: &[&str]) -> Option<SourceLine> {
        Some(SourceLine {
            mnemonic: mnemonic.to_string(),
            operands: operands.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn test_parse_line_skips_blank_and_comments() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \t"), None);
        assert_eq!(parse_line("; comment"), None);
        assert_eq!(parse_line("  // comment"), None);
    }

    #[test]
    fn test_parse_line_splits_operands() {
        assert_eq!(parse_line("nop"), line("NOP", &[]));
        assert_eq!(
            parse_line("  mov.l  #0x10 ,  r1  "),
            line("MOV.L", &["#0X10", "R1"])
        );
        assert_eq!(parse_line("MOV.L\tR1,R2"), line("MOV.L", &["R1", "R2"]));
    }

    #[test]
    fn test_parse_line_strips_trailing_comment() {
        assert_eq!(parse_line("ADD.L #1, R4 ; bump"), line("ADD.L", &["#1", "R4"]));
        assert_eq!(parse_line("NOP;"), line("NOP", &[]));
    }

    #[test]
    fn test_parse_line_keeps_empty_operand() {
        assert_eq!(parse_line("MOV.L R1,"), line("MOV.L", &["R1", ""]));
    }

    #[test]
    fn test_parse_immediate_hex() {
        assert_eq!(parse_immediate("#0X2A"), Ok(0x2A));
        assert_eq!(parse_immediate("#0xffffffff"), Ok(0xFFFF_FFFF));
        assert_eq!(
            parse_immediate("#0X100000000"),
            Err(AssemblerErrorKind::ImmediateOutOfRange("#0X100000000".to_string()))
        );
        assert_eq!(
            parse_immediate("#0XZZ"),
            Err(AssemblerErrorKind::InvalidImmediate("#0XZZ".to_string()))
        );
    }

    #[test]
    fn test_parse_immediate_decimal() {
        assert_eq!(parse_immediate("#0"), Ok(0));
        assert_eq!(parse_immediate("#4294967295"), Ok(u32::MAX));
        assert_eq!(parse_immediate("#-1"), Ok(0xFFFF_FFFF));
        assert_eq!(parse_immediate("#-2147483648"), Ok(0x8000_0000));
        assert!(matches!(
            parse_immediate("#4294967296"),
            Err(AssemblerErrorKind::ImmediateOutOfRange(_))
        ));
        assert!(matches!(
            parse_immediate("#-2147483649"),
            Err(AssemblerErrorKind::ImmediateOutOfRange(_))
        ));
        assert!(matches!(
            parse_immediate("#99999999999999999999"),
            Err(AssemblerErrorKind::ImmediateOutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_immediate_invalid() {
        assert!(matches!(parse_immediate("#"), Err(AssemblerErrorKind::InvalidImmediate(_))));
        assert!(matches!(parse_immediate("#ABC"), Err(AssemblerErrorKind::InvalidImmediate(_))));
        assert!(matches!(parse_immediate("#0X"), Err(AssemblerErrorKind::InvalidImmediate(_))));
    }

    #[test]
    fn test_parse_register() {
        assert_eq!(parse_register("SP"), Ok(0));
        assert_eq!(parse_register("R0"), Ok(0));
        assert_eq!(parse_register("r15"), Ok(15));
        assert_eq!(
            parse_register("R16"),
            Err(AssemblerErrorKind::InvalidRegister("R16".to_string()))
        );
        assert!(parse_register("R99").is_err());
        assert!(parse_register("R").is_err());
        assert!(parse_register("PC").is_err());
        assert!(parse_register("R-1").is_err());
    }
}
