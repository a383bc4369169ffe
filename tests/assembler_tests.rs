//! Integration tests for the assembler.

use rxsim::{assemble, AssemblerErrorKind};

#[test]
fn test_partial_failure_keeps_valid_lines() {
    let output = assemble("MOV.L #0x10, R1\nMOV.L R1, R99");

    assert_eq!(output.bytes, vec![0xFB, 0x12, 0x01, 0x10, 0x00, 0x00, 0x00]);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].line, 2);
    assert_eq!(
        output.errors[0].kind,
        AssemblerErrorKind::InvalidRegister("R99".to_string())
    );
    assert!(output.errors[0].to_string().starts_with("Line 2: "));
    assert!(!output.is_ok());
}

#[test]
fn test_failed_line_in_the_middle() {
    let output = assemble("NOP\nFOO R1, R2\nNOP");

    assert_eq!(output.bytes, vec![0x03, 0x03]);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].line, 2);
}

#[test]
fn test_every_bad_line_reported() {
    let output = assemble("MOV.L #1, R16\nADD.L R1, R2\nMOV.L #0x1FFFFFFFF, R1\nMOV.L #abc, R1");

    assert!(output.bytes.is_empty());
    let lines: Vec<usize> = output.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![1, 2, 3, 4]);
    assert!(matches!(output.errors[0].kind, AssemblerErrorKind::InvalidRegister(_)));
    assert!(matches!(
        output.errors[1].kind,
        AssemblerErrorKind::UnknownInstruction { .. }
    ));
    assert!(matches!(
        output.errors[2].kind,
        AssemblerErrorKind::ImmediateOutOfRange(_)
    ));
    assert!(matches!(output.errors[3].kind, AssemblerErrorKind::InvalidImmediate(_)));
}

#[test]
fn test_case_insensitive() {
    let upper = assemble("MOV.L #0X2A, R3\nADD.L #1, SP");
    let lower = assemble("mov.l #0x2a, r3\nadd.l #1, sp");

    assert!(upper.is_ok());
    assert_eq!(upper.bytes, lower.bytes);
}

#[test]
fn test_comments_and_blank_lines() {
    let source = r#"
        ; set up
        // counter in R1
        MOV.L #0, R1      ; clear

        ADD.L #1, R1
    "#;

    let output = assemble(source);

    assert!(output.is_ok(), "{:?}", output.errors);
    assert_eq!(output.bytes.len(), 7 + 6);
    assert_eq!(output.source_map.line_for_offset(0), Some(4));
    assert_eq!(output.source_map.line_for_offset(7), Some(6));
}

#[test]
fn test_tab_separated_mnemonic() {
    let output = assemble("MOV.L\tR2, R3");
    assert_eq!(output.bytes, vec![0xCF, 0x23]);
}

#[test]
fn test_immediate_boundaries() {
    let output = assemble(
        "MOV.L #0xFFFFFFFF, R1\nMOV.L #4294967295, R2\nMOV.L #-2147483648, R3\nMOV.L #0, R4",
    );
    assert!(output.is_ok());

    assert_eq!(&output.bytes[3..7], &[0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(&output.bytes[10..14], &[0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(&output.bytes[17..21], &[0x00, 0x00, 0x00, 0x80]);
    assert_eq!(&output.bytes[24..28], &[0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn test_register_encoding_nibbles() {
    let output = assemble("MOV.L R15, R0\nADD.L #0, R15");
    assert_eq!(output.bytes[0..2], [0xCF, 0xF0]);
    assert_eq!(output.bytes[2..4], [0x72, 0x2F]);
}

#[test]
fn test_empty_and_comment_only_source() {
    for source in ["", "\n\n", "; nothing\n// here"] {
        let output = assemble(source);
        assert!(output.is_ok());
        assert!(output.bytes.is_empty());
        assert!(output.source_map.is_empty());
    }
}

#[test]
fn test_error_lines_count_crlf() {
    let output = assemble("NOP\r\nBAD\r\nNOP\r\n");
    assert_eq!(output.bytes, vec![0x03, 0x03]);
    assert_eq!(output.errors[0].line, 2);
}
