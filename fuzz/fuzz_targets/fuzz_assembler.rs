//! Fuzz target for the assembler.
//!
//! This target feeds arbitrary strings to the assembler to find
//! edge cases, panics, and crashes in parsing and encoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rxsim::{assemble, disassemble};

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);
    let output = assemble(&source);

    // Every error names a real source line
    let line_count = source.lines().count();
    for error in &output.errors {
        assert!(error.line >= 1 && error.line <= line_count);
    }

    // Whatever assembled decodes without leftovers
    let decoded: usize = disassemble(&output.bytes, 0)
        .iter()
        .map(|i| i.size_bytes as usize)
        .sum();
    assert_eq!(decoded, output.bytes.len());
});
