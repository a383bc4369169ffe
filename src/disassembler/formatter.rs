//! Formatting functions for disassembled instructions

use crate::disassembler::DisassembledInstruction;
use crate::opcodes::Instruction;

/// Format a single instruction as assembly text
///
/// Immediates are printed as eight hex digits so the text assembles back to
/// the same bytes. Unrecognized bytes print as `.BYTE 0xNN`, which the
/// assembler does not accept.
///
/// # Examples
///
/// ```
/// use rxsim::{disassemble, format_instruction};
///
/// let listing = disassemble(&[0x72, 0x24, 0x01, 0x00, 0x00, 0x00], 0);
/// assert_eq!(format_instruction(&listing[0]), "ADD.L #0x00000001, R4");
/// ```
pub fn format_instruction(instr: &DisassembledInstruction) -> String {
    let mnemonic = instr.instruction.mnemonic();
    match instr.instruction {
        Instruction::Nop => mnemonic.to_string(),
        Instruction::MovImm { rd, imm } | Instruction::AddImm { rd, imm } => {
            format!("{} #0x{:08X}, R{}", mnemonic, imm, rd)
        }
        Instruction::MovReg { rs, rd } => format!("{} R{}, R{}", mnemonic, rs, rd),
        Instruction::Unrecognized { opcode } => format!("{} 0x{:02X}", mnemonic, opcode),
    }
}

/// Format a debugger listing, one instruction per line:
/// address, raw bytes, then the instruction text.
///
/// ```text
/// FFE00000  FB 12 01 10 00 00 00  MOV.L #0x00000010, R1
/// FFE00007  03                    NOP
/// ```
pub fn format_listing(instructions: &[DisassembledInstruction]) -> String {
    let mut out = String::new();
    for instr in instructions {
        let hex = instr
            .bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!(
            "{:08X}  {:<20}  {}\n",
            instr.address,
            hex,
            format_instruction(instr)
        ));
    }
    out
}
