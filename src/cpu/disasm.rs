/*!
disasm.rs - One-instruction disassembler over the opcode table.

Pure: takes the instruction bytes and the current flags (for the branch
taken / not-taken note) and returns text. Never touches CPU state.

Formats:
```text
    BRK                  implied
    ASL A                accumulator
    LDA #$05             immediate
    LDA $05  $05,X  $05,Y
    LDA $1234  $1234,X  $1234,Y
    JMP ($1234)          indirect
    LDA ($05,X)  LDA ($05),Y
    BNE -3 [$8008] [Branch taken]
    [Unknown]            illegal opcode
```
*/

use crate::cpu::addressing::Mode;
use crate::cpu::status::ProcessorStatus;
use crate::cpu::table::{Kind, OPCODES};

/// Disassemble the instruction at `pc` whose first three bytes are `bytes`.
pub fn disassemble(pc: u16, bytes: [u8; 3], status: &ProcessorStatus) -> String {
    let [opcode, op1, op2] = bytes;
    let entry = &OPCODES[opcode as usize];
    if !entry.is_legal() {
        return "[Unknown]".to_string();
    }
    let name = entry.mnemonic;
    let word = u16::from_le_bytes([op1, op2]);

    match entry.mode {
        Mode::Implied => name.to_string(),
        Mode::Accumulator => format!("{name} A"),
        Mode::Immediate => format!("{name} #${op1:02X}"),
        Mode::ZeroPage => format!("{name} ${op1:02X}"),
        Mode::ZeroPageX => format!("{name} ${op1:02X},X"),
        Mode::ZeroPageY => format!("{name} ${op1:02X},Y"),
        Mode::Absolute => format!("{name} ${word:04X}"),
        Mode::AbsoluteX => format!("{name} ${word:04X},X"),
        Mode::AbsoluteY => format!("{name} ${word:04X},Y"),
        Mode::Indirect => format!("{name} (${word:04X})"),
        Mode::IndirectX => format!("{name} (${op1:02X},X)"),
        Mode::IndirectY => format!("{name} (${op1:02X}),Y"),
        Mode::Relative => {
            let disp = op1 as i8;
            let target = pc.wrapping_add(2).wrapping_add(disp as i16 as u16);
            let taken = match entry.kind {
                Kind::Branch(cond) => cond.taken(status),
                _ => false,
            };
            let note = if taken {
                "[Branch taken]"
            } else {
                "[Branch not taken]"
            };
            format!("{name} {disp} [${target:04X}] {note}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dis(bytes: [u8; 3]) -> String {
        disassemble(0x8000, bytes, &ProcessorStatus::new())
    }

    #[test]
    fn formats_each_mode() {
        assert_eq!(dis([0x00, 0, 0]), "BRK");
        assert_eq!(dis([0x0A, 0, 0]), "ASL A");
        assert_eq!(dis([0xA9, 0x05, 0]), "LDA #$05");
        assert_eq!(dis([0xA5, 0x05, 0]), "LDA $05");
        assert_eq!(dis([0xB5, 0x05, 0]), "LDA $05,X");
        assert_eq!(dis([0xB6, 0x05, 0]), "LDX $05,Y");
        assert_eq!(dis([0xAD, 0x34, 0x12]), "LDA $1234");
        assert_eq!(dis([0xBD, 0x34, 0x12]), "LDA $1234,X");
        assert_eq!(dis([0xB9, 0x34, 0x12]), "LDA $1234,Y");
        assert_eq!(dis([0x6C, 0x34, 0x12]), "JMP ($1234)");
        assert_eq!(dis([0xA1, 0x05, 0]), "LDA ($05,X)");
        assert_eq!(dis([0xB1, 0x05, 0]), "LDA ($05),Y");
        assert_eq!(dis([0x94, 0x10, 0]), "STY $10,X");
    }

    #[test]
    fn branch_shows_target_and_outcome() {
        let mut p = ProcessorStatus::new();
        assert_eq!(
            disassemble(0x8009, [0xD0, 0xFD, 0], &p),
            "BNE -3 [$8008] [Branch taken]"
        );
        p.zero = true;
        assert_eq!(
            disassemble(0x8009, [0xD0, 0xFD, 0], &p),
            "BNE -3 [$8008] [Branch not taken]"
        );
        assert_eq!(
            disassemble(0x80F0, [0xF0, 0x10, 0], &p),
            "BEQ 16 [$8102] [Branch taken]"
        );
    }

    #[test]
    fn illegal_opcodes_are_marked() {
        assert_eq!(dis([0x02, 0, 0]), "[Unknown]");
        assert_eq!(dis([0xFF, 0, 0]), "[Unknown]");
    }

    #[test]
    fn every_legal_opcode_starts_with_its_mnemonic() {
        for (code, entry) in OPCODES.iter().enumerate() {
            if entry.is_legal() {
                assert!(dis([code as u8, 0, 0]).starts_with(entry.mnemonic));
            }
        }
    }
}
