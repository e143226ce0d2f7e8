/*!
table.rs - Static 256-entry opcode table driving decode, timing and disassembly.

Design
------
- Table: `[Opcode; 256]`, one entry per opcode byte, built once in a const
  initializer. Illegal opcodes hold the `UNKNOWN` entry.
- `Opcode { mnemonic, mode, kind, cycles }`:
  * `mode`: addressing mode (`addressing::Mode`)
  * `kind`: which dispatch family runs it, carrying the semantic helper
    from `execute.rs` where the family is operand-generic
  * `cycles`: documented base cost, without page-cross or branch penalties
- `dispatch::execute` matches on `kind` and hands `mode` plus the helper to
  the addressing dispatchers. Control-flow and stack instructions have
  dedicated kinds because their bus choreography is unique.

The table is the single source for mnemonics and modes, so the disassembler
and the executor can never disagree about what an opcode is.
*/

use crate::cpu::addressing::Mode::{self, *};
use crate::cpu::execute::{self as ex, ImpliedOp, ModifyOp, ReadOp};
use crate::cpu::status::ProcessorStatus;

/// Register a store instruction writes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Register {
    A,
    X,
    Y,
}

/// Branch conditions, one per conditional branch opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Condition {
    Plus,
    Minus,
    OverflowClear,
    OverflowSet,
    CarryClear,
    CarrySet,
    NotEqual,
    Equal,
}

impl Condition {
    pub(crate) fn taken(self, p: &ProcessorStatus) -> bool {
        match self {
            Condition::Plus => !p.negative,
            Condition::Minus => p.negative,
            Condition::OverflowClear => !p.overflow,
            Condition::OverflowSet => p.overflow,
            Condition::CarryClear => !p.carry,
            Condition::CarrySet => p.carry,
            Condition::NotEqual => !p.zero,
            Condition::Equal => p.zero,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Kind {
    Read(ReadOp),
    Modify(ModifyOp),
    Store(Register),
    Internal(ImpliedOp),
    Branch(Condition),
    Pha,
    Php,
    Pla,
    Plp,
    Jmp,
    JmpIndirect,
    Jsr,
    Rts,
    Rti,
    Brk,
    Nop,
    Unknown,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Opcode {
    pub mnemonic: &'static str,
    pub mode: Mode,
    pub kind: Kind,
    pub cycles: u8,
}

impl Opcode {
    pub(crate) fn is_legal(&self) -> bool {
        !matches!(self.kind, Kind::Unknown)
    }
}

const fn op(mnemonic: &'static str, mode: Mode, kind: Kind, cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        kind,
        cycles,
    }
}

const UNKNOWN: Opcode = op("???", Implied, Kind::Unknown, 2);

pub(crate) static OPCODES: [Opcode; 256] = {
    use Kind::*;
    let mut t = [UNKNOWN; 256];

    // Loads
    t[0xA9] = op("LDA", Immediate, Read(ex::lda), 2);
    t[0xA5] = op("LDA", ZeroPage, Read(ex::lda), 3);
    t[0xB5] = op("LDA", ZeroPageX, Read(ex::lda), 4);
    t[0xAD] = op("LDA", Absolute, Read(ex::lda), 4);
    t[0xBD] = op("LDA", AbsoluteX, Read(ex::lda), 4);
    t[0xB9] = op("LDA", AbsoluteY, Read(ex::lda), 4);
    t[0xA1] = op("LDA", IndirectX, Read(ex::lda), 6);
    t[0xB1] = op("LDA", IndirectY, Read(ex::lda), 5);
    t[0xA2] = op("LDX", Immediate, Read(ex::ldx), 2);
    t[0xA6] = op("LDX", ZeroPage, Read(ex::ldx), 3);
    t[0xB6] = op("LDX", ZeroPageY, Read(ex::ldx), 4);
    t[0xAE] = op("LDX", Absolute, Read(ex::ldx), 4);
    t[0xBE] = op("LDX", AbsoluteY, Read(ex::ldx), 4);
    t[0xA0] = op("LDY", Immediate, Read(ex::ldy), 2);
    t[0xA4] = op("LDY", ZeroPage, Read(ex::ldy), 3);
    t[0xB4] = op("LDY", ZeroPageX, Read(ex::ldy), 4);
    t[0xAC] = op("LDY", Absolute, Read(ex::ldy), 4);
    t[0xBC] = op("LDY", AbsoluteX, Read(ex::ldy), 4);

    // Stores
    t[0x85] = op("STA", ZeroPage, Store(Register::A), 3);
    t[0x95] = op("STA", ZeroPageX, Store(Register::A), 4);
    t[0x8D] = op("STA", Absolute, Store(Register::A), 4);
    t[0x9D] = op("STA", AbsoluteX, Store(Register::A), 5);
    t[0x99] = op("STA", AbsoluteY, Store(Register::A), 5);
    t[0x81] = op("STA", IndirectX, Store(Register::A), 6);
    t[0x91] = op("STA", IndirectY, Store(Register::A), 6);
    t[0x86] = op("STX", ZeroPage, Store(Register::X), 3);
    t[0x96] = op("STX", ZeroPageY, Store(Register::X), 4);
    t[0x8E] = op("STX", Absolute, Store(Register::X), 4);
    t[0x84] = op("STY", ZeroPage, Store(Register::Y), 3);
    t[0x94] = op("STY", ZeroPageX, Store(Register::Y), 4);
    t[0x8C] = op("STY", Absolute, Store(Register::Y), 4);

    // ADC / SBC
    t[0x69] = op("ADC", Immediate, Read(ex::adc), 2);
    t[0x65] = op("ADC", ZeroPage, Read(ex::adc), 3);
    t[0x75] = op("ADC", ZeroPageX, Read(ex::adc), 4);
    t[0x6D] = op("ADC", Absolute, Read(ex::adc), 4);
    t[0x7D] = op("ADC", AbsoluteX, Read(ex::adc), 4);
    t[0x79] = op("ADC", AbsoluteY, Read(ex::adc), 4);
    t[0x61] = op("ADC", IndirectX, Read(ex::adc), 6);
    t[0x71] = op("ADC", IndirectY, Read(ex::adc), 5);
    t[0xE9] = op("SBC", Immediate, Read(ex::sbc), 2);
    t[0xE5] = op("SBC", ZeroPage, Read(ex::sbc), 3);
    t[0xF5] = op("SBC", ZeroPageX, Read(ex::sbc), 4);
    t[0xED] = op("SBC", Absolute, Read(ex::sbc), 4);
    t[0xFD] = op("SBC", AbsoluteX, Read(ex::sbc), 4);
    t[0xF9] = op("SBC", AbsoluteY, Read(ex::sbc), 4);
    t[0xE1] = op("SBC", IndirectX, Read(ex::sbc), 6);
    t[0xF1] = op("SBC", IndirectY, Read(ex::sbc), 5);

    // Logical
    t[0x29] = op("AND", Immediate, Read(ex::and), 2);
    t[0x25] = op("AND", ZeroPage, Read(ex::and), 3);
    t[0x35] = op("AND", ZeroPageX, Read(ex::and), 4);
    t[0x2D] = op("AND", Absolute, Read(ex::and), 4);
    t[0x3D] = op("AND", AbsoluteX, Read(ex::and), 4);
    t[0x39] = op("AND", AbsoluteY, Read(ex::and), 4);
    t[0x21] = op("AND", IndirectX, Read(ex::and), 6);
    t[0x31] = op("AND", IndirectY, Read(ex::and), 5);
    t[0x09] = op("ORA", Immediate, Read(ex::ora), 2);
    t[0x05] = op("ORA", ZeroPage, Read(ex::ora), 3);
    t[0x15] = op("ORA", ZeroPageX, Read(ex::ora), 4);
    t[0x0D] = op("ORA", Absolute, Read(ex::ora), 4);
    t[0x1D] = op("ORA", AbsoluteX, Read(ex::ora), 4);
    t[0x19] = op("ORA", AbsoluteY, Read(ex::ora), 4);
    t[0x01] = op("ORA", IndirectX, Read(ex::ora), 6);
    t[0x11] = op("ORA", IndirectY, Read(ex::ora), 5);
    t[0x49] = op("EOR", Immediate, Read(ex::eor), 2);
    t[0x45] = op("EOR", ZeroPage, Read(ex::eor), 3);
    t[0x55] = op("EOR", ZeroPageX, Read(ex::eor), 4);
    t[0x4D] = op("EOR", Absolute, Read(ex::eor), 4);
    t[0x5D] = op("EOR", AbsoluteX, Read(ex::eor), 4);
    t[0x59] = op("EOR", AbsoluteY, Read(ex::eor), 4);
    t[0x41] = op("EOR", IndirectX, Read(ex::eor), 6);
    t[0x51] = op("EOR", IndirectY, Read(ex::eor), 5);
    t[0x24] = op("BIT", ZeroPage, Read(ex::bit), 3);
    t[0x2C] = op("BIT", Absolute, Read(ex::bit), 4);

    // Compare
    t[0xC9] = op("CMP", Immediate, Read(ex::cmp), 2);
    t[0xC5] = op("CMP", ZeroPage, Read(ex::cmp), 3);
    t[0xD5] = op("CMP", ZeroPageX, Read(ex::cmp), 4);
    t[0xCD] = op("CMP", Absolute, Read(ex::cmp), 4);
    t[0xDD] = op("CMP", AbsoluteX, Read(ex::cmp), 4);
    t[0xD9] = op("CMP", AbsoluteY, Read(ex::cmp), 4);
    t[0xC1] = op("CMP", IndirectX, Read(ex::cmp), 6);
    t[0xD1] = op("CMP", IndirectY, Read(ex::cmp), 5);
    t[0xE0] = op("CPX", Immediate, Read(ex::cpx), 2);
    t[0xE4] = op("CPX", ZeroPage, Read(ex::cpx), 3);
    t[0xEC] = op("CPX", Absolute, Read(ex::cpx), 4);
    t[0xC0] = op("CPY", Immediate, Read(ex::cpy), 2);
    t[0xC4] = op("CPY", ZeroPage, Read(ex::cpy), 3);
    t[0xCC] = op("CPY", Absolute, Read(ex::cpy), 4);

    // Shifts / rotates
    t[0x0A] = op("ASL", Accumulator, Modify(ex::asl), 2);
    t[0x06] = op("ASL", ZeroPage, Modify(ex::asl), 5);
    t[0x16] = op("ASL", ZeroPageX, Modify(ex::asl), 6);
    t[0x0E] = op("ASL", Absolute, Modify(ex::asl), 6);
    t[0x1E] = op("ASL", AbsoluteX, Modify(ex::asl), 7);
    t[0x4A] = op("LSR", Accumulator, Modify(ex::lsr), 2);
    t[0x46] = op("LSR", ZeroPage, Modify(ex::lsr), 5);
    t[0x56] = op("LSR", ZeroPageX, Modify(ex::lsr), 6);
    t[0x4E] = op("LSR", Absolute, Modify(ex::lsr), 6);
    t[0x5E] = op("LSR", AbsoluteX, Modify(ex::lsr), 7);
    t[0x2A] = op("ROL", Accumulator, Modify(ex::rol), 2);
    t[0x26] = op("ROL", ZeroPage, Modify(ex::rol), 5);
    t[0x36] = op("ROL", ZeroPageX, Modify(ex::rol), 6);
    t[0x2E] = op("ROL", Absolute, Modify(ex::rol), 6);
    t[0x3E] = op("ROL", AbsoluteX, Modify(ex::rol), 7);
    t[0x6A] = op("ROR", Accumulator, Modify(ex::ror), 2);
    t[0x66] = op("ROR", ZeroPage, Modify(ex::ror), 5);
    t[0x76] = op("ROR", ZeroPageX, Modify(ex::ror), 6);
    t[0x6E] = op("ROR", Absolute, Modify(ex::ror), 6);
    t[0x7E] = op("ROR", AbsoluteX, Modify(ex::ror), 7);

    // INC / DEC memory
    t[0xE6] = op("INC", ZeroPage, Modify(ex::inc), 5);
    t[0xF6] = op("INC", ZeroPageX, Modify(ex::inc), 6);
    t[0xEE] = op("INC", Absolute, Modify(ex::inc), 6);
    t[0xFE] = op("INC", AbsoluteX, Modify(ex::inc), 7);
    t[0xC6] = op("DEC", ZeroPage, Modify(ex::dec), 5);
    t[0xD6] = op("DEC", ZeroPageX, Modify(ex::dec), 6);
    t[0xCE] = op("DEC", Absolute, Modify(ex::dec), 6);
    t[0xDE] = op("DEC", AbsoluteX, Modify(ex::dec), 7);

    // Register inc/dec
    t[0xE8] = op("INX", Implied, Internal(ex::inx), 2);
    t[0xC8] = op("INY", Implied, Internal(ex::iny), 2);
    t[0xCA] = op("DEX", Implied, Internal(ex::dex), 2);
    t[0x88] = op("DEY", Implied, Internal(ex::dey), 2);

    // Transfers
    t[0xAA] = op("TAX", Implied, Internal(ex::tax), 2);
    t[0xA8] = op("TAY", Implied, Internal(ex::tay), 2);
    t[0x8A] = op("TXA", Implied, Internal(ex::txa), 2);
    t[0x98] = op("TYA", Implied, Internal(ex::tya), 2);
    t[0xBA] = op("TSX", Implied, Internal(ex::tsx), 2);
    t[0x9A] = op("TXS", Implied, Internal(ex::txs), 2);

    // Flags
    t[0x18] = op("CLC", Implied, Internal(ex::clc), 2);
    t[0x38] = op("SEC", Implied, Internal(ex::sec), 2);
    t[0x58] = op("CLI", Implied, Internal(ex::cli), 2);
    t[0x78] = op("SEI", Implied, Internal(ex::sei), 2);
    t[0xD8] = op("CLD", Implied, Internal(ex::cld), 2);
    t[0xF8] = op("SED", Implied, Internal(ex::sed), 2);
    t[0xB8] = op("CLV", Implied, Internal(ex::clv), 2);

    // Branches (base cost; +1 taken, +1 more on page cross)
    t[0x10] = op("BPL", Relative, Branch(Condition::Plus), 2);
    t[0x30] = op("BMI", Relative, Branch(Condition::Minus), 2);
    t[0x50] = op("BVC", Relative, Branch(Condition::OverflowClear), 2);
    t[0x70] = op("BVS", Relative, Branch(Condition::OverflowSet), 2);
    t[0x90] = op("BCC", Relative, Branch(Condition::CarryClear), 2);
    t[0xB0] = op("BCS", Relative, Branch(Condition::CarrySet), 2);
    t[0xD0] = op("BNE", Relative, Branch(Condition::NotEqual), 2);
    t[0xF0] = op("BEQ", Relative, Branch(Condition::Equal), 2);

    // Stack
    t[0x48] = op("PHA", Implied, Pha, 3);
    t[0x08] = op("PHP", Implied, Php, 3);
    t[0x68] = op("PLA", Implied, Pla, 4);
    t[0x28] = op("PLP", Implied, Plp, 4);

    // Control flow
    t[0x4C] = op("JMP", Absolute, Jmp, 3);
    t[0x6C] = op("JMP", Indirect, JmpIndirect, 5);
    t[0x20] = op("JSR", Absolute, Jsr, 6);
    t[0x60] = op("RTS", Implied, Rts, 6);
    t[0x40] = op("RTI", Implied, Rti, 6);
    t[0x00] = op("BRK", Implied, Brk, 7);

    t[0xEA] = op("NOP", Implied, Nop, 2);

    t
};
