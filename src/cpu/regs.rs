/*!
regs.rs - Architectural register file for the 6502 core.

`Registers` is what the instruction semantic helpers in `execute` operate on:
the three 8-bit general registers, the stack pointer, the program counter and
the status flags. Bus access and cycle accounting stay in the `Cpu` that owns
the register file.

`Word` is a 16-bit value with separate low/high byte views. The program
counter and the per-instruction operand scratch (`opargs`) use it because
several instructions fetch or compare the two halves independently (JSR
loads PC one byte at a time; page-cross checks compare high bytes only).
*/

use crate::cpu::status::ProcessorStatus;

/// Base address of the hardware stack page ($0100-$01FF).
pub const STACK_BASE: u16 = 0x0100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Word(u16);

impl Word {
    #[inline]
    pub const fn new(v: u16) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, v: u16) {
        self.0 = v;
    }

    #[inline]
    pub const fn lo(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn hi(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub fn set_lo(&mut self, v: u8) {
        self.0 = (self.0 & 0xFF00) | v as u16;
    }

    #[inline]
    pub fn set_hi(&mut self, v: u8) {
        self.0 = (self.0 & 0x00FF) | ((v as u16) << 8);
    }

    /// Wrapping add at 16 bits.
    #[inline]
    pub fn add(&mut self, delta: u16) {
        self.0 = self.0.wrapping_add(delta);
    }

    #[inline]
    pub const fn from_bytes(lo: u8, hi: u8) -> Self {
        Self(((hi as u16) << 8) | lo as u16)
    }
}

impl From<u16> for Word {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

impl From<Word> for u16 {
    fn from(w: Word) -> Self {
        w.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub accum: u8,
    pub xreg: u8,
    pub yreg: u8,
    pub sp: u8,
    pub pc: Word,
    pub status: ProcessorStatus,
}

impl Registers {
    /// All registers zero, status at its power-on defaults.
    pub fn new() -> Self {
        Self {
            status: ProcessorStatus::new(),
            ..Self::default()
        }
    }

    /// Address of the current top-of-stack slot.
    #[inline]
    pub fn stack_addr(&self) -> u16 {
        STACK_BASE | self.sp as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_byte_views() {
        let mut w = Word::new(0x12FF);
        assert_eq!(w.lo(), 0xFF);
        assert_eq!(w.hi(), 0x12);
        w.set_lo(0x34);
        assert_eq!(w.get(), 0x1234);
        w.set_hi(0xAB);
        assert_eq!(w.get(), 0xAB34);
        assert_eq!(Word::from_bytes(0x01, 0x80).get(), 0x8001);
    }

    #[test]
    fn word_add_wraps() {
        let mut w = Word::new(0xFFFF);
        w.add(1);
        assert_eq!(w.get(), 0x0000);
        w.add(0xFFFF);
        assert_eq!(w.get(), 0xFFFF);
    }

    #[test]
    fn stack_stays_in_page_one() {
        let mut r = Registers::new();
        assert_eq!(r.stack_addr(), 0x0100);
        r.sp = 0xFF;
        assert_eq!(r.stack_addr(), 0x01FF);
        assert!(r.status.interrupt_disable);
    }
}
