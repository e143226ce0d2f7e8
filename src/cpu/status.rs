/*!
status.rs - 6502 processor status register (P) as named boolean fields.

The packed byte only exists at the edges: when P is pushed (PHP/BRK/IRQ/NMI)
and when it is pulled (PLP/RTI). Everything in between reads and writes the
named fields directly.

6502 Status Register Bit Layout
===============================
```text
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C

Where:
  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (always pushed as 1)
  B = BREAK (only exists in the pushed copy; set by PHP/BRK, clear for IRQ/NMI)
  D = DECIMAL (no effect on the NES ALU, still stored)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY
```
*/

use std::fmt;

/// Processor status flag bit masks.
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const BREAK: u8 = 0b0001_0000;
pub const UNUSED: u8 = 0b0010_0000;
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorStatus {
    pub carry: bool,
    pub zero: bool,
    pub interrupt_disable: bool,
    pub decimal: bool,
    pub brk: bool,
    pub unused: bool,
    pub overflow: bool,
    pub negative: bool,
}

impl ProcessorStatus {
    /// Power-on defaults: interrupts disabled, unused bit set, everything else clear.
    pub fn new() -> Self {
        let mut p = Self::default();
        p.reset();
        p
    }

    pub fn reset(&mut self) {
        *self = Self {
            interrupt_disable: true,
            unused: true,
            ..Self::default()
        };
    }

    /// Pack the fields into a byte.
    ///
    /// bit 0 carry, bit 1 zero, bit 2 interrupt-disable, bit 3 decimal,
    /// bit 4 break, bit 5 unused, bit 6 overflow, bit 7 negative.
    pub fn to_byte(&self) -> u8 {
        let mut v = 0;
        if self.carry {
            v |= CARRY;
        }
        if self.zero {
            v |= ZERO;
        }
        if self.interrupt_disable {
            v |= IRQ_DISABLE;
        }
        if self.decimal {
            v |= DECIMAL;
        }
        if self.brk {
            v |= BREAK;
        }
        if self.unused {
            v |= UNUSED;
        }
        if self.overflow {
            v |= OVERFLOW;
        }
        if self.negative {
            v |= NEGATIVE;
        }
        v
    }

    /// Unpack every field from a byte (inverse of `to_byte`).
    pub fn from_byte(v: u8) -> Self {
        Self {
            carry: v & CARRY != 0,
            zero: v & ZERO != 0,
            interrupt_disable: v & IRQ_DISABLE != 0,
            decimal: v & DECIMAL != 0,
            brk: v & BREAK != 0,
            unused: v & UNUSED != 0,
            overflow: v & OVERFLOW != 0,
            negative: v & NEGATIVE != 0,
        }
    }

    /// Packed byte with the unused bit forced to 1.
    #[inline]
    pub fn reg(&self) -> u8 {
        self.to_byte() | UNUSED
    }

    /// Byte as pushed on the stack: BRK/PHP push with B set, IRQ/NMI with B clear.
    #[inline]
    pub fn pushed(&self, brk: bool) -> u8 {
        let v = self.reg();
        if brk { v | BREAK } else { v & !BREAK }
    }

    /// Restore from a pulled byte (PLP/RTI). B is not a latched flag and is cleared.
    pub fn pull(&mut self, v: u8) {
        *self = Self::from_byte(v);
        self.brk = false;
    }

    /// ZERO + NEGATIVE from a result byte.
    #[inline]
    pub fn set_zn(&mut self, result: u8) {
        self.zero = result == 0;
        self.negative = result & 0x80 != 0;
    }
}

impl From<u8> for ProcessorStatus {
    fn from(v: u8) -> Self {
        Self::from_byte(v)
    }
}

impl From<ProcessorStatus> for u8 {
    fn from(p: ProcessorStatus) -> Self {
        p.to_byte()
    }
}

/// `NVUBDIZC`, upper case when set.
impl fmt::Display for ProcessorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = [
            (self.negative, 'N'),
            (self.overflow, 'V'),
            (self.unused, 'U'),
            (self.brk, 'B'),
            (self.decimal, 'D'),
            (self.interrupt_disable, 'I'),
            (self.zero, 'Z'),
            (self.carry, 'C'),
        ];
        for (set, c) in bits {
            let c = if set { c } else { c.to_ascii_lowercase() };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
