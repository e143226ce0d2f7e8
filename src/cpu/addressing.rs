/*!
addressing.rs - 6502 addressing modes and the three operand dispatchers.

Overview
========
An instruction is "what to do with the operand" plugged into "how to reach
the operand". The second half lives here as three dispatch families, each
generic over the operation it is handed:

```text
    read(cpu, mode, op)    op: fn(&mut Registers, u8)              LDA, ADC, CMP, ...
    modify(cpu, mode, op)  op: fn(&mut ProcessorStatus, u8) -> u8  ASL, INC, ...
    write(cpu, mode, val)  no operation, just the register value   STA, STX, STY
```

Timing
======
Each dispatcher spends one cycle per bus access (see `cycles.rs`) plus the
dummy cycles the hardware inserts, then polls interrupts via `last_cycle()`.
Counts below include the opcode fetch done by `step()`:

```text
    mode          read     modify   write
    ----------    ------   ------   -----
    accumulator     -        2        -
    immediate       2        -        -
    zp              3        5        3
    zp,X / zp,Y     4        6        4
    abs             4        6        4
    abs,X / abs,Y   4+1      7        5
    (zp,X)          6        -        6
    (zp),Y          5+1      -        6
```

"+1" is the page-cross penalty: the high byte of the base address differs
from the high byte of the effective address. Absolute,X modify and all
indexed writes always pay the extra cycle.

Zero-page indexing and zero-page pointer reads wrap inside page zero.

`opargs` holds the fetched operand (or, for (zp),Y, the pointer target) so
the page-cross check and diagnostics can see the base address.
*/

use log::warn;

use crate::cpu::core::Cpu;
use crate::cpu::execute::{ModifyOp, ReadOp};
use crate::cpu::regs::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl Mode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        match self {
            Mode::Implied | Mode::Accumulator => 0,
            Mode::Immediate
            | Mode::ZeroPage
            | Mode::ZeroPageX
            | Mode::ZeroPageY
            | Mode::IndirectX
            | Mode::IndirectY
            | Mode::Relative => 1,
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
        }
    }
}

// -------------------------
// Operand fetch helpers
// -------------------------

/// One-byte zero-page operand.
#[inline]
fn operand_zp(cpu: &mut Cpu) -> u8 {
    let zp = cpu.fetch();
    cpu.opargs = Word::new(zp as u16);
    zp
}

/// Two-byte absolute operand, low byte first.
#[inline]
fn operand_abs(cpu: &mut Cpu) -> u16 {
    let lo = cpu.fetch();
    let hi = cpu.fetch();
    cpu.opargs = Word::from_bytes(lo, hi);
    cpu.opargs.get()
}

/// 16-bit pointer stored in zero page; the high byte wraps to $00 after $FF.
#[inline]
fn zp_pointer(cpu: &mut Cpu, ptr: u8) -> u16 {
    let lo = cpu.read_mem(ptr as u16);
    let hi = cpu.read_mem(ptr.wrapping_add(1) as u16);
    Word::from_bytes(lo, hi).get()
}

#[inline]
fn crosses_page(base: u16, eff: u16) -> bool {
    base & 0xFF00 != eff & 0xFF00
}

// -------------------------
// Read family
// -------------------------

pub(crate) fn read(cpu: &mut Cpu, mode: Mode, op: ReadOp) {
    let value = match mode {
        Mode::Immediate => {
            let v = cpu.fetch();
            cpu.opargs = Word::new(v as u16);
            v
        }
        Mode::ZeroPage => {
            let zp = operand_zp(cpu);
            cpu.read_mem(zp as u16)
        }
        Mode::ZeroPageX | Mode::ZeroPageY => {
            let zp = operand_zp(cpu);
            let index = index_for(cpu, mode);
            cpu.cycle();
            cpu.read_mem(zp.wrapping_add(index) as u16)
        }
        Mode::Absolute => {
            let addr = operand_abs(cpu);
            cpu.read_mem(addr)
        }
        Mode::AbsoluteX | Mode::AbsoluteY => {
            let base = operand_abs(cpu);
            let eff = base.wrapping_add(index_for(cpu, mode) as u16);
            let v = cpu.read_mem(eff);
            if crosses_page(base, eff) {
                cpu.cycle();
            }
            v
        }
        Mode::IndirectX => {
            let zp = operand_zp(cpu);
            cpu.cycle();
            let ptr = zp.wrapping_add(cpu.regs.xreg);
            let eff = zp_pointer(cpu, ptr);
            cpu.read_mem(eff)
        }
        Mode::IndirectY => {
            let zp = operand_zp(cpu);
            let base = zp_pointer(cpu, zp);
            cpu.opargs = Word::new(base);
            let eff = base.wrapping_add(cpu.regs.yreg as u16);
            let v = cpu.read_mem(eff);
            if crosses_page(base, eff) {
                cpu.cycle();
            }
            v
        }
        other => {
            warn!("read dispatch: {:?} is not a read addressing mode", other);
            return;
        }
    };
    op(&mut cpu.regs, value);
    cpu.last_cycle();
}

// -------------------------
// Modify (read-modify-write) family
// -------------------------

pub(crate) fn modify(cpu: &mut Cpu, mode: Mode, op: ModifyOp) {
    let addr = match mode {
        Mode::Accumulator => {
            cpu.cycle();
            cpu.regs.accum = op(&mut cpu.regs.status, cpu.regs.accum);
            cpu.last_cycle();
            return;
        }
        Mode::ZeroPage => operand_zp(cpu) as u16,
        Mode::ZeroPageX => {
            let zp = operand_zp(cpu);
            cpu.cycle();
            zp.wrapping_add(cpu.regs.xreg) as u16
        }
        Mode::Absolute => operand_abs(cpu),
        Mode::AbsoluteX => {
            let base = operand_abs(cpu);
            cpu.cycle();
            base.wrapping_add(cpu.regs.xreg as u16)
        }
        other => {
            warn!("modify dispatch: {:?} is not a read-modify-write addressing mode", other);
            return;
        }
    };
    let v = cpu.read_mem(addr);
    let result = op(&mut cpu.regs.status, v);
    // hardware writes the unmodified value back before the result
    cpu.cycle();
    cpu.write_mem(addr, result);
    cpu.last_cycle();
}

// -------------------------
// Write family
// -------------------------

pub(crate) fn write(cpu: &mut Cpu, mode: Mode, val: u8) {
    let addr = match mode {
        Mode::ZeroPage => operand_zp(cpu) as u16,
        Mode::ZeroPageX | Mode::ZeroPageY => {
            let zp = operand_zp(cpu);
            let index = index_for(cpu, mode);
            cpu.cycle();
            zp.wrapping_add(index) as u16
        }
        Mode::Absolute => operand_abs(cpu),
        Mode::AbsoluteX | Mode::AbsoluteY => {
            let base = operand_abs(cpu);
            cpu.cycle();
            base.wrapping_add(index_for(cpu, mode) as u16)
        }
        Mode::IndirectX => {
            let zp = operand_zp(cpu);
            cpu.cycle();
            let ptr = zp.wrapping_add(cpu.regs.xreg);
            zp_pointer(cpu, ptr)
        }
        Mode::IndirectY => {
            let zp = operand_zp(cpu);
            let base = zp_pointer(cpu, zp);
            cpu.opargs = Word::new(base);
            cpu.cycle();
            base.wrapping_add(cpu.regs.yreg as u16)
        }
        other => {
            warn!("write dispatch: {:?} is not a store addressing mode", other);
            return;
        }
    };
    cpu.write_mem(addr, val);
    cpu.last_cycle();
}

#[inline]
fn index_for(cpu: &Cpu, mode: Mode) -> u8 {
    match mode {
        Mode::ZeroPageY | Mode::AbsoluteY | Mode::IndirectY => cpu.regs.yreg,
        _ => cpu.regs.xreg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::execute::{asl, inc, lda};
    use crate::test_utils::cpu_with_program;

    // Dispatchers are called directly here, so counts exclude the opcode fetch.
    fn run_read(program: &[u8], mode: Mode, setup: impl FnOnce(&mut Cpu)) -> (u8, u64) {
        let mut cpu = cpu_with_program(program);
        setup(&mut cpu);
        let start = cpu.cycles();
        read(&mut cpu, mode, lda);
        (cpu.accum(), cpu.cycles() - start)
    }

    #[test]
    fn zero_page_x_wraps() {
        let (a, cyc) = run_read(&[0xFF], Mode::ZeroPageX, |cpu| {
            cpu.set_x(0x02);
            cpu.bus_mut().write(0x0001, 0x77);
            cpu.bus_mut().write(0x0101, 0x99);
        });
        assert_eq!(a, 0x77);
        assert_eq!(cyc, 3);
    }

    #[test]
    fn ldx_zero_page_y_wraps() {
        let mut cpu = cpu_with_program(&[0xB6, 0xFF]);
        cpu.set_y(0x02);
        cpu.bus_mut().write(0x0001, 0x77);
        cpu.bus_mut().write(0x0101, 0x99);
        assert_eq!(cpu.step(), 4);
        assert_eq!(cpu.x(), 0x77);
    }

    #[test]
    fn indirect_y_pointer_wraps_in_zero_page() {
        let (a, cyc) = run_read(&[0xFF], Mode::IndirectY, |cpu| {
            cpu.set_y(0x01);
            cpu.bus_mut().write(0x00FF, 0x00);
            cpu.bus_mut().write(0x0000, 0x30);
            cpu.bus_mut().write(0x0100, 0x40);
            cpu.bus_mut().write(0x3001, 0x5C);
            cpu.bus_mut().write(0x4001, 0xEE);
        });
        assert_eq!((a, cyc), (0x5C, 4));
    }

    #[test]
    fn absolute_x_page_cross_penalty() {
        let (a, cyc) = run_read(&[0xF0, 0x02], Mode::AbsoluteX, |cpu| {
            cpu.set_x(0x0F);
            cpu.bus_mut().write(0x02FF, 0x11);
        });
        assert_eq!((a, cyc), (0x11, 3));

        let (a, cyc) = run_read(&[0xF0, 0x02], Mode::AbsoluteX, |cpu| {
            cpu.set_x(0x10);
            cpu.bus_mut().write(0x0300, 0x22);
        });
        assert_eq!((a, cyc), (0x22, 4));
    }

    #[test]
    fn indirect_x_pointer_wraps_in_zero_page() {
        let (a, cyc) = run_read(&[0xFE], Mode::IndirectX, |cpu| {
            cpu.set_x(0x01);
            cpu.bus_mut().write(0x00FF, 0x34);
            cpu.bus_mut().write(0x0000, 0x12);
            cpu.bus_mut().write(0x1234, 0xAB);
        });
        assert_eq!((a, cyc), (0xAB, 5));
    }

    #[test]
    fn indirect_y_page_cross_penalty() {
        let setup = |y: u8| {
            move |cpu: &mut Cpu| {
                cpu.set_y(y);
                cpu.bus_mut().write(0x0010, 0xF0);
                cpu.bus_mut().write(0x0011, 0x04);
                cpu.bus_mut().write(0x04FF, 0x01);
                cpu.bus_mut().write(0x0500, 0x02);
            }
        };
        assert_eq!(run_read(&[0x10], Mode::IndirectY, setup(0x0F)), (0x01, 4));
        assert_eq!(run_read(&[0x10], Mode::IndirectY, setup(0x10)), (0x02, 5));
    }

    #[test]
    fn modify_writes_result_back() {
        let mut cpu = cpu_with_program(&[0x40, 0x02]);
        cpu.set_x(0xC0);
        cpu.bus_mut().write(0x0300, 0x41);
        let start = cpu.cycles();
        modify(&mut cpu, Mode::AbsoluteX, asl);
        assert_eq!(cpu.bus().read(0x0300), 0x82);
        assert!(cpu.status().negative);
        assert_eq!(cpu.cycles() - start, 6);

        let mut cpu = cpu_with_program(&[0x80]);
        cpu.set_x(0x81);
        cpu.bus_mut().write(0x0001, 0xFF);
        let start = cpu.cycles();
        modify(&mut cpu, Mode::ZeroPageX, inc);
        assert_eq!(cpu.bus().read(0x0001), 0x00);
        assert!(cpu.status().zero);
        assert_eq!(cpu.cycles() - start, 5);
    }

    #[test]
    fn accumulator_modify() {
        let mut cpu = cpu_with_program(&[]);
        cpu.set_accum(0x81);
        let start = cpu.cycles();
        modify(&mut cpu, Mode::Accumulator, asl);
        assert_eq!(cpu.accum(), 0x02);
        assert!(cpu.status().carry);
        assert_eq!(cpu.cycles() - start, 1);
    }

    #[test]
    fn indexed_writes_have_fixed_cost() {
        let mut cpu = cpu_with_program(&[0x00, 0x03]);
        cpu.set_y(0x05);
        let start = cpu.cycles();
        write(&mut cpu, Mode::AbsoluteY, 0x5A);
        assert_eq!(cpu.bus().read(0x0305), 0x5A);
        assert_eq!(cpu.cycles() - start, 4);

        let mut cpu = cpu_with_program(&[0x20]);
        cpu.set_y(0x01);
        cpu.bus_mut().write(0x0020, 0xFF);
        cpu.bus_mut().write(0x0021, 0x02);
        let start = cpu.cycles();
        write(&mut cpu, Mode::IndirectY, 0xC3);
        assert_eq!(cpu.bus().read(0x0300), 0xC3);
        assert_eq!(cpu.cycles() - start, 5);
    }

    #[test]
    fn wrong_family_is_ignored() {
        let mut cpu = cpu_with_program(&[0x00]);
        let start = cpu.cycles();
        write(&mut cpu, Mode::Immediate, 0x01);
        modify(&mut cpu, Mode::IndirectY, inc);
        read(&mut cpu, Mode::Relative, lda);
        assert_eq!(cpu.cycles(), start);
        assert_eq!(cpu.pc(), 0x8000);
    }

    #[test]
    fn operand_lengths() {
        assert_eq!(Mode::Implied.operand_len(), 0);
        assert_eq!(Mode::Relative.operand_len(), 1);
        assert_eq!(Mode::Indirect.operand_len(), 2);
    }
}
