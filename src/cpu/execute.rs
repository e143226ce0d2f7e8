/*!
execute.rs - 6502 instruction semantic helpers (ALU, flags, transfers, RMW).

Every helper here is a pure transform over the register file: no bus access,
no cycle accounting. The addressing dispatchers resolve the operand, call one
of these, and handle memory and timing themselves.

Three shapes, matching the three ways an opcode consumes its operand:

```text
    ReadOp     fn(&mut Registers, u8)              LDA, ADC, CMP, BIT, ...
    ModifyOp   fn(&mut ProcessorStatus, u8) -> u8  ASL, ROR, INC, DEC, ...
    ImpliedOp  fn(&mut Registers)                  TAX, INX, CLC, ...
```

Modify helpers only see the status register so the same function serves both
the accumulator form (`ASL A`) and the memory forms (`ASL $10`).
*/

use crate::cpu::regs::Registers;
use crate::cpu::status::ProcessorStatus;

pub type ReadOp = fn(&mut Registers, u8);
pub type ModifyOp = fn(&mut ProcessorStatus, u8) -> u8;
pub type ImpliedOp = fn(&mut Registers);

// ---------------------------------------------------------------------------
// Loads
// ---------------------------------------------------------------------------

pub(crate) fn lda(r: &mut Registers, v: u8) {
    r.accum = v;
    r.status.set_zn(v);
}

pub(crate) fn ldx(r: &mut Registers, v: u8) {
    r.xreg = v;
    r.status.set_zn(v);
}

pub(crate) fn ldy(r: &mut Registers, v: u8) {
    r.yreg = v;
    r.status.set_zn(v);
}

// ---------------------------------------------------------------------------
// ADC / SBC
// ---------------------------------------------------------------------------

/// Binary add with carry. Decimal mode is ignored (the 2A03 has no BCD).
pub(crate) fn adc(r: &mut Registers, v: u8) {
    let a = r.accum;
    let sum = a as u16 + v as u16 + r.status.carry as u16;
    let result = sum as u8;
    r.status.carry = sum > 0xFF;
    r.status.overflow = (a ^ result) & !(a ^ v) & 0x80 != 0;
    r.accum = result;
    r.status.set_zn(result);
}

/// A - M - !C, done as A + !M + C.
pub(crate) fn sbc(r: &mut Registers, v: u8) {
    adc(r, !v);
}

// ---------------------------------------------------------------------------
// Logical / BIT
// ---------------------------------------------------------------------------

pub(crate) fn and(r: &mut Registers, v: u8) {
    r.accum &= v;
    r.status.set_zn(r.accum);
}

pub(crate) fn ora(r: &mut Registers, v: u8) {
    r.accum |= v;
    r.status.set_zn(r.accum);
}

pub(crate) fn eor(r: &mut Registers, v: u8) {
    r.accum ^= v;
    r.status.set_zn(r.accum);
}

/// N and V come from the operand, Z from `A & M`.
pub(crate) fn bit(r: &mut Registers, v: u8) {
    r.status.zero = r.accum & v == 0;
    r.status.negative = v & 0x80 != 0;
    r.status.overflow = v & 0x40 != 0;
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

#[inline]
fn compare(status: &mut ProcessorStatus, reg: u8, v: u8) {
    status.carry = reg >= v;
    status.set_zn(reg.wrapping_sub(v));
}

pub(crate) fn cmp(r: &mut Registers, v: u8) {
    compare(&mut r.status, r.accum, v);
}

pub(crate) fn cpx(r: &mut Registers, v: u8) {
    compare(&mut r.status, r.xreg, v);
}

pub(crate) fn cpy(r: &mut Registers, v: u8) {
    compare(&mut r.status, r.yreg, v);
}

// ---------------------------------------------------------------------------
// Shifts / rotates / INC / DEC (read-modify-write)
// ---------------------------------------------------------------------------

pub(crate) fn asl(p: &mut ProcessorStatus, v: u8) -> u8 {
    p.carry = v & 0x80 != 0;
    let r = v << 1;
    p.set_zn(r);
    r
}

pub(crate) fn lsr(p: &mut ProcessorStatus, v: u8) -> u8 {
    p.carry = v & 0x01 != 0;
    let r = v >> 1;
    p.set_zn(r);
    r
}

pub(crate) fn rol(p: &mut ProcessorStatus, v: u8) -> u8 {
    let carry_in = p.carry as u8;
    p.carry = v & 0x80 != 0;
    let r = (v << 1) | carry_in;
    p.set_zn(r);
    r
}

pub(crate) fn ror(p: &mut ProcessorStatus, v: u8) -> u8 {
    let carry_in = (p.carry as u8) << 7;
    p.carry = v & 0x01 != 0;
    let r = (v >> 1) | carry_in;
    p.set_zn(r);
    r
}

pub(crate) fn inc(p: &mut ProcessorStatus, v: u8) -> u8 {
    let r = v.wrapping_add(1);
    p.set_zn(r);
    r
}

pub(crate) fn dec(p: &mut ProcessorStatus, v: u8) -> u8 {
    let r = v.wrapping_sub(1);
    p.set_zn(r);
    r
}

// ---------------------------------------------------------------------------
// Register increment / decrement
// ---------------------------------------------------------------------------

pub(crate) fn inx(r: &mut Registers) {
    r.xreg = r.xreg.wrapping_add(1);
    r.status.set_zn(r.xreg);
}

pub(crate) fn iny(r: &mut Registers) {
    r.yreg = r.yreg.wrapping_add(1);
    r.status.set_zn(r.yreg);
}

pub(crate) fn dex(r: &mut Registers) {
    r.xreg = r.xreg.wrapping_sub(1);
    r.status.set_zn(r.xreg);
}

pub(crate) fn dey(r: &mut Registers) {
    r.yreg = r.yreg.wrapping_sub(1);
    r.status.set_zn(r.yreg);
}

// ---------------------------------------------------------------------------
// Transfers (TXS is the only one that leaves flags alone)
// ---------------------------------------------------------------------------

pub(crate) fn tax(r: &mut Registers) {
    r.xreg = r.accum;
    r.status.set_zn(r.xreg);
}

pub(crate) fn tay(r: &mut Registers) {
    r.yreg = r.accum;
    r.status.set_zn(r.yreg);
}

pub(crate) fn txa(r: &mut Registers) {
    r.accum = r.xreg;
    r.status.set_zn(r.accum);
}

pub(crate) fn tya(r: &mut Registers) {
    r.accum = r.yreg;
    r.status.set_zn(r.accum);
}

pub(crate) fn tsx(r: &mut Registers) {
    r.xreg = r.sp;
    r.status.set_zn(r.xreg);
}

pub(crate) fn txs(r: &mut Registers) {
    r.sp = r.xreg;
}

// ---------------------------------------------------------------------------
// Flag instructions
// ---------------------------------------------------------------------------

pub(crate) fn clc(r: &mut Registers) {
    r.status.carry = false;
}

pub(crate) fn sec(r: &mut Registers) {
    r.status.carry = true;
}

pub(crate) fn cli(r: &mut Registers) {
    r.status.interrupt_disable = false;
}

pub(crate) fn sei(r: &mut Registers) {
    r.status.interrupt_disable = true;
}

pub(crate) fn cld(r: &mut Registers) {
    r.status.decimal = false;
}

pub(crate) fn sed(r: &mut Registers) {
    r.status.decimal = true;
}

pub(crate) fn clv(r: &mut Registers) {
    r.status.overflow = false;
}
