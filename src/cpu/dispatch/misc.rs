/*!
misc.rs - Single-byte instructions: register ops, flags, stack, NOP, unknown

Register ops (INX INY DEX DEY TAX TAY TXA TYA TSX TXS) and flag ops
(CLC SEC CLI SEI CLD SED CLV) share one shape: poll, one idle cycle, apply.
Polling before the change is what delays CLI/SEI by one instruction.

Stack:
  PHA / PHP  3 cycles (PHP pushes with B and bit 5 set)
  PLA / PLP  4 cycles (PLP polls before the pull, B is cleared)

Unknown opcodes are not fatal: they are logged and cost 2 cycles, like NOP.
*/

use log::debug;

use crate::cpu::core::Cpu;
use crate::cpu::execute::ImpliedOp;

pub(crate) fn implied(cpu: &mut Cpu, op: ImpliedOp) {
    cpu.last_cycle();
    cpu.cycle();
    op(&mut cpu.regs);
}

pub(crate) fn pha(cpu: &mut Cpu) {
    cpu.cycle();
    cpu.push(cpu.regs.accum);
    cpu.last_cycle();
}

pub(crate) fn php(cpu: &mut Cpu) {
    cpu.cycle();
    cpu.push(cpu.regs.status.pushed(true));
    cpu.last_cycle();
}

pub(crate) fn pla(cpu: &mut Cpu) {
    cpu.cycle();
    cpu.cycle();
    let v = cpu.pull();
    cpu.regs.accum = v;
    cpu.regs.status.set_zn(v);
    cpu.last_cycle();
}

pub(crate) fn plp(cpu: &mut Cpu) {
    cpu.cycle();
    cpu.cycle();
    cpu.last_cycle();
    let v = cpu.pull();
    cpu.regs.status.pull(v);
}

pub(crate) fn nop(cpu: &mut Cpu) {
    cpu.cycle();
    cpu.last_cycle();
}

pub(crate) fn unknown(cpu: &mut Cpu, opcode: u8) {
    let at = cpu.regs.pc.get().wrapping_sub(1);
    debug!("cpu: unknown opcode ${:02X} at ${:04X}, treated as NOP", opcode, at);
    cpu.cycle();
    cpu.last_cycle();
}
