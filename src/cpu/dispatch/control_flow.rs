/*!
control_flow.rs - Control-flow / system opcode family

  JMP abs        (0x4C)  3 cycles
  JMP (ind)      (0x6C)  5 cycles, indirect page-wrap quirk preserved
  JSR abs        (0x20)  6 cycles
  RTS            (0x60)  6 cycles
  RTI            (0x40)  6 cycles
  BRK            (0x00)  7 cycles, shares the interrupt entry sequence

Behavior Details
================
- JSR pushes the address of its own last byte (PC - 1 after both operand
  fetches), high byte first. RTS pulls low then high and adds 1.
- RTI pulls status (B cleared, see `ProcessorStatus::pull`) then PC low,
  PC high. Unlike RTS there is no +1.
- JMP ($xxFF) reads the target high byte from $xx00, not $(xx+1)00.
*/

use crate::cpu::core::Cpu;
use crate::cpu::dispatch::{Interrupt, interrupt};
use crate::cpu::regs::Word;

/// Two operand bytes into `opargs`, low first.
fn fetch_operand(cpu: &mut Cpu) -> Word {
    let lo = cpu.fetch();
    let hi = cpu.fetch();
    cpu.opargs = Word::from_bytes(lo, hi);
    cpu.opargs
}

pub(crate) fn jmp(cpu: &mut Cpu) {
    let target = fetch_operand(cpu);
    cpu.regs.pc = target;
    cpu.last_cycle();
}

pub(crate) fn jmp_indirect(cpu: &mut Cpu) {
    let ptr = fetch_operand(cpu);
    let lo = cpu.read_mem(ptr.get());
    let hi_addr = if ptr.lo() == 0xFF {
        ptr.get() & 0xFF00
    } else {
        ptr.get().wrapping_add(1)
    };
    let hi = cpu.read_mem(hi_addr);
    cpu.regs.pc = Word::from_bytes(lo, hi);
    cpu.last_cycle();
}

pub(crate) fn jsr(cpu: &mut Cpu) {
    let target = fetch_operand(cpu);
    cpu.regs.pc.add(0xFFFF);
    cpu.cycle();
    let ret = cpu.regs.pc;
    cpu.push(ret.hi());
    cpu.push(ret.lo());
    cpu.regs.pc = target;
    cpu.last_cycle();
}

pub(crate) fn rts(cpu: &mut Cpu) {
    cpu.cycle();
    cpu.cycle();
    let lo = cpu.pull();
    let hi = cpu.pull();
    cpu.regs.pc = Word::from_bytes(lo, hi);
    cpu.regs.pc.add(1);
    cpu.cycle();
    cpu.last_cycle();
}

pub(crate) fn rti(cpu: &mut Cpu) {
    cpu.cycle();
    cpu.cycle();
    let p = cpu.pull();
    cpu.regs.status.pull(p);
    let lo = cpu.pull();
    let hi = cpu.pull();
    cpu.regs.pc = Word::from_bytes(lo, hi);
    cpu.last_cycle();
}

pub(crate) fn brk(cpu: &mut Cpu) {
    interrupt(cpu, Interrupt::Brk);
}
