/*!
dispatch - Orchestrator for a single 6502 CPU step (interrupts / fetch / execute)

Overview
========
One `step` runs exactly one of three mutually exclusive units, checked in
priority order:

1. NMI service, when the previous instruction's poll latched `exec_nmi`.
2. IRQ service, when the poll latched `exec_irq` (I flag was clear then).
3. Normal fetch/decode/execute through the static opcode table.

Polls happen inside instructions (`Cpu::last_cycle`); acting on them happens
only here, at the start of the following step. An interrupt therefore never
splits an instruction.

Families
========
- `addressing::{read, modify, write}` : operand-generic ALU / RMW / stores
- `branches`     : conditional branches
- `control_flow` : JMP / JSR / RTS / RTI / BRK
- `misc`         : register, flag and stack ops, NOP, unknown opcodes

Interrupt sequence
==================
Shared by NMI, RESET, IRQ and BRK, 7 cycles including the opcode-fetch slot:
two discarded reads at PC (BRK fetches its padding byte instead), push PC
high, PC low, status (B set only for BRK), set I, read the vector.
*/

pub(crate) mod branches;
pub(crate) mod control_flow;
pub(crate) mod misc;

use log::debug;

use crate::cpu::addressing;
use crate::cpu::core::Cpu;
use crate::cpu::regs::Word;
use crate::cpu::table::{Kind, OPCODES, Register};

/// Non-maskable interrupt vector.
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ and BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    Nmi,
    Reset,
    Irq,
    Brk,
}

impl Interrupt {
    fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Reset => RESET_VECTOR,
            Interrupt::Irq | Interrupt::Brk => IRQ_VECTOR,
        }
    }
}

/// Execute one step and return the cycles it consumed.
pub(crate) fn step(cpu: &mut Cpu) -> u32 {
    let start = cpu.cycles;

    if cpu.exec_nmi {
        cpu.exec_nmi = false;
        cpu.nmi_pending = false;
        cpu.exec_irq = false;
        interrupt(cpu, Interrupt::Nmi);
    } else if cpu.exec_irq {
        cpu.exec_irq = false;
        cpu.irq_pending = false;
        interrupt(cpu, Interrupt::Irq);
    } else {
        #[cfg(feature = "trace")]
        log::trace!("{} [{:02X}] {}", cpu.info(), cpu.peek_opcode(), cpu.disassemble());
        let opcode = cpu.fetch();
        execute(cpu, opcode);
    }

    (cpu.cycles - start) as u32
}

/// Run the instruction for `opcode`; the opcode byte has already been fetched.
fn execute(cpu: &mut Cpu, opcode: u8) {
    let entry = OPCODES[opcode as usize];
    match entry.kind {
        Kind::Read(op) => addressing::read(cpu, entry.mode, op),
        Kind::Modify(op) => addressing::modify(cpu, entry.mode, op),
        Kind::Store(reg) => {
            let v = match reg {
                Register::A => cpu.regs.accum,
                Register::X => cpu.regs.xreg,
                Register::Y => cpu.regs.yreg,
            };
            addressing::write(cpu, entry.mode, v);
        }
        Kind::Internal(op) => misc::implied(cpu, op),
        Kind::Branch(cond) => branches::branch(cpu, cond),
        Kind::Pha => misc::pha(cpu),
        Kind::Php => misc::php(cpu),
        Kind::Pla => misc::pla(cpu),
        Kind::Plp => misc::plp(cpu),
        Kind::Jmp => control_flow::jmp(cpu),
        Kind::JmpIndirect => control_flow::jmp_indirect(cpu),
        Kind::Jsr => control_flow::jsr(cpu),
        Kind::Rts => control_flow::rts(cpu),
        Kind::Rti => control_flow::rti(cpu),
        Kind::Brk => control_flow::brk(cpu),
        Kind::Nop => misc::nop(cpu),
        Kind::Unknown => misc::unknown(cpu, opcode),
    }
}

/// Interrupt entry sequence (6 cycles here, plus the opcode-fetch slot).
pub(crate) fn interrupt(cpu: &mut Cpu, kind: Interrupt) {
    if kind == Interrupt::Brk {
        cpu.fetch();
    } else {
        let pc = cpu.regs.pc.get();
        cpu.read_mem(pc);
        cpu.read_mem(pc);
    }

    let ret = cpu.regs.pc;
    cpu.push(ret.hi());
    cpu.push(ret.lo());
    cpu.push(cpu.regs.status.pushed(kind == Interrupt::Brk));
    cpu.regs.status.interrupt_disable = true;

    let vector = kind.vector();
    let lo = cpu.read_mem(vector);
    let hi = cpu.read_mem(vector.wrapping_add(1));
    cpu.regs.pc = Word::from_bytes(lo, hi);

    debug!(
        "cpu: {:?} from ${:04X} via ${:04X} -> ${:04X}",
        kind,
        ret.get(),
        vector,
        cpu.regs.pc.get()
    );
}
