/*!
core::Cpu - 6502 CPU facade owning the register file and the bus.

Design
======
- `Cpu` owns `Registers`, the `Bus`, the per-instruction operand scratch
  (`opargs`), the cycle counter and the four interrupt latches.
- The CPU is the only writer of the bus, so it owns it outright. Collaborators
  reach memory through `bus()` / `bus_mut()` / `memory()` between steps.
- Execution lives in `dispatch`; bus-cycle primitives live in `cycles.rs`;
  this file holds lifecycle (`power`, `reset`), the external interrupt
  lines, diagnostics and register accessors.

Interrupt latches
=================
```text
    irq_pending / nmi_pending : set by `fire_irq` / `fire_nmi`
    exec_irq / exec_nmi       : set by the poll on an instruction's last cycle,
                                consumed at the start of the next `step`
```

Usage:
```rust,ignore
use nes6502::cartridge::Cartridge;
use nes6502::cpu::Cpu;

let cart = Cartridge::from_ines_file("game.nes")?;
let mut cpu = Cpu::new();
cpu.power(cart.prg_rom());
let spent = cpu.step();
```
*/

use log::debug;

use crate::bus::Bus;
use crate::cpu::disasm;
use crate::cpu::dispatch::{self, Interrupt};
use crate::cpu::regs::{Registers, Word};
use crate::cpu::status::ProcessorStatus;
use crate::cpu::table::OPCODES;

/// Cycles charged by `power()`: the 7-cycle reset sequence plus one.
pub const POWER_ON_CYCLES: u64 = 8;

#[derive(Debug)]
pub struct Cpu {
    pub(crate) regs: Registers,
    pub(crate) bus: Bus,
    pub(crate) opargs: Word,
    pub(crate) cycles: u64,
    pub(crate) irq_pending: bool,
    pub(crate) nmi_pending: bool,
    pub(crate) exec_irq: bool,
    pub(crate) exec_nmi: bool,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Unpowered CPU with an empty bus. Call `power` before stepping.
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            bus: Bus::new(),
            opargs: Word::default(),
            cycles: 0,
            irq_pending: false,
            nmi_pending: false,
            exec_irq: false,
            exec_nmi: false,
        }
    }

    /// Cold boot: map `prgrom`, run the reset sequence with writes disabled.
    ///
    /// Leaves PC at the reset vector target, SP at $FD and the cycle counter
    /// at `POWER_ON_CYCLES`.
    pub fn power(&mut self, prgrom: &[u8]) {
        self.bus.initmem(prgrom);
        self.reset();
        self.cycles = 0;
        self.bus.set_write_enable(false);
        dispatch::interrupt(self, Interrupt::Reset);
        self.cycle();
        self.bus.set_write_enable(true);
        debug!(
            "cpu: power on, PC=${:04X} SP=${:02X} after {} cycles",
            self.regs.pc.get(),
            self.regs.sp,
            self.cycles
        );
    }

    /// Warm reset: registers to zero, status to defaults, latches cleared,
    /// bus write gate reopened. Memory and the cycle counter are kept; PC is
    /// not reloaded (`power` runs the vector fetch).
    pub fn reset(&mut self) {
        self.regs = Registers::new();
        self.regs.status.reset();
        self.opargs = Word::default();
        self.irq_pending = false;
        self.nmi_pending = false;
        self.exec_irq = false;
        self.exec_nmi = false;
        self.bus.reset();
        debug!("cpu: reset");
    }

    /// Execute one instruction or interrupt entry; returns cycles consumed.
    pub fn step(&mut self) -> u32 {
        dispatch::step(self)
    }

    /// Step until at least `budget` cycles have elapsed; returns cycles consumed.
    pub fn run(&mut self, budget: u64) -> u64 {
        let start = self.cycles;
        while self.cycles - start < budget {
            self.step();
        }
        self.cycles - start
    }

    /// Assert the IRQ line. Serviced once I is clear at an instruction's last cycle.
    pub fn fire_irq(&mut self) {
        self.irq_pending = true;
    }

    /// Request an NMI. Serviced after the current instruction regardless of I.
    pub fn fire_nmi(&mut self) {
        self.nmi_pending = true;
    }

    pub fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    /// Total cycles since power-on.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Opcode byte at PC, without side effects.
    pub fn peek_opcode(&self) -> u8 {
        self.bus.read(self.regs.pc.get())
    }

    /// Instruction at PC as text.
    pub fn disassemble(&self) -> String {
        let pc = self.regs.pc.get();
        let opcode = self.bus.read(pc);
        let mut bytes = [opcode, 0, 0];
        let len = OPCODES[opcode as usize].mode.operand_len() as u16;
        for i in 1..=len {
            bytes[i as usize] = self.bus.read(pc.wrapping_add(i));
        }
        disasm::disassemble(pc, bytes, &self.regs.status)
    }

    /// Register and flag snapshot for logs.
    pub fn info(&self) -> String {
        let r = &self.regs;
        format!(
            "PC: {:04X} A: {:02X} X: {:02X} Y: {:02X} SP: {:02X} P: {} ({:02X}) CYC: {}",
            r.pc.get(),
            r.accum,
            r.xreg,
            r.yreg,
            r.sp,
            r.status,
            r.status.reg(),
            self.cycles
        )
    }

    /// Whole 64 KiB address space, for dumps.
    pub fn memory(&self) -> &[u8] {
        self.bus.memory()
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    // ---------------------------------------------------------------------
    // Register accessors
    // ---------------------------------------------------------------------
    pub fn accum(&self) -> u8 {
        self.regs.accum
    }
    pub fn x(&self) -> u8 {
        self.regs.xreg
    }
    pub fn y(&self) -> u8 {
        self.regs.yreg
    }
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }
    pub fn pc(&self) -> u16 {
        self.regs.pc.get()
    }
    pub fn status(&self) -> ProcessorStatus {
        self.regs.status
    }

    pub fn set_accum(&mut self, v: u8) {
        self.regs.accum = v;
    }
    pub fn set_x(&mut self, v: u8) {
        self.regs.xreg = v;
    }
    pub fn set_y(&mut self, v: u8) {
        self.regs.yreg = v;
    }
    pub fn set_sp(&mut self, v: u8) {
        self.regs.sp = v;
    }
    pub fn set_pc(&mut self, v: u16) {
        self.regs.pc.set(v);
    }
    pub fn status_mut(&mut self) -> &mut ProcessorStatus {
        &mut self.regs.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{build_prg, cpu_with_program};

    #[test]
    fn power_charges_eight_cycles() {
        let cpu = cpu_with_program(&[]);
        assert_eq!(cpu.cycles(), POWER_ON_CYCLES);
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);
        assert!(cpu.status().interrupt_disable);
        assert!(cpu.bus().write_enabled());
    }

    #[test]
    fn power_reset_sequence_does_not_write_stack() {
        let cpu = cpu_with_program(&[]);
        assert!(cpu.memory()[0x0100..0x0200].iter().all(|&b| b == 0));
    }

    #[test]
    fn power_again_restarts_counter() {
        let mut cpu = cpu_with_program(&[0xEA, 0xEA]);
        cpu.step();
        cpu.bus_mut().write(0x0000, 0x55);
        cpu.power(&build_prg(&[0xEA], None));
        assert_eq!(cpu.cycles(), POWER_ON_CYCLES);
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.bus().read(0x0000), 0);
    }

    #[test]
    fn warm_reset_keeps_memory_and_cycles() {
        let mut cpu = cpu_with_program(&[0xA9, 0x42]);
        cpu.step();
        cpu.fire_irq();
        cpu.bus_mut().write(0x0200, 0x99);
        let cycles = cpu.cycles();
        cpu.reset();
        assert_eq!(cpu.accum(), 0);
        assert_eq!(cpu.sp(), 0);
        assert_eq!(cpu.pc(), 0);
        assert!(!cpu.irq_pending());
        assert!(cpu.status().interrupt_disable);
        assert_eq!(cpu.cycles(), cycles);
        assert_eq!(cpu.bus().read(0x0200), 0x99);
    }

    #[test]
    fn fire_lines_are_idempotent() {
        let mut cpu = cpu_with_program(&[]);
        cpu.fire_nmi();
        cpu.fire_nmi();
        assert!(cpu.nmi_pending());
        cpu.step();
        cpu.step();
        assert_eq!(cpu.pc(), 0x9000);
        assert!(!cpu.nmi_pending());
    }

    #[test]
    fn run_consumes_at_least_budget() {
        let mut cpu = cpu_with_program(&[]);
        assert_eq!(cpu.run(10), 10);
        assert_eq!(cpu.pc(), 0x8005);
        assert_eq!(cpu.run(1), 2);
    }

    #[test]
    fn info_snapshot() {
        let mut cpu = cpu_with_program(&[0xA9, 0x80]);
        cpu.step();
        assert_eq!(
            cpu.info(),
            "PC: 8002 A: 80 X: 00 Y: 00 SP: FD P: NvUbdIzc (A4) CYC: 10"
        );
    }

    #[test]
    fn disassemble_and_peek_have_no_side_effects() {
        let cpu = cpu_with_program(&[0xA9, 0x05]);
        let before = cpu.cycles();
        assert_eq!(cpu.peek_opcode(), 0xA9);
        assert_eq!(cpu.disassemble(), "LDA #$05");
        assert_eq!(cpu.cycles(), before);
        assert_eq!(cpu.pc(), 0x8000);
    }

    #[test]
    fn disassemble_reads_only_the_operand_bytes() {
        let cpu = cpu_with_program(&[0xAD, 0x34, 0x12]);
        assert_eq!(cpu.disassemble(), "LDA $1234");

        let mut cpu = cpu_with_program(&[0xE8, 0xFF, 0xFF]);
        assert_eq!(cpu.disassemble(), "INX");
        cpu.set_pc(0x8001);
        assert_eq!(cpu.disassemble(), "[Unknown]");
    }
}
