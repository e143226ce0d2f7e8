/*!
cycles.rs - Bus-cycle primitives and baseline timing for the 6502 core.

Purpose
=======
Every bus access the CPU makes costs exactly one cycle, so timing falls out
of the access sequence rather than being returned as a lump sum:

  - `fetch()`      : read at PC, advance PC                  (+1)
  - `read_mem(a)`  : data read                               (+1)
  - `write_mem(a)` : data write (subject to the bus gate)    (+1)
  - `push(v)`      : write at $0100|SP, SP -= 1              (+1)
  - `pull()`       : SP += 1, read at $0100|SP               (+1)
  - `cycle()`      : internal / dummy cycle                  (+1)
  - `last_cycle()` : interrupt poll point, costs nothing      (0)

The opcode fetch in `step()` is the implicit first cycle of every
instruction; addressing dispatchers and family handlers account for the rest.

`base_cycles(op)` exposes the documented baseline from the opcode table
(no page-cross or branch penalties) for diagnostics and tests.
*/

use crate::cpu::core::Cpu;
use crate::cpu::table::OPCODES;

/// Baseline cycle count for `op`, excluding page-cross and branch penalties.
pub fn base_cycles(op: u8) -> u32 {
    OPCODES[op as usize].cycles as u32
}

impl Cpu {
    #[inline]
    pub(crate) fn tick(&mut self) {
        self.cycles += 1;
    }

    /// Next byte of the instruction stream.
    #[inline]
    pub(crate) fn fetch(&mut self) -> u8 {
        let v = self.bus.read(self.regs.pc.get());
        self.regs.pc.add(1);
        self.tick();
        v
    }

    #[inline]
    pub(crate) fn read_mem(&mut self, addr: u16) -> u8 {
        let v = self.bus.read(addr);
        self.tick();
        v
    }

    #[inline]
    pub(crate) fn write_mem(&mut self, addr: u16, val: u8) {
        self.bus.write(addr, val);
        self.tick();
    }

    /// Internal operation or discarded access.
    #[inline]
    pub(crate) fn cycle(&mut self) {
        self.tick();
    }

    /// Interrupt poll on the final cycle of an instruction.
    ///
    /// Latches the pending lines into the "execute before next opcode" flags.
    /// IRQ is masked by the I flag as it stands at this point, which is what
    /// gives CLI/SEI/PLP their one-instruction delay.
    #[inline]
    pub(crate) fn last_cycle(&mut self) {
        self.exec_nmi |= self.nmi_pending;
        self.exec_irq |= self.irq_pending && !self.regs.status.interrupt_disable;
    }

    #[inline]
    pub(crate) fn push(&mut self, val: u8) {
        let addr = self.regs.stack_addr();
        self.write_mem(addr, val);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    #[inline]
    pub(crate) fn pull(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let addr = self.regs.stack_addr();
        self.read_mem(addr)
    }
}
