/*!
branches.rs - Conditional branch family (BPL BMI BVC BVS BCC BCS BNE BEQ)

Timing
======
- 2 cycles when not taken (opcode + displacement fetch)
- +1 when taken
- +1 more when the target lies on a different page than the instruction
  that follows the branch (old PC high byte vs new PC high byte)

Interrupts are polled before the displacement fetch, so a taken branch
without a page cross does not see a line raised during its own execution.
*/

use crate::cpu::core::Cpu;
use crate::cpu::regs::Word;
use crate::cpu::table::Condition;

pub(crate) fn branch(cpu: &mut Cpu, cond: Condition) {
    cpu.last_cycle();
    let disp = cpu.fetch();
    cpu.opargs = Word::new(disp as u16);
    if !cond.taken(&cpu.regs.status) {
        return;
    }
    cpu.cycle();
    let old_hi = cpu.regs.pc.hi();
    cpu.regs.pc.add(disp as i8 as i16 as u16);
    if cpu.regs.pc.hi() != old_hi {
        cpu.cycle();
    }
}
