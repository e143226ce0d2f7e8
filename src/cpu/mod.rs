/*!
cpu - Cycle-accurate 6502 (2A03) CPU core.

```text
    status.rs       - Processor status register as named flags + byte conversion.
    regs.rs         - Register file (`Registers`) and split 16-bit `Word`.
    execute.rs      - Pure instruction semantics (ALU, shifts, transfers, flags).
    addressing.rs   - Addressing modes and the read / modify / write dispatchers.
    cycles.rs       - Bus-cycle primitives (fetch, read, write, push, pull, poll).
    table.rs        - Static 256-entry opcode table (mnemonic, mode, kind, cycles).
    dispatch/       - Per-step orchestrator, interrupt entry, instruction families.
    core/           - `Cpu` facade: power, reset, step, interrupt lines, accessors.
    disasm.rs       - Text rendering of one instruction.
```

Feature flags:
```text
    trace           - `log::trace!` line (registers, opcode, disassembly) before
                      every executed instruction.
```
*/

pub mod addressing;
pub mod core;
pub mod cycles;
pub mod disasm;
pub mod dispatch;
pub mod execute;
pub mod regs;
pub mod status;
pub(crate) mod table;

pub use crate::cpu::core::{Cpu, POWER_ON_CYCLES};
pub use crate::cpu::dispatch::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use crate::cpu::regs::{Registers, STACK_BASE, Word};
pub use crate::cpu::status::ProcessorStatus;
