#![doc = r#"
nes6502 library crate.

Cycle-accurate NES (2A03 / 6502) CPU core with its flat memory bus and an
iNES loader that supplies the PRG ROM image.

Modules:
- bus: flat 64 KiB address space with the power-up write gate
- cartridge: iNES v1 loader (PRG/CHR bytes, mapper id, mirroring)
- cpu: 6502 core (status, registers, addressing, semantics, opcode table,
  dispatch, disassembler) behind the `Cpu` facade

In tests, shared image builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cartridge;
pub mod cpu;

pub use bus::Bus;
pub use cartridge::{Cartridge, CartridgeError};
pub use cpu::core::Cpu;

#[cfg(test)]
pub mod test_utils;
