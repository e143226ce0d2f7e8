//! Shared test utilities for building PRG images and iNES (v1) files.
//!
//! These helpers de-duplicate image construction across tests in the CPU,
//! Bus, and Cartridge modules. They intentionally support just what the test
//! suite needs.
//!
//! Notes on iNES header fields used here:
//! - bytes[0..4] = b"NES\x1A"
//! - byte 4 = PRG ROM size in 16 KiB units
//! - byte 5 = CHR ROM size in 8 KiB units
//! - byte 6 = Flags 6 (mirroring, battery, trainer, mapper low nibble)
//! - byte 7 = Flags 7 (NES 2.0 indicator, mapper high nibble)
//!
//! PRG images built here are always 32 KiB (NROM-256 layout) so CPU address
//! `$8000 + n` is PRG offset `n` and the vectors sit at offsets 0x7FFA..=0x7FFF.
//! Unused PRG bytes are NOP (0xEA) so stray execution never hits BRK.

#![allow(dead_code)]

use crate::cpu::core::Cpu;

pub const PRG_LEN: usize = 32 * 1024;

/// Default (reset, nmi, irq) vectors used by `build_prg`.
pub const DEFAULT_VECTORS: (u16, u16, u16) = (0x8000, 0x9000, 0xA000);

/// Build a minimal iNES (v1) image with pattern-filled PRG (0xAA) and CHR (0xCC).
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        16 + trainer.map(|_| 512).unwrap_or(0) + prg_16k * 16 * 1024 + chr_8k * 8 * 1024,
    );

    bytes.extend_from_slice(b"NES\x1A");
    bytes.push(prg_16k as u8);
    bytes.push(chr_8k as u8);
    bytes.push(flags6);
    bytes.push(flags7);
    bytes.extend_from_slice(&[0u8; 8]);

    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }
    bytes.extend(std::iter::repeat_n(0xAA, prg_16k * 16 * 1024));
    bytes.extend(std::iter::repeat_n(0xCC, chr_8k * 8 * 1024));
    bytes
}

/// 32 KiB PRG image with `program` at $8000 and the given (reset, nmi, irq) vectors.
pub fn build_prg(program: &[u8], vectors: Option<(u16, u16, u16)>) -> Vec<u8> {
    build_prg_at(&[(0x8000, program)], vectors)
}

/// 32 KiB PRG image with each `(cpu_addr, bytes)` chunk placed at its CPU address.
///
/// Panics if a chunk falls outside $8000-$FFFF.
pub fn build_prg_at(chunks: &[(u16, &[u8])], vectors: Option<(u16, u16, u16)>) -> Vec<u8> {
    let mut prg = vec![0xEA; PRG_LEN];
    let (reset, nmi, irq) = vectors.unwrap_or(DEFAULT_VECTORS);
    set_vectors_in_prg(&mut prg, reset, nmi, irq);
    for (addr, bytes) in chunks {
        assert!(*addr >= 0x8000, "chunk at ${addr:04X} is below PRG space");
        let offset = (*addr - 0x8000) as usize;
        prg[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
    prg
}

/// Write NMI, RESET, IRQ/BRK vectors at the top of a 32 KiB PRG slice.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    assert_eq!(prg.len(), PRG_LEN, "vector placement expects a 32 KiB PRG");
    write_le_u16(prg, 0x7FFA, nmi);
    write_le_u16(prg, 0x7FFC, reset);
    write_le_u16(prg, 0x7FFE, irq);
}

#[inline]
fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = (value & 0x00FF) as u8;
    buf[offset + 1] = (value >> 8) as u8;
}

/// Powered-on CPU running `program` from $8000 with default vectors.
pub fn cpu_with_program(program: &[u8]) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.power(&build_prg(program, None));
    cpu
}

/// Powered-on CPU with arbitrary chunks and vectors.
pub fn cpu_with_chunks(chunks: &[(u16, &[u8])], vectors: Option<(u16, u16, u16)>) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.power(&build_prg_at(chunks, vectors));
    cpu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom.len(), 16 + 2 * 16 * 1024 + 8 * 1024);
    }

    #[test]
    fn writes_vectors_for_32k_prg() {
        let mut prg = vec![0u8; PRG_LEN];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(prg[0x7FFA], 0x56);
        assert_eq!(prg[0x7FFB], 0x84);
        assert_eq!(prg[0x7FFC], 0x23);
        assert_eq!(prg[0x7FFD], 0x81);
        assert_eq!(prg[0x7FFE], 0xBC);
        assert_eq!(prg[0x7FFF], 0x8A);
    }

    #[test]
    fn places_chunks_at_cpu_addresses() {
        let prg = build_prg_at(&[(0x8000, &[0xA9, 0x01]), (0x90FF, &[0x60])], None);
        assert_eq!(prg[0], 0xA9);
        assert_eq!(prg[1], 0x01);
        assert_eq!(prg[2], 0xEA);
        assert_eq!(prg[0x10FF], 0x60);
    }
}
