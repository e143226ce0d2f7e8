/*!
Cartridge: iNES (v1) image loader feeding the CPU core.

Features:
- Parse iNES (v1) header from bytes or file path
- Extract PRG ROM, CHR ROM (empty when the image ships CHR RAM), trainer skip
- Determine mirroring, battery-backed RAM, mapper ID

Notes:
- iNES 2.0 is detected and rejected with `CartridgeError::Nes20Unsupported`.
- The core only consumes `prg_rom()`; mapper id and mirroring are metadata for
  collaborators (no bank switching happens here).
*/

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

const INES_MAGIC: &[u8; 4] = b"NES\x1A";
const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const PRG_UNIT: usize = 16 * 1024;
const CHR_UNIT: usize = 8 * 1024;

#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("failed to read ROM file: {0}")]
    Io(#[from] io::Error),

    #[error("image too small for iNES header ({0} bytes)")]
    TooSmall(usize),

    #[error("invalid iNES header magic (expected NES<1A>)")]
    BadMagic,

    #[error("NES 2.0 format is not supported")]
    Nes20Unsupported,

    #[error("image truncated: {section} needs {needed} bytes, {available} available")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

#[derive(Clone, Debug)]
pub struct Cartridge {
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    mapper_id: u8,
    mirroring: Mirroring,
    battery: bool,
    has_trainer: bool,
}

impl Cartridge {
    /// Parse a cartridge from raw iNES bytes.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_LEN {
            return Err(CartridgeError::TooSmall(data.len()));
        }
        if &data[0..4] != INES_MAGIC {
            return Err(CartridgeError::BadMagic);
        }

        let prg_units = data[4] as usize;
        let chr_units = data[5] as usize;
        let flags6 = data[6];
        let flags7 = data[7];

        // NES 2.0 if (flags7 & 0x0C) == 0x08.
        if (flags7 & 0x0C) == 0x08 {
            return Err(CartridgeError::Nes20Unsupported);
        }

        let mapper_id = (flags7 & 0xF0) | (flags6 >> 4);
        let mirroring = if flags6 & 0b0000_1000 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0b0000_0001 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let battery = flags6 & 0b0000_0010 != 0;
        let has_trainer = flags6 & 0b0000_0100 != 0;

        let mut offset = HEADER_LEN;
        if has_trainer {
            offset += TRAINER_LEN;
        }

        let prg_rom = take(data, offset, prg_units * PRG_UNIT, "PRG ROM")?.to_vec();
        offset += prg_rom.len();
        let chr_rom = take(data, offset, chr_units * CHR_UNIT, "CHR ROM")?.to_vec();

        Ok(Self {
            prg_rom,
            chr_rom,
            mapper_id,
            mirroring,
            battery,
            has_trainer,
        })
    }

    /// Load a cartridge from an iNES file (.nes).
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let bytes = fs::read(path)?;
        Self::from_ines_bytes(&bytes)
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn battery_backed(&self) -> bool {
        self.battery
    }

    pub fn has_trainer(&self) -> bool {
        self.has_trainer
    }
}

fn take<'a>(
    data: &'a [u8],
    offset: usize,
    len: usize,
    section: &'static str,
) -> Result<&'a [u8], CartridgeError> {
    let available = data.len().saturating_sub(offset);
    if available < len {
        return Err(CartridgeError::Truncated {
            section,
            needed: len,
            available,
        });
    }
    Ok(&data[offset..offset + len])
}
