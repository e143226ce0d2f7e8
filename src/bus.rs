/*!
Bus: flat 64 KiB CPU address space with a write-enable gate.

Address map (as seen by the core):
- $0000-$7FFF: RAM / registers / expansion, zeroed at power-on
- $0100-$01FF: hardware stack page (a plain part of the RAM above)
- $8000-$FFFF: PRG ROM image copied in by `initmem`

Notes:
- Every 16-bit address is valid; there is no mirroring or device decode here.
  Mapper/PPU/APU register behavior belongs to collaborators outside the core.
- `write` is a no-op while `write_enable` is false. Power-up runs the reset
  interrupt sequence with writes disabled so its stack pushes land nowhere.
- ROM is not write-protected beyond that gate.
*/

use log::debug;

/// Total size of the CPU address space.
pub const MEMSIZE: usize = 0x1_0000;

/// First address of the PRG ROM window.
pub const PRGROM_START: u16 = 0x8000;

/// Size of one PRG ROM bank as stored in iNES images.
pub const PRG_BANK_SIZE: usize = 0x4000;

/// Size of the PRG ROM window ($8000-$FFFF).
pub const PRGROM_WINDOW: usize = MEMSIZE - PRGROM_START as usize;

pub struct Bus {
    memory: Box<[u8; MEMSIZE]>,
    write_enable: bool,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("write_enable", &self.write_enable)
            .finish_non_exhaustive()
    }
}

impl Bus {
    /// Create a zero-filled bus with writes enabled.
    pub fn new() -> Self {
        Self {
            memory: Box::new([0; MEMSIZE]),
            write_enable: true,
        }
    }

    /// Zero everything below `PRGROM_START` and map `prgrom` into the upper window.
    ///
    /// Placement:
    /// - exactly 16 KiB: mirrored at $8000 and $C000 (NROM-128 layout)
    /// - up to 32 KiB: copied straight from $8000
    /// - larger: first bank at $8000, last bank at $C000
    pub fn initmem(&mut self, prgrom: &[u8]) {
        let start = PRGROM_START as usize;
        self.memory[..start].fill(0);
        self.memory[start..].fill(0);

        match prgrom.len() {
            0 => {}
            PRG_BANK_SIZE => {
                self.memory[start..start + PRG_BANK_SIZE].copy_from_slice(prgrom);
                self.memory[start + PRG_BANK_SIZE..].copy_from_slice(prgrom);
            }
            len if len <= PRGROM_WINDOW => {
                self.memory[start..start + len].copy_from_slice(prgrom);
            }
            len => {
                let last = &prgrom[len - PRG_BANK_SIZE..];
                self.memory[start..start + PRG_BANK_SIZE].copy_from_slice(&prgrom[..PRG_BANK_SIZE]);
                self.memory[start + PRG_BANK_SIZE..].copy_from_slice(last);
            }
        }
        debug!("bus: mapped {} PRG bytes at ${:04X}", prgrom.len(), PRGROM_START);
    }

    /// Logical reset: re-open the write gate. Memory contents are kept.
    pub fn reset(&mut self) {
        self.write_enable = true;
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    /// Little-endian word at `addr`/`addr + 1` (wrapping at $FFFF).
    #[inline]
    pub fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    #[inline]
    pub fn write(&mut self, addr: u16, val: u8) {
        if !self.write_enable {
            return;
        }
        self.memory[addr as usize] = val;
    }

    pub fn write_enabled(&self) -> bool {
        self.write_enable
    }

    pub fn set_write_enable(&mut self, enable: bool) {
        self.write_enable = enable;
    }

    /// Whole address space, for diagnostics.
    pub fn memory(&self) -> &[u8] {
        &self.memory[..]
    }

    /// Hex dump rows: `"XXXX: " + 16 space-separated bytes`.
    pub fn dump_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.memory.chunks(16).enumerate().map(|(row, bytes)| {
            let mut line = format!("{:04X}: ", row * 16);
            for b in bytes {
                line.push_str(&format!("{:02X} ", b));
            }
            line
        })
    }
}
