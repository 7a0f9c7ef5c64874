//! NROM (mapper 0): no banking.

use ricoh_ppu_2c02::{Mirroring, VideoMemory};

use crate::mapper::{Chr, Mapper, PrgRam};

/// 16 KB PRG (mirrored into `$C000`) or 32 KB PRG, 8 KB CHR, and 8 KB of
/// work RAM at `$6000` as on the Family Basic board. Test ROMs report
/// through that RAM.
#[derive(Debug, Clone)]
pub struct Nrom {
    prg_rom: Vec<u8>,
    prg_ram: PrgRam,
    chr: Chr,
    mirroring: Mirroring,
}

impl Nrom {
    /// # Panics
    ///
    /// If `prg_rom` is empty.
    #[must_use]
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>, mirroring: Mirroring) -> Self {
        assert!(!prg_rom.is_empty(), "NROM needs PRG ROM");
        Self {
            prg_rom,
            prg_ram: PrgRam::new(),
            chr: Chr::new(chr),
            mirroring,
        }
    }
}

impl Mapper for Nrom {
    fn cpu_peek(&self, addr: u16) -> Option<u8> {
        match addr {
            0x6000..=0x7FFF => Some(self.prg_ram.get(addr)),
            0x8000..=0xFFFF => {
                let offset = usize::from(addr - 0x8000);
                Some(self.prg_rom[offset % self.prg_rom.len()])
            }
            _ => None,
        }
    }

    fn cpu_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x6000..=0x7FFF => self.prg_ram.set(addr, value),
            _ => log::trace!("NROM: write to ${addr:04X} ignored"),
        }
    }

    fn number(&self) -> u8 {
        0
    }
}

impl VideoMemory for Nrom {
    fn chr_read(&mut self, addr: u16) -> u8 {
        self.chr_peek(addr)
    }

    fn chr_peek(&self, addr: u16) -> u8 {
        self.chr.get(usize::from(addr & 0x1FFF))
    }

    fn chr_write(&mut self, addr: u16, value: u8) {
        self.chr.set(usize::from(addr & 0x1FFF), value);
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PRG_BANK_SIZE;

    #[test]
    fn sixteen_k_mirrors_into_upper_half() {
        let mut prg = vec![0; PRG_BANK_SIZE];
        prg[0] = 0xAA;
        prg[0x3FFF] = 0xBB;
        let nrom = Nrom::new(prg, Vec::new(), Mirroring::Horizontal);
        assert_eq!(nrom.cpu_peek(0x8000), Some(0xAA));
        assert_eq!(nrom.cpu_peek(0xC000), Some(0xAA));
        assert_eq!(nrom.cpu_peek(0xFFFF), Some(0xBB));
    }

    #[test]
    fn thirty_two_k_maps_linearly() {
        let mut prg = vec![0; 2 * PRG_BANK_SIZE];
        prg[0x4000] = 0xCC;
        let nrom = Nrom::new(prg, Vec::new(), Mirroring::Vertical);
        assert_eq!(nrom.cpu_peek(0xC000), Some(0xCC));
        assert_eq!(nrom.cpu_peek(0x8000), Some(0x00));
    }

    #[test]
    fn prg_ram_and_rom_writes() {
        let mut nrom = Nrom::new(vec![0; PRG_BANK_SIZE], Vec::new(), Mirroring::Vertical);
        nrom.cpu_write(0x6000, 0x80);
        nrom.cpu_write(0x8000, 0x55);
        assert_eq!(nrom.cpu_read(0x6000), Some(0x80));
        assert_eq!(nrom.cpu_read(0x8000), Some(0x00));
    }

    #[test]
    fn expansion_area_is_undriven() {
        let nrom = Nrom::new(vec![0; PRG_BANK_SIZE], Vec::new(), Mirroring::Vertical);
        assert_eq!(nrom.cpu_peek(0x4020), None);
        assert_eq!(nrom.cpu_peek(0x5FFF), None);
    }

    #[test]
    #[should_panic(expected = "PRG ROM")]
    fn empty_prg_is_rejected() {
        let _ = Nrom::new(Vec::new(), Vec::new(), Mirroring::Vertical);
    }
}
