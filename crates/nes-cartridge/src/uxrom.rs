//! UxROM (mapper 2): switchable 16 KB at `$8000`, last bank fixed at
//! `$C000`, CHR RAM.

use ricoh_ppu_2c02::{Mirroring, VideoMemory};

use crate::PRG_BANK_SIZE;
use crate::mapper::{Chr, Mapper};

#[derive(Debug, Clone)]
pub struct UxRom {
    prg_rom: Vec<u8>,
    chr: Chr,
    mirroring: Mirroring,
    bank: u8,
}

impl UxRom {
    /// # Panics
    ///
    /// If `prg_rom` holds less than one 16 KB bank.
    #[must_use]
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>, mirroring: Mirroring) -> Self {
        assert!(prg_rom.len() >= PRG_BANK_SIZE, "UxROM needs a full PRG bank");
        Self {
            prg_rom,
            chr: Chr::new(chr),
            mirroring,
            bank: 0,
        }
    }

    fn bank_count(&self) -> usize {
        self.prg_rom.len() / PRG_BANK_SIZE
    }
}

impl Mapper for UxRom {
    fn cpu_peek(&self, addr: u16) -> Option<u8> {
        let bank = match addr {
            0x8000..=0xBFFF => usize::from(self.bank) % self.bank_count(),
            0xC000..=0xFFFF => self.bank_count() - 1,
            _ => return None,
        };
        let offset = usize::from(addr & 0x3FFF);
        Some(self.prg_rom[bank * PRG_BANK_SIZE + offset])
    }

    fn cpu_write(&mut self, addr: u16, value: u8) {
        if addr >= 0x8000 {
            // Bus conflict: the ROM drives the bus at the same time.
            let rom = self.cpu_peek(addr).unwrap_or(0xFF);
            self.bank = value & rom;
        }
    }

    fn number(&self) -> u8 {
        2
    }
}

impl VideoMemory for UxRom {
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
