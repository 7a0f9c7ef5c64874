//! CNROM (mapper 3): fixed PRG, switchable 8 KB CHR ROM.

use ricoh_ppu_2c02::{Mirroring, VideoMemory};

use crate::CHR_BANK_SIZE;
use crate::mapper::{Chr, Mapper};

#[derive(Debug, Clone)]
pub struct CnRom {
    prg_rom: Vec<u8>,
    chr: Chr,
    mirroring: Mirroring,
    chr_bank: u8,
}

impl CnRom {
    /// # Panics
    ///
    /// If `prg_rom` is empty.
    #[must_use]
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>, mirroring: Mirroring) -> Self {
        assert!(!prg_rom.is_empty(), "CNROM needs PRG ROM");
        Self {
            prg_rom,
            chr: Chr::new(chr),
            mirroring,
            chr_bank: 0,
        }
    }

    fn chr_offset(&self, addr: u16) -> usize {
        usize::from(self.chr_bank) * CHR_BANK_SIZE + usize::from(addr & 0x1FFF)
    }
}

impl Mapper for CnRom {
    fn cpu_peek(&self, addr: u16) -> Option<u8> {
        (addr >= 0x8000)
            .then(|| self.prg_rom[usize::from(addr - 0x8000) % self.prg_rom.len()])
    }

    fn cpu_write(&mut self, addr: u16, value: u8) {
        if addr >= 0x8000 {
            let rom = self.cpu_peek(addr).unwrap_or(0xFF);
            self.chr_bank = value & rom;
        }
    }

    fn number(&self) -> u8 {
        3
    }
}

impl VideoMemory for CnRom {
    fn chr_read(&mut self, addr: u16) -> u8 {
        self.chr_peek(addr)
    }

    fn chr_peek(&self, addr: u16) -> u8 {
        self.chr.get(self.chr_offset(addr))
    }

    fn chr_write(&mut self, addr: u16, value: u8) {
        let offset = self.chr_offset(addr);
        self.chr.set(offset, value);
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
