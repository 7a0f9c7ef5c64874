//! MMC1 (mapper 1, SxROM): serially loaded bank registers.
//!
//! Writes to `$8000-$FFFF` shift bit 0 into a 5-bit register, LSB first.
//! The fifth write commits the value to the register selected by address
//! bits 14-13. A write with bit 7 set resets the shift register and
//! forces PRG mode 3.

use ricoh_ppu_2c02::{Mirroring, VideoMemory};

use crate::PRG_BANK_SIZE;
use crate::mapper::{Chr, Mapper, PrgRam};

const CHR_PAGE: usize = 4 * 1024;

#[derive(Debug, Clone)]
pub struct Mmc1 {
    prg_rom: Vec<u8>,
    prg_ram: PrgRam,
    chr: Chr,
    shift: u8,
    shift_count: u8,
    /// `CPPMM`: CHR mode, PRG mode, mirroring.
    control: u8,
    chr_bank_0: u8,
    chr_bank_1: u8,
    prg_bank: u8,
}

impl Mmc1 {
    /// # Panics
    ///
    /// If `prg_rom` holds less than one 16 KB bank.
    #[must_use]
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>) -> Self {
        assert!(prg_rom.len() >= PRG_BANK_SIZE, "MMC1 needs a full PRG bank");
        Self {
            prg_rom,
            prg_ram: PrgRam::new(),
            chr: Chr::new(chr),
            shift: 0,
            shift_count: 0,
            control: 0x0C,
            chr_bank_0: 0,
            chr_bank_1: 0,
            prg_bank: 0,
        }
    }

    fn bank_count(&self) -> usize {
        self.prg_rom.len() / PRG_BANK_SIZE
    }

    fn prg_mode(&self) -> u8 {
        (self.control >> 2) & 0x03
    }

    fn read_prg(&self, bank: usize, offset: usize) -> u8 {
        let bank = bank % self.bank_count();
        self.prg_rom[bank * PRG_BANK_SIZE + offset]
    }

    fn write_serial(&mut self, addr: u16, value: u8) {
        if value & 0x80 != 0 {
            self.shift = 0;
            self.shift_count = 0;
            self.control |= 0x0C;
            return;
        }

        self.shift |= (value & 1) << self.shift_count;
        self.shift_count += 1;
        if self.shift_count < 5 {
            return;
        }

        let data = self.shift;
        match (addr >> 13) & 0x03 {
            0 => self.control = data,
            1 => self.chr_bank_0 = data,
            2 => self.chr_bank_1 = data,
            _ => self.prg_bank = data,
        }
        self.shift = 0;
        self.shift_count = 0;
    }

    fn chr_offset(&self, addr: u16) -> usize {
        let addr = usize::from(addr & 0x1FFF);
        if self.control & 0x10 == 0 {
            // 8 KB mode ignores the low bit.
            usize::from(self.chr_bank_0 & 0x1E) * CHR_PAGE + addr
        } else {
            let bank = if addr < CHR_PAGE {
                self.chr_bank_0
            } else {
                self.chr_bank_1
            };
            usize::from(bank) * CHR_PAGE + (addr & (CHR_PAGE - 1))
        }
    }
}

impl Mapper for Mmc1 {
    fn cpu_peek(&self, addr: u16) -> Option<u8> {
        let offset = usize::from(addr & 0x3FFF);
        let selected = usize::from(self.prg_bank & 0x0F);
        let value = match (addr, self.prg_mode()) {
            (0x6000..=0x7FFF, _) => self.prg_ram.get(addr),
            // 32 KB mode ignores the low bit.
            (0x8000..=0xBFFF, 0 | 1) => self.read_prg(selected & !1, offset),
            (0xC000..=0xFFFF, 0 | 1) => self.read_prg(selected | 1, offset),
            (0x8000..=0xBFFF, 2) => self.read_prg(0, offset),
            (0xC000..=0xFFFF, 2) => self.read_prg(selected, offset),
            (0x8000..=0xBFFF, _) => self.read_prg(selected, offset),
            (0xC000..=0xFFFF, _) => self.read_prg(self.bank_count() - 1, offset),
            _ => return None,
        };
        Some(value)
    }

    fn cpu_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x6000..=0x7FFF => self.prg_ram.set(addr, value),
            0x8000..=0xFFFF => self.write_serial(addr, value),
            _ => {}
        }
    }

    fn number(&self) -> u8 {
        1
    }
}

impl VideoMemory for Mmc1 {
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
        match self.control & 0x03 {
            0 => Mirroring::SingleScreenLower,
            1 => Mirroring::SingleScreenUpper,
            2 => Mirroring::Vertical,
            _ => Mirroring::Horizontal,
        }
    }
}
