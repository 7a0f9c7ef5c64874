//! iNES image parsing.
//!
//! ```text
//! 0-3   "NES" $1A
//! 4     PRG ROM size in 16 KB units
//! 5     CHR ROM size in 8 KB units (0: board has CHR RAM)
//! 6     mapper low nibble, four-screen, trainer, battery, mirroring
//! 7     mapper high nibble
//! ```

use ricoh_ppu_2c02::Mirroring;
use thiserror::Error;

use crate::{CHR_BANK_SIZE, CnRom, Mapper, Mmc1, Nrom, PRG_BANK_SIZE, UxRom};

const MAGIC: &[u8; 4] = b"NES\x1a";
const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;

/// Why an image could not be turned into a cartridge.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("iNES image too short: {0} bytes")]
    TooShort(usize),
    #[error("missing iNES magic")]
    BadMagic,
    #[error("{section} truncated: need {expected} bytes, image has {found}")]
    Truncated {
        section: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("mapper {0} is not supported")]
    UnsupportedMapper(u8),
    #[error("image has no PRG ROM")]
    EmptyPrg,
}

/// Decoded iNES header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub prg_banks: u8,
    pub chr_banks: u8,
    pub mapper: u8,
    pub mirroring: Mirroring,
    pub battery: bool,
    pub trainer: bool,
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_SIZE {
            return Err(CartridgeError::TooShort(data.len()));
        }
        if &data[0..4] != MAGIC {
            return Err(CartridgeError::BadMagic);
        }
        let flags6 = data[6];
        let flags7 = data[7];
        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        Ok(Self {
            prg_banks: data[4],
            chr_banks: data[5],
            mapper: (flags7 & 0xF0) | (flags6 >> 4),
            mirroring,
            battery: flags6 & 0x02 != 0,
            trainer: flags6 & 0x04 != 0,
        })
    }

    #[must_use]
    pub fn prg_size(&self) -> usize {
        usize::from(self.prg_banks) * PRG_BANK_SIZE
    }

    #[must_use]
    pub fn chr_size(&self) -> usize {
        usize::from(self.chr_banks) * CHR_BANK_SIZE
    }
}

fn section<'a>(
    data: &'a [u8],
    start: usize,
    len: usize,
    name: &'static str,
) -> Result<&'a [u8], CartridgeError> {
    data.get(start..start + len)
        .ok_or(CartridgeError::Truncated {
            section: name,
            expected: start + len,
            found: data.len(),
        })
}

/// Parse an iNES image into a mapper.
pub fn load(data: &[u8]) -> Result<Box<dyn Mapper>, CartridgeError> {
    let header = Header::parse(data)?;
    if header.prg_banks == 0 {
        return Err(CartridgeError::EmptyPrg);
    }

    let prg_start = HEADER_SIZE + if header.trainer { TRAINER_SIZE } else { 0 };
    let prg = section(data, prg_start, header.prg_size(), "PRG ROM")?.to_vec();
    let chr_start = prg_start + header.prg_size();
    let chr = section(data, chr_start, header.chr_size(), "CHR ROM")?.to_vec();

    log::debug!(
        "iNES: mapper {}, {} KB PRG, {} KB CHR{}, {:?} mirroring",
        header.mapper,
        header.prg_size() / 1024,
        header.chr_size() / 1024,
        if chr.is_empty() { " (RAM)" } else { "" },
        header.mirroring,
    );

    let mapper: Box<dyn Mapper> = match header.mapper {
        0 => Box::new(Nrom::new(prg, chr, header.mirroring)),
        1 => Box::new(Mmc1::new(prg, chr)),
        2 => Box::new(UxRom::new(prg, chr, header.mirroring)),
        3 => Box::new(CnRom::new(prg, chr, header.mirroring)),
        n => return Err(CartridgeError::UnsupportedMapper(n)),
    };
    Ok(mapper)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(prg_banks: u8, chr_banks: u8, flags6: u8) -> Vec<u8> {
        let prg = usize::from(prg_banks) * PRG_BANK_SIZE;
        let chr = usize::from(chr_banks) * CHR_BANK_SIZE;
        let mut data = vec![0; HEADER_SIZE + prg + chr];
        data[0..4].copy_from_slice(MAGIC);
        data[4] = prg_banks;
        data[5] = chr_banks;
        data[6] = flags6;
        for (i, byte) in data[HEADER_SIZE..HEADER_SIZE + prg].iter_mut().enumerate() {
            *byte = i as u8;
        }
        data
    }

    #[test]
    fn header_fields() {
        let mut data = image(2, 1, 0x13);
        data[7] = 0x40;
        let header = Header::parse(&data).expect("valid header");
        assert_eq!(header.prg_banks, 2);
        assert_eq!(header.chr_banks, 1);
        assert_eq!(header.mapper, 0x41);
        assert_eq!(header.mirroring, Mirroring::Vertical);
        assert!(header.battery);
        assert!(!header.trainer);
    }

    #[test]
    fn four_screen_overrides_mirroring_bit() {
        let header = Header::parse(&image(1, 0, 0x09)).expect("valid header");
        assert_eq!(header.mirroring, Mirroring::FourScreen);
    }

    #[test]
    fn loads_each_supported_mapper() {
        for (number, flags6) in [(0, 0x00), (1, 0x10), (2, 0x20), (3, 0x30)] {
            let mapper = load(&image(2, 1, flags6)).expect("supported mapper");
            assert_eq!(mapper.number(), number);
        }
    }

    #[test]
    fn nrom_image_maps_prg() {
        let mut mapper = load(&image(1, 1, 0x01)).expect("valid image");
        assert_eq!(mapper.cpu_read(0x8005), Some(5));
        assert_eq!(mapper.cpu_read(0xC005), Some(5));
        assert_eq!(mapper.mirroring(), Mirroring::Vertical);
    }

    #[test]
    fn trainer_is_skipped() {
        let mut data = image(1, 0, 0x04);
        data.splice(HEADER_SIZE..HEADER_SIZE, [0xEE; TRAINER_SIZE]);
        let mapper = load(&data).expect("valid image");
        assert_eq!(mapper.cpu_peek(0x8001), Some(1));
    }

    #[test]
    fn errors() {
        assert_eq!(load(&[0; 8]).err(), Some(CartridgeError::TooShort(8)));
        assert_eq!(load(&[0; 32]).err(), Some(CartridgeError::BadMagic));
        assert_eq!(load(&image(0, 0, 0)).err(), Some(CartridgeError::EmptyPrg));
        assert_eq!(
            load(&image(1, 0, 0x40)).err(),
            Some(CartridgeError::UnsupportedMapper(4))
        );

        let mut short = image(1, 1, 0);
        short.truncate(HEADER_SIZE + 100);
        assert_eq!(
            load(&short).err(),
            Some(CartridgeError::Truncated {
                section: "PRG ROM",
                expected: HEADER_SIZE + PRG_BANK_SIZE,
                found: HEADER_SIZE + 100,
            })
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CartridgeError::UnsupportedMapper(4).to_string(),
            "mapper 4 is not supported"
        );
    }
}
