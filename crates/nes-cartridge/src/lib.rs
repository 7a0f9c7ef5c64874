//! iNES cartridge parser and mapper implementations.
//!
//! Supports NROM (mapper 0), MMC1 (1), UxROM (2) and CNROM (3). A parsed
//! image becomes a boxed [`Mapper`], which serves CPU accesses to
//! `$4020-$FFFF` and, through [`VideoMemory`], the PPU's pattern tables.

mod cnrom;
mod ines;
mod mapper;
mod mmc1;
mod nrom;
mod uxrom;

pub use cnrom::CnRom;
pub use ines::{CartridgeError, Header, load};
pub use mapper::Mapper;
pub use mmc1::Mmc1;
pub use nrom::Nrom;
pub use ricoh_ppu_2c02::{Mirroring, VideoMemory};
pub use uxrom::UxRom;

/// 16 KB PRG ROM bank.
pub const PRG_BANK_SIZE: usize = 16 * 1024;
/// 8 KB CHR bank.
pub const CHR_BANK_SIZE: usize = 8 * 1024;
