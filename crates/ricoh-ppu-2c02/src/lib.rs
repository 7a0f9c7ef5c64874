//! Ricoh 2C02 picture processing unit.
//!
//! This crate models the parts of the PPU the CPU can observe: the dot
//! and scanline counters, the vblank flag and NMI output, the eight
//! memory-mapped registers with their shared write toggle and read
//! buffer, OAM, palette RAM and nametable mirroring. Pixels are not
//! produced.
//!
//! The cartridge supplies pattern memory and the mirroring mode through
//! [`VideoMemory`]. The bus drives the PPU through [`VideoPort`].

mod port;
mod ppu;

pub use port::{Mirroring, VideoMemory, VideoPort};
pub use ppu::{DOTS_PER_SCANLINE, Ppu, SCANLINES_PER_FRAME};
