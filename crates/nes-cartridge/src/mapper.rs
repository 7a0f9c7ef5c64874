use ricoh_ppu_2c02::VideoMemory;

use crate::CHR_BANK_SIZE;

/// Cartridge board: CPU-side address translation on top of the PPU-side
/// pattern memory.
///
/// `None` from a read means nothing on the cartridge drives the data bus
/// at that address; the bus substitutes its open-bus value.
pub trait Mapper: VideoMemory {
    /// CPU read from `$4020-$FFFF`.
    fn cpu_read(&mut self, addr: u16) -> Option<u8> {
        self.cpu_peek(addr)
    }

    /// `cpu_read` without side effects.
    fn cpu_peek(&self, addr: u16) -> Option<u8>;

    /// CPU write to `$4020-$FFFF`.
    fn cpu_write(&mut self, addr: u16, value: u8);

    /// iNES mapper number.
    fn number(&self) -> u8;
}

/// Pattern memory: CHR ROM from the image, or 8 KB of CHR RAM when the
/// image has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Chr {
    data: Vec<u8>,
    writable: bool,
}

impl Chr {
    pub(crate) fn new(rom: Vec<u8>) -> Self {
        if rom.is_empty() {
            Self {
                data: vec![0; CHR_BANK_SIZE],
                writable: true,
            }
        } else {
            Self {
                data: rom,
                writable: false,
            }
        }
    }

    /// Byte at `offset`, wrapped to the memory size.
    pub(crate) fn get(&self, offset: usize) -> u8 {
        self.data[offset % self.data.len()]
    }

    pub(crate) fn set(&mut self, offset: usize, value: u8) {
        if self.writable {
            let len = self.data.len();
            self.data[offset % len] = value;
        } else {
            log::trace!("write to CHR ROM ignored: {offset:05X} = {value:02X}");
        }
    }
}

/// 8 KB of work RAM at `$6000-$7FFF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrgRam(Box<[u8; 0x2000]>);

impl PrgRam {
    pub(crate) fn new() -> Self {
        Self(Box::new([0; 0x2000]))
    }

    pub(crate) fn get(&self, addr: u16) -> u8 {
        self.0[usize::from(addr & 0x1FFF)]
    }

    pub(crate) fn set(&mut self, addr: u16, value: u8) {
        self.0[usize::from(addr & 0x1FFF)] = value;
    }
}
