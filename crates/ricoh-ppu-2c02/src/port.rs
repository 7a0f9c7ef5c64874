use emu_core::NmiLine;

/// Nametable arrangement selected by the cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// `$2000`/`$2400` share a page, as do `$2800`/`$2C00`.
    Horizontal,
    /// `$2000`/`$2800` share a page, as do `$2400`/`$2C00`.
    Vertical,
    /// Cartridge supplies the extra 2 KB.
    FourScreen,
    SingleScreenLower,
    SingleScreenUpper,
}

/// Cartridge side of the PPU bus: pattern tables at `$0000-$1FFF`.
pub trait VideoMemory {
    fn chr_read(&mut self, addr: u16) -> u8;

    /// `chr_read` without side effects.
    fn chr_peek(&self, addr: u16) -> u8;

    fn chr_write(&mut self, addr: u16, value: u8);

    fn mirroring(&self) -> Mirroring;
}

/// What the CPU bus needs from a PPU.
///
/// `addr` is any address in `$2000-$3FFF`; only the low three bits
/// select the register.
pub trait VideoPort {
    /// Advance one dot. Raises `nmi` on a rising edge of the NMI output.
    fn step(&mut self, nmi: &mut NmiLine);

    fn read_register<M: VideoMemory + ?Sized>(&mut self, addr: u16, memory: &mut M) -> u8;

    /// Value `read_register` would return, with no latch, flag or buffer
    /// touched.
    fn peek_register<M: VideoMemory + ?Sized>(&self, addr: u16, memory: &M) -> u8;

    fn write_register<M: VideoMemory + ?Sized>(
        &mut self,
        addr: u16,
        value: u8,
        memory: &mut M,
        nmi: &mut NmiLine,
    );

    /// Frames completed since power-on.
    fn frame_count(&self) -> u64;
}
