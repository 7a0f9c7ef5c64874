//! OAM and DMC DMA units.
//!
//! Each unit is a small state machine advanced one stolen CPU cycle at a
//! time. It only decides what the cycle does; the bus performs the access
//! and steps the PPU and APU, so video and audio never skip while the CPU
//! is held.

/// Where a DMA unit is in its transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Halt,
    Dummy,
    Alignment,
    Read,
    Write,
}

/// What the bus does with one stolen cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// No bus access; the chips still advance.
    Wait,
    /// Read CPU address space.
    Read(u16),
    /// Write the latched byte to `$2004`.
    WriteOam(u8),
}

/// Sprite DMA triggered by a `$4014` write: one halt cycle, one more if
/// the transfer starts on an odd cycle, then 256 read/write pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OamDma {
    phase: Phase,
    page: u8,
    offset: u16,
    latch: u8,
}

impl OamDma {
    pub fn start(&mut self, page: u8) {
        log::trace!("OAM DMA from page ${page:02X}");
        self.phase = Phase::Halt;
        self.page = page;
        self.offset = 0;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance one cycle. `odd` is the parity of the total cycle count
    /// before this cycle.
    pub fn next(&mut self, odd: bool) -> Transfer {
        match self.phase {
            Phase::Idle => Transfer::Wait,
            Phase::Halt => {
                self.phase = if odd { Phase::Alignment } else { Phase::Read };
                Transfer::Wait
            }
            Phase::Dummy | Phase::Alignment => {
                self.phase = Phase::Read;
                Transfer::Wait
            }
            Phase::Read => {
                self.phase = Phase::Write;
                Transfer::Read((u16::from(self.page) << 8) | self.offset)
            }
            Phase::Write => {
                self.offset += 1;
                self.phase = if self.offset == 0x100 {
                    Phase::Idle
                } else {
                    Phase::Read
                };
                Transfer::WriteOam(self.latch)
            }
        }
    }

    /// Hold the byte fetched by the last read cycle.
    pub fn latch(&mut self, value: u8) {
        self.latch = value;
    }
}

/// Sample fetch for the DMC: halt, dummy, an alignment cycle when the
/// dummy lands on an odd cycle, then the read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DmcDma {
    phase: Phase,
    address: u16,
}

impl DmcDma {
    pub fn start(&mut self, address: u16) {
        log::trace!("DMC DMA from ${address:04X}");
        self.phase = Phase::Halt;
        self.address = address;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub fn next(&mut self, odd: bool) -> Transfer {
        match self.phase {
            Phase::Idle => Transfer::Wait,
            Phase::Halt => {
                self.phase = Phase::Dummy;
                Transfer::Wait
            }
            Phase::Dummy => {
                self.phase = if odd { Phase::Alignment } else { Phase::Read };
                Transfer::Wait
            }
            Phase::Alignment => {
                self.phase = Phase::Read;
                Transfer::Wait
            }
            Phase::Read | Phase::Write => {
                self.phase = Phase::Idle;
                Transfer::Read(self.address)
            }
        }
    }
}
