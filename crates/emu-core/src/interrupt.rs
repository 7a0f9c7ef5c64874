//! Interrupt lines.
//!
//! IRQ is level-sensitive and wired-OR: any source holding it low keeps
//! it asserted. NMI is edge-triggered; the CPU sees each edge once.

/// A device that can pull the IRQ line low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqSource {
    /// APU frame sequencer.
    FrameCounter,
    /// APU delta modulation channel.
    Dmc,
}

impl IrqSource {
    const fn bit(self) -> u8 {
        match self {
            Self::FrameCounter => 0x01,
            Self::Dmc => 0x02,
        }
    }
}

/// Wired-OR IRQ line, one bit per source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IrqLine {
    mask: u8,
}

impl IrqLine {
    #[must_use]
    pub const fn new() -> Self {
        Self { mask: 0 }
    }

    /// Pull the line low on behalf of `source`.
    pub fn set_low(&mut self, source: IrqSource) {
        self.mask |= source.bit();
    }

    /// Release the line on behalf of `source`.
    pub fn set_high(&mut self, source: IrqSource) {
        self.mask &= !source.bit();
    }

    /// Drive `source` to the given level (`true` = asserted).
    pub fn set(&mut self, source: IrqSource, asserted: bool) {
        if asserted {
            self.set_low(source);
        } else {
            self.set_high(source);
        }
    }

    /// True while any source holds the line low.
    #[must_use]
    pub const fn is_low(&self) -> bool {
        self.mask != 0
    }

    /// True while `source` specifically holds the line low.
    #[must_use]
    pub const fn is_held_by(&self, source: IrqSource) -> bool {
        self.mask & source.bit() != 0
    }

    #[must_use]
    pub const fn mask(&self) -> u8 {
        self.mask
    }
}

/// Edge-triggered NMI input.
///
/// An edge raised by a register write lands mid-instruction, after the
/// CPU has already sampled the line for its next boundary, so it is held
/// back for one extra poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NmiLine {
    edge: bool,
    delay: bool,
}

impl NmiLine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            edge: false,
            delay: false,
        }
    }

    /// Latch an edge visible at the next instruction boundary.
    pub fn assert(&mut self) {
        self.edge = true;
    }

    /// Latch an edge visible one instruction boundary later than usual.
    pub fn assert_delayed(&mut self) {
        self.edge = true;
        self.delay = true;
    }

    /// Drop a latched edge that has not been serviced yet.
    pub fn deassert(&mut self) {
        self.edge = false;
        self.delay = false;
    }

    /// Sample at an instruction boundary. Returns true exactly once per
    /// edge, consuming it.
    pub fn poll(&mut self) -> bool {
        if !self.edge {
            return false;
        }
        if self.delay {
            self.delay = false;
            return false;
        }
        self.edge = false;
        true
    }

    /// True if an edge is latched (delayed or not).
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.edge
    }
}
