//! Length counter: silences a channel after a programmed duration.

use crate::tables::LENGTH_TABLE;

/// Counts down once per half frame. A channel produces sound only while
/// its length counter is nonzero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthCounter {
    pub(crate) enabled: bool,
    pub(crate) halt: bool,
    pub(crate) value: u8,
}

impl LengthCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: false,
            halt: false,
            value: 0,
        }
    }

    /// Channel enable from `$4015`. Disabling zeroes the count at once.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.value = 0;
        }
    }

    pub fn set_halt(&mut self, halt: bool) {
        self.halt = halt;
    }

    /// Load from the length table by 5-bit index. Ignored while disabled.
    pub fn load(&mut self, index: u8) {
        if self.enabled {
            self.value = LENGTH_TABLE[usize::from(index & 0x1F)];
        }
    }

    pub fn tick(&mut self) {
        if self.value > 0 && !self.halt {
            self.value -= 1;
        }
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.value > 0
    }
}
