//! Reloadable down-counter.

/// Counts down to zero, then reloads from `period` and fires.
///
/// A divider with period `n` fires once every `n + 1` ticks. Channel
/// timers, the envelope and the sweep unit are all built on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Divider {
    pub(crate) counter: u16,
    pub(crate) period: u16,
}

impl Divider {
    #[must_use]
    pub const fn new(period: u16) -> Self {
        Self { counter: 0, period }
    }

    /// Advance one step. Returns true when the counter was at zero and has
    /// been reloaded.
    pub fn tick(&mut self) -> bool {
        if self.counter == 0 {
            self.counter = self.period;
            true
        } else {
            self.counter -= 1;
            false
        }
    }

    /// Restart the count from `period` without firing.
    pub fn reload(&mut self) {
        self.counter = self.period;
    }

    /// Change the period. The running count is untouched.
    pub fn set_period(&mut self, period: u16) {
        self.period = period;
    }

    #[must_use]
    pub const fn period(&self) -> u16 {
        self.period
    }

    #[must_use]
    pub const fn counter(&self) -> u16 {
        self.counter
    }
}
