//! The machine clock.

use crate::Ticks;

/// CPU-cycle clock shared by everything on the bus.
///
/// `cycles` counts cycles in which the CPU owned the bus. `stall` counts
/// cycles stolen by DMA. Both advance the other chips identically; the
/// split exists so instruction timing can be checked against `cycles`
/// alone while parity-sensitive logic looks at `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clock {
    cycles: Ticks,
    stall: Ticks,
}

impl Clock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cycles: Ticks::ZERO,
            stall: Ticks::ZERO,
        }
    }

    /// Advance by one CPU-owned cycle.
    pub fn advance(&mut self) {
        self.cycles += 1;
    }

    /// Advance by one DMA-stolen cycle.
    pub fn stall_cycle(&mut self) {
        self.stall += 1;
    }

    #[must_use]
    pub const fn cycles(&self) -> Ticks {
        self.cycles
    }

    #[must_use]
    pub const fn stall(&self) -> Ticks {
        self.stall
    }

    /// Total elapsed cycles: CPU-owned plus stolen.
    #[must_use]
    pub const fn total(&self) -> Ticks {
        Ticks(self.cycles.0 + self.stall.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stall_counts_toward_total_only() {
        let mut clock = Clock::new();
        clock.advance();
        clock.stall_cycle();
        clock.stall_cycle();
        assert_eq!(clock.cycles(), Ticks(1));
        assert_eq!(clock.stall(), Ticks(2));
        assert_eq!(clock.total(), Ticks(3));
        assert!(clock.total().is_odd());
    }
}
