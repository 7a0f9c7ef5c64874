//! Pulse channel sweep unit.

use crate::Divider;

/// How the sweep negates its change amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negate {
    /// Pulse 1 subtracts one extra (`-c - 1`).
    OnesComplement,
    /// Pulse 2 subtracts exactly the change amount (`-c`).
    TwosComplement,
}

/// Periodically retunes a pulse channel's timer period, clocked on
/// half-frame events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    pub(crate) enabled: bool,
    pub(crate) negate: bool,
    pub(crate) shift: u8,
    pub(crate) reload: bool,
    pub(crate) divider: Divider,
    negate_mode: Negate,
}

impl Sweep {
    #[must_use]
    pub const fn new(negate_mode: Negate) -> Self {
        Self {
            enabled: false,
            negate: false,
            shift: 0,
            reload: false,
            divider: Divider::new(0),
            negate_mode,
        }
    }

    /// `$4001`/`$4005`: `EPPP NSSS`.
    pub fn write(&mut self, value: u8) {
        self.enabled = value & 0x80 != 0;
        self.divider.set_period(u16::from((value >> 4) & 0x07));
        self.negate = value & 0x08 != 0;
        self.shift = value & 0x07;
        self.reload = true;
    }

    /// Period the sweep would move the channel to.
    #[must_use]
    pub fn target_period(&self, period: u16) -> u16 {
        let change = period >> self.shift;
        if !self.negate {
            return period.wrapping_add(change);
        }
        match self.negate_mode {
            Negate::OnesComplement => period.wrapping_sub(change).wrapping_sub(1),
            Negate::TwosComplement => period.wrapping_sub(change),
        }
    }

    /// The channel is silenced when its period is too short or the target
    /// overflows 11 bits, whether or not the sweep is enabled.
    #[must_use]
    pub fn is_muting(&self, period: u16) -> bool {
        period < 8 || self.target_period(period) > 0x7FF
    }

    /// Half-frame clock. Updates `period` in place when the divider fires.
    pub fn tick(&mut self, period: &mut u16) {
        if self.divider.tick() && self.enabled && self.shift > 0 && !self.is_muting(*period) {
            *period = self.target_period(*period);
        }
        if self.reload {
            self.divider.reload();
            self.reload = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negate_modes_differ_by_one() {
        let mut p1 = Sweep::new(Negate::OnesComplement);
        let mut p2 = Sweep::new(Negate::TwosComplement);
        p1.write(0x89); // enabled, negate, shift 1
        p2.write(0x89);
        assert_eq!(p1.target_period(0x100), 0x7F);
        assert_eq!(p2.target_period(0x100), 0x80);
    }

    #[test]
    fn mutes_short_or_overflowing_periods() {
        let mut sweep = Sweep::new(Negate::TwosComplement);
        assert!(sweep.is_muting(7));
        sweep.write(0x01); // add, shift 1
        assert!(sweep.is_muting(0x600));
        assert!(!sweep.is_muting(0x400));
    }

    #[test]
    fn updates_period_when_divider_fires() {
        let mut sweep = Sweep::new(Negate::TwosComplement);
        sweep.write(0x91); // enabled, period 1, shift 1
        let mut period = 0x100;
        sweep.tick(&mut period); // counter 0 fires, then reload to 1
        assert_eq!(period, 0x180);
        sweep.tick(&mut period); // 1 -> 0
        assert_eq!(period, 0x180);
        sweep.tick(&mut period); // fires
        assert_eq!(period, 0x240);
    }

    #[test]
    fn disabled_sweep_leaves_period() {
        let mut sweep = Sweep::new(Negate::OnesComplement);
        sweep.write(0x01);
        let mut period = 0x100;
        sweep.tick(&mut period);
        assert_eq!(period, 0x100);
    }
}
