//! Volume envelope shared by the pulse and noise channels.

use crate::Divider;

/// Decay envelope, clocked on quarter-frame events.
///
/// Counts a decay level down from 15 at a rate set by the divider. With
/// `looping` set the level wraps back to 15 instead of holding at 0. In
/// constant-volume mode the divider period doubles as the volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Envelope {
    pub(crate) start: bool,
    pub(crate) looping: bool,
    pub(crate) constant_volume: bool,
    pub(crate) divider: Divider,
    pub(crate) decay: u8,
}

impl Envelope {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start: false,
            looping: false,
            constant_volume: false,
            divider: Divider::new(0),
            decay: 0,
        }
    }

    /// Apply the low six bits of a channel's control register:
    /// `--LC VVVV`.
    pub fn write_control(&mut self, value: u8) {
        self.looping = value & 0x20 != 0;
        self.constant_volume = value & 0x10 != 0;
        self.divider.set_period(u16::from(value & 0x0F));
    }

    /// Flag a restart for the next quarter frame. Set by the channel's
    /// length-load register.
    pub fn restart(&mut self) {
        self.start = true;
    }

    pub fn tick(&mut self) {
        if self.start {
            self.start = false;
            self.decay = 15;
            self.divider.reload();
        } else if self.divider.tick() {
            if self.decay > 0 {
                self.decay -= 1;
            } else if self.looping {
                self.decay = 15;
            }
        }
    }

    /// Current volume, 0-15.
    #[must_use]
    pub const fn output(&self) -> u8 {
        if self.constant_volume {
            self.divider.period() as u8
        } else {
            self.decay
        }
    }

    #[must_use]
    pub const fn decay_level(&self) -> u8 {
        self.decay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(period: u8, looping: bool) -> Envelope {
        let mut env = Envelope::new();
        env.write_control(period | if looping { 0x20 } else { 0 });
        env
    }

    #[test]
    fn start_reloads_without_ticking_divider() {
        let mut env = envelope(2, false);
        env.divider.counter = 1;
        env.restart();
        env.tick();
        assert!(!env.start);
        assert_eq!(env.decay, 15);
        assert_eq!(env.divider.counter, 2);
    }

    #[test]
    fn decays_only_when_divider_fires() {
        let mut env = envelope(1, false);
        env.restart();
        env.tick();
        assert_eq!(env.divider.counter, 1);
        env.tick(); // 1 -> 0
        assert_eq!(env.decay, 15);
        env.tick(); // fires
        assert_eq!(env.decay, 14);
        env.tick();
        assert_eq!(env.decay, 14);
    }

    #[test]
    fn holds_at_zero_without_loop() {
        let mut env = envelope(0, false);
        env.restart();
        env.tick();
        for _ in 0..15 {
            env.tick();
        }
        assert_eq!(env.decay, 0);
        env.tick();
        assert_eq!(env.decay, 0);
    }

    #[test]
    fn wraps_to_fifteen_with_loop() {
        let mut env = envelope(0, true);
        env.restart();
        env.tick();
        for _ in 0..15 {
            env.tick();
        }
        assert_eq!(env.decay, 0);
        env.tick();
        assert_eq!(env.decay, 15);
    }

    #[test]
    fn constant_volume_outputs_period() {
        let mut env = envelope(9, false);
        env.write_control(0x19);
        env.restart();
        env.tick();
        assert_eq!(env.output(), 9);
    }
}
