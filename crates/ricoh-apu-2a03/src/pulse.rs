//! Pulse (square wave) channel.

use crate::sweep::{Negate, Sweep};
use crate::tables::DUTY_TABLE;
use crate::{Divider, Envelope, LengthCounter};

/// One of the two pulse channels. The timer is clocked every APU cycle
/// (every second CPU cycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub(crate) duty: u8,
    pub(crate) duty_pos: u8,
    pub(crate) timer: Divider,
    pub(crate) envelope: Envelope,
    pub(crate) length: LengthCounter,
    pub(crate) sweep: Sweep,
}

impl Pulse {
    #[must_use]
    pub const fn new(negate: Negate) -> Self {
        Self {
            duty: 0,
            duty_pos: 0,
            timer: Divider::new(0),
            envelope: Envelope::new(),
            length: LengthCounter::new(),
            sweep: Sweep::new(negate),
        }
    }

    /// Register write, `register` being the offset 0-3 within the channel.
    pub fn write(&mut self, register: u16, value: u8) {
        match register & 0x03 {
            // DDLC VVVV
            0 => {
                self.duty = value >> 6;
                self.length.set_halt(value & 0x20 != 0);
                self.envelope.write_control(value);
            }
            1 => self.sweep.write(value),
            2 => {
                let period = (self.timer.period() & 0x0700) | u16::from(value);
                self.timer.set_period(period);
            }
            // LLLL LTTT
            _ => {
                let period = (self.timer.period() & 0x00FF) | (u16::from(value & 0x07) << 8);
                self.timer.set_period(period);
                self.length.load(value >> 3);
                self.envelope.restart();
                self.duty_pos = 0;
            }
        }
    }

    pub fn tick_timer(&mut self) {
        if self.timer.tick() {
            self.duty_pos = (self.duty_pos + 1) & 0x07;
        }
    }

    pub fn quarter_frame(&mut self) {
        self.envelope.tick();
    }

    pub fn half_frame(&mut self) {
        self.length.tick();
        let mut period = self.timer.period();
        self.sweep.tick(&mut period);
        self.timer.set_period(period);
    }

    /// Current output, 0-15.
    #[must_use]
    pub fn output(&self) -> u8 {
        if !self.length.is_active()
            || self.sweep.is_muting(self.timer.period())
            || DUTY_TABLE[usize::from(self.duty)][usize::from(self.duty_pos)] == 0
        {
            return 0;
        }
        self.envelope.output()
    }

    #[must_use]
    pub const fn period(&self) -> u16 {
        self.timer.period()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_pulse() -> Pulse {
        let mut p = Pulse::new(Negate::OnesComplement);
        p.length.set_enabled(true);
        p
    }

    #[test]
    fn register_layout() {
        let mut p = enabled_pulse();
        p.write(0, 0xBF); // duty 2, halt, constant 15
        p.write(2, 0xFD);
        p.write(3, 0x09); // length index 1, period high 1
        assert_eq!(p.duty, 2);
        assert!(p.length.halt);
        assert_eq!(p.period(), 0x1FD);
        assert_eq!(p.length.value(), 254);
        assert!(p.envelope.start);
    }

    #[test]
    fn duty_sequencer_advances_on_timer_fire() {
        let mut p = enabled_pulse();
        p.write(0, 0xBF);
        p.write(2, 0x10);
        p.write(3, 0x08);
        // Output is silent at step 0 of the 50% duty and loud at step 1.
        assert_eq!(p.output(), 0);
        p.tick_timer(); // counter 0 fires
        assert_eq!(p.duty_pos, 1);
        assert_eq!(p.output(), 15);
    }

    #[test]
    fn short_period_is_muted() {
        let mut p = enabled_pulse();
        p.write(0, 0xBF);
        p.write(2, 0x05);
        p.write(3, 0x08);
        p.duty_pos = 1;
        assert_eq!(p.output(), 0);
    }
}
