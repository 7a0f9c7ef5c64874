//! Noise channel.

use crate::tables::NOISE_PERIOD_TABLE;
use crate::{Divider, Envelope, LengthCounter};

/// Pseudo-random noise from a 15-bit LFSR. Bit 0 of the register gates
/// the envelope output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Noise {
    pub(crate) timer: Divider,
    pub(crate) shift: u16,
    /// Short mode: feedback from bit 6 instead of bit 1.
    pub(crate) short_mode: bool,
    pub(crate) envelope: Envelope,
    pub(crate) length: LengthCounter,
}

impl Default for Noise {
    fn default() -> Self {
        Self::new()
    }
}

impl Noise {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timer: Divider::new(NOISE_PERIOD_TABLE[0] - 1),
            shift: 1,
            short_mode: false,
            envelope: Envelope::new(),
            length: LengthCounter::new(),
        }
    }

    /// Register write, `register` being the offset 0-3 within the channel.
    pub fn write(&mut self, register: u16, value: u8) {
        match register & 0x03 {
            // --LC VVVV
            0 => {
                self.length.set_halt(value & 0x20 != 0);
                self.envelope.write_control(value);
            }
            1 => {}
            // M--- PPPP
            2 => {
                self.short_mode = value & 0x80 != 0;
                self.timer
                    .set_period(NOISE_PERIOD_TABLE[usize::from(value & 0x0F)] - 1);
            }
            _ => {
                self.length.load(value >> 3);
                self.envelope.restart();
            }
        }
    }

    /// Clocked every CPU cycle; the table periods are in CPU cycles.
    pub fn tick_timer(&mut self) {
        if self.timer.tick() {
            let tap = if self.short_mode { 6 } else { 1 };
            let feedback = (self.shift ^ (self.shift >> tap)) & 1;
            self.shift = (self.shift >> 1) | (feedback << 14);
        }
    }

    pub fn quarter_frame(&mut self) {
        self.envelope.tick();
    }

    pub fn half_frame(&mut self) {
        self.length.tick();
    }

    /// Current output, 0-15.
    #[must_use]
    pub fn output(&self) -> u8 {
        if !self.length.is_active() || self.shift & 1 != 0 {
            return 0;
        }
        self.envelope.output()
    }

    #[must_use]
    pub const fn period(&self) -> u16 {
        self.timer.period() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lfsr_long_mode_sequence() {
        let mut n = Noise::new();
        n.tick_timer();
        // bit0 ^ bit1 of 0b1 is 1, shifted into bit 14.
        assert_eq!(n.shift, 0x4000);
    }

    #[test]
    fn period_register_selects_table_entry() {
        let mut n = Noise::new();
        n.write(2, 0x8F);
        assert!(n.short_mode);
        assert_eq!(n.period(), 4068);
    }

    #[test]
    fn shift_bit_zero_gates_output() {
        let mut n = Noise::new();
        n.length.set_enabled(true);
        n.write(0, 0x1F);
        n.write(3, 0x08);
        assert_eq!(n.output(), 0, "power-on register has bit 0 set");
        n.shift = 0x0002;
        assert_eq!(n.output(), 15);
    }
}
