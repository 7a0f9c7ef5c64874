//! Triangle channel.

use crate::tables::TRIANGLE_TABLE;
use crate::{Divider, LengthCounter};

/// Triangle wave channel. The timer is clocked every CPU cycle, and the
/// sequencer only moves while both the length and linear counters are
/// nonzero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triangle {
    pub(crate) timer: Divider,
    pub(crate) step: u8,
    pub(crate) length: LengthCounter,
    pub(crate) linear: u8,
    pub(crate) linear_reload_value: u8,
    pub(crate) linear_reload: bool,
    pub(crate) control: bool,
}

impl Triangle {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timer: Divider::new(0),
            step: 0,
            length: LengthCounter::new(),
            linear: 0,
            linear_reload_value: 0,
            linear_reload: false,
            control: false,
        }
    }

    /// Register write, `register` being the offset 0-3 within the channel.
    pub fn write(&mut self, register: u16, value: u8) {
        match register & 0x03 {
            // CRRR RRRR
            0 => {
                self.control = value & 0x80 != 0;
                self.length.set_halt(self.control);
                self.linear_reload_value = value & 0x7F;
            }
            1 => {}
            2 => {
                let period = (self.timer.period() & 0x0700) | u16::from(value);
                self.timer.set_period(period);
            }
            _ => {
                let period = (self.timer.period() & 0x00FF) | (u16::from(value & 0x07) << 8);
                self.timer.set_period(period);
                self.length.load(value >> 3);
                self.linear_reload = true;
            }
        }
    }

    pub fn tick_timer(&mut self) {
        if self.timer.tick() && self.length.is_active() && self.linear > 0 {
            self.step = (self.step + 1) & 0x1F;
        }
    }

    /// Quarter frame: the linear counter.
    pub fn quarter_frame(&mut self) {
        if self.linear_reload {
            self.linear = self.linear_reload_value;
        } else if self.linear > 0 {
            self.linear -= 1;
        }
        if !self.control {
            self.linear_reload = false;
        }
    }

    pub fn half_frame(&mut self) {
        self.length.tick();
    }

    /// Current output, 0-15. Ultrasonic periods are silenced.
    #[must_use]
    pub fn output(&self) -> u8 {
        if !self.length.is_active() || self.linear == 0 || self.timer.period() < 2 {
            return 0;
        }
        TRIANGLE_TABLE[usize::from(self.step)]
    }
}
