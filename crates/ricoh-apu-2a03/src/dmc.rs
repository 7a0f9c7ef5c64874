//! Delta modulation channel.
//!
//! The DMC plays 1-bit delta samples out of cartridge space. It cannot
//! read memory on its own: when its one-byte sample buffer is empty and
//! bytes remain, it raises a DMA request and the bus steals CPU cycles to
//! fetch the byte for it.

use emu_core::{IrqLine, IrqSource};

use crate::Divider;
use crate::tables::DMC_RATE_TABLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dmc {
    pub(crate) irq_enabled: bool,
    pub(crate) looping: bool,
    pub(crate) timer: Divider,
    /// 7-bit DAC level.
    pub(crate) output_level: u8,
    pub(crate) sample_address: u16,
    pub(crate) sample_length: u16,
    pub(crate) current_address: u16,
    pub(crate) bytes_remaining: u16,
    pub(crate) sample_buffer: Option<u8>,
    pub(crate) shift: u8,
    pub(crate) bits_remaining: u8,
    pub(crate) silence: bool,
}

impl Default for Dmc {
    fn default() -> Self {
        Self::new()
    }
}

impl Dmc {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            irq_enabled: false,
            looping: false,
            timer: Divider::new(DMC_RATE_TABLE[0] - 1),
            output_level: 0,
            sample_address: 0xC000,
            sample_length: 1,
            current_address: 0xC000,
            bytes_remaining: 0,
            sample_buffer: None,
            shift: 0,
            bits_remaining: 8,
            silence: true,
        }
    }

    /// Register write, `register` being the offset 0-3 within the channel.
    pub fn write(&mut self, register: u16, value: u8, irq: &mut IrqLine) {
        match register & 0x03 {
            // IL-- RRRR
            0 => {
                self.irq_enabled = value & 0x80 != 0;
                self.looping = value & 0x40 != 0;
                self.timer
                    .set_period(DMC_RATE_TABLE[usize::from(value & 0x0F)] - 1);
                if !self.irq_enabled {
                    irq.set_high(IrqSource::Dmc);
                }
            }
            1 => self.output_level = value & 0x7F,
            2 => self.sample_address = 0xC000 | (u16::from(value) << 6),
            _ => self.sample_length = (u16::from(value) << 4) | 1,
        }
    }

    /// Bit 4 of a `$4015` write. Always acknowledges the DMC interrupt.
    pub fn set_enabled(&mut self, enabled: bool, irq: &mut IrqLine) {
        irq.set_high(IrqSource::Dmc);
        if !enabled {
            self.bytes_remaining = 0;
        } else if self.bytes_remaining == 0 {
            self.restart();
        }
    }

    fn restart(&mut self) {
        self.current_address = self.sample_address;
        self.bytes_remaining = self.sample_length;
    }

    /// Clocked every CPU cycle; the rate table is in CPU cycles.
    pub fn tick_timer(&mut self) {
        if self.timer.tick() {
            self.clock_output();
        }
    }

    fn clock_output(&mut self) {
        if !self.silence {
            if self.shift & 1 != 0 {
                if self.output_level <= 125 {
                    self.output_level += 2;
                }
            } else if self.output_level >= 2 {
                self.output_level -= 2;
            }
        }
        self.shift >>= 1;

        self.bits_remaining -= 1;
        if self.bits_remaining == 0 {
            self.bits_remaining = 8;
            match self.sample_buffer.take() {
                Some(byte) => {
                    self.silence = false;
                    self.shift = byte;
                }
                None => self.silence = true,
            }
        }
    }

    /// Address the DMC wants fetched, if its buffer is empty and the
    /// sample has bytes left.
    #[must_use]
    pub const fn dma_request(&self) -> Option<u16> {
        if self.sample_buffer.is_none() && self.bytes_remaining > 0 {
            Some(self.current_address)
        } else {
            None
        }
    }

    /// Deliver a DMA-fetched byte and advance the sample.
    ///
    /// # Panics
    ///
    /// If no bytes remain. The bus only fetches in response to
    /// `dma_request`, so this is a sequencing bug.
    pub fn fill_sample_buffer(&mut self, byte: u8, irq: &mut IrqLine) {
        assert!(
            self.bytes_remaining > 0,
            "DMC sample fetch with no bytes remaining"
        );
        self.sample_buffer = Some(byte);
        self.current_address = match self.current_address {
            0xFFFF => 0x8000,
            addr => addr + 1,
        };
        self.bytes_remaining -= 1;
        if self.bytes_remaining == 0 {
            if self.looping {
                self.restart();
            } else if self.irq_enabled {
                irq.set_low(IrqSource::Dmc);
            }
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.bytes_remaining > 0
    }

    #[must_use]
    pub const fn bytes_remaining(&self) -> u16 {
        self.bytes_remaining
    }

    #[must_use]
    pub const fn current_address(&self) -> u16 {
        self.current_address
    }

    /// Current DAC level, 0-127.
    #[must_use]
    pub const fn output(&self) -> u8 {
        self.output_level
    }
}
