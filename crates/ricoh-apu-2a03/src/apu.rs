//! The APU register file and per-cycle stepping.
//!
//! The APU is stepped once per CPU cycle by the bus. Pulse timers run at
//! half that rate (one APU cycle per two CPU cycles); the triangle, noise
//! and DMC timers run at the full CPU rate. The frame sequencer hands out
//! quarter- and half-frame clocks to every channel's envelope, length
//! counter, linear counter and sweep unit.
//!
//! Interrupts are not stored here. The frame sequencer and DMC drive
//! their sources on the shared [`IrqLine`], which the bus owns.

use emu_core::{Clock, IrqLine, IrqSource, Observable, Value};

use crate::frame_sequencer::{FrameMode, FrameSequencer};
use crate::sweep::Negate;
use crate::tables::{PULSE_MIX, TND_MIX};
use crate::{Dmc, Noise, Pulse, Triangle};

/// Ricoh 2A03 audio unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apu {
    pulse1: Pulse,
    pulse2: Pulse,
    triangle: Triangle,
    noise: Noise,
    dmc: Dmc,
    frame: FrameSequencer,
    /// Set on CPU cycles where the pulse timers are clocked.
    odd_cycle: bool,
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}

impl Apu {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pulse1: Pulse::new(Negate::OnesComplement),
            pulse2: Pulse::new(Negate::TwosComplement),
            triangle: Triangle::new(),
            noise: Noise::new(),
            dmc: Dmc::new(),
            frame: FrameSequencer::new(),
            odd_cycle: false,
        }
    }

    /// Write `$4000-$4013`, `$4015` or `$4017`. Other addresses are
    /// ignored. `clock` gives the cycle parity the `$4017` delay needs.
    pub fn write(&mut self, addr: u16, value: u8, clock: &Clock, irq: &mut IrqLine) {
        match addr {
            0x4000..=0x4003 => self.pulse1.write(addr - 0x4000, value),
            0x4004..=0x4007 => self.pulse2.write(addr - 0x4004, value),
            0x4008..=0x400B => self.triangle.write(addr - 0x4008, value),
            0x400C..=0x400F => self.noise.write(addr - 0x400C, value),
            0x4010..=0x4013 => self.dmc.write(addr - 0x4010, value, irq),
            0x4015 => {
                self.pulse1.length.set_enabled(value & 0x01 != 0);
                self.pulse2.length.set_enabled(value & 0x02 != 0);
                self.triangle.length.set_enabled(value & 0x04 != 0);
                self.noise.length.set_enabled(value & 0x08 != 0);
                self.dmc.set_enabled(value & 0x10 != 0, irq);
            }
            0x4017 => self.frame.write(value, clock, irq),
            _ => {}
        }
    }

    /// Read `$4015`, acknowledging the frame interrupt.
    pub fn read_status(&mut self, irq: &mut IrqLine) -> u8 {
        let status = self.peek_status(irq);
        self.frame.acknowledge(irq);
        status
    }

    /// `$4015` without the acknowledge.
    ///
    /// ```text
    /// 7  DMC interrupt
    /// 6  frame interrupt
    /// 4  DMC bytes remaining
    /// 3-0  length counters: noise, triangle, pulse 2, pulse 1
    /// ```
    #[must_use]
    pub fn peek_status(&self, irq: &IrqLine) -> u8 {
        let mut status = 0;
        status |= u8::from(self.pulse1.length.is_active());
        status |= u8::from(self.pulse2.length.is_active()) << 1;
        status |= u8::from(self.triangle.length.is_active()) << 2;
        status |= u8::from(self.noise.length.is_active()) << 3;
        status |= u8::from(self.dmc.is_active()) << 4;
        status |= u8::from(self.frame.irq_flag()) << 6;
        status |= u8::from(irq.is_held_by(IrqSource::Dmc)) << 7;
        status
    }

    /// Advance one CPU cycle.
    pub fn step(&mut self, irq: &mut IrqLine) {
        if self.odd_cycle {
            self.pulse1.tick_timer();
            self.pulse2.tick_timer();
        }
        self.odd_cycle = !self.odd_cycle;
        self.triangle.tick_timer();
        self.noise.tick_timer();
        self.dmc.tick_timer();

        let events = self.frame.tick(irq);
        if events.quarter {
            self.pulse1.quarter_frame();
            self.pulse2.quarter_frame();
            self.triangle.quarter_frame();
            self.noise.quarter_frame();
        }
        if events.half {
            self.pulse1.half_frame();
            self.pulse2.half_frame();
            self.triangle.half_frame();
            self.noise.half_frame();
        }
    }

    /// Address the DMC wants fetched, if any.
    #[must_use]
    pub const fn dmc_request(&self) -> Option<u16> {
        self.dmc.dma_request()
    }

    /// Hand the DMC the byte its DMA fetched.
    pub fn fill_dmc_buffer(&mut self, byte: u8, irq: &mut IrqLine) {
        self.dmc.fill_sample_buffer(byte, irq);
    }

    /// Mixed output level, 0.0 to about 1.0.
    #[must_use]
    pub fn output(&self) -> f32 {
        let pulse = usize::from(self.pulse1.output() + self.pulse2.output());
        let tnd = 3 * usize::from(self.triangle.output())
            + 2 * usize::from(self.noise.output())
            + usize::from(self.dmc.output());
        PULSE_MIX[pulse] + TND_MIX[tnd]
    }

    #[must_use]
    pub const fn frame_sequencer(&self) -> &FrameSequencer {
        &self.frame
    }

    #[must_use]
    pub const fn dmc(&self) -> &Dmc {
        &self.dmc
    }
}

const QUERY_PATHS: &[&str] = &[
    "pulse1.period",
    "pulse1.length",
    "pulse1.envelope",
    "pulse1.duty",
    "pulse2.period",
    "pulse2.length",
    "pulse2.envelope",
    "pulse2.duty",
    "triangle.period",
    "triangle.length",
    "triangle.linear",
    "noise.period",
    "noise.length",
    "noise.envelope",
    "dmc.bytes_remaining",
    "dmc.address",
    "dmc.output",
    "frame.step",
    "frame.mode",
    "frame.irq",
    "frame.inhibit",
];

impl Observable for Apu {
    fn query(&self, path: &str) -> Option<Value> {
        let value = match path {
            "pulse1.period" => self.pulse1.period().into(),
            "pulse1.length" => self.pulse1.length.value().into(),
            "pulse1.envelope" => self.pulse1.envelope.output().into(),
            "pulse1.duty" => self.pulse1.duty.into(),
            "pulse2.period" => self.pulse2.period().into(),
            "pulse2.length" => self.pulse2.length.value().into(),
            "pulse2.envelope" => self.pulse2.envelope.output().into(),
            "pulse2.duty" => self.pulse2.duty.into(),
            "triangle.period" => self.triangle.timer.period().into(),
            "triangle.length" => self.triangle.length.value().into(),
            "triangle.linear" => self.triangle.linear.into(),
            "noise.period" => self.noise.period().into(),
            "noise.length" => self.noise.length.value().into(),
            "noise.envelope" => self.noise.envelope.output().into(),
            "dmc.bytes_remaining" => self.dmc.bytes_remaining().into(),
            "dmc.address" => self.dmc.current_address().into(),
            "dmc.output" => self.dmc.output().into(),
            "frame.step" => self.frame.step().into(),
            "frame.mode" => match self.frame.mode() {
                FrameMode::FourStep => 4u8.into(),
                FrameMode::FiveStep => 5u8.into(),
            },
            "frame.irq" => self.frame.irq_flag().into(),
            "frame.inhibit" => self.frame.inhibited().into(),
            _ => return None,
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rig {
        apu: Apu,
        clock: Clock,
        irq: IrqLine,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                apu: Apu::new(),
                clock: Clock::new(),
                irq: IrqLine::new(),
            }
        }

        fn write(&mut self, addr: u16, value: u8) {
            self.apu.write(addr, value, &self.clock, &mut self.irq);
        }

        fn run(&mut self, cycles: u32) {
            for _ in 0..cycles {
                self.apu.step(&mut self.irq);
                self.clock.advance();
            }
        }

        fn status(&mut self) -> u8 {
            self.apu.read_status(&mut self.irq)
        }
    }

    #[test]
    fn silent_at_power_on() {
        let mut rig = Rig::new();
        rig.run(1000);
        assert!(rig.apu.output().abs() < f32::EPSILON);
    }

    #[test]
    fn pulse_toggles_output() {
        let mut rig = Rig::new();
        rig.write(0x4015, 0x01);
        rig.write(0x4000, 0xBF); // 50% duty, constant volume 15
        rig.write(0x4002, 0xFD);
        rig.write(0x4003, 0x08);

        let mut levels = Vec::new();
        for _ in 0..5000 {
            rig.run(1);
            levels.push(rig.apu.output());
        }
        let min = levels.iter().copied().fold(f32::INFINITY, f32::min);
        let max = levels.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(min.abs() < f32::EPSILON);
        assert!((max - PULSE_MIX[15]).abs() < 1e-6);
    }

    #[test]
    fn triangle_waits_for_linear_counter() {
        let mut rig = Rig::new();
        rig.write(0x4015, 0x04);
        rig.write(0x4008, 0xFF);
        rig.write(0x400A, 0xFD);
        rig.write(0x400B, 0x08);
        rig.run(100);
        assert_eq!(rig.apu.query("triangle.linear"), Some(Value::U8(0)));
        rig.run(7457);
        assert_eq!(rig.apu.query("triangle.linear"), Some(Value::U8(0x7F)));
    }

    #[test]
    fn status_reflects_length_counters() {
        let mut rig = Rig::new();
        rig.write(0x4015, 0x05);
        rig.write(0x4003, 0x08);
        rig.write(0x4008, 0xFF);
        rig.write(0x400B, 0x08);
        rig.write(0x4007, 0x08); // pulse 2 disabled: not loaded
        assert_eq!(rig.status() & 0x0F, 0x05);
    }

    #[test]
    fn disabling_channel_clears_length() {
        let mut rig = Rig::new();
        rig.write(0x4015, 0x01);
        rig.write(0x4003, 0x08);
        assert_eq!(rig.status() & 0x01, 0x01);
        rig.write(0x4015, 0x00);
        assert_eq!(rig.status() & 0x01, 0x00);
    }

    #[test]
    fn length_counter_runs_down_on_half_frames() {
        let mut rig = Rig::new();
        rig.write(0x4015, 0x01);
        rig.write(0x4003, 0x18); // index 3: length 2
        assert_eq!(rig.apu.query("pulse1.length"), Some(Value::U8(2)));
        rig.run(14914);
        assert_eq!(rig.apu.query("pulse1.length"), Some(Value::U8(1)));
        rig.run(29830 - 14914 + 1);
        assert_eq!(rig.apu.query("pulse1.length"), Some(Value::U8(0)));
        assert_eq!(rig.status() & 0x01, 0);
    }

    #[test]
    fn frame_interrupt_and_acknowledge() {
        let mut rig = Rig::new();
        rig.run(29830);
        assert!(rig.irq.is_held_by(IrqSource::FrameCounter));
        assert_eq!(rig.apu.peek_status(&rig.irq) & 0x40, 0x40);
        assert_eq!(rig.apu.peek_status(&rig.irq) & 0x40, 0x40, "peek is pure");
        assert_eq!(rig.status() & 0x40, 0x40);
        assert_eq!(rig.status() & 0x40, 0x00);
        assert!(!rig.irq.is_low());
    }

    #[test]
    fn five_step_mode_never_interrupts() {
        let mut rig = Rig::new();
        rig.write(0x4017, 0x80);
        rig.run(80_000);
        assert!(!rig.irq.is_low());
        assert_eq!(rig.apu.query("frame.mode"), Some(Value::U8(5)));
    }

    #[test]
    fn inhibit_write_releases_line() {
        let mut rig = Rig::new();
        rig.run(29830);
        assert!(rig.irq.is_low());
        rig.write(0x4017, 0x40);
        assert!(!rig.irq.is_low());
        assert_eq!(rig.status() & 0x40, 0);
    }

    #[test]
    fn dmc_status_and_interrupt() {
        let mut rig = Rig::new();
        rig.write(0x4010, 0x80); // IRQ enabled, no loop
        rig.write(0x4012, 0x00);
        rig.write(0x4013, 0x00); // one byte
        rig.write(0x4015, 0x10);
        assert_eq!(rig.status() & 0x10, 0x10);
        assert_eq!(rig.apu.dmc_request(), Some(0xC000));

        rig.apu.fill_dmc_buffer(0x00, &mut rig.irq);
        assert_eq!(rig.apu.dmc_request(), None);
        let status = rig.status();
        assert_eq!(status & 0x10, 0);
        assert_eq!(status & 0x80, 0x80);

        // Any $4015 write acknowledges the DMC interrupt.
        rig.write(0x4015, 0x00);
        assert_eq!(rig.status() & 0x80, 0);
        assert!(!rig.irq.is_low());
    }

    #[test]
    fn dmc_direct_load_reaches_mixer() {
        let mut rig = Rig::new();
        rig.write(0x4011, 0x40);
        assert_eq!(rig.apu.query("dmc.output"), Some(Value::U8(0x40)));
        assert!((rig.apu.output() - TND_MIX[0x40]).abs() < 1e-6);
    }

    #[test]
    fn unknown_path_is_none() {
        let apu = Apu::new();
        assert_eq!(apu.query("pulse3.period"), None);
        for path in apu.query_paths() {
            assert!(apu.query(path).is_some(), "{path}");
        }
    }
}
