//! Frame sequencer (the `$4017` frame counter).
//!
//! Counts CPU cycles and fires quarter-frame and half-frame clocks at
//! fixed offsets, plus the frame interrupt in 4-step mode. Writes to
//! `$4017` take effect 2 or 3 cycles later depending on which half of
//! the APU cycle they land in; power-on is modelled as a write of `$00`
//! that lands on the first tick.

use emu_core::{Clock, IrqLine, IrqSource};

/// Sequencer mode, from bit 7 of `$4017`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    FourStep,
    FiveStep,
}

/// Clocks the channels should receive this cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// Envelopes and the triangle linear counter.
    pub quarter: bool,
    /// Length counters and sweep units.
    pub half: bool,
}

impl FrameEvents {
    const NONE: Self = Self {
        quarter: false,
        half: false,
    };
    const QUARTER: Self = Self {
        quarter: true,
        half: false,
    };
    const BOTH: Self = Self {
        quarter: true,
        half: true,
    };
}

/// Step at which each mode wraps back to zero.
const FOUR_STEP_PERIOD: u32 = 29830;
const FIVE_STEP_PERIOD: u32 = 37282;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingWrite {
    value: u8,
    delay: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSequencer {
    step: u32,
    mode: FrameMode,
    inhibit: bool,
    flag: bool,
    pending: Option<PendingWrite>,
}

impl Default for FrameSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSequencer {
    /// Power-on state: 4-step mode, interrupt enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_mode(FrameMode::FourStep)
    }

    #[must_use]
    pub const fn with_mode(mode: FrameMode) -> Self {
        let value = match mode {
            FrameMode::FourStep => 0x00,
            FrameMode::FiveStep => 0x80,
        };
        Self {
            step: 0,
            mode,
            inhibit: false,
            flag: false,
            pending: Some(PendingWrite { value, delay: 1 }),
        }
    }

    /// `$4017` write.
    pub fn write(&mut self, value: u8, clock: &Clock, irq: &mut IrqLine) {
        let delay = if clock.total().is_odd() { 3 } else { 2 };
        self.pending = Some(PendingWrite { value, delay });
        self.inhibit = value & 0x40 != 0;
        if self.inhibit {
            self.flag = false;
            irq.set_high(IrqSource::FrameCounter);
        }
    }

    /// Advance one CPU cycle.
    pub fn tick(&mut self, irq: &mut IrqLine) -> FrameEvents {
        self.step += 1;

        let mut events = FrameEvents::NONE;
        if let Some(pending) = self.pending.as_mut() {
            pending.delay -= 1;
            if pending.delay == 0 {
                let value = pending.value;
                self.pending = None;
                self.step = 0;
                self.mode = if value & 0x80 != 0 {
                    FrameMode::FiveStep
                } else {
                    FrameMode::FourStep
                };
                log::debug!("frame counter: {:?}", self.mode);
                if self.mode == FrameMode::FiveStep {
                    events = FrameEvents::BOTH;
                }
            }
        }

        let scheduled = match self.mode {
            FrameMode::FourStep => self.four_step(irq),
            FrameMode::FiveStep => self.five_step(),
        };
        FrameEvents {
            quarter: events.quarter || scheduled.quarter,
            half: events.half || scheduled.half,
        }
    }

    fn four_step(&mut self, irq: &mut IrqLine) -> FrameEvents {
        match self.step {
            7457 | 22371 => FrameEvents::QUARTER,
            14913 => FrameEvents::BOTH,
            29828 => {
                self.raise_irq(irq);
                FrameEvents::NONE
            }
            29829 => {
                self.raise_irq(irq);
                FrameEvents::BOTH
            }
            FOUR_STEP_PERIOD => {
                self.raise_irq(irq);
                self.step = 0;
                FrameEvents::NONE
            }
            _ => FrameEvents::NONE,
        }
    }

    fn five_step(&mut self) -> FrameEvents {
        match self.step {
            7457 | 22371 => FrameEvents::QUARTER,
            14913 | 37281 => FrameEvents::BOTH,
            FIVE_STEP_PERIOD => {
                self.step = 0;
                FrameEvents::NONE
            }
            _ => FrameEvents::NONE,
        }
    }

    fn raise_irq(&mut self, irq: &mut IrqLine) {
        if !self.inhibit {
            self.flag = true;
            irq.set_low(IrqSource::FrameCounter);
        }
    }

    /// Clear the frame interrupt flag, as a `$4015` read does.
    pub fn acknowledge(&mut self, irq: &mut IrqLine) {
        self.flag = false;
        irq.set_high(IrqSource::FrameCounter);
    }

    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }

    #[must_use]
    pub const fn mode(&self) -> FrameMode {
        self.mode
    }

    #[must_use]
    pub const fn irq_flag(&self) -> bool {
        self.flag
    }

    #[must_use]
    pub const fn inhibited(&self) -> bool {
        self.inhibit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(seq: &mut FrameSequencer, irq: &mut IrqLine, ticks: u32) -> (u32, u32) {
        let (mut quarters, mut halves) = (0, 0);
        for _ in 0..ticks {
            let events = seq.tick(irq);
            quarters += u32::from(events.quarter);
            halves += u32::from(events.half);
        }
        (quarters, halves)
    }

    #[test]
    fn four_step_periodicity() {
        for (ticks, want) in [(29830, 29829), (29831, 0)] {
            let mut seq = FrameSequencer::new();
            let mut irq = IrqLine::new();
            run(&mut seq, &mut irq, ticks);
            assert_eq!(seq.step(), want, "after {ticks} ticks");
        }
    }

    #[test]
    fn five_step_periodicity() {
        for (ticks, want) in [(37282, 37281), (37283, 0)] {
            let mut seq = FrameSequencer::with_mode(FrameMode::FiveStep);
            let mut irq = IrqLine::new();
            run(&mut seq, &mut irq, ticks);
            assert_eq!(seq.step(), want, "after {ticks} ticks");
        }
    }

    #[test]
    fn four_step_clock_counts() {
        let mut seq = FrameSequencer::new();
        let mut irq = IrqLine::new();
        assert_eq!(run(&mut seq, &mut irq, 29831), (4, 2));
        assert!(seq.irq_flag());
        assert!(irq.is_held_by(IrqSource::FrameCounter));
    }

    #[test]
    fn frame_irq_first_asserts_at_29828() {
        let mut seq = FrameSequencer::new();
        let mut irq = IrqLine::new();
        // One tick to land the power-on write, then 29827 more.
        run(&mut seq, &mut irq, 29828);
        assert!(!irq.is_low());
        run(&mut seq, &mut irq, 1);
        assert!(irq.is_low());
    }

    #[test]
    fn five_step_fires_both_on_write_and_never_irqs() {
        let mut seq = FrameSequencer::with_mode(FrameMode::FiveStep);
        let mut irq = IrqLine::new();
        let first = seq.tick(&mut irq);
        assert_eq!(first, FrameEvents::BOTH);
        assert_eq!(run(&mut seq, &mut irq, 37282), (4, 2));
        assert!(!irq.is_low());
        assert!(!seq.irq_flag());
    }

    #[test]
    fn write_delay_depends_on_parity() {
        let mut irq = IrqLine::new();
        let mut clock = Clock::new();

        let mut seq = FrameSequencer::new();
        run(&mut seq, &mut irq, 100);
        seq.write(0x00, &clock, &mut irq);
        run(&mut seq, &mut irq, 1);
        assert_eq!(seq.step(), 100);
        run(&mut seq, &mut irq, 1);
        assert_eq!(seq.step(), 0, "even cycle: two ticks");

        clock.advance();
        let mut seq = FrameSequencer::new();
        run(&mut seq, &mut irq, 100);
        seq.write(0x00, &clock, &mut irq);
        run(&mut seq, &mut irq, 2);
        assert_eq!(seq.step(), 101);
        run(&mut seq, &mut irq, 1);
        assert_eq!(seq.step(), 0, "odd cycle: three ticks");
    }

    #[test]
    fn inhibit_clears_pending_interrupt() {
        let mut seq = FrameSequencer::new();
        let mut irq = IrqLine::new();
        run(&mut seq, &mut irq, 29830);
        assert!(seq.irq_flag());
        seq.write(0x40, &Clock::new(), &mut irq);
        assert!(!seq.irq_flag());
        assert!(!irq.is_low());
        run(&mut seq, &mut irq, 29831);
        assert!(!irq.is_low(), "inhibited");
    }

    #[test]
    fn acknowledge_releases_line() {
        let mut seq = FrameSequencer::new();
        let mut irq = IrqLine::new();
        run(&mut seq, &mut irq, 29831);
        seq.acknowledge(&mut irq);
        assert!(!seq.irq_flag());
        assert!(!irq.is_low());
    }
}
