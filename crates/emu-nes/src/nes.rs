//! Top-level NES system.
//!
//! The CPU clock (crystal / 12 = 1,789,773 Hz) is the unit of time. The
//! bus advances the PPU three dots and the APU one cycle per CPU cycle,
//! so stepping the CPU drives the whole machine.
//!
//! One frame = 341 PPU dots × 262 scanlines = 89,342 PPU cycles, one dot
//! fewer on odd frames with rendering enabled.

use emu_core::{Bus, Cpu, Observable, Value};
use mos_6502::Mos6502;
use nes_cartridge::{CartridgeError, Mapper};
use ricoh_ppu_2c02::VideoPort;

use crate::bus::NesBus;
use crate::config::NesConfig;
use crate::controller::ButtonHandle;
use crate::input::{InputQueue, NesButton};

/// NES system.
pub struct Nes {
    cpu: Mos6502,
    bus: NesBus,
    /// Timed input event queue.
    input_queue: InputQueue,
    /// Button state shared with controller 1.
    buttons: ButtonHandle,
}

impl Nes {
    /// Create a new NES from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the ROM data is not a supported iNES image.
    pub fn new(config: &NesConfig) -> Result<Self, CartridgeError> {
        let mapper = nes_cartridge::load(&config.rom_data)?;
        Ok(Self::from_mapper(mapper))
    }

    /// Create a new NES from a pre-built mapper and run the reset
    /// sequence.
    #[must_use]
    pub fn from_mapper(mapper: Box<dyn Mapper>) -> Self {
        let mut bus = NesBus::new(mapper);
        let mut cpu = Mos6502::new();
        cpu.reset(&mut bus);
        let buttons = bus.controller1().handle();
        Self {
            cpu,
            bus,
            input_queue: InputQueue::new(),
            buttons,
        }
    }

    /// Run pending DMA, then one CPU instruction or interrupt entry.
    /// Returns CPU cycles consumed, stolen cycles included.
    pub fn step(&mut self) -> u64 {
        let stolen = self.bus.run_dma();
        stolen + u64::from(self.cpu.step(&mut self.bus))
    }

    /// Run until the PPU finishes the current frame.
    ///
    /// Input events due this frame are applied first. Returns the number
    /// of CPU cycles executed.
    pub fn run_frame(&mut self) -> u64 {
        let frame = self.frame_count();
        self.input_queue.process(frame, &self.buttons);

        let start = self.bus.clock().total();
        while self.frame_count() == frame {
            self.step();
        }
        (self.bus.clock().total() - start).get()
    }

    /// Press the reset button: silence the APU and re-enter through the
    /// reset vector. RAM, PPU and cartridge state survive.
    pub fn reset(&mut self) {
        log::debug!("reset at cycle {}", self.bus.clock().total());
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
    }

    #[must_use]
    pub fn cpu(&self) -> &Mos6502 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Mos6502 {
        &mut self.cpu
    }

    #[must_use]
    pub fn bus(&self) -> &NesBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut NesBus {
        &mut self.bus
    }

    /// Completed PPU frames.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.bus.ppu().frame_count()
    }

    pub fn input_queue(&mut self) -> &mut InputQueue {
        &mut self.input_queue
    }

    /// Handle for driving controller 1 from another thread.
    #[must_use]
    pub fn buttons(&self) -> ButtonHandle {
        self.buttons.clone()
    }

    pub fn press_button(&mut self, button: NesButton) {
        self.buttons.press(button.bit());
    }

    pub fn release_button(&mut self, button: NesButton) {
        self.buttons.release(button.bit());
    }
}

/// Parse `0x1234`, `$1234` or decimal.
fn parse_address(text: &str) -> Option<u16> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).ok()
    } else if let Some(hex) = text.strip_prefix('$') {
        u16::from_str_radix(hex, 16).ok()
    } else {
        text.parse().ok()
    }
}

impl Observable for Nes {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("cpu.") {
            self.cpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("ppu.") {
            self.bus.ppu().query(rest)
        } else if let Some(rest) = path.strip_prefix("apu.") {
            self.bus.apu().query(rest)
        } else if let Some(rest) = path.strip_prefix("clock.") {
            match rest {
                "cycles" | "stall" | "total" => self.bus.query(rest),
                _ => None,
            }
        } else if let Some(rest) = path.strip_prefix("bus.") {
            self.bus.query(rest)
        } else if let Some(rest) = path.strip_prefix("memory.") {
            parse_address(rest).map(|addr| Value::U8(self.bus.peek(addr)))
        } else {
            match path {
                "frame_count" => Some(self.frame_count().into()),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "cpu.<6502_paths>",
            "ppu.<2c02_paths>",
            "apu.<2a03_paths>",
            "clock.cycles",
            "clock.stall",
            "clock.total",
            "bus.irq",
            "bus.nmi",
            "bus.open_bus",
            "bus.joypad",
            "memory.<address>",
            "frame_count",
        ]
    }
}
