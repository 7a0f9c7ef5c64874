//! NES bus: CPU address routing and the shared clock.
//!
//! Implements `emu_core::Bus` for the NES. Routes CPU addresses to
//! internal RAM, PPU registers, APU, controllers, and cartridge.
//!
//! Every access advances the clock first, then performs the read or
//! write, then steps the APU once and the PPU three times. The CPU sees
//! data sampled before the video clock moves on. DMA runs between
//! instructions on stolen cycles that advance the chips the same way.

use emu_core::{Bus, Clock, IrqLine, NmiLine, Observable, Value};
use nes_cartridge::Mapper;
use ricoh_apu_2a03::Apu;
use ricoh_ppu_2c02::{Ppu, VideoPort};

use crate::controller::Controller;
use crate::dma::{DmcDma, OamDma, Transfer};

/// PPU dots per CPU cycle.
const PPU_DOTS_PER_CYCLE: usize = 3;

/// The NES bus, implementing `emu_core::Bus`.
pub struct NesBus {
    /// 2K internal RAM ($0000-$07FF, mirrored to $1FFF).
    ram: [u8; 0x800],
    ppu: Ppu,
    apu: Apu,
    cartridge: Box<dyn Mapper>,
    /// Controller 1 ($4016). Port 2 is not connected.
    controller1: Controller,
    clock: Clock,
    irq: IrqLine,
    nmi: NmiLine,
    oam_dma: OamDma,
    dmc_dma: DmcDma,
    /// Last value driven on the CPU data bus.
    open_bus: u8,
}

impl NesBus {
    #[must_use]
    pub fn new(cartridge: Box<dyn Mapper>) -> Self {
        Self {
            ram: [0; 0x800],
            ppu: Ppu::new(),
            apu: Apu::new(),
            cartridge,
            controller1: Controller::new(),
            clock: Clock::new(),
            irq: IrqLine::new(),
            nmi: NmiLine::new(),
            oam_dma: OamDma::default(),
            dmc_dma: DmcDma::default(),
            open_bus: 0,
        }
    }

    #[must_use]
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    #[must_use]
    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    #[must_use]
    pub fn cartridge(&self) -> &dyn Mapper {
        self.cartridge.as_ref()
    }

    #[must_use]
    pub fn controller1(&self) -> &Controller {
        &self.controller1
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    #[must_use]
    pub fn irq(&self) -> &IrqLine {
        &self.irq
    }

    #[must_use]
    pub fn nmi(&self) -> &NmiLine {
        &self.nmi
    }

    /// Reset line: the APU sees `$4015 = 0`, which silences every channel
    /// and acknowledges the DMC interrupt.
    pub fn reset(&mut self) {
        self.apu.write(0x4015, 0, &self.clock, &mut self.irq);
    }

    /// True while either DMA unit still has cycles to steal.
    #[must_use]
    pub fn dma_pending(&self) -> bool {
        self.oam_dma.is_active() || self.dmc_dma.is_active() || self.apu.dmc_request().is_some()
    }

    /// Run every pending DMA transfer to completion. Returns the number of
    /// cycles stolen. The DMC fetch wins when both units want the bus.
    pub fn run_dma(&mut self) -> u64 {
        let start = self.clock.stall();
        loop {
            if !self.dmc_dma.is_active()
                && let Some(address) = self.apu.dmc_request()
            {
                self.dmc_dma.start(address);
            }

            let odd = self.clock.total().is_odd();
            if self.dmc_dma.is_active() {
                match self.dmc_dma.next(odd) {
                    Transfer::Read(address) => {
                        let byte = self.stolen_read(address);
                        self.apu.fill_dmc_buffer(byte, &mut self.irq);
                    }
                    Transfer::Wait | Transfer::WriteOam(_) => self.stolen_cycle(),
                }
            } else if self.oam_dma.is_active() {
                match self.oam_dma.next(odd) {
                    Transfer::Read(address) => {
                        let byte = self.stolen_read(address);
                        self.oam_dma.latch(byte);
                    }
                    Transfer::WriteOam(byte) => self.stolen_oam_write(byte),
                    Transfer::Wait => self.stolen_cycle(),
                }
            } else {
                break;
            }
        }
        (self.clock.stall() - start).get()
    }

    /// Step the APU once and the PPU three times.
    fn step_chips(&mut self) {
        self.apu.step(&mut self.irq);
        for _ in 0..PPU_DOTS_PER_CYCLE {
            self.ppu.step(&mut self.nmi);
        }
    }

    fn stolen_cycle(&mut self) {
        self.clock.stall_cycle();
        self.step_chips();
    }

    fn stolen_read(&mut self, address: u16) -> u8 {
        self.clock.stall_cycle();
        let value = self.read_mapped(address);
        self.open_bus = value;
        self.step_chips();
        value
    }

    fn stolen_oam_write(&mut self, value: u8) {
        self.clock.stall_cycle();
        self.ppu
            .write_register(0x2004, value, self.cartridge.as_mut(), &mut self.nmi);
        self.step_chips();
    }

    fn read_mapped(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)],
            0x2000..=0x3FFF => self.ppu.read_register(addr, self.cartridge.as_mut()),
            0x4015 => self.apu.read_status(&mut self.irq),
            0x4016 => (self.open_bus & 0xE0) | self.controller1.read(),
            0x4017..=0x401F => 0,
            0x4000..=0x4014 => self.open_bus,
            0x4020..=0xFFFF => self.cartridge.cpu_read(addr).unwrap_or(self.open_bus),
        }
    }

    fn write_mapped(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)] = value,
            0x2000..=0x3FFF => {
                self.ppu
                    .write_register(addr, value, self.cartridge.as_mut(), &mut self.nmi);
            }
            0x4014 => self.oam_dma.start(value),
            0x4016 => self.controller1.write(value),
            0x4000..=0x4013 | 0x4015 | 0x4017 => {
                self.apu.write(addr, value, &self.clock, &mut self.irq);
            }
            0x4018..=0x401F => log::trace!("write ${value:02X} to disabled I/O ${addr:04X}"),
            0x4020..=0xFFFF => self.cartridge.cpu_write(addr, value),
        }
    }
}

impl Bus for NesBus {
    fn read(&mut self, address: u16) -> u8 {
        self.clock.advance();
        let value = self.read_mapped(address);
        self.open_bus = value;
        self.step_chips();
        value
    }

    fn write(&mut self, address: u16, value: u8) {
        self.clock.advance();
        self.write_mapped(address, value);
        self.open_bus = value;
        self.step_chips();
    }

    fn peek(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x1FFF => self.ram[usize::from(address & 0x07FF)],
            0x2000..=0x3FFF => self.ppu.peek_register(address, self.cartridge.as_ref()),
            0x4015 => self.apu.peek_status(&self.irq),
            0x4016 => (self.open_bus & 0xE0) | self.controller1.peek(),
            0x4017..=0x401F => 0,
            0x4000..=0x4014 => self.open_bus,
            0x4020..=0xFFFF => self.cartridge.cpu_peek(address).unwrap_or(self.open_bus),
        }
    }

    fn tick(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.clock.advance();
            self.step_chips();
        }
    }

    fn cycles(&self) -> u64 {
        self.clock.cycles().get()
    }

    fn poll_nmi(&mut self) -> bool {
        self.nmi.poll()
    }

    fn irq_asserted(&self) -> bool {
        self.irq.is_low()
    }
}

const QUERY_PATHS: &[&str] = &[
    "cycles",
    "stall",
    "total",
    "irq",
    "nmi",
    "open_bus",
    "joypad",
];

impl Observable for NesBus {
    fn query(&self, path: &str) -> Option<Value> {
        let value = match path {
            "cycles" => self.clock.cycles().get().into(),
            "stall" => self.clock.stall().get().into(),
            "total" => self.clock.total().get().into(),
            "irq" => self.irq.mask().into(),
            "nmi" => self.nmi.is_pending().into(),
            "open_bus" => self.open_bus.into(),
            "joypad" => self.controller1.buttons().into(),
            _ => return None,
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
