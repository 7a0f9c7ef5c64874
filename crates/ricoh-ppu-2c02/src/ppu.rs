//! 2C02 timing and register model.
//!
//! One `step` is one dot. A frame is 341 dots by 262 scanlines:
//!
//! - 0-239: visible
//! - 240: post-render
//! - 241-260: vblank (flag set at 241, dot 1)
//! - 261: pre-render (flags cleared at dot 1)
//!
//! With rendering enabled, the pre-render line of every odd frame is one
//! dot short.

use emu_core::{NmiLine, Observable, Value};

use crate::port::{Mirroring, VideoMemory, VideoPort};

pub const DOTS_PER_SCANLINE: u16 = 341;
pub const SCANLINES_PER_FRAME: u16 = 262;

const VBLANK_LINE: u16 = 241;
const PRE_RENDER_LINE: u16 = 261;

const STATUS_VBLANK: u8 = 0x80;
const STATUS_SPRITE_ZERO: u8 = 0x40;
const STATUS_OVERFLOW: u8 = 0x20;

const CTRL_INCREMENT_32: u8 = 0x04;
const CTRL_NMI: u8 = 0x80;

/// PPU 2C02.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ppu {
    nametable_ram: [u8; 2048],
    palette_ram: [u8; 32],
    oam: [u8; 256],

    ctrl: u8,
    mask: u8,
    status: u8,
    oam_addr: u8,

    // Loopy scroll/address registers
    v: u16,
    t: u16,
    fine_x: u8,
    w: bool,

    /// `$2007` read buffer.
    read_buffer: u8,
    /// Last value driven onto the PPU's data bus by the CPU.
    open_bus: u8,

    scanline: u16,
    dot: u16,
    frame_odd: bool,
    frame_count: u64,

    /// `$2002` was read the dot before vblank starts.
    suppress_vblank: bool,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nametable_ram: [0; 2048],
            palette_ram: [0; 32],
            oam: [0; 256],
            ctrl: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,
            v: 0,
            t: 0,
            fine_x: 0,
            w: false,
            read_buffer: 0,
            open_bus: 0,
            scanline: PRE_RENDER_LINE,
            dot: 0,
            frame_odd: false,
            frame_count: 0,
            suppress_vblank: false,
        }
    }

    /// Level of the NMI output pin (active high here).
    #[must_use]
    pub const fn nmi_output(&self) -> bool {
        self.status & STATUS_VBLANK != 0 && self.ctrl & CTRL_NMI != 0
    }

    const fn rendering_enabled(&self) -> bool {
        self.mask & 0x18 != 0
    }

    #[must_use]
    pub const fn scanline(&self) -> u16 {
        self.scanline
    }

    #[must_use]
    pub const fn dot(&self) -> u16 {
        self.dot
    }

    #[must_use]
    pub const fn in_vblank(&self) -> bool {
        self.status & STATUS_VBLANK != 0
    }

    #[must_use]
    pub const fn oam(&self) -> &[u8; 256] {
        &self.oam
    }

    fn tick_scroll(&mut self) {
        let fetch_dot = matches!(self.dot, 1..=256 | 321..=336);
        if fetch_dot && self.dot % 8 == 0 {
            self.increment_x();
        }
        match self.dot {
            256 => self.increment_y(),
            257 => self.v = (self.v & !0x041F) | (self.t & 0x041F),
            280..=304 if self.scanline == PRE_RENDER_LINE => {
                self.v = (self.v & !0x7BE0) | (self.t & 0x7BE0);
            }
            _ => {}
        }
    }

    fn increment_x(&mut self) {
        if self.v & 0x001F == 31 {
            self.v &= !0x001F;
            self.v ^= 0x0400;
        } else {
            self.v += 1;
        }
    }

    fn increment_y(&mut self) {
        if self.v & 0x7000 != 0x7000 {
            self.v += 0x1000;
            return;
        }
        self.v &= !0x7000;
        let mut coarse_y = (self.v & 0x03E0) >> 5;
        if coarse_y == 29 {
            coarse_y = 0;
            self.v ^= 0x0800;
        } else if coarse_y == 31 {
            coarse_y = 0;
        } else {
            coarse_y += 1;
        }
        self.v = (self.v & !0x03E0) | (coarse_y << 5);
    }

    fn advance_dot(&mut self) {
        let skip = self.scanline == PRE_RENDER_LINE
            && self.dot == 339
            && self.frame_odd
            && self.rendering_enabled();
        self.dot += if skip { 2 } else { 1 };
        if self.dot >= DOTS_PER_SCANLINE {
            self.dot = 0;
            self.scanline += 1;
            if self.scanline == SCANLINES_PER_FRAME {
                self.scanline = 0;
                self.frame_odd = !self.frame_odd;
                self.frame_count += 1;
            }
        }
    }

    fn increment_v(&mut self) {
        let step = if self.ctrl & CTRL_INCREMENT_32 != 0 { 32 } else { 1 };
        self.v = self.v.wrapping_add(step) & 0x7FFF;
    }

    fn status_value(&self) -> u8 {
        (self.status & 0xE0) | (self.open_bus & 0x1F)
    }

    fn data_read<M: VideoMemory + ?Sized>(&mut self, memory: &mut M) -> u8 {
        let addr = self.v & 0x3FFF;
        let result = if addr >= 0x3F00 {
            // Palette reads bypass the buffer, which picks up the
            // nametable byte underneath instead.
            self.read_buffer = self.vram_read(addr & 0x2FFF, memory.mirroring());
            (self.open_bus & 0xC0) | self.palette_ram[palette_index(addr)]
        } else {
            let previous = self.read_buffer;
            self.read_buffer = match addr {
                0x0000..=0x1FFF => memory.chr_read(addr),
                _ => self.vram_read(addr, memory.mirroring()),
            };
            previous
        };
        self.increment_v();
        result
    }

    fn data_peek(&self) -> u8 {
        let addr = self.v & 0x3FFF;
        if addr >= 0x3F00 {
            (self.open_bus & 0xC0) | self.palette_ram[palette_index(addr)]
        } else {
            self.read_buffer
        }
    }

    fn data_write<M: VideoMemory + ?Sized>(&mut self, value: u8, memory: &mut M) {
        let addr = self.v & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => memory.chr_write(addr, value),
            0x2000..=0x3EFF => {
                let index = nametable_index(addr, memory.mirroring());
                self.nametable_ram[index] = value;
            }
            _ => self.palette_ram[palette_index(addr)] = value & 0x3F,
        }
        self.increment_v();
    }

    /// Nametable or palette byte. Pattern addresses belong to the caller.
    fn vram_read(&self, addr: u16, mirroring: Mirroring) -> u8 {
        match addr {
            0x2000..=0x3EFF => self.nametable_ram[nametable_index(addr, mirroring)],
            0x3F00..=0x3FFF => self.palette_ram[palette_index(addr)],
            _ => 0,
        }
    }
}

/// Offset into the 2 KB of nametable RAM. Four-screen carts would supply
/// the upper 2 KB themselves; without it the halves alias.
fn nametable_index(addr: u16, mirroring: Mirroring) -> usize {
    let offset = (addr - 0x2000) & 0x0FFF;
    let index = match mirroring {
        Mirroring::Horizontal => ((offset / 0x0800) * 0x0400) + (offset & 0x03FF),
        Mirroring::Vertical | Mirroring::FourScreen => offset & 0x07FF,
        Mirroring::SingleScreenLower => offset & 0x03FF,
        Mirroring::SingleScreenUpper => 0x0400 + (offset & 0x03FF),
    };
    usize::from(index)
}

/// `$3F10/$3F14/$3F18/$3F1C` mirror the backdrop entries below them.
fn palette_index(addr: u16) -> usize {
    let index = usize::from(addr & 0x1F);
    if index & 0x13 == 0x10 { index & 0x0F } else { index }
}

impl VideoPort for Ppu {
    fn step(&mut self, nmi: &mut NmiLine) {
        match (self.scanline, self.dot) {
            (VBLANK_LINE, 1) => {
                if self.suppress_vblank {
                    log::trace!("vblank suppressed by $2002 read");
                } else {
                    self.status |= STATUS_VBLANK;
                    if self.nmi_output() {
                        nmi.assert();
                    }
                }
                self.suppress_vblank = false;
            }
            (PRE_RENDER_LINE, 1) => {
                self.status &= !(STATUS_VBLANK | STATUS_SPRITE_ZERO | STATUS_OVERFLOW);
            }
            _ => {}
        }

        let render_line = self.scanline < 240 || self.scanline == PRE_RENDER_LINE;
        if render_line && self.rendering_enabled() {
            self.tick_scroll();
        }

        self.advance_dot();
    }

    fn read_register<M: VideoMemory + ?Sized>(&mut self, addr: u16, memory: &mut M) -> u8 {
        let value = match addr & 0x07 {
            2 => {
                let value = self.status_value();
                self.status &= !STATUS_VBLANK;
                self.w = false;
                if self.scanline == VBLANK_LINE && self.dot == 1 {
                    self.suppress_vblank = true;
                }
                value
            }
            4 => self.oam[usize::from(self.oam_addr)],
            7 => self.data_read(memory),
            _ => return self.open_bus,
        };
        self.open_bus = value;
        value
    }

    fn peek_register<M: VideoMemory + ?Sized>(&self, addr: u16, _memory: &M) -> u8 {
        match addr & 0x07 {
            2 => self.status_value(),
            4 => self.oam[usize::from(self.oam_addr)],
            7 => self.data_peek(),
            _ => self.open_bus,
        }
    }

    fn write_register<M: VideoMemory + ?Sized>(
        &mut self,
        addr: u16,
        value: u8,
        memory: &mut M,
        nmi: &mut NmiLine,
    ) {
        self.open_bus = value;
        match addr & 0x07 {
            0 => {
                let was_high = self.nmi_output();
                self.ctrl = value;
                self.t = (self.t & !0x0C00) | (u16::from(value & 0x03) << 10);
                // Enabling NMI during vblank raises an edge mid-instruction.
                if !was_high && self.nmi_output() {
                    nmi.assert_delayed();
                }
            }
            1 => self.mask = value,
            2 => log::trace!("write to read-only $2002 ignored: {value:02X}"),
            3 => self.oam_addr = value,
            4 => {
                self.oam[usize::from(self.oam_addr)] = value;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            5 => {
                if self.w {
                    self.t = (self.t & !0x73E0)
                        | (u16::from(value & 0x07) << 12)
                        | (u16::from(value >> 3) << 5);
                } else {
                    self.t = (self.t & !0x001F) | u16::from(value >> 3);
                    self.fine_x = value & 0x07;
                }
                self.w = !self.w;
            }
            6 => {
                if self.w {
                    self.t = (self.t & 0xFF00) | u16::from(value);
                    self.v = self.t;
                } else {
                    self.t = (self.t & 0x00FF) | (u16::from(value & 0x3F) << 8);
                }
                self.w = !self.w;
            }
            _ => self.data_write(value, memory),
        }
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

const QUERY_PATHS: &[&str] = &[
    "scanline",
    "dot",
    "frame",
    "ctrl",
    "mask",
    "status",
    "oam_addr",
    "v",
    "t",
    "fine_x",
    "w",
    "vblank",
    "nmi_output",
    "read_buffer",
    "open_bus",
];

impl Observable for Ppu {
    fn query(&self, path: &str) -> Option<Value> {
        let value = match path {
            "scanline" => self.scanline.into(),
            "dot" => self.dot.into(),
            "frame" => self.frame_count.into(),
            "ctrl" => self.ctrl.into(),
            "mask" => self.mask.into(),
            "status" => self.status.into(),
            "oam_addr" => self.oam_addr.into(),
            "v" => self.v.into(),
            "t" => self.t.into(),
            "fine_x" => self.fine_x.into(),
            "w" => self.w.into(),
            "vblank" => self.in_vblank().into(),
            "nmi_output" => self.nmi_output().into(),
            "read_buffer" => self.read_buffer.into(),
            "open_bus" => self.open_bus.into(),
            _ => {
                let offset = path.strip_prefix("oam.")?;
                let index = usize::from(u8::from_str_radix(offset, 16).ok()?);
                self.oam[index].into()
            }
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
