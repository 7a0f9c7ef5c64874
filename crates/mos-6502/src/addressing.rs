//! Addressing-mode resolution.
//!
//! Every mode issues the same bus accesses the hardware does, dummy reads
//! included. A dummy read can land on a PPU or APU register, and its side
//! effects happen exactly as a real read's would.

use emu_core::Bus;

use crate::Mos6502;
use crate::opcodes::{Descriptor, Mode};

/// Resolved operand of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    /// Effective address. `None` for implied and accumulator modes.
    pub address: Option<u16>,
    /// Indexing carried into the high byte.
    pub page_crossed: bool,
}

impl Operand {
    const NONE: Self = Self {
        address: None,
        page_crossed: false,
    };

    const fn at(address: u16) -> Self {
        Self {
            address: Some(address),
            page_crossed: false,
        }
    }
}

const fn crosses_page(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

impl Mos6502 {
    /// Read the byte at PC and advance PC.
    pub(crate) fn fetch<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch(bus);
        let hi = self.fetch(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Resolve the operand for `descriptor`, PC sitting just past the opcode.
    pub(crate) fn resolve<B: Bus>(&mut self, bus: &mut B, descriptor: Descriptor) -> Operand {
        let forced = descriptor.forces_dummy_read();
        match descriptor.mode {
            Mode::Implied | Mode::Accumulator => {
                let _ = bus.read(self.regs.pc);
                Operand::NONE
            }
            Mode::Immediate => {
                let address = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                Operand::at(address)
            }
            Mode::ZeroPage => Operand::at(u16::from(self.fetch(bus))),
            Mode::ZeroPageX => self.zero_page_indexed(bus, self.regs.x),
            Mode::ZeroPageY => self.zero_page_indexed(bus, self.regs.y),
            Mode::Absolute => Operand::at(self.fetch_word(bus)),
            Mode::AbsoluteX => {
                let base = self.fetch_word(bus);
                indexed(bus, base, self.regs.x, forced)
            }
            Mode::AbsoluteY => {
                let base = self.fetch_word(bus);
                indexed(bus, base, self.regs.y, forced)
            }
            Mode::Indirect => {
                let pointer = self.fetch_word(bus);
                Operand::at(read_word_page_wrapped(bus, pointer))
            }
            Mode::IndexedIndirect => {
                let zp = self.fetch(bus);
                let _ = bus.read(u16::from(zp));
                let pointer = zp.wrapping_add(self.regs.x);
                Operand::at(read_zero_page_word(bus, pointer))
            }
            Mode::IndirectIndexed => {
                let zp = self.fetch(bus);
                let base = read_zero_page_word(bus, zp);
                indexed(bus, base, self.regs.y, forced)
            }
            Mode::Relative => {
                let offset = self.fetch(bus) as i8;
                Operand::at(self.regs.pc.wrapping_add(offset as u16))
            }
        }
    }

    /// Zero page indexing never leaves page zero. The unindexed address is
    /// read once while the index is added.
    fn zero_page_indexed<B: Bus>(&mut self, bus: &mut B, index: u8) -> Operand {
        let zp = self.fetch(bus);
        let _ = bus.read(u16::from(zp));
        Operand::at(u16::from(zp.wrapping_add(index)))
    }
}

/// Add an index to a 16-bit base. On a carry, or whenever the instruction
/// forces it, the CPU first reads the address with the high byte not yet
/// fixed up.
fn indexed<B: Bus>(bus: &mut B, base: u16, index: u8, forced: bool) -> Operand {
    let address = base.wrapping_add(u16::from(index));
    let page_crossed = crosses_page(base, address);
    if page_crossed || forced {
        let _ = bus.read((base & 0xFF00) | (address & 0x00FF));
    }
    Operand {
        address: Some(address),
        page_crossed,
    }
}

fn read_zero_page_word<B: Bus>(bus: &mut B, pointer: u8) -> u16 {
    let lo = bus.read(u16::from(pointer));
    let hi = bus.read(u16::from(pointer.wrapping_add(1)));
    u16::from_le_bytes([lo, hi])
}

/// JMP ($xxFF) takes its high byte from $xx00, not the next page.
fn read_word_page_wrapped<B: Bus>(bus: &mut B, pointer: u16) -> u16 {
    let lo = bus.read(pointer);
    let hi = bus.read((pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF));
    u16::from_le_bytes([lo, hi])
}

/// True when a taken branch from `pc` to `target` changes page.
pub(crate) const fn branch_crosses_page(pc: u16, target: u16) -> bool {
    crosses_page(pc, target)
}
