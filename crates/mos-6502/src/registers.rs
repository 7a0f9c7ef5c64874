//! 6502 CPU registers.

use crate::flags::{I, U};
use crate::Status;

/// Programmer-visible 2A03 registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    /// Next free stack slot, offset into page one.
    pub s: u8,
    pub pc: u16,
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Power-on state, before the reset sequence runs. Reset pulls S down
    /// by three and loads PC, leaving the documented S = $FD, P = $24.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0x00,
            pc: 0,
            p: Status(U | I),
        }
    }

    /// Claim the next stack slot for a push and return its address.
    pub fn push(&mut self) -> u16 {
        let addr = 0x0100 | u16::from(self.s);
        self.s = self.s.wrapping_sub(1);
        addr
    }

    /// Release the top stack slot and return its address.
    pub fn pop(&mut self) -> u16 {
        self.s = self.s.wrapping_add(1);
        0x0100 | u16::from(self.s)
    }

    /// Address S currently points at. Stack operations dummy-read here.
    #[must_use]
    pub const fn stack_addr(&self) -> u16 {
        0x0100 | (self.s as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_state() {
        let regs = Registers::new();
        assert_eq!(regs.s, 0x00);
        assert_eq!(regs.p.0, 0x24);
    }

    #[test]
    fn stack_wraps_within_page_one() {
        let mut regs = Registers::new();
        regs.s = 0x00;
        assert_eq!(regs.push(), 0x0100);
        assert_eq!(regs.s, 0xFF);
        assert_eq!(regs.pop(), 0x0100);
        assert_eq!(regs.s, 0x00);
    }
}
