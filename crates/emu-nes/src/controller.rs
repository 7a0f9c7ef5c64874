//! NES controller (joypad) emulation.
//!
//! The controller is a serial shift register read through `$4016`.
//! Writing bit 0 = 1 enables strobe, which keeps reloading the register;
//! writing bit 0 = 0 latches the current button state. Each read returns
//! one bit and shifts the register right.
//!
//! Button state is the one thing another thread may touch: an input
//! thread presses and releases buttons through a [`ButtonHandle`] while
//! the emulation thread latches it on strobe.

use std::sync::Arc;

use parking_lot::Mutex;

/// NES button indices (bit positions).
pub mod button {
    pub const A: u8 = 0;
    pub const B: u8 = 1;
    pub const SELECT: u8 = 2;
    pub const START: u8 = 3;
    pub const UP: u8 = 4;
    pub const DOWN: u8 = 5;
    pub const LEFT: u8 = 6;
    pub const RIGHT: u8 = 7;
}

/// Shared, cloneable button state. One bit per button, pressed = 1.
#[derive(Debug, Clone, Default)]
pub struct ButtonHandle(Arc<Mutex<u8>>);

impl ButtonHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a button state (true = pressed).
    pub fn set(&self, button: u8, pressed: bool) {
        let mut buttons = self.0.lock();
        if pressed {
            *buttons |= 1 << button;
        } else {
            *buttons &= !(1 << button);
        }
    }

    pub fn press(&self, button: u8) {
        self.set(button, true);
    }

    pub fn release(&self, button: u8) {
        self.set(button, false);
    }

    /// Current button byte.
    #[must_use]
    pub fn state(&self) -> u8 {
        *self.0.lock()
    }
}

/// Controller port state.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    buttons: ButtonHandle,
    /// Latched shift register.
    shift_register: u8,
    /// Strobe mode: when true, the shift register continuously reloads.
    strobe: bool,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for pressing buttons from outside the emulation loop.
    #[must_use]
    pub fn handle(&self) -> ButtonHandle {
        self.buttons.clone()
    }

    /// Read `$4016`: bit 0 of the shift register, then shift right.
    /// After all eight bits are out, reads return 1.
    pub fn read(&mut self) -> u8 {
        if self.strobe {
            return self.buttons.state() & 1;
        }
        let result = self.shift_register & 1;
        self.shift_register = (self.shift_register >> 1) | 0x80;
        result
    }

    /// What `read` would return, without shifting.
    #[must_use]
    pub fn peek(&self) -> u8 {
        if self.strobe {
            self.buttons.state() & 1
        } else {
            self.shift_register & 1
        }
    }

    /// Write `$4016`: bit 0 controls strobe.
    pub fn write(&mut self, value: u8) {
        let strobe = value & 1 != 0;
        if self.strobe && !strobe {
            self.shift_register = self.buttons.state();
        }
        self.strobe = strobe;
    }

    /// Current button byte (for observation).
    #[must_use]
    pub fn buttons(&self) -> u8 {
        self.buttons.state()
    }
}
