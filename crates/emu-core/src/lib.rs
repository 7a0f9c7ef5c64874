//! Core traits and types for cycle-accurate emulation.
//!
//! The CPU clock is the unit of time. Every bus access costs exactly one
//! cycle, and the bus implementation is responsible for advancing every
//! other chip in lockstep with it.

mod bus;
mod clock;
mod cpu;
mod interrupt;
mod observable;
mod ticks;

pub use bus::{Access, AccessKind, Bus, SimpleBus};
pub use clock::Clock;
pub use cpu::Cpu;
pub use interrupt::{IrqLine, IrqSource, NmiLine};
pub use observable::{Observable, Value};
pub use ticks::Ticks;
