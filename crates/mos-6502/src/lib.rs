//! Instruction-stepped 2A03 CPU core.
//!
//! The 2A03 is an NMOS 6502 with decimal mode disconnected. Each call to
//! `Cpu::step` services a pending interrupt or runs one instruction,
//! issuing every bus access the real chip makes, dummy reads included.
//! The bus is responsible for advancing the rest of the machine on each
//! access.

mod addressing;
mod cpu;
mod execute;
pub mod flags;
mod opcodes;
mod registers;

pub use cpu::{IRQ_VECTOR, Mos6502, NMI_VECTOR, RESET_VECTOR};
pub use flags::Status;
pub use opcodes::{Descriptor, Instruction, Mode, OPCODES, OperandUse};
pub use registers::Registers;
