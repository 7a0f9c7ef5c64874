//! Cycle-accurate NES emulator.
//!
//! The NES master clock ticks at 21,477,272 Hz (NTSC crystal). The PPU
//! ticks at crystal/4 (5,369,318 Hz) and the CPU at crystal/12
//! (1,789,773 Hz), giving a 3:1 PPU:CPU ratio. The machine is stepped
//! one CPU instruction at a time; the bus keeps the PPU and APU in
//! lockstep with every access.

mod bus;
mod config;
mod controller;
mod dma;
pub mod harness;
pub mod input;
mod nes;

pub use bus::NesBus;
pub use config::{CPU_HZ, NesConfig};
pub use controller::{ButtonHandle, Controller, button};
pub use dma::{DmcDma, OamDma, Phase as DmaPhase, Transfer as DmaTransfer};
pub use harness::{HarnessError, TestOutcome};
pub use input::{InputEvent, InputQueue, NesButton};
pub use nes::Nes;
