//! CPU core trait.

use crate::Bus;

/// A CPU core stepped one instruction at a time.
///
/// The bus is passed in, not owned, so the machine can reach the other
/// chips between steps (DMA, input, observation).
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Service a pending interrupt or execute one instruction. Returns the
    /// number of CPU cycles consumed.
    fn step<B: Bus>(&mut self, bus: &mut B) -> u32;

    /// Reload the program counter from the reset vector.
    fn reset<B: Bus>(&mut self, bus: &mut B);

    /// Current program counter.
    fn pc(&self) -> u16;

    /// Snapshot of all registers.
    fn registers(&self) -> Self::Registers;
}
