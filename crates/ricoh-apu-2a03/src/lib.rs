//! Ricoh 2A03 audio processing unit.
//!
//! Five channels (two pulse, triangle, noise and delta modulation) built
//! from a handful of shared units: dividers, envelopes, length counters
//! and sweeps. A frame sequencer clocks those units at fixed cycle
//! offsets and raises the frame interrupt.
//!
//! NTSC timing only.

mod apu;
mod divider;
mod dmc;
mod envelope;
mod frame_sequencer;
mod length_counter;
mod noise;
mod pulse;
mod sweep;
pub mod tables;
mod triangle;

pub use apu::Apu;
pub use divider::Divider;
pub use dmc::Dmc;
pub use envelope::Envelope;
pub use frame_sequencer::{FrameEvents, FrameMode, FrameSequencer};
pub use length_counter::LengthCounter;
pub use noise::Noise;
pub use pulse::Pulse;
pub use sweep::{Negate, Sweep};
pub use triangle::Triangle;
