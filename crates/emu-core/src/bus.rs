//! Memory and I/O bus interface.

use crate::interrupt::{IrqLine, NmiLine};

/// Memory and I/O bus interface.
///
/// Every `read` and `write` is one CPU cycle. The implementation advances
/// its clock and any chips hanging off it as part of the access, so a CPU
/// never counts cycles itself; it only issues accesses.
pub trait Bus {
    /// Read a byte, applying any side effects of the access.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte.
    fn write(&mut self, address: u16, value: u8);

    /// Read a byte without side effects. Returns what `read` would return
    /// at this instant without touching latches, counters or flags.
    fn peek(&self, address: u16) -> u8;

    /// Spend `cycles` CPU cycles without a bus access.
    fn tick(&mut self, cycles: u32);

    /// CPU-owned cycles elapsed so far.
    fn cycles(&self) -> u64;

    /// Sample the NMI input at an instruction boundary.
    fn poll_nmi(&mut self) -> bool {
        false
    }

    /// Level of the IRQ input.
    fn irq_asserted(&self) -> bool {
        false
    }
}

/// Direction of a logged bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// One logged bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub kind: AccessKind,
    pub address: u16,
    pub value: u8,
}

/// Flat 64K RAM bus with a cycle counter and interrupt lines.
///
/// Intended for CPU tests. Access logging is off until enabled.
pub struct SimpleBus {
    memory: Box<[u8; 0x10000]>,
    cycles: u64,
    /// IRQ line, driven directly by tests.
    pub irq: IrqLine,
    /// NMI line, driven directly by tests.
    pub nmi: NmiLine,
    log: Option<Vec<Access>>,
}

impl SimpleBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: Box::new([0; 0x10000]),
            cycles: 0,
            irq: IrqLine::new(),
            nmi: NmiLine::new(),
            log: None,
        }
    }

    /// Copy `data` into memory starting at `address`, wrapping at $FFFF.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            self.memory[usize::from(address.wrapping_add(i as u16))] = byte;
        }
    }

    /// Start recording accesses, discarding anything recorded before.
    pub fn enable_log(&mut self) {
        self.log = Some(Vec::new());
    }

    /// Take the recorded accesses, leaving logging enabled.
    pub fn take_log(&mut self) -> Vec<Access> {
        self.log.as_mut().map(std::mem::take).unwrap_or_default()
    }

    fn record(&mut self, kind: AccessKind, address: u16, value: u8) {
        if let Some(log) = self.log.as_mut() {
            log.push(Access {
                kind,
                address,
                value,
            });
        }
    }
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.cycles += 1;
        let value = self.memory[usize::from(address)];
        self.record(AccessKind::Read, address, value);
        value
    }

    fn write(&mut self, address: u16, value: u8) {
        self.cycles += 1;
        self.memory[usize::from(address)] = value;
        self.record(AccessKind::Write, address, value);
    }

    fn peek(&self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }

    fn tick(&mut self, cycles: u32) {
        self.cycles += u64::from(cycles);
    }

    fn cycles(&self) -> u64 {
        self.cycles
    }

    fn poll_nmi(&mut self) -> bool {
        self.nmi.poll()
    }

    fn irq_asserted(&self) -> bool {
        self.irq.is_low()
    }
}
