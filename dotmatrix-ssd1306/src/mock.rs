//! Test doubles for the bus and delay provider

use dotmatrix_hal::{DelayNs, I2cBus, I2cBusError, I2cConfig};

/// Recording bus that can start failing after N successful writes
pub struct MockBus {
    /// Every attempted write as (address, bytes), failed attempts included
    pub writes: Vec<(u8, Vec<u8>)>,
    /// Configuration from the last `configure`
    pub config: Option<I2cConfig>,
    /// Set by `release`
    pub released: bool,
    fail: Option<(usize, I2cBusError)>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            config: None,
            released: false,
            fail: None,
        }
    }

    /// Let `ok_writes` more writes succeed, then fail every write after
    pub fn fail_after(&mut self, ok_writes: usize, error: I2cBusError) {
        self.fail = Some((self.writes.len() + ok_writes, error));
    }

    /// Succeed again
    pub fn heal(&mut self) {
        self.fail = None;
    }

    /// Payload bytes of every command frame, in order
    pub fn commands(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(_, p)| p[0] == 0x00)
            .map(|(_, p)| p[1])
            .collect()
    }

    /// Every data packet (control byte stripped)
    pub fn data_packets(&self) -> Vec<&[u8]> {
        self.writes
            .iter()
            .filter(|(_, p)| p[0] != 0x00)
            .map(|(_, p)| &p[1..])
            .collect()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl I2cBus for MockBus {
    fn configure(&mut self, config: &I2cConfig) -> Result<(), I2cBusError> {
        self.config = Some(*config);
        self.released = false;
        Ok(())
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
        let attempt = self.writes.len();
        self.writes.push((address, data.to_vec()));
        match self.fail {
            Some((from, error)) if attempt >= from => Err(error),
            _ => Ok(()),
        }
    }

    fn release(&mut self) {
        self.config = None;
        self.released = true;
    }
}

/// Delay provider that only adds up requested time
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
