//! I2C framing for the SSD1306
//!
//! Every transaction starts with a control byte telling the controller how
//! to read what follows:
//!
//! ```text
//! ┌─────────┬──────────────┬─────────────────────────────────┐
//! │ 0x00    │ command      │ next byte is a register command │
//! │ 0xC0    │ data (Co=1)  │ one display RAM byte            │
//! │ 0x40    │ data stream  │ all remaining bytes are RAM     │
//! └─────────┴──────────────┴─────────────────────────────────┘
//! ```
//!
//! Bulk data is split into packets of at most [`MAX_PACKET_LEN`] bytes on
//! the wire. There are no retries; each failure is recorded in the
//! [`Connectivity`] tracker and returned to the caller.

use dotmatrix_hal::{I2cBus, I2cBusError};

use crate::config::BusConfig;
use crate::connectivity::Connectivity;
use crate::error::DisplayError;

/// Largest single bus transaction, control byte included
pub const MAX_PACKET_LEN: usize = 32;

/// Display RAM bytes per streamed packet
pub const DATA_CHUNK_LEN: usize = MAX_PACKET_LEN - 1;

/// Control byte selecting how the controller reads a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// Register command
    Command,
    /// First data byte of a run
    Data,
    /// Data continuation / stream
    DataStream,
}

impl Frame {
    /// Wire value of the control byte
    pub const fn control_byte(self) -> u8 {
        match self {
            Frame::Command => 0x00,
            Frame::Data => 0xC0,
            Frame::DataStream => 0x40,
        }
    }
}

/// Owns the bus handle and the captured bus configuration
pub struct Transport<B> {
    pub(crate) bus: B,
    config: Option<BusConfig>,
    connectivity: Connectivity,
}

impl<B> Transport<B> {
    /// Wrap a bus; nothing is sent until `configure`
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            config: None,
            connectivity: Connectivity::new(),
        }
    }

    /// Bus configuration captured by the last `configure`
    pub fn config(&self) -> Option<&BusConfig> {
        self.config.as_ref()
    }

    /// Reachability tracker
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Mutable reachability tracker
    pub fn connectivity_mut(&mut self) -> &mut Connectivity {
        &mut self.connectivity
    }

    /// Give back the bus handle
    pub fn into_inner(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> Transport<B> {
    /// Validate and apply a bus configuration, replacing any previous one
    pub fn configure(&mut self, config: BusConfig) -> Result<(), DisplayError> {
        config.validate()?;
        self.config = None;
        if let Err(e) = self.bus.configure(&config.i2c) {
            // Nothing reached the device, but the bus is unusable
            return self.finish(config.address, Frame::Command.control_byte(), Err(e));
        }
        self.config = Some(config);
        Ok(())
    }

    /// Drop the configuration and release the peripheral
    pub fn release(&mut self) {
        if self.config.take().is_some() {
            self.bus.release();
        }
    }

    /// Send one control byte plus one payload byte
    pub fn write_byte(&mut self, value: u8, frame: Frame) -> Result<(), DisplayError> {
        let control = frame.control_byte();
        self.write_packet(control, &[value])
    }

    /// Send a command sequence, one command frame per byte
    ///
    /// Stops at the first failed write.
    pub fn send_sequence(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        for &byte in commands {
            self.write_byte(byte, Frame::Command)?;
        }
        Ok(())
    }

    /// Stream display RAM bytes in packets of at most [`MAX_PACKET_LEN`]
    ///
    /// A failed packet aborts the rest; earlier packets stay on the device.
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        for chunk in data.chunks(DATA_CHUNK_LEN) {
            self.write_packet(Frame::DataStream.control_byte(), chunk)?;
        }
        Ok(())
    }

    fn write_packet(&mut self, control: u8, payload: &[u8]) -> Result<(), DisplayError> {
        let address = self.config.ok_or(DisplayError::NotInitialized)?.address;

        let mut packet = [0u8; MAX_PACKET_LEN];
        packet[0] = control;
        packet[1..=payload.len()].copy_from_slice(payload);

        let result = self.bus.write(address, &packet[..=payload.len()]);
        self.finish(address, control, result)
    }

    fn finish(
        &mut self,
        address: u8,
        control: u8,
        result: Result<(), I2cBusError>,
    ) -> Result<(), DisplayError> {
        self.connectivity.record(result);
        if let Err(e) = result {
            if self.connectivity.debug() {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "ssd1306 @ {=u8:#x}: write (control {=u8:#x}) failed: {}",
                    address,
                    control,
                    e
                );
            }
            #[cfg(not(feature = "defmt"))]
            let _ = (address, control);
            return Err(DisplayError::Transport(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBus;
    use dotmatrix_hal::I2cConfig;

    fn configured() -> Transport<MockBus> {
        let mut t = Transport::new(MockBus::new());
        t.configure(BusConfig::default()).unwrap();
        t
    }

    #[test]
    fn test_control_bytes() {
        assert_eq!(Frame::Command.control_byte(), 0x00);
        assert_eq!(Frame::Data.control_byte(), 0xC0);
        assert_eq!(Frame::DataStream.control_byte(), 0x40);
    }

    #[test]
    fn test_unconfigured_write_is_rejected() {
        let mut t = Transport::new(MockBus::new());
        assert_eq!(
            t.write_byte(0xAF, Frame::Command),
            Err(DisplayError::NotInitialized)
        );
        assert!(t.bus.writes.is_empty());
    }

    #[test]
    fn test_configure_applies_bus_settings() {
        let mut t = Transport::new(MockBus::new());
        let config = BusConfig::new(0x3D, I2cConfig::FAST.with_pins(4, 5));
        t.configure(config).unwrap();

        assert_eq!(t.config(), Some(&config));
        assert_eq!(t.bus.config, Some(config.i2c));
        // Reachability is only known after the first write
        assert!(!t.connectivity().is_connected());
    }

    #[test]
    fn test_configure_rejects_invalid() {
        let mut t = Transport::new(MockBus::new());
        assert_eq!(
            t.configure(BusConfig::new(0xFF, I2cConfig::default())),
            Err(DisplayError::InvalidAddress(0xFF))
        );
        assert!(t.config().is_none());
        assert!(t.bus.config.is_none());
    }

    #[test]
    fn test_write_byte_framing() {
        let mut t = configured();
        t.write_byte(0xAF, Frame::Command).unwrap();
        t.write_byte(0x55, Frame::Data).unwrap();
        t.write_byte(0xAA, Frame::DataStream).unwrap();

        assert_eq!(t.bus.writes[0], (0x3C, vec![0x00, 0xAF]));
        assert_eq!(t.bus.writes[1], (0x3C, vec![0xC0, 0x55]));
        assert_eq!(t.bus.writes[2], (0x3C, vec![0x40, 0xAA]));
    }

    #[test]
    fn test_send_sequence_stops_on_failure() {
        let mut t = configured();
        t.bus.fail_after(2, I2cBusError::Nack);

        let result = t.send_sequence(&[0xAE, 0xD5, 0x80, 0xA8]);
        assert_eq!(result, Err(DisplayError::Transport(I2cBusError::Nack)));
        // Two good writes plus the failed attempt, nothing after
        assert_eq!(t.bus.writes.len(), 3);
        assert!(!t.connectivity().is_connected());
        assert_eq!(t.connectivity().last_error(), Some(I2cBusError::Nack));
    }

    #[test]
    fn test_write_data_chunks() {
        let mut t = configured();
        let data: Vec<u8> = (0..100u8).collect();
        t.write_data(&data).unwrap();

        // 100 bytes in 31-byte chunks: 31 + 31 + 31 + 7
        assert_eq!(t.bus.writes.len(), 4);
        for (_, packet) in &t.bus.writes {
            assert!(packet.len() <= MAX_PACKET_LEN);
            assert_eq!(packet[0], 0x40);
        }
        let streamed: Vec<u8> = t
            .bus
            .writes
            .iter()
            .flat_map(|(_, p)| p[1..].iter().copied())
            .collect();
        assert_eq!(streamed, data);
    }

    #[test]
    fn test_release() {
        let mut t = configured();
        t.release();
        assert!(t.config().is_none());
        assert!(t.bus.released);
        assert_eq!(
            t.write_byte(0xE3, Frame::Command),
            Err(DisplayError::NotInitialized)
        );
    }
}
