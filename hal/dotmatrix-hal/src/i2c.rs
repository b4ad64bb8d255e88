//! I2C bus abstractions
//!
//! Provides the blocking write primitive the display drivers use, plus an
//! adapter for any `embedded-hal` 1.0 I2C implementation.

use core::fmt;

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error (misplaced START/STOP)
    Bus,
    /// Arbitration lost to another master
    ArbitrationLost,
    /// NACK received (device absent or busy)
    Nack,
    /// Transfer did not complete within the configured timeout
    Timeout,
    /// Overrun/underrun
    Overrun,
    /// Bus used before it was configured
    NotConfigured,
    /// Other error
    Other,
}

impl fmt::Display for I2cBusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            I2cBusError::Bus => "bus error",
            I2cBusError::ArbitrationLost => "arbitration lost",
            I2cBusError::Nack => "no acknowledge",
            I2cBusError::Timeout => "timeout",
            I2cBusError::Overrun => "overrun",
            I2cBusError::NotConfigured => "bus not configured",
            I2cBusError::Other => "unknown bus error",
        };
        f.write_str(reason)
    }
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// I2C bus master
///
/// Every call blocks until the transfer completes or the configured timeout
/// expires. The bus may be shared with other peripherals; implementations
/// must not hold it between calls.
pub trait I2cBus {
    /// Apply clock rate, pin routing and timeout
    ///
    /// Called once per driver `begin`. Calling it again replaces the
    /// previous configuration.
    fn configure(&mut self, config: &I2cConfig) -> Result<(), I2cBusError>;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write, sent as one START..STOP transaction
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError>;

    /// Release the peripheral (driver deinitialization)
    fn release(&mut self) {}
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// SDA GPIO number (routed by the platform)
    pub sda_pin: u8,
    /// SCL GPIO number (routed by the platform)
    pub scl_pin: u8,
    /// Per-transaction timeout in microseconds
    pub timeout_us: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Default per-transaction timeout (50 ms)
    pub const DEFAULT_TIMEOUT_US: u32 = 50_000;

    /// Standard mode (100 kHz) on GPIO18/GPIO19
    pub const STANDARD: Self = Self {
        frequency: 100_000,
        sda_pin: 18,
        scl_pin: 19,
        timeout_us: Self::DEFAULT_TIMEOUT_US,
    };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self {
        frequency: 400_000,
        ..Self::STANDARD
    };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
        ..Self::STANDARD
    };

    /// Same configuration on different pins
    pub const fn with_pins(self, sda_pin: u8, scl_pin: u8) -> Self {
        Self {
            sda_pin,
            scl_pin,
            ..self
        }
    }
}

/// Adapter from an `embedded-hal` 1.0 blocking I2C peripheral
///
/// Clock rate and pins are fixed when the HAL peripheral is constructed,
/// so `configure` only records the configuration and arms the adapter.
pub struct EmbeddedHalBus<I> {
    i2c: I,
    config: Option<I2cConfig>,
}

impl<I: I2c> EmbeddedHalBus<I> {
    /// Wrap an `embedded-hal` I2C peripheral
    pub fn new(i2c: I) -> Self {
        Self { i2c, config: None }
    }

    /// Configuration recorded by the last `configure`
    pub fn config(&self) -> Option<&I2cConfig> {
        self.config.as_ref()
    }

    /// Unwrap the peripheral
    pub fn into_inner(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cBus for EmbeddedHalBus<I> {
    fn configure(&mut self, config: &I2cConfig) -> Result<(), I2cBusError> {
        self.config = Some(*config);
        Ok(())
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
        if self.config.is_none() {
            return Err(I2cBusError::NotConfigured);
        }
        self.i2c
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn release(&mut self) {
        self.config = None;
    }
}
