//! Device reachability tracking
//!
//! Every bus write outcome lands here. The flags are per driver instance,
//! so two displays on different buses never share state.

use dotmatrix_hal::I2cBusError;

/// Result of a connectivity probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Connection {
    /// Device acknowledged the probe
    Reachable,
    /// Probe write failed
    Unreachable,
    /// No bus configuration held; call `begin` first
    Uninitialized,
}

impl Connection {
    /// Check if the device answered
    pub fn is_reachable(&self) -> bool {
        matches!(self, Connection::Reachable)
    }
}

/// Last-known reachability plus the debug toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Connectivity {
    connected: bool,
    debug: bool,
    last_error: Option<I2cBusError>,
}

impl Connectivity {
    /// Disconnected, debug off
    pub const fn new() -> Self {
        Self {
            connected: false,
            debug: false,
            last_error: None,
        }
    }

    /// Record one transport attempt
    pub fn record(&mut self, result: Result<(), I2cBusError>) {
        match result {
            Ok(()) => self.connected = true,
            Err(e) => {
                self.connected = false;
                self.last_error = Some(e);
            }
        }
    }

    /// Did the last attempt succeed
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Override the connected flag
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Are failures also logged
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Toggle failure logging
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Most recent failure reason, kept until the next failure
    pub fn last_error(&self) -> Option<I2cBusError> {
        self.last_error
    }
}
