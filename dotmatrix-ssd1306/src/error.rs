//! Driver error type

use core::fmt;

use dotmatrix_core::{BufferError, GeometryError};
use dotmatrix_hal::I2cBusError;

/// Errors surfaced by the SSD1306 driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus write failed (timeout, NACK, ...)
    Transport(I2cBusError),
    /// Invalid screen dimensions
    Geometry(GeometryError),
    /// Buffer range violation or allocation failure
    Buffer(BufferError),
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
    /// Clock rate of zero
    InvalidClock,
    /// No bus configuration or no pixel buffer (before `begin`, after `deinit`)
    NotInitialized,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Transport(e) => write!(f, "bus write failed: {}", e),
            DisplayError::Geometry(e) => write!(f, "invalid geometry: {}", e),
            DisplayError::Buffer(e) => write!(f, "buffer error: {}", e),
            DisplayError::InvalidAddress(a) => write!(f, "address {:#04x} is not 7-bit", a),
            DisplayError::InvalidClock => write!(f, "bus clock rate must be non-zero"),
            DisplayError::NotInitialized => write!(f, "display not initialized"),
        }
    }
}

impl From<I2cBusError> for DisplayError {
    fn from(e: I2cBusError) -> Self {
        DisplayError::Transport(e)
    }
}

impl From<GeometryError> for DisplayError {
    fn from(e: GeometryError) -> Self {
        DisplayError::Geometry(e)
    }
}

impl From<BufferError> for DisplayError {
    fn from(e: BufferError) -> Self {
        DisplayError::Buffer(e)
    }
}
