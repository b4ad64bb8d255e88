//! Display and bus configuration
//!
//! The panel description is fixed at construction; the bus configuration
//! is captured as one unit by every `begin`.

use dotmatrix_core::Geometry;
use dotmatrix_hal::I2cConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DisplayError;

/// Default SSD1306 I2C address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Alternate I2C address (SA0 high)
pub const ALTERNATE_ADDRESS: u8 = 0x3D;

/// Panel mounting orientation
///
/// Selects segment remap and COM scan direction in the power-up sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Column 0 at the left, page 0 at the top
    #[default]
    Normal,
    /// Upside down
    Rotate180,
}

/// Panel description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Screen size
    pub geometry: Geometry,
    /// Mounting orientation
    pub rotation: Rotation,
}

impl DisplayConfig {
    /// 128x64 panel, normal orientation
    pub const W128_H64: Self = Self::new(Geometry::W128_H64);

    /// 128x32 panel, normal orientation
    pub const W128_H32: Self = Self::new(Geometry::W128_H32);

    /// 96x16 panel, normal orientation
    pub const W96_H16: Self = Self::new(Geometry::W96_H16);

    /// Panel with the given geometry, normal orientation
    pub const fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            rotation: Rotation::Normal,
        }
    }

    /// Validate raw dimensions into a config
    pub const fn with_size(width: u16, height: u16) -> Result<Self, DisplayError> {
        match Geometry::new(width, height) {
            Ok(geometry) => Ok(Self::new(geometry)),
            Err(e) => Err(DisplayError::Geometry(e)),
        }
    }

    /// Same panel mounted differently
    pub const fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::W128_H64
    }
}

/// Bus parameters captured by `begin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// 7-bit device address
    pub address: u8,
    /// Clock rate, pins and timeout
    pub i2c: I2cConfig,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            i2c: I2cConfig::default(),
        }
    }
}

impl BusConfig {
    /// Create a bus config
    pub const fn new(address: u8, i2c: I2cConfig) -> Self {
        Self { address, i2c }
    }

    /// Check address width and clock rate
    pub fn validate(&self) -> Result<(), DisplayError> {
        if self.address > 0x7F {
            return Err(DisplayError::InvalidAddress(self.address));
        }
        if self.i2c.frequency == 0 {
            return Err(DisplayError::InvalidClock);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotmatrix_core::GeometryError;

    #[test]
    fn test_display_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.geometry, Geometry::W128_H64);
        assert_eq!(config.rotation, Rotation::Normal);

        let rotated = DisplayConfig::W128_H32.with_rotation(Rotation::Rotate180);
        assert_eq!(rotated.geometry.height(), 32);
        assert_eq!(rotated.rotation, Rotation::Rotate180);
    }

    #[test]
    fn test_with_size() {
        assert_eq!(DisplayConfig::with_size(128, 64), Ok(DisplayConfig::W128_H64));
        assert_eq!(
            DisplayConfig::with_size(128, 20),
            Err(DisplayError::Geometry(GeometryError::HeightNotPageAligned(20)))
        );
    }

    #[test]
    fn test_bus_config_validation() {
        let config = BusConfig::default();
        assert_eq!(config.address, 0x3C);
        assert_eq!(config.i2c.frequency, 100_000);
        assert!(config.validate().is_ok());

        assert!(BusConfig::new(ALTERNATE_ADDRESS, I2cConfig::FAST)
            .validate()
            .is_ok());

        assert_eq!(
            BusConfig::new(0x80, I2cConfig::default()).validate(),
            Err(DisplayError::InvalidAddress(0x80))
        );

        let mut stopped = I2cConfig::default();
        stopped.frequency = 0;
        assert_eq!(
            BusConfig::new(DEFAULT_ADDRESS, stopped).validate(),
            Err(DisplayError::InvalidClock)
        );
    }
}
