//! Buffered SSD1306 OLED driver
//!
//! Drives a monochrome SSD1306 panel over a blocking I2C bus:
//!
//! - Command/data framing with packet chunking (`transport`)
//! - Power-up and control command sequences (`command`)
//! - Controller state machine and pixel buffer ownership (`display`)
//! - Buffer to display RAM synchronization (`sync`)
//! - Per-instance reachability tracking (`connectivity`)
//!
//! Drawing only touches the in-memory buffer; call
//! [`Ssd1306::update`] to put it on screen.
//!
//! ```ignore
//! let mut oled = Ssd1306::new(bus, delay, DisplayConfig::W128_H64);
//! oled.begin(BusConfig::default())?;
//! oled.draw_pixel(10, 10, Color::White);
//! oled.update()?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod connectivity;
pub mod display;
pub mod error;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod sync;
pub mod transport;

#[cfg(test)]
mod mock;

pub use config::{BusConfig, DisplayConfig, Rotation, ALTERNATE_ADDRESS, DEFAULT_ADDRESS};
pub use connectivity::{Connection, Connectivity};
pub use display::{PowerState, Ssd1306, INIT_DELAY_MS};
pub use error::DisplayError;
pub use transport::{Frame, DATA_CHUNK_LEN, MAX_PACKET_LEN};

// Re-export the pieces callers need alongside the driver
pub use dotmatrix_core::{Color, DrawPixel, DrawPixelExt, FrameBuffer, Geometry};
pub use dotmatrix_hal::{I2cBus, I2cBusError, I2cConfig};
