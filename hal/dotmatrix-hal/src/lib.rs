//! dotmatrix Hardware Abstraction Layer
//!
//! This crate defines the bus contract the display drivers are written
//! against. A platform provides a blocking I2C write primitive with a
//! success/failure status, a configurable clock rate and a timeout; the
//! driver crates never touch peripheral registers themselves.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dotmatrix-ssd1306 (controller driver)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dotmatrix-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │ platform bus  │
//! │ I2c adapter   │       │ (own impl)    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Blocking I2C write with explicit configuration

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key types at crate root for convenience
pub use i2c::{EmbeddedHalBus, I2cBus, I2cBusError, I2cConfig};

// Drivers take their blocking delay provider from embedded-hal directly
pub use embedded_hal::delay::DelayNs;
