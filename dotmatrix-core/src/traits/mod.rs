//! Capability traits
//!
//! These traits define the interface between generic drawing code
//! and a concrete buffer-backed display.

pub mod draw;

pub use draw::{Color, DrawPixel, DrawPixelExt};
