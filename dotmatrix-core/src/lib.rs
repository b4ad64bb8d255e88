//! Controller-independent display logic
//!
//! This crate contains everything about a 1-bit, page-addressed display that
//! does not depend on a particular controller or bus:
//!
//! - Screen geometry and its validation
//! - The page-packed pixel buffer
//! - The `DrawPixel` capability consumed by graphics routines

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod buffer;
pub mod geometry;
pub mod traits;

pub use buffer::{BufferError, FrameBuffer};
pub use geometry::{Geometry, GeometryError, PAGE_HEIGHT};
pub use traits::{Color, DrawPixel, DrawPixelExt};
