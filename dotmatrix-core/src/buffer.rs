//! Page-packed pixel buffer
//!
//! Memory layout matches controller display RAM in horizontal addressing
//! mode, so the whole buffer can be streamed to the device unchanged:
//!
//! ```text
//! byte index = page * width + x        page = y / 8
//! bit        = y % 8                   bit 0 = top row of the page
//! ```
//!
//! Sub-images handed to [`FrameBuffer::write_region`] and
//! [`FrameBuffer::draw_bitmap`] use the same packing, `w` bytes per page
//! and `ceil(h / 8)` pages.

use alloc::vec::Vec;
use core::fmt;

use crate::geometry::{Geometry, PAGE_HEIGHT};
use crate::traits::{Color, DrawPixel};

/// Errors from buffer operations with explicit range contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// Page index at or past the page count
    PageOutOfRange {
        /// Requested page
        page: u16,
        /// Number of pages on this screen
        pages: u16,
    },
    /// Source image holds fewer bytes than its dimensions require
    DataTooShort {
        /// Bytes needed for `w * ceil(h / 8)`
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
    /// Buffer memory could not be reserved
    AllocationFailed,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::PageOutOfRange { page, pages } => {
                write!(f, "page {} out of range (0..{})", page, pages)
            }
            BufferError::DataTooShort { expected, actual } => {
                write!(f, "image needs {} bytes, got {}", expected, actual)
            }
            BufferError::AllocationFailed => write!(f, "buffer allocation failed"),
        }
    }
}

/// Bytes a packed `w` x `h` image occupies
pub const fn packed_len(w: u16, h: u16) -> usize {
    w as usize * h.div_ceil(PAGE_HEIGHT) as usize
}

/// Read pixel (i, j) from a packed source image of width `w`
fn source_bit(data: &[u8], w: u16, i: u16, j: u16) -> u8 {
    let index = (j / PAGE_HEIGHT) as usize * w as usize + i as usize;
    data[index] >> (j % PAGE_HEIGHT) & 1
}

/// 1-bit-per-pixel frame buffer in controller page order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    geometry: Geometry,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate a zeroed buffer for the given geometry
    ///
    /// Allocation failure is reported instead of aborting.
    pub fn new(geometry: Geometry) -> Result<Self, BufferError> {
        let len = geometry.buffer_len();
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BufferError::AllocationFailed)?;
        data.resize(len, 0);
        Ok(Self { geometry, data })
    }

    /// Screen geometry this buffer was sized for
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Buffer length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a validated geometry
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw buffer contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Raw buffer contents for bulk external composition
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// One page (band of 8 rows) of the buffer
    pub fn page(&self, page: u16) -> Option<&[u8]> {
        if page >= self.geometry.pages() {
            return None;
        }
        let width = self.geometry.width() as usize;
        let start = page as usize * width;
        Some(&self.data[start..start + width])
    }

    /// Set, clear or invert one pixel; off-screen coordinates are ignored
    pub fn set_pixel(&mut self, x: i16, y: i16, color: Color) {
        if let Some((index, mask)) = self.geometry.locate(x, y) {
            match color {
                Color::White => self.data[index] |= mask,
                Color::Black => self.data[index] &= !mask,
                Color::Inverse => self.data[index] ^= mask,
            }
        }
    }

    /// Read one pixel; `None` when off screen
    pub fn pixel(&self, x: i16, y: i16) -> Option<bool> {
        self.geometry
            .locate(x, y)
            .map(|(index, mask)| self.data[index] & mask != 0)
    }

    /// Zero the whole buffer (all pixels black)
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Set every byte to a literal 8-pixel pattern
    pub fn fill(&mut self, pattern: u8) {
        self.data.fill(pattern);
    }

    /// Set every byte of one page to a pattern
    pub fn fill_page(&mut self, page: u16, pattern: u8) -> Result<(), BufferError> {
        let pages = self.geometry.pages();
        if page >= pages {
            return Err(BufferError::PageOutOfRange { page, pages });
        }
        let width = self.geometry.width() as usize;
        let start = page as usize * width;
        self.data[start..start + width].fill(pattern);
        Ok(())
    }

    /// Copy a packed sub-image into the buffer at (x, y), overwriting
    ///
    /// Pixels falling off screen are clipped.
    pub fn write_region(
        &mut self,
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        data: &[u8],
    ) -> Result<(), BufferError> {
        check_source(w, h, data)?;
        for j in 0..h {
            for i in 0..w {
                if let Some((index, mask)) = self.locate_offset(x, y, i, j) {
                    if source_bit(data, w, i, j) != 0 {
                        self.data[index] |= mask;
                    } else {
                        self.data[index] &= !mask;
                    }
                }
            }
        }
        Ok(())
    }

    /// OR a packed sub-image into the buffer at (x, y)
    ///
    /// With `invert` the complement of each source byte is ORed instead.
    /// Existing set pixels are never cleared. Pixels falling off screen
    /// are clipped.
    pub fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        data: &[u8],
        invert: bool,
    ) -> Result<(), BufferError> {
        check_source(w, h, data)?;
        let flip = invert as u8;
        for j in 0..h {
            for i in 0..w {
                if source_bit(data, w, i, j) ^ flip == 0 {
                    continue;
                }
                if let Some((index, mask)) = self.locate_offset(x, y, i, j) {
                    self.data[index] |= mask;
                }
            }
        }
        Ok(())
    }

    /// Locate (x + i, y + j) without overflowing the signed origin
    fn locate_offset(&self, x: i16, y: i16, i: u16, j: u16) -> Option<(usize, u8)> {
        let tx = i16::try_from(x as i32 + i as i32).ok()?;
        let ty = i16::try_from(y as i32 + j as i32).ok()?;
        self.geometry.locate(tx, ty)
    }
}

fn check_source(w: u16, h: u16, data: &[u8]) -> Result<(), BufferError> {
    let expected = packed_len(w, h);
    if data.len() < expected {
        return Err(BufferError::DataTooShort {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

impl DrawPixel for FrameBuffer {
    fn draw_pixel(&mut self, x: i16, y: i16, color: Color) {
        self.set_pixel(x, y, color);
    }

    fn dimensions(&self) -> (u16, u16) {
        (self.geometry.width(), self.geometry.height())
    }
}
