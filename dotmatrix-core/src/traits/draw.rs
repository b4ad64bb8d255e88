//! Pixel drawing capability
//!
//! Generic shape and text routines only ever need one thing from a display:
//! a way to change a single pixel. Anything that owns a pixel buffer
//! implements [`DrawPixel`] and gets those routines for free.

/// Pixel color / write mode for a monochrome display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Color {
    /// Pixel off (clear the bit)
    Black = 0,
    /// Pixel on (set the bit)
    White = 1,
    /// Flip the current pixel (XOR)
    Inverse = 2,
}

impl TryFrom<u8> for Color {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::Black),
            1 => Ok(Color::White),
            2 => Ok(Color::Inverse),
            other => Err(other),
        }
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Single-pixel drawing primitive
///
/// Implementations must clip silently: coordinates outside the screen are
/// a no-op, never an error or a panic.
pub trait DrawPixel {
    /// Draw one pixel
    fn draw_pixel(&mut self, x: i16, y: i16, color: Color);

    /// Screen size in pixels as (width, height)
    fn dimensions(&self) -> (u16, u16);
}

/// Coordinates `start, start + 1, ..` for `length` steps, stopping at the
/// edge of the `i16` range instead of wrapping
fn run(start: i16, length: u16) -> impl Iterator<Item = i16> {
    let end = (start as i32 + length as i32).min(i16::MAX as i32 + 1);
    (start as i32..end).map(|v| v as i16)
}

/// Helpers built only on [`DrawPixel`]
pub trait DrawPixelExt: DrawPixel {
    /// Draw a horizontal run of pixels
    fn draw_hline(&mut self, x: i16, y: i16, length: u16, color: Color) {
        for px in run(x, length) {
            self.draw_pixel(px, y, color);
        }
    }

    /// Draw a vertical run of pixels
    fn draw_vline(&mut self, x: i16, y: i16, length: u16, color: Color) {
        for py in run(y, length) {
            self.draw_pixel(x, py, color);
        }
    }

    /// Fill a rectangle
    fn fill_rect(&mut self, x: i16, y: i16, width: u16, height: u16, color: Color) {
        for py in run(y, height) {
            self.draw_hline(x, py, width, color);
        }
    }
}

// Blanket implementation for all DrawPixel types
impl<T: DrawPixel + ?Sized> DrawPixelExt for T {}
