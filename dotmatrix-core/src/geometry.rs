//! Screen geometry
//!
//! The controller addresses display RAM in pages: horizontal bands of
//! eight pixel rows, one byte per column per page. Height therefore has to
//! be a whole number of pages.

use core::fmt;

/// Pixel rows per page
pub const PAGE_HEIGHT: u16 = 8;

/// Largest column count a page-addressed controller drives
pub const MAX_WIDTH: u16 = 128;

/// Largest row count (multiplex ratio 64)
pub const MAX_HEIGHT: u16 = 64;

/// Invalid screen dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Width is zero
    ZeroWidth,
    /// Width exceeds the controller's column count
    WidthTooLarge(u16),
    /// Height is zero or not a multiple of 8
    HeightNotPageAligned(u16),
    /// Height exceeds the controller's row count
    HeightTooLarge(u16),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::ZeroWidth => write!(f, "width must be non-zero"),
            GeometryError::WidthTooLarge(w) => write!(f, "width {} exceeds {}", w, MAX_WIDTH),
            GeometryError::HeightNotPageAligned(h) => {
                write!(f, "height {} is not a non-zero multiple of {}", h, PAGE_HEIGHT)
            }
            GeometryError::HeightTooLarge(h) => write!(f, "height {} exceeds {}", h, MAX_HEIGHT),
        }
    }
}

/// Validated screen dimensions in pixels
///
/// Deserializing goes through [`Geometry::new`], so a stored config cannot
/// describe an unaligned or oversized panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Dimensions", into = "Dimensions")
)]
pub struct Geometry {
    width: u16,
    height: u16,
}

impl Geometry {
    /// 128x64 panel (the common 0.96" module)
    pub const W128_H64: Self = Self {
        width: 128,
        height: 64,
    };

    /// 128x32 panel
    pub const W128_H32: Self = Self {
        width: 128,
        height: 32,
    };

    /// 96x16 panel
    pub const W96_H16: Self = Self {
        width: 96,
        height: 16,
    };

    /// Validate and create a geometry
    pub const fn new(width: u16, height: u16) -> Result<Self, GeometryError> {
        if width == 0 {
            return Err(GeometryError::ZeroWidth);
        }
        if width > MAX_WIDTH {
            return Err(GeometryError::WidthTooLarge(width));
        }
        if height == 0 || height % PAGE_HEIGHT != 0 {
            return Err(GeometryError::HeightNotPageAligned(height));
        }
        if height > MAX_HEIGHT {
            return Err(GeometryError::HeightTooLarge(height));
        }
        Ok(Self { width, height })
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of 8-row pages
    pub const fn pages(&self) -> u16 {
        self.height / PAGE_HEIGHT
    }

    /// Buffer size in bytes (width x pages)
    pub const fn buffer_len(&self) -> usize {
        self.width as usize * self.pages() as usize
    }

    /// Check whether a signed coordinate lies on screen
    pub const fn contains(&self, x: i16, y: i16) -> bool {
        x >= 0 && y >= 0 && (x as u16) < self.width && (y as u16) < self.height
    }

    /// Linear buffer index and bit mask for an on-screen pixel
    ///
    /// Returns `None` for off-screen coordinates.
    pub const fn locate(&self, x: i16, y: i16) -> Option<(usize, u8)> {
        if !self.contains(x, y) {
            return None;
        }
        let (x, y) = (x as u16, y as u16);
        let page = y / PAGE_HEIGHT;
        let bit = y % PAGE_HEIGHT;
        Some((
            page as usize * self.width as usize + x as usize,
            1u8 << bit,
        ))
    }
}

/// Unvalidated width/height pair as stored in a config file
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct Dimensions {
    width: u16,
    height: u16,
}

#[cfg(feature = "serde")]
impl TryFrom<Dimensions> for Geometry {
    type Error = GeometryError;

    fn try_from(d: Dimensions) -> Result<Self, Self::Error> {
        Geometry::new(d.width, d.height)
    }
}

#[cfg(feature = "serde")]
impl From<Geometry> for Dimensions {
    fn from(g: Geometry) -> Self {
        Self {
            width: g.width,
            height: g.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_128x64_layout() {
        let g = Geometry::W128_H64;
        assert_eq!(g.pages(), 8);
        assert_eq!(g.buffer_len(), 1024);
        assert_eq!(Geometry::new(128, 64), Ok(g));
    }

    #[test]
    fn test_presets_are_valid() {
        for g in [Geometry::W128_H64, Geometry::W128_H32, Geometry::W96_H16] {
            assert_eq!(Geometry::new(g.width(), g.height()), Ok(g));
        }
        assert_eq!(Geometry::W128_H32.buffer_len(), 512);
        assert_eq!(Geometry::W96_H16.buffer_len(), 192);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert_eq!(Geometry::new(0, 64), Err(GeometryError::ZeroWidth));
        assert_eq!(Geometry::new(129, 64), Err(GeometryError::WidthTooLarge(129)));
        assert_eq!(
            Geometry::new(128, 60),
            Err(GeometryError::HeightNotPageAligned(60))
        );
        assert_eq!(
            Geometry::new(128, 0),
            Err(GeometryError::HeightNotPageAligned(0))
        );
        assert_eq!(Geometry::new(128, 72), Err(GeometryError::HeightTooLarge(72)));
    }

    #[test]
    fn test_locate() {
        let g = Geometry::W128_H64;
        assert_eq!(g.locate(0, 0), Some((0, 0x01)));
        assert_eq!(g.locate(5, 7), Some((5, 0x80)));
        // Row 8 starts page 1
        assert_eq!(g.locate(5, 8), Some((128 + 5, 0x01)));
        assert_eq!(g.locate(127, 63), Some((1023, 0x80)));

        assert_eq!(g.locate(128, 0), None);
        assert_eq!(g.locate(0, 64), None);
        assert_eq!(g.locate(-1, 0), None);
        assert_eq!(g.locate(0, -1), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_stored_dimensions_are_validated() {
        let stored = Dimensions::from(Geometry::W128_H32);
        assert_eq!((stored.width, stored.height), (128, 32));
        assert_eq!(Geometry::try_from(stored), Ok(Geometry::W128_H32));

        let bad = Dimensions {
            width: 128,
            height: 30,
        };
        assert_eq!(
            Geometry::try_from(bad),
            Err(GeometryError::HeightNotPageAligned(30))
        );
    }
}
