//! `embedded-graphics` integration
//!
//! Shapes, text and images from `embedded-graphics` draw through
//! [`DrawPixel::draw_pixel`], so they clip and behave exactly like direct
//! pixel calls. Nothing reaches the device until `update`.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

use dotmatrix_core::{Color, DrawPixel};

use crate::display::Ssd1306;

impl<B, D> OriginDimensions for Ssd1306<B, D> {
    fn size(&self) -> Size {
        let (width, height) = self.dimensions();
        Size::new(width as u32, height as u32)
    }
}

impl<B, D> DrawTarget for Ssd1306<B, D> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Anything beyond i16 is off screen anyway
            let (Ok(x), Ok(y)) = (i16::try_from(point.x), i16::try_from(point.y)) else {
                continue;
            };
            self.draw_pixel(x, y, Color::from(color.is_on()));
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        if let Some(fb) = self.buffer.as_mut() {
            fb.fill(if color.is_on() { 0xFF } else { 0x00 });
        }
        Ok(())
    }
}
