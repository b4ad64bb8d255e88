//! Buffer to display RAM synchronization
//!
//! Horizontal addressing mode is set once at power-up, so after resetting
//! the column/page window the whole buffer streams in buffer order with
//! the controller auto-incrementing through columns and pages.

use dotmatrix_hal::{DelayNs, I2cBus};

use crate::command;
use crate::display::Ssd1306;
use crate::error::DisplayError;
use crate::transport::Frame;

impl<B, D> Ssd1306<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    /// Push the whole pixel buffer to the display
    ///
    /// A failed packet aborts the rest. Packets already sent stay on
    /// screen, so a partial update is possible.
    pub fn update(&mut self) -> Result<(), DisplayError> {
        let buffer = self.buffer.as_ref().ok_or(DisplayError::NotInitialized)?;
        self.transport
            .send_sequence(&command::full_window(&self.config.geometry))?;
        self.transport.write_data(buffer.as_bytes())
    }

    /// Fill the whole screen with a pattern, byte by byte
    ///
    /// The pattern is stored in the buffer and written straight to display
    /// RAM with `byte_delay_us` between bytes for a visible wipe.
    pub fn wipe_screen(&mut self, pattern: u8, byte_delay_us: u32) -> Result<(), DisplayError> {
        let pages = self.config.geometry.pages();
        self.fill_all(pattern)?;
        self.wipe_pages(0, pages - 1, pattern, byte_delay_us)
    }

    /// Fill one page with a pattern, byte by byte
    ///
    /// Same as [`wipe_screen`](Self::wipe_screen) scoped to one page. A
    /// page index past the last page is rejected before anything is sent.
    pub fn wipe_page(
        &mut self,
        page: u16,
        pattern: u8,
        byte_delay_us: u32,
    ) -> Result<(), DisplayError> {
        self.fill_page(page, pattern)?;
        self.wipe_pages(page, page, pattern, byte_delay_us)
    }

    fn wipe_pages(
        &mut self,
        first: u16,
        last: u16,
        pattern: u8,
        byte_delay_us: u32,
    ) -> Result<(), DisplayError> {
        let geometry = self.config.geometry;
        self.transport
            .send_sequence(&command::page_window(&geometry, first as u8, last as u8))?;

        let count = geometry.width() as usize * (last - first + 1) as usize;
        for i in 0..count {
            let frame = if i == 0 { Frame::Data } else { Frame::DataStream };
            self.transport.write_byte(pattern, frame)?;
            if byte_delay_us > 0 {
                self.delay.delay_us(byte_delay_us);
            }
        }
        Ok(())
    }
}
