//! SSD1306 display controller
//!
//! Owns the bus transport, the delay provider and the pixel buffer, and
//! moves the device through its power states:
//!
//! ```text
//!              begin                power_down / set_enable(false)
//! Uninitialized ─────▶ Active ◀────────────────────────────────▶ PoweredDown
//!       ▲                │            set_enable(true)                │
//!       │ begin failed   │ deinit                                     │ deinit
//!       └────────────────┴──────────▶ PoweredDown (buffer released) ◀─┘
//! ```
//!
//! `deinit` before any `begin` goes straight to `PoweredDown`.
//!
//! Losing the device is not a state: commands are still attempted and fail
//! fast, with the outcome kept in the connectivity tracker.

use dotmatrix_core::{Color, DrawPixel, FrameBuffer, Geometry};
use dotmatrix_hal::{DelayNs, I2cBus, I2cBusError};

use crate::command::{self, cmd, ScrollDirection};
use crate::config::{BusConfig, DisplayConfig};
use crate::connectivity::Connection;
use crate::error::DisplayError;
use crate::transport::{Frame, Transport};

/// Settle time after power-on and before Display-On
pub const INIT_DELAY_MS: u32 = 100;

/// Controller power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// No successful `begin` yet (or the last one failed)
    Uninitialized,
    /// Initialized and displaying
    Active,
    /// Display off; buffer kept after `power_down`, released after `deinit`
    PoweredDown,
}

/// Buffered SSD1306 driver
pub struct Ssd1306<B, D> {
    pub(crate) transport: Transport<B>,
    pub(crate) delay: D,
    pub(crate) config: DisplayConfig,
    pub(crate) buffer: Option<FrameBuffer>,
    state: PowerState,
}

impl<B, D> Ssd1306<B, D> {
    /// Create a driver; nothing is sent or allocated until `begin`
    pub fn new(bus: B, delay: D, config: DisplayConfig) -> Self {
        Self {
            transport: Transport::new(bus),
            delay,
            config,
            buffer: None,
            state: PowerState::Uninitialized,
        }
    }

    /// Give back the bus handle and delay provider
    pub fn release(self) -> (B, D) {
        (self.transport.into_inner(), self.delay)
    }

    /// Panel description
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Screen geometry
    pub fn geometry(&self) -> Geometry {
        self.config.geometry
    }

    /// Current power state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Bus configuration captured by the last successful `begin`
    pub fn bus_config(&self) -> Option<&BusConfig> {
        self.transport.config()
    }

    // --- Connectivity ---

    /// Did the last bus write succeed
    pub fn is_connected(&self) -> bool {
        self.transport.connectivity().is_connected()
    }

    /// Override the connected flag
    pub fn set_connected(&mut self, connected: bool) {
        self.transport.connectivity_mut().set_connected(connected);
    }

    /// Are bus failures logged
    pub fn debug_mode(&self) -> bool {
        self.transport.connectivity().debug()
    }

    /// Log bus failures (requires the `defmt` feature to produce output)
    pub fn set_debug_mode(&mut self, debug: bool) {
        self.transport.connectivity_mut().set_debug(debug);
    }

    /// Most recent bus failure reason
    pub fn last_error(&self) -> Option<I2cBusError> {
        self.transport.connectivity().last_error()
    }

    // --- Pixel buffer ---

    /// Pixel buffer, if allocated
    pub fn frame_buffer(&self) -> Option<&FrameBuffer> {
        self.buffer.as_ref()
    }

    /// Raw buffer bytes; empty when released
    pub fn buffer(&self) -> &[u8] {
        match &self.buffer {
            Some(fb) => fb.as_bytes(),
            None => &[],
        }
    }

    /// Raw buffer bytes for bulk composition; empty when released
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        match &mut self.buffer {
            Some(fb) => fb.as_mut_bytes(),
            None => &mut [],
        }
    }

    /// Read one pixel; `None` when off screen or no buffer
    pub fn pixel(&self, x: i16, y: i16) -> Option<bool> {
        self.buffer.as_ref().and_then(|fb| fb.pixel(x, y))
    }

    fn buffer_or_err(&mut self) -> Result<&mut FrameBuffer, DisplayError> {
        self.buffer.as_mut().ok_or(DisplayError::NotInitialized)
    }

    /// Zero the buffer; the screen changes on the next `update`
    pub fn clear_all(&mut self) -> Result<(), DisplayError> {
        self.buffer_or_err()?.clear();
        Ok(())
    }

    /// Set every buffer byte to an 8-pixel pattern
    pub fn fill_all(&mut self, pattern: u8) -> Result<(), DisplayError> {
        self.buffer_or_err()?.fill(pattern);
        Ok(())
    }

    /// Set every byte of one page to a pattern
    pub fn fill_page(&mut self, page: u16, pattern: u8) -> Result<(), DisplayError> {
        self.buffer_or_err()?.fill_page(page, pattern)?;
        Ok(())
    }

    /// Copy a packed sub-image into the buffer, overwriting, clipped
    pub fn write_region(
        &mut self,
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        data: &[u8],
    ) -> Result<(), DisplayError> {
        self.buffer_or_err()?.write_region(x, y, w, h, data)?;
        Ok(())
    }

    /// OR a packed sub-image (optionally complemented) into the buffer
    pub fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        w: u16,
        h: u16,
        data: &[u8],
        invert: bool,
    ) -> Result<(), DisplayError> {
        self.buffer_or_err()?.draw_bitmap(x, y, w, h, data, invert)?;
        Ok(())
    }
}

impl<B, D> Ssd1306<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    /// Configure the bus, allocate the buffer and power the panel up
    ///
    /// Calling it again replaces the bus configuration and reallocates the
    /// buffer. On failure the state is `Uninitialized` and the device is
    /// reported disconnected; a rejected configuration also drops the
    /// previous one.
    pub fn begin(&mut self, bus_config: BusConfig) -> Result<(), DisplayError> {
        self.state = PowerState::Uninitialized;

        match self.prepare(bus_config).and_then(|()| self.power_up(bus_config)) {
            Ok(()) => {
                self.state = PowerState::Active;
                #[cfg(feature = "defmt")]
                defmt::info!("SSD1306 initialized at {=u8:#x}", bus_config.address);
                Ok(())
            }
            Err(e) => {
                self.set_connected(false);
                #[cfg(feature = "defmt")]
                defmt::warn!("SSD1306 init failed: {}", e);
                Err(e)
            }
        }
    }

    /// Validate the configuration and reallocate the buffer
    fn prepare(&mut self, bus_config: BusConfig) -> Result<(), DisplayError> {
        let result = bus_config.validate().and_then(|()| {
            self.buffer = None;
            self.buffer = Some(FrameBuffer::new(self.config.geometry)?);
            Ok(())
        });
        if result.is_err() {
            self.transport.release();
        }
        result
    }

    fn power_up(&mut self, bus_config: BusConfig) -> Result<(), DisplayError> {
        self.transport.configure(bus_config)?;
        self.delay.delay_ms(INIT_DELAY_MS);
        self.transport
            .send_sequence(&command::init_sequence(&self.config))?;
        self.delay.delay_ms(INIT_DELAY_MS);
        self.transport.write_byte(cmd::DISPLAY_ON, Frame::Command)
    }

    /// Display off, release the buffer and the bus
    ///
    /// The buffer and bus are released even when Display-Off fails; the
    /// failure is still returned. Calling it again is a no-op.
    pub fn deinit(&mut self) -> Result<(), DisplayError> {
        if self.transport.config().is_none() && self.buffer.is_none() {
            self.state = PowerState::PoweredDown;
            return Ok(());
        }
        let result = match self.transport.config() {
            Some(_) => self.transport.write_byte(cmd::DISPLAY_OFF, Frame::Command),
            None => Ok(()),
        };
        self.buffer = None;
        self.transport.release();
        self.state = PowerState::PoweredDown;
        result
    }

    /// Display off, keeping the buffer; `set_enable(true)` resumes
    pub fn power_down(&mut self) -> Result<(), DisplayError> {
        self.set_enable(false)
    }

    /// Switch the panel on or off
    pub fn set_enable(&mut self, on: bool) -> Result<(), DisplayError> {
        let opcode = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.transport.write_byte(opcode, Frame::Command)?;
        self.state = match (self.state, on) {
            (PowerState::Uninitialized, _) => PowerState::Uninitialized,
            (_, true) if self.buffer.is_some() => PowerState::Active,
            (state, true) => state,
            (_, false) => PowerState::PoweredDown,
        };
        Ok(())
    }

    /// Set contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.transport
            .send_sequence(&command::with_param(cmd::SET_CONTRAST, contrast))
    }

    /// Invert display polarity in hardware (buffer unchanged)
    pub fn set_invert(&mut self, on: bool) -> Result<(), DisplayError> {
        let opcode = if on {
            cmd::INVERT_DISPLAY
        } else {
            cmd::NORMAL_DISPLAY
        };
        self.transport.write_byte(opcode, Frame::Command)
    }

    /// Light every pixel regardless of RAM contents (panel test)
    pub fn set_all_on(&mut self, on: bool) -> Result<(), DisplayError> {
        let opcode = if on {
            cmd::DISPLAY_ALL_ON
        } else {
            cmd::DISPLAY_ALL_ON_RESUME
        };
        self.transport.write_byte(opcode, Frame::Command)
    }

    // --- Scrolling ---
    //
    // Page numbers go to the device as given. Starting a scroll while
    // another is active is left to the controller.

    /// Scroll pages `start..=stop` to the right
    pub fn start_scroll_right(&mut self, start: u8, stop: u8) -> Result<(), DisplayError> {
        self.transport.send_sequence(&command::horizontal_scroll(
            ScrollDirection::Right,
            start,
            stop,
        ))
    }

    /// Scroll pages `start..=stop` to the left
    pub fn start_scroll_left(&mut self, start: u8, stop: u8) -> Result<(), DisplayError> {
        self.transport.send_sequence(&command::horizontal_scroll(
            ScrollDirection::Left,
            start,
            stop,
        ))
    }

    /// Scroll pages `start..=stop` right while scrolling vertically
    pub fn start_scroll_diag_right(&mut self, start: u8, stop: u8) -> Result<(), DisplayError> {
        let seq = command::diagonal_scroll(
            &self.config.geometry,
            ScrollDirection::Right,
            start,
            stop,
        );
        self.transport.send_sequence(&seq)
    }

    /// Scroll pages `start..=stop` left while scrolling vertically
    pub fn start_scroll_diag_left(&mut self, start: u8, stop: u8) -> Result<(), DisplayError> {
        let seq = command::diagonal_scroll(
            &self.config.geometry,
            ScrollDirection::Left,
            start,
            stop,
        );
        self.transport.send_sequence(&seq)
    }

    /// Stop any scroll
    pub fn stop_scroll(&mut self) -> Result<(), DisplayError> {
        self.transport
            .write_byte(cmd::DEACTIVATE_SCROLL, Frame::Command)
    }

    /// Probe the device with a NOP
    pub fn check_connection(&mut self) -> Connection {
        if self.transport.config().is_none() {
            return Connection::Uninitialized;
        }
        match self.transport.write_byte(cmd::NOP, Frame::Command) {
            Ok(()) => Connection::Reachable,
            Err(_) => Connection::Unreachable,
        }
    }
}

impl<B, D> DrawPixel for Ssd1306<B, D> {
    /// Buffer-only; a no-op when off screen or when no buffer is allocated
    fn draw_pixel(&mut self, x: i16, y: i16, color: Color) {
        if let Some(fb) = self.buffer.as_mut() {
            fb.set_pixel(x, y, color);
        }
    }

    fn dimensions(&self) -> (u16, u16) {
        let g = self.config.geometry;
        (g.width(), g.height())
    }
}
