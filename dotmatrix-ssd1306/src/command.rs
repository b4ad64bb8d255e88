//! SSD1306 command set and command sequences
//!
//! Every control operation is an ordered list of single-byte opcodes, some
//! followed by one or two parameter bytes. Sequences are written here as
//! tables and flattened into a [`CommandSequence`]; the transport sends
//! them one command frame per byte.

use heapless::Vec;

use dotmatrix_core::Geometry;

use crate::config::{DisplayConfig, Rotation};

/// SSD1306 opcodes
pub mod cmd {
    // Fundamental
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const DISPLAY_ALL_ON: u8 = 0xA5;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const INVERT_DISPLAY: u8 = 0xA7;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const NOP: u8 = 0xE3;

    // Scrolling
    pub const RIGHT_HORIZONTAL_SCROLL: u8 = 0x26;
    pub const LEFT_HORIZONTAL_SCROLL: u8 = 0x27;
    pub const VERTICAL_AND_RIGHT_HORIZONTAL_SCROLL: u8 = 0x29;
    pub const VERTICAL_AND_LEFT_HORIZONTAL_SCROLL: u8 = 0x2A;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
    pub const ACTIVATE_SCROLL: u8 = 0x2F;
    pub const SET_VERTICAL_SCROLL_AREA: u8 = 0xA3;

    // Addressing
    pub const MEMORY_ADDR_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;

    // Hardware configuration
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEGMENT_REMAP: u8 = 0xA0;
    pub const SET_MULTIPLEX_RATIO: u8 = 0xA8;
    pub const COM_SCAN_DIR_INC: u8 = 0xC0;
    pub const COM_SCAN_DIR_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const CHARGE_PUMP: u8 = 0x8D;

    // Timing and driving scheme
    pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE_PERIOD: u8 = 0xD9;
    pub const SET_VCOM_DESELECT: u8 = 0xDB;
}

/// Horizontal addressing: column pointer wraps into the next page
const ADDR_MODE_HORIZONTAL: u8 = 0x00;
/// Oscillator default, divide ratio 1
const CLOCK_DIV_DEFAULT: u8 = 0x80;
/// Enable the internal charge pump
const CHARGE_PUMP_ENABLE: u8 = 0x14;
/// Phase 1 = 1 DCLK, phase 2 = 15 DCLK
const PRECHARGE_DEFAULT: u8 = 0xF1;
/// ~0.77 x VCC
const VCOM_DEFAULT: u8 = 0x40;
/// Scroll step interval field: 5 frames
const SCROLL_INTERVAL_5_FRAMES: u8 = 0x00;
/// Rows moved per frame in diagonal scroll
const DIAGONAL_VERTICAL_OFFSET: u8 = 0x01;

/// Longest sequence this driver issues
pub const MAX_SEQUENCE_LEN: usize = 32;

/// Flattened command bytes, sent in order
pub type CommandSequence = Vec<u8, MAX_SEQUENCE_LEN>;

/// Horizontal scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    /// Content moves right
    Right,
    /// Content moves left
    Left,
}

/// Flatten a table of (opcode, params...) entries
fn sequence(table: &[&[u8]]) -> CommandSequence {
    let mut seq = CommandSequence::new();
    for entry in table {
        let pushed = seq.extend_from_slice(entry);
        debug_assert!(pushed.is_ok(), "command table longer than MAX_SEQUENCE_LEN");
    }
    seq
}

/// COM pins hardware configuration for the panel height
pub fn com_pins(geometry: &Geometry) -> u8 {
    match geometry.height() {
        h if h > 32 => 0x12,
        _ => 0x02,
    }
}

/// Power-up contrast for the panel height
pub fn default_contrast(geometry: &Geometry) -> u8 {
    match geometry.height() {
        h if h > 32 => 0xCF,
        h if h > 16 => 0x8F,
        _ => 0xAF,
    }
}

/// Power-up sequence, everything up to (not including) Display-On
pub fn init_sequence(config: &DisplayConfig) -> CommandSequence {
    let geometry = &config.geometry;
    let (remap, scan) = match config.rotation {
        Rotation::Normal => (cmd::SET_SEGMENT_REMAP | 0x01, cmd::COM_SCAN_DIR_DEC),
        Rotation::Rotate180 => (cmd::SET_SEGMENT_REMAP, cmd::COM_SCAN_DIR_INC),
    };
    let mux = [cmd::SET_MULTIPLEX_RATIO, (geometry.height() - 1) as u8];
    let pins = [cmd::SET_COM_PINS, com_pins(geometry)];
    let contrast = [cmd::SET_CONTRAST, default_contrast(geometry)];

    sequence(&[
        &[cmd::DISPLAY_OFF],
        &[cmd::SET_DISPLAY_CLOCK_DIV, CLOCK_DIV_DEFAULT],
        &[cmd::DEACTIVATE_SCROLL],
        &[cmd::MEMORY_ADDR_MODE, ADDR_MODE_HORIZONTAL],
        &mux,
        &[cmd::SET_DISPLAY_OFFSET, 0x00],
        &[cmd::SET_START_LINE | 0x00],
        &[cmd::CHARGE_PUMP, CHARGE_PUMP_ENABLE],
        &[remap],
        &[scan],
        &pins,
        &contrast,
        &[cmd::SET_PRECHARGE_PERIOD, PRECHARGE_DEFAULT],
        &[cmd::SET_VCOM_DESELECT, VCOM_DEFAULT],
        &[cmd::DISPLAY_ALL_ON_RESUME],
        &[cmd::NORMAL_DISPLAY],
    ])
}

/// Column/page window covering pages `first..=last`, full width
pub fn page_window(geometry: &Geometry, first: u8, last: u8) -> CommandSequence {
    sequence(&[
        &[cmd::SET_COLUMN_ADDR, 0, (geometry.width() - 1) as u8],
        &[cmd::SET_PAGE_ADDR, first, last],
    ])
}

/// Column/page window covering the whole display RAM
pub fn full_window(geometry: &Geometry) -> CommandSequence {
    page_window(geometry, 0, (geometry.pages() - 1) as u8)
}

/// Two-byte command: opcode + parameter
pub fn with_param(opcode: u8, param: u8) -> CommandSequence {
    sequence(&[&[opcode, param]])
}

/// Continuous horizontal scroll over pages `start..=stop`
pub fn horizontal_scroll(direction: ScrollDirection, start: u8, stop: u8) -> CommandSequence {
    let opcode = match direction {
        ScrollDirection::Right => cmd::RIGHT_HORIZONTAL_SCROLL,
        ScrollDirection::Left => cmd::LEFT_HORIZONTAL_SCROLL,
    };
    sequence(&[
        &[opcode, 0x00, start, SCROLL_INTERVAL_5_FRAMES, stop, 0x00, 0xFF],
        &[cmd::ACTIVATE_SCROLL],
    ])
}

/// Vertical + horizontal scroll over pages `start..=stop`
///
/// The vertical scroll area is set to the full panel height first.
pub fn diagonal_scroll(
    geometry: &Geometry,
    direction: ScrollDirection,
    start: u8,
    stop: u8,
) -> CommandSequence {
    let opcode = match direction {
        ScrollDirection::Right => cmd::VERTICAL_AND_RIGHT_HORIZONTAL_SCROLL,
        ScrollDirection::Left => cmd::VERTICAL_AND_LEFT_HORIZONTAL_SCROLL,
    };
    let area = [cmd::SET_VERTICAL_SCROLL_AREA, 0x00, geometry.height() as u8];
    sequence(&[
        &area,
        &[
            opcode,
            0x00,
            start,
            SCROLL_INTERVAL_5_FRAMES,
            stop,
            DIAGONAL_VERTICAL_OFFSET,
        ],
        &[cmd::ACTIVATE_SCROLL],
    ])
}
