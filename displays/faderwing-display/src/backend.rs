//! Display backend trait
//!
//! Defines the interface the display manager drives. The pixel-level
//! driver for the actual panel chip implements this; host tests use the
//! doubles in [`crate::mock`].

use faderwing_hal::I2cBus;

/// Monochrome draw color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off (background)
    Off,
    /// Pixel on (foreground)
    On,
    /// Toggle whatever is already in the buffer
    Invert,
}

/// Text scale supported by the panel font
///
/// Small glyphs are 6x8 pixels; the larger sizes are integer multiples
/// of that cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// 6x8 glyphs, 8 rows of 21 characters
    Small,
    /// 12x16 glyphs
    Medium,
    /// 18x24 glyphs
    Large,
}

impl TextSize {
    /// Integer scale factor applied to the base glyph cell
    pub const fn scale(self) -> u16 {
        match self {
            TextSize::Small => 1,
            TextSize::Medium => 2,
            TextSize::Large => 3,
        }
    }

    /// Glyph advance width in pixels
    pub const fn glyph_width(self) -> u16 {
        6 * self.scale()
    }

    /// Glyph height in pixels
    pub const fn glyph_height(self) -> u16 {
        8 * self.scale()
    }
}

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction with the panel failed
    Communication,
}

/// In-memory side of a panel driver
///
/// These operations touch only frame buffer and cursor state and cannot
/// fail; nothing reaches the panel until
/// [`flush`](DisplayBackend::flush).
pub trait DisplayBuffer {
    /// Blank the frame buffer
    fn clear_buffer(&mut self);

    /// Move the text cursor to a pixel position
    fn set_cursor(&mut self, x: i16, y: i16);

    /// Select the glyph scale for subsequent text
    fn set_text_size(&mut self, size: TextSize);

    /// Select the draw color for subsequent text
    fn set_text_color(&mut self, color: Color);

    /// Draw text at the cursor, advancing it; `\n` starts a new line and
    /// text wraps at the right edge
    fn write_text(&mut self, text: &str);

    /// Draw a line between two points
    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color);

    /// Draw a rectangle outline
    fn draw_rect(&mut self, x: i16, y: i16, width: u16, height: u16, color: Color);

    /// Fill a rectangle
    fn fill_rect(&mut self, x: i16, y: i16, width: u16, height: u16, color: Color);

    /// Draw a circle outline
    fn draw_circle(&mut self, x: i16, y: i16, radius: u16, color: Color);

    /// Fill a circle
    fn fill_circle(&mut self, x: i16, y: i16, radius: u16, color: Color);
}

/// Bus side of a panel driver
///
/// Everything here is a real bus transaction and reports failure.
/// `attach` retains nothing when it fails, so a caller can probe and
/// retry with the same bus indefinitely.
pub trait DisplayBackend<B: I2cBus>: DisplayBuffer + Sized {
    /// Run the chip startup sequence at `address` and return the live
    /// driver with default rendering state
    fn attach(bus: &mut B, address: u8) -> Result<Self, DisplayError>;

    /// Push the frame buffer to the panel
    fn flush(&mut self, bus: &mut B) -> Result<(), DisplayError>;

    /// Set panel contrast (0-255)
    fn set_contrast(&mut self, bus: &mut B, contrast: u8) -> Result<(), DisplayError>;

    /// Normal or inverted rendering
    fn set_inverted(&mut self, bus: &mut B, inverted: bool) -> Result<(), DisplayError>;

    /// Panel on, or sleep mode
    fn set_power(&mut self, bus: &mut B, on: bool) -> Result<(), DisplayError>;
}
