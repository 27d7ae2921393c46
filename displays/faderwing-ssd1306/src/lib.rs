//! SSD1306 OLED panel backend
//!
//! Driver for the 128x64 SSD1306 panels fitted to the fader wing,
//! implementing the display manager's backend capability. Keeps a
//! page-organized 1bpp frame buffer plus the text cursor state; all
//! drawing happens in memory and `flush` sends the pages over the bus.

#![no_std]
#![deny(unsafe_code)]

mod font;
mod graphics;

use faderwing_display::backend::{Color, DisplayBackend, DisplayBuffer, DisplayError, TextSize};
use faderwing_display::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use faderwing_hal::I2cBus;

/// Panel dimensions
const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;
const PAGES: usize = HEIGHT / 8;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Startup command stream, one byte per control write
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80, // default clock
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14, // enable charge pump
    cmd::SET_MEMORY_MODE,
    0x02, // page addressing
    cmd::SET_SEG_REMAP,     // flip horizontally
    cmd::SET_COM_SCAN_DEC,  // flip vertically
    cmd::SET_COM_PINS,
    0x12, // alternative COM config
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::RESUME_FROM_RAM,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SSD1306 panel driver
pub struct Ssd1306 {
    address: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
    cursor_x: i16,
    cursor_y: i16,
    text_size: TextSize,
    text_color: Color,
}

impl Ssd1306 {
    /// Address the driver was attached at
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Read back a frame buffer pixel; out-of-bounds reads are dark
    pub fn pixel(&self, x: i16, y: i16) -> bool {
        if x < 0 || y < 0 || x >= WIDTH as i16 || y >= HEIGHT as i16 {
            return false;
        }
        self.buffer[(y as usize) / 8][x as usize] & (1 << ((y as usize) % 8)) != 0
    }

    fn command<B: I2cBus>(bus: &mut B, address: u8, command: u8) -> Result<(), DisplayError> {
        bus.write(address, &[0x00, command])
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_char(&mut self, ch: char) {
        let glyph = font::glyph(ch);
        let scale = self.text_size.scale() as i16;
        for (col, bits) in glyph.iter().enumerate() {
            for row in 0..8i16 {
                if bits & (1 << row) != 0 {
                    let x = self.cursor_x + (col as i16) * scale;
                    let y = self.cursor_y + row * scale;
                    if scale == 1 {
                        self.set_pixel(x, y, self.text_color);
                    } else {
                        self.fill_rect(x, y, scale as u16, scale as u16, self.text_color);
                    }
                }
            }
        }
    }
}

impl DisplayBuffer for Ssd1306 {
    fn clear_buffer(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    fn set_text_size(&mut self, size: TextSize) {
        self.text_size = size;
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn write_text(&mut self, text: &str) {
        let advance = self.text_size.glyph_width() as i16;
        let line_height = self.text_size.glyph_height() as i16;
        for ch in text.chars() {
            match ch {
                '\n' => {
                    self.cursor_x = 0;
                    self.cursor_y += line_height;
                }
                '\r' => {}
                _ => {
                    if self.cursor_x + advance > WIDTH as i16 {
                        self.cursor_x = 0;
                        self.cursor_y += line_height;
                    }
                    self.draw_char(ch);
                    self.cursor_x += advance;
                }
            }
        }
    }

    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        Ssd1306::draw_line(self, x0, y0, x1, y1, color);
    }

    fn draw_rect(&mut self, x: i16, y: i16, width: u16, height: u16, color: Color) {
        Ssd1306::draw_rect(self, x, y, width, height, color);
    }

    fn fill_rect(&mut self, x: i16, y: i16, width: u16, height: u16, color: Color) {
        Ssd1306::fill_rect(self, x, y, width, height, color);
    }

    fn draw_circle(&mut self, x: i16, y: i16, radius: u16, color: Color) {
        Ssd1306::draw_circle(self, x, y, radius, color);
    }

    fn fill_circle(&mut self, x: i16, y: i16, radius: u16, color: Color) {
        Ssd1306::fill_circle(self, x, y, radius, color);
    }
}

impl<B: I2cBus> DisplayBackend<B> for Ssd1306 {
    fn attach(bus: &mut B, address: u8) -> Result<Self, DisplayError> {
        for &command in INIT_SEQUENCE {
            Self::command(bus, address, command)?;
        }
        log::debug!("ssd1306 started at {:#04x}", address);
        Ok(Self {
            address,
            buffer: [[0; WIDTH]; PAGES],
            cursor_x: 0,
            cursor_y: 0,
            text_size: TextSize::Small,
            text_color: Color::On,
        })
    }

    fn flush(&mut self, bus: &mut B) -> Result<(), DisplayError> {
        for (page, data) in self.buffer.iter().enumerate() {
            // Re-address each page, column 0
            Self::command(bus, self.address, cmd::SET_PAGE_ADDR | page as u8)?;
            Self::command(bus, self.address, cmd::SET_LOW_COLUMN)?;
            Self::command(bus, self.address, cmd::SET_HIGH_COLUMN)?;

            let mut frame = [0u8; WIDTH + 1];
            frame[0] = 0x40; // data stream
            frame[1..].copy_from_slice(data);
            bus.write(self.address, &frame)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    fn set_contrast(&mut self, bus: &mut B, contrast: u8) -> Result<(), DisplayError> {
        Self::command(bus, self.address, cmd::SET_CONTRAST)?;
        Self::command(bus, self.address, contrast)
    }

    fn set_inverted(&mut self, bus: &mut B, inverted: bool) -> Result<(), DisplayError> {
        let command = if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        };
        Self::command(bus, self.address, command)
    }

    fn set_power(&mut self, bus: &mut B, on: bool) -> Result<(), DisplayError> {
        let command = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        Self::command(bus, self.address, command)
    }
}
