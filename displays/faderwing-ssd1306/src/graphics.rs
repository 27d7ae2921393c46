//! Frame buffer drawing primitives
//!
//! Pixel, line, rectangle, and circle operations on the SSD1306 page
//! buffer. Everything clips at the canvas edges; nothing here touches
//! the bus.

use faderwing_display::backend::Color;

use crate::{Ssd1306, HEIGHT, WIDTH};

impl Ssd1306 {
    /// Set, clear, or toggle one pixel; out-of-bounds writes are dropped
    pub fn set_pixel(&mut self, x: i16, y: i16, color: Color) {
        if x < 0 || y < 0 || x >= WIDTH as i16 || y >= HEIGHT as i16 {
            return;
        }
        let mask = 1u8 << ((y as usize) % 8);
        let byte = &mut self.buffer[(y as usize) / 8][x as usize];
        match color {
            Color::On => *byte |= mask,
            Color::Off => *byte &= !mask,
            Color::Invert => *byte ^= mask,
        }
    }

    /// Draw a line between two points (Bresenham)
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        let (mut x, mut y) = (x0 as i32, y0 as i32);
        let (x1, y1) = (x1 as i32, y1 as i32);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x as i16, y as i16, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a rectangle outline
    pub fn draw_rect(&mut self, x: i16, y: i16, width: u16, height: u16, color: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + width as i16 - 1;
        let bottom = y + height as i16 - 1;
        self.hline(x, y, width, color);
        self.hline(x, bottom, width, color);
        self.vline(x, y, height, color);
        self.vline(right, y, height, color);
    }

    /// Fill a rectangle
    pub fn fill_rect(&mut self, x: i16, y: i16, width: u16, height: u16, color: Color) {
        for dy in 0..height {
            self.hline(x, y + dy as i16, width, color);
        }
    }

    /// Draw a circle outline (midpoint)
    pub fn draw_circle(&mut self, cx: i16, cy: i16, radius: u16, color: Color) {
        let (cx, cy) = (cx as i32, cy as i32);
        let mut x = radius as i32;
        let mut y = 0i32;
        let mut err = 0i32;

        while x >= y {
            self.set_pixel((cx + x) as i16, (cy + y) as i16, color);
            self.set_pixel((cx + y) as i16, (cy + x) as i16, color);
            self.set_pixel((cx - y) as i16, (cy + x) as i16, color);
            self.set_pixel((cx - x) as i16, (cy + y) as i16, color);
            self.set_pixel((cx - x) as i16, (cy - y) as i16, color);
            self.set_pixel((cx - y) as i16, (cy - x) as i16, color);
            self.set_pixel((cx + y) as i16, (cy - x) as i16, color);
            self.set_pixel((cx + x) as i16, (cy - y) as i16, color);

            y += 1;
            err += 1 + 2 * y;
            if 2 * (err - x) + 1 > 0 {
                x -= 1;
                err += 1 - 2 * x;
            }
        }
    }

    /// Fill a circle (midpoint, horizontal spans)
    pub fn fill_circle(&mut self, cx: i16, cy: i16, radius: u16, color: Color) {
        let (cx, cy) = (cx as i32, cy as i32);
        let mut x = radius as i32;
        let mut y = 0i32;
        let mut err = 0i32;

        while x >= y {
            self.span(cx - x, cx + x, cy + y, color);
            self.span(cx - x, cx + x, cy - y, color);
            self.span(cx - y, cx + y, cy + x, color);
            self.span(cx - y, cx + y, cy - x, color);

            y += 1;
            err += 1 + 2 * y;
            if 2 * (err - x) + 1 > 0 {
                x -= 1;
                err += 1 - 2 * x;
            }
        }
    }

    fn hline(&mut self, x: i16, y: i16, length: u16, color: Color) {
        for dx in 0..length {
            self.set_pixel(x + dx as i16, y, color);
        }
    }

    fn vline(&mut self, x: i16, y: i16, length: u16, color: Color) {
        for dy in 0..length {
            self.set_pixel(x, y + dy as i16, color);
        }
    }

    fn span(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        if y < 0 || y >= HEIGHT as i32 {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(WIDTH as i32 - 1);
        for x in x0..=x1 {
            self.set_pixel(x as i16, y as i16, color);
        }
    }
}
