//! Display manager
//!
//! Owns the panel handle and the bus it hangs off, and exposes the text
//! and widget primitives the rest of the firmware uses for status
//! output. Every operation degrades to a silent no-op while no panel is
//! attached: the display is a diagnostic aid and must never stall the
//! control loop that also drives the motor faders.

use core::fmt;

use faderwing_hal::I2cBus;

use crate::backend::{Color, DisplayBackend, DisplayError, TextSize};
use crate::layout::{
    self, FMT_BUF_LEN, ROW_HEIGHT, SCREEN_WIDTH, STATUS_ROW, TEXT_ROWS, UPTIME_X,
};
use crate::probe;

/// Manager for the wing's status display
///
/// Generic over the bus and the panel driver so the firmware and host
/// tests can wire in different implementations. The manager owns the
/// bus for the life of the process; the panel handle exists only while
/// a chip has been found and started, and the stored address is set in
/// the same assignment, so the two can never disagree.
pub struct DisplayManager<B: I2cBus, D: DisplayBackend<B>> {
    bus: B,
    panel: Option<D>,
    address: Option<u8>,
}

impl<B: I2cBus, D: DisplayBackend<B>> DisplayManager<B, D> {
    /// Create a manager with no panel attached
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            panel: None,
            address: None,
        }
    }

    /// Find the panel on the bus and start it.
    ///
    /// Tries the candidate addresses in order and runs the chip startup
    /// sequence at the first one that answers. Returns `false` when no
    /// candidate acknowledges or the startup sequence fails; the
    /// manager is left uninitialized either way and the call can simply
    /// be repeated once the hardware is sorted out.
    pub fn init(&mut self) -> bool {
        self.init_inner(None)
    }

    /// Start the panel at an explicitly chosen address, skipping
    /// discovery.
    pub fn init_at(&mut self, address: u8) -> bool {
        self.init_inner(Some(address))
    }

    fn init_inner(&mut self, forced: Option<u8>) -> bool {
        // Drop any live handle before touching the bus again; a failed
        // re-init must not leave a half-started chip behind.
        self.panel = None;
        self.address = None;

        let found = match forced {
            Some(address) => probe::probe(&mut self.bus, address).then_some(address),
            None => probe::detect(&mut self.bus),
        };
        let Some(address) = found else {
            log::warn!("no display found on the bus");
            return false;
        };

        match D::attach(&mut self.bus, address) {
            Ok(panel) => {
                log::info!("display initialized at {:#04x}", address);
                self.panel = Some(panel);
                self.address = Some(address);
                true
            }
            Err(DisplayError::Communication) => {
                log::warn!("display at {:#04x} failed to start", address);
                false
            }
        }
    }

    /// Whether a panel is attached and started
    pub fn is_initialized(&self) -> bool {
        self.panel.is_some()
    }

    /// Address the panel was found at, if any
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Direct access to the live panel driver
    pub fn backend(&self) -> Option<&D> {
        self.panel.as_ref()
    }

    /// Mutable access to the live panel driver for custom layouts
    pub fn backend_mut(&mut self) -> Option<&mut D> {
        self.panel.as_mut()
    }

    /// Access the underlying bus.
    ///
    /// The manager leaves the bus idle between calls, so other
    /// peripherals sharing it can run their transactions in between.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Blank the frame buffer
    pub fn clear(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.clear_buffer();
        }
    }

    /// Push the frame buffer to the panel
    pub fn flush(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            let _ = panel.flush(&mut self.bus);
        }
    }

    /// Move the text cursor to a pixel position
    pub fn set_cursor(&mut self, x: i16, y: i16) {
        if let Some(panel) = self.panel.as_mut() {
            panel.set_cursor(x, y);
        }
    }

    /// Select the glyph scale for subsequent text
    pub fn set_text_size(&mut self, size: TextSize) {
        if let Some(panel) = self.panel.as_mut() {
            panel.set_text_size(size);
        }
    }

    /// Select the draw color for subsequent text
    pub fn set_text_color(&mut self, color: Color) {
        if let Some(panel) = self.panel.as_mut() {
            panel.set_text_color(color);
        }
    }

    /// Draw text at the cursor
    pub fn write_text(&mut self, text: &str) {
        if let Some(panel) = self.panel.as_mut() {
            panel.write_text(text);
        }
    }

    /// Draw text at the cursor followed by a newline
    pub fn write_line(&mut self, text: &str) {
        if let Some(panel) = self.panel.as_mut() {
            panel.write_text(text);
            panel.write_text("\n");
        }
    }

    /// Draw formatted text at the cursor.
    ///
    /// Output is rendered into a 128-character buffer and cut there;
    /// the return value reports whether it was cut. An uninitialized
    /// manager renders nothing and returns `false`.
    pub fn write_formatted(&mut self, args: fmt::Arguments<'_>) -> bool {
        let Some(panel) = self.panel.as_mut() else {
            return false;
        };
        let (text, truncated) = layout::format_bounded::<FMT_BUF_LEN>(args);
        panel.write_text(&text);
        truncated
    }

    /// Clear one text row's pixel band
    pub fn clear_row(&mut self, row: u8) {
        if row >= TEXT_ROWS {
            return;
        }
        if let Some(panel) = self.panel.as_mut() {
            Self::clear_row_on(panel, row);
        }
    }

    /// Show `label: value` for an integer on a text row
    pub fn show_int(&mut self, label: &str, value: i32, row: u8) {
        self.show_row(row, format_args!("{}: {}", label, value));
    }

    /// Show `label: value` for a float, two decimal places
    pub fn show_float(&mut self, label: &str, value: f32, row: u8) {
        self.show_row(row, format_args!("{}: {:.2}", label, value));
    }

    /// Show `label: TRUE` or `label: FALSE`
    pub fn show_bool(&mut self, label: &str, value: bool, row: u8) {
        let rendered = if value { "TRUE" } else { "FALSE" };
        self.show_row(row, format_args!("{}: {}", label, rendered));
    }

    /// Show `label: value` for an optional string; absent values render
    /// as `NULL`
    pub fn show_string(&mut self, label: &str, value: Option<&str>, row: u8) {
        self.show_row(row, format_args!("{}: {}", label, value.unwrap_or("NULL")));
    }

    /// Page title on row 0 in medium text
    ///
    /// Only row 0's band is cleared; the tall glyphs extend into row 1,
    /// so header pages keep that row empty.
    pub fn show_header(&mut self, title: &str) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        Self::clear_row_on(panel, 0);
        panel.set_cursor(0, 0);
        panel.set_text_size(TextSize::Medium);
        panel.set_text_color(Color::On);
        panel.write_text(title);
    }

    /// Single status line on the bottom row
    pub fn show_status(&mut self, text: &str) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        Self::clear_row_on(panel, STATUS_ROW);
        panel.set_cursor(0, layout::row_y(STATUS_ROW));
        panel.set_text_size(TextSize::Small);
        panel.set_text_color(Color::On);
        panel.write_text(text);
    }

    /// Uptime clock `HH:MM:SS` in the top-right corner
    ///
    /// Draws over the previous value without clearing: the field is
    /// fixed width, so each digit lands exactly on its predecessor.
    pub fn show_uptime(&mut self, uptime_ms: u64) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        panel.set_cursor(UPTIME_X, 0);
        panel.set_text_size(TextSize::Small);
        panel.set_text_color(Color::On);
        panel.write_text(&layout::format_uptime(uptime_ms));
    }

    /// Out-of-band IP banner on row 0, pushed to the panel immediately.
    ///
    /// The one widget that flushes itself: network bring-up reports the
    /// address from paths that never reach the normal render cycle.
    pub fn show_network_address(&mut self, ip: [u8; 4]) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        Self::clear_row_on(panel, 0);
        panel.set_cursor(0, 0);
        panel.set_text_size(TextSize::Small);
        panel.set_text_color(Color::On);
        let (text, _) = layout::format_bounded::<FMT_BUF_LEN>(format_args!(
            "IP: {}.{}.{}.{}",
            ip[0], ip[1], ip[2], ip[3]
        ));
        panel.write_text(&text);
        let _ = panel.flush(&mut self.bus);
    }

    /// Boot screen: title header, readiness lines, starting status
    pub fn show_splash(&mut self, title: &str) {
        let Some(address) = self.address else {
            return;
        };
        self.clear();
        self.show_header(title);
        self.set_cursor(0, 20);
        self.set_text_size(TextSize::Small);
        self.set_text_color(Color::On);
        self.write_text("OLED: Ready");
        self.set_cursor(0, 30);
        self.write_formatted(format_args!("Addr: {:#04X}", address));
        self.show_status("Starting...");
        self.flush();
    }

    /// Set panel contrast (0-255)
    pub fn set_brightness(&mut self, brightness: u8) {
        if let Some(panel) = self.panel.as_mut() {
            if panel.set_contrast(&mut self.bus, brightness).is_ok() {
                log::debug!("display brightness set to {}", brightness);
            }
        }
    }

    /// Normal or inverted rendering
    pub fn set_inverted(&mut self, inverted: bool) {
        if let Some(panel) = self.panel.as_mut() {
            let _ = panel.set_inverted(&mut self.bus, inverted);
        }
    }

    /// Put the panel to sleep
    pub fn power_off(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            let _ = panel.set_power(&mut self.bus, false);
        }
    }

    /// Wake the panel from sleep
    pub fn power_on(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            let _ = panel.set_power(&mut self.bus, true);
        }
    }

    /// Draw a line in the foreground color
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) {
        if let Some(panel) = self.panel.as_mut() {
            panel.draw_line(x0, y0, x1, y1, Color::On);
        }
    }

    /// Draw a rectangle outline in the foreground color
    pub fn draw_rect(&mut self, x: i16, y: i16, width: u16, height: u16) {
        if let Some(panel) = self.panel.as_mut() {
            panel.draw_rect(x, y, width, height, Color::On);
        }
    }

    /// Fill a rectangle in the foreground color
    pub fn fill_rect(&mut self, x: i16, y: i16, width: u16, height: u16) {
        if let Some(panel) = self.panel.as_mut() {
            panel.fill_rect(x, y, width, height, Color::On);
        }
    }

    /// Draw a circle outline in the foreground color
    pub fn draw_circle(&mut self, x: i16, y: i16, radius: u16) {
        if let Some(panel) = self.panel.as_mut() {
            panel.draw_circle(x, y, radius, Color::On);
        }
    }

    /// Fill a circle in the foreground color
    pub fn fill_circle(&mut self, x: i16, y: i16, radius: u16) {
        if let Some(panel) = self.panel.as_mut() {
            panel.fill_circle(x, y, radius, Color::On);
        }
    }

    /// Clear a row band, park the cursor on it in the standard row
    /// style, and draw the formatted text
    fn show_row(&mut self, row: u8, args: fmt::Arguments<'_>) {
        if row >= TEXT_ROWS {
            return;
        }
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        Self::clear_row_on(panel, row);
        panel.set_cursor(0, layout::row_y(row));
        panel.set_text_size(TextSize::Small);
        panel.set_text_color(Color::On);
        let (text, _) = layout::format_bounded::<FMT_BUF_LEN>(args);
        panel.write_text(&text);
    }

    /// Clear one row's pixel band so old content cannot ghost behind
    /// shorter new content
    fn clear_row_on(panel: &mut D, row: u8) {
        panel.fill_rect(0, layout::row_y(row), SCREEN_WIDTH, ROW_HEIGHT, Color::Off);
    }
}
