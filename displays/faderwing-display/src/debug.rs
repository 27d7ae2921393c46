//! Scrolling debug log
//!
//! A fixed window of recent log lines painted into the bottom of the
//! canvas. Lines can arrive far faster than the bus can repaint (hot
//! loops log too), so the renderer records every line but repaints the
//! region at most once per interval.

use heapless::String;

use faderwing_hal::I2cBus;

use crate::backend::{Color, DisplayBackend, TextSize};
use crate::layout::{self, DEBUG_FIRST_ROW, DEBUG_ROWS};
use crate::manager::DisplayManager;

/// Log lines kept and painted
pub const DEBUG_LINES: usize = DEBUG_ROWS as usize;

/// Longest line that fits a row at small text size
pub const DEBUG_LINE_LEN: usize = 21;

/// Minimum interval between physical repaints of the region
pub const REDRAW_INTERVAL_MS: u64 = 200;

/// Window of the most recent debug lines, oldest first
///
/// All slots always exist; lines enter at the bottom and shift out at
/// the top, so a freshly booted wing shows blanks above its first
/// messages.
#[derive(Clone)]
pub struct DebugRing {
    lines: [String<DEBUG_LINE_LEN>; DEBUG_LINES],
}

impl DebugRing {
    /// Ring of empty slots
    pub const fn new() -> Self {
        Self {
            lines: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }

    /// Append a line, shifting the oldest slot out.
    ///
    /// Text longer than a row is cut at the row width.
    pub fn push(&mut self, text: &str) {
        for i in 0..DEBUG_LINES - 1 {
            self.lines[i] = self.lines[i + 1].clone();
        }
        let newest = &mut self.lines[DEBUG_LINES - 1];
        newest.clear();
        for ch in text.chars() {
            if newest.push(ch).is_err() {
                break;
            }
        }
    }

    /// Iterate the slots oldest-first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.as_str())
    }
}

impl Default for DebugRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Debug text sink with throttled rendering
///
/// One instance lives for the whole process, owned by whichever task is
/// allowed to render.
pub struct DebugLog {
    ring: DebugRing,
    last_redraw_ms: Option<u64>,
}

impl DebugLog {
    /// Empty log; the first append is never throttled
    pub const fn new() -> Self {
        Self {
            ring: DebugRing::new(),
            last_redraw_ms: None,
        }
    }

    /// Record a line and repaint the debug region if a repaint is due.
    ///
    /// `now_ms` is the caller's monotonic millisecond clock. Nothing
    /// happens while the display is uninitialized. When the previous
    /// repaint is less than [`REDRAW_INTERVAL_MS`] ago the line is
    /// still recorded and shows up with the next repaint.
    pub fn append<B, D>(&mut self, display: &mut DisplayManager<B, D>, text: &str, now_ms: u64)
    where
        B: I2cBus,
        D: DisplayBackend<B>,
    {
        if !display.is_initialized() {
            return;
        }
        self.ring.push(text);

        if let Some(last) = self.last_redraw_ms {
            if now_ms.wrapping_sub(last) < REDRAW_INTERVAL_MS {
                return;
            }
        }
        self.last_redraw_ms = Some(now_ms);
        self.redraw(display);
    }

    /// Recorded lines, oldest first
    pub fn ring(&self) -> &DebugRing {
        &self.ring
    }

    /// Clear and repaint the reserved rows, then push to the panel
    fn redraw<B, D>(&self, display: &mut DisplayManager<B, D>)
    where
        B: I2cBus,
        D: DisplayBackend<B>,
    {
        for (i, line) in self.ring.lines().enumerate() {
            let row = DEBUG_FIRST_ROW + i as u8;
            display.clear_row(row);
            display.set_cursor(0, layout::row_y(row));
            display.set_text_size(TextSize::Small);
            display.set_text_color(Color::On);
            display.write_text(line);
        }
        display.flush();
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBackend, MockBus, MockOp};
    use crate::probe::ADDR_PRIMARY;

    fn init_display() -> DisplayManager<MockBus, MockBackend> {
        let mut display: DisplayManager<MockBus, MockBackend> =
            DisplayManager::new(MockBus::responding_at(&[ADDR_PRIMARY]));
        assert!(display.init());
        display
    }

    fn slots(ring: &DebugRing) -> [&str; DEBUG_LINES] {
        let mut out = [""; DEBUG_LINES];
        for (slot, line) in out.iter_mut().zip(ring.lines()) {
            *slot = line;
        }
        out
    }

    #[test]
    fn test_ring_fills_from_the_bottom() {
        let mut ring = DebugRing::new();
        ring.push("a");
        ring.push("b");
        assert_eq!(slots(&ring), ["", "", "", "a", "b"]);
    }

    #[test]
    fn test_ring_keeps_the_five_most_recent() {
        let mut ring = DebugRing::new();
        for line in ["l1", "l2", "l3", "l4", "l5", "l6", "l7"] {
            ring.push(line);
        }
        assert_eq!(slots(&ring), ["l3", "l4", "l5", "l6", "l7"]);
    }

    #[test]
    fn test_ring_cuts_lines_at_row_width() {
        let mut ring = DebugRing::new();
        ring.push("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(slots(&ring)[DEBUG_LINES - 1], "abcdefghijklmnopqrstu");
    }

    #[test]
    fn test_append_is_silent_while_uninitialized() {
        let mut display: DisplayManager<MockBus, MockBackend> =
            DisplayManager::new(MockBus::dead());
        let mut log = DebugLog::new();
        log.append(&mut display, "lost", 0);
        assert_eq!(slots(log.ring()), ["", "", "", "", ""]);
        assert!(display.bus_mut().writes.is_empty());
    }

    #[test]
    fn test_first_append_paints_immediately() {
        let mut display = init_display();
        let mut log = DebugLog::new();
        log.append(&mut display, "boot", 50);
        let backend = display.backend().unwrap();
        assert_eq!(backend.flush_count(), 1);
        assert_eq!(backend.texts().last(), Some("boot"));
    }

    #[test]
    fn test_appends_inside_the_interval_coalesce() {
        let mut display = init_display();
        let mut log = DebugLog::new();
        log.append(&mut display, "l1", 1_000);
        log.append(&mut display, "l2", 1_100);
        log.append(&mut display, "l3", 1_199);
        assert_eq!(backend_flushes(&display), 1);

        // Past the interval: one repaint showing everything recorded
        log.append(&mut display, "l4", 1_201);
        assert_eq!(backend_flushes(&display), 2);
        assert_eq!(slots(log.ring()), ["", "l1", "l2", "l3", "l4"]);
        let backend = display.backend().unwrap();
        let painted: heapless::Vec<&str, 16> = backend.texts().collect();
        assert_eq!(
            &painted[painted.len() - 5..],
            &["", "l1", "l2", "l3", "l4"][..]
        );
    }

    #[test]
    fn test_redraw_repaints_the_reserved_region() {
        let mut display = init_display();
        let mut log = DebugLog::new();
        log.append(&mut display, "hello", 0);
        let backend = display.backend().unwrap();

        // One clear and one cursor move per reserved row, top to bottom
        let fills: heapless::Vec<i16, 8> = backend
            .ops
            .iter()
            .filter_map(|op| match op {
                MockOp::FillRect { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(&fills[..], &[24, 32, 40, 48, 56][..]);
        assert_eq!(backend.flush_count(), 1);
    }

    fn backend_flushes(display: &DisplayManager<MockBus, MockBackend>) -> usize {
        display.backend().unwrap().flush_count()
    }
}
