//! Text grid geometry and shared formatting helpers
//!
//! The 128x64 canvas is treated as 8 fixed-height text rows of small
//! glyphs. Widgets address rows by index regardless of the text size
//! drawn inside; taller text simply spills into the following band.

use core::fmt::{self, Write};

use heapless::String;

/// Canvas width in pixels
pub const SCREEN_WIDTH: u16 = 128;

/// Canvas height in pixels
pub const SCREEN_HEIGHT: u16 = 64;

/// Height of one text row (small glyph height)
pub const ROW_HEIGHT: u16 = 8;

/// Number of addressable text rows
pub const TEXT_ROWS: u8 = (SCREEN_HEIGHT / ROW_HEIGHT) as u8;

/// Row used for the single-line status widget
pub const STATUS_ROW: u8 = TEXT_ROWS - 1;

/// Rows reserved for the debug log at the bottom of the canvas
pub const DEBUG_ROWS: u8 = 5;

/// First row of the reserved debug region
pub const DEBUG_FIRST_ROW: u8 = TEXT_ROWS - DEBUG_ROWS;

/// Cursor x origin of the uptime clock in the top-right corner
pub const UPTIME_X: i16 = 70;

/// Formatted writes are cut to this many characters
pub const FMT_BUF_LEN: usize = 128;

/// Pixel y origin of a text row
pub const fn row_y(row: u8) -> i16 {
    (row as i16) * (ROW_HEIGHT as i16)
}

/// Render `args` into a bounded string.
///
/// Returns the rendered text and whether it had to be cut to fit the
/// buffer. Truncation is per character, so the output is always valid
/// UTF-8 and holds as much of the formatted text as the bound allows.
pub fn format_bounded<const N: usize>(args: fmt::Arguments<'_>) -> (String<N>, bool) {
    let mut out = String::new();
    let mut truncated = false;
    let _ = fmt::write(
        &mut TruncatingWrite {
            out: &mut out,
            truncated: &mut truncated,
        },
        args,
    );
    (out, truncated)
}

/// Format an elapsed millisecond count as `HH:MM:SS`.
///
/// Fields are zero-padded and hours wrap modulo 24, so the result is
/// always exactly eight characters.
pub fn format_uptime(uptime_ms: u64) -> String<8> {
    let total_secs = uptime_ms / 1000;
    let seconds = total_secs % 60;
    let minutes = (total_secs / 60) % 60;
    let hours = (total_secs / 3600) % 24;

    let mut out = String::new();
    // Eight characters always fit
    let _ = write!(out, "{:02}:{:02}:{:02}", hours, minutes, seconds);
    out
}

/// Sink that fills its buffer and then swallows the rest
struct TruncatingWrite<'a, const N: usize> {
    out: &'a mut String<N>,
    truncated: &'a mut bool,
}

impl<const N: usize> fmt::Write for TruncatingWrite<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if *self.truncated {
            return Ok(());
        }
        for ch in s.chars() {
            if self.out.push(ch).is_err() {
                *self.truncated = true;
                return Ok(());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(TEXT_ROWS, 8);
        assert_eq!(STATUS_ROW, 7);
        assert_eq!(DEBUG_FIRST_ROW, 3);
        assert_eq!(row_y(0), 0);
        assert_eq!(row_y(3), 24);
        assert_eq!(row_y(7), 56);
    }

    #[test]
    fn test_format_bounded_fits() {
        let (text, truncated) = format_bounded::<16>(format_args!("gain: {}", 42));
        assert_eq!(text.as_str(), "gain: 42");
        assert!(!truncated);
    }

    #[test]
    fn test_format_bounded_cuts_at_capacity() {
        let (text, truncated) = format_bounded::<8>(format_args!("0123456789"));
        assert_eq!(text.as_str(), "01234567");
        assert!(truncated);
    }

    #[test]
    fn test_format_bounded_cuts_padded_output() {
        let (text, truncated) = format_bounded::<8>(format_args!("{:>20}", "x"));
        assert_eq!(text.len(), 8);
        assert!(truncated);
    }

    #[test]
    fn test_format_uptime_zero() {
        assert_eq!(format_uptime(0).as_str(), "00:00:00");
    }

    #[test]
    fn test_format_uptime_pads_fields() {
        assert_eq!(format_uptime(59_999).as_str(), "00:00:59");
        assert_eq!(format_uptime(60_000).as_str(), "00:01:00");
    }

    #[test]
    fn test_format_uptime_wraps_hours() {
        // 25h 1m 1s comes back around to 01:01:01
        assert_eq!(format_uptime(90_061_000).as_str(), "01:01:01");
        assert_eq!(format_uptime(86_400_000).as_str(), "00:00:00");
    }
}
