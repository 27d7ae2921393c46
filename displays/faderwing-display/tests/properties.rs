//! Property tests for the debug ring and the shared formatting helpers

use faderwing_display::debug::{DebugRing, DEBUG_LINES, DEBUG_LINE_LEN};
use faderwing_display::layout::{format_bounded, format_uptime};
use proptest::prelude::*;

proptest! {
    #[test]
    fn ring_keeps_the_most_recent_window(lines in prop::collection::vec("[ -~]{0,21}", 0..40)) {
        let mut ring = DebugRing::new();
        for line in &lines {
            ring.push(line);
        }
        let slots: Vec<&str> = ring.lines().collect();
        prop_assert_eq!(slots.len(), DEBUG_LINES);

        // The newest lines fill the bottom of the window in input order
        let kept = lines.len().min(DEBUG_LINES);
        for (slot, expected) in slots[DEBUG_LINES - kept..].iter().zip(&lines[lines.len() - kept..]) {
            prop_assert_eq!(*slot, expected.as_str());
        }
        // Slots above them stay blank until enough lines arrive
        for slot in &slots[..DEBUG_LINES - kept] {
            prop_assert_eq!(*slot, "");
        }
    }

    #[test]
    fn ring_cuts_every_line_at_row_width(line in "[ -~]{0,64}") {
        let mut ring = DebugRing::new();
        ring.push(&line);
        let newest = ring.lines().last().unwrap();
        prop_assert_eq!(newest.len(), line.len().min(DEBUG_LINE_LEN));
        prop_assert!(line.starts_with(newest));
    }

    #[test]
    fn uptime_is_fixed_width_and_wraps(ms in 0u64..10 * 86_400_000) {
        let text = format_uptime(ms);
        prop_assert_eq!(text.len(), 8);
        let secs = ms / 1000;
        let expected = format!(
            "{:02}:{:02}:{:02}",
            (secs / 3600) % 24,
            (secs / 60) % 60,
            secs % 60
        );
        prop_assert_eq!(text.as_str(), expected.as_str());
    }

    #[test]
    fn bounded_formatting_never_exceeds_the_buffer(text in "[ -~]{0,200}") {
        let (rendered, truncated) = format_bounded::<128>(format_args!("{}", text));
        prop_assert!(rendered.len() <= 128);
        prop_assert_eq!(truncated, text.len() > 128);
        prop_assert!(text.starts_with(rendered.as_str()));
    }
}
