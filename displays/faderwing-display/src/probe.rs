//! Panel discovery on the two-wire bus
//!
//! The wing's OLED answers at one of two addresses depending on how its
//! address strap is soldered, so discovery tries a fixed candidate list
//! instead of assuming one.

use faderwing_hal::I2cBus;

/// Primary panel address (the common strapping)
pub const ADDR_PRIMARY: u8 = 0x3C;

/// Secondary panel address (alternate strapping)
pub const ADDR_SECONDARY: u8 = 0x3D;

/// Candidate addresses in the order they are tried
pub const CANDIDATES: [u8; 2] = [ADDR_PRIMARY, ADDR_SECONDARY];

/// Check whether a device acknowledges `address`.
///
/// Performs a zero-length write: an addressing handshake with no data
/// phase. The target sees no payload, so probing is safe to repeat.
pub fn probe<B: I2cBus>(bus: &mut B, address: u8) -> bool {
    bus.write(address, &[]).is_ok()
}

/// Find the panel among the known candidate addresses.
///
/// Candidates are tried in fixed order and the first acknowledging
/// address wins. Returns `None` when nothing answers.
pub fn detect<B: I2cBus>(bus: &mut B) -> Option<u8> {
    CANDIDATES.into_iter().find(|&address| probe(bus, address))
}
