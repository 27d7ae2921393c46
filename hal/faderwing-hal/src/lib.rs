//! Fader wing hardware abstraction layer
//!
//! Defines the bus capability traits the wing's peripheral drivers are
//! written against. Chip-specific HALs (the Teensy-class controller in the
//! production wing, mocks on the host) implement these traits, so the
//! display manager and other peripheral code never name concrete hardware.
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - blocking two-wire bus master operations

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key traits at crate root for convenience
pub use i2c::I2cBus;
