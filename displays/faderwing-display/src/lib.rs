//! Display management for the fader wing status OLED
//!
//! This crate provides:
//! - Address discovery for the panel on the wing's two-wire bus
//! - `DisplayBackend` trait for the pixel-level panel driver
//! - `DisplayManager` owning the panel handle and the text/widget layer
//! - A throttled scrolling debug log for the bottom of the canvas
//!
//! # Architecture
//!
//! The manager never talks to a chip directly. It consumes two
//! capabilities: a blocking bus ([`faderwing_hal::I2cBus`]) and a panel
//! driver ([`DisplayBackend`]). The production wing wires in the SSD1306
//! backend; host tests wire in the [`mock`] doubles.
//!
//! The display is a diagnostic aid, not a dependency: every operation on
//! an uninitialized manager is a silent no-op, so a missing or failed
//! panel can never stall the control loop that drives the motor faders.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod debug;
pub mod layout;
pub mod manager;
pub mod mock;
pub mod probe;

// Re-export key types
pub use backend::{Color, DisplayBackend, DisplayBuffer, DisplayError, TextSize};
pub use debug::{DebugLog, DebugRing};
pub use manager::DisplayManager;
