//! Test doubles for the bus and panel capabilities
//!
//! Host-side fakes: a scripted bus that acknowledges a configurable set
//! of addresses and records every transaction, and a panel backend that
//! records the operations driven at it. The firmware tree uses these to
//! test status screens without hardware; this crate's own tests run on
//! them too.

use heapless::{String, Vec};

use faderwing_hal::I2cBus;

use crate::backend::{Color, DisplayBackend, DisplayBuffer, DisplayError, TextSize};

/// Transactions the mock bus remembers
pub const MAX_TRANSACTIONS: usize = 64;

/// Longest payload a recorded transaction stores
pub const MAX_TRANSACTION_LEN: usize = 192;

/// Operations the mock backend remembers
pub const MAX_OPS: usize = 256;

/// Longest text a recorded write keeps
pub const MAX_TEXT_LEN: usize = 160;

/// Error type of the mock bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack;

/// One recorded bus write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Target 7-bit address
    pub address: u8,
    /// Payload, clipped to [`MAX_TRANSACTION_LEN`]
    pub bytes: Vec<u8, MAX_TRANSACTION_LEN>,
}

/// Scripted I2C bus
pub struct MockBus {
    /// Addresses that acknowledge the addressing phase
    pub responding: Vec<u8, 4>,
    /// When set, writes with a data phase are nacked even on responding
    /// addresses; zero-length handshakes still succeed
    pub fail_data_phase: bool,
    /// Every accepted write, in order
    pub writes: Vec<Transaction, MAX_TRANSACTIONS>,
}

impl MockBus {
    /// Bus on which the given addresses acknowledge
    pub fn responding_at(addresses: &[u8]) -> Self {
        let mut responding = Vec::new();
        for &address in addresses {
            let _ = responding.push(address);
        }
        Self {
            responding,
            fail_data_phase: false,
            writes: Vec::new(),
        }
    }

    /// Bus on which nothing answers
    pub fn dead() -> Self {
        Self::responding_at(&[])
    }

    fn acknowledges(&self, address: u8) -> bool {
        self.responding.contains(&address)
    }
}

impl I2cBus for MockBus {
    type Error = Nack;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nack> {
        if !self.acknowledges(address) {
            return Err(Nack);
        }
        if !data.is_empty() && self.fail_data_phase {
            return Err(Nack);
        }
        let mut bytes = Vec::new();
        let _ = bytes.extend_from_slice(&data[..data.len().min(MAX_TRANSACTION_LEN)]);
        let _ = self.writes.push(Transaction { address, bytes });
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Nack> {
        if !self.acknowledges(address) {
            return Err(Nack);
        }
        buf.fill(0);
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Nack> {
        self.write(address, write_data)?;
        read_buf.fill(0);
        Ok(())
    }
}

/// Operations a [`MockBackend`] records
#[derive(Debug, Clone, PartialEq)]
pub enum MockOp {
    ClearBuffer,
    SetCursor(i16, i16),
    SetTextSize(TextSize),
    SetTextColor(Color),
    WriteText(String<MAX_TEXT_LEN>),
    DrawLine {
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        color: Color,
    },
    DrawRect {
        x: i16,
        y: i16,
        width: u16,
        height: u16,
        color: Color,
    },
    FillRect {
        x: i16,
        y: i16,
        width: u16,
        height: u16,
        color: Color,
    },
    DrawCircle {
        x: i16,
        y: i16,
        radius: u16,
        color: Color,
    },
    FillCircle {
        x: i16,
        y: i16,
        radius: u16,
        color: Color,
    },
    Flush,
    SetContrast(u8),
    SetInverted(bool),
    SetPower(bool),
}

/// Panel backend that records what is drawn at it
///
/// `attach` issues a single startup command so the mock exercises the
/// same bus failure paths as a real chip driver.
pub struct MockBackend {
    /// Address `attach` was called with
    pub address: u8,
    /// Every operation, in order
    pub ops: Vec<MockOp, MAX_OPS>,
}

impl MockBackend {
    fn record(&mut self, op: MockOp) {
        let _ = self.ops.push(op);
    }

    /// Texts written at the backend, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            MockOp::WriteText(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of recorded flushes
    pub fn flush_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, MockOp::Flush))
            .count()
    }
}

impl DisplayBuffer for MockBackend {
    fn clear_buffer(&mut self) {
        self.record(MockOp::ClearBuffer);
    }

    fn set_cursor(&mut self, x: i16, y: i16) {
        self.record(MockOp::SetCursor(x, y));
    }

    fn set_text_size(&mut self, size: TextSize) {
        self.record(MockOp::SetTextSize(size));
    }

    fn set_text_color(&mut self, color: Color) {
        self.record(MockOp::SetTextColor(color));
    }

    fn write_text(&mut self, text: &str) {
        let mut stored = String::new();
        for ch in text.chars() {
            if stored.push(ch).is_err() {
                break;
            }
        }
        self.record(MockOp::WriteText(stored));
    }

    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        self.record(MockOp::DrawLine { x0, y0, x1, y1, color });
    }

    fn draw_rect(&mut self, x: i16, y: i16, width: u16, height: u16, color: Color) {
        self.record(MockOp::DrawRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_rect(&mut self, x: i16, y: i16, width: u16, height: u16, color: Color) {
        self.record(MockOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_circle(&mut self, x: i16, y: i16, radius: u16, color: Color) {
        self.record(MockOp::DrawCircle {
            x,
            y,
            radius,
            color,
        });
    }

    fn fill_circle(&mut self, x: i16, y: i16, radius: u16, color: Color) {
        self.record(MockOp::FillCircle {
            x,
            y,
            radius,
            color,
        });
    }
}

impl<B: I2cBus> DisplayBackend<B> for MockBackend {
    fn attach(bus: &mut B, address: u8) -> Result<Self, DisplayError> {
        bus.write(address, &[0x00, 0xAE])
            .map_err(|_| DisplayError::Communication)?;
        Ok(Self {
            address,
            ops: Vec::new(),
        })
    }

    fn flush(&mut self, bus: &mut B) -> Result<(), DisplayError> {
        self.record(MockOp::Flush);
        bus.write(self.address, &[0x40])
            .map_err(|_| DisplayError::Communication)?;
        Ok(())
    }

    fn set_contrast(&mut self, bus: &mut B, contrast: u8) -> Result<(), DisplayError> {
        self.record(MockOp::SetContrast(contrast));
        bus.write(self.address, &[0x00, 0x81, contrast])
            .map_err(|_| DisplayError::Communication)?;
        Ok(())
    }

    fn set_inverted(&mut self, bus: &mut B, inverted: bool) -> Result<(), DisplayError> {
        self.record(MockOp::SetInverted(inverted));
        let command = if inverted { 0xA7 } else { 0xA6 };
        bus.write(self.address, &[0x00, command])
            .map_err(|_| DisplayError::Communication)?;
        Ok(())
    }

    fn set_power(&mut self, bus: &mut B, on: bool) -> Result<(), DisplayError> {
        self.record(MockOp::SetPower(on));
        let command = if on { 0xAF } else { 0xAE };
        bus.write(self.address, &[0x00, command])
            .map_err(|_| DisplayError::Communication)?;
        Ok(())
    }
}
