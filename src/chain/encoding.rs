//! Canonical byte encoding
//!
//! Deterministic, order-sensitive serialization used both to compute the
//! signing digest and the transaction id. Integers are little-endian,
//! collections are prefixed with an unsigned varint length, and assets
//! carry amount, precision and a 7-byte padded ticker.

use crate::chain::asset::Asset;
use chrono::{DateTime, Utc};

/// Append-only writer for the canonical encoding
#[derive(Debug, Default)]
pub struct ByteWriter {
    buffer: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Unsigned LEB128 varint
    pub fn write_varint(&mut self, mut value: u64) {
        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            self.buffer.push(byte);
            if value == 0 {
                break;
            }
        }
    }

    /// Varint length prefix followed by UTF-8 bytes
    pub fn write_string(&mut self, value: &str) {
        self.write_varint(value.len() as u64);
        self.buffer.extend_from_slice(value.as_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// Seconds since the Unix epoch as a u32
    pub fn write_timestamp(&mut self, value: &DateTime<Utc>) {
        self.write_u32(value.timestamp() as u32);
    }

    /// Amount (i64 LE), precision (u8), ticker padded with NULs to 7 bytes
    pub fn write_asset(&mut self, asset: &Asset) {
        self.write_i64(asset.amount());
        self.write_u8(asset.precision());
        let ticker = asset.symbol().ticker().as_bytes();
        let mut padded = [0u8; 7];
        padded[..ticker.len()].copy_from_slice(ticker);
        self.buffer.extend_from_slice(&padded);
    }

    /// Varint count followed by each element's encoding
    pub fn write_list<T>(&mut self, items: &[T], mut write_item: impl FnMut(&mut Self, &T)) {
        self.write_varint(items.len() as u64);
        for item in items {
            write_item(self, item);
        }
    }
}
