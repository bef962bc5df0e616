//! Little-endian cursors over fixed-size record buffers.
//!
//! Records have a fixed layout, so the writer works on an array sized by the
//! caller and cannot overflow for a correctly sized record. The reader checks
//! the length once up front.

use crate::{ErrorLocation, WireError};

use std::panic::Location;

pub(crate) struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn put(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.put(&v.to_le_bytes());
    }

    pub(crate) fn write_i32(&mut self, v: i32) {
        self.put(&v.to_le_bytes());
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.put(&v.to_le_bytes());
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.put(&v.to_le_bytes());
    }
}

pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Fails with [`WireError::Truncated`] when `buf` is shorter than `record_len`.
    #[track_caller]
    pub(crate) fn new(buf: &'a [u8], record_len: usize, what: &str) -> Result<Self, WireError> {
        if buf.len() < record_len {
            return Err(WireError::Truncated {
                message: format!(
                    "{what} needs {record_len} bytes, received {}",
                    buf.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { buf, pos: 0 })
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    pub(crate) fn read_u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    pub(crate) fn read_i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }

    pub(crate) fn read_u64(&mut self) -> u64 {
        u64::from_le_bytes(self.take())
    }

    pub(crate) fn read_f64(&mut self) -> f64 {
        f64::from_le_bytes(self.take())
    }
}
