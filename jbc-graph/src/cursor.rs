//! Sequential big-endian reader over a method's code bytes.

use crate::error::{DecodeError, Result};
use crate::Pc;

/// Cursor over one method's raw instruction bytes.
///
/// All reads are bounds-checked; reading past the end of the code range
/// fails with [`DecodeError::Truncated`] carrying the offset at which the
/// read began. Scoped to a single decode pass.
#[derive(Debug)]
pub struct CodeCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> CodeCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Byte offset of the next read.
    pub fn offset(&self) -> Pc {
        self.offset as Pc
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.offset.checked_add(n).filter(|&e| e <= self.bytes.len());
        match end {
            Some(end) => {
                let bytes = &self.bytes[self.offset..end];
                self.offset = end;
                Ok(bytes)
            }
            None => Err(DecodeError::Truncated { pc: self.offset() }),
        }
    }

    /// Read one unsigned byte.
    pub fn u1(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read an unsigned big-endian 16-bit value.
    pub fn u2(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Read a signed big-endian 16-bit value.
    pub fn s2(&mut self) -> Result<i16> {
        Ok(self.u2()? as i16)
    }

    /// Read a signed big-endian 32-bit value.
    pub fn s4(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}
