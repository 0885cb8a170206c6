//! Windowed variable-length integer decoders.
//!
//! Each width has one implementation keyed on a const `RESIDENT`
//! predicate. When `require(1)` reports at least the maximum encoded
//! length already resident (5 bytes for 32-bit, 9 for 64-bit), the fast
//! instantiation reads straight through with no per-byte residency
//! checks; otherwise the slow instantiation re-enters `require(1)` before
//! every continuation byte. Both instantiations decode identical bits.
//!
//! The unsigned entry points return the raw assembled value; the signed
//! ones zig-zag decode it, which is how small negative numbers stay short
//! on the wire.

use sbf_wire::varint::{zigzag_decode32, zigzag_decode64};

use crate::error::ReadError;
use crate::reader::Reader;

impl Reader {
    /// Read an unsigned 32-bit varint (1 to 5 wire bytes).
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends mid-value.
    pub fn read_var_u32(&mut self) -> Result<u32, ReadError> {
        if self.require(1)? >= 5 {
            self.read_var_u32_inner::<true>()
        } else {
            self.read_var_u32_inner::<false>()
        }
    }

    /// Read a signed 32-bit varint: the unsigned wire value, zig-zag
    /// decoded.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends mid-value.
    pub fn read_var_i32(&mut self) -> Result<i32, ReadError> {
        Ok(zigzag_decode32(self.read_var_u32()?))
    }

    /// Read an unsigned 64-bit varint (1 to 9 wire bytes).
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends mid-value.
    pub fn read_var_u64(&mut self) -> Result<u64, ReadError> {
        if self.require(1)? >= 9 {
            self.read_var_u64_inner::<true>()
        } else {
            self.read_var_u64_inner::<false>()
        }
    }

    /// Read a signed 64-bit varint: the unsigned wire value, zig-zag
    /// decoded.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends mid-value.
    pub fn read_var_i64(&mut self) -> Result<i64, ReadError> {
        Ok(zigzag_decode64(self.read_var_u64()?))
    }

    /// One decoder, two instantiations. `RESIDENT` promises five bytes in
    /// the window; the caller has already run `require(1)` either way, so
    /// the first byte never needs a check. The fifth byte terminates the
    /// value regardless of its continuation bit.
    fn read_var_u32_inner<const RESIDENT: bool>(&mut self) -> Result<u32, ReadError> {
        let mut result = 0u32;
        let mut shift = 0u32;
        loop {
            if !RESIDENT && shift != 0 {
                self.require(1)?;
            }
            let byte = self.buf[self.position];
            self.position += 1;
            result |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 || shift == 28 {
                return Ok(result);
            }
            shift += 7;
        }
    }

    /// As [`read_var_u32_inner`](Self::read_var_u32_inner), with the
    /// ninth-byte exception: after eight continuation bytes, all 8 bits of
    /// the ninth byte are payload shifted by 56 and there is no marker.
    fn read_var_u64_inner<const RESIDENT: bool>(&mut self) -> Result<u64, ReadError> {
        let mut result = 0u64;
        let mut shift = 0u32;
        loop {
            if !RESIDENT && shift != 0 {
                self.require(1)?;
            }
            let byte = self.buf[self.position];
            self.position += 1;
            if shift == 56 {
                result |= u64::from(byte) << 56;
                return Ok(result);
            }
            result |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
    }

    /// Whether a 32-bit varint can be read without any further source
    /// data. Non-consuming; the window may be refilled (and compacted) by
    /// the probe, but the cursor does not move.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if the source fails during the probe.
    pub fn can_read_var32(&mut self) -> Result<bool, ReadError> {
        self.can_read_var(4)
    }

    /// Whether a 64-bit varint can be read without any further source
    /// data. Non-consuming.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if the source fails during the probe.
    pub fn can_read_var64(&mut self) -> Result<bool, ReadError> {
        self.can_read_var(8)
    }

    /// Shared probe. `max_marked` is the number of leading bytes that may
    /// carry a continuation marker (4 for 32-bit, 8 for 64-bit); the byte
    /// after them needs no terminator. The probe asks `optional(5)` for
    /// both widths, enough to settle the common short encodings, and then
    /// walks whatever happens to be resident.
    fn can_read_var(&mut self, max_marked: usize) -> Result<bool, ReadError> {
        if self.limit - self.position >= max_marked + 1 {
            return Ok(true);
        }
        if self.optional(5)?.is_none() {
            return Ok(false);
        }
        let mut p = self.position;
        for _ in 0..max_marked {
            if self.buf[p] & 0x80 == 0 {
                return Ok(true);
            }
            p += 1;
            if p == self.limit {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
