//! Fixed-width primitive readers.
//!
//! Each reader makes its full width resident via `require`, advances the
//! cursor, and decodes according to the configured byte order. Booleans
//! are one byte where 1 is true and anything else is false. Characters are
//! UTF-16 code units: 16-bit unsigned values in the buffer's byte order.

use sbf_wire::ByteOrder;

use crate::error::ReadError;
use crate::reader::Reader;

impl Reader {
    /// Consume `N` resident bytes as a fixed-size array.
    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        self.require(N)?;
        let start = self.position;
        self.position += N;
        let mut raw = [0u8; N];
        raw.copy_from_slice(&self.buf[start..start + N]);
        Ok(raw)
    }

    /// Read one unsigned byte.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] at end of data.
    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        let [byte] = self.take::<1>()?;
        Ok(byte)
    }

    /// Read one signed byte.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] at end of data.
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_i8(&mut self) -> Result<i8, ReadError> {
        Ok(self.read_u8()? as i8)
    }

    /// Read one byte as a boolean: 1 is true, any other value is false.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] at end of data.
    pub fn read_bool(&mut self) -> Result<bool, ReadError> {
        Ok(self.read_u8()? == 1)
    }

    /// Read a signed 16-bit integer in the configured byte order.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] at end of data.
    pub fn read_i16(&mut self) -> Result<i16, ReadError> {
        let raw = self.take::<2>()?;
        Ok(match self.order {
            ByteOrder::Big => i16::from_be_bytes(raw),
            ByteOrder::Little => i16::from_le_bytes(raw),
        })
    }

    /// Read an unsigned 16-bit integer in the configured byte order.
    ///
    /// The full unsigned range is returned; the two wire bytes are never
    /// sign-extended.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] at end of data.
    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        let raw = self.take::<2>()?;
        Ok(match self.order {
            ByteOrder::Big => u16::from_be_bytes(raw),
            ByteOrder::Little => u16::from_le_bytes(raw),
        })
    }

    /// Read a UTF-16 code unit: 16 bits in the configured byte order.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] at end of data.
    pub fn read_char(&mut self) -> Result<u16, ReadError> {
        self.read_u16()
    }

    /// Read a signed 32-bit integer in the configured byte order.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] at end of data.
    pub fn read_i32(&mut self) -> Result<i32, ReadError> {
        let raw = self.take::<4>()?;
        Ok(match self.order {
            ByteOrder::Big => i32::from_be_bytes(raw),
            ByteOrder::Little => i32::from_le_bytes(raw),
        })
    }

    /// Read a signed 64-bit integer in the configured byte order.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] at end of data.
    pub fn read_i64(&mut self) -> Result<i64, ReadError> {
        let raw = self.take::<8>()?;
        Ok(match self.order {
            ByteOrder::Big => i64::from_be_bytes(raw),
            ByteOrder::Little => i64::from_le_bytes(raw),
        })
    }

    /// Read a 32-bit IEEE-754 float in the configured byte order.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] at end of data.
    pub fn read_f32(&mut self) -> Result<f32, ReadError> {
        let raw = self.take::<4>()?;
        Ok(match self.order {
            ByteOrder::Big => f32::from_be_bytes(raw),
            ByteOrder::Little => f32::from_le_bytes(raw),
        })
    }

    /// Read a 64-bit IEEE-754 float in the configured byte order.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] at end of data.
    pub fn read_f64(&mut self) -> Result<f64, ReadError> {
        let raw = self.take::<8>()?;
        Ok(match self.order {
            ByteOrder::Big => f64::from_be_bytes(raw),
            ByteOrder::Little => f64::from_le_bytes(raw),
        })
    }

    /// Read exactly `len` raw bytes into a fresh vector.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends first.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, ReadError> {
        let mut bytes = vec![0u8; len];
        self.read_bytes_into(&mut bytes)?;
        Ok(bytes)
    }

    /// Fill `dst` completely with raw bytes, refilling the window in
    /// chunks as needed. Unlike [`read_into`](Self::read_into), a short
    /// source is a hard error.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends first.
    pub fn read_bytes_into(&mut self, dst: &mut [u8]) -> Result<(), ReadError> {
        let mut offset = 0;
        let mut count = dst.len();
        let mut copy = (self.limit - self.position).min(count);
        loop {
            dst[offset..offset + copy]
                .copy_from_slice(&self.buf[self.position..self.position + copy]);
            self.position += copy;
            count -= copy;
            if count == 0 {
                return Ok(());
            }
            offset += copy;
            copy = count.min(self.buf.len());
            self.require(copy)?;
        }
    }
}
