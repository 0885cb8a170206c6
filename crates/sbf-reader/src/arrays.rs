//! Bulk primitive-array readers.
//!
//! When the configured byte order matches the host order and the whole
//! request fits the window, one `require` makes the bytes resident and a
//! single typed pass decodes them in place. Otherwise the element-wise
//! fallback runs each value through its fixed-width reader, which both
//! honours a non-native byte order and streams arrays wider than the
//! window. The two paths decode identical values.

use crate::error::ReadError;
use crate::reader::Reader;

impl Reader {
    /// Shared dual-path driver: `from_ne` decodes one native-order chunk,
    /// `read_one` is the element-wise fallback.
    fn read_array<T, const W: usize>(
        &mut self,
        len: usize,
        from_ne: fn([u8; W]) -> T,
        read_one: fn(&mut Self) -> Result<T, ReadError>,
    ) -> Result<Vec<T>, ReadError> {
        let byte_len = len
            .checked_mul(W)
            .ok_or(ReadError::InvalidArgument("array length overflows"))?;
        if self.order.is_native() && self.buf.len() - self.position >= byte_len {
            self.require(byte_len)?;
            let start = self.position;
            self.position += byte_len;
            let mut values = Vec::with_capacity(len);
            for chunk in self.buf[start..start + byte_len].chunks_exact(W) {
                let mut raw = [0u8; W];
                raw.copy_from_slice(chunk);
                values.push(from_ne(raw));
            }
            Ok(values)
        } else {
            let mut values = Vec::with_capacity(len);
            for _ in 0..len {
                values.push(read_one(self)?);
            }
            Ok(values)
        }
    }

    /// Read `len` signed 16-bit integers.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends first.
    pub fn read_i16s(&mut self, len: usize) -> Result<Vec<i16>, ReadError> {
        self.read_array(len, i16::from_ne_bytes, Self::read_i16)
    }

    /// Read `len` unsigned 16-bit integers. UTF-16 character arrays use
    /// this: each element is one code unit.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends first.
    pub fn read_u16s(&mut self, len: usize) -> Result<Vec<u16>, ReadError> {
        self.read_array(len, u16::from_ne_bytes, Self::read_u16)
    }

    /// Read `len` signed 32-bit integers.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends first.
    pub fn read_i32s(&mut self, len: usize) -> Result<Vec<i32>, ReadError> {
        self.read_array(len, i32::from_ne_bytes, Self::read_i32)
    }

    /// Read `len` signed 64-bit integers.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends first.
    pub fn read_i64s(&mut self, len: usize) -> Result<Vec<i64>, ReadError> {
        self.read_array(len, i64::from_ne_bytes, Self::read_i64)
    }

    /// Read `len` 32-bit floats.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends first.
    pub fn read_f32s(&mut self, len: usize) -> Result<Vec<f32>, ReadError> {
        self.read_array(len, f32::from_ne_bytes, Self::read_f32)
    }

    /// Read `len` 64-bit floats.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends first.
    pub fn read_f64s(&mut self, len: usize) -> Result<Vec<f64>, ReadError> {
        self.read_array(len, f64::from_ne_bytes, Self::read_f64)
    }
}
