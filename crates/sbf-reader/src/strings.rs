//! Two-mode string decoder.
//!
//! The first wire byte selects the mode:
//!
//! ```text
//! ┌───────────────┬──────────────────────────────────────────────────┐
//! │ bit 7 of b[0] │ encoding                                         │
//! ├───────────────┼──────────────────────────────────────────────────┤
//! │ 0             │ ASCII. b[0] is the first character. Bytes follow │
//! │               │ until one has bit 7 set; masking that bit off    │
//! │               │ yields the last character.                       │
//! │ 1             │ Length-prefixed modified UTF-8. The low 6 bits   │
//! │               │ of b[0], extended by up to four continuation     │
//! │               │ bytes, encode char count + 1: 0 is null, 1 is   │
//! │               │ the empty string.                                │
//! └───────────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! The length prefix is a varint with a twist: bit 6 of the *first* byte
//! is the continuation marker (bit 7 is taken by the mode flag), and
//! subsequent bytes use bit 7 as usual.
//!
//! Modified UTF-8 uses only the 1-, 2- and 3-byte forms, each decoding to
//! one UTF-16 code unit; supplementary-plane characters arrive as two
//! 3-byte surrogate halves and are reassembled when the scratch is turned
//! into a `String`. Reserved lead bytes (nibbles 8 to 11 and 15) are
//! rejected.

use crate::error::ReadError;
use crate::reader::Reader;

impl Reader {
    /// Read a string in the two-mode encoding. `None` is the wire null.
    ///
    /// The returned `String` is freshly allocated; an internal UTF-16
    /// scratch is reused across calls and only ever grows.
    ///
    /// # Errors
    ///
    /// - [`ReadError::BufferUnderflow`] if the data ends mid-string.
    /// - [`ReadError::MalformedString`] on reserved modified-UTF-8 lead
    ///   bytes or unpairable surrogates.
    pub fn read_string(&mut self) -> Result<Option<String>, ReadError> {
        let available = self.require(1)?;
        let marker = self.buf[self.position];
        self.position += 1;
        if marker & 0x80 == 0 {
            // ASCII mode; the marker byte is the first character.
            return self.read_ascii().map(Some);
        }
        let length = if available >= 5 {
            self.read_utf8_length::<true>(marker)?
        } else {
            self.read_utf8_length::<false>(marker)?
        };
        match length {
            0 => Ok(None),
            1 => Ok(Some(String::new())),
            _ => {
                let char_count = length - 1;
                self.ensure_chars(char_count);
                self.read_utf8_chars(char_count)?;
                self.utf16_to_string(char_count).map(Some)
            }
        }
    }

    /// Decode the length prefix, `marker` being the already-consumed first
    /// byte. Same fast/slow structure as the varint decoders: `RESIDENT`
    /// promises the remaining prefix bytes are in the window.
    fn read_utf8_length<const RESIDENT: bool>(
        &mut self,
        marker: u8,
    ) -> Result<usize, ReadError> {
        let mut result = u32::from(marker & 0x3F);
        if marker & 0x40 != 0 {
            let mut shift = 6u32;
            loop {
                if !RESIDENT {
                    self.require(1)?;
                }
                let byte = self.buf[self.position];
                self.position += 1;
                result |= u32::from(byte & 0x7F) << shift;
                if byte & 0x80 == 0 || shift == 27 {
                    break;
                }
                shift += 7;
            }
        }
        Ok(result as usize)
    }

    /// Decode `char_count` modified-UTF-8 characters into the scratch.
    fn read_utf8_chars(&mut self, char_count: usize) -> Result<(), ReadError> {
        // Leading run of 7-bit characters: scan the resident window
        // without per-byte checks.
        let mut char_index = 0;
        let count = self.require(1)?.min(char_count);
        let mut p = self.position;
        while char_index < count {
            let byte = self.buf[p];
            if byte & 0x80 != 0 {
                break;
            }
            self.chars[char_index] = u16::from(byte);
            char_index += 1;
            p += 1;
        }
        self.position = p;
        if char_index < char_count {
            self.read_utf8_chars_slow(char_count, char_index)?;
        }
        Ok(())
    }

    /// Byte-at-a-time remainder of [`read_utf8_chars`](Self::read_utf8_chars):
    /// multi-byte sequences, and characters past the resident window.
    fn read_utf8_chars_slow(
        &mut self,
        char_count: usize,
        mut char_index: usize,
    ) -> Result<(), ReadError> {
        while char_index < char_count {
            if self.position == self.limit {
                self.require(1)?;
            }
            let byte = self.buf[self.position];
            self.position += 1;
            match byte >> 4 {
                0..=7 => self.chars[char_index] = u16::from(byte),
                12 | 13 => {
                    if self.position == self.limit {
                        self.require(1)?;
                    }
                    let second = self.buf[self.position];
                    self.position += 1;
                    self.chars[char_index] =
                        (u16::from(byte & 0x1F) << 6) | u16::from(second & 0x3F);
                }
                14 => {
                    self.require(2)?;
                    let second = self.buf[self.position];
                    let third = self.buf[self.position + 1];
                    self.position += 2;
                    self.chars[char_index] = (u16::from(byte & 0x0F) << 12)
                        | (u16::from(second & 0x3F) << 6)
                        | u16::from(third & 0x3F);
                }
                _ => {
                    return Err(ReadError::MalformedString {
                        reason: "reserved modified-UTF-8 lead byte",
                    })
                }
            }
            char_index += 1;
        }
        Ok(())
    }

    /// ASCII mode. The marker (first character) has already been consumed;
    /// scan the resident window for a byte with the terminator bit set and
    /// copy the masked range out. Falls back to the byte-at-a-time path
    /// when the terminator is beyond the window.
    fn read_ascii(&mut self) -> Result<String, ReadError> {
        let start = self.position - 1;
        let mut end = self.position;
        loop {
            if end == self.limit {
                return self.read_ascii_slow();
            }
            let byte = self.buf[end];
            end += 1;
            if byte & 0x80 != 0 {
                break;
            }
        }
        let mut value = String::with_capacity(end - start);
        for &byte in &self.buf[start..end - 1] {
            value.push(char::from(byte));
        }
        value.push(char::from(self.buf[end - 1] & 0x7F));
        self.position = end;
        Ok(value)
    }

    /// ASCII slow path: copy what is resident into the scratch, then pull
    /// one byte per `require(1)` until the terminator shows up.
    fn read_ascii_slow(&mut self) -> Result<String, ReadError> {
        // Back up so the marker byte is re-read as the first character.
        self.position -= 1;
        let mut char_count = self.limit - self.position;
        self.ensure_chars(char_count);
        for i in 0..char_count {
            self.chars[i] = u16::from(self.buf[self.position + i]);
        }
        self.position = self.limit;

        loop {
            self.require(1)?;
            let byte = self.buf[self.position];
            self.position += 1;
            self.ensure_chars(char_count + 1);
            if byte & 0x80 != 0 {
                self.chars[char_count] = u16::from(byte & 0x7F);
                char_count += 1;
                break;
            }
            self.chars[char_count] = u16::from(byte);
            char_count += 1;
        }
        self.utf16_to_string(char_count)
    }

    /// Materialize the first `char_count` scratch units as a `String`.
    fn utf16_to_string(&self, char_count: usize) -> Result<String, ReadError> {
        String::from_utf16(&self.chars[..char_count]).map_err(|_| ReadError::MalformedString {
            reason: "unpairable surrogate in character data",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// ASCII-mode wire bytes: the text itself with the terminator bit on
    /// the last byte.
    fn ascii_wire(text: &str) -> Vec<u8> {
        let mut bytes = text.as_bytes().to_vec();
        *bytes.last_mut().unwrap() |= 0x80;
        bytes
    }

    #[test]
    fn null_marker() {
        let mut reader = Reader::from_bytes(vec![0x80]);
        assert_eq!(reader.read_string().unwrap(), None);
    }

    #[test]
    fn empty_marker() {
        let mut reader = Reader::from_bytes(vec![0x81]);
        assert_eq!(reader.read_string().unwrap(), Some(String::new()));
    }

    #[test]
    fn ascii_fast_path() {
        let mut reader = Reader::from_bytes(ascii_wire("hello"));
        assert_eq!(reader.read_string().unwrap().unwrap(), "hello");
        assert_eq!(reader.position(), 5);
    }

    #[test]
    fn ascii_slow_path_across_refills() {
        struct OneByte(Cursor<Vec<u8>>);
        impl std::io::Read for OneByte {
            fn read(&mut self, dst: &mut [u8]) -> std::io::Result<usize> {
                let n = dst.len().min(1);
                self.0.read(&mut dst[..n])
            }
        }
        let text = "a quick brown fox jumps over the lazy dog";
        let mut reader = Reader::from_stream(OneByte(Cursor::new(ascii_wire(text))), 8);
        assert_eq!(reader.read_string().unwrap().unwrap(), text);
    }

    #[test]
    fn ascii_buffer_is_not_mutated() {
        let wire = ascii_wire("hi");
        let mut reader = Reader::from_bytes(wire.clone());
        let _ = reader.read_string().unwrap();
        assert_eq!(reader.buffer(), wire.as_slice());
    }

    #[test]
    fn length_mode_single_ascii_char() {
        // char count + 1 = 2, then one 7-bit character.
        let mut reader = Reader::from_bytes(vec![0x82, b'x']);
        assert_eq!(reader.read_string().unwrap().unwrap(), "x");
    }

    #[test]
    fn length_mode_two_byte_chars() {
        // "é" is U+00E9: 0xC3 0xA9 in the 2-byte form.
        let mut reader = Reader::from_bytes(vec![0x82, 0xC3, 0xA9]);
        assert_eq!(reader.read_string().unwrap().unwrap(), "é");
    }

    #[test]
    fn length_mode_three_byte_chars() {
        // "€" is U+20AC: 0xE2 0x82 0xAC in the 3-byte form.
        let mut reader = Reader::from_bytes(vec![0x82, 0xE2, 0x82, 0xAC]);
        assert_eq!(reader.read_string().unwrap().unwrap(), "€");
    }

    #[test]
    fn surrogate_pair_reassembles() {
        // U+1F600 as CESU-8: two 3-byte halves, D83D then DE00.
        let mut wire = vec![0x83];
        wire.extend_from_slice(&[0xED, 0xA0, 0xBD]); // 0xD83D
        wire.extend_from_slice(&[0xED, 0xB8, 0x80]); // 0xDE00
        let mut reader = Reader::from_bytes(wire);
        assert_eq!(reader.read_string().unwrap().unwrap(), "\u{1F600}");
    }

    #[test]
    fn unpaired_surrogate_is_malformed() {
        let mut wire = vec![0x82];
        wire.extend_from_slice(&[0xED, 0xA0, 0xBD]); // lone 0xD83D
        let mut reader = Reader::from_bytes(wire);
        assert!(matches!(
            reader.read_string(),
            Err(ReadError::MalformedString { .. })
        ));
    }

    #[test]
    fn reserved_lead_byte_is_malformed() {
        // Lead nibble 15 is not a valid 1-, 2- or 3-byte form.
        let mut reader = Reader::from_bytes(vec![0x82, 0xF0]);
        assert!(matches!(
            reader.read_string(),
            Err(ReadError::MalformedString { .. })
        ));
    }

    #[test]
    fn ascii_mode_without_terminator_underflows() {
        let mut reader = Reader::from_bytes(vec![0x00]);
        assert!(matches!(
            reader.read_string(),
            Err(ReadError::BufferUnderflow)
        ));
    }

    #[test]
    fn long_length_prefix() {
        // 1000 'a' characters: length 1001 needs a two-byte prefix.
        let count = 1000usize;
        let mut wire = Vec::new();
        let len = count as u32 + 1;
        wire.push(0x80 | 0x40 | (len & 0x3F) as u8);
        wire.push((len >> 6) as u8);
        wire.extend(std::iter::repeat(b'a').take(count));
        let mut reader = Reader::from_stream(Cursor::new(wire), 64);
        assert_eq!(reader.read_string().unwrap().unwrap(), "a".repeat(count));
    }

    #[test]
    fn scratch_grows_and_is_reused() {
        let text_long = "b".repeat(200);
        let mut wire = ascii_wire(&text_long);
        wire.extend_from_slice(&ascii_wire("tail"));
        let mut reader = Reader::from_stream(Cursor::new(wire), 16);
        assert_eq!(reader.read_string().unwrap().unwrap(), text_long);
        assert_eq!(reader.read_string().unwrap().unwrap(), "tail");
    }
}
