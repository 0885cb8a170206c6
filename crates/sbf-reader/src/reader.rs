use std::io::Read;

use sbf_wire::ByteOrder;

use crate::error::ReadError;
use crate::fill::FillSource;

/// A reasonable window capacity for stream-backed readers whose callers
/// have no better estimate to pass to [`Reader::from_stream`].
pub const DEFAULT_CAPACITY: usize = 4096;

/// Long skips run through the window in chunks no larger than this.
const SKIP_CHUNK: u64 = i32::MAX as u64;

/// Initial size of the UTF-16 decode scratch.
pub(crate) const CHARS_INITIAL: usize = 32;

/// Pull-mode decoder over a sliding byte window.
///
/// A `Reader` owns a fixed-capacity buffer and three indices into it:
/// `position` (next byte to consume), `limit` (one past the last valid
/// byte) and the buffer capacity, with `position <= limit <= capacity`
/// holding at every public-API boundary. `total` counts the bytes that
/// have scrolled out of the buffer through compaction, so
/// `total + position` is the absolute offset consumed.
///
/// When a typed read wants more bytes than are resident, the window
/// manager pulls from the attached [`FillSource`], compacting the live
/// region `[position, limit)` to the front of the buffer to make room.
/// Without a source, the resident bytes are all there is and draining
/// them surfaces [`ReadError::BufferUnderflow`].
///
/// A `Reader` is exclusively owned by its caller and is not safe for
/// concurrent mutation; callers serialize access externally.
pub struct Reader {
    /// Fixed-capacity byte window.
    pub(crate) buf: Box<[u8]>,
    /// Next byte to consume.
    pub(crate) position: usize,
    /// One past the last resident byte.
    pub(crate) limit: usize,
    /// Bytes that have scrolled out of the window through compaction.
    pub(crate) total: u64,
    /// Applies to fixed-width multi-byte primitives only.
    pub(crate) order: ByteOrder,
    /// Refill source. `None` means the window is all there is.
    pub(crate) source: Option<Box<dyn FillSource>>,
    /// UTF-16 decode scratch, reused across string reads. Grows by
    /// doubling, never shrinks, never exposed.
    pub(crate) chars: Vec<u16>,
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("position", &self.position)
            .field("limit", &self.limit)
            .field("capacity", &self.buf.len())
            .field("total", &self.total)
            .field("order", &self.order)
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

impl Reader {
    /// Create a reader with an empty window of the given capacity and no
    /// source attached. Reads fail with underflow until a buffer or source
    /// is bound.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            position: 0,
            limit: 0,
            total: 0,
            order: ByteOrder::Big,
            source: None,
            chars: Vec::new(),
        }
    }

    /// Create a reader over a pre-filled byte buffer. The whole buffer is
    /// resident; there is no refill source.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let limit = bytes.len();
        Self {
            buf: bytes.into_boxed_slice(),
            position: 0,
            limit,
            total: 0,
            order: ByteOrder::Big,
            source: None,
            chars: Vec::new(),
        }
    }

    /// Create a reader over a copy of the given byte region.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes.to_vec())
    }

    /// Create a reader pulling from a blocking byte stream through a
    /// window of the given capacity.
    pub fn from_stream(stream: impl Read + 'static, capacity: usize) -> Self {
        Self::from_source(Box::new(stream), capacity)
    }

    /// Create a reader pulling from a custom [`FillSource`] strategy.
    #[must_use]
    pub fn from_source(source: Box<dyn FillSource>, capacity: usize) -> Self {
        let mut reader = Self::new(capacity);
        reader.source = Some(source);
        reader
    }

    // ── Accessors and rebinding ──────────────────────────────────────────

    /// The byte order applied to fixed-width multi-byte primitives.
    #[must_use]
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Set the byte order. The wire default is big-endian.
    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Physical size of the window.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Next byte to consume, as an index into the window.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// One past the last resident byte.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes resident from `position`.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// The full backing window, including bytes outside `[position, limit)`.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    /// Replace the window with a pre-filled buffer.
    ///
    /// Resets the cursor to the start, makes the whole buffer resident,
    /// zeroes the running total, restores the default byte order and
    /// detaches any source.
    pub fn set_buffer(&mut self, bytes: Vec<u8>) {
        self.limit = bytes.len();
        self.buf = bytes.into_boxed_slice();
        self.position = 0;
        self.total = 0;
        self.order = ByteOrder::Big;
        self.source = None;
    }

    /// Attach a new fill source, discarding any resident bytes so the next
    /// read refills from it.
    pub fn set_source(&mut self, source: Box<dyn FillSource>) {
        self.source = Some(source);
        self.limit = 0;
        self.rewind();
    }

    /// Attach a blocking byte stream as the fill source.
    pub fn set_stream(&mut self, stream: impl Read + 'static) {
        self.set_source(Box::new(stream));
    }

    /// Whether a fill source is attached.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Release the fill source. Idempotent; dropping the source is how an
    /// owned stream is closed, and close failures have nowhere useful to
    /// go, so none are surfaced.
    pub fn close(&mut self) {
        self.source = None;
    }

    // ── Cursor manipulation ──────────────────────────────────────────────

    /// Move the cursor within the resident window.
    ///
    /// Intended for in-memory replay of a fully loaded buffer; moving the
    /// cursor across refills invalidates whatever the caller thinks it is
    /// pointing at.
    ///
    /// # Errors
    ///
    /// [`ReadError::InvalidArgument`] if `position > limit`.
    pub fn set_position(&mut self, position: usize) -> Result<(), ReadError> {
        if position > self.limit {
            return Err(ReadError::InvalidArgument("position exceeds limit"));
        }
        self.position = position;
        Ok(())
    }

    /// Narrow or widen the resident window.
    ///
    /// # Errors
    ///
    /// [`ReadError::InvalidArgument`] if `limit` exceeds the capacity or
    /// falls below the current position.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), ReadError> {
        if limit > self.buf.len() {
            return Err(ReadError::InvalidArgument("limit exceeds capacity"));
        }
        if limit < self.position {
            return Err(ReadError::InvalidArgument("limit below position"));
        }
        self.limit = limit;
        Ok(())
    }

    /// Reset the cursor to the start of the window and zero the running
    /// total, as for replaying a fully loaded buffer.
    pub fn rewind(&mut self) {
        self.position = 0;
        self.total = 0;
    }

    /// Absolute number of bytes consumed since construction or the last
    /// rebind: bytes compacted away plus the cursor offset.
    #[must_use]
    pub fn total_bytes_read(&self) -> u64 {
        self.total + self.position as u64
    }

    // ── Window manager ───────────────────────────────────────────────────

    /// Fill `buf[start..]` from the source. `Ok(None)` is end of data,
    /// which is also what an absent source reports. A full buffer is a
    /// zero-length fill, not end of data; compaction frees the room.
    fn fill_range(&mut self, start: usize) -> Result<Option<usize>, ReadError> {
        if start == self.buf.len() {
            return Ok(Some(0));
        }
        match self.source.as_mut() {
            None => Ok(None),
            Some(source) => Ok(source.fill(&mut self.buf[start..])?),
        }
    }

    /// Slide the live region `[position, limit)` to the front of the
    /// buffer, crediting the discarded prefix to `total`.
    fn compact(&mut self) {
        self.buf.copy_within(self.position..self.limit, 0);
        self.total += self.position as u64;
        self.limit -= self.position;
        self.position = 0;
    }

    /// Ensure at least `required` bytes are resident from `position`,
    /// filling and compacting as needed.
    ///
    /// Returns the number of bytes now resident, which is at least
    /// `required`. Zero-length fills (short but not end of data) are
    /// retried until the source produces bytes or reports exhaustion.
    ///
    /// # Errors
    ///
    /// - [`ReadError::BufferTooSmall`] if `required` exceeds the capacity.
    /// - [`ReadError::BufferUnderflow`] if the source is exhausted first.
    /// - [`ReadError::Io`] if the source fails.
    pub fn require(&mut self, required: usize) -> Result<usize, ReadError> {
        let mut remaining = self.limit - self.position;
        if remaining >= required {
            return Ok(remaining);
        }
        if required > self.buf.len() {
            return Err(ReadError::BufferTooSmall {
                capacity: self.buf.len(),
                required,
            });
        }

        // Top up the free tail before giving up the cheap path.
        if remaining > 0 {
            match self.fill_range(self.limit)? {
                None => return Err(ReadError::BufferUnderflow),
                Some(count) => {
                    self.limit += count;
                    remaining += count;
                    if remaining >= required {
                        return Ok(remaining);
                    }
                }
            }
        }

        self.compact();
        loop {
            match self.fill_range(self.limit)? {
                None => return Err(ReadError::BufferUnderflow),
                Some(count) => {
                    self.limit += count;
                    if self.limit >= required {
                        return Ok(self.limit);
                    }
                }
            }
        }
    }

    /// Best-effort variant of [`require`](Self::require): make up to
    /// `min(count, capacity)` bytes resident.
    ///
    /// Returns `Ok(None)` only when the window is empty and the source is
    /// exhausted, so `optional(1)` doubles as a non-fatal end-of-data
    /// probe. One fill is attempted before compacting; compaction moves
    /// the cursor, and a probe that can be answered without sliding the
    /// window should not slide it.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if the source fails.
    pub fn optional(&mut self, count: usize) -> Result<Option<usize>, ReadError> {
        let mut remaining = self.limit - self.position;
        if remaining >= count {
            return Ok(Some(count));
        }
        let count = count.min(self.buf.len());

        match self.fill_range(self.limit)? {
            None => {
                if remaining == 0 {
                    return Ok(None);
                }
                return Ok(Some(remaining.min(count)));
            }
            Some(filled) => {
                self.limit += filled;
                remaining += filled;
                if remaining >= count {
                    return Ok(Some(count));
                }
            }
        }

        self.compact();
        loop {
            match self.fill_range(self.limit)? {
                None => break,
                Some(filled) => {
                    self.limit += filled;
                    if self.limit >= count {
                        break;
                    }
                }
            }
        }
        remaining = self.limit;
        if remaining == 0 {
            Ok(None)
        } else {
            Ok(Some(remaining.min(count)))
        }
    }

    /// Grow the UTF-16 scratch to hold at least `needed` code units:
    /// `new_size = max(needed, old * 2)`, never below the initial size.
    pub(crate) fn ensure_chars(&mut self, needed: usize) {
        if self.chars.len() < needed {
            let new_len = needed.max(self.chars.len() * 2).max(CHARS_INITIAL);
            self.chars.resize(new_len, 0);
        }
    }

    // ── Stream-style reads ───────────────────────────────────────────────

    /// Read the next byte, or `None` at end of data.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if the source fails.
    pub fn read(&mut self) -> Result<Option<u8>, ReadError> {
        if self.optional(1)?.is_none() {
            return Ok(None);
        }
        let byte = self.buf[self.position];
        self.position += 1;
        Ok(Some(byte))
    }

    /// Fill `dst` with up to `dst.len()` bytes.
    ///
    /// Returns the number of bytes actually read, or `None` when the very
    /// first attempt finds the data exhausted. A short count means the
    /// source ran out partway, which is reported rather than treated as an
    /// error, matching byte-stream conventions.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if the source fails.
    pub fn read_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>, ReadError> {
        let wanted = dst.len();
        let mut filled = 0;
        let mut copy = (self.limit - self.position).min(wanted);
        loop {
            dst[filled..filled + copy]
                .copy_from_slice(&self.buf[self.position..self.position + copy]);
            self.position += copy;
            filled += copy;
            if filled == wanted {
                break;
            }
            match self.optional(wanted - filled)? {
                None => {
                    if filled == 0 {
                        return Ok(None);
                    }
                    break;
                }
                Some(available) => copy = available,
            }
        }
        Ok(Some(filled))
    }

    /// Advance the cursor by exactly `count` bytes, discarding them.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends first.
    pub fn skip_bytes(&mut self, count: usize) -> Result<(), ReadError> {
        let mut left = count;
        let mut step = (self.limit - self.position).min(left);
        loop {
            self.position += step;
            left -= step;
            if left == 0 {
                return Ok(());
            }
            step = left.min(self.buf.len());
            self.require(step)?;
        }
    }

    /// Advance the cursor by `count` bytes, in window-sized chunks capped
    /// at `i32::MAX` per pass. Returns `count`.
    ///
    /// # Errors
    ///
    /// [`ReadError::BufferUnderflow`] if the data ends first.
    pub fn skip(&mut self, count: u64) -> Result<u64, ReadError> {
        let mut left = count;
        while left > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let step = left.min(SKIP_CHUNK) as usize;
            self.skip_bytes(step)?;
            left -= step as u64;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// A stream that hands out at most `chunk` bytes per fill call.
    struct Drip {
        data: Cursor<Vec<u8>>,
        chunk: usize,
    }

    impl Read for Drip {
        fn read(&mut self, dst: &mut [u8]) -> std::io::Result<usize> {
            let n = dst.len().min(self.chunk);
            self.data.read(&mut dst[..n])
        }
    }

    fn drip(data: Vec<u8>, chunk: usize) -> Reader {
        Reader::from_stream(Drip { data: Cursor::new(data), chunk }, 8)
    }

    #[test]
    fn require_returns_resident_count() {
        let mut reader = Reader::from_bytes(vec![1, 2, 3, 4]);
        assert_eq!(reader.require(1).unwrap(), 4);
        assert_eq!(reader.require(4).unwrap(), 4);
    }

    #[test]
    fn require_wider_than_capacity_is_too_small() {
        let mut reader = Reader::from_bytes(vec![0; 4]);
        assert!(matches!(
            reader.require(5),
            Err(ReadError::BufferTooSmall { capacity: 4, required: 5 })
        ));
    }

    #[test]
    fn require_loops_over_short_fills() {
        let mut reader = drip((0u8..32).collect(), 3);
        assert!(reader.require(8).unwrap() >= 8);
        assert_eq!(reader.remaining(), reader.require(8).unwrap());
    }

    #[test]
    fn require_underflows_at_end_of_data() {
        let mut reader = drip(vec![1, 2, 3], 2);
        assert!(reader.require(3).is_ok());
        reader.skip_bytes(3).unwrap();
        assert!(matches!(reader.require(1), Err(ReadError::BufferUnderflow)));
    }

    #[test]
    fn optional_probe_reports_eof_only_when_empty() {
        let mut reader = drip(vec![9], 1);
        assert_eq!(reader.optional(4).unwrap(), Some(1));
        assert_eq!(reader.read().unwrap(), Some(9));
        assert_eq!(reader.optional(1).unwrap(), None);
    }

    #[test]
    fn compaction_credits_total() {
        let mut reader = drip((0u8..24).collect(), 8);
        reader.skip_bytes(20).unwrap();
        assert_eq!(reader.total_bytes_read(), 20);
        assert!(reader.position() <= reader.limit());
        assert!(reader.limit() <= reader.capacity());
    }

    #[test]
    fn read_into_reports_partial_then_eof() {
        let mut reader = drip(vec![1, 2, 3, 4, 5], 2);
        let mut dst = [0u8; 8];
        assert_eq!(reader.read_into(&mut dst).unwrap(), Some(5));
        assert_eq!(&dst[..5], &[1, 2, 3, 4, 5]);
        assert_eq!(reader.read_into(&mut dst).unwrap(), None);
    }

    #[test]
    fn read_single_bytes_until_eof() {
        let mut reader = drip(vec![7, 8], 1);
        assert_eq!(reader.read().unwrap(), Some(7));
        assert_eq!(reader.read().unwrap(), Some(8));
        assert_eq!(reader.read().unwrap(), None);
    }

    #[test]
    fn skip_crosses_refills() {
        let data: Vec<u8> = (0..=255).collect();
        let mut reader = drip(data, 5);
        assert_eq!(reader.skip(200).unwrap(), 200);
        assert_eq!(reader.total_bytes_read(), 200);
        assert_eq!(reader.read().unwrap(), Some(200));
    }

    #[test]
    fn cursor_setters_validate() {
        let mut reader = Reader::from_bytes(vec![0; 8]);
        reader.set_position(8).unwrap();
        assert!(reader.set_position(9).is_err());
        assert!(reader.set_limit(4).is_err()); // below position
        reader.set_position(0).unwrap();
        reader.set_limit(4).unwrap();
        assert!(reader.set_limit(9).is_err());
    }

    #[test]
    fn rewind_resets_cursor_and_total() {
        let mut reader = Reader::from_bytes(vec![1, 2, 3]);
        reader.skip_bytes(2).unwrap();
        assert_eq!(reader.total_bytes_read(), 2);
        reader.rewind();
        assert_eq!(reader.total_bytes_read(), 0);
        assert_eq!(reader.read().unwrap(), Some(1));
    }

    #[test]
    fn set_buffer_rebinds_and_resets() {
        let mut reader = drip(vec![1, 2, 3], 1);
        reader.set_order(ByteOrder::Little);
        let _ = reader.read().unwrap();
        reader.set_buffer(vec![0xAA, 0xBB]);
        assert_eq!(reader.total_bytes_read(), 0);
        assert_eq!(reader.order(), ByteOrder::Big);
        assert!(!reader.has_source());
        assert_eq!(reader.read().unwrap(), Some(0xAA));
    }

    #[test]
    fn set_source_forces_refill() {
        let mut reader = Reader::from_bytes(vec![1, 2, 3]);
        reader.set_stream(Cursor::new(vec![9, 9]));
        assert_eq!(reader.limit(), 0);
        assert_eq!(reader.read().unwrap(), Some(9));
    }

    #[test]
    fn close_is_idempotent_and_drains_to_eof() {
        let mut reader = drip(vec![1, 2], 2);
        assert_eq!(reader.read().unwrap(), Some(1));
        reader.close();
        reader.close();
        assert_eq!(reader.read().unwrap(), Some(2));
        assert_eq!(reader.read().unwrap(), None);
    }
}
