#![warn(clippy::pedantic)]

//! Test-support fill sources shared by the integration tests and benches.
//!
//! Round-trip tests want the reader's refill machinery exercised, not
//! bypassed, so the helpers here deliberately serve bytes awkwardly:
//! [`ChunkedSource`] drips a fixed number of bytes per fill, and
//! [`CountingSource`] additionally counts how often the reader came back
//! for more, which is how compaction behavior is observed from outside.

use std::io::{self, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A stream that hands out at most `chunk` bytes per read call.
pub struct ChunkedSource {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl ChunkedSource {
    /// Serve `data` at most `chunk` bytes at a time. `chunk` must be at
    /// least 1.
    #[must_use]
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        assert!(chunk >= 1, "a zero chunk would never make progress");
        Self { data, pos: 0, chunk }
    }
}

impl Read for ChunkedSource {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let n = dst
            .len()
            .min(self.chunk)
            .min(self.data.len() - self.pos);
        dst[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// A stream that counts how many fill calls the reader issued.
///
/// The counter handle stays with the test after the source moves into the
/// reader.
pub struct CountingSource {
    inner: ChunkedSource,
    fills: Arc<AtomicUsize>,
}

impl CountingSource {
    #[must_use]
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            inner: ChunkedSource::new(data, chunk),
            fills: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A handle onto the fill counter, valid after the source is moved.
    #[must_use]
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fills)
    }
}

impl Read for CountingSource {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        self.fills.fetch_add(1, Ordering::Relaxed);
        self.inner.read(dst)
    }
}
