use std::io::{self, Read};

/// A refillable byte source feeding a [`Reader`](crate::Reader)'s window.
///
/// This is the single seam between the decoder and the outside world: the
/// window manager calls [`fill`](Self::fill) whenever a read wants more
/// bytes than are resident, and nothing else in the reader blocks. Custom
/// implementations can serve bytes from anywhere (a ring buffer, a
/// decompressor, a test fixture that drip-feeds one byte per call).
///
/// # Contract
///
/// - `Ok(Some(n))` placed `n` bytes at the front of `dst`. `n == 0` means
///   the source is short right now but not exhausted; the window manager
///   loops and asks again.
/// - `Ok(None)` means the source is exhausted. Once returned, every later
///   call must also return `Ok(None)`.
/// - `Err` aborts the in-flight read; it carries the underlying I/O cause.
pub trait FillSource {
    /// Pull up to `dst.len()` bytes into the front of `dst`.
    ///
    /// # Errors
    ///
    /// Any I/O failure from the underlying source.
    fn fill(&mut self, dst: &mut [u8]) -> io::Result<Option<usize>>;
}

/// Every blocking [`Read`] is a fill source.
///
/// `Ok(0)` from a reader with a non-empty destination means end of stream
/// per the std convention, so it maps to `Ok(None)`. An `Interrupted`
/// error maps to a zero-length fill so the window manager retries.
impl<R: Read> FillSource for R {
    fn fill(&mut self, dst: &mut [u8]) -> io::Result<Option<usize>> {
        if dst.is_empty() {
            return Ok(Some(0));
        }
        match self.read(dst) {
            Ok(0) => Ok(None),
            Ok(n) => Ok(Some(n)),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Some(0)),
            Err(e) => Err(e),
        }
    }
}
