use std::io;

/// Errors surfaced by [`Reader`](crate::Reader) operations.
///
/// All errors propagate to the caller; the reader performs no internal
/// retry. After a failed primitive the reader is poisoned: its cursor may
/// sit anywhere inside the half-read value, so continuing is only sound if
/// the caller re-establishes a framing boundary itself.
///
/// ```text
///   ReadError
///   ├── BufferUnderflow          ← source exhausted mid-primitive
///   ├── BufferTooSmall           ← primitive wider than the whole window
///   ├── MalformedString          ← reserved or unpairable UTF data
///   ├── InvalidArgument          ← cursor argument outside the window
///   └── Io(std::io::Error)       ← fill source failure
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The source could not produce enough bytes for the requested
    /// primitive.
    #[error("buffer underflow")]
    BufferUnderflow,

    /// A single primitive larger than the window capacity was requested.
    ///
    /// Structurally a configuration error: no amount of refilling can make
    /// a value wider than the buffer resident all at once.
    #[error("buffer too small: capacity {capacity}, required {required}")]
    BufferTooSmall { capacity: usize, required: usize },

    /// A string payload could not be decoded: a reserved modified-UTF-8
    /// lead byte, or UTF-16 scratch that does not form valid text.
    #[error("malformed string: {reason}")]
    MalformedString { reason: &'static str },

    /// A cursor or length argument fell outside the current window.
    ///
    /// Surfaced synchronously with no state change.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The fill source failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
