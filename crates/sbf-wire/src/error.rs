/// Errors raised by the slice-level wire codecs.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete value could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },
}
