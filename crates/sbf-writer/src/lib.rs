#![warn(clippy::pedantic)]

//! Buffer-backed writer for the SBF serialization format.
//!
//! [`Writer`] is the byte-exact inverse of `sbf-reader`'s typed surface:
//! every `write_*` here emits the wire bytes the matching `read_*`
//! consumes. Output accumulates in a growable buffer, so writes are
//! infallible; [`Writer::finish`] hands the bytes off.

mod writer;

pub use sbf_wire::ByteOrder;
pub use writer::Writer;
