#![warn(clippy::pedantic)]

//! Pull-mode buffered reader for the SBF serialization format.
//!
//! [`Reader`] decodes typed primitives from a fixed-capacity byte window
//! that transparently refills from an underlying source when a read asks
//! for more bytes than are currently resident. The window slides: consumed
//! bytes are compacted away to make room, and a running total keeps the
//! absolute offset accountable.
//!
//! ```text
//!   ┌──────────────────────── buf (capacity) ────────────────────────┐
//!   │ consumed, compactable │ resident, readable │ free, fillable    │
//!   └───────────────────────┴────────────────────┴───────────────────┘
//!   0                    position              limit          capacity
//! ```
//!
//! The typed surface covers fixed-width integers and floats, booleans,
//! UTF-16 code units, byte arrays, bulk primitive arrays, 32/64-bit
//! varints with optional zig-zag, and the two-mode string encoding.

pub mod error;
pub mod fill;
pub mod reader;

mod arrays;
mod primitives;
mod strings;
mod varint;

pub use error::ReadError;
pub use fill::FillSource;
pub use reader::Reader;
pub use sbf_wire::ByteOrder;
