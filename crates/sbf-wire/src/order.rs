/// Byte order applied to fixed-width multi-byte primitives.
///
/// The wire default is [`ByteOrder::Big`], which is what the canonical
/// writer emits. Varints and strings are byte-order independent, so this
/// setting only affects the fixed-width integer and float encodings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Network order, most-significant byte first. The wire default.
    #[default]
    Big,
    /// Least-significant byte first.
    Little,
}

impl ByteOrder {
    /// The byte order of the host.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }

    /// Whether this order matches the host order.
    ///
    /// Bulk-array decoders branch on this to decide between a typed pass
    /// over the buffer window and the element-wise fallback.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(
            (self, Self::native()),
            (Self::Big, Self::Big) | (Self::Little, Self::Little)
        )
    }
}
