use thiserror::Error;

/// Errors that can occur while decoding or encoding bencode.
///
/// Decode errors carry the number of bytes consumed when the problem was
/// detected. The offset is meant for humans reading a diagnostic; it is not a
/// resume point.
#[derive(Debug, Error)]
pub enum BencodeError {
    /// The input ended in the middle of a value.
    #[error("unexpected end of input at offset {offset:#X}")]
    UnexpectedEof { offset: u64 },

    /// A value started with a byte that is not `d`, `l`, `i` or a digit.
    #[error("invalid type tag '{}' at offset {offset:#X}", .byte.escape_ascii())]
    InvalidTypeTag { byte: u8, offset: u64 },

    /// An integer or length token did not start with a digit or `-`.
    #[error("integers must begin with a digit or negative sign, found '{}' at offset {offset:#X}", .byte.escape_ascii())]
    InvalidIntegerStart { byte: u8, offset: u64 },

    /// A multi-digit number started with `0`.
    #[error("invalid leading zero at offset {offset:#X}")]
    LeadingZero { offset: u64 },

    /// The number was written as `-0`.
    #[error("invalid negative zero at offset {offset:#X}")]
    NegativeZero { offset: u64 },

    /// A non-digit byte appeared inside a number.
    #[error("invalid character '{}' in integer at offset {offset:#X}", .byte.escape_ascii())]
    InvalidCharacter { byte: u8, offset: u64 },

    /// The integer fits neither `i64` nor `u64`.
    #[error("integer {digits} out of 64-bit range at offset {offset:#X}")]
    IntegerOverflow { digits: String, offset: u64 },

    /// A byte string declared a negative length.
    #[error("string length {length} can not be negative at offset {offset:#X}")]
    NegativeLength { length: i64, offset: u64 },

    /// A byte string length does not fit `i64`.
    #[error("string length {digits} exceeds the size of i64 at offset {offset:#X}")]
    LengthOverflow { digits: String, offset: u64 },

    /// The outermost value was not a dictionary.
    #[error("data must begin with a dictionary, found '{}'", .byte.escape_ascii())]
    RootNotDictionary { byte: u8 },

    /// Lists and dictionaries were nested past the decoder's limit.
    #[error("nesting too deep at offset {offset:#X}")]
    NestingTooDeep { offset: u64 },

    /// Bytes remained after the root value in strict mode.
    #[error("trailing data after value at offset {offset:#X}")]
    TrailingData { offset: u64 },

    /// The underlying reader or writer failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BencodeError {
    /// Returns the consumed-byte offset recorded with this error, if any.
    pub fn offset(&self) -> Option<u64> {
        match self {
            BencodeError::UnexpectedEof { offset }
            | BencodeError::InvalidTypeTag { offset, .. }
            | BencodeError::InvalidIntegerStart { offset, .. }
            | BencodeError::LeadingZero { offset }
            | BencodeError::NegativeZero { offset }
            | BencodeError::InvalidCharacter { offset, .. }
            | BencodeError::IntegerOverflow { offset, .. }
            | BencodeError::NegativeLength { offset, .. }
            | BencodeError::LengthOverflow { offset, .. }
            | BencodeError::NestingTooDeep { offset }
            | BencodeError::TrailingData { offset } => Some(*offset),
            BencodeError::RootNotDictionary { .. } | BencodeError::Io(_) => None,
        }
    }
}
