//! Wire format bytes and decoder tuning parameters.

// ============================================================================
// Tag bytes
// ============================================================================

/// Opens a dictionary.
pub const DICT_START: u8 = b'd';

/// Opens a list.
pub const LIST_START: u8 = b'l';

/// Opens an integer.
pub const INTEGER_START: u8 = b'i';

/// Closes an integer, list or dictionary.
pub const END: u8 = b'e';

/// Separates a byte string length from its payload.
pub const LENGTH_SEPARATOR: u8 = b':';

/// Sign prefix of a negative number.
pub const MINUS: u8 = b'-';

// ============================================================================
// Limits
// ============================================================================

/// Default maximum nesting of lists and dictionaries accepted by the decoder.
///
/// Real torrent metadata stays in single digits; the limit keeps hostile input
/// from exhausting the call stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Upper bound on bytes reserved up front for a byte string payload.
///
/// Larger strings still decode; their buffer grows as data actually arrives.
pub const MAX_PREALLOC: usize = 64 * 1024;
