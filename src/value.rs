use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;

/// A bencode dictionary.
///
/// The map has no ordering of its own. The encoder sorts keys on every call,
/// so insertion order never leaks into the output.
pub type Dict = HashMap<Bytes, Value>;

/// A bencode integer.
///
/// Bencode places no bound on integers, but real metadata never leaves the
/// 64-bit range. Values that fit `i64` are `Signed`; the `Unsigned` class only
/// holds values above `i64::MAX`, so every number has one representation when
/// built through the constructors below.
///
/// # Examples
///
/// ```
/// use rbencode::Integer;
///
/// assert_eq!(Integer::from(42u64), Integer::Signed(42));
/// assert_eq!(Integer::from(u64::MAX), Integer::Unsigned(u64::MAX));
/// assert_eq!(Integer::from(u64::MAX).to_string(), "18446744073709551615");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Integer {
    /// A value in the `i64` range.
    Signed(i64),
    /// A value above `i64::MAX`.
    Unsigned(u64),
}

impl Integer {
    /// Builds an integer from a `u64`, keeping it signed when it fits.
    pub fn from_u64(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => Integer::Signed(i),
            Err(_) => Integer::Unsigned(n),
        }
    }

    /// Returns the value as an `i64`, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Integer::Signed(i) => Some(i),
            Integer::Unsigned(u) => i64::try_from(u).ok(),
        }
    }

    /// Returns the value as a `u64`, if it is not negative.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Integer::Signed(i) => u64::try_from(i).ok(),
            Integer::Unsigned(u) => Some(u),
        }
    }

    /// Returns true if the value is held in the widened unsigned class.
    pub fn is_unsigned(&self) -> bool {
        matches!(self, Integer::Unsigned(_))
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Signed(i) => write!(f, "{}", i),
            Integer::Unsigned(u) => write!(f, "{}", u),
        }
    }
}

impl From<i64> for Integer {
    fn from(i: i64) -> Self {
        Integer::Signed(i)
    }
}

impl From<u64> for Integer {
    fn from(u: u64) -> Self {
        Integer::from_u64(u)
    }
}

/// A bencode value.
///
/// Bencode has four data types: byte strings, integers, lists, and
/// dictionaries. Every list and dictionary owns its children outright.
///
/// # Examples
///
/// ```
/// use rbencode::{Integer, Value};
///
/// let int = Value::from(42i64);
/// let string = Value::string("hello");
/// let list = Value::List(vec![int.clone(), string.clone()]);
///
/// assert_eq!(int.as_integer(), Some(Integer::Signed(42)));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert_eq!(list.as_list().map(|l| l.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A byte string (may or may not be valid UTF-8).
    Bytes(Bytes),
    /// A 64-bit signed or unsigned integer.
    Integer(Integer),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary with byte string keys.
    Dict(Dict),
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Creates an empty dictionary.
    pub fn empty_dict() -> Self {
        Value::Dict(Dict::new())
    }

    /// Returns the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as an `i64`, if it is an integer in that range.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::Value;
    ///
    /// assert_eq!(Value::from(-7i64).as_i64(), Some(-7));
    /// assert_eq!(Value::from(u64::MAX).as_i64(), None);
    /// assert_eq!(Value::string("7").as_i64(), None);
    /// ```
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer()?.as_i64()
    }

    /// Returns the value as a `u64`, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_integer()?.as_u64()
    }

    /// Returns the value as a byte string, if it is one.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is a valid UTF-8 byte string.
    ///
    /// Returns `None` if the value is not a byte string or if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the value as a dictionary reference, if it is one.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    ///
    /// This avoids cloning the dictionary when you need ownership.
    pub fn into_dict(self) -> Option<Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key in this value if it is a dictionary.
    ///
    /// Returns `None` if the value is not a dictionary or if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }
}

impl From<Integer> for Value {
    fn from(i: Integer) -> Self {
        Value::Integer(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(Integer::Signed(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Integer(Integer::from_u64(u))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Value::Dict(d)
    }
}
