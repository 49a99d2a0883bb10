use super::constants::{DICT_START, END, INTEGER_START, LENGTH_SEPARATOR, LIST_START};
use super::error::BencodeError;
use super::value::{Dict, Integer, Value};
use std::io::Write;
use tracing::trace;

/// Encodes a bencode value to a byte vector.
///
/// The output is canonical bencode:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys sorted by raw byte value)
///
/// Encoding the same tree twice always yields identical bytes.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails.
///
/// # Examples
///
/// ```
/// use rbencode::{encode, Dict, Value};
/// use bytes::Bytes;
///
/// assert_eq!(encode(&Value::from(42i64)).unwrap(), b"i42e");
/// assert_eq!(encode(&Value::from(u64::MAX)).unwrap(), b"i18446744073709551615e");
/// assert_eq!(encode(&Value::string("hello")).unwrap(), b"5:hello");
///
/// let list = Value::List(vec![Value::from(1i64), Value::string("two")]);
/// assert_eq!(encode(&list).unwrap(), b"li1e3:twoe");
///
/// let mut dict = Dict::new();
/// dict.insert(Bytes::from_static(b"b"), Value::from(2i64));
/// dict.insert(Bytes::from_static(b"a"), Value::from(1i64));
/// assert_eq!(encode(&Value::Dict(dict)).unwrap(), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf)?;
    trace!(len = buf.len(), "encoded bencode value");
    Ok(buf)
}

/// Encodes a bencode value into any writer.
///
/// Nothing is buffered; wrap slow writers in a `BufWriter`.
pub fn encode_to<W: Write>(value: &Value, writer: &mut W) -> Result<(), BencodeError> {
    encode_value(value, writer)
}

fn encode_value<W: Write>(value: &Value, writer: &mut W) -> Result<(), BencodeError> {
    match value {
        Value::Bytes(b) => write_bytes(b, writer),
        Value::Integer(i) => write_integer(*i, writer),
        Value::List(l) => write_list(l, writer),
        Value::Dict(d) => write_dict(d, writer),
    }
}

fn write_bytes<W: Write>(bytes: &[u8], writer: &mut W) -> Result<(), BencodeError> {
    write!(writer, "{}", bytes.len())?;
    writer.write_all(&[LENGTH_SEPARATOR])?;
    writer.write_all(bytes)?;
    Ok(())
}

fn write_integer<W: Write>(integer: Integer, writer: &mut W) -> Result<(), BencodeError> {
    writer.write_all(&[INTEGER_START])?;
    write!(writer, "{}", integer)?;
    writer.write_all(&[END])?;
    Ok(())
}

fn write_list<W: Write>(list: &[Value], writer: &mut W) -> Result<(), BencodeError> {
    writer.write_all(&[LIST_START])?;
    for item in list {
        encode_value(item, writer)?;
    }
    writer.write_all(&[END])?;
    Ok(())
}

fn write_dict<W: Write>(dict: &Dict, writer: &mut W) -> Result<(), BencodeError> {
    // HashMap iteration order is arbitrary; sort by raw key bytes.
    let mut entries: Vec<_> = dict.iter().collect();
    entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

    writer.write_all(&[DICT_START])?;
    for (key, val) in entries {
        write_bytes(key, writer)?;
        encode_value(val, writer)?;
    }
    writer.write_all(&[END])?;
    Ok(())
}
