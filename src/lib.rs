//! rbencode - Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format BitTorrent uses for `.torrent` files
//! and tracker responses. This crate turns bencode bytes into a [`Value`] tree
//! and writes trees back out in canonical form.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Integers cover the whole `i64` range plus `u64` values above `i64::MAX`,
//! which some torrents use for file sizes.
//!
//! # Examples
//!
//! ## Decoding
//!
//! A document must be a dictionary. Empty input decodes to an empty one.
//!
//! ```
//! use rbencode::{decode, Value};
//!
//! let value = decode(b"d8:announce15:http://test.com4:infod6:lengthi1024eee").unwrap();
//! assert_eq!(value.get(b"announce").and_then(Value::as_str), Some("http://test.com"));
//!
//! let info = value.get(b"info").unwrap();
//! assert_eq!(info.get(b"length").and_then(Value::as_i64), Some(1024));
//! ```
//!
//! Single values of any kind go through a [`Decoder`]:
//!
//! ```
//! use rbencode::Decoder;
//!
//! let mut decoder = Decoder::new(&b"l4:spami42ee"[..]);
//! let list = decoder.decode_value().unwrap();
//! assert_eq!(list.as_list().map(|l| l.len()), Some(2));
//! ```
//!
//! ## Encoding
//!
//! Dictionary keys are always written in ascending byte order, whatever order
//! they were inserted in.
//!
//! ```
//! use rbencode::{decode, encode, Dict, Value};
//! use bytes::Bytes;
//!
//! let mut info = Dict::new();
//! info.insert(Bytes::from_static(b"name"), Value::string("example.txt"));
//! info.insert(Bytes::from_static(b"length"), Value::from(1024i64));
//!
//! let mut torrent = Dict::new();
//! torrent.insert(Bytes::from_static(b"info"), Value::Dict(info));
//!
//! let encoded = encode(&Value::Dict(torrent)).unwrap();
//! assert_eq!(encoded, b"d4:infod6:lengthi1024e4:name11:example.txtee");
//! assert_eq!(encode(&decode(&encoded).unwrap()).unwrap(), encoded);
//! ```
//!
//! # Error Handling
//!
//! Every decode error aborts the whole call; there is no partial result.
//! Errors carry the number of bytes consumed when they were detected:
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended inside a value
//! - [`BencodeError::InvalidTypeTag`] - A value started with an unknown byte
//! - [`BencodeError::LeadingZero`] / [`BencodeError::NegativeZero`] - Non-canonical numbers
//! - [`BencodeError::IntegerOverflow`] - Integer outside the 64-bit range
//! - [`BencodeError::NegativeLength`] / [`BencodeError::LengthOverflow`] - Bad string length
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

pub mod constants;
mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, decode_from, decode_strict, Decoder};
pub use encode::{encode, encode_to};
pub use error::BencodeError;
pub use value::{Dict, Integer, Value};
