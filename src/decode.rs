use super::constants::{
    DEFAULT_MAX_DEPTH, DICT_START, END, INTEGER_START, LENGTH_SEPARATOR, LIST_START,
    MAX_PREALLOC, MINUS,
};
use super::error::BencodeError;
use super::value::{Dict, Integer, Value};
use bytes::Bytes;
use std::io::{self, BufRead, BufReader, Read};
use tracing::{debug, trace};

/// Decodes a bencode document from a byte slice.
///
/// The root value must be a dictionary. An empty slice decodes to an empty
/// dictionary. Bytes after the root dictionary are ignored; use
/// [`decode_strict`] to reject them.
///
/// # Errors
///
/// Returns an error if the data is not well-formed bencode or the root is not
/// a dictionary. No partial value is returned.
///
/// # Examples
///
/// ```
/// use rbencode::{decode, Value};
///
/// let value = decode(b"d3:foo3:bar3:numi42ee").unwrap();
/// assert_eq!(value.get(b"foo").and_then(Value::as_str), Some("bar"));
/// assert_eq!(value.get(b"num").and_then(Value::as_i64), Some(42));
///
/// assert_eq!(decode(b"").unwrap(), Value::empty_dict());
/// assert!(decode(b"li1ee").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    Decoder::new(data).decode()
}

/// Decodes a bencode document and rejects anything after the root dictionary.
///
/// # Examples
///
/// ```
/// use rbencode::{decode_strict, BencodeError};
///
/// assert!(decode_strict(b"de").is_ok());
/// assert!(matches!(
///     decode_strict(b"dexyz"),
///     Err(BencodeError::TrailingData { offset: 2 })
/// ));
/// ```
pub fn decode_strict(data: &[u8]) -> Result<Value, BencodeError> {
    let mut decoder = Decoder::new(data);
    let value = decoder.decode()?;
    decoder.finish()?;
    Ok(value)
}

/// Decodes a bencode document from any reader.
///
/// The reader is buffered internally. Reading stops right after the root
/// dictionary.
pub fn decode_from<R: Read>(reader: R) -> Result<Value, BencodeError> {
    Decoder::new(BufReader::new(reader)).decode()
}

/// A single-pass bencode decoder over a buffered byte source.
///
/// The decoder looks at most one byte ahead and counts consumed bytes so that
/// errors can report where they happened. Any error leaves the decoder in an
/// unspecified position; discard it along with the partial result.
///
/// # Examples
///
/// ```
/// use rbencode::{Decoder, Integer, Value};
///
/// let mut decoder = Decoder::new(&b"i-5e4:spam"[..]);
/// assert_eq!(decoder.decode_value().unwrap(), Value::Integer(Integer::Signed(-5)));
/// assert_eq!(decoder.decode_value().unwrap(), Value::string("spam"));
/// assert_eq!(decoder.offset(), 10);
/// ```
pub struct Decoder<R> {
    reader: R,
    peeked: Option<u8>,
    offset: u64,
    depth: usize,
    max_depth: usize,
}

impl<R: BufRead> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            offset: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how deeply lists and dictionaries may nest. The root counts as one.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the underlying reader.
    ///
    /// A byte that was peeked but not consumed is lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decodes a document whose root must be a dictionary.
    ///
    /// A source that is empty from the start yields an empty dictionary.
    pub fn decode(&mut self) -> Result<Value, BencodeError> {
        trace!("decoding bencode document");

        let first = match self.read_byte()? {
            Some(b) => b,
            None => {
                trace!("empty input, returning empty dictionary");
                return Ok(Value::empty_dict());
            }
        };

        if first != DICT_START {
            debug!(byte = first, "rejecting non-dictionary root");
            return Err(BencodeError::RootNotDictionary { byte: first });
        }

        let dict = self.decode_dict()?;
        trace!(
            consumed = self.offset,
            entries = dict.len(),
            "decoded bencode document"
        );
        Ok(Value::Dict(dict))
    }

    /// Decodes the next value of any kind.
    pub fn decode_value(&mut self) -> Result<Value, BencodeError> {
        let tag = self.next_byte()?;

        match tag {
            DICT_START => Ok(Value::Dict(self.decode_dict()?)),
            LIST_START => Ok(Value::List(self.decode_list()?)),
            INTEGER_START => Ok(Value::Integer(self.decode_integer()?)),
            // The tag is the first byte of the length, so hand it back.
            b'0'..=b'9' | MINUS => {
                self.unread(tag);
                Ok(Value::Bytes(self.decode_bytes()?))
            }
            byte => Err(BencodeError::InvalidTypeTag {
                byte,
                offset: self.offset,
            }),
        }
    }

    /// Fails with [`BencodeError::TrailingData`] unless the source is exhausted.
    pub fn finish(&mut self) -> Result<(), BencodeError> {
        match self.peek_byte()? {
            None => Ok(()),
            Some(_) => Err(BencodeError::TrailingData {
                offset: self.offset,
            }),
        }
    }

    // Expects the opening `d` to be consumed already.
    fn decode_dict(&mut self) -> Result<Dict, BencodeError> {
        self.enter()?;
        let mut dict = Dict::new();

        loop {
            match self.peek_byte()? {
                None => {
                    return Err(BencodeError::UnexpectedEof {
                        offset: self.offset,
                    })
                }
                Some(END) => {
                    self.read_byte()?;
                    break;
                }
                Some(_) => {
                    let key = self.decode_bytes()?;
                    let value = self.decode_value()?;
                    if dict.insert(key, value).is_some() {
                        debug!(
                            offset = self.offset,
                            "duplicate dictionary key, keeping the last value"
                        );
                    }
                }
            }
        }

        self.depth -= 1;
        Ok(dict)
    }

    // Expects the opening `l` to be consumed already.
    fn decode_list(&mut self) -> Result<Vec<Value>, BencodeError> {
        self.enter()?;
        let mut list = Vec::new();

        loop {
            match self.peek_byte()? {
                None => {
                    return Err(BencodeError::UnexpectedEof {
                        offset: self.offset,
                    })
                }
                Some(END) => {
                    self.read_byte()?;
                    break;
                }
                Some(_) => list.push(self.decode_value()?),
            }
        }

        self.depth -= 1;
        Ok(list)
    }

    // Expects the opening `i` to be consumed already.
    fn decode_integer(&mut self) -> Result<Integer, BencodeError> {
        let digits = self.read_number(END)?;

        if let Ok(i) = digits.parse::<i64>() {
            return Ok(Integer::Signed(i));
        }

        let offset = self.offset;
        digits
            .parse::<u64>()
            .map(Integer::Unsigned)
            .map_err(|_| BencodeError::IntegerOverflow { digits, offset })
    }

    fn decode_bytes(&mut self) -> Result<Bytes, BencodeError> {
        let digits = self.read_number(LENGTH_SEPARATOR)?;
        let offset = self.offset;

        let length: i64 = digits
            .parse()
            .map_err(|_| BencodeError::LengthOverflow { digits, offset })?;
        let length =
            u64::try_from(length).map_err(|_| BencodeError::NegativeLength { length, offset })?;

        self.read_payload(length)
    }

    /// Reads an optionally signed decimal token up to `delim`, which is
    /// consumed but not returned.
    ///
    /// Integers and byte string lengths share these lexical rules: no leading
    /// zeros, no `-0`, digits only after the sign.
    fn read_number(&mut self, delim: u8) -> Result<String, BencodeError> {
        let first = self.next_byte()?;
        if !first.is_ascii_digit() && first != MINUS {
            return Err(BencodeError::InvalidIntegerStart {
                byte: first,
                offset: self.offset,
            });
        }

        let mut token = String::new();
        token.push(char::from(first));

        loop {
            let b = self.next_byte()?;

            if b == delim {
                if token.len() == 1 && first == MINUS {
                    return Err(BencodeError::InvalidCharacter {
                        byte: b,
                        offset: self.offset,
                    });
                }
                break;
            }

            if !b.is_ascii_digit() {
                return Err(BencodeError::InvalidCharacter {
                    byte: b,
                    offset: self.offset,
                });
            }

            if token == "0" {
                return Err(BencodeError::LeadingZero {
                    offset: self.offset,
                });
            }
            if token == "-" && b == b'0' {
                return Err(BencodeError::NegativeZero {
                    offset: self.offset,
                });
            }

            token.push(char::from(b));
        }

        Ok(token)
    }

    fn read_payload(&mut self, length: u64) -> Result<Bytes, BencodeError> {
        debug_assert!(self.peeked.is_none());

        let capacity = length.min(MAX_PREALLOC as u64) as usize;
        let mut buf = Vec::with_capacity(capacity);
        let read = (&mut self.reader).take(length).read_to_end(&mut buf)? as u64;
        self.offset += read;

        if read < length {
            return Err(BencodeError::UnexpectedEof {
                offset: self.offset,
            });
        }

        Ok(Bytes::from(buf))
    }

    fn enter(&mut self) -> Result<(), BencodeError> {
        if self.depth >= self.max_depth {
            return Err(BencodeError::NestingTooDeep {
                offset: self.offset,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn next_byte(&mut self) -> Result<u8, BencodeError> {
        match self.read_byte()? {
            Some(b) => Ok(b),
            None => Err(BencodeError::UnexpectedEof {
                offset: self.offset,
            }),
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>, BencodeError> {
        let byte = match self.peeked.take() {
            Some(b) => Some(b),
            None => self.fill_byte()?,
        };
        if byte.is_some() {
            self.offset += 1;
        }
        Ok(byte)
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, BencodeError> {
        if self.peeked.is_none() {
            self.peeked = self.fill_byte()?;
        }
        Ok(self.peeked)
    }

    fn unread(&mut self, byte: u8) {
        debug_assert!(self.peeked.is_none());
        self.peeked = Some(byte);
        self.offset -= 1;
    }

    fn fill_byte(&mut self) -> Result<Option<u8>, BencodeError> {
        loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let b = buf[0];
                    self.reader.consume(1);
                    return Ok(Some(b));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
