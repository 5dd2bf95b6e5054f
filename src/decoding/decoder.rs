use std::{
    io::{self, Read},
    str,
};

use num_bigint::{BigInt, BigUint, Sign};
use tracing::{debug, trace};

use crate::{
    decoding::Error,
    value::{Dict, Key, Value},
};

/// Number of bytes the lookahead window grows by whenever the buffered bytes
/// are not enough to resolve the current token.
pub const DEFAULT_READ_SIZE: usize = 8;

/// Decode a single value from `source`, failing if any bytes follow it.
pub fn decode<R: Read>(source: R) -> Result<Value, Error> {
    Decoder::new(source).decode()
}

/// Decode a single value from an in-memory buffer, failing if any bytes follow it.
pub fn decode_all_bytes(bytes: &[u8]) -> Result<Value, Error> {
    decode(bytes)
}

/// A streaming bencodex decoder
///
/// The decoder owns the source and a lookahead window of bytes that have been
/// read from the source but not consumed yet. Bytes are pulled in
/// [`read_size`](Decoder::with_read_size) increments only when the window
/// cannot resolve the current token, and whatever is left over after a value
/// stays in the window for the next one.
#[derive(Debug)]
pub struct Decoder<R> {
    source: R,
    window: Vec<u8>,
    /// Start of the unconsumed part of `window`
    cursor: usize,
    /// Offset into the input of `window[cursor]`
    offset: u64,
    read_size: usize,
    max_depth: Option<usize>,
}

impl<R: Read> Decoder<R> {
    /// Create a new decoder reading from `source`
    pub fn new(source: R) -> Self {
        Decoder {
            source,
            window: Vec::new(),
            cursor: 0,
            offset: 0,
            read_size: DEFAULT_READ_SIZE,
            max_depth: None,
        }
    }

    /// Limit how deeply lists and dicts may be nested. A top-level list has depth 1.
    ///
    /// Decoding is recursive, so an unlimited decoder can be driven into a stack overflow
    /// by hostile input.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set the number of bytes requested from the source each time the lookahead
    /// window runs short. Zero is treated as one.
    #[must_use]
    pub fn with_read_size(mut self, read_size: usize) -> Self {
        self.read_size = read_size.max(1);
        self
    }

    /// Seed the lookahead window with bytes that logically precede the source.
    #[must_use]
    pub fn with_buffered(mut self, prefix: &[u8]) -> Self {
        self.window.extend_from_slice(prefix);
        self
    }

    /// The offset into the input of the next unconsumed byte
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Give back the source along with any bytes that were read ahead but not consumed.
    pub fn into_inner(mut self) -> (R, Vec<u8>) {
        self.window.drain(..self.cursor);
        (self.source, self.window)
    }

    /// Decode exactly one value and check that the input ends right after it.
    pub fn decode(mut self) -> Result<Value, Error> {
        let value = match self.next_value()? {
            Some(value) => value,
            None => return Err(Error::truncated(self.offset, "a value")),
        };

        if self.pending().is_empty() {
            self.fill(1)?;
        }
        if let Some(&byte) = self.pending().first() {
            debug!(offset = self.offset, byte, "rejecting trailing data");
            return Err(Error::TrailingData {
                offset: self.offset,
                byte,
            });
        }

        Ok(value)
    }

    /// Read the next value from the stream
    ///
    /// Returns `Ok(None)` if the source is exhausted before the first byte of a value.
    /// Bytes following the value are left for the next call.
    pub fn next_value(&mut self) -> Result<Option<Value>, Error> {
        if self.peek()?.is_none() {
            return Ok(None);
        }
        self.read_value(0).map(Some)
    }
}

// Window management

impl<R: Read> Decoder<R> {
    /// Pull up to `count` bytes from the source into the window. Returns how
    /// many were read; fewer than `count` means the source is exhausted.
    /// Consumed bytes are dropped from the front of the window here and
    /// nowhere else.
    fn fill(&mut self, count: usize) -> Result<usize, Error> {
        self.window.drain(..self.cursor);
        self.cursor = 0;
        let read = read_up_to(&mut self.source, &mut self.window, count)?;
        trace!(
            requested = count,
            read,
            buffered = self.window.len(),
            "refilled lookahead window"
        );
        Ok(read)
    }

    /// Bytes that were read ahead but not consumed yet
    fn pending(&self) -> &[u8] {
        &self.window[self.cursor..]
    }

    fn peek(&mut self) -> Result<Option<u8>, Error> {
        if self.pending().is_empty() {
            self.fill(self.read_size)?;
        }
        Ok(self.pending().first().copied())
    }

    fn consume(&mut self, count: usize) {
        self.cursor += count;
        self.offset += count as u64;
    }

    /// Consume the next byte, which `peek` has already seen.
    fn advance(&mut self) {
        self.consume(1);
    }

    /// Scan ahead for `terminator`, growing the window until it shows up. Every
    /// byte before it must be a decimal digit. The digits and the terminator are
    /// consumed and the digits returned.
    fn read_digits(&mut self, terminator: u8) -> Result<Vec<u8>, Error> {
        let mut scanned = 0;
        let end = loop {
            if let Some(position) = self.pending()[scanned..]
                .iter()
                .position(|&byte| byte == terminator)
            {
                break scanned + position;
            }
            scanned = self.pending().len();
            if self.fill(self.read_size)? == 0 {
                return Err(Error::truncated(
                    self.offset + scanned as u64,
                    format!("a terminating {}", super::error::printable(&terminator)),
                ));
            }
        };

        let digits = &self.pending()[..end];
        if let Some(position) = digits.iter().position(|byte| !byte.is_ascii_digit()) {
            return Err(Error::unexpected_byte(
                self.offset + position as u64,
                digits[position],
                "a decimal digit",
            ));
        }
        if end == 0 {
            return Err(Error::unexpected_byte(
                self.offset,
                terminator,
                "a decimal digit",
            ));
        }

        let digits = digits.to_vec();
        self.consume(end + 1);
        Ok(digits)
    }

    /// Take exactly `len` bytes, first from the window and then straight from the source.
    fn read_exact_field(&mut self, len: usize) -> Result<Vec<u8>, Error> {
        if self.pending().len() >= len {
            let content = self.pending()[..len].to_vec();
            self.consume(len);
            return Ok(content);
        }

        let start = self.offset;
        let mut content = std::mem::take(&mut self.window);
        content.drain(..self.cursor);
        self.cursor = 0;
        let missing = len - content.len();
        let read = read_up_to(&mut self.source, &mut content, missing)?;
        self.offset += content.len() as u64;

        if read < missing {
            return Err(Error::truncated(
                self.offset,
                format!("{len} bytes of content starting at offset {start}"),
            ));
        }

        Ok(content)
    }
}

// Grammar

impl<R: Read> Decoder<R> {
    fn read_value(&mut self, depth: usize) -> Result<Value, Error> {
        let offset = self.offset;
        let tag = match self.peek()? {
            Some(tag) => tag,
            None => return Err(Error::truncated(offset, "a value")),
        };

        match tag {
            b'n' => {
                self.advance();
                Ok(Value::Null)
            },
            b't' => {
                self.advance();
                Ok(Value::Bool(true))
            },
            b'f' => {
                self.advance();
                Ok(Value::Bool(false))
            },
            b'i' => {
                self.advance();
                self.read_integer().map(Value::Integer)
            },
            b'u' => {
                self.advance();
                self.read_text().map(Value::Text)
            },
            b'0'..=b'9' => self.read_bytes().map(Value::Bytes),
            b'l' => {
                self.enter(depth)?;
                self.advance();
                self.read_list(depth + 1).map(Value::List)
            },
            b'd' => {
                self.enter(depth)?;
                self.advance();
                self.read_dict(depth + 1).map(Value::Dict)
            },
            other => Err(Error::unexpected_byte(offset, other, "a tag byte")),
        }
    }

    fn enter(&self, depth: usize) -> Result<(), Error> {
        match self.max_depth {
            Some(max_depth) if depth >= max_depth => {
                debug!(offset = self.offset, max_depth, "nesting too deep");
                Err(Error::NestingTooDeep {
                    offset: self.offset,
                    max_depth,
                })
            },
            _ => Ok(()),
        }
    }

    fn read_integer(&mut self) -> Result<BigInt, Error> {
        let sign = match self.peek()? {
            Some(b'-') => {
                self.advance();
                Sign::Minus
            },
            _ => Sign::Plus,
        };

        let start = self.offset;
        let digits = self.read_digits(b'e')?;

        if digits.len() > 1 && digits[0] == b'0' {
            return Err(Error::unexpected_byte(start + 1, digits[1], "'e'"));
        }
        if sign == Sign::Minus && digits == b"0" {
            return Err(Error::unexpected_byte(start, b'0', "a non-zero digit"));
        }

        let magnitude = BigUint::parse_bytes(&digits, 10)
            .ok_or_else(|| Error::unexpected_byte(start, digits[0], "a decimal digit"))?;
        Ok(BigInt::from_biguint(sign, magnitude))
    }

    fn read_length(&mut self) -> Result<usize, Error> {
        let start = self.offset;
        let digits = self.read_digits(b':')?;
        str::from_utf8(&digits)
            .ok()
            .and_then(|digits| digits.parse::<usize>().ok())
            .ok_or(Error::LengthTooLarge { offset: start })
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, Error> {
        let len = self.read_length()?;
        self.read_exact_field(len)
    }

    fn read_text(&mut self) -> Result<String, Error> {
        let len = self.read_length()?;
        let start = self.offset;
        let content = self.read_exact_field(len)?;
        String::from_utf8(content).map_err(|error| Error::InvalidUtf8 {
            offset: start + error.utf8_error().valid_up_to() as u64,
            source: error.utf8_error(),
        })
    }

    fn read_list(&mut self, depth: usize) -> Result<Vec<Value>, Error> {
        let mut list = Vec::new();
        loop {
            match self.peek()? {
                Some(b'e') => {
                    self.advance();
                    return Ok(list);
                },
                Some(_) => list.push(self.read_value(depth)?),
                None => return Err(Error::truncated(self.offset, "a list item or 'e'")),
            }
        }
    }

    fn read_dict(&mut self, depth: usize) -> Result<Dict, Error> {
        let mut dict = Dict::new();
        loop {
            let key = match self.peek()? {
                Some(b'e') => {
                    self.advance();
                    return Ok(dict);
                },
                Some(b'u') => {
                    self.advance();
                    Key::Text(self.read_text()?)
                },
                Some(b'0'..=b'9') => Key::Bytes(self.read_bytes()?),
                Some(byte) => {
                    return Err(Error::InvalidKeyType {
                        offset: self.offset,
                        byte,
                    });
                },
                None => {
                    return Err(Error::truncated(
                        self.offset,
                        "a dictionary key or 'e'",
                    ));
                },
            };

            let value = self.read_value(depth)?;
            // A repeated key keeps its first position but takes the later value.
            dict.insert(key, value);
        }
    }
}

/// Read from `source` until `count` bytes were appended to `buf` or the source is exhausted.
fn read_up_to<R: Read>(source: &mut R, buf: &mut Vec<u8>, count: usize) -> io::Result<usize> {
    source.by_ref().take(count as u64).read_to_end(buf)
}
