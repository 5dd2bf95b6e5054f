use std::{borrow::Cow, io::Write, slice, vec};

use crate::{
    encoding::Error,
    value::{Dict, Key, Value},
};

/// A piece of encoded output. Tags and length prefixes are small owned or static
/// chunks; string contents are borrowed from the value.
pub type Chunk<'a> = Cow<'a, [u8]>;

/// Lazily encode `value` as a sequence of byte chunks.
pub fn encode(value: &Value) -> Encoder<'_> {
    Encoder::new(value)
}

/// Encode `value` into `sink`, chunk by chunk.
pub fn encode_to<W: Write>(value: &Value, mut sink: W) -> Result<(), Error> {
    for chunk in encode(value) {
        sink.write_all(&chunk)?;
    }
    Ok(())
}

/// Encode `value` into a single byte vector.
pub fn encode_to_bytes(value: &Value) -> Vec<u8> {
    let mut output = Vec::new();
    for chunk in encode(value) {
        output.extend_from_slice(&chunk);
    }
    output
}

/// The canonical encoder. Walks a value depth-first with an explicit stack and
/// yields its encoding one chunk at a time.
///
/// Dropping the encoder part way through simply stops the walk.
#[derive(Debug)]
pub struct Encoder<'a> {
    stack: Vec<Frame<'a>>,
    /// Content chunk that follows the length prefix just yielded
    queued: Option<Chunk<'a>>,
}

#[derive(Debug)]
enum Frame<'a> {
    /// A value that has not been started yet
    Pending(&'a Value),
    List(slice::Iter<'a, Value>),
    Dict {
        entries: vec::IntoIter<(&'a Key, &'a Value)>,
        /// Set between a key and its value
        value: Option<&'a Value>,
    },
}

impl<'a> Encoder<'a> {
    /// Create an encoder for `value`
    pub fn new(value: &'a Value) -> Self {
        Encoder {
            stack: vec![Frame::Pending(value)],
            queued: None,
        }
    }

    /// Emit the first chunk of `value`, pushing a frame for containers and
    /// queueing the content of strings.
    fn begin(&mut self, value: &'a Value) -> Chunk<'a> {
        match value {
            Value::Null => Cow::Borrowed(&b"n"[..]),
            Value::Bool(true) => Cow::Borrowed(&b"t"[..]),
            Value::Bool(false) => Cow::Borrowed(&b"f"[..]),
            Value::Integer(int) => Cow::Owned(format!("i{}e", int).into_bytes()),
            Value::Bytes(bytes) => length_prefixed(b"", bytes, &mut self.queued),
            Value::Text(text) => length_prefixed(b"u", text.as_bytes(), &mut self.queued),
            Value::List(items) => {
                self.stack.push(Frame::List(items.iter()));
                Cow::Borrowed(&b"l"[..])
            },
            Value::Dict(dict) => {
                self.stack.push(Frame::Dict {
                    entries: canonical_entries(dict).into_iter(),
                    value: None,
                });
                Cow::Borrowed(&b"d"[..])
            },
        }
    }
}

impl<'a> Iterator for Encoder<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        if let Some(chunk) = self.queued.take() {
            return Some(chunk);
        }

        let value = match self.stack.last_mut()? {
            Frame::Pending(value) => {
                let value = *value;
                self.stack.pop();
                value
            },
            Frame::List(items) => match items.next() {
                Some(item) => item,
                None => {
                    self.stack.pop();
                    return Some(Cow::Borrowed(&b"e"[..]));
                },
            },
            Frame::Dict { entries, value: pending } => match pending.take() {
                Some(value) => value,
                None => match entries.next() {
                    Some((key, value)) => {
                        *pending = Some(value);
                        return Some(encode_key(key, &mut self.queued));
                    },
                    None => {
                        self.stack.pop();
                        return Some(Cow::Borrowed(&b"e"[..]));
                    },
                },
            },
        };

        Some(self.begin(value))
    }
}

/// Order the entries of a dictionary by `(is_text, raw key bytes)`.
fn canonical_entries(dict: &Dict) -> Vec<(&Key, &Value)> {
    let mut entries: Vec<_> = dict.iter().collect();
    entries.sort_unstable_by(|(a, _), (b, _)| a.sort_key().cmp(&b.sort_key()));
    entries
}

fn encode_key<'a>(key: &'a Key, queued: &mut Option<Chunk<'a>>) -> Chunk<'a> {
    match key {
        Key::Bytes(bytes) => length_prefixed(b"", bytes, queued),
        Key::Text(text) => length_prefixed(b"u", text.as_bytes(), queued),
    }
}

/// Returns `<tag><len>:` and queues `content` to follow it.
fn length_prefixed<'a>(
    tag: &[u8],
    content: &'a [u8],
    queued: &mut Option<Chunk<'a>>,
) -> Chunk<'a> {
    let mut prefix = tag.to_vec();
    prefix.extend_from_slice(content.len().to_string().as_bytes());
    prefix.push(b':');
    if !content.is_empty() {
        *queued = Some(Cow::Borrowed(content));
    }
    Cow::Owned(prefix)
}
