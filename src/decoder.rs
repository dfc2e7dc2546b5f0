// ABOUTME: Recursive-descent Bencode decoder over a borrowed byte slice.
// ABOUTME: Each decode consumes exactly the bytes of one value so callers can resume.

use linked_hash_map::LinkedHashMap;

use crate::error::{Error, Result};
use crate::types::{limits, tag};
use crate::value::Value;

/// How to handle duplicate keys in dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKeyMode {
    /// Keep the last value, overwrite earlier values (conventional Bencode
    /// behavior, default).
    KeepLast,
    /// Keep the first value, ignore subsequent duplicates.
    KeepFirst,
    /// Raise an error on duplicate keys.
    Error,
}

impl Default for DuplicateKeyMode {
    fn default() -> Self {
        Self::KeepLast
    }
}

/// Configuration options for the decoder.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Allow trailing bytes after the document (default: false)
    pub allow_trailing_bytes: bool,
    /// How to handle duplicate dictionary keys (default: KeepLast)
    pub duplicate_key_mode: DuplicateKeyMode,
    /// Maximum container nesting depth
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            allow_trailing_bytes: false,
            duplicate_key_mode: DuplicateKeyMode::default(),
            max_depth: limits::MAX_DEPTH,
        }
    }
}

/// A Bencode decoder that reads from a byte slice.
///
/// The decoder never copies or mutates the input; it only advances a cursor.
/// Every successful decode consumes exactly the bytes encoding that value
/// (tag, body, and terminator), so [`position`] always points at the first
/// byte of the next value and concatenated values can be decoded in sequence
/// without external framing.
///
/// After an error the cursor reflects the bytes consumed up to the failure.
/// That is useful for diagnostics but not for resuming: discard the decoder.
///
/// [`position`]: Decoder::position
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    depth: usize,
    config: DecoderConfig,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder for the given data.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, DecoderConfig::default())
    }

    /// Create a new decoder with custom configuration.
    #[must_use]
    pub fn with_config(data: &'a [u8], config: DecoderConfig) -> Self {
        Self {
            data,
            pos: 0,
            depth: 0,
            config,
        }
    }

    /// Get the number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the remaining bytes.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Check if we've reached the end of input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Get the decoder configuration.
    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Peek at the tag byte of the next value without consuming it.
    pub fn peek_tag(&self) -> Result<u8> {
        if self.pos >= self.data.len() {
            return Err(Error::Truncated);
        }
        Ok(self.data[self.pos])
    }

    /// Consume the expected tag byte, or fail without consuming anything.
    fn expect_tag(&mut self, expected: u8) -> Result<()> {
        let byte = self.peek_tag()?;
        if byte != expected {
            return Err(Error::UnrecognizedTag(byte));
        }
        self.pos += 1;
        Ok(())
    }

    /// Decode the next value, dispatching on its tag byte.
    ///
    /// `i` routes to the integer decoder, `l` to the list decoder, `d` to the
    /// dictionary decoder, and an ASCII digit to the byte-string decoder. Any
    /// other leading byte fails with [`Error::UnrecognizedTag`].
    pub fn decode_value(&mut self) -> Result<Value> {
        match self.peek_tag()? {
            tag::INTEGER => self.decode_integer().map(Value::Integer),
            tag::LIST => self.decode_list().map(Value::List),
            tag::DICTIONARY => self.decode_dictionary().map(Value::Dictionary),
            byte if tag::is_length_prefix(byte) => self
                .decode_byte_string()
                .map(|bytes| Value::ByteString(bytes.to_vec())),
            byte => Err(Error::UnrecognizedTag(byte)),
        }
    }

    /// Decode an integer: `i<digits>e`.
    ///
    /// Consumes the digit span plus two bytes (tag and terminator). The span
    /// must parse as a base-10 `i64` with an optional leading minus sign; a
    /// leading `+` is rejected. Leading zeros and `-0` are accepted.
    pub fn decode_integer(&mut self) -> Result<i64> {
        self.expect_tag(tag::INTEGER)?;

        let rest = &self.data[self.pos..];
        let Some(span) = memchr::memchr(tag::END, rest) else {
            return Err(Error::MalformedInteger);
        };
        if span == 0 {
            return Err(Error::EmptyInteger);
        }

        let text = std::str::from_utf8(&rest[..span]).map_err(|_| Error::NotAnInteger)?;
        if text.starts_with('+') {
            return Err(Error::NotAnInteger);
        }
        let n = text.parse::<i64>().map_err(|_| Error::NotAnInteger)?;

        self.pos += span + 1;
        Ok(n)
    }

    /// Parse a byte string's length prefix without advancing the cursor.
    ///
    /// Returns the parsed length and the prefix width (digits plus the `:`
    /// delimiter). A missing delimiter is tolerated here; the digit scan
    /// stops at the end of the buffer and the payload bounds checks in
    /// [`decode_byte_string`] reject the value.
    ///
    /// [`decode_byte_string`]: Decoder::decode_byte_string
    fn parse_length_prefix(&self) -> Result<(usize, usize)> {
        let rest = &self.data[self.pos..];
        let digits = match memchr::memchr(tag::LENGTH_SEPARATOR, rest) {
            Some(idx) => &rest[..idx],
            None => rest,
        };
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(Error::InvalidLengthPrefix);
        }
        let text = std::str::from_utf8(digits).map_err(|_| Error::InvalidLengthPrefix)?;
        let length = text.parse::<usize>().map_err(|_| Error::InvalidLengthPrefix)?;
        Ok((length, digits.len() + 1))
    }

    /// Decode a byte string: `<length>:<bytes>`.
    ///
    /// The payload is returned verbatim as a sub-slice of the input;
    /// arbitrary byte values are preserved. Consumes prefix plus payload.
    ///
    /// The two overrun failures are distinct on purpose: a length exceeding
    /// the whole remaining buffer fails with [`Error::EmptyString`], while a
    /// length that fits the buffer but not the space after the prefix fails
    /// with [`Error::InvalidStringLength`].
    pub fn decode_byte_string(&mut self) -> Result<&'a [u8]> {
        let (length, prefix) = self.parse_length_prefix()?;

        let remaining = self.data.len() - self.pos;
        if length > remaining {
            return Err(Error::EmptyString);
        }
        if prefix + length > remaining {
            return Err(Error::InvalidStringLength);
        }

        let start = self.pos + prefix;
        let payload = &self.data[start..start + length];
        self.pos += prefix + length;
        Ok(payload)
    }

    /// Decode a list: `l<elements>e`.
    ///
    /// Elements are dispatched by tag, so nested lists and dictionaries are
    /// decoded recursively. An element failure propagates immediately; the
    /// cursor then reflects the bytes consumed before the failure.
    pub fn decode_list(&mut self) -> Result<Vec<Value>> {
        self.begin_list()?;
        let mut items = Vec::new();
        while !self.end_of_list()? {
            items.push(self.decode_value()?);
        }
        Ok(items)
    }

    /// Decode a dictionary: `d<key><value>...e`. Keys are always byte strings.
    ///
    /// Values are dispatched by tag like list elements. Duplicate keys are
    /// resolved per [`DuplicateKeyMode`]; with the default last-write-wins the
    /// entry keeps the parse position of its first occurrence.
    pub fn decode_dictionary(&mut self) -> Result<LinkedHashMap<Vec<u8>, Value>> {
        self.begin_dictionary()?;
        let mut entries = LinkedHashMap::new();
        while !self.end_of_dictionary()? {
            let key = self.decode_byte_string()?.to_vec();
            let value = self.decode_value()?;
            if entries.contains_key(&key) {
                match self.config.duplicate_key_mode {
                    DuplicateKeyMode::KeepLast => {}
                    DuplicateKeyMode::KeepFirst => continue,
                    DuplicateKeyMode::Error => return Err(Error::DuplicateKey),
                }
            }
            entries.insert(key, value);
        }
        Ok(entries)
    }

    /// Consume a list tag and check limits.
    pub(crate) fn begin_list(&mut self) -> Result<()> {
        self.expect_tag(tag::LIST)?;
        if self.depth >= self.config.max_depth {
            return Err(Error::MaxDepthExceeded);
        }
        self.depth += 1;
        // A list tag with nothing after it has no reachable terminator.
        if self.is_empty() {
            return Err(Error::EmptyList);
        }
        Ok(())
    }

    /// Check for the list terminator, consuming it when present.
    pub(crate) fn end_of_list(&mut self) -> Result<bool> {
        if self.is_empty() {
            return Err(Error::MalformedList);
        }
        if self.data[self.pos] == tag::END {
            self.pos += 1;
            self.depth -= 1;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consume a dictionary tag and check limits.
    pub(crate) fn begin_dictionary(&mut self) -> Result<()> {
        self.expect_tag(tag::DICTIONARY)?;
        if self.depth >= self.config.max_depth {
            return Err(Error::MaxDepthExceeded);
        }
        self.depth += 1;
        if self.is_empty() {
            return Err(Error::MalformedDictionary);
        }
        Ok(())
    }

    /// Check for the dictionary terminator, consuming it when present.
    pub(crate) fn end_of_dictionary(&mut self) -> Result<bool> {
        if self.is_empty() {
            return Err(Error::MalformedDictionary);
        }
        if self.data[self.pos] == tag::END {
            self.pos += 1;
            self.depth -= 1;
            return Ok(true);
        }
        Ok(false)
    }

    /// Finish decoding and check for trailing bytes.
    pub fn finish(&self) -> Result<()> {
        if !self.config.allow_trailing_bytes && self.pos < self.data.len() {
            return Err(Error::TrailingBytes);
        }
        Ok(())
    }
}
