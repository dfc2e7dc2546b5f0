// ABOUTME: Bencode decoder for Rust with serde integration.
// ABOUTME: Provides a dynamic Value tree and an incremental decode-with-offset API.

//! # bendec
//!
//! A Bencode decoder for Rust.
//!
//! Bencode is the compact, self-delimiting encoding used for peer-to-peer
//! metadata exchange: integers as `i<digits>e`, byte strings as
//! `<length>:<bytes>`, lists as `l<elements>e`, and dictionaries as
//! `d<key><value>...e` with byte-string keys.
//!
//! The core contract is incremental: every decode consumes exactly the bytes
//! of one value and reports how many, so concatenated values (as appear in
//! real protocol messages) can be decoded in sequence without external
//! framing. Encoding is out of scope; this crate only decodes.
//!
//! ## Quick Start
//!
//! ```rust
//! use bendec::from_slice;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let person: Person = from_slice(b"d3:agei30e4:name5:Alicee").unwrap();
//! assert_eq!(person, Person { name: "Alice".to_string(), age: 30 });
//! ```
//!
//! ## Working with Dynamic Values
//!
//! ```rust
//! use bendec::{decode_value, Value};
//!
//! let value = decode_value(b"d3:cow3:moo4:spam4:eggse").unwrap();
//! assert_eq!(value.get_key(b"cow").and_then(Value::as_str), Some("moo"));
//! ```
//!
//! ## Decoding Concatenated Values
//!
//! ```rust
//! use bendec::{decode_prefix, Value};
//!
//! let data = b"i59616e7:johndoe";
//! let (first, consumed) = decode_prefix(data).unwrap();
//! assert_eq!(first, Value::Integer(59616));
//! assert_eq!(consumed, 7);
//!
//! let (second, _) = decode_prefix(&data[consumed..]).unwrap();
//! assert_eq!(second, Value::ByteString(b"johndoe".to_vec()));
//! ```
//!
//! ## Semantics
//!
//! - Byte strings are opaque byte sequences; no UTF-8 validation happens on
//!   decode. Text access goes through [`Value::as_str`] or the serde string
//!   paths, which check UTF-8 at that point.
//! - Dictionaries preserve parse order of keys; duplicate keys default to
//!   last-write-wins and are configurable via [`DuplicateKeyMode`].
//! - Integers are permissive beyond basic numeric parsing: leading zeros and
//!   `-0` are accepted; anything outside the `i64` range is rejected.
//!
//! ## Resource Limits
//!
//! Decoding recurses per nesting level, so depth is capped (default 64,
//! configurable through [`DecoderConfig::max_depth`]).

pub mod de;
pub mod decoder;
pub mod error;
pub mod types;
pub mod value;

// Re-export commonly used items at the crate root
pub use de::{from_slice, from_slice_with_config, Deserializer};
pub use decoder::{Decoder, DecoderConfig, DuplicateKeyMode};
pub use error::{Error, Result};
pub use linked_hash_map::LinkedHashMap;
pub use types::{limits, tag};
pub use value::Value;

// The bencode! macro is automatically exported at crate root via #[macro_export]

use serde::Deserialize;

/// Decode a whole Bencode document into a [`Value`].
///
/// Fails with [`Error::TrailingBytes`] if any input remains after the value.
///
/// # Example
///
/// ```rust
/// use bendec::{decode_value, Value};
///
/// let value = decode_value(b"l4:spami42ee").unwrap();
/// assert_eq!(value.get(1).and_then(Value::as_integer), Some(42));
/// ```
pub fn decode_value(data: &[u8]) -> Result<Value> {
    decode_value_with_config(data, DecoderConfig::default())
}

/// Decode a whole Bencode document into a [`Value`] with custom configuration.
pub fn decode_value_with_config(data: &[u8], config: DecoderConfig) -> Result<Value> {
    let mut decoder = Decoder::with_config(data, config);
    let value = decoder.decode_value()?;
    decoder.finish()?;
    Ok(value)
}

/// Decode the first Bencode value in `data`, returning it together with the
/// number of bytes it occupied.
///
/// This is the incremental entry point: the count includes the value's tag
/// and terminator, so `&data[consumed..]` starts at the next value of a
/// concatenated stream. Trailing bytes are never an error here.
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize)> {
    let mut decoder = Decoder::new(data);
    let value = decoder.decode_value()?;
    Ok((value, decoder.position()))
}

// Implement Deserialize for Value so generic callers can decode into the
// dynamic tree through any serde Deserializer.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> serde::de::Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "any valid Bencode value")
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Value, E> {
                Ok(Value::Integer(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<Value, E> {
                i64::try_from(v)
                    .map(Value::Integer)
                    .map_err(|_| E::custom(format!("integer {v} out of i64 range")))
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Value, E> {
                Ok(Value::ByteString(v.as_bytes().to_vec()))
            }

            fn visit_string<E>(self, v: String) -> std::result::Result<Value, E> {
                Ok(Value::ByteString(v.into_bytes()))
            }

            fn visit_bytes<E>(self, v: &[u8]) -> std::result::Result<Value, E> {
                Ok(Value::ByteString(v.to_vec()))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> std::result::Result<Value, E> {
                Ok(Value::ByteString(v))
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Value, A::Error> {
                let mut items = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    items.push(elem);
                }
                Ok(Value::List(items))
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Value, A::Error> {
                use serde::de::Error as _;

                let mut entries = LinkedHashMap::new();
                while let Some((key, value)) = map.next_entry::<Value, Value>()? {
                    let Value::ByteString(key) = key else {
                        return Err(A::Error::custom("dictionary key must be a byte string"));
                    };
                    entries.insert(key, value);
                }
                Ok(Value::Dictionary(entries))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_value_scenarios() {
        assert_eq!(decode_value(b"i59616e").unwrap(), Value::Integer(59616));
        assert_eq!(
            decode_value(b"7:johndoe").unwrap(),
            Value::ByteString(b"johndoe".to_vec())
        );
        assert_eq!(
            decode_value(b"l4:spami42ee").unwrap(),
            bencode!(["spam", 42])
        );
        assert_eq!(
            decode_value(b"d3:cow3:moo4:spam4:eggse").unwrap(),
            bencode!({ "cow": "moo", "spam": "eggs" })
        );
    }

    #[test]
    fn test_decode_value_rejects_trailing_bytes() {
        assert_eq!(decode_value(b"i1e4:spam"), Err(Error::TrailingBytes));

        let config = DecoderConfig {
            allow_trailing_bytes: true,
            ..DecoderConfig::default()
        };
        assert_eq!(
            decode_value_with_config(b"i1e4:spam", config).unwrap(),
            Value::Integer(1)
        );
    }

    #[test]
    fn test_decode_prefix_stream() {
        let data = b"i1e4:spamd1:ai2eele";
        let mut offset = 0;
        let mut values = Vec::new();
        while offset < data.len() {
            let (value, consumed) = decode_prefix(&data[offset..]).unwrap();
            assert!(consumed > 0);
            offset += consumed;
            values.push(value);
        }
        assert_eq!(offset, data.len());
        assert_eq!(
            values,
            vec![
                bencode!(1),
                bencode!("spam"),
                bencode!({ "a": 2 }),
                bencode!([]),
            ]
        );
    }

    #[test]
    fn test_value_deserializes_through_serde() {
        let value: Value = from_slice(b"d1:k4:spam1:ni-3e4:listli1eee").unwrap();
        assert_eq!(
            value,
            bencode!({ "k": "spam", "n": -3, "list": [1] })
        );
    }

    #[test]
    fn test_value_deserialize_preserves_binary_keys_and_payloads() {
        let data = [b'd', b'1', b':', 0xff, b'2', b':', 0x00, 0x01, b'e'];
        let value: Value = from_slice(&data).unwrap();
        assert_eq!(
            value.get_key(&[0xff]),
            Some(&Value::ByteString(vec![0x00, 0x01]))
        );
    }

    #[test]
    fn test_macro_matches_decoder_output() {
        let decoded = decode_value(b"d4:spamli1ei2eee").unwrap();
        let built = bencode!({ "spam": [1, 2] });
        assert_eq!(decoded, built);
    }
}
