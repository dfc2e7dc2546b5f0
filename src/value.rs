// ABOUTME: Dynamic value type for decoded Bencode documents.
// ABOUTME: Dictionaries preserve parse order via LinkedHashMap.

use linked_hash_map::LinkedHashMap;
use std::fmt;

/// A decoded Bencode value.
///
/// Bencode has four data types: signed 64-bit integers, opaque byte strings,
/// ordered lists, and dictionaries keyed by byte strings. A `Value` owns all
/// of its nested content; the tree is acyclic by construction.
///
/// Dictionaries use [`LinkedHashMap`] so the parse order of keys survives for
/// re-emission, while lookup stays order-insensitive.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// An opaque byte sequence (not necessarily valid UTF-8).
    ByteString(Vec<u8>),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary from byte-string keys to values, in parse order.
    Dictionary(LinkedHashMap<Vec<u8>, Value>),
}

impl Value {
    /// Returns true if this value is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns true if this value is a byte string.
    #[must_use]
    pub fn is_byte_string(&self) -> bool {
        matches!(self, Value::ByteString(_))
    }

    /// Returns true if this value is a list.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns true if this value is a dictionary.
    #[must_use]
    pub fn is_dictionary(&self) -> bool {
        matches!(self, Value::Dictionary(_))
    }

    /// If this is an integer, returns the value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// If this is a byte string, returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::ByteString(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// If this is a byte string holding valid UTF-8, returns it as text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::ByteString(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    /// If this is a list, returns a reference to it.
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// If this is a list, returns a mutable reference to it.
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// If this is a dictionary, returns a reference to it.
    #[must_use]
    pub fn as_dictionary(&self) -> Option<&LinkedHashMap<Vec<u8>, Value>> {
        match self {
            Value::Dictionary(entries) => Some(entries),
            _ => None,
        }
    }

    /// If this is a dictionary, returns a mutable reference to it.
    pub fn as_dictionary_mut(&mut self) -> Option<&mut LinkedHashMap<Vec<u8>, Value>> {
        match self {
            Value::Dictionary(entries) => Some(entries),
            _ => None,
        }
    }

    /// Index into a list. Returns None if not a list or index out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Index into a dictionary by key. Returns None if not a dictionary or
    /// the key is absent.
    #[must_use]
    pub fn get_key(&self, key: &[u8]) -> Option<&Value> {
        self.as_dictionary().and_then(|entries| entries.get(key))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "Integer({n})"),
            Value::ByteString(bytes) => write!(f, "ByteString(b\"{}\")", bytes.escape_ascii()),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Dictionary(entries) => {
                write!(f, "Dictionary({{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "b\"{}\": {value:?}", key.escape_ascii())?;
                }
                write!(f, "}})")
            }
        }
    }
}

// Human-readable output; byte strings render with ASCII escapes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::ByteString(bytes) => write!(f, "\"{}\"", bytes.escape_ascii()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, value) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            Value::Dictionary(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", key.escape_ascii(), value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// Convenient From implementations
impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::ByteString(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::ByteString(s.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::ByteString(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::ByteString(bytes)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<LinkedHashMap<Vec<u8>, Value>> for Value {
    fn from(entries: LinkedHashMap<Vec<u8>, Value>) -> Self {
        Value::Dictionary(entries)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

/// Macro for creating Bencode values easily.
///
/// String keys and values become byte strings; nested brackets and braces
/// become lists and dictionaries.
///
/// # Examples
///
/// ```rust
/// use bendec::bencode;
///
/// let value = bencode!({
///     "name": "test",
///     "sizes": [1, 2, 3],
/// });
/// assert_eq!(value.get_key(b"name").and_then(|v| v.as_str()), Some("test"));
/// ```
#[macro_export]
macro_rules! bencode {
    // lists
    ([]) => {
        $crate::Value::List(::std::vec::Vec::new())
    };
    ([ $($tt:tt)+ ]) => {{
        let mut items: ::std::vec::Vec<$crate::Value> = ::std::vec::Vec::new();
        $crate::bencode_internal!(@list items $($tt)+);
        $crate::Value::List(items)
    }};

    // dictionaries (keys are &str literals, stored as byte strings)
    ({}) => {
        $crate::Value::Dictionary($crate::LinkedHashMap::new())
    };
    ({ $($tt:tt)+ }) => {{
        let mut entries: $crate::LinkedHashMap<::std::vec::Vec<u8>, $crate::Value> =
            $crate::LinkedHashMap::new();
        $crate::bencode_internal!(@dict entries $($tt)+);
        $crate::Value::Dictionary(entries)
    }};

    // other expressions (integers, strings, byte vectors, etc.)
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

// Element munching for bencode!. Nested brackets and braces recurse through
// bencode!; everything else is taken as an expression, which keeps
// multi-token values such as negative literals intact.
#[doc(hidden)]
#[macro_export]
macro_rules! bencode_internal {
    (@list $vec:ident) => {};
    (@list $vec:ident [ $($nested:tt)* ] $(, $($rest:tt)*)?) => {
        $vec.push($crate::bencode!([ $($nested)* ]));
        $crate::bencode_internal!(@list $vec $($($rest)*)?);
    };
    (@list $vec:ident { $($nested:tt)* } $(, $($rest:tt)*)?) => {
        $vec.push($crate::bencode!({ $($nested)* }));
        $crate::bencode_internal!(@list $vec $($($rest)*)?);
    };
    (@list $vec:ident $value:expr , $($rest:tt)*) => {
        $vec.push($crate::Value::from($value));
        $crate::bencode_internal!(@list $vec $($rest)*);
    };
    (@list $vec:ident $value:expr) => {
        $vec.push($crate::Value::from($value));
    };

    (@dict $map:ident) => {};
    (@dict $map:ident $key:tt : [ $($nested:tt)* ] $(, $($rest:tt)*)?) => {
        $map.insert($key.as_bytes().to_vec(), $crate::bencode!([ $($nested)* ]));
        $crate::bencode_internal!(@dict $map $($($rest)*)?);
    };
    (@dict $map:ident $key:tt : { $($nested:tt)* } $(, $($rest:tt)*)?) => {
        $map.insert($key.as_bytes().to_vec(), $crate::bencode!({ $($nested)* }));
        $crate::bencode_internal!(@dict $map $($($rest)*)?);
    };
    (@dict $map:ident $key:tt : $value:expr , $($rest:tt)*) => {
        $map.insert($key.as_bytes().to_vec(), $crate::Value::from($value));
        $crate::bencode_internal!(@dict $map $($rest)*);
    };
    (@dict $map:ident $key:tt : $value:expr) => {
        $map.insert($key.as_bytes().to_vec(), $crate::Value::from($value));
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let v = Value::Integer(42);
        assert!(v.is_integer());
        assert_eq!(v.as_integer(), Some(42));
        assert_eq!(v.as_bytes(), None);

        let v = Value::ByteString(b"spam".to_vec());
        assert!(v.is_byte_string());
        assert_eq!(v.as_bytes(), Some(&b"spam"[..]));
        assert_eq!(v.as_str(), Some("spam"));

        let v = Value::ByteString(vec![0xff, 0xfe]);
        assert_eq!(v.as_str(), None);
        assert_eq!(v.as_bytes(), Some(&[0xff, 0xfe][..]));
    }

    #[test]
    fn test_list_indexing() {
        let v = bencode!(["spam", 42]);
        assert!(v.is_list());
        assert_eq!(v.get(0).and_then(Value::as_str), Some("spam"));
        assert_eq!(v.get(1).and_then(Value::as_integer), Some(42));
        assert_eq!(v.get(2), None);
    }

    #[test]
    fn test_dictionary_lookup_and_order() {
        let v = bencode!({
            "cow": "moo",
            "spam": "eggs",
        });
        assert!(v.is_dictionary());
        assert_eq!(v.get_key(b"cow").and_then(Value::as_str), Some("moo"));
        assert_eq!(v.get_key(b"spam").and_then(Value::as_str), Some("eggs"));
        assert_eq!(v.get_key(b"missing"), None);

        let keys: Vec<&[u8]> = v
            .as_dictionary()
            .unwrap()
            .keys()
            .map(Vec::as_slice)
            .collect();
        assert_eq!(keys, vec![&b"cow"[..], &b"spam"[..]]);
    }

    #[test]
    fn test_macro_accepts_multi_token_values() {
        let base = 2;
        let v = bencode!({
            "n": -3,
            "sum": base + 1,
            "list": [-1, 2],
        });
        assert_eq!(v.get_key(b"n").and_then(Value::as_integer), Some(-3));
        assert_eq!(v.get_key(b"sum").and_then(Value::as_integer), Some(3));
        assert_eq!(
            v.get_key(b"list").and_then(Value::as_list),
            Some(&vec![Value::Integer(-1), Value::Integer(2)])
        );
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(7i32), Value::Integer(7));
        assert_eq!(Value::from("ab"), Value::ByteString(b"ab".to_vec()));
        assert_eq!(
            Value::from(vec![1u8, 2, 3]),
            Value::ByteString(vec![1, 2, 3])
        );
        assert_eq!(
            Value::from(vec![Value::Integer(1)]),
            Value::List(vec![Value::Integer(1)])
        );
    }

    #[test]
    fn test_display() {
        let v = bencode!({
            "cow": "moo",
            "n": [1, 2],
        });
        assert_eq!(format!("{v}"), "{\"cow\": \"moo\", \"n\": [1, 2]}");
    }

    #[test]
    fn test_debug_escapes_binary() {
        let v = Value::ByteString(vec![b'a', 0x00]);
        assert_eq!(format!("{v:?}"), "ByteString(b\"a\\x00\")");
    }
}
