// ABOUTME: Defines the Bencode tag bytes and default resource limits.
// ABOUTME: Tag bytes map directly to the Bencode wire format.

/// Tag bytes for Bencode values.
///
/// Every Bencode value starts with a single tag byte identifying its kind:
/// `i` for integers, `l` for lists, `d` for dictionaries, and an ASCII digit
/// (the start of the length prefix) for byte strings.
pub mod tag {
    /// Opens an integer: `i<digits>e`.
    pub const INTEGER: u8 = b'i';

    /// Opens a list: `l<elements>e`.
    pub const LIST: u8 = b'l';

    /// Opens a dictionary: `d<key><value>...e`.
    pub const DICTIONARY: u8 = b'd';

    /// Closes an integer, list, or dictionary.
    pub const END: u8 = b'e';

    /// Separates a byte string's length prefix from its payload.
    pub const LENGTH_SEPARATOR: u8 = b':';

    /// Returns true if `byte` can start a byte string's length prefix.
    #[must_use]
    pub fn is_length_prefix(byte: u8) -> bool {
        byte.is_ascii_digit()
    }
}

/// Default resource limits for decoding.
pub mod limits {
    /// Maximum container nesting depth.
    ///
    /// Decoding recurses on the call stack once per nesting level, so the
    /// limit has to sit well below stack exhaustion for adversarial input.
    pub const MAX_DEPTH: usize = 64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_bytes() {
        assert_eq!(tag::INTEGER, b'i');
        assert_eq!(tag::LIST, b'l');
        assert_eq!(tag::DICTIONARY, b'd');
        assert_eq!(tag::END, b'e');
        assert_eq!(tag::LENGTH_SEPARATOR, b':');
    }

    #[test]
    fn test_length_prefix_classification() {
        for b in b'0'..=b'9' {
            assert!(tag::is_length_prefix(b));
        }
        assert!(!tag::is_length_prefix(b'i'));
        assert!(!tag::is_length_prefix(b'l'));
        assert!(!tag::is_length_prefix(b'd'));
        assert!(!tag::is_length_prefix(b'e'));
        assert!(!tag::is_length_prefix(b':'));
        assert!(!tag::is_length_prefix(0x00));
    }
}
