use std::fmt;

use serde::Serialize;

/// HexDigest is a digest rendered as lowercase hex, two zero-padded characters per byte,
/// in the byte order the hash function produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HexDigest(String);

impl HexDigest {
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        HexDigest(hex::encode(bytes))
    }

    /// as_str borrows the hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// len returns the number of hex characters, twice the digest size.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// is_empty is never true for a digest produced by this crate.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// into_string unwraps the hex text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// eq_ignore_case compares against hex text of either case,
    /// e.g. upper-case checksums published elsewhere.
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<HexDigest> for String {
    fn from(d: HexDigest) -> String {
        d.0
    }
}

impl PartialEq<str> for HexDigest {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HexDigest {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn pads_small_bytes() {
        // 0x0f must render as "0f", never "f"
        let d = HexDigest::from_bytes(&[0x00, 0x0f, 0x10, 0xab, 0xff]);
        assert_eq!(d, "000f10abff");
        assert_eq!(d.len(), 10);
    }

    #[test]
    fn lowercase_only() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        let d = HexDigest::from_bytes(&bytes);
        assert_eq!(d.len(), 512);
        assert!(d
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn byte_order_is_preserved() {
        let d = HexDigest::from_bytes(&[0x12, 0x34]);
        assert_eq!(d.as_str(), "1234");
        assert_eq!(d.to_string(), "1234");
        assert_eq!(String::from(d), "1234");
    }

    #[test]
    fn compare_ignoring_case() {
        let d = HexDigest::from_bytes(&[0xde, 0xad, 0xbe, 0xef]);
        assert!(d.eq_ignore_case("DEADBEEF"));
        assert!(d.eq_ignore_case("deadbeef"));
        assert!(!d.eq_ignore_case("deadbeee"));
        assert_ne!(d, "DEADBEEF");
    }
}
