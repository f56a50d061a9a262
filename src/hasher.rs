use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::{HashFamily, HashVariant};
use crate::error::{HashError, Result};
use crate::hex_digest::HexDigest;
use crate::{matrix, strategy};

/// Namespace prefix accepted in front of algorithm names, e.g.
/// `System.Security.Cryptography.SHA256Cng`.
pub const NAMESPACE_PREFIX: &str = "System.Security.Cryptography.";

const SEPARATORS: [char; 5] = ['-', '_', ':', '/', ' '];

/// digest hashes the UTF-8 bytes of `text` with `family`, computed by `variant`.
///
/// Unsupported pairs fail with [`HashError::UnsupportedCombination`]; no other
/// implementation is substituted.
pub fn digest(text: &str, family: HashFamily, variant: HashVariant) -> Result<HexDigest> {
    digest_bytes(text.as_bytes(), family, variant)
}

/// digest_default is `digest` with the `Normal` variant.
pub fn digest_default(text: &str, family: HashFamily) -> Result<HexDigest> {
    digest(text, family, HashVariant::default())
}

/// digest_named hashes `text` with an algorithm given by name, see [`HashSelector`].
pub fn digest_named(text: &str, name: &str) -> Result<HexDigest> {
    let selector: HashSelector = name.parse()?;
    digest(text, selector.family, selector.variant)
}

/// digest_utf16 hashes text held as UTF-16 code units.
/// Unpaired surrogates are handled according to `policy`.
pub fn digest_utf16(
    units: &[u16],
    family: HashFamily,
    variant: HashVariant,
    policy: EncodingPolicy,
) -> Result<HexDigest> {
    // configuration errors surface before encoding errors
    let strategy = strategy::resolve(family, variant)?;
    let text = decode_utf16(units, policy)?;
    Ok(HexDigest::from_bytes(&strategy.compute_digest(text.as_bytes())))
}

fn digest_bytes(data: &[u8], family: HashFamily, variant: HashVariant) -> Result<HexDigest> {
    let strategy = strategy::resolve(family, variant)?;
    Ok(HexDigest::from_bytes(&strategy.compute_digest(data)))
}

/// EncodingPolicy decides what happens to unpaired UTF-16 surrogates before hashing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingPolicy {
    /// Each unpaired surrogate becomes U+FFFD (bytes `ef bf bd`).
    #[default]
    Replace,
    /// Unpaired surrogates fail with [`HashError::Encoding`].
    Strict,
}

fn decode_utf16(units: &[u16], policy: EncodingPolicy) -> Result<String> {
    let mut text = String::with_capacity(units.len());
    let mut index = 0;

    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => {
                text.push(c);
                index += c.len_utf16();
            }
            Err(e) => match policy {
                EncodingPolicy::Replace => {
                    text.push(char::REPLACEMENT_CHARACTER);
                    index += 1;
                }
                EncodingPolicy::Strict => {
                    return Err(HashError::Encoding {
                        index,
                        unit: e.unpaired_surrogate(),
                    })
                }
            },
        }
    }
    Ok(text)
}

/// HashSelector names one cell of the family x variant matrix.
///
/// It parses combined names such as `SHA256`, `SHA256Cng`, `sha1-managed` or
/// `System.Security.Cryptography.MD5CryptoServiceProvider`. Parsing does not
/// check the validity matrix; `MD5Managed` parses and fails when hashed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HashSelector {
    /// Hash family.
    pub family: HashFamily,
    /// Implementation variant.
    pub variant: HashVariant,
}

impl HashSelector {
    /// new pairs `family` with `variant`.
    pub fn new(family: HashFamily, variant: HashVariant) -> Self {
        HashSelector { family, variant }
    }

    /// is_supported consults the validity matrix.
    pub fn is_supported(&self) -> bool {
        matrix::is_supported(self.family, self.variant)
    }
}

impl fmt::Display for HashSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family.name(), self.variant.suffix())
    }
}

impl FromStr for HashSelector {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || HashError::UnknownAlgorithm(s.to_string());

        let mut name = s.trim();
        if name.len() >= NAMESPACE_PREFIX.len()
            && name.is_char_boundary(NAMESPACE_PREFIX.len())
            && name[..NAMESPACE_PREFIX.len()].eq_ignore_ascii_case(NAMESPACE_PREFIX)
        {
            name = &name[NAMESPACE_PREFIX.len()..];
        }

        let upper = name.to_ascii_uppercase();
        // longest names first so SHA1 never shadows a longer family
        let mut families = HashFamily::ALL;
        families.sort_by_key(|f| std::cmp::Reverse(f.name().len()));

        let family = families
            .into_iter()
            .find(|f| upper.starts_with(f.name()))
            .ok_or_else(unknown)?;

        let rest = name[family.name().len()..].trim_start_matches(&SEPARATORS[..]);
        let variant = rest.parse::<HashVariant>().map_err(|_| unknown())?;

        Ok(HashSelector { family, variant })
    }
}

/// TextHasher is a reusable hashing configuration.
///
/// It can be built in code or deserialized, e.g. from
/// `{"family": "sha384", "variant": "cng", "encoding": "strict"}`;
/// missing fields take their defaults (SHA-256, `Normal`, `Replace`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextHasher {
    family: HashFamily,
    variant: HashVariant,
    encoding: EncodingPolicy,
}

impl TextHasher {
    /// new returns a hasher for `family` with the `Normal` variant.
    pub fn new(family: HashFamily) -> Self {
        TextHasher {
            family,
            ..Default::default()
        }
    }

    /// from_name builds a hasher from an algorithm name, see [`HashSelector`].
    pub fn from_name(name: &str) -> Result<Self> {
        let selector: HashSelector = name.parse()?;
        Ok(TextHasher::new(selector.family).variant(selector.variant))
    }

    /// variant sets the implementation variant.
    pub fn variant(mut self, variant: HashVariant) -> Self {
        self.variant = variant;
        self
    }

    /// encoding sets the policy for unpaired UTF-16 surrogates.
    pub fn encoding(mut self, encoding: EncodingPolicy) -> Self {
        self.encoding = encoding;
        self
    }

    /// The configured hash family.
    pub fn family(&self) -> HashFamily {
        self.family
    }

    /// The configured variant.
    pub fn selected_variant(&self) -> HashVariant {
        self.variant
    }

    /// The configured encoding policy.
    pub fn encoding_policy(&self) -> EncodingPolicy {
        self.encoding
    }

    /// selector returns the configured matrix cell.
    pub fn selector(&self) -> HashSelector {
        HashSelector::new(self.family, self.variant)
    }

    /// hash digests `text`.
    pub fn hash(&self, text: &str) -> Result<HexDigest> {
        digest(text, self.family, self.variant)
    }

    /// hash_utf16 digests UTF-16 code units under the configured encoding policy.
    pub fn hash_utf16(&self, units: &[u16]) -> Result<HexDigest> {
        digest_utf16(units, self.family, self.variant, self.encoding)
    }
}

/// TextHash generates checksums directly on strings.
///
/// ```
/// use texthash::{HashFamily, HashVariant, TextHash};
///
/// let sum = "abc".generate_hash(HashFamily::Md5).unwrap();
/// assert_eq!(sum, "900150983cd24fb0d6963f7d28e17f72");
///
/// assert!("abc".generate_hash_with(HashFamily::Md5, HashVariant::Managed).is_err());
/// ```
pub trait TextHash {
    /// generate_hash digests with `family` and the `Normal` variant.
    fn generate_hash(&self, family: HashFamily) -> Result<HexDigest>;
    /// generate_hash_with digests with `family`, computed by `variant`.
    fn generate_hash_with(&self, family: HashFamily, variant: HashVariant) -> Result<HexDigest>;
}

impl<T: AsRef<str> + ?Sized> TextHash for T {
    fn generate_hash(&self, family: HashFamily) -> Result<HexDigest> {
        digest_default(self.as_ref(), family)
    }

    fn generate_hash_with(&self, family: HashFamily, variant: HashVariant) -> Result<HexDigest> {
        digest(self.as_ref(), family, variant)
    }
}
