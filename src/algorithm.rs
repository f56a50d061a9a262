use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HashError;

/// HashFamily identifies the digest algorithm and, with it, the output length.
/// SHA-256 is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashFamily {
    /// MD5, 16 byte output.
    Md5,
    /// SHA-1, 20 byte output.
    Sha1,
    /// SHA-256, 32 byte output.
    #[default]
    Sha256,
    /// SHA-384, 48 byte output.
    Sha384,
    /// SHA-512, 64 byte output.
    Sha512,
}

impl HashFamily {
    /// Every family, in matrix row order.
    pub const ALL: [HashFamily; 5] = [
        HashFamily::Md5,
        HashFamily::Sha1,
        HashFamily::Sha256,
        HashFamily::Sha384,
        HashFamily::Sha512,
    ];

    /// output_len returns the digest size in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            HashFamily::Md5 => 16,
            HashFamily::Sha1 => 20,
            HashFamily::Sha256 => 32,
            HashFamily::Sha384 => 48,
            HashFamily::Sha512 => 64,
        }
    }

    /// hex_len returns the length of the rendered hex digest.
    pub const fn hex_len(self) -> usize {
        self.output_len() * 2
    }

    /// Canonical upper-case name, as used in combined algorithm names (`SHA256Cng`).
    pub const fn name(self) -> &'static str {
        match self {
            HashFamily::Md5 => "MD5",
            HashFamily::Sha1 => "SHA1",
            HashFamily::Sha256 => "SHA256",
            HashFamily::Sha384 => "SHA384",
            HashFamily::Sha512 => "SHA512",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for HashFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashFamily {
    type Err = HashError;

    /// Accepts `sha256`, `SHA256` and the dashed `SHA-256` spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();

        HashFamily::ALL
            .iter()
            .copied()
            .find(|f| f.name() == normalized)
            .ok_or_else(|| HashError::UnknownFamily(s.to_string()))
    }
}

/// HashVariant selects which implementation computes a family's digest.
/// It never changes the digest bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashVariant {
    /// One-shot hashing through the family's default implementation.
    #[default]
    Normal,
    /// A fresh context per call, finalized into a stack buffer.
    Cng,
    /// A runtime-dispatched, boxed hashing context.
    Managed,
    /// Clones of a pre-initialized context owned by the provider.
    #[serde(alias = "csp")]
    CryptoServiceProvider,
}

impl HashVariant {
    /// Every variant, in matrix column order.
    pub const ALL: [HashVariant; 4] = [
        HashVariant::Normal,
        HashVariant::Cng,
        HashVariant::Managed,
        HashVariant::CryptoServiceProvider,
    ];

    /// Suffix appended to the family name in combined algorithm names.
    /// `Normal` has none.
    pub const fn suffix(self) -> &'static str {
        match self {
            HashVariant::Normal => "",
            HashVariant::Cng => "Cng",
            HashVariant::Managed => "Managed",
            HashVariant::CryptoServiceProvider => "CryptoServiceProvider",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for HashVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashVariant::Normal => f.write_str("Normal"),
            other => f.write_str(other.suffix()),
        }
    }
}

impl FromStr for HashVariant {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" | "" => Ok(HashVariant::Normal),
            "cng" => Ok(HashVariant::Cng),
            "managed" => Ok(HashVariant::Managed),
            "cryptoserviceprovider" | "csp" => Ok(HashVariant::CryptoServiceProvider),
            _ => Err(HashError::UnknownVariant(s.to_string())),
        }
    }
}
