use thiserror::Error;

use crate::algorithm::{HashFamily, HashVariant};

/// Error types for this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The requested family has no implementation for the requested variant.
    #[error("{family} has no {variant} implementation")]
    UnsupportedCombination {
        /// Requested hash family.
        family: HashFamily,
        /// Requested implementation variant.
        variant: HashVariant,
    },
    /// The text holds an unpaired UTF-16 surrogate and the strict encoding policy is in effect.
    #[error("unpaired surrogate {unit:#06x} at code unit {index}")]
    Encoding {
        /// Position of the offending code unit.
        index: usize,
        /// The offending code unit.
        unit: u16,
    },
    /// A family name did not parse.
    #[error("unknown hash family: {0:?}")]
    UnknownFamily(String),
    /// A variant name did not parse.
    #[error("unknown hash variant: {0:?}")]
    UnknownVariant(String),
    /// A combined algorithm name (e.g. `SHA256Cng`) did not parse.
    #[error("unknown hash algorithm name: {0:?}")]
    UnknownAlgorithm(String),
}

/// Result type for hashing operations.
pub type Result<T> = std::result::Result<T, HashError>;
