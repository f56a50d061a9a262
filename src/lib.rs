#![warn(missing_docs)]
//! Configurable text hashing: pick a hash family and an implementation variant,
//! get back the hex digest of the text's UTF-8 bytes.
//!
//! Families are MD5, SHA-1, SHA-256, SHA-384 and SHA-512. Variants (`Normal`,
//! `Cng`, `Managed`, `CryptoServiceProvider`) select which implementation computes
//! the digest and never change its value. MD5 has no `Managed` implementation and
//! asking for one is an error.
//!
//! Digests are lowercase hex, two characters per byte.
//!
//! # Example
//! ```
//! use texthash::{digest, HashError, HashFamily, HashVariant};
//!
//! fn main() -> Result<(), HashError> {
//!   let sum = digest("abc", HashFamily::Sha256, HashVariant::Cng)?;
//!   println!("Result: {}", sum);
//!   assert_eq!(sum, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
//!
//!   let err = digest("abc", HashFamily::Md5, HashVariant::Managed).unwrap_err();
//!   assert_eq!(err, HashError::UnsupportedCombination {
//!       family: HashFamily::Md5,
//!       variant: HashVariant::Managed,
//!   });
//!
//!   Ok(())
//! }
//! ```

/// `algorithm` holds the hash family and variant enumerations.
pub mod algorithm;
/// `error` is the closed set of failures.
pub mod error;
/// `hasher` is the hashing front end: free functions, `TextHasher` and the `TextHash` extension.
pub mod hasher;
/// `hex_digest` renders digest bytes.
pub mod hex_digest;
/// `matrix` tells which (family, variant) pairs are available.
pub mod matrix;
/// `strategy` holds the implementations behind each variant.
pub mod strategy;

pub use algorithm::{HashFamily, HashVariant};
pub use error::{HashError, Result};
pub use hasher::{
    digest, digest_default, digest_named, digest_utf16, EncodingPolicy, HashSelector, TextHash,
    TextHasher,
};
pub use hex_digest::HexDigest;
