//! # crypto-utils
//!
//! Hash primitives and the entropy source seam shared by the wallet crates.

pub mod error;
pub mod hash;
pub mod random;

pub use error::CryptoError;
pub use random::{EntropySource, OsEntropy};
