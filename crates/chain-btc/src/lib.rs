//! Bitcoin chain support for the wallet.
//!
//! Provides secp256k1 key handling, Base58Check P2PKH addresses and WIF keys,
//! UTXO selection, and construction, encoding and signing of legacy
//! (pre-SegWit) P2PKH transactions.

pub mod address;
pub mod base58;
pub mod encode;
pub mod error;
pub mod keys;
pub mod network;
pub mod script;
pub mod signer;
pub mod transaction;
pub mod utxo;

pub use base58::DecodeMode;
pub use error::BtcError;
pub use keys::KeyPair;
pub use network::{classify_network, Network, NetworkGuess};
