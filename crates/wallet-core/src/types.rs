use std::fmt;

use chain_btc::address::{decode_wif, encode_address, encode_wif};
use chain_btc::{DecodeMode, KeyPair, Network};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::WalletError;

/// A single-key P2PKH wallet for one session. Nothing is persisted.
#[derive(Clone)]
pub struct Wallet {
    network: Network,
    private_key_wif: Zeroizing<String>,
    public_key: String,
    address: String,
}

impl Wallet {
    /// Encode `key` for `network`.
    pub fn from_key_pair(key: &KeyPair, network: Network) -> Result<Self, WalletError> {
        Ok(Self {
            network,
            private_key_wif: encode_wif(key.private_key(), network),
            public_key: hex::encode(key.public_key()),
            address: encode_address(key.public_key(), network)?,
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// The private key in compressed WIF. Handle with care.
    pub fn private_key_wif(&self) -> &str {
        &self.private_key_wif
    }

    /// Compressed public key, lowercase hex.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Re-derive the key pair from the stored WIF.
    pub fn key_pair(&self) -> Result<KeyPair, WalletError> {
        let private = decode_wif(&self.private_key_wif, DecodeMode::Strict)?;
        let key = KeyPair::from_private_key(&*private)?;
        if hex::encode(key.public_key()) != self.public_key {
            return Err(WalletError::InvalidKey(
                "stored public key does not match private key".into(),
            ));
        }
        Ok(key)
    }

    /// Non-secret view for display.
    pub fn info(&self) -> WalletInfo {
        WalletInfo {
            network: self.network,
            public_key: self.public_key.clone(),
            address: self.address.clone(),
        }
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("network", &self.network)
            .field("private_key_wif", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish()
    }
}

/// Public wallet details, safe to hand to a front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    pub network: Network,
    pub public_key: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_one() -> KeyPair {
        let mut private = [0u8; 32];
        private[31] = 1;
        KeyPair::from_private_key(&private).unwrap()
    }

    #[test]
    fn encodes_all_forms() {
        let wallet = Wallet::from_key_pair(&key_one(), Network::Mainnet).unwrap();
        assert_eq!(
            wallet.private_key_wif(),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );
        assert_eq!(
            wallet.public_key(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(wallet.address(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn key_pair_roundtrip() {
        let wallet = Wallet::from_key_pair(&key_one(), Network::Testnet).unwrap();
        let key = wallet.key_pair().unwrap();
        assert_eq!(key.public_key(), key_one().public_key());
    }

    #[test]
    fn debug_redacts_wif() {
        let wallet = Wallet::from_key_pair(&key_one(), Network::Mainnet).unwrap();
        let debug = format!("{wallet:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("KwDiBf89"));
    }

    #[test]
    fn info_serializes_without_secret() {
        let wallet = Wallet::from_key_pair(&key_one(), Network::Mainnet).unwrap();
        let json = serde_json::to_string(&wallet.info()).unwrap();
        assert!(json.contains(r#""publicKey":"0279be"#));
        assert!(json.contains(r#""network":"mainnet""#));
        assert!(!json.contains("KwDiBf89"));
    }
}
