use chain_btc::transaction::{FeePolicy, DEFAULT_FEE_SAT};
use chain_btc::{DecodeMode, Network};
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Wallet settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Network for newly generated keys. Imported keys override it when
    /// their WIF prefix identifies a network.
    pub network: Network,
    /// Fixed fee per transaction in satoshis.
    pub fee_sat: u64,
    /// Checksum handling for addresses and WIF keys.
    pub decode_mode: DecodeMode,
    /// Block explorer API base overriding the network default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_api: Option<String>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            fee_sat: DEFAULT_FEE_SAT,
            decode_mode: DecodeMode::Lenient,
            explorer_api: None,
        }
    }
}

impl WalletConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        serde_json::from_str(json).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn fee_policy(&self) -> FeePolicy {
        FeePolicy::fixed(self.fee_sat)
    }

    /// Explorer base URL that [`UtxoProvider`](crate::provider::UtxoProvider)
    /// and [`Broadcaster`](crate::provider::Broadcaster) implementations
    /// should talk to.
    pub fn explorer_url(&self) -> String {
        match &self.explorer_api {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => self.network.explorer_url(),
        }
    }
}
