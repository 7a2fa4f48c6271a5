use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BtcError;

/// Default block explorer API base for both networks.
pub const EXPLORER_API: &str = "https://api.blockcypher.com/v1/btc/";

/// Supported Bitcoin networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Version byte prefixed to P2PKH address payloads.
    pub fn address_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x6f,
        }
    }

    /// Version byte prefixed to WIF private key payloads.
    pub fn wif_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet => 0xef,
        }
    }

    /// Path segment the block explorer uses for this network.
    pub fn explorer_segment(self) -> &'static str {
        match self {
            Network::Mainnet => "main",
            Network::Testnet => "test3",
        }
    }

    /// Full explorer API base URL, e.g. `.../btc/main`.
    pub fn explorer_url(self) -> String {
        format!("{EXPLORER_API}{}", self.explorer_segment())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = BtcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(BtcError::Decode(format!("unknown network: {other}"))),
        }
    }
}

/// Best-effort network guess from a WIF string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkGuess {
    Mainnet,
    Testnet,
    Unknown,
}

impl NetworkGuess {
    pub fn network(self) -> Option<Network> {
        match self {
            NetworkGuess::Mainnet => Some(Network::Mainnet),
            NetworkGuess::Testnet => Some(Network::Testnet),
            NetworkGuess::Unknown => None,
        }
    }
}

/// Classify a compressed WIF by its leading character.
///
/// `K`/`L` are mainnet, `c` is testnet, anything else is `Unknown`. This looks
/// only at the first character; it does not decode or verify the checksum.
pub fn classify_network(wif: &str) -> NetworkGuess {
    match wif.chars().next() {
        Some('K') | Some('L') => NetworkGuess::Mainnet,
        Some('c') => NetworkGuess::Testnet,
        _ => NetworkGuess::Unknown,
    }
}
