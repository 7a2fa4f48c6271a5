use chain_btc::BtcError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Decode failed: {0}")]
    Decode(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Input {0} is not spendable by this wallet")]
    OwnershipMismatch(usize),

    #[error("Insufficient funds: need {needed} sat, have {available} sat")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Transaction build failed: {0}")]
    TransactionFailed(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid config: {0}")]
    Config(String),
}

impl From<crypto_utils::CryptoError> for WalletError {
    fn from(e: crypto_utils::CryptoError) -> Self {
        WalletError::EntropyUnavailable(e.to_string())
    }
}

impl From<BtcError> for WalletError {
    fn from(e: BtcError) -> Self {
        match e {
            BtcError::InvalidKey(msg) => WalletError::InvalidKey(msg),
            BtcError::EntropyUnavailable(msg) => WalletError::EntropyUnavailable(msg),
            BtcError::Decode(msg) => WalletError::Decode(msg),
            BtcError::InvalidAddress(msg) => WalletError::InvalidAddress(msg),
            BtcError::OwnershipMismatch { input } => WalletError::OwnershipMismatch(input),
            BtcError::InsufficientFunds { needed, available } => {
                WalletError::InsufficientFunds { needed, available }
            }
            other => WalletError::TransactionFailed(format!("BTC: {other}")),
        }
    }
}
