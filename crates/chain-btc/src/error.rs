use crypto_utils::CryptoError;
use thiserror::Error;

/// Bitcoin chain operation errors.
#[derive(Debug, Error)]
pub enum BtcError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid script: {0}")]
    InvalidScript(String),

    #[error("input {input} is locked to a key hash this wallet does not control")]
    OwnershipMismatch { input: usize },

    #[error("insufficient funds: need {needed} sat, have {available} sat")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("transaction build error: {0}")]
    TransactionBuild(String),

    #[error("signing error: {0}")]
    Signing(String),
}

impl From<CryptoError> for BtcError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::EntropyUnavailable(msg) => BtcError::EntropyUnavailable(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_key() {
        let err = BtcError::InvalidKey("scalar out of range".into());
        assert_eq!(err.to_string(), "invalid key: scalar out of range");
    }

    #[test]
    fn display_decode() {
        let err = BtcError::Decode("checksum mismatch".into());
        assert_eq!(err.to_string(), "decode error: checksum mismatch");
    }

    #[test]
    fn display_ownership_mismatch() {
        let err = BtcError::OwnershipMismatch { input: 2 };
        assert!(err.to_string().starts_with("input 2 "));
    }

    #[test]
    fn display_insufficient_funds() {
        let err = BtcError::InsufficientFunds {
            needed: 60_000,
            available: 55_000,
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds: need 60000 sat, have 55000 sat"
        );
    }

    #[test]
    fn entropy_error_converts() {
        let err: BtcError = CryptoError::EntropyUnavailable("no device".into()).into();
        assert!(matches!(err, BtcError::EntropyUnavailable(ref m) if m == "no device"));
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(BtcError::Signing("test".into()));
        assert!(err.to_string().contains("test"));
    }
}
