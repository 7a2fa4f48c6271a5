use thiserror::Error;

/// Cryptographic utility errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),
}
