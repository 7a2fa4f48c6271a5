use rand::RngCore;
use rand_core::OsRng;

use crate::error::CryptoError;

/// A source of cryptographically secure random bytes.
///
/// The OS generator is the production implementation; tests substitute
/// fixed or failing sources.
pub trait EntropySource {
    /// Fill `dest` entirely with random bytes or fail.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// Entropy drawn from the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::EntropyUnavailable(e.to_string()))
    }
}

/// Draw a fixed-size array of random bytes from `source`.
pub fn random_bytes_fixed<const N: usize, E: EntropySource + ?Sized>(
    source: &mut E,
) -> Result<[u8; N], CryptoError> {
    let mut buf = [0u8; N];
    source.fill(&mut buf)?;
    Ok(buf)
}
