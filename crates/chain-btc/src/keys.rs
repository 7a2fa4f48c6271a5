use std::fmt;

use crypto_utils::random::{random_bytes_fixed, EntropySource};
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::BtcError;

/// Length of a raw secp256k1 private scalar.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Length of a compressed SEC1 public key.
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Draws attempted before giving up on an entropy source that keeps
/// returning out-of-range scalars.
const MAX_SCALAR_DRAWS: usize = 8;

/// A secp256k1 key pair. `public` is always `G * private`, compressed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    private: [u8; PRIVATE_KEY_LEN],
    public: [u8; COMPRESSED_PUBKEY_LEN],
}

impl KeyPair {
    /// Generate a fresh key pair from `source`.
    pub fn generate<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, BtcError> {
        let mut private = generate_private_key(source)?;
        let result = Self::from_private_key(&private);
        private.zeroize();
        result
    }

    /// Build a key pair from an existing 32-byte scalar.
    pub fn from_private_key(private: &[u8]) -> Result<Self, BtcError> {
        let public = derive_public_key(private)?;
        let mut scalar = [0u8; PRIVATE_KEY_LEN];
        scalar.copy_from_slice(private);
        Ok(Self {
            private: scalar,
            public,
        })
    }

    pub fn private_key(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.private
    }

    pub fn public_key(&self) -> &[u8; COMPRESSED_PUBKEY_LEN] {
        &self.public
    }

    /// DER-encoded ECDSA signature over a 32-byte digest.
    pub fn sign(&self, message_hash: &[u8; 32]) -> Result<Vec<u8>, BtcError> {
        sign(message_hash, &self.private)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private", &"<redacted>")
            .field("public", &hex::encode(self.public))
            .finish()
    }
}

/// Draw a valid secp256k1 private scalar from `source`.
///
/// Out-of-range draws (zero or >= n) are discarded and redrawn.
pub fn generate_private_key<E: EntropySource + ?Sized>(
    source: &mut E,
) -> Result<[u8; PRIVATE_KEY_LEN], BtcError> {
    for _ in 0..MAX_SCALAR_DRAWS {
        let mut candidate: [u8; PRIVATE_KEY_LEN] = random_bytes_fixed(source)?;
        if SigningKey::from_bytes((&candidate).into()).is_ok() {
            return Ok(candidate);
        }
        candidate.zeroize();
    }
    Err(BtcError::InvalidKey(
        "entropy source produced no valid secp256k1 scalar".into(),
    ))
}

/// Compressed public key for `private`. Deterministic.
pub fn derive_public_key(private: &[u8]) -> Result<[u8; COMPRESSED_PUBKEY_LEN], BtcError> {
    let signing_key = signing_key(private)?;
    signing_key
        .verifying_key()
        .to_sec1_bytes()
        .as_ref()
        .try_into()
        .map_err(|_| BtcError::InvalidKey("unexpected public key encoding".into()))
}

/// Sign a 32-byte digest. The signature is RFC 6979 deterministic, low-S
/// normalized and DER encoded.
pub fn sign(message_hash: &[u8; 32], private: &[u8]) -> Result<Vec<u8>, BtcError> {
    let signing_key = signing_key(private)?;
    let sig: Signature = signing_key
        .sign_prehash(message_hash)
        .map_err(|e| BtcError::Signing(format!("ECDSA signing failed: {e}")))?;
    // Guard: k256 already emits low-S, but relay policy rejects high-S.
    let sig = sig.normalize_s().unwrap_or(sig);
    Ok(sig.to_der().as_bytes().to_vec())
}

/// Check a DER signature over a 32-byte digest against a SEC1 public key.
pub fn verify(
    message_hash: &[u8; 32],
    der_signature: &[u8],
    public_key: &[u8],
) -> Result<bool, BtcError> {
    let verifying_key = VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|e| BtcError::InvalidKey(format!("invalid public key: {e}")))?;
    let sig = Signature::from_der(der_signature)
        .map_err(|e| BtcError::Decode(format!("invalid DER signature: {e}")))?;
    Ok(verifying_key.verify_prehash(message_hash, &sig).is_ok())
}

fn signing_key(private: &[u8]) -> Result<SigningKey, BtcError> {
    let scalar: &[u8; PRIVATE_KEY_LEN] = private.try_into().map_err(|_| {
        BtcError::InvalidKey(format!(
            "private key must be {PRIVATE_KEY_LEN} bytes, got {}",
            private.len()
        ))
    })?;
    SigningKey::from_bytes(scalar.into())
        .map_err(|e| BtcError::InvalidKey(format!("invalid secp256k1 key: {e}")))
}
