use crypto_utils::hash::checksum;
use serde::{Deserialize, Serialize};

use crate::error::BtcError;

/// Length of the Base58Check checksum tail.
pub const CHECKSUM_LEN: usize = 4;

/// How decoders treat the Base58Check checksum.
///
/// `Lenient` strips the checksum without rejecting a mismatch (a warning is
/// logged). `Strict` fails with [`BtcError::Decode`] on mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    #[default]
    Lenient,
    Strict,
}

/// Base58Check-encode `payload`: append the 4-byte double-SHA256 checksum,
/// then Base58-encode the result.
pub fn encode_check(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    bs58::encode(&data).into_string()
}

/// Decode a Base58Check string and return the payload without its checksum.
pub fn decode_check(encoded: &str, mode: DecodeMode) -> Result<Vec<u8>, BtcError> {
    let mut data = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| BtcError::Decode(format!("invalid base58: {e}")))?;

    if data.len() <= CHECKSUM_LEN {
        return Err(BtcError::Decode(format!(
            "payload too short: {} bytes",
            data.len()
        )));
    }

    let tail = data.split_off(data.len() - CHECKSUM_LEN);
    if tail[..] != checksum(&data)[..] {
        match mode {
            DecodeMode::Strict => {
                return Err(BtcError::Decode("checksum mismatch".into()));
            }
            DecodeMode::Lenient => {
                log::warn!("accepting base58check payload with mismatched checksum");
            }
        }
    }

    Ok(data)
}
