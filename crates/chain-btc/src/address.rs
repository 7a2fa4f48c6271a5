use crypto_utils::hash::hash160;
use zeroize::Zeroizing;

use crate::base58::{decode_check, encode_check, DecodeMode};
use crate::error::BtcError;
use crate::keys::{COMPRESSED_PUBKEY_LEN, PRIVATE_KEY_LEN};
use crate::network::Network;

/// Suffix marking a WIF key whose public key is used compressed.
pub const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Derive a P2PKH (Base58Check) address from a compressed public key.
///
/// Steps:
/// 1. Hash160 of the public key
/// 2. Prepend the network's 1-byte version
/// 3. Base58Check encode (4-byte double-SHA256 checksum)
pub fn encode_address(pubkey: &[u8], network: Network) -> Result<String, BtcError> {
    if pubkey.len() != COMPRESSED_PUBKEY_LEN || (pubkey[0] != 0x02 && pubkey[0] != 0x03) {
        return Err(BtcError::InvalidKey(
            "expected a 33-byte compressed public key (0x02/0x03 prefix)".into(),
        ));
    }
    Ok(address_from_hash(&hash160(pubkey), network))
}

/// Base58Check address for an already computed public-key hash.
pub fn address_from_hash(pubkey_hash: &[u8; 20], network: Network) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(network.address_version());
    payload.extend_from_slice(pubkey_hash);
    encode_check(&payload)
}

/// Extract the 20-byte public-key hash from a P2PKH address.
///
/// The version byte is stripped and not interpreted. In `Lenient` mode the
/// checksum is not verified, so a corrupted address can decode to the wrong
/// hash; use `Strict` wherever the address comes from user input.
pub fn decode_address(address: &str, mode: DecodeMode) -> Result<[u8; 20], BtcError> {
    let payload = decode_check(address, mode)?;
    if payload.len() != 21 {
        return Err(BtcError::InvalidAddress(format!(
            "expected 21-byte payload, got {}",
            payload.len()
        )));
    }

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok(hash)
}

/// Encode a private scalar as a compressed WIF string.
pub fn encode_wif(private: &[u8; PRIVATE_KEY_LEN], network: Network) -> Zeroizing<String> {
    let mut payload = Zeroizing::new(Vec::with_capacity(PRIVATE_KEY_LEN + 2));
    payload.push(network.wif_version());
    payload.extend_from_slice(private);
    payload.push(WIF_COMPRESSED_FLAG);
    Zeroizing::new(encode_check(&payload))
}

/// Decode a compressed WIF string back to its 32-byte scalar.
///
/// Lenient mode strips the version, compression flag and checksum without
/// checking them. Strict mode also requires a known version byte and the
/// `0x01` compression flag.
pub fn decode_wif(
    wif: &str,
    mode: DecodeMode,
) -> Result<Zeroizing<[u8; PRIVATE_KEY_LEN]>, BtcError> {
    let payload = Zeroizing::new(decode_check(wif, mode)?);
    if payload.len() != PRIVATE_KEY_LEN + 2 {
        return Err(BtcError::Decode(format!(
            "expected {}-byte WIF payload, got {}",
            PRIVATE_KEY_LEN + 2,
            payload.len()
        )));
    }

    if mode == DecodeMode::Strict {
        let version = payload[0];
        if version != Network::Mainnet.wif_version() && version != Network::Testnet.wif_version()
        {
            return Err(BtcError::Decode(format!(
                "unknown WIF version byte 0x{version:02x}"
            )));
        }
        if payload[PRIVATE_KEY_LEN + 1] != WIF_COMPRESSED_FLAG {
            return Err(BtcError::Decode("missing compression flag".into()));
        }
    }

    let mut private = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
    private.copy_from_slice(&payload[1..=PRIVATE_KEY_LEN]);
    Ok(private)
}
