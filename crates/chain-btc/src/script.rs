use crate::base58::DecodeMode;
use crate::error::BtcError;

pub const OP_DUP: u8 = 0x76;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_CHECKSIG: u8 = 0xac;

/// Largest push that fits a single-byte length opcode.
const MAX_DIRECT_PUSH: usize = 0x4b;

/// Length of a P2PKH locking script.
pub const P2PKH_SCRIPT_LEN: usize = 25;

/// Build a P2PKH scriptPubKey: OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG
pub fn p2pkh_script(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(P2PKH_SCRIPT_LEN);
    script.push(OP_DUP);
    script.push(OP_HASH160);
    script.push(0x14); // Push 20 bytes
    script.extend_from_slice(pubkey_hash);
    script.push(OP_EQUALVERIFY);
    script.push(OP_CHECKSIG);
    script
}

/// P2PKH scriptPubKey paying to `address`.
pub fn p2pkh_script_for_address(address: &str, mode: DecodeMode) -> Result<Vec<u8>, BtcError> {
    let hash = crate::address::decode_address(address, mode)?;
    Ok(p2pkh_script(&hash))
}

/// The public-key hash a P2PKH locking script commits to, or `None` if the
/// script does not follow the P2PKH template.
pub fn p2pkh_pubkey_hash(script: &[u8]) -> Option<[u8; 20]> {
    match script {
        [OP_DUP, OP_HASH160, 0x14, hash @ .., OP_EQUALVERIFY, OP_CHECKSIG] if hash.len() == 20 => {
            let mut out = [0u8; 20];
            out.copy_from_slice(hash);
            Some(out)
        }
        _ => None,
    }
}

/// P2PKH scriptSig: `<sig_len> <sig+hashtype> <pubkey_len> <pubkey>`.
pub fn unlock_script(signature: &[u8], pubkey: &[u8]) -> Result<Vec<u8>, BtcError> {
    if signature.is_empty() || signature.len() > MAX_DIRECT_PUSH {
        return Err(BtcError::InvalidScript(format!(
            "signature push of {} bytes",
            signature.len()
        )));
    }
    if pubkey.is_empty() || pubkey.len() > MAX_DIRECT_PUSH {
        return Err(BtcError::InvalidScript(format!(
            "public key push of {} bytes",
            pubkey.len()
        )));
    }

    let mut script = Vec::with_capacity(signature.len() + pubkey.len() + 2);
    script.push(signature.len() as u8);
    script.extend_from_slice(signature);
    script.push(pubkey.len() as u8);
    script.extend_from_slice(pubkey);
    Ok(script)
}
