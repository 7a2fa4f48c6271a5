//! Per-input legacy signing (SIGHASH_ALL) for P2PKH inputs.
//!
//! Every input is signed against an isolated copy of the unsigned
//! transaction: the input being signed keeps its placeholder locking script
//! and every other input's script is blanked. The finished unlock scripts are
//! collected and written into a fresh copy once all inputs succeeded, so a
//! partially signed transaction is never returned.

use crypto_utils::hash::{hash160, sha256d};

use crate::encode::Encodable;
use crate::error::BtcError;
use crate::keys::KeyPair;
use crate::script::{p2pkh_pubkey_hash, unlock_script};
use crate::transaction::{Transaction, UnsignedTx};

/// "Sign all" hash type, appended as 4 LE bytes to the preimage.
pub const SIGHASH_ALL: u32 = 0x01;

/// A fully signed transaction.
#[derive(Debug, Clone)]
pub struct SignedTx {
    pub tx: Transaction,
}

impl SignedTx {
    /// Hex wire encoding, ready for a broadcast collaborator.
    pub fn to_hex(&self) -> String {
        self.tx.to_hex()
    }

    pub fn txid(&self) -> String {
        self.tx.txid()
    }
}

/// Copy of `tx` in which every input other than `input_index` has an empty
/// script.
pub fn isolate_input(tx: &Transaction, input_index: usize) -> Result<Transaction, BtcError> {
    if input_index >= tx.inputs.len() {
        return Err(BtcError::Signing(format!(
            "input index {input_index} out of bounds ({} inputs)",
            tx.inputs.len()
        )));
    }

    let mut isolated = tx.clone();
    for (i, input) in isolated.inputs.iter_mut().enumerate() {
        if i != input_index {
            input.script.clear();
        }
    }
    Ok(isolated)
}

/// Legacy signature hash for one input:
/// `sha256d(serialize(isolated) || SIGHASH_ALL as u32 LE)`.
pub fn signature_hash(tx: &Transaction, input_index: usize) -> Result<[u8; 32], BtcError> {
    let mut preimage = isolate_input(tx, input_index)?.serialize();
    preimage.extend_from_slice(&SIGHASH_ALL.to_le_bytes());
    Ok(sha256d(&preimage))
}

/// Produce the unlock script for `input_index` of `snapshot`.
///
/// The input's current script must be a P2PKH locking script paying to the
/// key's hash; anything else is an `OwnershipMismatch`.
pub fn sign_input(
    snapshot: &Transaction,
    input_index: usize,
    key: &KeyPair,
) -> Result<Vec<u8>, BtcError> {
    let input = snapshot.inputs.get(input_index).ok_or_else(|| {
        BtcError::Signing(format!("input index {input_index} out of bounds"))
    })?;

    let owner_hash = hash160(key.public_key());
    if p2pkh_pubkey_hash(&input.script) != Some(owner_hash) {
        return Err(BtcError::OwnershipMismatch { input: input_index });
    }

    let sighash = signature_hash(snapshot, input_index)?;
    let mut signature = key.sign(&sighash)?;
    signature.push(SIGHASH_ALL as u8);

    unlock_script(&signature, key.public_key())
}

/// Sign every input of `unsigned` with `key`, in order.
///
/// Fails as a whole on the first input the key does not control.
pub fn sign_transaction(unsigned: &UnsignedTx, key: &KeyPair) -> Result<SignedTx, BtcError> {
    let total = unsigned.tx.inputs.len();
    if total == 0 {
        return Err(BtcError::Signing("transaction has no inputs".into()));
    }

    let mut unlock_scripts = Vec::with_capacity(total);
    for input_index in 0..total {
        log::debug!("signing input {}/{}", input_index + 1, total);
        unlock_scripts.push(sign_input(&unsigned.tx, input_index, key)?);
    }

    let mut tx = unsigned.tx.clone();
    for (input, script) in tx.inputs.iter_mut().zip(unlock_scripts) {
        input.script = script;
    }
    Ok(SignedTx { tx })
}
