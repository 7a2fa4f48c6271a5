use crypto_utils::hash::sha256d;
use serde::{Deserialize, Serialize};

use crate::base58::DecodeMode;
use crate::encode::{serialize_hex, Encodable};
use crate::error::BtcError;
use crate::script::p2pkh_script_for_address;
use crate::utxo::{select_utxos, Utxo};

/// Transaction format version written by the builder.
pub const TX_VERSION: u32 = 1;

/// Lock time written by the builder (no time lock).
pub const LOCK_TIME: u32 = 0;

/// Sequence number for every input (final, no replacement).
pub const SEQUENCE_FINAL: u32 = 0xFFFF_FFFF;

/// Fee charged when no policy is configured, in satoshis.
pub const DEFAULT_FEE_SAT: u64 = 10_000;

/// Fixed fee policy. Injected into the builder rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    pub fixed_sat: u64,
}

impl FeePolicy {
    pub fn fixed(fixed_sat: u64) -> Self {
        Self { fixed_sat }
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_FEE_SAT)
    }
}

/// A transaction input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInput {
    /// Previous transaction hash (32 bytes, internal byte order).
    pub prev_txid: [u8; 32],
    pub prev_vout: u32,
    /// Before signing: the spent output's locking script (placeholder).
    /// After signing: the P2PKH unlock script.
    pub script: Vec<u8>,
    pub sequence: u32,
}

/// A transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    pub value_sat: u64,
    pub script_pubkey: Vec<u8>,
}

/// A legacy Bitcoin transaction. Counts and script lengths are derived from
/// the vectors at encode time, so they can never disagree with the contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// Transaction id in display (big-endian) hex.
    pub fn txid(&self) -> String {
        let mut hash = sha256d(&self.serialize());
        hash.reverse();
        hex::encode(hash)
    }

    pub fn to_hex(&self) -> String {
        serialize_hex(self)
    }

    pub fn total_output_sat(&self) -> u64 {
        self.outputs.iter().map(|o| o.value_sat).sum()
    }
}

/// A transaction whose inputs still carry their placeholder locking scripts.
#[derive(Debug, Clone)]
pub struct UnsignedTx {
    pub tx: Transaction,
    /// Sum of the values of the spent UTXOs.
    pub input_value_sat: u64,
}

impl UnsignedTx {
    /// Fee implied by inputs minus outputs.
    pub fn fee_sat(&self) -> u64 {
        self.input_value_sat.saturating_sub(self.tx.total_output_sat())
    }
}

/// Select UTXOs covering `amount_sat + fee_sat` and turn them into unsigned
/// inputs. See [`select_utxos`] for the shortfall rules.
///
/// Each input's script is set to the spent output's locking script; the
/// signer needs it for the signature hash.
pub fn select_inputs(
    utxos: &[Utxo],
    amount_sat: u64,
    fee_sat: u64,
) -> Result<(Vec<TxInput>, u64), BtcError> {
    let selection = select_utxos(utxos, amount_sat, fee_sat)?;

    let inputs = selection
        .selected
        .iter()
        .map(|utxo| {
            Ok(TxInput {
                prev_txid: parse_txid(&utxo.txid)?,
                prev_vout: utxo.vout,
                script: utxo.script_pubkey.clone(),
                sequence: SEQUENCE_FINAL,
            })
        })
        .collect::<Result<Vec<_>, BtcError>>()?;

    Ok((inputs, selection.total_sat))
}

/// Payment output plus a change output back to `change_address` when
/// `total_selected - amount - fee` is strictly positive.
pub fn build_outputs(
    amount_sat: u64,
    destination: &str,
    total_selected_sat: u64,
    change_address: &str,
    fee: FeePolicy,
    mode: DecodeMode,
) -> Result<Vec<TxOutput>, BtcError> {
    if total_selected_sat < amount_sat {
        return Err(BtcError::InsufficientFunds {
            needed: amount_sat,
            available: total_selected_sat,
        });
    }

    let mut outputs = vec![TxOutput {
        value_sat: amount_sat,
        script_pubkey: p2pkh_script_for_address(destination, mode)?,
    }];

    let change_sat = total_selected_sat
        .checked_sub(amount_sat)
        .and_then(|rest| rest.checked_sub(fee.fixed_sat))
        .unwrap_or(0);
    if change_sat > 0 {
        outputs.push(TxOutput {
            value_sat: change_sat,
            script_pubkey: p2pkh_script_for_address(change_address, mode)?,
        });
    } else {
        log::debug!("no change output: remainder does not exceed the {} sat fee", fee.fixed_sat);
    }

    Ok(outputs)
}

/// Wrap inputs and outputs in a version 1, lock time 0 transaction.
pub fn assemble_transaction(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Transaction {
    Transaction {
        version: TX_VERSION,
        inputs,
        outputs,
        lock_time: LOCK_TIME,
    }
}

/// Build an unsigned P2PKH transaction paying `amount_sat` to `destination`.
///
/// Selection stops once the inputs cover `amount_sat` plus the fixed fee. A
/// remainder above the fee becomes a change output. When the UTXOs run out
/// before the fee is covered, whatever is left over goes to the miner.
pub fn build_transaction(
    utxos: &[Utxo],
    amount_sat: u64,
    destination: &str,
    change_address: &str,
    fee: FeePolicy,
    mode: DecodeMode,
) -> Result<UnsignedTx, BtcError> {
    if amount_sat == 0 {
        return Err(BtcError::TransactionBuild("amount must be positive".into()));
    }

    let (inputs, input_value_sat) = select_inputs(utxos, amount_sat, fee.fixed_sat)?;
    let outputs = build_outputs(
        amount_sat,
        destination,
        input_value_sat,
        change_address,
        fee,
        mode,
    )?;

    Ok(UnsignedTx {
        tx: assemble_transaction(inputs, outputs),
        input_value_sat,
    })
}

/// Parse a hex txid string (big-endian display) to internal byte order (little-endian).
fn parse_txid(txid_hex: &str) -> Result<[u8; 32], BtcError> {
    let bytes = hex::decode(txid_hex)
        .map_err(|e| BtcError::TransactionBuild(format!("invalid txid hex: {e}")))?;
    let mut result: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
        BtcError::TransactionBuild(format!("txid must be 32 bytes, got {}", b.len()))
    })?;
    result.reverse();
    Ok(result)
}
