use serde::{Deserialize, Serialize};

use crate::error::BtcError;

/// A single unspent transaction output (UTXO).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Transaction ID as a hex string (big-endian / display order).
    pub txid: String,
    /// Output index within the transaction.
    pub vout: u32,
    /// Value in satoshis.
    pub value_sat: u64,
    /// The locking script (scriptPubKey), hex encoded.
    #[serde(with = "hex::serde")]
    pub script_pubkey: Vec<u8>,
}

/// Result of UTXO selection: the chosen UTXOs and their aggregate value.
#[derive(Debug, Clone)]
pub struct UtxoSelection {
    /// The selected UTXOs, in the order they were supplied.
    pub selected: Vec<Utxo>,
    /// Total value of the selected UTXOs in satoshis.
    pub total_sat: u64,
}

/// Select UTXOs until their total covers `amount_sat` plus `fee_sat`.
///
/// Walks `utxos` in the order given and takes each one until the running
/// total reaches `amount_sat + fee_sat`. There is no attempt to minimise the
/// input count or the leftover change. If the set runs out after covering the
/// amount but not the fee, the selection still succeeds and the caller pays
/// whatever remains as fee. Not covering the amount is `InsufficientFunds`.
pub fn select_utxos(
    utxos: &[Utxo],
    amount_sat: u64,
    fee_sat: u64,
) -> Result<UtxoSelection, BtcError> {
    let target_sat = amount_sat.saturating_add(fee_sat);
    let mut selected = Vec::new();
    let mut total_sat: u64 = 0;

    for utxo in utxos {
        if total_sat >= target_sat && !selected.is_empty() {
            break;
        }
        total_sat = total_sat.checked_add(utxo.value_sat).ok_or_else(|| {
            BtcError::TransactionBuild("UTXO values overflow u64".into())
        })?;
        selected.push(utxo.clone());
    }

    if selected.is_empty() || total_sat < amount_sat {
        return Err(BtcError::InsufficientFunds {
            needed: amount_sat,
            available: total_sat,
        });
    }
    if total_sat < target_sat {
        log::warn!(
            "UTXOs exhausted: {} sat covers the amount but not the {} sat fee",
            total_sat,
            fee_sat
        );
    }

    log::debug!(
        "selected {} of {} UTXOs totalling {} sat for target {} sat",
        selected.len(),
        utxos.len(),
        total_sat,
        target_sat
    );
    Ok(UtxoSelection {
        selected,
        total_sat,
    })
}
