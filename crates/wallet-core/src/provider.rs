//! Seams for the network collaborators: UTXO lookup and broadcast.
//!
//! Implementations live outside this crate and take their endpoint from
//! [`WalletConfig::explorer_url`](crate::config::WalletConfig::explorer_url).
//! Their errors are passed through as opaque strings.

use chain_btc::utxo::Utxo;

use crate::error::WalletError;

pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Returns the unspent outputs locked to an address, in provider order.
pub trait UtxoProvider {
    fn utxos(&self, address: &str) -> Result<Vec<Utxo>, ProviderError>;
}

/// Submits a hex transaction and returns its id. No retries.
pub trait Broadcaster {
    fn broadcast(&self, tx_hex: &str) -> Result<String, ProviderError>;
}

/// Sum of the values of every UTXO the provider reports for `address`.
pub fn spendable_balance<P: UtxoProvider + ?Sized>(
    provider: &P,
    address: &str,
) -> Result<u64, WalletError> {
    let utxos = provider
        .utxos(address)
        .map_err(|e| WalletError::Provider(e.to_string()))?;
    utxos.iter().try_fold(0u64, |acc, utxo| {
        acc.checked_add(utxo.value_sat)
            .ok_or_else(|| WalletError::Provider("balance overflows u64".into()))
    })
}

/// Hand a signed transaction to `broadcaster`.
pub fn broadcast<B: Broadcaster + ?Sized>(
    broadcaster: &B,
    tx_hex: &str,
) -> Result<String, WalletError> {
    let txid = broadcaster
        .broadcast(tx_hex)
        .map_err(|e| WalletError::Provider(e.to_string()))?;
    log::info!("broadcast accepted transaction {txid}");
    Ok(txid)
}
