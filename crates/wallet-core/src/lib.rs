pub mod config;
pub mod error;
pub mod provider;
pub mod types;

use chain_btc::address::decode_wif;
use chain_btc::signer::sign_transaction;
use chain_btc::transaction::build_transaction;
use chain_btc::{classify_network, KeyPair};
use crypto_utils::{EntropySource, OsEntropy};

use config::WalletConfig;
use error::WalletError;
use types::Wallet;

pub use chain_btc::utxo::Utxo;
pub use chain_btc::{DecodeMode, Network};

// ─── Wallet construction ─────────────────────────────────────────────

/// Create a wallet, generating a fresh key unless `import_key` holds a WIF.
///
/// When importing, a network recognised from the WIF prefix wins over
/// `network`; `network` only applies when the prefix is unrecognised.
pub fn create_wallet(network: Network, import_key: Option<&str>) -> Result<Wallet, WalletError> {
    let config = WalletConfig {
        network,
        ..WalletConfig::default()
    };
    create_wallet_with(&config, import_key, &mut OsEntropy)
}

/// [`create_wallet`] with explicit settings and entropy source.
pub fn create_wallet_with<E: EntropySource + ?Sized>(
    config: &WalletConfig,
    import_key: Option<&str>,
    entropy: &mut E,
) -> Result<Wallet, WalletError> {
    let (key, network) = match import_key {
        Some(wif) => {
            let network = classify_network(wif).network().unwrap_or(config.network);
            let private = decode_wif(wif, config.decode_mode)?;
            (KeyPair::from_private_key(&*private)?, network)
        }
        None => (KeyPair::generate(entropy)?, config.network),
    };

    let wallet = Wallet::from_key_pair(&key, network)?;
    log::info!(
        "{} {network} wallet {}",
        if import_key.is_some() { "imported" } else { "created" },
        wallet.address()
    );
    Ok(wallet)
}

// ─── Transaction construction ────────────────────────────────────────

/// Build and sign a transaction paying `amount_sat` to `destination`, with
/// change returned to the wallet's own address. Returns the wire hex.
pub fn create_signed_transaction(
    utxos: &[Utxo],
    amount_sat: u64,
    destination: &str,
    wallet: &Wallet,
) -> Result<String, WalletError> {
    create_signed_transaction_with(&WalletConfig::default(), utxos, amount_sat, destination, wallet)
}

/// [`create_signed_transaction`] with explicit fee and decode settings.
pub fn create_signed_transaction_with(
    config: &WalletConfig,
    utxos: &[Utxo],
    amount_sat: u64,
    destination: &str,
    wallet: &Wallet,
) -> Result<String, WalletError> {
    let unsigned = build_transaction(
        utxos,
        amount_sat,
        destination,
        wallet.address(),
        config.fee_policy(),
        config.decode_mode,
    )?;

    let key = wallet.key_pair()?;
    let signed = sign_transaction(&unsigned, &key)?;

    log::info!(
        "signed transaction {} spending {} inputs, fee {} sat",
        signed.txid(),
        signed.tx.inputs.len(),
        unsigned.fee_sat()
    );
    Ok(signed.to_hex())
}
