//! End-to-end tests through the public API of wallet_core:
//! create wallet -> fetch UTXOs -> build + sign -> broadcast.
//!
//! The signed hex is checked against the `bitcoin` crate to catch
//! regressions at the wire-format boundary.

use std::cell::RefCell;

use bitcoin::consensus::deserialize;
use bitcoin::hashes::Hash;
use bitcoin::secp256k1::{ecdsa, Message, PublicKey, Secp256k1};
use bitcoin::sighash::{EcdsaSighashType, SighashCache};
use bitcoin::ScriptBuf;

use wallet_core::config::WalletConfig;
use wallet_core::error::WalletError;
use wallet_core::provider::{broadcast, spendable_balance, Broadcaster, ProviderError, UtxoProvider};
use wallet_core::types::Wallet;
use wallet_core::*;

const KEY_ONE_WIF: &str = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";
const RECIPIENT: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serves UTXOs locked to the wallet's own address.
struct MockProvider {
    values: Vec<u64>,
}

impl MockProvider {
    fn utxos_for(&self, wallet: &Wallet) -> Vec<Utxo> {
        let hash = bitcoin::PublicKey::from_slice(&hex::decode(wallet.public_key()).unwrap())
            .unwrap()
            .pubkey_hash();
        let script = ScriptBuf::new_p2pkh(&hash);
        self.values
            .iter()
            .enumerate()
            .map(|(i, &value_sat)| Utxo {
                txid: format!("{:064x}", i + 1),
                vout: i as u32,
                value_sat,
                script_pubkey: script.to_bytes(),
            })
            .collect()
    }
}

#[derive(Default)]
struct RecordingBroadcaster {
    sent: RefCell<Vec<String>>,
}

impl Broadcaster for RecordingBroadcaster {
    fn broadcast(&self, tx_hex: &str) -> Result<String, ProviderError> {
        self.sent.borrow_mut().push(tx_hex.to_string());
        let tx: bitcoin::Transaction = deserialize(&hex::decode(tx_hex)?)?;
        Ok(tx.compute_txid().to_string())
    }
}

struct WalletProvider<'a> {
    inner: &'a MockProvider,
    wallet: &'a Wallet,
}

impl UtxoProvider for WalletProvider<'_> {
    fn utxos(&self, address: &str) -> Result<Vec<Utxo>, ProviderError> {
        if address != self.wallet.address() {
            return Err(format!("unknown address {address}").into());
        }
        Ok(self.inner.utxos_for(self.wallet))
    }
}

fn verify_all_inputs(tx_hex: &str, utxos: &[Utxo]) -> bitcoin::Transaction {
    let tx: bitcoin::Transaction = deserialize(&hex::decode(tx_hex).unwrap()).unwrap();
    let secp = Secp256k1::verification_only();
    let cache = SighashCache::new(&tx);

    for (i, input) in tx.input.iter().enumerate() {
        let script_pubkey = ScriptBuf::from_bytes(utxos[i].script_pubkey.clone());
        let sighash = cache
            .legacy_signature_hash(i, &script_pubkey, EcdsaSighashType::All.to_u32())
            .unwrap();

        let script_sig = input.script_sig.as_bytes();
        let sig_len = script_sig[0] as usize;
        let sig = ecdsa::Signature::from_der(&script_sig[1..sig_len]).unwrap();
        let pubkey = PublicKey::from_slice(&script_sig[2 + sig_len..]).unwrap();
        let msg = Message::from_digest(sighash.to_byte_array());
        secp.verify_ecdsa(&msg, &sig, &pubkey).unwrap();
    }
    tx
}

#[test]
fn btc_full_pipeline() {
    init_logging();

    let wallet = create_wallet(Network::Mainnet, None).unwrap();
    let provider = MockProvider {
        values: vec![40_000, 80_000, 5_000],
    };
    let source = WalletProvider {
        inner: &provider,
        wallet: &wallet,
    };

    let balance = spendable_balance(&source, wallet.address()).unwrap();
    assert_eq!(balance, 125_000);

    let utxos = source.utxos(wallet.address()).unwrap();
    let tx_hex = create_signed_transaction(&utxos, 100_000, RECIPIENT, &wallet).unwrap();

    let tx = verify_all_inputs(&tx_hex, &utxos);
    assert_eq!(tx.input.len(), 2, "third UTXO is not needed");
    assert_eq!(tx.output.len(), 2);
    assert_eq!(tx.output[0].value.to_sat(), 100_000);
    assert_eq!(tx.output[1].value.to_sat(), 10_000);
    assert_eq!(tx.output[1].script_pubkey.as_bytes(), &utxos[0].script_pubkey[..]);

    let broadcaster = RecordingBroadcaster::default();
    let txid = broadcast(&broadcaster, &tx_hex).unwrap();
    assert_eq!(txid, tx.compute_txid().to_string());
    assert_eq!(broadcaster.sent.borrow().as_slice(), &[tx_hex]);
}

#[test]
fn imported_key_matches_known_vector() {
    let wallet = create_wallet(Network::Testnet, Some(KEY_ONE_WIF)).unwrap();
    assert_eq!(wallet.network(), Network::Mainnet);
    assert_eq!(
        wallet.public_key(),
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
    );
    assert_eq!(wallet.address(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
}

#[test]
fn testnet_pipeline_with_custom_fee() {
    init_logging();

    let config = WalletConfig::from_json(r#"{"network":"testnet","fee_sat":1000}"#).unwrap();
    let wallet = create_wallet(config.network, None).unwrap();
    let utxos = MockProvider {
        values: vec![100_000],
    }
    .utxos_for(&wallet);

    let recipient = create_wallet(Network::Testnet, None).unwrap();
    let tx_hex =
        create_signed_transaction_with(&config, &utxos, 50_000, recipient.address(), &wallet)
            .unwrap();

    let tx = verify_all_inputs(&tx_hex, &utxos);
    assert_eq!(tx.output[1].value.to_sat(), 49_000);
}

#[test]
fn change_omitted_when_fee_exceeds_remainder() {
    let wallet = create_wallet(Network::Mainnet, None).unwrap();
    let utxos = MockProvider {
        values: vec![55_000],
    }
    .utxos_for(&wallet);

    let tx_hex = create_signed_transaction(&utxos, 50_000, RECIPIENT, &wallet).unwrap();
    let tx = verify_all_inputs(&tx_hex, &utxos);
    assert_eq!(tx.output.len(), 1);
}

#[test]
fn foreign_utxo_rejected() {
    let wallet = create_wallet(Network::Mainnet, None).unwrap();
    let other = create_wallet(Network::Mainnet, None).unwrap();
    let mut utxos = MockProvider {
        values: vec![30_000],
    }
    .utxos_for(&wallet);
    utxos.extend(
        MockProvider {
            values: vec![30_000],
        }
        .utxos_for(&other),
    );

    let err = create_signed_transaction(&utxos, 50_000, RECIPIENT, &wallet).unwrap_err();
    assert!(matches!(err, WalletError::OwnershipMismatch(1)));
}

#[test]
fn insufficient_funds_rejected() {
    let wallet = create_wallet(Network::Mainnet, None).unwrap();
    let utxos = MockProvider {
        values: vec![10_000, 20_000],
    }
    .utxos_for(&wallet);

    let err = create_signed_transaction(&utxos, 50_000, RECIPIENT, &wallet).unwrap_err();
    assert!(matches!(
        err,
        WalletError::InsufficientFunds {
            needed: 50_000,
            available: 30_000
        }
    ));
}

#[test]
fn strict_mode_rejects_corrupted_destination() {
    let wallet = create_wallet(Network::Mainnet, None).unwrap();
    let utxos = MockProvider {
        values: vec![100_000],
    }
    .utxos_for(&wallet);

    let mut raw = bs58::decode(RECIPIENT).into_vec().unwrap();
    raw[24] ^= 0x5a;
    let corrupted = bs58::encode(&raw).into_string();

    let strict = WalletConfig {
        decode_mode: DecodeMode::Strict,
        ..WalletConfig::default()
    };
    let err = create_signed_transaction_with(&strict, &utxos, 50_000, &corrupted, &wallet)
        .unwrap_err();
    assert!(matches!(err, WalletError::Decode(_)));

    // The default lenient mode still pays the (checksum-less) key hash.
    assert!(create_signed_transaction(&utxos, 50_000, &corrupted, &wallet).is_ok());
}
