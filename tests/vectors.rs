use bip39_monero_derive::wallet::bip39::mnemonic_to_seed;
use bip39_monero_derive::wallet::{self, monero_mnemonic, Wordlists};
use bip39_monero_derive::{derive_monero, DerivationMode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Vector {
    bip39: String,
    passphrase: String,
    slip0010: bool,
    seed: String,
    node_private_key: String,
    monero_master_seed: String,
    electrum_words: String,
    spend_secret: String,
    spend_public: String,
}

fn vectors() -> Vec<Vector> {
    serde_json::from_str(include_str!("data/test_vectors.json")).expect("vectors parse")
}

#[test]
fn vectors_cover_both_modes() {
    let vectors = vectors();
    assert!(vectors.len() >= 4);
    assert!(vectors.iter().any(|v| v.slip0010));
    assert!(vectors.iter().any(|v| !v.slip0010));
    assert!(vectors.iter().any(|v| !v.passphrase.is_empty()));
}

#[test]
fn bip39_seeds_match() {
    for v in vectors() {
        let seed = mnemonic_to_seed(&v.bip39, &v.passphrase).expect("seed derives");
        assert_eq!(hex::encode(&seed[..]), v.seed, "{}", v.bip39);
    }
}

#[test]
fn monero_derivations_match() {
    let wordlists = Wordlists::load().expect("wordlists load");
    for v in vectors() {
        let d = derive_monero(&[v.bip39.as_str()], &v.passphrase, None, v.slip0010, &wordlists)
            .expect("derivation succeeds");
        let label = format!("{} / {:?} / slip0010={}", v.bip39, v.passphrase, v.slip0010);

        assert_eq!(hex::encode(d.node_private_key.expect("node key")), v.node_private_key, "{}", label);
        assert_eq!(hex::encode(d.monero_master_seed), v.monero_master_seed, "{}", label);
        assert_eq!(d.electrum_words, v.electrum_words, "{}", label);
        assert_eq!(hex::encode(d.spend_secret), v.spend_secret, "{}", label);
        assert_eq!(hex::encode(d.spend_public), v.spend_public, "{}", label);

        let expected_mode = if v.slip0010 { DerivationMode::Slip10 } else { DerivationMode::Legacy };
        assert_eq!(d.mode, Some(expected_mode));
        assert_eq!(d.passphrase_used, !v.passphrase.is_empty());
    }
}

#[test]
fn electrum_words_restore_the_keys() {
    let wordlists = Wordlists::load().expect("wordlists load");
    for v in vectors() {
        let words: Vec<&str> = v.electrum_words.split_whitespace().collect();
        assert_eq!(words.len(), 25);
        assert!(monero_mnemonic::verify_checksum(&words, &wordlists.monero).expect("25 words"));

        let restored = wallet::restore_from_monero_words(&v.electrum_words, &wordlists).expect("restore");
        assert_eq!(hex::encode(restored.monero_master_seed), v.monero_master_seed);
        assert_eq!(hex::encode(restored.spend_public), v.spend_public);
    }
}
