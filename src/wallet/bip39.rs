//! BIP39 Mnemonic Handling
//!
//! Checksum validation over the 11-bit word indices, entropy recovery, and
//! PBKDF2 seed derivation. Mnemonic validity is decided here, not by the
//! `bip39` crate, which only supplies the English word table.

use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::crypto::pbkdf2::{pbkdf2_hmac_sha512, BIP39_PBKDF2_ROUNDS};
use crate::error::{DeriveError, DeriveResult};
use crate::utils::bits::{binary_str_to_bytes, bytes_to_binary_str, int_to_binary_str};
use crate::utils::crypto::sha256;
use crate::wallet::wordlist::Wordlist;

/// Bits per mnemonic word
pub const WORD_BIT_LEN: usize = 11;

/// BIP39 seed size
pub const SEED_LEN: usize = 64;

/// Salt prefix mandated by BIP39
const SALT_PREFIX: &str = "mnemonic";

/// Supported mnemonic lengths
///
/// ```text
/// |  ENT  | CS | ENT+CS |  MS  |
/// +-------+----+--------+------+
/// |  128  |  4 |   132  |  12  |
/// |  160  |  5 |   165  |  15  |
/// |  192  |  6 |   198  |  18  |
/// |  224  |  7 |   231  |  21  |
/// |  256  |  8 |   264  |  24  |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bip39WordCount {
    Words12,
    Words15,
    Words18,
    Words21,
    Words24,
}

impl Bip39WordCount {
    pub const ALL: [Bip39WordCount; 5] = [
        Self::Words12,
        Self::Words15,
        Self::Words18,
        Self::Words21,
        Self::Words24,
    ];

    pub fn from_count(count: usize) -> DeriveResult<Self> {
        match count {
            12 => Ok(Self::Words12),
            15 => Ok(Self::Words15),
            18 => Ok(Self::Words18),
            21 => Ok(Self::Words21),
            24 => Ok(Self::Words24),
            other => Err(DeriveError::invalid_word_count(other)),
        }
    }

    pub fn word_count(&self) -> usize {
        match self {
            Self::Words12 => 12,
            Self::Words15 => 15,
            Self::Words18 => 18,
            Self::Words21 => 21,
            Self::Words24 => 24,
        }
    }

    /// Checksum length in bits
    pub fn checksum_len(&self) -> usize {
        match self {
            Self::Words12 => 4,
            Self::Words15 => 5,
            Self::Words18 => 6,
            Self::Words21 => 7,
            Self::Words24 => 8,
        }
    }

    pub fn entropy_bits(&self) -> usize {
        self.word_count() * WORD_BIT_LEN - self.checksum_len()
    }

    /// Entropy size in bytes; always `checksum_len * 4`
    pub fn entropy_bytes(&self) -> usize {
        self.entropy_bits() / 8
    }
}

/// Concatenated 11-bit indices, or `None` if any word is not in the list
fn words_to_binary_str<S: AsRef<str>>(words: &[S], wordlist: &Wordlist) -> Option<String> {
    let mut bits = String::with_capacity(words.len() * WORD_BIT_LEN);
    for word in words {
        let index = wordlist.index_of(word.as_ref())?;
        bits.push_str(&int_to_binary_str(index, WORD_BIT_LEN).ok()?);
    }
    Some(bits)
}

/// Split a mnemonic bit string into entropy bytes and checksum bits
fn split_entropy(bits: &str, count: Bip39WordCount) -> DeriveResult<(Zeroizing<Vec<u8>>, &str)> {
    let (entropy_bits, checksum_bits) = bits.split_at(count.entropy_bits());
    let entropy = Zeroizing::new(binary_str_to_bytes(entropy_bits, count.entropy_bytes())?);
    Ok((entropy, checksum_bits))
}

/// First `len` bits of SHA-256(entropy)
fn checksum_bits(entropy: &[u8], len: usize) -> String {
    let digest = sha256(entropy);
    let mut bits = bytes_to_binary_str(&digest);
    bits.truncate(len);
    bits
}

/// Check a mnemonic's embedded checksum.
///
/// Never fails: a wrong length or a word outside the list is simply an
/// invalid mnemonic.
pub fn validate_checksum<S: AsRef<str>>(
    words: &[S],
    word_count: Bip39WordCount,
    wordlist: &Wordlist,
) -> bool {
    if words.len() != word_count.word_count() {
        return false;
    }
    let Some(bits) = words_to_binary_str(words, wordlist) else {
        return false;
    };
    match split_entropy(&bits, word_count) {
        Ok((entropy, checksum)) => checksum_bits(&entropy, word_count.checksum_len()) == checksum,
        Err(_) => false,
    }
}

/// `validate_checksum` with the word count taken from the input
pub fn is_valid_mnemonic<S: AsRef<str>>(words: &[S], wordlist: &Wordlist) -> bool {
    Bip39WordCount::from_count(words.len())
        .map(|count| validate_checksum(words, count, wordlist))
        .unwrap_or(false)
}

/// Recover the entropy bytes of a valid mnemonic
pub fn mnemonic_to_entropy<S: AsRef<str>>(
    words: &[S],
    wordlist: &Wordlist,
) -> DeriveResult<Zeroizing<Vec<u8>>> {
    let count = Bip39WordCount::from_count(words.len())?;
    if let Some(unknown) = words.iter().find(|w| !wordlist.contains(w.as_ref())) {
        return Err(DeriveError::unknown_word(unknown.as_ref()));
    }
    let bits = words_to_binary_str(words, wordlist)
        .ok_or_else(|| DeriveError::internal("Word index out of range"))?;

    let (entropy, checksum) = split_entropy(&bits, count)?;
    if checksum_bits(&entropy, count.checksum_len()) != checksum {
        return Err(DeriveError::invalid_checksum("BIP39 checksum mismatch"));
    }
    Ok(entropy)
}

/// Unicode NFKD normalization, applied to mnemonics and passphrases
pub fn normalize_nfkd(input: &str) -> String {
    input.nfkd().collect()
}

/// PBKDF2-HMAC-SHA512(mnemonic, "mnemonic" || passphrase, 2048) on raw bytes
pub fn derive_seed(mnemonic: &[u8], passphrase: &[u8]) -> DeriveResult<Zeroizing<[u8; SEED_LEN]>> {
    let mut salt = Zeroizing::new(Vec::with_capacity(SALT_PREFIX.len() + passphrase.len()));
    salt.extend_from_slice(SALT_PREFIX.as_bytes());
    salt.extend_from_slice(passphrase);

    let derived = pbkdf2_hmac_sha512(mnemonic, &salt, BIP39_PBKDF2_ROUNDS, SEED_LEN)?;
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    seed.copy_from_slice(&derived);
    Ok(seed)
}

/// BIP39 seed for a mnemonic phrase, with NFKD applied to both inputs
pub fn mnemonic_to_seed(mnemonic: &str, passphrase: &str) -> DeriveResult<Zeroizing<[u8; SEED_LEN]>> {
    let mnemonic = Zeroizing::new(normalize_nfkd(mnemonic));
    let passphrase = Zeroizing::new(normalize_nfkd(passphrase));
    derive_seed(mnemonic.as_bytes(), passphrase.as_bytes())
}
