//! Mnemonic Wordlists
//!
//! Immutable word tables with index lookup and unique-prefix maps. The
//! tables are built once by the caller (`Wordlists::load`) and handed by
//! reference to everything that encodes or decodes words.

use std::collections::HashMap;

use crate::error::{DeriveError, DeriveResult};

/// Monero English wordlist, one word per line
const MONERO_ENGLISH: &str = include_str!("wordlists/monero_english.txt");

/// Unique prefix length of the BIP39 English list
pub const BIP39_PREFIX_LEN: usize = 4;

/// Unique prefix length of the Monero English list
pub const MONERO_PREFIX_LEN: usize = 3;

/// What to do when two words share a prefix at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixPolicy {
    /// Any collision makes the list invalid
    Strict,
    /// A later word takes over a shared prefix; the collision is logged
    LastWins,
}

/// An immutable, indexed word table
#[derive(Debug, Clone)]
pub struct Wordlist {
    name: &'static str,
    words: Vec<&'static str>,
    indices: HashMap<&'static str, u32>,
    prefix_len: usize,
    unique_prefixes: HashMap<&'static str, &'static str>,
    max_word_len: usize,
}

impl Wordlist {
    /// Build and validate a table.
    ///
    /// Words must be non-empty, lowercase ASCII and distinct.
    pub fn new(
        name: &'static str,
        words: Vec<&'static str>,
        prefix_len: usize,
        policy: PrefixPolicy,
    ) -> DeriveResult<Self> {
        if words.is_empty() {
            return Err(DeriveError::invalid_wordlist(format!("{} wordlist is empty", name)));
        }
        if prefix_len == 0 {
            return Err(DeriveError::invalid_wordlist("Prefix length must be non-zero"));
        }

        let mut indices = HashMap::with_capacity(words.len());
        let mut unique_prefixes = HashMap::with_capacity(words.len());
        let mut max_word_len = 0;

        for (i, word) in words.iter().copied().enumerate() {
            if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase()) {
                return Err(DeriveError::invalid_wordlist(format!(
                    "{} wordlist has invalid word '{}'",
                    name, word
                )));
            }
            if indices.insert(word, i as u32).is_some() {
                return Err(DeriveError::invalid_wordlist(format!(
                    "{} wordlist has duplicate word '{}'",
                    name, word
                )));
            }
            max_word_len = max_word_len.max(word.len());

            let prefix = truncate(word, prefix_len);
            if let Some(existing) = unique_prefixes.get(prefix) {
                match policy {
                    PrefixPolicy::Strict => {
                        return Err(DeriveError::invalid_wordlist(format!(
                            "{} wordlist prefix '{}' is shared by '{}' and '{}'",
                            name, prefix, existing, word
                        )));
                    }
                    PrefixPolicy::LastWins => {
                        crate::log_debug!(
                            "wordlist",
                            "Duplicate prefix, replacing earlier word",
                            list = name,
                            prefix = prefix,
                            kept = word,
                            dropped = existing,
                        );
                    }
                }
            }
            unique_prefixes.insert(prefix, word);
        }

        Ok(Self {
            name,
            words,
            indices,
            prefix_len,
            unique_prefixes,
            max_word_len,
        })
    }

    /// BIP39 English, 2048 words with 4-letter unique prefixes
    pub fn bip39_english() -> DeriveResult<Self> {
        let words = ::bip39::Language::English.word_list().to_vec();
        Self::new("bip39-english", words, BIP39_PREFIX_LEN, PrefixPolicy::Strict)
    }

    /// Monero English, 1626 words with 3-letter prefixes.
    ///
    /// `obtains` and `obtuse` share `obt`, which resolves to `obtuse`.
    pub fn monero_english() -> DeriveResult<Self> {
        let words = MONERO_ENGLISH.split_whitespace().collect();
        Self::new("monero-english", words, MONERO_PREFIX_LEN, PrefixPolicy::LastWins)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of words, the base of the Monero encoding
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[&'static str] {
        &self.words
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    pub fn word(&self, index: usize) -> Option<&'static str> {
        self.words.get(index).copied()
    }

    pub fn index_of(&self, word: &str) -> Option<u32> {
        self.indices.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.indices.contains_key(word)
    }

    /// The checksum/lookup prefix of `word` under this list's prefix length
    pub fn prefix_of<'w>(&self, word: &'w str) -> &'w str {
        truncate(word, self.prefix_len)
    }

    /// Full word owning `prefix`, if any
    pub fn word_for_prefix(&self, prefix: &str) -> Option<&'static str> {
        self.unique_prefixes.get(prefix).copied()
    }

    /// Resolve a typed entry to a list word.
    ///
    /// Accepts the full word, or anything starting with a unique prefix as
    /// long as it is consistent with the word it expands to.
    pub fn expand(&self, entry: &str) -> Option<&'static str> {
        let entry = entry.trim().to_lowercase();
        if let Some(&index) = self.indices.get(entry.as_str()) {
            return self.word(index as usize);
        }
        if entry.len() < self.prefix_len {
            return None;
        }
        let word = self.word_for_prefix(truncate(&entry, self.prefix_len))?;
        word.starts_with(entry.as_str()).then_some(word)
    }
}

/// At most `len` leading characters; words are ASCII so bytes are chars
fn truncate(word: &str, len: usize) -> &str {
    match word.char_indices().nth(len) {
        Some((end, _)) => &word[..end],
        None => word,
    }
}

/// The two tables a derivation session needs
#[derive(Debug, Clone)]
pub struct Wordlists {
    pub bip39: Wordlist,
    pub monero: Wordlist,
}

impl Wordlists {
    /// Build and validate both embedded tables
    pub fn load() -> DeriveResult<Self> {
        Ok(Self {
            bip39: Wordlist::bip39_english()?,
            monero: Wordlist::monero_english()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bip39_english_shape() {
        let wl = Wordlist::bip39_english().unwrap();
        assert_eq!(wl.len(), 2048);
        assert_eq!(wl.word(0), Some("abandon"));
        assert_eq!(wl.word(2047), Some("zoo"));
        assert_eq!(wl.index_of("about"), Some(3));
        assert_eq!(wl.prefix_len(), 4);
        assert_eq!(wl.max_word_len(), 8);
    }

    #[test]
    fn test_bip39_unique_prefix_invariant() {
        let wl = Wordlist::bip39_english().unwrap();
        for word in wl.words() {
            assert_eq!(wl.word_for_prefix(wl.prefix_of(word)), Some(*word));
        }
    }

    #[test]
    fn test_monero_english_shape() {
        let wl = Wordlist::monero_english().unwrap();
        assert_eq!(wl.len(), 1626);
        assert_eq!(wl.word(0), Some("abbey"));
        assert_eq!(wl.word(1625), Some("zoom"));
        assert_eq!(wl.index_of("almost"), Some(58));
        assert_eq!(wl.prefix_len(), 3);
    }

    #[test]
    fn test_monero_prefixes_resolve_except_known_collision() {
        let wl = Wordlist::monero_english().unwrap();
        let collisions: Vec<&str> = wl
            .words()
            .iter()
            .copied()
            .filter(|w| wl.word_for_prefix(wl.prefix_of(w)) != Some(*w))
            .collect();
        assert_eq!(collisions, vec!["obtains"]);
        assert_eq!(wl.word_for_prefix("obt"), Some("obtuse"));
        assert_eq!(wl.expand("obtains"), Some("obtains"));
        assert_eq!(wl.expand("obtu"), Some("obtuse"));
    }

    #[test]
    fn test_strict_policy_rejects_collisions() {
        let err = Wordlist::new("test", vec!["apple", "apply"], 4, PrefixPolicy::Strict).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidWordlist);
        let wl = Wordlist::new("test", vec!["apple", "apply"], 4, PrefixPolicy::LastWins).unwrap();
        assert_eq!(wl.word_for_prefix("appl"), Some("apply"));
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(Wordlist::new("test", vec![], 4, PrefixPolicy::Strict).is_err());
        assert!(Wordlist::new("test", vec!["one", "one"], 4, PrefixPolicy::Strict).is_err());
        assert!(Wordlist::new("test", vec!["One"], 4, PrefixPolicy::Strict).is_err());
    }

    #[test]
    fn test_expand() {
        let wl = Wordlist::bip39_english().unwrap();
        assert_eq!(wl.expand("abandon"), Some("abandon"));
        assert_eq!(wl.expand("aban"), Some("abandon"));
        assert_eq!(wl.expand("ABAND"), Some("abandon"));
        assert_eq!(wl.expand("zoo"), Some("zoo"));
        assert_eq!(wl.expand("abax"), None);
        assert_eq!(wl.expand("abandonx"), None);
        assert_eq!(wl.expand("ab"), None);
    }

    #[test]
    fn test_short_words_are_their_own_prefix() {
        let wl = Wordlist::bip39_english().unwrap();
        assert_eq!(wl.prefix_of("zoo"), "zoo");
        assert_eq!(wl.prefix_of("abandon"), "aban");
    }
}
