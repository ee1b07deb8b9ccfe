//! Monero Mnemonic Codec
//!
//! Every 4-byte chunk of the master seed, read as a little-endian `u32`,
//! becomes three words from the Monero table:
//!
//! ```text
//! w1 = x % n
//! w2 = (x / n + w1) % n
//! w3 = (x / n / n + w2) % n
//! ```
//!
//! An optional trailing checksum word repeats the word at
//! `crc32(prefixes) % word_count`, where `prefixes` is the concatenation of
//! every word cut to the table's unique prefix length.

use zeroize::Zeroizing;

use crate::error::{DeriveError, DeriveResult};
use crate::utils::bits::chunk_to_u32_le;
use crate::utils::crypto::crc32;
use crate::wallet::wordlist::Wordlist;

/// Bytes per word triplet
const CHUNK_LEN: usize = 4;

/// Word counts at which the checksum switches from 12 to 24 words
const COMPACT_WORDS: usize = 12;
const STANDARD_WORDS: usize = 24;

/// Encode 16 or 32 bytes of entropy into 12 or 24 words, plus a checksum
/// word when `checksum` is set.
pub fn encode(entropy: &[u8], checksum: bool, wordlist: &Wordlist) -> DeriveResult<Vec<&'static str>> {
    if entropy.len() != 16 && entropy.len() != 32 {
        return Err(DeriveError::invalid_entropy_length(entropy.len()));
    }

    let n = wordlist.len() as u64;
    let mut words = Vec::with_capacity(entropy.len() / CHUNK_LEN * 3 + 1);

    for chunk in entropy.chunks(CHUNK_LEN) {
        let x = chunk_to_u32_le(chunk)? as u64;
        let w1 = x % n;
        let w2 = (x / n + w1) % n;
        let w3 = (x / n / n + w2) % n;
        for index in [w1, w2, w3] {
            let word = wordlist
                .word(index as usize)
                .ok_or_else(|| DeriveError::internal(format!("Word index {} out of range", index)))?;
            words.push(word);
        }
    }

    if checksum {
        let index = checksum_index(&words, wordlist);
        words.push(words[index]);
    }

    Ok(words)
}

fn checksum_index<S: AsRef<str>>(words: &[S], wordlist: &Wordlist) -> usize {
    let prefixes: String = words.iter().map(|w| wordlist.prefix_of(w.as_ref())).collect();
    crc32(prefixes.as_bytes()) as usize % words.len()
}

/// The checksum word for a phrase.
///
/// Phrases longer than 13 words are checksummed over their first 24 words,
/// anything shorter over the first 12. Every checksummed word must be in
/// the list.
pub fn get_checksum<S: AsRef<str>>(words: &[S], wordlist: &Wordlist) -> DeriveResult<String> {
    if words.len() < COMPACT_WORDS {
        return Err(DeriveError::invalid_word_count(words.len()));
    }
    let take = if words.len() > COMPACT_WORDS + 1 {
        STANDARD_WORDS
    } else {
        COMPACT_WORDS
    };
    let body = &words[..take.min(words.len())];
    if let Some(unknown) = body.iter().map(|w| w.as_ref()).find(|w| !wordlist.contains(w)) {
        return Err(DeriveError::unknown_word(unknown));
    }
    Ok(body[checksum_index(body, wordlist)].as_ref().to_string())
}

/// Whether the trailing word of a 13 or 25 word phrase is its checksum
pub fn verify_checksum<S: AsRef<str>>(words: &[S], wordlist: &Wordlist) -> DeriveResult<bool> {
    match words.len() {
        13 | 25 => {}
        other => return Err(DeriveError::invalid_word_count(other)),
    }
    let expected = get_checksum(words, wordlist)?;
    let typed = words[words.len() - 1].as_ref();
    // The checksum word may be typed as its unique prefix
    let given = wordlist
        .expand(typed)
        .ok_or_else(|| DeriveError::unknown_word(typed))?;
    Ok(wordlist.prefix_of(&expected) == wordlist.prefix_of(given))
}

/// Decode a 12/24 word phrase, or a 13/25 word phrase whose last word is a
/// checksum, back into entropy bytes.
pub fn decode<S: AsRef<str>>(words: &[S], wordlist: &Wordlist) -> DeriveResult<Zeroizing<Vec<u8>>> {
    let body = match words.len() {
        12 | 24 => words,
        13 | 25 => {
            if !verify_checksum(words, wordlist)? {
                return Err(DeriveError::invalid_checksum("Monero checksum word mismatch"));
            }
            &words[..words.len() - 1]
        }
        other => return Err(DeriveError::invalid_word_count(other)),
    };

    let n = wordlist.len() as u64;
    let mut entropy = Zeroizing::new(Vec::with_capacity(body.len() / 3 * CHUNK_LEN));

    for triplet in body.chunks(3) {
        let mut indices = [0u64; 3];
        for (slot, word) in indices.iter_mut().zip(triplet) {
            let word = word.as_ref();
            *slot = wordlist
                .index_of(word)
                .ok_or_else(|| DeriveError::unknown_word(word))? as u64;
        }
        let [w1, w2, w3] = indices;

        let x = w1 + n * ((n - w1 + w2) % n) + n * n * ((n - w2 + w3) % n);
        let x = u32::try_from(x)
            .map_err(|_| DeriveError::invalid_input(format!("Word triplet value {} overflows 32 bits", x)))?;
        entropy.extend_from_slice(&x.to_le_bytes());
    }

    Ok(entropy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const PHRASE_16: &str =
        "amaze buffet cake entrance symptoms tiger lamb maze nestle python dusted faxed faxed";
    const PHRASE_32: &str = "amaze buffet cake entrance symptoms tiger lamb maze nestle python \
        dusted faxed update vague zinger boxes ornament renting glass gained island nabbing \
        afield calamity boxes";

    fn wordlist() -> Wordlist {
        Wordlist::monero_english().unwrap()
    }

    fn counting(len: u8) -> Vec<u8> {
        (0..len).collect()
    }

    #[test]
    fn test_encode_known_phrases() {
        let wl = wordlist();
        assert_eq!(encode(&counting(16), true, &wl).unwrap().join(" "), PHRASE_16);
        assert_eq!(encode(&counting(32), true, &wl).unwrap().join(" "), PHRASE_32);

        let plain = encode(&counting(16), false, &wl).unwrap();
        assert_eq!(plain.len(), 12);
        assert_eq!(plain.last(), Some(&"faxed"));
    }

    #[test]
    fn test_encode_extremes() {
        let wl = wordlist();
        let zeros = encode(&[0u8; 32], true, &wl).unwrap();
        assert_eq!(zeros.len(), 25);
        assert!(zeros.iter().all(|w| *w == "abbey"));

        let ones = encode(&[0xffu8; 32], true, &wl).unwrap();
        let mut expected = "foamy solved soggy ".repeat(8);
        expected.push_str("soggy");
        assert_eq!(ones.join(" "), expected);
    }

    #[test]
    fn test_encode_rejects_bad_lengths() {
        let wl = wordlist();
        for len in [0usize, 4, 15, 20, 33, 64] {
            let err = encode(&vec![0u8; len], true, &wl).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidEntropyLength, "{}", len);
        }
    }

    #[test]
    fn test_decode_with_and_without_checksum() {
        let wl = wordlist();
        let words: Vec<&str> = PHRASE_32.split_whitespace().collect();
        assert_eq!(*decode(&words, &wl).unwrap(), counting(32));
        assert_eq!(*decode(&words[..24], &wl).unwrap(), counting(32));

        let words: Vec<&str> = PHRASE_16.split_whitespace().collect();
        assert_eq!(*decode(&words, &wl).unwrap(), counting(16));
    }

    #[test]
    fn test_decode_rejects_wrong_checksum() {
        let wl = wordlist();
        let mut words: Vec<&str> = PHRASE_16.split_whitespace().collect();
        words[12] = "abbey";
        let err = decode(&words, &wl).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidChecksum);
        assert!(!verify_checksum(&words, &wl).unwrap());
    }

    #[test]
    fn test_decode_unknown_word() {
        let wl = wordlist();
        let mut words: Vec<&str> = PHRASE_32.split_whitespace().take(24).collect();
        words[5] = "bitcoin";
        let err = decode(&words, &wl).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownWord);
        assert_eq!(err.details.as_deref(), Some("bitcoin"));
    }

    #[test]
    fn test_decode_unknown_word_before_checksum() {
        let wl = wordlist();
        let mut words: Vec<&str> = PHRASE_32.split_whitespace().collect();
        words[5] = "bitcoin";
        let err = decode(&words, &wl).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownWord);
        assert_eq!(err.details.as_deref(), Some("bitcoin"));

        let mut words: Vec<&str> = PHRASE_16.split_whitespace().collect();
        words[12] = "bitcoin";
        let err = decode(&words, &wl).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownWord);
    }

    #[test]
    fn test_get_checksum_rejects_unknown_words() {
        let wl = wordlist();
        let err = get_checksum(&["notaword"; 12], &wl).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownWord);
        assert_eq!(err.details.as_deref(), Some("notaword"));
    }

    #[test]
    fn test_decode_rejects_overflowing_triplet() {
        let wl = wordlist();
        let mut words = vec!["abbey"; 12];
        words[2] = "zoom";
        let err = decode(&words, &wl).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_decode_word_counts() {
        let wl = wordlist();
        for len in [0usize, 11, 14, 23, 26] {
            let words = vec!["abbey"; len];
            let err = decode(&words, &wl).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidWordCount, "{}", len);
        }
    }

    #[test]
    fn test_get_checksum_selection() {
        let wl = wordlist();
        let words: Vec<&str> = PHRASE_32.split_whitespace().collect();
        assert_eq!(get_checksum(&words, &wl).unwrap(), "boxes");
        assert_eq!(get_checksum(&words[..24], &wl).unwrap(), "boxes");

        let words: Vec<&str> = PHRASE_16.split_whitespace().collect();
        assert_eq!(get_checksum(&words, &wl).unwrap(), "faxed");
        assert_eq!(get_checksum(&words[..12], &wl).unwrap(), "faxed");

        let err = get_checksum(&words[..11], &wl).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidWordCount);
    }

    #[test]
    fn test_checksum_compares_prefixes() {
        let wl = wordlist();
        let mut words: Vec<String> = PHRASE_16.split_whitespace().map(String::from).collect();
        words[12] = "fax".to_string();
        assert!(verify_checksum(&words, &wl).unwrap());
    }
}
