//! PBKDF2-HMAC-SHA512 (RFC 8018)
//!
//! BIP39 stretches the mnemonic into a 64-byte seed with 2048 rounds of this
//! construction. Written out directly so every step of the block chaining is
//! visible and testable.

use hmac::Mac;
use zeroize::Zeroizing;

use crate::error::{DeriveError, DeriveResult};
use crate::utils::crypto::{hmac_sha512_keyed, HmacSha512};

/// Iteration count fixed by BIP39
pub const BIP39_PBKDF2_ROUNDS: u32 = 2048;

/// Output size of one PRF invocation
const PRF_OUTPUT_LEN: usize = 64;

/// Derive `dk_len` bytes from `password` and `salt`.
///
/// Each output block `T_i` is `U_1 ^ U_2 ^ ... ^ U_c` where
/// `U_1 = PRF(password, salt || INT(i))` and `U_j = PRF(password, U_{j-1})`.
pub fn pbkdf2_hmac_sha512(
    password: &[u8],
    salt: &[u8],
    rounds: u32,
    dk_len: usize,
) -> DeriveResult<Zeroizing<Vec<u8>>> {
    if rounds == 0 {
        return Err(DeriveError::invalid_input("PBKDF2 needs at least one round"));
    }
    if dk_len == 0 {
        return Err(DeriveError::invalid_input("PBKDF2 output length must be non-zero"));
    }

    // Key schedule once, clone per PRF call
    let prf = hmac_sha512_keyed(password)?;

    let blocks = dk_len.div_ceil(PRF_OUTPUT_LEN);
    let mut derived = Zeroizing::new(Vec::with_capacity(blocks * PRF_OUTPUT_LEN));

    for block_index in 1..=blocks as u32 {
        let block = derive_block(&prf, salt, rounds, block_index);
        derived.extend_from_slice(&block[..]);
    }

    derived.truncate(dk_len);
    Ok(derived)
}

fn derive_block(
    prf: &HmacSha512,
    salt: &[u8],
    rounds: u32,
    block_index: u32,
) -> Zeroizing<[u8; PRF_OUTPUT_LEN]> {
    let mut mac = prf.clone();
    mac.update(salt);
    mac.update(&block_index.to_be_bytes());

    let mut u = Zeroizing::new([0u8; PRF_OUTPUT_LEN]);
    u.copy_from_slice(&mac.finalize().into_bytes());
    let mut t = u.clone();

    for _ in 1..rounds {
        let mut mac = prf.clone();
        mac.update(&u[..]);
        u.copy_from_slice(&mac.finalize().into_bytes());

        for (acc, byte) in t.iter_mut().zip(u.iter()) {
            *acc ^= byte;
        }
    }

    t
}
