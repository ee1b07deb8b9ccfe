//! Ed25519 Arithmetic
//!
//! Minimal twisted Edwards arithmetic over GF(2^255 - 19) on arbitrary
//! precision integers:
//!
//! - `field`: reduction, subtraction, inversion and square roots mod q
//! - `Scalar`: integers mod the group order l
//! - `EdPoint`: extended-coordinate points, encode/decode, add, multiply
//!
//! Nothing here is constant time. It only ever handles keys for a local,
//! offline derivation and must match the reference formulas bit for bit.

pub mod field;
pub mod point;
pub mod scalar;

pub use point::{scalarmult_base, EdPoint};
pub use scalar::Scalar;

use num_bigint::BigUint;
use num_traits::One;

/// Encoded size of both scalars and points
pub const ENCODED_LEN: usize = 32;

lazy_static::lazy_static! {
    /// Field prime q = 2^255 - 19
    pub static ref Q: BigUint = (BigUint::one() << 255u32) - 19u32;

    /// Group order l = 2^252 + 27742317777372353535851937790883648493
    pub static ref L: BigUint =
        (BigUint::one() << 252u32) + BigUint::from(0x14def9dea2f79cd65812631a5cf5d3edu128);

    /// Curve constant d = -121665 / 121666
    pub static ref D: BigUint =
        field::neg(&field::mul(&BigUint::from(121665u32), &field::inv(&BigUint::from(121666u32))));

    /// Square root of -1, 2^((q-1)/4)
    pub static ref SQRT_M1: BigUint =
        BigUint::from(2u32).modpow(&((&*Q - 1u32) >> 2u32), &Q);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_hex(v: &BigUint) -> String {
        let mut bytes = v.to_bytes_le();
        bytes.resize(32, 0);
        hex::encode(bytes)
    }

    #[test]
    fn test_constants() {
        assert_eq!(le_hex(&Q), "edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert_eq!(le_hex(&L), "edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010");
        assert_eq!(le_hex(&D), "a3785913ca4deb75abd841414d0a700098e879777940c78c73fe6f2bee6c0352");
        assert_eq!(le_hex(&SQRT_M1), "b0a00e4a271beec478e42fad0618432fa7d7fb3d99004d2b0bdfc14f8024832b");
    }

    #[test]
    fn test_sqrt_m1_squares_to_minus_one() {
        let sq = field::mul(&SQRT_M1, &SQRT_M1);
        assert_eq!(sq, &*Q - 1u32);
    }
}
