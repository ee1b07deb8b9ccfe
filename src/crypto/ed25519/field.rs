//! Arithmetic in GF(q)
//!
//! Every function returns a fully reduced value in `[0, q)`.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

use super::{D, Q, SQRT_M1};

pub fn reduce(a: &BigUint) -> BigUint {
    a % &*Q
}

pub fn add(a: &BigUint, b: &BigUint) -> BigUint {
    (a + b) % &*Q
}

pub fn sub(a: &BigUint, b: &BigUint) -> BigUint {
    (reduce(a) + &*Q - reduce(b)) % &*Q
}

pub fn mul(a: &BigUint, b: &BigUint) -> BigUint {
    (a * b) % &*Q
}

pub fn neg(a: &BigUint) -> BigUint {
    (&*Q - reduce(a)) % &*Q
}

/// Multiplicative inverse via Fermat, a^(q-2). Zero maps to zero.
pub fn inv(a: &BigUint) -> BigUint {
    a.modpow(&(&*Q - 2u32), &Q)
}

pub fn is_odd(a: &BigUint) -> bool {
    Integer::is_odd(a)
}

/// Recover x from y on the curve, choosing the even root.
///
/// Returns `None` when `(y^2 - 1) / (d y^2 + 1)` has no square root, which
/// means no point with this y exists.
pub fn xrecover(y: &BigUint) -> Option<BigUint> {
    let yy = mul(y, y);
    let xx = mul(&sub(&yy, &BigUint::from(1u32)), &inv(&add(&mul(&D, &yy), &BigUint::from(1u32))));

    let exp = (&*Q + 3u32) >> 3u32;
    let mut x = xx.modpow(&exp, &Q);

    if !sub(&mul(&x, &x), &xx).is_zero() {
        x = mul(&x, &SQRT_M1);
    }
    if !sub(&mul(&x, &x), &xx).is_zero() {
        return None;
    }

    if is_odd(&x) {
        x = neg(&x);
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_wraps() {
        let one = BigUint::from(1u32);
        let two = BigUint::from(2u32);
        assert_eq!(sub(&one, &two), &*Q - 1u32);
        assert_eq!(add(&sub(&one, &two), &two), one);
    }

    #[test]
    fn test_inverse() {
        let a = BigUint::from(121666u32);
        assert_eq!(mul(&a, &inv(&a)), BigUint::from(1u32));
    }

    #[test]
    fn test_xrecover_base_point() {
        // y = 4/5
        let y = mul(&BigUint::from(4u32), &inv(&BigUint::from(5u32)));
        let x = xrecover(&y).unwrap();
        let mut bytes = x.to_bytes_le();
        bytes.resize(32, 0);
        assert_eq!(
            hex::encode(bytes),
            "1ad5258f602d56c9b2a7259560c72c695cdcd6fd31e2a4c0fe536ecdd3366921"
        );
    }

    #[test]
    fn test_xrecover_rejects_non_residue() {
        // y = 2 gives no point on the curve
        assert!(xrecover(&BigUint::from(2u32)).is_none());
    }
}
