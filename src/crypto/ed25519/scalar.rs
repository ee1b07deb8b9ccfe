//! Scalars modulo the group order l

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigUint;
use num_traits::Zero;

use super::{ENCODED_LEN, L};
use crate::crypto::curves::CurveError;

/// An integer reduced mod l
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Scalar(BigUint);

impl Scalar {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn from_u64(v: u64) -> Self {
        Self(BigUint::from(v) % &*L)
    }

    /// Little-endian bytes of any length, reduced mod l
    pub fn from_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_le(bytes) % &*L)
    }

    /// Exactly 32 little-endian bytes, reduced mod l
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != ENCODED_LEN {
            return Err(CurveError::InvalidScalarLength(bytes.len()));
        }
        Ok(Self::from_bytes_mod_order(bytes))
    }

    /// 32-byte little-endian encoding
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        let mut out = [0u8; ENCODED_LEN];
        let le = self.0.to_bytes_le();
        out[..le.len()].copy_from_slice(&le);
        out
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Inverse via Fermat, s^(l-2). Zero has no inverse.
    pub fn invert(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::InvalidPrivateKey("zero scalar has no inverse".into()));
        }
        Ok(Self(self.0.modpow(&(&*L - 2u32), &L)))
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", hex::encode(self.to_bytes()))
    }
}

impl<'a> Add<&'a Scalar> for &'a Scalar {
    type Output = Scalar;

    fn add(self, rhs: &'a Scalar) -> Scalar {
        Scalar((&self.0 + &rhs.0) % &*L)
    }
}

impl<'a> Sub<&'a Scalar> for &'a Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &'a Scalar) -> Scalar {
        Scalar((&self.0 + &*L - &rhs.0) % &*L)
    }
}

impl<'a> Mul<&'a Scalar> for &'a Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &'a Scalar) -> Scalar {
        Scalar((&self.0 * &rhs.0) % &*L)
    }
}

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        Scalar((&*L - &self.0) % &*L)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction_of_all_ones() {
        let s = Scalar::from_bytes_mod_order(&[0xff; 32]);
        assert_eq!(
            hex::encode(s.to_bytes()),
            "1c95988d7431ecd670cf7d73f45befc6feffffffffffffffffffffffffffff0f"
        );
    }

    #[test]
    fn test_group_order_reduces_to_zero() {
        let l_bytes = hex::decode("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010").unwrap();
        assert!(Scalar::from_slice(&l_bytes).unwrap().is_zero());
    }

    #[test]
    fn test_arithmetic_identities() {
        let a = Scalar::from_u64(7);
        let b = Scalar::from_u64(5);

        assert_eq!(&a + &b, Scalar::from_u64(12));
        assert_eq!(&a - &b, Scalar::from_u64(2));
        assert_eq!(&a * &b, Scalar::from_u64(35));
        assert_eq!(&(&b - &a) + &a, b);
        assert_eq!(&a + &(-&a), Scalar::zero());
        assert_eq!(-&Scalar::zero(), Scalar::zero());
    }

    #[test]
    fn test_invert() {
        let a = Scalar::from_u64(121666);
        let inv = a.invert().unwrap();
        assert_eq!(&a * &inv, Scalar::from_u64(1));
        assert!(Scalar::zero().invert().is_err());
    }

    #[test]
    fn test_from_slice_length() {
        assert!(Scalar::from_slice(&[0u8; 31]).is_err());
        assert!(Scalar::from_slice(&[0u8; 32]).is_ok());
    }
}
