//! Curve points in extended coordinates
//!
//! A point `(X, Y, Z, T)` represents the affine point `(X/Z, Y/Z)` with
//! `T = XY/Z`. The addition formula is the unified one from the Ed25519
//! reference code, so doubling is just `P + P`.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::field;
use super::scalar::Scalar;
use super::{D, ENCODED_LEN};
use crate::crypto::curves::CurveError;

#[derive(Clone)]
pub struct EdPoint {
    x: BigUint,
    y: BigUint,
    z: BigUint,
    t: BigUint,
}

lazy_static::lazy_static! {
    static ref BASE: EdPoint = {
        let y = field::mul(&BigUint::from(4u32), &field::inv(&BigUint::from(5u32)));
        // 4/5 is a valid y coordinate, so the root always exists
        let x = field::xrecover(&y).unwrap_or_default();
        EdPoint::from_affine(x, y)
    };
}

impl EdPoint {
    /// The neutral element (0, 1)
    pub fn identity() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::one(),
            z: BigUint::one(),
            t: BigUint::zero(),
        }
    }

    /// The standard base point B with y = 4/5
    pub fn base() -> Self {
        BASE.clone()
    }

    fn from_affine(x: BigUint, y: BigUint) -> Self {
        let t = field::mul(&x, &y);
        Self {
            x,
            y,
            z: BigUint::one(),
            t,
        }
    }

    /// Affine coordinates (x, y)
    pub fn to_affine(&self) -> (BigUint, BigUint) {
        let zi = field::inv(&self.z);
        (field::mul(&self.x, &zi), field::mul(&self.y, &zi))
    }

    /// Extended-coordinate curve equation plus the `T = XY/Z` invariant.
    pub fn is_on_curve(&self) -> bool {
        if field::reduce(&self.z).is_zero() {
            return false;
        }
        let xx = field::mul(&self.x, &self.x);
        let yy = field::mul(&self.y, &self.y);
        let zz = field::mul(&self.z, &self.z);
        let tt = field::mul(&self.t, &self.t);

        // -x^2 + y^2 = z^2 + d t^2
        let lhs = field::sub(&yy, &xx);
        let rhs = field::add(&zz, &field::mul(&D, &tt));
        let consistent_t = field::mul(&self.x, &self.y) == field::mul(&self.z, &self.t);

        lhs == rhs && consistent_t
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn add(&self, other: &EdPoint) -> EdPoint {
        let a = field::mul(&field::sub(&self.y, &self.x), &field::sub(&other.y, &other.x));
        let b = field::mul(&field::add(&self.y, &self.x), &field::add(&other.y, &other.x));
        let c = field::mul(&field::mul(&self.t, &BigUint::from(2u32)), &field::mul(&D, &other.t));
        let dd = field::mul(&field::mul(&self.z, &BigUint::from(2u32)), &other.z);

        let e = field::sub(&b, &a);
        let f = field::sub(&dd, &c);
        let g = field::add(&dd, &c);
        let h = field::add(&b, &a);

        EdPoint {
            x: field::mul(&e, &f),
            y: field::mul(&g, &h),
            z: field::mul(&f, &g),
            t: field::mul(&e, &h),
        }
    }

    pub fn double(&self) -> EdPoint {
        self.add(self)
    }

    pub fn negate(&self) -> EdPoint {
        EdPoint {
            x: field::neg(&self.x),
            y: self.y.clone(),
            z: self.z.clone(),
            t: field::neg(&self.t),
        }
    }

    pub fn sub(&self, other: &EdPoint) -> EdPoint {
        self.add(&other.negate())
    }

    /// Double-and-add, least significant bit first
    pub fn mul(&self, scalar: &Scalar) -> EdPoint {
        self.mul_biguint(scalar.as_biguint())
    }

    /// Multiply by an unreduced integer
    pub fn mul_biguint(&self, e: &BigUint) -> EdPoint {
        let mut result = EdPoint::identity();
        let mut addend = self.clone();
        for i in 0..e.bits() {
            if e.bit(i) {
                result = result.add(&addend);
            }
            addend = addend.double();
        }
        result
    }

    /// y with the sign of x in bit 255, little-endian
    pub fn encode(&self) -> [u8; ENCODED_LEN] {
        let (x, y) = self.to_affine();
        let mut value = y;
        if field::is_odd(&x) {
            value.set_bit(255, true);
        }
        let mut out = [0u8; ENCODED_LEN];
        let le = value.to_bytes_le();
        out[..le.len()].copy_from_slice(&le);
        out
    }

    /// Inverse of `encode`, rejecting anything that is not a curve point
    pub fn decode(bytes: &[u8]) -> Result<EdPoint, CurveError> {
        if bytes.len() != ENCODED_LEN {
            return Err(CurveError::InvalidPointLength(bytes.len()));
        }
        let mut value = BigUint::from_bytes_le(bytes);
        let sign = value.bit(255);
        value.set_bit(255, false);
        let y = value;

        let mut x = field::xrecover(&y).ok_or(CurveError::NotOnCurve)?;
        if x.is_zero() && sign {
            return Err(CurveError::InvalidPointEncoding("x = 0 with sign bit set".into()));
        }
        if field::is_odd(&x) != sign {
            x = field::neg(&x);
        }

        let point = EdPoint::from_affine(x, field::reduce(&y));
        if !point.is_on_curve() {
            return Err(CurveError::NotOnCurve);
        }
        Ok(point)
    }
}

/// B * scalar
pub fn scalarmult_base(scalar: &Scalar) -> EdPoint {
    BASE.mul(scalar)
}

impl PartialEq for EdPoint {
    /// Projective equality: X1 Z2 = X2 Z1 and Y1 Z2 = Y2 Z1
    fn eq(&self, other: &Self) -> bool {
        field::mul(&self.x, &other.z) == field::mul(&other.x, &self.z)
            && field::mul(&self.y, &other.z) == field::mul(&other.y, &self.z)
    }
}

impl Eq for EdPoint {}

impl fmt::Debug for EdPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdPoint({})", hex::encode(self.encode()))
    }
}
