//! 256-bit scalar arithmetic over the secp256k1 group order.
//!
//! Everything here runs at full 256-bit precision on four u64 limbs.
//! Truncating any intermediate to machine width silently restricts the
//! search to a tiny wrong subspace, so there are no `as u64` shortcuts
//! anywhere in the arithmetic.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rand::RngCore;

use crate::error::HuntError;

/// secp256k1 group order N, little-endian u64 limbs.
const ORDER_LIMBS: [u64; 4] = [
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// 2^256 − N, used to finish a reduction when an addition carries out.
const NEG_ORDER_LIMBS: [u64; 4] = [
    0x402D_A173_2FC9_BEBF,
    0x4551_2319_50B7_5FC4,
    0x0000_0000_0000_0001,
    0x0000_0000_0000_0000,
];

/// 256-bit unsigned integer, little-endian u64 limbs.
///
/// Used for private key candidates, random bases, and delta magnitudes.
/// The type itself can hold any 256-bit value; only values in `(0, N)`
/// are valid private keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scalar([u64; 4]);

impl Scalar {
    pub const ZERO: Self = Scalar([0; 4]);
    pub const ONE: Self = Scalar([1, 0, 0, 0]);

    /// The curve order N.
    pub const ORDER: Self = Scalar(ORDER_LIMBS);

    #[inline]
    pub const fn from_u64(v: u64) -> Self {
        Scalar([v, 0, 0, 0])
    }

    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            limbs[3 - i] = u64::from_be_bytes(word);
        }
        Scalar(limbs)
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&self.0[3 - i].to_be_bytes());
        }
        bytes
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 4]
    }

    /// True iff `0 < self < N`.
    #[inline]
    pub fn is_valid_private_key(&self) -> bool {
        !self.is_zero() && *self < Self::ORDER
    }

    /// Draw a fresh uniform scalar in `[1, N)` by rejection sampling.
    ///
    /// The rejection rate is ~2^-128, so this loops more than once only in
    /// theory.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let s = Self::from_be_bytes(&bytes);
            if s.is_valid_private_key() {
                return s;
            }
        }
    }

    /// `(self − delta) mod N`. `self` must already be below N; the result
    /// always is.
    pub fn sub_mod(&self, delta: &Delta) -> Scalar {
        debug_assert!(*self < Self::ORDER);
        // Magnitude is below 2^256 < 2N, so one conditional subtract
        // reduces it.
        let mut mag = delta.magnitude;
        if mag >= Self::ORDER {
            mag = mag.sub_raw(&Self::ORDER);
        }
        if delta.negative {
            self.add_mod(&mag)
        } else if *self >= mag {
            self.sub_raw(&mag)
        } else {
            // Borrow N once: self + (N − mag) stays below N.
            Self::ORDER.sub_raw(&mag).add_raw(self).0
        }
    }

    /// `(self + offset) mod N` for a small window offset. `self` must be
    /// below N.
    pub fn add_offset_mod(&self, offset: u64) -> Scalar {
        debug_assert!(*self < Self::ORDER);
        let (sum, carry) = self.add_raw(&Scalar::from_u64(offset));
        debug_assert!(!carry);
        if sum >= Self::ORDER {
            sum.sub_raw(&Self::ORDER)
        } else {
            sum
        }
    }

    /// Modular addition of two scalars already reduced below N.
    fn add_mod(&self, rhs: &Scalar) -> Scalar {
        let (sum, carry) = self.add_raw(rhs);
        if carry {
            // True sum is sum + 2^256; subtracting N equals adding 2^256 − N.
            sum.add_raw(&Scalar(NEG_ORDER_LIMBS)).0
        } else if sum >= Self::ORDER {
            sum.sub_raw(&Self::ORDER)
        } else {
            sum
        }
    }

    fn add_raw(&self, rhs: &Scalar) -> (Scalar, bool) {
        let mut limbs = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let sum = self.0[i] as u128 + rhs.0[i] as u128 + carry as u128;
            limbs[i] = sum as u64;
            carry = (sum >> 64) as u64;
        }
        (Scalar(limbs), carry != 0)
    }

    /// Raw subtraction; caller guarantees `self >= rhs`.
    fn sub_raw(&self, rhs: &Scalar) -> Scalar {
        debug_assert!(*self >= *rhs);
        let mut limbs = [0u64; 4];
        let mut borrow = 0u64;
        for i in 0..4 {
            let (diff, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (diff, b2) = diff.overflowing_sub(borrow);
            limbs[i] = diff;
            borrow = (b1 || b2) as u64;
        }
        Scalar(limbs)
    }

    /// `self * 10 + digit`, None on 256-bit overflow. Decimal parsing only.
    fn mul10_add(&self, digit: u64) -> Option<Scalar> {
        let mut limbs = [0u64; 4];
        let mut carry = digit as u128;
        for i in 0..4 {
            let v = self.0[i] as u128 * 10 + carry;
            limbs[i] = v as u64;
            carry = v >> 64;
        }
        if carry == 0 {
            Some(Scalar(limbs))
        } else {
            None
        }
    }

    /// Divide by 10, returning quotient and remainder. Decimal printing only.
    fn div_rem_10(&self) -> (Scalar, u64) {
        let mut limbs = [0u64; 4];
        let mut rem = 0u128;
        for i in (0..4).rev() {
            let cur = (rem << 64) | self.0[i] as u128;
            limbs[i] = (cur / 10) as u64;
            rem = cur % 10;
        }
        (Scalar(limbs), rem as u64)
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Scalar {
    /// Decimal, matching the hit file and delta file encodings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut digits = Vec::with_capacity(78);
        let mut cur = *self;
        while !cur.is_zero() {
            let (q, r) = cur.div_rem_10();
            digits.push(b'0' + r as u8);
            cur = q;
        }
        digits.reverse();
        // Digits are ASCII by construction.
        f.write_str(std::str::from_utf8(&digits).expect("ascii digits"))
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x{})", hex::encode(self.to_be_bytes()))
    }
}

impl FromStr for Scalar {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(HuntError::InvalidScalar(s.to_string()));
        }
        let mut value = Scalar::ZERO;
        for c in s.bytes() {
            if !c.is_ascii_digit() {
                return Err(HuntError::InvalidScalar(s.to_string()));
            }
            value = value
                .mul10_add((c - b'0') as u64)
                .ok_or_else(|| HuntError::InvalidScalar(s.to_string()))?;
        }
        Ok(value)
    }
}

/// A signed offset subtracted from a sampled base key.
///
/// Deltas come from the precomputed delta file and can carry the full
/// 256-bit magnitude in either direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Delta {
    negative: bool,
    magnitude: Scalar,
}

impl Delta {
    pub fn positive(magnitude: Scalar) -> Self {
        Delta {
            negative: false,
            magnitude,
        }
    }

    pub fn negative(magnitude: Scalar) -> Self {
        Delta {
            negative: !magnitude.is_zero(),
            magnitude,
        }
    }

    pub fn from_i64(v: i64) -> Self {
        if v < 0 {
            Delta::negative(Scalar::from_u64(v.unsigned_abs()))
        } else {
            Delta::positive(Scalar::from_u64(v as u64))
        }
    }

    /// Same magnitude, opposite sign.
    pub fn negated(&self) -> Self {
        Delta {
            negative: !self.negative && !self.magnitude.is_zero(),
            magnitude: self.magnitude,
        }
    }
}

impl FromStr for Delta {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('-') {
            Some(rest) => Ok(Delta::negative(rest.parse()?)),
            None => Ok(Delta::positive(s.parse()?)),
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        self.magnitude.fmt(f)
    }
}
