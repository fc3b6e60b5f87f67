//! Key derivation adapter over the k256 backend.
//!
//! Workers only see the `KeyDerivation` trait, so tests can substitute a
//! deterministic fake without touching the real curve arithmetic.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use thiserror::Error;

use crate::error::HuntError;
use crate::scalar::Scalar;
use crate::types::XCoordinate;

/// X-coordinate of the secp256k1 generator point, i.e. the public key of
/// private key 1. Used for the startup self-check.
const GENERATOR_X: [u8; 32] = [
    0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC,
    0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87, 0x0B, 0x07,
    0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9,
    0x59, 0xF2, 0x81, 0x5B, 0x16, 0xF8, 0x17, 0x98,
];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationError {
    /// Scalar is zero or not below the curve order.
    #[error("scalar outside (0, N)")]
    OutOfRange,

    /// The backend rejected a scalar that looked structurally valid.
    #[error("curve backend rejected scalar")]
    Backend,
}

/// Private key → public key X-coordinate.
pub trait KeyDerivation: Send + Sync {
    /// Derive the X-coordinate for `key`. Fails closed on structurally
    /// invalid scalars instead of panicking; the candidate stream should
    /// make that case unreachable.
    fn derive(&self, key: &Scalar) -> Result<XCoordinate, DerivationError>;
}

/// The real backend, wrapping `k256`.
pub struct Secp256k1Deriver {
    _priv: (),
}

impl Secp256k1Deriver {
    /// Construct the backend and verify it derives the generator point for
    /// private key 1. A failure here aborts startup before any worker runs.
    pub fn new() -> crate::error::Result<Self> {
        let deriver = Self { _priv: () };
        let x = deriver
            .derive(&Scalar::ONE)
            .map_err(|_| HuntError::BackendSelfCheck)?;
        if x.as_bytes() != &GENERATOR_X {
            return Err(HuntError::BackendSelfCheck);
        }
        Ok(deriver)
    }
}

impl KeyDerivation for Secp256k1Deriver {
    fn derive(&self, key: &Scalar) -> Result<XCoordinate, DerivationError> {
        if !key.is_valid_private_key() {
            return Err(DerivationError::OutOfRange);
        }
        let secret = SecretKey::from_slice(&key.to_be_bytes())
            .map_err(|_| DerivationError::Backend)?;
        let point = secret.public_key().to_encoded_point(false);
        let x = point.x().ok_or(DerivationError::Backend)?;
        Ok(XCoordinate::from_slice(x.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Delta;

    #[test]
    fn self_check_passes() {
        assert!(Secp256k1Deriver::new().is_ok());
    }

    #[test]
    fn derives_known_vectors() {
        let deriver = Secp256k1Deriver::new().unwrap();
        // 1·G
        assert_eq!(
            deriver.derive(&Scalar::ONE).unwrap().to_hex(),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        // 2·G
        assert_eq!(
            deriver.derive(&Scalar::from_u64(2)).unwrap().to_hex(),
            "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
        );
    }

    #[test]
    fn rejects_zero_without_panicking() {
        let deriver = Secp256k1Deriver::new().unwrap();
        assert_eq!(
            deriver.derive(&Scalar::ZERO),
            Err(DerivationError::OutOfRange)
        );
    }

    #[test]
    fn rejects_order_and_above() {
        let deriver = Secp256k1Deriver::new().unwrap();
        assert_eq!(
            deriver.derive(&Scalar::ORDER),
            Err(DerivationError::OutOfRange)
        );
        let mut above = Scalar::ORDER.to_be_bytes();
        above[31] += 1;
        assert_eq!(
            deriver.derive(&Scalar::from_be_bytes(&above)),
            Err(DerivationError::OutOfRange)
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let deriver = Secp256k1Deriver::new().unwrap();
        let key = Scalar::from_u64(123_456_789).sub_mod(&Delta::from_i64(-1));
        assert_eq!(deriver.derive(&key), deriver.derive(&key));
    }
}
