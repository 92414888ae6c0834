//! Elliptic-curve digital signatures.

use crate::arithmetic::ModInt;
use crate::curve::{CurveGroup, Point};
use crate::error::{EccError, Result};
use crate::field::FieldElement;
use crate::keys::{DomainParameters, KeyPair};
use crate::primitives::{MessageHash, RandomSource, Sha256Hash};
use log::debug;
use num_bigint::{BigInt, BigUint};
use std::fmt;

/// Tunables for signing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigningConfig {
    /// Nonces drawn before giving up with [`EccError::SigningFailed`].
    pub max_nonce_attempts: u32,
}

impl Default for SigningConfig {
    fn default() -> Self {
        SigningConfig {
            max_nonce_attempts: 64,
        }
    }
}

/// A signature `(r, s)` with both components in `[1, n - 1]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Signature { r, s }
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    ///
    /// Hex of `r || s`, both big-endian and left-padded with zeros to the
    /// byte length of the larger one.
    ///
    pub fn to_hex(&self) -> String {
        let r = self.r.to_bytes_be();
        let s = self.s.to_bytes_be();
        let width = r.len().max(s.len());

        let mut bytes = vec![0u8; 2 * width];
        bytes[width - r.len()..width].copy_from_slice(&r);
        bytes[2 * width - s.len()..].copy_from_slice(&s);

        hex::encode(bytes)
    }

    /// Inverse of [`Signature::to_hex`].
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let bytes = hex::decode(encoded).map_err(|e| EccError::InvalidEncoding(e.to_string()))?;
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            return Err(EccError::InvalidEncoding(format!(
                "signature of {} bytes cannot be split into r and s",
                bytes.len()
            )));
        }

        let (r, s) = bytes.split_at(bytes.len() / 2);
        Ok(Signature {
            r: BigUint::from_bytes_be(r),
            s: BigUint::from_bytes_be(s),
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(r={}, s={})", self.r, self.s)
    }
}

///
/// ECDSA over domain parameters `(E, G, n)` with a hash `H` mapping messages
/// to integers.
///
/// Signing: pick `k` in `[1, n - 1]`, `R = k * G`, `r = R.x mod n`,
/// `s = k^(-1) * (H(m) + r * d) mod n`, drawing a new `k` whenever `r`, `s` or
/// `k^(-1)` is unusable.
///
/// Verifying: `w = s^(-1)`, `u1 = H(m) * w`, `u2 = r * w` (all mod n) and
/// accept iff `(u1 * G + u2 * Q).x mod n = r`.
///
#[derive(Clone, Debug)]
pub struct Ecdsa<C: CurveGroup<Coordinate = FieldElement>, H: MessageHash = Sha256Hash> {
    params: DomainParameters<C>,
    hash: H,
    config: SigningConfig,
}

impl<C: CurveGroup<Coordinate = FieldElement>, H: MessageHash> Ecdsa<C, H> {
    pub fn new(params: DomainParameters<C>, hash: H) -> Self {
        Ecdsa {
            params,
            hash,
            config: SigningConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SigningConfig) -> Self {
        self.config = config;
        self
    }

    pub fn params(&self) -> &DomainParameters<C> {
        &self.params
    }

    pub fn config(&self) -> &SigningConfig {
        &self.config
    }

    pub fn generate_keypair<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<KeyPair> {
        self.params.generate_keypair(rng)
    }

    pub fn sign<R: RandomSource + ?Sized>(
        &self,
        message: &[u8],
        private_key: &BigUint,
        rng: &mut R,
    ) -> Result<Signature> {
        let n = self.params.order();
        if !self.params.in_scalar_range(private_key) {
            return Err(EccError::InvalidPrivateKey { max: n - 1u32 });
        }

        let z = self.hash.hash_to_integer(message)?;

        for attempt in 1..=self.config.max_nonce_attempts {
            let k = self.params.random_scalar(rng);

            let point = self.params.multiply_generator(&k)?;
            let r = match self.params.x_mod_order(&point) {
                Some(r) if r != BigUint::from(0u32) => r,
                _ => {
                    debug!("nonce attempt {} rejected: r = 0", attempt);
                    continue;
                }
            };

            let k_inv = match ModInt::new(k, n.clone())?.inverse() {
                Ok(k_inv) => k_inv,
                Err(_) => {
                    debug!("nonce attempt {} rejected: nonce not invertible mod {}", attempt, n);
                    continue;
                }
            };

            let s = k_inv.mul(&ModInt::new(&z + &r * private_key, n.clone())?)?;
            if s.is_zero() {
                debug!("nonce attempt {} rejected: s = 0", attempt);
                continue;
            }

            return Ok(Signature {
                r,
                s: s.value().clone(),
            });
        }

        Err(EccError::SigningFailed {
            attempts: self.config.max_nonce_attempts,
        })
    }

    ///
    /// `Ok(())` for a valid signature, [`EccError::InvalidSignature`] for a
    /// rejected one and [`EccError::InvalidPublicPoint`] when `public_key`
    /// is not a usable point of the curve.
    ///
    pub fn verify(
        &self,
        message: &[u8],
        signature: &Signature,
        public_key: &Point<FieldElement>,
    ) -> Result<()> {
        let curve = self.params.curve();
        if !curve.contains(public_key) || public_key.is_identity() {
            return Err(EccError::InvalidPublicPoint(public_key.to_string()));
        }

        if !self.params.in_scalar_range(&signature.r) || !self.params.in_scalar_range(&signature.s)
        {
            debug!("signature {} rejected: component out of range", signature);
            return Err(EccError::InvalidSignature);
        }

        let n = self.params.order();
        let w = ModInt::new(signature.s.clone(), n.clone())?
            .inverse()
            .map_err(|_| EccError::InvalidSignature)?;
        let z = self.hash.hash_to_integer(message)?;
        let u1 = ModInt::new(z, n.clone())?.mul(&w)?;
        let u2 = ModInt::new(signature.r.clone(), n.clone())?.mul(&w)?;

        let p = curve.add(
            &self.params.multiply_generator(u1.value())?,
            &curve.scalar_multiply(&BigInt::from(u2.value().clone()), public_key)?,
        )?;

        match self.params.x_mod_order(&p) {
            Some(x) if x == signature.r => Ok(()),
            _ => {
                debug!("signature {} rejected", signature);
                Err(EccError::InvalidSignature)
            }
        }
    }

    pub fn is_valid(
        &self,
        message: &[u8],
        signature: &Signature,
        public_key: &Point<FieldElement>,
    ) -> bool {
        self.verify(message, signature, public_key).is_ok()
    }
}
