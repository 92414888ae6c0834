//! Elliptic-curve Diffie-Hellman key agreement.

use crate::curve::{CurveGroup, Point};
use crate::error::{EccError, Result};
use crate::field::FieldElement;
use crate::keys::{DomainParameters, KeyPair};
use crate::primitives::RandomSource;
use log::debug;
use num_bigint::{BigInt, BigUint};

///
/// Two parties holding the same domain parameters each publish `d * G`;
/// both sides then arrive at the x-coordinate of `d_A * d_B * G`.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ecdh<C: CurveGroup<Coordinate = FieldElement>> {
    params: DomainParameters<C>,
}

impl<C: CurveGroup<Coordinate = FieldElement>> Ecdh<C> {
    pub fn new(params: DomainParameters<C>) -> Self {
        Ecdh { params }
    }

    pub fn params(&self) -> &DomainParameters<C> {
        &self.params
    }

    pub fn generate_keypair<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<KeyPair> {
        self.params.generate_keypair(rng)
    }

    ///
    /// The x-coordinate of `own_private * other_public`, as an integer.
    ///
    /// Fails with [`EccError::InvalidPublicPoint`] if `other_public` is not on
    /// the curve, is the identity, or the product is the identity.
    ///
    pub fn compute_shared_secret(
        &self,
        own_private: &BigUint,
        other_public: &Point<FieldElement>,
    ) -> Result<BigUint> {
        let curve = self.params.curve();
        if !curve.contains(other_public) || other_public.is_identity() {
            debug!("rejected public point {}", other_public);
            return Err(EccError::InvalidPublicPoint(other_public.to_string()));
        }

        let shared = curve.scalar_multiply(&BigInt::from(own_private.clone()), other_public)?;
        match shared.x() {
            Some(x) => Ok(x.to_biguint()),
            None => Err(EccError::InvalidPublicPoint(other_public.to_string())),
        }
    }
}
