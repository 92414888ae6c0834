//! Domain parameters and key pairs shared by the key-exchange and signature
//! schemes.

use crate::curve::{CurveGroup, Point};
use crate::error::{EccError, Result};
use crate::field::FieldElement;
use crate::primitives::RandomSource;
use log::debug;
use num_bigint::{BigInt, BigUint};
use num_traits::One;
use std::fmt;

///
/// A group, a base point `G` on it and the order `n` used for scalars.
///
/// `n` is taken on trust; [`DomainParameters::validate_order`] checks that
/// `n * G = O` when the caller wants it.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainParameters<C: CurveGroup<Coordinate = FieldElement>> {
    curve: C,
    generator: Point<FieldElement>,
    order: BigUint,
}

impl<C: CurveGroup<Coordinate = FieldElement>> DomainParameters<C> {
    pub fn new(curve: C, generator: Point<FieldElement>, order: BigUint) -> Result<Self> {
        curve.check(&generator)?;
        if generator.is_identity() {
            return Err(EccError::InvalidPoint(
                "the identity cannot be a base point".to_string(),
            ));
        }
        if order < BigUint::from(2u32) {
            return Err(EccError::InvalidCurveParameters(format!(
                "base point order {} is below 2",
                order
            )));
        }

        debug!("domain parameters G = {} with n = {} on {}", generator, order, curve);
        Ok(DomainParameters {
            curve,
            generator,
            order,
        })
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    pub fn generator(&self) -> &Point<FieldElement> {
        &self.generator
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Checks `n * G = O`.
    pub fn validate_order(&self) -> Result<()> {
        let multiple = self
            .curve
            .scalar_multiply(&BigInt::from(self.order.clone()), &self.generator)?;
        if !multiple.is_identity() {
            return Err(EccError::InvalidCurveParameters(format!(
                "{} * {} is not the identity",
                self.order, self.generator
            )));
        }
        Ok(())
    }

    /// A scalar drawn uniformly from `[1, n - 1]`.
    pub fn random_scalar<R: RandomSource + ?Sized>(&self, rng: &mut R) -> BigUint {
        rng.random_in_range(&BigUint::one(), &(&self.order - 1u32))
    }

    /// `k * G`
    pub fn multiply_generator(&self, k: &BigUint) -> Result<Point<FieldElement>> {
        self.curve
            .scalar_multiply(&BigInt::from(k.clone()), &self.generator)
    }

    pub fn generate_keypair<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<KeyPair> {
        let private = self.random_scalar(rng);
        self.keypair_from_private(private)
    }

    /// Rejects scalars outside `[1, n - 1]`.
    pub fn keypair_from_private(&self, private: BigUint) -> Result<KeyPair> {
        if !self.in_scalar_range(&private) {
            return Err(EccError::InvalidPrivateKey {
                max: &self.order - 1u32,
            });
        }

        let public = self.multiply_generator(&private)?;
        Ok(KeyPair { private, public })
    }

    /// `true` when `1 <= k <= n - 1`.
    pub fn in_scalar_range(&self, k: &BigUint) -> bool {
        *k >= BigUint::one() && *k < self.order
    }

    /// The x-coordinate of `point` as an integer reduced mod `n`.
    pub(crate) fn x_mod_order(&self, point: &Point<FieldElement>) -> Option<BigUint> {
        point.x().map(|x| x.to_biguint() % &self.order)
    }
}

/// A private scalar and its public point.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    private: BigUint,
    public: Point<FieldElement>,
}

impl KeyPair {
    pub fn private_key(&self) -> &BigUint {
        &self.private
    }

    pub fn public_key(&self) -> &Point<FieldElement> {
        &self.public
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private", &"<hidden>")
            .field("public", &self.public)
            .finish()
    }
}
