//! Elliptic-curve groups.
//!
//! Three curve families share the [`CurveGroup`] contract: short Weierstrass
//! curves over a prime field, non-supersingular curves over a binary field
//! and short Weierstrass curves over the rationals. Points are either the
//! identity or an affine coordinate pair.

pub mod binary;
pub mod prime;
pub mod rational;

pub use binary::BinaryCurve;
pub use prime::PrimeCurve;
pub use rational::RationalCurve;

use crate::arithmetic::prime_factors;
use crate::error::{EccError, Result};
use log::{debug, trace};
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use std::fmt;

/// A point of an elliptic-curve group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Point<C> {
    /// The point at infinity, neutral element of the group.
    Identity,
    Affine { x: C, y: C },
}

impl<C> Point<C> {
    pub fn new(x: C, y: C) -> Self {
        Point::Affine { x, y }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Identity)
    }

    pub fn x(&self) -> Option<&C> {
        self.coordinates().map(|(x, _)| x)
    }

    pub fn y(&self) -> Option<&C> {
        self.coordinates().map(|(_, y)| y)
    }

    pub fn coordinates(&self) -> Option<(&C, &C)> {
        match self {
            Point::Identity => None,
            Point::Affine { x, y } => Some((x, y)),
        }
    }
}

impl<C: fmt::Display> fmt::Display for Point<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Identity => write!(f, "O"),
            Point::Affine { x, y } => write!(f, "({},{})", x, y),
        }
    }
}

mod sealed {
    use super::Point;
    use crate::error::Result;
    use std::fmt;

    /// Witness that a call originates in this crate; it cannot be built elsewhere.
    #[derive(Clone, Copy, Debug)]
    pub struct Internal(pub(crate) ());

    ///
    /// The raw group law on points already known to be on the curve.
    ///
    /// Unreachable from outside the crate: the trait cannot be named and
    /// every method takes an [`Internal`] witness.
    ///
    pub trait Sealed {
        type Coordinate: Clone + fmt::Debug + fmt::Display + PartialEq;

        fn negate_unchecked(
            &self,
            point: &Point<Self::Coordinate>,
            _: Internal,
        ) -> Result<Point<Self::Coordinate>>;

        fn add_unchecked(
            &self,
            p: &Point<Self::Coordinate>,
            q: &Point<Self::Coordinate>,
            _: Internal,
        ) -> Result<Point<Self::Coordinate>>;
    }
}

const INTERNAL: sealed::Internal = sealed::Internal(());

///
/// The group law of an elliptic curve.
///
/// Points are the identity or affine pairs of `Coordinate`s. Every operation
/// checks its operands first and fails with [`EccError::InvalidPoint`] when
/// one of them is not on the curve, so results always lie on the curve.
///
/// The raw group law is not part of the public surface:
///
/// ```compile_fail
/// use elliptic_curve_toolkit::{CurveGroup, FiniteField, Point, PrimeCurve};
/// use num_bigint::BigUint;
///
/// let field = FiniteField::prime(BigUint::from(97u32)).unwrap();
/// let curve = PrimeCurve::new(field.clone(), 2, 3).unwrap();
/// let p = curve.point(0, 10).unwrap();
/// let q = Point::new(field.element(1).unwrap(), field.element(1).unwrap());
/// let _ = curve.add_unchecked(&p, &q);
/// ```
///
pub trait CurveGroup: sealed::Sealed + fmt::Display {
    /// `true` for the identity and for affine points satisfying the curve equation.
    fn contains(&self, point: &Point<Self::Coordinate>) -> bool;

    fn identity(&self) -> Point<Self::Coordinate> {
        Point::Identity
    }

    fn is_identity(&self, point: &Point<Self::Coordinate>) -> bool {
        point.is_identity()
    }

    fn check(&self, point: &Point<Self::Coordinate>) -> Result<()> {
        if !self.contains(point) {
            return Err(EccError::InvalidPoint(point.to_string()));
        }
        Ok(())
    }

    ///
    /// The inverse of `point`:
    ///
    /// `P + (-P) = O`
    ///
    fn negate(&self, point: &Point<Self::Coordinate>) -> Result<Point<Self::Coordinate>> {
        self.check(point)?;
        self.negate_unchecked(point, INTERNAL)
    }

    fn add(
        &self,
        p: &Point<Self::Coordinate>,
        q: &Point<Self::Coordinate>,
    ) -> Result<Point<Self::Coordinate>> {
        self.check(p)?;
        self.check(q)?;
        self.add_unchecked(p, q, INTERNAL)
    }

    fn double(&self, point: &Point<Self::Coordinate>) -> Result<Point<Self::Coordinate>> {
        self.check(point)?;
        self.add_unchecked(point, point, INTERNAL)
    }

    /// `P - Q = P + (-Q)`
    fn subtract(
        &self,
        p: &Point<Self::Coordinate>,
        q: &Point<Self::Coordinate>,
    ) -> Result<Point<Self::Coordinate>> {
        self.check(p)?;
        self.check(q)?;
        let minus_q = self.negate_unchecked(q, INTERNAL)?;
        self.add_unchecked(p, &minus_q, INTERNAL)
    }

    ///
    /// Computes `k * P` with double-and-add, scanning the bits of `|k|` from
    /// the most significant one down. A negative `k` multiplies `-P`.
    ///
    fn scalar_multiply(
        &self,
        k: &BigInt,
        point: &Point<Self::Coordinate>,
    ) -> Result<Point<Self::Coordinate>> {
        self.check(point)?;

        let base = if k.is_negative() {
            self.negate_unchecked(point, INTERNAL)?
        } else {
            point.clone()
        };
        let k = k.magnitude();
        trace!("multiplying {} by a {}-bit scalar", point, k.bits());

        let mut result = Point::Identity;
        for i in (0..k.bits()).rev() {
            result = self.add_unchecked(&result, &result, INTERNAL)?;
            if k.bit(i) {
                result = self.add_unchecked(&result, &base, INTERNAL)?;
            }
        }

        Ok(result)
    }

    ///
    /// The order of `point` by repeated addition: the least `n >= 1` with
    /// `n * P = O`. Fails with [`EccError::OrderNotFound`] after `bound` steps,
    /// except for the identity whose order is always 1.
    ///
    fn order_of(&self, point: &Point<Self::Coordinate>, bound: u64) -> Result<BigUint> {
        self.check(point)?;

        match find_order(self, point, bound)? {
            Some(order) => Ok(order),
            None => Err(EccError::OrderNotFound {
                bound: BigUint::from(bound),
            }),
        }
    }

    ///
    /// The order of `point` given the order `group_order` of a group
    /// containing it: starting from `N`, divide out each prime factor `q`
    /// while `(N / q) * P = O` still holds.
    ///
    fn order_with_group_order(
        &self,
        point: &Point<Self::Coordinate>,
        group_order: &BigUint,
    ) -> Result<BigUint> {
        self.check(point)?;

        let multiple = BigInt::from(group_order.clone());
        if group_order.is_zero() || !self.scalar_multiply(&multiple, point)?.is_identity() {
            return Err(EccError::OrderNotFound {
                bound: group_order.clone(),
            });
        }

        let mut order = group_order.clone();
        for q in prime_factors(group_order) {
            while (&order % &q).is_zero() {
                let candidate = &order / &q;
                let multiple = BigInt::from(candidate.clone());
                if !self.scalar_multiply(&multiple, point)?.is_identity() {
                    break;
                }
                order = candidate;
            }
        }

        debug!("order of {} on {} is {}", point, self, order);
        Ok(order)
    }
}

///
/// Walks `P, 2P, 3P, ...` for at most `limit` steps looking for the identity.
/// The identity itself has order 1 whatever the limit.
///
pub(crate) fn find_order<G: CurveGroup + ?Sized>(
    curve: &G,
    point: &Point<G::Coordinate>,
    limit: u64,
) -> Result<Option<BigUint>> {
    if point.is_identity() {
        return Ok(Some(BigUint::from(1u32)));
    }

    let mut current = point.clone();
    for step in 1..=limit {
        if current.is_identity() {
            debug!("order of {} on {} is {}", point, curve, step);
            return Ok(Some(BigUint::from(step)));
        }
        current = curve.add_unchecked(&current, point, INTERNAL)?;
    }
    Ok(None)
}
