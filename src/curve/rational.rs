use super::sealed::{Internal, Sealed};
use super::{find_order, CurveGroup, Point};
use crate::error::{EccError, Result};
use log::debug;
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::fmt;

/// By Mazur's theorem a rational torsion point has order at most 12.
pub const MAZUR_BOUND: u64 = 12;

///
/// Short Weierstrass curve over the rationals:
///
/// `y^2 = x^3 + a*x + b`
///
/// Arithmetic is exact, so coordinates of non-torsion points grow quickly.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalCurve {
    a: BigRational,
    b: BigRational,
}

impl RationalCurve {
    pub fn new(a: BigRational, b: BigRational) -> Result<Self> {
        let curve = RationalCurve { a, b };
        if curve.discriminant().is_zero() {
            return Err(EccError::InvalidCurveParameters(format!(
                "{} is singular",
                curve
            )));
        }

        debug!("constructed {}", curve);
        Ok(curve)
    }

    pub fn from_integers<A, B>(a: A, b: B) -> Result<Self>
    where
        A: Into<BigInt>,
        B: Into<BigInt>,
    {
        RationalCurve::new(BigRational::from(a.into()), BigRational::from(b.into()))
    }

    pub fn a(&self) -> &BigRational {
        &self.a
    }

    pub fn b(&self) -> &BigRational {
        &self.b
    }

    /// `4a^3 + 27b^2`
    pub fn discriminant(&self) -> BigRational {
        let four = BigRational::from(BigInt::from(4));
        let twenty_seven = BigRational::from(BigInt::from(27));

        four * &self.a * &self.a * &self.a + twenty_seven * &self.b * &self.b
    }

    pub fn point(&self, x: BigRational, y: BigRational) -> Result<Point<BigRational>> {
        let point = Point::new(x, y);
        self.check(&point)?;
        Ok(point)
    }

    /// Shorthand for a point with integer coordinates.
    pub fn integer_point<X, Y>(&self, x: X, y: Y) -> Result<Point<BigRational>>
    where
        X: Into<BigInt>,
        Y: Into<BigInt>,
    {
        self.point(BigRational::from(x.into()), BigRational::from(y.into()))
    }
}

impl CurveGroup for RationalCurve {
    fn contains(&self, point: &Point<BigRational>) -> bool {
        match point {
            Point::Identity => true,
            Point::Affine { x, y } => y * y == x * x * x + &self.a * x + &self.b,
        }
    }

    ///
    /// Repeated addition capped at [`MAZUR_BOUND`]: a point that has not
    /// returned to the identity by then has infinite order. If `bound` is
    /// below the cap and runs out first the result is
    /// [`EccError::OrderNotFound`].
    ///
    fn order_of(&self, point: &Point<BigRational>, bound: u64) -> Result<BigUint> {
        self.check(point)?;

        if let Some(order) = find_order(self, point, bound.min(MAZUR_BOUND))? {
            return Ok(order);
        }
        if bound < MAZUR_BOUND {
            return Err(EccError::OrderNotFound {
                bound: BigUint::from(bound),
            });
        }

        debug!("{} is not a torsion point of {}", point, self);
        Err(EccError::NoFiniteOrder(point.to_string()))
    }
}

impl Sealed for RationalCurve {
    type Coordinate = BigRational;

    fn negate_unchecked(
        &self,
        point: &Point<BigRational>,
        _: Internal,
    ) -> Result<Point<BigRational>> {
        Ok(match point {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::new(x.clone(), -y),
        })
    }

    fn add_unchecked(
        &self,
        p: &Point<BigRational>,
        q: &Point<BigRational>,
        _: Internal,
    ) -> Result<Point<BigRational>> {
        let (x1, y1) = match p.coordinates() {
            Some(c) => c,
            None => return Ok(q.clone()),
        };
        let (x2, y2) = match q.coordinates() {
            Some(c) => c,
            None => return Ok(p.clone()),
        };

        if x1 == x2 && *y1 == -y2 {
            return Ok(Point::Identity);
        }

        let slope = if x1 == x2 {
            if y1 != y2 {
                return Err(EccError::InvalidPoint(q.to_string()));
            }
            let three = BigRational::from(BigInt::from(3));
            (three * x1 * x1 + &self.a) / (y1 + y1)
        } else {
            (y2 - y1) / (x2 - x1)
        };

        let x3 = &slope * &slope - x1 - x2;
        let y3 = slope * (x1 - &x3) - y1;

        Ok(Point::new(x3, y3))
    }
}

impl fmt::Display for RationalCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = |v: &BigRational| if v.is_negative() { "-" } else { "+" };
        write!(
            f,
            "y^2 = x^3 {} {}x {} {} over Q",
            sign(&self.a),
            self.a.abs(),
            sign(&self.b),
            self.b.abs()
        )
    }
}
