use super::sealed::{Internal, Sealed};
use super::{CurveGroup, Point};
use crate::error::{EccError, Result};
use crate::field::{FieldElement, FiniteField};
use log::debug;
use num_bigint::BigInt;
use std::fmt;

///
/// Non-supersingular curve over a binary field GF(2^m):
///
/// `y^2 + x*y = x^3 + a*x^2 + b`, with `b != 0`
///
/// Coefficients and coordinates are given as bit vectors, bit `i` being the
/// coefficient of `z^i`.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryCurve {
    field: FiniteField,
    a: FieldElement,
    b: FieldElement,
}

impl BinaryCurve {
    pub fn new<A, B>(field: FiniteField, a: A, b: B) -> Result<Self>
    where
        A: Into<BigInt>,
        B: Into<BigInt>,
    {
        if let FiniteField::Prime { .. } = field {
            return Err(EccError::InvalidCurveParameters(format!(
                "{} is not a binary field",
                field
            )));
        }

        let a = field.element(a)?;
        let b = field.element(b)?;
        if b.is_zero() {
            return Err(EccError::InvalidCurveParameters(
                "b must be nonzero".to_string(),
            ));
        }

        let curve = BinaryCurve { field, a, b };
        debug!("constructed {}", curve);
        Ok(curve)
    }

    pub fn field(&self) -> &FiniteField {
        &self.field
    }

    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    /// For this curve form the discriminant is `b`.
    pub fn discriminant(&self) -> Result<FieldElement> {
        Ok(self.b.clone())
    }

    pub fn point<X, Y>(&self, x: X, y: Y) -> Result<Point<FieldElement>>
    where
        X: Into<BigInt>,
        Y: Into<BigInt>,
    {
        let point = Point::new(self.field.element(x)?, self.field.element(y)?);
        self.check(&point)?;
        Ok(point)
    }

    fn satisfies(&self, x: &FieldElement, y: &FieldElement) -> Result<bool> {
        let x2 = x.square()?;
        let lhs = y.square()?.add(&x.mul(y)?)?;
        let rhs = x2.mul(x)?.add(&self.a.mul(&x2)?)?.add(&self.b)?;
        Ok(lhs == rhs)
    }
}

impl CurveGroup for BinaryCurve {
    fn contains(&self, point: &Point<FieldElement>) -> bool {
        match point {
            Point::Identity => true,
            Point::Affine { x, y } => {
                self.field.contains(x)
                    && self.field.contains(y)
                    && self.satisfies(x, y).unwrap_or(false)
            }
        }
    }
}

impl Sealed for BinaryCurve {
    type Coordinate = FieldElement;

    /// `-(x, y) = (x, x + y)`
    fn negate_unchecked(
        &self,
        point: &Point<FieldElement>,
        _: Internal,
    ) -> Result<Point<FieldElement>> {
        Ok(match point {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::new(x.clone(), x.add(y)?),
        })
    }

    ///
    /// Doubling, for `x1 != 0`:
    ///
    /// `l = x1 + y1 / x1`
    /// `x3 = l^2 + l + a`
    /// `y3 = x1^2 + l * x3 + x3`
    ///
    /// Distinct x coordinates:
    ///
    /// `l = (y1 + y2) / (x1 + x2)`
    /// `x3 = l^2 + l + x1 + x2 + a`
    /// `y3 = l * (x1 + x3) + x3 + y1`
    ///
    fn add_unchecked(
        &self,
        p: &Point<FieldElement>,
        q: &Point<FieldElement>,
        _: Internal,
    ) -> Result<Point<FieldElement>> {
        let (x1, y1) = match p.coordinates() {
            Some(c) => c,
            None => return Ok(q.clone()),
        };
        let (x2, y2) = match q.coordinates() {
            Some(c) => c,
            None => return Ok(p.clone()),
        };

        if x1 == x2 && *y2 == x1.add(y1)? {
            return Ok(Point::Identity);
        }

        if x1 == x2 && y1 == y2 {
            if x1.is_zero() {
                return Ok(Point::Identity);
            }
            let l = x1.add(&y1.div(x1)?)?;
            let x3 = l.square()?.add(&l)?.add(&self.a)?;
            let y3 = x1.square()?.add(&l.mul(&x3)?)?.add(&x3)?;
            return Ok(Point::new(x3, y3));
        }

        let l = y1.add(y2)?.div(&x1.add(x2)?)?;
        let x3 = l
            .square()?
            .add(&l)?
            .add(x1)?
            .add(x2)?
            .add(&self.a)?;
        let y3 = l.mul(&x1.add(&x3)?)?.add(&x3)?.add(y1)?;

        Ok(Point::new(x3, y3))
    }
}

impl fmt::Display for BinaryCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y^2 + xy = x^3 + {}x^2 + {} over {}",
            self.a, self.b, self.field
        )
    }
}
