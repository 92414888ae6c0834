use super::sealed::{Internal, Sealed};
use super::{CurveGroup, Point};
use crate::error::{EccError, Result};
use crate::field::{FieldElement, FiniteField};
use log::debug;
use num_bigint::{BigInt, BigUint};
use std::fmt;

///
/// Short Weierstrass curve over a prime field of characteristic above 3:
///
/// `y^2 = x^3 + a*x + b (mod p)`
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeCurve {
    field: FiniteField,
    a: FieldElement,
    b: FieldElement,
}

impl PrimeCurve {
    ///
    /// Builds the curve, reducing `a` and `b` into the field. Rejects binary
    /// fields, characteristics 2 and 3, and singular curves (`4a^3 + 27b^2 = 0`).
    ///
    pub fn new<A, B>(field: FiniteField, a: A, b: B) -> Result<Self>
    where
        A: Into<BigInt>,
        B: Into<BigInt>,
    {
        match &field {
            FiniteField::Binary { .. } => {
                return Err(EccError::InvalidCurveParameters(format!(
                    "{} is not a prime field",
                    field
                )));
            }
            FiniteField::Prime { modulus } if *modulus <= BigUint::from(3u32) => {
                return Err(EccError::InvalidCurveParameters(format!(
                    "characteristic {} is not supported",
                    modulus
                )));
            }
            FiniteField::Prime { .. } => {}
        }

        let a = field.element(a)?;
        let b = field.element(b)?;
        let curve = PrimeCurve { field, a, b };

        if curve.discriminant()?.is_zero() {
            return Err(EccError::InvalidCurveParameters(format!(
                "{} is singular",
                curve
            )));
        }

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

    /// `4a^3 + 27b^2`
    pub fn discriminant(&self) -> Result<FieldElement> {
        let four = self.field.element(4)?;
        let twenty_seven = self.field.element(27)?;

        four.mul(&self.a.pow(&BigInt::from(3))?)?
            .add(&twenty_seven.mul(&self.b.square()?)?)
    }

    /// The affine point `(x, y)`, or [`EccError::InvalidPoint`] if it is not on the curve.
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
        let rhs = x
            .pow(&BigInt::from(3))?
            .add(&self.a.mul(x)?)?
            .add(&self.b)?;
        Ok(y.square()? == rhs)
    }
}

impl CurveGroup for PrimeCurve {
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

impl Sealed for PrimeCurve {
    type Coordinate = FieldElement;

    fn negate_unchecked(
        &self,
        point: &Point<FieldElement>,
        _: Internal,
    ) -> Result<Point<FieldElement>> {
        Ok(match point {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::new(x.clone(), y.neg()),
        })
    }

    ///
    /// Chord-and-tangent addition:
    ///
    /// `slope = (y2 - y1) / (x2 - x1)`, or `(3x1^2 + a) / 2y1` when doubling
    /// `x3 = slope^2 - x1 - x2`
    /// `y3 = slope * (x1 - x3) - y1`
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

        if x1 == x2 && *y1 == y2.neg() {
            return Ok(Point::Identity);
        }

        let slope = if y1 == y2 && x1 == x2 {
            let numerator = self.field.element(3)?.mul(&x1.square()?)?.add(&self.a)?;
            let denominator = y1.add(y1)?;
            let inverse = denominator
                .inverse()
                .map_err(|_| EccError::InvalidPoint(p.to_string()))?;
            numerator.mul(&inverse)?
        } else {
            y2.sub(y1)?.div(&x2.sub(x1)?)?
        };

        let x3 = slope.square()?.sub(x1)?.sub(x2)?;
        let y3 = slope.mul(&x1.sub(&x3)?)?.sub(y1)?;

        Ok(Point::new(x3, y3))
    }
}

impl fmt::Display for PrimeCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y^2 = x^3 + {}x + {} over {}",
            self.a, self.b, self.field
        )
    }
}
