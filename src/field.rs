//! Finite fields: prime fields GF(p) and binary extension fields GF(2^m).
//!
//! Both kinds share one contract; elements carry enough of their field to
//! detect when operands come from different fields.

use crate::arithmetic::{is_probable_prime, ModInt};
use crate::error::{EccError, Result};
use crate::polynomial::Polynomial;
use crate::primitives::RandomSource;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed};
use std::fmt;

/// A finite field instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FiniteField {
    /// Integers modulo the prime `modulus`.
    Prime { modulus: BigUint },
    /// Polynomials over GF(2) reduced modulo an irreducible `modulus` of degree m.
    Binary { modulus: Polynomial },
}

/// An element of a [`FiniteField`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldElement {
    Prime(ModInt),
    Binary { value: Polynomial, modulus: Polynomial },
}

impl FiniteField {
    ///
    /// The prime field with `modulus` elements. Primality is not tested here,
    /// see [`FiniteField::validate`].
    ///
    pub fn prime(modulus: BigUint) -> Result<Self> {
        ModInt::new(0, modulus.clone())?;
        Ok(FiniteField::Prime { modulus })
    }

    ///
    /// GF(2^m) where m is the degree of `modulus`. Irreducibility is not
    /// tested here, see [`FiniteField::validate`].
    ///
    pub fn binary(modulus: Polynomial) -> Result<Self> {
        if *modulus.prime() != BigUint::from(2u32) {
            return Err(EccError::InvalidFieldParameters(format!(
                "binary field modulus has coefficients mod {}",
                modulus.prime()
            )));
        }
        if modulus.degree().unwrap_or(0) == 0 {
            return Err(EccError::InvalidFieldParameters(format!(
                "binary field modulus {} has degree below 1",
                modulus
            )));
        }
        Ok(FiniteField::Binary { modulus })
    }

    ///
    /// GF(2^m) from the exponents of the modulus terms, so `[4, 1, 0]` is
    /// `X^4 + X + 1`.
    ///
    pub fn binary_from_exponents(exponents: &[usize]) -> Result<Self> {
        let degree = exponents.iter().copied().max().unwrap_or(0);
        let mut coefficients = vec![0u32; degree + 1];
        for &e in exponents {
            coefficients[e] ^= 1;
        }
        FiniteField::binary(Polynomial::new(coefficients, BigUint::from(2u32))?)
    }

    /// GF(2^m) with a randomly generated irreducible modulus of degree m.
    pub fn binary_random<R: RandomSource + ?Sized>(degree: usize, rng: &mut R) -> Result<Self> {
        let modulus = Polynomial::random_irreducible(degree, &BigUint::from(2u32), rng)?;
        FiniteField::binary(modulus)
    }

    ///
    /// Optional check that the field really is a field: the prime modulus is
    /// (probably) prime, or the binary modulus is irreducible.
    ///
    pub fn validate(&self) -> Result<()> {
        match self {
            FiniteField::Prime { modulus } => {
                if !is_probable_prime(modulus) {
                    return Err(EccError::InvalidFieldParameters(format!(
                        "{} is not prime",
                        modulus
                    )));
                }
            }
            FiniteField::Binary { modulus } => {
                if !modulus.is_irreducible()? {
                    return Err(EccError::InvalidFieldParameters(format!(
                        "{} is not irreducible",
                        modulus
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn characteristic(&self) -> BigUint {
        match self {
            FiniteField::Prime { modulus } => modulus.clone(),
            FiniteField::Binary { .. } => BigUint::from(2u32),
        }
    }

    /// Extension degree over the prime subfield.
    pub fn degree(&self) -> usize {
        match self {
            FiniteField::Prime { .. } => 1,
            FiniteField::Binary { modulus } => modulus.degree().unwrap_or(0),
        }
    }

    /// Number of elements.
    pub fn order(&self) -> BigUint {
        match self {
            FiniteField::Prime { modulus } => modulus.clone(),
            FiniteField::Binary { modulus } => BigUint::one() << modulus.degree().unwrap_or(0),
        }
    }

    pub fn zero(&self) -> FieldElement {
        match self {
            FiniteField::Prime { modulus } => FieldElement::Prime(ModInt::zero(modulus)),
            FiniteField::Binary { modulus } => FieldElement::Binary {
                value: Polynomial::zero(modulus.prime()),
                modulus: modulus.clone(),
            },
        }
    }

    pub fn one(&self) -> FieldElement {
        match self {
            FiniteField::Prime { modulus } => FieldElement::Prime(ModInt::one(modulus)),
            FiniteField::Binary { modulus } => FieldElement::Binary {
                value: Polynomial::one(modulus.prime()),
                modulus: modulus.clone(),
            },
        }
    }

    ///
    /// Maps an integer into the field. For a prime field this is `value mod p`;
    /// for a binary field the bits of `value` are the polynomial coefficients,
    /// reduced by the modulus.
    ///
    pub fn element<T: Into<BigInt>>(&self, value: T) -> Result<FieldElement> {
        let value = value.into();
        match self {
            FiniteField::Prime { modulus } => {
                Ok(FieldElement::Prime(ModInt::reduce(&value, modulus.clone())))
            }
            FiniteField::Binary { modulus } => {
                if value.is_negative() {
                    return Err(EccError::IncompatibleField(format!(
                        "{} is not a bit vector",
                        value
                    )));
                }
                let poly = Polynomial::from_integer(value.magnitude(), modulus.prime())?;
                self.from_polynomial(&poly)
            }
        }
    }

    /// Reduces a GF(2) polynomial into a binary field.
    pub fn from_polynomial(&self, poly: &Polynomial) -> Result<FieldElement> {
        match self {
            FiniteField::Binary { modulus } => Ok(FieldElement::Binary {
                value: poly.rem(modulus)?,
                modulus: modulus.clone(),
            }),
            FiniteField::Prime { modulus } => Err(EccError::IncompatibleField(format!(
                "polynomial {} in GF({})",
                poly, modulus
            ))),
        }
    }

    pub fn contains(&self, x: &FieldElement) -> bool {
        match (self, x) {
            (FiniteField::Prime { modulus }, FieldElement::Prime(v)) => v.modulus() == modulus,
            (FiniteField::Binary { modulus }, FieldElement::Binary { modulus: m, .. }) => {
                m == modulus
            }
            _ => false,
        }
    }

    pub fn add(&self, x: &FieldElement, y: &FieldElement) -> Result<FieldElement> {
        self.check_member(x)?;
        self.check_member(y)?;
        x.add(y)
    }

    pub fn neg(&self, x: &FieldElement) -> Result<FieldElement> {
        self.check_member(x)?;
        Ok(x.neg())
    }

    pub fn mul(&self, x: &FieldElement, y: &FieldElement) -> Result<FieldElement> {
        self.check_member(x)?;
        self.check_member(y)?;
        x.mul(y)
    }

    pub fn inverse(&self, x: &FieldElement) -> Result<FieldElement> {
        self.check_member(x)?;
        x.inverse()
    }

    pub fn equals(&self, x: &FieldElement, y: &FieldElement) -> Result<bool> {
        self.check_member(x)?;
        self.check_member(y)?;
        Ok(x == y)
    }

    pub fn check_member(&self, x: &FieldElement) -> Result<()> {
        if !self.contains(x) {
            return Err(EccError::IncompatibleField(format!("{} not in {}", x, self)));
        }
        Ok(())
    }
}

impl fmt::Display for FiniteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiniteField::Prime { modulus } => write!(f, "GF({})", modulus),
            FiniteField::Binary { modulus } => {
                write!(f, "GF(2^{}) mod {}", modulus.degree().unwrap_or(0), modulus)
            }
        }
    }
}

impl FieldElement {
    /// The field this element belongs to.
    pub fn field(&self) -> FiniteField {
        match self {
            FieldElement::Prime(v) => FiniteField::Prime {
                modulus: v.modulus().clone(),
            },
            FieldElement::Binary { modulus, .. } => FiniteField::Binary {
                modulus: modulus.clone(),
            },
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            FieldElement::Prime(v) => v.is_zero(),
            FieldElement::Binary { value, .. } => value.is_zero(),
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            FieldElement::Prime(v) => v.is_one(),
            FieldElement::Binary { value, .. } => value.is_one(),
        }
    }

    ///
    /// The integer representation: the residue for a prime field, the
    /// coefficient bit vector for a binary field.
    ///
    pub fn to_biguint(&self) -> BigUint {
        match self {
            FieldElement::Prime(v) => v.value().clone(),
            FieldElement::Binary { value, .. } => value.to_integer(),
        }
    }

    pub fn add(&self, other: &FieldElement) -> Result<FieldElement> {
        match (self, other) {
            (FieldElement::Prime(a), FieldElement::Prime(b)) => Ok(FieldElement::Prime(
                a.add(b).map_err(|_| self.incompatible(other))?,
            )),
            (
                FieldElement::Binary { value: a, modulus },
                FieldElement::Binary { value: b, modulus: m },
            ) if modulus == m => Ok(FieldElement::Binary {
                value: a.add(b)?,
                modulus: modulus.clone(),
            }),
            _ => Err(self.incompatible(other)),
        }
    }

    /// In characteristic 2 every element is its own negative.
    pub fn neg(&self) -> FieldElement {
        match self {
            FieldElement::Prime(a) => FieldElement::Prime(a.neg()),
            FieldElement::Binary { .. } => self.clone(),
        }
    }

    pub fn sub(&self, other: &FieldElement) -> Result<FieldElement> {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &FieldElement) -> Result<FieldElement> {
        match (self, other) {
            (FieldElement::Prime(a), FieldElement::Prime(b)) => Ok(FieldElement::Prime(
                a.mul(b).map_err(|_| self.incompatible(other))?,
            )),
            (
                FieldElement::Binary { value: a, modulus },
                FieldElement::Binary { value: b, modulus: m },
            ) if modulus == m => Ok(FieldElement::Binary {
                value: a.mul(b)?.rem(modulus)?,
                modulus: modulus.clone(),
            }),
            _ => Err(self.incompatible(other)),
        }
    }

    pub fn square(&self) -> Result<FieldElement> {
        self.mul(self)
    }

    ///
    /// Prime field: extended Euclid on integers. Binary field: extended Euclid
    /// between the element and the modulus polynomial, keeping the element's
    /// Bezout coefficient reduced by the modulus.
    ///
    pub fn inverse(&self) -> Result<FieldElement> {
        match self {
            FieldElement::Prime(a) => Ok(FieldElement::Prime(a.inverse()?)),
            FieldElement::Binary { value, modulus } => Ok(FieldElement::Binary {
                value: binary_inverse(value, modulus)?,
                modulus: modulus.clone(),
            }),
        }
    }

    pub fn div(&self, other: &FieldElement) -> Result<FieldElement> {
        self.mul(&other.inverse()?)
    }

    /// `self^exponent`; a negative exponent inverts first.
    pub fn pow(&self, exponent: &BigInt) -> Result<FieldElement> {
        match self {
            FieldElement::Prime(a) => Ok(FieldElement::Prime(a.pow(exponent)?)),
            FieldElement::Binary { value, modulus } => {
                let base = if exponent.is_negative() {
                    binary_inverse(value, modulus)?
                } else {
                    value.clone()
                };
                Ok(FieldElement::Binary {
                    value: base.pow_mod(exponent.magnitude(), modulus)?,
                    modulus: modulus.clone(),
                })
            }
        }
    }

    fn incompatible(&self, other: &FieldElement) -> EccError {
        EccError::IncompatibleField(format!(
            "{} in {} and {} in {}",
            self,
            self.field(),
            other,
            other.field()
        ))
    }
}

fn binary_inverse(value: &Polynomial, modulus: &Polynomial) -> Result<Polynomial> {
    if value.is_zero() {
        return Err(EccError::NotInvertible(format!("0 mod {}", modulus)));
    }

    let (gcd, s, _) = Polynomial::extended_gcd(value, modulus)?;
    if !gcd.is_one() {
        return Err(EccError::NotInvertible(format!("{} mod {}", value, modulus)));
    }

    s.rem(modulus)
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldElement::Prime(v) => write!(f, "{}", v),
            FieldElement::Binary { value, .. } => write!(f, "{:#b}", value.to_integer()),
        }
    }
}
