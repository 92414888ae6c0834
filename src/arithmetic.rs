use crate::error::{EccError, Result};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::fmt;

///
/// An integer modulo `modulus`.
///
/// The modulus is expected to be prime: every nonzero residue is then
/// invertible. This is not checked, see [`is_probable_prime`] for an optional
/// test. The value is always kept in `[0, modulus)`.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModInt {
    value: BigUint,
    modulus: BigUint,
}

impl ModInt {
    ///
    /// Reduces `value` into `[0, modulus)`. Negative values are reduced with
    /// a floor modulus, so `-1` becomes `modulus - 1`.
    ///
    pub fn new<T: Into<BigInt>>(value: T, modulus: BigUint) -> Result<Self> {
        if modulus < BigUint::from(2u32) {
            return Err(EccError::InvalidFieldParameters(format!(
                "modulus {} must be at least 2",
                modulus
            )));
        }
        Ok(ModInt::reduce(&value.into(), modulus))
    }

    pub(crate) fn reduce(value: &BigInt, modulus: BigUint) -> Self {
        let m = BigInt::from(modulus.clone());
        let value = value.mod_floor(&m).magnitude().clone();
        ModInt { value, modulus }
    }

    pub(crate) fn zero(modulus: &BigUint) -> Self {
        ModInt {
            value: BigUint::zero(),
            modulus: modulus.clone(),
        }
    }

    pub(crate) fn one(modulus: &BigUint) -> Self {
        ModInt::reduce(&BigInt::one(), modulus.clone())
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.value.is_one()
    }

    ///
    /// `(a + b) mod p`
    ///
    pub fn add(&self, other: &ModInt) -> Result<ModInt> {
        self.check_compatible(other)?;

        Ok(ModInt {
            value: (&self.value + &other.value) % &self.modulus,
            modulus: self.modulus.clone(),
        })
    }

    ///
    /// `(a - b) mod p = a + (-b) mod p`
    ///
    pub fn sub(&self, other: &ModInt) -> Result<ModInt> {
        self.check_compatible(other)?;

        self.add(&other.neg())
    }

    ///
    /// `(a * b) mod p`
    ///
    pub fn mul(&self, other: &ModInt) -> Result<ModInt> {
        self.check_compatible(other)?;

        Ok(ModInt {
            value: (&self.value * &other.value) % &self.modulus,
            modulus: self.modulus.clone(),
        })
    }

    ///
    /// Additive inverse: `a + (-a) = 0 mod p`
    ///
    pub fn neg(&self) -> ModInt {
        if self.value.is_zero() {
            return self.clone();
        }

        ModInt {
            value: &self.modulus - &self.value,
            modulus: self.modulus.clone(),
        }
    }

    ///
    /// `a^e mod p`. A negative exponent raises the inverse to `|e|`, so it
    /// fails for non-invertible values.
    ///
    pub fn pow(&self, exponent: &BigInt) -> Result<ModInt> {
        let base = if exponent.is_negative() {
            self.inverse()?
        } else {
            self.clone()
        };

        Ok(ModInt {
            value: base.value.modpow(exponent.magnitude(), &self.modulus),
            modulus: self.modulus.clone(),
        })
    }

    ///
    /// Multiplicative inverse through the extended Euclidean algorithm:
    ///
    /// `a * x + p * y = gcd(a, p) = 1` gives `a^(-1) = x mod p`
    ///
    pub fn inverse(&self) -> Result<ModInt> {
        let (gcd, x, _) = extended_gcd(
            &BigInt::from(self.value.clone()),
            &BigInt::from(self.modulus.clone()),
        );

        if !gcd.is_one() {
            return Err(EccError::NotInvertible(format!(
                "{} mod {}",
                self.value, self.modulus
            )));
        }

        Ok(ModInt::reduce(&x, self.modulus.clone()))
    }

    ///
    /// `a / b = a * b^(-1) mod p`
    ///
    pub fn div(&self, other: &ModInt) -> Result<ModInt> {
        self.check_compatible(other)?;

        self.mul(&other.inverse()?)
    }

    pub fn check_compatible(&self, other: &ModInt) -> Result<()> {
        if self.modulus != other.modulus {
            return Err(EccError::IncompatibleModulus {
                left: self.modulus.clone(),
                right: other.modulus.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for ModInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

///
/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` such that `a * x + b * y = g` where `g = gcd(a, b) >= 0`.
/// Works for negative and zero inputs; `extended_gcd(0, 0) = (0, 1, 0)`.
///
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    // invariant: old_r = a * old_x + b * old_y and r = a * x + b * y
    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    if old_r.is_negative() {
        (-old_r, -old_x, -old_y)
    } else {
        (old_r, old_x, old_y)
    }
}

const SMALL_PRIMES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

///
/// Miller-Rabin test over the first twelve primes as witnesses.
///
/// Deterministic below 3.3 * 10^24 and probabilistic above.
///
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }

    for p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - 1u32;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for base in SMALL_PRIMES {
        let mut x = BigUint::from(base).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

///
/// Distinct prime factors of `n` in increasing order, by trial division.
///
/// Only meant for the small group orders used when teaching.
///
pub fn prime_factors(n: &BigUint) -> Vec<BigUint> {
    let mut factors = Vec::new();
    let mut rest = n.clone();
    let mut candidate = BigUint::from(2u32);

    while &candidate * &candidate <= rest {
        if (&rest % &candidate).is_zero() {
            while (&rest % &candidate).is_zero() {
                rest /= &candidate;
            }
            factors.push(candidate.clone());
        }
        candidate += if candidate == BigUint::from(2u32) { 1u32 } else { 2u32 };
    }

    if rest > BigUint::one() {
        factors.push(rest);
    }

    factors
}
