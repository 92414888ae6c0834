use crate::arithmetic::ModInt;
use crate::error::{EccError, Result};
use crate::primitives::RandomSource;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::fmt;

///
/// Polynomial with coefficients in the integers modulo a prime `p`.
///
/// Coefficients are stored from the constant term upwards. The leading
/// coefficient is never zero, so the zero polynomial has no coefficients
/// and no degree.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Polynomial {
    coefficients: Vec<ModInt>,
    prime: BigUint,
}

impl Polynomial {
    pub fn new<I, T>(coefficients: I, prime: BigUint) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<BigInt>,
    {
        // validates the modulus once
        ModInt::new(0, prime.clone())?;

        let coefficients = coefficients
            .into_iter()
            .map(|c| ModInt::reduce(&c.into(), prime.clone()))
            .collect();

        Ok(Polynomial::from_coefficients(coefficients, prime))
    }

    pub(crate) fn from_coefficients(mut coefficients: Vec<ModInt>, prime: BigUint) -> Self {
        trim(&mut coefficients);
        Polynomial {
            coefficients,
            prime,
        }
    }

    pub fn zero(prime: &BigUint) -> Self {
        Polynomial {
            coefficients: Vec::new(),
            prime: prime.clone(),
        }
    }

    pub fn one(prime: &BigUint) -> Self {
        Polynomial::from_coefficients(vec![ModInt::one(prime)], prime.clone())
    }

    /// The polynomial `X`.
    pub fn x(prime: &BigUint) -> Self {
        Polynomial::monomial(ModInt::one(prime), 1)
    }

    /// `c * X^degree`
    pub fn monomial(coefficient: ModInt, degree: usize) -> Self {
        let prime = coefficient.modulus().clone();
        let mut coefficients = vec![ModInt::zero(&prime); degree];
        coefficients.push(coefficient);
        Polynomial::from_coefficients(coefficients, prime)
    }

    ///
    /// Reads the base-`p` digits of `value` as coefficients, least significant
    /// first. Over GF(2) this maps the bit `i` of `value` to the coefficient of
    /// `X^i`.
    ///
    pub fn from_integer(value: &BigUint, prime: &BigUint) -> Result<Self> {
        ModInt::new(0, prime.clone())?;

        let mut coefficients = Vec::new();
        let mut rest = value.clone();
        while !rest.is_zero() {
            let (quotient, digit) = rest.div_rem(prime);
            coefficients.push(ModInt::reduce(&BigInt::from(digit), prime.clone()));
            rest = quotient;
        }

        Ok(Polynomial::from_coefficients(coefficients, prime.clone()))
    }

    /// Inverse of [`Polynomial::from_integer`]: `sum(c_i * p^i)`.
    pub fn to_integer(&self) -> BigUint {
        self.coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, c| acc * &self.prime + c.value())
    }

    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    pub fn coefficients(&self) -> &[ModInt] {
        &self.coefficients
    }

    /// `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn leading_coefficient(&self) -> Option<&ModInt> {
        self.coefficients.last()
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.coefficients[0].is_one()
    }

    pub fn add(&self, other: &Polynomial) -> Result<Polynomial> {
        self.check_compatible(other)?;

        let len = self.coefficients.len().max(other.coefficients.len());
        let mut sum = Vec::with_capacity(len);
        for i in 0..len {
            let c = match (self.coefficients.get(i), other.coefficients.get(i)) {
                (Some(a), Some(b)) => a.add(b)?,
                (Some(a), None) | (None, Some(a)) => a.clone(),
                (None, None) => unreachable!(),
            };
            sum.push(c);
        }

        Ok(Polynomial::from_coefficients(sum, self.prime.clone()))
    }

    pub fn neg(&self) -> Polynomial {
        let coefficients = self.coefficients.iter().map(ModInt::neg).collect();
        Polynomial::from_coefficients(coefficients, self.prime.clone())
    }

    pub fn sub(&self, other: &Polynomial) -> Result<Polynomial> {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Polynomial) -> Result<Polynomial> {
        self.check_compatible(other)?;

        if self.is_zero() || other.is_zero() {
            return Ok(Polynomial::zero(&self.prime));
        }

        let len = self.coefficients.len() + other.coefficients.len() - 1;
        let mut product = vec![ModInt::zero(&self.prime); len];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                product[i + j] = product[i + j].add(&a.mul(b)?)?;
            }
        }

        Ok(Polynomial::from_coefficients(product, self.prime.clone()))
    }

    /// Multiplies every coefficient by `factor`.
    pub fn scale(&self, factor: &ModInt) -> Result<Polynomial> {
        let coefficients = self
            .coefficients
            .iter()
            .map(|c| c.mul(factor))
            .collect::<Result<Vec<_>>>()?;

        Ok(Polynomial::from_coefficients(coefficients, self.prime.clone()))
    }

    ///
    /// Long division: returns `(q, r)` with `self = q * divisor + r` and
    /// `deg(r) < deg(divisor)`.
    ///
    pub fn div_rem(&self, divisor: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        self.check_compatible(divisor)?;

        let lead = divisor
            .leading_coefficient()
            .ok_or(EccError::DivisionByZeroPolynomial)?;
        let lead_inverse = lead.inverse()?;
        let divisor_len = divisor.coefficients.len();

        let mut remainder = self.coefficients.clone();
        let quotient_len = (remainder.len() + 1).saturating_sub(divisor_len);
        let mut quotient = vec![ModInt::zero(&self.prime); quotient_len];

        while remainder.len() >= divisor_len {
            let shift = remainder.len() - divisor_len;
            let factor = match remainder.last() {
                Some(top) => top.mul(&lead_inverse)?,
                None => break,
            };

            for (i, d) in divisor.coefficients.iter().enumerate() {
                remainder[shift + i] = remainder[shift + i].sub(&d.mul(&factor)?)?;
            }
            quotient[shift] = factor;
            trim(&mut remainder);
        }

        Ok((
            Polynomial::from_coefficients(quotient, self.prime.clone()),
            Polynomial::from_coefficients(remainder, self.prime.clone()),
        ))
    }

    pub fn rem(&self, divisor: &Polynomial) -> Result<Polynomial> {
        Ok(self.div_rem(divisor)?.1)
    }

    pub fn pow(&self, exponent: u32) -> Result<Polynomial> {
        let mut result = Polynomial::one(&self.prime);
        let mut base = self.clone();
        let mut e = exponent;

        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base)?;
            }
            base = base.mul(&base)?;
            e >>= 1;
        }

        Ok(result)
    }

    /// `self^exponent mod modulus` by square-and-multiply.
    pub fn pow_mod(&self, exponent: &BigUint, modulus: &Polynomial) -> Result<Polynomial> {
        let mut result = Polynomial::one(&self.prime).rem(modulus)?;
        let base = self.rem(modulus)?;

        for i in (0..exponent.bits()).rev() {
            result = result.mul(&result)?.rem(modulus)?;
            if exponent.bit(i) {
                result = result.mul(&base)?.rem(modulus)?;
            }
        }

        Ok(result)
    }

    /// Divides by the leading coefficient. The zero polynomial stays zero.
    pub fn monic(&self) -> Result<Polynomial> {
        match self.leading_coefficient() {
            Some(lead) if !lead.is_one() => self.scale(&lead.inverse()?),
            _ => Ok(self.clone()),
        }
    }

    /// Horner evaluation at `x`.
    pub fn evaluate(&self, x: &ModInt) -> Result<ModInt> {
        let mut acc = ModInt::zero(&self.prime);
        for c in self.coefficients.iter().rev() {
            acc = acc.mul(x)?.add(c)?;
        }
        Ok(acc)
    }

    ///
    /// Extended Euclidean algorithm for polynomials.
    ///
    /// Returns `(d, s, t)` with `g * s + h * t = d`, where `d` is the monic
    /// greatest common divisor (zero only when both inputs are zero).
    ///
    pub fn extended_gcd(
        g: &Polynomial,
        h: &Polynomial,
    ) -> Result<(Polynomial, Polynomial, Polynomial)> {
        g.check_compatible(h)?;
        let prime = &g.prime;

        let (mut old_r, mut r) = (g.clone(), h.clone());
        let (mut old_s, mut s) = (Polynomial::one(prime), Polynomial::zero(prime));
        let (mut old_t, mut t) = (Polynomial::zero(prime), Polynomial::one(prime));

        while !r.is_zero() {
            let (q, remainder) = old_r.div_rem(&r)?;
            old_r = std::mem::replace(&mut r, remainder);

            let next_s = old_s.sub(&q.mul(&s)?)?;
            old_s = std::mem::replace(&mut s, next_s);

            let next_t = old_t.sub(&q.mul(&t)?)?;
            old_t = std::mem::replace(&mut t, next_t);
        }

        match old_r.leading_coefficient() {
            Some(lead) if !lead.is_one() => {
                let k = lead.inverse()?;
                Ok((old_r.scale(&k)?, old_s.scale(&k)?, old_t.scale(&k)?))
            }
            _ => Ok((old_r, old_s, old_t)),
        }
    }

    ///
    /// Rabin's test: a polynomial `f` of degree `m` is irreducible iff
    /// `gcd(f, X^(p^i) - X) = 1` for every `1 <= i <= m / 2`.
    ///
    /// Constants and the zero polynomial are not irreducible.
    ///
    pub fn is_irreducible(&self) -> Result<bool> {
        let degree = match self.degree() {
            Some(d) if d >= 1 => d,
            _ => return Ok(false),
        };

        let f = self.monic()?;
        let x = Polynomial::x(&self.prime);
        let mut u = x.clone();
        for _ in 1..=degree / 2 {
            u = u.pow_mod(&self.prime, &f)?;
            let (d, _, _) = Polynomial::extended_gcd(&f, &u.sub(&x)?)?;
            if !d.is_one() {
                return Ok(false);
            }
        }

        Ok(true)
    }

    ///
    /// Draws random monic polynomials with a nonzero constant term until one
    /// is irreducible.
    ///
    pub fn random_irreducible<R: RandomSource + ?Sized>(
        degree: usize,
        prime: &BigUint,
        rng: &mut R,
    ) -> Result<Polynomial> {
        if degree == 0 {
            return Err(EccError::InvalidFieldParameters(
                "an irreducible polynomial needs degree at least 1".to_string(),
            ));
        }
        ModInt::new(0, prime.clone())?;

        let zero = BigUint::zero();
        let top = prime - 1u32;
        loop {
            let mut coefficients = Vec::with_capacity(degree + 1);
            coefficients.push(BigInt::from(rng.random_in_range(&BigUint::one(), &top)));
            for _ in 1..degree {
                coefficients.push(BigInt::from(rng.random_in_range(&zero, &top)));
            }
            coefficients.push(BigInt::one());

            let candidate = Polynomial::new(coefficients, prime.clone())?;
            if candidate.is_irreducible()? {
                return Ok(candidate);
            }
        }
    }

    pub fn check_compatible(&self, other: &Polynomial) -> Result<()> {
        if self.prime != other.prime {
            return Err(EccError::IncompatibleModulus {
                left: self.prime.clone(),
                right: other.prime.clone(),
            });
        }
        Ok(())
    }
}

fn trim(coefficients: &mut Vec<ModInt>) {
    while coefficients.last().map_or(false, ModInt::is_zero) {
        coefficients.pop();
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let terms = self
            .coefficients
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| !c.is_zero())
            .map(|(exponent, c)| match (exponent, c.is_one()) {
                (0, _) => format!("{}", c),
                (1, true) => "X".to_string(),
                (1, false) => format!("{}*X", c),
                (_, true) => format!("X^{}", exponent),
                (_, false) => format!("{}*X^{}", c, exponent),
            })
            .collect::<Vec<_>>();

        write!(f, "{}", terms.join(" + "))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn poly(coefficients: &[i64], p: u32) -> Polynomial {
        Polynomial::new(coefficients.iter().copied(), BigUint::from(p)).unwrap()
    }

    #[test]
    fn test_canonical_form() {
        assert_eq!(poly(&[1, 0, 0], 2).degree(), Some(0));
        assert_eq!(poly(&[1, 0, 2], 2), poly(&[1], 2));
        assert!(poly(&[0, 0], 2).is_zero());
        assert_eq!(poly(&[0, 0], 2).degree(), None);
        assert_eq!(
            poly(&[2, 0, 0, 1], 3).leading_coefficient().map(ModInt::value),
            Some(&BigUint::one())
        );
        assert_eq!(poly(&[-1, 5], 7), poly(&[6, 5], 7));
    }

    #[test]
    fn test_arithmetic_gf2() {
        let f = poly(&[0, 0, 1], 2);
        let g = poly(&[1, 1], 2);

        assert_eq!(f.to_string(), "X^2");
        assert_eq!(g.to_string(), "X + 1");
        assert_eq!(f.add(&g).unwrap().to_string(), "X^2 + X + 1");
        assert_eq!(f.mul(&g).unwrap().to_string(), "X^3 + X^2");
        assert_eq!(f.pow(3).unwrap().to_string(), "X^6");
        assert_eq!(g.sub(&g).unwrap(), Polynomial::zero(&BigUint::from(2u32)));
    }

    #[test]
    fn test_display() {
        assert_eq!(poly(&[3, 0, 2], 5).to_string(), "2*X^2 + 3");
        assert_eq!(poly(&[0, 4], 5).to_string(), "4*X");
        assert_eq!(poly(&[], 5).to_string(), "0");
    }

    #[test]
    fn test_div_rem() {
        // X^2 + 2X + 3 = (X + 1)(X + 1) + 2 over F_5
        let dividend = poly(&[3, 2, 1], 5);
        let divisor = poly(&[1, 1], 5);

        let (q, r) = dividend.div_rem(&divisor).unwrap();
        assert_eq!(q, poly(&[1, 1], 5));
        assert_eq!(r, poly(&[2], 5));
        assert_eq!(q.mul(&divisor).unwrap().add(&r).unwrap(), dividend);

        // a smaller dividend is its own remainder
        let (q, r) = divisor.div_rem(&dividend).unwrap();
        assert!(q.is_zero());
        assert_eq!(r, divisor);
    }

    #[test]
    fn test_div_rem_non_monic_divisor() {
        let dividend = poly(&[1, 2, 3, 4, 5], 7);
        let divisor = poly(&[3, 0, 2], 7);

        let (q, r) = dividend.div_rem(&divisor).unwrap();
        assert!(r.degree() < divisor.degree());
        assert_eq!(q.mul(&divisor).unwrap().add(&r).unwrap(), dividend);
    }

    #[test]
    fn test_div_by_zero() {
        let f = poly(&[1, 1], 5);
        assert_eq!(
            f.div_rem(&Polynomial::zero(&BigUint::from(5u32))),
            Err(EccError::DivisionByZeroPolynomial)
        );
    }

    #[test]
    fn test_incompatible_primes() {
        let f = poly(&[1, 1], 5);
        let g = poly(&[1, 1], 7);
        assert!(matches!(f.add(&g), Err(EccError::IncompatibleModulus { .. })));
        assert!(matches!(f.mul(&g), Err(EccError::IncompatibleModulus { .. })));
    }

    #[test]
    fn test_extended_gcd_gf2() {
        let f = poly(&[0, 0, 0, 1], 2);
        let g = poly(&[1, 0, 1, 1], 2);

        let (d, s, t) = Polynomial::extended_gcd(&f, &g).unwrap();
        assert_eq!(d, poly(&[1], 2));
        assert_eq!(s.to_string(), "X^2 + X + 1");
        assert_eq!(t.to_string(), "X^2 + 1");
    }

    #[test]
    fn test_extended_gcd_is_monic() {
        // 2(X + 1)(X + 2) and 3(X + 1) over F_7
        let g = poly(&[4, 6, 2], 7);
        let h = poly(&[3, 3], 7);

        let (d, s, t) = Polynomial::extended_gcd(&g, &h).unwrap();
        assert_eq!(d, poly(&[1, 1], 7));
        assert_eq!(g.mul(&s).unwrap().add(&h.mul(&t).unwrap()).unwrap(), d);
    }

    #[test]
    fn test_extended_gcd_with_zero() {
        let g = poly(&[2, 4], 7);
        let zero = Polynomial::zero(&BigUint::from(7u32));

        let (d, s, t) = Polynomial::extended_gcd(&g, &zero).unwrap();
        assert_eq!(d, poly(&[4, 1], 7));
        assert_eq!(g.mul(&s).unwrap().add(&zero.mul(&t).unwrap()).unwrap(), d);
    }

    #[test]
    fn test_is_irreducible() {
        assert!(poly(&[1, 1, 1], 2).is_irreducible().unwrap());
        assert!(!poly(&[1, 0, 1], 2).is_irreducible().unwrap());
        assert!(poly(&[1, 0, 1, 1], 2).is_irreducible().unwrap());
        assert!(poly(&[1, 1, 0, 0, 1], 2).is_irreducible().unwrap());
        assert!(!poly(&[1, 0, 1, 0, 1], 2).is_irreducible().unwrap());
        assert!(poly(&[1, 1, 1, 1, 1], 2).is_irreducible().unwrap());
        assert!(poly(&[1, 0, 1], 3).is_irreducible().unwrap());
        assert!(!poly(&[2, 0, 1], 3).is_irreducible().unwrap());
        assert!(poly(&[0, 1], 2).is_irreducible().unwrap());
        assert!(!poly(&[1], 2).is_irreducible().unwrap());
    }

    #[test]
    fn test_random_irreducible() {
        let irreducible_degree_4 = [
            poly(&[1, 1, 0, 0, 1], 2),
            poly(&[1, 1, 1, 1, 1], 2),
            poly(&[1, 0, 0, 1, 1], 2),
        ];
        let mut rng = StdRng::seed_from_u64(5040);
        let two = BigUint::from(2u32);

        for _ in 0..5 {
            let f = Polynomial::random_irreducible(4, &two, &mut rng).unwrap();
            assert!(irreducible_degree_4.contains(&f), "{}", f);
        }

        assert!(Polynomial::random_irreducible(0, &two, &mut rng).is_err());
    }

    #[test]
    fn test_integer_conversion() {
        let two = BigUint::from(2u32);
        let f = Polynomial::from_integer(&BigUint::from(0b10011u32), &two).unwrap();

        assert_eq!(f.to_string(), "X^4 + X + 1");
        assert_eq!(f.to_integer(), BigUint::from(19u32));
        assert!(Polynomial::from_integer(&BigUint::zero(), &two).unwrap().is_zero());

        // 2 + 1 * 3 + 2 * 9 over F_3
        let g = Polynomial::from_integer(&BigUint::from(23u32), &BigUint::from(3u32)).unwrap();
        assert_eq!(g, poly(&[2, 1, 2], 3));
    }

    #[test]
    fn test_evaluate() {
        // 2 + 3*2 + 2^2 = 12 = 5 mod 7
        let f = poly(&[2, 3, 1], 7);
        let x = ModInt::new(2, BigUint::from(7u32)).unwrap();

        assert_eq!(f.evaluate(&x).unwrap().value(), &BigUint::from(5u32));
    }
}
