pub mod arithmetic;
pub mod curve;
pub mod ecdh;
pub mod ecdsa;
pub mod error;
pub mod field;
pub mod keys;
pub mod polynomial;
pub mod primitives;

pub use arithmetic::{extended_gcd, ModInt};
pub use curve::{BinaryCurve, CurveGroup, Point, PrimeCurve, RationalCurve};
pub use ecdh::Ecdh;
pub use ecdsa::{Ecdsa, Signature, SigningConfig};
pub use error::{EccError, Result};
pub use field::{FieldElement, FiniteField};
pub use keys::{DomainParameters, KeyPair};
pub use polynomial::Polynomial;
pub use primitives::{MessageHash, RandomSource, Sha256Hash};
