use num_bigint::BigUint;
use thiserror::Error;

/// Errors raised by the arithmetic, the curve group law and the schemes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EccError {
    #[error("operands use different moduli: {left} and {right}")]
    IncompatibleModulus { left: BigUint, right: BigUint },

    #[error("element does not belong to the field: {0}")]
    IncompatibleField(String),

    #[error("{0} has no multiplicative inverse")]
    NotInvertible(String),

    #[error("division by the zero polynomial")]
    DivisionByZeroPolynomial,

    #[error("invalid field parameters: {0}")]
    InvalidFieldParameters(String),

    #[error("invalid curve parameters: {0}")]
    InvalidCurveParameters(String),

    #[error("point {0} does not lie on the curve")]
    InvalidPoint(String),

    #[error("public point {0} is not usable on this curve")]
    InvalidPublicPoint(String),

    #[error("private scalar is outside [1, {max}]")]
    InvalidPrivateKey { max: BigUint },

    #[error("no order found within {bound} steps")]
    OrderNotFound { bound: BigUint },

    #[error("point {0} has infinite order")]
    NoFiniteOrder(String),

    #[error("no valid nonce found after {attempts} attempts")]
    SigningFailed { attempts: u32 },

    #[error("signature verification failed")]
    InvalidSignature,

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}

pub type Result<T> = std::result::Result<T, EccError>;
