//! Capabilities the schemes consume but do not implement themselves:
//! a source of uniformly random integers and a message hash.

use crate::error::{EccError, Result};
use num_bigint::{BigUint, RandBigInt};
use rand::RngCore;

/// Supplies uniformly random integers.
pub trait RandomSource {
    ///
    /// Returns an integer drawn uniformly from `[low, high]`, both ends
    /// inclusive. When `high <= low` the result is `low`.
    ///
    fn random_in_range(&mut self, low: &BigUint, high: &BigUint) -> BigUint;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn random_in_range(&mut self, low: &BigUint, high: &BigUint) -> BigUint {
        if high <= low {
            return low.clone();
        }
        self.gen_biguint_range(low, &(high + 1u32))
    }
}

/// Maps a message to an integer for signing.
pub trait MessageHash {
    fn hash_to_integer(&self, message: &[u8]) -> Result<BigUint>;
}

///
/// SHA-256 of the message read as a big-endian integer.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha256Hash;

impl MessageHash for Sha256Hash {
    fn hash_to_integer(&self, message: &[u8]) -> Result<BigUint> {
        let digest = sha256::digest(message);
        let bytes = hex::decode(&digest).map_err(|e| EccError::InvalidEncoding(e.to_string()))?;

        Ok(BigUint::from_bytes_be(&bytes))
    }
}

impl<F> MessageHash for F
where
    F: Fn(&[u8]) -> BigUint,
{
    fn hash_to_integer(&self, message: &[u8]) -> Result<BigUint> {
        Ok(self(message))
    }
}
