//! Arbitrary-precision unsigned integers.
//!
//! A value is a little-endian vector of 64-bit limbs, `limbs[0]` least
//! significant. Zero is exactly one zero limb, and no operation hands back a
//! value with leading zero limbs.
//!
//! Storage only grows through [`UBigInt::resize`], which enforces the value's
//! [`CapacityPolicy`] and the absolute ceiling.

use std::sync::OnceLock;

use log::debug;

use crate::error::Error;

mod add;
mod bits;
mod cmp;
mod convert;
mod div;
mod interop;
mod mul;
mod ops;
mod policy;
mod serialization;
mod sub;

pub use convert::Radix;
pub use policy::{CapacityPolicy, ABSOLUTE_MAX_LIMBS, DEFAULT_MAX_LIMBS};

use policy::grown_limit;

pub(crate) const LIMB_BITS: u32 = 64;
pub(crate) const LOW_HALF: u64 = 0x0000_0000_FFFF_FFFF;

#[derive(Clone)]
pub struct UBigInt {
    limbs: Vec<u64>,
    max_limbs: usize,
    // base 10^9 packets, least significant first; cleared by limbs_mut()
    decimal: OnceLock<Vec<u32>>,
}

impl Default for UBigInt {
    fn default() -> Self { UBigInt::zero() }
}

impl UBigInt {
    pub fn zero() -> Self { UBigInt::with_policy(CapacityPolicy::default()) }

    pub fn one() -> Self { UBigInt::from_u64(1) }

    pub fn with_policy(policy: CapacityPolicy) -> Self {
        UBigInt {
            limbs: vec![0],
            max_limbs: policy.max_limbs(),
            decimal: OnceLock::new(),
        }
    }

    pub fn from_u64(value: u64) -> Self {
        let mut result = UBigInt::zero();
        result.limbs[0] = value;
        result
    }

    /// Builds a value from little-endian limbs. Leading zero limbs are dropped,
    /// an empty vector is zero.
    pub fn from_limbs(limbs: Vec<u64>) -> Result<Self, Error> {
        let max_limbs = grown_limit(DEFAULT_MAX_LIMBS, limbs.len()).ok_or(
            Error::CapacityExceeded {
                requested: limbs.len(),
                limit: ABSOLUTE_MAX_LIMBS,
            },
        )?;
        let mut result = UBigInt {
            limbs,
            max_limbs,
            decimal: OnceLock::new(),
        };
        if result.limbs.is_empty() {
            result.limbs.push(0);
        }
        result.shrink();
        Ok(result)
    }

    pub fn limbs(&self) -> &[u64] { &self.limbs }

    pub fn size(&self) -> usize { self.limbs.len() }

    pub fn policy(&self) -> CapacityPolicy { CapacityPolicy::new(self.max_limbs).unwrap_or_default() }

    pub fn max_limbs(&self) -> usize { self.max_limbs }

    pub fn absolute_max_limbs(&self) -> usize { ABSOLUTE_MAX_LIMBS }

    pub fn is_zero(&self) -> bool { self.limbs.iter().all(|&limb| limb == 0) }

    /// Lowest 64 bits, truncating.
    pub fn low_u64(&self) -> u64 { self.limbs[0] }

    /// Lowest 32 bits, truncating.
    pub fn low_u32(&self) -> u32 { (self.limbs[0] & LOW_HALF) as u32 }

    /// Number of significant bits, 0 for zero.
    pub fn bits(&self) -> u64 {
        let len = cmp::significant_len(&self.limbs);
        let top = self.limbs[len - 1];
        (len as u64 - 1) * LIMB_BITS as u64 + (LIMB_BITS - top.leading_zeros()) as u64
    }

    pub fn set_zero(&mut self) {
        let limbs = self.limbs_mut();
        limbs.clear();
        limbs.push(0);
    }

    // The value as a word divisor, if it fits in 32 bits.
    pub(crate) fn to_word(&self) -> Option<u32> {
        match cmp::significant_len(&self.limbs) {
            1 if self.limbs[0] <= LOW_HALF => Some(self.limbs[0] as u32),
            _ => None,
        }
    }

    // Zero sharing this value's policy.
    pub(crate) fn new_like(&self) -> Self {
        UBigInt {
            limbs: vec![0],
            max_limbs: self.max_limbs,
            decimal: OnceLock::new(),
        }
    }

    // Wraps limbs derived from existing values (so never past the absolute
    // ceiling) in this value's policy, doubling it if needed.
    pub(crate) fn adopt(&self, mut limbs: Vec<u64>) -> Self {
        debug_assert!(limbs.len() <= ABSOLUTE_MAX_LIMBS);
        if limbs.is_empty() {
            limbs.push(0);
        }
        let max_limbs = grown_limit(self.max_limbs, limbs.len()).unwrap_or(ABSOLUTE_MAX_LIMBS);
        let mut result = UBigInt {
            limbs,
            max_limbs,
            decimal: OnceLock::new(),
        };
        result.shrink();
        result
    }

    // Every mutation of the limbs goes through here so the decimal cache never
    // outlives the value it was computed from.
    pub(crate) fn limbs_mut(&mut self) -> &mut Vec<u64> {
        self.decimal.take();
        &mut self.limbs
    }

    /// Grows or shrinks to exactly `size` limbs, zero-filling new ones.
    ///
    /// Growing past the soft limit doubles it when `grow` is set and fails
    /// otherwise. Nothing grows past [`ABSOLUTE_MAX_LIMBS`]. On failure the
    /// value is untouched. A size of 0 sets the value to zero.
    pub(crate) fn resize(&mut self, size: usize, grow: bool) -> Result<(), Error> {
        if size > ABSOLUTE_MAX_LIMBS {
            debug!("refusing to resize to {} limbs: absolute ceiling", size);
            return Err(Error::CapacityExceeded {
                requested: size,
                limit: ABSOLUTE_MAX_LIMBS,
            });
        }
        if size > self.max_limbs {
            if !grow {
                debug!("refusing to resize to {} limbs: soft limit {}", size, self.max_limbs);
                return Err(Error::CapacityExceeded {
                    requested: size,
                    limit: self.max_limbs,
                });
            }
            self.max_limbs = grown_limit(self.max_limbs, size).unwrap_or(ABSOLUTE_MAX_LIMBS);
        }
        if size == 0 {
            self.set_zero();
            return Ok(());
        }
        self.limbs_mut().resize(size, 0);
        Ok(())
    }

    // Shrinking half of resize, which can never be refused.
    pub(crate) fn truncate(&mut self, size: usize) {
        let size = size.max(1);
        if size < self.limbs.len() {
            self.limbs_mut().truncate(size);
        }
    }

    /// Drops leading zero limbs, keeping at least one. Returns whether
    /// anything was removed.
    pub(crate) fn shrink(&mut self) -> bool {
        let len = cmp::significant_len(&self.limbs);
        if len == self.limbs.len() {
            return false;
        }
        // same value, the decimal cache stays valid
        self.limbs.truncate(len);
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_representation() {
        let zero = UBigInt::zero();
        assert_eq!(zero.limbs(), &[0]);
        assert!(zero.is_zero());
        assert_eq!(zero.bits(), 0);
        assert_eq!(UBigInt::from_limbs(vec![]).unwrap().limbs(), &[0]);
        assert_eq!(UBigInt::from_limbs(vec![0, 0, 0]).unwrap().limbs(), &[0]);
        assert_eq!(UBigInt::from_limbs(vec![7, 0, 3, 0, 0]).unwrap().limbs(), &[7, 0, 3]);
    }

    #[test]
    fn test_resize() {
        let mut a = UBigInt::from_u64(5);
        a.resize(4, false).unwrap();
        assert_eq!(a.limbs(), &[5, 0, 0, 0]);
        assert!(a.shrink());
        assert!(!a.shrink());
        assert_eq!(a.limbs(), &[5]);

        a.resize(0, false).unwrap();
        assert_eq!(a.limbs(), &[0]);
    }

    #[test]
    fn test_resize_respects_policy() {
        let mut a = UBigInt::with_policy(CapacityPolicy::new(4).unwrap());
        a.limbs_mut()[0] = 9;

        assert_eq!(
            a.resize(5, false),
            Err(Error::CapacityExceeded { requested: 5, limit: 4 })
        );
        assert_eq!(a.limbs(), &[9]);
        assert_eq!(a.max_limbs(), 4);

        a.resize(5, true).unwrap();
        assert_eq!(a.size(), 5);
        assert_eq!(a.max_limbs(), 8);

        assert_eq!(
            a.resize(ABSOLUTE_MAX_LIMBS + 1, true),
            Err(Error::CapacityExceeded {
                requested: ABSOLUTE_MAX_LIMBS + 1,
                limit: ABSOLUTE_MAX_LIMBS
            })
        );
        assert_eq!(a.size(), 5);
        assert_eq!(a.max_limbs(), 8);
    }

    #[test]
    fn test_bits() {
        assert_eq!(UBigInt::from_u64(1).bits(), 1);
        assert_eq!(UBigInt::from_u64(u64::MAX).bits(), 64);
        assert_eq!(UBigInt::from_limbs(vec![0, 1]).unwrap().bits(), 65);
        assert_eq!(UBigInt::from_limbs(vec![0, 0, 1 << 63]).unwrap().bits(), 192);
    }

    #[test]
    fn test_word() {
        assert_eq!(UBigInt::from_u64(7).to_word(), Some(7));
        assert_eq!(UBigInt::from_u64(u32::MAX as u64).to_word(), Some(u32::MAX));
        assert_eq!(UBigInt::from_u64(1 << 32).to_word(), None);
        assert_eq!(UBigInt::from_limbs(vec![1, 1]).unwrap().to_word(), None);
        assert_eq!(UBigInt::from_u64(0x1234_5678_9ABC_DEF0).low_u32(), 0x9ABC_DEF0);
    }
}
