use log::debug;

use crate::error::Error;
use crate::ubigint::{UBigInt, LIMB_BITS};

impl UBigInt {
    pub fn bitand_ref(&self, other: &Self) -> Self {
        // implicit zero limbs of the shorter side clear the rest
        let len = self.size().min(other.size());
        let limbs = (0..len).map(|i| self.limbs[i] & other.limbs[i]).collect();
        self.adopt(limbs)
    }

    pub fn bitor_ref(&self, other: &Self) -> Self { self.zip_longest(other, |a, b| a | b) }

    pub fn bitxor_ref(&self, other: &Self) -> Self { self.zip_longest(other, |a, b| a ^ b) }

    // Sized to the longer operand, the shorter one zero-extended.
    fn zip_longest(&self, other: &Self, op: impl Fn(u64, u64) -> u64) -> Self {
        let (greater, smaller) = if self.size() >= other.size() {
            (&self.limbs, &other.limbs)
        } else {
            (&other.limbs, &self.limbs)
        };
        let mut limbs = greater.clone();
        for (limb, &rhs) in limbs.iter_mut().zip(smaller.iter()) {
            *limb = op(*limb, rhs);
        }
        self.adopt(limbs)
    }

    /// Inverts every bit of the current limbs.
    pub fn not_ref(&self) -> Self { self.adopt(self.limbs.iter().map(|limb| !limb).collect()) }

    /// `self << amount`. Refused when the result would not fit the soft limit.
    pub fn try_shl(&self, amount: u64) -> Result<Self, Error> {
        let mut result = self.clone();
        result.try_shl_assign(amount)?;
        Ok(result)
    }

    pub fn try_shl_assign(&mut self, amount: u64) -> Result<(), Error> {
        if self.is_zero() || amount == 0 {
            return Ok(());
        }
        let limb_shift = usize::try_from(amount / LIMB_BITS as u64).unwrap_or(usize::MAX);
        let bit_shift = (amount % LIMB_BITS as u64) as u32;

        self.shrink();
        let len = self.size();
        let spills = bit_shift > 0 && self.limbs[len - 1] >> (LIMB_BITS - bit_shift) != 0;
        let required = len.saturating_add(limb_shift).saturating_add(spills as usize);
        if required > self.max_limbs {
            debug!("refusing shift left by {} bits: {} limbs over soft limit {}", amount, required, self.max_limbs);
            return Err(Error::CapacityExceeded {
                requested: required,
                limit: self.max_limbs,
            });
        }

        if bit_shift > 0 {
            let complement = LIMB_BITS - bit_shift;
            let mut spill = 0u64;
            for limb in self.limbs_mut().iter_mut() {
                let high = *limb >> complement;
                *limb = (*limb << bit_shift) | spill;
                spill = high;
            }
            if spill != 0 {
                self.resize(len + 1, false)?;
                self.limbs_mut()[len] = spill;
            }
        }

        if limb_shift > 0 {
            let len = self.size();
            self.resize(len + limb_shift, false)?;
            let limbs = self.limbs_mut();
            limbs.copy_within(0..len, limb_shift);
            limbs[..limb_shift].fill(0);
        }
        Ok(())
    }

    /// `self >> amount`.
    pub fn shr_bits(&self, amount: u64) -> Self {
        let mut result = self.clone();
        result.shr_assign_bits(amount);
        result
    }

    pub fn shr_assign_bits(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        let limb_shift = usize::try_from(amount / LIMB_BITS as u64).unwrap_or(usize::MAX);
        let bit_shift = (amount % LIMB_BITS as u64) as u32;
        if limb_shift >= self.size() {
            self.set_zero();
            return;
        }

        if bit_shift > 0 {
            let complement = LIMB_BITS - bit_shift;
            let mut spill = 0u64;
            for limb in self.limbs_mut().iter_mut().rev() {
                let low = *limb << complement;
                *limb = (*limb >> bit_shift) | spill;
                spill = low;
            }
            // bits spilled out of limb 0 are gone
        }

        if limb_shift > 0 {
            let len = self.size();
            self.limbs_mut().copy_within(limb_shift..len, 0);
            self.truncate(len - limb_shift);
        }
        self.shrink();
    }
}
