use crate::error::Error;
use crate::ubigint::UBigInt;

impl UBigInt {
    /// `self + other`, growing the soft limit if needed.
    pub fn try_add(&self, other: &Self) -> Result<Self, Error> {
        // greater by limb count, not necessarily by value
        let (greater, smaller) = if self.size() >= other.size() {
            (&self.limbs, &other.limbs)
        } else {
            (&other.limbs, &self.limbs)
        };

        let mut result = self.new_like();
        result.resize(greater.len(), true)?;

        let mut carry = false;
        let out = result.limbs_mut();
        for i in 0..smaller.len() {
            let sum = greater[i]
                .wrapping_add(smaller[i])
                .wrapping_add(carry as u64);
            // MAX + MAX + 1 wraps to exactly the greater input
            carry = sum < greater[i] || sum < smaller[i] || (sum == greater[i] && carry);
            out[i] = sum;
        }
        for i in smaller.len()..greater.len() {
            out[i] = greater[i].wrapping_add(carry as u64);
            carry = carry && out[i] == 0;
        }

        if carry {
            let top = greater.len();
            result.resize(top + 1, true)?;
            result.limbs_mut()[top] = 1;
        }
        result.shrink();
        Ok(result)
    }

    pub fn try_add_u64(&self, other: u64) -> Result<Self, Error> { self.try_add(&UBigInt::from_u64(other)) }

    /// Adds one in place. Left unchanged if the result cannot be stored.
    pub fn inc(&mut self) { *self += 1u64; }
}
