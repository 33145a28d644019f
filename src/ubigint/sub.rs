use core::cmp::Ordering;

use crate::ubigint::UBigInt;

impl UBigInt {
    /// `self - other`, or zero when `other` is larger. Never wraps.
    pub fn clamped_sub(&self, other: &Self) -> Self {
        if self.compare(other) == Ordering::Less {
            return self.new_like();
        }

        let mut limbs = self.limbs.clone();
        let mut borrow = false;
        for (i, &rhs) in other.limbs.iter().enumerate() {
            // other may carry leading zero limbs past our length
            if i >= limbs.len() {
                break;
            }
            let before = limbs[i];
            let diff = before.wrapping_sub(rhs).wrapping_sub(borrow as u64);
            borrow = diff > before || (diff == before && borrow);
            limbs[i] = diff;
        }
        for limb in limbs.iter_mut().skip(other.limbs.len()) {
            if !borrow {
                break;
            }
            borrow = *limb == 0;
            *limb = limb.wrapping_sub(1);
        }
        assert!(!borrow, "borrow past the most significant limb of a checked subtraction");

        self.adopt(limbs)
    }

    /// Subtracts one in place, stopping at zero.
    pub fn dec(&mut self) { *self -= 1u64; }
}
