use core::cmp::Ordering;
use core::num::NonZeroU32;

use log::{debug, trace};
use num_traits::ToPrimitive;

use crate::error::Error;
use crate::ubigint::{UBigInt, ABSOLUTE_MAX_LIMBS, LOW_HALF};

// 2^32, the base of one half limb
const PACKET: u64 = 1 << 32;

impl UBigInt {
    /// Quotient and remainder of `self / divisor`.
    ///
    /// Divisors that fit in 32 bits take the word algorithm, wider ones the
    /// bit-by-bit long division.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), Error> {
        if divisor.is_zero() {
            debug!("division by zero");
            return Err(Error::DivisionByZero);
        }
        if self.compare(divisor) == Ordering::Less {
            return Ok((self.new_like(), self.clone()));
        }
        if let Some(word) = divisor.to_word().and_then(NonZeroU32::new) {
            trace!("word division of {} limbs by {}", self.size(), word);
            let (quotient, remainder) = self.div_rem_nonzero_word(word);
            let mut remainder_big = self.new_like();
            remainder_big.limbs_mut()[0] = remainder as u64;
            return Ok((quotient, remainder_big));
        }
        trace!("long division of {} limbs by {} limbs", self.size(), divisor.size());
        self.div_rem_long(divisor)
    }

    /// Quotient and remainder of `self / divisor` for a 32-bit divisor.
    pub fn div_rem_word(&self, divisor: u32) -> Result<(Self, u32), Error> {
        match NonZeroU32::new(divisor) {
            Some(divisor) => Ok(self.div_rem_nonzero_word(divisor)),
            None => {
                debug!("division by zero");
                Err(Error::DivisionByZero)
            }
        }
    }

    // Walks the half limbs from the top carrying a remainder r < d. With
    // 2^32 = pq * d + pr, the next partial dividend r * 2^32 + h equals
    // r * pq * d + (r * pr + h), so its quotient digit is
    // r * pq + (r * pr + h) / d and no intermediate leaves 64 bits.
    pub(crate) fn div_rem_nonzero_word(&self, divisor: NonZeroU32) -> (Self, u32) {
        let d = divisor.get() as u64;
        let packet_quotient = PACKET / d;
        let packet_remainder = PACKET % d;

        let mut quotient = vec![0u64; self.size()];
        let mut remainder = 0u64;
        for (i, &limb) in self.limbs.iter().enumerate().rev() {
            let mut digits = [0u64; 2];
            for (k, half) in [(1, limb >> 32), (0, limb & LOW_HALF)] {
                let folded = remainder * packet_remainder + half;
                digits[k] = remainder * packet_quotient + folded / d;
                remainder = folded % d;
            }
            quotient[i] = (digits[1] << 32) | digits[0];
        }
        (self.adopt(quotient), remainder as u32)
    }

    // Shift-and-subtract long division, one quotient bit per step.
    pub(crate) fn div_rem_long(&self, divisor: &Self) -> Result<(Self, Self), Error> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.compare(divisor) == Ordering::Less {
            return Ok((self.new_like(), self.clone()));
        }

        let mut shift = self.bits() - divisor.bits();
        // never wider than the dividend, so it fits the dividend's policy
        let mut shifted = self.adopt(divisor.limbs.clone());
        shifted.try_shl_assign(shift)?;

        let mut quotient = self.new_like();
        let mut product = self.new_like();
        loop {
            quotient.try_shl_assign(1)?;
            let trial = product.try_add(&shifted)?;
            if trial.compare(self) != Ordering::Greater {
                product = trial;
                quotient.limbs_mut()[0] |= 1;
            }
            shifted.shr_assign_bits(1);
            if shift == 0 {
                break;
            }
            shift -= 1;
        }

        let remainder = self.clamped_sub(&product);
        assert!(
            remainder.compare(divisor) == Ordering::Less,
            "long division left a remainder not below the divisor"
        );
        assert!(
            quotient.try_mul(divisor)?.compare(&product) == Ordering::Equal,
            "long division quotient does not reproduce the subtracted product"
        );
        Ok((quotient, remainder))
    }

    /// Binary exponentiation. `0^0` is 1.
    pub fn try_pow(&self, exponent: u64) -> Result<Self, Error> {
        let mut result = self.new_like();
        result.limbs_mut()[0] = 1;
        if exponent == 0 {
            return Ok(result);
        }
        if self.is_zero() {
            return Ok(self.new_like());
        }

        let mut base = self.clone();
        let mut exponent = exponent;
        loop {
            if exponent & 1 == 1 {
                result = result.try_mul(&base)?;
            }
            exponent >>= 1;
            if exponent == 0 {
                break;
            }
            base = base.try_mul(&base)?;
        }
        Ok(result)
    }

    /// `self^exponent`, or `self` unchanged if the result cannot be stored.
    pub fn pow(&self, exponent: u64) -> Self {
        self.try_pow(exponent).unwrap_or_else(|err| {
            debug!("pow refused: {}", err);
            self.clone()
        })
    }

    pub fn pow_assign(&mut self, exponent: u64) {
        if let Ok(result) = self.try_pow(exponent) {
            *self = result;
        }
    }

    /// Exponentiation by a big exponent. Only 0 and 1 survive an exponent
    /// past 64 bits, anything larger is refused.
    pub fn try_pow_big(&self, exponent: &Self) -> Result<Self, Error> {
        match exponent.to_u64() {
            Some(exponent) => self.try_pow(exponent),
            None if self.compare(&UBigInt::one()) != Ordering::Greater => Ok(self.clone()),
            None => {
                debug!("refusing pow with a {}-bit exponent", exponent.bits());
                Err(Error::CapacityExceeded {
                    requested: usize::MAX,
                    limit: ABSOLUTE_MAX_LIMBS,
                })
            }
        }
    }

    pub fn pow_big(&self, exponent: &Self) -> Self {
        self.try_pow_big(exponent).unwrap_or_else(|err| {
            debug!("pow refused: {}", err);
            self.clone()
        })
    }

    pub fn pow_big_assign(&mut self, exponent: &Self) {
        if let Ok(result) = self.try_pow_big(exponent) {
            *self = result;
        }
    }
}

#[cfg(test)]
mod test {
    use crate::error::Error;
    use crate::ubigint::UBigInt;
    use core::num::NonZeroU32;
    use num_bigint::{BigUint, RandomBits};
    use num_traits::{One, Pow, Zero};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_div_rem() {
        let mut prng = ChaCha20Rng::seed_from_u64(0);
        for _ in 0..100 {
            let bits_a = prng.gen_range(1..600);
            let bits_b = prng.gen_range(1..400);
            let a: BigUint = prng.sample(RandomBits::new(bits_a));
            let mut b: BigUint = prng.sample(RandomBits::new(bits_b));
            if b.is_zero() {
                b = BigUint::one();
            }

            let ua = UBigInt::try_from(&a).unwrap();
            let ub = UBigInt::try_from(&b).unwrap();
            let (q, r) = ua.div_rem(&ub).unwrap();
            assert_eq!(BigUint::from(&q), &a / &b);
            assert_eq!(BigUint::from(&r), &a % &b);
            assert!(r < ub);
            assert_eq!(q.try_mul(&ub).unwrap().try_add(&r).unwrap(), ua);
        }
    }

    #[test]
    fn test_div_rem_word() {
        let mut prng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..100 {
            let bits_a = prng.gen_range(1..600);
            let a: BigUint = prng.sample(RandomBits::new(bits_a));
            let d: u32 = prng.gen_range(1..=u32::MAX);

            let ua = UBigInt::try_from(&a).unwrap();
            let (q, r) = ua.div_rem_word(d).unwrap();
            assert_eq!(BigUint::from(&q), &a / d);
            assert_eq!(BigUint::from(r), &a % d);
        }
    }

    #[test]
    fn test_word_and_long_division_agree() {
        let mut prng = ChaCha20Rng::seed_from_u64(2);
        let divisors = [1u32, 2, 3, 10, 1_000_000_000, u32::MAX - 1, u32::MAX];
        for _ in 0..20 {
            let a: BigUint = prng.sample(RandomBits::new(500));
            let ua = UBigInt::try_from(&a).unwrap();
            for &d in divisors.iter() {
                let (q_word, r_word) = ua.div_rem_nonzero_word(NonZeroU32::new(d).unwrap());
                let (q_long, r_long) = ua.div_rem_long(&UBigInt::from(d)).unwrap();
                assert_eq!(q_word, q_long);
                assert_eq!(UBigInt::from(r_word), r_long);
            }
        }
    }

    #[test]
    fn test_div_small_dividend() {
        let a = UBigInt::from(5u64);
        let b = UBigInt::from_limbs(vec![0, 1]).unwrap();
        let (q, r) = a.div_rem(&b).unwrap();
        assert!(q.is_zero());
        assert_eq!(r, a);

        let (q, r) = b.div_rem(&b).unwrap();
        assert_eq!(q, UBigInt::one());
        assert!(r.is_zero());
    }

    #[test]
    fn test_div_by_zero() {
        let a = UBigInt::from_limbs(vec![1, 2, 3]).unwrap();
        assert_eq!(a.div_rem(&UBigInt::zero()).unwrap_err(), Error::DivisionByZero);
        assert_eq!(a.div_rem_word(0).unwrap_err(), Error::DivisionByZero);
        assert_eq!(a.div_rem_long(&UBigInt::zero()).unwrap_err(), Error::DivisionByZero);
    }

    #[test]
    fn test_pow() {
        let mut prng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..100 {
            let bits = prng.gen_range(1..100);
            let base: BigUint = prng.sample(RandomBits::new(bits));
            let exponent: u32 = prng.gen_range(0..=20);
            let ubase = UBigInt::try_from(&base).unwrap();

            let mut repeated = UBigInt::one();
            for _ in 0..exponent {
                repeated = repeated.try_mul(&ubase).unwrap();
            }
            let fast = ubase.try_pow(exponent as u64).unwrap();
            assert_eq!(fast, repeated);
            assert_eq!(BigUint::from(&fast), Pow::pow(&base, exponent));
        }
    }

    #[test]
    fn test_pow_edge_cases() {
        assert_eq!(UBigInt::zero().pow(0), UBigInt::one());
        assert!(UBigInt::zero().pow(5).is_zero());
        assert_eq!(UBigInt::from(7u64).pow(0), UBigInt::one());
        assert_eq!(UBigInt::from(7u64).pow(1), UBigInt::from(7u64));
        assert_eq!(UBigInt::one().pow(u64::MAX), UBigInt::one());
        assert_eq!(UBigInt::from(2u64).pow(200), UBigInt::one() << 200u64);

        let mut x = UBigInt::from(10u64);
        x.pow_assign(18);
        assert_eq!(x, UBigInt::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_pow_big_exponent() {
        let three = UBigInt::from(3u64);
        assert_eq!(three.pow_big(&UBigInt::from(40u64)), three.try_pow(40).unwrap());
        assert_eq!(UBigInt::from(2u64).try_pow_big(&UBigInt::from(64u64)).unwrap().limbs(), &[0, 1]);

        // past 64 bits only 0 and 1 have a storable power
        let huge = UBigInt::from_limbs(vec![0, 1]).unwrap();
        assert!(UBigInt::zero().try_pow_big(&huge).unwrap().is_zero());
        assert_eq!(UBigInt::one().try_pow_big(&huge).unwrap(), UBigInt::one());
        assert_eq!(
            three.try_pow_big(&huge).unwrap_err(),
            Error::CapacityExceeded {
                requested: usize::MAX,
                limit: crate::ubigint::ABSOLUTE_MAX_LIMBS
            }
        );
        assert_eq!(three.pow_big(&huge), three);

        let mut x = UBigInt::from(10u64);
        x.pow_big_assign(&UBigInt::from(3u64));
        assert_eq!(x, 1000u64);
        x.pow_big_assign(&huge);
        assert_eq!(x, 1000u64);
    }
}
