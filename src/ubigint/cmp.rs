use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::ubigint::UBigInt;

// Length without leading zero limbs, at least 1.
pub(crate) fn significant_len(limbs: &[u64]) -> usize {
    limbs.iter().rposition(|&limb| limb != 0).map_or(1, |top| top + 1)
}

// Compares as if both sides were normalized first: a longer significant length
// decides outright, otherwise the first differing limb from the top does.
pub(crate) fn cmp_limbs(a: &[u64], b: &[u64]) -> Ordering {
    let a = &a[..significant_len(a).min(a.len())];
    let b = &b[..significant_len(b).min(b.len())];
    a.len().cmp(&b.len()).then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

impl UBigInt {
    /// Three-way magnitude comparison.
    pub fn compare(&self, other: &Self) -> Ordering { cmp_limbs(&self.limbs, &other.limbs) }
}

impl PartialEq for UBigInt {
    fn eq(&self, other: &Self) -> bool { self.compare(other) == Ordering::Equal }
}

impl Eq for UBigInt {}

impl PartialOrd for UBigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.compare(other)) }
}

impl Ord for UBigInt {
    fn cmp(&self, other: &Self) -> Ordering { self.compare(other) }
}

impl Hash for UBigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs[..significant_len(&self.limbs)].hash(state);
    }
}

impl PartialEq<u64> for UBigInt {
    fn eq(&self, other: &u64) -> bool { cmp_limbs(&self.limbs, &[*other]) == Ordering::Equal }
}

impl PartialOrd<u64> for UBigInt {
    fn partial_cmp(&self, other: &u64) -> Option<Ordering> { Some(cmp_limbs(&self.limbs, &[*other])) }
}

#[cfg(test)]
mod test {
    use super::*;
    use num_bigint::{BigUint, RandomBits};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_cmp_ignores_leading_zero_limbs() {
        assert_eq!(cmp_limbs(&[5, 0, 0], &[5]), Ordering::Equal);
        assert_eq!(cmp_limbs(&[0], &[0, 0]), Ordering::Equal);
        assert_eq!(cmp_limbs(&[1, 1], &[u64::MAX, 0]), Ordering::Greater);
        assert_eq!(cmp_limbs(&[u64::MAX], &[0, 1]), Ordering::Less);
        assert_eq!(cmp_limbs(&[3, 7], &[4, 7]), Ordering::Less);
    }

    #[test]
    fn test_cmp_u64() {
        let a = UBigInt::from(1234u64);
        assert!(a == 1234u64);
        assert!(a > 1233u64);
        assert!(a < 1235u64);
        assert!(UBigInt::from_limbs(vec![0, 1]).unwrap() > u64::MAX);
    }

    #[test]
    fn test_cmp() {
        let mut prng = ChaCha20Rng::seed_from_u64(0);
        for _ in 0..100 {
            let bits_a = prng.gen_range(1..400);
            let bits_b = prng.gen_range(1..400);
            let a: BigUint = prng.sample(RandomBits::new(bits_a));
            let b: BigUint = prng.sample(RandomBits::new(bits_b));
            let ua = UBigInt::try_from(&a).unwrap();
            let ub = UBigInt::try_from(&b).unwrap();
            assert_eq!(ua.cmp(&ub), a.cmp(&b));
            assert_eq!(ub.cmp(&ua), b.cmp(&a));
            assert_eq!(ua.cmp(&ua.clone()), Ordering::Equal);
        }
    }
}
