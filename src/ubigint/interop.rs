use num_bigint::BigUint;
use num_traits::{
    CheckedAdd, CheckedDiv, CheckedMul, CheckedRem, CheckedSub, Num, One, Pow, ToPrimitive,
    Unsigned, Zero,
};

use crate::error::{Error, ParseErrorKind};
use crate::ubigint::{cmp, UBigInt};

impl TryFrom<&BigUint> for UBigInt {
    type Error = Error;

    fn try_from(value: &BigUint) -> Result<Self, Error> { UBigInt::from_limbs(value.to_u64_digits()) }
}

impl TryFrom<BigUint> for UBigInt {
    type Error = Error;

    fn try_from(value: BigUint) -> Result<Self, Error> { UBigInt::try_from(&value) }
}

impl From<&UBigInt> for BigUint {
    fn from(value: &UBigInt) -> Self {
        let digits = value
            .limbs()
            .iter()
            .flat_map(|&limb| [limb as u32, (limb >> 32) as u32])
            .collect();
        BigUint::new(digits)
    }
}

impl From<UBigInt> for BigUint {
    fn from(value: UBigInt) -> Self { BigUint::from(&value) }
}

impl Zero for UBigInt {
    fn zero() -> Self { UBigInt::default() }

    fn is_zero(&self) -> bool { self.bits() == 0 }
}

impl One for UBigInt {
    fn one() -> Self { UBigInt::from_u64(1) }
}

impl Num for UBigInt {
    type FromStrRadixErr = Error;

    fn from_str_radix(text: &str, radix: u32) -> Result<Self, Error> {
        match radix {
            10 => UBigInt::from_dec_str(text),
            16 => UBigInt::from_hex_str(text),
            _ => Err(ParseErrorKind::UnsupportedRadix(radix).into()),
        }
    }
}

impl Unsigned for UBigInt {}

impl Pow<u64> for UBigInt {
    type Output = UBigInt;

    fn pow(self, exponent: u64) -> UBigInt { UBigInt::pow(&self, exponent) }
}

impl Pow<u64> for &UBigInt {
    type Output = UBigInt;

    fn pow(self, exponent: u64) -> UBigInt { UBigInt::pow(self, exponent) }
}

impl ToPrimitive for UBigInt {
    fn to_i64(&self) -> Option<i64> { self.to_u64().and_then(|value| i64::try_from(value).ok()) }

    fn to_u64(&self) -> Option<u64> {
        match cmp::significant_len(self.limbs()) {
            1 => Some(self.low_u64()),
            _ => None,
        }
    }

    fn to_u128(&self) -> Option<u128> {
        let limbs = self.limbs();
        match cmp::significant_len(limbs) {
            1 => Some(limbs[0] as u128),
            2 => Some(((limbs[1] as u128) << 64) | limbs[0] as u128),
            _ => None,
        }
    }
}

impl CheckedAdd for UBigInt {
    fn checked_add(&self, other: &Self) -> Option<Self> { self.try_add(other).ok() }
}

impl CheckedSub for UBigInt {
    fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self < other {
            return None;
        }
        Some(self.clamped_sub(other))
    }
}

impl CheckedMul for UBigInt {
    fn checked_mul(&self, other: &Self) -> Option<Self> { self.try_mul(other).ok() }
}

impl CheckedDiv for UBigInt {
    fn checked_div(&self, other: &Self) -> Option<Self> { self.div_rem(other).ok().map(|(quotient, _)| quotient) }
}

impl CheckedRem for UBigInt {
    fn checked_rem(&self, other: &Self) -> Option<Self> { self.div_rem(other).ok().map(|(_, remainder)| remainder) }
}
