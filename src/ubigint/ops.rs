//! Operator traits. These never fail: division by zero yields zero and a
//! result that cannot be stored leaves the left operand's value in place.

use core::iter::{Product, Sum};
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use log::debug;
use num_traits::ToPrimitive;

use crate::error::Error;
use crate::ubigint::UBigInt;

fn refused(lhs: &UBigInt, op: &str, err: Error) -> UBigInt {
    debug!("{} refused, keeping the left operand: {}", op, err);
    lhs.clone()
}

fn add(lhs: &UBigInt, rhs: &UBigInt) -> UBigInt {
    lhs.try_add(rhs).unwrap_or_else(|err| refused(lhs, "addition", err))
}

fn sub(lhs: &UBigInt, rhs: &UBigInt) -> UBigInt { lhs.clamped_sub(rhs) }

fn mul(lhs: &UBigInt, rhs: &UBigInt) -> UBigInt {
    lhs.try_mul(rhs).unwrap_or_else(|err| refused(lhs, "multiplication", err))
}

fn div(lhs: &UBigInt, rhs: &UBigInt) -> UBigInt {
    match lhs.div_rem(rhs) {
        Ok((quotient, _)) => quotient,
        Err(_) => lhs.new_like(),
    }
}

fn rem(lhs: &UBigInt, rhs: &UBigInt) -> UBigInt {
    match lhs.div_rem(rhs) {
        Ok((_, remainder)) => remainder,
        Err(_) => lhs.new_like(),
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident, $func:path) => {
        impl $imp<&UBigInt> for &UBigInt {
            type Output = UBigInt;

            fn $method(self, rhs: &UBigInt) -> UBigInt { $func(self, rhs) }
        }

        impl $imp<UBigInt> for &UBigInt {
            type Output = UBigInt;

            fn $method(self, rhs: UBigInt) -> UBigInt { $func(self, &rhs) }
        }

        impl $imp<&UBigInt> for UBigInt {
            type Output = UBigInt;

            fn $method(self, rhs: &UBigInt) -> UBigInt { $func(&self, rhs) }
        }

        impl $imp<UBigInt> for UBigInt {
            type Output = UBigInt;

            fn $method(self, rhs: UBigInt) -> UBigInt { $func(&self, &rhs) }
        }

        impl $imp<u64> for &UBigInt {
            type Output = UBigInt;

            fn $method(self, rhs: u64) -> UBigInt { $func(self, &UBigInt::from_u64(rhs)) }
        }

        impl $imp<u64> for UBigInt {
            type Output = UBigInt;

            fn $method(self, rhs: u64) -> UBigInt { $func(&self, &UBigInt::from_u64(rhs)) }
        }

        impl $assign_imp<&UBigInt> for UBigInt {
            fn $assign_method(&mut self, rhs: &UBigInt) { *self = $func(&*self, rhs); }
        }

        impl $assign_imp<UBigInt> for UBigInt {
            fn $assign_method(&mut self, rhs: UBigInt) { *self = $func(&*self, &rhs); }
        }

        impl $assign_imp<u64> for UBigInt {
            fn $assign_method(&mut self, rhs: u64) { *self = $func(&*self, &UBigInt::from_u64(rhs)); }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, add);
forward_binop!(Sub, sub, SubAssign, sub_assign, sub);
forward_binop!(Mul, mul, MulAssign, mul_assign, mul);
forward_binop!(Div, div, DivAssign, div_assign, div);
forward_binop!(Rem, rem, RemAssign, rem_assign, rem);
forward_binop!(BitAnd, bitand, BitAndAssign, bitand_assign, UBigInt::bitand_ref);
forward_binop!(BitOr, bitor, BitOrAssign, bitor_assign, UBigInt::bitor_ref);
forward_binop!(BitXor, bitxor, BitXorAssign, bitxor_assign, UBigInt::bitxor_ref);

impl Not for &UBigInt {
    type Output = UBigInt;

    fn not(self) -> UBigInt { self.not_ref() }
}

impl Not for UBigInt {
    type Output = UBigInt;

    fn not(self) -> UBigInt { self.not_ref() }
}

// Shift amounts as a bit count. Amounts past u64 saturate, so a left shift is
// refused and a right shift clears the value.
trait ShiftAmount {
    fn bit_count(self) -> u64;
}

impl ShiftAmount for u32 {
    fn bit_count(self) -> u64 { u64::from(self) }
}

impl ShiftAmount for u64 {
    fn bit_count(self) -> u64 { self }
}

impl ShiftAmount for usize {
    fn bit_count(self) -> u64 { u64::try_from(self).unwrap_or(u64::MAX) }
}

impl ShiftAmount for &UBigInt {
    fn bit_count(self) -> u64 { self.to_u64().unwrap_or(u64::MAX) }
}

impl ShiftAmount for UBigInt {
    fn bit_count(self) -> u64 { (&self).bit_count() }
}

macro_rules! impl_shift {
    ($($t:ty),*) => {
        $(
            impl Shl<$t> for &UBigInt {
                type Output = UBigInt;

                fn shl(self, amount: $t) -> UBigInt {
                    self.try_shl(amount.bit_count()).unwrap_or_else(|err| refused(self, "shift left", err))
                }
            }

            impl Shl<$t> for UBigInt {
                type Output = UBigInt;

                fn shl(mut self, amount: $t) -> UBigInt {
                    self <<= amount;
                    self
                }
            }

            impl ShlAssign<$t> for UBigInt {
                fn shl_assign(&mut self, amount: $t) {
                    if let Err(err) = self.try_shl_assign(amount.bit_count()) {
                        debug!("shift left refused, value unchanged: {}", err);
                    }
                }
            }

            impl Shr<$t> for &UBigInt {
                type Output = UBigInt;

                fn shr(self, amount: $t) -> UBigInt { self.shr_bits(amount.bit_count()) }
            }

            impl Shr<$t> for UBigInt {
                type Output = UBigInt;

                fn shr(mut self, amount: $t) -> UBigInt {
                    self.shr_assign_bits(amount.bit_count());
                    self
                }
            }

            impl ShrAssign<$t> for UBigInt {
                fn shr_assign(&mut self, amount: $t) { self.shr_assign_bits(amount.bit_count()); }
            }
        )*
    };
}

impl_shift!(u32, u64, usize, &UBigInt, UBigInt);

impl Sum for UBigInt {
    fn sum<I: Iterator<Item = UBigInt>>(iter: I) -> Self { iter.fold(UBigInt::zero(), |acc, x| acc + x) }
}

impl<'a> Sum<&'a UBigInt> for UBigInt {
    fn sum<I: Iterator<Item = &'a UBigInt>>(iter: I) -> Self { iter.fold(UBigInt::zero(), |acc, x| acc + x) }
}

impl Product for UBigInt {
    fn product<I: Iterator<Item = UBigInt>>(iter: I) -> Self { iter.fold(UBigInt::one(), |acc, x| acc * x) }
}

impl<'a> Product<&'a UBigInt> for UBigInt {
    fn product<I: Iterator<Item = &'a UBigInt>>(iter: I) -> Self { iter.fold(UBigInt::one(), |acc, x| acc * x) }
}
