#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

use ubigint::{Radix, UBigInt};

#[derive(Debug, Arbitrary)]
enum Op {
    Add,
    Sub,
    Mul,
    DivRem,
    Shl(u16),
    Shr(u16),
    Pow(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    lhs: Vec<u64>,
    rhs: Vec<u64>,
    op: Op,
}

fuzz_target!(|input: Input| {
    let lhs = match UBigInt::from_limbs(input.lhs) {
        Ok(value) => value,
        Err(_) => return,
    };
    let rhs = match UBigInt::from_limbs(input.rhs) {
        Ok(value) => value,
        Err(_) => return,
    };
    let a = BigUint::from(&lhs);
    let b = BigUint::from(&rhs);

    match input.op {
        Op::Add => assert_eq!(BigUint::from(&(&lhs + &rhs)), &a + &b),
        Op::Sub => {
            let expected = if a >= b { &a - &b } else { BigUint::default() };
            assert_eq!(BigUint::from(&(&lhs - &rhs)), expected);
        }
        Op::Mul => assert_eq!(BigUint::from(&(&lhs * &rhs)), &a * &b),
        Op::DivRem => {
            if let Ok((q, r)) = lhs.div_rem(&rhs) {
                assert_eq!(BigUint::from(&q), &a / &b);
                assert_eq!(BigUint::from(&r), &a % &b);
            } else {
                assert!(rhs.is_zero());
            }
        }
        Op::Shl(amount) => {
            if let Ok(shifted) = lhs.try_shl(amount as u64) {
                assert_eq!(BigUint::from(&shifted), &a << amount as usize);
            }
        }
        Op::Shr(amount) => assert_eq!(BigUint::from(&(&lhs >> amount as u64)), &a >> amount as usize),
        Op::Pow(exponent) => {
            // keep the result small enough to finish quickly
            if lhs.size() <= 4 && exponent <= 32 {
                assert_eq!(BigUint::from(&lhs.pow(exponent as u64)), a.pow(exponent as u32));
            }
        }
    }

    for radix in [Radix::Decimal, Radix::Hexadecimal] {
        let text = lhs.to_string_radix(radix);
        assert_eq!(UBigInt::parse_radix(&text, radix).unwrap(), lhs);
    }
});
