use core::fmt;
use core::str::FromStr;

use log::debug;
use strum_macros::{Display, EnumIter};

use crate::error::{Error, ParseErrorKind};
use crate::ubigint::policy::grown_limit;
use crate::ubigint::{CapacityPolicy, UBigInt, ABSOLUTE_MAX_LIMBS, DEFAULT_MAX_LIMBS, LIMB_BITS};

// 10^9, the decimal packet rendered per word division
const E9: u32 = 1_000_000_000;
// 10^18, the largest power of ten one limb parses at a time
const E18: u64 = 1_000_000_000_000_000_000;
const DEC_CHUNK: usize = 18;
const HEX_CHUNK: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Radix {
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub fn base(&self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }
}

// Splits `digits` into chunks from the least significant end, so only the
// first chunk can be short.
fn right_aligned_chunks(digits: &[u8], width: usize) -> impl Iterator<Item = &[u8]> {
    let head = match digits.len() % width {
        0 => width.min(digits.len()),
        short => short,
    };
    let (first, rest) = digits.split_at(head);
    core::iter::once(first).chain(rest.chunks(width))
}

impl UBigInt {
    /// Parses ASCII decimal digits: no sign, no separators.
    pub fn from_dec_str(text: &str) -> Result<Self, Error> {
        let digits = text.as_bytes();
        if digits.is_empty() {
            return Err(ParseErrorKind::Empty.into());
        }
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(ParseErrorKind::InvalidDigit.into());
        }

        let mut value = UBigInt::zero();
        for (n, chunk) in right_aligned_chunks(digits, DEC_CHUNK).enumerate() {
            // at most 18 digits, always below 10^18
            let packet = chunk
                .iter()
                .fold(0u64, |acc, digit| acc * 10 + (digit - b'0') as u64);
            if n > 0 {
                value = value.try_mul_u64(E18)?;
            }
            value = value.try_add_u64(packet)?;
        }
        Ok(value)
    }

    /// Parses hexadecimal digits of either case, with an optional `0x`/`0X`.
    pub fn from_hex_str(text: &str) -> Result<Self, Error> {
        let text = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        let digits = text.as_bytes();
        if digits.is_empty() {
            return Err(ParseErrorKind::Empty.into());
        }
        if !digits.iter().all(u8::is_ascii_hexdigit) {
            return Err(ParseErrorKind::InvalidDigit.into());
        }

        let chunks = (digits.len() + HEX_CHUNK - 1) / HEX_CHUNK;
        let max_limbs = grown_limit(DEFAULT_MAX_LIMBS, chunks).ok_or(Error::CapacityExceeded {
            requested: chunks,
            limit: ABSOLUTE_MAX_LIMBS,
        })?;
        let mut value = UBigInt::with_policy(CapacityPolicy::new(max_limbs)?);
        for chunk in right_aligned_chunks(digits, HEX_CHUNK) {
            let mut padded = [b'0'; HEX_CHUNK];
            padded[HEX_CHUNK - chunk.len()..].copy_from_slice(chunk);
            let mut bytes = [0u8; 8];
            hex::decode_to_slice(padded, &mut bytes)
                .map_err(|_| Error::Parse(ParseErrorKind::InvalidDigit))?;

            value.try_shl_assign(LIMB_BITS as u64)?;
            value.limbs_mut()[0] |= u64::from_be_bytes(bytes);
        }
        Ok(value)
    }

    pub fn parse_radix(text: &str, radix: Radix) -> Result<Self, Error> {
        match radix {
            Radix::Decimal => UBigInt::from_dec_str(text),
            Radix::Hexadecimal => UBigInt::from_hex_str(text),
        }
    }

    /// Parses `text`, falling back to zero when it is malformed.
    pub fn parse_or_zero(text: &str, radix: Radix) -> Self {
        UBigInt::parse_radix(text, radix).unwrap_or_else(|err| {
            debug!("{} text {:?} parsed as zero: {}", radix, text, err);
            UBigInt::zero()
        })
    }

    // Base 10^9 packets, least significant first. Memoized until the next
    // mutation.
    pub(crate) fn decimal_packets(&self) -> &[u32] {
        self.decimal.get_or_init(|| {
            let mut packets = Vec::with_capacity(self.size() * 64 / 29 + 1);
            let mut dividend = self.clone();
            while !dividend.is_zero() {
                let Ok((quotient, packet)) = dividend.div_rem_word(E9) else {
                    break;
                };
                packets.push(packet);
                dividend = quotient;
            }
            if packets.is_empty() {
                packets.push(0);
            }
            packets
        })
    }

    /// Number of decimal digits, 1 for zero.
    pub fn decimal_digits(&self) -> usize {
        let packets = self.decimal_packets();
        let top = packets[packets.len() - 1];
        let top_digits = top.checked_ilog10().map_or(1, |log| log as usize + 1);
        (packets.len() - 1) * 9 + top_digits
    }

    fn to_dec_digits(&self) -> String {
        let packets = self.decimal_packets();
        let mut text = String::with_capacity(packets.len() * 9);
        let mut iter = packets.iter().rev();
        if let Some(top) = iter.next() {
            text.push_str(&top.to_string());
        }
        for packet in iter {
            text.push_str(&format!("{:09}", packet));
        }
        text
    }

    fn to_hex_digits(&self) -> String {
        let mut iter = self.limbs[..super::cmp::significant_len(&self.limbs)].iter().rev();
        let mut text = String::with_capacity(self.size() * 16);
        if let Some(top) = iter.next() {
            text.push_str(&format!("{:X}", top));
        }
        for limb in iter {
            text.push_str(&hex::encode_upper(limb.to_be_bytes()));
        }
        text
    }

    /// `0x` followed by uppercase hex digits, e.g. `0x4D2`.
    pub fn to_hex_string(&self) -> String { format!("0x{}", self.to_hex_digits()) }

    pub fn to_string_radix(&self, radix: Radix) -> String {
        match radix {
            Radix::Decimal => self.to_dec_digits(),
            Radix::Hexadecimal => self.to_hex_string(),
        }
    }
}

impl fmt::Display for UBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad_integral(true, "", &self.to_dec_digits()) }
}

impl fmt::Debug for UBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "UBigInt({})", self.to_hex_string()) }
}

impl fmt::UpperHex for UBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad_integral(true, "0x", &self.to_hex_digits()) }
}

impl fmt::LowerHex for UBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_hex_digits().to_ascii_lowercase())
    }
}

impl FromStr for UBigInt {
    type Err = Error;

    /// Decimal, or hexadecimal when prefixed with `0x`/`0X`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.starts_with("0x") || text.starts_with("0X") {
            UBigInt::from_hex_str(text)
        } else {
            UBigInt::from_dec_str(text)
        }
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for UBigInt {
                fn from(value: $t) -> Self { UBigInt::from_u64(value as u64) }
            }
        )*
    };
}

impl_from_primitive!(u8, u16, u32, u64, usize);

impl From<u128> for UBigInt {
    fn from(value: u128) -> Self {
        UBigInt::zero().adopt(vec![value as u64, (value >> 64) as u64])
    }
}
