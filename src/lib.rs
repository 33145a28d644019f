pub mod error;
pub mod ubigint;

pub use error::{Error, ParseErrorKind};
pub use ubigint::{CapacityPolicy, Radix, UBigInt, ABSOLUTE_MAX_LIMBS, DEFAULT_MAX_LIMBS};
