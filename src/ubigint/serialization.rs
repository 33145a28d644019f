use serde::de::Error as _;
use serde::Deserialize;
use serde::Serialize;

use crate::ubigint::UBigInt;

// Decimal text on the way out, decimal or 0x-prefixed hex on the way in.
impl Serialize for UBigInt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UBigInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse::<UBigInt>()
            .map_err(|err| D::Error::custom(format!("invalid integer {:?}: {}", text, err)))
    }
}
