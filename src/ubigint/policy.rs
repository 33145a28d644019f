use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Hard ceiling on the number of limbs of any value (1 GiB of limbs).
pub const ABSOLUTE_MAX_LIMBS: usize = 134_217_728;

/// Soft limit a fresh value starts with (256 KiB of limbs).
pub const DEFAULT_MAX_LIMBS: usize = 32_768;

/// Growth policy owned by every `UBigInt`.
///
/// `max_limbs` is the soft limit. Arithmetic results may double it until they
/// fit, left shifts may not. Nothing ever exceeds [`ABSOLUTE_MAX_LIMBS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyConfig")]
pub struct CapacityPolicy {
    max_limbs: usize,
}

#[derive(Deserialize)]
struct PolicyConfig {
    max_limbs: usize,
}

impl TryFrom<PolicyConfig> for CapacityPolicy {
    type Error = Error;

    fn try_from(config: PolicyConfig) -> Result<Self, Self::Error> {
        CapacityPolicy::new(config.max_limbs)
    }
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        CapacityPolicy {
            max_limbs: DEFAULT_MAX_LIMBS,
        }
    }
}

impl CapacityPolicy {
    pub fn new(max_limbs: usize) -> Result<Self, Error> {
        if max_limbs == 0 || max_limbs > ABSOLUTE_MAX_LIMBS {
            return Err(Error::CapacityExceeded {
                requested: max_limbs,
                limit: ABSOLUTE_MAX_LIMBS,
            });
        }
        Ok(CapacityPolicy { max_limbs })
    }

    pub fn max_limbs(&self) -> usize { self.max_limbs }

    pub fn absolute_max_limbs(&self) -> usize { ABSOLUTE_MAX_LIMBS }
}

// Soft limit after doubling `current` until `required` limbs fit, capped at the
// absolute ceiling. None when `required` is past the ceiling.
pub(crate) fn grown_limit(current: usize, required: usize) -> Option<usize> {
    if required > ABSOLUTE_MAX_LIMBS {
        return None;
    }
    let mut limit = current.max(1);
    while limit < required {
        limit = limit.saturating_mul(2);
    }
    Some(limit.min(ABSOLUTE_MAX_LIMBS))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_policy_bounds() {
        assert_eq!(CapacityPolicy::default().max_limbs(), DEFAULT_MAX_LIMBS);
        assert!(CapacityPolicy::new(0).is_err());
        assert!(CapacityPolicy::new(ABSOLUTE_MAX_LIMBS).is_ok());
        assert_eq!(
            CapacityPolicy::new(ABSOLUTE_MAX_LIMBS + 1),
            Err(Error::CapacityExceeded {
                requested: ABSOLUTE_MAX_LIMBS + 1,
                limit: ABSOLUTE_MAX_LIMBS
            })
        );
    }

    #[test]
    fn test_grown_limit() {
        assert_eq!(grown_limit(4, 3), Some(4));
        assert_eq!(grown_limit(4, 5), Some(8));
        assert_eq!(grown_limit(4, 33), Some(64));
        assert_eq!(grown_limit(DEFAULT_MAX_LIMBS, ABSOLUTE_MAX_LIMBS), Some(ABSOLUTE_MAX_LIMBS));
        // 3 * 2^26 overshoots the ceiling and gets capped
        assert_eq!(grown_limit(3, ABSOLUTE_MAX_LIMBS - 1), Some(ABSOLUTE_MAX_LIMBS));
        assert_eq!(grown_limit(4, ABSOLUTE_MAX_LIMBS + 1), None);
    }

    #[test]
    fn test_policy_config() {
        let policy: CapacityPolicy = serde_json::from_str(r#"{"max_limbs": 4096}"#).unwrap();
        assert_eq!(policy.max_limbs(), 4096);
        assert_eq!(serde_json::to_string(&policy).unwrap(), r#"{"max_limbs":4096}"#);
        assert!(serde_json::from_str::<CapacityPolicy>(r#"{"max_limbs": 0}"#).is_err());
    }
}
