use crate::error::Error;
use crate::ubigint::{UBigInt, LOW_HALF};

// Splits every limb into two 32-bit halves held in 64-bit words, so any product
// of two halves fits in a word. Leading zero halves are dropped.
fn expand(limbs: &[u64]) -> Vec<u64> {
    let mut halves: Vec<u64> = limbs
        .iter()
        .flat_map(|&limb| [limb & LOW_HALF, limb >> 32])
        .collect();
    while halves.len() > 1 && halves[halves.len() - 1] == 0 {
        halves.pop();
    }
    halves
}

impl UBigInt {
    /// Schoolbook `self * other` over half-width limbs.
    pub fn try_mul(&self, other: &Self) -> Result<Self, Error> {
        if self.is_zero() || other.is_zero() {
            return Ok(self.new_like());
        }

        let a = expand(&self.limbs);
        let b = expand(&other.limbs);
        let mut answer_len = a.len() + b.len() + 1;
        answer_len += answer_len & 1;

        // the product has at most a.len() + b.len() halves
        let mut result = self.new_like();
        result.resize((a.len() + b.len() + 1) / 2, true)?;

        // answer[k] accumulates the column for 2^(32k)
        let mut answer = vec![0u64; answer_len];
        for idx in 0..answer_len - 1 {
            for i in (0..=idx.min(a.len() - 1)).rev() {
                let j = idx - i;
                if j >= b.len() {
                    break;
                }
                let product = a[i] * b[j];
                let (sum, overflow) = answer[idx].overflowing_add(product);
                answer[idx] = sum;
                if overflow {
                    // 2^64 at column idx is 1 at column idx + 2
                    answer[idx + 2] += 1;
                }
            }
            answer[idx + 1] += answer[idx] >> 32;
            answer[idx] &= LOW_HALF;
        }

        let out = result.limbs_mut();
        for (limb, pair) in out.iter_mut().zip(answer.chunks_exact(2)) {
            *limb = pair[0] | (pair[1] << 32);
        }
        result.shrink();
        Ok(result)
    }

    pub fn try_mul_u64(&self, other: u64) -> Result<Self, Error> { self.try_mul(&UBigInt::from_u64(other)) }
}
