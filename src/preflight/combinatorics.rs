//! Ahead-of-run sizing of exhaustive permutation tests.
//!
//! Exhaustive enumeration grows as `C(n, k)` (unpaired) or `2^n` (paired),
//! so callers should check the projected size before requesting `reps = 0`.
//! The engine itself follows the warn-and-proceed policy: these helpers
//! surface the numbers, they never block a run.

/// Combined group size above which exhaustive unpaired enumeration stops
/// being practical for interactive use (`C(16, 8)` is already 12,870
/// statistic evaluations per group pair and grows exponentially).
pub const UNPAIRED_PRACTICAL_LIMIT: usize = 16;

/// Pair count above which exhaustive sign-flip enumeration stops being
/// practical (`2^20` is about a million evaluations).
pub const PAIRED_PRACTICAL_LIMIT: usize = 20;

/// Binomial coefficient `C(n, k)` with overflow checking.
///
/// Returns `None` when the result does not fit in a `u128`.
pub fn binomial(n: u64, k: u64) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Multiply before dividing keeps the intermediate exact: the
        // running product of any i consecutive integers divides by i!.
        result = result.checked_mul((n - i) as u128)?;
        result /= (i + 1) as u128;
    }
    Some(result)
}

/// Number of relabelings an exhaustive run would evaluate.
///
/// Unpaired: `C(len_a + len_b, len_a)`. Paired: `2^len_a`. Returns `None`
/// when the count overflows a `u128`, which is a safe proxy for "do not
/// even try".
pub fn exhaustive_count(len_a: usize, len_b: usize, paired: bool) -> Option<u128> {
    if paired {
        if len_a >= 128 {
            return None;
        }
        Some(1u128 << len_a)
    } else {
        binomial((len_a + len_b) as u64, len_a as u64)
    }
}

/// Whether an exhaustive run over these group sizes stays below the
/// practical-size thresholds. A `false` here means the run may take hours;
/// it is still allowed.
pub fn exhaustive_is_practical(len_a: usize, len_b: usize, paired: bool) -> bool {
    if paired {
        len_a <= PAIRED_PRACTICAL_LIMIT
    } else {
        len_a + len_b <= UNPAIRED_PRACTICAL_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_small_values() {
        assert_eq!(binomial(6, 3), Some(20));
        assert_eq!(binomial(16, 7), Some(11_440));
        assert_eq!(binomial(5, 0), Some(1));
        assert_eq!(binomial(5, 5), Some(1));
        assert_eq!(binomial(3, 4), Some(0));
    }

    #[test]
    fn binomial_large_values_stay_exact() {
        // C(60, 30) = 118264581564861424, fits comfortably in u128.
        assert_eq!(binomial(60, 30), Some(118_264_581_564_861_424));
        // C(200, 100) overflows u64 but not u128.
        assert!(binomial(200, 100).is_some());
    }

    #[test]
    fn exhaustive_count_modes() {
        assert_eq!(exhaustive_count(3, 3, false), Some(20));
        assert_eq!(exhaustive_count(7, 9, false), Some(11_440));
        assert_eq!(exhaustive_count(8, 8, true), Some(256));
        assert_eq!(exhaustive_count(128, 128, true), None);
    }

    #[test]
    fn practicality_thresholds() {
        assert!(exhaustive_is_practical(7, 9, false));
        assert!(!exhaustive_is_practical(9, 9, false));
        assert!(exhaustive_is_practical(20, 20, true));
        assert!(!exhaustive_is_practical(21, 21, true));
    }
}
