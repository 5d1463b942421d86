//! Per-level verification threshold.
//!
//! The threshold scales with membership:
//! - 0 members → never verified (an empty kulture cannot vouch for anything)
//! - n members → ceil(n × 1/2) upvotes required
//!
//! Rounding is always up so a minority can't verify its own take.

/// A take must collect upvotes from 1/VERIFY_DIVISOR of a kulture's members.
pub const VERIFY_DIVISOR: u64 = 2;

/// Upvotes required to verify a take in a kulture of `member_count` members.
///
/// Formula: ceil(n × 1/2)
///
/// # Examples
///
/// ```
/// use kulture_ranking::required_votes;
///
/// assert_eq!(required_votes(1), 1);
/// assert_eq!(required_votes(3), 2);
/// assert_eq!(required_votes(10), 5);
/// ```
pub const fn required_votes(member_count: u64) -> u64 {
    member_count.div_ceil(VERIFY_DIVISOR)
}

/// Check whether `upvotes` verify a take at a level with `member_count` members.
pub const fn is_level_verified(upvotes: u64, member_count: u64) -> bool {
    member_count > 0 && upvotes >= required_votes(member_count)
}

/// How many more upvotes are needed at this level.
///
/// `Some(0)` once verified, `None` for an empty kulture that can never verify.
pub const fn votes_needed(upvotes: u64, member_count: u64) -> Option<u64> {
    if member_count == 0 {
        return None;
    }
    let threshold = required_votes(member_count);
    if upvotes >= threshold {
        Some(0)
    } else {
        Some(threshold - upvotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_rounds_up() {
        let test_cases = [
            (1, 1),    // 0.5 → 1
            (2, 1),    // 1.0 → 1
            (3, 2),    // 1.5 → 2
            (4, 2),    // 2.0 → 2
            (5, 3),    // 2.5 → 3
            (10, 5),   // 5.0 → 5
            (99, 50),  // 49.5 → 50
            (100, 50), // 50.0 → 50
        ];

        for (members, expected) in test_cases {
            assert_eq!(
                required_votes(members),
                expected,
                "required_votes({}) should be {}",
                members,
                expected
            );
        }
    }

    #[test]
    fn threshold_handles_extreme_counts() {
        assert_eq!(required_votes(u64::MAX), u64::MAX / 2 + 1);
    }

    #[test]
    fn empty_kulture_never_verifies() {
        assert_eq!(required_votes(0), 0);
        assert!(!is_level_verified(0, 0));
        assert!(!is_level_verified(1_000, 0));
    }

    #[test]
    fn threshold_never_exceeds_members() {
        for n in 0..=200 {
            assert!(required_votes(n) <= n, "required_votes({}) exceeds n", n);
        }
    }

    #[test]
    fn threshold_monotonic() {
        let mut prev = 0;
        for n in 0..=200 {
            let t = required_votes(n);
            assert!(t >= prev, "threshold should be monotonic");
            prev = t;
        }
    }

    #[test]
    fn minority_cannot_verify() {
        for n in 1..=200u64 {
            let minority = (n - 1) / 2;
            assert!(
                !is_level_verified(minority, n),
                "{} of {} should not verify",
                minority,
                n
            );
        }
    }

    #[test]
    fn verified_checks() {
        assert!(is_level_verified(5, 10));
        assert!(!is_level_verified(4, 10));
        assert!(is_level_verified(1, 2));
        assert!(!is_level_verified(1, 100));
    }

    #[test]
    fn votes_needed_calculation() {
        assert_eq!(votes_needed(0, 0), None);
        assert_eq!(votes_needed(0, 1), Some(1));
        assert_eq!(votes_needed(2, 10), Some(3));
        assert_eq!(votes_needed(5, 10), Some(0));
        assert_eq!(votes_needed(9, 10), Some(0));
    }
}
