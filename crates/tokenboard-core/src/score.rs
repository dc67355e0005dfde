//! XP score derivation
//!
//! XP is the engagement score shown on the leaderboard: a flat join bonus,
//! one point per million tokens, ten points per request. All integer
//! arithmetic, so there is no rounding to argue about.

/// Flat XP granted for showing up at all
pub const JOIN_BONUS: u64 = 100;

/// Tokens per single XP point
pub const TOKENS_PER_XP: u64 = 1_000_000;

/// XP granted per request
pub const XP_PER_REQUEST: u64 = 10;

/// Compute the XP score from aggregate totals
///
/// # Examples
/// ```
/// use tokenboard_core::score::xp_score;
///
/// assert_eq!(xp_score(450_000_000, 1_200), 100 + 450 + 12_000);
/// ```
pub fn xp_score(total_tokens: u64, total_requests: u64) -> u64 {
    JOIN_BONUS + total_tokens / TOKENS_PER_XP + total_requests * XP_PER_REQUEST
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_usage_still_earns_the_join_bonus() {
        assert_eq!(xp_score(0, 0), 100);
    }

    #[test]
    fn token_points_use_floor_division() {
        assert_eq!(xp_score(999_999, 0), 100);
        assert_eq!(xp_score(1_000_000, 0), 101);
        assert_eq!(xp_score(1_999_999, 0), 101);
    }

    #[test]
    fn documented_example() {
        assert_eq!(xp_score(450_000_000, 1_200), 12_550);
    }

    proptest! {
        #[test]
        fn score_is_monotonic_in_both_inputs(
            tokens in 0u64..1_000_000_000_000,
            requests in 0u64..1_000_000,
        ) {
            let base = xp_score(tokens, requests);
            prop_assert!(xp_score(tokens + TOKENS_PER_XP, requests) > base);
            prop_assert!(xp_score(tokens, requests + 1) > base);
        }
    }
}
