//! Delay computation for retry loops.

use std::time::Duration;

use rand::Rng;

/// Exclusive upper bound of the jitter added on top of every capped backoff.
pub const MAX_JITTER: Duration = Duration::from_millis(1000);

/// Compute the base delay before the retry following `attempt` (0-based): `2^attempt` seconds, capped at `max`.
///
/// The exponent saturates, so very large attempt counts simply settle on `max`.
pub fn capped_exponential(attempt: u32, max: Duration) -> Duration {
    std::cmp::min(Duration::from_secs(2u64.saturating_pow(attempt)), max)
}

/// Draw a uniform jitter of whole milliseconds in `[0, MAX_JITTER)`.
pub fn jitter(rng: &mut impl Rng) -> Duration {
    Duration::from_millis(rng.gen_range(0..MAX_JITTER.as_millis() as u64))
}

/// Compute an exponential backoff with additive jitter.
///
/// Jitter is applied after the cap, so the result lies in `[base, base + MAX_JITTER)`.
pub fn exponential_backoff(attempt: u32, max: Duration, rng: &mut impl Rng) -> Duration {
    capped_exponential(attempt, max).saturating_add(jitter(rng))
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn doubles_each_attempt() {
        let max = Duration::from_secs(60);

        assert_eq!(capped_exponential(0, max), Duration::from_secs(1));
        assert_eq!(capped_exponential(1, max), Duration::from_secs(2));
        assert_eq!(capped_exponential(2, max), Duration::from_secs(4));
        assert_eq!(capped_exponential(3, max), Duration::from_secs(8));
    }

    #[test]
    fn caps_at_max() {
        let max = Duration::from_secs(3);

        assert_eq!(capped_exponential(1, max), Duration::from_secs(2));
        assert_eq!(capped_exponential(2, max), max);
        assert_eq!(capped_exponential(3, max), max);
    }

    #[test]
    fn zero_max_disables_base_delay() {
        assert_eq!(capped_exponential(0, Duration::ZERO), Duration::ZERO);
        assert_eq!(capped_exponential(10, Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn large_attempts_saturate() {
        let max = Duration::from_secs(30);

        for attempt in [63, 64, 100, 1_000, u32::MAX] {
            assert_eq!(capped_exponential(attempt, max), max);
        }

        // an unbounded cap must not overflow either
        assert_eq!(
            capped_exponential(u32::MAX, Duration::MAX),
            Duration::from_secs(u64::MAX)
        );

        let mut rng = StdRng::seed_from_u64(1);
        let delay = exponential_backoff(u32::MAX, Duration::MAX, &mut rng);
        assert!(delay >= Duration::from_secs(u64::MAX));
    }

    #[test]
    fn jitter_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);

        let draws: Vec<_> = (0..500).map(|_| jitter(&mut rng)).collect();

        for d in &draws {
            assert!(*d < MAX_JITTER, "jitter out of range: {d:?}");
        }

        assert!(
            draws.windows(2).any(|w| w[0] != w[1]),
            "jitter should vary between draws"
        );
    }

    #[test]
    fn backoff_bounded_by_cap_plus_jitter() {
        let max = Duration::from_secs(3);
        let mut rng = StdRng::seed_from_u64(42);

        for attempt in 0..10 {
            let base = capped_exponential(attempt, max);
            let delay = exponential_backoff(attempt, max, &mut rng);

            assert!(base <= max);
            assert!(delay >= base, "attempt {attempt}: {delay:?} < {base:?}");
            assert!(
                delay <= max + Duration::from_millis(999),
                "attempt {attempt}: {delay:?} exceeds cap plus jitter"
            );
        }
    }
}
