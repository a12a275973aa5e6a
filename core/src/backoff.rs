//! Retry backoff policies.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay policy applied between retries of registration, reconnection, and
/// outcome reporting.
///
/// `Exponential` applies full jitter: the computed delay is scaled by a
/// uniform random factor in `[0.5, 1.0]` so that a fleet of agents losing the
/// same coordinator does not retry in lockstep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BackoffPolicy {
    /// Fixed delay between attempts.
    Fixed {
        /// Delay between attempts in milliseconds.
        delay_ms: u64,
        /// Maximum number of attempts (None = infinite).
        max_attempts: Option<u32>,
    },

    /// Exponential backoff between attempts.
    Exponential {
        /// Initial delay before the first retry in milliseconds.
        initial_delay_ms: u64,
        /// Maximum delay between attempts in milliseconds.
        max_delay_ms: u64,
        /// Multiplier for each subsequent attempt.
        multiplier: f64,
        /// Whether to apply jitter to the computed delay.
        jitter: bool,
        /// Maximum number of attempts (None = infinite).
        max_attempts: Option<u32>,
    },
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::Exponential {
            initial_delay_ms: 1000,
            max_delay_ms: 60_000,
            multiplier: 2.0,
            jitter: true,
            max_attempts: None,
        }
    }
}

impl BackoffPolicy {
    /// Creates a fixed delay policy with unlimited attempts.
    pub fn fixed(delay: Duration) -> Self {
        Self::Fixed {
            delay_ms: delay.as_millis() as u64,
            max_attempts: None,
        }
    }

    /// Creates a fixed delay policy with a bounded number of attempts.
    pub fn fixed_with_max(delay: Duration, max_attempts: u32) -> Self {
        Self::Fixed {
            delay_ms: delay.as_millis() as u64,
            max_attempts: Some(max_attempts),
        }
    }

    /// Creates an exponential policy with custom settings and jitter enabled.
    pub fn exponential(
        initial_delay: Duration,
        max_delay: Duration,
        multiplier: f64,
        max_attempts: Option<u32>,
    ) -> Self {
        Self::Exponential {
            initial_delay_ms: initial_delay.as_millis() as u64,
            max_delay_ms: max_delay.as_millis() as u64,
            multiplier,
            jitter: true,
            max_attempts,
        }
    }

    /// Delay before retry number `attempt` (0-based), or `None` once the
    /// attempt budget is exhausted.
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        match self {
            Self::Fixed {
                delay_ms,
                max_attempts,
            } => {
                if max_attempts.is_some_and(|max| attempt >= max) {
                    return None;
                }
                Some(Duration::from_millis(*delay_ms))
            }
            Self::Exponential {
                initial_delay_ms,
                max_delay_ms,
                multiplier,
                jitter,
                max_attempts,
            } => {
                if max_attempts.is_some_and(|max| attempt >= max) {
                    return None;
                }
                let raw = (*initial_delay_ms as f64) * multiplier.powi(attempt as i32);
                let capped = (raw as u64).min(*max_delay_ms);
                let delayed = if *jitter {
                    let factor = rand::thread_rng().gen_range(0.5..=1.0);
                    (capped as f64 * factor) as u64
                } else {
                    capped
                };
                Some(Duration::from_millis(delayed))
            }
        }
    }

    /// Check if the attempt budget has been spent.
    pub fn is_exhausted(&self, attempt: u32) -> bool {
        match self {
            Self::Fixed { max_attempts, .. } | Self::Exponential { max_attempts, .. } => {
                max_attempts.is_some_and(|max| attempt >= max)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_policy() {
        let policy = BackoffPolicy::fixed(Duration::from_secs(5));
        assert_eq!(policy.delay_for(0), Some(Duration::from_secs(5)));
        assert_eq!(policy.delay_for(100), Some(Duration::from_secs(5)));
        assert!(!policy.is_exhausted(100));
    }

    #[test]
    fn test_fixed_policy_with_max() {
        let policy = BackoffPolicy::fixed_with_max(Duration::from_secs(5), 3);
        assert!(policy.delay_for(2).is_some());
        assert!(policy.delay_for(3).is_none());
        assert!(policy.is_exhausted(3));
    }

    #[test]
    fn test_exponential_growth_and_cap() {
        let policy = BackoffPolicy::Exponential {
            initial_delay_ms: 100,
            max_delay_ms: 10_000,
            multiplier: 2.0,
            jitter: false,
            max_attempts: None,
        };

        assert_eq!(policy.delay_for(0), Some(Duration::from_millis(100)));
        assert_eq!(policy.delay_for(1), Some(Duration::from_millis(200)));
        assert_eq!(policy.delay_for(2), Some(Duration::from_millis(400)));
        // 100 * 2^10 = 102400, capped at 10000
        assert_eq!(policy.delay_for(10), Some(Duration::from_millis(10_000)));
    }

    #[test]
    fn test_exponential_jitter_bounds() {
        let policy = BackoffPolicy::Exponential {
            initial_delay_ms: 1000,
            max_delay_ms: 60_000,
            multiplier: 2.0,
            jitter: true,
            max_attempts: None,
        };

        for attempt in 0..5 {
            let expected_max = Duration::from_millis(1000 * 2u64.pow(attempt));
            let delay = policy.delay_for(attempt).unwrap();
            assert!(delay <= expected_max);
            assert!(delay >= expected_max / 2);
        }
    }

    #[test]
    fn test_exponential_max_attempts() {
        let policy = BackoffPolicy::exponential(
            Duration::from_millis(100),
            Duration::from_secs(10),
            2.0,
            Some(5),
        );
        assert!(policy.delay_for(4).is_some());
        assert!(policy.delay_for(5).is_none());
        assert!(policy.is_exhausted(5));
    }

    #[test]
    fn test_policy_serde() {
        let policy = BackoffPolicy::fixed_with_max(Duration::from_secs(5), 10);
        let json = serde_json::to_string(&policy).unwrap();
        let parsed: BackoffPolicy = serde_json::from_str(&json).unwrap();

        match parsed {
            BackoffPolicy::Fixed {
                delay_ms,
                max_attempts,
            } => {
                assert_eq!(delay_ms, 5000);
                assert_eq!(max_attempts, Some(10));
            }
            _ => panic!("expected Fixed"),
        }
    }
}
