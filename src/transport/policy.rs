use crate::client::config::ClientConfig;
use crate::Error;
use std::time::Duration;

/// Decision for how to proceed after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Request-level retry policy: bounded attempts with exponential backoff.
///
/// - `max_retries` is the total number of attempts (minimum one).
/// - attempt `n` (0-based) that fails retryably sleeps `retry_delay * 2^n`.
/// - no sleep after the final attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay_duration())
    }

    /// Number of attempts one logical request may use.
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.retry_delay.saturating_mul(factor)
    }

    /// Decide what to do after attempt `attempt` (0-based) failed with `err`.
    pub(crate) fn decide(&self, err: &Error, attempt: u32) -> Decision {
        if !err.is_retryable() {
            return Decision::Fail;
        }
        if attempt + 1 >= self.attempts() {
            return Decision::Fail;
        }
        Decision::Retry {
            delay: self.backoff_delay(attempt),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            crate::client::config::DEFAULT_MAX_RETRIES,
            Duration::from_secs_f64(crate::client::config::DEFAULT_RETRY_DELAY_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let p = RetryPolicy::new(4, Duration::from_millis(500));
        assert_eq!(p.backoff_delay(0), Duration::from_millis(500));
        assert_eq!(p.backoff_delay(1), Duration::from_millis(1000));
        assert_eq!(p.backoff_delay(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_backoff_saturates() {
        let p = RetryPolicy::new(100, Duration::from_secs(1));
        assert!(p.backoff_delay(64) >= p.backoff_delay(31));
    }

    #[test]
    fn test_decide() {
        let p = RetryPolicy::new(3, Duration::from_secs(1));
        let net = Error::network("refused");
        assert_eq!(
            p.decide(&net, 0),
            Decision::Retry {
                delay: Duration::from_secs(1)
            }
        );
        assert_eq!(
            p.decide(&net, 1),
            Decision::Retry {
                delay: Duration::from_secs(2)
            }
        );
        assert_eq!(p.decide(&net, 2), Decision::Fail);
        assert_eq!(p.decide(&Error::authentication(), 0), Decision::Fail);
    }

    #[test]
    fn test_zero_retries_still_attempts_once() {
        let p = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(p.attempts(), 1);
        assert_eq!(p.decide(&Error::network("x"), 0), Decision::Fail);
    }
}
