//! 一致性轮询：写入后（或读取前）有界地重复查询，直到条件成立。
//!
//! Consistency polling.
//!
//! The vector store is eventually consistent: a successful insert is not
//! immediately visible to reads. Instead of surfacing spurious empty results the
//! client re-queries a bounded number of times. Running out of attempts is not an
//! error; the last observed value is returned with `converged = false`.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

pub const WRITE_MAX_RETRIES: u32 = 5;
pub const WRITE_RETRY_DELAY_MS: u64 = 3000;
pub const READ_MAX_RETRIES: u32 = 1;
pub const READ_RETRY_DELAY_MS: u64 = 0;

fn default_max_retries() -> u32 {
    WRITE_MAX_RETRIES
}

fn default_retry_delay_ms() -> u64 {
    WRITE_RETRY_DELAY_MS
}

/// Per-call consistency requirement.
///
/// `max_retries` is the total number of probes. Use [`ConsistencyPolicy::write`]
/// for inserts and [`ConsistencyPolicy::read`] for searches to get the matching
/// defaults. When deserialized, missing fields fall back to disabled and the
/// write budget, so `{"enabled": true}` means 5 probes 3000 ms apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyPolicy {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay between probes, in milliseconds.
    #[serde(rename = "retry_delay", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl ConsistencyPolicy {
    /// Enabled, 5 probes, 3000 ms apart.
    pub fn write() -> Self {
        Self {
            enabled: true,
            max_retries: WRITE_MAX_RETRIES,
            retry_delay_ms: WRITE_RETRY_DELAY_MS,
        }
    }

    /// Enabled, a single probe, no delay. Raise `max_retries` to actually poll.
    pub fn read() -> Self {
        Self {
            enabled: true,
            max_retries: READ_MAX_RETRIES,
            retry_delay_ms: READ_RETRY_DELAY_MS,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::read()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for ConsistencyPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Result of a polling loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome<T> {
    /// Last value returned by the probe.
    pub value: T,
    /// Number of probes issued (at least one).
    pub attempts: u32,
    /// Whether the predicate held for `value`.
    pub converged: bool,
}

/// Probe until `predicate` holds or `max_attempts` probes were made.
///
/// Sleeps `delay` between probes, never after the last one. A probe error
/// propagates immediately; the probe is expected to go through the retrying
/// transport, which already spent its own budget on it. `max_attempts == 0`
/// behaves like 1.
pub async fn wait_for_condition<T, P, Fut, C>(
    mut probe: P,
    predicate: C,
    max_attempts: u32,
    delay: Duration,
) -> Result<PollOutcome<T>>
where
    P: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    C: Fn(&T) -> bool,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let value = probe().await?;
        let converged = predicate(&value);
        debug!(attempt, max_attempts, converged, "consistency probe");

        if converged {
            return Ok(PollOutcome {
                value,
                attempts: attempt,
                converged: true,
            });
        }
        if attempt >= max_attempts {
            warn!(
                attempts = attempt,
                "consistency budget exhausted, returning last observed state"
            );
            return Ok(PollOutcome {
                value,
                attempts: attempt,
                converged: false,
            });
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
