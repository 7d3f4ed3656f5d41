//! Rolling-window request limiter keyed by client

use crate::io::configuration::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_MS};
use crate::io::error::{BouquetError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond wall clock
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> u64;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        unix_millis()
    }
}

/// Milliseconds since the Unix epoch, zero if the clock is before it
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}

/// Clock that only moves when told to, clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading `start_ms`
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Seconds until a slot frees up, present only when denied
    pub retry_after_secs: Option<u64>,
}

/// Allows a fixed number of requests per client within a rolling window
///
/// Only allowed requests are recorded; denied ones do not extend the wait.
#[derive(Debug)]
pub struct RateLimiter<C = SystemClock> {
    clock: C,
    max_requests: usize,
    window_ms: u64,
    history: HashMap<String, Vec<u64>>,
}

impl Default for RateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter<SystemClock> {
    /// Limiter with the default budget on the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    /// Limiter with the default budget on a custom clock
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            max_requests: RATE_LIMIT_MAX_REQUESTS,
            window_ms: RATE_LIMIT_WINDOW_MS,
            history: HashMap::new(),
        }
    }

    /// Override the request budget and window length
    #[must_use]
    pub const fn with_limits(mut self, max_requests: usize, window_ms: u64) -> Self {
        self.max_requests = max_requests;
        self.window_ms = window_ms;
        self
    }

    /// Record a request from `client_key` if it fits in the window
    ///
    /// Expired timestamps are dropped for every client first, and clients
    /// left with none are forgotten.
    pub fn check(&mut self, client_key: &str) -> RateDecision {
        let now = self.clock.now_ms();
        let window_ms = self.window_ms;
        self.history.retain(|_, timestamps| {
            timestamps.retain(|&t| now.saturating_sub(t) < window_ms);
            !timestamps.is_empty()
        });

        let recent = self.history.get(client_key).map_or(&[][..], Vec::as_slice);
        if recent.len() >= self.max_requests {
            let oldest = recent.iter().copied().min().unwrap_or(now);
            let wait_ms = (oldest + window_ms).saturating_sub(now);
            return RateDecision {
                allowed: false,
                retry_after_secs: Some(wait_ms.div_ceil(1000)),
            };
        }

        self.history
            .entry(client_key.to_string())
            .or_default()
            .push(now);
        RateDecision {
            allowed: true,
            retry_after_secs: None,
        }
    }

    /// Number of clients with requests still inside the window
    pub fn tracked_clients(&self) -> usize {
        self.history.len()
    }

    /// Like [`Self::check`], but a denial becomes an error
    ///
    /// # Errors
    ///
    /// Returns [`BouquetError::RateLimited`] when the client is over budget
    pub fn enforce(&mut self, client_key: &str) -> Result<()> {
        let decision = self.check(client_key);
        if decision.allowed {
            Ok(())
        } else {
            Err(BouquetError::RateLimited {
                retry_after_secs: decision.retry_after_secs.unwrap_or(self.window_ms / 1000),
            })
        }
    }
}
