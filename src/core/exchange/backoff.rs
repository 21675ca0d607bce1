//! Exponential backoff with full jitter, used by the orchestrator to
//! retry a venue connection after `stream()` returns an error.

use std::time::Duration;

use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    base: Duration,
    factor: f64,
    cap: Duration,
    attempt: u32,
}

impl Backoff {
    #[must_use]
    pub const fn new(base: Duration, factor: f64, cap: Duration) -> Self {
        Self {
            base,
            factor,
            cap,
            attempt: 0,
        }
    }

    /// Returns the delay before the next attempt and advances internal
    /// state. Full jitter: uniform in `[0, min(cap, base * factor^attempt))`.
    pub fn next_delay(&mut self) -> Duration {
        let exp = self.factor.powi(self.attempt as i32);
        let upper = (self.base.as_secs_f64() * exp).min(self.cap.as_secs_f64());
        self.attempt = self.attempt.saturating_add(1);

        let jittered = rand::thread_rng().gen_range(0.0..=upper.max(0.0));
        Duration::from_secs_f64(jittered)
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}
