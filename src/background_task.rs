use tokio::time::{interval, Duration};

use crate::limiter::rate_limiter::SubmissionLimiter;

/// Periodically forgets clients whose rate-limit windows have expired.
pub async fn start_limiter_eviction_task(limiter: SubmissionLimiter, every: Duration) {
    let mut interval = interval(every);

    loop {
        interval.tick().await;

        let evicted = limiter.evict_idle();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = limiter.tracked_keys(), "Evicted idle rate-limit keys");
        }
    }
}
