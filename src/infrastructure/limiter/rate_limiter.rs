use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::errors::AppError;

/// Sliding window: the previous window's count is weighted by how much of it
/// still overlaps the trailing `window_size`.
#[derive(Debug)]
struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    current_window_start: Instant,
    current_count: u64,
    prev_count: u64,
    last_seen: Instant,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64, now: Instant) -> Self {
        Self {
            window_size,
            limit,
            current_window_start: now,
            current_count: 0,
            prev_count: 0,
            last_seen: now,
        }
    }

    /// `Err(retry_after_secs)` when the hit would exceed the limit.
    fn hit(&mut self, now: Instant) -> Result<(), u64> {
        self.last_seen = now;

        let elapsed = now.saturating_duration_since(self.current_window_start);
        if elapsed >= self.window_size {
            self.prev_count = if elapsed >= self.window_size * 2 { 0 } else { self.current_count };
            self.current_count = 0;
            self.current_window_start += self.window_size * (elapsed.as_secs_f64() / self.window_size.as_secs_f64()) as u32;
        }

        let elapsed = now.saturating_duration_since(self.current_window_start);
        let weight = elapsed.as_secs_f64() / self.window_size.as_secs_f64();
        let effective = (self.prev_count as f64) * (1.0 - weight) + (self.current_count as f64);

        if effective < self.limit as f64 {
            self.current_count += 1;
            Ok(())
        } else {
            let remaining = self.window_size.saturating_sub(elapsed);
            Err(remaining.as_secs().max(1))
        }
    }
}

/// Per-key submission limiter shared by the public forms.
#[derive(Clone)]
pub struct SubmissionLimiter {
    map: Arc<DashMap<String, Arc<Mutex<SlidingWindow>>>>,
    limit: u64,
    window_size: Duration,
}

impl SubmissionLimiter {
    pub fn new(limit: u64, window_size: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            limit,
            window_size,
        }
    }

    pub fn per_hour(limit: u64) -> Self {
        Self::new(limit, Duration::from_secs(60 * 60))
    }

    pub fn check(&self, key: &str) -> Result<(), AppError> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Result<(), AppError> {
        let window = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SlidingWindow::new(self.window_size, self.limit, now))))
            .clone();

        let result = window.lock().hit(now);
        result.map_err(|retry_after| {
            tracing::warn!(key, retry_after, "Form submission rate limited");
            AppError::RateLimited { retry_after }
        })
    }

    /// Drops keys idle for longer than two windows. Returns how many were removed.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now())
    }

    fn evict_idle_at(&self, now: Instant) -> usize {
        let ttl = self.window_size * 2;
        let before = self.map.len();
        self.map
            .retain(|_, window| now.saturating_duration_since(window.lock().last_seen) <= ttl);
        before - self.map.len()
    }

    pub fn tracked_keys(&self) -> usize {
        self.map.len()
    }
}
