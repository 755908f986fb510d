use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::time::Duration;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const LIMITER_EVICTION_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Seconds workers get to finish in-flight requests on shutdown.
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
