//! Clock seam. Month bucketing and subscription-validity comparisons must
//! read the same wall-clock source once per logical operation, so the gate
//! takes its time from an injected `Clock` rather than calling `Utc::now()`
//! at each step.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
