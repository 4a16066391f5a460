//! AI Entitlement Gate: per-user, per-calendar-month, per-category
//! consumption limits tied to the user's current subscription plan.
//!
//! Calling convention for every AI feature handler:
//! `check_limit` → perform the generation → `record_usage` (exactly once,
//! only after the generation succeeded). Two in-flight requests from the
//! same user can both pass `check_limit` before either records; the limit
//! is soft, bounded by that user's own concurrency. The increment itself
//! is a single atomic upsert, so counters stay consistent.

pub mod clock;
pub mod gate;
pub mod handlers;
pub mod plan;
pub mod store;

use thiserror::Error;

pub use clock::{Clock, SystemClock};
pub use gate::EntitlementGate;
pub use plan::{Category, PlanType};
pub use store::{MeteringStore, PgMeteringStore};

#[derive(Debug, Error)]
pub enum MeteringError {
    /// The user has exhausted (or never had) quota for a category this
    /// month. Carries no further detail; callers surface a fixed
    /// upgrade-your-plan message.
    #[error("AI generation limit reached for this category")]
    LimitExceeded,

    /// Infrastructure failure. Never collapsed into `LimitExceeded`, and
    /// never treated as "no usage row".
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
