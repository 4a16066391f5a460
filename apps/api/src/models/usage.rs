#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user, per-calendar-month AI generation counters.
/// Keyed by the unique composite `(user_id, month, year)`; created lazily
/// by the first increment in a month, so an absent row reads as all-zero.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AiUsageRow {
    pub user_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub resumes_generated: i32,
    pub cover_letters_generated: i32,
    pub interviews_generated: i32,
}
