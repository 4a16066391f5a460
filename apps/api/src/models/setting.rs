#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A runtime-toggleable configuration entry. `key` is globally unique;
/// absence of a key is a valid state; callers supply defaults.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}
