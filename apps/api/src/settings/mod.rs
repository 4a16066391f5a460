//! Settings Store: runtime-toggleable configuration (feature flags, plan
//! prices), queried far more often than written.
//!
//! Handlers never query the `settings` table directly: they go through the
//! `SettingsProvider` trait carried in `AppState` as
//! `Arc<dyn SettingsProvider>`, so the backing store can be swapped (and is
//! wrapped in a read-through cache at startup; see `store::CachedSettings`).

pub mod handlers;
pub mod store;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::setting::SettingRow;

/// Well-known setting keys. Every flag read in the codebase goes through
/// one of these constants; no stringly-typed lookups at call sites.
pub mod keys {
    /// Master switch for all AI functionality. Sub-flags refine
    /// individual features beneath it.
    pub const AI_FEATURES_ENABLED: &str = "ai_features_enabled";

    pub const COVER_LETTER_AI_ENABLED: &str = "cover_letter_ai_enabled";
    pub const INTERVIEW_AI_ENABLED: &str = "interview_ai_enabled";
    pub const RESUME_TAILORING_AI_ENABLED: &str = "resume_tailoring_ai_enabled";
    pub const RESUME_EXPERIENCE_AI_ENABLED: &str = "resume_experience_ai_enabled";

    /// Plan prices in AED.
    pub const PRICE_PRO_MONTHLY: &str = "price_pro_monthly";
    pub const PRICE_BUSINESS_MONTHLY: &str = "price_business_monthly";
    pub const PRICE_PAY_PER_DOWNLOAD: &str = "price_pay_per_download";
}

/// Shipped defaults written by `initialize_defaults`.
///
/// NOTE: seeding goes through the same upsert as admin writes, so running
/// it against a customized store resets those keys to shipped values.
pub const DEFAULT_SETTINGS: &[(&str, &str, &str)] = &[
    (keys::AI_FEATURES_ENABLED, "true", "Master switch for all AI features"),
    (keys::COVER_LETTER_AI_ENABLED, "true", "AI cover letter generation"),
    (keys::INTERVIEW_AI_ENABLED, "true", "AI interview question generation"),
    (keys::RESUME_TAILORING_AI_ENABLED, "true", "AI resume tailoring against a job description"),
    (keys::RESUME_EXPERIENCE_AI_ENABLED, "true", "AI experience bullet optimization"),
    (keys::PRICE_PRO_MONTHLY, "49", "Pro plan monthly price (AED)"),
    (keys::PRICE_BUSINESS_MONTHLY, "149", "Business plan monthly price (AED)"),
    (keys::PRICE_PAY_PER_DOWNLOAD, "9", "Pay-per-download price (AED)"),
];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("setting '{key}' has non-numeric value '{value}'")]
    Parse { key: String, value: String },
}

/// A stored value is true-ish iff it equals `"true"` or `"1"` exactly.
fn is_truthy(value: &str) -> bool {
    value == "true" || value == "1"
}

/// An AI feature sub-flag: any key beneath the master flag that follows
/// the `<feature>_ai_<…>_enabled` naming convention.
fn is_ai_sub_flag(key: &str) -> bool {
    key != keys::AI_FEATURES_ENABLED && key.contains("_ai_") && key.ends_with("_enabled")
}

/// The settings seam. `get_bool` / `get_number` / `initialize_defaults`
/// are provided methods over the raw accessors, so every backend gets the
/// same interpretation semantics.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Raw stored value; `Ok(None)` when the key has never been set.
    async fn get_string(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Full row with admin metadata, for the admin surface.
    async fn get(&self, key: &str) -> Result<Option<SettingRow>, SettingsError>;

    async fn list(&self) -> Result<Vec<SettingRow>, SettingsError>;

    /// Upsert: creates the key or overwrites value, description,
    /// updated_by and updated_at.
    async fn set(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
        updated_by: Uuid,
    ) -> Result<(), SettingsError>;

    /// Boolean read with the fallback cascade: an unset AI sub-flag asked
    /// for with `default == false` falls back to the master flag
    /// `ai_features_enabled` before the supplied default. A caller that
    /// passes `default == true` gets that default verbatim; the cascade
    /// exists so sub-flags nobody has ever touched inherit the master
    /// switch, not to override an explicit opt-in default.
    async fn get_bool(&self, key: &str, default: bool) -> Result<bool, SettingsError> {
        match self.get_string(key).await? {
            Some(raw) => Ok(is_truthy(&raw)),
            None => {
                if !default && is_ai_sub_flag(key) {
                    if let Some(master) = self.get_string(keys::AI_FEATURES_ENABLED).await? {
                        if is_truthy(&master) {
                            return Ok(true);
                        }
                    }
                }
                Ok(default)
            }
        }
    }

    /// Numeric read. Absent key reads as 0; a malformed stored value is a
    /// typed `Parse` error, never a panic.
    async fn get_number(&self, key: &str) -> Result<f64, SettingsError> {
        match self.get_string(key).await? {
            None => Ok(0.0),
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| SettingsError::Parse {
                key: key.to_string(),
                value: raw,
            }),
        }
    }

    /// Writes the shipped default for every well-known key via `set`.
    /// Overwrites admin-customized values (reset-to-shipped semantics).
    async fn initialize_defaults(&self, admin_id: Uuid) -> Result<(), SettingsError> {
        for &(key, value, description) in DEFAULT_SETTINGS {
            self.set(key, value, Some(description), admin_id).await?;
        }
        Ok(())
    }
}
