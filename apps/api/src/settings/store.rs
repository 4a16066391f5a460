//! Settings backends: the Postgres store and the read-through cache that
//! wraps it at startup.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::setting::SettingRow;
use crate::settings::{SettingsError, SettingsProvider};

// ────────────────────────────────────────────────────────────────────────────
// Postgres store
// ────────────────────────────────────────────────────────────────────────────

/// Durable settings store backed by the `settings` table.
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsProvider for PgSettingsStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    async fn get(&self, key: &str) -> Result<Option<SettingRow>, SettingsError> {
        Ok(
            sqlx::query_as::<_, SettingRow>("SELECT * FROM settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list(&self) -> Result<Vec<SettingRow>, SettingsError> {
        Ok(
            sqlx::query_as::<_, SettingRow>("SELECT * FROM settings ORDER BY key")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
        updated_by: Uuid,
    ) -> Result<(), SettingsError> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, description, updated_by, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (key) DO UPDATE
                SET value = EXCLUDED.value,
                    description = EXCLUDED.description,
                    updated_by = EXCLUDED.updated_by,
                    updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(description)
        .bind(updated_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        info!("Setting '{key}' updated by {updated_by}");
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Read-through cache
// ────────────────────────────────────────────────────────────────────────────

/// Caches `get_string` reads (including negative hits; an unset key stays
/// unset until someone writes it). Writes go through to the inner store
/// and invalidate the cached entry, so flag flips from the admin surface
/// are visible on the next read.
///
/// Admin metadata reads (`get`, `list`) bypass the cache: they are rare
/// and want fresh `updated_by`/`updated_at`.
pub struct CachedSettings {
    inner: Arc<dyn SettingsProvider>,
    cache: RwLock<HashMap<String, Option<String>>>,
}

impl CachedSettings {
    pub fn new(inner: Arc<dyn SettingsProvider>) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SettingsProvider for CachedSettings {
    async fn get_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
        if let Some(cached) = self.cache.read().await.get(key) {
            return Ok(cached.clone());
        }

        let value = self.inner.get_string(key).await?;
        self.cache
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(value)
    }

    async fn get(&self, key: &str) -> Result<Option<SettingRow>, SettingsError> {
        self.inner.get(key).await
    }

    async fn list(&self) -> Result<Vec<SettingRow>, SettingsError> {
        self.inner.list().await
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
        updated_by: Uuid,
    ) -> Result<(), SettingsError> {
        self.inner.set(key, value, description, updated_by).await?;
        self.cache.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Counts reads so tests can assert cache hits.
    struct CountingSettings {
        values: Mutex<HashMap<String, String>>,
        reads: AtomicUsize,
    }

    impl CountingSettings {
        fn with(pairs: &[(&str, &str)]) -> Self {
            Self {
                values: Mutex::new(
                    pairs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
                reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SettingsProvider for CountingSettings {
        async fn get_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn get(&self, _key: &str) -> Result<Option<SettingRow>, SettingsError> {
            Ok(None)
        }

        async fn list(&self) -> Result<Vec<SettingRow>, SettingsError> {
            Ok(vec![])
        }

        async fn set(
            &self,
            key: &str,
            value: &str,
            _description: Option<&str>,
            _updated_by: Uuid,
        ) -> Result<(), SettingsError> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_repeat_reads_hit_cache() {
        let inner = Arc::new(CountingSettings::with(&[("ai_features_enabled", "true")]));
        let cached = CachedSettings::new(inner.clone());

        for _ in 0..5 {
            assert_eq!(
                cached.get_string("ai_features_enabled").await.unwrap().as_deref(),
                Some("true")
            );
        }
        assert_eq!(inner.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_negative_hits_are_cached() {
        let inner = Arc::new(CountingSettings::with(&[]));
        let cached = CachedSettings::new(inner.clone());

        assert!(cached.get_string("never_set").await.unwrap().is_none());
        assert!(cached.get_string("never_set").await.unwrap().is_none());
        assert_eq!(inner.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_set_invalidates_cached_entry() {
        let inner = Arc::new(CountingSettings::with(&[("cover_letter_ai_enabled", "true")]));
        let cached = CachedSettings::new(inner.clone());

        assert_eq!(
            cached.get_string("cover_letter_ai_enabled").await.unwrap().as_deref(),
            Some("true")
        );

        cached
            .set("cover_letter_ai_enabled", "false", None, Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(
            cached.get_string("cover_letter_ai_enabled").await.unwrap().as_deref(),
            Some("false")
        );
    }
}
