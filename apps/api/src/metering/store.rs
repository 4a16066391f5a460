//! Durable storage seam for the entitlement gate: subscription resolution
//! (read-only; rows are owned by billing) and the monthly usage counters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::metering::plan::{Category, PlanType};
use crate::metering::MeteringError;
use crate::models::subscription::SubscriptionRow;
use crate::models::usage::AiUsageRow;

/// Storage operations the gate depends on. Mocked in gate tests;
/// `PgMeteringStore` is the production implementation.
#[async_trait]
pub trait MeteringStore: Send + Sync {
    /// Resolves the user's current plan: the most recent `active`
    /// subscription whose period end is null or not yet past. No such
    /// row means `Free`.
    async fn current_plan(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<PlanType, MeteringError>;

    /// The usage row for one calendar month. `Ok(None)` is the valid
    /// zero state (nothing consumed yet); errors stay errors.
    async fn usage_for_month(
        &self,
        user_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Option<AiUsageRow>, MeteringError>;

    /// Atomically adds 1 to the single counter for `category`, creating
    /// the month's row with that counter at 1 if it does not exist.
    async fn increment(
        &self,
        user_id: Uuid,
        month: i32,
        year: i32,
        category: Category,
    ) -> Result<(), MeteringError>;

    /// Zeroes all three counters for one month. Other months' rows are
    /// untouched.
    async fn reset_usage(&self, user_id: Uuid, month: i32, year: i32)
        -> Result<(), MeteringError>;
}

pub struct PgMeteringStore {
    pool: PgPool,
}

impl PgMeteringStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn counter_column(category: Category) -> &'static str {
    match category {
        Category::Resume => "resumes_generated",
        Category::CoverLetter => "cover_letters_generated",
        Category::Interview => "interviews_generated",
    }
}

#[async_trait]
impl MeteringStore for PgMeteringStore {
    async fn current_plan(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<PlanType, MeteringError> {
        let subscription = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT * FROM subscriptions
            WHERE user_id = $1
              AND status = 'active'
              AND (current_period_end IS NULL OR current_period_end >= $2)
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match subscription {
            None => PlanType::Free,
            Some(row) => PlanType::parse(&row.plan).unwrap_or_else(|| {
                warn!(
                    "User {user_id} has unrecognized plan '{}', treating as free",
                    row.plan
                );
                PlanType::Free
            }),
        })
    }

    async fn usage_for_month(
        &self,
        user_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Option<AiUsageRow>, MeteringError> {
        Ok(sqlx::query_as::<_, AiUsageRow>(
            "SELECT * FROM ai_usage WHERE user_id = $1 AND month = $2 AND year = $3",
        )
        .bind(user_id)
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn increment(
        &self,
        user_id: Uuid,
        month: i32,
        year: i32,
        category: Category,
    ) -> Result<(), MeteringError> {
        // Single-statement upsert keeps the increment race-free. The
        // check→increment window above it is intentionally not serialized;
        // a hard cap would make this a conditional update with a ceiling
        // (`SET c = c + 1 WHERE c < quota`).
        let column = counter_column(category);
        let sql = format!(
            r#"
            INSERT INTO ai_usage
                (user_id, month, year, resumes_generated, cover_letters_generated, interviews_generated)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, month, year)
                DO UPDATE SET {column} = ai_usage.{column} + 1
            "#
        );

        sqlx::query(&sql)
            .bind(user_id)
            .bind(month)
            .bind(year)
            .bind(i32::from(category == Category::Resume))
            .bind(i32::from(category == Category::CoverLetter))
            .bind(i32::from(category == Category::Interview))
            .execute(&self.pool)
            .await?;

        debug!(
            "Incremented {} usage for user {user_id} ({month}/{year})",
            category.as_str()
        );
        Ok(())
    }

    async fn reset_usage(
        &self,
        user_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<(), MeteringError> {
        sqlx::query(
            r#"
            UPDATE ai_usage
            SET resumes_generated = 0,
                cover_letters_generated = 0,
                interviews_generated = 0
            WHERE user_id = $1 AND month = $2 AND year = $3
            "#,
        )
        .bind(user_id)
        .bind(month)
        .bind(year)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_column_per_category() {
        assert_eq!(counter_column(Category::Resume), "resumes_generated");
        assert_eq!(counter_column(Category::CoverLetter), "cover_letters_generated");
        assert_eq!(counter_column(Category::Interview), "interviews_generated");
    }
}
