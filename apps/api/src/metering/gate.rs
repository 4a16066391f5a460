//! The entitlement gate: may this user perform one more AI generation in
//! this category this month, and record that they did.

use std::sync::Arc;

use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::metering::clock::Clock;
use crate::metering::plan::{Category, PlanType};
use crate::metering::store::MeteringStore;
use crate::metering::MeteringError;
use crate::models::usage::AiUsageRow;

/// Read-side view of one category for the usage report.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryUsage {
    pub category: Category,
    pub used: u32,
    pub quota: u32,
    /// Usage has reached 80% of a nonzero quota.
    pub near_limit: bool,
}

/// Per-user usage report: current plan plus all three categories for the
/// current calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    pub user_id: Uuid,
    pub plan: PlanType,
    pub month: i32,
    pub year: i32,
    pub categories: Vec<CategoryUsage>,
}

fn used_in(row: &AiUsageRow, category: Category) -> u32 {
    let count = match category {
        Category::Resume => row.resumes_generated,
        Category::CoverLetter => row.cover_letters_generated,
        Category::Interview => row.interviews_generated,
    };
    count.max(0) as u32
}

fn near_limit(used: u32, quota: u32) -> bool {
    quota > 0 && used * 5 >= quota * 4
}

/// Enforces per-plan monthly quotas. Carried in `AppState`; every AI
/// feature handler calls `check_limit` before doing paid work and
/// `record_usage` exactly once after the generation succeeds.
#[derive(Clone)]
pub struct EntitlementGate {
    store: Arc<dyn MeteringStore>,
    clock: Arc<dyn Clock>,
}

impl EntitlementGate {
    pub fn new(store: Arc<dyn MeteringStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Fails with `LimitExceeded` when the category is unavailable on the
    /// user's plan (quota 0) or this month's usage has reached the quota.
    /// Never mutates counters.
    pub async fn check_limit(
        &self,
        user_id: Uuid,
        category: Category,
    ) -> Result<(), MeteringError> {
        let now = self.clock.now();
        let plan = self.store.current_plan(user_id, now).await?;
        let quota = plan.quotas().for_category(category);

        if quota == 0 {
            debug!(
                "{} unavailable on plan {} for user {user_id}",
                category.as_str(),
                plan.as_str()
            );
            return Err(MeteringError::LimitExceeded);
        }

        let used = self
            .store
            .usage_for_month(user_id, now.month() as i32, now.year())
            .await?
            .map(|row| used_in(&row, category))
            .unwrap_or(0);

        if used >= quota {
            info!(
                "User {user_id} hit {} limit ({used}/{quota}, plan {})",
                category.as_str(),
                plan.as_str()
            );
            return Err(MeteringError::LimitExceeded);
        }

        Ok(())
    }

    /// Records one consumption in the current month's bucket. Callers
    /// invoke this only after the external generation step succeeded.
    pub async fn record_usage(
        &self,
        user_id: Uuid,
        category: Category,
    ) -> Result<(), MeteringError> {
        let now = self.clock.now();
        self.store
            .increment(user_id, now.month() as i32, now.year(), category)
            .await
    }

    /// Read-side report over the same data the gate checks. Near-limit
    /// (>= 80% of a nonzero quota) is derived here, never stored.
    pub async fn usage_report(&self, user_id: Uuid) -> Result<UsageReport, MeteringError> {
        let now = self.clock.now();
        let (month, year) = (now.month() as i32, now.year());

        let plan = self.store.current_plan(user_id, now).await?;
        let quotas = plan.quotas();
        let row = self.store.usage_for_month(user_id, month, year).await?;

        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let used = row.as_ref().map(|r| used_in(r, category)).unwrap_or(0);
                let quota = quotas.for_category(category);
                CategoryUsage {
                    category,
                    used,
                    quota,
                    near_limit: near_limit(used, quota),
                }
            })
            .collect();

        Ok(UsageReport {
            user_id,
            plan,
            month,
            year,
            categories,
        })
    }

    /// Admin force-reset: zeroes the current month's counters. History
    /// for prior months is kept.
    pub async fn reset_current_month(&self, user_id: Uuid) -> Result<(), MeteringError> {
        let now = self.clock.now();
        self.store
            .reset_usage(user_id, now.month() as i32, now.year())
            .await?;
        info!("Usage counters reset for user {user_id} ({}/{})", now.month(), now.year());
        Ok(())
    }
}
