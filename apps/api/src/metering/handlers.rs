//! Axum route handlers for the usage surface: the per-user report (also
//! used by the dashboard's quota meter) and the admin force-reset.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::metering::gate::UsageReport;
use crate::metering::plan::{PlanQuotas, PlanType};
use crate::settings::keys;
use crate::state::AppState;

/// One plan tier as shown on the pricing page: quotas plus the
/// runtime-configurable price.
#[derive(Debug, Serialize)]
pub struct PlanInfo {
    pub plan: PlanType,
    pub quotas: PlanQuotas,
    pub monthly_price_aed: f64,
}

/// GET /api/v1/plans
///
/// All plan tiers with their quotas and current prices. Prices come from
/// the settings store so admins can change them without a deploy.
pub async fn handle_list_plans(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlanInfo>>, AppError> {
    let mut plans = Vec::with_capacity(4);
    for plan in [
        PlanType::Free,
        PlanType::PayPerDownload,
        PlanType::Pro,
        PlanType::Business,
    ] {
        let monthly_price_aed = match plan {
            PlanType::Free => 0.0,
            PlanType::PayPerDownload => {
                state.settings.get_number(keys::PRICE_PAY_PER_DOWNLOAD).await?
            }
            PlanType::Pro => state.settings.get_number(keys::PRICE_PRO_MONTHLY).await?,
            PlanType::Business => {
                state.settings.get_number(keys::PRICE_BUSINESS_MONTHLY).await?
            }
        };
        plans.push(PlanInfo {
            plan,
            quotas: plan.quotas(),
            monthly_price_aed,
        });
    }
    Ok(Json(plans))
}

/// GET /api/v1/usage/:user_id
///
/// Current month's usage against the user's plan quotas, with the derived
/// near-limit flag per category.
pub async fn handle_usage_report(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UsageReport>, AppError> {
    Ok(Json(state.gate.usage_report(user_id).await?))
}

/// POST /api/v1/admin/usage/:user_id/reset
///
/// Zeroes the user's counters for the current month. Prior months keep
/// their history. Returns the post-reset report.
pub async fn handle_reset_usage(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UsageReport>, AppError> {
    state.gate.reset_current_month(user_id).await?;
    Ok(Json(state.gate.usage_report(user_id).await?))
}
