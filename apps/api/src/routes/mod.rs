pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai;
use crate::metering::handlers as usage;
use crate::settings::handlers as settings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // AI features; all metered through the entitlement gate
        .route("/api/v1/ai/cover-letter", post(ai::handle_cover_letter))
        .route(
            "/api/v1/ai/interview-questions",
            post(ai::handle_interview_questions),
        )
        .route("/api/v1/ai/resume/tailor", post(ai::handle_tailor_resume))
        .route(
            "/api/v1/ai/resume/optimize-experience",
            post(ai::handle_optimize_experience),
        )
        // Plans & usage reporting
        .route("/api/v1/plans", get(usage::handle_list_plans))
        .route("/api/v1/usage/:user_id", get(usage::handle_usage_report))
        // Admin surface (auth middleware sits in front of these in deploy)
        .route(
            "/api/v1/admin/settings",
            get(settings::handle_list_settings),
        )
        .route(
            "/api/v1/admin/settings/initialize",
            post(settings::handle_initialize_settings),
        )
        .route(
            "/api/v1/admin/settings/:key",
            get(settings::handle_get_setting).put(settings::handle_update_setting),
        )
        .route(
            "/api/v1/admin/usage/:user_id/reset",
            post(usage::handle_reset_usage),
        )
        .with_state(state)
}
