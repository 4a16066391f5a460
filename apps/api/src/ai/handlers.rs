//! Axum route handlers for the AI features.
//!
//! Every handler follows the same metered sequence: validate input →
//! settings flag check (`FeatureDisabled`) → `check_limit`
//! (`LimitExceeded`, 403) → LLM generation → `record_usage` exactly once.
//! A failed generation never increments usage.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::cover_letter::{generate_cover_letter, ApplicantProfile, CoverLetter, JobTarget};
use crate::ai::interview::{generate_interview_questions, InterviewQuestion};
use crate::ai::resume::{
    optimize_experience, tailor_resume, OptimizedBullet, ResumeSnapshot, TailoredResume,
};
use crate::errors::AppError;
use crate::metering::Category;
use crate::settings::keys;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub user_id: Uuid,
    pub applicant: ApplicantProfile,
    pub job: JobTarget,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: CoverLetter,
}

#[derive(Debug, Deserialize)]
pub struct InterviewRequest {
    pub user_id: Uuid,
    pub role: String,
    pub jd_text: String,
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct TailorResumeRequest {
    pub user_id: Uuid,
    pub resume: ResumeSnapshot,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct TailorResumeResponse {
    pub tailored: TailoredResume,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeExperienceRequest {
    pub user_id: Uuid,
    pub role_context: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeExperienceResponse {
    pub bullets: Vec<OptimizedBullet>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// Fails with `FeatureDisabled` unless the feature's flag resolves true.
/// Unset sub-flags inherit the master `ai_features_enabled` switch via the
/// settings fallback cascade.
async fn ensure_enabled(state: &AppState, flag: &str) -> Result<(), AppError> {
    if state.settings.get_bool(flag, false).await? {
        Ok(())
    } else {
        Err(AppError::FeatureDisabled)
    }
}

/// POST /api/v1/ai/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    if request.job.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    ensure_enabled(&state, keys::COVER_LETTER_AI_ENABLED).await?;
    state
        .gate
        .check_limit(request.user_id, Category::CoverLetter)
        .await?;

    let cover_letter = generate_cover_letter(&state.llm, &request.applicant, &request.job).await?;

    state
        .gate
        .record_usage(request.user_id, Category::CoverLetter)
        .await?;

    Ok(Json(CoverLetterResponse { cover_letter }))
}

/// POST /api/v1/ai/interview-questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    ensure_enabled(&state, keys::INTERVIEW_AI_ENABLED).await?;
    state
        .gate
        .check_limit(request.user_id, Category::Interview)
        .await?;

    let questions =
        generate_interview_questions(&state.llm, &request.role, &request.jd_text, request.count)
            .await?;

    state
        .gate
        .record_usage(request.user_id, Category::Interview)
        .await?;

    Ok(Json(InterviewResponse { questions }))
}

/// POST /api/v1/ai/resume/tailor
pub async fn handle_tailor_resume(
    State(state): State<AppState>,
    Json(request): Json<TailorResumeRequest>,
) -> Result<Json<TailorResumeResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if request.resume.skills.is_empty() && request.resume.summary.trim().is_empty() {
        return Err(AppError::Validation(
            "resume snapshot has no summary or skills to tailor".to_string(),
        ));
    }

    ensure_enabled(&state, keys::RESUME_TAILORING_AI_ENABLED).await?;
    state
        .gate
        .check_limit(request.user_id, Category::Resume)
        .await?;

    let tailored = tailor_resume(&state.llm, &request.resume, &request.jd_text).await?;

    state
        .gate
        .record_usage(request.user_id, Category::Resume)
        .await?;

    Ok(Json(TailorResumeResponse { tailored }))
}

/// POST /api/v1/ai/resume/optimize-experience
pub async fn handle_optimize_experience(
    State(state): State<AppState>,
    Json(request): Json<OptimizeExperienceRequest>,
) -> Result<Json<OptimizeExperienceResponse>, AppError> {
    if request.bullets.is_empty() {
        return Err(AppError::Validation("bullets cannot be empty".to_string()));
    }
    if request.bullets.iter().any(|b| b.trim().is_empty()) {
        return Err(AppError::Validation(
            "bullets cannot contain empty entries".to_string(),
        ));
    }

    ensure_enabled(&state, keys::RESUME_EXPERIENCE_AI_ENABLED).await?;
    state
        .gate
        .check_limit(request.user_id, Category::Resume)
        .await?;

    let bullets =
        optimize_experience(&state.llm, &request.bullets, &request.role_context).await?;

    state
        .gate
        .record_usage(request.user_id, Category::Resume)
        .await?;

    Ok(Json(OptimizeExperienceResponse { bullets }))
}
