//! Axum route handlers for the admin settings surface. Admin authn/authz
//! lives in front of these routes (auth collaborator); handlers take the
//! acting admin's id explicitly.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::setting::SettingRow;
use crate::settings::DEFAULT_SETTINGS;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateSettingRequest {
    pub value: String,
    pub description: Option<String>,
    pub updated_by: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct InitializeSettingsRequest {
    pub admin_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct InitializeSettingsResponse {
    pub initialized: usize,
}

/// GET /api/v1/admin/settings
pub async fn handle_list_settings(
    State(state): State<AppState>,
) -> Result<Json<Vec<SettingRow>>, AppError> {
    Ok(Json(state.settings.list().await?))
}

/// GET /api/v1/admin/settings/:key
pub async fn handle_get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SettingRow>, AppError> {
    let row = state
        .settings
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setting '{key}' not found")))?;
    Ok(Json(row))
}

/// PUT /api/v1/admin/settings/:key
///
/// Upsert: creates the key on first write, overwrites afterwards.
pub async fn handle_update_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<UpdateSettingRequest>,
) -> Result<Json<SettingRow>, AppError> {
    if key.trim().is_empty() {
        return Err(AppError::Validation("setting key cannot be empty".to_string()));
    }

    state
        .settings
        .set(
            &key,
            &request.value,
            request.description.as_deref(),
            request.updated_by,
        )
        .await?;

    let row = state
        .settings
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setting '{key}' not found after write")))?;
    Ok(Json(row))
}

/// POST /api/v1/admin/settings/initialize
///
/// Seeds every well-known key with its shipped default. This goes through
/// the same upsert as normal writes, so customized values are reset:
/// this is a reset-to-shipped-defaults action, not a first-run-only seed.
pub async fn handle_initialize_settings(
    State(state): State<AppState>,
    Json(request): Json<InitializeSettingsRequest>,
) -> Result<Json<InitializeSettingsResponse>, AppError> {
    state.settings.initialize_defaults(request.admin_id).await?;
    info!("Settings defaults initialized by admin {}", request.admin_id);

    Ok(Json(InitializeSettingsResponse {
        initialized: DEFAULT_SETTINGS.len(),
    }))
}
