use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::metering::EntitlementGate;
use crate::settings::SettingsProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Injected settings seam. In production this is the Postgres store
    /// behind the read-through cache; tests swap in-memory providers.
    pub settings: Arc<dyn SettingsProvider>,
    /// The entitlement gate every AI feature handler consults.
    pub gate: EntitlementGate,
}
