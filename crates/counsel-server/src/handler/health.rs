//! Liveness probe handler.

use axum::Json;
use serde::Serialize;

/// Body of a `GET /healthz` response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always true while the process is serving requests.
    pub ok: bool,
}

/// Reports process liveness. No dependencies are checked.
pub(super) async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
