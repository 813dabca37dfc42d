use serde::Serialize;
use utoipa::ToSchema;

/// Health probe response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` when the database answers, `degraded` otherwise.
    pub status: String,
}
