use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

fn default_limit() -> i64 {
    100
}

/// Offset/limit pagination applied to every list endpoint.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Number of rows to skip.
    #[serde(default)]
    pub skip: i64,
    /// Maximum number of rows to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Build a response from anything stringish.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
