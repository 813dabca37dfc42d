use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Payload for creating a setting; the key must not already exist.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateSettingRequest {
    /// Unique key.
    #[validate(length(min = 1, max = 100))]
    pub key: String,
    /// String value.
    #[validate(length(max = 500))]
    pub value: String,
}

/// Payload for updating an existing setting.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateSettingRequest {
    /// New value.
    #[validate(length(max = 500))]
    pub value: String,
}

/// Query carrying the value for the upsert route.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpsertSettingQuery {
    /// Value to store under the key.
    pub value: String,
}
