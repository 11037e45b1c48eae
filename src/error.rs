use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::StoreError;

/// Envelope for every failed request
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub ok: bool,
    pub code: u16,
    pub message: String,
    /// Field name to message, present for validation failures only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Error type shared by every contact endpoint
///
/// Each variant maps to exactly one status code, and `into_response` is the
/// only place an error turns into an HTTP body.
#[derive(Debug)]
pub enum ApiError {
    /// No authenticated user attached to the request
    Unauthorized,
    /// Contact id in the path is not a UUID
    InvalidContactId(String),
    /// The caller owns no contact with this id
    ContactNotFound(Uuid),
    /// Required body field absent
    MissingField(&'static str),
    /// Body field present with the wrong type
    InvalidField { field: &'static str, message: String },
    /// Request body is not the JSON we expect
    JsonError(String),
    /// The store rejected the contact; field name to message
    Validation(BTreeMap<String, String>),
    /// Anything the store could not do for reasons other than the input
    DatabaseError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut errors = None;
        let (status, message) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Not authorized".to_string(),
            ),
            ApiError::InvalidContactId(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid contact id: '{}'", id),
            ),
            ApiError::ContactNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Not found: contact with id: {}", id),
            ),
            ApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("missing field {}", field),
            ),
            ApiError::InvalidField { field, message } => (
                StatusCode::BAD_REQUEST,
                format!("invalid field {}: {}", field, message),
            ),
            ApiError::JsonError(message) => (
                StatusCode::BAD_REQUEST,
                format!("JSON parse error: {}", message),
            ),
            ApiError::Validation(fields) => {
                errors = Some(fields);
                (StatusCode::BAD_REQUEST, "Validation failed".to_string())
            }
            ApiError::DatabaseError(err) => {
                tracing::error!("Contact store failure: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            ok: false,
            code: status.as_u16(),
            message,
            errors,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => ApiError::Validation(
                errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, failures)| {
                        let message = failures
                            .iter()
                            .find_map(|failure| failure.message.as_ref())
                            .map(|message| message.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", field));
                        (field.to_string(), message)
                    })
                    .collect(),
            ),
            StoreError::Backend(err) => ApiError::DatabaseError(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::JsonError(rejection.body_text())
    }
}
