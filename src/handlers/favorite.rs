use super::parse_contact_id;
use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ErrorResponse};
use crate::extractors::JsonBody;
use crate::models::{ContactPatch, ContactResponse, FavoriteUpdate};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};
use serde_json::Value as JsonValue;

/// Read the `favorite` flag out of a request body
///
/// A body without the key is a different error from a key holding a
/// non-boolean, so the body is inspected as raw JSON.
fn favorite_flag(body: &JsonValue) -> Result<bool, ApiError> {
    match body.get("favorite") {
        None => Err(ApiError::MissingField("favorite")),
        Some(value) => value.as_bool().ok_or_else(|| ApiError::InvalidField {
            field: "favorite",
            message: format!("expected a boolean, got {}", value),
        }),
    }
}

/// PATCH /contacts/{contact_id}/favorite handler - Set the favorite flag
#[utoipa::path(
    patch,
    path = routes::CONTACT_FAVORITE,
    params(
        ("contact_id" = String, Path, description = "UUID of the contact")
    ),
    request_body = FavoriteUpdate,
    responses(
        (status = 200, description = "Favorite flag set", body = ContactResponse),
        (status = 400, description = "Missing or non-boolean favorite, or invalid id", body = ErrorResponse),
        (status = 401, description = "No authenticated user", body = ErrorResponse),
        (status = 404, description = "Caller owns no such contact", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "contacts"
)]
pub async fn favorite_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<JsonValue>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let id = parse_contact_id(&id_str)?;
    let favorite = favorite_flag(&body)?;

    let Some(contact) = state
        .store
        .update_by_owner_and_id(&user.id, id, ContactPatch::favorite(favorite))
        .await?
    else {
        tracing::info!("Contact {} not found for user {}, favorite unchanged", id, user.id);
        return Err(ApiError::ContactNotFound(id));
    };

    tracing::info!("Set favorite={} on contact {} for user {}", favorite, id, user.id);
    Ok((
        StatusCode::OK,
        Json(ContactResponse::new(StatusCode::OK, contact)),
    ))
}
