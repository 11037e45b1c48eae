use super::parse_contact_id;
use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ErrorResponse};
use crate::extractors::JsonBody;
use crate::models::{ContactPatch, ContactResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// PUT or PATCH /contacts/{contact_id} handler - Update the fields present in the body
///
/// Fields left out of the body keep their current value. An empty body
/// returns the contact unchanged.
#[utoipa::path(
    put,
    path = routes::CONTACT_ITEM,
    params(
        ("contact_id" = String, Path, description = "UUID of the contact")
    ),
    request_body = ContactPatch,
    responses(
        (status = 200, description = "Contact updated", body = ContactResponse),
        (status = 400, description = "Invalid id, invalid JSON or validation failure", body = ErrorResponse),
        (status = 401, description = "No authenticated user", body = ErrorResponse),
        (status = 404, description = "Caller owns no such contact", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "contacts"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id_str): Path<String>,
    JsonBody(patch): JsonBody<ContactPatch>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let id = parse_contact_id(&id_str)?;

    let Some(contact) = state.store.update_by_owner_and_id(&user.id, id, patch).await? else {
        tracing::info!("Contact {} not found for user {}, nothing updated", id, user.id);
        return Err(ApiError::ContactNotFound(id));
    };

    tracing::info!("Updated contact {} for user {}", id, user.id);
    Ok((
        StatusCode::OK,
        Json(ContactResponse::new(StatusCode::OK, contact)),
    ))
}
