use super::parse_contact_id;
use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ErrorResponse};
use crate::models::ContactResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /contacts/{contact_id} handler - Fetch one of the caller's contacts
#[utoipa::path(
    get,
    path = routes::CONTACT_ITEM,
    params(
        ("contact_id" = String, Path, description = "UUID of the contact")
    ),
    responses(
        (status = 200, description = "Contact found", body = ContactResponse),
        (status = 400, description = "Invalid contact id", body = ErrorResponse),
        (status = 401, description = "No authenticated user", body = ErrorResponse),
        (status = 404, description = "Caller owns no such contact", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "contacts"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let id = parse_contact_id(&id_str)?;

    match state.store.get_by_owner_and_id(&user.id, id).await? {
        Some(contact) => {
            tracing::info!("Retrieved contact {} for user {}", id, user.id);
            Ok((
                StatusCode::OK,
                Json(ContactResponse::new(StatusCode::OK, contact)),
            ))
        }
        None => {
            tracing::info!("Contact {} not found for user {}", id, user.id);
            Err(ApiError::ContactNotFound(id))
        }
    }
}
