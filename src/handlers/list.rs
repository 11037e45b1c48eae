use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ErrorResponse};
use crate::models::ContactListResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /contacts handler - List the caller's contacts, oldest first
#[utoipa::path(
    get,
    path = routes::CONTACTS,
    responses(
        (status = 200, description = "Contacts owned by the caller", body = ContactListResponse),
        (status = 401, description = "No authenticated user", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "contacts"
)]
pub async fn list_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<(StatusCode, Json<ContactListResponse>), ApiError> {
    let contacts = state.store.list_by_owner(&user.id).await?;

    tracing::info!("Listed {} contacts for user {}", contacts.len(), user.id);
    Ok((StatusCode::OK, Json(ContactListResponse::new(contacts))))
}
