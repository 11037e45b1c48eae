use super::parse_contact_id;
use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ErrorResponse};
use crate::models::MessageResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// DELETE /contacts/{contact_id} handler
#[utoipa::path(
    delete,
    path = routes::CONTACT_ITEM,
    params(
        ("contact_id" = String, Path, description = "UUID of the contact")
    ),
    responses(
        (status = 200, description = "Contact deleted", body = MessageResponse),
        (status = 400, description = "Invalid contact id", body = ErrorResponse),
        (status = 401, description = "No authenticated user", body = ErrorResponse),
        (status = 404, description = "Caller owns no such contact", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "contacts"
)]
pub async fn remove_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_contact_id(&id_str)?;

    if !state.store.delete_by_owner_and_id(&user.id, id).await? {
        tracing::info!("Contact {} not found for user {}, nothing deleted", id, user.id);
        return Err(ApiError::ContactNotFound(id));
    }

    tracing::info!("Deleted contact {} for user {}", id, user.id);
    Ok((
        StatusCode::OK,
        Json(MessageResponse::new(StatusCode::OK, "Contact deleted")),
    ))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{create_contact, send, setup_test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (app, store) = setup_test_app();
        let id = create_contact(&app, "alice", json!({"name": "Bob"})).await;
        let uri = format!("/contacts/{}", id);

        let (status, body) = send(&app, "DELETE", &uri, Some("alice"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["message"], "Contact deleted");
        assert_eq!(store.len().await, 0);

        let (status, _) = send(&app, "GET", &uri, Some("alice"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_not_found() {
        let (app, _store) = setup_test_app();

        let (status, body) = send(
            &app,
            "DELETE",
            &format!("/contacts/{}", Uuid::new_v4()),
            Some("alice"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn test_delete_other_owner_keeps_contact() {
        let (app, store) = setup_test_app();
        let id = create_contact(&app, "alice", json!({"name": "Bob"})).await;

        let (status, _) = send(&app, "DELETE", &format!("/contacts/{}", id), Some("mallory"), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(store.len().await, 1);
    }
}
