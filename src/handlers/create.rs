use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ErrorResponse};
use crate::extractors::JsonBody;
use crate::models::{ContactResponse, NewContact};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /contacts handler - Create a contact owned by the caller
#[utoipa::path(
    post,
    path = routes::CONTACTS,
    request_body = NewContact,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 400, description = "Invalid JSON or validation failure", body = ErrorResponse),
        (status = 401, description = "No authenticated user", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "contacts"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(draft): JsonBody<NewContact>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let contact = state.store.create(&user.id, draft).await?;

    tracing::info!("Created contact {} for user {}", contact.id, user.id);
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse::new(StatusCode::CREATED, contact)),
    ))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{send, setup_test_app};
    use axum::{body::Body, http::Request, http::StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_create_endpoint_success() {
        let (app, store) = setup_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/contacts",
            Some("alice"),
            Some(json!({"name": "Bob", "email": "bob@example.com", "phone": "555-0100"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["ok"], true);
        assert_eq!(body["code"], 201);
        let contact = &body["data"]["contact"];
        assert_eq!(contact["owner"], "alice");
        assert_eq!(contact["name"], "Bob");
        assert_eq!(contact["favorite"], false);
        assert!(contact["id"].as_str().is_some());
        assert!(contact["createdAt"].as_str().is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_endpoint_ignores_client_owner() {
        let (app, _store) = setup_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/contacts",
            Some("alice"),
            Some(json!({"name": "Bob", "owner": "mallory", "favorite": true})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["contact"]["owner"], "alice");
        assert_eq!(body["data"]["contact"]["favorite"], true);
    }

    #[tokio::test]
    async fn test_create_endpoint_missing_name() {
        let (app, store) = setup_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/contacts",
            Some("alice"),
            Some(json!({"email": "bob@example.com"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["name"], "Set name for contact");
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_create_endpoint_reports_every_bad_field() {
        let (app, _store) = setup_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/contacts",
            Some("alice"),
            Some(json!({"name": "", "email": "not-an-email"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let errors = body["errors"].as_object().unwrap();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("email"));
    }

    #[tokio::test]
    async fn test_create_endpoint_invalid_json() {
        let (app, _store) = setup_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/contacts")
                    .header("content-type", "application/json")
                    .header(crate::auth::USER_ID_HEADER, "alice")
                    .body(Body::from("{invalid json}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["ok"], false);
        assert!(json["message"].as_str().unwrap().contains("JSON parse error"));
    }

    #[tokio::test]
    async fn test_create_endpoint_requires_user() {
        let (app, store) = setup_test_app();

        let (status, _) = send(&app, "POST", "/contacts", None, Some(json!({"name": "Bob"}))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(store.len().await, 0);
    }
}
