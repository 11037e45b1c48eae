use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::auth::authenticate;
use crate::handlers::{
    create_handler, favorite_handler, get_handler, health_handler, list_handler, remove_handler,
    update_handler,
};
use crate::state::AppState;

// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const CONTACTS: &str = "/contacts";
pub const CONTACT_ITEM: &str = "/contacts/{contact_id}";
pub const CONTACT_FAVORITE: &str = "/contacts/{contact_id}/favorite";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the application router
///
/// Contact routes sit behind the `authenticate` middleware; health and the
/// API docs do not.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(CONTACTS, get(list_handler).post(create_handler))
        .route(
            CONTACT_ITEM,
            get(get_handler)
                .put(update_handler)
                .patch(update_handler)
                .delete(remove_handler),
        )
        .route(CONTACT_FAVORITE, patch(favorite_handler))
        .route_layer(middleware::from_fn(authenticate))
        .route(HEALTH, get(health_handler))
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
