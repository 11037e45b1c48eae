use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    Contact, ContactData, ContactListData, ContactListResponse, ContactPatch, ContactResponse,
    FavoriteUpdate, MessageResponse, NewContact,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "contacts-api",
        version = "1.0.0",
        description = "Per-user contact list. Every contact route expects the authenticated user id in the x-user-id header."
    ),
    paths(
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::get::get_handler,
        handlers::create::create_handler,
        handlers::update::update_handler,
        handlers::favorite::favorite_handler,
        handlers::remove::remove_handler
    ),
    components(
        schemas(
            Contact,
            NewContact,
            ContactPatch,
            FavoriteUpdate,
            ContactData,
            ContactListData,
            ContactResponse,
            ContactListResponse,
            MessageResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "contacts", description = "Contact list operations")
    )
)]
pub struct ApiDoc;
