pub mod health;
pub mod list;
pub mod get;
pub mod create;
pub mod update;
pub mod favorite;
pub mod remove;

pub use health::health_handler;
pub use list::list_handler;
pub use get::get_handler;
pub use create::create_handler;
pub use update::update_handler;
pub use favorite::favorite_handler;
pub use remove::remove_handler;

use crate::error::ApiError;
use uuid::Uuid;

/// Parse the `{contact_id}` path segment
fn parse_contact_id(id_str: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id_str).map_err(|_| ApiError::InvalidContactId(id_str.to_string()))
}
