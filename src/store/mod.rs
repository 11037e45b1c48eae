//! Contact persistence
//!
//! Every operation is scoped by the owner id of the authenticated caller, so
//! a contact can only be seen or changed by the user that created it.

pub mod memory;
pub mod spanner;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Contact, ContactPatch, NewContact};

pub use memory::InMemoryContactStore;
pub use spanner::SpannerContactStore;

/// Errors reported by a `ContactStore`
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Input rejected by the contact schema
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
    /// Anything else the backend could not do
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// All contacts owned by `owner`, oldest first
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Contact>, StoreError>;

    async fn get_by_owner_and_id(&self, owner: &str, id: Uuid)
        -> Result<Option<Contact>, StoreError>;

    /// Returns `false` when `owner` has no contact with this id
    async fn delete_by_owner_and_id(&self, owner: &str, id: Uuid) -> Result<bool, StoreError>;

    /// Validate `draft` and insert it with a freshly assigned id
    async fn create(&self, owner: &str, draft: NewContact) -> Result<Contact, StoreError>;

    /// Validate `patch` and apply it; `None` when `owner` has no contact with this id
    async fn update_by_owner_and_id(
        &self,
        owner: &str,
        id: Uuid,
        patch: ContactPatch,
    ) -> Result<Option<Contact>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
