use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use super::{ContactStore, StoreError};
use crate::models::{Contact, ContactPatch, NewContact};

/// Process-local contact store, used for `CONTACT_STORE=memory` and in tests
///
/// Contacts are kept in insertion order, which is also creation order.
#[derive(Default)]
pub struct InMemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts across all owners
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Contact>, StoreError> {
        let contacts = self.contacts.read().await;
        Ok(contacts
            .iter()
            .filter(|contact| contact.owner == owner)
            .cloned()
            .collect())
    }

    async fn get_by_owner_and_id(
        &self,
        owner: &str,
        id: Uuid,
    ) -> Result<Option<Contact>, StoreError> {
        let contacts = self.contacts.read().await;
        Ok(contacts
            .iter()
            .find(|contact| contact.id == id && contact.owner == owner)
            .cloned())
    }

    async fn delete_by_owner_and_id(&self, owner: &str, id: Uuid) -> Result<bool, StoreError> {
        let mut contacts = self.contacts.write().await;
        match contacts
            .iter()
            .position(|contact| contact.id == id && contact.owner == owner)
        {
            Some(index) => {
                contacts.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create(&self, owner: &str, draft: NewContact) -> Result<Contact, StoreError> {
        draft.validate()?;

        let now = Utc::now();
        let contact = Contact {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            name: draft.name.unwrap_or_default(),
            email: draft.email,
            phone: draft.phone,
            favorite: draft.favorite,
            created_at: now,
            updated_at: now,
        };

        self.contacts
            .write()
            .await
            .push(contact.clone());

        tracing::debug!("Inserted contact {} for owner {}", contact.id, owner);
        Ok(contact)
    }

    async fn update_by_owner_and_id(
        &self,
        owner: &str,
        id: Uuid,
        patch: ContactPatch,
    ) -> Result<Option<Contact>, StoreError> {
        patch.validate()?;

        let mut contacts = self.contacts.write().await;
        match contacts
            .iter_mut()
            .find(|contact| contact.id == id && contact.owner == owner)
        {
            Some(contact) => {
                contact.apply(&patch);
                contact.updated_at = Utc::now();
                Ok(Some(contact.clone()))
            }
            None => Ok(None),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
