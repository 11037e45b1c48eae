use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A contact owned by a single authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Overwrite the fields present in `patch`, leaving identity and ownership alone
    pub fn apply(&mut self, patch: &ContactPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = Some(email.clone());
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(favorite) = patch.favorite {
            self.favorite = favorite;
        }
    }
}

/// Request body for POST /contacts
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct NewContact {
    #[validate(
        required(message = "Set name for contact"),
        length(min = 1, message = "Name must not be empty")
    )]
    pub name: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 32, message = "Phone must be between 1 and 32 characters"))]
    pub phone: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

/// Request body for PUT/PATCH /contacts/{contact_id}; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct ContactPatch {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 32, message = "Phone must be between 1 and 32 characters"))]
    pub phone: Option<String>,
    pub favorite: Option<bool>,
}

impl ContactPatch {
    pub fn favorite(favorite: bool) -> Self {
        ContactPatch {
            favorite: Some(favorite),
            ..Default::default()
        }
    }
}

/// Request body for PATCH /contacts/{contact_id}/favorite (documentation only,
/// the handler inspects the raw JSON to tell a missing key from a bad value)
#[derive(Deserialize, utoipa::ToSchema)]
pub struct FavoriteUpdate {
    pub favorite: bool,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactData {
    pub contact: Contact,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactListData {
    pub contacts: Vec<Contact>,
}

/// Envelope for responses carrying one contact
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactResponse {
    pub ok: bool,
    pub code: u16,
    pub data: ContactData,
}

impl ContactResponse {
    pub fn new(status: StatusCode, contact: Contact) -> Self {
        ContactResponse {
            ok: true,
            code: status.as_u16(),
            data: ContactData { contact },
        }
    }
}

/// Envelope for GET /contacts
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactListResponse {
    pub ok: bool,
    pub code: u16,
    pub data: ContactListData,
}

impl ContactListResponse {
    pub fn new(contacts: Vec<Contact>) -> Self {
        ContactListResponse {
            ok: true,
            code: StatusCode::OK.as_u16(),
            data: ContactListData { contacts },
        }
    }
}

/// Envelope for successful responses without a payload
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub ok: bool,
    pub code: u16,
    pub message: String,
}

impl MessageResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        MessageResponse {
            ok: true,
            code: status.as_u16(),
            message: message.into(),
        }
    }
}
