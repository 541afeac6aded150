//! User record and the payloads that create or modify one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user entity as exchanged over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, monotonically assigned identifier.
    pub id: i64,
    pub name: String,
    /// Unique across all records (exact match).
    pub email: String,
    /// Free-form, conventionally one of Admin/User/Moderator.
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request.
///
/// Every field is optional at the decoding level so that a missing field is
/// reported as a validation failure by the service rather than a JSON error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            role: Some(role.into()),
        }
    }
}

/// Partial update. Absent or empty fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserPatch {
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn email(&self) -> Option<&str> {
        non_empty(self.email.as_deref())
    }

    pub fn role(&self) -> Option<&str> {
        non_empty(self.role.as_deref())
    }

    /// True when applying this patch would only refresh `updatedAt`.
    pub fn is_empty(&self) -> bool {
        self.name().is_none() && self.email().is_none() && self.role().is_none()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
