//! User record as supplied by the user store

use crate::permission::PermissionEntry;
use serde::{Deserialize, Serialize};

/// A user with a role and stored permission entries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    /// Role identifier; usually a role template id
    pub role: String,

    /// Stored permissions, tuple- or legacy-string-shaped
    #[serde(default)]
    pub permissions: Vec<PermissionEntry>,

    /// Inactive users are denied everything
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            role: role.into(),
            permissions: Vec::new(),
            active: true,
        }
    }

    /// Builder: set email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder: add one stored permission entry
    pub fn with_permission(mut self, entry: impl Into<PermissionEntry>) -> Self {
        self.permissions.push(entry.into());
        self
    }

    /// Builder: replace stored permission entries
    pub fn with_permissions(mut self, entries: Vec<PermissionEntry>) -> Self {
        self.permissions = entries;
        self
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
