//! Permission tuples and queries

use crate::error::{InvalidPermissionError, InvalidQueryError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field value that matches anything in its position
pub const WILDCARD: &str = "*";

/// A granted `(module, action, resource)` tuple.
///
/// Any field may be [`WILDCARD`]. A tuple is well-formed only when all three
/// fields are non-empty; malformed tuples never grant anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permission {
    pub module: String,
    pub action: String,
    pub resource: String,
}

impl Permission {
    pub fn new(
        module: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            action: action.into(),
            resource: resource.into(),
        }
    }

    /// The `{*, *, *}` tuple
    pub fn superuser() -> Self {
        Self::new(WILDCARD, WILDCARD, WILDCARD)
    }

    pub fn is_well_formed(&self) -> bool {
        !self.module.is_empty() && !self.action.is_empty() && !self.resource.is_empty()
    }

    pub fn is_superuser(&self) -> bool {
        self.module == WILDCARD && self.action == WILDCARD && self.resource == WILDCARD
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.module, self.action, self.resource)
    }
}

impl FromStr for Permission {
    type Err = InvalidPermissionError;

    /// Parse `module:action:resource`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(InvalidPermissionError {
                input: s.to_string(),
                reason: "expected 'module:action:resource'".to_string(),
            });
        }

        let permission = Permission::new(parts[0].trim(), parts[1].trim(), parts[2].trim());
        if !permission.is_well_formed() {
            return Err(InvalidPermissionError {
                input: s.to_string(),
                reason: "fields must not be empty".to_string(),
            });
        }
        Ok(permission)
    }
}

/// A stored permission as it appears on a user record.
///
/// Older records hold flat strings such as `"warehouse_view"`; newer ones
/// hold tuples. Entries are normalized once when read and never
/// re-interpreted afterwards. Anything else (a tuple missing a field, a
/// number) is kept as `Malformed` so the rest of the record still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionEntry {
    Tuple(Permission),
    Legacy(String),
    Malformed(serde_json::Value),
}

impl PermissionEntry {
    pub fn is_malformed(&self) -> bool {
        matches!(self, PermissionEntry::Malformed(_))
    }
}

impl From<Permission> for PermissionEntry {
    fn from(permission: Permission) -> Self {
        PermissionEntry::Tuple(permission)
    }
}

impl From<&str> for PermissionEntry {
    fn from(legacy: &str) -> Self {
        PermissionEntry::Legacy(legacy.to_string())
    }
}

impl From<String> for PermissionEntry {
    fn from(legacy: String) -> Self {
        PermissionEntry::Legacy(legacy)
    }
}

/// The tuples effectively granted to a user. Element order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(Vec<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, permission: Permission) {
        self.0.push(permission);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Permission> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Permission] {
        &self.0
    }

    pub fn contains_superuser(&self) -> bool {
        self.0.iter().any(Permission::is_superuser)
    }

    /// Sorted, duplicate-free copy for display
    pub fn sorted_unique(&self) -> Vec<Permission> {
        let mut perms = self.0.clone();
        perms.sort();
        perms.dedup();
        perms
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(perms: Vec<Permission>) -> Self {
        Self(perms)
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<I: IntoIterator<Item = Permission>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::slice::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for PermissionSet {
    type Item = Permission;
    type IntoIter = std::vec::IntoIter<Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A concrete `(module, action, resource)` request checked against a
/// [`PermissionSet`]. Fields are never empty and never [`WILDCARD`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Permission", into = "Permission")]
pub struct AccessQuery {
    pub(crate) module: String,
    pub(crate) action: String,
    pub(crate) resource: String,
}

impl AccessQuery {
    pub fn new(
        module: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Result<Self, InvalidQueryError> {
        Ok(Self {
            module: concrete("module", module.into())?,
            action: concrete("action", action.into())?,
            resource: concrete("resource", resource.into())?,
        })
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}

fn concrete(field: &'static str, value: String) -> Result<String, InvalidQueryError> {
    if value.is_empty() || value == WILDCARD {
        return Err(InvalidQueryError { field, value });
    }
    Ok(value)
}

impl fmt::Display for AccessQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.module, self.action, self.resource)
    }
}

impl TryFrom<Permission> for AccessQuery {
    type Error = InvalidQueryError;

    fn try_from(p: Permission) -> Result<Self, Self::Error> {
        AccessQuery::new(p.module, p.action, p.resource)
    }
}

impl From<AccessQuery> for Permission {
    fn from(q: AccessQuery) -> Self {
        Permission::new(q.module, q.action, q.resource)
    }
}

impl FromStr for AccessQuery {
    type Err = crate::AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let permission: Permission = s.parse()?;
        Ok(AccessQuery::try_from(permission)?)
    }
}
