//! Error types for Wareguard

use thiserror::Error;

/// Error thrown when a role template is not found
#[derive(Debug, Error)]
#[error("Role '{role_id}' not found. Available roles: {}", available_roles.join(", "))]
pub struct RoleNotFoundError {
    pub role_id: String,
    pub available_roles: Vec<String>,
}

/// Error thrown when a user lacks the permission a guard requires
#[derive(Debug, Error)]
#[error("User '{user_id}' (role '{role}') lacks permission '{required}'")]
pub struct PermissionDeniedError {
    pub user_id: String,
    pub role: String,
    pub required: String,
}

/// Error thrown when a guarded route has no registered requirement
#[derive(Debug, Error)]
#[error("Route '{path}' has no access requirement registered")]
pub struct RouteNotFoundError {
    pub path: String,
}

/// Error thrown when a query field is empty or a wildcard
#[derive(Debug, Error)]
#[error("Invalid access query: {field} '{value}' must be a concrete, non-empty identifier")]
pub struct InvalidQueryError {
    pub field: &'static str,
    pub value: String,
}

/// Error thrown when a `module:action:resource` string cannot be parsed
#[derive(Debug, Error)]
#[error("Invalid permission '{input}': {reason}")]
pub struct InvalidPermissionError {
    pub input: String,
    pub reason: String,
}

/// Error thrown when a role template definition is rejected
#[derive(Debug, Error)]
#[error("Invalid role template '{template_id}': {reason}")]
pub struct InvalidTemplateError {
    pub template_id: String,
    pub reason: String,
}

/// General Wareguard error type
#[derive(Debug, Error)]
pub enum AccessError {
    #[error(transparent)]
    RoleNotFound(#[from] RoleNotFoundError),

    #[error(transparent)]
    PermissionDenied(#[from] PermissionDeniedError),

    #[error(transparent)]
    RouteNotFound(#[from] RouteNotFoundError),

    #[error(transparent)]
    InvalidQuery(#[from] InvalidQueryError),

    #[error(transparent)]
    InvalidPermission(#[from] InvalidPermissionError),

    #[error(transparent)]
    InvalidTemplate(#[from] InvalidTemplateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AccessError>;
