//! # Wareguard Authz
//!
//! `AccessControl` wires configuration, role templates, route guards and
//! the audit trail together. Call sites ask it one question: may this user
//! do this?

mod access_control;

pub use access_control::AccessControl;

// Re-export dependencies
pub use audit::{AuditEntry, AuditLogger, AuditStats};
pub use rbac::{PermissionMatrix, RoleManager, RoleTemplate, RouteGuard};
