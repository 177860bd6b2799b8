//! # Wareguard RBAC
//!
//! Permission evaluation for the warehouse application.
//!
//! ## Components
//!
//! - `evaluator` - `(module, action, resource)` wildcard matching
//! - `normalize` - Legacy permission string conversion
//! - `RoleManager` - Role templates and effective user permissions
//! - `TemplateLoader` - Custom role templates from YAML files
//! - `RouteGuard` - Route and UI gating
//! - `PermissionMatrix` - Catalog-wide allow/deny view

pub mod evaluator;
pub mod matrix;
pub mod normalize;
pub mod role_manager;
pub mod role_templates;
pub mod route_guard;
pub mod template_loader;

pub use evaluator::{allows, has_permission, matching_grant};
pub use matrix::PermissionMatrix;
pub use normalize::{normalize_entries, normalize_entry, normalize_legacy};
pub use role_manager::RoleManager;
pub use role_templates::{builtin_templates, RoleTemplate};
pub use route_guard::RouteGuard;
pub use template_loader::TemplateLoader;
