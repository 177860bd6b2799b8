//! Legacy permission normalization
//!
//! Flat strings from the old permission scheme are turned into tuples:
//!
//! - `all` becomes `{*, *, *}`
//! - `module` becomes `{module, view, *}`
//! - `module_action` becomes `{module, action, *}`
//! - `module_action_resource` becomes `{module, action, resource}`, where the
//!   resource keeps any further underscores (`warehouse_view_closing_stock`)

use shared::{Permission, PermissionEntry, PermissionSet, WILDCARD};

/// Legacy string granting everything
pub const LEGACY_ALL: &str = "all";

/// Action assumed when a legacy string names only a module
pub const DEFAULT_LEGACY_ACTION: &str = "view";

/// Convert a legacy permission string into a tuple.
///
/// Surrounding whitespace is ignored. Shapes with empty segments (such as
/// `warehouse_` or `_view`) produce malformed tuples, which never match.
pub fn normalize_legacy(raw: &str) -> Permission {
    let raw = raw.trim();
    if raw == LEGACY_ALL {
        return Permission::superuser();
    }

    let mut parts = raw.splitn(3, '_');
    let module = parts.next().unwrap_or_default();

    match (parts.next(), parts.next()) {
        (None, _) => Permission::new(module, DEFAULT_LEGACY_ACTION, WILDCARD),
        (Some(action), None) => Permission::new(module, action, WILDCARD),
        (Some(action), Some(resource)) => Permission::new(module, action, resource),
    }
}

/// Normalize one stored entry; tuples pass through unchanged.
///
/// Unrecognized entries become an empty tuple, which never matches.
pub fn normalize_entry(entry: &PermissionEntry) -> Permission {
    match entry {
        PermissionEntry::Tuple(permission) => permission.clone(),
        PermissionEntry::Legacy(raw) => normalize_legacy(raw),
        PermissionEntry::Malformed(_) => Permission::new("", "", ""),
    }
}

/// Normalize every stored entry of a user record
pub fn normalize_entries<'a>(entries: impl IntoIterator<Item = &'a PermissionEntry>) -> PermissionSet {
    entries.into_iter().map(normalize_entry).collect()
}
