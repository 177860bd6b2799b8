//! RouteGuard - Route and UI gating by permission

use crate::evaluator;
use shared::{
    AccessError, AccessQuery, InvalidQueryError, PermissionDeniedError, PermissionSet,
    RouteNotFoundError, RouteRequirement, User,
};
use std::collections::BTreeMap;

/// Built-in application routes: `(path, module, action, resource)`
const DEFAULT_ROUTES: &[(&str, &str, &str, &str)] = &[
    ("/warehouse", "warehouse", "view", "items"),
    ("/warehouse/items", "warehouse", "view", "items"),
    ("/warehouse/items/new", "warehouse", "create", "items"),
    ("/warehouse/inward", "warehouse", "view", "inward"),
    ("/warehouse/inward/new", "warehouse", "create", "inward"),
    ("/warehouse/outward", "warehouse", "view", "outward"),
    ("/warehouse/outward/new", "warehouse", "create", "outward"),
    ("/warehouse/damage", "warehouse", "view", "damage"),
    ("/warehouse/damage/new", "warehouse", "create", "damage"),
    ("/warehouse/closing-stock", "warehouse", "view", "closing_stock"),
    ("/warehouse/transfers", "warehouse", "transfer", "transfers"),
    ("/inventory", "inventory", "view", "items"),
    ("/inventory/items/new", "inventory", "create", "items"),
    ("/inventory/inward", "inventory", "view", "inward"),
    ("/inventory/outward", "inventory", "view", "outward"),
    ("/inventory/damage", "inventory", "view", "damage"),
    ("/inventory/closing-stock", "inventory", "view", "closing_stock"),
    ("/suppliers", "suppliers", "view", "suppliers"),
    ("/suppliers/new", "suppliers", "create", "suppliers"),
    ("/categories", "categories", "view", "categories"),
    ("/reports/stock", "reports", "view", "stock"),
    ("/reports/movement", "reports", "view", "movement"),
    ("/reports/valuation", "reports", "view", "valuation"),
    ("/users", "users", "view", "users"),
    ("/users/roles", "users", "edit", "roles"),
    ("/settings", "settings", "view", "general"),
    ("/settings/audit-log", "settings", "view", "audit_log"),
];

/// Maps route paths to the permission they require
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    routes: BTreeMap<String, AccessQuery>,
}

impl RouteGuard {
    /// Create an empty RouteGuard
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RouteGuard with the application's built-in routes
    pub fn with_default_routes() -> Self {
        let mut guard = Self::new();
        for (path, module, action, resource) in DEFAULT_ROUTES {
            if let Ok(query) = AccessQuery::new(*module, *action, *resource) {
                guard.register_route(*path, query);
            }
        }
        guard
    }

    /// Register (or replace) the requirement for a route
    pub fn register_route(&mut self, path: impl AsRef<str>, required: AccessQuery) {
        self.routes.insert(normalize_path(path.as_ref()), required);
    }

    /// Register configured route requirements
    pub fn register_requirements(&mut self, requirements: &[RouteRequirement]) -> Result<(), InvalidQueryError> {
        for requirement in requirements {
            let query = requirement.to_query()?;
            self.register_route(&requirement.path, query);
        }
        Ok(())
    }

    /// Requirement guarding `path`.
    ///
    /// Nested paths inherit the requirement of their closest registered
    /// ancestor, so `/warehouse/items/42` is guarded like `/warehouse/items`.
    pub fn requirement(&self, path: &str) -> Option<&AccessQuery> {
        let mut current = normalize_path(path);
        loop {
            if let Some(query) = self.routes.get(&current) {
                return Some(query);
            }
            match current.rfind('/') {
                Some(0) | None => return None,
                Some(idx) => current.truncate(idx),
            }
        }
    }

    /// Check a UI element's requirement
    pub fn check(&self, grants: &PermissionSet, required: &AccessQuery) -> bool {
        evaluator::allows(grants, required)
    }

    /// Check whether `user`, holding `grants`, may open `path`
    pub fn check_route(&self, user: &User, grants: &PermissionSet, path: &str) -> Result<(), AccessError> {
        let required = self.requirement(path).ok_or_else(|| RouteNotFoundError {
            path: path.to_string(),
        })?;

        if self.check(grants, required) {
            Ok(())
        } else {
            Err(PermissionDeniedError {
                user_id: user.id.clone(),
                role: user.role.clone(),
                required: required.to_string(),
            }
            .into())
        }
    }

    /// Registered routes the grants allow, sorted by path
    pub fn visible_routes(&self, grants: &PermissionSet) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|(_, required)| self.check(grants, required))
            .map(|(path, _)| path.as_str())
            .collect()
    }

    /// All registered routes with their requirements, sorted by path
    pub fn routes(&self) -> impl Iterator<Item = (&str, &AccessQuery)> {
        self.routes.iter().map(|(path, query)| (path.as_str(), query))
    }
}

/// Strip the query string and trailing slashes; `/` stays `/`
fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
