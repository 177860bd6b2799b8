//! AccessControl - Central authorization entry point

use audit::{AuditEntry, AuditLogger, AuditStats};
use rbac::{evaluator, PermissionMatrix, RoleManager, RouteGuard};
use shared::{AccessConfig, AccessError, AccessQuery, PermissionDeniedError, PermissionSet, Result, User};
use std::path::Path;

/// AccessControl - one place for every authorization decision.
///
/// Decisions are recorded in the audit trail, which is why the checking
/// methods take `&mut self`. Pure checks without auditing are available
/// through [`AccessControl::role_manager`] and [`rbac::evaluator`].
#[derive(Debug)]
pub struct AccessControl {
    config: AccessConfig,
    role_manager: RoleManager,
    route_guard: RouteGuard,
    audit_logger: AuditLogger,
}

impl AccessControl {
    /// Create from configuration
    pub fn new(config: AccessConfig) -> Result<Self> {
        config.validate()?;

        let role_manager = RoleManager::from_config(&config)?;

        let mut route_guard = RouteGuard::with_default_routes();
        route_guard.register_requirements(&config.routes)?;

        let audit_logger = AuditLogger::new(config.audit_capacity);

        tracing::info!(
            templates = role_manager.template_ids().len(),
            routes = route_guard.routes().count(),
            "access control ready"
        );

        Ok(Self {
            config,
            role_manager,
            route_guard,
            audit_logger,
        })
    }

    /// Create from a JSON or YAML configuration file
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = AccessConfig::from_file(path)?;
        tracing::info!(path = %path.display(), "loaded access configuration");
        Self::new(config)
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    pub fn role_manager(&self) -> &RoleManager {
        &self.role_manager
    }

    pub fn route_guard(&self) -> &RouteGuard {
        &self.route_guard
    }

    /// The permission set a user effectively holds
    pub fn effective_permissions(&self, user: &User) -> PermissionSet {
        self.role_manager.effective_permissions(user)
    }

    /// Decide a query for a user and record the decision
    pub fn authorize(&mut self, user: &User, query: &AccessQuery) -> bool {
        self.decide(user, query, None)
    }

    /// Like [`AccessControl::authorize`], but a denial is an error
    pub fn require(&mut self, user: &User, query: &AccessQuery) -> Result<()> {
        if self.authorize(user, query) {
            Ok(())
        } else {
            Err(denied(user, query))
        }
    }

    /// Check whether a user may open a route, recording the decision
    pub fn authorize_route(&mut self, user: &User, path: &str) -> Result<()> {
        let required = match self.route_guard.requirement(path) {
            Some(q) => q.clone(),
            None => {
                self.audit_logger.log_unknown_route(&user.id, &user.role, path);
                tracing::warn!(user = %user.id, path, "unregistered route requested");
                return Err(shared::RouteNotFoundError {
                    path: path.to_string(),
                }
                .into());
            }
        };

        if self.decide(user, &required, Some(path)) {
            Ok(())
        } else {
            Err(denied(user, &required))
        }
    }

    fn decide(&mut self, user: &User, query: &AccessQuery, route: Option<&str>) -> bool {
        let (grants, expanded) = self.role_manager.resolve_permissions(user);
        let matched = evaluator::matching_grant(&grants, query).cloned();
        let permission = query.to_string();

        let reason = match (&matched, user.active) {
            (_, false) => "User is inactive".to_string(),
            (Some(grant), true) => format!("Matched '{}'", grant),
            (None, true) => "No matching grant".to_string(),
        };
        let granted = matched.is_some();

        if expanded && matched.as_ref().is_some_and(|grant| grant.is_superuser()) {
            self.audit_logger.log_superuser_expansion(&user.id, &user.role);
        }

        self.audit_logger
            .log_access(&user.id, &user.role, &permission, route, granted, Some(&reason));

        tracing::debug!(
            user = %user.id,
            role = %user.role,
            permission = %permission,
            granted,
            reason = %reason,
            "access decision"
        );
        granted
    }

    /// Assign a role template to a user and record the assignment
    pub fn assign_role(&mut self, user: &mut User, template_id: &str) -> Result<()> {
        let from_role = user.role.clone();
        self.role_manager.assign_template(user, template_id)?;
        self.audit_logger
            .log_template_assigned(&user.id, &from_role, template_id);
        tracing::info!(user = %user.id, from = %from_role, to = template_id, "role assigned");
        Ok(())
    }

    /// Routes the user may open, for navigation
    pub fn visible_routes(&self, user: &User) -> Vec<String> {
        let grants = self.role_manager.effective_permissions(user);
        self.route_guard
            .visible_routes(&grants)
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Catalog-wide permission matrix for a user
    pub fn matrix_for(&self, user: &User) -> PermissionMatrix {
        PermissionMatrix::build(&self.role_manager.effective_permissions(user))
    }

    /// Get audit statistics
    pub fn audit_stats(&self) -> AuditStats {
        self.audit_logger.get_stats()
    }

    /// Get recent denials
    pub fn recent_denials(&self, limit: usize) -> Vec<&AuditEntry> {
        self.audit_logger.get_recent_denials(limit)
    }

    /// Export the audit trail as JSON
    pub fn export_audit(&self) -> serde_json::Value {
        self.audit_logger.export_json()
    }
}

fn denied(user: &User, query: &AccessQuery) -> AccessError {
    PermissionDeniedError {
        user_id: user.id.clone(),
        role: user.role.clone(),
        required: query.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit::AuditEventType;
    use shared::RouteRequirement;

    fn control() -> AccessControl {
        AccessControl::new(AccessConfig::default()).unwrap()
    }

    fn query(m: &str, a: &str, r: &str) -> AccessQuery {
        AccessQuery::new(m, a, r).unwrap()
    }

    // ============== Construction Tests ==============

    #[test]
    fn test_default_construction() {
        let control = control();
        assert!(control.role_manager().has_template("viewer"));
        assert!(control.route_guard().requirement("/warehouse").is_some());
        assert_eq!(control.audit_stats().total_entries, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AccessConfig {
            audit_capacity: 0,
            ..Default::default()
        };
        assert!(AccessControl::new(config).is_err());
    }

    #[test]
    fn test_from_config_file_with_templates_and_routes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("roles")).unwrap();
        std::fs::write(
            dir.path().join("roles").join("picker.yaml"),
            "id: picker\nname: Picker\npermissions: [warehouse_create_outward, reports_export_stock]\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("wareguard.yaml"),
            r#"
templatesDir: roles
routes:
  - path: /reports/stock/export
    module: reports
    action: export
    resource: stock
"#,
        )
        .unwrap();

        let mut control = AccessControl::from_config_file(&dir.path().join("wareguard.yaml")).unwrap();
        let picker = User::new("u-1", "Pia", "picker");

        assert!(control.authorize_route(&picker, "/reports/stock/export").is_ok());
        assert!(control.authorize_route(&picker, "/reports/stock").is_err());
    }

    // ============== Decision Tests ==============

    #[test]
    fn test_authorize_records_decisions() {
        let mut control = control();
        let staff = User::new("u-1", "Asha", "warehouse_staff");

        assert!(control.authorize(&staff, &query("warehouse", "create", "inward")));
        assert!(!control.authorize(&staff, &query("warehouse", "delete", "inward")));

        let stats = control.audit_stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.denial_count, 1);

        let denials = control.recent_denials(5);
        assert_eq!(denials[0].permission.as_deref(), Some("warehouse:delete:inward"));
        assert_eq!(denials[0].reason.as_deref(), Some("No matching grant"));
    }

    #[test]
    fn test_require_returns_permission_denied() {
        let mut control = control();
        let viewer = User::new("u-2", "Ben", "viewer");

        assert!(control.require(&viewer, &query("reports", "view", "stock")).is_ok());

        let err = control
            .require(&viewer, &query("reports", "export", "stock"))
            .unwrap_err();
        assert!(matches!(err, AccessError::PermissionDenied(_)));
        assert!(err.to_string().contains("reports:export:stock"));
    }

    #[test]
    fn test_admin_role_goes_through_evaluator() {
        let mut control = control();
        let admin = User::new("u-3", "Root", "ADMIN").with_permission("reports_view");

        assert!(control.authorize(&admin, &query("users", "delete", "users")));
        // Granted by the stored tuple, not the expansion
        assert!(control.authorize(&admin, &query("reports", "view", "stock")));

        let stats = control.audit_stats();
        assert_eq!(stats.superuser_count, 1);
        assert_eq!(stats.total_entries, 3);
    }

    #[test]
    fn test_stored_superuser_tuple_is_not_an_expansion() {
        let mut control = control();
        let admin = User::new("u-3", "Root", "ADMIN").with_permission("all");

        assert!(control.authorize(&admin, &query("users", "delete", "users")));

        let stats = control.audit_stats();
        assert_eq!(stats.superuser_count, 0);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_inactive_user_denied_with_reason() {
        let mut control = control();
        let mut user = User::new("u-4", "Cy", "ADMIN");
        user.deactivate();

        assert!(!control.authorize(&user, &query("warehouse", "view", "items")));
        let denials = control.recent_denials(1);
        assert_eq!(denials[0].reason.as_deref(), Some("User is inactive"));
    }

    #[test]
    fn test_authorize_route() {
        let mut control = control();
        let staff = User::new("u-5", "Di", "warehouse_staff");

        assert!(control.authorize_route(&staff, "/warehouse/inward/new").is_ok());
        assert!(control.authorize_route(&staff, "/warehouse/items/17").is_ok());

        let err = control.authorize_route(&staff, "/users/roles").unwrap_err();
        assert!(matches!(err, AccessError::PermissionDenied(_)));

        let err = control.authorize_route(&staff, "/payroll").unwrap_err();
        assert!(matches!(err, AccessError::RouteNotFound(_)));

        let exported = control.export_audit();
        let entries = exported.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["route"], "/warehouse/inward/new");
        assert_eq!(entries[3]["route"], "/payroll");
        assert!(entries[3]["permission"].is_null());
        assert_eq!(entries[3]["reason"], "Route not registered");
    }

    #[test]
    fn test_configured_route_requirements() {
        let config = AccessConfig {
            routes: vec![RouteRequirement {
                path: "/warehouse/approvals".to_string(),
                module: "warehouse".to_string(),
                action: "approve".to_string(),
                resource: "inward".to_string(),
            }],
            ..Default::default()
        };
        let mut control = AccessControl::new(config).unwrap();

        let manager = User::new("u-6", "Ed", "warehouse_manager");
        let staff = User::new("u-7", "Fay", "warehouse_staff");
        assert!(control.authorize_route(&manager, "/warehouse/approvals").is_ok());
        assert!(control.authorize_route(&staff, "/warehouse/approvals").is_err());
    }

    // ============== Assignment Tests ==============

    #[test]
    fn test_assign_role() {
        let mut control = control();
        let mut user = User::new("u-8", "Gil", "viewer");

        control.assign_role(&mut user, "inventory_manager").unwrap();
        assert_eq!(user.role, "inventory_manager");
        assert!(control.authorize(&user, &query("categories", "delete", "categories")));

        let recent = control.audit_logger.get_recent(2);
        assert_eq!(recent[1].event_type, AuditEventType::TemplateAssigned);
    }

    #[test]
    fn test_assign_unknown_role() {
        let mut control = control();
        let mut user = User::new("u-9", "Hal", "viewer");

        let err = control.assign_role(&mut user, "forklift").unwrap_err();
        assert!(matches!(err, AccessError::RoleNotFound(_)));
        assert_eq!(control.audit_stats().assignment_count, 0);
    }

    // ============== Navigation Tests ==============

    #[test]
    fn test_visible_routes_and_matrix() {
        let control = control();
        let supplier = User::new("u-10", "Ivy", "supplier_manager");

        let routes = control.visible_routes(&supplier);
        assert!(routes.contains(&"/suppliers/new".to_string()));
        assert!(routes.contains(&"/warehouse/inward".to_string()));
        assert!(!routes.contains(&"/warehouse/outward".to_string()));

        let matrix = control.matrix_for(&supplier);
        assert_eq!(
            matrix.is_allowed(&query("suppliers", "delete", "contacts")),
            Some(true)
        );
        assert_eq!(
            matrix.is_allowed(&query("inventory", "view", "items")),
            Some(false)
        );
    }
}
