//! RoleManager - Role templates and user permission resolution

use crate::evaluator;
use crate::normalize::normalize_entries;
use crate::role_templates::{builtin_templates, RoleTemplate};
use crate::template_loader::TemplateLoader;
use shared::{
    AccessConfig, AccessQuery, InvalidTemplateError, Permission, PermissionEntry, PermissionSet,
    RoleNotFoundError, User,
};
use std::collections::HashMap;

/// RoleManager holds the role templates and resolves the permissions a
/// user effectively holds.
///
/// Superuser roles are not a separate bypass: a user whose role is listed
/// as a superuser role gets `{*, *, *}` appended to their effective set, and
/// every decision still goes through the evaluator.
#[derive(Debug)]
pub struct RoleManager {
    /// Registered templates by id
    templates: HashMap<String, RoleTemplate>,
    /// Template used when a user's role names none
    default_role: String,
    /// Roles expanded to `{*, *, *}`
    superuser_roles: Vec<String>,
}

impl RoleManager {
    /// Create an empty RoleManager
    pub fn new() -> Self {
        let defaults = AccessConfig::default();
        Self {
            templates: HashMap::new(),
            default_role: defaults.default_role,
            superuser_roles: defaults.superuser_roles,
        }
    }

    /// Create a RoleManager with the built-in templates registered
    pub fn with_builtin_templates() -> Self {
        let mut manager = Self::new();
        for template in builtin_templates() {
            manager.templates.insert(template.id.clone(), template);
        }
        manager
    }

    /// Build from configuration: built-ins, then templates from
    /// `templates_dir`. Custom templates may not replace built-ins.
    pub fn from_config(config: &AccessConfig) -> shared::Result<Self> {
        let mut manager = Self::with_builtin_templates();
        manager.default_role = config.default_role.clone();
        manager.superuser_roles = config.superuser_roles.clone();

        if let Some(dir) = &config.templates_dir {
            let mut loader = TemplateLoader::new();
            loader.load_from_directory(dir)?;
            for template in loader.into_templates() {
                manager.register_template(template)?;
            }
        }

        if !manager.has_template(&manager.default_role) {
            tracing::warn!(
                default_role = %manager.default_role,
                "default role names no template; users without permissions will get none"
            );
        }

        tracing::info!(templates = manager.templates.len(), "role templates ready");
        Ok(manager)
    }

    /// Register a template. Ids are unique; an existing template is never replaced.
    pub fn register_template(&mut self, template: RoleTemplate) -> Result<(), InvalidTemplateError> {
        if self.templates.contains_key(&template.id) {
            return Err(InvalidTemplateError {
                template_id: template.id,
                reason: "a template with this id is already registered".to_string(),
            });
        }
        tracing::debug!(template = %template.id, "registered role template");
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Get a template by id
    pub fn get_template(&self, id: &str) -> Option<&RoleTemplate> {
        self.templates.get(id)
    }

    pub fn has_template(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// All template ids, sorted
    pub fn template_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        ids.sort();
        ids
    }

    /// All templates, sorted by id
    pub fn templates(&self) -> Vec<&RoleTemplate> {
        let mut templates: Vec<&RoleTemplate> = self.templates.values().collect();
        templates.sort_by(|a, b| a.id.cmp(&b.id));
        templates
    }

    /// Set the default role
    pub fn set_default_role(&mut self, role_id: impl Into<String>) {
        self.default_role = role_id.into();
    }

    /// Get the default role ID
    pub fn default_role(&self) -> &str {
        &self.default_role
    }

    pub fn set_superuser_roles(&mut self, roles: Vec<String>) {
        self.superuser_roles = roles;
    }

    pub fn is_superuser_role(&self, role: &str) -> bool {
        self.superuser_roles.iter().any(|r| r == role)
    }

    fn role_not_found(&self, role_id: &str) -> RoleNotFoundError {
        RoleNotFoundError {
            role_id: role_id.to_string(),
            available_roles: self.template_ids().into_iter().map(String::from).collect(),
        }
    }

    /// Assign a template: the user's role becomes the template id and the
    /// template's tuples are copied into the user's stored permissions.
    pub fn assign_template(&self, user: &mut User, template_id: &str) -> Result<(), RoleNotFoundError> {
        let template = self
            .get_template(template_id)
            .ok_or_else(|| self.role_not_found(template_id))?;

        user.role = template.id.clone();
        user.permissions = template
            .permissions
            .iter()
            .cloned()
            .map(PermissionEntry::Tuple)
            .collect();

        tracing::debug!(user = %user.id, template = %template.id, "assigned role template");
        Ok(())
    }

    /// The permission set a user effectively holds.
    ///
    /// - inactive users hold nothing;
    /// - stored entries are normalized (legacy strings included);
    /// - a user with no stored entries falls back to the template named by
    ///   their role, or the default role's template;
    /// - superuser roles additionally hold `{*, *, *}`.
    pub fn effective_permissions(&self, user: &User) -> PermissionSet {
        self.resolve_permissions(user).0
    }

    /// [`RoleManager::effective_permissions`], plus whether `{*, *, *}` was
    /// added for a superuser role rather than already granted to the user.
    pub fn resolve_permissions(&self, user: &User) -> (PermissionSet, bool) {
        if !user.active {
            return (PermissionSet::new(), false);
        }

        let mut set = normalize_entries(&user.permissions);

        for malformed in set.iter().filter(|p| !p.is_well_formed()) {
            tracing::warn!(user = %user.id, permission = %malformed, "ignoring malformed permission");
        }

        if user.permissions.is_empty() {
            let fallback = self
                .get_template(&user.role)
                .or_else(|| self.get_template(&self.default_role));
            if let Some(template) = fallback {
                tracing::debug!(user = %user.id, template = %template.id, "using template permissions");
                set.extend(template.permissions.iter().cloned());
            }
        }

        let expanded = self.is_superuser_role(&user.role) && !set.contains_superuser();
        if expanded {
            tracing::debug!(user = %user.id, role = %user.role, "superuser role expanded to *:*:*");
            set.push(Permission::superuser());
        }

        (set, expanded)
    }

    /// Check a user against a query
    pub fn has_permission(&self, user: &User, query: &AccessQuery) -> bool {
        let grants = self.effective_permissions(user);
        evaluator::allows(&grants, query)
    }
}

impl Default for RoleManager {
    fn default() -> Self {
        Self::new()
    }
}
