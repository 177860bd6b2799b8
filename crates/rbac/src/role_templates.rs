//! Built-in role templates
//!
//! Each template is a fixed permission set copied onto a user when the
//! role is assigned. Templates never change after they are built.

use serde::Serialize;
use shared::{Permission, PermissionSet};

type Grant = (&'static str, &'static str, &'static str);

/// A named default permission set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: PermissionSet,
    /// Shipped with the crate rather than loaded from disk
    pub builtin: bool,
}

impl RoleTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        permissions: impl Into<PermissionSet>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            permissions: permissions.into(),
            builtin: false,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn builtin(id: &str, name: &str, description: &str, grants: &[Grant]) -> Self {
        let permissions: PermissionSet = grants
            .iter()
            .map(|(m, a, r)| Permission::new(*m, *a, *r))
            .collect();
        Self {
            builtin: true,
            ..Self::new(id, name, permissions).with_description(description)
        }
    }
}

pub const SUPER_ADMIN: &str = "super_admin";
pub const WAREHOUSE_MANAGER: &str = "warehouse_manager";
pub const WAREHOUSE_STAFF: &str = "warehouse_staff";
pub const INVENTORY_MANAGER: &str = "inventory_manager";
pub const INVENTORY_STAFF: &str = "inventory_staff";
pub const SUPPLIER_MANAGER: &str = "supplier_manager";
pub const AUDITOR: &str = "auditor";
pub const VIEWER: &str = "viewer";

const SUPER_ADMIN_GRANTS: &[Grant] = &[("*", "*", "*")];

const WAREHOUSE_MANAGER_GRANTS: &[Grant] = &[
    ("warehouse", "*", "*"),
    ("inventory", "*", "*"),
    ("suppliers", "view", "*"),
    ("categories", "view", "*"),
    ("reports", "*", "*"),
];

const WAREHOUSE_STAFF_GRANTS: &[Grant] = &[
    ("warehouse", "view", "*"),
    ("warehouse", "create", "inward"),
    ("warehouse", "create", "outward"),
    ("warehouse", "create", "damage"),
    ("warehouse", "edit", "items"),
    ("inventory", "view", "items"),
];

const INVENTORY_MANAGER_GRANTS: &[Grant] = &[
    ("inventory", "*", "*"),
    ("categories", "*", "*"),
    ("warehouse", "view", "*"),
    ("reports", "view", "*"),
    ("reports", "export", "*"),
];

const INVENTORY_STAFF_GRANTS: &[Grant] = &[
    ("inventory", "view", "*"),
    ("inventory", "create", "inward"),
    ("inventory", "create", "outward"),
    ("inventory", "edit", "items"),
];

const SUPPLIER_MANAGER_GRANTS: &[Grant] = &[
    ("suppliers", "*", "*"),
    ("warehouse", "view", "inward"),
    ("reports", "view", "*"),
];

const AUDITOR_GRANTS: &[Grant] = &[
    ("warehouse", "view", "*"),
    ("warehouse", "export", "*"),
    ("inventory", "view", "*"),
    ("inventory", "export", "*"),
    ("reports", "view", "*"),
    ("reports", "export", "*"),
    ("settings", "view", "audit_log"),
];

const VIEWER_GRANTS: &[Grant] = &[
    ("warehouse", "view", "*"),
    ("inventory", "view", "*"),
    ("suppliers", "view", "*"),
    ("categories", "view", "*"),
    ("reports", "view", "*"),
];

/// The templates shipped with Wareguard
pub fn builtin_templates() -> Vec<RoleTemplate> {
    vec![
        RoleTemplate::builtin(
            SUPER_ADMIN,
            "Super Administrator",
            "Unrestricted access to every module",
            SUPER_ADMIN_GRANTS,
        ),
        RoleTemplate::builtin(
            WAREHOUSE_MANAGER,
            "Warehouse Manager",
            "Full control of warehouse and inventory operations",
            WAREHOUSE_MANAGER_GRANTS,
        ),
        RoleTemplate::builtin(
            WAREHOUSE_STAFF,
            "Warehouse Staff",
            "Records inward, outward and damage transactions",
            WAREHOUSE_STAFF_GRANTS,
        ),
        RoleTemplate::builtin(
            INVENTORY_MANAGER,
            "Inventory Manager",
            "Manages inventory items and categories",
            INVENTORY_MANAGER_GRANTS,
        ),
        RoleTemplate::builtin(
            INVENTORY_STAFF,
            "Inventory Staff",
            "Records inventory movements",
            INVENTORY_STAFF_GRANTS,
        ),
        RoleTemplate::builtin(
            SUPPLIER_MANAGER,
            "Supplier Manager",
            "Maintains suppliers and their contacts",
            SUPPLIER_MANAGER_GRANTS,
        ),
        RoleTemplate::builtin(
            AUDITOR,
            "Auditor",
            "Read and export access for stock audits",
            AUDITOR_GRANTS,
        ),
        RoleTemplate::builtin(
            VIEWER,
            "Viewer",
            "Read-only access to operational modules",
            VIEWER_GRANTS,
        ),
    ]
}
