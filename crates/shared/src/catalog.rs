//! Warehouse permission catalog
//!
//! The modules, actions and resources the application knows about. The
//! evaluator does not depend on this table; it is used to build permission
//! matrices, validate templates and warn about typos.

use crate::permission::AccessQuery;

pub const MODULES: &[&str] = &[
    "warehouse",
    "inventory",
    "suppliers",
    "categories",
    "reports",
    "users",
    "settings",
];

pub const ACTIONS: &[&str] = &[
    "view", "create", "edit", "delete", "approve", "export", "import", "transfer",
];

const WAREHOUSE_RESOURCES: &[&str] = &[
    "items",
    "inward",
    "outward",
    "damage",
    "closing_stock",
    "transfers",
];
const INVENTORY_RESOURCES: &[&str] = &["items", "inward", "outward", "damage", "closing_stock"];
const SUPPLIER_RESOURCES: &[&str] = &["suppliers", "contacts"];
const CATEGORY_RESOURCES: &[&str] = &["categories"];
const REPORT_RESOURCES: &[&str] = &["stock", "movement", "valuation"];
const USER_RESOURCES: &[&str] = &["users", "roles"];
const SETTINGS_RESOURCES: &[&str] = &["general", "audit_log"];

/// Resources defined for a module (empty for unknown modules)
pub fn resources_for(module: &str) -> &'static [&'static str] {
    match module {
        "warehouse" => WAREHOUSE_RESOURCES,
        "inventory" => INVENTORY_RESOURCES,
        "suppliers" => SUPPLIER_RESOURCES,
        "categories" => CATEGORY_RESOURCES,
        "reports" => REPORT_RESOURCES,
        "users" => USER_RESOURCES,
        "settings" => SETTINGS_RESOURCES,
        _ => &[],
    }
}

pub fn is_known_module(module: &str) -> bool {
    MODULES.contains(&module)
}

pub fn is_known_action(action: &str) -> bool {
    ACTIONS.contains(&action)
}

pub fn is_known_resource(module: &str, resource: &str) -> bool {
    resources_for(module).contains(&resource)
}

/// Every concrete `(module, action, resource)` triple in the catalog
pub fn catalog_queries() -> Vec<AccessQuery> {
    let mut queries = Vec::new();
    for module in MODULES {
        for action in ACTIONS {
            for resource in resources_for(module) {
                queries.push(AccessQuery {
                    module: module.to_string(),
                    action: action.to_string(),
                    resource: resource.to_string(),
                });
            }
        }
    }
    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_module_has_resources() {
        for module in MODULES {
            assert!(!resources_for(module).is_empty(), "{} has no resources", module);
        }
        assert!(resources_for("payroll").is_empty());
    }

    #[test]
    fn test_known_lookups() {
        assert!(is_known_module("warehouse"));
        assert!(!is_known_module("*"));
        assert!(is_known_action("transfer"));
        assert!(is_known_resource("warehouse", "closing_stock"));
        assert!(!is_known_resource("suppliers", "closing_stock"));
    }

    #[test]
    fn test_catalog_queries_are_concrete() {
        let queries = catalog_queries();
        let resource_count: usize = MODULES.iter().map(|m| resources_for(m).len()).sum();
        assert_eq!(queries.len(), resource_count * ACTIONS.len());
        assert!(queries.iter().all(|q| q.module() != "*" && q.resource() != "*"));
    }
}
