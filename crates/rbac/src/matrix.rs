//! PermissionMatrix - Catalog-wide view of what a permission set allows

use crate::evaluator;
use serde::Serialize;
use shared::{catalog, AccessQuery, PermissionSet};
use std::collections::BTreeMap;

/// One catalog triple and the decision for it
#[derive(Debug, Clone, Serialize)]
pub struct MatrixCell {
    pub query: AccessQuery,
    pub allowed: bool,
}

/// Allow/deny decision for every `(module, action, resource)` in the catalog
#[derive(Debug, Clone, Serialize)]
pub struct PermissionMatrix {
    cells: Vec<MatrixCell>,
}

impl PermissionMatrix {
    pub fn build(grants: &PermissionSet) -> Self {
        let cells = catalog::catalog_queries()
            .into_iter()
            .map(|query| {
                let allowed = evaluator::allows(grants, &query);
                MatrixCell { query, allowed }
            })
            .collect();
        Self { cells }
    }

    pub fn cells(&self) -> &[MatrixCell] {
        &self.cells
    }

    pub fn allowed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.allowed).count()
    }

    /// Decision for a catalog triple; `None` outside the catalog
    pub fn is_allowed(&self, query: &AccessQuery) -> Option<bool> {
        self.cells
            .iter()
            .find(|c| &c.query == query)
            .map(|c| c.allowed)
    }

    /// Cells grouped by module, in catalog order within each module
    pub fn by_module(&self) -> BTreeMap<&str, Vec<&MatrixCell>> {
        let mut rows: BTreeMap<&str, Vec<&MatrixCell>> = BTreeMap::new();
        for cell in &self.cells {
            rows.entry(cell.query.module()).or_default().push(cell);
        }
        rows
    }

    /// Allowed actions per `(module, resource)`, for compact display
    pub fn allowed_actions(&self) -> BTreeMap<(&str, &str), Vec<&str>> {
        let mut actions: BTreeMap<(&str, &str), Vec<&str>> = BTreeMap::new();
        for cell in self.cells.iter().filter(|c| c.allowed) {
            actions
                .entry((cell.query.module(), cell.query.resource()))
                .or_default()
                .push(cell.query.action());
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Permission;

    #[test]
    fn test_empty_set_allows_nothing() {
        let matrix = PermissionMatrix::build(&PermissionSet::new());
        assert_eq!(matrix.allowed_count(), 0);
        assert_eq!(matrix.cells().len(), catalog::catalog_queries().len());
    }

    #[test]
    fn test_superuser_allows_everything() {
        let grants: PermissionSet = vec![Permission::superuser()].into();
        let matrix = PermissionMatrix::build(&grants);
        assert_eq!(matrix.allowed_count(), matrix.cells().len());
    }

    #[test]
    fn test_module_rows() {
        let grants: PermissionSet = vec![Permission::new("suppliers", "view", "*")].into();
        let matrix = PermissionMatrix::build(&grants);

        assert_eq!(matrix.allowed_count(), catalog::resources_for("suppliers").len());

        let rows = matrix.by_module();
        assert_eq!(rows.len(), catalog::MODULES.len());
        assert!(rows["suppliers"].iter().any(|c| c.allowed));
        assert!(rows["warehouse"].iter().all(|c| !c.allowed));

        let actions = matrix.allowed_actions();
        assert_eq!(actions[&("suppliers", "contacts")], vec!["view"]);
    }

    #[test]
    fn test_is_allowed_lookup() {
        let grants: PermissionSet = vec![Permission::new("warehouse", "*", "inward")].into();
        let matrix = PermissionMatrix::build(&grants);

        let q = AccessQuery::new("warehouse", "approve", "inward").unwrap();
        assert_eq!(matrix.is_allowed(&q), Some(true));

        let q = AccessQuery::new("warehouse", "approve", "outward").unwrap();
        assert_eq!(matrix.is_allowed(&q), Some(false));

        let q = AccessQuery::new("payroll", "view", "runs").unwrap();
        assert_eq!(matrix.is_allowed(&q), None);
    }
}
