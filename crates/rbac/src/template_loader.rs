//! TemplateLoader - Load custom role templates from YAML files
//!
//! A template file looks like:
//!
//! ```yaml
//! id: night_shift
//! name: Night Shift
//! description: Receiving only
//! permissions:
//!   - warehouse_view
//!   - { module: warehouse, action: create, resource: inward }
//! ```
//!
//! Permission entries use the same shapes as user records, so legacy
//! strings are accepted and normalized on load.

use crate::normalize::normalize_entries;
use crate::role_templates::RoleTemplate;
use serde::Deserialize;
use shared::{catalog, AccessError, InvalidTemplateError, PermissionEntry};
use std::path::{Path, PathBuf};

const TEMPLATE_ID_PATTERN: &str = r"^[a-z][a-z0-9_]*$";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateFile {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    permissions: Vec<PermissionEntry>,
}

/// Template loader
#[derive(Debug, Default)]
pub struct TemplateLoader {
    templates: Vec<RoleTemplate>,
    skipped: Vec<(PathBuf, String)>,
}

impl TemplateLoader {
    /// Create a new TemplateLoader
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.yaml` / `*.yml` file in `dir`.
    ///
    /// Files that fail to parse or validate are skipped and recorded in
    /// [`TemplateLoader::skipped`]. A missing directory loads nothing.
    pub fn load_from_directory(&mut self, dir: &Path) -> shared::Result<usize> {
        if !dir.exists() {
            tracing::debug!(dir = %dir.display(), "template directory does not exist");
            return Ok(0);
        }

        // The directory itself may contain glob metacharacters
        let escaped = PathBuf::from(glob::Pattern::escape(&dir.to_string_lossy()));

        let mut paths = Vec::new();
        for extension in ["yaml", "yml"] {
            let pattern = escaped.join(format!("*.{}", extension));
            let entries = glob::glob(&pattern.to_string_lossy())
                .map_err(|e| AccessError::Config(format!("bad template pattern: {}", e)))?;
            for entry in entries {
                match entry {
                    Ok(path) => paths.push(path),
                    Err(e) => tracing::warn!(error = %e, "unreadable template path"),
                }
            }
        }
        paths.sort();

        let before = self.templates.len();
        for path in paths {
            match load_file(&path) {
                Ok(template) => {
                    tracing::info!(template = %template.id, path = %path.display(), "loaded role template");
                    self.templates.push(template);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping role template");
                    self.skipped.push((path, e.to_string()));
                }
            }
        }

        Ok(self.templates.len() - before)
    }

    /// Loaded templates
    pub fn templates(&self) -> &[RoleTemplate] {
        &self.templates
    }

    /// Files that were rejected, with the reason
    pub fn skipped(&self) -> &[(PathBuf, String)] {
        &self.skipped
    }

    pub fn into_templates(self) -> Vec<RoleTemplate> {
        self.templates
    }
}

/// Load and validate a single template file
pub fn load_file(path: &Path) -> shared::Result<RoleTemplate> {
    let content = std::fs::read_to_string(path)?;
    parse_template(&content)
}

/// Parse and validate a template from YAML text
pub fn parse_template(yaml: &str) -> shared::Result<RoleTemplate> {
    let file: TemplateFile = serde_yaml::from_str(yaml)?;

    if !is_valid_template_id(&file.id) {
        return Err(InvalidTemplateError {
            template_id: file.id,
            reason: format!("id must match {}", TEMPLATE_ID_PATTERN),
        }
        .into());
    }

    if file.permissions.is_empty() {
        return Err(InvalidTemplateError {
            template_id: file.id,
            reason: "template grants no permissions".to_string(),
        }
        .into());
    }

    let permissions = normalize_entries(&file.permissions);
    if let Some(bad) = permissions.iter().find(|p| !p.is_well_formed()) {
        return Err(InvalidTemplateError {
            template_id: file.id,
            reason: format!("malformed permission '{}'", bad),
        }
        .into());
    }

    for p in permissions.iter().filter(|p| !p.is_superuser()) {
        if !catalog::is_known_module(&p.module) {
            tracing::warn!(template = %file.id, module = %p.module, "template references unknown module");
        }
    }

    Ok(RoleTemplate::new(file.id, file.name, permissions).with_description(file.description))
}

/// Simple id check (lowercase snake case)
fn is_valid_template_id(id: &str) -> bool {
    regex::Regex::new(TEMPLATE_ID_PATTERN)
        .map(|r| r.is_match(id))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Permission;

    const NIGHT_SHIFT: &str = r#"
id: night_shift
name: Night Shift
description: Receiving only
permissions:
  - warehouse_view
  - { module: warehouse, action: create, resource: inward }
"#;

    #[test]
    fn test_parse_template() {
        let template = parse_template(NIGHT_SHIFT).unwrap();

        assert_eq!(template.id, "night_shift");
        assert!(!template.builtin);
        assert_eq!(
            template.permissions.as_slice(),
            &[
                Permission::new("warehouse", "view", "*"),
                Permission::new("warehouse", "create", "inward"),
            ]
        );
    }

    #[test]
    fn test_invalid_id_rejected() {
        let yaml = "id: Night-Shift\nname: x\npermissions: [warehouse_view]\n";
        let err = parse_template(yaml).unwrap_err();
        assert!(matches!(err, AccessError::InvalidTemplate(_)));
    }

    #[test]
    fn test_empty_permissions_rejected() {
        let yaml = "id: empty\nname: Empty\npermissions: []\n";
        assert!(parse_template(yaml).is_err());
    }

    #[test]
    fn test_malformed_permission_rejected() {
        let yaml = "id: broken\nname: Broken\npermissions: [warehouse_]\n";
        let err = parse_template(yaml).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("night.yaml"), NIGHT_SHIFT).unwrap();
        std::fs::write(
            dir.path().join("picker.yml"),
            "id: picker\nname: Picker\npermissions: [warehouse_create_outward]\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.yaml"), "id: [not, a, string]").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut loader = TemplateLoader::new();
        let loaded = loader.load_from_directory(dir.path()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(loader.skipped().len(), 1);
        let mut ids: Vec<_> = loader.templates().iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["night_shift", "picker"]);
    }

    #[test]
    fn test_incomplete_tuple_rejected() {
        let yaml = "id: broken\nname: Broken\npermissions:\n  - { module: warehouse, action: view }\n";
        let err = parse_template(yaml).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_directory_with_glob_characters() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("roles [eu]?");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("night.yaml"), NIGHT_SHIFT).unwrap();

        let mut loader = TemplateLoader::new();
        assert_eq!(loader.load_from_directory(&dir).unwrap(), 1);
        assert_eq!(loader.templates()[0].id, "night_shift");
    }

    #[test]
    fn test_missing_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = TemplateLoader::new();
        let loaded = loader.load_from_directory(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, 0);
        assert!(loader.into_templates().is_empty());
    }
}
