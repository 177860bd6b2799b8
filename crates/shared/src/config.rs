//! Configuration types for Wareguard

use crate::error::{AccessError, InvalidQueryError};
use crate::permission::AccessQuery;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An extra route guard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequirement {
    /// Route path, e.g. `/warehouse/inward`
    pub path: String,
    pub module: String,
    pub action: String,
    pub resource: String,
}

impl RouteRequirement {
    pub fn to_query(&self) -> std::result::Result<AccessQuery, InvalidQueryError> {
        AccessQuery::new(
            self.module.clone(),
            self.action.clone(),
            self.resource.clone(),
        )
    }
}

/// Access control configuration (`wareguard.yaml` / `wareguard.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessConfig {
    /// Roles whose users are granted `{*, *, *}`
    #[serde(default = "default_superuser_roles")]
    pub superuser_roles: Vec<String>,

    /// Template used for users whose role names no template
    #[serde(default = "default_role")]
    pub default_role: String,

    /// Directory with additional role template files
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,

    /// Maximum number of retained audit entries
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,

    /// Route requirements added to the built-in route table
    #[serde(default)]
    pub routes: Vec<RouteRequirement>,
}

fn default_superuser_roles() -> Vec<String> {
    vec!["ADMIN".to_string()]
}

fn default_role() -> String {
    "viewer".to_string()
}

fn default_audit_capacity() -> usize {
    10_000
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            superuser_roles: default_superuser_roles(),
            default_role: default_role(),
            templates_dir: None,
            audit_capacity: default_audit_capacity(),
            routes: Vec::new(),
        }
    }
}

impl AccessConfig {
    /// Load configuration from a JSON or YAML file, chosen by extension.
    ///
    /// A relative `templatesDir` is resolved against the file's directory.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            other => {
                return Err(AccessError::Config(format!(
                    "unsupported config extension {:?} for {}",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        };

        if let (Some(dir), Some(base)) = (config.templates_dir.as_ref(), path.parent()) {
            if dir.is_relative() {
                config.templates_dir = Some(base.join(dir));
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could never be served
    pub fn validate(&self) -> crate::Result<()> {
        if self.default_role.trim().is_empty() {
            return Err(AccessError::Config("defaultRole must not be empty".to_string()));
        }
        if self.audit_capacity == 0 {
            return Err(AccessError::Config("auditCapacity must be at least 1".to_string()));
        }
        for route in &self.routes {
            if !route.path.starts_with('/') {
                return Err(AccessError::Config(format!(
                    "route '{}' must start with '/'",
                    route.path
                )));
            }
            route.to_query()?;
        }
        Ok(())
    }

    pub fn is_superuser_role(&self, role: &str) -> bool {
        self.superuser_roles.iter().any(|r| r == role)
    }
}
