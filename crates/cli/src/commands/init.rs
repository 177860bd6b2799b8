//! wareguard init command

use clap::Args;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "wareguard.yaml";

const CONFIG_TEMPLATE: &str = r#"# Wareguard access control configuration

# Roles whose users hold *:*:* (every permission).
superuserRoles:
  - ADMIN

# Template used for users that have no stored permissions and whose role
# names no template.
defaultRole: viewer

# Extra role templates, one YAML file per template.
templatesDir: roles

# Number of audit entries kept in memory.
auditCapacity: 10000

# Route requirements in addition to the built-in ones.
routes: []
"#;

const EXAMPLE_TEMPLATE: &str = r#"id: night_shift
name: Night Shift
description: Receives goods and records damage outside office hours
permissions:
  - warehouse_view
  - { module: warehouse, action: create, resource: inward }
  - { module: warehouse, action: create, resource: damage }
"#;

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to initialize
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Create the config only, without an example role template
    #[arg(long)]
    pub minimal: bool,

    /// Overwrite existing files without asking
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        println!("Initializing Wareguard in {:?}", self.directory);

        std::fs::create_dir_all(&self.directory)?;

        let config_path = self.directory.join(CONFIG_FILE);
        if config_path.exists() && !self.confirm_overwrite(&config_path)? {
            println!("Keeping existing {}", config_path.display());
            return Ok(());
        }
        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        let roles_dir = self.directory.join("roles");
        std::fs::create_dir_all(&roles_dir)?;

        if !self.minimal {
            let example = roles_dir.join("night_shift.yaml");
            if !example.exists() || self.force {
                std::fs::write(&example, EXAMPLE_TEMPLATE)?;
            }
        }

        println!("✓ Wareguard initialized ({})", config_path.display());
        Ok(())
    }

    fn confirm_overwrite(&self, path: &Path) -> anyhow::Result<bool> {
        if self.force {
            return Ok(true);
        }
        if !console::Term::stdout().is_term() {
            anyhow::bail!("{} already exists; use --force to overwrite", path.display());
        }
        let overwrite = dialoguer::Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;
        Ok(overwrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AccessConfig;

    #[test]
    fn test_init_creates_loadable_project() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = InitCommand {
            directory: dir.path().to_path_buf(),
            minimal: false,
            force: false,
        };
        cmd.run().unwrap();

        let config = AccessConfig::from_file(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.default_role, "viewer");

        let template = rbac::template_loader::load_file(&dir.path().join("roles").join("night_shift.yaml")).unwrap();
        assert_eq!(template.id, "night_shift");
        assert_eq!(template.permissions.len(), 3);
    }

    #[test]
    fn test_init_minimal_skips_example() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = InitCommand {
            directory: dir.path().to_path_buf(),
            minimal: true,
            force: false,
        };
        cmd.run().unwrap();

        assert!(dir.path().join(CONFIG_FILE).exists());
        assert!(!dir.path().join("roles").join("night_shift.yaml").exists());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "defaultRole: auditor\n").unwrap();

        let cmd = InitCommand {
            directory: dir.path().to_path_buf(),
            minimal: true,
            force: true,
        };
        cmd.run().unwrap();

        let content = std::fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert!(content.contains("defaultRole: viewer"));
    }
}
