//! CLI Commands

pub mod check;
pub mod init;
pub mod matrix;
pub mod normalize;
pub mod roles;
pub mod routes;

pub use check::CheckCommand;
pub use init::InitCommand;
pub use matrix::MatrixCommand;
pub use normalize::NormalizeCommand;
pub use roles::RolesCommand;
pub use routes::RoutesCommand;

use anyhow::Context as _;
use authz::AccessControl;
use clap::Args;
use shared::{Permission, PermissionEntry, User};
use std::path::PathBuf;

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Configuration file (`.yaml`, `.yml` or `.json`)
    pub config: Option<PathBuf>,
    /// Print machine-readable JSON
    pub json: bool,
}

impl Context {
    /// Build the access control layer from `--config`, or defaults
    pub fn access_control(&self) -> anyhow::Result<AccessControl> {
        let control = match &self.config {
            Some(path) => AccessControl::from_config_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => AccessControl::new(Default::default())?,
        };
        Ok(control)
    }
}

/// Who is being checked
#[derive(Debug, Clone, Args)]
pub struct SubjectArgs {
    /// Role of the user (a template id or a superuser role)
    #[arg(short, long, default_value = "viewer")]
    pub role: String,

    /// Granted tuple as module:action:resource (repeatable)
    #[arg(short, long = "grant")]
    pub grants: Vec<Permission>,

    /// Legacy permission string such as warehouse_view (repeatable)
    #[arg(short, long = "legacy")]
    pub legacy: Vec<String>,

    /// Read the user record from a JSON file instead
    #[arg(long, conflicts_with_all = ["role", "grants", "legacy"])]
    pub user_file: Option<PathBuf>,
}

impl SubjectArgs {
    pub fn to_user(&self) -> anyhow::Result<User> {
        if let Some(path) = &self.user_file {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let user: User = serde_json::from_str(&content)
                .with_context(|| format!("parsing user record {}", path.display()))?;
            return Ok(user);
        }

        let entries: Vec<PermissionEntry> = self
            .grants
            .iter()
            .cloned()
            .map(PermissionEntry::Tuple)
            .chain(self.legacy.iter().cloned().map(PermissionEntry::Legacy))
            .collect();

        Ok(User::new("cli", "cli", self.role.clone()).with_permissions(entries))
    }
}
