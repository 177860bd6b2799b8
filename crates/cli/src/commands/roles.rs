//! wareguard roles command

use super::Context;
use clap::{Args, Subcommand};
use console::style;

#[derive(Debug, Args)]
pub struct RolesCommand {
    #[command(subcommand)]
    pub command: RolesSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum RolesSubcommand {
    /// List all role templates
    List,
    /// Show the permissions of one template
    Show {
        /// Template id
        id: String,
    },
}

impl RolesCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let control = ctx.access_control()?;
        let manager = control.role_manager();

        match &self.command {
            RolesSubcommand::List => {
                let templates = manager.templates();
                if ctx.json {
                    println!("{}", serde_json::to_string_pretty(&templates)?);
                    return Ok(());
                }

                println!("{}", style("Role templates:").bold());
                for t in templates {
                    let origin = if t.builtin { "built-in" } else { "custom" };
                    let default_marker = if t.id == manager.default_role() { " (default)" } else { "" };
                    println!(
                        "  {:<20} {:<24} {:>3} grants  [{}]{}",
                        style(&t.id).cyan(),
                        t.name,
                        t.permissions.len(),
                        origin,
                        default_marker
                    );
                }
                if !control.config().superuser_roles.is_empty() {
                    println!();
                    println!(
                        "Superuser roles (expanded to *:*:*): {}",
                        control.config().superuser_roles.join(", ")
                    );
                }
            }
            RolesSubcommand::Show { id } => {
                let template = manager.get_template(id).ok_or_else(|| shared::RoleNotFoundError {
                    role_id: id.clone(),
                    available_roles: manager.template_ids().into_iter().map(String::from).collect(),
                })?;

                if ctx.json {
                    println!("{}", serde_json::to_string_pretty(template)?);
                    return Ok(());
                }

                println!("{} ({})", style(&template.name).bold(), template.id);
                if !template.description.is_empty() {
                    println!("{}", template.description);
                }
                println!();
                for p in template.permissions.sorted_unique() {
                    println!("  {}", p);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_roles() {
        let cmd = RolesCommand {
            command: RolesSubcommand::List,
        };
        assert!(cmd.run(&Context::default()).is_ok());
    }

    #[test]
    fn test_show_role() {
        let cmd = RolesCommand {
            command: RolesSubcommand::Show {
                id: "warehouse_manager".to_string(),
            },
        };
        assert!(cmd.run(&Context::default()).is_ok());
    }

    #[test]
    fn test_show_unknown_role() {
        let cmd = RolesCommand {
            command: RolesSubcommand::Show {
                id: "forklift".to_string(),
            },
        };
        let err = cmd.run(&Context::default()).unwrap_err();
        assert!(err.to_string().contains("forklift"));
    }
}
