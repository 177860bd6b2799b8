//! wareguard routes command

use super::{Context, SubjectArgs};
use clap::Args;
use console::style;

#[derive(Debug, Args)]
pub struct RoutesCommand {
    #[command(flatten)]
    pub subject: SubjectArgs,

    /// List every registered route, marking the denied ones
    #[arg(short, long)]
    pub all: bool,
}

impl RoutesCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let control = ctx.access_control()?;
        let user = self.subject.to_user()?;
        let grants = control.effective_permissions(&user);
        let guard = control.route_guard();

        let rows: Vec<(&str, String, bool)> = guard
            .routes()
            .map(|(path, required)| (path, required.to_string(), guard.check(&grants, required)))
            .filter(|(_, _, allowed)| self.all || *allowed)
            .collect();

        if ctx.json {
            let out: Vec<_> = rows
                .iter()
                .map(|(path, required, allowed)| {
                    serde_json::json!({ "path": path, "requires": required, "allowed": allowed })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(());
        }

        for (path, required, allowed) in &rows {
            let mark = if *allowed {
                style("allow").green()
            } else {
                style("deny ").red()
            };
            println!("  {}  {:<28} {}", mark, path, style(required).dim());
        }
        if rows.is_empty() {
            println!("No routes are reachable for role '{}'", user.role);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(role: &str, all: bool) -> RoutesCommand {
        RoutesCommand {
            subject: SubjectArgs {
                role: role.to_string(),
                grants: Vec::new(),
                legacy: vec!["suppliers_view".to_string()],
                user_file: None,
            },
            all,
        }
    }

    #[test]
    fn test_routes_visible_only() {
        assert!(command("custom", false).run(&Context::default()).is_ok());
    }

    #[test]
    fn test_routes_all() {
        let ctx = Context {
            json: true,
            ..Default::default()
        };
        assert!(command("custom", true).run(&ctx).is_ok());
    }
}
