//! wareguard check command

use super::{Context, SubjectArgs};
use clap::Args;
use console::style;
use shared::{catalog, AccessQuery};

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub subject: SubjectArgs,

    /// Module, e.g. warehouse
    pub module: String,

    /// Action, e.g. edit
    pub action: String,

    /// Resource, e.g. items
    pub resource: String,
}

impl CheckCommand {
    /// Evaluate the query; returns whether it was allowed
    pub fn run(&self, ctx: &Context) -> anyhow::Result<bool> {
        let mut control = ctx.access_control()?;
        let user = self.subject.to_user()?;
        let query = AccessQuery::new(
            self.module.clone(),
            self.action.clone(),
            self.resource.clone(),
        )?;

        if !catalog::is_known_module(query.module()) {
            tracing::warn!(module = query.module(), "module is not in the warehouse catalog");
        } else if !catalog::is_known_resource(query.module(), query.resource()) {
            tracing::warn!(
                module = query.module(),
                resource = query.resource(),
                "resource is not in the warehouse catalog"
            );
        }

        let grants = control.effective_permissions(&user);
        let matched = rbac::matching_grant(&grants, &query).cloned();
        let allowed = control.authorize(&user, &query);

        if ctx.json {
            let out = serde_json::json!({
                "user": user.id,
                "role": user.role,
                "query": query,
                "allowed": allowed,
                "matchedGrant": matched,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else if allowed {
            let via = matched.map(|g| g.to_string()).unwrap_or_default();
            println!("{} {} (via {})", style("ALLOW").green().bold(), query, via);
        } else {
            println!("{} {}", style("DENY").red().bold(), query);
        }

        Ok(allowed)
    }
}
