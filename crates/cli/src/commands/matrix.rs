//! wareguard matrix command

use super::{Context, SubjectArgs};
use clap::Args;
use console::style;
use shared::catalog;

#[derive(Debug, Args)]
pub struct MatrixCommand {
    #[command(flatten)]
    pub subject: SubjectArgs,

    /// Only show this module
    #[arg(short, long)]
    pub module: Option<String>,
}

impl MatrixCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let control = ctx.access_control()?;
        let user = self.subject.to_user()?;
        let matrix = control.matrix_for(&user);

        if let Some(module) = &self.module {
            if !catalog::is_known_module(module) {
                anyhow::bail!(
                    "unknown module '{}'; expected one of: {}",
                    module,
                    catalog::MODULES.join(", ")
                );
            }
        }

        if ctx.json {
            println!("{}", serde_json::to_string_pretty(&matrix)?);
            return Ok(());
        }

        print!("{:<28}", "");
        for action in catalog::ACTIONS {
            print!("{:^10}", action);
        }
        println!();

        for (module, cells) in matrix.by_module() {
            if self.module.as_deref().is_some_and(|m| m != module) {
                continue;
            }
            for resource in catalog::resources_for(module) {
                print!("{:<28}", format!("{}:{}", module, resource));
                for action in catalog::ACTIONS {
                    let allowed = cells.iter().any(|c| {
                        c.allowed && c.query.action() == *action && c.query.resource() == *resource
                    });
                    let mark = if allowed {
                        style(format!("{:^10}", "x")).green()
                    } else {
                        style(format!("{:^10}", ".")).dim()
                    };
                    print!("{}", mark);
                }
                println!();
            }
        }

        println!();
        println!(
            "{} of {} catalog permissions allowed",
            matrix.allowed_count(),
            matrix.cells().len()
        );
        Ok(())
    }
}
