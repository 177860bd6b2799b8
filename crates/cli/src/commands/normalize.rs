//! wareguard normalize command

use super::Context;
use anyhow::Context as _;
use clap::Args;
use shared::PermissionEntry;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NormalizeCommand {
    /// Legacy permission strings, e.g. all warehouse_view warehouse_edit_items
    pub entries: Vec<String>,

    /// Read a JSON array of stored entries (strings or tuples) instead
    #[arg(short, long, conflicts_with = "entries")]
    pub file: Option<PathBuf>,
}

impl NormalizeCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let entries = self.entries()?;
        if entries.is_empty() {
            anyhow::bail!("nothing to normalize: pass entries or --file");
        }

        let rows: Vec<(String, shared::Permission)> = entries
            .iter()
            .map(|entry| (describe(entry), rbac::normalize_entry(entry)))
            .collect();

        if ctx.json {
            let out: Vec<_> = rows
                .iter()
                .map(|(input, p)| {
                    serde_json::json!({
                        "input": input,
                        "permission": p,
                        "wellFormed": p.is_well_formed(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(());
        }

        let width = rows.iter().map(|(input, _)| input.len()).max().unwrap_or(0);
        for (input, p) in &rows {
            let marker = if p.is_well_formed() {
                String::new()
            } else {
                format!("  {}", console::style("(malformed, never matches)").yellow())
            };
            println!("{:width$}  ->  {}{}", input, p, marker, width = width);
        }
        Ok(())
    }

    fn entries(&self) -> anyhow::Result<Vec<PermissionEntry>> {
        match &self.file {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let entries: Vec<PermissionEntry> = serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                Ok(entries)
            }
            None => Ok(self
                .entries
                .iter()
                .cloned()
                .map(PermissionEntry::Legacy)
                .collect()),
        }
    }
}

fn describe(entry: &PermissionEntry) -> String {
    match entry {
        PermissionEntry::Legacy(raw) => format!("{:?}", raw),
        PermissionEntry::Tuple(p) => format!("{{{}}}", p),
        PermissionEntry::Malformed(value) => value.to_string(),
    }
}
