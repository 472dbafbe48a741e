//! List registered components.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::config::ComponentsConfig;

/// List every registered variant with its path, parent and templates.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output format: table or json
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// One row of the listing.
#[derive(Debug, Serialize)]
pub struct ListItem {
    /// Variant type name
    pub name: String,
    /// Canonical path, the variant's template directory
    pub path: String,
    /// Parent variant; `None` only for the root
    pub parent: Option<String>,
    /// Qualified names of the templates directly under `path`
    pub templates: Vec<String>,
}

impl ListCommand {
    /// Print the listing.
    pub fn execute(self, config: &ComponentsConfig) -> Result<()> {
        let items = Self::collect(config)?;
        match self.format.as_str() {
            "table" => print_table(&items),
            "json" => println!("{}", serde_json::to_string_pretty(&items)?),
            other => bail!("Unknown format '{other}', expected 'table' or 'json'"),
        }
        Ok(())
    }

    /// Build the listing rows, root first and every parent before its children.
    pub fn collect(config: &ComponentsConfig) -> Result<Vec<ListItem>> {
        let registry = config.build_registry()?;
        let details = config.existence_details();

        Ok(registry
            .iter()
            .map(|meta| ListItem {
                name: meta.name().to_string(),
                path: meta.path().to_string(),
                parent: meta.parent().map(|p| registry.variant(p).name().to_string()),
                templates: if registry.is_root(meta.id()) {
                    Vec::new()
                } else {
                    registry.view_paths().template_names(meta.path(), &details)
                },
            })
            .collect())
    }
}

fn print_table(items: &[ListItem]) {
    println!("{}", "Components".bold());
    println!();
    println!("{:<32} {:<24} {:<24} TEMPLATES", "NAME", "PATH", "PARENT");
    println!("{}", "-".repeat(96).bright_black());

    for item in items {
        let parent = item.parent.as_deref().unwrap_or("(root)");
        let templates = if item.parent.is_none() {
            "(abstract)".bright_black().to_string()
        } else if item.templates.is_empty() {
            "-".to_string()
        } else {
            item.templates.join(", ")
        };
        println!("{:<32} {:<24} {:<24} {}", item.name.cyan(), item.path, parent, templates);
    }

    println!();
    println!("{}: {} component(s)", "Total".green().bold(), items.len().saturating_sub(1));
}
