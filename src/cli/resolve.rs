//! Show where a template would come from.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::component::DynamicComponent;
use crate::config::ComponentsConfig;

/// Resolve a template name for a component without rendering.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Component variant, e.g. `LeafComponent`
    pub component: String,

    /// Template or operation name, e.g. `show` or `shared/card`
    pub name: String,
}

impl ResolveCommand {
    /// Print the owning variant, the qualified name and whether a file was found.
    pub fn execute(self, config: &ComponentsConfig) -> Result<()> {
        let renderer = config.renderer()?;
        let component = DynamicComponent::new(&self.component);

        let located = renderer
            .resolve(&component, None, Some(&self.name))
            .with_context(|| format!("Failed to resolve '{}' for {}", self.name, self.component))?;

        let owner = renderer.registry().variant(located.owner).name();
        let found = if located.found {
            "yes".green()
        } else if self.name.contains('/') {
            "not checked".bright_black()
        } else {
            "no (best guess)".yellow()
        };

        println!("{:<10} {}", "owner:".bold(), owner);
        println!("{:<10} {}", "template:".bold(), located.qualified_name);
        println!("{:<10} {}", "found:".bold(), found);
        Ok(())
    }
}
