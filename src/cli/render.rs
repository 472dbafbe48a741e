//! Render a component from the command line.
//!
//! The component is built from arguments: its variant name, plus fields taken from
//! `--assigns` (a JSON object) and repeated `--var key=value` pairs. Values given
//! with `--var` are parsed as JSON when possible (`count=3`, `admin=true`) and kept
//! as strings otherwise (`title=Hello`). `--var` entries override `--assigns` keys.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use serde_json::Value;
use std::io::Write;

use crate::component::DynamicComponent;
use crate::config::ComponentsConfig;

/// Render a component and print the output.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Component variant, e.g. `LeafComponent`
    pub component: String,

    /// Operation performing the render; names the template unless `--template` is given
    #[arg(short, long, value_name = "OP")]
    pub action: Option<String>,

    /// Explicit template, bare (`card`) or qualified (`shared/card`)
    #[arg(short, long, value_name = "NAME")]
    pub template: Option<String>,

    /// Component fields as a JSON object
    #[arg(long, value_name = "JSON")]
    pub assigns: Option<String>,

    /// A single component field; may be repeated
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, Value)>,
}

impl RenderCommand {
    /// Build the component, render it and write the output to stdout.
    pub fn execute(self, config: &ComponentsConfig) -> Result<()> {
        let renderer = config.renderer()?;
        let component = self.component()?;

        let output = renderer
            .render(&component, self.action.as_deref(), self.template.as_deref())
            .with_context(|| format!("Failed to render {}", self.component))?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes()).context("Failed to write output")?;
        if !output.ends_with('\n') {
            writeln!(stdout).context("Failed to write output")?;
        }
        Ok(())
    }

    /// The dynamic component described by the arguments.
    pub fn component(&self) -> Result<DynamicComponent> {
        let fields = match &self.assigns {
            None => serde_json::Map::new(),
            Some(json) => match serde_json::from_str::<Value>(json).context("--assigns is not valid JSON")? {
                Value::Object(fields) => fields,
                _ => return Err(anyhow!("--assigns must be a JSON object")),
            },
        };

        let mut component = DynamicComponent::with_fields(&self.component, fields);
        for (key, value) in &self.vars {
            component.set(key, value.clone());
        }
        Ok(component)
    }
}

/// Parse `key=value`, reading the value as JSON when it is valid JSON.
fn parse_var(raw: &str) -> Result<(String, Value), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
