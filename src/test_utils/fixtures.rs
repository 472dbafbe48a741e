//! Test fixtures for template trees and configuration files

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_VIEW_PATH};
use crate::templating::ViewPaths;

/// A temporary project directory with a template root at `app/components`.
///
/// The directory is removed when the fixture is dropped.
#[derive(Debug)]
pub struct TemplateTree {
    temp_dir: TempDir,
    root: PathBuf,
}

impl TemplateTree {
    /// Create an empty project with an empty template root.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp directory")?;
        let root = temp_dir.path().join(DEFAULT_VIEW_PATH);
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create template root {}", root.display()))?;
        Ok(Self {
            temp_dir,
            root,
        })
    }

    /// Project directory (where `components.toml` goes).
    pub fn project_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Template root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Search path containing only this tree's root.
    pub fn view_paths(&self) -> ViewPaths {
        ViewPaths::new(vec![self.root.clone()])
    }

    /// Write a template relative to the root, e.g. `mid/show.tera`.
    pub fn add(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(self, relative: &str, content: &str) -> Result<Self> {
        self.add(relative, content)?;
        Ok(self)
    }

    /// Write `components.toml` into the project directory.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Sample `components.toml` contents.
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub name: String,
    pub content: String,
}

impl ConfigFixture {
    /// `Mid` inheriting from the root and `Leaf` from `Mid`, with one route.
    pub fn chain() -> Self {
        Self {
            name: "chain".to_string(),
            content: r#"
view_paths = ["app/components"]
handlers = ["tera"]

[routes]
user = "/users/:id"

[[components]]
name = "MidComponent"

[[components]]
name = "LeafComponent"
parent = "MidComponent"
"#
            .trim()
            .to_string(),
        }
    }

    /// HTML templates with formats and a locale.
    pub fn html() -> Self {
        Self {
            name: "html".to_string(),
            content: r#"
view_paths = ["app/components"]
handlers = ["tera"]
formats = ["html"]
locale = "en"

[[components]]
name = "Admin::UsersComponent"
"#
            .trim()
            .to_string(),
        }
    }

    /// A parent that is never declared.
    pub fn unknown_parent() -> Self {
        Self {
            name: "unknown_parent".to_string(),
            content: r#"
[[components]]
name = "LeafComponent"
parent = "MissingComponent"
"#
            .trim()
            .to_string(),
        }
    }

    /// Broken TOML.
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: r#"
[[components]
name = "LeafComponent"
"#
            .trim()
            .to_string(),
        }
    }

    /// Write the fixture into a tree as its `components.toml`.
    pub fn write_to(&self, tree: &TemplateTree) -> Result<PathBuf> {
        tree.write_config(&self.content)
    }
}
