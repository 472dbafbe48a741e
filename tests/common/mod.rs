//! Common test utilities for the component views test suites
//!
//! Wraps a [`TemplateTree`] with helpers for running the `components` binary
//! against it.

// Not every suite uses every helper
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::path::Path;

use component_views::test_utils::{ConfigFixture, TemplateTree};

/// A temporary project: template root plus `components.toml`.
pub struct TestProject {
    tree: TemplateTree,
}

impl TestProject {
    /// Project with the given configuration and no templates.
    pub fn new(config: &str) -> Result<Self> {
        let tree = TemplateTree::new()?;
        tree.write_config(config)?;
        Ok(Self {
            tree,
        })
    }

    /// Project using the `Base <- Mid <- Leaf` configuration.
    pub fn chain() -> Result<Self> {
        Self::new(&ConfigFixture::chain().content)
    }

    /// Add a template relative to the template root.
    pub fn template(self, relative: &str, content: &str) -> Result<Self> {
        self.tree.add(relative, content)?;
        Ok(self)
    }

    /// Project directory.
    pub fn dir(&self) -> &Path {
        self.tree.project_dir()
    }

    /// The underlying tree.
    pub fn tree(&self) -> &TemplateTree {
        &self.tree
    }

    /// `components` command running inside the project with a clean environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("components").expect("binary is built");
        cmd.current_dir(self.dir()).env_remove("COMPONENTS_CONFIG").env_remove("RUST_LOG");
        cmd
    }
}
