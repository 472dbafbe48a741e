//! Integration test suite for component views
//!
//! End-to-end tests through the configuration layer, the Tera engine and the
//! `components` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **render**: configured projects rendered with real templates
//! - **caching**: the action cache wrapped around renders
//! - **cli**: the `components` binary

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod caching;
mod cli;
mod render;
