//! Test utilities for component views
//!
//! Helpers shared by the unit tests and the `unit`/`integration` test suites:
//! - [`init_test_logging`] - once-guarded tracing setup using the test writer
//! - [`TemplateTree`] - a temporary project with a template root and config file
//! - [`RecordingEngine`] - a template engine that records what it was asked to render
//!
//! # Example
//!
//! ```rust,no_run
//! use component_views::test_utils::TemplateTree;
//!
//! let tree = TemplateTree::new().unwrap();
//! tree.add("mid/show.tera", "{{ title }}").unwrap();
//! assert!(tree.root().join("mid/show.tera").exists());
//! ```

pub mod fixtures;
pub mod recording;

pub use fixtures::{ConfigFixture, TemplateTree};
pub use recording::{RecordedRender, RecordingEngine};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. `RUST_LOG` is used when no level is given; with
/// neither, logging stays off.
///
/// ```bash
/// RUST_LOG=component_views=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
