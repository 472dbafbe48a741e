//! Unit test suite for component views
//!
//! Fast, filesystem-light tests of the public API of each building block.
//!
//! ```bash
//! cargo test --test unit
//! ```
//!
//! - **component_paths**: canonical path derivation
//! - **inference**: template name inference from operation names
//! - **projection**: component fields to template variables
//! - **locator**: ancestor-chain lookup against real template trees
//! - **routes**: route generation

mod component_paths;
mod inference;
mod locator;
mod projection;
mod routes;
