//! Core types for component views
//!
//! This module holds the crate-wide error handling:
//! - [`ComponentError`] - Enumerated error types for every failure mode
//! - [`ErrorContext`] - User-friendly error wrapper with details and suggestions
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Examples
//!
//! ```rust
//! use component_views::core::{ComponentError, user_friendly_error};
//!
//! fn example_operation() -> anyhow::Result<String> {
//!     Err(ComponentError::UnknownVariant { name: "UsersComponent".into() }.into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ComponentError, ErrorContext, user_friendly_error};

/// Result alias used by the library layers.
pub type Result<T, E = ComponentError> = std::result::Result<T, E>;
