//! Template resolution and rendering for components.
//!
//! This module turns "render from operation `show`" into output. The pieces, in
//! pipeline order:
//!
//! - [`inference`] - template name from the calling operation
//! - [`view_paths`] - template roots and candidate file names
//! - [`locator`] - ancestor-chain lookup of the owning variant
//! - [`assigns`] - projection of component fields into template variables
//! - [`helpers`] and [`context`] - routing, helper and base capabilities of a render
//! - [`engine`] - the [`TemplateEngine`] seam and the Tera implementation
//! - [`renderer`] - the pipeline itself
//! - [`cache`] - optional per-action output cache
//!
//! # Template layout
//!
//! Templates are files named `<root>/<variant path>/<name>[.<locale>][.<format>].<handler>`.
//! A component `Admin::UsersComponent` rendering from `details` looks for
//! `admin/users/details.tera`, then under each ancestor's path. The abstract root
//! (`Base`) never owns templates.
//!
//! # Template functions
//!
//! Every render gets:
//! - `controller_path()` / `controller_name()` - the invoking variant's path and its last segment
//! - `url_for(route="name", ...)` and `<name>_path(...)` - one per configured route
//! - every filter and function of the variant's helper modules, inherited root first
//!
//! Variables are the component's exposed fields: `{{ user.name }}`.

pub mod assigns;
pub mod cache;
pub mod context;
pub mod engine;
pub mod helpers;
pub mod inference;
pub mod locator;
pub mod renderer;
pub mod view_paths;


pub use assigns::{Assigns, project};
pub use cache::ActionCache;
pub use context::{
    BaseContext, RenderingContext, RoutingHelpers, ViewContext, ViewContextClass, ViewHelpers,
};
pub use engine::{TemplateEngine, TeraEngine};
pub use helpers::{HelperModule, Route, RouteSet, ViewHelper};
pub use inference::infer_template_name;
pub use locator::{LocatedTemplate, TemplateLocator};
pub use renderer::ComponentRenderer;
pub use view_paths::{LookupDetails, ViewPaths, validate_template_name};
