//! Comment and note rendering using Handlebars.
//!
//! The provenance note of a new mirror and the comment left on a closed
//! mirror are user-configurable templates.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};
