//! Template error types.

use thiserror::Error;

/// Errors raised while compiling or rendering the mirror templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A configured template does not parse.
    #[error("Invalid {name} template: {source}")]
    Compile {
        name: &'static str,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A template references data that is not provided.
    #[error("Failed to render {name} template: {source}")]
    Render {
        name: &'static str,
        #[source]
        source: handlebars::RenderError,
    },
}
