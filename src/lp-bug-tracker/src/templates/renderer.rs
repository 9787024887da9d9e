//! Compiled mirror templates.

use super::TemplateError;
use crate::config::Settings;
use handlebars::{no_escape, Handlebars};
use serde::Serialize;

const PROVENANCE_NOTE: &str = "provenance note";
const CLOSE_COMMENT: &str = "close comment";

/// Creates an empty Handlebars registry for markdown output.
///
/// Escaping is off and unknown variables are errors.
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

#[derive(Serialize)]
struct ProvenanceData<'a> {
    id: &'a str,
    title: &'a str,
    link: &'a str,
}

#[derive(Serialize)]
struct CloseCommentData<'a> {
    id: &'a str,
    issue_id: &'a str,
    status: &'a str,
}

/// Renders the provenance note of new mirrors and the comment left on
/// closed ones.
///
/// Both templates are compiled up front, so a broken template fails before
/// the issue tracker is touched.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Compiles the two templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Compile`] naming the template that does not
    /// parse.
    pub fn new(provenance_template: &str, close_comment_template: &str) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        for (name, template) in [
            (PROVENANCE_NOTE, provenance_template),
            (CLOSE_COMMENT, close_comment_template),
        ] {
            handlebars
                .register_template_string(name, template)
                .map_err(|source| TemplateError::Compile {
                    name,
                    source: Box::new(source),
                })?;
        }
        Ok(Self { handlebars })
    }

    /// Compiles the templates configured in `settings`.
    ///
    /// # Errors
    ///
    /// See [`TemplateRenderer::new`].
    pub fn from_settings(settings: &Settings) -> Result<Self, TemplateError> {
        Self::new(&settings.provenance_template, &settings.close_comment_template)
    }

    /// Renders the body of a new mirror.
    ///
    /// Variables: `id`, `title`, `link`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if the template uses another variable.
    pub fn render_provenance_note(
        &self,
        upstream_id: &str,
        title: &str,
        link: &str,
    ) -> Result<String, TemplateError> {
        let data = ProvenanceData {
            id: upstream_id,
            title,
            link,
        };
        self.render(PROVENANCE_NOTE, &data)
    }

    /// Renders the comment posted before a mirror is closed.
    ///
    /// Variables: `status`, `id`, `issue_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if the template uses another variable.
    pub fn render_close_comment(
        &self,
        upstream_id: &str,
        issue_id: &str,
        status: &str,
    ) -> Result<String, TemplateError> {
        let data = CloseCommentData {
            id: upstream_id,
            issue_id,
            status,
        };
        self.render(CLOSE_COMMENT, &data)
    }

    fn render(&self, name: &'static str, data: &impl Serialize) -> Result<String, TemplateError> {
        self.handlebars
            .render(name, data)
            .map_err(|source| TemplateError::Render { name, source })
    }
}
