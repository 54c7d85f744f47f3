// voltlake-core/src/infrastructure/compiler/renderer.rs
//
// Turns parameterized SQL templates ({{ SCHEMA }}, {{ TABLE_NAME }}, ...)
// into executable statements. This is the bridge between the declarative
// catalog and the warehouse dialect.

use minijinja::{Environment, UndefinedBehavior};

use crate::application::ports::TemplateEngine;
use crate::domain::placeholder::PlaceholderMap;
use crate::error::VoltlakeError;
use crate::infrastructure::error::InfrastructureError;

pub struct SqlRenderer<'a> {
    env: Environment<'a>,
}

impl<'a> SqlRenderer<'a> {
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Strict: a placeholder absent from the mapping is a hard error,
        // never an empty string spliced into SQL.
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        Self { env }
    }
}

impl<'a> Default for SqlRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TemplateEngine for SqlRenderer<'a> {
    fn render(&self, template: &str, vars: &PlaceholderMap) -> Result<String, VoltlakeError> {
        self.env
            .render_str(template, vars)
            .map_err(|e| VoltlakeError::Infrastructure(InfrastructureError::Template(e)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::placeholder::keys;
    use anyhow::Result;

    #[test]
    fn test_render_round_trip() -> Result<()> {
        let renderer = SqlRenderer::new();
        let vars = PlaceholderMap::new()
            .set(keys::SCHEMA, "public")
            .set(keys::TABLE_NAME, "t");

        let result = renderer.render("select * from {{ SCHEMA }}.{{ TABLE_NAME }}", &vars)?;
        assert_eq!(result, "select * from public.t");
        Ok(())
    }

    #[test]
    fn test_missing_placeholder_is_an_error() {
        let renderer = SqlRenderer::new();
        let vars = PlaceholderMap::new().set(keys::SCHEMA, "public");

        let result = renderer.render("select * from {{ SCHEMA }}.{{ TABLE_NAME }}", &vars);
        match result {
            Err(VoltlakeError::Infrastructure(InfrastructureError::Template(_))) => {}
            other => panic!("expected TemplateError, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_template_without_placeholders_passes_through() -> Result<()> {
        let renderer = SqlRenderer::new();
        let vars = PlaceholderMap::new();

        let result = renderer.render("select 1", &vars)?;
        assert_eq!(result, "select 1");
        Ok(())
    }

    #[test]
    fn test_extra_mapping_entries_are_ignored() -> Result<()> {
        let renderer = SqlRenderer::new();
        let vars = PlaceholderMap::new()
            .set(keys::SCHEMA, "public")
            .set(keys::ROLE_ARN, "arn:aws:iam::123:role/loader");

        let result = renderer.render("CREATE SCHEMA IF NOT EXISTS {{ SCHEMA }}", &vars)?;
        assert_eq!(result, "CREATE SCHEMA IF NOT EXISTS public");
        Ok(())
    }
}
