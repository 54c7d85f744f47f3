use crate::domain::placeholder::PlaceholderMap;
use crate::error::VoltlakeError;

/// Named-placeholder substitution over a SQL template. Pure: a renderer must
/// not touch the database, and must fail when the template references a
/// placeholder absent from the mapping.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, vars: &PlaceholderMap) -> Result<String, VoltlakeError>;
}
