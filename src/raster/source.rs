//! Two-layer vector glyph source.

use std::sync::Arc;

use super::layer::LayerClasses;

/// Immutable SVG markup holding two independently styled layers.
///
/// Cloning is cheap; the markup is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VectorSource {
    markup: Arc<str>,
    classes: LayerClasses,
}

impl VectorSource {
    /// Wrap markup that uses the default `cls-1` / `cls-2` class names.
    pub fn new(markup: impl Into<Arc<str>>) -> Self {
        Self::with_classes(markup, LayerClasses::default())
    }

    pub fn with_classes(markup: impl Into<Arc<str>>, classes: LayerClasses) -> Self {
        Self {
            markup: markup.into(),
            classes,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn classes(&self) -> &LayerClasses {
        &self.classes
    }

    /// Class names that never appear in the markup.
    ///
    /// Names are matched as whole CSS identifiers (in selectors or `class`
    /// attributes), so `cls-1` is not found inside `cls-10`. A missing class
    /// means that layer will rasterize empty.
    pub fn missing_classes(&self) -> Vec<&str> {
        [&self.classes.primary, &self.classes.secondary]
            .into_iter()
            .filter(|class| !identifiers(&self.markup).any(|ident| ident == class.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Split markup into runs of CSS identifier characters.
fn identifiers(markup: &str) -> impl Iterator<Item = &str> {
    markup
        .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .filter(|s| !s.is_empty())
}
