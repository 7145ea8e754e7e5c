//! Layer selection and the style override directive.

use std::fmt;

/// Default class name of the primary (ink) layer.
pub const DEFAULT_PRIMARY_CLASS: &str = "cls-1";

/// Default class name of the secondary (knockout) layer.
pub const DEFAULT_SECONDARY_CLASS: &str = "cls-2";

/// Which of the two styled layers of a vector source to rasterize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerSelector {
    /// Ink layer, packed into the red channel
    Primary,
    /// Knockout layer, dilated and packed into the green channel
    Secondary,
}

impl LayerSelector {
    pub fn name(&self) -> &'static str {
        match self {
            LayerSelector::Primary => "primary",
            LayerSelector::Secondary => "secondary",
        }
    }
}

impl fmt::Display for LayerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// CSS class names of the two layers inside the markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerClasses {
    pub primary: String,
    pub secondary: String,
}

impl Default for LayerClasses {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_CLASS.to_string(),
            secondary: DEFAULT_SECONDARY_CLASS.to_string(),
        }
    }
}

impl LayerClasses {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Class names as (shown, hidden) for `layer`.
    pub fn split(&self, layer: LayerSelector) -> (&str, &str) {
        match layer {
            LayerSelector::Primary => (&self.primary, &self.secondary),
            LayerSelector::Secondary => (&self.secondary, &self.primary),
        }
    }

    /// Build the style sheet that shows only `layer`.
    ///
    /// The shown class becomes opaque white and the hidden class transparent
    /// black. Declarations are `!important` so they win over the document's
    /// own `<style>` rules and inline styles.
    ///
    /// Strokes of the shown class keep their authored colour: forcing
    /// `stroke` would also outline glyphs authored with `stroke: none`. A
    /// stroke only counts as foreground when its red component exceeds the
    /// rasterizer threshold, so stroked layers should be authored with
    /// light strokes (or outlined into fills).
    pub fn override_style_sheet(&self, layer: LayerSelector) -> String {
        let (shown, hidden) = self.split(layer);
        format!(
            ".{shown} {{ fill: #ffffff !important; fill-opacity: 1 !important; opacity: 1 !important; }}\n\
             .{hidden} {{ fill: #000000 !important; stroke: none !important; opacity: 0 !important; }}\n"
        )
    }
}
