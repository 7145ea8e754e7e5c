//! CLI enum types.

use clap::ValueEnum;

use crate::raster::LayerSelector;

/// Which layer of the source SVG to rasterize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Layer {
    #[default]
    Primary,
    Secondary,
}

impl From<Layer> for LayerSelector {
    fn from(l: Layer) -> Self {
        match l {
            Layer::Primary => LayerSelector::Primary,
            Layer::Secondary => LayerSelector::Secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_conversion() {
        assert_eq!(LayerSelector::from(Layer::Primary), LayerSelector::Primary);
        assert_eq!(LayerSelector::from(Layer::Secondary), LayerSelector::Secondary);
    }
}
