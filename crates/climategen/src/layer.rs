use crate::color_scale::ColorScale;
use crate::config::{LayerSpec, LayersConfig};
use crate::error::ConfigError;
use std::fmt;

/// Overlay layers the globe can display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Layer {
    #[default]
    Anomaly,
    Drought,
    FireRisk,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Anomaly, Layer::Drought, Layer::FireRisk];

    pub fn id(self) -> &'static str {
        match self {
            Layer::Anomaly => "anomaly",
            Layer::Drought => "drought",
            Layer::FireRisk => "fire_risk",
        }
    }

    fn index(self) -> usize {
        match self {
            Layer::Anomaly => 0,
            Layer::Drought => 1,
            Layer::FireRisk => 2,
        }
    }

    /// The scalar this layer displays for a region with the given temperature anomaly.
    ///
    /// Drought and fire risk are indices in 0-1 that rise with warming.
    pub fn value_for_anomaly(self, anomaly: f32) -> f32 {
        match self {
            Layer::Anomaly => anomaly,
            Layer::Drought => (anomaly / 4.0 + 0.3).clamp(0.0, 1.0),
            Layer::FireRisk => (anomaly / 3.0 + 0.4).clamp(0.0, 1.0),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Display metadata and color scale of one layer
#[derive(Debug, Clone, PartialEq)]
pub struct LayerConfig {
    pub layer: Layer,
    pub label: String,
    pub unit: String,
    pub icon: String,
    pub description: String,
    pub scale: ColorScale,
}

impl LayerConfig {
    fn from_spec(layer: Layer, spec: &LayerSpec) -> Result<Self, ConfigError> {
        Ok(Self {
            layer,
            label: spec.label.clone(),
            unit: spec.unit.clone(),
            icon: spec.icon.clone(),
            description: spec.description.clone(),
            scale: ColorScale::from_specs(&spec.breakpoints)?,
        })
    }
}

/// Validated configuration for every [`Layer`]
#[derive(Debug, Clone, PartialEq)]
pub struct LayerCatalog {
    layers: [LayerConfig; 3],
}

impl LayerCatalog {
    pub fn from_config(config: &LayersConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            layers: [
                LayerConfig::from_spec(Layer::Anomaly, &config.anomaly)?,
                LayerConfig::from_spec(Layer::Drought, &config.drought)?,
                LayerConfig::from_spec(Layer::FireRisk, &config.fire_risk)?,
            ],
        })
    }

    pub fn get(&self, layer: Layer) -> &LayerConfig {
        &self.layers[layer.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerConfig> {
        self.layers.iter()
    }
}
