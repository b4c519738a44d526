use crate::constants::*;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};

pub const CONFIG_FILE: &str = "climategen_config.toml";

static CONFIG: OnceLock<Mutex<ClimateGenConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading it on first use.
///
/// A missing config file yields the built-in defaults. An unreadable or
/// invalid file also falls back to defaults, with a warning.
pub fn get_config() -> ClimateGenConfig {
    lock_config().clone()
}

/// Re-read the config file, replacing the cached configuration on success.
pub fn reload_config() -> Result<(), ConfigError> {
    let new_config = ClimateGenConfig::load_or_default(CONFIG_FILE)?;
    *lock_config() = new_config;
    Ok(())
}

fn lock_config() -> MutexGuard<'static, ClimateGenConfig> {
    let config_mutex = CONFIG.get_or_init(|| {
        let config = ClimateGenConfig::load_or_default(CONFIG_FILE).unwrap_or_else(|err| {
            log::warn!("{err}; using default climate configuration");
            ClimateGenConfig::default()
        });
        Mutex::new(config)
    });
    config_mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateGenConfig {
    pub extrapolation: ExtrapolationConfig,
    pub globe: GlobeConfig,
    pub heat_surface: HeatSurfaceConfig,
    pub layers: LayersConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrapolationConfig {
    pub min_year: i32,
    pub max_year: i32,
    pub default_year: i32,
    pub variable_id: String,
}

impl Default for ExtrapolationConfig {
    fn default() -> Self {
        Self {
            min_year: MIN_YEAR,
            max_year: MAX_YEAR,
            default_year: DEFAULT_YEAR,
            variable_id: DEFAULT_VARIABLE_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub radius: f32,
    /// Height of region markers above the globe surface
    pub point_altitude: f32,
    /// Height of heat surface anchors above the globe surface
    pub surface_altitude: f32,
    /// Number of markers on the ring around each region's center marker
    pub satellite_count: usize,
    pub satellite_spread_deg: f32,
    /// Full width of the value jitter applied to ring markers
    pub satellite_jitter: f32,
    pub jitter_seed: u32,
    pub show_heat_surfaces: bool,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: GLOBE_RADIUS,
            point_altitude: POINT_ALTITUDE,
            surface_altitude: SURFACE_ALTITUDE,
            satellite_count: 8,
            satellite_spread_deg: 10.0,
            satellite_jitter: 0.3,
            jitter_seed: 1981,
            show_heat_surfaces: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointSpec {
    pub value: f32,
    pub color: String,
}

impl BreakpointSpec {
    fn new(value: f32, color: &str) -> Self {
        Self {
            value,
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatSurfaceConfig {
    pub radius: f32,
    /// Quads along each side of the patch grid
    pub resolution: u32,
    pub exponent: f32,
    pub min_height: f32,
    pub reference_temperature: f32,
    pub height_per_degree: f32,
    /// Anomaly (°C) at which the dome tip reaches the full hot color
    pub anomaly_range: f32,
    pub alpha_gain: f32,
    pub hot_color: String,
    /// Absolute temperature scale (°C) for the dome's base color
    pub temperature_scale: Vec<BreakpointSpec>,
}

impl Default for HeatSurfaceConfig {
    fn default() -> Self {
        Self {
            radius: 0.35,
            resolution: 24,
            exponent: 2.8,
            min_height: 0.18,
            reference_temperature: 15.0,
            height_per_degree: 0.07,
            anomaly_range: 2.0,
            alpha_gain: 1.2,
            hot_color: "#ff3b1f".to_string(),
            temperature_scale: vec![
                BreakpointSpec::new(-10.0, "#1e3a8a"),
                BreakpointSpec::new(0.0, "#3b82f6"),
                BreakpointSpec::new(10.0, "#10b981"),
                BreakpointSpec::new(20.0, "#fbbf24"),
                BreakpointSpec::new(26.0, "#f97316"),
                BreakpointSpec::new(32.0, "#dc2626"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub label: String,
    pub unit: String,
    pub icon: String,
    pub description: String,
    pub breakpoints: Vec<BreakpointSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayersConfig {
    pub anomaly: LayerSpec,
    pub drought: LayerSpec,
    pub fire_risk: LayerSpec,
}

impl Default for LayersConfig {
    fn default() -> Self {
        Self {
            anomaly: LayerSpec {
                label: "Thermal Anomaly".to_string(),
                unit: "°C".to_string(),
                icon: "🌡️".to_string(),
                description: format!("Temperature difference against the {BASELINE_PERIOD} baseline"),
                breakpoints: vec![
                    BreakpointSpec::new(-2.0, "#3b82f6"),
                    BreakpointSpec::new(-1.0, "#60a5fa"),
                    BreakpointSpec::new(0.0, "#fbbf24"),
                    BreakpointSpec::new(2.0, "#f97316"),
                    BreakpointSpec::new(4.0, "#dc2626"),
                ],
            },
            drought: LayerSpec {
                label: "Drought Index".to_string(),
                unit: "index 0-1".to_string(),
                icon: "💧".to_string(),
                description: "Water stress in affected regions".to_string(),
                breakpoints: vec![
                    BreakpointSpec::new(0.0, "#10b981"),
                    BreakpointSpec::new(0.3, "#fbbf24"),
                    BreakpointSpec::new(0.6, "#f97316"),
                    BreakpointSpec::new(0.9, "#dc2626"),
                ],
            },
            fire_risk: LayerSpec {
                label: "Fire Risk".to_string(),
                unit: "low/medium/high".to_string(),
                icon: "🔥".to_string(),
                description: "Likelihood of wildfires".to_string(),
                breakpoints: vec![
                    BreakpointSpec::new(0.0, "#10b981"),
                    BreakpointSpec::new(0.5, "#fbbf24"),
                    BreakpointSpec::new(1.0, "#dc2626"),
                ],
            },
        }
    }
}

impl ClimateGenConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded climate configuration from {}", path.display());
        Ok(config)
    }

    /// Like [`Self::load_from_file`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("{} not found, using default climate configuration", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClimateGenConfig = toml::from_str(content)?;
        config.extrapolation.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

impl ExtrapolationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_year > self.max_year {
            return Err(ConfigError::EmptyYearRange {
                min: self.min_year,
                max: self.max_year,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = ClimateGenConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClimateGenConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = ClimateGenConfig::from_toml_str(
            r#"
            [heat_surface]
            resolution = 16
            "#,
        )
        .unwrap();

        assert_eq!(config.heat_surface.resolution, 16);
        assert_eq!(config.heat_surface.exponent, 2.8);
        assert_eq!(config.globe, GlobeConfig::default());
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let config = ClimateGenConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = ClimateGenConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_inverted_year_range_rejected() {
        let result = ClimateGenConfig::from_toml_str(
            r#"
            [extrapolation]
            min_year = 2030
            max_year = 2000
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::EmptyYearRange { min: 2030, max: 2000 })
        ));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = ClimateGenConfig::from_toml_str("[globe]\nradius = \"big\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../", "climategen_config.toml"));
        let config = ClimateGenConfig::from_toml_str(shipped).unwrap();
        assert_eq!(config, ClimateGenConfig::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = std::env::temp_dir().join(format!("climategen_config_{}.toml", std::process::id()));
        let mut config = ClimateGenConfig::default();
        config.globe.satellite_count = 5;
        config.heat_surface.hot_color = "#ff0000".to_string();

        config.save_to_file(&path).unwrap();
        let loaded = ClimateGenConfig::load_from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = ClimateGenConfig::load_from_file("does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ClimateGenConfig::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config, ClimateGenConfig::default());
    }
}
