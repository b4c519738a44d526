use thiserror::Error;

/// Malformed or incomplete climate record input. Fatal, raised before any rendering.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read climate record {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed climate record: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("region name must not be empty (region #{index})")]
    EmptyRegionName { index: usize },

    #[error("duplicate region name '{0}'")]
    DuplicateRegion(String),

    #[error("region '{region}' has an empty variable id")]
    EmptyVariableId { region: String },

    #[error("region '{region}' lists variable '{variable}' twice")]
    DuplicateVariable { region: String, variable: String },

    #[error("region '{region}', variable '{variable}': {field} is not a finite number")]
    NonFinite {
        region: String,
        variable: String,
        field: &'static str,
    },

    #[error("region '{region}', variable '{variable}': bad month token '{token}' (expected YYYY-MM)")]
    BadMonthToken {
        region: String,
        variable: String,
        token: String,
    },
}

/// Invalid configuration caught at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("color scale needs at least two breakpoints, got {0}")]
    TooFewBreakpoints(usize),

    #[error("color scale breakpoint #{index} ({value}) is not strictly greater than the previous one")]
    UnsortedBreakpoints { index: usize, value: f32 },

    #[error("color scale breakpoint #{index} is not a finite number")]
    NonFiniteBreakpoint { index: usize },

    #[error("invalid hex color '{0}'")]
    InvalidHexColor(String),

    #[error("heat surface radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("heat surface resolution must be at least 1")]
    ZeroResolution,

    #[error("heat surface resolution {resolution} exceeds the maximum of {max}")]
    ResolutionTooLarge { resolution: u32, max: u32 },

    #[error("heat surface {name} must be positive, got {value}")]
    NonPositiveParameter { name: &'static str, value: f32 },

    #[error("year range {min}..={max} is empty")]
    EmptyYearRange { min: i32, max: i32 },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
