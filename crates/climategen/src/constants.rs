/// First year of the historical record; anomalies are measured from here.
pub const REFERENCE_YEAR: i32 = 1981;
/// Label for the period the record's baselines average over.
pub const BASELINE_PERIOD: &str = "1981-2010";
/// Last year with observed data; later years are extrapolated.
pub const LAST_OBSERVED_YEAR: i32 = 2024;

pub const MIN_YEAR: i32 = 1980;
pub const MAX_YEAR: i32 = 2035;
pub const DEFAULT_YEAR: i32 = 2000;

/// Near-surface air temperature, the variable every overlay is driven by.
pub const DEFAULT_VARIABLE_ID: &str = "t2m";

pub const GLOBE_RADIUS: f32 = 2.0;
pub const POINT_ALTITUDE: f32 = 0.08;
pub const SURFACE_ALTITUDE: f32 = 0.01;

/// Upper bound on heat surface grid quads per side
pub const MAX_SURFACE_RESOLUTION: u32 = 512;

pub const OPACITY_FLOOR: f32 = 0.3;
