// Linear extrapolation of a region's climate record to an arbitrary year

use crate::anchor::{GeoAnchor, region_anchor};
use crate::constants::REFERENCE_YEAR;
use crate::record::ClimateRecord;

/// Warming accumulated since [`REFERENCE_YEAR`], in °C.
///
/// Defined for every year: years before the reference give a negative
/// elapsed time and far-future years are extrapolated without saturation.
/// `baseline` does not enter the result; it is accepted so both helpers
/// share one signature.
pub fn anomaly_for_year(_baseline: f32, trend_per_year: f32, year: i32) -> f32 {
    trend_per_year * years_since_reference(year)
}

/// Signed years elapsed since [`REFERENCE_YEAR`]; widened so no `i32` year overflows
pub fn years_since_reference(year: i32) -> f32 {
    (i64::from(year) - i64::from(REFERENCE_YEAR)) as f32
}

/// Absolute temperature for `year`, in °C
pub fn temperature_for_year(baseline: f32, trend_per_year: f32, year: i32) -> f32 {
    baseline + anomaly_for_year(baseline, trend_per_year, year)
}

/// One region's extrapolated state for a year and variable
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAnomaly {
    pub name: String,
    pub baseline: f32,
    pub trend: f32,
    pub anomaly: f32,
    pub temperature: f32,
    pub high_extreme_count: usize,
    pub low_extreme_count: usize,
    /// Last warm extreme month in record order, `YYYY-MM`
    pub latest_high_extreme: Option<String>,
    pub anchor: Option<GeoAnchor>,
}

/// Extrapolate every region that carries `variable_id` to `year`.
///
/// Regions without the variable produce no entry. Output order is the
/// record's region order.
pub fn regions_with_anomalies(
    record: &ClimateRecord,
    year: i32,
    variable_id: &str,
) -> Vec<RegionAnomaly> {
    record
        .regions()
        .iter()
        .filter_map(|region| {
            let variable = region.variable(variable_id)?;
            let baseline = variable.baseline;
            let trend = variable.trend_per_year;

            Some(RegionAnomaly {
                name: region.name.clone(),
                baseline,
                trend,
                anomaly: anomaly_for_year(baseline, trend, year),
                temperature: temperature_for_year(baseline, trend, year),
                high_extreme_count: variable.extremes.high_months.len(),
                low_extreme_count: variable.extremes.low_months.len(),
                latest_high_extreme: variable.extremes.high_months.last().cloned(),
                anchor: region_anchor(&region.name),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub year: i32,
    pub temperature: f32,
    pub anomaly: f32,
}

/// Yearly series for one region variable over `start_year..=end_year`.
/// Empty when the region or variable is missing.
pub fn time_series(
    record: &ClimateRecord,
    region_name: &str,
    variable_id: &str,
    start_year: i32,
    end_year: i32,
) -> Vec<SeriesPoint> {
    let Some(variable) = record.region_variable(region_name, variable_id) else {
        return Vec::new();
    };

    (start_year..=end_year)
        .map(|year| SeriesPoint {
            year,
            temperature: temperature_for_year(variable.baseline, variable.trend_per_year, year),
            anomaly: anomaly_for_year(variable.baseline, variable.trend_per_year, year),
        })
        .collect()
}
