// Summary figures for the info panel

use crate::constants::{BASELINE_PERIOD, LAST_OBSERVED_YEAR};
use crate::extrapolation::{RegionAnomaly, regions_with_anomalies, years_since_reference};
use crate::layer::Layer;
use crate::record::ClimateRecord;
use crate::timeline::ViewContext;

/// Per-region figures shown when a region is selected
#[derive(Debug, Clone, PartialEq)]
pub struct RegionBreakdown {
    pub name: String,
    pub baseline: f32,
    /// °C per decade
    pub decadal_trend: f32,
    pub anomaly: f32,
    pub temperature: f32,
    pub high_extremes: usize,
    pub low_extremes: usize,
    pub latest_high_extreme: Option<String>,
}

impl From<&RegionAnomaly> for RegionBreakdown {
    fn from(region: &RegionAnomaly) -> Self {
        Self {
            name: region.name.clone(),
            baseline: region.baseline,
            decadal_trend: region.trend * 10.0,
            anomaly: region.anomaly,
            temperature: region.temperature,
            high_extremes: region.high_extreme_count,
            low_extremes: region.low_extreme_count,
            latest_high_extreme: region.latest_high_extreme.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearInsight {
    pub year: i32,
    pub layer: Layer,
    /// Layer value of the mean regional anomaly, 0 when no region is monitored
    pub global_avg: f32,
    /// Mean anomaly in °C, whatever the layer
    pub mean_anomaly: f32,
    /// Relative change for index layers, the mean anomaly itself for `Anomaly`
    pub change_vs_baseline: f32,
    /// Position of `year` in the observed period, not clamped
    pub percentile: i32,
    pub regions_monitored: usize,
    pub high_extremes_total: usize,
    pub low_extremes_total: usize,
    /// `None` for layers without an alert threshold
    pub regions_over_threshold: Option<usize>,
    /// One-sentence reading of the figures
    pub interpretation: String,
    pub selection: Option<RegionBreakdown>,
}

/// Anomaly above which a region counts as affected for this layer
pub fn alert_threshold(layer: Layer) -> Option<f32> {
    match layer {
        Layer::Anomaly => None,
        Layer::Drought => Some(1.0),
        Layer::FireRisk => Some(1.5),
    }
}

/// Index value an unwarmed region would show
fn baseline_index(layer: Layer) -> Option<f32> {
    match layer {
        Layer::Anomaly => None,
        Layer::Drought => Some(0.35),
        Layer::FireRisk => Some(0.4),
    }
}

pub fn year_percentile(year: i32) -> i32 {
    let span = years_since_reference(LAST_OBSERVED_YEAR);
    (years_since_reference(year) / span * 100.0).round() as i32
}

/// Summarise the view context. `selected` names a region to break down;
/// an unknown name yields no breakdown.
pub fn year_insight(record: &ClimateRecord, context: &ViewContext, selected: Option<&str>) -> YearInsight {
    let regions = regions_with_anomalies(record, context.year, &context.variable_id);
    let layer = context.layer;

    let (mean_anomaly, global_avg) = if regions.is_empty() {
        (0.0, 0.0)
    } else {
        let mean = regions.iter().map(|r| r.anomaly).sum::<f32>() / regions.len() as f32;
        (mean, layer.value_for_anomaly(mean))
    };

    let change_vs_baseline = match baseline_index(layer) {
        Some(base) => (global_avg - base) / base,
        None => global_avg,
    };

    let regions_over_threshold = alert_threshold(layer)
        .map(|threshold| regions.iter().filter(|r| r.anomaly > threshold).count());

    let selection = selected.and_then(|name| {
        regions
            .iter()
            .find(|r| r.name == name)
            .map(RegionBreakdown::from)
    });

    let interpretation = interpret(context.year, layer, global_avg, selection.as_ref());

    YearInsight {
        year: context.year,
        layer,
        global_avg,
        mean_anomaly,
        change_vs_baseline,
        percentile: year_percentile(context.year),
        regions_monitored: regions.len(),
        high_extremes_total: regions.iter().map(|r| r.high_extreme_count).sum(),
        low_extremes_total: regions.iter().map(|r| r.low_extreme_count).sum(),
        regions_over_threshold,
        interpretation,
        selection,
    }
}

fn interpret(year: i32, layer: Layer, global_avg: f32, selection: Option<&RegionBreakdown>) -> String {
    match (layer, selection) {
        (Layer::Anomaly, Some(region)) => format!(
            "{}: baseline {:.1} °C ({BASELINE_PERIOD}), warming {:+.2} °C per decade. \
             {} warm and {} cold extreme months on record.",
            region.name, region.baseline, region.decadal_trend, region.high_extremes, region.low_extremes
        ),
        (Layer::Anomaly, None) if year > LAST_OBSERVED_YEAR => {
            let severity = if global_avg > 2.0 { "critical" } else { "worrying" };
            format!("Projection: {severity} warming, with pressure on ecosystems and coastal cities.")
        }
        (Layer::Anomaly, None) => {
            format!("Regions average {global_avg:+.2} °C against the {BASELINE_PERIOD} baseline.")
        }
        (Layer::Drought, _) => {
            let stress = if global_avg > 0.5 {
                "Severe water stress across several regions."
            } else {
                "Water availability under pressure."
            };
            format!("Drought index at {:.0}%. {stress}", global_avg * 100.0)
        }
        (Layer::FireRisk, _) => {
            let level = if global_avg > 0.6 { "high" } else { "moderate" };
            format!("Fire risk is {level}, rising with regional warming.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::sample_record;
    use rstest::rstest;

    const EPS: f32 = 1e-4;

    fn context(year: i32, layer: Layer) -> ViewContext {
        ViewContext {
            year,
            layer,
            variable_id: "t2m".to_string(),
        }
    }

    #[rstest]
    #[case(1981, 0)]
    #[case(2024, 100)]
    #[case(2000, 44)]
    #[case(1980, -2)]
    #[case(2035, 126)]
    fn test_year_percentile(#[case] year: i32, #[case] expected: i32) {
        assert_eq!(year_percentile(year), expected);
    }

    #[test]
    fn test_year_percentile_extreme_years() {
        assert!(year_percentile(i32::MIN) < 0);
        assert!(year_percentile(i32::MAX) > 0);
    }

    #[test]
    fn test_anomaly_insight() {
        let insight = year_insight(&sample_record(), &context(2021, Layer::Anomaly), None);

        // Sudamérica 0.6, Europa 1.6
        assert_eq!(insight.regions_monitored, 2);
        assert!((insight.global_avg - 1.1).abs() < EPS);
        assert!((insight.change_vs_baseline - 1.1).abs() < EPS);
        assert_eq!(insight.high_extremes_total, 5);
        assert_eq!(insight.low_extremes_total, 1);
        assert_eq!(insight.regions_over_threshold, None);
        assert_eq!(insight.selection, None);
    }

    #[test]
    fn test_drought_insight() {
        let insight = year_insight(&sample_record(), &context(2021, Layer::Drought), None);

        // Mean anomaly 1.1, so 1.1 / 4 + 0.3
        assert!((insight.global_avg - 0.575).abs() < EPS);
        assert!((insight.change_vs_baseline - (0.575 - 0.35) / 0.35).abs() < EPS);
        assert_eq!(insight.regions_over_threshold, Some(1));
    }

    #[test]
    fn test_index_is_taken_from_mean_anomaly() {
        // Sudamérica 0.9, Europa 2.4; Europa alone would saturate the index
        let insight = year_insight(&sample_record(), &context(2041, Layer::FireRisk), None);

        assert!((insight.mean_anomaly - 1.65).abs() < EPS);
        assert!((insight.global_avg - 0.95).abs() < EPS);
        assert!((insight.change_vs_baseline - 1.375).abs() < EPS);
        assert_eq!(insight.regions_over_threshold, Some(1));
        assert_eq!(insight.interpretation, "Fire risk is high, rising with regional warming.");
    }

    #[rstest]
    #[case(2041, "worrying")]
    #[case(2060, "critical")]
    fn test_projection_interpretation(#[case] year: i32, #[case] severity: &str) {
        let insight = year_insight(&sample_record(), &context(year, Layer::Anomaly), None);
        assert!(insight.interpretation.starts_with("Projection: "));
        assert!(insight.interpretation.contains(severity), "{}", insight.interpretation);
    }

    #[test]
    fn test_observed_interpretation() {
        let insight = year_insight(&sample_record(), &context(2021, Layer::Anomaly), None);
        assert_eq!(
            insight.interpretation,
            "Regions average +1.10 °C against the 1981-2010 baseline."
        );
    }

    #[test]
    fn test_fire_risk_threshold() {
        let insight = year_insight(&sample_record(), &context(2021, Layer::FireRisk), None);
        assert_eq!(insight.regions_over_threshold, Some(1));

        let insight = year_insight(&sample_record(), &context(2010, Layer::FireRisk), None);
        assert_eq!(insight.regions_over_threshold, Some(0));
    }

    #[test]
    fn test_selection_breakdown() {
        let insight = year_insight(&sample_record(), &context(2021, Layer::Anomaly), Some("Europa"));
        let europe = insight.selection.unwrap();

        assert_eq!(europe.name, "Europa");
        assert!((europe.decadal_trend - 0.4).abs() < EPS);
        assert!((europe.temperature - 10.8).abs() < EPS);
        assert_eq!(europe.high_extremes, 2);
        assert_eq!(europe.latest_high_extreme.as_deref(), Some("2022-08"));
        assert!(insight.interpretation.starts_with("Europa: baseline 9.2 °C"));
        assert!(insight.interpretation.contains("+0.40 °C per decade"));
    }

    #[rstest]
    #[case("Antártida")]
    #[case("Atlantis")]
    fn test_selection_without_variable(#[case] name: &str) {
        let insight = year_insight(&sample_record(), &context(2021, Layer::Anomaly), Some(name));
        assert_eq!(insight.selection, None);
    }

    #[test]
    fn test_no_regions_gives_zero_average() {
        let mut ctx = context(2021, Layer::Drought);
        ctx.variable_id = "swvl1".to_string();
        let insight = year_insight(&sample_record(), &ctx, None);

        assert_eq!(insight.regions_monitored, 0);
        assert_eq!(insight.global_avg, 0.0);
        assert!((insight.change_vs_baseline + 1.0).abs() < EPS);
        assert_eq!(insight.regions_over_threshold, Some(0));
    }
}
