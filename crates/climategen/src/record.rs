// Climate record store: load-once, read-only per-region baseline/trend data

use crate::error::LoadError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Months whose anomaly left the ±2σ band, as `YYYY-MM` tokens
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Extremes {
    #[serde(rename = "high_anomaly_months_gt_2sigma", alias = "highMonths", default)]
    pub high_months: Vec<String>,
    #[serde(rename = "low_anomaly_months_lt_minus_2sigma", alias = "lowMonths", default)]
    pub low_months: Vec<String>,
}

/// One monitored quantity of a region, e.g. near-surface temperature `t2m`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClimateVariable {
    pub id: String,
    pub name: String,
    /// Reference-period mean in °C
    #[serde(rename = "baseline_1981_2010_c", alias = "baseline")]
    pub baseline: f32,
    /// Linear warming rate in °C per year
    #[serde(rename = "trend_c_per_year", alias = "trendPerYear")]
    pub trend_per_year: f32,
    #[serde(default)]
    pub extremes: Extremes,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClimateRegion {
    pub name: String,
    pub variables: Vec<ClimateVariable>,
}

impl ClimateRegion {
    pub fn variable(&self, variable_id: &str) -> Option<&ClimateVariable> {
        self.variables.iter().find(|v| v.id == variable_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordMetadata {
    #[serde(alias = "variablesAvailable", default)]
    pub variables_available: Vec<String>,
    #[serde(alias = "baselinePeriod", default)]
    pub baseline_period: String,
    #[serde(default)]
    pub notes: String,
}

/// The whole climate record. Immutable after [`ClimateRecord::from_json_str`]
/// or [`ClimateRecord::load_from_file`] return.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClimateRecord {
    regions: Vec<ClimateRegion>,
    #[serde(default)]
    metadata: RecordMetadata,
}

impl ClimateRecord {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let record = Self::from_json_str(&content)?;
        log::info!(
            "Loaded {} climate regions from {}",
            record.regions.len(),
            path.display()
        );
        Ok(record)
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let record: ClimateRecord = serde_json::from_str(content)?;
        record.validate()?;
        Ok(record)
    }

    pub fn regions(&self) -> &[ClimateRegion] {
        &self.regions
    }

    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }

    pub fn region(&self, name: &str) -> Option<&ClimateRegion> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn region_variable(&self, region_name: &str, variable_id: &str) -> Option<&ClimateVariable> {
        self.region(region_name)?.variable(variable_id)
    }

    fn validate(&self) -> Result<(), LoadError> {
        let mut names = HashSet::new();
        for (index, region) in self.regions.iter().enumerate() {
            if region.name.trim().is_empty() {
                return Err(LoadError::EmptyRegionName { index });
            }
            if !names.insert(region.name.as_str()) {
                return Err(LoadError::DuplicateRegion(region.name.clone()));
            }
            validate_region(region)?;
        }
        Ok(())
    }
}

fn validate_region(region: &ClimateRegion) -> Result<(), LoadError> {
    let mut ids = HashSet::new();
    for variable in &region.variables {
        if variable.id.is_empty() {
            return Err(LoadError::EmptyVariableId {
                region: region.name.clone(),
            });
        }
        if !ids.insert(variable.id.as_str()) {
            return Err(LoadError::DuplicateVariable {
                region: region.name.clone(),
                variable: variable.id.clone(),
            });
        }

        let non_finite = |field| LoadError::NonFinite {
            region: region.name.clone(),
            variable: variable.id.clone(),
            field,
        };
        if !variable.baseline.is_finite() {
            return Err(non_finite("baseline"));
        }
        if !variable.trend_per_year.is_finite() {
            return Err(non_finite("trend"));
        }

        let mut months = variable
            .extremes
            .high_months
            .iter()
            .chain(&variable.extremes.low_months);
        if let Some(token) = months.find(|m| !is_month_token(m)) {
            return Err(LoadError::BadMonthToken {
                region: region.name.clone(),
                variable: variable.id.clone(),
                token: token.clone(),
            });
        }
    }
    Ok(())
}

/// `YYYY-MM` with a month in 01..=12
fn is_month_token(token: &str) -> bool {
    let Some((year, month)) = token.split_once('-') else {
        return false;
    };
    if year.len() != 4 || month.len() != 2 {
        return false;
    }
    if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;

    pub(crate) const SAMPLE_RECORD: &str = r#"{
        "regions": [
            {
                "name": "Sudamérica",
                "variables": [
                    {
                        "id": "t2m",
                        "name": "2m temperature",
                        "baseline_1981_2010_c": 24.5,
                        "trend_c_per_year": 0.015,
                        "extremes": {
                            "high_anomaly_months_gt_2sigma": ["2015-10", "2016-01", "2023-09"],
                            "low_anomaly_months_lt_minus_2sigma": ["1984-07"]
                        }
                    }
                ]
            },
            {
                "name": "Antártida",
                "variables": [
                    {
                        "id": "tp",
                        "name": "Total precipitation",
                        "baseline_1981_2010_c": 0.4,
                        "trend_c_per_year": 0.001,
                        "extremes": {
                            "high_anomaly_months_gt_2sigma": [],
                            "low_anomaly_months_lt_minus_2sigma": []
                        }
                    }
                ]
            },
            {
                "name": "Europa",
                "variables": [
                    {
                        "id": "t2m",
                        "name": "2m temperature",
                        "baseline_1981_2010_c": 9.2,
                        "trend_c_per_year": 0.04,
                        "extremes": {
                            "high_anomaly_months_gt_2sigma": ["2018-07", "2022-08"],
                            "low_anomaly_months_lt_minus_2sigma": []
                        }
                    }
                ]
            }
        ],
        "metadata": {
            "variables_available": ["t2m", "tp"],
            "baseline_period": "1981-2010",
            "notes": "test fixture"
        }
    }"#;

    pub(crate) fn sample_record() -> ClimateRecord {
        ClimateRecord::from_json_str(SAMPLE_RECORD).unwrap()
    }

    #[test]
    fn test_loads_regions_in_order() {
        let record = sample_record();
        let names: Vec<_> = record.regions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Sudamérica", "Antártida", "Europa"]);
        assert_eq!(record.metadata().baseline_period, "1981-2010");
    }

    #[test]
    fn test_variable_lookup() {
        let record = sample_record();
        let t2m = record.region_variable("Europa", "t2m").unwrap();
        assert_eq!(t2m.baseline, 9.2);
        assert_eq!(t2m.trend_per_year, 0.04);
        assert_eq!(t2m.extremes.high_months.len(), 2);

        assert!(record.region_variable("Antártida", "t2m").is_none());
        assert!(record.region_variable("Atlantis", "t2m").is_none());
    }

    #[test]
    fn test_camel_case_aliases_accepted() {
        let record = ClimateRecord::from_json_str(
            r#"{"regions": [{"name": "Europa", "variables": [{
                "id": "t2m", "name": "T", "baseline": 9.0, "trendPerYear": 0.04,
                "extremes": {"highMonths": ["2019-06"], "lowMonths": []}
            }]}]}"#,
        )
        .unwrap();
        let variable = record.region_variable("Europa", "t2m").unwrap();
        assert_eq!(variable.extremes.high_months, ["2019-06"]);
        assert_eq!(record.metadata(), &RecordMetadata::default());
    }

    #[test]
    fn test_missing_variables_fails() {
        let result = ClimateRecord::from_json_str(r#"{"regions": [{"name": "Europa"}]}"#);
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_non_numeric_baseline_fails() {
        let result = ClimateRecord::from_json_str(
            r#"{"regions": [{"name": "Europa", "variables": [{
                "id": "t2m", "name": "T", "baseline_1981_2010_c": "warm", "trend_c_per_year": 0.04
            }]}]}"#,
        );
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_duplicate_region_fails() {
        let result = ClimateRecord::from_json_str(
            r#"{"regions": [
                {"name": "Europa", "variables": []},
                {"name": "Europa", "variables": []}
            ]}"#,
        );
        assert!(matches!(result, Err(LoadError::DuplicateRegion(name)) if name == "Europa"));
    }

    #[test]
    fn test_duplicate_variable_fails() {
        let result = ClimateRecord::from_json_str(
            r#"{"regions": [{"name": "Europa", "variables": [
                {"id": "t2m", "name": "T", "baseline_1981_2010_c": 9.0, "trend_c_per_year": 0.04},
                {"id": "t2m", "name": "T", "baseline_1981_2010_c": 9.0, "trend_c_per_year": 0.04}
            ]}]}"#,
        );
        assert!(matches!(result, Err(LoadError::DuplicateVariable { .. })));
    }

    #[test]
    fn test_bad_month_token_fails() {
        let result = ClimateRecord::from_json_str(
            r#"{"regions": [{"name": "Europa", "variables": [{
                "id": "t2m", "name": "T", "baseline_1981_2010_c": 9.0, "trend_c_per_year": 0.04,
                "extremes": {"high_anomaly_months_gt_2sigma": ["July 2019"]}
            }]}]}"#,
        );
        assert!(
            matches!(result, Err(LoadError::BadMonthToken { token, .. }) if token == "July 2019")
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ClimateRecord::load_from_file("does/not/exist.json");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[rstest]
    #[case("2015-10", true)]
    #[case("1981-01", true)]
    #[case("2023-12", true)]
    #[case("2023-13", false)]
    #[case("2023-00", false)]
    #[case("23-01", false)]
    #[case("2023-1", false)]
    #[case("2023/01", false)]
    #[case("abcd-01", false)]
    fn test_month_token(#[case] token: &str, #[case] valid: bool) {
        assert_eq!(is_month_token(token), valid);
    }
}
