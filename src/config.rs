use crate::core::errors::Error;
use crate::core::BurnSeverity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, Read};
use std::ops::RangeInclusive;
use std::path::Path;

/// Delta-NBR burn-severity thresholds. Each field is the upper bound of the
/// class below it; values at or above `moderate_high` classify as High.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NbrThresholds {
    #[serde(default = "default_unburned_threshold")]
    pub unburned: f64,

    #[serde(default = "default_low_threshold")]
    pub low: f64,

    #[serde(default = "default_moderate_low_threshold")]
    pub moderate_low: f64,

    #[serde(default = "default_moderate_high_threshold")]
    pub moderate_high: f64,
}

impl Default for NbrThresholds {
    fn default() -> Self {
        Self {
            unburned: default_unburned_threshold(),
            low: default_low_threshold(),
            moderate_low: default_moderate_low_threshold(),
            moderate_high: default_moderate_high_threshold(),
        }
    }
}

impl NbrThresholds {
    /// Classify a delta-NBR value into a burn-severity class
    pub fn classify(&self, delta_nbr: f64) -> BurnSeverity {
        if delta_nbr < self.unburned {
            BurnSeverity::Unburned
        } else if delta_nbr < self.low {
            BurnSeverity::Low
        } else if delta_nbr < self.moderate_low {
            BurnSeverity::ModerateLow
        } else if delta_nbr < self.moderate_high {
            BurnSeverity::ModerateHigh
        } else {
            BurnSeverity::High
        }
    }

    /// Validate that the four thresholds are strictly ascending
    pub fn validate(&self) -> Result<(), String> {
        let ordered = self.unburned < self.low
            && self.low < self.moderate_low
            && self.moderate_low < self.moderate_high;
        if ordered {
            Ok(())
        } else {
            Err(format!(
                "NBR thresholds must be strictly ascending, got {} < {} < {} < {}",
                self.unburned, self.low, self.moderate_low, self.moderate_high
            ))
        }
    }
}

// USGS-derived severity breaks calibrated for the monitored provinces
fn default_unburned_threshold() -> f64 {
    0.10
}
fn default_low_threshold() -> f64 {
    0.27
}
fn default_moderate_low_threshold() -> f64 {
    0.44
}
fn default_moderate_high_threshold() -> f64 {
    0.66
}

/// Weights of the three composite-risk sub-factors. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskWeights {
    /// Weight for the burn-index factor (0.0-1.0)
    #[serde(default = "default_index_weight")]
    pub index: f64,

    /// Weight for the cumulative-loss factor (0.0-1.0)
    #[serde(default = "default_loss_weight")]
    pub loss: f64,

    /// Weight for the mining-impact factor (0.0-1.0)
    #[serde(default = "default_mining_weight")]
    pub mining: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            index: default_index_weight(),
            loss: default_loss_weight(),
            mining: default_mining_weight(),
        }
    }
}

impl RiskWeights {
    fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    /// Validate that weights sum to 1.0 (with small tolerance for floating point)
    pub fn validate(&self) -> Result<(), String> {
        Self::validate_weight(self.index, "Index")?;
        Self::validate_weight(self.loss, "Loss")?;
        Self::validate_weight(self.mining, "Mining")?;

        let sum = self.index + self.loss + self.mining;
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "Risk weights must sum to 1.0, but sum to {:.3}",
                sum
            ));
        }
        Ok(())
    }

    /// Normalize weights to ensure they sum to exactly 1.0
    pub fn normalize(&mut self) {
        let sum = self.index + self.loss + self.mining;
        if sum > 0.0 && (sum - 1.0).abs() > 0.001 {
            self.index /= sum;
            self.loss /= sum;
            self.mining /= sum;
        }
    }
}

fn default_index_weight() -> f64 {
    0.4
}
fn default_loss_weight() -> f64 {
    0.4
}
fn default_mining_weight() -> f64 {
    0.2
}

/// Explicit analysis configuration: monitored regions, year range, trend-test
/// significance level, severity thresholds, and risk weights. Passed to the
/// components that need it; there is no ambient global configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,

    #[serde(default = "default_first_year")]
    pub first_year: i32,

    #[serde(default = "default_last_year")]
    pub last_year: i32,

    /// Significance level for the Mann-Kendall test
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    #[serde(default)]
    pub nbr_thresholds: NbrThresholds,

    #[serde(default)]
    pub risk_weights: RiskWeights,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            first_year: default_first_year(),
            last_year: default_last_year(),
            alpha: default_alpha(),
            nbr_thresholds: NbrThresholds::default(),
            risk_weights: RiskWeights::default(),
        }
    }
}

impl RegionConfig {
    /// Analyzed years in chronological order
    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }

    pub fn year_count(&self) -> usize {
        (self.last_year - self.first_year + 1).max(0) as usize
    }

    /// The year whose forest area anchors the cumulative loss ratio
    pub fn baseline_year(&self) -> i32 {
        self.first_year
    }

    /// Position of a year within the configured range, if covered
    pub fn year_index(&self, year: i32) -> Option<usize> {
        if year >= self.first_year && year <= self.last_year {
            Some((year - self.first_year) as usize)
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.regions.is_empty() {
            return Err("At least one region must be configured".to_string());
        }
        if self.first_year > self.last_year {
            return Err(format!(
                "Year range is inverted: {}..{}",
                self.first_year, self.last_year
            ));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(format!("Alpha must be in (0, 1), got {}", self.alpha));
        }
        self.nbr_thresholds.validate()?;
        self.risk_weights.validate()?;
        Ok(())
    }

    /// Load and validate a configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, Error> {
        let file = fs::File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        let mut config: RegionConfig = toml::from_str(contents)?;
        config.risk_weights.normalize();
        config.validate().map_err(Error::Configuration)?;
        Ok(config)
    }

    /// Render the configuration as pretty TOML (used by `forestwatch init`)
    pub fn to_toml_string(&self) -> Result<String, Error> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Configuration(format!("Failed to render config: {}", e)))
    }
}

fn default_regions() -> Vec<String> {
    vec![
        "Karabük".to_string(),
        "Bartın".to_string(),
        "Zonguldak".to_string(),
    ]
}
fn default_first_year() -> i32 {
    2020
}
fn default_last_year() -> i32 {
    2025
}
fn default_alpha() -> f64 {
    0.05
}
