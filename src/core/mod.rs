pub mod errors;

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a monotonic trend as reported by the Mann-Kendall test
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    None,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::None => write!(f, "none"),
        }
    }
}

/// Which p-value path produced a trend result. `Approximate` marks the
/// coarse fallback used when exact normal-CDF support is compiled out;
/// callers needing statistical rigor should treat such results as advisory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PValueMethod {
    Exact,
    Approximate,
}

impl PValueMethod {
    pub fn is_approximate(&self) -> bool {
        matches!(self, PValueMethod::Approximate)
    }
}

/// Outcome of a Mann-Kendall trend test over a single time series.
/// Immutable snapshot; one is produced per analysis call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrendResult {
    pub s_statistic: i64,
    pub z_statistic: f64,
    pub p_value: f64,
    pub sens_slope: f64,
    pub direction: TrendDirection,
    pub is_significant: bool,
    pub p_value_method: PValueMethod,
}

/// Per-region, per-year forest observation supplied by the imagery service.
/// Values are trusted as non-negative; the core does not validate them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LossRecord {
    pub total_area: f64,
    pub fire_loss: f64,
    pub logging_loss: f64,
    pub mining_loss: f64,
    pub natural_gain: f64,
}

impl LossRecord {
    /// Combined loss across the three attribution categories for this year
    pub fn total_loss(&self) -> f64 {
        self.fire_loss + self.logging_loss + self.mining_loss
    }
}

/// Burn severity class obtained by thresholding a delta-NBR value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BurnSeverity {
    Unburned,
    Low,
    ModerateLow,
    ModerateHigh,
    High,
}

impl fmt::Display for BurnSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BurnSeverity::Unburned => write!(f, "unburned"),
            BurnSeverity::Low => write!(f, "low"),
            BurnSeverity::ModerateLow => write!(f, "moderate-low"),
            BurnSeverity::ModerateHigh => write!(f, "moderate-high"),
            BurnSeverity::High => write!(f, "high"),
        }
    }
}

/// Per-region, per-year burn-severity index observation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NbrObservation {
    pub index_before: f64,
    pub index_after: f64,
    pub index_delta: f64,
    pub severity_class: BurnSeverity,
}

/// Per-region mining impact figures
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiningRecord {
    pub impact_area_ha: f64,
    #[serde(default)]
    pub sites: Vec<String>,
}

/// Losses aggregated over the analyzed year range for one region
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LossSummary {
    pub fire_total: f64,
    pub logging_total: f64,
    pub mining_total: f64,
    pub gain_total: f64,
    pub total_loss: f64,
    pub net_change: f64,
    pub fire_share_pct: f64,
    pub logging_share_pct: f64,
    pub mining_share_pct: f64,
}

/// Qualitative risk tier derived from the composite score
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Composite fire-risk assessment for one region. The three stored factors
/// are the clamped [0,1] values entering the weighted sum, so
/// `score = w_index * index_factor + w_loss * loss_factor + w_mining * mining_factor`
/// reconstructs exactly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub index_factor: f64,
    pub loss_factor: f64,
    pub mining_factor: f64,
}

/// One entry in the cross-region risk ranking
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RankedRegion {
    pub region: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

/// Cross-region comparison derived from per-region summaries. Holds no
/// independent state; ties go to the first-encountered region.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub max_loss_region: String,
    pub min_loss_region: String,
    pub max_risk_region: String,
    pub total_regional_loss: f64,
    pub mean_delta_nbr: f64,
    pub ranking: Vector<RankedRegion>,
}

/// Descriptive statistics over one region's area series
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionSummaryStats {
    pub region: String,
    pub mean_area: f64,
    pub std_area: f64,
    pub min_area: f64,
    pub max_area: f64,
    pub total_loss: f64,
    pub mean_annual_loss: f64,
    pub change_pct: f64,
}

/// Region-summed totals for a single year
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnualChange {
    pub year: i32,
    pub total_area: f64,
    pub fire_loss: f64,
    pub logging_loss: f64,
    pub mining_loss: f64,
    pub natural_gain: f64,
    pub net_change: f64,
}

/// Burn-severity table row for one region-year
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NbrSummaryRow {
    pub region: String,
    pub year: i32,
    pub index_before: f64,
    pub index_after: f64,
    pub index_delta: f64,
    pub severity_class: BurnSeverity,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionTrend {
    pub region: String,
    pub trend: TrendResult,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionLoss {
    pub region: String,
    pub summary: LossSummary,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionRisk {
    pub region: String,
    pub assessment: RiskAssessment,
}

/// Everything one full analysis run produces, in configured region order
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub regions: Vec<String>,
    pub first_year: i32,
    pub last_year: i32,
    pub trends: Vec<RegionTrend>,
    pub losses: Vec<RegionLoss>,
    pub risks: Vec<RegionRisk>,
    pub nbr_rows: Vec<NbrSummaryRow>,
    pub annual_changes: Vec<AnnualChange>,
    pub summary_stats: Vec<RegionSummaryStats>,
    pub comparison: ComparisonResult,
}
