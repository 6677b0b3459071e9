// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod core;
pub mod data;
pub mod loss;
pub mod report;
pub mod risk;
pub mod trend;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, AnnualChange, BurnSeverity, ComparisonResult, LossRecord, LossSummary,
    MiningRecord, NbrObservation, NbrSummaryRow, PValueMethod, RankedRegion, RegionLoss,
    RegionRisk, RegionSummaryStats, RegionTrend, RiskAssessment, RiskLevel, TrendDirection,
    TrendResult,
};

pub use crate::core::errors::Error;

pub use crate::analysis::ForestAnalyzer;
pub use crate::comparison::{compare, rank_by_risk, RegionComparisonInput};
pub use crate::config::{NbrThresholds, RegionConfig, RiskWeights};
pub use crate::data::{observation_from_readings, ForestDataset};
pub use crate::loss::summarize;
pub use crate::report::{JsonWriter, MarkdownWriter, OutputFormat, OutputWriter, TerminalWriter};
pub use crate::risk::{risk_level_for, RiskScorer};
pub use crate::trend::{mann_kendall, sens_slope};
