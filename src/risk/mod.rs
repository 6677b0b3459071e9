//! Composite fire-risk scoring per region

use crate::config::RiskWeights;
use crate::core::errors::{Error, Result};
use crate::core::{LossSummary, RiskAssessment, RiskLevel};

/// Mean delta-NBR at which the index factor saturates; matches the
/// high-severity classification ceiling.
pub const INDEX_SEVERITY_CEILING: f64 = 0.66;

/// Scaling applied to the cumulative loss ratio: losing 10% of the baseline
/// area saturates the loss factor.
pub const LOSS_RATIO_SCALE: f64 = 10.0;

/// Mining-impact area (hectares) at which the mining factor saturates
pub const MINING_REFERENCE_AREA_HA: f64 = 10_000.0;

/// Scores regions by combining three clamped sub-factors with the
/// configured weights. The weights are expected to be validated (sum 1.0)
/// before construction; see `RiskWeights::validate`.
pub struct RiskScorer {
    weights: RiskWeights,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(RiskWeights::default())
    }
}

impl RiskScorer {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    /// Compute a region's composite risk from its delta-NBR series, its
    /// aggregated losses, the baseline-year forest area, and the mining
    /// impact figure.
    ///
    /// The stored factors are the clamped [0,1] values entering the weighted
    /// sum; any rounding is left to presentation. A zero baseline area makes
    /// the loss ratio undefined and fails with `Error::UndefinedRatio`.
    pub fn score(
        &self,
        index_series: &[f64],
        loss_summary: &LossSummary,
        baseline_area: f64,
        mining_impact_area: f64,
    ) -> Result<RiskAssessment> {
        if index_series.is_empty() {
            return Err(Error::insufficient_data(1, 0));
        }
        if baseline_area == 0.0 {
            return Err(Error::undefined_ratio(
                "loss factor requires baseline area > 0",
            ));
        }

        let mean_index = index_series.iter().sum::<f64>() / index_series.len() as f64;

        let index_factor = clamp_unit(mean_index / INDEX_SEVERITY_CEILING);
        let loss_factor = clamp_unit(loss_summary.total_loss / baseline_area * LOSS_RATIO_SCALE);
        let mining_factor = clamp_unit(mining_impact_area / MINING_REFERENCE_AREA_HA);

        let risk_score = self.weights.index * index_factor
            + self.weights.loss * loss_factor
            + self.weights.mining * mining_factor;

        log::debug!(
            "risk score: index={:.4} loss={:.4} mining={:.4} -> {:.3}",
            index_factor,
            loss_factor,
            mining_factor,
            risk_score
        );

        Ok(RiskAssessment {
            risk_score,
            risk_level: risk_level_for(risk_score),
            index_factor,
            loss_factor,
            mining_factor,
        })
    }
}

/// Tier mapping with strict thresholds: boundary scores fall to the lower
/// tier.
pub fn risk_level_for(score: f64) -> RiskLevel {
    if score > 0.7 {
        RiskLevel::High
    } else if score > 0.5 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
