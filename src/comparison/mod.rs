//! Cross-region comparison over per-region summaries

use crate::core::errors::{Error, Result};
use crate::core::{ComparisonResult, LossSummary, RankedRegion, RiskAssessment};
use im::Vector;
use std::cmp::Ordering;

/// One region's contribution to the cross-region comparison
#[derive(Clone, Debug)]
pub struct RegionComparisonInput {
    pub region: String,
    pub loss_summary: LossSummary,
    pub assessment: RiskAssessment,
    pub delta_series: Vec<f64>,
}

/// Compare regions by aggregated loss and composite risk.
///
/// Argmax/argmin ties resolve to the first region in caller-supplied order.
/// The mean delta-NBR is taken over every observation of every region, not
/// over per-region means.
pub fn compare(inputs: &[RegionComparisonInput]) -> Result<ComparisonResult> {
    if inputs.is_empty() {
        return Err(Error::insufficient_data(1, 0));
    }

    let max_loss_region = extreme_by(inputs, |i| i.loss_summary.total_loss, Ordering::Greater);
    let min_loss_region = extreme_by(inputs, |i| i.loss_summary.total_loss, Ordering::Less);
    let max_risk_region = extreme_by(inputs, |i| i.assessment.risk_score, Ordering::Greater);

    let total_regional_loss = inputs.iter().map(|i| i.loss_summary.total_loss).sum();
    let mean_delta_nbr = flattened_mean(inputs)?;

    Ok(ComparisonResult {
        max_loss_region,
        min_loss_region,
        max_risk_region,
        total_regional_loss,
        mean_delta_nbr,
        ranking: rank_by_risk(inputs),
    })
}

/// Regions ordered by descending risk score; equal scores keep their
/// caller-supplied order.
pub fn rank_by_risk(inputs: &[RegionComparisonInput]) -> Vector<RankedRegion> {
    let mut ordered: Vec<&RegionComparisonInput> = inputs.iter().collect();
    ordered.sort_by(|a, b| {
        b.assessment
            .risk_score
            .partial_cmp(&a.assessment.risk_score)
            .unwrap_or(Ordering::Equal)
    });
    ordered
        .into_iter()
        .map(|input| RankedRegion {
            region: input.region.clone(),
            risk_score: input.assessment.risk_score,
            risk_level: input.assessment.risk_level,
        })
        .collect()
}

fn flattened_mean(inputs: &[RegionComparisonInput]) -> Result<f64> {
    let count: usize = inputs.iter().map(|i| i.delta_series.len()).sum();
    if count == 0 {
        return Err(Error::undefined_ratio(
            "mean delta-NBR needs at least one observation",
        ));
    }
    let sum: f64 = inputs.iter().flat_map(|i| i.delta_series.iter()).sum();
    Ok(sum / count as f64)
}

fn extreme_by<F>(inputs: &[RegionComparisonInput], key: F, preferred: Ordering) -> String
where
    F: Fn(&RegionComparisonInput) -> f64,
{
    // Strict comparison keeps the first-encountered region on ties
    let mut best = &inputs[0];
    for input in &inputs[1..] {
        let ordering = key(input)
            .partial_cmp(&key(best))
            .unwrap_or(Ordering::Equal);
        if ordering == preferred {
            best = input;
        }
    }
    best.region.clone()
}
