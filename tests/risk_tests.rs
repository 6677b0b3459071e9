//! Composite risk scoring invariants
//!
//! - The score is the exact weighted sum of the stored factors
//! - Score and factors stay inside [0, 1] for non-negative inputs
//! - Tier thresholds are strict: 0.7 is not HIGH, 0.5 is not MEDIUM

use forestwatch::core::{LossRecord, LossSummary, RiskLevel};
use forestwatch::loss::summarize;
use forestwatch::risk::{risk_level_for, RiskScorer};
use proptest::prelude::*;

fn summary_with_loss(total_loss: f64) -> LossSummary {
    LossSummary {
        fire_total: total_loss,
        logging_total: 0.0,
        mining_total: 0.0,
        gain_total: 0.0,
        total_loss,
        net_change: -total_loss,
        fire_share_pct: 100.0,
        logging_share_pct: 0.0,
        mining_share_pct: 0.0,
    }
}

#[test]
fn test_high_risk_through_real_loss_summary() {
    // Severity ceiling reached and a tenth of the baseline burned away:
    // two saturated factors, no mining pressure
    let records = vec![LossRecord {
        total_area: 100_000.0,
        fire_loss: 20_000.0,
        logging_loss: 0.0,
        mining_loss: 0.0,
        natural_gain: 0.0,
    }];
    let summary = summarize(&records).unwrap();

    let assessment = RiskScorer::default()
        .score(&[0.66], &summary, 100_000.0, 0.0)
        .unwrap();

    assert!((assessment.risk_score - 0.8).abs() < 1e-12);
    assert_eq!(assessment.risk_level, RiskLevel::High);
    assert!((assessment.index_factor - 1.0).abs() < 1e-12);
    assert!((assessment.loss_factor - 1.0).abs() < 1e-12);
    assert_eq!(assessment.mining_factor, 0.0);
}

#[test]
fn test_tier_thresholds_are_strict() {
    assert_eq!(risk_level_for(0.7), RiskLevel::Medium);
    assert_eq!(risk_level_for(0.5), RiskLevel::Low);
    assert_eq!(risk_level_for(0.7 + 1e-12), RiskLevel::High);
    assert_eq!(risk_level_for(0.5 + 1e-12), RiskLevel::Medium);
}

proptest! {
    /// Property: score and every factor stay inside the unit interval
    /// for arbitrary inputs, including regrowth (negative deltas)
    #[test]
    fn prop_score_in_unit_interval(
        deltas in prop::collection::vec(-1.0..2.0f64, 1..10),
        total_loss in 0.0..1e6f64,
        baseline in 1.0..1e7f64,
        mining in 0.0..1e6f64,
    ) {
        let assessment = RiskScorer::default()
            .score(&deltas, &summary_with_loss(total_loss), baseline, mining)
            .unwrap();

        prop_assert!((0.0..=1.0).contains(&assessment.risk_score));
        prop_assert!((0.0..=1.0).contains(&assessment.index_factor));
        prop_assert!((0.0..=1.0).contains(&assessment.loss_factor));
        prop_assert!((0.0..=1.0).contains(&assessment.mining_factor));
    }

    /// Property: the stored factors reconstruct the score exactly, so the
    /// tier assignment can always be audited from the assessment alone
    #[test]
    fn prop_score_is_weighted_sum_of_factors(
        deltas in prop::collection::vec(-1.0..2.0f64, 1..10),
        total_loss in 0.0..1e6f64,
        baseline in 1.0..1e7f64,
        mining in 0.0..1e6f64,
    ) {
        let assessment = RiskScorer::default()
            .score(&deltas, &summary_with_loss(total_loss), baseline, mining)
            .unwrap();

        let reconstructed = 0.4 * assessment.index_factor
            + 0.4 * assessment.loss_factor
            + 0.2 * assessment.mining_factor;

        prop_assert_eq!(assessment.risk_score, reconstructed);
        prop_assert_eq!(risk_level_for(assessment.risk_score), assessment.risk_level);
    }
}
