//! Loss attribution: aggregates category-tagged losses for one region

use crate::core::errors::{Error, Result};
use crate::core::{LossRecord, LossSummary};

/// Aggregate per-year losses into a regional summary.
///
/// Sums each attribution category across the supplied records, then derives
/// total loss, net change (gain minus loss), and each category's percentage
/// share of total loss (one decimal). Input values are trusted as
/// non-negative observations; they are summed as supplied.
///
/// A region with zero recorded loss has undefined shares and yields
/// `Error::UndefinedRatio` rather than a silent default; callers decide how
/// to present such regions.
pub fn summarize(records: &[LossRecord]) -> Result<LossSummary> {
    let fire_total: f64 = records.iter().map(|r| r.fire_loss).sum();
    let logging_total: f64 = records.iter().map(|r| r.logging_loss).sum();
    let mining_total: f64 = records.iter().map(|r| r.mining_loss).sum();
    let gain_total: f64 = records.iter().map(|r| r.natural_gain).sum();

    let total_loss = fire_total + logging_total + mining_total;
    if total_loss == 0.0 {
        return Err(Error::undefined_ratio(
            "category shares require total loss > 0",
        ));
    }

    let net_change = gain_total - total_loss;

    Ok(LossSummary {
        fire_total: round2(fire_total),
        logging_total: round2(logging_total),
        mining_total: round2(mining_total),
        gain_total: round2(gain_total),
        total_loss: round2(total_loss),
        net_change: round2(net_change),
        fire_share_pct: round1(fire_total / total_loss * 100.0),
        logging_share_pct: round1(logging_total / total_loss * 100.0),
        mining_share_pct: round1(mining_total / total_loss * 100.0),
    })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fire: f64, logging: f64, mining: f64, gain: f64) -> LossRecord {
        LossRecord {
            total_area: 100_000.0,
            fire_loss: fire,
            logging_loss: logging,
            mining_loss: mining,
            natural_gain: gain,
        }
    }

    #[test]
    fn single_period_shares() {
        let summary = summarize(&[record(100.0, 50.0, 50.0, 0.0)]).unwrap();

        assert_eq!(summary.total_loss, 200.0);
        assert_eq!(summary.fire_share_pct, 50.0);
        assert_eq!(summary.logging_share_pct, 25.0);
        assert_eq!(summary.mining_share_pct, 25.0);
        assert_eq!(summary.net_change, -200.0);
    }

    #[test]
    fn totals_accumulate_across_years() {
        let records = [
            record(10.0, 5.0, 1.0, 8.0),
            record(20.0, 5.0, 1.0, 8.0),
            record(0.0, 10.0, 2.0, 4.0),
        ];
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.fire_total, 30.0);
        assert_eq!(summary.logging_total, 20.0);
        assert_eq!(summary.mining_total, 4.0);
        assert_eq!(summary.gain_total, 20.0);
        assert_eq!(summary.total_loss, 54.0);
        assert_eq!(summary.net_change, -34.0);
    }

    #[test]
    fn shares_sum_to_hundred_within_rounding() {
        // Thirds round to 33.3 each; the sum may be off by one rounding step
        let summary = summarize(&[record(1.0, 1.0, 1.0, 0.0)]).unwrap();
        let share_sum =
            summary.fire_share_pct + summary.logging_share_pct + summary.mining_share_pct;
        assert!((share_sum - 100.0).abs() <= 0.1 + 1e-9);
    }

    #[test]
    fn zero_total_loss_is_undefined() {
        let result = summarize(&[record(0.0, 0.0, 0.0, 120.0)]);
        assert!(matches!(result, Err(Error::UndefinedRatio { .. })));
    }

    #[test]
    fn empty_input_is_undefined() {
        assert!(matches!(
            summarize(&[]),
            Err(Error::UndefinedRatio { .. })
        ));
    }

    #[test]
    fn positive_net_change_when_gain_exceeds_loss() {
        let summary = summarize(&[record(5.0, 0.0, 0.0, 25.0)]).unwrap();
        assert_eq!(summary.net_change, 20.0);
    }
}
