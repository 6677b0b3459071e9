//! Regional Analysis Module
//!
//! Ties the pieces together for the monitored provinces:
//! - Mann-Kendall trend per region over total forest area
//! - Burn-severity tables from the delta-NBR observations
//! - Loss attribution and composite risk per region
//! - Region-summed annual change rows
//! - Cross-region comparison and the assembled report

use crate::comparison::{self, RegionComparisonInput};
use crate::config::RegionConfig;
use crate::core::errors::{Error, Result};
use crate::core::{
    AnalysisReport, AnnualChange, LossSummary, NbrSummaryRow, RegionLoss, RegionRisk,
    RegionSummaryStats, RegionTrend, RiskAssessment, TrendResult,
};
use crate::data::ForestDataset;
use crate::risk::RiskScorer;
use crate::{loss, trend};
use chrono::Utc;

/// Runs every analysis over one dataset with one configuration.
pub struct ForestAnalyzer {
    config: RegionConfig,
    dataset: ForestDataset,
    scorer: RiskScorer,
}

impl ForestAnalyzer {
    pub fn new(config: RegionConfig, dataset: ForestDataset) -> Self {
        let scorer = RiskScorer::new(config.risk_weights);
        Self {
            config,
            dataset,
            scorer,
        }
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    pub fn dataset(&self) -> &ForestDataset {
        &self.dataset
    }

    /// Mann-Kendall trend over one region's total-area series
    pub fn region_trend(&self, region: &str) -> Result<TrendResult> {
        let areas = self.dataset.area_series(region)?;
        trend::mann_kendall(&areas, self.config.alpha)
    }

    /// Trends for every configured region, in configured order
    pub fn all_region_trends(&self) -> Result<Vec<RegionTrend>> {
        self.config
            .regions
            .iter()
            .map(|region| {
                Ok(RegionTrend {
                    region: region.clone(),
                    trend: self.region_trend(region)?,
                })
            })
            .collect()
    }

    /// Burn-severity rows for every region-year, region-major order
    pub fn nbr_rows(&self) -> Result<Vec<NbrSummaryRow>> {
        let mut rows = Vec::with_capacity(self.config.regions.len() * self.config.year_count());
        for region in &self.config.regions {
            for year in self.config.years() {
                let observation = self.dataset.nbr_observation(region, year)?;
                rows.push(NbrSummaryRow {
                    region: region.clone(),
                    year,
                    index_before: observation.index_before,
                    index_after: observation.index_after,
                    index_delta: observation.index_delta,
                    severity_class: observation.severity_class,
                });
            }
        }
        Ok(rows)
    }

    /// Aggregated losses for one region over the full year range. A region
    /// with zero recorded loss has undefined shares; the error names the
    /// region so callers can special-case it.
    pub fn region_loss(&self, region: &str) -> Result<LossSummary> {
        let records = self.dataset.loss_records(region)?;
        loss::summarize(&records).map_err(|error| match error {
            Error::UndefinedRatio { .. } => Error::undefined_ratio(format!(
                "loss shares for region {region} (zero recorded loss)"
            )),
            other => other,
        })
    }

    pub fn all_region_losses(&self) -> Result<Vec<RegionLoss>> {
        self.config
            .regions
            .iter()
            .map(|region| {
                Ok(RegionLoss {
                    region: region.clone(),
                    summary: self.region_loss(region)?,
                })
            })
            .collect()
    }

    /// Composite risk for one region. The loss factor is taken against the
    /// baseline-year total area.
    pub fn region_risk(&self, region: &str) -> Result<RiskAssessment> {
        let deltas = self.dataset.delta_series(region)?;
        let summary = self.region_loss(region)?;
        let baseline_area = self
            .dataset
            .loss_record(region, self.config.baseline_year())?
            .total_area;
        let mining_impact = self.dataset.mining_impact(region);
        self.scorer
            .score(&deltas, &summary, baseline_area, mining_impact)
    }

    pub fn all_region_risks(&self) -> Result<Vec<RegionRisk>> {
        self.config
            .regions
            .iter()
            .map(|region| {
                Ok(RegionRisk {
                    region: region.clone(),
                    assessment: self.region_risk(region)?,
                })
            })
            .collect()
    }

    /// Region-summed totals per year, rounded to whole hectares
    pub fn annual_changes(&self) -> Result<Vec<AnnualChange>> {
        let mut rows = Vec::with_capacity(self.config.year_count());
        for year in self.config.years() {
            let mut total_area = 0.0;
            let mut fire_loss = 0.0;
            let mut logging_loss = 0.0;
            let mut mining_loss = 0.0;
            let mut natural_gain = 0.0;
            for region in &self.config.regions {
                let record = self.dataset.loss_record(region, year)?;
                total_area += record.total_area;
                fire_loss += record.fire_loss;
                logging_loss += record.logging_loss;
                mining_loss += record.mining_loss;
                natural_gain += record.natural_gain;
            }
            rows.push(AnnualChange {
                year,
                total_area: total_area.round(),
                fire_loss: fire_loss.round(),
                logging_loss: logging_loss.round(),
                mining_loss: mining_loss.round(),
                natural_gain: natural_gain.round(),
                net_change: (natural_gain - fire_loss - logging_loss - mining_loss).round(),
            });
        }
        Ok(rows)
    }

    pub fn summary_statistics(&self) -> Result<Vec<RegionSummaryStats>> {
        self.dataset.summary_statistics()
    }

    /// Cross-region comparison built from per-region losses, risks and
    /// delta-NBR series
    pub fn comparison(&self) -> Result<crate::core::ComparisonResult> {
        let mut inputs = Vec::with_capacity(self.config.regions.len());
        for region in &self.config.regions {
            inputs.push(RegionComparisonInput {
                region: region.clone(),
                loss_summary: self.region_loss(region)?,
                assessment: self.region_risk(region)?,
                delta_series: self.dataset.delta_series(region)?,
            });
        }
        comparison::compare(&inputs)
    }

    /// Run everything and assemble the report
    pub fn full_report(&self) -> Result<AnalysisReport> {
        log::info!(
            "analyzing {} regions over {}..={}",
            self.config.regions.len(),
            self.config.first_year,
            self.config.last_year
        );
        Ok(AnalysisReport {
            generated_at: Utc::now(),
            regions: self.config.regions.clone(),
            first_year: self.config.first_year,
            last_year: self.config.last_year,
            trends: self.all_region_trends()?,
            losses: self.all_region_losses()?,
            risks: self.all_region_risks()?,
            nbr_rows: self.nbr_rows()?,
            annual_changes: self.annual_changes()?,
            summary_stats: self.summary_statistics()?,
            comparison: self.comparison()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LossRecord, MiningRecord, TrendDirection};
    use crate::data::observation_from_readings;

    fn config() -> RegionConfig {
        RegionConfig {
            regions: vec!["Karabuk".to_string(), "Bartin".to_string()],
            first_year: 2020,
            last_year: 2023,
            ..RegionConfig::default()
        }
    }

    fn analyzer() -> ForestAnalyzer {
        let config = config();
        let mut dataset = ForestDataset::new(&config);
        for (offset, year) in config.years().enumerate() {
            let step = offset as f64;
            dataset
                .insert_loss(
                    "Karabuk",
                    year,
                    LossRecord {
                        total_area: 100_000.0 - 500.0 * step,
                        fire_loss: 300.0,
                        logging_loss: 150.0,
                        mining_loss: 50.0,
                        natural_gain: 100.0,
                    },
                )
                .unwrap();
            dataset
                .insert_loss(
                    "Bartin",
                    year,
                    LossRecord {
                        total_area: 50_000.0 + 100.0 * step,
                        fire_loss: 20.0,
                        logging_loss: 10.0,
                        mining_loss: 0.0,
                        natural_gain: 60.0,
                    },
                )
                .unwrap();
            let thresholds = config.nbr_thresholds;
            dataset
                .insert_nbr(
                    "Karabuk",
                    year,
                    observation_from_readings(0.55, 0.55 - 0.30, &thresholds),
                )
                .unwrap();
            dataset
                .insert_nbr(
                    "Bartin",
                    year,
                    observation_from_readings(0.50, 0.50 - 0.05, &thresholds),
                )
                .unwrap();
        }
        dataset
            .set_mining(
                "Karabuk",
                MiningRecord {
                    impact_area_ha: 2_000.0,
                    sites: vec![],
                },
            )
            .unwrap();
        ForestAnalyzer::new(config, dataset)
    }

    #[test]
    fn shrinking_forest_trends_decreasing() {
        let analyzer = analyzer();
        let trend = analyzer.region_trend("Karabuk").unwrap();
        assert_eq!(trend.direction, TrendDirection::Decreasing);
        assert!((trend.sens_slope - -500.0).abs() < 1e-9);
    }

    #[test]
    fn risk_uses_baseline_year_area() {
        let analyzer = analyzer();
        let assessment = analyzer.region_risk("Karabuk").unwrap();

        // 4 years x 500 ha of loss against the 100k baseline, scaled by 10
        let expected_loss_factor = 2_000.0 / 100_000.0 * 10.0;
        assert!((assessment.loss_factor - expected_loss_factor).abs() < 1e-9);
        // 2000 ha of mining against the 10k reference
        assert!((assessment.mining_factor - 0.2).abs() < 1e-9);
    }

    #[test]
    fn annual_changes_sum_regions() {
        let analyzer = analyzer();
        let rows = analyzer.annual_changes().unwrap();
        assert_eq!(rows.len(), 4);

        let first = &rows[0];
        assert_eq!(first.year, 2020);
        assert!((first.total_area - 150_000.0).abs() < 1e-9);
        assert!((first.fire_loss - 320.0).abs() < 1e-9);
        // 160 gain - 320 fire - 160 logging - 50 mining
        assert!((first.net_change - -370.0).abs() < 1e-9);
    }

    #[test]
    fn comparison_flags_the_burning_region() {
        let analyzer = analyzer();
        let comparison = analyzer.comparison().unwrap();
        assert_eq!(comparison.max_loss_region, "Karabuk");
        assert_eq!(comparison.min_loss_region, "Bartin");
        assert_eq!(comparison.max_risk_region, "Karabuk");
    }

    #[test]
    fn full_report_covers_every_region_year() {
        let analyzer = analyzer();
        let report = analyzer.full_report().unwrap();

        assert_eq!(report.regions.len(), 2);
        assert_eq!(report.trends.len(), 2);
        assert_eq!(report.losses.len(), 2);
        assert_eq!(report.risks.len(), 2);
        assert_eq!(report.nbr_rows.len(), 8);
        assert_eq!(report.annual_changes.len(), 4);
        assert_eq!(report.summary_stats.len(), 2);
        assert_eq!(report.first_year, 2020);
        assert_eq!(report.last_year, 2023);
    }
}
