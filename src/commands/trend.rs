use crate::analysis::ForestAnalyzer;
use crate::data::ForestDataset;
use crate::report;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct TrendConfig {
    pub data_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub alpha: Option<f64>,
}

pub fn handle_trend(config: TrendConfig) -> Result<()> {
    let mut region_config = super::load_region_config(config.config.as_deref())?;

    if let Some(alpha) = config.alpha {
        if !(0.0..1.0).contains(&alpha) || alpha == 0.0 {
            anyhow::bail!("alpha must be in (0, 1), got {alpha}");
        }
        region_config.alpha = alpha;
    }

    let dataset = ForestDataset::load_dir(&region_config, &config.data_dir)
        .with_context(|| format!("loading dataset from {}", config.data_dir.display()))?;

    let analyzer = ForestAnalyzer::new(region_config, dataset);
    let trends = analyzer.all_region_trends()?;
    report::print_trend_table(&trends);
    Ok(())
}
