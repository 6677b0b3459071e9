//! Typed storage and JSON persistence for regional forest observations

use crate::config::{NbrThresholds, RegionConfig};
use crate::core::errors::{Error, Result};
use crate::core::{LossRecord, MiningRecord, NbrObservation, RegionSummaryStats};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const FOREST_FILE: &str = "forest.json";
pub const NBR_FILE: &str = "nbr.json";
pub const MINING_FILE: &str = "mining.json";

/// On-disk shape for year-keyed records: region -> year-as-string -> record
type YearKeyed<T> = BTreeMap<String, BTreeMap<String, T>>;

/// Build an NBR observation from raw before/after readings, classifying the
/// delta against the configured thresholds.
pub fn observation_from_readings(
    index_before: f64,
    index_after: f64,
    thresholds: &NbrThresholds,
) -> NbrObservation {
    let index_delta = index_before - index_after;
    NbrObservation {
        index_before,
        index_after,
        index_delta,
        severity_class: thresholds.classify(index_delta),
    }
}

/// Observations for the configured regions and year range.
///
/// Records live in per-region vectors indexed by year offset, so series
/// extraction is a direct walk over slots; an unfilled slot surfaces as
/// `Error::MissingYear` rather than a silent gap. Mining impact is kept per
/// region, and a region without a mining record counts as zero impact.
pub struct ForestDataset {
    config: RegionConfig,
    forest: BTreeMap<String, Vec<Option<LossRecord>>>,
    nbr: BTreeMap<String, Vec<Option<NbrObservation>>>,
    mining: BTreeMap<String, MiningRecord>,
}

impl ForestDataset {
    pub fn new(config: &RegionConfig) -> Self {
        Self {
            config: config.clone(),
            forest: empty_slots(config),
            nbr: empty_slots(config),
            mining: BTreeMap::new(),
        }
    }

    pub fn regions(&self) -> &[String] {
        &self.config.regions
    }

    pub fn insert_loss(&mut self, region: &str, year: i32, record: LossRecord) -> Result<()> {
        let index = self.slot_index(region, year)?;
        let slots = self
            .forest
            .get_mut(region)
            .ok_or_else(|| Error::UnknownRegion(region.to_string()))?;
        slots[index] = Some(record);
        Ok(())
    }

    pub fn insert_nbr(&mut self, region: &str, year: i32, observation: NbrObservation) -> Result<()> {
        let index = self.slot_index(region, year)?;
        let slots = self
            .nbr
            .get_mut(region)
            .ok_or_else(|| Error::UnknownRegion(region.to_string()))?;
        slots[index] = Some(observation);
        Ok(())
    }

    pub fn set_mining(&mut self, region: &str, record: MiningRecord) -> Result<()> {
        if !self.forest.contains_key(region) {
            return Err(Error::UnknownRegion(region.to_string()));
        }
        self.mining.insert(region.to_string(), record);
        Ok(())
    }

    pub fn loss_record(&self, region: &str, year: i32) -> Result<&LossRecord> {
        let index = self.slot_index(region, year)?;
        let slots = self
            .forest
            .get(region)
            .ok_or_else(|| Error::UnknownRegion(region.to_string()))?;
        slots[index].as_ref().ok_or(Error::MissingYear {
            region: region.to_string(),
            year,
        })
    }

    pub fn nbr_observation(&self, region: &str, year: i32) -> Result<&NbrObservation> {
        let index = self.slot_index(region, year)?;
        let slots = self
            .nbr
            .get(region)
            .ok_or_else(|| Error::UnknownRegion(region.to_string()))?;
        slots[index].as_ref().ok_or(Error::MissingYear {
            region: region.to_string(),
            year,
        })
    }

    /// Mining impact in hectares; a region with no recorded mining counts
    /// as zero.
    pub fn mining_impact(&self, region: &str) -> f64 {
        self.mining
            .get(region)
            .map(|record| record.impact_area_ha)
            .unwrap_or(0.0)
    }

    pub fn mining_record(&self, region: &str) -> Option<&MiningRecord> {
        self.mining.get(region)
    }

    /// Chronological loss records for one region; fails on the first
    /// unfilled year.
    pub fn loss_records(&self, region: &str) -> Result<Vec<LossRecord>> {
        self.collect_years(region, &self.forest)
    }

    /// Total forest area per year, in chronological order
    pub fn area_series(&self, region: &str) -> Result<Vec<f64>> {
        Ok(self
            .loss_records(region)?
            .iter()
            .map(|record| record.total_area)
            .collect())
    }

    /// Delta-NBR per year, in chronological order
    pub fn delta_series(&self, region: &str) -> Result<Vec<f64>> {
        Ok(self
            .collect_years(region, &self.nbr)?
            .iter()
            .map(|observation| observation.index_delta)
            .collect())
    }

    /// Descriptive statistics per region, in configured region order.
    /// Areas use the population standard deviation; the change percentage
    /// is relative to the first year and undefined when that area is zero.
    pub fn summary_statistics(&self) -> Result<Vec<RegionSummaryStats>> {
        let mut stats = Vec::with_capacity(self.config.regions.len());
        for region in &self.config.regions {
            let records = self.loss_records(region)?;
            let areas: Vec<f64> = records.iter().map(|r| r.total_area).collect();
            let losses: Vec<f64> = records.iter().map(|r| r.total_loss()).collect();

            let mean_area = mean(&areas);
            let variance = areas
                .iter()
                .map(|a| (a - mean_area).powi(2))
                .sum::<f64>()
                / areas.len() as f64;
            let first_area = areas[0];
            let last_area = areas[areas.len() - 1];
            if first_area == 0.0 {
                return Err(Error::undefined_ratio(
                    "change percentage requires a non-zero first-year area",
                ));
            }

            stats.push(RegionSummaryStats {
                region: region.clone(),
                mean_area: round2(mean_area),
                std_area: round2(variance.sqrt()),
                min_area: round2(fold_min(&areas)),
                max_area: round2(fold_max(&areas)),
                total_loss: round2(losses.iter().sum()),
                mean_annual_loss: round2(mean(&losses)),
                change_pct: round2((last_area - first_area) / first_area * 100.0),
            });
        }
        Ok(stats)
    }

    /// Write `forest.json`, `nbr.json` and `mining.json` under `dir`,
    /// creating it if needed. Only filled year slots are written.
    pub fn save_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        write_json(&dir.join(FOREST_FILE), &year_keyed(&self.forest, &self.config))?;
        write_json(&dir.join(NBR_FILE), &year_keyed(&self.nbr, &self.config))?;
        write_json(&dir.join(MINING_FILE), &self.mining)?;
        log::info!("dataset saved to {}", dir.display());
        Ok(())
    }

    /// Load a dataset from `forest.json`, `nbr.json` and `mining.json`
    /// under `dir`. A missing mining file is treated as zero mining impact
    /// everywhere; the other two files are required.
    pub fn load_dir(config: &RegionConfig, dir: &Path) -> Result<Self> {
        let mut dataset = Self::new(config);

        let forest_path = dir.join(FOREST_FILE);
        let raw_forest: YearKeyed<LossRecord> = read_json(&forest_path)?;
        fill_year_keyed(&mut dataset.forest, config, raw_forest, &forest_path)?;

        let nbr_path = dir.join(NBR_FILE);
        let raw_nbr: YearKeyed<NbrObservation> = read_json(&nbr_path)?;
        fill_year_keyed(&mut dataset.nbr, config, raw_nbr, &nbr_path)?;

        let mining_path = dir.join(MINING_FILE);
        if mining_path.exists() {
            let raw_mining: BTreeMap<String, MiningRecord> = read_json(&mining_path)?;
            for (region, record) in raw_mining {
                dataset.set_mining(&region, record)?;
            }
        } else {
            log::info!("no {} found, assuming zero mining impact", MINING_FILE);
        }

        Ok(dataset)
    }

    fn slot_index(&self, region: &str, year: i32) -> Result<usize> {
        if !self.forest.contains_key(region) {
            return Err(Error::UnknownRegion(region.to_string()));
        }
        self.config.year_index(year).ok_or_else(|| {
            Error::data_format(format!(
                "year {year} outside configured range {}..={}",
                self.config.first_year, self.config.last_year
            ))
        })
    }

    fn collect_years<T: Clone>(
        &self,
        region: &str,
        store: &BTreeMap<String, Vec<Option<T>>>,
    ) -> Result<Vec<T>> {
        let slots = store
            .get(region)
            .ok_or_else(|| Error::UnknownRegion(region.to_string()))?;
        let mut records = Vec::with_capacity(slots.len());
        for (offset, slot) in slots.iter().enumerate() {
            match slot {
                Some(record) => records.push(record.clone()),
                None => {
                    return Err(Error::MissingYear {
                        region: region.to_string(),
                        year: self.config.first_year + offset as i32,
                    })
                }
            }
        }
        Ok(records)
    }
}

fn empty_slots<T: Clone>(config: &RegionConfig) -> BTreeMap<String, Vec<Option<T>>> {
    config
        .regions
        .iter()
        .map(|region| (region.clone(), vec![None; config.year_count()]))
        .collect()
}

fn year_keyed<T: Clone>(
    store: &BTreeMap<String, Vec<Option<T>>>,
    config: &RegionConfig,
) -> YearKeyed<T> {
    store
        .iter()
        .map(|(region, slots)| {
            let years = slots
                .iter()
                .enumerate()
                .filter_map(|(offset, slot)| {
                    slot.as_ref().map(|record| {
                        ((config.first_year + offset as i32).to_string(), record.clone())
                    })
                })
                .collect();
            (region.clone(), years)
        })
        .collect()
}

fn fill_year_keyed<T>(
    store: &mut BTreeMap<String, Vec<Option<T>>>,
    config: &RegionConfig,
    raw: YearKeyed<T>,
    path: &Path,
) -> Result<()> {
    for (region, years) in raw {
        let slots = store
            .get_mut(&region)
            .ok_or_else(|| Error::UnknownRegion(region.clone()))?;
        for (year_key, record) in years {
            let year: i32 = year_key.parse().map_err(|_| {
                Error::data_format(format!(
                    "invalid year key '{year_key}' for region {region} in {}",
                    path.display()
                ))
            })?;
            let index = config.year_index(year).ok_or_else(|| {
                Error::data_format(format!(
                    "year {year} in {} outside configured range {}..={}",
                    path.display(),
                    config.first_year,
                    config.last_year
                ))
            })?;
            slots[index] = Some(record);
        }
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(Error::from)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents)?;
    Ok(())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn fold_min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn fold_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
