use crate::analysis::ForestAnalyzer;
use crate::data::ForestDataset;
use crate::report::{JsonWriter, MarkdownWriter, OutputFormat, OutputWriter, TerminalWriter};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub data_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let region_config = super::load_region_config(config.config.as_deref())?;
    let dataset = ForestDataset::load_dir(&region_config, &config.data_dir)
        .with_context(|| format!("loading dataset from {}", config.data_dir.display()))?;

    let analyzer = ForestAnalyzer::new(region_config, dataset);
    let report = analyzer.full_report()?;

    match config.format {
        OutputFormat::Terminal => TerminalWriter::new().write_report(&report),
        OutputFormat::Json => with_output(config.output.as_deref(), |writer| {
            JsonWriter::new(writer).write_report(&report)
        }),
        OutputFormat::Markdown => with_output(config.output.as_deref(), |writer| {
            MarkdownWriter::new(writer).write_report(&report)
        }),
    }
}

fn with_output<F>(output: Option<&Path>, write: F) -> Result<()>
where
    F: FnOnce(Box<dyn Write>) -> Result<()>,
{
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            write(Box::new(file))?;
            println!("Report written to {}", path.display());
            Ok(())
        }
        None => write(Box::new(io::stdout().lock())),
    }
}
