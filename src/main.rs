use anyhow::Result;
use clap::Parser;
use forestwatch::cli::{Cli, Commands};
use forestwatch::commands::{self, AnalyzeConfig, TrendConfig};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            data_dir,
            config,
            format,
            output,
        } => commands::handle_analyze(AnalyzeConfig {
            data_dir,
            config,
            format: format.into(),
            output,
        }),
        Commands::Trend {
            data_dir,
            config,
            alpha,
        } => commands::handle_trend(TrendConfig {
            data_dir,
            config,
            alpha,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}
