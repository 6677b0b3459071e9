use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "forestwatch")]
#[command(about = "Forest cover change and fire risk analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full regional analysis over a dataset directory
    Analyze {
        /// Directory holding forest.json, nbr.json and mining.json
        data_dir: PathBuf,

        /// Configuration file (defaults to forestwatch.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout; terminal format always prints)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report per-region Mann-Kendall trends over total forest area
    Trend {
        /// Directory holding forest.json, nbr.json and mining.json
        data_dir: PathBuf,

        /// Configuration file (defaults to forestwatch.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Significance level override
        #[arg(long)]
        alpha: Option<f64>,
    },

    /// Write a default forestwatch.toml
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::report::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::report::OutputFormat::Json,
            OutputFormat::Markdown => crate::report::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::report::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            crate::report::OutputFormat::from(OutputFormat::Json),
            crate::report::OutputFormat::Json
        );
        assert_eq!(
            crate::report::OutputFormat::from(OutputFormat::Markdown),
            crate::report::OutputFormat::Markdown
        );
        assert_eq!(
            crate::report::OutputFormat::from(OutputFormat::Terminal),
            crate::report::OutputFormat::Terminal
        );
    }

    #[test]
    fn test_cli_parsing_analyze_command() {
        let args = vec![
            "forestwatch",
            "analyze",
            "/data/dir",
            "--format",
            "json",
            "--output",
            "/tmp/report.json",
        ];

        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Analyze {
                data_dir,
                format,
                output,
                ..
            } => {
                assert_eq!(data_dir, PathBuf::from("/data/dir"));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(output, Some(PathBuf::from("/tmp/report.json")));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_cli_parsing_trend_command() {
        let args = vec!["forestwatch", "trend", "/data/dir", "--alpha", "0.01"];

        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Trend {
                data_dir, alpha, ..
            } => {
                assert_eq!(data_dir, PathBuf::from("/data/dir"));
                assert_eq!(alpha, Some(0.01));
            }
            _ => panic!("Expected Trend command"),
        }
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let args = vec!["forestwatch", "init", "--force"];

        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Init { force } => {
                assert!(force);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_analyze_defaults_to_terminal() {
        let cli = Cli::parse_from(vec!["forestwatch", "analyze", "."]);

        match cli.command {
            Commands::Analyze { format, output, .. } => {
                assert_eq!(format, OutputFormat::Terminal);
                assert_eq!(output, None);
            }
            _ => panic!("Expected Analyze command"),
        }
    }
}
