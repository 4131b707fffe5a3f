#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use toml_config::LabConfig;

#[cfg(feature = "cli")]
use crate::core::runner::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ai-lab")]
#[command(about = "Introductory AI lab exercises: array statistics, dictionaries and graph search")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Random temperature grid statistics
    Temperature {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        days: Option<usize>,
        #[arg(long)]
        hours: Option<usize>,
        /// Also write the grid to this CSV file
        #[arg(long)]
        export_csv: Option<String>,
    },
    /// Car info dictionary demo
    Car {
        /// Kilometres driven between the two snapshots
        #[arg(long)]
        drive: Option<u64>,
    },
    /// Report the rank of array literals given as JSON
    Dims { literals: Vec<String> },
    /// Breadth-first traversal
    Bfs {
        #[arg(long)]
        start: Option<String>,
    },
    /// Depth-first traversal
    Dfs {
        #[arg(long)]
        start: Option<String>,
        /// Use the recursive formulation instead of the explicit stack
        #[arg(long)]
        recursive: bool,
    },
    /// Run every exercise in turn
    All,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入 TOML 配置（若有指定）並套用命令列覆蓋
    pub fn resolve(&self) -> Result<LabConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                LabConfig::from_file(path)?
            }
            None => LabConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut LabConfig) {
        match &self.command {
            Command::Temperature {
                seed,
                days,
                hours,
                export_csv,
            } => {
                if seed.is_some() {
                    config.temperature.seed = *seed;
                }
                if let Some(days) = days {
                    config.temperature.days = *days;
                }
                if let Some(hours) = hours {
                    config.temperature.hours = *hours;
                }
                if export_csv.is_some() {
                    config.temperature.export_csv = export_csv.clone();
                }
            }
            Command::Car { drive } => {
                if let Some(km) = drive {
                    config.car.additional_km = *km;
                }
            }
            Command::Dims { literals } => {
                if !literals.is_empty() {
                    config.dimensions.literals = literals.clone();
                }
            }
            Command::Bfs { start } | Command::Dfs { start, .. } => {
                if let Some(start) = start {
                    config.graph.start = start.clone();
                }
            }
            Command::All => {}
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand_with_global_flags() {
        let cli = CliConfig::parse_from(["ai-lab", "bfs", "--start", "C", "--format", "json", "-v"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Bfs { start: Some(ref s) } if s == "C"));
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = CliConfig::parse_from(["ai-lab", "temperature", "--seed", "3", "--days", "2"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.temperature.seed, Some(3));
        assert_eq!(config.temperature.days, 2);
        assert_eq!(config.temperature.hours, 24);
    }

    #[test]
    fn test_dims_without_literals_keeps_defaults() {
        let cli = CliConfig::parse_from(["ai-lab", "dims"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.dimensions.literals.len(), 4);

        let cli = CliConfig::parse_from(["ai-lab", "dims", "[1]", "7"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.dimensions.literals, vec!["[1]", "7"]);
    }

    #[test]
    fn test_dfs_recursive_flag() {
        let cli = CliConfig::parse_from(["ai-lab", "dfs", "--recursive"]);
        assert!(matches!(cli.command, Command::Dfs { start: None, recursive: true }));
    }
}
