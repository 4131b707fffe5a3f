pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::ConsoleOutput, CliConfig};

pub use config::LabConfig;
pub use core::runner::{LabRunner, OutputFormat};
pub use core::traversal::{BreadthFirst, DepthFirst, RecursiveDepthFirst, TraversalExercise};
pub use domain::model::{Graph, GridSpec, TemperatureGrid, TraversalOutcome};
pub use utils::error::{LabError, Result};
