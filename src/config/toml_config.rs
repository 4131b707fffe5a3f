use crate::core::car_info::{CarInfoExercise, CarSettings};
use crate::core::dimensions::{ArrayLiteral, DimensionsExercise, LAB_LITERALS};
use crate::core::temperature::TemperatureExercise;
use crate::domain::model::{Graph, GridSpec};
use crate::utils::error::{LabError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Lab settings. Every section is optional and falls back to the classroom values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub temperature: TemperatureConfig,
    pub car: CarSettings,
    pub dimensions: DimensionsConfig,
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    pub days: usize,
    pub hours: usize,
    pub min: i32,
    pub max: i32,
    pub seed: Option<u64>,
    pub export_csv: Option<String>,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        let spec = GridSpec::default();
        Self {
            days: spec.days,
            hours: spec.hours,
            min: spec.min,
            max: spec.max,
            seed: None,
            export_csv: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionsConfig {
    pub literals: Vec<String>,
}

impl Default for DimensionsConfig {
    fn default() -> Self {
        Self {
            literals: LAB_LITERALS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub start: String,
    pub adjacency: Graph,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            start: "A".to_string(),
            adjacency: Graph::lab_default(),
        }
    }
}

impl LabConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LabError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LabError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LAB_SEED})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LabError::ConfigParseError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn grid_spec(&self) -> GridSpec {
        GridSpec {
            days: self.temperature.days,
            hours: self.temperature.hours,
            min: self.temperature.min,
            max: self.temperature.max,
        }
    }

    pub fn temperature_exercise(&self) -> TemperatureExercise {
        TemperatureExercise::new(
            self.grid_spec(),
            self.temperature.seed,
            self.temperature.export_csv.as_ref().map(PathBuf::from),
        )
    }

    pub fn car_exercise(&self) -> CarInfoExercise {
        CarInfoExercise::new(self.car.clone())
    }

    pub fn dimensions_exercise(&self) -> DimensionsExercise {
        DimensionsExercise::new(self.dimensions.literals.clone())
    }

    pub fn validate_config(&self) -> Result<()> {
        let t = &self.temperature;
        validation::validate_positive_number("temperature.days", t.days, 1)?;
        validation::validate_positive_number("temperature.hours", t.hours, 1)?;
        self.grid_spec().cell_count()?;
        validation::validate_half_open_range("temperature.min/max", t.min, t.max)?;
        if let Some(path) = &t.export_csv {
            validation::validate_path("temperature.export_csv", path)?;
        }

        validation::validate_non_empty_string("car.color", &self.car.color)?;

        for literal in &self.dimensions.literals {
            ArrayLiteral::parse(literal)?;
        }

        self.validate_graph()
    }

    fn validate_graph(&self) -> Result<()> {
        let graph = &self.graph;
        validation::validate_non_empty_string("graph.start", &graph.start)?;

        if !graph.adjacency.contains(&graph.start) {
            return Err(LabError::InvalidConfigValueError {
                field: "graph.start".to_string(),
                value: graph.start.clone(),
                reason: "Start node is not a key of graph.adjacency".to_string(),
            });
        }

        if let Some((from, to)) = graph.adjacency.dangling_edges().first() {
            return Err(LabError::InvalidConfigValueError {
                field: format!("graph.adjacency.{}", from),
                value: to.to_string(),
                reason: "Neighbour is not a key of graph.adjacency".to_string(),
            });
        }

        Ok(())
    }
}

impl Validate for LabConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
