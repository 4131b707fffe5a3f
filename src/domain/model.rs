use crate::utils::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Adjacency mapping: node identifier to its ordered neighbour list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graph {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl Graph {
    pub fn new(adjacency: BTreeMap<String, Vec<String>>) -> Self {
        Self { adjacency }
    }

    /// 課堂範例的六節點圖
    pub fn lab_default() -> Self {
        Self::from_edges([
            ("A", &["B", "C"][..]),
            ("B", &["A", "D", "E"][..]),
            ("C", &["A", "F"][..]),
            ("D", &["B"][..]),
            ("E", &["B", "F"][..]),
            ("F", &["C", "E"][..]),
        ])
    }

    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let adjacency = edges
            .into_iter()
            .map(|(node, neighbors)| {
                (
                    node.to_string(),
                    neighbors.iter().map(|n| n.to_string()).collect(),
                )
            })
            .collect();
        Self { adjacency }
    }

    pub fn neighbors(&self, node: &str) -> Result<&[String]> {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .ok_or_else(|| LabError::UnknownNode {
                node: node.to_string(),
            })
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Edges whose target is not a key of the mapping, as `(from, to)`.
    pub fn dangling_edges(&self) -> Vec<(&str, &str)> {
        self.adjacency
            .iter()
            .flat_map(|(from, neighbors)| {
                neighbors
                    .iter()
                    .filter(|to| !self.adjacency.contains_key(to.as_str()))
                    .map(move |to| (from.as_str(), to.as_str()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalStrategy {
    BreadthFirst,
    DepthFirst,
    RecursiveDepthFirst,
}

impl fmt::Display for TraversalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TraversalStrategy::BreadthFirst => "BFS",
            TraversalStrategy::DepthFirst => "DFS",
            TraversalStrategy::RecursiveDepthFirst => "DFS (recursive)",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub node: String,
    /// Hop distance for BFS, tree depth for DFS.
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalOutcome {
    pub strategy: TraversalStrategy,
    pub start: String,
    pub visits: Vec<Visit>,
}

impl TraversalOutcome {
    pub fn order(&self) -> Vec<&str> {
        self.visits.iter().map(|v| v.node.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub days: usize,
    pub hours: usize,
    /// Inclusive lower bound.
    pub min: i32,
    /// Exclusive upper bound.
    pub max: i32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            days: 7,
            hours: 24,
            min: -5,
            max: 30,
        }
    }
}

/// Upper bound on days x hours for a generated grid.
pub const MAX_GRID_CELLS: usize = 1_000_000;

impl GridSpec {
    /// Number of cells, rejecting products that overflow or exceed [`MAX_GRID_CELLS`].
    pub fn cell_count(&self) -> Result<usize> {
        match self.days.checked_mul(self.hours) {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(cells),
            _ => Err(LabError::InvalidConfigValueError {
                field: "temperature.days*hours".to_string(),
                value: format!("{}x{}", self.days, self.hours),
                reason: format!("Grid may hold at most {} cells", MAX_GRID_CELLS),
            }),
        }
    }
}

/// Row-major days x hours grid of whole-degree temperatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct TemperatureGrid {
    days: usize,
    hours: usize,
    values: Vec<i32>,
}

#[derive(Deserialize)]
struct RawGrid {
    days: usize,
    hours: usize,
    values: Vec<i32>,
}

// 反序列化同樣走形狀檢查
impl TryFrom<RawGrid> for TemperatureGrid {
    type Error = LabError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        if raw.days == 0 || raw.hours == 0 {
            return Err(LabError::EmptyGrid {
                days: raw.days,
                hours: raw.hours,
            });
        }
        if raw.days.checked_mul(raw.hours) != Some(raw.values.len()) {
            return Err(LabError::RaggedArray {
                depth: 0,
                expected: vec![raw.days, raw.hours],
                found: vec![raw.values.len()],
            });
        }
        Ok(Self {
            days: raw.days,
            hours: raw.hours,
            values: raw.values,
        })
    }
}

impl TemperatureGrid {
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self> {
        let days = rows.len();
        let hours = rows.first().map(Vec::len).unwrap_or(0);
        if days == 0 || hours == 0 {
            return Err(LabError::EmptyGrid { days, hours });
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != hours) {
            return Err(LabError::RaggedArray {
                depth: 1,
                expected: vec![hours],
                found: vec![bad.len()],
            });
        }
        Ok(Self {
            days,
            hours,
            values: rows.into_iter().flatten().collect(),
        })
    }

    pub(crate) fn from_values(days: usize, hours: usize, values: Vec<i32>) -> Self {
        debug_assert_eq!(values.len(), days * hours);
        Self {
            days,
            hours,
            values,
        }
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn hours(&self) -> usize {
        self.hours
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.days, self.hours)
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.values.chunks(self.hours)
    }

    pub fn row(&self, day: usize) -> Option<&[i32]> {
        self.rows().nth(day)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub day: String,
    pub mean: f64,
    pub max: i32,
    pub min: i32,
    pub hottest_hour: usize,
    pub coldest_hour: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReport {
    pub grid: TemperatureGrid,
    pub per_day: Vec<DayStats>,
    pub hours_below_zero: usize,
    pub overall_mean: f64,
    pub overall_max: i32,
    pub overall_min: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub literal: String,
    pub rank: usize,
    pub shape: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankReport {
    pub entries: Vec<RankEntry>,
}
