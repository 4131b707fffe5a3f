//! Rank and shape of nested array literals.

use crate::core::Exercise;
use crate::domain::model::{RankEntry, RankReport};
use crate::utils::error::{LabError, Result};
use serde_json::Value;
use std::fmt;

/// 課堂範例：0 到 3 維的陣列
pub const LAB_LITERALS: [&str; 4] = [
    "42",
    "[1, 2, 3, 4, 5]",
    "[[1, 2, 3], [4, 5, 6]]",
    "[[[1, 2, 3], [4, 5, 6]], [[1, 2, 3], [4, 5, 6]]]",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    source: String,
    shape: Vec<usize>,
}

impl ArrayLiteral {
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| LabError::InvalidLiteral {
            message: format!("'{}' is not valid JSON: {}", text, e),
        })?;
        let shape = shape_of(&value, 0)?;
        Ok(Self {
            source: text.trim().to_string(),
            shape,
        })
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

fn shape_of(value: &Value, depth: usize) -> Result<Vec<usize>> {
    match value {
        Value::Number(_) | Value::Bool(_) | Value::String(_) => Ok(Vec::new()),
        Value::Null => Err(LabError::InvalidLiteral {
            message: format!("null element at depth {}", depth),
        }),
        Value::Object(_) => Err(LabError::InvalidLiteral {
            message: format!("object element at depth {}", depth),
        }),
        Value::Array(items) => {
            let len = items.len();
            let mut items = items.iter();
            let inner = match items.next() {
                Some(first) => shape_of(first, depth + 1)?,
                None => Vec::new(),
            };
            for item in items {
                let found = shape_of(item, depth + 1)?;
                if found != inner {
                    return Err(LabError::RaggedArray {
                        depth: depth + 1,
                        expected: inner,
                        found,
                    });
                }
            }

            let mut shape = Vec::with_capacity(inner.len() + 1);
            shape.push(len);
            shape.extend(inner);
            Ok(shape)
        }
    }
}

pub struct DimensionsExercise {
    literals: Vec<String>,
}

impl DimensionsExercise {
    pub fn new(literals: Vec<String>) -> Self {
        Self { literals }
    }

    pub fn lab_default() -> Self {
        Self::new(LAB_LITERALS.iter().map(|s| s.to_string()).collect())
    }
}

impl Exercise for DimensionsExercise {
    type Report = RankReport;

    fn name(&self) -> &'static str {
        "dims"
    }

    fn run(&self) -> Result<RankReport> {
        tracing::info!("Measuring rank of {} literals", self.literals.len());
        let entries = self
            .literals
            .iter()
            .map(|text| {
                let literal = ArrayLiteral::parse(text)?;
                tracing::debug!("{} -> rank {}", literal.source(), literal.rank());
                Ok(RankEntry {
                    rank: literal.rank(),
                    shape: literal.shape().to_vec(),
                    literal: literal.source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RankReport { entries })
    }
}

impl fmt::Display for RankReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{} (shape {:?}): {}", e.rank, e.shape, e.literal))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_literal_ranks() {
        let report = DimensionsExercise::lab_default().run().unwrap();
        let ranks: Vec<usize> = report.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert_eq!(report.entries[3].shape, vec![2, 2, 3]);
    }

    #[test]
    fn test_empty_array_has_rank_one() {
        let literal = ArrayLiteral::parse("[]").unwrap();
        assert_eq!(literal.rank(), 1);
        assert_eq!(literal.shape(), &[0]);
    }

    #[test]
    fn test_ragged_literal_is_rejected() {
        let err = ArrayLiteral::parse("[[1, 2], [3]]").unwrap_err();
        match err {
            LabError::RaggedArray { depth, expected, found } => {
                assert_eq!(depth, 1);
                assert_eq!(expected, vec![2]);
                assert_eq!(found, vec![1]);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(ArrayLiteral::parse("[1, [2]]").is_err());
    }

    #[test]
    fn test_non_array_json_is_rejected() {
        assert!(matches!(ArrayLiteral::parse("{\"a\": 1}"), Err(LabError::InvalidLiteral { .. })));
        assert!(matches!(ArrayLiteral::parse("[null]"), Err(LabError::InvalidLiteral { .. })));
        assert!(matches!(ArrayLiteral::parse("[1,"), Err(LabError::InvalidLiteral { .. })));
    }

    #[test]
    fn test_display_lists_each_literal() {
        let report = DimensionsExercise::new(vec!["[[1, 2]]".to_string()]).run().unwrap();
        assert_eq!(report.to_string(), "2 (shape [1, 2]): [[1, 2]]");
    }
}
