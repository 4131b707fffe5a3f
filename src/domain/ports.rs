use crate::domain::model::{Graph, TraversalOutcome, TraversalStrategy};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt::Display;

/// A single lab exercise: runs to completion and yields a printable report.
pub trait Exercise {
    type Report: Serialize + Display;

    fn name(&self) -> &'static str;
    fn run(&self) -> Result<Self::Report>;
}

pub trait Traversal {
    fn strategy(&self) -> TraversalStrategy;
    fn traverse(&self, graph: &Graph, start: &str) -> Result<TraversalOutcome>;
}

/// Destination for rendered reports.
pub trait Output {
    fn write_report(&self, exercise: &str, rendered: &str) -> Result<()>;
}
