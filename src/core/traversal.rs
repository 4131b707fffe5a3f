//! Breadth-first and depth-first traversal over an adjacency mapping.
//!
//! All traversals share the same contract: the start node must be a key of
//! the mapping, and a node is visited at most once, guarded by a visited set.
//! Expanding a node that is not a key of the mapping fails with
//! [`LabError::UnknownNode`].

use crate::core::Exercise;
use crate::domain::model::{Graph, TraversalOutcome, TraversalStrategy, Visit};
use crate::domain::ports::Traversal;
use crate::utils::error::{LabError, Result};
use std::collections::{HashSet, VecDeque};
use std::fmt;

fn ensure_start(graph: &Graph, start: &str) -> Result<()> {
    if graph.contains(start) {
        Ok(())
    } else {
        Err(LabError::UnknownNode {
            node: start.to_string(),
        })
    }
}

/// Worklist-driven BFS. Nodes are marked visited when enqueued, so the
/// worklist never holds more entries than the graph has nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl Traversal for BreadthFirst {
    fn strategy(&self) -> TraversalStrategy {
        TraversalStrategy::BreadthFirst
    }

    fn traverse(&self, graph: &Graph, start: &str) -> Result<TraversalOutcome> {
        ensure_start(graph, start)?;

        let mut visited: HashSet<&str> = HashSet::with_capacity(graph.node_count());
        let mut worklist: VecDeque<(&str, usize)> = VecDeque::new();
        let mut visits = Vec::new();

        visited.insert(start);
        worklist.push_back((start, 0));

        while let Some((node, depth)) = worklist.pop_front() {
            tracing::debug!("BFS visit {} (distance {})", node, depth);
            visits.push(Visit {
                node: node.to_string(),
                depth,
            });

            for neighbor in graph.neighbors(node)? {
                if visited.insert(neighbor.as_str()) {
                    worklist.push_back((neighbor.as_str(), depth + 1));
                }
            }
        }

        Ok(TraversalOutcome {
            strategy: self.strategy(),
            start: start.to_string(),
            visits,
        })
    }
}

/// Pre-order DFS with an explicit stack.
///
/// Neighbours are pushed in reverse so the first unvisited neighbour is
/// popped first, and the visited check happens on pop. This reproduces the
/// recursive visit order exactly without growing the call stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl Traversal for DepthFirst {
    fn strategy(&self) -> TraversalStrategy {
        TraversalStrategy::DepthFirst
    }

    fn traverse(&self, graph: &Graph, start: &str) -> Result<TraversalOutcome> {
        ensure_start(graph, start)?;

        let mut visited: HashSet<&str> = HashSet::with_capacity(graph.node_count());
        let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
        let mut visits = Vec::new();

        while let Some((node, depth)) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            tracing::debug!("DFS visit {} (depth {})", node, depth);
            visits.push(Visit {
                node: node.to_string(),
                depth,
            });

            for neighbor in graph.neighbors(node)?.iter().rev() {
                if !visited.contains(neighbor.as_str()) {
                    stack.push((neighbor.as_str(), depth + 1));
                }
            }
        }

        Ok(TraversalOutcome {
            strategy: self.strategy(),
            start: start.to_string(),
            visits,
        })
    }
}

/// Textbook recursive DFS. Recursion depth grows with the longest simple
/// path explored, so deep graphs can exhaust the call stack; prefer
/// [`DepthFirst`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveDepthFirst;

impl RecursiveDepthFirst {
    fn descend<'g>(
        graph: &'g Graph,
        node: &'g str,
        depth: usize,
        visited: &mut HashSet<&'g str>,
        visits: &mut Vec<Visit>,
    ) -> Result<()> {
        visited.insert(node);
        tracing::debug!("DFS visit {} (depth {})", node, depth);
        visits.push(Visit {
            node: node.to_string(),
            depth,
        });

        for neighbor in graph.neighbors(node)? {
            if !visited.contains(neighbor.as_str()) {
                Self::descend(graph, neighbor, depth + 1, visited, visits)?;
            }
        }
        Ok(())
    }
}

impl Traversal for RecursiveDepthFirst {
    fn strategy(&self) -> TraversalStrategy {
        TraversalStrategy::RecursiveDepthFirst
    }

    fn traverse(&self, graph: &Graph, start: &str) -> Result<TraversalOutcome> {
        ensure_start(graph, start)?;

        let mut visited = HashSet::with_capacity(graph.node_count());
        let mut visits = Vec::new();
        Self::descend(graph, start, 0, &mut visited, &mut visits)?;

        Ok(TraversalOutcome {
            strategy: self.strategy(),
            start: start.to_string(),
            visits,
        })
    }
}

/// Runs a traversal as a lab exercise.
pub struct TraversalExercise<T: Traversal> {
    traversal: T,
    graph: Graph,
    start: String,
}

impl<T: Traversal> TraversalExercise<T> {
    pub fn new(traversal: T, graph: Graph, start: impl Into<String>) -> Self {
        Self {
            traversal,
            graph,
            start: start.into(),
        }
    }
}

impl<T: Traversal> Exercise for TraversalExercise<T> {
    type Report = TraversalOutcome;

    fn name(&self) -> &'static str {
        match self.traversal.strategy() {
            TraversalStrategy::BreadthFirst => "bfs",
            TraversalStrategy::DepthFirst | TraversalStrategy::RecursiveDepthFirst => "dfs",
        }
    }

    fn run(&self) -> Result<TraversalOutcome> {
        tracing::info!(
            "Traversing {} nodes with {} from '{}'",
            self.graph.node_count(),
            self.traversal.strategy(),
            self.start
        );
        let outcome = self.traversal.traverse(&self.graph, &self.start)?;
        tracing::info!("Visited {} nodes", outcome.visits.len());
        Ok(outcome)
    }
}

impl fmt::Display for TraversalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} from {}:", self.strategy, self.start)?;
        write!(f, "{}", self.order().join(" "))
    }
}
