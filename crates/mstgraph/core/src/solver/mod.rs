// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Minimum Spanning Tree solvers
//!
//! Two interchangeable algorithms sit behind the [`MstSolver`] trait:
//! - [`BoruvkaSolver`]: component-merging rounds over a union-find forest
//! - [`PrimSolver`]: single tree grown from vertex 0 with a binary heap
//!
//! Both return an empty edge list for a disconnected graph. Metrics can be
//! computed from a graph (solving once) or from an existing edge list through
//! the [`metrics`] module.

pub mod boruvka;
pub mod metrics;
pub mod prim;

use std::fmt;
use std::str::FromStr;

pub use boruvka::BoruvkaSolver;
pub use metrics::MstMetrics;
pub use prim::PrimSolver;

use crate::error::GraphResult;
use crate::graph::{Edge, Graph, TotalWeight, Weight};

/// Algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    Boruvka,
    Prim,
}

impl SolverKind {
    pub const ALL: [SolverKind; 2] = [SolverKind::Boruvka, SolverKind::Prim];

    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::Boruvka => "Boruvka",
            SolverKind::Prim => "Prim",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown MST algorithm: {0}")]
pub struct UnknownSolverError(pub String);

impl FromStr for SolverKind {
    type Err = UnknownSolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolverKind::ALL.into_iter().find(|kind| kind.name().eq_ignore_ascii_case(s)).ok_or_else(|| UnknownSolverError(s.to_string()))
    }
}

/// Common capability of every MST algorithm
///
/// Implementations are not synchronized; callers sharing a graph across
/// threads go through the coordinator.
pub trait MstSolver: Send + Sync {
    fn kind(&self) -> SolverKind;

    /// Compute the MST of `graph`, or an empty list when it is disconnected
    fn solve(&self, graph: &Graph) -> GraphResult<Vec<Edge>>;

    fn total_weight(&self, graph: &Graph) -> GraphResult<TotalWeight> {
        Ok(metrics::total_weight(&self.solve(graph)?))
    }

    fn longest_distance(&self, graph: &Graph) -> GraphResult<Option<Weight>> {
        Ok(metrics::longest_distance(&self.solve(graph)?))
    }

    fn shortest_distance(&self, graph: &Graph) -> GraphResult<Option<Weight>> {
        Ok(metrics::shortest_distance(&self.solve(graph)?))
    }

    fn average_distance(&self, graph: &Graph) -> GraphResult<Option<f64>> {
        Ok(metrics::average_distance(&self.solve(graph)?))
    }

    fn metrics(&self, graph: &Graph) -> GraphResult<MstMetrics> {
        Ok(MstMetrics::from_edges(&self.solve(graph)?))
    }

    /// Solve once and bundle the edges with their metrics
    fn report(&self, graph: &Graph) -> GraphResult<MstReport> {
        Ok(MstReport::new(self.kind(), self.solve(graph)?))
    }
}

/// A computed MST together with its metrics
///
/// `Display` renders the text response sent to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct MstReport {
    pub kind: SolverKind,
    pub edges: Vec<Edge>,
    pub metrics: MstMetrics,
}

impl MstReport {
    pub fn new(kind: SolverKind, edges: Vec<Edge>) -> Self {
        let metrics = MstMetrics::from_edges(&edges);
        Self { kind, edges, metrics }
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl fmt::Display for MstReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Minimum Spanning Tree ({}):", self.kind)?;
        for edge in &self.edges {
            writeln!(f, "{edge}")?;
        }
        write!(f, "{}", self.metrics)
    }
}
