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

//! Shared Graph Coordinator
//!
//! Owns the single long-lived [`Graph`] and serializes every access to it
//! behind one exclusive lock. Readers and writers are not distinguished:
//! an MST computation holds the lock for its whole runtime, so a solver never
//! observes a graph that is mutated mid-computation.
//!
//! Commands are applied in the order they win the lock. A bulk load issued
//! by one client is a sequence of independent commands, so other clients'
//! commands may interleave with it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::{GraphError, GraphResult};
use crate::factory::create_solver;
use crate::graph::{Edge, Graph, VertexId, Weight};
use crate::solver::{MstReport, SolverKind};

/// Counts an operation as in flight from before it waits on the lock until it returns
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Mutual-exclusion wrapper around the shared graph
#[derive(Debug, Default)]
pub struct SharedGraphCoordinator {
    graph: Mutex<Graph>,
    in_flight: AtomicUsize,
}

impl SharedGraphCoordinator {
    pub fn new(num_vertices: usize) -> Self {
        Self::from_graph(Graph::new(num_vertices))
    }

    pub fn from_graph(graph: Graph) -> Self {
        Self {
            graph: Mutex::new(graph),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Run `f` with exclusive access to the graph
    fn with_graph<R>(&self, f: impl FnOnce(&mut Graph) -> R) -> R {
        let _op = InFlight::enter(&self.in_flight);
        let mut graph = self.graph.lock();
        f(&mut graph)
    }

    /// Run a read-only closure under the same exclusive lock
    pub fn read<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
        self.with_graph(|graph| f(graph))
    }

    /// Clone of the current graph
    pub fn snapshot(&self) -> Graph {
        self.read(Graph::clone)
    }

    pub fn num_vertices(&self) -> usize {
        self.read(Graph::num_vertices)
    }

    /// Replace the graph with `num_vertices` isolated vertices
    ///
    /// On failure the previous graph stays in place.
    pub fn reset_graph(&self, num_vertices: usize) -> GraphResult<()> {
        self.with_graph(|graph| graph.reset_graph(num_vertices))?;
        info!("Graph reset with {} vertices", num_vertices);
        Ok(())
    }

    /// Add `{u, v}`; returns `Ok(false)` if the pair was already connected
    pub fn add_edge(&self, u: VertexId, v: VertexId, weight: Weight) -> GraphResult<bool> {
        let added = self.with_graph(|graph| {
            check_vertices(graph, u, v)?;
            Ok(graph.add_edge(u, v, weight))
        })?;

        if added {
            debug!("Added edge {} <-> {} [{}]", u, v, weight);
        } else {
            debug!("Edge {} <-> {} already present, ignored", u, v);
        }
        Ok(added)
    }

    /// Remove `{u, v}`; returns `Ok(false)` if there was no such edge
    pub fn remove_edge(&self, u: VertexId, v: VertexId) -> GraphResult<bool> {
        let removed = self.with_graph(|graph| {
            check_vertices(graph, u, v)?;
            Ok(graph.remove_edge(u, v))
        })?;

        debug!("Remove edge {} <-> {}: {}", u, v, if removed { "removed" } else { "absent" });
        Ok(removed)
    }

    /// Compute the MST while holding the lock for the whole run
    pub fn solve(&self, kind: SolverKind) -> GraphResult<Vec<Edge>> {
        let solver = create_solver(kind);
        let started = Instant::now();
        let mst = self.with_graph(|graph| solver.solve(graph))?;
        info!("{} produced {} MST edges in {:?}", kind, mst.len(), started.elapsed());
        Ok(mst)
    }

    /// Compute the MST under the lock, then build the report after releasing it
    pub fn solve_and_format(&self, kind: SolverKind) -> GraphResult<MstReport> {
        let mst = self.solve(kind)?;
        Ok(MstReport::new(kind, mst))
    }

    /// Operations currently holding or waiting for the graph lock
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight() == 0
    }
}

fn check_vertices(graph: &Graph, u: VertexId, v: VertexId) -> GraphResult<()> {
    for vertex in [u, v] {
        if !graph.contains_vertex(vertex) {
            return Err(GraphError::VertexOutOfRange {
                vertex,
                num_vertices: graph.num_vertices(),
            });
        }
    }
    Ok(())
}
