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

//! Weighted undirected graph
//!
//! Every logical edge `{u, v}` is stored twice, once in each endpoint's
//! adjacency list, and at most one edge may connect a given pair.

use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::error::{GraphError, GraphResult};

/// Dense zero-based vertex identifier
pub type VertexId = usize;

/// Edge weight. Negative weights are accepted as opaque values.
pub type Weight = i64;

/// Sum of edge weights; any number of `Weight`s adds up without overflow
pub type TotalWeight = i128;

/// An undirected weighted edge
///
/// `(u, v, w)` and `(v, u, w)` compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub u: VertexId,
    pub v: VertexId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(u: VertexId, v: VertexId, weight: Weight) -> Self {
        Self { u, v, weight }
    }

    /// Check whether `vertex` is one of the endpoints
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.u == vertex || self.v == vertex
    }

    /// The endpoint opposite to `vertex`, if `vertex` is an endpoint at all
    pub fn other(&self, vertex: VertexId) -> Option<VertexId> {
        if self.u == vertex {
            Some(self.v)
        } else if self.v == vertex {
            Some(self.u)
        } else {
            None
        }
    }

    fn ordered_endpoints(&self) -> (VertexId, VertexId) {
        if self.u <= self.v { (self.u, self.v) } else { (self.v, self.u) }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.ordered_endpoints() == other.ordered_endpoints()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered_endpoints().hash(state);
        self.weight.hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {} ({})", self.u, self.v, self.weight)
    }
}

/// Weighted undirected adjacency-list graph
///
/// Not internally synchronized; share it through
/// [`SharedGraphCoordinator`](crate::coordinator::SharedGraphCoordinator).
#[derive(Debug, Clone, Default)]
pub struct Graph {
    num_vertices: usize,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Create a graph with `num_vertices` isolated vertices
    pub fn new(num_vertices: usize) -> Self {
        debug!("Graph initialized with {} vertices", num_vertices);
        Self {
            num_vertices,
            adjacency: vec![Vec::new(); num_vertices],
        }
    }

    /// Drop every edge and reinitialize with a new vertex count
    ///
    /// If the adjacency lists cannot be allocated the graph is left unchanged.
    pub fn reset_graph(&mut self, num_vertices: usize) -> GraphResult<()> {
        let mut adjacency = Vec::new();
        adjacency
            .try_reserve_exact(num_vertices)
            .map_err(|_| GraphError::CapacityExceeded { num_vertices })?;
        adjacency.resize_with(num_vertices, Vec::new);

        self.adjacency = adjacency;
        self.num_vertices = num_vertices;
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of logical undirected edges
    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().flatten().filter(|edge| edge.v >= edge.u).count()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex < self.num_vertices
    }

    /// Insert the undirected edge `{u, v}`
    ///
    /// Out-of-range endpoints are ignored. If the pair is already connected the
    /// call is a no-op regardless of `weight`; existing weights are never updated.
    /// Returns whether an edge was inserted.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) -> bool {
        if !self.contains_vertex(u) || !self.contains_vertex(v) {
            return false;
        }
        if self.has_edge(u, v) {
            return false;
        }

        self.adjacency[u].push(Edge::new(u, v, weight));
        // A self-loop lives once in its only adjacency list
        if u != v {
            self.adjacency[v].push(Edge::new(v, u, weight));
        }
        true
    }

    /// Remove the edge `{u, v}` from both adjacency lists
    ///
    /// Absent edges and out-of-range endpoints are a no-op. Returns whether an
    /// edge was removed.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        if !self.contains_vertex(u) || !self.contains_vertex(v) {
            return false;
        }

        let before = self.adjacency[u].len();
        self.adjacency[u].retain(|edge| edge.v != v);
        let removed = self.adjacency[u].len() != before;
        if u != v {
            self.adjacency[v].retain(|edge| edge.v != u);
        }
        removed
    }

    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency.get(u).is_some_and(|edges| edges.iter().any(|edge| edge.v == v))
    }

    /// Flattened view of every adjacency list
    ///
    /// Each undirected edge appears twice, once per endpoint.
    pub fn get_edges(&self) -> Vec<Edge> {
        self.adjacency.iter().flatten().copied().collect()
    }

    /// Copy of `u`'s adjacency list; empty for an unknown vertex
    pub fn get_neighbors(&self, u: VertexId) -> Vec<Edge> {
        self.adjacency(u).to_vec()
    }

    /// The edge stored in `u`'s list whose far endpoint is `v`
    pub fn get_edge(&self, u: VertexId, v: VertexId) -> GraphResult<Edge> {
        self.adjacency(u).iter().find(|edge| edge.v == v).copied().ok_or(GraphError::EdgeNotFound { u, v })
    }

    /// Borrowed adjacency list used by the solvers
    pub(crate) fn adjacency(&self, u: VertexId) -> &[Edge] {
        self.adjacency.get(u).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether a traversal from vertex 0 reaches every vertex
    ///
    /// Uses an explicit stack so long chains cannot overflow the call stack.
    pub fn is_connected(&self) -> bool {
        if self.num_vertices == 0 {
            return true;
        }

        let mut visited = vec![false; self.num_vertices];
        let mut stack = vec![0];
        visited[0] = true;
        let mut reached = 1;

        while let Some(vertex) = stack.pop() {
            for edge in &self.adjacency[vertex] {
                if !visited[edge.v] {
                    visited[edge.v] = true;
                    reached += 1;
                    stack.push(edge.v);
                }
            }
        }

        reached == self.num_vertices
    }
}
