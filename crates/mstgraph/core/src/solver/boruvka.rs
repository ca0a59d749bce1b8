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

//! Boruvka's MST algorithm
//!
//! Each round scans every edge once and records, for every component, the
//! cheapest edge leaving it. All recorded edges are then merged in component
//! order. Ties keep the first edge met in `Graph::get_edges` order.

use tracing::trace;

use super::{MstSolver, SolverKind};
use crate::error::GraphResult;
use crate::graph::{Edge, Graph, VertexId};

/// Disjoint-set forest with union by rank and path compression
#[derive(Debug)]
pub(crate) struct UnionFind {
    parent: Vec<VertexId>,
    rank: Vec<u32>,
}

impl UnionFind {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub(crate) fn find(&mut self, vertex: VertexId) -> VertexId {
        let mut root = vertex;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Path compression
        let mut current = vertex;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merge the sets holding `a` and `b`; returns false if already merged
    pub(crate) fn union(&mut self, a: VertexId, b: VertexId) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        if self.rank[root_a] < self.rank[root_b] {
            self.parent[root_a] = root_b;
        } else if self.rank[root_a] > self.rank[root_b] {
            self.parent[root_b] = root_a;
        } else {
            self.parent[root_b] = root_a;
            self.rank[root_a] += 1;
        }
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BoruvkaSolver;

impl BoruvkaSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MstSolver for BoruvkaSolver {
    fn kind(&self) -> SolverKind {
        SolverKind::Boruvka
    }

    fn solve(&self, graph: &Graph) -> GraphResult<Vec<Edge>> {
        if !graph.is_connected() {
            return Ok(Vec::new());
        }

        let num_vertices = graph.num_vertices();
        let edges = graph.get_edges();
        let mut components = UnionFind::new(num_vertices);
        let mut component_count = num_vertices;
        let mut mst = Vec::with_capacity(num_vertices.saturating_sub(1));
        let mut round = 0;

        while component_count > 1 {
            round += 1;
            let mut cheapest: Vec<Option<Edge>> = vec![None; num_vertices];

            for edge in &edges {
                let set_u = components.find(edge.u);
                let set_v = components.find(edge.v);
                if set_u == set_v {
                    continue;
                }

                for set in [set_u, set_v] {
                    if cheapest[set].is_none_or(|current| edge.weight < current.weight) {
                        cheapest[set] = Some(*edge);
                    }
                }
            }

            let mut merged = 0;
            for edge in cheapest.into_iter().flatten() {
                // An earlier merge in this round may already have joined both ends
                if components.union(edge.u, edge.v) {
                    mst.push(edge);
                    component_count -= 1;
                    merged += 1;
                }
            }

            trace!("Boruvka round {} merged {} components, {} remaining", round, merged, component_count);
            if merged == 0 {
                break;
            }
        }

        Ok(mst)
    }
}
