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

//! Prim's MST algorithm
//!
//! Grows a single tree from vertex 0. The frontier is a min-heap of
//! `(weight, vertex, parent)` entries; decrease-key is emulated by pushing a
//! fresh entry and skipping stale ones when they surface.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{MstSolver, SolverKind};
use crate::error::GraphResult;
use crate::graph::{Edge, Graph, VertexId, Weight};

const START_VERTEX: VertexId = 0;

#[derive(Debug, Default, Clone, Copy)]
pub struct PrimSolver;

impl PrimSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MstSolver for PrimSolver {
    fn kind(&self) -> SolverKind {
        SolverKind::Prim
    }

    fn solve(&self, graph: &Graph) -> GraphResult<Vec<Edge>> {
        if !graph.is_connected() || graph.num_vertices() == 0 {
            return Ok(Vec::new());
        }

        let num_vertices = graph.num_vertices();
        let mut best: Vec<Option<Weight>> = vec![None; num_vertices];
        let mut finalized = vec![false; num_vertices];
        let mut mst = Vec::with_capacity(num_vertices - 1);

        let mut frontier: BinaryHeap<Reverse<(Weight, VertexId, Option<VertexId>)>> = BinaryHeap::new();
        best[START_VERTEX] = Some(0);
        frontier.push(Reverse((0, START_VERTEX, None)));

        while let Some(Reverse((_, vertex, parent))) = frontier.pop() {
            if finalized[vertex] {
                continue;
            }
            finalized[vertex] = true;

            if let Some(parent) = parent {
                mst.push(graph.get_edge(parent, vertex)?);
            }

            for edge in graph.adjacency(vertex) {
                let neighbor = edge.v;
                if finalized[neighbor] {
                    continue;
                }
                if best[neighbor].is_none_or(|known| edge.weight < known) {
                    // The previous entry for `neighbor` stays in the heap and is skipped once finalized
                    best[neighbor] = Some(edge.weight);
                    frontier.push(Reverse((edge.weight, neighbor, Some(vertex))));
                }
            }
        }

        Ok(mst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prim_sample_graph() {
        let mut graph = Graph::new(5);
        graph.add_edge(0, 1, 2);
        graph.add_edge(0, 3, 6);
        graph.add_edge(1, 2, 3);
        graph.add_edge(1, 4, 5);
        graph.add_edge(2, 4, 7);
        graph.add_edge(3, 4, 9);

        let mst = PrimSolver::new().solve(&graph).unwrap();
        assert_eq!(mst, vec![Edge::new(0, 1, 2), Edge::new(1, 2, 3), Edge::new(1, 4, 5), Edge::new(0, 3, 6)]);
    }

    #[test]
    fn test_prim_edges_are_oriented_parent_to_child() {
        let mut graph = Graph::new(3);
        graph.add_edge(2, 0, 4);
        graph.add_edge(1, 2, 1);

        let mst = PrimSolver::new().solve(&graph).unwrap();
        assert_eq!(mst.len(), 2);
        assert_eq!((mst[0].u, mst[0].v), (0, 2));
        assert_eq!((mst[1].u, mst[1].v), (2, 1));
    }

    #[test]
    fn test_prim_decrease_key_replaces_parent() {
        // 0-2 is seen first with weight 10, then improved through 1
        let mut graph = Graph::new(3);
        graph.add_edge(0, 2, 10);
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 2);

        let mst = PrimSolver::new().solve(&graph).unwrap();
        assert_eq!(mst, vec![Edge::new(0, 1, 1), Edge::new(1, 2, 2)]);
    }

    #[test]
    fn test_prim_negative_weights() {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 1, -5);
        graph.add_edge(1, 2, 3);
        graph.add_edge(0, 2, -1);

        let mst = PrimSolver::new().solve(&graph).unwrap();
        assert_eq!(mst, vec![Edge::new(0, 1, -5), Edge::new(0, 2, -1)]);
    }

    #[test]
    fn test_prim_disconnected_and_trivial() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1, 10);
        graph.add_edge(2, 3, 4);
        assert!(PrimSolver::new().solve(&graph).unwrap().is_empty());
        assert!(PrimSolver::new().solve(&Graph::new(0)).unwrap().is_empty());
        assert!(PrimSolver::new().solve(&Graph::new(1)).unwrap().is_empty());
    }
}
