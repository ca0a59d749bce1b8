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

//! Error types shared by the graph, the solvers and the coordinator

use crate::graph::VertexId;

/// Errors raised by graph operations, MST solvers and the task executor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Vertex {vertex} out of range (graph has {num_vertices} vertices)")]
    VertexOutOfRange { vertex: VertexId, num_vertices: usize },

    #[error("Edge {u} <-> {v} does not exist")]
    EdgeNotFound { u: VertexId, v: VertexId },

    #[error("Cannot allocate a graph with {num_vertices} vertices")]
    CapacityExceeded { num_vertices: usize },

    #[error("Task executor has been shut down")]
    ExecutorShutdown,

    #[error("Task failed: {0}")]
    TaskFailed(String),
}

/// Result type for graph operations
pub type GraphResult<T> = std::result::Result<T, GraphError>;
