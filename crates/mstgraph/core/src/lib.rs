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

//! MST Graph Core
//!
//! A shared weighted undirected graph and two Minimum Spanning Tree
//! algorithms over it.
//!
//! # Core Components
//!
//! ## Graph
//! - Adjacency lists with mirrored storage of every undirected edge
//! - At most one edge per vertex pair; re-adding a pair is a no-op
//!
//! ## Solvers
//! - Boruvka (union-find rounds) and Prim (heap-driven tree growth)
//! - Shared metrics: total, longest, shortest and average edge weight
//!
//! ## Concurrency
//! - [`SharedGraphCoordinator`] serializes all graph access behind one lock
//! - [`TaskExecutor`] runs CPU-heavy work on a bounded worker pool
//!
//! # Usage
//!
//! ```rust
//! use mstgraph_core::{SharedGraphCoordinator, SolverKind};
//!
//! let coordinator = SharedGraphCoordinator::new(3);
//! coordinator.add_edge(0, 1, 4).unwrap();
//! coordinator.add_edge(1, 2, 1).unwrap();
//! coordinator.add_edge(0, 2, 7).unwrap();
//!
//! let report = coordinator.solve_and_format(SolverKind::Prim).unwrap();
//! assert_eq!(report.metrics.total_weight, 5);
//! ```

pub mod coordinator;
pub mod error;
pub mod executor;
pub mod factory;
pub mod graph;
pub mod solver;

pub use coordinator::SharedGraphCoordinator;
pub use error::{GraphError, GraphResult};
pub use executor::TaskExecutor;
pub use factory::{create_solver, create_solver_by_name};
pub use graph::{Edge, Graph, TotalWeight, VertexId, Weight};
pub use solver::{BoruvkaSolver, MstMetrics, MstReport, MstSolver, PrimSolver, SolverKind, UnknownSolverError};
