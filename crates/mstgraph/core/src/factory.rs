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

//! Solver construction from an algorithm selector

use tracing::warn;

use crate::solver::{BoruvkaSolver, MstSolver, PrimSolver, SolverKind};

/// Build the solver for `kind`
pub fn create_solver(kind: SolverKind) -> Box<dyn MstSolver> {
    match kind {
        SolverKind::Boruvka => Box::new(BoruvkaSolver::new()),
        SolverKind::Prim => Box::new(PrimSolver::new()),
    }
}

/// Build a solver from its name; unknown names are logged and yield `None`
pub fn create_solver_by_name(name: &str) -> Option<Box<dyn MstSolver>> {
    match name.parse::<SolverKind>() {
        Ok(kind) => Some(create_solver(kind)),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}
