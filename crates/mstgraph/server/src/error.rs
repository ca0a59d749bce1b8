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

//! Error handling for the MST server
//!
//! These errors end a connection or the server itself. Problems with a
//! single command are answered on the connection instead, see
//! [`ProtocolError`](crate::protocol::ProtocolError).

use mstgraph_core::GraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Command task was dropped before completing")]
    TaskDropped,

    #[error("Line exceeds {0} bytes")]
    LineTooLong(usize),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;
