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

//! # MST Graph Server
//!
//! Serves a single shared weighted graph over a line-based TCP protocol.
//! Clients build the graph with `Newgraph`, `Newedge` and `Removeedge` and
//! ask for its minimum spanning tree with `Boruvka` or `Prim`.

pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod session;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use protocol::{Command, EdgeLine, ProtocolError};
pub use server::{MstServer, ShutdownHandle};
pub use session::Session;
