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

//! Per-connection command handling
//!
//! A session reads one line at a time, executes it against the shared
//! coordinator and writes the reply before reading the next line. Graph work
//! runs on the task executor so the async runtime never waits on the graph
//! lock.
//!
//! After `Newgraph <n> <k>` the session is in bulk mode: the next lines are
//! edges until `k` of them have been accepted. Rejected or malformed edge
//! lines do not count towards `k`.

use std::sync::Arc;

use mstgraph_core::{GraphError, SharedGraphCoordinator, SolverKind, TaskExecutor};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::error::{ServerError, ServerResult};
use crate::protocol::{Command, EdgeLine, ProtocolError, RawVertex, reply, vertex_index};

pub struct Session {
    coordinator: Arc<SharedGraphCoordinator>,
    executor: Arc<TaskExecutor>,
    max_vertices: usize,
    pending_edges: usize,
}

impl Session {
    pub fn new(coordinator: Arc<SharedGraphCoordinator>, executor: Arc<TaskExecutor>, max_vertices: usize) -> Self {
        Self {
            coordinator,
            executor,
            max_vertices,
            pending_edges: 0,
        }
    }

    /// Edges still expected by the current bulk load
    pub fn pending_edges(&self) -> usize {
        self.pending_edges
    }

    /// Serve one connection until the peer closes it
    pub async fn run<S>(mut self, stream: S, max_line_bytes: usize) -> ServerResult<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (read_half, mut writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(read_half);
        let mut buffer = Vec::with_capacity(128);

        loop {
            buffer.clear();
            let limit = max_line_bytes as u64 + 1;
            let read = (&mut reader).take(limit).read_until(b'\n', &mut buffer).await?;
            if read == 0 {
                return Ok(());
            }
            if buffer.last() != Some(&b'\n') && buffer.len() > max_line_bytes {
                return Err(ServerError::LineTooLong(max_line_bytes));
            }

            let line = String::from_utf8_lossy(&buffer);
            if let Some(response) = self.handle_line(&line).await? {
                writer.write_all(response.as_bytes()).await?;
                writer.flush().await?;
            }
        }
    }

    /// Execute one protocol line and produce its reply, if any
    pub async fn handle_line(&mut self, line: &str) -> ServerResult<Option<String>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if self.pending_edges > 0 {
            return self.handle_bulk_edge(line).await.map(Some);
        }

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                warn!("Rejected command {:?}: {}", line, e);
                return Ok(Some(reply::error(e)));
            }
        };

        let response = match command {
            Command::NewGraph { vertices, .. } if vertices > self.max_vertices => {
                let e = ProtocolError::TooManyVertices {
                    requested: vertices,
                    limit: self.max_vertices,
                };
                warn!("Rejected Newgraph: {}", e);
                reply::error(e)
            }
            Command::NewGraph { vertices, edges } => {
                if let Err(e) = self.execute(move |coordinator| coordinator.reset_graph(vertices)).await? {
                    error!("Newgraph failed: {}", e);
                    return Ok(Some(reply::error(e)));
                }
                self.pending_edges = edges;
                info!("Graph created with {} vertices, waiting for {} edges", vertices, edges);
                reply::graph_created(edges)
            }
            Command::NewEdge { u, v, weight } => match self.add_edge(u, v, weight).await? {
                Ok(true) => reply::EDGE_ADDED.to_string(),
                Ok(false) => reply::EDGE_EXISTS.to_string(),
                Err(response) => response,
            },
            Command::RemoveEdge { u, v } => match self.remove_edge(u, v).await? {
                Ok(true) => reply::EDGE_REMOVED.to_string(),
                Ok(false) => reply::EDGE_NOT_FOUND.to_string(),
                Err(response) => response,
            },
            Command::Mst(kind) => self.solve(kind).await?,
        };

        Ok(Some(response))
    }

    async fn handle_bulk_edge(&mut self, line: &str) -> ServerResult<String> {
        let edge = match EdgeLine::parse(line) {
            Ok(edge) => edge,
            Err(e) => {
                warn!("Rejected bulk edge {:?}: {}", line, e);
                return Ok(reply::error(e));
            }
        };

        match self.add_edge(edge.u, edge.v, edge.weight).await? {
            Ok(_) => {
                self.pending_edges -= 1;
                debug!("{} edges remaining in bulk load", self.pending_edges);
                Ok(reply::bulk_edge_added(self.pending_edges))
            }
            Err(response) => Ok(response),
        }
    }

    /// Outer error ends the connection; inner error is the reply for the client
    async fn add_edge(&self, u: RawVertex, v: RawVertex, weight: i64) -> ServerResult<Result<bool, String>> {
        let (Some(u), Some(v)) = (vertex_index(u), vertex_index(v)) else {
            warn!("Vertex index out of bounds: {} <-> {}", u, v);
            return Ok(Err(reply::OUT_OF_BOUNDS.to_string()));
        };
        let result = self.execute(move |coordinator| coordinator.add_edge(u, v, weight)).await?;
        Ok(graph_reply(result))
    }

    async fn remove_edge(&self, u: RawVertex, v: RawVertex) -> ServerResult<Result<bool, String>> {
        let (Some(u), Some(v)) = (vertex_index(u), vertex_index(v)) else {
            warn!("Vertex index out of bounds: {} <-> {}", u, v);
            return Ok(Err(reply::OUT_OF_BOUNDS.to_string()));
        };
        let result = self.execute(move |coordinator| coordinator.remove_edge(u, v)).await?;
        Ok(graph_reply(result))
    }

    async fn solve(&self, kind: SolverKind) -> ServerResult<String> {
        match self.execute(move |coordinator| coordinator.solve_and_format(kind)).await? {
            Ok(report) => Ok(report.to_string()),
            Err(e) => {
                error!("{} failed: {}", kind, e);
                Ok(reply::error(e))
            }
        }
    }

    /// Run `op` on the executor and wait for its result
    async fn execute<T, F>(&self, op: F) -> ServerResult<T>
    where
        F: FnOnce(&SharedGraphCoordinator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let coordinator = Arc::clone(&self.coordinator);
        self.executor.submit(move || {
            // The receiver is gone only if the connection task was cancelled
            let _ = tx.send(op(&coordinator));
        })?;
        rx.await.map_err(|_| ServerError::TaskDropped)
    }
}

fn graph_reply(result: Result<bool, GraphError>) -> Result<bool, String> {
    result.map_err(|e| match e {
        GraphError::VertexOutOfRange { vertex, num_vertices } => {
            warn!("Vertex {} out of bounds for graph of {} vertices", vertex, num_vertices);
            reply::OUT_OF_BOUNDS.to_string()
        }
        other => {
            error!("Graph operation failed: {}", other);
            reply::error(other)
        }
    })
}
