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

//! TCP front end for the shared graph
//!
//! Each accepted connection gets its own [`Session`] task. All sessions share
//! one [`SharedGraphCoordinator`] and one [`TaskExecutor`]. The accept loop
//! also evaluates the idle policy: once nobody is connected, no work is
//! queued or running, and the idle timeout has elapsed since the last
//! connection opened or closed, the server stops.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use mstgraph_core::{SharedGraphCoordinator, TaskExecutor};
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::session::Session;

/// Stops a running [`MstServer`] from another task
#[derive(Debug, Clone)]
pub struct ShutdownHandle(Arc<Notify>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.0.notify_one();
    }
}

/// Tracks one open connection; closing it counts as activity
struct ConnectionGuard {
    connections: Arc<AtomicUsize>,
    last_activity: Arc<Mutex<Instant>>,
}

impl ConnectionGuard {
    fn open(connections: &Arc<AtomicUsize>, last_activity: &Arc<Mutex<Instant>>) -> Self {
        connections.fetch_add(1, Ordering::SeqCst);
        *last_activity.lock() = Instant::now();
        Self {
            connections: Arc::clone(connections),
            last_activity: Arc::clone(last_activity),
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        *self.last_activity.lock() = Instant::now();
        self.connections.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct MstServer {
    config: ServerConfig,
    listener: TcpListener,
    coordinator: Arc<SharedGraphCoordinator>,
    executor: Arc<TaskExecutor>,
    connections: Arc<AtomicUsize>,
    last_activity: Arc<Mutex<Instant>>,
    shutdown: Arc<Notify>,
}

impl MstServer {
    /// Bind the listener and start the worker pool
    pub async fn bind(config: ServerConfig) -> ServerResult<Self> {
        let listener = TcpListener::bind(config.bind.as_str()).await?;
        let executor = Arc::new(TaskExecutor::new(config.workers)?);

        info!("MST server listening on {} with {} workers", listener.local_addr()?, executor.worker_count());

        Ok(Self {
            config,
            listener,
            coordinator: Arc::new(SharedGraphCoordinator::default()),
            executor,
            connections: Arc::new(AtomicUsize::new(0)),
            last_activity: Arc::new(Mutex::new(Instant::now())),
            shutdown: Arc::new(Notify::new()),
        })
    }

    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn coordinator(&self) -> Arc<SharedGraphCoordinator> {
        Arc::clone(&self.coordinator)
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.shutdown))
    }

    pub fn active_connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Whether the idle policy would stop the server right now
    pub fn is_idle(&self) -> bool {
        let Some(timeout) = self.config.idle_timeout() else {
            return false;
        };
        self.active_connections() == 0 && !self.executor.has_active_tasks() && self.coordinator.is_idle() && self.last_activity.lock().elapsed() >= timeout
    }

    /// Accept connections until shut down or idle
    pub async fn run(self) -> ServerResult<()> {
        let mut idle_check = tokio::time::interval(self.config.poll_interval());
        idle_check.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown requested");
                    break;
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            error!("Failed to accept connection: {}", e);
                            continue;
                        }
                    };
                    self.spawn_session(stream, peer);
                }
                _ = idle_check.tick() => {
                    if self.is_idle() {
                        info!("No clients or work for {} ms, shutting down", self.config.idle_timeout_ms);
                        break;
                    }
                }
            }
        }

        let executor = Arc::clone(&self.executor);
        tokio::task::spawn_blocking(move || executor.shutdown()).await.map_err(|_| ServerError::TaskDropped)?;
        info!("MST server stopped");
        Ok(())
    }

    fn spawn_session(&self, stream: tokio::net::TcpStream, peer: SocketAddr) {
        let guard = ConnectionGuard::open(&self.connections, &self.last_activity);
        let session = Session::new(Arc::clone(&self.coordinator), Arc::clone(&self.executor), self.config.max_vertices);
        let max_line_bytes = self.config.max_line_bytes;
        info!("Client {} connected ({} active)", peer, self.active_connections());

        tokio::spawn(async move {
            let _guard = guard;
            match session.run(stream, max_line_bytes).await {
                Ok(()) => debug!("Client {} closed the connection", peer),
                Err(ServerError::LineTooLong(limit)) => warn!("Client {} sent a line over {} bytes, closing", peer, limit),
                Err(e) => error!("Connection with {} failed: {}", peer, e),
            }
            info!("Client {} disconnected", peer);
        });
    }
}
