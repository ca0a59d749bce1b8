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

//! Configuration management for the MST server
//!
//! Every option is a command-line flag that falls back to an environment
//! variable and then to a built-in default.

use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:9034";
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3_000;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024;
pub const DEFAULT_MAX_VERTICES: usize = 1_000_000;

/// Configuration for the MST server
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "mstgraph")]
#[command(about = "MST Graph - shared graph server computing Minimum Spanning Trees")]
#[command(version = "0.1.0")]
pub struct ServerConfig {
    /// Address to bind the TCP listener to
    #[arg(long, env = "MSTGRAPH_BIND", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    /// Shut down after this many milliseconds without clients or work (0 disables)
    #[arg(long, env = "MSTGRAPH_IDLE_TIMEOUT_MS", default_value_t = DEFAULT_IDLE_TIMEOUT_MS)]
    pub idle_timeout_ms: u64,

    /// How often the idle policy is evaluated, in milliseconds
    #[arg(long, env = "MSTGRAPH_POLL_INTERVAL_MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,

    /// Worker threads executing graph commands
    #[arg(long, env = "MSTGRAPH_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Longest accepted protocol line in bytes
    #[arg(long, env = "MSTGRAPH_MAX_LINE_BYTES", default_value_t = DEFAULT_MAX_LINE_BYTES)]
    pub max_line_bytes: usize,

    /// Largest vertex count a client may request with Newgraph
    #[arg(long, env = "MSTGRAPH_MAX_VERTICES", default_value_t = DEFAULT_MAX_VERTICES)]
    pub max_vertices: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS.to_string(),
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            workers: DEFAULT_WORKERS,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            max_vertices: DEFAULT_MAX_VERTICES,
        }
    }
}

impl ServerConfig {
    /// Idle period before shutdown, `None` when the policy is disabled
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_ms > 0).then(|| Duration::from_millis(self.idle_timeout_ms))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}
