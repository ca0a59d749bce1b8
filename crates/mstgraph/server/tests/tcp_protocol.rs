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

//! End-to-end tests over loopback TCP

use std::net::SocketAddr;
use std::time::Duration;

use mstgraph_server::{MstServer, ServerConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::task::JoinHandle;

const TIMEOUT: Duration = Duration::from_secs(10);

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, writer) = stream.into_split();
        Self {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    async fn send(&mut self, line: &str) {
        self.writer.write_all(format!("{line}\n").as_bytes()).await.unwrap();
    }

    async fn line(&mut self) -> String {
        tokio::time::timeout(TIMEOUT, self.lines.next_line()).await.unwrap().unwrap().expect("connection closed")
    }

    async fn request(&mut self, line: &str) -> String {
        self.send(line).await;
        self.line().await
    }

    /// Read a full MST report, up to and including its last metrics line
    async fn report(&mut self, command: &str) -> Vec<String> {
        self.send(command).await;
        let mut lines = Vec::new();
        loop {
            let line = self.line().await;
            let done = line.starts_with("Average distance:");
            lines.push(line);
            if done {
                return lines;
            }
        }
    }
}

async fn start(idle_timeout_ms: u64) -> (SocketAddr, mstgraph_server::ShutdownHandle, JoinHandle<()>) {
    let config = ServerConfig {
        bind: "127.0.0.1:0".to_string(),
        idle_timeout_ms,
        poll_interval_ms: 20,
        workers: 4,
        ..ServerConfig::default()
    };
    let server = MstServer::bind(config).await.unwrap();
    let addr = server.local_addr().unwrap();
    let shutdown = server.shutdown_handle();
    let handle = tokio::spawn(async move { server.run().await.unwrap() });
    (addr, shutdown, handle)
}

async fn load_sample_graph(client: &mut Client) {
    assert_eq!(client.request("Newgraph 5 6").await, "Graph created. Send 6 edges (u v weight).");
    for (edge, remaining) in ["0 1 2", "0 3 6", "1 2 3", "1 4 5", "2 4 7", "3 4 9"].into_iter().zip((0..6).rev()) {
        assert_eq!(client.request(edge).await, format!("Edge added. {remaining} edges remaining."));
    }
}

#[tokio::test]
async fn test_sample_session() {
    let (addr, shutdown, handle) = start(0).await;
    let mut client = Client::connect(addr).await;
    load_sample_graph(&mut client).await;

    let prim = client.report("Prim").await;
    assert_eq!(
        prim,
        vec![
            "Minimum Spanning Tree (Prim):",
            "0 <-> 1 (2)",
            "1 <-> 2 (3)",
            "1 <-> 4 (5)",
            "0 <-> 3 (6)",
            "Metrics:",
            "Total weight: 16",
            "Longest distance: 6",
            "Shortest distance: 2",
            "Average distance: 4.000000",
        ]
    );

    let boruvka = client.report("Boruvka").await;
    assert_eq!(boruvka[0], "Minimum Spanning Tree (Boruvka):");
    assert_eq!(boruvka.len(), prim.len());
    assert!(boruvka.contains(&"Total weight: 16".to_string()));

    assert_eq!(client.request("Removeedge 0 1").await, "Edge removed.");
    assert_eq!(client.request("Newedge 0 1 1").await, "Edge added.");
    assert!(client.report("Boruvka").await.contains(&"Total weight: 15".to_string()));

    shutdown.shutdown();
    tokio::time::timeout(TIMEOUT, handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_error_replies() {
    let (addr, shutdown, handle) = start(0).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(client.request("Newgraph 3 0").await, "Graph created. Send 0 edges (u v weight).");
    assert_eq!(client.request("Newedge 0 3 1").await, "Error: Vertex index out of bounds");
    assert_eq!(client.request("Newedge 0 1").await, "Error: Invalid Newedge command format");
    assert_eq!(client.request("Removeedge 0 2").await, "Edge not found.");
    assert_eq!(client.request("Kruskal").await, "Error: Unknown command");

    let report = client.report("Prim").await;
    assert_eq!(report[0], "Minimum Spanning Tree (Prim):");
    assert_eq!(report[2], "Total weight: 0");
    assert_eq!(report[3], "Longest distance: undefined");

    shutdown.shutdown();
    tokio::time::timeout(TIMEOUT, handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_clients_share_one_graph() {
    let (addr, shutdown, handle) = start(0).await;
    let mut builder = Client::connect(addr).await;
    let mut reader = Client::connect(addr).await;

    load_sample_graph(&mut builder).await;
    assert_eq!(reader.request("Newedge 1 0 4").await, "Edge already exists.");
    assert!(reader.report("Prim").await.contains(&"Total weight: 16".to_string()));

    // A new graph from one client replaces it for everybody
    assert_eq!(reader.request("Newgraph 2 1").await, "Graph created. Send 1 edges (u v weight).");
    assert_eq!(reader.request("0 1 7").await, "Edge added. 0 edges remaining.");
    assert!(builder.report("Boruvka").await.contains(&"Total weight: 7".to_string()));

    shutdown.shutdown();
    tokio::time::timeout(TIMEOUT, handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_concurrent_clients() {
    let (addr, shutdown, handle) = start(0).await;
    let mut setup = Client::connect(addr).await;
    assert_eq!(setup.request("Newgraph 32 0").await, "Graph created. Send 0 edges (u v weight).");

    let mut tasks = Vec::new();
    for worker in 0..4usize {
        tasks.push(tokio::spawn(async move {
            let mut client = Client::connect(addr).await;
            for v in (worker..31).step_by(4) {
                assert_eq!(client.request(&format!("Newedge {} {} {}", v, v + 1, v + 1)).await, "Edge added.");
                let report = client.report(if v % 2 == 0 { "Prim" } else { "Boruvka" }).await;
                assert!(report.last().unwrap().starts_with("Average distance:"));
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let report = setup.report("Prim").await;
    assert!(report.contains(&format!("Total weight: {}", (1..=31).sum::<i64>())));

    shutdown.shutdown();
    tokio::time::timeout(TIMEOUT, handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_idle_shutdown_waits_for_clients() {
    let (addr, _shutdown, handle) = start(100).await;

    let mut client = Client::connect(addr).await;
    assert_eq!(client.request("Newgraph 2 0").await, "Graph created. Send 0 edges (u v weight).");
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!handle.is_finished());
    assert_eq!(client.request("Newedge 0 1 1").await, "Edge added.");

    drop(client);
    tokio::time::timeout(TIMEOUT, handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_overlong_line_closes_connection() {
    let (addr, shutdown, handle) = start(0).await;
    let mut client = Client::connect(addr).await;

    client.send(&"9".repeat(4096)).await;
    let next = tokio::time::timeout(TIMEOUT, client.lines.next_line()).await.unwrap();
    assert!(matches!(next, Ok(None) | Err(_)));

    shutdown.shutdown();
    tokio::time::timeout(TIMEOUT, handle).await.unwrap().unwrap();
}
