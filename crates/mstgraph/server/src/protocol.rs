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

//! Text command protocol
//!
//! One whitespace-separated message per line:
//!
//! ```text
//! Newgraph <vertices> <edgeCount>   followed by <edgeCount> lines "<u> <v> <weight>"
//! Newedge <u> <v> <weight>
//! Removeedge <u> <v>
//! Boruvka | Prim
//! ```
//!
//! Keywords are case-insensitive. Vertex ids are parsed as signed integers so
//! that negative ids can be reported as out of range rather than malformed.

use std::str::{FromStr, SplitWhitespace};

use mstgraph_core::{SolverKind, VertexId, Weight};
use thiserror::Error;

/// A vertex id exactly as the client sent it
pub type RawVertex = i64;

/// Convert a raw id to a vertex index; negative ids have none
pub fn vertex_index(raw: RawVertex) -> Option<VertexId> {
    VertexId::try_from(raw).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewGraph { vertices: usize, edges: usize },
    NewEdge { u: RawVertex, v: RawVertex, weight: Weight },
    RemoveEdge { u: RawVertex, v: RawVertex },
    Mst(SolverKind),
}

/// A single `<u> <v> <weight>` line of a bulk load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLine {
    pub u: RawVertex,
    pub v: RawVertex,
    pub weight: Weight,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command")]
    UnknownCommand(String),

    #[error("Invalid {command} command format")]
    InvalidFormat { command: &'static str },

    #[error("Invalid edge format (expected: u v weight)")]
    InvalidEdge,

    #[error("Vertex count {requested} exceeds the limit of {limit}")]
    TooManyVertices { requested: usize, limit: usize },
}

fn next_number<T: FromStr>(tokens: &mut SplitWhitespace<'_>) -> Option<T> {
    tokens.next()?.parse().ok()
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or(ProtocolError::Empty)?;

        if keyword.eq_ignore_ascii_case("Newgraph") {
            let invalid = ProtocolError::InvalidFormat { command: "Newgraph" };
            let vertices = next_number(&mut tokens).ok_or(invalid.clone())?;
            let edges = next_number(&mut tokens).ok_or(invalid)?;
            Ok(Command::NewGraph { vertices, edges })
        } else if keyword.eq_ignore_ascii_case("Newedge") {
            let edge = parse_edge(&mut tokens).ok_or(ProtocolError::InvalidFormat { command: "Newedge" })?;
            Ok(Command::NewEdge {
                u: edge.u,
                v: edge.v,
                weight: edge.weight,
            })
        } else if keyword.eq_ignore_ascii_case("Removeedge") {
            let invalid = ProtocolError::InvalidFormat { command: "Removeedge" };
            let u = next_number(&mut tokens).ok_or(invalid.clone())?;
            let v = next_number(&mut tokens).ok_or(invalid)?;
            Ok(Command::RemoveEdge { u, v })
        } else if let Ok(kind) = keyword.parse::<SolverKind>() {
            Ok(Command::Mst(kind))
        } else {
            Err(ProtocolError::UnknownCommand(keyword.to_string()))
        }
    }
}

impl EdgeLine {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        parse_edge(&mut line.split_whitespace()).ok_or(ProtocolError::InvalidEdge)
    }
}

fn parse_edge(tokens: &mut SplitWhitespace<'_>) -> Option<EdgeLine> {
    Some(EdgeLine {
        u: next_number(tokens)?,
        v: next_number(tokens)?,
        weight: next_number(tokens)?,
    })
}

/// Fixed response texts
pub mod reply {
    pub const EDGE_ADDED: &str = "Edge added.\n";
    pub const EDGE_EXISTS: &str = "Edge already exists.\n";
    pub const EDGE_REMOVED: &str = "Edge removed.\n";
    pub const EDGE_NOT_FOUND: &str = "Edge not found.\n";
    pub const OUT_OF_BOUNDS: &str = "Error: Vertex index out of bounds\n";

    pub fn graph_created(edges: usize) -> String {
        format!("Graph created. Send {edges} edges (u v weight).\n")
    }

    pub fn bulk_edge_added(remaining: usize) -> String {
        format!("Edge added. {remaining} edges remaining.\n")
    }

    pub fn error(message: impl std::fmt::Display) -> String {
        format!("Error: {message}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("Newgraph 5 6"), Ok(Command::NewGraph { vertices: 5, edges: 6 }));
        assert_eq!(Command::parse("  newedge 1 2 -3 "), Ok(Command::NewEdge { u: 1, v: 2, weight: -3 }));
        assert_eq!(Command::parse("Removeedge 4 0"), Ok(Command::RemoveEdge { u: 4, v: 0 }));
        assert_eq!(Command::parse("Boruvka"), Ok(Command::Mst(SolverKind::Boruvka)));
        assert_eq!(Command::parse("PRIM"), Ok(Command::Mst(SolverKind::Prim)));
    }

    #[test]
    fn test_parse_negative_vertex_is_not_a_format_error() {
        assert_eq!(Command::parse("Newedge -1 2 3"), Ok(Command::NewEdge { u: -1, v: 2, weight: 3 }));
        assert_eq!(vertex_index(-1), None);
        assert_eq!(vertex_index(7), Some(7));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("   "), Err(ProtocolError::Empty));
        assert_eq!(Command::parse("Kruskal"), Err(ProtocolError::UnknownCommand("Kruskal".to_string())));
        assert_eq!(Command::parse("Newgraph 5"), Err(ProtocolError::InvalidFormat { command: "Newgraph" }));
        assert_eq!(Command::parse("Newgraph -5 2"), Err(ProtocolError::InvalidFormat { command: "Newgraph" }));
        assert_eq!(Command::parse("Newedge 1 x 3"), Err(ProtocolError::InvalidFormat { command: "Newedge" }));
        assert_eq!(Command::parse("Removeedge 1"), Err(ProtocolError::InvalidFormat { command: "Removeedge" }));
    }

    #[test]
    fn test_parse_edge_line() {
        assert_eq!(EdgeLine::parse("0 1 2"), Ok(EdgeLine { u: 0, v: 1, weight: 2 }));
        assert_eq!(EdgeLine::parse("0 1"), Err(ProtocolError::InvalidEdge));
        assert_eq!(EdgeLine::parse("Prim"), Err(ProtocolError::InvalidEdge));
    }

    #[test]
    fn test_error_replies() {
        assert_eq!(reply::error(ProtocolError::UnknownCommand("x".into())), "Error: Unknown command\n");
        assert_eq!(reply::error(ProtocolError::InvalidFormat { command: "Newedge" }), "Error: Invalid Newedge command format\n");
        assert_eq!(
            reply::error(ProtocolError::TooManyVertices { requested: 10, limit: 4 }),
            "Error: Vertex count 10 exceeds the limit of 4\n"
        );
        assert_eq!(reply::graph_created(3), "Graph created. Send 3 edges (u v weight).\n");
        assert_eq!(reply::bulk_edge_added(0), "Edge added. 0 edges remaining.\n");
    }
}
