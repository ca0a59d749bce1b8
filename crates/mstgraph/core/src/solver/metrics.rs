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

//! Metrics over an already computed MST edge sequence
//!
//! An empty MST has a total weight of zero; the longest, shortest and
//! average distances are undefined for it and reported as `None`.

use std::fmt;

use crate::graph::{Edge, TotalWeight, Weight};

/// Sum of all edge weights
pub fn total_weight(mst: &[Edge]) -> TotalWeight {
    mst.iter().map(|edge| TotalWeight::from(edge.weight)).sum()
}

/// Heaviest edge weight
pub fn longest_distance(mst: &[Edge]) -> Option<Weight> {
    mst.iter().map(|edge| edge.weight).max()
}

/// Lightest edge weight
pub fn shortest_distance(mst: &[Edge]) -> Option<Weight> {
    if mst.is_empty() {
        return None;
    }
    Some(mst.iter().fold(Weight::MAX, |shortest, edge| shortest.min(edge.weight)))
}

/// Mean edge weight
pub fn average_distance(mst: &[Edge]) -> Option<f64> {
    if mst.is_empty() {
        return None;
    }
    Some(total_weight(mst) as f64 / mst.len() as f64)
}

/// All four metrics of one MST
#[derive(Debug, Clone, PartialEq)]
pub struct MstMetrics {
    pub total_weight: TotalWeight,
    pub longest: Option<Weight>,
    pub shortest: Option<Weight>,
    pub average: Option<f64>,
    pub edge_count: usize,
}

impl MstMetrics {
    pub fn from_edges(mst: &[Edge]) -> Self {
        Self {
            total_weight: total_weight(mst),
            longest: longest_distance(mst),
            shortest: shortest_distance(mst),
            average: average_distance(mst),
            edge_count: mst.len(),
        }
    }
}

struct Undefined<T>(Option<T>);

impl fmt::Display for Undefined<Weight> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("undefined"),
        }
    }
}

impl fmt::Display for Undefined<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value:.6}"),
            None => f.write_str("undefined"),
        }
    }
}

impl fmt::Display for MstMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metrics:")?;
        writeln!(f, "Total weight: {}", self.total_weight)?;
        writeln!(f, "Longest distance: {}", Undefined(self.longest))?;
        writeln!(f, "Shortest distance: {}", Undefined(self.shortest))?;
        writeln!(f, "Average distance: {}", Undefined(self.average))
    }
}
