//! Per-room ranked neighbour lists.

use std::collections::HashMap;

use crate::models::ProximityEdge;

/// Nearest-first neighbour lists keyed by source room.
///
/// Built once per run. Lookups are directional: `distance(a, b)` only
/// consults `a`'s list. A pair missing from the index is still a legal
/// combination; it just earns no proximity bonus.
#[derive(Debug, Clone, Default)]
pub struct ProximityIndex {
    neighbours: HashMap<String, Vec<(String, f64)>>,
}

impl ProximityIndex {
    /// Groups edges by source room and sorts each list by distance.
    ///
    /// Equal distances keep their input order.
    pub fn new(edges: &[ProximityEdge]) -> Self {
        let mut neighbours: HashMap<String, Vec<(String, f64)>> = HashMap::new();
        for e in edges {
            neighbours
                .entry(e.from.clone())
                .or_default()
                .push((e.to.clone(), e.distance));
        }
        for list in neighbours.values_mut() {
            list.sort_by(|a, b| a.1.total_cmp(&b.1));
        }
        Self { neighbours }
    }

    /// Ranked neighbours of a room (empty if unknown).
    pub fn nearest(&self, room_id: &str) -> &[(String, f64)] {
        self.neighbours
            .get(room_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distance from `from` to `to`, if recorded.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        self.nearest(from)
            .iter()
            .find(|(id, _)| id == to)
            .map(|&(_, d)| d)
    }

    /// Proximity bonus for a pair: `(1 - distance) * weight`, or 0 if unknown.
    pub fn pair_bonus(&self, from: &str, to: &str, weight: f64) -> f64 {
        self.distance(from, to)
            .map(|d| (1.0 - d) * weight)
            .unwrap_or(0.0)
    }

    /// Number of rooms with at least one outgoing edge.
    pub fn room_count(&self) -> usize {
        self.neighbours.len()
    }
}
