//! Classroom proximity edges.
//!
//! A proximity edge states how close one classroom is to another, as a
//! normalized distance score in `[0, 1)` (0 = adjacent). Edges are
//! directional; `A → B` does not imply `B → A`.

use serde::{Deserialize, Serialize};

/// Distance step between consecutive ranks in a neighbour list.
const RANK_STEP: f64 = 0.1;
/// Largest distance assigned from a ranked list.
const MAX_RANKED_DISTANCE: f64 = 0.9;

/// A directed room-to-room proximity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityEdge {
    /// Source classroom ID.
    pub from: String,
    /// Target classroom ID.
    pub to: String,
    /// Normalized distance in `[0, 1)`; lower is closer.
    pub distance: f64,
    /// Whether the rooms are physically adjacent.
    pub is_adjacent: bool,
}

impl ProximityEdge {
    /// Creates an edge. Adjacency is inferred for distances ≤ 0.1.
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
            is_adjacent: distance <= RANK_STEP,
        }
    }

    /// Overrides the adjacency flag.
    pub fn with_adjacent(mut self, is_adjacent: bool) -> Self {
        self.is_adjacent = is_adjacent;
        self
    }

    /// Derives edges from a ranked neighbour list.
    ///
    /// The k-th neighbour (1-based) gets distance `min(0.1·k, 0.9)`; the
    /// first neighbour is adjacent. Self references and repeated names are
    /// skipped. Only `room → neighbour` edges are produced; the reverse
    /// direction comes from the neighbour's own list.
    ///
    /// # Example
    /// ```
    /// use exam_schedule::models::ProximityEdge;
    ///
    /// let edges = ProximityEdge::from_ranked_neighbours("A", &["B", "C"]);
    /// assert_eq!(edges.len(), 2);
    /// assert!(edges[0].is_adjacent);
    /// assert!((edges[1].distance - 0.2).abs() < 1e-9);
    /// ```
    pub fn from_ranked_neighbours<S: AsRef<str>>(room: &str, neighbours: &[S]) -> Vec<Self> {
        let mut edges: Vec<Self> = Vec::with_capacity(neighbours.len());
        for (rank, name) in neighbours.iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() || name == room || edges.iter().any(|e| e.to == name) {
                continue;
            }
            let raw = (rank as f64 + 1.0) * RANK_STEP;
            edges.push(Self {
                from: room.to_string(),
                to: name.to_string(),
                distance: raw.min(MAX_RANKED_DISTANCE),
                is_adjacent: raw <= RANK_STEP,
            });
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_adjacency_inferred() {
        assert!(ProximityEdge::new("A", "B", 0.0).is_adjacent);
        assert!(ProximityEdge::new("A", "B", 0.1).is_adjacent);
        assert!(!ProximityEdge::new("A", "B", 0.5).is_adjacent);
        assert!(ProximityEdge::new("A", "B", 0.5).with_adjacent(true).is_adjacent);
    }

    #[test]
    fn test_ranked_neighbours_capped() {
        let names: Vec<String> = (0..12).map(|i| format!("N{i}")).collect();
        let edges = ProximityEdge::from_ranked_neighbours("A", &names);
        assert_eq!(edges.len(), 12);
        assert!((edges[0].distance - 0.1).abs() < 1e-9);
        assert!((edges[8].distance - 0.9).abs() < 1e-9);
        assert!((edges[11].distance - 0.9).abs() < 1e-9);
        assert!(edges.iter().skip(1).all(|e| !e.is_adjacent));
    }

    #[test]
    fn test_ranked_neighbours_skip_self_and_blank() {
        let edges = ProximityEdge::from_ranked_neighbours("A", &["A", " ", "B", "B"]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].to, "B");
        // Rank is positional: B is third in the list.
        assert!((edges[0].distance - 0.3).abs() < 1e-9);
        assert!(!edges[0].is_adjacent);
    }
}
