//! Room-combination selection.
//!
//! # Algorithm
//!
//! 1. If the course asks for a room kind, restrict the pool to matching
//!    rooms; fall back to the full pool when none match.
//! 2. Single room: smallest capacity that seats everyone.
//! 3. Pair: minimize `waste - (1 - d) * 20` over all pairs that fit.
//! 4. Triple: minimize `waste - Σ (1 - d) * 10` over the three inner pairs.
//! 5. Greedy: largest rooms first until covered, proximity ignored.
//!
//! Each step is only tried when the previous one found nothing, so a
//! cheaper (N+1)-room combination never displaces a feasible N-room one.
//! Ties keep the first combination found in pool order.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ProximityIndex;
use crate::models::{Classroom, Course};

/// Proximity weight for a two-room exam.
pub const PAIR_PROXIMITY_WEIGHT: f64 = 20.0;
/// Proximity weight per inner pair of a three-room exam.
pub const TRIPLE_PROXIMITY_WEIGHT: f64 = 10.0;

/// Which step of the selector produced a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStrategy {
    /// One room seats everyone.
    Single,
    /// Best-scoring pair.
    Pair,
    /// Best-scoring triple.
    Triple,
    /// Largest-first greedy cover.
    Greedy,
}

/// A chosen set of rooms for one exam.
#[derive(Debug, Clone)]
pub struct RoomSelection<'r> {
    /// Rooms in selection order.
    pub rooms: Vec<&'r Classroom>,
    /// Seats offered minus seats required.
    pub wasted_seats: u64,
    /// Step that produced the selection.
    pub strategy: SelectionStrategy,
}

impl RoomSelection<'_> {
    /// Total seats offered.
    pub fn total_capacity(&self) -> u64 {
        seats(&self.rooms)
    }
}

/// Summed capacity, widened so large rooms cannot overflow.
fn seats(rooms: &[&Classroom]) -> u64 {
    rooms.iter().map(|r| u64::from(r.capacity)).sum()
}

/// Picks the room (or rooms) for a course from the currently free pool.
#[derive(Debug, Clone, Copy)]
pub struct RoomCombinationSelector<'a> {
    proximity: &'a ProximityIndex,
}

impl<'a> RoomCombinationSelector<'a> {
    /// Creates a selector scoring against a proximity index.
    pub fn new(proximity: &'a ProximityIndex) -> Self {
        Self { proximity }
    }

    /// Selects rooms for `course` from `free`.
    ///
    /// Returns `None` when even all free rooms together cannot seat the
    /// course.
    pub fn select<'r>(&self, course: &Course, free: &[&'r Classroom]) -> Option<RoomSelection<'r>> {
        let required = u64::from(course.student_count);
        let pool = Self::preferred_pool(course, free);

        let selection = Self::single(&pool, required)
            .or_else(|| self.pair(&pool, required))
            .or_else(|| self.triple(&pool, required))
            .or_else(|| Self::greedy(&pool, required))?;

        trace!(
            course = %course.id,
            strategy = ?selection.strategy,
            rooms = selection.rooms.len(),
            seats = selection.total_capacity(),
            wasted_seats = selection.wasted_seats,
            "room combination selected"
        );
        Some(selection)
    }

    /// Applies the soft room-kind preference.
    fn preferred_pool<'r>(course: &Course, free: &[&'r Classroom]) -> Vec<&'r Classroom> {
        if let Some(kind) = &course.required_room {
            let matching: Vec<&Classroom> = free
                .iter()
                .copied()
                .filter(|room| room.matches_kind(kind))
                .collect();
            if !matching.is_empty() {
                return matching;
            }
        }
        free.to_vec()
    }

    fn single<'r>(pool: &[&'r Classroom], required: u64) -> Option<RoomSelection<'r>> {
        pool.iter()
            .copied()
            .filter(|room| u64::from(room.capacity) >= required)
            .min_by_key(|room| room.capacity)
            .map(|room| RoomSelection {
                rooms: vec![room],
                wasted_seats: u64::from(room.capacity) - required,
                strategy: SelectionStrategy::Single,
            })
    }

    fn pair<'r>(&self, pool: &[&'r Classroom], required: u64) -> Option<RoomSelection<'r>> {
        let mut best: Option<(f64, [usize; 2])> = None;

        for i in 0..pool.len() {
            for j in (i + 1)..pool.len() {
                let total = seats(&[pool[i], pool[j]]);
                if total < required {
                    continue;
                }
                let waste = (total - required) as f64;
                let bonus =
                    self.proximity
                        .pair_bonus(&pool[i].id, &pool[j].id, PAIR_PROXIMITY_WEIGHT);
                let score = waste - bonus;
                if best.map_or(true, |(s, _)| score < s) {
                    best = Some((score, [i, j]));
                }
            }
        }

        best.map(|(_, idx)| Self::selection(pool, &idx, required, SelectionStrategy::Pair))
    }

    fn triple<'r>(&self, pool: &[&'r Classroom], required: u64) -> Option<RoomSelection<'r>> {
        let mut best: Option<(f64, [usize; 3])> = None;

        for i in 0..pool.len() {
            for j in (i + 1)..pool.len() {
                for k in (j + 1)..pool.len() {
                    let total = seats(&[pool[i], pool[j], pool[k]]);
                    if total < required {
                        continue;
                    }
                    let waste = (total - required) as f64;
                    let bonus = [(i, j), (i, k), (j, k)]
                        .iter()
                        .map(|&(a, b)| {
                            self.proximity.pair_bonus(
                                &pool[a].id,
                                &pool[b].id,
                                TRIPLE_PROXIMITY_WEIGHT,
                            )
                        })
                        .sum::<f64>();
                    let score = waste - bonus;
                    if best.map_or(true, |(s, _)| score < s) {
                        best = Some((score, [i, j, k]));
                    }
                }
            }
        }

        best.map(|(_, idx)| Self::selection(pool, &idx, required, SelectionStrategy::Triple))
    }

    fn greedy<'r>(pool: &[&'r Classroom], required: u64) -> Option<RoomSelection<'r>> {
        let mut by_capacity = pool.to_vec();
        by_capacity.sort_by(|a, b| b.capacity.cmp(&a.capacity));

        let mut rooms = Vec::new();
        let mut seated: u64 = 0;
        for room in by_capacity {
            if seated >= required {
                break;
            }
            seated += u64::from(room.capacity);
            rooms.push(room);
        }

        if rooms.is_empty() || seated < required {
            return None;
        }
        Some(RoomSelection {
            rooms,
            wasted_seats: seated - required,
            strategy: SelectionStrategy::Greedy,
        })
    }

    fn selection<'r>(
        pool: &[&'r Classroom],
        indices: &[usize],
        required: u64,
        strategy: SelectionStrategy,
    ) -> RoomSelection<'r> {
        let rooms: Vec<&Classroom> = indices.iter().map(|&i| pool[i]).collect();
        let wasted_seats = seats(&rooms) - required;
        RoomSelection {
            rooms,
            wasted_seats,
            strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProximityEdge, RoomKind};

    fn ids(selection: &RoomSelection<'_>) -> Vec<String> {
        selection.rooms.iter().map(|r| r.id.clone()).collect()
    }

    fn pick(course: &Course, rooms: &[Classroom], edges: &[ProximityEdge]) -> Option<Vec<String>> {
        let index = ProximityIndex::new(edges);
        let selector = RoomCombinationSelector::new(&index);
        let free: Vec<&Classroom> = rooms.iter().collect();
        selector.select(course, &free).map(|s| ids(&s))
    }

    #[test]
    fn test_single_room_smallest_fit() {
        let rooms = vec![
            Classroom::new("big", 200),
            Classroom::new("fit", 60),
            Classroom::new("small", 30),
        ];
        let course = Course::new("C1").with_students(50);
        assert_eq!(pick(&course, &rooms, &[]), Some(vec!["fit".to_string()]));
    }

    #[test]
    fn test_single_room_precedes_adjacent_pair() {
        // 50 + 45 are adjacent, but a single 100-seat room fits first.
        let rooms = vec![
            Classroom::new("R50", 50),
            Classroom::new("R45", 45),
            Classroom::new("R100", 100),
        ];
        let edges = vec![
            ProximityEdge::new("R50", "R45", 0.1),
            ProximityEdge::new("R45", "R50", 0.1),
        ];
        let course = Course::new("C1").with_students(90);
        assert_eq!(pick(&course, &rooms, &edges), Some(vec!["R100".to_string()]));
    }

    #[test]
    fn test_pair_minimizes_waste_without_proximity() {
        let rooms = vec![
            Classroom::new("A", 50),
            Classroom::new("B", 45),
            Classroom::new("C", 48),
        ];
        let course = Course::new("C1").with_students(90);
        // A+B waste 5, A+C waste 8, B+C waste 3
        assert_eq!(
            pick(&course, &rooms, &[]),
            Some(vec!["B".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn test_pair_proximity_bonus_wins() {
        let rooms = vec![
            Classroom::new("A", 50),
            Classroom::new("B", 45),
            Classroom::new("C", 48),
        ];
        // A+C: waste 8 - (1 - 0.1) * 20 = -10 beats B+C's 3.
        let edges = vec![ProximityEdge::new("A", "C", 0.1)];
        let course = Course::new("C1").with_students(90);
        assert_eq!(
            pick(&course, &rooms, &edges),
            Some(vec!["A".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn test_pair_bonus_lookup_is_directional() {
        let rooms = vec![
            Classroom::new("A", 50),
            Classroom::new("B", 45),
            Classroom::new("C", 48),
        ];
        // Only C → A is recorded; the pair is visited as (A, C), so no bonus.
        let edges = vec![ProximityEdge::new("C", "A", 0.1)];
        let course = Course::new("C1").with_students(90);
        assert_eq!(
            pick(&course, &rooms, &edges),
            Some(vec!["B".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn test_triple_when_no_pair_fits() {
        let rooms = vec![
            Classroom::new("A", 50),
            Classroom::new("B", 45),
            Classroom::new("C", 40),
        ];
        let course = Course::new("C1").with_students(130);
        let index = ProximityIndex::default();
        let selector = RoomCombinationSelector::new(&index);
        let free: Vec<&Classroom> = rooms.iter().collect();
        let selection = selector.select(&course, &free).unwrap();
        assert_eq!(selection.strategy, SelectionStrategy::Triple);
        assert_eq!(selection.rooms.len(), 3);
        assert_eq!(selection.total_capacity(), 135);
        assert_eq!(selection.wasted_seats, 5);
    }

    #[test]
    fn test_triple_proximity_bonus() {
        let rooms = vec![
            Classroom::new("A", 40),
            Classroom::new("B", 40),
            Classroom::new("C", 40),
            Classroom::new("D", 41),
        ];
        // Without proximity A+B+C (waste 0) wins. Close A, B, D pairs earn
        // 3 * (1 - 0) * 10 = 30 against a waste of 1.
        let edges = vec![
            ProximityEdge::new("A", "B", 0.0),
            ProximityEdge::new("A", "D", 0.0),
            ProximityEdge::new("B", "D", 0.0),
        ];
        let course = Course::new("C1").with_students(120);
        assert_eq!(
            pick(&course, &rooms, &[]),
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );
        assert_eq!(
            pick(&course, &rooms, &edges),
            Some(vec!["A".to_string(), "B".to_string(), "D".to_string()])
        );
    }

    #[test]
    fn test_greedy_fallback() {
        let rooms = vec![
            Classroom::new("R40", 40),
            Classroom::new("R80", 80),
            Classroom::new("R60", 60),
            Classroom::new("R70", 70),
            Classroom::new("R50", 50),
        ];
        let course = Course::new("C1").with_students(250);
        let index = ProximityIndex::default();
        let selector = RoomCombinationSelector::new(&index);
        let free: Vec<&Classroom> = rooms.iter().collect();
        let selection = selector.select(&course, &free).unwrap();
        assert_eq!(selection.strategy, SelectionStrategy::Greedy);
        assert_eq!(ids(&selection), vec!["R80", "R70", "R60", "R50"]);
        assert_eq!(selection.wasted_seats, 10);
    }

    #[test]
    fn test_insufficient_capacity() {
        let rooms = vec![
            Classroom::new("A", 60),
            Classroom::new("B", 50),
            Classroom::new("C", 45),
            Classroom::new("D", 40),
        ];
        let course = Course::new("C1").with_students(200);
        assert_eq!(pick(&course, &rooms, &[]), None);
        assert_eq!(pick(&course, &[], &[]), None);
    }

    #[test]
    fn test_special_room_preference() {
        let rooms = vec![
            Classroom::new("std", 40).with_kind(RoomKind::Standard),
            Classroom::new("lab", 100).with_kind(RoomKind::Lab),
        ];
        let course = Course::new("C1")
            .with_students(30)
            .with_special_room(RoomKind::Lab);
        assert_eq!(pick(&course, &rooms, &[]), Some(vec!["lab".to_string()]));
    }

    #[test]
    fn test_special_room_falls_back_to_full_pool() {
        let rooms = vec![
            Classroom::new("std", 40).with_kind(RoomKind::Standard),
            Classroom::new("amfi", 100).with_kind(RoomKind::Amphitheater),
        ];
        let course = Course::new("C1")
            .with_students(30)
            .with_special_room(RoomKind::Lab);
        assert_eq!(pick(&course, &rooms, &[]), Some(vec!["std".to_string()]));
    }

    #[test]
    fn test_feasible_pair_precedes_closer_triple() {
        // C+D+E seat 100 exactly and are mutually adjacent, scoring
        // 0 - 3 * 10 = -30. Any fitting pair still wins because pairs are
        // tried first; B+D is the first pair with the least waste.
        let rooms = vec![
            Classroom::new("A", 60),
            Classroom::new("B", 70),
            Classroom::new("C", 34),
            Classroom::new("D", 33),
            Classroom::new("E", 33),
        ];
        let edges = vec![
            ProximityEdge::new("C", "D", 0.0),
            ProximityEdge::new("C", "E", 0.0),
            ProximityEdge::new("D", "E", 0.0),
        ];
        let course = Course::new("C1").with_students(100);
        let index = ProximityIndex::new(&edges);
        let selector = RoomCombinationSelector::new(&index);
        let free: Vec<&Classroom> = rooms.iter().collect();
        let selection = selector.select(&course, &free).unwrap();
        assert_eq!(selection.strategy, SelectionStrategy::Pair);
        assert_eq!(ids(&selection), vec!["B", "D"]);
        assert_eq!(selection.wasted_seats, 3);

        // Without B and its partners only the triple remains.
        let free: Vec<&Classroom> = rooms[2..].iter().collect();
        let selection = selector.select(&course, &free).unwrap();
        assert_eq!(selection.strategy, SelectionStrategy::Triple);
    }

    #[test]
    fn test_huge_capacities_do_not_overflow() {
        let half = u32::MAX / 2 + 10;
        let rooms = vec![
            Classroom::new("A", half),
            Classroom::new("B", half),
            Classroom::new("C", 5),
        ];
        let course = Course::new("C1").with_students(u32::MAX - 1);
        let index = ProximityIndex::default();
        let selector = RoomCombinationSelector::new(&index);
        let free: Vec<&Classroom> = rooms.iter().collect();
        let selection = selector.select(&course, &free).unwrap();
        assert_eq!(selection.strategy, SelectionStrategy::Pair);
        assert_eq!(ids(&selection), vec!["A", "B"]);
        assert_eq!(selection.total_capacity(), 2 * u64::from(half));
        assert_eq!(selection.wasted_seats, 20);

        // Five quarter-sized rooms: only the greedy cover seats everyone.
        let quarter = u32::MAX / 4;
        let rooms: Vec<Classroom> = (0..5)
            .map(|i| Classroom::new(format!("Q{i}"), quarter))
            .collect();
        let free: Vec<&Classroom> = rooms.iter().collect();
        let selection = selector.select(&course, &free).unwrap();
        assert_eq!(selection.strategy, SelectionStrategy::Greedy);
        assert_eq!(selection.rooms.len(), 5);
        assert_eq!(
            selection.wasted_seats,
            5 * u64::from(quarter) - u64::from(u32::MAX - 1)
        );
    }
}
