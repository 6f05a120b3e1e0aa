//! Classroom choice for a single exam.
//!
//! - [`ProximityIndex`]: nearest-first neighbour lists, used only to rank
//!   multi-room combinations.
//! - [`RoomCombinationSelector`]: smallest room that fits, else the best
//!   pair, triple, or greedy cover.

mod proximity;
mod selector;

pub use proximity::ProximityIndex;
pub use selector::{
    RoomCombinationSelector, RoomSelection, SelectionStrategy, PAIR_PROXIMITY_WEIGHT,
    TRIPLE_PROXIMITY_WEIGHT,
};
