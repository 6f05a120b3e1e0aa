//! Classroom model.
//!
//! Classrooms are the seating resources exams are placed into. Each has a
//! capacity, an exam-eligibility flag, and an optional categorical kind
//! used for soft room-type preferences.

use serde::{Deserialize, Serialize};

/// A classroom that can host exams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Seating capacity (> 0).
    pub capacity: u32,
    /// Whether the room may be used for exams.
    pub exam_allowed: bool,
    /// Room classification. `None` = unclassified.
    pub kind: Option<RoomKind>,
    /// Building name.
    pub building: Option<String>,
    /// Floor label.
    pub floor: Option<String>,
}

/// Room classification.
///
/// A course that asks for a specific kind prefers rooms of that kind; the
/// preference is soft (see `rooms::RoomCombinationSelector`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    /// Ordinary lecture room.
    Standard,
    /// Laboratory or practical room.
    Lab,
    /// Large tiered lecture hall.
    Amphitheater,
    /// Site-specific kind.
    Custom(String),
}

impl RoomKind {
    /// Whether a room of this kind satisfies `required`.
    ///
    /// `Custom` kinds match case-insensitively.
    pub fn satisfies(&self, required: &RoomKind) -> bool {
        match (self, required) {
            (RoomKind::Custom(a), RoomKind::Custom(b)) => a.eq_ignore_ascii_case(b),
            (a, b) => a == b,
        }
    }
}

impl Classroom {
    /// Creates an exam-eligible classroom.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
            exam_allowed: true,
            kind: None,
            building: None,
            floor: None,
        }
    }

    /// Sets the classroom name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the room kind.
    pub fn with_kind(mut self, kind: RoomKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets building and floor.
    pub fn with_location(mut self, building: impl Into<String>, floor: impl Into<String>) -> Self {
        self.building = Some(building.into());
        self.floor = Some(floor.into());
        self
    }

    /// Marks the room as not usable for exams.
    pub fn not_for_exams(mut self) -> Self {
        self.exam_allowed = false;
        self
    }

    /// Whether this room matches a required kind.
    ///
    /// Unclassified rooms never match.
    pub fn matches_kind(&self, required: &RoomKind) -> bool {
        self.kind
            .as_ref()
            .is_some_and(|kind| kind.satisfies(required))
    }
}
