//! Teacher model.
//!
//! A teacher is shared across every class they teach. The scheduler must
//! never place the same teacher in two cells with the same `(day, period)`,
//! and never on one of the teacher's blocked slots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Shift, Slot};

/// A teacher and their weekly availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: String,
    /// Shift the teacher would rather work in. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_shift: Option<Shift>,
    /// Slots the teacher is unavailable.
    #[serde(default)]
    pub blocked_slots: BTreeSet<Slot>,
}

impl Teacher {
    /// Creates a teacher with no blocked slots.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            preferred_shift: None,
            blocked_slots: BTreeSet::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Sets the preferred shift.
    pub fn with_preferred_shift(mut self, shift: Shift) -> Self {
        self.preferred_shift = Some(shift);
        self
    }

    /// Marks a slot as unavailable.
    pub fn with_blocked(mut self, slot: Slot) -> Self {
        self.blocked_slots.insert(slot);
        self
    }

    /// Marks several slots as unavailable.
    pub fn with_blocked_slots(mut self, slots: impl IntoIterator<Item = Slot>) -> Self {
        self.blocked_slots.extend(slots);
        self
    }

    /// Whether the teacher is free at a slot (ignoring scheduled lessons).
    pub fn is_available(&self, slot: Slot) -> bool {
        !self.blocked_slots.contains(&slot)
    }
}
