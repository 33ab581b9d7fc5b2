//! Capacity-bounded assignment of people and vendors to elements.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::element::Element;
use crate::error::CoreError;
use crate::types::{DbId, ElementId};

/// Whether `element` can receive assignments at all.
pub fn is_eligible_target(element: &Element) -> bool {
    element.seat_capacity > 0
}

/// Relation from seat-bearing elements to the people occupying them.
///
/// Invariants, upheld by every method:
/// - an element never holds more people than its `seat_capacity`;
/// - a person appears under at most one element;
/// - no element maps to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssignmentLedger {
    by_element: BTreeMap<ElementId, Vec<DbId>>,
}

impl AssignmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `person` to `element`.
    ///
    /// Fails with [`CoreError::CapacityExceeded`] when the element is full,
    /// leaving the ledger untouched. A person already seated elsewhere is
    /// moved; the previous element id is returned. Re-assigning a person to
    /// the element they already occupy is a no-op.
    pub fn assign(
        &mut self,
        element: &Element,
        person: DbId,
    ) -> Result<Option<ElementId>, CoreError> {
        let previous = self.element_of(person);
        if previous == Some(element.id) {
            return Ok(None);
        }
        if self.count(element.id) >= element.seat_capacity as usize {
            return Err(CoreError::CapacityExceeded {
                element_id: element.id,
                capacity: element.seat_capacity,
            });
        }

        if let Some(prev) = previous {
            self.unassign(prev, person);
        }
        self.by_element.entry(element.id).or_default().push(person);
        Ok(previous)
    }

    /// Remove `person` from `element_id`. Returns whether anything changed.
    pub fn unassign(&mut self, element_id: ElementId, person: DbId) -> bool {
        let Some(people) = self.by_element.get_mut(&element_id) else {
            return false;
        };
        let before = people.len();
        people.retain(|p| *p != person);
        let changed = people.len() != before;
        if people.is_empty() {
            self.by_element.remove(&element_id);
        }
        changed
    }

    /// Drop every assignment on `element_id`, returning who was there.
    pub fn remove_element(&mut self, element_id: ElementId) -> Vec<DbId> {
        self.by_element.remove(&element_id).unwrap_or_default()
    }

    /// People on `element_id`, in the order they were assigned.
    pub fn assignments_for(&self, element_id: ElementId) -> &[DbId] {
        self.by_element
            .get(&element_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, element_id: ElementId) -> usize {
        self.assignments_for(element_id).len()
    }

    pub fn is_assigned(&self, element_id: ElementId) -> bool {
        self.by_element.contains_key(&element_id)
    }

    pub fn element_of(&self, person: DbId) -> Option<ElementId> {
        self.by_element
            .iter()
            .find(|(_, people)| people.contains(&person))
            .map(|(id, _)| *id)
    }

    /// 1-based seat number of `person` on their element.
    pub fn seat_number(&self, person: DbId) -> Option<usize> {
        self.by_element
            .values()
            .find_map(|people| people.iter().position(|p| *p == person))
            .map(|i| i + 1)
    }

    /// Elements that qualify as route stops: seat-bearing and occupied.
    pub fn route_eligible<'a>(
        &self,
        elements: impl IntoIterator<Item = &'a Element>,
    ) -> BTreeSet<ElementId> {
        elements
            .into_iter()
            .filter(|e| is_eligible_target(e) && self.is_assigned(e.id))
            .map(|e| e.id)
            .collect()
    }

    /// Total number of people holding an assignment.
    pub fn assigned_count(&self) -> usize {
        self.by_element.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_element.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &[DbId])> {
        self.by_element.iter().map(|(id, people)| (*id, people.as_slice()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
