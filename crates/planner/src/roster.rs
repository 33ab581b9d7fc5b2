//! People and vendors that can be seated, and seeding the ledger from them.

use serde::{Deserialize, Serialize};

use venue_core::error::CoreError;
use venue_core::ledger::AssignmentLedger;
use venue_core::room::Room;
use venue_core::types::{DbId, ElementId};

/// A guest or vendor as supplied by the roster record.
///
/// `element_id`/`seat_number` carry a prior assignment when the roster was
/// saved with one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub element_id: Option<ElementId>,
    #[serde(default)]
    pub seat_number: Option<u32>,
}

impl Person {
    pub fn new(id: DbId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            element_id: None,
            seat_number: None,
        }
    }

    pub fn seated_at(mut self, element_id: ElementId, seat_number: Option<u32>) -> Self {
        self.element_id = Some(element_id);
        self.seat_number = seat_number;
        self
    }
}

/// A prior assignment that could not be restored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedSkip {
    pub person_id: DbId,
    pub element_id: ElementId,
    /// Display form of the error that caused the skip.
    pub reason: String,
}

/// Outcome of restoring prior assignments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedReport {
    pub seeded: usize,
    pub skipped: Vec<SeedSkip>,
}

/// Ordered list of people, in import order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn get(&self, id: DbId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn require(&self, id: DbId) -> Result<&Person, CoreError> {
        self.get(id).ok_or_else(|| CoreError::person_not_found(id))
    }

    /// Display name, falling back to the id for unknown people.
    pub fn name_of(&self, id: DbId) -> String {
        self.get(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("#{id}"))
    }

    /// Restore prior assignments into `ledger`.
    ///
    /// People are seeded in `seat_number` order; those without a seat number
    /// go last in roster order. A person whose element is gone or full is
    /// skipped and reported, never failing the whole load.
    pub fn seed(&self, room: &Room, ledger: &mut AssignmentLedger) -> SeedReport {
        let mut pending: Vec<(&Person, ElementId)> = self
            .people
            .iter()
            .filter_map(|p| p.element_id.map(|e| (p, e)))
            .collect();
        pending.sort_by_key(|(p, _)| p.seat_number.unwrap_or(u32::MAX));

        let mut report = SeedReport::default();
        for (person, element_id) in pending {
            let result = room
                .require(element_id)
                .and_then(|element| ledger.assign(element, person.id));
            match result {
                Ok(_) => report.seeded += 1,
                Err(err) => {
                    tracing::warn!(
                        person_id = person.id,
                        element_id = %element_id,
                        error = %err,
                        "Skipping prior assignment"
                    );
                    report.skipped.push(SeedSkip {
                        person_id: person.id,
                        element_id,
                        reason: err.to_string(),
                    });
                }
            }
        }
        report
    }

    /// People with `element_id`/`seat_number` rewritten from `ledger`.
    pub fn synced(&self, ledger: &AssignmentLedger) -> Vec<Person> {
        self.people
            .iter()
            .map(|p| Person {
                element_id: ledger.element_of(p.id),
                seat_number: ledger.seat_number(p.id).map(|n| n as u32),
                ..p.clone()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use venue_core::catalog::ElementKind;
    use venue_core::element::Element;
    use venue_core::shape::{Boundary, ShapeKind};
    use venue_core::units::UnitScale;

    use super::*;

    fn room_with(kinds: &[ElementKind]) -> Room {
        let mut room = Room::new("Test", Boundary::default_for(ShapeKind::Rect));
        for kind in kinds {
            room.add_element(Element::from_catalog_default(*kind, &UnitScale::DEFAULT));
        }
        room
    }

    #[test]
    fn test_seed_orders_by_seat_number() {
        let room = room_with(&[ElementKind::TableSquare]);
        let table = room.elements[0].id;
        let roster = Roster::new(vec![
            Person::new(1, "Ada").seated_at(table, None),
            Person::new(2, "Ben").seated_at(table, Some(2)),
            Person::new(3, "Cy").seated_at(table, Some(1)),
            Person::new(4, "Dee"),
        ]);
        let mut ledger = AssignmentLedger::new();

        let report = roster.seed(&room, &mut ledger);
        assert_eq!(report.seeded, 3);
        assert!(report.skipped.is_empty());
        assert_eq!(ledger.assignments_for(table), &[3, 2, 1]);
        assert_eq!(ledger.element_of(4), None);
    }

    #[test]
    fn test_seed_skips_full_and_missing_elements() {
        let room = room_with(&[ElementKind::BoothStandard]);
        let booth = room.elements[0].id;
        let gone = ElementId::new_v4();
        let roster = Roster::new(vec![
            Person::new(1, "Acme").seated_at(booth, Some(1)),
            Person::new(2, "Globex").seated_at(booth, Some(2)),
            Person::new(3, "Initech").seated_at(gone, Some(1)),
        ]);
        let mut ledger = AssignmentLedger::new();

        let report = roster.seed(&room, &mut ledger);
        assert_eq!(report.seeded, 1);
        let skipped: Vec<DbId> = report.skipped.iter().map(|s| s.person_id).collect();
        assert_eq!(skipped, vec![3, 2]);
        assert_eq!(ledger.assignments_for(booth), &[1]);
    }

    #[test]
    fn test_synced_reflects_ledger() {
        let room = room_with(&[ElementKind::TableRound]);
        let table = &room.elements[0];
        let roster = Roster::new(vec![Person::new(1, "Ada"), Person::new(2, "Ben")]);
        let mut ledger = AssignmentLedger::new();
        ledger.assign(table, 2).unwrap();

        let people = roster.synced(&ledger);
        assert_eq!(people[0].element_id, None);
        assert_eq!(people[1].element_id, Some(table.id));
        assert_eq!(people[1].seat_number, Some(1));
    }

    #[test]
    fn test_name_of_unknown_person() {
        let roster = Roster::new(vec![Person::new(1, "Ada")]);
        assert_eq!(roster.name_of(1), "Ada");
        assert_eq!(roster.name_of(9), "#9");
    }
}
