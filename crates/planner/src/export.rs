//! Save snapshots and route handouts.

use serde::Serialize;

use venue_core::error::CoreError;
use venue_core::ledger::AssignmentLedger;
use venue_core::room::Room;
use venue_core::route::RoutePlan;
use venue_core::types::{DbId, ElementId};

use crate::roster::{Person, Roster};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ---------------------------------------------------------------------------
// Layout snapshot
// ---------------------------------------------------------------------------

/// One element's occupants, in seat order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRecord {
    pub element_id: ElementId,
    pub people: Vec<DbId>,
}

/// Everything persistence needs to store a layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub room: Room,
    pub assignments: Vec<AssignmentRecord>,
    /// Roster with each person's current element and seat number.
    pub people: Vec<Person>,
    pub route: RoutePlan,
    pub saved_at: Timestamp,
}

impl LayoutSnapshot {
    pub fn capture(
        room: &Room,
        ledger: &AssignmentLedger,
        roster: &Roster,
        route: &RoutePlan,
        saved_at: Timestamp,
    ) -> Self {
        Self {
            room: room.clone(),
            assignments: ledger
                .iter()
                .map(|(element_id, people)| AssignmentRecord {
                    element_id,
                    people: people.to_vec(),
                })
                .collect(),
            people: roster.synced(ledger),
            route: route.clone(),
            saved_at,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Route export
// ---------------------------------------------------------------------------

/// One stop of an exported route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteExportRow {
    /// 1-based position in the route.
    pub step: usize,
    pub element_id: ElementId,
    pub element_label: String,
    /// Occupant names joined with ", " when an element seats several people.
    pub person_name: String,
}

/// Printable route handout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteExport {
    pub entrance_label: Option<String>,
    pub rows: Vec<RouteExportRow>,
}

impl RouteExport {
    /// Build export rows for `plan`.
    ///
    /// Stops whose element no longer exists are dropped; step numbers stay
    /// contiguous.
    pub fn build(
        plan: &RoutePlan,
        room: &Room,
        ledger: &AssignmentLedger,
        roster: &Roster,
    ) -> Result<Self, CoreError> {
        if plan.is_empty() {
            return Err(CoreError::EmptyRoute);
        }
        let rows = plan
            .stops()
            .iter()
            .filter_map(|id| room.element(*id))
            .enumerate()
            .map(|(i, element)| RouteExportRow {
                step: i + 1,
                element_id: element.id,
                element_label: element.label.clone(),
                person_name: ledger
                    .assignments_for(element.id)
                    .iter()
                    .map(|p| roster.name_of(*p))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();

        Ok(Self {
            entrance_label: room.entrance().map(|e| e.label.clone()),
            rows,
        })
    }

    /// Plain-text handout, one line per stop.
    pub fn to_text(&self) -> String {
        let mut lines = vec!["Visit Route".to_string(), "===========".to_string(), String::new()];
        if let Some(entrance) = &self.entrance_label {
            lines.push(format!("Start at {entrance}"));
            lines.push(String::new());
        }
        for row in &self.rows {
            lines.push(format!("{}. {} — {}", row.step, row.element_label, row.person_name));
        }
        lines.join("\n")
    }
}
