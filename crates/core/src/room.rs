//! Rooms and halls: a boundary plus the elements placed inside it.

use serde::{Deserialize, Serialize};

use crate::catalog::{ElementCategory, ElementKind};
use crate::element::Element;
use crate::error::CoreError;
use crate::ledger::AssignmentLedger;
use crate::shape::{Boundary, BoundingBox};
use crate::types::{ElementId, Point};
use crate::units::UnitScale;

// ---------------------------------------------------------------------------
// Limits and statistics
// ---------------------------------------------------------------------------

/// Optional venue limits a layout is checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityLimits {
    /// Maximum number of seat-bearing elements.
    pub max_tables: Option<u32>,
    /// Maximum total seats across all elements.
    pub max_seats: Option<u32>,
    /// Maximum number of attendees on the roster.
    pub max_attendees: Option<u32>,
}

/// Seat and occupancy totals for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityStats {
    pub tables_count: u32,
    pub seats_available: u32,
    pub assigned_count: u32,
    pub guest_count: u32,
    pub unassigned_count: u32,
    pub tables_over_limit: bool,
    pub seats_over_limit: bool,
    pub attendees_over_limit: bool,
    pub by_category: CategoryCounts,
}

/// Placed elements per catalog category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub furniture: u32,
    pub facility: u32,
    pub booth: u32,
    pub decor: u32,
}

impl CategoryCounts {
    pub fn tally<'a>(elements: impl IntoIterator<Item = &'a Element>) -> Self {
        let mut counts = Self::default();
        for element in elements {
            match element.kind.category() {
                ElementCategory::Furniture => counts.furniture += 1,
                ElementCategory::Facility => counts.facility += 1,
                ElementCategory::Booth => counts.booth += 1,
                ElementCategory::Decor => counts.decor += 1,
            }
        }
        counts
    }

    pub fn get(&self, category: ElementCategory) -> u32 {
        match category {
            ElementCategory::Furniture => self.furniture,
            ElementCategory::Facility => self.facility,
            ElementCategory::Booth => self.booth,
            ElementCategory::Decor => self.decor,
        }
    }
}

fn exceeds(value: u32, limit: Option<u32>) -> bool {
    limit.is_some_and(|max| value > max)
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// A room or hall. Owns its elements exclusively; draw order is vector order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub boundary: Boundary,
    pub elements: Vec<Element>,
    #[serde(default)]
    pub limits: CapacityLimits,
}

impl Room {
    pub fn new(name: impl Into<String>, boundary: Boundary) -> Self {
        Self {
            name: name.into(),
            boundary,
            elements: Vec::new(),
            limits: CapacityLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: CapacityLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn bounding_box(&self, scale: &UnitScale) -> BoundingBox {
        self.boundary.bounding_box(scale)
    }

    // -- Elements -----------------------------------------------------------

    /// Append `element` on top of the draw order.
    pub fn add_element(&mut self, element: Element) -> &Element {
        self.elements.push(element);
        &self.elements[self.elements.len() - 1]
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Like [`Room::element`] but fails with `NotFound`.
    pub fn require(&self, id: ElementId) -> Result<&Element, CoreError> {
        self.element(id).ok_or_else(|| CoreError::element_not_found(id))
    }

    pub fn require_mut(&mut self, id: ElementId) -> Result<&mut Element, CoreError> {
        self.element_mut(id)
            .ok_or_else(|| CoreError::element_not_found(id))
    }

    /// Remove an element. Callers own cascading into the ledger and route.
    pub fn remove_element(&mut self, id: ElementId) -> Result<Element, CoreError> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::element_not_found(id))?;
        Ok(self.elements.remove(index))
    }

    /// First entrance in draw order, which seeds the automatic route.
    pub fn entrance(&self) -> Option<&Element> {
        self.elements.iter().find(|e| e.kind.is_entrance())
    }

    pub fn capacity_bearing(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.is_capacity_bearing())
    }

    /// Totals for the capacity panel.
    ///
    /// `guest_count` is the size of the roster, assigned or not.
    pub fn capacity_stats(&self, ledger: &AssignmentLedger, guest_count: usize) -> CapacityStats {
        let tables_count = self.capacity_bearing().count() as u32;
        let seats_available: u32 = self.capacity_bearing().map(|e| e.seat_capacity).sum();
        let assigned_count: u32 = self
            .elements
            .iter()
            .map(|e| ledger.count(e.id) as u32)
            .sum();
        let guest_count = guest_count as u32;

        CapacityStats {
            tables_count,
            seats_available,
            assigned_count,
            guest_count,
            unassigned_count: guest_count.saturating_sub(assigned_count),
            tables_over_limit: exceeds(tables_count, self.limits.max_tables),
            seats_over_limit: exceeds(seats_available, self.limits.max_seats),
            attendees_over_limit: exceeds(guest_count, self.limits.max_attendees),
            by_category: CategoryCounts::tally(&self.elements),
        }
    }

    // -- Presets ------------------------------------------------------------

    /// Rectangular 24 x 16 m auditorium with doors, exits, egress and a window.
    pub fn auditorium_a() -> Self {
        let mut room = Self::new(
            "Auditorium A",
            Boundary::Rect {
                width_m: 24.0,
                height_m: 16.0,
            },
        )
        .with_limits(preset_limits(300, 260));
        room.elements = vec![
            facility(ElementKind::Door, (2.0, 0.0), (2.0, 0.2)),
            facility(ElementKind::Door, (20.0, 0.0), (2.0, 0.2)),
            facility(ElementKind::Exit, (0.0, 8.0), (0.2, 2.0)),
            facility(ElementKind::Exit, (23.8, 8.0), (0.2, 2.0)),
            facility(ElementKind::Egress, (12.0, 15.6), (10.0, 0.4)),
            facility(ElementKind::Window, (8.0, 15.8), (8.0, 0.2)),
        ];
        room
    }

    /// Trapezoid hall.
    pub fn conference_hall_b() -> Self {
        let mut room = Self::new(
            "Conference Hall B",
            Boundary::Polygon {
                vertices: vec![
                    Point::new(0.0, 0.0),
                    Point::new(18.0, 0.0),
                    Point::new(16.0, 12.0),
                    Point::new(2.0, 12.0),
                ],
            },
        )
        .with_limits(preset_limits(180, 150));
        room.elements = vec![
            facility(ElementKind::Door, (0.0, 4.0), (0.2, 2.0)),
            facility(ElementKind::Exit, (17.8, 6.0), (0.2, 2.0)),
            facility(ElementKind::Window, (4.0, 0.0), (10.0, 0.2)),
            facility(ElementKind::Egress, (0.0, 11.6), (18.0, 0.4)),
        ];
        room
    }

    /// Fan-shaped breakout room.
    pub fn breakout_c() -> Self {
        let mut room = Self::new(
            "Breakout C",
            Boundary::Sector {
                center: Point::new(6.0, 6.0),
                radius_m: 8.0,
                start_angle_deg: -45.0,
                end_angle_deg: 60.0,
            },
        )
        .with_limits(preset_limits(80, 60));
        room.elements = vec![
            facility(ElementKind::Door, (5.0, 0.5), (2.0, 0.2)),
            facility(ElementKind::Window, (2.0, 7.8), (8.0, 0.2)),
        ];
        room
    }

    /// All preset rooms, in picker order.
    pub fn presets() -> Vec<Self> {
        vec![Self::auditorium_a(), Self::conference_hall_b(), Self::breakout_c()]
    }
}

fn preset_limits(attendees: u32, seats: u32) -> CapacityLimits {
    CapacityLimits {
        max_tables: None,
        max_seats: Some(seats),
        max_attendees: Some(attendees),
    }
}

/// Fixed facility at an exact (unsnapped) position and size in meters.
fn facility(kind: ElementKind, at: (f64, f64), size: (f64, f64)) -> Element {
    let mut element =
        Element::from_catalog(kind, 0.0, 0.0, &UnitScale::DEFAULT).with_size(size.0, size.1);
    element.x_m = at.0;
    element.y_m = at.1;
    element
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
