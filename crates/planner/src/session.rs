//! Editing session: the single owner of a room's mutable state.
//!
//! Every gesture goes through `&mut EditSession` and either commits fully or
//! returns an error with nothing changed. The route is cleared whenever an
//! edit changes which elements are eligible stops.

use std::collections::BTreeSet;

use chrono::Utc;

use venue_core::catalog::ElementKind;
use venue_core::element::{Element, LiveTransform, SeatPosition};
use venue_core::error::CoreError;
use venue_core::hit_test;
use venue_core::ledger::AssignmentLedger;
use venue_core::room::{CapacityStats, Room};
use venue_core::route::{Guidance, PlaybackState, RouteCursor, RoutePlan, RouteSegment, StopStatus};
use venue_core::shape::{BoundingBox, Edge, ShapeKind};
use venue_core::types::{DbId, ElementId, Point};
use venue_core::units::UnitScale;

use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::export::{LayoutSnapshot, RouteExport};
use crate::roster::{Roster, SeedReport};

/// A resize gesture that has started but not yet committed.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveResize {
    element_id: ElementId,
    live: LiveTransform,
}

/// One room being edited, with its roster, assignments and route.
#[derive(Debug)]
pub struct EditSession {
    config: PlannerConfig,
    scale: UnitScale,
    room: Room,
    roster: Roster,
    ledger: AssignmentLedger,
    route: RoutePlan,
    playback: Option<RouteCursor>,
    resize: Option<ActiveResize>,
}

impl EditSession {
    /// Open a session and restore prior assignments from the roster.
    pub fn open(
        config: PlannerConfig,
        room: Room,
        roster: Roster,
    ) -> PlannerResult<(Self, SeedReport)> {
        config.validate()?;
        let mut ledger = AssignmentLedger::new();
        let report = roster.seed(&room, &mut ledger);

        tracing::info!(
            room = %room.name,
            elements = room.elements.len(),
            people = roster.len(),
            seeded = report.seeded,
            skipped = report.skipped.len(),
            "Session opened"
        );

        let session = Self {
            scale: config.unit_scale(),
            config,
            room,
            roster,
            ledger,
            route: RoutePlan::new(),
            playback: None,
            resize: None,
        };
        Ok((session, report))
    }

    // -- Read access --------------------------------------------------------

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn scale(&self) -> &UnitScale {
        &self.scale
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn ledger(&self) -> &AssignmentLedger {
        &self.ledger
    }

    pub fn route(&self) -> &RoutePlan {
        &self.route
    }

    pub fn element(&self, id: ElementId) -> PlannerResult<&Element> {
        Ok(self.room.require(id)?)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.room.bounding_box(&self.scale)
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.room.boundary.edges()
    }

    pub fn capacity_stats(&self) -> CapacityStats {
        self.room.capacity_stats(&self.ledger, self.roster.len())
    }

    pub fn seat_positions(&self, id: ElementId) -> PlannerResult<Vec<SeatPosition>> {
        Ok(self.room.require(id)?.seat_positions(&self.scale))
    }

    // -- Boundary -----------------------------------------------------------

    /// Reset the boundary to the default shape of `kind`.
    pub fn change_shape_kind(&mut self, kind: ShapeKind) {
        self.room.boundary.change_kind(kind);
        tracing::info!(room = %self.room.name, kind = kind.as_str(), "Boundary reset");
    }

    pub fn set_rect_size(&mut self, width_m: f64, height_m: f64) -> PlannerResult<()> {
        self.room.boundary.set_rect_size(width_m, height_m)?;
        tracing::debug!(width_m, height_m, "Rect boundary resized");
        Ok(())
    }

    pub fn set_sector(
        &mut self,
        center: Point,
        radius_m: f64,
        start_angle_deg: f64,
        end_angle_deg: f64,
    ) -> PlannerResult<()> {
        self.room
            .boundary
            .set_sector(center, radius_m, start_angle_deg, end_angle_deg)?;
        tracing::debug!(radius_m, start_angle_deg, end_angle_deg, "Sector boundary edited");
        Ok(())
    }

    pub fn mutate_vertex(&mut self, index: usize, point: Point) -> PlannerResult<()> {
        self.room.boundary.mutate_vertex(index, point)?;
        tracing::debug!(index, x = point.x, y = point.y, "Vertex moved");
        Ok(())
    }

    pub fn add_vertex(&mut self) -> PlannerResult<Point> {
        let point = self.room.boundary.add_vertex()?;
        tracing::debug!(x = point.x, y = point.y, "Vertex added");
        Ok(point)
    }

    pub fn remove_vertex(&mut self) -> PlannerResult<Point> {
        match self.room.boundary.remove_vertex() {
            Ok(point) => {
                tracing::debug!(x = point.x, y = point.y, "Vertex removed");
                Ok(point)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Vertex removal refused");
                Err(err.into())
            }
        }
    }

    // -- Elements -----------------------------------------------------------

    /// Add a catalog element at the default placement.
    pub fn add_element(&mut self, kind: ElementKind) -> PlannerResult<ElementId> {
        let element = Element::from_catalog_default(kind, &self.scale);
        self.insert_element(element)
    }

    /// Add a catalog element at a pixel position (snapped).
    pub fn add_element_at(&mut self, kind: ElementKind, x_px: f64, y_px: f64) -> PlannerResult<ElementId> {
        let element = Element::from_catalog(kind, x_px, y_px, &self.scale);
        self.insert_element(element)
    }

    fn insert_element(&mut self, element: Element) -> PlannerResult<ElementId> {
        if self.room.elements.len() >= self.config.max_elements {
            tracing::warn!(max = self.config.max_elements, "Element limit reached");
            return Err(CoreError::Validation(format!(
                "room already holds the maximum of {} elements",
                self.config.max_elements
            ))
            .into());
        }
        let added = self.room.add_element(element);
        tracing::info!(
            element_id = %added.id,
            kind = added.kind.as_str(),
            x_m = added.x_m,
            y_m = added.y_m,
            "Element added"
        );
        Ok(added.id)
    }

    /// Drag commit. Overlap is allowed.
    pub fn move_element(&mut self, id: ElementId, x_px: f64, y_px: f64) -> PlannerResult<()> {
        let element = self.room.require_mut(id)?;
        element.move_to(x_px, y_px, &self.scale);
        tracing::debug!(element_id = %id, x_m = element.x_m, y_m = element.y_m, "Element moved");
        Ok(())
    }

    pub fn rename_element(&mut self, id: ElementId, label: impl Into<String>) -> PlannerResult<()> {
        let element = self.room.require_mut(id)?;
        element.label = label.into();
        tracing::info!(element_id = %id, label = %element.label, "Element renamed");
        Ok(())
    }

    /// Delete an element and every assignment on it.
    pub fn delete_element(&mut self, id: ElementId) -> PlannerResult<Element> {
        let before = self.eligible();
        let removed = self.room.remove_element(id)?;
        let people = self.ledger.remove_element(id);
        if self.resize.is_some_and(|r| r.element_id == id) {
            self.resize = None;
        }
        tracing::info!(
            element_id = %id,
            kind = removed.kind.as_str(),
            unassigned = people.len(),
            "Element deleted"
        );
        self.invalidate_route_if_changed(&before);
        Ok(removed)
    }

    // -- Resize gesture -----------------------------------------------------

    /// Start resizing `id`. Any previous uncommitted gesture is dropped.
    pub fn begin_resize(&mut self, id: ElementId) -> PlannerResult<LiveTransform> {
        let live = LiveTransform::identity(self.room.require(id)?);
        self.resize = Some(ActiveResize {
            element_id: id,
            live,
        });
        Ok(live)
    }

    /// Update the live transform, clamped so no side drops below one grid
    /// unit. The element itself is not touched.
    pub fn update_resize(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        rotation_deg: f64,
    ) -> PlannerResult<LiveTransform> {
        let active = self.active_resize()?;
        let element = self.room.require(active.element_id)?;
        let live =
            LiveTransform::new(scale_x, scale_y, rotation_deg).clamped(element, &self.scale);
        self.resize = Some(ActiveResize { live, ..active });
        Ok(live)
    }

    /// Fold the live transform into the element's size and rotation.
    pub fn commit_resize(&mut self) -> PlannerResult<&Element> {
        let active = self.active_resize()?;
        let element = self.room.require_mut(active.element_id)?;
        element.commit_resize(active.live, &self.scale);
        self.resize = None;
        tracing::debug!(
            element_id = %element.id,
            width_m = element.width_m,
            height_m = element.height_m,
            rotation_deg = element.rotation_deg,
            "Resize committed"
        );
        Ok(element)
    }

    /// Drop the gesture; the element keeps its committed geometry.
    pub fn abandon_resize(&mut self) {
        if let Some(active) = self.resize.take() {
            tracing::debug!(element_id = %active.element_id, "Resize abandoned");
        }
    }

    /// Live pixel size of the element being resized, for the preview.
    pub fn live_size_px(&self) -> Option<(f64, f64)> {
        let active = self.resize?;
        let element = self.room.element(active.element_id)?;
        Some(active.live.live_size_px(element, &self.scale))
    }

    fn active_resize(&self) -> PlannerResult<ActiveResize> {
        self.resize.ok_or_else(|| {
            CoreError::Validation("no resize gesture in progress".to_string()).into()
        })
    }

    // -- Assignments --------------------------------------------------------

    pub fn assign(&mut self, element_id: ElementId, person: DbId) -> PlannerResult<()> {
        self.roster.require(person)?;
        let element = self.room.require(element_id)?;
        let before = self.eligible();

        match self.ledger.assign(element, person) {
            Ok(previous) => {
                tracing::info!(
                    element_id = %element_id,
                    person_id = person,
                    moved_from = ?previous,
                    "Person assigned"
                );
            }
            Err(err) => {
                tracing::warn!(
                    element_id = %element_id,
                    person_id = person,
                    capacity = element.seat_capacity,
                    error = %err,
                    "Assignment refused"
                );
                return Err(err.into());
            }
        }
        self.invalidate_route_if_changed(&before);
        Ok(())
    }

    /// Remove an assignment. Returns whether one existed.
    pub fn unassign(&mut self, element_id: ElementId, person: DbId) -> bool {
        let before = self.eligible();
        let changed = self.ledger.unassign(element_id, person);
        if changed {
            tracing::info!(element_id = %element_id, person_id = person, "Person unassigned");
            self.invalidate_route_if_changed(&before);
        }
        changed
    }

    /// Assign `person` to the topmost seat-bearing element under a drop
    /// point. Dropping on empty canvas does nothing and returns `None`.
    pub fn drop_person_at(
        &mut self,
        x_px: f64,
        y_px: f64,
        person: DbId,
    ) -> PlannerResult<Option<ElementId>> {
        let target = hit_test::topmost_at(
            Point::new(x_px, y_px),
            &self.room.elements,
            &self.scale,
            Element::is_capacity_bearing,
        )
        .map(|e| e.id);

        match target {
            Some(id) => {
                self.assign(id, person)?;
                Ok(Some(id))
            }
            None => {
                tracing::debug!(x_px, y_px, person_id = person, "Drop missed every element");
                Ok(None)
            }
        }
    }

    // -- Route planning -----------------------------------------------------

    /// Replace the route with a nearest-neighbor walk from the entrance.
    pub fn generate_route(&mut self) -> &RoutePlan {
        self.route =
            RoutePlan::generate_auto(&self.room.elements, &self.ledger, self.room.entrance());
        self.playback = None;
        tracing::info!(stops = self.route.len(), "Route generated");
        &self.route
    }

    /// Add or remove a stop by hand. Returns whether it is now a stop.
    pub fn toggle_route_stop(&mut self, id: ElementId) -> PlannerResult<bool> {
        let element = self.room.require(id)?;
        let added = self.route.toggle_manual(element, &self.ledger)?;
        self.playback = None;
        tracing::debug!(element_id = %id, added, stops = self.route.len(), "Route stop toggled");
        Ok(added)
    }

    pub fn move_stop_up(&mut self, id: ElementId) -> bool {
        let moved = self.route.move_stop_up(id);
        if moved {
            self.playback = None;
        }
        moved
    }

    pub fn move_stop_down(&mut self, id: ElementId) -> bool {
        let moved = self.route.move_stop_down(id);
        if moved {
            self.playback = None;
        }
        moved
    }

    pub fn clear_route(&mut self) {
        self.route.clear();
        self.playback = None;
    }

    pub fn route_segments(&self) -> Vec<RouteSegment> {
        self.route
            .segments(&self.room.elements, self.room.entrance(), &self.scale)
    }

    pub fn route_export(&self) -> PlannerResult<RouteExport> {
        Ok(RouteExport::build(
            &self.route,
            &self.room,
            &self.ledger,
            &self.roster,
        )?)
    }

    // -- Playback -----------------------------------------------------------

    pub fn playback_state(&self) -> PlaybackState {
        self.playback
            .as_ref()
            .map_or(PlaybackState::NotStarted, RouteCursor::state)
    }

    pub fn cursor(&self) -> Option<&RouteCursor> {
        self.playback.as_ref()
    }

    pub fn start_playback(&mut self) -> PlannerResult<()> {
        let cursor = RouteCursor::start(&self.route)?;
        tracing::info!(stops = self.route.len(), "Playback started");
        self.playback = Some(cursor);
        Ok(())
    }

    pub fn advance(&mut self) -> PlannerResult<PlaybackState> {
        self.step_playback(RouteCursor::advance)
    }

    pub fn skip(&mut self) -> PlannerResult<PlaybackState> {
        self.step_playback(RouteCursor::skip)
    }

    pub fn back(&mut self) -> PlannerResult<PlaybackState> {
        self.step_playback(RouteCursor::back)
    }

    /// Return to `NotStarted` from any state.
    pub fn reset_playback(&mut self) {
        self.playback = None;
    }

    fn step_playback(&mut self, step: impl FnOnce(&mut RouteCursor)) -> PlannerResult<PlaybackState> {
        let cursor = self
            .playback
            .as_mut()
            .ok_or(PlannerError::Core(CoreError::PlaybackNotStarted))?;
        let was = cursor.state();
        step(cursor);
        let now = cursor.state();
        if was != PlaybackState::Completed && now == PlaybackState::Completed {
            let progress = cursor.progress();
            tracing::info!(handled = progress.handled, total = progress.total, "Playback completed");
        }
        Ok(now)
    }

    pub fn stop_status(&self, id: ElementId) -> Option<StopStatus> {
        self.playback.as_ref()?.stop_status(id)
    }

    /// Heading and distance from the current stop to the next one. `None`
    /// unless playing with a stop still ahead.
    pub fn guidance(&self) -> Option<Guidance> {
        let cursor = self.playback.as_ref()?;
        let from = self.room.element(cursor.current_stop()?)?.center_px(&self.scale);
        let to = self.room.element(cursor.next_stop()?)?.center_px(&self.scale);
        Some(Guidance::between(from, to, &self.scale))
    }

    // -- Persistence handoff ------------------------------------------------

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::capture(&self.room, &self.ledger, &self.roster, &self.route, Utc::now())
    }

    // -- Route invalidation -------------------------------------------------

    fn eligible(&self) -> BTreeSet<ElementId> {
        self.ledger.route_eligible(&self.room.elements)
    }

    fn invalidate_route_if_changed(&mut self, before: &BTreeSet<ElementId>) {
        if self.route.is_empty() && self.playback.is_none() {
            return;
        }
        if self.eligible() != *before {
            tracing::info!(stops = self.route.len(), "Eligible stops changed, route cleared");
            self.route.clear();
            self.playback = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use venue_core::shape::Boundary;

    use super::*;
    use crate::roster::Person;

    fn session() -> EditSession {
        let room = Room::new("Test", Boundary::default_for(ShapeKind::Rect));
        let roster = Roster::new(vec![Person::new(1, "Ada"), Person::new(2, "Ben")]);
        EditSession::open(PlannerConfig::default(), room, roster)
            .unwrap()
            .0
    }

    #[test]
    fn test_commit_without_gesture_is_rejected() {
        let mut s = session();
        assert_matches!(
            s.commit_resize(),
            Err(PlannerError::Core(CoreError::Validation(_)))
        );
    }

    #[test]
    fn test_abandoned_resize_leaves_element_untouched() {
        let mut s = session();
        let id = s.add_element(ElementKind::TableRect).unwrap();
        let before = s.element(id).unwrap().clone();

        s.begin_resize(id).unwrap();
        s.update_resize(3.0, 2.0, 45.0).unwrap();
        assert_eq!(s.live_size_px(), Some((216.0, 64.0)));
        s.abandon_resize();

        assert_eq!(s.element(id).unwrap(), &before);
        assert_eq!(s.live_size_px(), None);
    }

    #[test]
    fn test_unknown_person_is_not_found() {
        let mut s = session();
        let id = s.add_element(ElementKind::TableRound).unwrap();
        assert_matches!(
            s.assign(id, 99),
            Err(PlannerError::Core(CoreError::NotFound { entity: "person", .. }))
        );
    }

    #[test]
    fn test_playback_before_start() {
        let mut s = session();
        assert_eq!(s.playback_state(), PlaybackState::NotStarted);
        assert_matches!(
            s.advance(),
            Err(PlannerError::Core(CoreError::PlaybackNotStarted))
        );
        assert!(s.guidance().is_none());
    }
}
