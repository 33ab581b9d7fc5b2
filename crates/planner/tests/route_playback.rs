//! Route planning and guided playback through [`EditSession`].

mod common;

use assert_matches::assert_matches;

use venue_core::catalog::ElementKind;
use venue_core::error::CoreError;
use venue_core::room::Room;
use venue_core::route::{Compass, PlaybackState, RouteMode, StopStatus};
use venue_core::shape::{Boundary, ShapeKind};
use venue_core::types::{ElementId, Point};
use venue_planner::{EditSession, PlannerError};

use common::{centered, open_with_room};

/// Trade-show floor: entrance centered on the origin, booths centered at
/// (10, 0) and (3, 0) m, each with one vendor.
fn tradeshow() -> (EditSession, ElementId, ElementId) {
    let mut room = Room::new("Expo", Boundary::default_for(ShapeKind::Rect));
    room.add_element(centered(ElementKind::Entrance, 0.0, 0.0).with_label("Main Entrance"));
    let far = room
        .add_element(centered(ElementKind::BoothStandard, 10.0, 0.0).with_label("Booth Far"))
        .id;
    let near = room
        .add_element(centered(ElementKind::BoothStandard, 3.0, 0.0).with_label("Booth Near"))
        .id;

    let mut session = open_with_room(room, &["Acme", "Globex"]);
    session.assign(far, 1).unwrap();
    session.assign(near, 2).unwrap();
    (session, far, near)
}

// ---------------------------------------------------------------------------
// Test: nearest booth to the entrance is visited first
// ---------------------------------------------------------------------------

#[test]
fn auto_route_visits_nearest_booth_first() {
    let (mut session, far, near) = tradeshow();

    let route = session.generate_route();

    assert_eq!(route.stops(), &[near, far]);
    assert_eq!(route.mode, RouteMode::Auto);
}

#[test]
fn auto_route_is_deterministic() {
    let (mut session, _, _) = tradeshow();
    let first = session.generate_route().clone();
    let second = session.generate_route().clone();
    assert_eq!(first, second);
}

#[test]
fn unassigned_booths_are_not_stops() {
    let (mut session, far, near) = tradeshow();
    session.unassign(far, 1);

    assert_eq!(session.generate_route().stops(), &[near]);
}

// ---------------------------------------------------------------------------
// Test: guided playback with guidance vectors
// ---------------------------------------------------------------------------

#[test]
fn playback_walks_route_with_guidance() {
    let (mut session, far, near) = tradeshow();
    session.generate_route();
    session.start_playback().unwrap();
    assert_eq!(session.playback_state(), PlaybackState::InProgress);

    // Near booth (3, 0) m to far booth (10, 0) m.
    let leg = session.guidance().unwrap();
    assert_eq!(leg.direction, Compass::E);
    assert_eq!(leg.distance_px, 280.0);
    assert_eq!(leg.distance_m, 7.0);

    assert_eq!(session.advance().unwrap(), PlaybackState::InProgress);
    assert_eq!(session.stop_status(near), Some(StopStatus::Visited));
    assert_eq!(session.stop_status(far), Some(StopStatus::Current));
    // Last stop: nothing ahead.
    assert!(session.guidance().is_none());

    assert_eq!(session.skip().unwrap(), PlaybackState::Completed);
    assert_eq!(session.stop_status(far), Some(StopStatus::Skipped));
    assert!(session.guidance().is_none());

    let progress = session.cursor().unwrap().progress();
    assert_eq!((progress.handled, progress.total), (2, 2));

    session.reset_playback();
    assert_eq!(session.playback_state(), PlaybackState::NotStarted);
}

#[test]
fn guidance_points_from_current_stop_to_next() {
    let mut room = Room::new("Expo", Boundary::default_for(ShapeKind::Rect));
    let north = room.add_element(centered(ElementKind::BoothStandard, 3.5, 1.5)).id;
    let south = room.add_element(centered(ElementKind::BoothStandard, 3.5, 11.5)).id;
    let mut session = open_with_room(room, &["Acme", "Globex"]);
    session.assign(north, 1).unwrap();
    session.assign(south, 2).unwrap();

    assert_eq!(session.generate_route().stops(), &[north, south]);
    session.start_playback().unwrap();

    let leg = session.guidance().unwrap();
    assert_eq!(leg.direction, Compass::S);
    assert_eq!(leg.distance_px, 400.0);
    assert_eq!(leg.distance_m, 10.0);

    // Stepping back onto the first stop restores the same leg.
    session.advance().unwrap();
    session.back().unwrap();
    assert_eq!(session.guidance(), Some(leg));
}

#[test]
fn playback_on_empty_route_is_refused() {
    let (mut session, _, _) = tradeshow();
    assert_matches!(
        session.start_playback(),
        Err(PlannerError::Core(CoreError::EmptyRoute))
    );
    assert_matches!(
        session.skip(),
        Err(PlannerError::Core(CoreError::PlaybackNotStarted))
    );
}

#[test]
fn back_does_not_unmark_visited() {
    let (mut session, _, near) = tradeshow();
    session.generate_route();
    session.start_playback().unwrap();
    session.advance().unwrap();
    session.back().unwrap();

    // Current takes precedence for display; the visit is still counted.
    assert_eq!(session.stop_status(near), Some(StopStatus::Current));
    assert_eq!(session.cursor().unwrap().progress().handled, 1);
}

// ---------------------------------------------------------------------------
// Test: ledger changes that alter eligibility clear the route
// ---------------------------------------------------------------------------

#[test]
fn unassign_invalidates_route_and_playback() {
    let (mut session, far, _) = tradeshow();
    session.generate_route();
    session.start_playback().unwrap();

    session.unassign(far, 1);

    assert!(session.route().is_empty());
    assert_eq!(session.playback_state(), PlaybackState::NotStarted);
}

#[test]
fn filling_an_already_assigned_table_keeps_route() {
    let mut room = Room::new("Hall", Boundary::default_for(ShapeKind::Rect));
    let table = room.add_element(centered(ElementKind::TableRound, 4.0, 4.0)).id;
    let mut session = open_with_room(room, &["Ada", "Ben"]);
    session.assign(table, 1).unwrap();
    session.generate_route();

    session.assign(table, 2).unwrap();

    assert_eq!(session.route().stops(), &[table]);
}

#[test]
fn deleting_a_stop_invalidates_route() {
    let (mut session, far, _) = tradeshow();
    session.generate_route();

    session.delete_element(far).unwrap();

    assert!(session.route().is_empty());
    assert_eq!(session.ledger().element_of(1), None);
}

// ---------------------------------------------------------------------------
// Test: manual route editing
// ---------------------------------------------------------------------------

#[test]
fn manual_toggle_and_reorder() {
    let (mut session, far, near) = tradeshow();

    assert!(session.toggle_route_stop(far).unwrap());
    assert!(session.toggle_route_stop(near).unwrap());
    assert_eq!(session.route().stops(), &[far, near]);
    assert_eq!(session.route().mode, RouteMode::Manual);

    assert!(session.move_stop_up(near));
    assert_eq!(session.route().stops(), &[near, far]);
    assert!(!session.move_stop_down(far));

    assert!(!session.toggle_route_stop(near).unwrap());
    assert_eq!(session.route().stops(), &[far]);
}

#[test]
fn manual_toggle_rejects_facility() {
    let (mut session, _, _) = tradeshow();
    let door = session.add_element(ElementKind::Door).unwrap();

    assert_matches!(
        session.toggle_route_stop(door),
        Err(PlannerError::Core(CoreError::NotEligible { element_id })) if element_id == door
    );
    assert!(session.route().is_empty());
}

// ---------------------------------------------------------------------------
// Test: drawing and exporting the route
// ---------------------------------------------------------------------------

#[test]
fn route_segments_start_at_entrance() {
    let (mut session, _, _) = tradeshow();
    session.generate_route();

    let segments = session.route_segments();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].from, Point::ORIGIN);
    assert_eq!(segments[0].to, Point::new(120.0, 0.0));
    assert_eq!(segments[1].to, Point::new(400.0, 0.0));
}

#[test]
fn route_export_lists_vendors_in_order() {
    let (mut session, _, _) = tradeshow();
    session.generate_route();

    let export = session.route_export().unwrap();
    let text = export.to_text();

    assert_eq!(export.entrance_label.as_deref(), Some("Main Entrance"));
    assert_eq!(export.rows[0].person_name, "Globex");
    assert!(text.contains("Start at Main Entrance"));
    assert!(text.contains("1. Booth Near — Globex"));
    assert!(text.contains("2. Booth Far — Acme"));
}
