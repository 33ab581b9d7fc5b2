use std::sync::Once;

use venue_core::catalog::ElementKind;
use venue_core::element::Element;
use venue_core::room::Room;
use venue_core::shape::Boundary;
use venue_core::units::UnitScale;
use venue_planner::{EditSession, Person, PlannerConfig, Roster};

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=venue_planner=debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "venue_planner=warn".into()),
            )
            .with_test_writer()
            .init();
    });
}

/// Default 40 px/m, 0.5 m grid configuration.
pub fn test_config() -> PlannerConfig {
    PlannerConfig::default()
}

/// An element of `kind` whose center sits on (`cx`, `cy`) meters.
pub fn centered(kind: ElementKind, cx: f64, cy: f64) -> Element {
    let mut element = Element::from_catalog_default(kind, &UnitScale::DEFAULT);
    element.x_m = cx - element.width_m / 2.0;
    element.y_m = cy - element.height_m / 2.0;
    element
}

/// Empty 24 x 16 m hall with the given roster names (ids from 1).
pub fn open_session(names: &[&str]) -> EditSession {
    open_with_room(
        Room::new(
            "Hall",
            Boundary::Rect {
                width_m: 24.0,
                height_m: 16.0,
            },
        ),
        names,
    )
}

pub fn open_with_room(room: Room, names: &[&str]) -> EditSession {
    init_tracing();
    let roster = Roster::new(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Person::new(i as i64 + 1, *name))
            .collect(),
    );
    let (session, report) = EditSession::open(test_config(), room, roster).unwrap();
    assert!(report.skipped.is_empty());
    session
}
