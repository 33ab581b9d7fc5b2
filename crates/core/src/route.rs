//! Visit routes over assigned elements and their playback cursor.
//!
//! A [`RoutePlan`] is an ordered list of element ids, built either greedily
//! from an entrance or by toggling stops by hand. Playback runs on a
//! separate [`RouteCursor`] that snapshots the stops when it starts, so
//! editing the plan never corrupts a cursor mid-walk.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::CoreError;
use crate::ledger::AssignmentLedger;
use crate::types::{ElementId, Point};
use crate::units::UnitScale;

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMode {
    #[default]
    Auto,
    Manual,
}

/// Ordered visiting sequence. Stops are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub mode: RouteMode,
    stops: Vec<ElementId>,
}

/// One arrow of a drawn route, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSegment {
    pub from: Point,
    pub to: Point,
}

/// Where a route starts: the entrance's center, or the origin without one.
pub fn route_origin(entrance: Option<&Element>) -> Point {
    entrance.map_or(Point::ORIGIN, Element::center_m)
}

impl RoutePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Greedy nearest-neighbor order over eligible elements.
    ///
    /// Eligible means seat-bearing and currently assigned. The walk starts at
    /// [`route_origin`] and always steps to the closest remaining element;
    /// on an exact tie the one earlier in `elements` wins. Deterministic for
    /// identical input.
    pub fn generate_auto(
        elements: &[Element],
        ledger: &AssignmentLedger,
        entrance: Option<&Element>,
    ) -> Self {
        let eligible = ledger.route_eligible(elements);
        let mut remaining: Vec<&Element> =
            elements.iter().filter(|e| eligible.contains(&e.id)).collect();
        let mut stops = Vec::with_capacity(remaining.len());
        let mut position = route_origin(entrance);

        while !remaining.is_empty() {
            let mut best = 0;
            let mut best_distance = position.distance_to(remaining[0].center_m());
            for (i, candidate) in remaining.iter().enumerate().skip(1) {
                let distance = position.distance_to(candidate.center_m());
                if distance < best_distance {
                    best = i;
                    best_distance = distance;
                }
            }
            let next = remaining.remove(best);
            position = next.center_m();
            stops.push(next.id);
        }

        Self {
            mode: RouteMode::Auto,
            stops,
        }
    }

    pub fn stops(&self) -> &[ElementId] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.stops.contains(&id)
    }

    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.stops.iter().position(|s| *s == id)
    }

    /// Add `element` as the last stop, or remove it if already present.
    ///
    /// Switches the plan to manual mode. Only assigned, seat-bearing
    /// elements may be added; removal is always allowed. Returns whether the
    /// element is a stop afterwards.
    pub fn toggle_manual(
        &mut self,
        element: &Element,
        ledger: &AssignmentLedger,
    ) -> Result<bool, CoreError> {
        if let Some(i) = self.position(element.id) {
            self.mode = RouteMode::Manual;
            self.stops.remove(i);
            return Ok(false);
        }
        if !element.is_capacity_bearing() || !ledger.is_assigned(element.id) {
            return Err(CoreError::NotEligible {
                element_id: element.id,
            });
        }
        self.mode = RouteMode::Manual;
        self.stops.push(element.id);
        Ok(true)
    }

    /// Swap a stop with the one before it. No-op for the first stop or an
    /// unknown id; returns whether the order changed.
    pub fn move_stop_up(&mut self, id: ElementId) -> bool {
        match self.position(id) {
            Some(i) if i > 0 => {
                self.stops.swap(i - 1, i);
                true
            }
            _ => false,
        }
    }

    /// Swap a stop with the one after it. No-op for the last stop.
    pub fn move_stop_down(&mut self, id: ElementId) -> bool {
        match self.position(id) {
            Some(i) if i + 1 < self.stops.len() => {
                self.stops.swap(i, i + 1);
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.stops.clear();
    }

    /// Arrow endpoints for drawing: origin to first stop, then stop to stop.
    ///
    /// Stops missing from `elements` are skipped.
    pub fn segments(
        &self,
        elements: &[Element],
        entrance: Option<&Element>,
        scale: &UnitScale,
    ) -> Vec<RouteSegment> {
        let to_px = |p: Point| Point::new(scale.to_pixels(p.x), scale.to_pixels(p.y));
        let mut from = to_px(route_origin(entrance));
        let mut segments = Vec::with_capacity(self.stops.len());
        for id in &self.stops {
            let Some(element) = elements.iter().find(|e| e.id == *id) else {
                continue;
            };
            let to = element.center_px(scale);
            segments.push(RouteSegment { from, to });
            from = to;
        }
        segments
    }
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    NotStarted,
    InProgress,
    Completed,
}

/// Display status of one stop during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopStatus {
    Current,
    Visited,
    Skipped,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Stops marked visited or skipped.
    pub handled: usize,
    pub total: usize,
}

/// Step cursor over a started route.
///
/// `back` moves the index only; visited and skipped marks are never rolled
/// back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCursor {
    stops: Vec<ElementId>,
    index: usize,
    visited: BTreeSet<ElementId>,
    skipped: BTreeSet<ElementId>,
    completed: bool,
}

impl RouteCursor {
    /// Start playback at the first stop.
    pub fn start(plan: &RoutePlan) -> Result<Self, CoreError> {
        if plan.is_empty() {
            return Err(CoreError::EmptyRoute);
        }
        Ok(Self {
            stops: plan.stops.clone(),
            index: 0,
            visited: BTreeSet::new(),
            skipped: BTreeSet::new(),
            completed: false,
        })
    }

    pub fn state(&self) -> PlaybackState {
        if self.completed {
            PlaybackState::Completed
        } else {
            PlaybackState::InProgress
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Mark the current stop visited and move on. No-op once completed.
    pub fn advance(&mut self) {
        if self.completed {
            return;
        }
        self.visited.insert(self.stops[self.index]);
        self.step();
    }

    /// Mark the current stop skipped and move on. No-op once completed.
    pub fn skip(&mut self) {
        if self.completed {
            return;
        }
        self.skipped.insert(self.stops[self.index]);
        self.step();
    }

    /// Step back one stop. From `Completed` this re-opens playback.
    pub fn back(&mut self) {
        self.completed = false;
        self.index = self.index.saturating_sub(1);
    }

    fn step(&mut self) {
        if self.index + 1 >= self.stops.len() {
            self.completed = true;
        } else {
            self.index += 1;
        }
    }

    /// Stop the visitor is heading to; `None` once completed.
    pub fn current_stop(&self) -> Option<ElementId> {
        if self.completed {
            None
        } else {
            self.stops.get(self.index).copied()
        }
    }

    /// Stop after the current one, where the current leg ends.
    pub fn next_stop(&self) -> Option<ElementId> {
        if self.completed {
            None
        } else {
            self.stops.get(self.index + 1).copied()
        }
    }

    pub fn stop_status(&self, id: ElementId) -> Option<StopStatus> {
        if !self.stops.contains(&id) {
            return None;
        }
        let status = if self.current_stop() == Some(id) {
            StopStatus::Current
        } else if self.visited.contains(&id) {
            StopStatus::Visited
        } else if self.skipped.contains(&id) {
            StopStatus::Skipped
        } else {
            StopStatus::Upcoming
        };
        Some(status)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            handled: self.visited.union(&self.skipped).count(),
            total: self.stops.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Guidance
// ---------------------------------------------------------------------------

/// Eight-way heading on screen (y grows downward, so S is +y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Compass {
    E,
    SE,
    S,
    SW,
    W,
    NW,
    N,
    NE,
}

const COMPASS_ORDER: [Compass; 8] = [
    Compass::E,
    Compass::SE,
    Compass::S,
    Compass::SW,
    Compass::W,
    Compass::NW,
    Compass::N,
    Compass::NE,
];

impl Compass {
    /// Bucket an `atan2(dy, dx)` angle in degrees.
    ///
    /// Each label covers 45 degrees with the upper edge inclusive, so E is
    /// `(-22.5, 22.5]`, SE is `(22.5, 67.5]` and so on.
    pub fn from_angle_deg(angle: f64) -> Self {
        let bucket = ((angle - 22.5) / 45.0).ceil() as i64;
        COMPASS_ORDER[bucket.rem_euclid(8) as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
            Self::N => "N",
            Self::NE => "NE",
        }
    }
}

/// Heading and distance for one leg of the route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Guidance {
    pub direction: Compass,
    pub distance_px: f64,
    pub distance_m: f64,
}

impl Guidance {
    /// Guidance between two pixel-space points.
    pub fn between(from: Point, to: Point, scale: &UnitScale) -> Self {
        let angle = (to.y - from.y).atan2(to.x - from.x).to_degrees();
        let distance_px = from.distance_to(to);
        Self {
            direction: Compass::from_angle_deg(angle),
            distance_px,
            distance_m: scale.to_meters(distance_px),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
