//! Placed elements and their transform contract.
//!
//! A persisted [`Element`] is always at rest: it stores its true size in
//! meters and has no scale factors. A resize gesture works on a separate
//! [`LiveTransform`] that is either folded into the element by
//! [`Element::commit_resize`] or simply dropped when the gesture is
//! abandoned.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::catalog::{ElementKind, RenderHint};
use crate::types::{ElementId, Point};
use crate::units::UnitScale;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Where a freshly added catalog element lands (meters, both axes).
pub const DEFAULT_PLACEMENT_M: f64 = 2.0;

/// Distance (pixels) between a rect table's edge and its seat markers.
pub const SEAT_OFFSET_PX: f64 = 15.0;

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A table, chair, booth, door or other object placed in a room.
///
/// `x_m`/`y_m` locate the top-left corner of the unrotated footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub label: String,
    pub x_m: f64,
    pub y_m: f64,
    pub width_m: f64,
    pub height_m: f64,
    /// Clockwise degrees. Never normalized; may exceed 360 or be negative.
    pub rotation_deg: f64,
    pub seat_capacity: u32,
}

/// Pixel-space footprint of an element, ignoring rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Inclusive containment check.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// What the renderer draws for an element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PixelShape {
    Circle { center: Point, radius: f64 },
    Rect(PixelRect),
}

/// A seat marker drawn around a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeatPosition {
    pub x_px: f64,
    pub y_px: f64,
    /// Direction the seat faces, radians.
    pub angle_rad: f64,
}

impl Element {
    /// Build an element from catalog defaults at a pixel position.
    ///
    /// The position is snapped to the grid; size and seats come from the
    /// catalog entry for `kind`.
    pub fn from_catalog(kind: ElementKind, x_px: f64, y_px: f64, scale: &UnitScale) -> Self {
        let entry = kind.entry();
        Self {
            id: ElementId::new_v4(),
            kind,
            label: entry.label.to_string(),
            x_m: scale.snap_to_meters(x_px),
            y_m: scale.snap_to_meters(y_px),
            width_m: entry.default_width_m,
            height_m: entry.default_height_m,
            rotation_deg: 0.0,
            seat_capacity: entry.default_capacity,
        }
    }

    /// Build an element from catalog defaults at [`DEFAULT_PLACEMENT_M`].
    pub fn from_catalog_default(kind: ElementKind, scale: &UnitScale) -> Self {
        let at = scale.to_pixels(DEFAULT_PLACEMENT_M);
        Self::from_catalog(kind, at, at, scale)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_size(mut self, width_m: f64, height_m: f64) -> Self {
        self.width_m = width_m;
        self.height_m = height_m;
        self
    }

    pub fn with_capacity(mut self, seat_capacity: u32) -> Self {
        self.seat_capacity = seat_capacity;
        self
    }

    // -- Transform ----------------------------------------------------------

    /// Drag commit: snap a pixel position to the grid and store it in meters.
    ///
    /// Overlap with other elements is allowed.
    pub fn move_to(&mut self, x_px: f64, y_px: f64, scale: &UnitScale) {
        self.x_m = scale.snap_to_meters(x_px);
        self.y_m = scale.snap_to_meters(y_px);
    }

    /// Resize commit: fold the live scale into grid-aligned width/height.
    ///
    /// Each side becomes `max(grid, snap(size_px * live_scale))`. Rotation is
    /// stored exactly as the gesture left it.
    pub fn commit_resize(&mut self, live: LiveTransform, scale: &UnitScale) {
        let grid = scale.grid_px();
        let raw_w = scale.to_pixels(self.width_m) * live.scale_x;
        let raw_h = scale.to_pixels(self.height_m) * live.scale_y;
        self.width_m = scale.to_meters(grid.max(scale.snap(raw_w)));
        self.height_m = scale.to_meters(grid.max(scale.snap(raw_h)));
        self.rotation_deg = live.rotation_deg;
    }

    // -- Geometry queries ---------------------------------------------------

    /// Whether the element is drawn (and hit-tested) as a circle.
    pub fn is_round(&self) -> bool {
        self.kind.render_hint() == RenderHint::Circle
    }

    /// Whether people or vendors can be assigned here.
    pub fn is_capacity_bearing(&self) -> bool {
        self.seat_capacity > 0
    }

    pub fn center_m(&self) -> Point {
        Point::new(self.x_m + self.width_m / 2.0, self.y_m + self.height_m / 2.0)
    }

    pub fn center_px(&self, scale: &UnitScale) -> Point {
        let c = self.center_m();
        Point::new(scale.to_pixels(c.x), scale.to_pixels(c.y))
    }

    pub fn pixel_rect(&self, scale: &UnitScale) -> PixelRect {
        PixelRect {
            x: scale.to_pixels(self.x_m),
            y: scale.to_pixels(self.y_m),
            width: scale.to_pixels(self.width_m),
            height: scale.to_pixels(self.height_m),
        }
    }

    /// Render outline: round elements are a circle of diameter `width`.
    pub fn pixel_shape(&self, scale: &UnitScale) -> PixelShape {
        let rect = self.pixel_rect(scale);
        if self.is_round() {
            PixelShape::Circle {
                center: rect.center(),
                radius: rect.width / 2.0,
            }
        } else {
            PixelShape::Rect(rect)
        }
    }

    /// Seat markers around a table, in pixels.
    ///
    /// Round tables spread seats evenly around the rim starting at the top.
    /// Rect and square tables put `floor(n/2)` seats above and `ceil(n/2)`
    /// below. Other kinds have no seat markers.
    pub fn seat_positions(&self, scale: &UnitScale) -> Vec<SeatPosition> {
        let n = self.seat_capacity as usize;
        if n == 0 {
            return Vec::new();
        }
        let rect = self.pixel_rect(scale);

        match self.kind {
            ElementKind::TableRound => {
                let c = rect.center();
                let r = rect.width / 2.0;
                (0..n)
                    .map(|i| {
                        let angle = (i as f64 / n as f64) * 2.0 * PI - FRAC_PI_2;
                        SeatPosition {
                            x_px: c.x + r * angle.cos(),
                            y_px: c.y + r * angle.sin(),
                            angle_rad: angle + FRAC_PI_2,
                        }
                    })
                    .collect()
            }
            ElementKind::TableRect | ElementKind::TableSquare => {
                let top = n / 2;
                let bottom = n - top;
                let spacing = rect.width / (bottom as f64 + 1.0);
                let mut seats = Vec::with_capacity(n);
                for i in 0..top {
                    seats.push(SeatPosition {
                        x_px: rect.x + spacing * (i as f64 + 1.0),
                        y_px: rect.y - SEAT_OFFSET_PX,
                        angle_rad: 0.0,
                    });
                }
                for i in 0..bottom {
                    seats.push(SeatPosition {
                        x_px: rect.x + spacing * (i as f64 + 1.0),
                        y_px: rect.y + rect.height + SEAT_OFFSET_PX,
                        angle_rad: PI,
                    });
                }
                seats
            }
            _ => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// LiveTransform
// ---------------------------------------------------------------------------

/// Transient state of an in-progress resize/rotate gesture.
///
/// Never persisted. Holding one does not change the element it was started
/// from; only [`Element::commit_resize`] does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation_deg: f64,
}

impl LiveTransform {
    /// Gesture start: unit scale and the element's current rotation.
    pub fn identity(element: &Element) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            rotation_deg: element.rotation_deg,
        }
    }

    pub fn new(scale_x: f64, scale_y: f64, rotation_deg: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            rotation_deg,
        }
    }

    /// Clamp the scale so neither side of `element` drops below one grid
    /// unit.
    pub fn clamped(self, element: &Element, scale: &UnitScale) -> Self {
        let grid = scale.grid_px();
        let min_factor = |size_m: f64| {
            let size_px = scale.to_pixels(size_m);
            if size_px > 0.0 {
                grid / size_px
            } else {
                1.0
            }
        };
        Self {
            scale_x: self.scale_x.max(min_factor(element.width_m)),
            scale_y: self.scale_y.max(min_factor(element.height_m)),
            rotation_deg: self.rotation_deg,
        }
    }

    /// Live pixel size of `element` under this transform, for drawing the
    /// gesture preview.
    pub fn live_size_px(&self, element: &Element, scale: &UnitScale) -> (f64, f64) {
        (
            scale.to_pixels(element.width_m) * self.scale_x,
            scale.to_pixels(element.height_m) * self.scale_y,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
