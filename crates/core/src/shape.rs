//! Room boundary geometry.
//!
//! A [`Boundary`] is one of three shapes. Everything derived from it
//! (bounding box, edges, area) is computed on demand and never stored, so a
//! vertex edit can never leave a stale bounding box behind.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Point;
use crate::units::UnitScale;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// A polygon boundary never has fewer vertices than this.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// X offset (meters) of a vertex appended by [`Boundary::add_vertex`].
pub const ADD_VERTEX_OFFSET_M: f64 = 2.0;

/// Smallest rectangle side accepted by [`Boundary::set_rect_size`].
pub const MIN_RECT_SIDE_M: f64 = 4.0;

/// Largest rectangle side accepted by [`Boundary::set_rect_size`].
pub const MAX_RECT_SIDE_M: f64 = 80.0;

// ---------------------------------------------------------------------------
// Shape kinds
// ---------------------------------------------------------------------------

/// Discriminant of [`Boundary`], used when the user switches shape type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rect,
    Polygon,
    Sector,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Polygon => "polygon",
            Self::Sector => "sector",
        }
    }
}

// ---------------------------------------------------------------------------
// Boundary
// ---------------------------------------------------------------------------

/// Outer shape of a room or hall. All lengths in meters, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Boundary {
    Rect {
        width_m: f64,
        height_m: f64,
    },
    Polygon {
        vertices: Vec<Point>,
    },
    Sector {
        center: Point,
        radius_m: f64,
        start_angle_deg: f64,
        end_angle_deg: f64,
    },
}

/// Pixel extent of a boundary, used to size the canvas and grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub width_px: f64,
    pub height_px: f64,
}

/// One polygon edge, for length labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
    pub length_m: f64,
    pub midpoint: Point,
}

/// Straight-line distance between two vertices, in meters.
pub fn edge_length(a: Point, b: Point) -> f64 {
    a.distance_to(b)
}

impl Boundary {
    /// Canonical default payload for `kind`.
    pub fn default_for(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rect => Self::Rect {
                width_m: 20.0,
                height_m: 12.0,
            },
            ShapeKind::Polygon => Self::Polygon {
                vertices: vec![
                    Point::new(0.0, 0.0),
                    Point::new(18.0, 0.0),
                    Point::new(18.0, 10.0),
                    Point::new(0.0, 10.0),
                ],
            },
            ShapeKind::Sector => Self::Sector {
                center: Point::new(8.0, 8.0),
                radius_m: 10.0,
                start_angle_deg: -30.0,
                end_angle_deg: 60.0,
            },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect { .. } => ShapeKind::Rect,
            Self::Polygon { .. } => ShapeKind::Polygon,
            Self::Sector { .. } => ShapeKind::Sector,
        }
    }

    /// Replace the whole shape with the default for `kind`.
    ///
    /// This is a reset: nothing of the previous geometry is carried over,
    /// even when `kind` matches the current kind.
    pub fn change_kind(&mut self, kind: ShapeKind) {
        *self = Self::default_for(kind);
    }

    // -- Derivations --------------------------------------------------------

    /// Pixel bounding box. A sector reports its full bounding square
    /// (`2 * radius`) regardless of sweep.
    pub fn bounding_box(&self, scale: &UnitScale) -> BoundingBox {
        let (w, h) = match self {
            Self::Rect { width_m, height_m } => (*width_m, *height_m),
            Self::Polygon { vertices } => {
                let (min_x, max_x) = min_max(vertices.iter().map(|p| p.x));
                let (min_y, max_y) = min_max(vertices.iter().map(|p| p.y));
                (max_x - min_x, max_y - min_y)
            }
            Self::Sector { radius_m, .. } => (radius_m * 2.0, radius_m * 2.0),
        };
        BoundingBox {
            width_px: scale.to_pixels(w),
            height_px: scale.to_pixels(h),
        }
    }

    /// Edges of a polygon in vertex order, closing back to the first vertex.
    /// Other shapes have no labelled edges.
    pub fn edges(&self) -> Vec<Edge> {
        let Self::Polygon { vertices } = self else {
            return Vec::new();
        };
        let n = vertices.len();
        (0..n)
            .map(|i| {
                let start = vertices[i];
                let end = vertices[(i + 1) % n];
                Edge {
                    start,
                    end,
                    length_m: edge_length(start, end),
                    midpoint: start.midpoint(end),
                }
            })
            .collect()
    }

    /// Floor area in square meters.
    ///
    /// Polygons use the shoelace formula; a self-intersecting polygon yields
    /// the net signed area, which is not meaningful.
    pub fn area_m2(&self) -> f64 {
        match self {
            Self::Rect { width_m, height_m } => width_m * height_m,
            Self::Polygon { vertices } => {
                let n = vertices.len();
                let twice: f64 = (0..n)
                    .map(|i| {
                        let a = vertices[i];
                        let b = vertices[(i + 1) % n];
                        a.x * b.y - b.x * a.y
                    })
                    .sum();
                twice.abs() / 2.0
            }
            Self::Sector { radius_m, .. } => {
                let sweep = self.sweep_deg().unwrap_or(0.0).abs().min(360.0);
                PI * radius_m * radius_m * sweep / 360.0
            }
        }
    }

    /// Outline length in meters.
    pub fn perimeter_m(&self) -> f64 {
        match self {
            Self::Rect { width_m, height_m } => 2.0 * (width_m + height_m),
            Self::Polygon { .. } => self.edges().iter().map(|e| e.length_m).sum(),
            Self::Sector { radius_m, .. } => {
                let sweep = self.sweep_deg().unwrap_or(0.0).abs().min(360.0);
                let arc = 2.0 * PI * radius_m * sweep / 360.0;
                if sweep >= 360.0 {
                    arc
                } else {
                    arc + 2.0 * radius_m
                }
            }
        }
    }

    /// Sweep of a sector (`end - start`), as the renderer draws it.
    pub fn sweep_deg(&self) -> Option<f64> {
        match self {
            Self::Sector {
                start_angle_deg,
                end_angle_deg,
                ..
            } => Some(end_angle_deg - start_angle_deg),
            _ => None,
        }
    }

    pub fn vertex_count(&self) -> Option<usize> {
        match self {
            Self::Polygon { vertices } => Some(vertices.len()),
            _ => None,
        }
    }

    // -- Polygon editing ----------------------------------------------------

    /// Replace the vertex at `index`.
    pub fn mutate_vertex(&mut self, index: usize, point: Point) -> Result<(), CoreError> {
        let vertices = self.vertices_mut()?;
        let len = vertices.len();
        let slot = vertices
            .get_mut(index)
            .ok_or(CoreError::OutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    /// Append a vertex [`ADD_VERTEX_OFFSET_M`] to the right of the last one.
    ///
    /// No self-intersection check is made.
    pub fn add_vertex(&mut self) -> Result<Point, CoreError> {
        let vertices = self.vertices_mut()?;
        let last = vertices.last().copied().unwrap_or(Point::ORIGIN);
        let point = Point::new(last.x + ADD_VERTEX_OFFSET_M, last.y);
        vertices.push(point);
        Ok(point)
    }

    /// Drop the last vertex, refusing to go below [`MIN_POLYGON_VERTICES`].
    pub fn remove_vertex(&mut self) -> Result<Point, CoreError> {
        let vertices = self.vertices_mut()?;
        if vertices.len() <= MIN_POLYGON_VERTICES {
            return Err(CoreError::BelowMinimumVertices {
                count: vertices.len(),
            });
        }
        vertices.pop().ok_or(CoreError::BelowMinimumVertices { count: 0 })
    }

    fn vertices_mut(&mut self) -> Result<&mut Vec<Point>, CoreError> {
        match self {
            Self::Polygon { vertices } => Ok(vertices),
            _ => Err(CoreError::NotPolygon),
        }
    }

    // -- Rect / sector editing ---------------------------------------------

    /// Set rectangle dimensions, clamping each side to
    /// [`MIN_RECT_SIDE_M`]..=[`MAX_RECT_SIDE_M`].
    ///
    /// A non-rect boundary is replaced by a rect.
    pub fn set_rect_size(&mut self, width_m: f64, height_m: f64) -> Result<(), CoreError> {
        if !width_m.is_finite() || !height_m.is_finite() {
            return Err(CoreError::Validation(
                "rect dimensions must be finite numbers".to_string(),
            ));
        }
        *self = Self::Rect {
            width_m: width_m.clamp(MIN_RECT_SIDE_M, MAX_RECT_SIDE_M),
            height_m: height_m.clamp(MIN_RECT_SIDE_M, MAX_RECT_SIDE_M),
        };
        Ok(())
    }

    /// Replace the sector payload. Angles are stored as given.
    pub fn set_sector(
        &mut self,
        center: Point,
        radius_m: f64,
        start_angle_deg: f64,
        end_angle_deg: f64,
    ) -> Result<(), CoreError> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(CoreError::Validation(format!(
                "sector radius must be a positive number, got {radius_m}"
            )));
        }
        *self = Self::Sector {
            center,
            radius_m,
            start_angle_deg,
            end_angle_deg,
        };
        Ok(())
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
