//! Point-in-element tests for drop targets.
//!
//! Rotation is ignored: a rotated rectangle is tested against its unrotated
//! footprint.

use crate::element::{Element, PixelShape};
use crate::types::Point;
use crate::units::UnitScale;

/// Whether a pixel-space point lies on `element`.
///
/// Round elements use the inscribed circle of diameter `width_px`; all
/// others use the inclusive axis-aligned rectangle.
pub fn point_in_element(point: Point, element: &Element, scale: &UnitScale) -> bool {
    match element.pixel_shape(scale) {
        PixelShape::Circle { center, radius } => point.distance_to(center) <= radius,
        PixelShape::Rect(rect) => rect.contains(point),
    }
}

/// The last-drawn element under `point` that passes `filter`.
///
/// Elements are drawn in slice order, so the last match is on top.
pub fn topmost_at<'a>(
    point: Point,
    elements: &'a [Element],
    scale: &UnitScale,
    filter: impl Fn(&Element) -> bool,
) -> Option<&'a Element> {
    elements
        .iter()
        .rev()
        .find(|&e| filter(e) && point_in_element(point, e, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ElementKind;

    const SCALE: UnitScale = UnitScale::DEFAULT;

    fn round_table_at_origin() -> Element {
        // 1.8 m -> 72 px diameter, centred on (36, 36).
        Element::from_catalog(ElementKind::TableRound, 0.0, 0.0, &SCALE)
    }

    #[test]
    fn test_circle_excludes_bounding_box_corner() {
        let table = round_table_at_origin();
        assert!(point_in_element(Point::new(36.0, 36.0), &table, &SCALE));
        assert!(point_in_element(Point::new(36.0, 1.0), &table, &SCALE));
        assert!(!point_in_element(Point::new(2.0, 2.0), &table, &SCALE));
    }

    #[test]
    fn test_rect_edges_are_inclusive() {
        let booth = Element::from_catalog(ElementKind::BoothStandard, 0.0, 0.0, &SCALE);
        assert!(point_in_element(Point::new(0.0, 0.0), &booth, &SCALE));
        assert!(point_in_element(Point::new(120.0, 120.0), &booth, &SCALE));
        assert!(!point_in_element(Point::new(120.5, 60.0), &booth, &SCALE));
    }

    #[test]
    fn test_rotation_is_ignored() {
        let mut booth = Element::from_catalog(ElementKind::BoothLarge, 0.0, 0.0, &SCALE);
        booth.rotation_deg = 90.0;
        // Inside the unrotated 240x120 footprint only.
        assert!(point_in_element(Point::new(230.0, 10.0), &booth, &SCALE));
    }

    #[test]
    fn test_topmost_prefers_last_drawn() {
        let lower = Element::from_catalog(ElementKind::BoothStandard, 0.0, 0.0, &SCALE);
        let upper = Element::from_catalog(ElementKind::BoothStandard, 40.0, 40.0, &SCALE);
        let elements = vec![lower.clone(), upper.clone()];

        let hit = topmost_at(Point::new(60.0, 60.0), &elements, &SCALE, |_| true);
        assert_eq!(hit.map(|e| e.id), Some(upper.id));

        let hit = topmost_at(Point::new(10.0, 10.0), &elements, &SCALE, |_| true);
        assert_eq!(hit.map(|e| e.id), Some(lower.id));
    }

    #[test]
    fn test_topmost_respects_filter() {
        let booth = Element::from_catalog(ElementKind::BoothStandard, 0.0, 0.0, &SCALE);
        let stage = Element::from_catalog(ElementKind::Stage, 0.0, 0.0, &SCALE);
        let elements = vec![booth.clone(), stage];

        let hit = topmost_at(Point::new(20.0, 20.0), &elements, &SCALE, |e| {
            e.is_capacity_bearing()
        });
        assert_eq!(hit.map(|e| e.id), Some(booth.id));
        assert!(topmost_at(Point::new(900.0, 900.0), &elements, &SCALE, |_| true).is_none());
    }
}
