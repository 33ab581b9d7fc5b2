//! Meter/pixel conversion and grid snapping.
//!
//! Every persisted length is in meters. Rendering and pointer math happen in
//! pixels, so each gesture passes through [`UnitScale`] on its way into the
//! model.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default canvas scale: 1 m is drawn as 40 px.
pub const PX_PER_METER: f64 = 40.0;

/// Default grid quantum in meters.
pub const GRID_SIZE_M: f64 = 0.5;

// ---------------------------------------------------------------------------
// UnitScale
// ---------------------------------------------------------------------------

/// Pixels-per-meter factor plus grid quantum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitScale {
    pub px_per_meter: f64,
    pub grid_size_m: f64,
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl UnitScale {
    pub const DEFAULT: UnitScale = UnitScale {
        px_per_meter: PX_PER_METER,
        grid_size_m: GRID_SIZE_M,
    };

    pub fn new(px_per_meter: f64, grid_size_m: f64) -> Self {
        Self {
            px_per_meter,
            grid_size_m,
        }
    }

    /// Size of one grid cell in pixels.
    pub fn grid_px(&self) -> f64 {
        self.grid_size_m * self.px_per_meter
    }

    pub fn to_pixels(&self, meters: f64) -> f64 {
        meters * self.px_per_meter
    }

    pub fn to_meters(&self, pixels: f64) -> f64 {
        pixels / self.px_per_meter
    }

    /// Round a pixel value to the nearest grid line.
    ///
    /// Idempotent: `snap(snap(x)) == snap(x)`.
    pub fn snap(&self, pixels: f64) -> f64 {
        let grid = self.grid_px();
        (pixels / grid).round() * grid
    }

    /// Snap a pixel value and convert the result to meters.
    pub fn snap_to_meters(&self, pixels: f64) -> f64 {
        self.to_meters(self.snap(pixels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_is_twenty_pixels() {
        assert_eq!(UnitScale::DEFAULT.grid_px(), 20.0);
    }

    #[test]
    fn test_meter_pixel_conversion() {
        let scale = UnitScale::default();
        assert_eq!(scale.to_pixels(2.5), 100.0);
        assert_eq!(scale.to_meters(100.0), 2.5);
        assert_eq!(scale.to_meters(scale.to_pixels(1.8)), 1.8);
    }

    #[test]
    fn test_snap_rounds_to_nearest_grid_line() {
        let scale = UnitScale::default();
        assert_eq!(scale.snap(83.0), 80.0);
        assert_eq!(scale.snap(77.0), 80.0);
        assert_eq!(scale.snap(90.0), 100.0);
        assert_eq!(scale.snap(9.9), 0.0);
        assert_eq!(scale.snap(-11.0), -20.0);
    }

    #[test]
    fn test_snap_is_idempotent() {
        let scale = UnitScale::default();
        for raw in [-137.3, -20.0, 0.0, 3.7, 10.0, 83.0, 119.99, 4001.2] {
            let once = scale.snap(raw);
            assert_eq!(scale.snap(once), once, "snap not idempotent for {raw}");
        }
    }

    #[test]
    fn test_snap_with_custom_scale() {
        let scale = UnitScale::new(50.0, 0.2);
        assert_eq!(scale.grid_px(), 10.0);
        assert_eq!(scale.snap(14.0), 10.0);
        assert_eq!(scale.snap_to_meters(26.0), 0.6);
    }
}
