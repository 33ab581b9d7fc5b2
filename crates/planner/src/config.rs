use std::str::FromStr;

use venue_core::units::{UnitScale, GRID_SIZE_M, PX_PER_METER};

use crate::error::{PlannerError, PlannerResult};

/// Default cap on elements placed in one room.
pub const DEFAULT_MAX_ELEMENTS: usize = 500;

/// Planner configuration loaded from environment variables.
///
/// All fields have defaults matching the standard 40 px/m canvas with a
/// half-meter grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Canvas pixels per meter (default: `40`).
    pub px_per_meter: f64,
    /// Grid quantum in meters (default: `0.5`).
    pub grid_size_m: f64,
    /// Maximum elements per room (default: `500`).
    pub max_elements: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            px_per_meter: PX_PER_METER,
            grid_size_m: GRID_SIZE_M,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `VENUE_PX_PER_METER` | `40`    |
    /// | `VENUE_GRID_SIZE_M`  | `0.5`   |
    /// | `VENUE_MAX_ELEMENTS` | `500`   |
    pub fn from_env() -> PlannerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PlannerResult<Self> {
        let defaults = Self::default();

        let px_per_meter = parse_or(&lookup, "VENUE_PX_PER_METER", defaults.px_per_meter)?;
        let grid_size_m = parse_or(&lookup, "VENUE_GRID_SIZE_M", defaults.grid_size_m)?;
        let max_elements = parse_or(&lookup, "VENUE_MAX_ELEMENTS", defaults.max_elements)?;

        let config = Self {
            px_per_meter,
            grid_size_m,
            max_elements,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject scales that would break snapping or conversion.
    pub fn validate(&self) -> PlannerResult<()> {
        if !(self.px_per_meter.is_finite() && self.px_per_meter > 0.0) {
            return Err(PlannerError::Config(format!(
                "VENUE_PX_PER_METER must be positive, got {}",
                self.px_per_meter
            )));
        }
        if !(self.grid_size_m.is_finite() && self.grid_size_m > 0.0) {
            return Err(PlannerError::Config(format!(
                "VENUE_GRID_SIZE_M must be positive, got {}",
                self.grid_size_m
            )));
        }
        if self.max_elements == 0 {
            return Err(PlannerError::Config(
                "VENUE_MAX_ELEMENTS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn unit_scale(&self) -> UnitScale {
        UnitScale::new(self.px_per_meter, self.grid_size_m)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> PlannerResult<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PlannerError::Config(format!("{key} must be a number, got '{raw}'"))),
    }
}
