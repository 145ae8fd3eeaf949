//! Pointer-to-domain queries and shared hover state.
//!
//! The interaction engine never owns rendering: it converts raw pointer
//! coordinates into domain queries and records the result on the owning
//! chart session, which renderers consume read-only.

mod nearest;

pub use nearest::nearest_index;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Result of the nearest-point query for the hovered x position.
///
/// Owned by the chart session, written exclusively by the interaction
/// engine, cleared on pointer-leave. At most one active target per chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    /// Index of the selected data point.
    pub index: usize,
    /// Pixel x of the selected point (plot coordinates).
    pub x: f64,
    /// Pixel y per configured series key, so multi-series tooltips align on
    /// one x. Series with no value at this point are absent.
    pub series_y: IndexMap<String, f64>,
}

/// Per-slice interaction snapshot derived from the single hovered index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceInteraction {
    pub is_hovered: bool,
    /// Some other slice is hovered; this one dims but stays visible.
    pub is_faded: bool,
}

impl SliceInteraction {
    #[must_use]
    pub fn for_index(index: usize, hovered: Option<usize>) -> Self {
        match hovered {
            Some(active) if active == index => Self {
                is_hovered: true,
                is_faded: false,
            },
            Some(_) => Self {
                is_hovered: false,
                is_faded: true,
            },
            None => Self {
                is_hovered: false,
                is_faded: false,
            },
        }
    }
}

/// Converts a pointer position to polar coordinates around `center`,
/// using the d3 angle convention (0 at 12 o'clock, clockwise positive,
/// normalized into `[0, 2π)`).
#[must_use]
pub fn pointer_polar(x: f64, y: f64, center: (f64, f64)) -> (f64, f64) {
    let dx = x - center.0;
    let dy = y - center.1;
    let radius = (dx * dx + dy * dy).sqrt();
    let mut angle = dx.atan2(-dy);
    if angle < 0.0 {
        angle += 2.0 * std::f64::consts::PI;
    }
    (angle, radius)
}

/// Ray-casting point-in-polygon test for radar area hit-testing.
///
/// Vertices are in pixel coordinates relative to the chart center.
#[must_use]
pub fn point_in_polygon(x: f64, y: f64, vertices: &[(f64, f64)]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}
