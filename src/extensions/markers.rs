use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::types::datetime_to_unix_seconds;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Caller-supplied side effect attached to a marker.
///
/// This is the only engine surface that reports caller side effects:
/// interaction returns the action, the host performs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerAction {
    /// Navigate to a URL.
    Href(String),
    /// Invoke a host-registered callback by identifier.
    Callback(String),
}

/// One event marker anchored at a time position on the x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMarker {
    /// Unix seconds on the chart's time axis.
    pub time: f64,
    /// Icon identifier resolved by the host (the engine never rasterizes it).
    pub icon: String,
    pub title: String,
    pub description: Option<String>,
    pub color: Option<Color>,
    pub action: Option<MarkerAction>,
}

impl ChartMarker {
    #[must_use]
    pub fn new(time: f64, icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            time,
            icon: icon.into(),
            title: title.into(),
            description: None,
            color: None,
            action: None,
        }
    }

    #[must_use]
    pub fn at_date(date: DateTime<Utc>, icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(datetime_to_unix_seconds(date), icon, title)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: MarkerAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Fixed layout parameters for fan-out expansion of co-located markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerFanConfig {
    pub radius: f64,
    /// Total fan arc in degrees, centered above the anchor.
    pub arc_degrees: f64,
    /// Per-member expansion stagger.
    pub stagger_seconds: f64,
}

impl Default for MarkerFanConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            arc_degrees: 160.0,
            stagger_seconds: 0.04,
        }
    }
}

impl MarkerFanConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker fan radius must be finite and > 0".to_owned(),
            ));
        }
        if !self.arc_degrees.is_finite() || self.arc_degrees <= 0.0 || self.arc_degrees > 360.0 {
            return Err(ChartError::InvalidData(
                "marker fan arc must be in (0, 360] degrees".to_owned(),
            ));
        }
        if !self.stagger_seconds.is_finite() || self.stagger_seconds < 0.0 {
            return Err(ChartError::InvalidData(
                "marker fan stagger must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Offsets (relative to the anchor) for each fanned member, evenly spaced
    /// across the arc. A single member sits at the arc center, straight up.
    #[must_use]
    pub fn positions(self, count: usize) -> SmallVec<[(f64, f64); 8]> {
        if count == 0 {
            return SmallVec::new();
        }
        let start = -90.0 - self.arc_degrees / 2.0;
        let step = if count > 1 {
            self.arc_degrees / (count - 1) as f64
        } else {
            0.0
        };
        (0..count)
            .map(|i| {
                let degrees = if count > 1 {
                    start + i as f64 * step
                } else {
                    -90.0
                };
                let radians = degrees.to_radians();
                (radians.cos() * self.radius, radians.sin() * self.radius)
            })
            .collect()
    }
}

/// Markers collapsed onto one x anchor.
///
/// `members` index into the caller's marker list in time order; groups of
/// size > 1 carry a count badge and expand into a fan on hover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerGroup {
    pub x: f64,
    pub members: Vec<usize>,
}

impl MarkerGroup {
    #[must_use]
    pub fn badge_count(&self) -> Option<usize> {
        (self.members.len() > 1).then_some(self.members.len())
    }
}

/// Pixel distance within which two markers share an anchor.
const GROUP_X_EPSILON: f64 = 0.5;

/// Groups markers by x pixel position.
///
/// `x_of` maps a marker's time to its pixel x (the caller closes over its
/// time scale). Markers with non-finite times or positions are dropped.
#[must_use]
pub fn group_markers_by_x(
    markers: &[ChartMarker],
    mut x_of: impl FnMut(f64) -> f64,
) -> Vec<MarkerGroup> {
    let mut anchored: Vec<(f64, usize)> = markers
        .iter()
        .enumerate()
        .filter(|(_, marker)| marker.time.is_finite())
        .map(|(index, marker)| (x_of(marker.time), index))
        .filter(|(x, _)| x.is_finite())
        .collect();
    anchored.sort_by_key(|&(x, index)| (OrderedFloat(x), index));

    let mut groups: Vec<MarkerGroup> = Vec::new();
    for (x, index) in anchored {
        match groups.last_mut() {
            Some(group) if (x - group.x).abs() <= GROUP_X_EPSILON => {
                group.members.push(index);
            }
            _ => groups.push(MarkerGroup {
                x,
                members: vec![index],
            }),
        }
    }
    groups
}
