use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Plot margins in pixels around the inner drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 40.0,
            bottom: 40.0,
            left: 40.0,
        }
    }
}

impl Margin {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.top, "top"),
            (self.right, "right"),
            (self.bottom, "bottom"),
            (self.left, "left"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn inner_width(self, viewport: Viewport) -> f64 {
        (f64::from(viewport.width) - self.left - self.right).max(0.0)
    }

    #[must_use]
    pub fn inner_height(self, viewport: Viewport) -> f64 {
        (f64::from(viewport.height) - self.top - self.bottom).max(0.0)
    }
}

/// One data record: a designated x value plus named numeric fields.
///
/// Insertion order of records defines render/x order; field insertion order
/// defines series order for tooltips. Fields holding non-finite values are
/// treated as absent rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    x: f64,
    fields: IndexMap<String, f64>,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(x: f64) -> Self {
        Self {
            x,
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn from_date(date: DateTime<Utc>) -> Self {
        Self::new(datetime_to_unix_seconds(date))
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the named field when present and finite.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).copied().filter(|value| value.is_finite())
    }

    #[must_use]
    pub fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
