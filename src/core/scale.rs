use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Tuning for value-scale domain fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScaleTuning {
    /// Headroom added above the data maximum so the topmost value does not
    /// touch the plot edge.
    pub headroom_ratio: f64,
    /// Domain maximum substituted when no finite values exist.
    pub fallback_max: f64,
}

impl Default for ValueScaleTuning {
    fn default() -> Self {
        Self {
            headroom_ratio: 0.1,
            fallback_max: 100.0,
        }
    }
}

impl ValueScaleTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.headroom_ratio.is_finite() || self.headroom_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "value scale headroom ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.fallback_max.is_finite() || self.fallback_max <= 0.0 {
            return Err(ChartError::InvalidData(
                "value scale fallback max must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Span substituted when a fitted domain collapses to a single value.
const DEGENERATE_SPAN: f64 = 1.0;

fn normalize_domain(start: f64, end: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale domain must be finite".to_owned(),
        ));
    }
    if start == end {
        // Degenerate domain: widen around the value instead of dividing by zero.
        return Ok((start - DEGENERATE_SPAN / 2.0, start + DEGENERATE_SPAN / 2.0));
    }
    Ok((start, end))
}

fn normalize_range(start: f64, end: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() || start == end {
        return Err(ChartError::InvalidData(
            "scale range must be finite and non-empty".to_owned(),
        ));
    }
    Ok((start, end))
}

/// Affine map from a numeric domain to a pixel range with an exact inverse.
///
/// Range start/end are independent so value scales can run top-down
/// (`range = (inner_height, 0)`) without a separate flipped type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = normalize_domain(domain.0, domain.1)?;
        let (range_start, range_end) = normalize_range(range.0, range.1)?;
        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Fits a value scale over `values` with headroom padding.
    ///
    /// Non-finite values are skipped. An empty or all-zero input falls back
    /// to `tuning.fallback_max` so downstream geometry stays defined.
    pub fn fit_values(
        values: impl IntoIterator<Item = f64>,
        range: (f64, f64),
        tuning: ValueScaleTuning,
    ) -> ChartResult<Self> {
        let tuning = tuning.validate()?;
        let mut max_value: f64 = 0.0;
        for value in values {
            if value.is_finite() && value > max_value {
                max_value = value;
            }
        }
        if max_value == 0.0 {
            max_value = tuning.fallback_max;
        }
        Self::new((0.0, max_value * (1.0 + tuning.headroom_ratio)), range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Evenly spaced domain values for grid lines and axis labels.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.domain_start];
        }
        let step = (self.domain_end - self.domain_start) / (count - 1) as f64;
        (0..count)
            .map(|i| self.domain_start + step * i as f64)
            .collect()
    }
}

/// Time axis scale over unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self {
            inner: LinearScale::new(domain, range)?,
        })
    }

    /// Fits the exact data extent (tight fit, no padding).
    ///
    /// Empty input falls back to a unit domain.
    pub fn fit_times(
        times: impl IntoIterator<Item = f64>,
        range: (f64, f64),
    ) -> ChartResult<Self> {
        let mut min_time = f64::INFINITY;
        let mut max_time = f64::NEG_INFINITY;
        for time in times {
            if !time.is_finite() {
                continue;
            }
            min_time = min_time.min(time);
            max_time = max_time.max(time);
        }
        if min_time > max_time {
            min_time = 0.0;
            max_time = 1.0;
        }
        Self::new((min_time, max_time), range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.inner.domain()
    }

    #[must_use]
    pub fn apply(self, time: f64) -> f64 {
        self.inner.apply(time)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.inner.invert(pixel)
    }
}

/// Radial scale for pie/radar charts: value to radius plus per-category angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialScale {
    value_scale: LinearScale,
    categories: usize,
}

impl RadialScale {
    pub fn new(max_value: f64, radius: f64, categories: usize) -> ChartResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "radial scale radius must be finite and > 0".to_owned(),
            ));
        }
        if categories == 0 {
            return Err(ChartError::InvalidData(
                "radial scale requires at least one category".to_owned(),
            ));
        }
        Ok(Self {
            value_scale: LinearScale::new((0.0, max_value), (0.0, radius))?,
            categories,
        })
    }

    #[must_use]
    pub fn categories(self) -> usize {
        self.categories
    }

    #[must_use]
    pub fn radius(self) -> f64 {
        self.value_scale.range().1
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        self.value_scale.apply(value.clamp(
            self.value_scale.domain().0,
            self.value_scale.domain().1,
        ))
    }

    /// Angle for a category index, first category rotated to 12 o'clock.
    #[must_use]
    pub fn angle(self, index: usize) -> f64 {
        index as f64 * (2.0 * PI / self.categories as f64) - PI / 2.0
    }

    /// Cartesian position (relative to chart center) for a category value.
    #[must_use]
    pub fn point(self, index: usize, value: f64) -> (f64, f64) {
        let angle = self.angle(index);
        let r = self.apply(value);
        (r * angle.cos(), r * angle.sin())
    }
}
