use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::animation::{SpringConfig, SpringId, Timeline, stagger_delay};
use crate::api::lifecycle::Lifecycle;
use crate::composition::{
    ChartChild, ChartFamily, RenderPlan, SeriesConfig, classify, series_configs, validate_family,
};
use crate::core::curve::{CurveKind, line_path};
use crate::core::path::SampledPath;
use crate::core::scale::{LinearScale, TimeScale, ValueScaleTuning};
use crate::core::types::{Margin, SeriesPoint, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::markers::{MarkerAction, MarkerGroup, group_markers_by_x};
use crate::interaction::{TooltipState, nearest_index};
use crate::render::{LayeredFrame, build_cartesian_frame};

/// Entrance stagger for series reveals: `0.1 + index * 0.08` seconds.
const SERIES_STAGGER_BASE: f64 = 0.1;
const SERIES_STAGGER_INCREMENT: f64 = 0.08;

/// Binary-search tolerance for highlight segment lookup, in pixels.
const HIGHLIGHT_TOLERANCE_PX: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartesianChartConfig {
    /// Record field holding the x value when building from raw records.
    pub x_data_key: String,
    pub margin: Margin,
    /// Entrance duration gating interaction, in milliseconds.
    pub animation_duration_ms: f64,
    pub value_tuning: ValueScaleTuning,
}

impl Default for CartesianChartConfig {
    fn default() -> Self {
        Self {
            x_data_key: "date".to_owned(),
            margin: Margin::default(),
            animation_duration_ms: 1100.0,
            value_tuning: ValueScaleTuning::default(),
        }
    }
}

impl CartesianChartConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if self.x_data_key.is_empty() {
            return Err(ChartError::InvalidData(
                "x data key must not be empty".to_owned(),
            ));
        }
        if !self.animation_duration_ms.is_finite() || self.animation_duration_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "animation duration must be finite and >= 0".to_owned(),
            ));
        }
        let margin = self.margin.validate()?;
        let value_tuning = self.value_tuning.validate()?;
        Ok(Self {
            margin,
            value_tuning,
            ..self
        })
    }
}

/// Cached per-series projection, rebuilt on data/size changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGeometry {
    pub points: Vec<(f64, f64)>,
    pub curve: CurveKind,
    pub sampled: SampledPath,
}

/// Shared session for one area/line/bar chart instance.
///
/// All children read this session; mutation flows exclusively through its
/// named methods (pointer handlers, resize, data updates), keeping a single
/// writer per chart instance.
#[derive(Debug)]
pub struct CartesianChart {
    config: CartesianChartConfig,
    data: Vec<SeriesPoint>,
    children: Vec<ChartChild>,
    plan: RenderPlan,
    series: Vec<SeriesConfig>,
    viewport: Viewport,
    x_scale: TimeScale,
    y_scale: LinearScale,
    column_width: f64,
    date_labels: Vec<String>,
    geometry: IndexMap<String, SeriesGeometry>,
    tooltip: Option<TooltipState>,
    highlight_segments: IndexMap<String, (f64, f64)>,
    highlight_offsets: IndexMap<String, SpringId>,
    series_entrance: Vec<SpringId>,
    marker_groups: Vec<MarkerGroup>,
    hovered_marker_group: Option<usize>,
    lifecycle: Lifecycle,
    timeline: Timeline,
}

impl CartesianChart {
    pub fn new(
        data: Vec<SeriesPoint>,
        children: Vec<ChartChild>,
        viewport: Viewport,
        config: CartesianChartConfig,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let config = config.validate()?;
        validate_family(&children, ChartFamily::Cartesian)?;

        // Marker grouping and hover state track one item list per chart.
        let marker_sets = children
            .iter()
            .filter(|child| matches!(child, ChartChild::Markers(_)))
            .count();
        if marker_sets > 1 {
            return Err(ChartError::ContextMisuse(
                "`Markers` is declared more than once; merge the items into one child".to_owned(),
            ));
        }

        // Series configuration and classification resolve in this same pass,
        // before any frame is built, so first-paint geometry is defined.
        let series = series_configs(&children)?;
        let plan = classify(&children);

        let mut lifecycle = Lifecycle::new(config.animation_duration_ms / 1000.0);
        lifecycle.mount();

        let mut chart = Self {
            config,
            data,
            children,
            plan,
            series,
            viewport,
            x_scale: TimeScale::fit_times([], (0.0, 1.0))?,
            y_scale: LinearScale::fit_values([], (1.0, 0.0), ValueScaleTuning::default())?,
            column_width: 0.0,
            date_labels: Vec::new(),
            geometry: IndexMap::new(),
            tooltip: None,
            highlight_segments: IndexMap::new(),
            highlight_offsets: IndexMap::new(),
            series_entrance: Vec::new(),
            marker_groups: Vec::new(),
            hovered_marker_group: None,
            lifecycle,
            timeline: Timeline::new(),
        };

        chart.refit()?;
        chart.spawn_animation_state();
        tracing::debug!(
            points = chart.data.len(),
            series = chart.series.len(),
            "cartesian chart mounted"
        );
        Ok(chart)
    }

    /// Builds the data array from raw JSON-like records, reading the x value
    /// from `config.x_data_key` (RFC 3339 date string or unix seconds) and
    /// every other numeric field as a named series field.
    pub fn records_to_points(
        records: &[serde_json::Value],
        x_data_key: &str,
    ) -> ChartResult<Vec<SeriesPoint>> {
        let mut points = Vec::with_capacity(records.len());
        for record in records {
            let object = record.as_object().ok_or_else(|| {
                ChartError::InvalidData("data records must be JSON objects".to_owned())
            })?;
            let x_value = object.get(x_data_key).ok_or_else(|| {
                ChartError::InvalidData(format!("record is missing x field `{x_data_key}`"))
            })?;
            let x = match x_value {
                serde_json::Value::String(text) => text
                    .parse::<DateTime<Utc>>()
                    .map_err(|_| {
                        ChartError::InvalidData(format!("`{text}` is not an RFC 3339 date"))
                    })
                    .map(crate::core::types::datetime_to_unix_seconds)?,
                serde_json::Value::Number(number) => number.as_f64().ok_or_else(|| {
                    ChartError::InvalidData("x value is not representable as f64".to_owned())
                })?,
                _ => {
                    return Err(ChartError::InvalidData(
                        "x value must be a date string or a number".to_owned(),
                    ));
                }
            };

            let mut point = SeriesPoint::new(x);
            for (key, value) in object {
                if key == x_data_key {
                    continue;
                }
                // Non-numeric fields are absent, not errors.
                if let Some(number) = value.as_f64() {
                    point = point.with_field(key.clone(), number);
                }
            }
            points.push(point);
        }
        Ok(points)
    }

    fn refit(&mut self) -> ChartResult<()> {
        // Strict per-frame order: dimensions, then scales, then geometry.
        let inner_width = self.config.margin.inner_width(self.viewport);
        let inner_height = self.config.margin.inner_height(self.viewport);

        self.x_scale =
            TimeScale::fit_times(self.data.iter().map(SeriesPoint::x), (0.0, inner_width.max(1.0)))?;

        let series = &self.series;
        let values = self
            .data
            .iter()
            .flat_map(|point| series.iter().filter_map(|s| point.field(&s.key)));
        self.y_scale =
            LinearScale::fit_values(values, (inner_height.max(1.0), 0.0), self.config.value_tuning)?;

        self.column_width = if self.data.len() < 2 {
            0.0
        } else {
            inner_width / (self.data.len() - 1) as f64
        };

        self.date_labels = self
            .data
            .iter()
            .map(|point| format_date_label(point.x()))
            .collect();

        self.recompute_geometry();
        self.regroup_markers();
        Ok(())
    }

    fn recompute_geometry(&mut self) {
        self.geometry.clear();
        for index in &self.plan.series {
            let (key, curve) = match &self.children[*index] {
                ChartChild::Area(spec) => (spec.data_key.clone(), spec.curve),
                ChartChild::Line(spec) => (spec.data_key.clone(), spec.curve),
                // Bars are projected per column at render time.
                ChartChild::Bar(_) => continue,
                _ => continue,
            };
            let points: Vec<(f64, f64)> = self
                .data
                .iter()
                .filter_map(|point| {
                    point
                        .field(&key)
                        .map(|value| (self.x_scale.apply(point.x()), self.y_scale.apply(value)))
                })
                .collect();
            let sampled = SampledPath::from_commands(&line_path(&points, curve));
            self.geometry.insert(
                key,
                SeriesGeometry {
                    points,
                    curve,
                    sampled,
                },
            );
        }
    }

    fn regroup_markers(&mut self) {
        let x_scale = self.x_scale;
        self.marker_groups = self
            .children
            .iter()
            .find_map(|child| match child {
                ChartChild::Markers(spec) => Some(spec),
                _ => None,
            })
            .map(|spec| group_markers_by_x(&spec.items, |time| x_scale.apply(time)))
            .unwrap_or_default();
        self.hovered_marker_group = None;
    }

    fn spawn_animation_state(&mut self) {
        self.series_entrance = (0..self.series.len())
            .map(|index| {
                self.timeline.spawn_delayed(
                    0.0,
                    1.0,
                    stagger_delay(index, SERIES_STAGGER_BASE, SERIES_STAGGER_INCREMENT),
                    SpringConfig::entrance(),
                )
            })
            .collect();
        self.highlight_offsets = self
            .series
            .iter()
            .map(|series| {
                (
                    series.key.clone(),
                    self.timeline.spawn(0.0, SpringConfig::highlight()),
                )
            })
            .collect();
    }

    /// Advances the entrance clock and every live spring.
    pub fn tick(&mut self, delta_seconds: f64) {
        self.lifecycle.tick(delta_seconds);
        self.timeline.tick(delta_seconds);
    }

    /// Applies a new viewport, refitting scales and geometry in order.
    ///
    /// A resize mid-entrance does not reset the stagger; each element's
    /// delayed target is owned by the timeline and survives untouched.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        self.tooltip = None;
        self.refit()
    }

    /// Replaces the data array. While `Ready` this retargets geometry only;
    /// the entrance is never replayed.
    pub fn set_data(&mut self, data: Vec<SeriesPoint>) -> ChartResult<()> {
        self.data = data;
        self.tooltip = None;
        self.refit()
    }

    /// Tears the session down, cancelling all springs and pending staggers.
    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
        self.timeline = Timeline::new();
        self.series_entrance.clear();
        self.highlight_offsets.clear();
        self.tooltip = None;
        self.hovered_marker_group = None;
    }

    /// Handles a pointer move in viewport coordinates.
    ///
    /// Returns `true` when hover state changed. Interaction is gated until
    /// the entrance completes.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        let _ = y;
        if !self.can_interact() || !x.is_finite() {
            return false;
        }

        let plot_x = x - self.config.margin.left;
        let domain_x = self.x_scale.invert(plot_x);
        let xs: Vec<f64> = self.data.iter().map(SeriesPoint::x).collect();
        let Some(index) = nearest_index(&xs, domain_x) else {
            return false;
        };

        let point = &self.data[index];
        let mut series_y = IndexMap::new();
        for series in &self.series {
            if let Some(value) = point.field(&series.key) {
                series_y.insert(series.key.clone(), self.y_scale.apply(value));
            }
        }

        let next = TooltipState {
            index,
            x: self.x_scale.apply(point.x()),
            series_y,
        };
        let changed = self.tooltip.as_ref() != Some(&next);
        if changed {
            tracing::trace!(index, "hover target changed");
            self.retarget_highlights(index);
            self.tooltip = Some(next);
        }
        changed
    }

    /// Clears hover state unconditionally.
    pub fn on_pointer_leave(&mut self) {
        self.tooltip = None;
        self.hovered_marker_group = None;
    }

    /// Recomputes the highlighted sub-segment around the hovered index for
    /// every series that keeps a sampled path, and retargets its offset
    /// spring so the dash slides rather than jumps.
    fn retarget_highlights(&mut self, index: usize) {
        let start_index = index.saturating_sub(1);
        let end_index = (index + 1).min(self.data.len().saturating_sub(1));
        let start_x = self.x_scale.apply(self.data[start_index].x());
        let end_x = self.x_scale.apply(self.data[end_index].x());

        let mut segments = IndexMap::new();
        for (key, geometry) in &self.geometry {
            if geometry.sampled.length() <= 0.0 {
                continue;
            }
            let start_len = geometry.sampled.length_at_x(start_x, HIGHLIGHT_TOLERANCE_PX);
            let end_len = geometry.sampled.length_at_x(end_x, HIGHLIGHT_TOLERANCE_PX);
            segments.insert(key.clone(), (start_len, end_len));
            if let Some(&spring) = self.highlight_offsets.get(key) {
                self.timeline.retarget(spring, -start_len);
            }
        }
        self.highlight_segments = segments;
    }

    /// Marker hover owns pointer priority over the shared tooltip.
    pub fn on_marker_enter(&mut self, group_index: usize) -> bool {
        if !self.can_interact() || group_index >= self.marker_groups.len() {
            return false;
        }
        self.hovered_marker_group = Some(group_index);
        true
    }

    pub fn on_marker_leave(&mut self) {
        self.hovered_marker_group = None;
    }

    /// Resolves a click on a fanned (or solitary) marker to its action.
    ///
    /// The engine never performs the side effect; the host does.
    #[must_use]
    pub fn on_marker_click(&self, group_index: usize, member: usize) -> Option<MarkerAction> {
        if !self.can_interact() {
            return None;
        }
        let group = self.marker_groups.get(group_index)?;
        let expanded = group.members.len() == 1 || self.hovered_marker_group == Some(group_index);
        if !expanded {
            return None;
        }
        let marker_index = *group.members.get(member)?;
        let spec = self.children.iter().find_map(|child| match child {
            ChartChild::Markers(spec) => Some(spec),
            _ => None,
        })?;
        spec.items.get(marker_index)?.action.clone()
    }

    /// Builds the layered frame for the current state.
    pub fn render(&self) -> ChartResult<LayeredFrame> {
        build_cartesian_frame(self)
    }

    // Read-only session surface consumed by renderers.

    #[must_use]
    pub fn data(&self) -> &[SeriesPoint] {
        &self.data
    }

    #[must_use]
    pub fn children(&self) -> &[ChartChild] {
        &self.children
    }

    #[must_use]
    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }

    #[must_use]
    pub fn series(&self) -> &[SeriesConfig] {
        &self.series
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.config.margin
    }

    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.config.margin.inner_width(self.viewport)
    }

    #[must_use]
    pub fn inner_height(&self) -> f64 {
        self.config.margin.inner_height(self.viewport)
    }

    #[must_use]
    pub fn x_scale(&self) -> TimeScale {
        self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    #[must_use]
    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    #[must_use]
    pub fn date_labels(&self) -> &[String] {
        &self.date_labels
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.lifecycle.is_loaded()
    }

    #[must_use]
    pub fn can_interact(&self) -> bool {
        self.lifecycle.can_interact()
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[must_use]
    pub fn geometry(&self, key: &str) -> Option<&SeriesGeometry> {
        self.geometry.get(key)
    }

    /// Entrance reveal fraction for the series at `series_index`, 0..=1.
    #[must_use]
    pub fn entrance_progress(&self, series_index: usize) -> f64 {
        if self.lifecycle.is_loaded() {
            return 1.0;
        }
        self.series_entrance
            .get(series_index)
            .and_then(|&id| self.timeline.value(id))
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }

    /// Current highlight dash parameters for a series: (dash length, total
    /// path length, animated offset). `None` while nothing is hovered.
    #[must_use]
    pub fn highlight_dash(&self, key: &str) -> Option<(f64, f64, f64)> {
        self.tooltip.as_ref()?;
        let &(start_len, end_len) = self.highlight_segments.get(key)?;
        let total = self.geometry.get(key)?.sampled.length();
        let offset = self
            .highlight_offsets
            .get(key)
            .and_then(|&id| self.timeline.value(id))
            .unwrap_or(-start_len);
        Some(((end_len - start_len).max(0.0), total, offset))
    }

    #[must_use]
    pub fn marker_groups(&self) -> &[MarkerGroup] {
        &self.marker_groups
    }

    #[must_use]
    pub fn hovered_marker_group(&self) -> Option<usize> {
        self.hovered_marker_group
    }
}

fn format_date_label(unix_seconds: f64) -> String {
    DateTime::<Utc>::from_timestamp(unix_seconds as i64, 0)
        .map(|date| date.format("%b %-d").to_string())
        .unwrap_or_default()
}
