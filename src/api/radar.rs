use serde::{Deserialize, Serialize};

use crate::animation::{SpringConfig, SpringId, Timeline, stagger_delay};
use crate::api::lifecycle::Lifecycle;
use crate::composition::{ChartChild, ChartFamily, RenderPlan, classify, validate_family};
use crate::core::scale::RadialScale;
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{SliceInteraction, point_in_polygon};
use crate::render::{Color, DEFAULT_RADAR_PALETTE, LayeredFrame, build_radar_frame};

/// Entrance choreography: rings first, then axes, then series polygons
/// vertex by vertex.
const GRID_LEVEL_STAGGER: f64 = 0.08;
const AXIS_EXTRA_DELAY: f64 = 0.2;
const SERIES_STAGGER: f64 = 0.15;
const VERTEX_STAGGER: f64 = 0.06;

/// Opacity a polygon dims to while another series is hovered.
pub const FADED_SERIES_OPACITY: f64 = 0.3;

/// One spoke of the radar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarMetric {
    pub key: String,
    pub label: String,
}

impl RadarMetric {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// One polygon row: a value per metric, in metric order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub label: String,
    pub values: Vec<f64>,
    pub color: Option<Color>,
}

impl RadarSeries {
    #[must_use]
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarChartConfig {
    /// Concentric grid ring count.
    pub levels: usize,
    /// Gap between the outer ring and the viewport edge, leaving room for
    /// metric labels.
    pub margin: f64,
    /// Domain maximum; values are clamped into `0..=max_value`.
    pub max_value: f64,
    pub animation_duration_ms: f64,
}

impl Default for RadarChartConfig {
    fn default() -> Self {
        Self {
            levels: 5,
            margin: 60.0,
            max_value: 100.0,
            animation_duration_ms: 1100.0,
        }
    }
}

impl RadarChartConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if self.levels == 0 {
            return Err(ChartError::InvalidData(
                "radar level count must be >= 1".to_owned(),
            ));
        }
        for (value, name) in [
            (self.margin, "radar margin"),
            (self.animation_duration_ms, "animation duration"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.max_value.is_finite() || self.max_value <= 0.0 {
            return Err(ChartError::InvalidData(
                "radar max value must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone)]
struct SeriesSprings {
    vertices: Vec<SpringId>,
    opacity: SpringId,
}

/// Shared session for one radar chart instance.
#[derive(Debug)]
pub struct RadarChart {
    config: RadarChartConfig,
    metrics: Vec<RadarMetric>,
    series: Vec<RadarSeries>,
    children: Vec<ChartChild>,
    plan: RenderPlan,
    viewport: Viewport,
    center: (f64, f64),
    scale: RadialScale,
    grid_levels: Vec<SpringId>,
    axis_entrance: SpringId,
    series_springs: Vec<SeriesSprings>,
    hovered: Option<usize>,
    lifecycle: Lifecycle,
    timeline: Timeline,
}

impl RadarChart {
    pub fn new(
        metrics: Vec<RadarMetric>,
        series: Vec<RadarSeries>,
        children: Vec<ChartChild>,
        viewport: Viewport,
        config: RadarChartConfig,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let config = config.validate()?;
        validate_family(&children, ChartFamily::Radar)?;
        let plan = classify(&children);

        if metrics.is_empty() {
            return Err(ChartError::InvalidData(
                "radar chart requires at least one metric".to_owned(),
            ));
        }
        for row in &series {
            if row.values.len() != metrics.len() {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has {} values for {} metrics",
                    row.label,
                    row.values.len(),
                    metrics.len()
                )));
            }
        }

        let radius =
            (f64::from(viewport.width.min(viewport.height)) / 2.0 - config.margin).max(1.0);
        let scale = RadialScale::new(config.max_value, radius, metrics.len())?;

        let mut lifecycle = Lifecycle::new(config.animation_duration_ms / 1000.0);
        lifecycle.mount();

        let mut timeline = Timeline::new();
        let grid_levels = (0..config.levels)
            .map(|level| {
                timeline.spawn_delayed(
                    0.0,
                    1.0,
                    stagger_delay(level, 0.0, GRID_LEVEL_STAGGER),
                    SpringConfig::polygon(),
                )
            })
            .collect();
        let series_base = config.levels as f64 * GRID_LEVEL_STAGGER + AXIS_EXTRA_DELAY;
        let axis_entrance =
            timeline.spawn_delayed(0.0, 1.0, series_base, SpringConfig::polygon());
        let series_springs = series
            .iter()
            .enumerate()
            .map(|(series_index, row)| SeriesSprings {
                vertices: (0..row.values.len())
                    .map(|vertex| {
                        timeline.spawn_delayed(
                            0.0,
                            1.0,
                            series_base
                                + series_index as f64 * SERIES_STAGGER
                                + stagger_delay(vertex, 0.0, VERTEX_STAGGER),
                            SpringConfig::polygon(),
                        )
                    })
                    .collect(),
                opacity: timeline.spawn(1.0, SpringConfig::interactive()),
            })
            .collect();

        tracing::debug!(
            metrics = metrics.len(),
            series = series.len(),
            "radar chart mounted"
        );
        Ok(Self {
            config,
            metrics,
            series,
            children,
            plan,
            viewport,
            center: (
                f64::from(viewport.width) / 2.0,
                f64::from(viewport.height) / 2.0,
            ),
            scale,
            grid_levels,
            axis_entrance,
            series_springs,
            hovered: None,
            lifecycle,
            timeline,
        })
    }

    pub fn tick(&mut self, delta_seconds: f64) {
        self.lifecycle.tick(delta_seconds);
        self.timeline.tick(delta_seconds);
    }

    /// Hit-tests a pointer position against series polygons at their resting
    /// (fully entered) shape, topmost series first.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        let local = (x - self.center.0, y - self.center.1);
        for child_index in self.plan.series.iter().rev() {
            let ChartChild::RadarArea(spec) = &self.children[*child_index] else {
                continue;
            };
            let Some(row) = self.series.get(spec.index) else {
                continue;
            };
            let vertices: Vec<(f64, f64)> = row
                .values
                .iter()
                .enumerate()
                .map(|(vertex, &value)| self.scale.point(vertex, value))
                .collect();
            if point_in_polygon(local.0, local.1, &vertices) {
                return Some(spec.index);
            }
        }
        None
    }

    pub fn set_hovered_index(&mut self, index: Option<usize>) -> bool {
        if !self.can_interact() {
            return false;
        }
        if let Some(active) = index
            && active >= self.series.len()
        {
            return false;
        }
        if self.hovered == index {
            return false;
        }
        self.hovered = index;
        tracing::trace!(?index, "radar hover changed");
        for (series_index, springs) in self.series_springs.iter().enumerate() {
            let interaction = SliceInteraction::for_index(series_index, self.hovered);
            let opacity_target = if interaction.is_faded {
                FADED_SERIES_OPACITY
            } else {
                1.0
            };
            self.timeline.retarget(springs.opacity, opacity_target);
        }
        true
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.can_interact() {
            return false;
        }
        let hit = self.hit_test(x, y);
        self.set_hovered_index(hit)
    }

    pub fn on_pointer_leave(&mut self) {
        self.set_hovered_index(None);
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
        self.timeline = Timeline::new();
        self.grid_levels.clear();
        self.series_springs.clear();
        self.hovered = None;
    }

    pub fn render(&self) -> ChartResult<LayeredFrame> {
        build_radar_frame(self)
    }

    /// Entrance progress of one grid ring, 0..=1.
    #[must_use]
    pub fn grid_level_progress(&self, level: usize) -> f64 {
        if self.lifecycle.is_loaded() {
            return 1.0;
        }
        self.grid_levels
            .get(level)
            .and_then(|&id| self.timeline.value(id))
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }

    /// Entrance progress of the axis spokes and metric labels, 0..=1.
    #[must_use]
    pub fn axis_progress(&self) -> f64 {
        if self.lifecycle.is_loaded() {
            return 1.0;
        }
        self.timeline
            .value(self.axis_entrance)
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }

    /// Animated polygon vertices for a series row, each vertex springing
    /// outward from the center independently.
    #[must_use]
    pub fn series_points(&self, series_index: usize) -> Vec<(f64, f64)> {
        let Some(row) = self.series.get(series_index) else {
            return Vec::new();
        };
        row.values
            .iter()
            .enumerate()
            .map(|(vertex, &value)| {
                let progress = self.vertex_progress(series_index, vertex);
                self.scale.point(vertex, value * progress)
            })
            .collect()
    }

    #[must_use]
    pub fn vertex_progress(&self, series_index: usize, vertex: usize) -> f64 {
        if self.lifecycle.is_loaded() {
            return 1.0;
        }
        self.series_springs
            .get(series_index)
            .and_then(|springs| springs.vertices.get(vertex))
            .and_then(|&id| self.timeline.value(id))
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn series_opacity(&self, series_index: usize) -> f64 {
        self.series_springs
            .get(series_index)
            .and_then(|springs| self.timeline.value(springs.opacity))
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn series_interaction(&self, series_index: usize) -> SliceInteraction {
        SliceInteraction::for_index(series_index, self.hovered)
    }

    #[must_use]
    pub fn series_color(&self, series_index: usize) -> Color {
        self.series
            .get(series_index)
            .and_then(|row| row.color)
            .or_else(|| {
                self.children.iter().find_map(|child| match child {
                    ChartChild::RadarArea(spec) if spec.index == series_index => spec.color,
                    _ => None,
                })
            })
            .unwrap_or(DEFAULT_RADAR_PALETTE[series_index % DEFAULT_RADAR_PALETTE.len()])
    }

    #[must_use]
    pub fn metrics(&self) -> &[RadarMetric] {
        &self.metrics
    }

    #[must_use]
    pub fn series(&self) -> &[RadarSeries] {
        &self.series
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
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    #[must_use]
    pub fn scale(&self) -> RadialScale {
        self.scale
    }

    #[must_use]
    pub fn config(&self) -> RadarChartConfig {
        self.config
    }

    #[must_use]
    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered
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
}
