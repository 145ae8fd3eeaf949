use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::animation::{SpringConfig, SpringId, Timeline, stagger_delay};
use crate::api::lifecycle::Lifecycle;
use crate::composition::{
    ChartChild, ChartFamily, RenderPlan, SliceHoverEffect, classify, validate_family,
};
use crate::core::arc::{AnnulusSector, slice_offset};
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{SliceInteraction, pointer_polar};
use crate::render::{Color, DEFAULT_PIE_PALETTE, LayeredFrame, build_pie_frame};

const SLICE_STAGGER_BASE: f64 = 0.1;
const SLICE_STAGGER_INCREMENT: f64 = 0.08;

/// Opacity a slice dims to while another slice is hovered.
pub const FADED_SLICE_OPACITY: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieDatum {
    pub label: String,
    pub value: f64,
    /// Explicit slice color; palette order applies when absent.
    pub color: Option<Color>,
}

impl PieDatum {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
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
pub struct PieChartConfig {
    pub inner_radius: f64,
    pub pad_angle: f64,
    pub corner_radius: f64,
    /// Angular window the slices fill, default the full turn starting at
    /// 12 o'clock minus a quarter.
    pub start_angle: f64,
    pub end_angle: f64,
    /// Radial translation of the hovered slice, in pixels.
    pub hover_offset: f64,
    /// Gap between the outer radius and the viewport edge, leaving room for
    /// the hover offset.
    pub outer_padding: f64,
    pub animation_duration_ms: f64,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            inner_radius: 0.0,
            pad_angle: 0.0,
            corner_radius: 0.0,
            start_angle: -PI / 2.0,
            end_angle: 3.0 * PI / 2.0,
            hover_offset: 10.0,
            outer_padding: 12.0,
            animation_duration_ms: 1100.0,
        }
    }
}

impl PieChartConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.inner_radius, "inner radius"),
            (self.pad_angle, "pad angle"),
            (self.corner_radius, "corner radius"),
            (self.hover_offset, "hover offset"),
            (self.outer_padding, "outer padding"),
            (self.animation_duration_ms, "animation duration"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.start_angle.is_finite()
            || !self.end_angle.is_finite()
            || self.end_angle <= self.start_angle
        {
            return Err(ChartError::InvalidData(
                "end angle must be finite and greater than start angle".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One computed slice, in input order. Angles are cumulative fractions of
/// the configured angular window; input order is preserved, never re-sorted
/// by value.
#[derive(Debug, Clone, PartialEq)]
pub struct PieArc {
    pub index: usize,
    pub label: String,
    pub value: f64,
    pub fraction: f64,
    pub color: Color,
    pub sector: AnnulusSector,
}

/// Snapshot of one slice's animated state for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSliceState {
    pub entrance_scale: f64,
    /// Radial translation applied to the animated slice body.
    pub offset: (f64, f64),
    /// Outer radius growth, used by the grow hover effect.
    pub radius_growth: f64,
    pub opacity: f64,
    pub interaction: SliceInteraction,
}

/// Center readout derived from the hovered slice, or the whole when nothing
/// is hovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieCenterSummary {
    pub label: String,
    pub value: f64,
    pub fraction: f64,
}

#[derive(Debug, Clone, Copy)]
struct SliceSprings {
    entrance: SpringId,
    offset: SpringId,
    growth: SpringId,
    opacity: SpringId,
}

/// Shared session for one pie or donut chart instance.
#[derive(Debug)]
pub struct PieChart {
    config: PieChartConfig,
    data: Vec<PieDatum>,
    children: Vec<ChartChild>,
    plan: RenderPlan,
    viewport: Viewport,
    center: (f64, f64),
    outer_radius: f64,
    arcs: Vec<PieArc>,
    springs: Vec<SliceSprings>,
    hovered: Option<usize>,
    lifecycle: Lifecycle,
    timeline: Timeline,
}

impl PieChart {
    pub fn new(
        data: Vec<PieDatum>,
        children: Vec<ChartChild>,
        viewport: Viewport,
        config: PieChartConfig,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let config = config.validate()?;
        validate_family(&children, ChartFamily::Pie)?;
        let plan = classify(&children);

        let outer_radius = (f64::from(viewport.width.min(viewport.height)) / 2.0
            - config.outer_padding)
            .max(0.0);
        if config.inner_radius >= outer_radius && outer_radius > 0.0 {
            return Err(ChartError::InvalidData(
                "inner radius must be smaller than the computed outer radius".to_owned(),
            ));
        }

        let arcs = compute_arcs(&data, &children, config, outer_radius)?;

        let mut lifecycle = Lifecycle::new(config.animation_duration_ms / 1000.0);
        lifecycle.mount();

        let mut timeline = Timeline::new();
        let springs = arcs
            .iter()
            .map(|arc| SliceSprings {
                entrance: timeline.spawn_delayed(
                    0.0,
                    1.0,
                    stagger_delay(arc.index, SLICE_STAGGER_BASE, SLICE_STAGGER_INCREMENT),
                    SpringConfig::entrance(),
                ),
                offset: timeline.spawn(0.0, SpringConfig::interactive()),
                growth: timeline.spawn(0.0, SpringConfig::interactive()),
                opacity: timeline.spawn(1.0, SpringConfig::interactive()),
            })
            .collect();

        tracing::debug!(slices = arcs.len(), "pie chart mounted");
        Ok(Self {
            config,
            data,
            children,
            plan,
            viewport,
            center: (
                f64::from(viewport.width) / 2.0,
                f64::from(viewport.height) / 2.0,
            ),
            outer_radius,
            arcs,
            springs,
            hovered: None,
            lifecycle,
            timeline,
        })
    }

    pub fn tick(&mut self, delta_seconds: f64) {
        self.lifecycle.tick(delta_seconds);
        self.timeline.tick(delta_seconds);
    }

    /// Hit-tests a pointer position in viewport coordinates against the
    /// static slice regions. Hit regions never move with hover animation, so
    /// hover cannot oscillate at a slice edge.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        let (angle, radius) = pointer_polar(x, y, self.center);
        self.arcs
            .iter()
            .find(|arc| arc.sector.contains(angle, radius))
            .map(|arc| arc.index)
    }

    /// Moves hover to `index`, retargeting every slice's springs. At most
    /// one slice is hovered; the rest fade.
    pub fn set_hovered_index(&mut self, index: Option<usize>) -> bool {
        if !self.can_interact() {
            return false;
        }
        if let Some(active) = index
            && active >= self.arcs.len()
        {
            return false;
        }
        if self.hovered == index {
            return false;
        }
        self.hovered = index;
        tracing::trace!(?index, "pie hover changed");

        for (slice_index, springs) in self.springs.iter().enumerate() {
            let interaction = SliceInteraction::for_index(slice_index, self.hovered);
            let effect = self.slice_effect(slice_index);
            let (offset_target, growth_target) = if interaction.is_hovered {
                match effect {
                    SliceHoverEffect::Translate => (self.config.hover_offset, 0.0),
                    SliceHoverEffect::Grow => (0.0, self.config.hover_offset),
                    SliceHoverEffect::None => (0.0, 0.0),
                }
            } else {
                (0.0, 0.0)
            };
            let opacity_target = if interaction.is_faded {
                FADED_SLICE_OPACITY
            } else {
                1.0
            };
            self.timeline.retarget(springs.offset, offset_target);
            self.timeline.retarget(springs.growth, growth_target);
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
        self.springs.clear();
        self.hovered = None;
    }

    /// Animated state for the slice at `index`.
    #[must_use]
    pub fn slice_state(&self, index: usize) -> Option<PieSliceState> {
        let arc = self.arcs.get(index)?;
        let springs = self.springs.get(index)?;
        let entrance_scale = if self.slice_animates(index) {
            self.timeline.value(springs.entrance).unwrap_or(1.0)
        } else {
            1.0
        };
        let radial = self.timeline.value(springs.offset).unwrap_or(0.0);
        Some(PieSliceState {
            entrance_scale: entrance_scale.clamp(0.0, 1.0),
            offset: slice_offset(arc.sector.start_angle, arc.sector.end_angle, radial),
            radius_growth: self.timeline.value(springs.growth).unwrap_or(0.0),
            opacity: self
                .timeline
                .value(springs.opacity)
                .unwrap_or(1.0)
                .clamp(0.0, 1.0),
            interaction: SliceInteraction::for_index(index, self.hovered),
        })
    }

    /// Center readout: hovered slice when present, otherwise the total.
    #[must_use]
    pub fn center_summary(&self) -> Option<PieCenterSummary> {
        let spec = self.children.iter().find_map(|child| match child {
            ChartChild::PieCenter(spec) => Some(spec),
            _ => None,
        })?;
        let total: f64 = self.arcs.iter().map(|arc| arc.value).sum();
        if spec.follow_hover
            && let Some(active) = self.hovered
            && let Some(arc) = self.arcs.get(active)
        {
            return Some(PieCenterSummary {
                label: arc.label.clone(),
                value: arc.value,
                fraction: arc.fraction,
            });
        }
        Some(PieCenterSummary {
            label: spec.label.clone().unwrap_or_else(|| "Total".to_owned()),
            value: total,
            fraction: 1.0,
        })
    }

    pub fn render(&self) -> ChartResult<LayeredFrame> {
        build_pie_frame(self)
    }

    fn slice_effect(&self, index: usize) -> SliceHoverEffect {
        self.children
            .iter()
            .find_map(|child| match child {
                ChartChild::PieSlice(spec) if spec.index == index => Some(spec.hover_effect),
                _ => None,
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn slice_shows_glow(&self, index: usize) -> bool {
        self.children
            .iter()
            .find_map(|child| match child {
                ChartChild::PieSlice(spec) if spec.index == index => Some(spec.show_glow),
                _ => None,
            })
            .unwrap_or(true)
    }

    fn slice_animates(&self, index: usize) -> bool {
        self.children
            .iter()
            .find_map(|child| match child {
                ChartChild::PieSlice(spec) if spec.index == index => Some(spec.animate),
                _ => None,
            })
            .unwrap_or(true)
    }

    #[must_use]
    pub fn data(&self) -> &[PieDatum] {
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
    pub fn arcs(&self) -> &[PieArc] {
        &self.arcs
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
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    #[must_use]
    pub fn config(&self) -> PieChartConfig {
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

/// Lays the data out over the configured angular window, in input order.
fn compute_arcs(
    data: &[PieDatum],
    children: &[ChartChild],
    config: PieChartConfig,
    outer_radius: f64,
) -> ChartResult<Vec<PieArc>> {
    let mut total = 0.0;
    for datum in data {
        if !datum.value.is_finite() || datum.value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "slice `{}` value must be finite and >= 0",
                datum.label
            )));
        }
        total += datum.value;
    }
    if !data.is_empty() && total <= 0.0 {
        return Err(ChartError::InvalidData(
            "slice values must sum to a positive total".to_owned(),
        ));
    }

    let span = config.end_angle - config.start_angle;
    let mut cursor = config.start_angle;
    let mut arcs = Vec::with_capacity(data.len());
    for (index, datum) in data.iter().enumerate() {
        let fraction = datum.value / total;
        let start_angle = cursor;
        cursor += fraction * span;
        let color = datum
            .color
            .or_else(|| slice_color(children, index))
            .unwrap_or(DEFAULT_PIE_PALETTE[index % DEFAULT_PIE_PALETTE.len()]);
        arcs.push(PieArc {
            index,
            label: datum.label.clone(),
            value: datum.value,
            fraction,
            color,
            sector: AnnulusSector {
                inner_radius: config.inner_radius,
                outer_radius,
                start_angle,
                end_angle: cursor,
                pad_angle: config.pad_angle,
                corner_radius: config.corner_radius,
            }
            .validate()?,
        });
    }
    Ok(arcs)
}

fn slice_color(children: &[ChartChild], index: usize) -> Option<Color> {
    children.iter().find_map(|child| match child {
        ChartChild::PieSlice(spec) if spec.index == index => spec.color,
        _ => None,
    })
}
