//! Declarative child classification.
//!
//! Every child a caller attaches to a chart root carries an explicit variant
//! tag, so classification into series / decorations / overlays / center
//! content is a pure synchronous function of the child list. Series
//! configuration is derived in the same pass, which guarantees scales exist
//! before the first frame is built.

mod children;

pub use children::{
    AreaSpec, AxisOrientation, AxisSpec, BarSpec, ChartChild, GridSpec, LegendSpec, LineSpec,
    MarkerSetSpec, PieCenterSpec, PieSliceSpec, RadarAreaSpec, RadarAxisSpec, RadarGridSpec,
    SliceHoverEffect, TooltipRow, TooltipRowsFn, TooltipSpec,
};

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Chart family a child may be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartFamily {
    Cartesian,
    Pie,
    Radar,
}

impl ChartFamily {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cartesian => "cartesian",
            Self::Pie => "pie",
            Self::Radar => "radar",
        }
    }
}

/// Render-order classification for one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChildKind {
    /// Contributes to scale domains; drawn in data order.
    Series,
    /// Grid/axis chrome drawn before series and the interaction overlay.
    BaseDecoration,
    /// Markers and tooltip chrome drawn last for pointer priority.
    Overlay,
    /// Out-of-flow content composited on a separate plane (donut center).
    CenterContent,
}

/// One configured series derived from declared series children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub key: String,
    pub color: Color,
    pub stroke_width: f64,
}

/// Stable partition of a child list into render phases.
///
/// Indices refer back into the original child slice; ordering within each
/// phase preserves declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderPlan {
    pub base: Vec<usize>,
    pub series: Vec<usize>,
    pub overlay: Vec<usize>,
    pub center: Vec<usize>,
}

/// Partitions children by their declared kind. Pure and idempotent.
#[must_use]
pub fn classify(children: &[ChartChild]) -> RenderPlan {
    let mut plan = RenderPlan::default();
    for (index, child) in children.iter().enumerate() {
        match child.kind() {
            ChildKind::Series => plan.series.push(index),
            ChildKind::BaseDecoration => plan.base.push(index),
            ChildKind::Overlay => plan.overlay.push(index),
            ChildKind::CenterContent => plan.center.push(index),
        }
    }
    plan
}

/// Rejects children attached to the wrong chart family.
///
/// This is a programmer error and fails loudly instead of being skipped.
pub fn validate_family(children: &[ChartChild], family: ChartFamily) -> ChartResult<()> {
    for child in children {
        if child.family().is_some_and(|required| required != family) {
            return Err(ChartError::ContextMisuse(format!(
                "`{}` child cannot be attached to a {} chart root",
                child.name(),
                family.name()
            )));
        }
    }
    Ok(())
}

/// Derives series configurations from declared series children, in
/// declaration order. Duplicate data keys are a configuration error.
pub fn series_configs(children: &[ChartChild]) -> ChartResult<Vec<SeriesConfig>> {
    let mut configs: Vec<SeriesConfig> = Vec::new();
    for child in children {
        let config = match child {
            ChartChild::Area(spec) => Some(SeriesConfig {
                key: spec.data_key.clone(),
                color: spec.stroke.unwrap_or(spec.fill),
                stroke_width: spec.stroke_width,
            }),
            ChartChild::Line(spec) => Some(SeriesConfig {
                key: spec.data_key.clone(),
                color: spec.stroke,
                stroke_width: spec.stroke_width,
            }),
            ChartChild::Bar(spec) => Some(SeriesConfig {
                key: spec.data_key.clone(),
                color: spec.fill,
                stroke_width: 0.0,
            }),
            _ => None,
        };
        if let Some(config) = config {
            if configs.iter().any(|existing| existing.key == config.key) {
                return Err(ChartError::ContextMisuse(format!(
                    "series data key `{}` is declared more than once",
                    config.key
                )));
            }
            configs.push(config);
        }
    }
    Ok(configs)
}
