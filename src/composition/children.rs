use serde::{Deserialize, Serialize};

use crate::composition::{ChartFamily, ChildKind};
use crate::core::curve::CurveKind;
use crate::core::types::SeriesPoint;
use crate::extensions::markers::{ChartMarker, MarkerFanConfig};
use crate::render::Color;

/// One formatted tooltip row built by the caller for the hovered point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipRow {
    pub color: Color,
    pub label: String,
    pub value: String,
}

/// Row-building callback invoked with the hovered data point.
///
/// A plain function pointer keeps child specs cheap to clone and compare;
/// formatting callbacks do not need captured state.
pub type TooltipRowsFn = fn(&SeriesPoint) -> Vec<TooltipRow>;

/// Area series: gradient fill under a fitted curve plus a stroke line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSpec {
    pub data_key: String,
    pub fill: Color,
    pub fill_opacity: f64,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub curve: CurveKind,
    pub animate: bool,
    pub show_line: bool,
    pub show_highlight: bool,
    /// Gradient opacity at the baseline (0 = fade to transparent).
    pub gradient_to_opacity: f64,
    /// Fade the fill and stroke toward the left/right plot edges.
    pub fade_edges: bool,
}

impl AreaSpec {
    #[must_use]
    pub fn new(data_key: impl Into<String>, fill: Color) -> Self {
        Self {
            data_key: data_key.into(),
            fill,
            fill_opacity: 0.4,
            stroke: None,
            stroke_width: 2.0,
            curve: CurveKind::MonotoneX,
            animate: true,
            show_line: true,
            show_highlight: true,
            gradient_to_opacity: 0.0,
            fade_edges: false,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Color, width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_curve(mut self, curve: CurveKind) -> Self {
        self.curve = curve;
        self
    }
}

/// Line series without a fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub data_key: String,
    pub stroke: Color,
    pub stroke_width: f64,
    pub curve: CurveKind,
    pub animate: bool,
    pub show_points: bool,
    pub show_highlight: bool,
}

impl LineSpec {
    #[must_use]
    pub fn new(data_key: impl Into<String>, stroke: Color) -> Self {
        Self {
            data_key: data_key.into(),
            stroke,
            stroke_width: 2.0,
            curve: CurveKind::MonotoneX,
            animate: true,
            show_points: false,
            show_highlight: true,
        }
    }
}

/// Bar series: one rounded column per data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    pub data_key: String,
    pub fill: Color,
    pub corner_radius: f64,
    /// Bar width as a fraction of the column width between points.
    pub width_ratio: f64,
    pub animate: bool,
}

impl BarSpec {
    #[must_use]
    pub fn new(data_key: impl Into<String>, fill: Color) -> Self {
        Self {
            data_key: data_key.into(),
            fill,
            corner_radius: 4.0,
            width_ratio: 0.6,
            animate: true,
        }
    }
}

/// Grid lines over scale ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub horizontal: bool,
    pub vertical: bool,
    pub line_count: usize,
    pub color: Color,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: false,
            line_count: 5,
            color: Color::rgba(0.5, 0.5, 0.5, 0.2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

/// Axis labels along one plot edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub orientation: AxisOrientation,
    pub label_count: usize,
    pub color: Color,
}

impl AxisSpec {
    #[must_use]
    pub fn bottom() -> Self {
        Self {
            orientation: AxisOrientation::Bottom,
            label_count: 5,
            color: Color::rgba(0.5, 0.5, 0.5, 0.8),
        }
    }

    #[must_use]
    pub fn left() -> Self {
        Self {
            orientation: AxisOrientation::Left,
            label_count: 5,
            color: Color::rgba(0.5, 0.5, 0.5, 0.8),
        }
    }
}

/// Legend rows summarizing each configured series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegendSpec {
    /// Append a share-of-total progress value to each row.
    pub show_progress: bool,
}

/// Shared tooltip bound to the hovered data point.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipSpec {
    pub rows: TooltipRowsFn,
}

/// Caller-supplied markers rendered on the overlay plane.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSetSpec {
    pub items: Vec<ChartMarker>,
    pub size: f64,
    pub fan: MarkerFanConfig,
}

impl MarkerSetSpec {
    #[must_use]
    pub fn new(items: Vec<ChartMarker>) -> Self {
        Self {
            items,
            size: 28.0,
            fan: MarkerFanConfig::default(),
        }
    }
}

/// Hover behavior for one pie slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SliceHoverEffect {
    /// Slice translates outward along its radial axis.
    #[default]
    Translate,
    /// Slice extends its outer radius.
    Grow,
    None,
}

/// One declared pie slice bound to a data index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSliceSpec {
    pub index: usize,
    pub color: Option<Color>,
    pub hover_effect: SliceHoverEffect,
    pub show_glow: bool,
    pub animate: bool,
}

impl PieSliceSpec {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            color: None,
            hover_effect: SliceHoverEffect::Translate,
            show_glow: true,
            animate: true,
        }
    }
}

/// Donut center content composited on its own plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieCenterSpec {
    pub label: Option<String>,
    /// Swap the label/value for the hovered slice while hovering.
    pub follow_hover: bool,
}

impl Default for PieCenterSpec {
    fn default() -> Self {
        Self {
            label: None,
            follow_hover: true,
        }
    }
}

/// Concentric radar grid rings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarGridSpec {
    pub color: Color,
}

impl Default for RadarGridSpec {
    fn default() -> Self {
        Self {
            color: Color::rgba(0.5, 0.5, 0.5, 0.25),
        }
    }
}

/// Radial axis spokes plus metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarAxisSpec {
    pub color: Color,
}

impl Default for RadarAxisSpec {
    fn default() -> Self {
        Self {
            color: Color::rgba(0.5, 0.5, 0.5, 0.4),
        }
    }
}

/// One radar polygon bound to a data row index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarAreaSpec {
    pub index: usize,
    pub color: Option<Color>,
    pub show_points: bool,
    pub show_glow: bool,
}

impl RadarAreaSpec {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            color: None,
            show_points: true,
            show_glow: true,
        }
    }
}

/// Tagged child attached to a chart root.
///
/// The discriminant is the classification: no structural guessing happens
/// downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartChild {
    Area(AreaSpec),
    Line(LineSpec),
    Bar(BarSpec),
    Grid(GridSpec),
    Axis(AxisSpec),
    Legend(LegendSpec),
    Tooltip(TooltipSpec),
    Markers(MarkerSetSpec),
    PieSlice(PieSliceSpec),
    PieCenter(PieCenterSpec),
    RadarGrid(RadarGridSpec),
    RadarAxis(RadarAxisSpec),
    RadarArea(RadarAreaSpec),
}

impl ChartChild {
    #[must_use]
    pub fn kind(&self) -> ChildKind {
        match self {
            Self::Area(_) | Self::Line(_) | Self::Bar(_) | Self::PieSlice(_)
            | Self::RadarArea(_) => ChildKind::Series,
            Self::Grid(_) | Self::Axis(_) | Self::Legend(_) | Self::RadarGrid(_)
            | Self::RadarAxis(_) => ChildKind::BaseDecoration,
            Self::Tooltip(_) | Self::Markers(_) => ChildKind::Overlay,
            Self::PieCenter(_) => ChildKind::CenterContent,
        }
    }

    /// Family a child is bound to; `None` for children valid on any root
    /// (the legend reads purely derived series/slice summaries).
    #[must_use]
    pub fn family(&self) -> Option<ChartFamily> {
        match self {
            Self::Area(_)
            | Self::Line(_)
            | Self::Bar(_)
            | Self::Grid(_)
            | Self::Axis(_)
            | Self::Tooltip(_)
            | Self::Markers(_) => Some(ChartFamily::Cartesian),
            Self::Legend(_) => None,
            Self::PieSlice(_) | Self::PieCenter(_) => Some(ChartFamily::Pie),
            Self::RadarGrid(_) | Self::RadarAxis(_) | Self::RadarArea(_) => {
                Some(ChartFamily::Radar)
            }
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Area(_) => "Area",
            Self::Line(_) => "Line",
            Self::Bar(_) => "Bar",
            Self::Grid(_) => "Grid",
            Self::Axis(_) => "Axis",
            Self::Legend(_) => "Legend",
            Self::Tooltip(_) => "Tooltip",
            Self::Markers(_) => "Markers",
            Self::PieSlice(_) => "PieSlice",
            Self::PieCenter(_) => "PieCenter",
            Self::RadarGrid(_) => "RadarGrid",
            Self::RadarAxis(_) => "RadarAxis",
            Self::RadarArea(_) => "RadarArea",
        }
    }
}
