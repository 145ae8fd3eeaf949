use serde::{Deserialize, Serialize};

use crate::core::curve::PathCommand;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Categorical fallback palette for pie slices.
pub const DEFAULT_PIE_PALETTE: [Color; 6] = [
    Color::rgb(0.38, 0.65, 0.98),
    Color::rgb(0.55, 0.36, 0.96),
    Color::rgb(0.93, 0.45, 0.64),
    Color::rgb(0.98, 0.69, 0.25),
    Color::rgb(0.20, 0.78, 0.62),
    Color::rgb(0.85, 0.33, 0.31),
];

/// Categorical fallback palette for radar polygons.
pub const DEFAULT_RADAR_PALETTE: [Color; 4] = [
    Color::rgb(0.38, 0.65, 0.98),
    Color::rgb(0.93, 0.45, 0.64),
    Color::rgb(0.20, 0.78, 0.62),
    Color::rgb(0.98, 0.69, 0.25),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient axis in 0..=1.
    pub offset: f64,
    pub color: Color,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientDirection {
    /// Top to bottom.
    Vertical,
    /// Left to right.
    Horizontal,
}

/// Fill/stroke paint: flat color or an axis-aligned linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    LinearGradient {
        direction: GradientDirection,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Solid(color) => color.validate(),
            Self::LinearGradient { stops, .. } => {
                if stops.len() < 2 {
                    return Err(ChartError::InvalidData(
                        "gradient requires at least two stops".to_owned(),
                    ));
                }
                for stop in stops {
                    if !stop.offset.is_finite() || !(0.0..=1.0).contains(&stop.offset) {
                        return Err(ChartError::InvalidData(
                            "gradient stop offset must be in [0, 1]".to_owned(),
                        ));
                    }
                    if !stop.opacity.is_finite() || !(0.0..=1.0).contains(&stop.opacity) {
                        return Err(ChartError::InvalidData(
                            "gradient stop opacity must be in [0, 1]".to_owned(),
                        ));
                    }
                    stop.color.validate()?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
}

/// Dash styling, including the sub-segment trick used for hover highlights
/// (one dash covering the highlighted span, offset to its start).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub dash_length: f64,
    pub gap_length: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    pub dash: Option<DashPattern>,
    pub line_cap: LineCap,
}

impl Stroke {
    #[must_use]
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            paint: Paint::Solid(color),
            width,
            dash: None,
            line_cap: LineCap::Round,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.paint.validate()?;
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Axis-aligned clip region in plot coordinates (entrance grow reveal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Filled/stroked path in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub commands: Vec<PathCommand>,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub opacity: f64,
    pub clip: Option<ClipRect>,
    /// Drop-shadow glow color for hover emphasis.
    pub glow: Option<Color>,
}

impl PathPrimitive {
    #[must_use]
    pub fn filled(commands: Vec<PathCommand>, paint: Paint) -> Self {
        Self {
            commands,
            fill: Some(paint),
            stroke: None,
            opacity: 1.0,
            clip: None,
            glow: None,
        }
    }

    #[must_use]
    pub fn stroked(commands: Vec<PathCommand>, stroke: Stroke) -> Self {
        Self {
            commands,
            fill: None,
            stroke: Some(stroke),
            opacity: 1.0,
            clip: None,
            glow: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Some(fill) = &self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = &self.stroke {
            stroke.validate()?;
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(
                "path opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub dash: Option<DashPattern>,
    pub opacity: f64,
}

impl LinePrimitive {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            dash: None,
            opacity: 1.0,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Axis-aligned rectangle with optional rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub fill: Paint,
    pub opacity: f64,
}

impl RectPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Color,
    pub stroke: Option<(Color, f64)>,
    pub opacity: f64,
}

impl CirclePrimitive {
    pub fn validate(self) -> ChartResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(ChartError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub size: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text position must be finite".to_owned(),
            ));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ChartError::InvalidData(
                "text size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
