use serde::{Deserialize, Serialize};

use crate::composition::TooltipRow;
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive,
};

/// Z-ordered compositing plane.
///
/// `Overlay` receives pointer priority and is drawn above every series;
/// `Center` is a separate plane for out-of-flow donut content so nested
/// transformed content never sits inside the vector tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plane {
    Base,
    Series,
    Overlay,
    Center,
}

const PLANE_ORDER: [Plane; 4] = [Plane::Base, Plane::Series, Plane::Overlay, Plane::Center];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanePrimitives {
    pub paths: Vec<PathPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl PlanePrimitives {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
            && self.lines.is_empty()
            && self.rects.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        for path in &self.paths {
            path.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// One legend row derived from a configured series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRow {
    pub label: String,
    pub color: Color,
    pub value: String,
    /// Share of total in 0..=1 when the legend shows progress.
    pub progress: Option<f64>,
}

/// Tooltip chrome anchored at the active point, outside the vector planes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipBox {
    pub x: f64,
    pub y: f64,
    pub rows: Vec<TooltipRow>,
}

/// Fully materialized scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredFrame {
    pub viewport: Viewport,
    base: PlanePrimitives,
    series: PlanePrimitives,
    overlay: PlanePrimitives,
    center: PlanePrimitives,
    pub legend: Vec<LegendRow>,
    pub tooltip: Option<TooltipBox>,
}

impl LayeredFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            base: PlanePrimitives::default(),
            series: PlanePrimitives::default(),
            overlay: PlanePrimitives::default(),
            center: PlanePrimitives::default(),
            legend: Vec::new(),
            tooltip: None,
        }
    }

    #[must_use]
    pub fn plane(&self, plane: Plane) -> &PlanePrimitives {
        match plane {
            Plane::Base => &self.base,
            Plane::Series => &self.series,
            Plane::Overlay => &self.overlay,
            Plane::Center => &self.center,
        }
    }

    pub fn plane_mut(&mut self, plane: Plane) -> &mut PlanePrimitives {
        match plane {
            Plane::Base => &mut self.base,
            Plane::Series => &mut self.series,
            Plane::Overlay => &mut self.overlay,
            Plane::Center => &mut self.center,
        }
    }

    pub fn push_path(&mut self, plane: Plane, path: PathPrimitive) {
        self.plane_mut(plane).paths.push(path);
    }

    pub fn push_line(&mut self, plane: Plane, line: LinePrimitive) {
        self.plane_mut(plane).lines.push(line);
    }

    pub fn push_rect(&mut self, plane: Plane, rect: RectPrimitive) {
        self.plane_mut(plane).rects.push(rect);
    }

    pub fn push_circle(&mut self, plane: Plane, circle: CirclePrimitive) {
        self.plane_mut(plane).circles.push(circle);
    }

    pub fn push_text(&mut self, plane: Plane, text: TextPrimitive) {
        self.plane_mut(plane).texts.push(text);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        PLANE_ORDER.iter().all(|&p| self.plane(p).is_empty())
            && self.legend.is_empty()
            && self.tooltip.is_none()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for &plane in &PLANE_ORDER {
            self.plane(plane).validate()?;
        }
        Ok(())
    }
}
