//! Frame building: chart sessions in, layered draw primitives out.
//!
//! Renderers are pure over the session snapshot. They never mutate chart
//! state and never perform side effects; the host rasterizes the resulting
//! [`LayeredFrame`] with whatever backend it owns.

mod cartesian;
mod frame;
mod pie;
mod primitives;
mod radar;

pub use cartesian::build_cartesian_frame;
pub use frame::{LayeredFrame, LegendRow, Plane, PlanePrimitives, TooltipBox};
pub use pie::build_pie_frame;
pub use primitives::{
    CirclePrimitive, ClipRect, Color, DEFAULT_PIE_PALETTE, DEFAULT_RADAR_PALETTE, DashPattern,
    GradientDirection, GradientStop, LineCap, LinePrimitive, Paint, PathPrimitive, RectPrimitive,
    Stroke, TextHAlign, TextPrimitive,
};
pub use radar::build_radar_frame;
