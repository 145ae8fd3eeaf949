//! glyph-charts: declarative charting and interaction engine.
//!
//! The crate is split into pure math (`core`), synchronous child
//! classification (`composition`), pointer-to-domain queries
//! (`interaction`), spring-driven value animation (`animation`), per-family
//! chart sessions (`api`), and backend-agnostic renderers (`render`).

pub mod animation;
pub mod api;
pub mod composition;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{CartesianChart, CartesianChartConfig, PieChart, PieChartConfig, RadarChart};
pub use error::{ChartError, ChartResult};
