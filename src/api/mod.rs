mod cartesian;
mod lifecycle;
mod pie;
mod radar;

pub use cartesian::{CartesianChart, CartesianChartConfig};
pub use lifecycle::{ChartPhase, Lifecycle};
pub use pie::{PieArc, PieCenterSummary, PieChart, PieChartConfig, PieDatum};
pub use radar::{RadarChart, RadarChartConfig, RadarMetric, RadarSeries};
