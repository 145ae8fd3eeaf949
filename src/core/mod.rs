pub mod arc;
pub mod curve;
pub mod path;
pub mod scale;
pub mod types;

pub use arc::{AnnulusSector, slice_offset};
pub use curve::{CurveKind, PathCommand, area_path, line_path, radial_polygon_path, to_svg};
pub use path::SampledPath;
pub use scale::{LinearScale, RadialScale, TimeScale, ValueScaleTuning};
pub use types::{Margin, SeriesPoint, Viewport, datetime_to_unix_seconds};
