pub mod markers;

pub use markers::{
    ChartMarker, MarkerAction, MarkerFanConfig, MarkerGroup, group_markers_by_x,
};
