pub mod spring;
pub mod timeline;

pub use spring::{Spring, SpringConfig};
pub use timeline::{SpringId, Timeline, stagger_delay};
