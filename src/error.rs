use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Programmer error: a child was attached to the wrong chart family or
    /// referenced state its root never provided. Never raised by bad data.
    #[error("chart context misuse: {0}")]
    ContextMisuse(String),
}
