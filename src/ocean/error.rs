//! Error types for the ocean simulation

use thiserror::Error;

pub type OceanResult<T> = Result<T, OceanError>;

/// Configuration-time failures. None of these are raised mid-frame except a
/// stale butterfly table, which means the caller changed the grid size without
/// rebuilding the table.
#[derive(Error, Debug)]
pub enum OceanError {
    #[error("invalid grid size {0}: fft size must be a power of two greater than 1")]
    InvalidGridSize(u32),

    #[error("degenerate wind parameters: wind speed {wind_speed}, fetch {fetch}")]
    DegenerateWindParameters { wind_speed: f32, fetch: f32 },

    #[error("invalid spectrum parameter {name}: {value}")]
    InvalidSpectrumParameter { name: &'static str, value: f32 },

    #[error("invalid lambda {0}: choppiness must be finite")]
    InvalidLambda(f32),

    #[error("stale butterfly table: table built for {table_size}, texture is {texture_size}")]
    StaleButterflyTable { table_size: u32, texture_size: u32 },

    #[error("invalid cascade count {0}: expected 1 to {1}")]
    InvalidCascadeCount(usize, usize),

    #[error("invalid cascade {index}: {reason}")]
    InvalidCascade { index: usize, reason: String },

    #[error("invalid spectrum component count {0}: expected 1 to {1}")]
    InvalidSpectrumComponentCount(usize, usize),

    #[error("cascade index out of range: {0}")]
    CascadeIndexOutOfRange(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
