// error.rs - Engine error types
//
// Everything the engine can fail on is either a caller mistake (bad config)
// or an unavailable drawing surface. Decorative failures never reach the page;
// the browser shell logs them and degrades to a static background.

use thiserror::Error;

/// Rejected configuration value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field}: span bounds must be finite (got {min}..={max})")]
    NotFinite { field: &'static str, min: f32, max: f32 },

    #[error("{field}: span is reversed (min {min} > max {max})")]
    Reversed { field: &'static str, min: f32, max: f32 },

    #[error("{field}: durations must be strictly positive (min {min})")]
    NonPositiveDuration { field: &'static str, min: f32 },

    #[error("{field}: probability {value} outside [0, 1]")]
    Probability { field: &'static str, value: f32 },

    #[error("{field}: {value} outside [{lo}, {hi}]")]
    OutOfBounds { field: &'static str, value: f32, lo: f32, hi: f32 },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("image output: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
