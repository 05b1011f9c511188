//! Error types and result alias for the crate.
//!
//! Sampling itself never fails; degenerate input degrades to small or empty output.
//! [`enum@crate::error::Error`] is only produced when validating configuration up front,
//! e.g. [`crate::sampling::SamplerConfig::validate`] or [`crate::geometry::Rect::try_new`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("invalid separation {value}: must be finite and > 0")]
    InvalidSeparation { value: f32 },
}
