// src/error.rs

//! Error type shared by the metric filter, registry backends and the bundle.

use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, BundleError>;

/// Failures raised while selecting, registering or recording metrics.
///
/// Only [`BundleError::Configuration`], [`BundleError::InvalidPattern`] and
/// [`BundleError::NameCollision`] can surface during setup. Errors that occur
/// while a request is being recorded are logged and swallowed by the
/// middleware.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid metric name pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("metric {0:?} is already registered")]
    NameCollision(String),

    #[error("metrics registry error: {0}")]
    Registry(String),
}
