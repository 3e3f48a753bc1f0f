//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup and the run,
//! so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: tillworks_core::ConfigError,
    },

    /// The farm rejected its structure or strategy setup.
    #[error("farm error: {source}")]
    Farm {
        /// The underlying farm error.
        #[from]
        source: tillworks_core::FarmError,
    },

    /// The final sync view could not be serialized.
    #[error("json error: {source}")]
    Json {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },
}
