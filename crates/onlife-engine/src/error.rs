//! Error types for the server binary.
//!
//! [`EngineError`] wraps every failure that can end the process, so
//! `main` can propagate with `?`.

/// Top-level error for the server binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: onlife_core::ConfigError,
    },

    /// The starting scenario could not be loaded, or the final one saved.
    #[error("scenario error: {source}")]
    Scenario {
        /// The underlying scenario error.
        #[from]
        source: onlife_world::ScenarioError,
    },

    /// The observer server failed to bind or serve.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying server error.
        #[from]
        source: onlife_observer::ServerError,
    },
}
