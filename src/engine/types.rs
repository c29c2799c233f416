use thiserror::Error;

/// Contract implemented by every engine backend.
///
/// Calls block the current thread for the full duration of the engine
/// invocation; the service always runs them on a worker-pool slot. The
/// process holds a single shared handle that is invoked concurrently by all
/// slots, so implementations must be safe for concurrent invocation.
pub trait SearchEngine: Send + Sync + std::fmt::Debug {
    /// Runs one attribute search and returns the raw result document.
    ///
    /// * `attributes` - JSON document of search attributes, passed through verbatim.
    /// * `profile` - named search profile selecting the matching behavior.
    /// * `flags` - OR-combined flag mask (see [`crate::engine::flags`]).
    fn search_by_attributes(&self, attributes: &str, profile: &str, flags: i64)
        -> Result<String, EngineError>;

    /// Warms the engine's internal caches. Called once at startup.
    fn prime(&self) -> Result<(), EngineError>;
}

/// The closed set of failure kinds an engine call can surface.
///
/// Response statuses are derived from the kind alone, never from message
/// text (see `search::dispatcher::error_status`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The search payload was rejected by the engine.
    #[error("bad input: {0}")]
    BadInput(String),
    /// The engine configuration is missing or malformed.
    #[error("engine configuration error: {0}")]
    Configuration(String),
    /// The engine's backing database reported an error.
    #[error("database error: {0}")]
    Database(String),
    /// The connection to the backing database was lost mid-call.
    #[error("database connection lost: {0}")]
    DatabaseConnectionLost(String),
    /// The engine license is invalid or exhausted.
    #[error("license error: {0}")]
    License(String),
    /// The requested entity or record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// A call was made before the engine was initialized.
    #[error("engine not initialized: {0}")]
    NotInitialized(String),
    /// The engine gave up retrying an internally retryable condition.
    #[error("retry timeout exceeded: {0}")]
    RetryTimeoutExceeded(String),
    /// A transient condition the caller may retry.
    #[error("retryable error: {0}")]
    Retryable(String),
    /// The payload referenced a data source unknown to the engine.
    #[error("unknown data source: {0}")]
    UnknownDataSource(String),
    /// A failure the engine could not classify.
    #[error("unhandled engine error: {0}")]
    Unhandled(String),
    /// The engine is in an unrecoverable state.
    #[error("unrecoverable engine error: {0}")]
    Unrecoverable(String),
}
