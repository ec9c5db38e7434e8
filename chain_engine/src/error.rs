//! Engine error types.

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the engine.
///
/// Deliberately small: an unknown conversation or an empty candidate pool
/// is a reported no-op, not an error, so only policy parsing and state
/// persistence can actually fail.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A policy code other than "1" or "2" was supplied at enable time.
    #[error("unrecognized policy code: \"{0}\" (expected \"1\" or \"2\")")]
    InvalidPolicy(String),

    /// The state file could not be read or written.
    #[error("state storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The state document could not be serialized or deserialized.
    #[error("state serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
