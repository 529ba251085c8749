//! Error types for engine construction, configuration and sequence parsing.
//!
//! Misuse of the draw operations themselves (a zero bound, a percentage above
//! 100) is a broken precondition and panics instead: a decision trace that
//! kept going after such a call could not be trusted for replay.

/// Type alias for fallible engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced to the program driver
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The requested generator strategy tag is not one we know how to build
    #[error("unknown random generator strategy: {0:?}")]
    UnknownStrategy(String),

    /// A serialized decision sequence contained a token that is not a value
    #[error("malformed decision sequence: token {token:?} at position {position}")]
    MalformedSequence { token: String, position: usize },

    #[error("invalid engine configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}
