use thiserror::Error;

/// Engine-surface errors.
///
/// The simulation core itself is total over its inputs; the only failure
/// surface is commanding an engine whose task has already shut down.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine task has stopped (shut down or handle dropped); the
    /// command was not applied.
    #[error("engine stopped: {0}")]
    Stopped(&'static str),
}
