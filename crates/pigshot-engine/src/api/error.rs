//! Error types for the pigshot engine.

use thiserror::Error;

/// Errors surfaced by authoring-time and lookup operations.
///
/// Nothing in the per-tick simulation returns these; a tick either applies
/// or is a defined no-op.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No entity is registered under this name.
    #[error("no entity named `{name}`")]
    LookupMiss {
        /// The name that was queried
        name: String,
    },

    /// The name is already taken by another entity.
    #[error("entity name `{name}` is already registered")]
    DuplicateName {
        /// The conflicting name
        name: String,
    },

    /// The sphere collision path only resolves one axis per call.
    #[error("sphere collision needs a single-axis displacement, got dx={dx}, dy={dy}")]
    InvalidAxisCombination {
        /// Horizontal displacement
        dx: f32,
        /// Vertical displacement
        dy: f32,
    },

    /// A composite part names a root that does not exist.
    #[error("composite part `{child}` references unknown root `{parent}`")]
    UnknownParent {
        /// The part being registered
        child: String,
        /// The missing root
        parent: String,
    },

    /// The level manifest could not be parsed.
    #[error("level manifest error: {0}")]
    Level(#[from] serde_json::Error),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
