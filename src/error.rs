use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while exploding composites in a handle graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplodeError {
    #[error("Handle '{handle_id}' is not a composite and cannot be exploded")]
    NotComposite { handle_id: String },

    #[error("Handle '{0}' not found in the handle graph")]
    UnknownHandle(String),

    #[error(
        "Composite '{composite}' maps its {direction} '{port}' to '{target}', which does not exist"
    )]
    UnresolvedMapping {
        composite: String,
        direction: PortDirection,
        port: String,
        target: String,
    },
}

/// Which side of a composite a mapping belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    Input,
    Output,
}

impl std::fmt::Display for PortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// Errors that can occur when converting a wire payload into canonical `NodeHandle`s.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Failed to parse handle JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid handle data: {0}")]
    ValidationError(String),
}

/// Errors raised while persisting or loading exploded graphs.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("Artifact error: {0}")]
    Generic(String),
}

/// Errors raised while parsing an explorer path such as `my_pipeline@abc123/outer/inner`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplorerPathError {
    #[error("Explorer path is empty")]
    Empty,

    #[error("Explorer path '{0}' does not name a pipeline")]
    MissingPipelineName(String),

    #[error("Explorer path '{0}' has an empty snapshot id after '@'")]
    EmptySnapshotId(String),
}
