//! Resolution of the explorer's `pipelineSnapshotOrError` query result.
//!
//! The backend answers with a union: either a pipeline snapshot (live or
//! historical) or one of several error variants. Errors become a
//! [`NonIdealState`], the empty-state description shown in place of the graph.
use crate::error::ConversionError;
use crate::graphql::RawSolidHandle;
use crate::model::{IntoHandles, NodeHandle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "__typename")]
pub enum RawSnapshotOrError {
    PipelineSnapshot(RawPipelineSnapshot),
    PipelineNotFoundError {
        message: String,
    },
    PipelineSnapshotNotFoundError {
        message: String,
    },
    PythonError {
        #[serde(default)]
        message: String,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawPipelineSnapshot {
    pub name: String,
    #[serde(default, rename = "solidHandle", alias = "solid_handle")]
    pub solid_handle: Option<RawSolidHandle>,
    #[serde(default, rename = "solidHandles", alias = "solid_handles")]
    pub solid_handles: Vec<RawSolidHandle>,
}

/// A successfully fetched pipeline graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSnapshot {
    pub name: String,
    /// The composite whose interior is being viewed, if any.
    pub parent_handle: Option<NodeHandle>,
    pub handles: Vec<NodeHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NonIdealIcon {
    FlowBranch,
    Error,
}

/// An empty state shown instead of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonIdealState {
    pub title: String,
    pub icon: NonIdealIcon,
    pub description: Option<String>,
}

impl std::fmt::Display for NonIdealState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.title, description),
            None => write!(f, "{}", self.title),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOutcome {
    Snapshot(PipelineSnapshot),
    NonIdeal(NonIdealState),
}

impl RawSnapshotOrError {
    pub fn resolve(self) -> Result<SnapshotOutcome, ConversionError> {
        let outcome = match self {
            RawSnapshotOrError::PipelineSnapshot(snapshot) => {
                let parent_handle = snapshot
                    .solid_handle
                    .map(NodeHandle::try_from)
                    .transpose()?;
                SnapshotOutcome::Snapshot(PipelineSnapshot {
                    name: snapshot.name,
                    parent_handle,
                    handles: snapshot.solid_handles.into_handles()?,
                })
            }
            RawSnapshotOrError::PipelineSnapshotNotFoundError { message } => {
                SnapshotOutcome::NonIdeal(NonIdealState {
                    title: "Pipeline Snapshot Not Found".to_string(),
                    icon: NonIdealIcon::FlowBranch,
                    description: Some(message),
                })
            }
            RawSnapshotOrError::PipelineNotFoundError { message } => {
                SnapshotOutcome::NonIdeal(NonIdealState {
                    title: "Pipeline Not Found".to_string(),
                    icon: NonIdealIcon::FlowBranch,
                    description: Some(message),
                })
            }
            RawSnapshotOrError::PythonError { message } => {
                log::warn!("Snapshot query failed on the backend: {}", message);
                SnapshotOutcome::NonIdeal(NonIdealState {
                    title: "Query Error".to_string(),
                    icon: NonIdealIcon::Error,
                    description: None,
                })
            }
        };
        Ok(outcome)
    }
}

/// Decodes and resolves a query result.
///
/// Accepts the full response (`{"data": {"pipelineSnapshotOrError": ...}}`),
/// the `data` object, or the bare union object.
pub fn resolve_snapshot(json: &str) -> Result<SnapshotOutcome, ConversionError> {
    let mut value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ConversionError::JsonParseError(e.to_string()))?;

    if let Some(data) = value.get_mut("data").map(serde_json::Value::take) {
        value = data;
    }
    if let Some(inner) = value
        .get_mut("pipelineSnapshotOrError")
        .map(serde_json::Value::take)
    {
        value = inner;
    }

    let raw: RawSnapshotOrError =
        serde_json::from_value(value).map_err(|e| ConversionError::JsonParseError(e.to_string()))?;
    raw.resolve()
}
