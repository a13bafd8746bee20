use crate::error::ExplodeError;
use crate::explode::Exploder;
use crate::model::{ExplodedGraph, NodeHandle};
use crate::path::ExplorerPath;
use crate::snapshot::PipelineSnapshot;
use serde::{Deserialize, Serialize};

/// Display options of the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerOptions {
    #[serde(default)]
    pub explode_composites: bool,
}

/// The handles handed to a graph renderer, plus lookups over them.
#[derive(Debug, Clone)]
pub struct HandleView {
    handles: Vec<NodeHandle>,
    parent_handle: Option<NodeHandle>,
    historical: bool,
}

impl HandleView {
    /// Builds the displayed handle list, exploding composites when requested.
    pub fn new(handles: &[NodeHandle], options: &ExplorerOptions) -> Result<Self, ExplodeError> {
        Self::with_exploder(handles, options, &Exploder::default())
    }

    pub fn with_exploder(
        handles: &[NodeHandle],
        options: &ExplorerOptions,
        exploder: &Exploder,
    ) -> Result<Self, ExplodeError> {
        let handles = if options.explode_composites {
            exploder.explode(handles)?.into_handles()
        } else {
            handles.to_vec()
        };
        Ok(Self {
            handles,
            parent_handle: None,
            historical: false,
        })
    }

    /// Builds the view for a resolved snapshot at `path`.
    pub fn for_snapshot(
        snapshot: &PipelineSnapshot,
        path: &ExplorerPath,
        options: &ExplorerOptions,
    ) -> Result<Self, ExplodeError> {
        Self::for_snapshot_with_exploder(snapshot, path, options, &Exploder::default())
    }

    pub fn for_snapshot_with_exploder(
        snapshot: &PipelineSnapshot,
        path: &ExplorerPath,
        options: &ExplorerOptions,
        exploder: &Exploder,
    ) -> Result<Self, ExplodeError> {
        let mut view = Self::with_exploder(&snapshot.handles, options, exploder)?;
        view.parent_handle = snapshot.parent_handle.clone();
        view.historical = path.is_historical();
        Ok(view)
    }

    /// Builds the view of `snapshot` from a graph that was already exploded.
    pub fn for_exploded_snapshot(
        snapshot: &PipelineSnapshot,
        path: &ExplorerPath,
        graph: ExplodedGraph,
    ) -> Self {
        Self {
            handles: graph.into_handles(),
            parent_handle: snapshot.parent_handle.clone(),
            historical: path.is_historical(),
        }
    }

    pub fn handles(&self) -> &[NodeHandle] {
        &self.handles
    }

    pub fn parent_handle(&self) -> Option<&NodeHandle> {
        self.parent_handle.as_ref()
    }

    pub fn is_historical(&self) -> bool {
        self.historical
    }

    /// The displayed handle whose node is named `name`.
    pub fn selected(&self, name: &str) -> Option<&NodeHandle> {
        self.handles.iter().find(|h| h.node.name == name)
    }

    /// Handle ids of every displayed invocation of `definition_name`.
    pub fn invocations(&self, definition_name: &str) -> Vec<&str> {
        self.handles
            .iter()
            .filter(|h| h.node.definition.name() == definition_name)
            .map(|h| h.handle_id.as_str())
            .collect()
    }
}
