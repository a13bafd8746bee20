use crate::error::ExplorerPathError;
use crate::model::HANDLE_SEPARATOR;
use crate::view::ExplorerOptions;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A location in the pipeline explorer: `pipeline[@snapshot]/outer/inner`.
///
/// `path_solids` walks down through composites; the last entry is the
/// selected solid and the ones before it name the composite being viewed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExplorerPath {
    pub pipeline_name: String,
    pub snapshot_id: Option<String>,
    pub path_solids: Vec<String>,
}

impl ExplorerPath {
    pub fn selected_name(&self) -> Option<&str> {
        self.path_solids.last().map(String::as_str)
    }

    pub fn parent_names(&self) -> &[String] {
        match self.path_solids.split_last() {
            Some((_, parents)) => parents,
            None => &[],
        }
    }

    /// Handle id of the composite being viewed; empty at the pipeline root.
    pub fn root_handle_id(&self) -> String {
        self.parent_names().iter().join(&HANDLE_SEPARATOR.to_string())
    }

    /// Historical views pin a snapshot id instead of following the live pipeline.
    pub fn is_historical(&self) -> bool {
        self.snapshot_id.is_some()
    }
}

impl FromStr for ExplorerPath {
    type Err = ExplorerPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(ExplorerPathError::Empty);
        }

        let mut segments = trimmed.split('/');
        let head = segments.next().unwrap_or_default();
        let (pipeline_name, snapshot_id) = match head.split_once('@') {
            Some((_, "")) => return Err(ExplorerPathError::EmptySnapshotId(s.to_string())),
            Some((name, snapshot)) => (name, Some(snapshot.to_string())),
            None => (head, None),
        };
        if pipeline_name.is_empty() {
            return Err(ExplorerPathError::MissingPipelineName(s.to_string()));
        }

        Ok(ExplorerPath {
            pipeline_name: pipeline_name.to_string(),
            snapshot_id,
            path_solids: segments
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

impl fmt::Display for ExplorerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pipeline_name)?;
        if let Some(snapshot_id) = &self.snapshot_id {
            write!(f, "@{}", snapshot_id)?;
        }
        for solid in &self.path_solids {
            write!(f, "/{}", solid)?;
        }
        Ok(())
    }
}

/// Variables for the explorer's snapshot query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerQueryVariables {
    /// Only sent for live views; a snapshot id takes precedence.
    pub pipeline_name: Option<String>,
    pub snapshot_id: Option<String>,
    #[serde(rename = "rootHandleID")]
    pub root_handle_id: String,
    /// Unset when exploding, so that every depth of the graph is fetched.
    #[serde(rename = "requestScopeHandleID")]
    pub request_scope_handle_id: Option<String>,
}

impl ExplorerQueryVariables {
    pub fn new(path: &ExplorerPath, options: &ExplorerOptions) -> Self {
        let root_handle_id = path.root_handle_id();
        Self {
            pipeline_name: match path.snapshot_id {
                Some(_) => None,
                None => Some(path.pipeline_name.clone()),
            },
            snapshot_id: path.snapshot_id.clone(),
            request_scope_handle_id: if options.explode_composites {
                None
            } else {
                Some(root_handle_id.clone())
            },
            root_handle_id,
        }
    }
}
