//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! handle-graph crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use handle_graph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/handles.json")?;
//! let handles = parse_handles(&json)?;
//!
//! let flattened = explode_composites(&handles)?;
//! println!("{} solids after explosion", flattened.len());
//! # Ok(())
//! # }
//! ```

// Core explosion
pub use crate::explode::{Exploder, ExploderBuilder, HandleGraph, explode_composites};

// Data model
pub use crate::model::{
    CompositeDefinition, Definition, ExplodedGraph, Input, InputMapping, IntoHandles, Node,
    NodeHandle, Output, OutputMapping, PortRef, UnresolvedMapping,
};

// Wire decoding and explorer boundary
pub use crate::graphql::{RawSolidHandle, parse_handles, to_json};
pub use crate::path::{ExplorerPath, ExplorerQueryVariables};
pub use crate::snapshot::{
    NonIdealIcon, NonIdealState, PipelineSnapshot, SnapshotOutcome, resolve_snapshot,
};
pub use crate::view::{ExplorerOptions, HandleView};

// Error types
pub use crate::error::{
    ArtifactError, ConversionError, ExplodeError, ExplorerPathError, PortDirection,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
