//! # handle-graph - Composite Explosion for Pipeline Graphs
//!
//! **handle-graph** rewrites the solid-handle graph of a data pipeline so that
//! composite solids disappear: every composite is replaced, recursively, by the
//! solids it contains, and every dependency edge that crossed a composite
//! boundary is re-linked through the composite's input and output mappings to
//! the interior solid that actually produces or consumes the value.
//!
//! ## Core Workflow
//!
//! 1.  **Fetch**: Query the orchestration backend for the pipeline snapshot. Ask for
//!     every depth of the graph, not only the layer on screen.
//! 2.  **Decode**: Resolve the response with [`snapshot::resolve_snapshot`] (or decode
//!     handles directly with [`graphql::parse_handles`]). Custom payloads can implement
//!     [`model::IntoHandles`].
//! 3.  **Explode**: Run [`explode::explode_composites`], or configure an
//!     [`explode::Exploder`] through its builder to get the full [`model::ExplodedGraph`]
//!     report.
//! 4.  **Display**: Wrap the result in a [`view::HandleView`] to look up the selected
//!     solid and every invocation of a definition.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use handle_graph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let response = std::fs::read_to_string("snapshot.json")?;
//!
//!     let snapshot = match resolve_snapshot(&response)? {
//!         SnapshotOutcome::Snapshot(snapshot) => snapshot,
//!         SnapshotOutcome::NonIdeal(state) => {
//!             println!("{}", state.title);
//!             return Ok(());
//!         }
//!     };
//!
//!     let flattened = Exploder::builder().strict(false).build().explode(&snapshot.handles)?;
//!     for handle in &flattened.handles {
//!         println!("{} ({})", handle.node.name, handle.node.definition.name());
//!     }
//!
//!     let path: ExplorerPath = "my_pipeline/outer/inner".parse()?;
//!     let options = ExplorerOptions { explode_composites: true };
//!     let view = HandleView::for_snapshot(&snapshot, &path, &options)?;
//!     println!("{:?}", view.invocations("add_one"));
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod explode;
pub mod graphql;
pub mod model;
pub mod path;
pub mod prelude;
pub mod snapshot;
pub mod view;

#[cfg(feature = "python-bindings")]
mod python;
