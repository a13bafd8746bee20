use crate::explode::Exploder;
use crate::graphql::{parse_handles, to_json};
use pyo3::prelude::*;

/// Explodes every composite solid in a solid-handle graph.
///
/// Args:
///     handles_json (str): A JSON array of solid handles in the explorer's
///         GraphQL fragment shape (`handleID`, `solid { ... }`), covering
///         every depth of the pipeline.
///     strict (bool): Raise instead of skipping mappings that point at a
///         missing interior solid or port.
///
/// Returns:
///     str: A JSON array of the flattened solid handles, in the same shape.
///
/// Raises:
///     ValueError: If the JSON is malformed or a handle is inconsistent.
///     RuntimeError: If the explosion fails (only possible with `strict`).
#[pyfunction]
#[pyo3(signature = (handles_json, strict = false))]
fn explode_handles(handles_json: &str, strict: bool) -> PyResult<String> {
    let handles = parse_handles(handles_json)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;

    let exploded = Exploder::builder()
        .strict(strict)
        .build()
        .explode(&handles)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))?;

    to_json(&exploded.handles)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
}

/// Composite explosion for pipeline solid-handle graphs.
///
/// This module provides Python bindings to the handle-graph Rust library.
#[pymodule]
fn handle_graph(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(explode_handles, m)?)?;
    Ok(())
}
