use crate::error::ExplodeError;
use crate::model::{ExplodedGraph, NodeHandle};

mod graph;

pub use graph::{Edge, Endpoint, Explosion, HandleGraph};

/// Replaces every composite in a handle collection, recursively, with its
/// interior nodes.
///
/// Interior nodes are renamed to their full handle id (`outer.inner`) and all
/// edges that crossed a composite boundary are rewritten through the
/// composite's input and output mappings.
pub struct Exploder {
    strict: bool,
}

pub struct ExploderBuilder {
    strict: bool,
}

impl ExploderBuilder {
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Fail with [`ExplodeError::UnresolvedMapping`] instead of leaving edges
    /// through an unresolvable mapping attached to the composite.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(self) -> Exploder {
        Exploder {
            strict: self.strict,
        }
    }
}

impl Default for ExploderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Exploder {
    fn default() -> Self {
        ExploderBuilder::new().build()
    }
}

impl Exploder {
    pub fn builder() -> ExploderBuilder {
        ExploderBuilder::new()
    }

    /// Explodes `handles`, which must hold every handle of the pipeline (not
    /// only the current layer). The input is left untouched.
    ///
    /// An external port with several mappings routes its edges to every mapped
    /// interior port, not only to the first one listed.
    pub fn explode(&self, handles: &[NodeHandle]) -> Result<ExplodedGraph, ExplodeError> {
        let mut graph = HandleGraph::from_handles(handles);
        let mut results = graph.top_layer();
        let mut exploded = Vec::new();
        let mut unresolved = Vec::new();

        while let Some(idx) = results
            .iter()
            .position(|id| graph.get(id).is_some_and(NodeHandle::is_composite))
        {
            let composite_id = results[idx].clone();
            let explosion = graph.explode_composite(&composite_id)?;

            if self.strict {
                if let Some(missing) = explosion.unresolved.into_iter().next() {
                    return Err(ExplodeError::UnresolvedMapping {
                        composite: missing.composite,
                        direction: missing.direction,
                        port: missing.port,
                        target: missing.target,
                    });
                }
            } else {
                unresolved.extend(explosion.unresolved);
            }

            log::debug!(
                "Exploded composite '{}' into {} interior node(s)",
                composite_id,
                explosion.children.len()
            );
            results.splice(idx..=idx, explosion.children);
            exploded.push(composite_id);
        }

        Ok(ExplodedGraph {
            handles: graph.materialize(&results),
            exploded,
            unresolved,
        })
    }
}

/// Explodes every composite in `handles` with the default, permissive settings.
pub fn explode_composites(handles: &[NodeHandle]) -> Result<Vec<NodeHandle>, ExplodeError> {
    Exploder::default()
        .explode(handles)
        .map(ExplodedGraph::into_handles)
}
