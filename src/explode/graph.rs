use crate::error::{ExplodeError, PortDirection};
use crate::model::{NodeHandle, PortRef, UnresolvedMapping, child_handle_id};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// One side of a dependency edge: a fully qualified handle id and a port name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub node: String,
    pub port: String,
}

impl Endpoint {
    pub fn new(node: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            port: port.into(),
        }
    }

    fn to_port_ref(&self) -> PortRef {
        PortRef::new(self.node.clone(), self.port.clone())
    }
}

/// A single dependency: `producer` output feeds `consumer` input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub producer: Endpoint,
    pub consumer: Endpoint,
}

/// What a single composite explosion produced.
#[derive(Debug, Clone, Default)]
pub struct Explosion {
    /// Handle ids of the composite's direct interior nodes, in collection order.
    pub children: Vec<String>,
    pub unresolved: Vec<UnresolvedMapping>,
}

/// An arena of node-handles keyed by handle id, with one shared edge list.
///
/// Edges are stored once, with both endpoints fully qualified. The
/// `depends_on`/`depended_by` lists of the source handles are merged into this
/// list on construction and derived back from it by [`HandleGraph::materialize`].
#[derive(Debug, Clone)]
pub struct HandleGraph {
    handles: Vec<NodeHandle>,
    index: AHashMap<String, usize>,
    edges: Vec<Edge>,
}

impl HandleGraph {
    /// Builds an arena from a handle collection. The collection is copied, never modified.
    pub fn from_handles(source: &[NodeHandle]) -> Self {
        let mut handles: Vec<NodeHandle> = Vec::with_capacity(source.len());
        let mut index = AHashMap::with_capacity(source.len());
        let mut edges = Vec::new();
        let mut seen = AHashSet::new();

        for handle in source {
            if index.contains_key(&handle.handle_id) {
                log::warn!("Duplicate handle id '{}' ignored", handle.handle_id);
                continue;
            }

            for input in &handle.node.inputs {
                for dep in &input.depends_on {
                    let edge = Edge {
                        producer: Endpoint::new(
                            handle.resolve_sibling(&dep.solid_name),
                            dep.definition_name.as_str(),
                        ),
                        consumer: Endpoint::new(
                            handle.handle_id.as_str(),
                            input.definition_name.as_str(),
                        ),
                    };
                    if seen.insert(edge.clone()) {
                        edges.push(edge);
                    }
                }
            }
            for output in &handle.node.outputs {
                for dep in &output.depended_by {
                    let edge = Edge {
                        producer: Endpoint::new(
                            handle.handle_id.as_str(),
                            output.definition_name.as_str(),
                        ),
                        consumer: Endpoint::new(
                            handle.resolve_sibling(&dep.solid_name),
                            dep.definition_name.as_str(),
                        ),
                    };
                    if seen.insert(edge.clone()) {
                        edges.push(edge);
                    }
                }
            }

            // The edge list is authoritative from here on.
            let mut owned = handle.clone();
            owned
                .node
                .inputs
                .iter_mut()
                .for_each(|i| i.depends_on.clear());
            owned
                .node
                .outputs
                .iter_mut()
                .for_each(|o| o.depended_by.clear());
            index.insert(owned.handle_id.clone(), handles.len());
            handles.push(owned);
        }

        Self {
            handles,
            index,
            edges,
        }
    }

    pub fn get(&self, handle_id: &str) -> Option<&NodeHandle> {
        self.index.get(handle_id).map(|&i| &self.handles[i])
    }

    pub fn contains(&self, handle_id: &str) -> bool {
        self.index.contains_key(handle_id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Handle ids of the outermost layer present in the collection.
    ///
    /// Root handles have no separator. A handle whose enclosing composite was
    /// not fetched (a scoped query, or an already exploded collection) is also
    /// outermost.
    pub fn top_layer(&self) -> Vec<String> {
        self.handles
            .iter()
            .filter(|h| h.parent_id().is_none_or(|parent| !self.contains(parent)))
            .map(|h| h.handle_id.clone())
            .collect()
    }

    /// Handle ids of the nodes directly inside `handle_id`, in collection order.
    pub fn children(&self, handle_id: &str) -> Vec<String> {
        self.handles
            .iter()
            .filter(|h| h.handle_id == child_handle_id(handle_id, &h.node.name))
            .map(|h| h.handle_id.clone())
            .collect()
    }

    fn has_port(&self, handle_id: &str, direction: PortDirection, port: &str) -> bool {
        self.get(handle_id).is_some_and(|h| match direction {
            PortDirection::Input => h.node.input(port).is_some(),
            PortDirection::Output => h.node.output(port).is_some(),
        })
    }

    /// Resolves one composite mapping to the interior endpoint it routes to.
    fn resolve_mapping(
        &self,
        composite_id: &str,
        direction: PortDirection,
        external: &str,
        mapped_node: &str,
        mapped_port: &str,
    ) -> Result<(String, Endpoint), UnresolvedMapping> {
        let target = child_handle_id(composite_id, mapped_node);
        if self.has_port(&target, direction, mapped_port) {
            Ok((external.to_string(), Endpoint::new(target, mapped_port)))
        } else {
            Err(UnresolvedMapping {
                composite: composite_id.to_string(),
                direction,
                port: external.to_string(),
                target: child_handle_id(&target, mapped_port),
            })
        }
    }

    /// Rewrites every edge crossing the boundary of composite `handle_id` so it
    /// connects to the interior node named by the composite's mappings, and
    /// returns the composite's direct children.
    ///
    /// An external port mapped more than once fans the edge out to every
    /// mapped target. Edges through a port whose mapping does not resolve are
    /// left pointing at the composite and reported in [`Explosion::unresolved`].
    pub fn explode_composite(&mut self, handle_id: &str) -> Result<Explosion, ExplodeError> {
        let handle = self
            .get(handle_id)
            .ok_or_else(|| ExplodeError::UnknownHandle(handle_id.to_string()))?;
        let composite = handle.node.definition.as_composite().ok_or_else(|| {
            ExplodeError::NotComposite {
                handle_id: handle_id.to_string(),
            }
        })?;

        let mut unresolved = Vec::new();
        let mut inputs = Vec::with_capacity(composite.input_mappings.len());
        for m in &composite.input_mappings {
            match self.resolve_mapping(
                handle_id,
                PortDirection::Input,
                &m.definition_name,
                &m.mapped_node,
                &m.mapped_input,
            ) {
                Ok(route) => inputs.push(route),
                Err(missing) => unresolved.push(missing),
            }
        }
        let mut outputs = Vec::with_capacity(composite.output_mappings.len());
        for m in &composite.output_mappings {
            match self.resolve_mapping(
                handle_id,
                PortDirection::Output,
                &m.definition_name,
                &m.mapped_node,
                &m.mapped_output,
            ) {
                Ok(route) => outputs.push(route),
                Err(missing) => unresolved.push(missing),
            }
        }

        for missing in &unresolved {
            log::warn!(
                "Composite '{}' maps {} '{}' to missing '{}'; edges through it are left as-is",
                missing.composite,
                missing.direction,
                missing.port,
                missing.target
            );
        }

        let mut seen = AHashSet::with_capacity(self.edges.len());
        let mut rewritten = Vec::with_capacity(self.edges.len());
        for edge in std::mem::take(&mut self.edges) {
            let producers = reroute(&edge.producer, handle_id, &outputs);
            let consumers = reroute(&edge.consumer, handle_id, &inputs);
            for (producer, consumer) in producers.iter().cartesian_product(consumers.iter()) {
                let edge = Edge {
                    producer: producer.clone(),
                    consumer: consumer.clone(),
                };
                if seen.insert(edge.clone()) {
                    rewritten.push(edge);
                }
            }
        }
        self.edges = rewritten;

        Ok(Explosion {
            children: self.children(handle_id),
            unresolved,
        })
    }

    /// Produces standalone handles for `handle_ids`, each renamed to its full
    /// handle id and carrying both edge directions derived from the edge list.
    ///
    /// Dependency lists are sorted by `(solid_name, definition_name)`.
    pub fn materialize(&self, handle_ids: &[String]) -> Vec<NodeHandle> {
        let mut depends_on: AHashMap<(&str, &str), Vec<PortRef>> = AHashMap::new();
        let mut depended_by: AHashMap<(&str, &str), Vec<PortRef>> = AHashMap::new();
        for edge in &self.edges {
            depends_on
                .entry((edge.consumer.node.as_str(), edge.consumer.port.as_str()))
                .or_default()
                .push(edge.producer.to_port_ref());
            depended_by
                .entry((edge.producer.node.as_str(), edge.producer.port.as_str()))
                .or_default()
                .push(edge.consumer.to_port_ref());
        }

        let sorted = |refs: Option<&Vec<PortRef>>| -> Vec<PortRef> {
            refs.map(|r| r.iter().cloned().sorted().collect())
                .unwrap_or_default()
        };

        handle_ids
            .iter()
            .filter_map(|id| self.get(id).map(|h| (id, h)))
            .map(|(id, h)| {
                let mut handle = h.clone();
                handle.node.name = id.clone();
                for input in &mut handle.node.inputs {
                    let refs =
                        sorted(depends_on.get(&(id.as_str(), input.definition_name.as_str())));
                    input.depends_on = refs;
                }
                for output in &mut handle.node.outputs {
                    let refs =
                        sorted(depended_by.get(&(id.as_str(), output.definition_name.as_str())));
                    output.depended_by = refs;
                }
                handle
            })
            .collect()
    }
}

/// Replaces an endpoint on the exploded composite with its mapped interior endpoints.
fn reroute(
    endpoint: &Endpoint,
    composite_id: &str,
    routes: &[(String, Endpoint)],
) -> Vec<Endpoint> {
    if endpoint.node != composite_id {
        return vec![endpoint.clone()];
    }
    let mapped: Vec<Endpoint> = routes
        .iter()
        .filter(|(external, _)| *external == endpoint.port)
        .map(|(_, interior)| interior.clone())
        .collect();
    if mapped.is_empty() {
        vec![endpoint.clone()]
    } else {
        mapped
    }
}
