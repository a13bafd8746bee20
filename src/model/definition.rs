use serde::{Deserialize, Serialize};

/// Separator between the segments of a handle id (`outer.inner`).
pub const HANDLE_SEPARATOR: char = '.';

/// One occurrence of a node within a (possibly nested) pipeline graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeHandle {
    /// Dot-separated path from the pipeline root, unique across all depths.
    pub handle_id: String,
    pub node: Node,
}

/// One pipeline step ("solid").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub definition: Definition,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
}

/// The definition a node invokes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Definition {
    Simple { name: String },
    Composite(CompositeDefinition),
}

/// A definition whose body is itself a graph of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeDefinition {
    pub name: String,
    pub input_mappings: Vec<InputMapping>,
    pub output_mappings: Vec<OutputMapping>,
}

/// Routes an input of a composite to an input of one of its interior nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMapping {
    /// The input name as seen from outside the composite.
    pub definition_name: String,
    pub mapped_node: String,
    pub mapped_input: String,
}

/// Exposes an output of one interior node as an output of the composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMapping {
    /// The output name as seen from outside the composite.
    pub definition_name: String,
    pub mapped_node: String,
    pub mapped_output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub definition_name: String,
    pub depends_on: Vec<PortRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub definition_name: String,
    pub depended_by: Vec<PortRef>,
}

/// The far end of a dependency edge: a node name and one of its port names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub solid_name: String,
    pub definition_name: String,
}

impl PortRef {
    pub fn new(solid_name: impl Into<String>, definition_name: impl Into<String>) -> Self {
        Self {
            solid_name: solid_name.into(),
            definition_name: definition_name.into(),
        }
    }
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Simple { name } => name,
            Definition::Composite(composite) => &composite.name,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Definition::Composite(_))
    }

    pub fn as_composite(&self) -> Option<&CompositeDefinition> {
        match self {
            Definition::Composite(composite) => Some(composite),
            Definition::Simple { .. } => None,
        }
    }
}

impl Node {
    pub fn input(&self, definition_name: &str) -> Option<&Input> {
        self.inputs
            .iter()
            .find(|i| i.definition_name == definition_name)
    }

    pub fn output(&self, definition_name: &str) -> Option<&Output> {
        self.outputs
            .iter()
            .find(|o| o.definition_name == definition_name)
    }
}

impl NodeHandle {
    pub fn new(handle_id: impl Into<String>, node: Node) -> Self {
        Self {
            handle_id: handle_id.into(),
            node,
        }
    }

    pub fn is_composite(&self) -> bool {
        self.node.definition.is_composite()
    }

    /// The handle id of the enclosing composite, if any.
    pub fn parent_id(&self) -> Option<&str> {
        self.handle_id
            .rsplit_once(HANDLE_SEPARATOR)
            .map(|(parent, _)| parent)
    }

    /// The scope that bare sibling names on this node's edges resolve against.
    ///
    /// A freshly fetched handle `outer.inner` named `inner` resolves siblings
    /// inside `outer`. A handle whose name already is its full handle id (the
    /// output of an explosion) carries absolute references and has no scope.
    pub fn sibling_scope(&self) -> Option<&str> {
        if self.node.name == self.handle_id {
            return None;
        }
        match self.handle_id.strip_suffix(self.node.name.as_str()) {
            Some(prefix) if prefix.ends_with(HANDLE_SEPARATOR) => {
                Some(&prefix[..prefix.len() - HANDLE_SEPARATOR.len_utf8()])
            }
            _ => self.parent_id(),
        }
    }

    /// Qualifies a node name referenced by one of this handle's edges.
    pub fn resolve_sibling(&self, name: &str) -> String {
        match self.sibling_scope() {
            Some(scope) => child_handle_id(scope, name),
            None => name.to_string(),
        }
    }
}

/// Joins a parent handle id and a child node name.
pub fn child_handle_id(parent: &str, name: &str) -> String {
    format!("{}{}{}", parent, HANDLE_SEPARATOR, name)
}
