use super::types::*;
use crate::error::ConversionError;
use crate::model::{
    CompositeDefinition, Definition, HANDLE_SEPARATOR, Input, InputMapping, IntoHandles, Node,
    NodeHandle, Output, OutputMapping, PortRef,
};

impl IntoHandles for Vec<RawSolidHandle> {
    fn into_handles(self) -> Result<Vec<NodeHandle>, ConversionError> {
        self.into_iter().map(NodeHandle::try_from).collect()
    }
}

impl TryFrom<RawSolidHandle> for NodeHandle {
    type Error = ConversionError;

    fn try_from(raw: RawSolidHandle) -> Result<Self, Self::Error> {
        if raw.handle_id.is_empty() {
            return Err(ConversionError::ValidationError(format!(
                "solid '{}' has an empty handle id",
                raw.solid.name
            )));
        }
        let last_segment = raw
            .handle_id
            .rsplit(HANDLE_SEPARATOR)
            .next()
            .unwrap_or_default();
        // Exploded handles carry their full handle id as the solid name.
        if raw.solid.name != last_segment && raw.solid.name != raw.handle_id {
            return Err(ConversionError::ValidationError(format!(
                "handle '{}' does not end with its solid name '{}'",
                raw.handle_id, raw.solid.name
            )));
        }

        let definition = match raw.solid.definition {
            RawDefinition::SolidDefinition { name } => Definition::Simple { name },
            RawDefinition::CompositeSolidDefinition {
                name,
                input_mappings,
                output_mappings,
            } => Definition::Composite(CompositeDefinition {
                name,
                input_mappings: input_mappings
                    .into_iter()
                    .map(|m| InputMapping {
                        definition_name: m.definition.name,
                        mapped_node: m.mapped_input.solid.name,
                        mapped_input: m.mapped_input.definition.name,
                    })
                    .collect(),
                output_mappings: output_mappings
                    .into_iter()
                    .map(|m| OutputMapping {
                        definition_name: m.definition.name,
                        mapped_node: m.mapped_output.solid.name,
                        mapped_output: m.mapped_output.definition.name,
                    })
                    .collect(),
            }),
        };

        let inputs = raw
            .solid
            .inputs
            .into_iter()
            .map(|i| Input {
                definition_name: i.definition.name,
                depends_on: i.depends_on.into_iter().map(PortRef::from).collect(),
            })
            .collect();
        let outputs = raw
            .solid
            .outputs
            .into_iter()
            .map(|o| Output {
                definition_name: o.definition.name,
                depended_by: o.depended_by.into_iter().map(PortRef::from).collect(),
            })
            .collect();

        Ok(NodeHandle {
            handle_id: raw.handle_id,
            node: Node {
                name: raw.solid.name,
                definition,
                inputs,
                outputs,
            },
        })
    }
}

impl From<RawPortRef> for PortRef {
    fn from(raw: RawPortRef) -> Self {
        PortRef {
            solid_name: raw.solid.name,
            definition_name: raw.definition.name,
        }
    }
}

impl From<&PortRef> for RawPortRef {
    fn from(port: &PortRef) -> Self {
        RawPortRef {
            solid: NameRef::new(port.solid_name.as_str()),
            definition: NameRef::new(port.definition_name.as_str()),
        }
    }
}

impl From<&NodeHandle> for RawSolidHandle {
    fn from(handle: &NodeHandle) -> Self {
        let node = &handle.node;
        let definition = match &node.definition {
            Definition::Simple { name } => RawDefinition::SolidDefinition { name: name.clone() },
            Definition::Composite(composite) => RawDefinition::CompositeSolidDefinition {
                name: composite.name.clone(),
                input_mappings: composite
                    .input_mappings
                    .iter()
                    .map(|m| RawInputMapping {
                        definition: NameRef::new(m.definition_name.as_str()),
                        mapped_input: RawMappedPort {
                            definition: NameRef::new(m.mapped_input.as_str()),
                            solid: NameRef::new(m.mapped_node.as_str()),
                        },
                    })
                    .collect(),
                output_mappings: composite
                    .output_mappings
                    .iter()
                    .map(|m| RawOutputMapping {
                        definition: NameRef::new(m.definition_name.as_str()),
                        mapped_output: RawMappedPort {
                            definition: NameRef::new(m.mapped_output.as_str()),
                            solid: NameRef::new(m.mapped_node.as_str()),
                        },
                    })
                    .collect(),
            },
        };

        RawSolidHandle {
            handle_id: handle.handle_id.clone(),
            solid: RawSolid {
                name: node.name.clone(),
                definition,
                inputs: node
                    .inputs
                    .iter()
                    .map(|i| RawInput {
                        definition: NameRef::new(i.definition_name.as_str()),
                        depends_on: i.depends_on.iter().map(RawPortRef::from).collect(),
                    })
                    .collect(),
                outputs: node
                    .outputs
                    .iter()
                    .map(|o| RawOutput {
                        definition: NameRef::new(o.definition_name.as_str()),
                        depended_by: o.depended_by.iter().map(RawPortRef::from).collect(),
                    })
                    .collect(),
            },
        }
    }
}

/// Parses a JSON array of solid-handle fragments into canonical handles.
pub fn parse_handles(json: &str) -> Result<Vec<NodeHandle>, ConversionError> {
    let raw: Vec<RawSolidHandle> = serde_json::from_str(json)
        .map_err(|e| ConversionError::JsonParseError(e.to_string()))?;
    raw.into_handles()
}

/// Renders handles back into the solid-handle fragment JSON shape.
pub fn to_json(handles: &[NodeHandle]) -> Result<String, ConversionError> {
    let raw: Vec<RawSolidHandle> = handles.iter().map(RawSolidHandle::from).collect();
    serde_json::to_string_pretty(&raw).map_err(|e| ConversionError::JsonParseError(e.to_string()))
}
