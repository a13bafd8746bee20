use serde::{Deserialize, Serialize};

/// `{ name }` selection used for every solid and definition reference.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NameRef {
    pub name: String,
}

impl NameRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Solid handle as returned by the `solidHandles` field
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawSolidHandle {
    #[serde(rename = "handleID", alias = "handleId", alias = "handle_id")]
    pub handle_id: String,
    pub solid: RawSolid,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawSolid {
    pub name: String,
    pub definition: RawDefinition,
    #[serde(default)]
    pub inputs: Vec<RawInput>,
    #[serde(default)]
    pub outputs: Vec<RawOutput>,
}

/// Solid definition, discriminated by GraphQL `__typename`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "__typename")]
pub enum RawDefinition {
    SolidDefinition {
        name: String,
    },
    CompositeSolidDefinition {
        name: String,
        #[serde(default, rename = "inputMappings", alias = "input_mappings")]
        input_mappings: Vec<RawInputMapping>,
        #[serde(default, rename = "outputMappings", alias = "output_mappings")]
        output_mappings: Vec<RawOutputMapping>,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawInputMapping {
    pub definition: NameRef,
    #[serde(rename = "mappedInput", alias = "mapped_input")]
    pub mapped_input: RawMappedPort,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawOutputMapping {
    pub definition: NameRef,
    #[serde(rename = "mappedOutput", alias = "mapped_output")]
    pub mapped_output: RawMappedPort,
}

/// Interior end of a mapping: which solid, and which of its ports
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawMappedPort {
    pub definition: NameRef,
    pub solid: NameRef,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawInput {
    pub definition: NameRef,
    #[serde(default, rename = "dependsOn", alias = "depends_on")]
    pub depends_on: Vec<RawPortRef>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub definition: NameRef,
    #[serde(default, rename = "dependedBy", alias = "depended_by")]
    pub depended_by: Vec<RawPortRef>,
}

/// The far end of an edge: `{ solid { name } definition { name } }`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawPortRef {
    pub solid: NameRef,
    pub definition: NameRef,
}
