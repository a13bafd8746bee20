use super::definition::NodeHandle;
use crate::error::{ArtifactError, PortDirection};
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// A mapping that could not be followed during explosion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedMapping {
    pub composite: String,
    pub direction: PortDirection,
    /// The composite's external port name.
    pub port: String,
    /// The interior `node.port` the mapping pointed at.
    pub target: String,
}

/// The result of exploding every composite in a handle collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ExplodedGraph {
    /// The flattened handles, none of them composite.
    pub handles: Vec<NodeHandle>,
    /// Handle ids of the composites that were replaced, in explosion order.
    pub exploded: Vec<String>,
    pub unresolved: Vec<UnresolvedMapping>,
}

impl ExplodedGraph {
    pub fn into_handles(self) -> Vec<NodeHandle> {
        self.handles
    }

    /// Saves the exploded graph to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = encode_to_vec(self, standard())
            .map_err(|e| ArtifactError::Generic(format!("Serialization failed: {}", e)))?;
        let mut file = fs::File::create(path).map_err(|e| {
            ArtifactError::Generic(format!("Could not create file '{}': {}", path, e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            ArtifactError::Generic(format!("Could not write to file '{}': {}", path, e))
        })?;
        Ok(())
    }

    /// Loads an exploded graph from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path).map_err(|e| {
            ArtifactError::Generic(format!("Could not open file '{}': {}", path, e))
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            ArtifactError::Generic(format!("Could not read from file '{}': {}", path, e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes an exploded graph from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        decode_from_slice(bytes, standard())
            .map(|(graph, _)| graph)
            .map_err(|e| ArtifactError::Generic(format!("Deserialization failed: {}", e)))
    }
}
