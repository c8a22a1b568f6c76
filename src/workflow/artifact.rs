use super::definition::{
    BindingDefinition, BoundaryContract, ConnectionDefinition, ExportPort, ImportPort,
    NodeDefinition, SubsectionDefinition,
};
use crate::error::{ArtifactError, LoadError};
use crate::graph::{ConfigMap, EdgeKind, MergedGraph, NodeKind, PortIndex};
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// On-disk shape of a subsection-set document.
#[derive(Serialize, Deserialize, Debug)]
pub struct SubsectionSetArtifact {
    pub subsections: Vec<SubsectionArtifact>,
}

/// One subsection as authored: nodes, connections, and its boundary contract.
#[derive(Serialize, Deserialize, Debug)]
pub struct SubsectionArtifact {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
    #[serde(default)]
    pub boundary: BoundaryRecord,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default, alias = "displayName")]
    pub display_name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub config: ConfigMap,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConnectionRecord {
    pub source: String,
    #[serde(default, alias = "sourcePort")]
    pub source_port: PortIndex,
    pub target: String,
    #[serde(default, alias = "targetPort")]
    pub target_port: PortIndex,
    #[serde(default)]
    pub kind: EdgeKind,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct BoundaryRecord {
    #[serde(default)]
    pub imports: Vec<ImportRecord>,
    #[serde(default)]
    pub exports: Vec<ExportRecord>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ImportRecord {
    pub port: String,
    pub node: String,
    #[serde(default, alias = "portIndex")]
    pub index: PortIndex,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ExportRecord {
    pub port: String,
    pub node: String,
    #[serde(default, alias = "portIndex")]
    pub index: PortIndex,
}

/// One record of a binding-list document.
#[derive(Serialize, Deserialize, Debug)]
pub struct BindingRecord {
    #[serde(alias = "exportSubsection")]
    pub export_subsection: String,
    #[serde(alias = "exportPort")]
    pub export_port: String,
    #[serde(alias = "importSubsection")]
    pub import_subsection: String,
    #[serde(alias = "importPort")]
    pub import_port: String,
}

/// Parses a subsection-set document into canonical definitions.
pub fn parse_subsection_set(json: &str) -> Result<Vec<SubsectionDefinition>, LoadError> {
    let set: SubsectionSetArtifact =
        serde_json::from_str(json).map_err(|e| LoadError::MalformedArtifact(e.to_string()))?;
    Ok(set
        .subsections
        .into_iter()
        .map(convert_subsection)
        .collect())
}

/// Reads and parses a subsection-set document from a file.
pub fn load_subsection_set(path: &str) -> Result<Vec<SubsectionDefinition>, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    parse_subsection_set(&content)
}

/// Parses a binding-list document into canonical definitions.
pub fn parse_binding_list(json: &str) -> Result<Vec<BindingDefinition>, LoadError> {
    let records: Vec<BindingRecord> =
        serde_json::from_str(json).map_err(|e| LoadError::MalformedBindingList(e.to_string()))?;
    Ok(records
        .into_iter()
        .map(|r| BindingDefinition {
            export_subsection: r.export_subsection,
            export_port: r.export_port,
            import_subsection: r.import_subsection,
            import_port: r.import_port,
        })
        .collect())
}

/// Reads and parses a binding-list document from a file.
pub fn load_binding_list(path: &str) -> Result<Vec<BindingDefinition>, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    parse_binding_list(&content)
}

fn convert_subsection(artifact: SubsectionArtifact) -> SubsectionDefinition {
    let nodes = artifact
        .nodes
        .into_iter()
        .map(|record| {
            // An omitted display name falls back to the local id.
            let display_name = if record.display_name.is_empty() {
                record.id.clone()
            } else {
                record.display_name
            };
            NodeDefinition {
                id: record.id,
                display_name,
                kind: record.kind,
                config: record.config,
            }
        })
        .collect();

    let connections = artifact
        .connections
        .into_iter()
        .map(|record| ConnectionDefinition {
            source: record.source,
            source_port: record.source_port,
            target: record.target,
            target_port: record.target_port,
            kind: record.kind,
        })
        .collect();

    let boundary = BoundaryContract {
        imports: artifact
            .boundary
            .imports
            .into_iter()
            .map(|record| ImportPort {
                name: record.port,
                target: record.node,
                target_port: record.index,
            })
            .collect(),
        exports: artifact
            .boundary
            .exports
            .into_iter()
            .map(|record| ExportPort {
                name: record.port,
                source: record.node,
                source_port: record.index,
            })
            .collect(),
    };

    SubsectionDefinition {
        name: artifact.name,
        nodes,
        connections,
        boundary,
    }
}

/// The produced merged artifact: the shape of a subsection artifact with the
/// boundary section gone (a complete merge leaves no dangling ports).
/// Suitable for direct consumption by an execution engine.
#[derive(Serialize, Deserialize, Debug)]
pub struct MergedArtifact {
    pub name: String,
    pub nodes: Vec<MergedNodeRecord>,
    pub connections: Vec<ConnectionRecord>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MergedNodeRecord {
    pub id: String,
    pub display_name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub config: ConfigMap,
    pub subsection: String,
}

impl MergedArtifact {
    pub fn from_graph(name: &str, graph: &MergedGraph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| MergedNodeRecord {
                id: node.id.clone(),
                display_name: node.display_name.clone(),
                kind: node.kind,
                config: node.config.clone(),
                subsection: node.subsection.clone(),
            })
            .collect();

        let connections = graph
            .edges()
            .iter()
            .map(|edge| ConnectionRecord {
                source: edge.source.clone(),
                source_port: edge.source_port,
                target: edge.target.clone(),
                target_port: edge.target_port,
                kind: edge.kind,
            })
            .collect();

        Self {
            name: name.to_string(),
            nodes,
            connections,
        }
    }

    /// Serializes the artifact as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ArtifactError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ArtifactError::Generic(format!("JSON serialization failed: {}", e)))
    }

    /// Saves the artifact to a file as a compact binary snapshot.
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

    /// Loads a binary snapshot from a file.
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

    /// Deserializes a binary snapshot from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        decode_from_slice(bytes, standard())
            .map(|(artifact, _)| artifact) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| ArtifactError::Generic(format!("Deserialization failed: {}", e)))
    }
}
