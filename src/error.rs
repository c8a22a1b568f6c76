use thiserror::Error;

/// Errors raised by structural queries on a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node '{0}' is not present in the graph")]
    UnknownNode(String),
}

/// Errors that can occur while loading subsection artifacts or binding lists.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Malformed subsection artifact: {0}")]
    MalformedArtifact(String),

    #[error("Malformed binding list: {0}")]
    MalformedBindingList(String),
}

/// Errors that can occur during the merge phase.
///
/// A merge is all-or-nothing: any of these aborts it and no `MergedGraph`
/// is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("Subsection '{0}' appears more than once in the merge input")]
    DuplicateSubsection(String),

    #[error("Node '{local_id}' is defined more than once in subsection '{subsection}'")]
    DuplicateNode { subsection: String, local_id: String },

    #[error(
        "Binding '{export_subsection}.{export_port}' -> '{import_subsection}.{import_port}' is invalid: {message}"
    )]
    InvalidBinding {
        export_subsection: String,
        export_port: String,
        import_subsection: String,
        import_port: String,
        message: String,
    },

    #[error("Merge left {count} unbound boundary port(s): {ports}")]
    UnboundPorts { count: usize, ports: String },
}

/// Errors that can occur while persisting or restoring a merged artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("{0}")]
    Generic(String),
}

/// Errors that can occur when converting a custom user format into a
/// `SubsectionDefinition`.
#[derive(Error, Debug, Clone)]
pub enum SubsectionConversionError {
    #[error("Invalid subsection data: {0}")]
    ValidationError(String),
}
