//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the weft crate.
//! Import this module to get access to the core functionality without having
//! to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use weft::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let subsections = load_subsection_set("flows/subsections.json")?;
//! let bindings = load_binding_list("flows/bindings.json")?;
//!
//! let graph = Merger::new(subsections, bindings).merge()?;
//! let report = Validator::new(&graph).run();
//! let layout = LayoutEngine::new(&graph).compute();
//!
//! println!("{}", layout.ascii);
//! println!("valid: {}", report.is_valid());
//! # Ok(())
//! # }
//! ```

// Core pipeline stages
pub use crate::layout::{Layout, LayoutEngine, Position};
pub use crate::merge::{Merger, NAMESPACE_SEPARATOR, namespaced_id};
pub use crate::validate::{ValidationOptions, ValidationReport, Validator};

// Graph model types
pub use crate::graph::{ConfigMap, Edge, EdgeKind, MergedGraph, Node, NodeKind, PortIndex};

// Workflow definitions, artifacts, and loading
pub use crate::workflow::{
    BindingDefinition, BoundaryContract, ConnectionDefinition, ExportPort, ImportPort,
    IntoSubsection, MergedArtifact, NodeDefinition, SubsectionDefinition, load_binding_list,
    load_subsection_set, parse_binding_list, parse_subsection_set,
};

// Diagnostics
pub use crate::validate::diagnostic::{Diagnostic, DiagnosticCode, Severity};

// Error types
pub use crate::error::{GraphError, LoadError, MergeError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
