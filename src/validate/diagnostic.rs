//! Structured validation findings.
//!
//! Diagnostics describe defects in a merged graph; they never mutate it.
//! Severity distinguishes fatal defects from advisory ones: a graph is
//! executable-ready as long as no error-severity diagnostic exists.

use std::fmt;

/// The severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A defect that blocks execution readiness.
    Error,
    /// An advisory finding that does not block validity.
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Stable codes identifying each validator check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// An edge endpoint does not resolve to a node in the graph.
    DanglingEdge,
    /// Two nodes share an identifier after merging. Merging guarantees
    /// uniqueness by construction, so this should never occur.
    InternalInvariantViolation,
    /// A terminal node has outbound `main` edges.
    InvalidTerminalTopology,
    /// A trigger node has inbound edges.
    InvalidTriggerTopology,
    /// The graph has no trigger node at all.
    NoEntryPoint,
    /// A non-trigger node cannot be reached from any trigger.
    OrphanNode,
    /// A directed cycle closes without passing through a merge-point node.
    UnintendedCycle,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::DanglingEdge => "DanglingEdge",
            DiagnosticCode::InternalInvariantViolation => "InternalInvariantViolation",
            DiagnosticCode::InvalidTerminalTopology => "InvalidTerminalTopology",
            DiagnosticCode::InvalidTriggerTopology => "InvalidTriggerTopology",
            DiagnosticCode::NoEntryPoint => "NoEntryPoint",
            DiagnosticCode::OrphanNode => "OrphanNode",
            DiagnosticCode::UnintendedCycle => "UnintendedCycle",
        }
    }

    /// A short description of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            DiagnosticCode::DanglingEdge => "edge endpoint does not resolve to a node",
            DiagnosticCode::InternalInvariantViolation => "post-merge invariant broken",
            DiagnosticCode::InvalidTerminalTopology => "terminal node has outbound main edges",
            DiagnosticCode::InvalidTriggerTopology => "trigger node has inbound edges",
            DiagnosticCode::NoEntryPoint => "graph has no trigger node",
            DiagnosticCode::OrphanNode => "node unreachable from every trigger",
            DiagnosticCode::UnintendedCycle => "cycle closes without a merge-point",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    pub node_ids: Vec<String>,
    pub edge_refs: Vec<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// The ordered findings of a full validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// True when no error-severity diagnostic is present. Warnings do not
    /// block validity.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }
}
