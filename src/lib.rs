//! # Weft - Workflow Composition and Validation Engine
//!
//! **Weft** merges independently authored workflow subsection graphs into
//! one executable graph, validates the result against structural
//! invariants, and renders a deterministic ASCII diagram of it. The engine
//! reasons purely about graph shape and declared contracts; it never
//! executes node logic.
//!
//! ## Core Workflow
//!
//! The engine operates on a canonical internal model of subsections and
//! bindings. The primary workflow is:
//!
//! 1.  **Load Your Subsections**: Use the shipped JSON loader, or parse your
//!     own authoring format and implement the `IntoSubsection` trait to
//!     translate it into weft's `SubsectionDefinition`.
//! 2.  **Merge**: `Merger` namespaces every node by its subsection, wires
//!     export ports to import ports per the binding list, and produces a
//!     single `MergedGraph` - or fails all-or-nothing if any binding is
//!     invalid or any boundary port is left unbound.
//! 3.  **Validate**: `Validator` runs every structural check (dangling
//!     edges, entry points, reachability, terminal legality, cycle
//!     classification) and returns the complete diagnostic list.
//! 4.  **Render**: `LayoutEngine` assigns layered coordinates and renders
//!     the fixed-width diagram, including a trailing block for unreachable
//!     nodes so nothing is silently dropped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use weft::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // 1. Load subsection artifacts and the binding list.
//!     let subsections = load_subsection_set("flows/subsections.json")?;
//!     let bindings = load_binding_list("flows/bindings.json")?;
//!
//!     // 2. Merge into one graph.
//!     let graph = Merger::new(subsections, bindings).merge()?;
//!
//!     // 3. Validate. Defects come back as diagnostics, never as errors;
//!     //    the pipeline keeps going so the graph can still be inspected.
//!     let report = Validator::new(&graph).run();
//!     for diagnostic in &report.diagnostics {
//!         eprintln!("{}", diagnostic);
//!     }
//!
//!     // 4. Render the diagram (useful for invalid graphs too).
//!     let layout = LayoutEngine::new(&graph).compute();
//!     println!("{}", layout.ascii);
//!
//!     if report.is_valid() {
//!         MergedArtifact::from_graph("order-flow", &graph).save("order-flow.bin")?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod graph;
pub mod layout;
pub mod merge;
pub mod prelude;
pub mod validate;
pub mod workflow;
