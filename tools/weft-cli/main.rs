use clap::{Parser, Subcommand};
use std::fs;
use weft::prelude::*;

/// A composition and validation engine for subsection-based workflow graphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge subsections into one graph and emit the merged artifact
    Merge {
        /// Path to the subsection-set JSON file
        subsections: String,
        /// Path to the binding-list JSON file
        bindings: String,
        /// Name recorded in the merged artifact
        #[arg(short, long, default_value = "merged")]
        name: String,
        /// Write the artifact JSON to this path instead of stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Also write a binary snapshot of the artifact to this path
        #[arg(long)]
        snapshot: Option<String>,
    },
    /// Validate the merged graph and print every diagnostic
    Validate {
        /// Path to the subsection-set JSON file
        subsections: String,
        /// Path to the binding-list JSON file
        bindings: String,
        /// Treat orphan nodes as errors instead of warnings
        #[arg(long)]
        strict_orphans: bool,
    },
    /// Render the merged graph as an ASCII diagram
    Diagram {
        /// Path to the subsection-set JSON file
        subsections: String,
        /// Path to the binding-list JSON file
        bindings: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Merge {
            subsections,
            bindings,
            name,
            output,
            snapshot,
        } => run_merge(&subsections, &bindings, &name, output, snapshot),
        Command::Validate {
            subsections,
            bindings,
            strict_orphans,
        } => run_validate(&subsections, &bindings, strict_orphans),
        Command::Diagram {
            subsections,
            bindings,
        } => run_diagram(&subsections, &bindings),
    }
}

/// Load and merge are fatal stages: any failure prints one terminal error
/// and exits nonzero before a graph exists.
fn load_and_merge(subsections_path: &str, bindings_path: &str) -> MergedGraph {
    let subsections = load_subsection_set(subsections_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Load failed: {}", e)));
    let bindings = load_binding_list(bindings_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Load failed: {}", e)));

    Merger::new(subsections, bindings)
        .merge()
        .unwrap_or_else(|e| exit_with_error(&format!("Merge failed: {}", e)))
}

/// Prints the full diagnostic list and returns whether the graph is valid.
fn print_report(report: &ValidationReport) -> bool {
    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic);
    }
    println!(
        "{} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
    report.is_valid()
}

fn run_merge(
    subsections_path: &str,
    bindings_path: &str,
    name: &str,
    output: Option<String>,
    snapshot: Option<String>,
) {
    let graph = load_and_merge(subsections_path, bindings_path);
    let report = Validator::new(&graph).run();
    let valid = print_report(&report);

    let artifact = MergedArtifact::from_graph(name, &graph);
    let json = artifact
        .to_json()
        .unwrap_or_else(|e| exit_with_error(&format!("Artifact serialization failed: {}", e)));

    match output {
        Some(path) => {
            fs::write(&path, &json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write artifact to '{}': {}", path, e))
            });
            println!("Wrote merged artifact to '{}'", path);
        }
        None => println!("{}", json),
    }

    if let Some(path) = snapshot {
        artifact
            .save(&path)
            .unwrap_or_else(|e| exit_with_error(&format!("Snapshot failed: {}", e)));
        println!("Wrote binary snapshot to '{}'", path);
    }

    if !valid {
        std::process::exit(1);
    }
}

fn run_validate(subsections_path: &str, bindings_path: &str, strict_orphans: bool) {
    let graph = load_and_merge(subsections_path, bindings_path);

    let options = ValidationOptions {
        orphan_severity: if strict_orphans {
            Severity::Error
        } else {
            Severity::Warning
        },
    };
    let report = Validator::with_options(&graph, options).run();

    if !print_report(&report) {
        std::process::exit(1);
    }
}

fn run_diagram(subsections_path: &str, bindings_path: &str) {
    let graph = load_and_merge(subsections_path, bindings_path);
    let report = Validator::new(&graph).run();
    let valid = print_report(&report);

    // Rendering proceeds even for defective graphs so they can be seen.
    let layout = LayoutEngine::new(&graph).compute();
    println!("{}", layout.ascii);

    if !valid {
        std::process::exit(1);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
