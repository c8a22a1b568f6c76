use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::{Value, json};
use std::fs;
use weft::prelude::*;

/// A CLI tool to generate a sample subsection set and binding list for weft
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to write the generated subsection-set JSON to
    #[arg(long, default_value = "generated_subsections.json")]
    subsections: String,

    /// Path to write the generated binding-list JSON to
    #[arg(long, default_value = "generated_bindings.json")]
    bindings: String,

    /// Number of subsections to chain together
    #[arg(short, long, default_value_t = 3)]
    count: usize,

    /// The minimum number of action nodes per subsection
    #[arg(long, default_value_t = 1)]
    min: usize,

    /// The maximum number of action nodes per subsection
    #[arg(long, default_value_t = 4)]
    max: usize,
}

const STAGE_NAMES: [&str; 6] = [
    "intake",
    "enrichment",
    "review",
    "dispatch",
    "billing",
    "archive",
];

const STEP_VERBS: [&str; 6] = ["fetch", "validate", "transform", "route", "record", "notify"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max || cli.min == 0 {
        eprintln!(
            "Error: --min ({}) must be at least 1 and not greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }
    if cli.count == 0 {
        eprintln!("Error: --count must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating {} chained subsection(s) ({} to {} action(s) each)...",
        cli.count, cli.min, cli.max
    );

    let mut subsections = Vec::new();
    for i in 0..cli.count {
        let name = stage_name(i);
        subsections.push(generate_subsection(&mut rng, &name, i, cli.count, cli.min, cli.max));
        println!("-> Generated subsection '{}'.", name);
    }

    let bindings: Vec<Value> = (0..cli.count.saturating_sub(1))
        .map(|i| {
            json!({
                "export_subsection": stage_name(i),
                "export_port": "out",
                "import_subsection": stage_name(i + 1),
                "import_port": "in",
            })
        })
        .collect();

    let set = serde_json::to_string_pretty(&json!({ "subsections": subsections }))?;
    let bindings = serde_json::to_string_pretty(&bindings)?;

    // Round-trip the output through the real pipeline before saving it.
    let graph = Merger::new(parse_subsection_set(&set)?, parse_binding_list(&bindings)?).merge()?;
    let report = Validator::new(&graph).run();
    if !report.is_valid() {
        for diagnostic in &report.diagnostics {
            eprintln!("{}", diagnostic);
        }
        return Err("generated workflow failed validation".into());
    }

    fs::write(&cli.subsections, set)?;
    fs::write(&cli.bindings, bindings)?;

    println!(
        "Successfully saved '{}' and '{}' ({} node(s), {} binding(s)).",
        cli.subsections,
        cli.bindings,
        graph.nodes().len(),
        cli.count.saturating_sub(1)
    );

    Ok(())
}

fn stage_name(i: usize) -> String {
    let base = STAGE_NAMES[i % STAGE_NAMES.len()];
    if i < STAGE_NAMES.len() {
        base.to_string()
    } else {
        format!("{}-{}", base, i / STAGE_NAMES.len() + 1)
    }
}

/// Generates one subsection: an action chain with a trigger at the head of
/// the first subsection, a terminal at the tail of the last, and boundary
/// ports wherever the chain crosses into a neighbor.
fn generate_subsection(
    rng: &mut ThreadRng,
    name: &str,
    index: usize,
    count: usize,
    min: usize,
    max: usize,
) -> Value {
    let mut nodes = Vec::new();
    let mut connections = Vec::new();
    let mut chain: Vec<String> = Vec::new();

    if index == 0 {
        nodes.push(json!({
            "id": "start",
            "display_name": "Start",
            "kind": "trigger",
        }));
        chain.push("start".to_string());
    }

    let steps = rng.random_range(min..=max);
    for step in 0..steps {
        let verb = STEP_VERBS[rng.random_range(0..STEP_VERBS.len())];
        let id = format!("step-{}", step + 1);
        nodes.push(json!({
            "id": &id,
            "display_name": format!("{} {}", verb, name),
            "kind": "action",
            "config": { "operation": verb, "retries": rng.random_range(0..3) },
        }));
        chain.push(id);
    }

    if index + 1 == count {
        nodes.push(json!({
            "id": "finish",
            "display_name": "Finish",
            "kind": "terminal",
        }));
        chain.push("finish".to_string());
    }

    for pair in chain.windows(2) {
        connections.push(json!({
            "source": &pair[0],
            "source_port": 0,
            "target": &pair[1],
            "target_port": 0,
            "kind": "main",
        }));
    }

    let mut imports = Vec::new();
    if index > 0 {
        imports.push(json!({ "port": "in", "node": &chain[0], "index": 0 }));
    }
    let mut exports = Vec::new();
    if index + 1 < count {
        exports.push(json!({
            "port": "out",
            "node": &chain[chain.len() - 1],
            "index": 0,
        }));
    }

    json!({
        "name": name,
        "nodes": nodes,
        "connections": connections,
        "boundary": { "imports": imports, "exports": exports },
    })
}
