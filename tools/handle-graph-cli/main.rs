use clap::{Parser, ValueEnum};
use handle_graph::prelude::*;
use std::fs;
use std::time::Instant;

/// Output formats for the displayed handles.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One line per solid with its edges
    Text,
    /// The solid-handle fragment JSON shape
    Json,
}

/// Inspect a pipeline explorer snapshot and explode its composite solids
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the snapshot query result JSON file
    snapshot_path: String,

    /// Explorer path, e.g. `my_pipeline@snapshot_id/outer/inner`
    #[arg(short, long)]
    path: Option<String>,

    /// Replace composite solids with their interior solids
    #[arg(short, long)]
    explode: bool,

    /// Fail on composite mappings that point at a missing solid or port
    #[arg(long, requires = "explode")]
    strict: bool,

    /// List every displayed invocation of this definition
    #[arg(long, value_name = "DEFINITION")]
    invocations: Option<String>,

    /// Write the exploded graph to this file (bincode)
    #[arg(long, requires = "explode")]
    save: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Loading and Resolution ---
    let response = fs::read_to_string(&cli.snapshot_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read snapshot file '{}': {}",
            &cli.snapshot_path, e
        ))
    });

    let snapshot = match resolve_snapshot(&response)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to decode snapshot: {}", e)))
    {
        SnapshotOutcome::Snapshot(snapshot) => snapshot,
        SnapshotOutcome::NonIdeal(state) => exit_with_error(&state.to_string()),
    };
    log::info!(
        "Loaded pipeline '{}' with {} handle(s)",
        snapshot.name,
        snapshot.handles.len()
    );

    let path = match &cli.path {
        Some(raw) => raw
            .parse::<ExplorerPath>()
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid explorer path: {}", e))),
        None => ExplorerPath {
            pipeline_name: snapshot.name.clone(),
            ..ExplorerPath::default()
        },
    };
    let options = ExplorerOptions {
        explode_composites: cli.explode,
    };
    log::debug!(
        "Query variables: {:?}",
        ExplorerQueryVariables::new(&path, &options)
    );

    // --- 2. Explosion ---
    let explode_start = Instant::now();
    let exploder = Exploder::builder().strict(cli.strict).build();
    // `--save` requires `--explode`; the artifact and the view share one run.
    let exploded = cli.explode.then(|| {
        exploder
            .explode(&snapshot.handles)
            .unwrap_or_else(|e| exit_with_error(&format!("Explosion failed: {}", e)))
    });
    let explode_duration = explode_start.elapsed();

    if let (Some(save_path), Some(graph)) = (&cli.save, &exploded) {
        graph
            .save(save_path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save: {}", e)));
        log::info!("Wrote exploded graph to '{}'", save_path);
    }

    let view = match exploded {
        Some(graph) => HandleView::for_exploded_snapshot(&snapshot, &path, graph),
        None => HandleView::for_snapshot(&snapshot, &path, &options)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to build view: {}", e))),
    };

    // --- 3. Output ---
    if view.is_historical() {
        println!("You are viewing a historical pipeline snapshot.");
    }

    if let Some(definition) = &cli.invocations {
        let invocations = view.invocations(definition);
        println!("{} invocation(s) of '{}':", invocations.len(), definition);
        for handle_id in invocations {
            println!("  {}", handle_id);
        }
    } else {
        match cli.format {
            OutputFormat::Text => print_text(&view, &path),
            OutputFormat::Json => {
                let json = to_json(view.handles())
                    .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode: {}", e)));
                println!("{}", json);
            }
        }
    }

    log::info!(
        "Explosion: {:?}, total: {:?}",
        explode_duration,
        total_start.elapsed()
    );
}

fn print_text(view: &HandleView, path: &ExplorerPath) {
    if let Some(parent) = view.parent_handle() {
        println!("Inside: {}", parent.handle_id);
    }
    let selected = path.selected_name().and_then(|name| view.selected(name));

    for handle in view.handles() {
        let marker = if selected.is_some_and(|s| s.handle_id == handle.handle_id) {
            '*'
        } else {
            ' '
        };
        let kind = if handle.is_composite() {
            "composite"
        } else {
            "solid"
        };
        println!(
            "{} {} [{} {}]",
            marker,
            handle.node.name,
            kind,
            handle.node.definition.name()
        );
        for input in &handle.node.inputs {
            for dep in &input.depends_on {
                println!(
                    "    {} <- {}.{}",
                    input.definition_name, dep.solid_name, dep.definition_name
                );
            }
        }
        for output in &handle.node.outputs {
            for dep in &output.depended_by {
                println!(
                    "    {} -> {}.{}",
                    output.definition_name, dep.solid_name, dep.definition_name
                );
            }
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
