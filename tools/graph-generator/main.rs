use clap::Parser;
use handle_graph::graphql::{
    NameRef, RawDefinition, RawInput, RawInputMapping, RawMappedPort, RawOutput, RawOutputMapping,
    RawPortRef, RawSolid, RawSolidHandle,
};
use handle_graph::model::child_handle_id;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate nested composite pipelines for the explorer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated snapshot JSON to
    #[arg(short, long, default_value = "generated_snapshot.json")]
    output: String,

    /// Name of the generated pipeline
    #[arg(long, default_value = "generated_pipeline")]
    pipeline: String,

    /// Maximum composite nesting depth
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// The minimum number of solids in each scope
    #[arg(long, default_value_t = 1)]
    min: usize,

    /// The maximum number of solids in each scope
    #[arg(long, default_value_t = 5)]
    max: usize,

    /// Probability that a solid is a composite (when depth allows)
    #[arg(long, default_value_t = 0.4)]
    composite_ratio: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

const INPUT: &str = "in";
const OUTPUT: &str = "out";

struct Generator {
    rng: StdRng,
    max_depth: usize,
    min: usize,
    max: usize,
    composite_ratio: f64,
    handles: Vec<RawSolidHandle>,
    composites: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if cli.min == 0 || cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) must be at least 1 and not greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut generator = Generator {
        rng,
        max_depth: cli.depth,
        min: cli.min,
        max: cli.max,
        composite_ratio: cli.composite_ratio.clamp(0.0, 1.0),
        handles: Vec::new(),
        composites: 0,
    };
    generator.generate_scope(None, 0);

    log::info!(
        "Generated {} handle(s), {} of them composite",
        generator.handles.len(),
        generator.composites
    );

    let response = serde_json::json!({
        "data": {
            "pipelineSnapshotOrError": {
                "__typename": "PipelineSnapshot",
                "name": cli.pipeline,
                "solidHandle": null,
                "solidHandles": generator.handles,
            }
        }
    });
    fs::write(&cli.output, serde_json::to_string_pretty(&response)?)?;

    log::info!("Saved generated snapshot to '{}'", cli.output);
    Ok(())
}

impl Generator {
    /// Generates a chain of solids inside `parent` and returns the names of its
    /// first and last solid.
    fn generate_scope(&mut self, parent: Option<&str>, depth: usize) -> (String, String) {
        let count = self.rng.random_range(self.min..=self.max);
        let names: Vec<String> = (0..count).map(|i| format!("s{}_{}", depth, i)).collect();

        for (i, name) in names.iter().enumerate() {
            let handle_id = match parent {
                Some(parent) => child_handle_id(parent, name),
                None => name.clone(),
            };

            let make_composite =
                depth < self.max_depth && self.rng.random_bool(self.composite_ratio);
            let definition = if make_composite {
                self.composites += 1;
                let (first, last) = self.generate_scope(Some(&handle_id), depth + 1);
                RawDefinition::CompositeSolidDefinition {
                    name: format!("composite_{}", depth),
                    input_mappings: vec![RawInputMapping {
                        definition: NameRef::new(INPUT),
                        mapped_input: RawMappedPort {
                            definition: NameRef::new(INPUT),
                            solid: NameRef::new(first),
                        },
                    }],
                    output_mappings: vec![RawOutputMapping {
                        definition: NameRef::new(OUTPUT),
                        mapped_output: RawMappedPort {
                            definition: NameRef::new(OUTPUT),
                            solid: NameRef::new(last),
                        },
                    }],
                }
            } else {
                RawDefinition::SolidDefinition {
                    name: format!("op_{}", self.rng.random_range(0..4)),
                }
            };

            let depends_on = match i.checked_sub(1) {
                Some(prev) => vec![port_ref(&names[prev], OUTPUT)],
                None => vec![],
            };
            let depended_by = match names.get(i + 1) {
                Some(next) => vec![port_ref(next, INPUT)],
                None => vec![],
            };

            self.handles.push(RawSolidHandle {
                handle_id,
                solid: RawSolid {
                    name: name.clone(),
                    definition,
                    inputs: vec![RawInput {
                        definition: NameRef::new(INPUT),
                        depends_on,
                    }],
                    outputs: vec![RawOutput {
                        definition: NameRef::new(OUTPUT),
                        depended_by,
                    }],
                },
            });
        }

        // `count` is at least 1, enforced in `main`.
        let first = names.first().cloned().unwrap_or_default();
        let last = names.last().cloned().unwrap_or_default();
        (first, last)
    }
}

fn port_ref(solid: &str, port: &str) -> RawPortRef {
    RawPortRef {
        solid: NameRef::new(solid),
        definition: NameRef::new(port),
    }
}
