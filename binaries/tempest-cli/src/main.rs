//! Tempest CLI
//!
//! Headless host for the token-field engine: seed a field, play scripted
//! rounds, hit-test clicks and write SVG previews.
//!
//! ## Usage
//!
//! ```bash
//! tempest seed                           # seeded field + metrics as JSON
//! tempest play moves.yaml                # run a scripted game
//! tempest hit 200 40 --width 400         # which sector is under (200, 40)?
//! tempest render -o field.svg --select 3 --select 11
//! tempest --config tempest.yaml --pack pack.json seed
//! ```
//!
//! Logs go to stderr (`RUST_LOG=tempest=debug` for more), results to stdout.

mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::DVec2;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tempest_config::EngineConfig;
use tempest_core::{Field, Selection};
use tempest_metrics::{Gate, GateReport};
use tempest_pack::{dev_pack, ContentPack};
use tempest_render::{hit_test, render_svg, Surface};
use tempest_session::{seed_field, Score, Session};

use script::{run_step, Outcome, Script, Step};

#[derive(Parser)]
#[command(name = "tempest")]
#[command(about = "Tempest - angular token-field engine")]
#[command(version)]
struct Cli {
    /// Engine config (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content pack (JSON); the built-in dev pack is used otherwise
    #[arg(long, global = true)]
    pack: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the seeded field and its metrics as JSON
    Seed,

    /// Run an action script through a fresh session
    Play {
        /// Script file (.json, otherwise YAML)
        script: PathBuf,
    },

    /// Hit-test a point against the seeded field
    Hit {
        x: f64,
        y: f64,

        #[arg(long, default_value_t = 400.0)]
        width: f64,

        #[arg(long, default_value_t = 400.0)]
        height: f64,
    },

    /// Write an SVG preview of the seeded field
    Render {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = 400.0)]
        width: f64,

        #[arg(long, default_value_t = 400.0)]
        height: f64,

        /// Sector to select (repeatable, at most two are kept)
        #[arg(long)]
        select: Vec<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::load(cli.config.as_deref())?;
    let pack = load_pack(cli.pack.as_ref())?;

    match cli.command {
        Commands::Seed => cmd_seed(&pack, &config),
        Commands::Play { script } => cmd_play(&pack, config, script),
        Commands::Hit {
            x,
            y,
            width,
            height,
        } => cmd_hit(&pack, &config, DVec2::new(x, y), Surface::new(width, height)),
        Commands::Render {
            output,
            width,
            height,
            select,
        } => cmd_render(&pack, &config, Surface::new(width, height), &select, output),
    }
}

fn load_pack(path: Option<&PathBuf>) -> Result<ContentPack> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read pack {}", path.display()))?;
            let pack = ContentPack::from_json(&text)?;
            tracing::info!(theme = %pack.theme, tokens = pack.tokens.len(), "Loaded content pack");
            Ok(pack)
        }
        None => Ok(dev_pack()),
    }
}

#[derive(Serialize)]
struct SeedReport<'a> {
    theme: &'a str,
    prompt: Option<&'a str>,
    field: &'a Field,
    gate: GateReport,
}

fn cmd_seed(pack: &ContentPack, config: &EngineConfig) -> Result<()> {
    let field = seed_field(pack, &config.seed);
    let report = SeedReport {
        theme: &pack.theme,
        prompt: pack.prompt_for_layer(1),
        field: &field,
        gate: Gate::from(&config.gate).evaluate(&field),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[derive(Serialize)]
struct StepReport<'a> {
    step: usize,
    #[serde(flatten)]
    outcome: &'a Outcome,
    score: Score,
}

fn cmd_play(pack: &ContentPack, config: EngineConfig, path: PathBuf) -> Result<()> {
    let script = Script::load(&path)?;
    let mut session = Session::from_pack(pack, config);
    tracing::info!(steps = script.steps.len(), "Playing script");

    for (i, step) in script.steps.iter().enumerate() {
        let outcome = run_step(&mut session, step);
        if let Outcome::Refused { reason } = &outcome {
            tracing::warn!(step = i, "Step refused: {}", reason);
        }
        let report = StepReport {
            step: i,
            outcome: &outcome,
            score: session.score(),
        };
        println!("{}", serde_json::to_string(&report)?);
        if matches!(step, Step::CashOut) {
            break;
        }
    }
    Ok(())
}

fn cmd_hit(pack: &ContentPack, config: &EngineConfig, point: DVec2, surface: Surface) -> Result<()> {
    let field = seed_field(pack, &config.seed);
    match hit_test(&field, point, surface, &config.projection) {
        Some(index) => {
            let label = field.get(index).and_then(|s| s.label()).unwrap_or("");
            println!("{}\t{}", index, label);
        }
        None => println!("none"),
    }
    Ok(())
}

fn cmd_render(
    pack: &ContentPack,
    config: &EngineConfig,
    surface: Surface,
    select: &[usize],
    output: Option<PathBuf>,
) -> Result<()> {
    let field = seed_field(pack, &config.seed);
    let selection = Selection::from_indices(select);
    let svg = render_svg(&field, &selection, surface, &config.projection)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &svg)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "SVG written");
        }
        None => print!("{}", svg),
    }
    Ok(())
}
