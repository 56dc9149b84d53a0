//! sceneforge CLI
//!
//! Command-line front end for the sceneforge export pipeline: reads a
//! scene-description JSON document and emits the `.scene`/`.node`/`.mat`/
//! `.mesh`/`.light` file set into an output directory.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sceneforge_core::Scene;
use sceneforge_export::{DuplicateNames, ExportOptions, SceneExporter};

/// sceneforge - scene-graph exporter for the sceneforge text asset formats
#[derive(Parser)]
#[command(name = "sceneforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a scene description into the text asset formats
    Export(ExportArgs),

    /// Show statistics about a scene description
    Info(InfoArgs),

    /// Validate a scene description without writing anything
    Validate(ValidateArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Path to the scene description JSON document
    input: PathBuf,

    /// Output directory for the emitted files
    #[arg(short, long)]
    output: PathBuf,

    /// Write compact JSON bodies instead of pretty-printed ones
    #[arg(long)]
    compact: bool,

    /// Policy for colliding sibling names (error, suffix)
    #[arg(long, default_value = "error")]
    on_duplicate: DuplicateNames,

    /// Do not derive tangents for UV-mapped meshes that lack them
    #[arg(long)]
    no_tangents: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Path to the scene description JSON document
    input: PathBuf,

    /// Output format for statistics (text, json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Args)]
struct ValidateArgs {
    /// Path to the scene description JSON document
    input: PathBuf,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Export(args) => cmd_export(args),
        Commands::Info(args) => cmd_info(args),
        Commands::Validate(args) => cmd_validate(args),
    }
}

fn init_tracing(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn,sceneforge=info",
        1 => "info,sceneforge=debug",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load a scene description document from disk
fn load_scene(path: &Path) -> Result<Scene> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open scene description {}", path.display()))?;
    let scene: Scene = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse scene description {}", path.display()))?;
    Ok(scene)
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let scene = load_scene(&args.input)?;
    info!(scene = %scene.name, input = %args.input.display(), "loaded scene description");

    let options = ExportOptions {
        pretty: !args.compact,
        duplicate_names: args.on_duplicate,
        generate_tangents: !args.no_tangents,
    };

    let summary = SceneExporter::with_options(options)
        .export(&scene, &args.output)
        .with_context(|| format!("Export of scene {:?} failed", scene.name))?;

    println!(
        "Exported {} nodes ({} files) to {}",
        summary.nodes_exported,
        summary.files_written,
        args.output.display()
    );
    Ok(())
}

fn cmd_info(args: InfoArgs) -> Result<()> {
    let scene = load_scene(&args.input)?;
    let stats = scene.statistics();

    match args.format {
        OutputFormat::Text => {
            println!("Scene: {}", scene.name);
            println!("  Root nodes: {}", scene.roots.len());
            println!("  Total nodes: {}", stats.nodes);
            println!("  Meshes: {}", stats.meshes);
            println!("  Materials: {}", stats.materials);
            println!("  Lights: {}", stats.lights);
            println!("  Max depth: {}", stats.max_depth);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let scene = load_scene(&args.input)?;
    scene
        .validate()
        .with_context(|| format!("Scene {:?} failed validation", scene.name))?;

    println!("Scene {:?} is valid ({} nodes)", scene.name, scene.node_count());
    Ok(())
}
