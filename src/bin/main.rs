//! schemagraph CLI - Draw schema relationship graphs
//!
//! Usage:
//!   schemagraph sqlite <file.db> [--show-columns] [--format <format>]
//!   schemagraph snapshot <snapshot.json> [--schema <name>] [--database <name>]
//!   schemagraph infer <snapshot.json> [--output json]
//!
//! Examples:
//!   schemagraph sqlite chinook.db --show-columns
//!   schemagraph snapshot warehouse.json --database ANALYTICS --format svg
//!   schemagraph infer warehouse.json --output json

use clap::{Parser, ValueEnum};
use schemagraph::config::Settings;
use schemagraph::inference::InferenceEngine;
use schemagraph::logging::init_tracing;
use schemagraph::metadata::{
    is_sqlite_path, MetadataProvider, SqliteMetadataProvider, StaticMetadataProvider,
    SQLITE_EXTENSIONS,
};
use schemagraph::render::GraphvizRenderer;
use schemagraph::{artifact_name, Visualizer};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "schemagraph")]
#[command(about = "schemagraph - Draw table relationship graphs from database catalogs")]
#[command(version)]
struct Cli {
    /// Path to a schemagraph.toml (defaults to the standard search path)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Graph a SQLite database using its declared foreign keys
    Sqlite {
        /// Path to the .db / .sqlite / .sqlite3 file
        file: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Graph a JSON schema snapshot (declared or inferred relationships)
    Snapshot {
        /// Path to the snapshot JSON file
        file: PathBuf,

        /// Schema to graph (defaults to the snapshot's own schema)
        #[arg(short, long)]
        schema: Option<String>,

        /// Database name used in the artifact name
        #[arg(short, long)]
        database: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the relationships inferred for a JSON schema snapshot
    Infer {
        /// Path to the snapshot JSON file
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: InferOutput,
    },
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Include column summaries in table nodes
    #[arg(long)]
    show_columns: bool,

    /// Artifact format (png, svg, pdf, dot)
    #[arg(short, long)]
    format: Option<String>,

    /// Directory the artifact is written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum InferOutput {
    /// One edge per line
    Text,
    /// JSON array of edges
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = cli.log_level.as_deref().unwrap_or(&settings.logging.level);
    init_tracing(level);

    match cli.command {
        Commands::Sqlite { file, render } => cmd_sqlite(settings, file, render).await,
        Commands::Snapshot {
            file,
            schema,
            database,
            render,
        } => cmd_snapshot(settings, file, schema, database, render).await,
        Commands::Infer { file, output } => cmd_infer(settings, file, output),
    }
}

async fn cmd_sqlite(settings: Settings, file: PathBuf, render: RenderArgs) -> ExitCode {
    if !is_sqlite_path(&file) {
        eprintln!(
            "Error: '{}' is not a SQLite file (expected one of: {})",
            file.display(),
            SQLITE_EXTENSIONS.join(", ")
        );
        return ExitCode::FAILURE;
    }

    let provider = match SqliteMetadataProvider::open(&file) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error opening database '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let database = file.file_stem().and_then(|s| s.to_str());
    let name = artifact_name(database, "main");
    run_visualizer(settings, render, &provider, "main", &name).await
}

async fn cmd_snapshot(
    settings: Settings,
    file: PathBuf,
    schema: Option<String>,
    database: Option<String>,
    render: RenderArgs,
) -> ExitCode {
    let provider = match StaticMetadataProvider::from_json_file(&file) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error reading snapshot '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let schema = schema.unwrap_or_else(|| provider.as_snapshot().schema.clone());
    let database = database.or_else(|| settings.catalog.database.clone());
    let name = artifact_name(database.as_deref(), &schema);
    run_visualizer(settings, render, &provider, &schema, &name).await
}

fn cmd_infer(settings: Settings, file: PathBuf, output: InferOutput) -> ExitCode {
    let provider = match StaticMetadataProvider::from_json_file(&file) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error reading snapshot '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let config = match settings.inference.to_inference_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let engine = InferenceEngine::with_config(config);

    let snapshot = provider.as_snapshot();
    let edges = engine.infer_relationships(&snapshot.table_names(), &snapshot.columns_by_table());

    match output {
        InferOutput::Text => {
            if edges.is_empty() {
                println!("No relationships inferred.");
            }
            for edge in &edges {
                println!(
                    "{} -> {} ({}) [{}]",
                    edge.source_table, edge.target_table, edge.column, edge.rule
                );
            }
        }
        InferOutput::Json => match serde_json::to_string_pretty(&edges) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing edges: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

async fn run_visualizer(
    mut settings: Settings,
    render: RenderArgs,
    provider: &dyn MetadataProvider,
    schema: &str,
    name: &str,
) -> ExitCode {
    apply_render_args(&mut settings, render);

    let visualizer: Visualizer<GraphvizRenderer> = match Visualizer::from_settings(&settings) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match visualizer.visualize(provider, schema, name).await {
        Ok(artifact) => {
            println!("{}", artifact.path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn apply_render_args(settings: &mut Settings, render: RenderArgs) {
    if render.show_columns {
        settings.render.show_columns = true;
    }
    if let Some(format) = render.format {
        settings.render.format = format;
    }
    if let Some(dir) = render.output_dir {
        settings.render.output_dir = dir;
    }
}
