//! jsongraph CLI - Command-line interface for jsongraph
//!
//! Turns JSON files into force-graph node/link JSON and manages a local
//! store of named JSON documents.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "jsongraph")]
#[command(author = "jsongraph Contributors")]
#[command(version)]
#[command(about = "Explore JSON documents as force-directed graphs", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that builds a graph.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Start from a preset: flat, deep or api
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Deepest level to include (the root is level 0)
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Do not link parents to their children
    #[arg(long)]
    pub no_hierarchical: bool,

    /// Link consecutive array elements
    #[arg(short, long)]
    pub array_links: bool,

    /// JSON settings file (preset, maxDepth, createHierarchicalLinks, createArrayLinks)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Where and how to write a built graph.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Add each node's neighbour ids to the output
    #[arg(long)]
    pub neighbors: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph of a JSON file ("-" reads stdin)
    Graph {
        file: PathBuf,

        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Show node, link and component counts for a JSON file
    Stats {
        file: PathBuf,

        #[command(flatten)]
        graph: GraphArgs,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Check that a file parses as JSON
    Validate { file: PathBuf },

    /// Count top-level key changes between two JSON files
    Changes { original: PathBuf, modified: PathBuf },

    /// Manage stored documents
    Doc {
        /// Store directory (defaults to the user data directory)
        #[arg(long, global = true)]
        store: Option<PathBuf>,

        #[command(subcommand)]
        command: DocCommand,
    },
}

#[derive(Subcommand)]
enum DocCommand {
    /// Create a document
    New {
        /// Name (defaults to the current date and time)
        name: Option<String>,
    },

    /// List documents, most recent first
    List,

    /// Print a document's content
    Show { id: String },

    /// Store a JSON file as a new document
    Import {
        file: PathBuf,

        /// Name (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Replace a document's content with a file's
    Save { id: String, file: PathBuf },

    /// Rename a document
    Rename { id: String, name: String },

    /// Delete one or more documents
    Rm {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Find documents by name or content
    Search { query: String },

    /// Build the graph of a stored document
    Graph {
        id: String,

        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Show document count and total size
    Totals,

    /// Delete documents larger than a size limit
    Cleanup {
        /// Size limit in bytes
        #[arg(long, default_value_t = commands::DEFAULT_CLEANUP_SIZE)]
        max_size: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Graph { file, graph, out } => commands::graph(&file, &graph, &out),
        Commands::Stats { file, graph, json } => commands::stats(&file, &graph, json),
        Commands::Validate { file } => commands::validate(&file),
        Commands::Changes { original, modified } => commands::changes(&original, &modified),
        Commands::Doc { store, command } => run_doc(store, command),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_doc(store: Option<PathBuf>, command: DocCommand) -> commands::Result<()> {
    let store = commands::open_store(store.as_deref())?;

    match command {
        DocCommand::New { name } => commands::doc_new(&store, name),
        DocCommand::List => commands::doc_list(&store),
        DocCommand::Show { id } => commands::doc_show(&store, &id),
        DocCommand::Import { file, name } => commands::doc_import(&store, &file, name),
        DocCommand::Save { id, file } => commands::doc_save(&store, &id, &file),
        DocCommand::Rename { id, name } => commands::doc_rename(&store, &id, &name),
        DocCommand::Rm { ids } => commands::doc_rm(&store, &ids),
        DocCommand::Search { query } => commands::doc_search(&store, &query),
        DocCommand::Graph { id, graph, out } => commands::doc_graph(&store, &id, &graph, &out),
        DocCommand::Totals => commands::doc_totals(&store),
        DocCommand::Cleanup { max_size } => commands::doc_cleanup(&store, max_size),
    }
}
