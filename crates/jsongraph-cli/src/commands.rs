//! CLI command implementations.

use crate::{GraphArgs, OutputArgs};
use colored::Colorize;
use jsongraph_graph::{GraphBuilder, GraphSettings, JsonGraph, Preset};
use jsongraph_store::{ContentStats, DocumentStore, KeyChanges, Validation};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Reads a file, or stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Settings from the config file (if any) with command-line flags on top.
pub fn resolve_settings(args: &GraphArgs) -> Result<GraphSettings> {
    let from_file = match &args.config {
        Some(path) => GraphSettings::load(path)?,
        None => GraphSettings::default(),
    };

    let from_flags = GraphSettings {
        preset: args.preset.as_deref().map(str::parse::<Preset>).transpose()?,
        max_depth: args.max_depth,
        create_hierarchical_links: args.no_hierarchical.then_some(false),
        create_array_links: args.array_links.then_some(true),
    };

    let settings = from_file.merge(from_flags);
    debug!("Graph settings: {:?}", settings);
    Ok(settings)
}

fn build_graph(text: &str, args: &GraphArgs) -> Result<JsonGraph> {
    let options = resolve_settings(args)?.into_options();
    Ok(GraphBuilder::new(options).build_str(text)?)
}

/// The graph as output JSON, optionally with neighbour ids on each node.
pub fn graph_json(graph: &JsonGraph, with_neighbors: bool) -> Result<serde_json::Value> {
    let value = if with_neighbors {
        serde_json::json!({
            "nodes": graph.nodes_with_neighbors(),
            "links": graph.links(),
        })
    } else {
        serde_json::to_value(graph)?
    };
    Ok(value)
}

fn write_graph(graph: &JsonGraph, out: &OutputArgs) -> Result<()> {
    let text = serde_json::to_string_pretty(&graph_json(graph, out.neighbors)?)?;

    match &out.output {
        Some(path) => {
            fs::write(path, text)?;
            println!(
                "{} Wrote {} nodes, {} links to {}",
                "✓".green(),
                graph.node_count().to_string().cyan(),
                graph.link_count().to_string().cyan(),
                path.display()
            );
        }
        None => {
            info!(
                "Nodes: {} • Links: {}",
                graph.node_count(),
                graph.link_count()
            );
            println!("{}", text);
        }
    }
    Ok(())
}

/// Build and print the graph of a JSON file.
pub fn graph(file: &Path, args: &GraphArgs, out: &OutputArgs) -> Result<()> {
    let text = read_input(file)?;
    let graph = build_graph(&text, args)?;
    write_graph(&graph, out)
}

/// Print statistics for the graph of a JSON file.
pub fn stats(file: &Path, args: &GraphArgs, json: bool) -> Result<()> {
    let text = read_input(file)?;
    let graph = build_graph(&text, args)?;
    let stats = graph.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Graph Statistics".cyan().bold());
    println!();
    println!("  {} {}", "Nodes:".dimmed(), stats.node_count);
    println!(
        "  {} {} ({} hierarchical, {} sibling, {} custom)",
        "Links:".dimmed(),
        stats.link_count,
        stats.hierarchical_links,
        stats.sibling_links,
        stats.custom_links
    );
    println!("  {} {}", "Components:".dimmed(), stats.component_count);
    println!("  {} {}", "Orphans:".dimmed(), stats.orphan_count);
    println!("  {} {}", "Max depth:".dimmed(), stats.max_depth);
    if stats.dangling_link_count > 0 {
        println!(
            "  {} {} links point outside the graph",
            "⚠".yellow(),
            stats.dangling_link_count
        );
    }
    Ok(())
}

fn print_content_stats(label: &str, stats: &ContentStats) {
    println!(
        "  {} {} lines, {} characters, {}",
        format!("{}:", label).dimmed(),
        stats.lines,
        stats.characters,
        format_size(stats.size as u64)
    );
}

/// Check that a file parses as JSON.
pub fn validate(file: &Path) -> Result<()> {
    let text = read_input(file)?;
    let validation = Validation::of(&text);

    if validation.is_valid {
        println!("{} Valid JSON", "✓".green());
    } else {
        println!("{} Invalid JSON: {}", "✗".red(), validation.error);
    }
    print_content_stats("Content", &ContentStats::of(&text));

    if !validation.is_valid {
        return Err("validation failed".into());
    }
    Ok(())
}

/// Count top-level key changes between two JSON files.
pub fn changes(original: &Path, modified: &Path) -> Result<()> {
    let before = read_input(original)?;
    let after = read_input(modified)?;

    for (label, text) in [("Original", &before), ("Modified", &after)] {
        let validation = Validation::of(text);
        if validation.is_valid {
            println!("{} {}: Valid", "✓".green(), label);
        } else {
            println!("{} {}: {}", "✗".red(), label, validation.error);
        }
    }

    let changes = KeyChanges::between(&before, &after);
    println!();
    println!(
        "  {} {}  {} {}  {} {}",
        "+".green(),
        changes.additions,
        "-".red(),
        changes.deletions,
        "~".yellow(),
        changes.modifications
    );
    print_content_stats("Original", &ContentStats::of(&before));
    print_content_stats("Modified", &ContentStats::of(&after));
    Ok(())
}

/// Human-readable byte count (B, KB, MB, GB).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document store
// ─────────────────────────────────────────────────────────────────────────────

/// Default store location under the user data directory.
pub fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jsongraph")
        .join("documents")
}

pub fn open_store(dir: Option<&Path>) -> Result<DocumentStore> {
    let dir = dir.map(Path::to_path_buf).unwrap_or_else(default_store_dir);
    debug!("Opening document store at {}", dir.display());
    Ok(DocumentStore::open(&dir)?)
}

fn require(store: &DocumentStore, id: &str) -> Result<jsongraph_store::JsonDocument> {
    store
        .get(id)?
        .ok_or_else(|| format!("document not found: {}", id).into())
}

pub fn doc_new(store: &DocumentStore, name: Option<String>) -> Result<()> {
    let doc = match name {
        Some(name) => store.create_named(name, "")?,
        None => store.create()?,
    };
    println!("{} Created {} {}", "✓".green(), doc.name.cyan(), doc.id.dimmed());
    Ok(())
}

pub fn doc_list(store: &DocumentStore) -> Result<()> {
    let docs = store.list()?;
    if docs.is_empty() {
        println!("No documents yet. Run {} to create one", "jsongraph doc new".cyan());
        return Ok(());
    }

    for doc in docs {
        let marker = if doc.validate().is_valid {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "  {} {} {} {}",
            marker,
            doc.name.cyan(),
            format_size(doc.size).dimmed(),
            doc.id.dimmed()
        );
    }
    Ok(())
}

pub fn doc_show(store: &DocumentStore, id: &str) -> Result<()> {
    let doc = require(store, id)?;
    println!("{}", doc.content);
    Ok(())
}

pub fn doc_import(store: &DocumentStore, file: &Path, name: Option<String>) -> Result<()> {
    let content = read_input(file)?;
    let name = name.unwrap_or_else(|| {
        file.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(jsongraph_store::generate_name)
    });
    let doc = store.create_named(name, content)?;
    println!(
        "{} Imported {} ({}) {}",
        "✓".green(),
        doc.name.cyan(),
        format_size(doc.size),
        doc.id.dimmed()
    );
    Ok(())
}

pub fn doc_save(store: &DocumentStore, id: &str, file: &Path) -> Result<()> {
    let content = read_input(file)?;
    let doc = store.save_content(id, content)?;
    println!("{} Saved {} ({})", "✓".green(), doc.name.cyan(), format_size(doc.size));
    Ok(())
}

pub fn doc_rename(store: &DocumentStore, id: &str, name: &str) -> Result<()> {
    let doc = store.rename(id, name)?;
    println!("{} Renamed to {}", "✓".green(), doc.name.cyan());
    Ok(())
}

pub fn doc_rm(store: &DocumentStore, ids: &[String]) -> Result<()> {
    if let [id] = ids {
        if !store.delete(id)? {
            return Err(format!("document not found: {}", id).into());
        }
    } else {
        store.bulk_delete(ids)?;
    }
    println!("{} Deleted {} documents", "✓".green(), ids.len());
    Ok(())
}

pub fn doc_search(store: &DocumentStore, query: &str) -> Result<()> {
    let matches = store.search(query)?;
    if matches.is_empty() {
        println!("No matches found for \"{}\"", query);
        return Ok(());
    }

    println!("Found {} matches:\n", matches.len());
    for doc in matches {
        println!("  {} {}", doc.name.cyan(), doc.id.dimmed());
    }
    Ok(())
}

pub fn doc_graph(store: &DocumentStore, id: &str, args: &GraphArgs, out: &OutputArgs) -> Result<()> {
    let doc = require(store, id)?;
    if !doc.has_content() {
        return Err(format!("document {} is empty", doc.name).into());
    }
    let graph = build_graph(&doc.content, args)?;
    write_graph(&graph, out)
}

/// Default `doc cleanup` threshold: 10 MB.
pub const DEFAULT_CLEANUP_SIZE: u64 = 10 * 1024 * 1024;

pub fn doc_cleanup(store: &DocumentStore, max_size: u64) -> Result<()> {
    let removed = store.remove_large_documents(max_size)?;
    if removed.is_empty() {
        println!("No documents larger than {}", format_size(max_size));
        return Ok(());
    }

    println!(
        "{} Removed {} documents larger than {}",
        "✓".green(),
        removed.len(),
        format_size(max_size)
    );
    for id in removed {
        println!("  {}", id.dimmed());
    }
    Ok(())
}

pub fn doc_totals(store: &DocumentStore) -> Result<()> {
    let totals = store.totals()?;
    println!("{}", "Document Store".cyan().bold());
    println!();
    println!("  {} {}", "Documents:".dimmed(), totals.total_documents);
    println!("  {} {}", "Total size:".dimmed(), format_size(totals.total_size));
    Ok(())
}
