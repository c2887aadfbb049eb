//! Storygraph CLI
//!
//! Command-line interface for:
//! - Projecting a snapshot into a node/edge graph and rendering it
//!   (DOT / HTML explorer / JSON)
//! - Fuzzy person-name search, for picking an ego seed
//! - Snapshot integrity reports (row counts, dangling references)

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use storygraph_model::{Dataset, EntityKind, RawId, RelationKind};
use storygraph_projection::{project, Projection};

mod render;
mod search;

#[derive(Parser)]
#[command(name = "storygraph")]
#[command(
    author,
    version,
    about = "Storygraph: browse a historical-entity database as an interactive graph"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a snapshot into a node/edge graph and render it.
    Project {
        /// Input snapshot JSON
        input: PathBuf,
        /// Ego seed person id; omit for the full graph
        #[arg(long)]
        seed: Option<RawId>,
        /// Output format: dot|html|json
        #[arg(long, default_value = "html")]
        format: String,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Keep only these entity kinds, comma separated (e.g. person,event)
        #[arg(long)]
        kinds: Option<String>,
    },

    /// Fuzzy-search person names.
    Search {
        /// Input snapshot JSON
        input: PathBuf,
        /// Name fragment to look for
        query: String,
        /// Maximum matches printed
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Report row counts and dangling relation references.
    Check {
        /// Input snapshot JSON
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Project {
            input,
            seed,
            format,
            out,
            kinds,
        } => cmd_project(input, seed, &format, out, kinds.as_deref()),
        Commands::Search {
            input,
            query,
            limit,
        } => cmd_search(input, &query, limit),
        Commands::Check { input } => cmd_check(input),
    }
}

fn load_dataset(input: &PathBuf) -> Result<Dataset> {
    let data = Dataset::from_path(input)
        .with_context(|| format!("loading snapshot {}", input.display()))?;
    tracing::debug!(path = %input.display(), persons = data.persons().len(), "snapshot loaded");
    Ok(data)
}

// ============================================================================
// project
// ============================================================================

fn cmd_project(
    input: PathBuf,
    seed: Option<RawId>,
    format: &str,
    out: Option<PathBuf>,
    kinds: Option<&str>,
) -> Result<()> {
    let format = render::RenderFormat::parse(format)?;
    let data = load_dataset(&input)?;

    let mode = match seed {
        Some(id) => Projection::Ego(id),
        None => Projection::Full,
    };
    let mut graph = project(&data, mode)?;

    if let Some(kinds) = kinds {
        let keep = parse_kinds(kinds)?;
        graph = render::retain_kinds(graph, &keep);
    }

    let rendered = match format {
        render::RenderFormat::Dot => render::render_dot(&graph),
        render::RenderFormat::Json => render::render_json(&graph)?,
        render::RenderFormat::Html => render::render_html(&graph)?,
    };

    match out {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "{} {} ({} nodes, {} edges)",
                "wrote".green().bold(),
                path.display(),
                graph.nodes.len(),
                graph.edges.len()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn parse_kinds(s: &str) -> Result<HashSet<EntityKind>> {
    let mut keep = HashSet::new();
    for part in s.split(',') {
        let kind = EntityKind::from_tag(part)
            .ok_or_else(|| anyhow!("unknown entity kind `{}`", part.trim()))?;
        keep.insert(kind);
    }
    Ok(keep)
}

// ============================================================================
// search
// ============================================================================

fn cmd_search(input: PathBuf, query: &str, limit: usize) -> Result<()> {
    let data = load_dataset(&input)?;
    let matches = search::search_persons(&data, query);

    if matches.is_empty() {
        println!("{}", "no matching persons".yellow());
        return Ok(());
    }
    for (_, person) in matches.iter().take(limit) {
        let detail = person
            .occupation
            .as_deref()
            .or(person.contribution.as_deref())
            .unwrap_or("");
        println!(
            "{:>6}  {}  {}",
            person.person_id,
            person.name.bold(),
            detail.dimmed()
        );
    }
    Ok(())
}

// ============================================================================
// check
// ============================================================================

fn cmd_check(input: PathBuf) -> Result<()> {
    let data = load_dataset(&input)?;

    println!("{}", "entities".bold());
    for kind in EntityKind::ALL {
        println!("  {:<12} {:>6}", kind.tag(), data.entity_count(kind));
    }

    println!("{}", "relations".bold());
    let mut dangling_total = 0usize;
    for kind in RelationKind::ALL {
        let rows = data.relations(kind);
        let dangling = rows
            .iter()
            .filter(|r| {
                !data.contains(EntityKind::Person, r.person_id)
                    || !data.contains(kind.target_kind(), r.target_id)
            })
            .count();
        dangling_total += dangling;
        if dangling > 0 {
            println!(
                "  {:<16} {:>6}  {}",
                kind.table(),
                rows.len(),
                format!("{dangling} dangling").yellow()
            );
        } else {
            println!("  {:<16} {:>6}", kind.table(), rows.len());
        }
    }

    if dangling_total == 0 {
        println!("{}", "ok: no dangling references".green());
    } else {
        println!(
            "{}",
            format!("{dangling_total} dangling relation rows (skipped at projection time)")
                .yellow()
        );
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
