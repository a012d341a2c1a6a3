//! CLI commands for dialogue extraction

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Subcommand;
use serde_json::Value;
use tracing::error;

use crate::export::export_csv;
use crate::extract::{DialogueRecord, FieldKind};
use crate::loader::load_file;
use crate::schedule::{DEFAULT_BATCH_SIZE, ExtractionRun};

use super::progress::{self, DISK, GEAR, LOOKING_GLASS};

#[derive(Subcommand)]
pub enum Commands {
    /// Extract dialogue and write a CSV export
    Export {
        /// Source JSON export
        source: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Top-level keys per batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// List extracted dialogue records
    List {
        /// Source JSON export
        source: PathBuf,

        /// Maximum records to display
        #[arg(short, long)]
        limit: Option<usize>,

        /// Top-level keys per batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Only print record content
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show extraction statistics for a JSON export
    Stats {
        /// Source JSON export
        source: PathBuf,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Export {
                source,
                output,
                batch_size,
                quiet,
            } => export(source, output, *batch_size, *quiet),
            Commands::List {
                source,
                limit,
                batch_size,
                quiet,
            } => list(source, *limit, *batch_size, *quiet),
            Commands::Stats { source } => stats(source),
        }
    }
}

/// Load a document, mapping loader failures to their user-facing category
/// message. The full diagnostic goes to the log.
fn load_document(path: &Path) -> anyhow::Result<Value> {
    load_file(path).map_err(|e| {
        error!("failed to load {}: {e}", path.display());
        anyhow::anyhow!("{}", e.user_message())
    })
}

/// Run a full extraction, updating a progress bar between batches.
fn run_extraction(document: Value, batch_size: usize, quiet: bool) -> Vec<DialogueRecord> {
    let mut run = ExtractionRun::new(document, batch_size);
    let bar = if quiet {
        None
    } else {
        Some(progress::percent_bar("Scanning"))
    };

    while run.step() {
        if let Some(bar) = &bar {
            bar.set_position(u64::from(run.progress()));
        }
    }

    if let Some(bar) = &bar {
        bar.set_position(u64::from(run.progress()));
        bar.finish_and_clear();
    }

    run.finish()
}

fn export(source: &Path, output: &Path, batch_size: usize, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        progress::print_step(1, 3, LOOKING_GLASS, "Loading JSON export...");
    }
    let document = load_document(source)?;

    if !quiet {
        progress::print_step(2, 3, GEAR, "Scanning for dialogue fields...");
    }
    let records = run_extraction(document, batch_size, quiet);

    if !quiet {
        progress::print_step(3, 3, DISK, "Writing CSV...");
    }
    export_csv(&records, output)?;

    if !quiet {
        progress::print_done(started.elapsed());
    }
    println!(
        "Exported {} records to {}",
        records.len(),
        output.display()
    );

    Ok(())
}

fn list(
    source: &Path,
    limit: Option<usize>,
    batch_size: usize,
    quiet: bool,
) -> anyhow::Result<()> {
    let document = load_document(source)?;
    let records = run_extraction(document, batch_size, true);

    if records.is_empty() {
        if !quiet {
            println!("No dialogue fields found in {}", source.display());
        }
        return Ok(());
    }

    if !quiet {
        println!("Found {} dialogue records:", records.len());
        println!();
    }

    let shown = limit.unwrap_or(records.len());
    for record in records.iter().take(shown) {
        if quiet {
            println!("{}", record.content_text());
            continue;
        }

        if let Some(character) = &record.character {
            println!("Character: {character}");
        }
        println!("Type: {}", record.kind);
        println!("Path: {}", record.path);
        println!("  {}", truncate_text(&record.content_text(), 100));
        println!();
    }

    if !quiet && shown < records.len() {
        println!("({} more not shown)", records.len() - shown);
    }

    Ok(())
}

fn stats(source: &Path) -> anyhow::Result<()> {
    let document = load_document(source)?;
    let mut run = ExtractionRun::with_default_batch(document);
    let total_keys = run.total_entries();
    while run.step() {}
    let records = run.finish();

    let mut per_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for kind in FieldKind::ALL {
        per_kind.insert(kind.as_str(), 0);
    }
    let mut characters: BTreeSet<&str> = BTreeSet::new();
    for record in &records {
        *per_kind.entry(record.kind.as_str()).or_default() += 1;
        if let Some(character) = &record.character {
            characters.insert(character);
        }
    }

    println!("{}:", source.display());
    println!("  Top-level keys: {total_keys}");
    println!("  Dialogue records: {}", records.len());
    for (kind, count) in &per_kind {
        println!("    {kind}: {count}");
    }
    println!("  Distinct characters: {}", characters.len());

    Ok(())
}

/// Truncate text for display
fn truncate_text(text: &str, max_len: usize) -> String {
    let text = text.replace('\n', "\\n");
    if text.chars().count() > max_len {
        let cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text
    }
}
