//! # dialex
//!
//! A library for extracting dialogue-bearing fields from large,
//! arbitrarily nested level-editor JSON exports, with CSV export for
//! review in spreadsheet tools.
//!
//! ## Pipeline
//!
//! - **Loader** — validates input size (100 MiB ceiling, checked before
//!   parsing), reads bytes, parses JSON.
//! - **Extractor** — walks the value tree depth-first and emits one
//!   [`extract::DialogueRecord`] per matched dialogue field, under both the
//!   `fieldInstances` descriptor shape and the flat property shape.
//! - **Scheduler** — drives extraction over fixed-size batches of top-level
//!   keys so a host can report progress between batches.
//! - **Export** — renders records as RFC 4180 CSV.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dialex::loader::load_file;
//! use dialex::schedule::ExtractionRun;
//! use dialex::export::export_csv;
//!
//! let document = load_file("world.ldtk.json")?;
//! let mut run = ExtractionRun::with_default_batch(document);
//! while run.step() {
//!     println!("{}%", run.progress());
//! }
//! let records = run.finish();
//! export_csv(&records, "dialogue_export.csv")?;
//! # Ok::<(), dialex::Error>(())
//! ```
//!
//! One-shot extraction without progress reporting:
//!
//! ```
//! use dialex::schedule::extract_document;
//!
//! let doc = serde_json::json!({"npc": {"Dialogue": "Hi!", "Name": "Guard"}});
//! let records = extract_document(&doc);
//! assert_eq!(records[0].character.as_deref(), Some("Guard"));
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `dialex` command-line binary

pub mod error;
pub mod export;
pub mod extract;
pub mod loader;
pub mod schedule;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::export::{csv_string, export_csv, write_csv};
    pub use crate::extract::{DialogueRecord, FieldKind, extract};
    pub use crate::loader::{MAX_FILE_SIZE, load_bytes, load_file};
    pub use crate::schedule::{DEFAULT_BATCH_SIZE, ExtractionRun, extract_document};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
