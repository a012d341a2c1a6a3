//! Dialogue field extraction
//!
//! Walks a parsed JSON export depth-first and collects every
//! dialogue-bearing field as a [`DialogueRecord`] with provenance and
//! speaker metadata. Two encodings are recognized, and both are checked at
//! every object node:
//!
//! ```json
//! {
//!   "fieldInstances": [
//!     {"__identifier": "Dialogue", "__value": "Hello there."},
//!     {"__identifier": "Name", "__value": "Guard"}
//!   ]
//! }
//! ```
//!
//! and the flat form:
//!
//! ```json
//! {"Dialogue2": "Hello again.", "Name": "Guard", "Type": "NPC"}
//! ```
//!
//! Extraction never fails on a parsed document; shapes that match neither
//! rule just stop the recursion.

mod record;
mod walker;

pub use record::{DialogueRecord, FieldKind};
pub use walker::extract;

pub(crate) use walker::extract_entry;
