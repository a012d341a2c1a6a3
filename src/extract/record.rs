//! Extraction record types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which dialogue slot a record was matched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// The unnumbered `Dialogue` slot.
    Dialogue,
    /// The `Dialogue1` slot.
    Dialogue1,
    /// The `Dialogue2` slot.
    Dialogue2,
    /// The `Dialogue3` slot.
    Dialogue3,
}

impl FieldKind {
    /// All dialogue slots, in slot order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Dialogue,
        FieldKind::Dialogue1,
        FieldKind::Dialogue2,
        FieldKind::Dialogue3,
    ];

    /// Match a field key against the dialogue slots.
    ///
    /// Accepts exactly `Dialogue`, optionally followed by a single digit in
    /// 1..=3. Anything else (including `Dialogue0` or `Dialogue12`) is not
    /// a dialogue field.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Dialogue" => Some(FieldKind::Dialogue),
            "Dialogue1" => Some(FieldKind::Dialogue1),
            "Dialogue2" => Some(FieldKind::Dialogue2),
            "Dialogue3" => Some(FieldKind::Dialogue3),
            _ => None,
        }
    }

    /// The field key this slot is matched from.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Dialogue => "Dialogue",
            FieldKind::Dialogue1 => "Dialogue1",
            FieldKind::Dialogue2 => "Dialogue2",
            FieldKind::Dialogue3 => "Dialogue3",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted dialogue fragment with provenance and speaker metadata.
///
/// Records are immutable once produced and collected in depth-first
/// discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueRecord {
    /// Dot-joined key path from the document root to the matched field.
    ///
    /// Provenance only; not intended for re-parsing the document.
    pub path: String,
    /// Which dialogue slot matched.
    pub kind: FieldKind,
    /// The raw matched value, preserved exactly. Never null.
    pub content: Value,
    /// Value of a sibling `Name` field, if present.
    pub character: Option<String>,
    /// Value of a sibling `Type` field, if present.
    pub entity_type: Option<String>,
}

impl DialogueRecord {
    /// The content rendered as text: strings verbatim (embedded newlines
    /// preserved), other values as their compact JSON form.
    #[must_use]
    pub fn content_text(&self) -> String {
        value_text(&self.content)
    }
}

/// Render a JSON value as display text.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
