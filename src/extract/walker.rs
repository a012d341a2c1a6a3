//! Recursive dialogue field discovery
//!
//! Two independent matching rules are applied at every object node:
//!
//! 1. the `fieldInstances` shape, where named fields arrive as an array of
//!    `{__identifier, __value}` descriptor objects, and
//! 2. the flat shape, where `Dialogue`/`Dialogue1`/`Dialogue2`/`Dialogue3`
//!    are direct properties.
//!
//! Both rules are checked at every node; a node matching both emits
//! independent records. Traversal is depth-first over objects and arrays
//! and terminates at scalars and null.

use serde_json::{Map, Value};

use super::record::{DialogueRecord, FieldKind, value_text};

/// Key of the descriptor array in the `fieldInstances` shape.
const FIELD_INSTANCES: &str = "fieldInstances";
/// Identifier key inside a field descriptor.
const IDENTIFIER: &str = "__identifier";
/// Value key inside a field descriptor.
const VALUE: &str = "__value";
/// Sibling key carrying the speaking character's name.
const NAME: &str = "Name";
/// Sibling key carrying the entity type.
const TYPE: &str = "Type";

/// Extract all dialogue records reachable from `node`.
///
/// Pure and infallible: unexpected shapes stop the recursion silently, they
/// never raise. Records appear in depth-first discovery order, ties broken
/// by object key insertion order.
#[must_use]
pub fn extract(node: &Value, path_prefix: &str) -> Vec<DialogueRecord> {
    let mut records = Vec::new();
    walk(node, path_prefix, &mut records);
    records
}

/// Extract from one top-level key/value pair, treated as a singleton
/// one-key object with `key` as the path root.
///
/// This is the unit the scheduler feeds batch by batch. The singleton
/// wrapper means a top-level dialogue key has no visible siblings, so its
/// metadata is always empty.
pub(crate) fn extract_entry(key: &str, value: &Value, records: &mut Vec<DialogueRecord>) {
    if key == FIELD_INSTANCES
        && let Value::Array(fields) = value
    {
        scan_descriptors(fields, "", records);
    }

    if let Some(kind) = FieldKind::from_key(key)
        && !value.is_null()
    {
        records.push(DialogueRecord {
            path: key.to_string(),
            kind,
            content: value.clone(),
            character: None,
            entity_type: None,
        });
    }

    if value.is_object() || value.is_array() {
        walk(value, key, records);
    }
}

fn walk(node: &Value, path: &str, records: &mut Vec<DialogueRecord>) {
    match node {
        Value::Object(map) => {
            if let Some(Value::Array(fields)) = map.get(FIELD_INSTANCES) {
                scan_descriptors(fields, path, records);
            }

            for (key, value) in map {
                let child_path = join_path(path, key);

                if let Some(kind) = FieldKind::from_key(key)
                    && !value.is_null()
                {
                    records.push(DialogueRecord {
                        path: child_path.clone(),
                        kind,
                        content: value.clone(),
                        character: sibling_text(map, NAME),
                        entity_type: sibling_text(map, TYPE),
                    });
                }

                if value.is_object() || value.is_array() {
                    walk(value, &child_path, records);
                }
            }
        }
        // Array elements keep the enclosing path segment, so sibling
        // elements are indistinguishable by path. Exporters depend on the
        // current paths; see the path-ambiguity test before changing this.
        Value::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    walk(item, path, records);
                }
            }
        }
        _ => {}
    }
}

/// Apply the `fieldInstances` rule to a descriptor array.
///
/// Each descriptor whose `__identifier` is a dialogue slot and whose
/// `__value` is non-null emits one record; `Name`/`Type` metadata comes
/// from sibling descriptors in the same array (first match wins).
fn scan_descriptors(fields: &[Value], path: &str, records: &mut Vec<DialogueRecord>) {
    for field in fields {
        let Some(identifier) = field.get(IDENTIFIER).and_then(Value::as_str) else {
            continue;
        };
        let Some(kind) = FieldKind::from_key(identifier) else {
            continue;
        };
        let Some(value) = field.get(VALUE) else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        records.push(DialogueRecord {
            path: join_path(path, identifier),
            kind,
            content: value.clone(),
            character: descriptor_text(fields, NAME),
            entity_type: descriptor_text(fields, TYPE),
        });
    }
}

/// First non-null `__value` among descriptors with the given `__identifier`.
fn descriptor_text(fields: &[Value], identifier: &str) -> Option<String> {
    fields
        .iter()
        .find(|f| f.get(IDENTIFIER).and_then(Value::as_str) == Some(identifier))
        .and_then(|f| f.get(VALUE))
        .filter(|v| !v.is_null())
        .map(value_text)
}

/// Non-null sibling property rendered as text.
fn sibling_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).filter(|v| !v.is_null()).map(value_text)
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flat_property_match() {
        let node = json!({"Dialogue": "hi", "Name": "Bob"});
        let records = extract(&node, "");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, FieldKind::Dialogue);
        assert_eq!(records[0].content, json!("hi"));
        assert_eq!(records[0].path, "Dialogue");
        assert_eq!(records[0].character.as_deref(), Some("Bob"));
        assert_eq!(records[0].entity_type, None);
    }

    #[test]
    fn test_field_instances_match() {
        let node = json!({
            "fieldInstances": [
                {"__identifier": "Dialogue2", "__value": "hey"},
                {"__identifier": "Name", "__value": "Ann"}
            ]
        });
        let records = extract(&node, "");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, FieldKind::Dialogue2);
        assert_eq!(records[0].content, json!("hey"));
        assert_eq!(records[0].path, "Dialogue2");
        assert_eq!(records[0].character.as_deref(), Some("Ann"));
        assert_eq!(records[0].entity_type, None);
    }

    #[test]
    fn test_both_shapes_emit_independent_records() {
        let node = json!({
            "Dialogue": "flat line",
            "fieldInstances": [
                {"__identifier": "Dialogue", "__value": "descriptor line"}
            ]
        });
        let records = extract(&node, "root");

        assert_eq!(records.len(), 2);
        // fieldInstances is scanned before the flat properties.
        assert_eq!(records[0].content, json!("descriptor line"));
        assert_eq!(records[1].content, json!("flat line"));
        assert_eq!(records[0].path, "root.Dialogue");
        assert_eq!(records[1].path, "root.Dialogue");
    }

    #[test]
    fn test_null_values_never_emit() {
        let node = json!({
            "Dialogue": null,
            "fieldInstances": [
                {"__identifier": "Dialogue1", "__value": null}
            ]
        });
        assert!(extract(&node, "").is_empty());
    }

    #[test]
    fn test_multiple_slots_on_one_node() {
        let node = json!({
            "Dialogue1": "first",
            "Dialogue2": "second",
            "Name": "Narrator"
        });
        let records = extract(&node, "scene");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, FieldKind::Dialogue1);
        assert_eq!(records[1].kind, FieldKind::Dialogue2);
        assert_eq!(records[0].path, "scene.Dialogue1");
        assert_eq!(records[1].path, "scene.Dialogue2");
        assert_eq!(records[0].character.as_deref(), Some("Narrator"));
        assert_eq!(records[1].character.as_deref(), Some("Narrator"));
    }

    #[test]
    fn test_nested_paths_are_dot_joined() {
        let node = json!({
            "level": {
                "entities": {
                    "npc": {"Dialogue": "deep", "Type": "Villager"}
                }
            }
        });
        let records = extract(&node, "");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "level.entities.npc.Dialogue");
        assert_eq!(records[0].entity_type.as_deref(), Some("Villager"));
        assert_eq!(records[0].character, None);
    }

    #[test]
    fn test_array_elements_share_the_parent_path() {
        // Sibling array elements produce indistinguishable paths. An
        // index-suffixed scheme would change every exported path, so this
        // stays as is.
        let node = json!({
            "npcs": [
                {"Dialogue": "one"},
                {"Dialogue": "two"}
            ]
        });
        let records = extract(&node, "");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, "npcs.Dialogue");
        assert_eq!(records[1].path, "npcs.Dialogue");
        assert_eq!(records[0].content, json!("one"));
        assert_eq!(records[1].content, json!("two"));
    }

    #[test]
    fn test_descriptor_metadata_first_match_wins() {
        let node = json!({
            "fieldInstances": [
                {"__identifier": "Dialogue", "__value": "line"},
                {"__identifier": "Name", "__value": "First"},
                {"__identifier": "Name", "__value": "Second"}
            ]
        });
        let records = extract(&node, "");
        assert_eq!(records[0].character.as_deref(), Some("First"));
    }

    #[test]
    fn test_descriptor_array_is_also_recursed() {
        // Descriptors whose __value holds nested containers are still
        // traversed like any other property value.
        let node = json!({
            "fieldInstances": [
                {"__identifier": "Notes", "__value": {"Dialogue": "nested"}}
            ]
        });
        let records = extract(&node, "");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, json!("nested"));
        assert_eq!(records[0].path, "fieldInstances.__value.Dialogue");
    }

    #[test]
    fn test_non_string_content_is_kept_raw() {
        let node = json!({"Dialogue": 42});
        let records = extract(&node, "");
        assert_eq!(records[0].content, json!(42));
        assert_eq!(records[0].content_text(), "42");
    }

    #[test]
    fn test_non_string_metadata_is_coerced_to_text() {
        let node = json!({"Dialogue": "hi", "Name": 7, "Type": false});
        let records = extract(&node, "");
        assert_eq!(records[0].character.as_deref(), Some("7"));
        assert_eq!(records[0].entity_type.as_deref(), Some("false"));
    }

    #[test]
    fn test_malformed_descriptors_are_skipped_silently() {
        let node = json!({
            "fieldInstances": [
                "not an object",
                {"__value": "no identifier"},
                {"__identifier": "Dialogue"},
                {"__identifier": "Dialogue", "__value": "kept"}
            ]
        });
        let records = extract(&node, "");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, json!("kept"));
    }

    #[test]
    fn test_field_instances_must_be_an_array() {
        let node = json!({"fieldInstances": {"__identifier": "Dialogue", "__value": "x"}});
        // The descriptor rule does not fire, but recursion still visits the
        // object; nothing inside matches the flat rule either.
        assert!(extract(&node, "").is_empty());
    }

    #[test]
    fn test_scalars_stop_recursion_silently() {
        assert!(extract(&json!("just a string"), "").is_empty());
        assert!(extract(&json!(123), "").is_empty());
        assert!(extract(&json!(null), "").is_empty());
    }

    #[test]
    fn test_extract_entry_has_no_sibling_metadata() {
        // A top-level dialogue key is wrapped as a singleton object, so a
        // top-level Name never becomes its metadata.
        let mut records = Vec::new();
        extract_entry("Dialogue", &json!("top"), &mut records);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "Dialogue");
        assert_eq!(records[0].character, None);
    }
}
