//! Normalization of JSON reports, canonical or heuristic.

use super::CanonicalReport;
use crate::errors::ReportError;
use crate::interactions::{classify_json_key, InteractionCategory};
use crate::residues::identify_value;

use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Category used for list-valued keys that match no keyword.
pub const FALLBACK_CATEGORY: InteractionCategory = InteractionCategory::Hydrophobic;

/// Record fields consulted as a classification hint when a key is ambiguous.
const TYPE_HINT_KEYS: [&str; 2] = ["type", "interaction"];

/// Normalize a parsed JSON report.
///
/// Keys that are canonical report keys (`hydrogen_bonds`, ...; any case) are
/// copied into their category first. Every other list-valued key is
/// classified by name, then by the `type`/`interaction` field of its first
/// item, and lands in [`FALLBACK_CATEGORY`] when both fail. Non-list values
/// are ignored. Items are never deduplicated.
pub fn normalize_json(document: &Value) -> Result<CanonicalReport, ReportError> {
    let Value::Object(map) = document else {
        return Err(ReportError::NotAnObject(value_kind(document)));
    };

    let mut report = CanonicalReport::new();

    // Canonical keys first, in column order
    for category in InteractionCategory::ALL {
        for (key, value) in map
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(category.report_key()))
        {
            match value {
                Value::Array(items) => extend(&mut report, category, items),
                _ => warn!("Skipping \"{key}\": expected a list of residues"),
            }
        }
    }

    for (key, value) in map {
        if InteractionCategory::from_report_key(key).is_some() {
            continue;
        }
        let Value::Array(items) = value else {
            continue;
        };
        let category = classify_list(key, items);
        extend(&mut report, category, items);
    }
    Ok(report)
}

/// Resolve the category of a non-canonical list-valued key.
fn classify_list(key: &str, items: &[Value]) -> InteractionCategory {
    if let Some(category) = classify_json_key(key) {
        return category;
    }
    if let Some(category) = items.first().and_then(type_hint).and_then(classify_json_key) {
        debug!("Classified \"{key}\" as {category} from the type of its first item");
        return category;
    }
    debug!(
        "Could not classify \"{key}\" ({} items), counting it as {FALLBACK_CATEGORY}",
        items.len()
    );
    FALLBACK_CATEGORY
}

/// The `type`/`interaction` string of a structured list item.
fn type_hint(item: &Value) -> Option<&str> {
    let record: &Map<String, Value> = item.as_object()?;
    TYPE_HINT_KEYS
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
}

fn extend(report: &mut CanonicalReport, category: InteractionCategory, items: &[Value]) {
    for item in items {
        report.push(category, identify_value(item));
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residues::ResidueIdentity;
    use serde_json::json;

    fn labels(report: &CanonicalReport, category: InteractionCategory) -> Vec<String> {
        report
            .get(category)
            .iter()
            .map(ResidueIdentity::label)
            .collect()
    }

    #[test]
    fn canonical_keys_are_copied() {
        let report = normalize_json(&json!({
            "hydrogen_bonds": [{"resname": "SER", "resnr": 12, "chain": "A"}],
            "Hydrophobic_Contacts": ["LEU5", "LEU5"],
            "ionic_interactions": [],
            "water_bridges": [{"resname": null, "resnr": 40, "chain": ""}]
        }))
        .unwrap();
        assert_eq!(labels(&report, InteractionCategory::HydrogenBond), ["SER12_A"]);
        assert_eq!(
            labels(&report, InteractionCategory::Hydrophobic),
            ["LEU5", "LEU5"]
        );
        assert!(report.get(InteractionCategory::Ionic).is_empty());
        assert_eq!(labels(&report, InteractionCategory::WaterBridge), ["UNK40"]);
        // Canonical keys are not classified a second time
        assert_eq!(report.len(), 4);
    }

    #[test]
    fn keys_classified_by_name() {
        let report = normalize_json(&json!({
            "hbonds": ["SER12A"],
            "salt_bridges": [{"residue": "ASP", "residue_number": 9}],
            "waters": ["HOH 301"],
            "ligand": "ATP",
            "n_contacts": 3
        }))
        .unwrap();
        assert_eq!(labels(&report, InteractionCategory::HydrogenBond), ["SER12_A"]);
        assert_eq!(labels(&report, InteractionCategory::Ionic), ["ASP9"]);
        assert_eq!(labels(&report, InteractionCategory::WaterBridge), ["HOH301"]);
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn type_hint_of_first_item() {
        let report = normalize_json(&json!({
            "contacts": [
                {"type": "Salt bridge", "resname": "LYS", "resnr": 33},
                {"type": "hydrophobic", "resname": "LEU", "resnr": 5}
            ],
            "others": [{"interaction": "water bridge", "resname": "THR", "resnr": 7}]
        }))
        .unwrap();
        // The whole list follows the first item
        assert_eq!(labels(&report, InteractionCategory::Ionic), ["LYS33", "LEU5"]);
        assert_eq!(labels(&report, InteractionCategory::WaterBridge), ["THR7"]);
    }

    #[test]
    fn unclassified_lists_fall_back_to_hydrophobic() {
        let report = normalize_json(&json!({
            "unknown_contacts": ["TRP 60"],
            "pi_stacks": [{"type": "stacking", "resname": "PHE", "resnr": 2}, {}],
            "empty": []
        }))
        .unwrap();
        assert_eq!(
            labels(&report, InteractionCategory::Hydrophobic),
            ["TRP60", "PHE2", "UNK?"]
        );
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn non_object_documents() {
        assert!(matches!(
            normalize_json(&json!([1, 2])),
            Err(ReportError::NotAnObject("a list"))
        ));
        assert!(normalize_json(&json!({})).unwrap().is_empty());
    }
}
