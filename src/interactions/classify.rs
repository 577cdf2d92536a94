//! Keyword classification of report keys and tag names.

use super::category::InteractionCategory;

use InteractionCategory::*;

/// Keyword table for JSON report keys and `type` hints.
///
/// Matching is by case-insensitive substring; the first entry that matches
/// wins, so the order of the entries is significant.
pub const JSON_KEYWORDS: [(&str, InteractionCategory); 11] = [
    ("hydrogen", HydrogenBond),
    ("hbond", HydrogenBond),
    ("hb", HydrogenBond),
    ("hydrophobic", Hydrophobic),
    ("hydro", Hydrophobic),
    ("hyd", Hydrophobic),
    ("ionic", Ionic),
    ("salt", Ionic),
    ("water", WaterBridge),
    ("bridge", WaterBridge),
    ("waters", WaterBridge),
];

/// Keyword table for XML tag names and `type`-style attributes.
pub const XML_KEYWORDS: [(&str, InteractionCategory); 8] = [
    ("hydrogen", HydrogenBond),
    ("hbond", HydrogenBond),
    ("hydrophobic", Hydrophobic),
    ("hydro", Hydrophobic),
    ("ionic", Ionic),
    ("salt", Ionic),
    ("water", WaterBridge),
    ("bridge", WaterBridge),
];

/// Classify `key` against a keyword table.
///
/// Returns `None` when no keyword is contained in the key.
pub fn classify(table: &[(&str, InteractionCategory)], key: &str) -> Option<InteractionCategory> {
    let key = key.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| key.contains(keyword))
        .map(|(_, category)| *category)
}

/// Classify a JSON key or `type` hint with [`JSON_KEYWORDS`].
pub fn classify_json_key(key: &str) -> Option<InteractionCategory> {
    classify(&JSON_KEYWORDS, key)
}

/// Classify an XML tag name or attribute value with [`XML_KEYWORDS`].
pub fn classify_xml_name(name: &str) -> Option<InteractionCategory> {
    classify(&XML_KEYWORDS, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_keys() {
        assert_eq!(classify_json_key("hydrogen_bonds"), Some(HydrogenBond));
        assert_eq!(classify_json_key("HBonds"), Some(HydrogenBond));
        assert_eq!(classify_json_key("hb_list"), Some(HydrogenBond));
        assert_eq!(classify_json_key("hydrophobic_contacts"), Some(Hydrophobic));
        assert_eq!(classify_json_key("Hyd"), Some(Hydrophobic));
        assert_eq!(classify_json_key("ionic_interactions"), Some(Ionic));
        assert_eq!(classify_json_key("water_bridges"), Some(WaterBridge));
        assert_eq!(classify_json_key("pi_stacks"), None);
        assert_eq!(classify_json_key(""), None);
    }

    #[test]
    fn table_order_breaks_ties() {
        // `salt` is checked before `bridge`
        assert_eq!(classify_json_key("salt_bridges"), Some(Ionic));
        assert_eq!(classify_xml_name("salt_bridge"), Some(Ionic));
        // `hydrogen` is checked before `hydro`
        assert_eq!(classify_json_key("hydrogen"), Some(HydrogenBond));
        assert_eq!(classify_xml_name("hydrogen_bond"), Some(HydrogenBond));
        // `hb` is only in the JSON table
        assert_eq!(classify_json_key("num_hbd"), Some(HydrogenBond));
        assert_eq!(classify_xml_name("num_hbd"), None);
    }

    #[test]
    fn xml_names() {
        assert_eq!(classify_xml_name("HydrophobicInteraction"), Some(Hydrophobic));
        assert_eq!(classify_xml_name("waterBridge"), Some(WaterBridge));
        assert_eq!(classify_xml_name("IONIC"), Some(Ionic));
        assert_eq!(classify_xml_name("hyd"), None);
        assert_eq!(classify_xml_name("residue"), None);
    }
}
