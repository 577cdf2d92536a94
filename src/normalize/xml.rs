//! Normalization of PLIP XML reports.

use super::InteractionRecords;
use crate::interactions::{classify_xml_name, InteractionCategory};
use crate::residues::{FieldLookup, ResidueFields, ResidueRef};
use crate::xml::XmlElement;

use tracing::{debug, trace};

/// Attributes consulted when an element's tag does not name an interaction.
const TYPE_ATTRS: [&str; 3] = ["type", "interaction", "interactionType"];

/// Child tags (lowercase) whose text holds the residue name.
const NAME_TAGS: [&str; 6] = [
    "resname",
    "residue_name",
    "residue",
    "name",
    "residuename",
    "restype",
];
/// Child tags (lowercase) whose text holds the residue number.
const NUMBER_TAGS: [&str; 5] = [
    "resnr",
    "residue_number",
    "residue_id",
    "number",
    "residuenumber",
];
/// Child tags (lowercase) whose text holds the chain identifier.
const CHAIN_TAGS: [&str; 4] = ["chain", "chain_id", "chainid", "reschain"];

/// Normalize a parsed XML report.
///
/// Every element of the tree is visited. Elements whose tag (or `type`-style
/// attribute) names an interaction contribute the residues found on
/// residue-like nodes of their subtree, or their own residue fields when the
/// subtree has none. Elements that do not classify are skipped.
pub fn normalize_xml(root: &XmlElement) -> InteractionRecords {
    let mut records = InteractionRecords::default();

    for elem in root.iter() {
        let Some(category) = classify_element(elem) else {
            continue;
        };
        trace!("<{}> classified as {category}", elem.tag);

        let mut found_any = false;
        for node in elem.iter().filter(|node| is_residue_node(node)) {
            if let Some(residue) = residue_from_element(node) {
                records.push(category, residue);
                found_any = true;
            }
        }
        if !found_any {
            match residue_from_element(elem) {
                Some(residue) => records.push(category, residue),
                None => debug!("No residue found for <{}> ({category})", elem.tag),
            }
        }
    }
    records
}

/// Classify an element by tag name, then by its `type`-style attribute.
fn classify_element(elem: &XmlElement) -> Option<InteractionCategory> {
    classify_xml_name(&elem.tag).or_else(|| {
        elem.first_field(&TYPE_ATTRS)
            .and_then(|hint| classify_xml_name(&hint))
    })
}

/// Nodes that may describe a residue: tags containing `residue`, `partner` and `atom`.
fn is_residue_node(elem: &XmlElement) -> bool {
    let tag = elem.local_name();
    tag.contains("residue") || tag == "partner" || tag == "atom"
}

/// Extract a residue from an element.
///
/// Attributes are probed first. Missing fields are then filled from child
/// elements carrying the value as text, and finally from the attributes of
/// `resid`-like children.
pub fn residue_from_element(elem: &XmlElement) -> Option<ResidueRef> {
    let mut fields = ResidueFields::probe(elem);

    if fields.is_incomplete() {
        for child in &elem.children {
            let Some(text) = child.text() else {
                continue;
            };
            let tag = child.local_name();
            let text = Some(text.to_owned());
            if NAME_TAGS.contains(&tag.as_str()) {
                fields.fill(text.clone(), None, None);
            }
            if NUMBER_TAGS.contains(&tag.as_str()) {
                fields.fill(None, text.clone(), None);
            }
            if CHAIN_TAGS.contains(&tag.as_str()) {
                fields.fill(None, None, text);
            }
        }
    }

    if fields.is_incomplete() {
        for child in elem.children.iter().filter(|child| is_resid_child(child)) {
            fields.fill(
                child.first_field(&["resname", "name"]),
                child.first_field(&["resnr", "number"]),
                child.field("chain"),
            );
        }
    }

    fields.backfill_from_label(elem);
    fields.into_residue()
}

fn is_resid_child(elem: &XmlElement) -> bool {
    elem.local_name().contains("resid")
        || elem
            .attr("type")
            .is_some_and(|t| t.to_lowercase().contains("resid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residues::ResidueNumber;
    use crate::xml::parse_xml;
    use serde_json::json;

    fn normalize(content: &str) -> InteractionRecords {
        normalize_xml(&parse_xml(content).unwrap())
    }

    fn labels(records: &InteractionRecords, category: InteractionCategory) -> Vec<String> {
        records.get(category).iter().map(ResidueRef::label).collect()
    }

    #[test]
    fn single_hydrogen_bond() {
        let records = normalize(
            r#"<report><hydrogen_bond><residue resname="SER" resnr="12" chain="A"/></hydrogen_bond></report>"#,
        );
        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            json!({
                "hydrogen_bonds": [{"resname": "SER", "resnr": 12, "chain": "A"}],
                "hydrophobic_contacts": [],
                "ionic_interactions": [],
                "water_bridges": []
            })
        );
    }

    #[test]
    fn type_attribute_fallback() {
        let records = normalize(
            r#"<report>
                 <interaction type="Salt-Bridge"><partner name="LYS" number="33"/></interaction>
                 <contact interactionType="waterBridge" resname="THR" resnr="7" chain="B"/>
               </report>"#,
        );
        assert_eq!(labels(&records, InteractionCategory::Ionic), ["LYS33"]);
        assert_eq!(labels(&records, InteractionCategory::WaterBridge), ["THR7_B"]);
    }

    #[test]
    fn unclassified_elements_are_dropped() {
        let records = normalize(
            r#"<report>
                 <pi_stack><residue resname="PHE" resnr="2"/></pi_stack>
                 <metal_complex resname="HIS" resnr="3"/>
               </report>"#,
        );
        assert_eq!(records, InteractionRecords::default());
    }

    #[test]
    fn element_itself_as_last_resort() {
        let records = normalize(
            r#"<report><hydrophobic_interaction resname="LEU" resnr="5" chain="A"/></report>"#,
        );
        assert_eq!(labels(&records, InteractionCategory::Hydrophobic), ["LEU5_A"]);
    }

    #[test]
    fn child_text_fields() {
        // Native PLIP layout: container and interaction elements both classify
        let records = normalize(
            r#"<report>
                 <hydrophobic_interactions>
                   <hydrophobic_interaction id="1">
                     <resnr>40</resnr><restype>GLU</restype><reschain>A</reschain>
                     <dist>3.71</dist>
                   </hydrophobic_interaction>
                 </hydrophobic_interactions>
               </report>"#,
        );
        assert_eq!(labels(&records, InteractionCategory::Hydrophobic), ["GLU40_A"]);
    }

    #[test]
    fn resid_children() {
        let elem = parse_xml(
            r#"<hbond><resid resname="ASN" resnr="101A" chain="C"/><donor resname="HOH"/></hbond>"#,
        )
        .unwrap();
        let residue = residue_from_element(&elem).unwrap();
        assert_eq!(residue.name.as_deref(), Some("ASN"));
        assert_eq!(residue.number, ResidueNumber::Seq(101));
        assert_eq!(residue.chain, "C");
    }

    #[test]
    fn partial_and_missing_identities() {
        let records = normalize(
            r#"<report>
                 <water_bridge><residue resnr="301"/><residue chain="A"/></water_bridge>
                 <ionic><atom idx="12"/></ionic>
                 <hbond><residue resname="TYR"/></hbond>
               </report>"#,
        );
        assert_eq!(labels(&records, InteractionCategory::WaterBridge), ["UNK301"]);
        assert!(records.ionic_interactions.is_empty());
        assert_eq!(
            serde_json::to_value(&records.hydrogen_bonds).unwrap(),
            json!([{"resname": "TYR", "resnr": "?", "chain": ""}])
        );
    }

    #[test]
    fn interaction_attribute_fallback() {
        let records = normalize(
            r#"<report><contact interaction="hydrophobic"><residue resname="VAL" resnr="17" chain="A"/></contact></report>"#,
        );
        assert_eq!(labels(&records, InteractionCategory::Hydrophobic), ["VAL17_A"]);
    }

    #[test]
    fn resid_child_by_type_attribute() {
        let records = normalize(
            r#"<report><hbond id="4"><group type="ResidueId" resname="ASN" resnr="7" chain="B"/></hbond></report>"#,
        );
        assert_eq!(labels(&records, InteractionCategory::HydrogenBond), ["ASN7_B"]);
    }

    #[test]
    fn label_backfill_on_elements() {
        let records = normalize(
            r#"<report><saltbridge label="LYS33B"/><water_bridge><partner label="HOH 301" chain="W"/></water_bridge></report>"#,
        );
        assert_eq!(labels(&records, InteractionCategory::Ionic), ["LYS33_B"]);
        assert_eq!(labels(&records, InteractionCategory::WaterBridge), ["HOH301_W"]);
    }

    #[test]
    fn namespaced_tags() {
        let records = normalize(
            r#"<p:report xmlns:p="urn:plip"><p:HBond><p:Residue resname="GLY" resnr="8"/></p:HBond></p:report>"#,
        );
        assert_eq!(labels(&records, InteractionCategory::HydrogenBond), ["GLY8"]);
    }
}
