//! Normalization of raw reports into the four interaction categories.
//!
//! JSON reports normalize into a [`CanonicalReport`] of residue identities.
//! XML reports normalize into [`InteractionRecords`], the machine-readable
//! form written by the XML to JSON conversion, which converts losslessly
//! into a [`CanonicalReport`].
pub mod json;
pub mod xml;

// Re-exports
pub use json::normalize_json;
pub use xml::normalize_xml;

use crate::interactions::InteractionCategory;
use crate::residues::{ResidueIdentity, ResidueRef};
use serde::Serialize;

/// Residue identities per interaction category, in input order.
///
/// All four categories are always present, possibly empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CanonicalReport {
    entries: [Vec<ResidueIdentity>; 4],
}

impl CanonicalReport {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one residue to a category.
    pub fn push(&mut self, category: InteractionCategory, residue: ResidueIdentity) {
        self.entries[category.index()].push(residue);
    }

    /// Residues recorded for a category.
    pub fn get(&self, category: InteractionCategory) -> &[ResidueIdentity] {
        &self.entries[category.index()]
    }

    /// Categories with their residues, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (InteractionCategory, &[ResidueIdentity])> + '_ {
        InteractionCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Total number of residue entries over all categories.
    pub fn len(&self) -> usize {
        self.entries.iter().map(Vec::len).sum()
    }

    /// True if no category holds any residue.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Residues per interaction category, keyed by report key.
///
/// Serializes to the converted report layout:
/// `{"hydrogen_bonds": [...], "hydrophobic_contacts": [...], "ionic_interactions": [...], "water_bridges": [...]}`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionRecords {
    /// Hydrogen bond partners
    pub hydrogen_bonds: Vec<ResidueRef>,
    /// Hydrophobic contact partners
    pub hydrophobic_contacts: Vec<ResidueRef>,
    /// Salt bridge partners
    pub ionic_interactions: Vec<ResidueRef>,
    /// Water bridge partners
    pub water_bridges: Vec<ResidueRef>,
}

impl InteractionRecords {
    /// Residues recorded for a category.
    pub fn get(&self, category: InteractionCategory) -> &[ResidueRef] {
        match category {
            InteractionCategory::HydrogenBond => &self.hydrogen_bonds,
            InteractionCategory::Hydrophobic => &self.hydrophobic_contacts,
            InteractionCategory::Ionic => &self.ionic_interactions,
            InteractionCategory::WaterBridge => &self.water_bridges,
        }
    }

    /// Append one residue to a category.
    pub fn push(&mut self, category: InteractionCategory, residue: ResidueRef) {
        match category {
            InteractionCategory::HydrogenBond => self.hydrogen_bonds.push(residue),
            InteractionCategory::Hydrophobic => self.hydrophobic_contacts.push(residue),
            InteractionCategory::Ionic => self.ionic_interactions.push(residue),
            InteractionCategory::WaterBridge => self.water_bridges.push(residue),
        }
    }

    /// `key=count` pairs for every category, e.g. `hydrogen_bonds=2`.
    pub fn summary(&self) -> String {
        InteractionCategory::ALL
            .iter()
            .map(|c| format!("{}={}", c.report_key(), self.get(*c).len()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<&InteractionRecords> for CanonicalReport {
    fn from(records: &InteractionRecords) -> Self {
        let mut report = CanonicalReport::new();
        for category in InteractionCategory::ALL {
            for residue in records.get(category) {
                report.push(category, residue.clone().into());
            }
        }
        report
    }
}
