//! The canonical interaction categories.

use core::fmt;

/// The four interaction buckets every report is normalized into.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub enum InteractionCategory {
    /// Hydrogen bonds
    HydrogenBond,
    /// Hydrophobic contacts
    Hydrophobic,
    /// Salt bridges and other ionic interactions
    Ionic,
    /// Water-mediated hydrogen bonds
    WaterBridge,
}

impl InteractionCategory {
    /// All categories in column order.
    pub const ALL: [InteractionCategory; 4] = [
        InteractionCategory::HydrogenBond,
        InteractionCategory::Hydrophobic,
        InteractionCategory::Ionic,
        InteractionCategory::WaterBridge,
    ];

    /// Position of the category in [`InteractionCategory::ALL`].
    pub fn index(self) -> usize {
        match self {
            InteractionCategory::HydrogenBond => 0,
            InteractionCategory::Hydrophobic => 1,
            InteractionCategory::Ionic => 2,
            InteractionCategory::WaterBridge => 3,
        }
    }

    /// Column name used in tables and chart legends.
    pub fn display_name(self) -> &'static str {
        match self {
            InteractionCategory::HydrogenBond => "H-bonds",
            InteractionCategory::Hydrophobic => "Hydrophobic",
            InteractionCategory::Ionic => "Ionic",
            InteractionCategory::WaterBridge => "Water bridges",
        }
    }

    /// Key used in converted JSON reports.
    pub fn report_key(self) -> &'static str {
        match self {
            InteractionCategory::HydrogenBond => "hydrogen_bonds",
            InteractionCategory::Hydrophobic => "hydrophobic_contacts",
            InteractionCategory::Ionic => "ionic_interactions",
            InteractionCategory::WaterBridge => "water_bridges",
        }
    }

    /// Look up a category by its report key, ignoring case.
    pub fn from_report_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.report_key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for InteractionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
