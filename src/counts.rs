//! Per-residue interaction counts.
//!
//! This module turns a [`CanonicalReport`] into a residue × category count
//! table, ordered by residue number, and exports it as a Polars `DataFrame`.

use crate::interactions::InteractionCategory;
use crate::normalize::CanonicalReport;
use crate::residues::label::first_signed_integer;

use polars::prelude::*;
use std::collections::HashMap;

/// Name of the label column in exported tables.
pub const RESIDUE_COLUMN: &str = "residue";

/// Interaction counts of one residue, indexed like [`InteractionCategory::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    /// Residue label, e.g. `GLU40_A`
    pub label: String,
    /// One count per category
    pub counts: [u32; 4],
}

impl CountRow {
    fn new(label: String) -> Self {
        Self {
            label,
            counts: [0; 4],
        }
    }

    /// Count for a single category.
    pub fn count(&self, category: InteractionCategory) -> u32 {
        self.counts[category.index()]
    }

    /// Sum over all categories.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Rows with a residue number come first, in ascending order.
    fn sort_key(&self) -> (bool, i64) {
        match first_signed_integer(&self.label) {
            Some(n) => (false, n),
            None => (true, 0),
        }
    }
}

/// Residue × category interaction counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    rows: Vec<CountRow>,
}

impl CountTable {
    /// Rows in table order.
    pub fn rows(&self) -> &[CountRow] {
        &self.rows
    }

    /// Number of residues.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no residue has an interaction.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row labels in table order.
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    /// Sum of one category over all residues.
    pub fn category_total(&self, category: InteractionCategory) -> u32 {
        self.rows.iter().map(|r| r.count(category)).sum()
    }

    /// Each count divided by `total`, the number of interactions in the report.
    ///
    /// Fractions are relative to the whole report, not to the residue, so the
    /// stacked bars of all residues add up to 1. A zero `total` gives zeros.
    pub fn fractions(&self, total: usize) -> Vec<[f64; 4]> {
        self.rows
            .iter()
            .map(|row| {
                row.counts.map(|c| match total {
                    0 => 0.0,
                    t => f64::from(c) / t as f64,
                })
            })
            .collect()
    }

    /// Convert the table into a `DataFrame` with a `residue` column followed by
    /// one column per category.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let column = |category: InteractionCategory| {
            self.rows
                .iter()
                .map(|r| r.count(category))
                .collect::<Vec<u32>>()
        };
        df!(
            RESIDUE_COLUMN => self.rows.iter().map(|r| r.label.to_owned()).collect::<Vec<String>>(),
            "H-bonds" => column(InteractionCategory::HydrogenBond),
            "Hydrophobic" => column(InteractionCategory::Hydrophobic),
            "Ionic" => column(InteractionCategory::Ionic),
            "Water bridges" => column(InteractionCategory::WaterBridge),
        )
    }
}

/// Count interactions per residue label and category.
///
/// Returns the table, sorted by the first integer in each label (labels
/// without one go last, in the order they were first seen), and the total
/// number of interactions, which always equals `report.len()`.
pub fn count_interactions(report: &CanonicalReport) -> (CountTable, usize) {
    let mut rows: Vec<CountRow> = Vec::new();
    let mut row_of_label: HashMap<String, usize> = HashMap::new();
    let mut total = 0;

    for (category, residues) in report.iter() {
        for residue in residues {
            let label = residue.label();
            let idx = match row_of_label.get(&label) {
                Some(&idx) => idx,
                None => {
                    row_of_label.insert(label.clone(), rows.len());
                    rows.push(CountRow::new(label));
                    rows.len() - 1
                }
            };
            rows[idx].counts[category.index()] += 1;
            total += 1;
        }
    }

    // Stable sort keeps first-seen order among equal keys
    rows.sort_by_key(CountRow::sort_key);
    (CountTable { rows }, total)
}
