#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # PLIP report library
//!
//! This library turns protein-ligand interaction reports produced by PLIP,
//! in either the XML layout or a loosely structured JSON layout, into four
//! canonical interaction categories: hydrogen bonds, hydrophobic contacts,
//! ionic interactions and water bridges.
//!
//! Per-residue counts are returned as a [`CountTable`], which converts into a
//! Polars DataFrame for writing, and can be drawn as a stacked-fraction bar
//! chart with [`plot_stacked_fractions`].

pub mod counts;
pub mod errors;
pub mod interactions;
pub mod normalize;
pub mod plot;
pub mod residues;
pub mod utils;
pub mod xml;

// Re-export key public types
pub use counts::{count_interactions, CountRow, CountTable};
pub use errors::ReportError;
pub use interactions::InteractionCategory;
pub use normalize::{normalize_json, normalize_xml, CanonicalReport, InteractionRecords};
pub use plot::{plot_stacked_fractions, DEFAULT_TITLE};
pub use residues::{ResidueIdentity, ResidueNumber, ResidueRef};
pub use utils::{
    load_json_report, load_xml_report, write_df_to_file, write_json_report,
    DataFrameFileType, ReportFormat,
};

use std::path::Path;
use tracing::debug;

/// Convert an XML report into the four-category JSON layout.
///
/// # Arguments
///
/// * `xml_file` - Path to the PLIP XML report
/// * `json_file` - Path of the JSON file to write
///
/// # Returns
///
/// The converted records, as written to `json_file`.
///
/// # Example
///
/// ```no_run
/// use plipviz::xml_to_json;
/// use std::path::Path;
///
/// let records = xml_to_json(Path::new("report.xml"), Path::new("report.json")).unwrap();
/// println!("{}", records.summary());
/// ```
pub fn xml_to_json(xml_file: &Path, json_file: &Path) -> Result<InteractionRecords, ReportError> {
    let root = load_xml_report(xml_file)?;
    let records = normalize_xml(&root);
    write_json_report(&records, json_file)?;
    Ok(records)
}

/// Load a report of either format and normalize it.
///
/// XML reports go through the XML normalizer and are then widened into a
/// [`CanonicalReport`], so both formats feed the same aggregation.
pub fn load_report(input_file: &Path, format: ReportFormat) -> Result<CanonicalReport, ReportError> {
    let report = match format {
        ReportFormat::Json => normalize_json(&load_json_report(input_file)?)?,
        ReportFormat::Xml => CanonicalReport::from(&normalize_xml(&load_xml_report(input_file)?)),
    };
    debug!(
        "Normalized {} entries from {}",
        report.len(),
        input_file.display()
    );
    Ok(report)
}

/// Count interactions per residue in a report.
///
/// # Arguments
///
/// * `input_file` - Path to the report
/// * `format` - Layout of the report
///
/// # Returns
///
/// The per-residue count table, sorted by residue number, and the total
/// number of interactions.
///
/// # Example
///
/// ```no_run
/// use plipviz::{get_interaction_counts, ReportFormat};
/// use std::path::Path;
///
/// let (table, total) = get_interaction_counts(Path::new("report.json"), ReportFormat::Json).unwrap();
/// let df = table.to_dataframe().unwrap();
/// println!("{total} interactions\n{df}");
/// ```
pub fn get_interaction_counts(
    input_file: &Path,
    format: ReportFormat,
) -> Result<(CountTable, usize), ReportError> {
    let report = load_report(input_file, format)?;
    Ok(count_interactions(&report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_data(name: &str) -> std::path::PathBuf {
        let root = env!("CARGO_MANIFEST_DIR");
        Path::new(root).join("test-data").join(name)
    }

    #[test]
    fn xml_and_converted_json_agree() {
        let xml_file = test_data("plip_report.xml");
        let json_file =
            std::env::temp_dir().join(format!("plipviz-{}-converted.json", std::process::id()));

        let records = xml_to_json(&xml_file, &json_file).unwrap();
        let from_json = get_interaction_counts(&json_file, ReportFormat::Json).unwrap();
        let from_xml = get_interaction_counts(&xml_file, ReportFormat::Xml).unwrap();
        std::fs::remove_file(&json_file).unwrap();

        assert_eq!(from_json, from_xml);
        let total: usize = InteractionCategory::ALL
            .iter()
            .map(|c| records.get(*c).len())
            .sum();
        assert_eq!(from_xml.1, total);
    }

    #[test]
    fn plip_xml_counts() {
        let (table, total) =
            get_interaction_counts(&test_data("plip_report.xml"), ReportFormat::Xml).unwrap();
        assert_eq!(table.labels(), ["LEU5_A", "ASP9_A", "SER12_A", "LYS33_A", "GLU40_A"]);
        assert_eq!(total, 7);
    }

    #[test]
    fn heuristic_json_counts() {
        let (table, total) =
            get_interaction_counts(&test_data("heuristic_report.json"), ReportFormat::Json)
                .unwrap();
        assert_eq!(total, 6);
        assert_eq!(table.labels(), ["ARG2", "LEU5", "GLU40_A", "HOH?"]);
        let glu = &table.rows()[2];
        assert_eq!(glu.count(InteractionCategory::HydrogenBond), 1);
        assert_eq!(glu.count(InteractionCategory::Ionic), 1);
        assert_eq!(table.category_total(InteractionCategory::Hydrophobic), 3);
    }

    #[test]
    fn empty_report_counts() {
        let (table, total) =
            get_interaction_counts(&test_data("empty_report.json"), ReportFormat::Json).unwrap();
        assert!(table.is_empty());
        assert_eq!(total, 0);
    }
}
