use plipviz::{load_xml_report, normalize_xml, write_json_report, ReportError};

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the PLIP XML report
    report_xml: PathBuf,

    /// Path of the JSON file to write
    report_json: PathBuf,
}

pub(crate) fn run(args: &Args) -> Result<(), ReportError> {
    trace!("{args:?}");

    let root = load_xml_report(&args.report_xml)?;
    debug!(
        "Loaded <{}> with {} elements from {}",
        root.tag,
        root.iter().count(),
        args.report_xml.display()
    );

    let records = normalize_xml(&root);
    write_json_report(&records, &args.report_json)?;
    info!("Converted report saved to {}", args.report_json.display());

    println!(
        "Wrote {} with counts: {}",
        args.report_json.display(),
        records.summary()
    );
    Ok(())
}
