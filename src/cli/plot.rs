use plipviz::{
    get_interaction_counts, plot_stacked_fractions, write_df_to_file, DataFrameFileType,
    InteractionCategory, ReportError, ReportFormat, DEFAULT_TITLE,
};

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the report, JSON or XML
    report: PathBuf,

    /// Path of the chart image; a `.svg` extension writes SVG, anything else PNG
    out_plot: PathBuf,

    /// Path of the per-residue count table
    out_counts: PathBuf,

    /// Report format, inferred from the file extension if omitted
    #[arg(short = 'f', long)]
    input_format: Option<ReportFormat>,

    /// Count table file type; replaces the extension of OUT_COUNTS
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Chart title
    #[arg(long, default_value_t = String::from(DEFAULT_TITLE))]
    title: String,
}

pub(crate) fn run(args: &Args) -> Result<(), ReportError> {
    trace!("{args:?}");

    let input_format = args
        .input_format
        .unwrap_or_else(|| ReportFormat::from_path(&args.report));
    debug!("Reading {} as {input_format}", args.report.display());

    let (table, total) = get_interaction_counts(&args.report, input_format)?;
    if table.is_empty() {
        warn!("No interactions found in {}", args.report.display());
    }
    for category in InteractionCategory::ALL {
        debug!("{category}: {}", table.category_total(category));
    }

    let mut df_counts = table.to_dataframe()?;
    debug!("Per-residue counts\n{df_counts}");
    let counts_file = args
        .out_counts
        .with_extension(args.output_format.to_string());

    // Either both outputs exist afterwards or neither does
    plot_stacked_fractions(&table, total, &args.out_plot, &args.title)?;
    if let Err(e) = write_df_to_file(&mut df_counts, &counts_file, args.output_format) {
        discard(&counts_file);
        discard(&args.out_plot);
        return Err(e);
    }
    info!(
        "Saved {} residues to {} and the chart to {}",
        df_counts.height(),
        counts_file.display(),
        args.out_plot.display()
    );

    println!(
        "Wrote counts {} to {}. Total interactions = {total}",
        args.output_format.to_string().to_uppercase(),
        counts_file.display()
    );
    println!("Saved plot to: {}", args.out_plot.display());
    Ok(())
}

/// Remove an output written by a run that failed later on.
fn discard(path: &Path) {
    if path.exists() {
        match std::fs::remove_file(path) {
            Ok(()) => debug!("Removed {}", path.display()),
            Err(e) => warn!("Failed to remove {}: {e}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_data(name: &str) -> PathBuf {
        let root = env!("CARGO_MANIFEST_DIR");
        Path::new(root).join("test-data").join(name)
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("plipviz-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn args(report: PathBuf, out_plot: PathBuf, out_counts: PathBuf) -> Args {
        Args {
            report,
            out_plot,
            out_counts,
            input_format: None,
            output_format: DataFrameFileType::Csv,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    #[test]
    fn failed_chart_leaves_no_table() {
        let dir = scratch_dir("failed-chart");
        let counts = dir.join("counts.csv");
        let run_args = args(
            test_data("heuristic_report.json"),
            dir.join("missing_dir").join("chart.png"),
            counts.clone(),
        );

        assert!(run(&run_args).is_err());
        assert!(!counts.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_table_leaves_no_chart() {
        let dir = scratch_dir("failed-table");
        let chart = dir.join("chart.png");
        let run_args = args(
            test_data("plip_report.xml"),
            chart.clone(),
            dir.join("missing_dir").join("counts.csv"),
        );

        assert!(run(&run_args).is_err());
        assert!(!chart.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn writes_chart_and_table() {
        let dir = scratch_dir("complete");
        let chart = dir.join("chart.png");
        let run_args = args(
            test_data("plip_report.xml"),
            chart.clone(),
            dir.join("counts.txt"),
        );

        run(&run_args).unwrap();
        assert!(chart.exists());
        let csv = std::fs::read_to_string(dir.join("counts.csv")).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("residue,H-bonds,Hydrophobic,Ionic,Water bridges")
        );
        assert_eq!(lines.next(), Some("LEU5_A,0,2,0,0"));
        assert_eq!(lines.count(), 4);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
