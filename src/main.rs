mod cli {
    pub(crate) mod plot;
    pub(crate) mod xml2json;
}

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a PLIP XML report into the four-category JSON layout
    #[command(name = "xml2json")]
    Xml2Json(cli::xml2json::Args),

    /// Count interactions per residue and draw a stacked-fraction chart
    Plot(cli::plot::Args),
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                println!("{e}");
                std::process::exit(1);
            }
        },
    };

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Xml2Json(args) => cli::xml2json::run(args),
        Commands::Plot(args) => cli::plot::run(args),
    };
    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
