use std::path::{Path, PathBuf};
use std::process;
use clap::{Parser, Subcommand};

use attribute_transform::{
    AttributeTransformation, ComparisonConfig, ComparisonReporter, FigureDocument, ReportFormat,
    TransformationDetector, TransformationKind,
};

#[derive(Parser, Debug)]
#[command(name = "attribute-transform")]
#[command(about = "Detect and compare attribute transformations between figures")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List transformation kinds with their base weights
    Kinds,

    /// Check two transformations for structural equality, e.g. "Rotation(90)" "Rotation(180)"
    Equal {
        first: String,
        second: String,
    },

    /// Detect transformations for every figure pair in a YAML document
    Compare {
        /// Path to the figure document
        file: PathBuf,

        /// Report format, overrides the config file
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,

        /// Config file (default: ./.attribute-transform.yaml if present)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args.command) {
        eprintln!("\n❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Kinds => {
            for kind in TransformationKind::ALL {
                println!("{:<16} {}", kind.to_string(), kind.base_weight());
            }
        }

        Command::Equal { first, second } => {
            let first: AttributeTransformation = first.parse()?;
            let second: AttributeTransformation = second.parse()?;
            log::debug!("Comparing {} with {}", first, second);
            println!("{}", first.structurally_equal(&second));
        }

        Command::Compare { file, format, config } => {
            let output = compare(&file, format, config.as_deref())?;
            println!("{}", output.trim_end());
        }
    }

    Ok(())
}

/// Render the comparison report for a figure document. `format` wins over the config file.
fn compare(
    file: &Path,
    format: Option<ReportFormat>,
    config: Option<&Path>,
) -> Result<String, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => ComparisonConfig::load_from_path(path)?,
        None => ComparisonConfig::load_from_dir(&std::env::current_dir()?),
    };
    let document = FigureDocument::load(file)?;

    let reporter = ComparisonReporter::new()
        .with_format(format.unwrap_or(config.format))
        .with_include_no_change(config.include_no_change);
    let detector = TransformationDetector::new(config);

    let (detections, warnings) = detector.compare_pairs(&document.pairs);
    let report = reporter.generate_report(&detections, &warnings);
    Ok(reporter.format_report(&report)?)
}
