use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;
use rayon::prelude::*;
use serde_json::json;

use cifxtal::config::{Config, OutputFormat};
use cifxtal::model::{known, Crystal};
use cifxtal::physics::analysis::symmetry::{self, SymmetryInfo};
use cifxtal::utils::{logger, report};
use cifxtal::CifError;

/// Reads CIF files and prints the assembled crystal structures.
#[derive(Parser)]
#[command(name = "cifxtal", version, about = "CIF reader and crystal-structure assembler")]
struct Cli {
    /// CIF files to load
    files: Vec<PathBuf>,

    /// Load a built-in crystal by name (repeatable)
    #[arg(long = "known", value_name = "NAME")]
    known: Vec<String>,

    /// List the built-in crystals and exit
    #[arg(long)]
    list_known: bool,

    /// Output format (text or json)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Compare the declared space group with one detected from the sites
    #[arg(long)]
    check_symmetry: bool,

    /// Print site positions in Cartesian Å instead of fractional coordinates
    #[arg(long)]
    cartesian: bool,

    /// Number of sites listed per crystal in text output
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Settings file to use instead of the platform default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

enum Source {
    File(PathBuf),
    Known(String),
}

impl Source {
    fn label(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Known(name) => format!("known:{}", name),
        }
    }

    fn load(&self) -> Result<Crystal, CifError> {
        match self {
            Source::File(path) => cifxtal::load_crystal(path),
            Source::Known(name) => known::load(name),
        }
    }
}

struct Outcome {
    source: String,
    result: Result<(Crystal, Option<SymmetryInfo>), CifError>,
}

fn log_level(cli: &Cli, config: &Config) -> LevelFilter {
    if cli.quiet {
        return LevelFilter::Error;
    }
    let base = logger::parse_level(&config.log_level).unwrap_or(LevelFilter::Warn);
    match cli.verbose {
        0 => base,
        1 => base.max(LevelFilter::Info),
        2 => base.max(LevelFilter::Debug),
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    let (config, config_msg) = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let _ = logger::init(log_level(&cli, &config));
    log::info!("{}", config_msg);

    if cli.list_known {
        for name in known::names() {
            println!("{}", name);
        }
        return;
    }

    let sources: Vec<Source> = cli
        .files
        .iter()
        .cloned()
        .map(Source::File)
        .chain(cli.known.iter().cloned().map(Source::Known))
        .collect();
    if sources.is_empty() {
        eprintln!("cifxtal: no input; pass CIF files or --known NAME (see --help)");
        process::exit(2);
    }

    let check_symmetry = cli.check_symmetry || config.check_symmetry;
    let outcomes: Vec<Outcome> = sources
        .par_iter()
        .map(|source| Outcome {
            source: source.label(),
            result: source.load().map(|crystal| {
                let detected = check_symmetry.then(|| detect(&source.label(), &crystal)).flatten();
                (crystal, detected)
            }),
        })
        .collect();

    let format = cli.format.unwrap_or(config.output);
    let cartesian = cli.cartesian || config.cartesian;
    let rows = cli.rows.unwrap_or(config.summary_rows);
    let failures = outcomes.iter().filter(|o| o.result.is_err()).count();

    match format {
        OutputFormat::Text => print_text(&outcomes, cartesian, rows),
        OutputFormat::Json => print_json(&outcomes),
    }

    if failures > 0 {
        process::exit(1);
    }
}

fn detect(source: &str, crystal: &Crystal) -> Option<SymmetryInfo> {
    match symmetry::analyze(crystal) {
        Ok(info) => {
            if !info.agrees_with(crystal) {
                log::warn!(
                    "{}: declared space group {} but sites have {} (#{})",
                    source,
                    crystal.space_group().index,
                    info.symbol,
                    info.number
                );
            }
            Some(info)
        }
        Err(e) => {
            log::warn!("{}: {}", source, e);
            None
        }
    }
}

fn print_text(outcomes: &[Outcome], cartesian: bool, rows: usize) {
    let mut first = true;
    for outcome in outcomes {
        match &outcome.result {
            Ok((crystal, detected)) => {
                if !first {
                    println!();
                }
                first = false;
                print!("{}", report::crystal_summary(crystal, &outcome.source, cartesian, rows));
                if let Some(info) = detected {
                    print!("{}", report::symmetry_check(crystal, info));
                }
            }
            Err(e) => log::error!("{}: {}", outcome.source, e),
        }
    }
}

fn print_json(outcomes: &[Outcome]) {
    let entries: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok((crystal, detected)) => json!({
                "source": outcome.source,
                "crystal": crystal,
                "detected_space_group": detected.as_ref().map(|info| json!({
                    "number": info.number,
                    "symbol": info.symbol,
                    "system": info.system,
                })),
            }),
            Err(e) => json!({
                "source": outcome.source,
                "error": e.to_string(),
            }),
        })
        .collect();

    match serde_json::to_string_pretty(&entries) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            log::error!("cannot serialize output: {}", e);
            process::exit(1);
        }
    }
}
