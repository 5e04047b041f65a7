use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use orbit_frames::elements::{OrbitalElementSet, TleLoader};
use orbit_frames::eop::load_provider;
use orbit_frames::epoch::resolve;
use orbit_frames::{BatchRunner, Config, RunSummary};

#[derive(Parser)]
#[command(name = "orbit-frames")]
#[command(about = "Propagate element sets and convert them to geodetic coordinates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Propagate and transform every satellite in an element file or directory
    Run {
        #[arg(long)]
        elements: PathBuf,
        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the JSON result here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Resolve and print the epoch of every element set
    Epochs {
        #[arg(long)]
        elements: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            elements,
            config,
            output,
        } => run(&elements, config.as_deref(), output.as_deref()),
        Commands::Epochs { elements } => epochs(&elements),
    }
}

fn load_elements(path: &Path) -> Option<Vec<OrbitalElementSet>> {
    let mut loader = TleLoader::new(path);
    match loader.load_all() {
        Ok(0) => {
            eprintln!("No element sets found in {}", path.display());
            None
        }
        Ok(_) => Some(loader.into_sets()),
        Err(e) => {
            eprintln!("Error loading element sets: {}", e);
            None
        }
    }
}

fn run(elements: &Path, config: Option<&Path>, output: Option<&Path>) -> ExitCode {
    let config = match config.map(Config::from_file).transpose() {
        Ok(c) => c.unwrap_or_default(),
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let Some(sets) = load_elements(elements) else {
        return ExitCode::FAILURE;
    };

    let provider = load_provider(&config.earth_orientation_source);
    let runner = match BatchRunner::new(config.batch(), provider) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let result = runner.run(&sets);

    let json = match serde_json::to_string_pretty(&result) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            return ExitCode::FAILURE;
        }
    };
    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                eprintln!("Error writing {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            print_summary(&result.summary);
        }
        None => println!("{}", json),
    }
    ExitCode::SUCCESS
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} attempted, {} succeeded, {} failed, {} points ({} dropped), {} warnings in {} ms",
        summary.attempted,
        summary.succeeded,
        summary.failed,
        summary.total_points,
        summary.dropped_points,
        summary.warnings,
        summary.elapsed_ms
    );
    if summary.deadline_hit {
        println!("  deadline expired before all satellites were dispatched");
    }
    for failure in &summary.failures {
        println!(
            "  {} ({}): {} {}",
            failure.name, failure.norad_id, failure.reason, failure.message
        );
    }
}

fn epochs(elements: &Path) -> ExitCode {
    let Some(sets) = load_elements(elements) else {
        return ExitCode::FAILURE;
    };
    for set in &sets {
        match resolve(set) {
            Ok(epoch) => println!("{:>6}  {}  {}", set.norad_id, epoch.instant().to_rfc3339(), set.name),
            Err(e) => println!("{:>6}  {}: {}  {}", set.norad_id, e.reason_code(), e, set.name),
        }
    }
    ExitCode::SUCCESS
}
