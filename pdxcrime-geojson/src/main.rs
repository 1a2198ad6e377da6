//! Point d'entrée CLI pour pdxcrime-geojson

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use pdxcrime_geojson::cli::{self, ConvertArgs};
use pdxcrime_geojson::report::ConversionStatus;

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Convertir les données de criminalité de Portland (CSV) en GeoJSON
#[derive(Parser)]
#[command(name = "pdxcrime-geojson")]
#[command(author, version)]
#[command(about = "Convert City of Portland crime data (CSV) to a GeoJSON FeatureCollection")]
#[command(long_about = "Convert City of Portland crime data (CSV) to a GeoJSON FeatureCollection.\n\nCoordinates are reprojected from Oregon North State Plane (EPSG:2269, feet) to WGS84 (EPSG:4326). Rows with bad data are skipped and counted.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    info!(input = %cli.convert.input.display(), "Conversion vers GeoJSON");
    let report = cli::cmd_convert(&cli.convert)?;

    if report.skipped > 0 {
        report.display();
    } else {
        println!("{}", report.summary());
    }

    if report.status == ConversionStatus::Failed {
        anyhow::bail!("No valid rows in {}", report.input);
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
