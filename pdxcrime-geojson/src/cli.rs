//! Commande de conversion CSV → GeoJSON

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use pdxcrime::{CollectingSink, ConvertError, Converter, Field, Record, Tee, TracingSink};
use tracing::{info, warn};

use crate::config::Config;
use crate::report::ConversionReport;

/// Arguments de la conversion
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the crime data CSV file
    pub input: PathBuf,

    /// Output GeoJSON file (default: input name with .json)
    pub output: Option<PathBuf>,

    /// Config preset name (default) or path to a JSON config
    #[arg(long, default_value = "default")]
    pub config: String,

    /// Number of leading lines to skip (overrides the config)
    #[arg(long)]
    pub skip_rows: Option<usize>,

    /// Convert rows in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Write the conversion report as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Exécute la conversion d'un fichier
///
/// Retourne le rapport ; un fichier sans aucune ligne valide donne un
/// rapport `Failed` et aucun fichier écrit.
pub fn cmd_convert(args: &ConvertArgs) -> Result<ConversionReport> {
    let start = Instant::now();

    let mut config = Config::load_spec(&args.config)?;
    if let Some(skip_rows) = args.skip_rows {
        config.skip_rows = skip_rows;
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    info!(
        input = %args.input.display(),
        output = %output.display(),
        config = %args.config,
        parallel = args.parallel,
        "Starting conversion"
    );

    let bytes = std::fs::read(&args.input)
        .context(format!("Failed to read input file: {}", args.input.display()))?;
    let text = decode_input(&bytes);
    let records = read_records(&text, &config)?;

    let converter = Converter::with_headers(config.headers.clone())?
        .with_sink(Tee(TracingSink, CollectingSink::new()));
    info!(reprojector = converter.reprojector().description(), "Converter ready");

    let mut report = ConversionReport::new(&args.input, converter.reprojector().description());

    let result = if args.parallel {
        convert_parallel(&converter, &records)
    } else {
        converter.convert_all(&records)
    };
    report.record_errors(converter.sink().1.take());

    match result {
        Ok(outcome) => {
            std::fs::write(&output, &outcome.document)
                .context(format!("Failed to write output file: {}", output.display()))?;
            report.record_outcome(&outcome);
            report.set_output(&output);
        }
        Err(ConvertError::EmptyResult { total }) => {
            println!("Could not find any valid data in the file.");
            report.record_empty(total);
        }
        Err(e) => return Err(e.into()),
    }

    report.set_duration(start.elapsed());
    report.finalize();

    info!(
        total = report.total,
        converted = report.converted,
        skipped = report.skipped,
        "Conversion finished"
    );

    if let Some(ref path) = args.report {
        report
            .save_to_file(path)
            .context(format!("Failed to write report: {}", path.display()))?;
    }

    Ok(report)
}

#[cfg(not(feature = "proj"))]
fn convert_parallel<S: pdxcrime::ErrorSink + Sync>(
    converter: &Converter<S>,
    records: &[Record],
) -> Result<pdxcrime::ConversionOutcome, ConvertError> {
    converter.convert_all_par(records)
}

// Le contexte PROJ n'est pas partageable entre threads
#[cfg(feature = "proj")]
fn convert_parallel<S: pdxcrime::ErrorSink>(
    converter: &Converter<S>,
    records: &[Record],
) -> Result<pdxcrime::ConversionOutcome, ConvertError> {
    warn!("Parallel conversion is not available with the proj backend, converting sequentially");
    converter.convert_all(records)
}

/// Nom de sortie par défaut : `crimes.csv` → `crimes.json`
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split(".csv").next().unwrap_or_default();
    input.with_file_name(format!("{}.json", stem))
}

/// Décode le fichier source : UTF-8, sinon Windows-1252
pub fn decode_input(bytes: &[u8]) -> Cow<'_, str> {
    match simdutf8::basic::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)),
        Err(_) => {
            warn!("Input is not valid UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded
        }
    }
}

/// Lit les lignes CSV, en ignorant les `skip_rows` premières
pub fn read_records(text: &str, config: &Config) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(config.delimiter_byte()?)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate().skip(config.skip_rows) {
        let record = result.context(format!("Failed to read CSV line {}", i + 1))?;
        records.push(record.iter().map(Field::from).collect());
    }

    info!(rows = records.len(), skipped_lines = config.skip_rows, "CSV read");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("data/crime_incident_data.csv")),
            PathBuf::from("data/crime_incident_data.json")
        );
        assert_eq!(
            default_output_path(Path::new("crimes.csv.bak")),
            PathBuf::from("crimes.json")
        );
        assert_eq!(
            default_output_path(Path::new("crimes")),
            PathBuf::from("crimes.json")
        );
    }

    #[test]
    fn test_decode_utf8_with_bom() {
        let bytes = "\u{feff}Record ID,Address".as_bytes();
        assert_eq!(decode_input(bytes), "Record ID,Address");
    }

    #[test]
    fn test_decode_windows_1252() {
        let bytes = b"CAF\xc9";
        assert_eq!(decode_input(bytes), "CAF\u{c9}");
    }

    #[test]
    fn test_read_records_skips_header() {
        let text = "Record ID,Report Date\n1,12/01/2011\n2,\"07/07/2011\"\n";
        let records = read_records(text, &Config::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec![Field::from("1"), Field::from("12/01/2011")]);
        assert_eq!(records[1][1], Field::from("07/07/2011"));
    }

    #[test]
    fn test_read_records_flexible_rows() {
        let text = "a;b;c\nd\n";
        let config = Config {
            skip_rows: 0,
            delimiter: ';',
            ..Config::default()
        };
        let records = read_records(text, &config).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[1].len(), 1);
    }
}
