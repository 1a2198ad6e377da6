//! # pdxcrime-geojson
//!
//! Conversion des exports CSV de la criminalité de Portland en GeoJSON.
//!
//! ## Features
//!
//! - Lecture CSV (UTF-8 ou Windows-1252), ordre des colonnes configurable
//! - Reprojection EPSG:2269 → EPSG:4326
//! - Lignes invalides ignorées et comptées, rapport console ou JSON
//! - CLI simple
//!
//! ## Usage CLI
//!
//! ```bash
//! # crime_incident_data.csv → crime_incident_data.json
//! pdxcrime-geojson crime_incident_data.csv
//!
//! # Sortie explicite, conversion parallèle, rapport JSON
//! pdxcrime-geojson crimes.csv out.geojson --parallel --report report.json
//!
//! # Ordre de colonnes personnalisé
//! pdxcrime-geojson crimes.csv --config columns.json
//! ```

pub mod cli;
pub mod config;
pub mod report;

pub use config::Config;
pub use report::{ConversionReport, ConversionStatus};
