//! # pdxcrime
//!
//! Conversion des incidents de l'export CSV de la ville de Portland en GeoJSON.
//!
//! ## Features
//!
//! - Reprojection Oregon North State Plane (EPSG:2269, pieds) → WGS84 (EPSG:4326)
//! - Lambert Conique Conforme en Rust pur, ou PROJ avec le feature `proj`
//! - Accès aux colonnes par nom (ordre des colonnes configurable)
//! - Conversion par lot tolérante : les lignes invalides sont comptées et ignorées
//! - Conversion parallèle avec `rayon`, ordre de sortie préservé
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pdxcrime::{Converter, Field};
//!
//! let converter = Converter::new()?;
//! let rows: Vec<Vec<Field>> = read_rows();
//!
//! let outcome = converter.convert_all(&rows)?;
//! println!("{} converted, {} skipped", outcome.converted(), outcome.skipped);
//! std::fs::write("crimes.json", outcome.document)?;
//! ```

pub mod convert;
pub mod error;
pub mod export;
pub mod header;
pub mod reproject;
pub mod sink;
pub mod types;

pub use convert::{parse_report_time, ConvertedBatch, Converter};
pub use error::{ConversionError, ConvertError, HeaderError, ParseError, ReprojectError};
pub use header::{Column, HeaderIndex, DEFAULT_HEADERS};
pub use reproject::Reprojector;
pub use sink::{CollectingSink, ErrorSink, Tee, TracingSink};
pub use types::{ConversionOutcome, CrimeFeature, CrimeProperties, Field, Record};
