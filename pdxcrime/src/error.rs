//! Types d'erreurs pour le crate pdxcrime

use thiserror::Error;

/// Erreur sur un champ d'une ligne
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Colonne absente de la ligne (ligne trop courte)
    #[error("Missing field '{field}'")]
    MissingField { field: &'static str },

    /// Coordonnée non numérique
    #[error("Invalid float in '{field}': {value:?}")]
    InvalidFloat { field: &'static str, value: String },

    /// Entier invalide (identifiant, district)
    #[error("Invalid integer in '{field}': {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    /// Date/heure ne respectant pas `MM/DD/YYYY HH:MM:SS`
    #[error("Could not parse date {value:?}")]
    InvalidDateTime { value: String },

    /// Échec de la reprojection (backend PROJ)
    #[error("Reprojection failed: {0}")]
    Reprojection(String),
}

/// Échec de conversion d'une ligne, avec la ligne brute pour le diagnostic
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{source} for row: {record}")]
pub struct ConversionError {
    /// Ligne brute fautive
    pub record: String,
    /// Cause
    pub source: ParseError,
}

impl ConversionError {
    pub fn new(record: impl Into<String>, source: ParseError) -> Self {
        Self {
            record: record.into(),
            source,
        }
    }
}

/// Colonne requise absente de la liste d'en-têtes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Erreurs de reprojection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReprojectError {
    /// Création de la projection impossible
    #[error("Failed to create projection from EPSG:{source_epsg} to EPSG:{target_epsg}: {reason}")]
    Create {
        source_epsg: u32,
        target_epsg: u32,
        reason: String,
    },

    /// Transformation d'une coordonnée impossible
    #[error("Coordinate transformation failed for ({x}, {y}): {reason}")]
    Transform { x: f64, y: f64, reason: String },
}

/// Erreurs au niveau du convertisseur ou du lot
#[derive(Debug, Error)]
pub enum ConvertError {
    /// En-têtes invalides
    #[error(transparent)]
    Header(#[from] HeaderError),

    /// Reprojector indisponible
    #[error(transparent)]
    Reproject(#[from] ReprojectError),

    /// Ligne invalide (conversion d'une seule ligne)
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Aucune ligne convertie
    #[error("No valid Features found in data ({total} rows)")]
    EmptyResult { total: usize },

    /// Échec de sérialisation GeoJSON
    #[error("GeoJSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ReprojectError> for ParseError {
    fn from(e: ReprojectError) -> Self {
        Self::Reprojection(e.to_string())
    }
}
