//! Index des colonnes : nom d'en-tête → position dans la ligne

use std::collections::HashMap;

use crate::error::{HeaderError, ParseError};
use crate::types::Field;

/// En-têtes par défaut de l'export CSV de la ville de Portland
pub const DEFAULT_HEADERS: [&str; 10] = [
    "Record ID",
    "Report Date",
    "Report Time",
    "Major Offense Type",
    "Address",
    "Neighborhood",
    "Police Precinct",
    "Police District",
    "X Coordinate",
    "Y Coordinate",
];

/// Colonnes lues par le convertisseur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    RecordId,
    ReportDate,
    ReportTime,
    OffenseType,
    Address,
    Neighborhood,
    PolicePrecinct,
    PoliceDistrict,
    XCoordinate,
    YCoordinate,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::RecordId,
        Column::ReportDate,
        Column::ReportTime,
        Column::OffenseType,
        Column::Address,
        Column::Neighborhood,
        Column::PolicePrecinct,
        Column::PoliceDistrict,
        Column::XCoordinate,
        Column::YCoordinate,
    ];

    /// Nom d'en-tête de la colonne dans l'export
    pub fn header(self) -> &'static str {
        DEFAULT_HEADERS[self as usize]
    }
}

/// Table immuable nom d'en-tête → position
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
    /// Positions résolues des colonnes requises, indexées par `Column`
    required: [usize; 10],
}

impl HeaderIndex {
    /// Construit l'index depuis une liste ordonnée d'en-têtes
    ///
    /// En cas de doublon, la dernière occurrence l'emporte. Les colonnes
    /// inconnues sont acceptées et ignorées.
    ///
    /// # Errors
    ///
    /// `HeaderError::MissingColumn` si une colonne requise est absente.
    pub fn new<I, S>(headers: I) -> Result<Self, HeaderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let positions: HashMap<String, usize> = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| (h.into(), i))
            .collect();

        let mut required = [0; 10];
        for column in Column::ALL {
            required[column as usize] = *positions
                .get(column.header())
                .ok_or_else(|| HeaderError::MissingColumn(column.header().to_string()))?;
        }

        Ok(Self {
            positions,
            required,
        })
    }

    /// Position d'une colonne requise
    pub fn position(&self, column: Column) -> usize {
        self.required[column as usize]
    }

    /// Position d'une colonne quelconque par son nom
    pub fn get(&self, header: &str) -> Option<usize> {
        self.positions.get(header).copied()
    }

    /// Nombre de colonnes connues
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Lit la valeur d'une colonne dans une ligne
    pub fn field<'r>(&self, record: &'r [Field], column: Column) -> Result<&'r Field, ParseError> {
        record
            .get(self.position(column))
            .ok_or(ParseError::MissingField {
                field: column.header(),
            })
    }
}

impl Default for HeaderIndex {
    fn default() -> Self {
        let positions = DEFAULT_HEADERS
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_string(), i))
            .collect();

        Self {
            positions,
            required: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        }
    }
}
