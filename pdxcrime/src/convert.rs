//! Conversion des lignes CSV en features GeoJSON
//!
//! - `convert_one` : une ligne → une `CrimeFeature`, échec immédiat
//! - `convert_all` : un lot → `ConversionOutcome`, les lignes invalides sont
//!   comptées et ignorées

use chrono::{NaiveDateTime, Timelike};
use geo::Point;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{ConversionError, ConvertError, ParseError};
use crate::export;
use crate::header::{Column, HeaderIndex};
use crate::reproject::Reprojector;
use crate::sink::{ErrorSink, TracingSink};
use crate::types::{render_record, ConversionOutcome, CrimeFeature, CrimeProperties, Field};

/// Format de `Report Date` + `Report Time`
pub const REPORT_DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Convertisseur de lignes de l'export de la ville de Portland
///
/// L'index des colonnes, le reprojector et le sink sont construits une fois
/// et partagés en lecture seule par toutes les lignes.
pub struct Converter<S = TracingSink> {
    headers: HeaderIndex,
    reprojector: Reprojector,
    sink: S,
}

/// Features converties d'un lot, avant sérialisation
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedBatch {
    /// Lignes converties, dans l'ordre d'entrée
    pub features: Vec<CrimeFeature>,
    pub skipped: usize,
    pub total: usize,
}

impl ConvertedBatch {
    fn from_results(results: impl IntoIterator<Item = Option<CrimeFeature>>) -> Self {
        let mut features = Vec::new();
        let mut skipped = 0;
        let mut total = 0;

        for result in results {
            total += 1;
            match result {
                Some(feature) => features.push(feature),
                None => skipped += 1,
            }
        }

        Self {
            features,
            skipped,
            total,
        }
    }

    /// Sérialise le lot en FeatureCollection
    ///
    /// # Errors
    ///
    /// `ConvertError::EmptyResult` si aucune ligne n'a été convertie.
    pub fn into_outcome(self) -> Result<ConversionOutcome, ConvertError> {
        if self.features.is_empty() {
            return Err(ConvertError::EmptyResult { total: self.total });
        }

        let document = export::collection_to_string(&self.features)?;

        debug!(
            total = self.total,
            converted = self.features.len(),
            skipped = self.skipped,
            "Batch converted"
        );

        Ok(ConversionOutcome {
            document,
            skipped: self.skipped,
            total: self.total,
        })
    }
}

impl Converter<TracingSink> {
    /// Convertisseur avec les en-têtes par défaut
    pub fn new() -> Result<Self, ConvertError> {
        Ok(Self {
            headers: HeaderIndex::default(),
            reprojector: Reprojector::new()?,
            sink: TracingSink,
        })
    }

    /// Convertisseur avec un ordre de colonnes personnalisé
    ///
    /// # Errors
    ///
    /// `ConvertError::Header` si une colonne requise manque.
    pub fn with_headers<I, T>(headers: I) -> Result<Self, ConvertError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Ok(Self {
            headers: HeaderIndex::new(headers)?,
            reprojector: Reprojector::new()?,
            sink: TracingSink,
        })
    }
}

impl<S: ErrorSink> Converter<S> {
    /// Remplace le sink des erreurs de ligne
    pub fn with_sink<T: ErrorSink>(self, sink: T) -> Converter<T> {
        Converter {
            headers: self.headers,
            reprojector: self.reprojector,
            sink,
        }
    }

    /// Remplace le reprojector
    pub fn with_reprojector(self, reprojector: Reprojector) -> Self {
        Self {
            reprojector,
            ..self
        }
    }

    pub fn headers(&self) -> &HeaderIndex {
        &self.headers
    }

    pub fn reprojector(&self) -> &Reprojector {
        &self.reprojector
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Convertit une ligne en feature
    ///
    /// L'erreur est signalée au sink avec la ligne brute avant d'être retournée.
    pub fn convert_one(&self, record: &[Field]) -> Result<CrimeFeature, ConversionError> {
        self.try_convert(record).map_err(|err| {
            self.sink.row_failed(&err);
            err
        })
    }

    fn try_convert(&self, record: &[Field]) -> Result<CrimeFeature, ConversionError> {
        self.build_feature(record)
            .map_err(|source| ConversionError::new(render_record(record), source))
    }

    /// Convertit une ligne en document GeoJSON `Feature`
    pub fn convert(&self, record: &[Field]) -> Result<String, ConvertError> {
        let feature = self.convert_one(record)?;
        Ok(export::feature_to_string(&feature)?)
    }

    /// Convertit un lot en features typées, sans sérialisation
    pub fn convert_features<I>(&self, records: I) -> ConvertedBatch
    where
        I: IntoIterator,
        I::Item: AsRef<[Field]>,
    {
        ConvertedBatch::from_results(
            records
                .into_iter()
                .map(|record| self.convert_one(record.as_ref()).ok()),
        )
    }

    /// Convertit un lot en FeatureCollection sérialisée
    ///
    /// Les lignes invalides sont comptées dans `skipped` et ignorées.
    ///
    /// # Errors
    ///
    /// `ConvertError::EmptyResult` si aucune ligne n'est valide.
    pub fn convert_all<I>(&self, records: I) -> Result<ConversionOutcome, ConvertError>
    where
        I: IntoIterator,
        I::Item: AsRef<[Field]>,
    {
        let batch = self.convert_features(records);
        if batch.skipped > 0 {
            warn!(skipped = batch.skipped, total = batch.total, "Skipped rows with bad data");
        }
        batch.into_outcome()
    }

    /// Comme `convert_all`, lignes converties en parallèle (rayon)
    ///
    /// L'ordre de sortie est celui des lignes d'entrée.
    pub fn convert_all_par<R>(&self, records: &[R]) -> Result<ConversionOutcome, ConvertError>
    where
        Self: Sync,
        R: AsRef<[Field]> + Sync,
    {
        let results: Vec<Result<CrimeFeature, ConversionError>> = records
            .par_iter()
            .map(|record| self.try_convert(record.as_ref()))
            .collect();

        // Erreurs remontées au sink dans l'ordre des lignes
        let batch = ConvertedBatch::from_results(results.into_iter().map(|result| {
            result
                .map_err(|err| self.sink.row_failed(&err))
                .ok()
        }));
        if batch.skipped > 0 {
            warn!(skipped = batch.skipped, total = batch.total, "Skipped rows with bad data");
        }
        batch.into_outcome()
    }

    fn build_feature(&self, record: &[Field]) -> Result<CrimeFeature, ParseError> {
        let x = self.float(record, Column::XCoordinate)?;
        let y = self.float(record, Column::YCoordinate)?;
        let location = self.reprojector.transform_point(Point::new(x, y))?;

        let date_string = format!(
            "{} {}",
            self.text(record, Column::ReportDate)?,
            self.text(record, Column::ReportTime)?
        );
        let report_time = parse_report_time(&date_string)?;

        let id = self.integer(record, Column::RecordId)?;
        let police_district = self.integer(record, Column::PoliceDistrict)?;

        let properties = CrimeProperties {
            crime_type: self.text(record, Column::OffenseType)?,
            address: self.text(record, Column::Address)?,
            neighborhood: self.text(record, Column::Neighborhood)?,
            police_precinct: self.text(record, Column::PolicePrecinct)?,
            police_district,
            report_time,
        };

        Ok(CrimeFeature::new(id, location, properties))
    }

    fn float(&self, record: &[Field], column: Column) -> Result<f64, ParseError> {
        let field = self.headers.field(record, column)?;
        // NaN et infinis n'ont pas de représentation JSON
        field
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidFloat {
                field: column.header(),
                value: field.to_string(),
            })
    }

    fn integer(&self, record: &[Field], column: Column) -> Result<i64, ParseError> {
        let field = self.headers.field(record, column)?;
        field.as_i64().ok_or_else(|| ParseError::InvalidInteger {
            field: column.header(),
            value: field.to_string(),
        })
    }

    fn text(&self, record: &[Field], column: Column) -> Result<String, ParseError> {
        Ok(self.headers.field(record, column)?.to_string())
    }
}

/// Parse `MM/DD/YYYY HH:MM:SS`
///
/// Zéros de tête obligatoires : la valeur doit se reformater à l'identique.
pub fn parse_report_time(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value, REPORT_DATE_FORMAT)
        .ok()
        .filter(|date| date.nanosecond() == 0)
        .filter(|date| date.format(REPORT_DATE_FORMAT).to_string() == value)
        .ok_or_else(|| ParseError::InvalidDateTime {
            value: value.to_string(),
        })
}
