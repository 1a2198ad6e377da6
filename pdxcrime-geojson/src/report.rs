//! Rapport de conversion
//!
//! Collecte les compteurs (lignes lues, converties, ignorées) et les erreurs
//! de ligne, pour affichage console ou sauvegarde JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use pdxcrime::{ConversionError, ConversionOutcome};
use serde::Serialize;

/// Nombre d'erreurs détaillées affichées sur la console
const DISPLAYED_ERRORS: usize = 20;

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConversionStatus {
    /// Toutes les lignes converties
    Success,
    /// Conversion réussie avec des lignes ignorées
    PartialSuccess,
    /// Aucune ligne valide, aucun fichier écrit
    Failed,
}

/// Ligne rejetée
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    /// Ligne brute
    pub record: String,
    /// Message d'erreur
    pub message: String,
}

impl From<ConversionError> for RowError {
    fn from(e: ConversionError) -> Self {
        Self {
            message: e.source.to_string(),
            record: e.record,
        }
    }
}

/// Rapport complet d'une conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Fichier CSV source
    pub input: String,
    /// Fichier GeoJSON écrit (absent en cas d'échec)
    pub output: Option<String>,
    /// Reprojector utilisé
    pub reprojector: String,
    /// Durée de la conversion
    pub duration_secs: f64,
    /// Statut global
    pub status: ConversionStatus,

    /// Nombre de lignes lues
    pub total: usize,
    /// Nombre de lignes converties
    pub converted: usize,
    /// Nombre de lignes ignorées
    pub skipped: usize,

    /// Lignes rejetées
    pub errors: Vec<RowError>,
}

impl ConversionReport {
    /// Crée un rapport vide pour un fichier source
    pub fn new(input: &Path, reprojector: &str) -> Self {
        Self {
            input: input.display().to_string(),
            output: None,
            reprojector: reprojector.to_string(),
            duration_secs: 0.0,
            status: ConversionStatus::Success,
            total: 0,
            converted: 0,
            skipped: 0,
            errors: Vec::new(),
        }
    }

    /// Enregistre les compteurs d'un lot converti
    pub fn record_outcome(&mut self, outcome: &ConversionOutcome) {
        self.total = outcome.total;
        self.skipped = outcome.skipped;
        self.converted = outcome.converted();
    }

    /// Enregistre un lot sans aucune ligne valide
    pub fn record_empty(&mut self, total: usize) {
        self.total = total;
        self.skipped = total;
        self.converted = 0;
    }

    /// Enregistre les erreurs de ligne
    pub fn record_errors(&mut self, errors: impl IntoIterator<Item = ConversionError>) {
        self.errors.extend(errors.into_iter().map(RowError::from));
    }

    /// Enregistre le fichier écrit
    pub fn set_output(&mut self, output: &Path) {
        self.output = Some(output.display().to_string());
    }

    /// Définit la durée de la conversion
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.converted == 0 {
            ConversionStatus::Failed
        } else if self.skipped > 0 {
            ConversionStatus::PartialSuccess
        } else {
            ConversionStatus::Success
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("CONVERSION REPORT - {}", self.input);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);
        println!("Reprojector: {}", self.reprojector);
        if let Some(ref output) = self.output {
            println!("Output: {}", output);
        }

        println!("\nResult:");
        println!("\t{} original records", self.total);
        println!("\t{} records converted", self.converted);
        println!("\t{} records skipped due to bad data", self.skipped);

        if !self.errors.is_empty() {
            println!("\n--- ERRORS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(DISPLAYED_ERRORS) {
                println!("  {} {}", e.message, e.record);
            }
            if self.errors.len() > DISPLAYED_ERRORS {
                println!("  ... and {} more", self.errors.len() - DISPLAYED_ERRORS);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} records, {} converted, {} skipped",
            self.input, self.total, self.converted, self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdxcrime::ParseError;

    fn outcome(skipped: usize, total: usize) -> ConversionOutcome {
        ConversionOutcome {
            document: String::new(),
            skipped,
            total,
        }
    }

    #[test]
    fn test_finalize_success() {
        let mut report = ConversionReport::new(Path::new("crimes.csv"), "lite");
        report.record_outcome(&outcome(0, 3));
        report.finalize();

        assert_eq!(report.status, ConversionStatus::Success);
        assert_eq!(report.converted, 3);
    }

    #[test]
    fn test_finalize_partial_success() {
        let mut report = ConversionReport::new(Path::new("crimes.csv"), "lite");
        report.record_outcome(&outcome(1, 3));
        report.finalize();

        assert_eq!(report.status, ConversionStatus::PartialSuccess);
        assert_eq!(report.converted, 2);
    }

    #[test]
    fn test_finalize_failed() {
        let mut report = ConversionReport::new(Path::new("crimes.csv"), "lite");
        report.record_empty(4);
        report.finalize();

        assert_eq!(report.status, ConversionStatus::Failed);
        assert_eq!(report.skipped, 4);
    }

    #[test]
    fn test_record_errors() {
        let mut report = ConversionReport::new(Path::new("crimes.csv"), "lite");
        report.record_errors(vec![ConversionError::new(
            r#"["1"]"#,
            ParseError::MissingField {
                field: "Report Date",
            },
        )]);

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].record, r#"["1"]"#);
        assert_eq!(report.errors[0].message, "Missing field 'Report Date'");
    }

    #[test]
    fn test_summary() {
        let mut report = ConversionReport::new(Path::new("crimes.csv"), "lite");
        report.record_outcome(&outcome(2, 10));

        let summary = report.summary();
        assert!(summary.contains("crimes.csv"));
        assert!(summary.contains("8 converted"));
        assert!(summary.contains("2 skipped"));
    }
}
