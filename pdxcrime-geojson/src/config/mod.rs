//! Configuration de la lecture du CSV

use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};
use pdxcrime::DEFAULT_HEADERS;

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// En-têtes des colonnes, dans l'ordre du fichier
    #[serde(default = "default_headers")]
    pub headers: Vec<String>,

    /// Nombre de lignes à ignorer en début de fichier (ligne d'en-tête)
    #[serde(default = "default_skip_rows")]
    pub skip_rows: usize,

    /// Séparateur de colonnes (ASCII)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_headers() -> Vec<String> {
    DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect()
}

fn default_skip_rows() -> usize {
    1
}

fn default_delimiter() -> char {
    ','
}

impl Default for Config {
    fn default() -> Self {
        Self {
            headers: default_headers(),
            skip_rows: default_skip_rows(),
            delimiter: default_delimiter(),
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "default" => Self::parse(include_str!("presets/default.json"))
                .context("Failed to parse embedded config"),
            _ => anyhow::bail!("Unknown preset: {}. Use: default", preset),
        }
    }

    /// Nom de preset ou chemin vers un fichier JSON
    pub fn load_spec(spec: &str) -> Result<Self> {
        let path = Path::new(spec);
        if path.extension().map_or(false, |ext| ext == "json") || path.exists() {
            Self::load(path)
        } else {
            Self::from_preset(spec)
        }
    }

    /// Séparateur sous forme d'octet, pour le lecteur CSV
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| anyhow::anyhow!("Delimiter must be ASCII, got {:?}", self.delimiter))
    }

    fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
