//! Types de données pour le crate pdxcrime

use std::fmt;

use chrono::NaiveDateTime;
use geo::Point;

/// Une cellule d'une ligne CSV
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Valeur texte (toujours le cas pour un fichier CSV)
    Text(String),
    /// Valeur numérique fournie directement par l'appelant
    Number(f64),
    /// Valeur absente
    Null,
}

/// Une ligne d'entrée, accédée par nom de colonne via `HeaderIndex`
pub type Record = Vec<Field>;

impl Field {
    /// Interprète la valeur comme un flottant (texte nettoyé des espaces)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Text(s) => fast_float::parse(s.trim()).ok(),
            Self::Number(v) => Some(*v),
            Self::Null => None,
        }
    }

    /// Interprète la valeur comme un entier
    ///
    /// Un nombre n'est accepté que s'il n'a pas de partie fractionnaire.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Number(v) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    Some(*v as i64)
                } else {
                    None
                }
            }
            Self::Null => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(v) => write!(f, "{}", v),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Field {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl<T: Into<Field>> From<Option<T>> for Field {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Rendu d'une ligne brute pour les messages d'erreur
///
/// `["13807517", "12/01/2011", 7647471.01608, null]`
pub fn render_record(record: &[Field]) -> String {
    let cells: Vec<String> = record
        .iter()
        .map(|field| match field {
            Field::Text(s) => format!("{:?}", s),
            Field::Number(v) => v.to_string(),
            Field::Null => "null".to_string(),
        })
        .collect();
    format!("[{}]", cells.join(", "))
}

/// Attributs d'un incident converti
#[derive(Debug, Clone, PartialEq)]
pub struct CrimeProperties {
    /// Type d'infraction (`Major Offense Type`)
    pub crime_type: String,
    pub address: String,
    pub neighborhood: String,
    pub police_precinct: String,
    pub police_district: i64,
    /// Date et heure du signalement, sans fuseau horaire
    pub report_time: NaiveDateTime,
}

/// Un incident converti : identifiant, position WGS84 et attributs
///
/// Immuable une fois construit.
#[derive(Debug, Clone, PartialEq)]
pub struct CrimeFeature {
    id: i64,
    location: Point<f64>,
    properties: CrimeProperties,
}

impl CrimeFeature {
    /// `location` : x = longitude, y = latitude
    pub fn new(id: i64, location: Point<f64>, properties: CrimeProperties) -> Self {
        Self {
            id,
            location,
            properties,
        }
    }

    /// Identifiant (`Record ID`)
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn location(&self) -> Point<f64> {
        self.location
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn properties(&self) -> &CrimeProperties {
        &self.properties
    }
}

/// Résultat de la conversion d'un lot de lignes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    /// FeatureCollection GeoJSON sérialisée
    pub document: String,
    /// Nombre de lignes ignorées
    pub skipped: usize,
    /// Nombre de lignes traitées
    pub total: usize,
}

impl ConversionOutcome {
    /// Nombre de lignes converties
    pub fn converted(&self) -> usize {
        self.total - self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_f64() {
        assert_eq!(Field::from("7647471.01608").as_f64(), Some(7647471.01608));
        assert_eq!(Field::from(" 688344.5 ").as_f64(), Some(688344.5));
        assert_eq!(Field::from(688344.45013).as_f64(), Some(688344.45013));
        assert_eq!(Field::from("Bad X Coordinate").as_f64(), None);
        assert_eq!(Field::from("").as_f64(), None);
        assert_eq!(Field::Null.as_f64(), None);
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(Field::from("690").as_i64(), Some(690));
        assert_eq!(Field::from(" 690 ").as_i64(), Some(690));
        assert_eq!(Field::from(690.0).as_i64(), Some(690));
        assert_eq!(Field::from(690.5).as_i64(), None);
        assert_eq!(Field::from(9_223_372_036_854_775_808.0).as_i64(), None);
        assert_eq!(Field::from(-9_223_372_036_854_775_808.0).as_i64(), None);
        assert_eq!(Field::from("690.0").as_i64(), None);
        assert_eq!(Field::from("abc").as_i64(), None);
        assert_eq!(Field::Null.as_i64(), None);
    }

    #[test]
    fn test_render_record() {
        let record = vec![
            Field::from("13807517"),
            Field::from(7647471.5),
            Field::from(None::<&str>),
        ];
        assert_eq!(render_record(&record), r#"["13807517", 7647471.5, null]"#);
    }

    #[test]
    fn test_outcome_converted() {
        let outcome = ConversionOutcome {
            document: String::new(),
            skipped: 1,
            total: 3,
        };
        assert_eq!(outcome.converted(), 2);
    }
}
