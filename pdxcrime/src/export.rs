//! Sérialisation GeoJSON des incidents convertis

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::types::CrimeFeature;

/// Format ISO-8601 de `reportTime` (précision seconde, sans fuseau)
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl From<&CrimeFeature> for Feature {
    fn from(crime: &CrimeFeature) -> Self {
        let props = crime.properties();

        let mut properties = JsonObject::new();
        properties.insert("crimeType".to_string(), JsonValue::from(props.crime_type.as_str()));
        properties.insert("address".to_string(), JsonValue::from(props.address.as_str()));
        properties.insert(
            "neighborhood".to_string(),
            JsonValue::from(props.neighborhood.as_str()),
        );
        properties.insert(
            "policePrecinct".to_string(),
            JsonValue::from(props.police_precinct.as_str()),
        );
        properties.insert(
            "policeDistrict".to_string(),
            JsonValue::from(props.police_district),
        );
        properties.insert(
            "reportTime".to_string(),
            JsonValue::from(props.report_time.format(REPORT_TIME_FORMAT).to_string()),
        );

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![
                crime.longitude(),
                crime.latitude(),
            ]))),
            id: Some(Id::Number(crime.id().into())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Construit la FeatureCollection, dans l'ordre des features
pub fn to_feature_collection(features: &[CrimeFeature]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: features.iter().map(Feature::from).collect(),
        foreign_members: None,
    }
}

/// Sérialise une feature seule
pub fn feature_to_string(feature: &CrimeFeature) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Feature::from(feature))
}

/// Sérialise une FeatureCollection
pub fn collection_to_string(features: &[CrimeFeature]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&to_feature_collection(features))
}
