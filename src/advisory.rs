use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::coord::{decimal_from_number, point_string, CoordError};

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("failed to read advisory feature collection: {0}")]
    Collection(#[source] serde_json::Error),
    #[error("advisory feature {0} has no geometry coordinates")]
    MissingCoordinates(String),
    #[error("unexpected polygon ring shape: {0}")]
    RingShape(#[from] serde_json::Error),
    #[error("invalid coordinate: {0}")]
    Coordinate(#[from] CoordError),
}

/// The GeoJSON `FeatureCollection` returned by the ISIGMET endpoint.
///
/// Only `features` is required. Every feature is kept verbatim apart from the
/// fields the filter and the map conversion read.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AdvisoryCollection {
    pub features: Vec<AdvisoryFeature>,
}

impl AdvisoryCollection {
    pub fn from_value(payload: Value) -> Result<Self, TransformError> {
        serde_json::from_value(payload).map_err(TransformError::Collection)
    }
}

/// One advisory, kept as the raw GeoJSON feature object.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct AdvisoryFeature(pub Map<String, Value>);

/// One polygon vertex, decoded from a GeoJSON `[longitude, latitude]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub lng: Decimal,
    pub lat: Decimal,
}

impl Position {
    fn from_pair([lng, lat]: &[Number; 2]) -> Result<Self, CoordError> {
        Ok(Self {
            lng: decimal_from_number(lng)?,
            lat: decimal_from_number(lat)?,
        })
    }

    pub fn point_string(&self) -> String {
        point_string(self.lat, self.lng)
    }
}

pub type Ring = Vec<Position>;

impl AdvisoryFeature {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.0.get("properties").and_then(|properties| properties.get(key))
    }

    pub fn fir_id(&self) -> Option<&str> {
        self.property("firId").and_then(Value::as_str)
    }

    fn describe(&self) -> String {
        match (self.fir_id(), self.property("seriesId").and_then(Value::as_str)) {
            (Some(fir), Some(series)) => format!("{fir} {series}"),
            (Some(fir), None) => fir.to_string(),
            _ => "<unnamed>".to_string(),
        }
    }

    /// Decodes `geometry.coordinates`, one [`Ring`] per polygon, in source order.
    pub fn rings(&self) -> Result<Vec<Ring>, TransformError> {
        let coordinates = self
            .0
            .get("geometry")
            .and_then(|geometry| geometry.get("coordinates"))
            .ok_or_else(|| TransformError::MissingCoordinates(self.describe()))?;

        Vec::<Vec<[Number; 2]>>::deserialize(coordinates)?
            .iter()
            .map(|ring| {
                ring.iter()
                    .map(Position::from_pair)
                    .collect::<Result<Ring, _>>()
                    .map_err(TransformError::from)
            })
            .collect()
    }
}

pub fn filter_by_fir(features: Vec<AdvisoryFeature>, fir_id: &str) -> Vec<AdvisoryFeature> {
    features
        .into_iter()
        .filter(|feature| feature.fir_id() == Some(fir_id))
        .collect()
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use pretty_assertions_sorted::assert_eq_sorted;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{filter_by_fir, AdvisoryCollection, AdvisoryFeature, Position, TransformError};

    fn feature(value: serde_json::Value) -> AdvisoryFeature {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_filter_by_fir() {
        let kzak = json!({
            "type": "Feature",
            "id": 7,
            "properties": {"firId": "KZAK", "hazard": "TS", "seriesId": "ALPHA 3"},
            "geometry": {"type": "Polygon", "coordinates": [[[-150.1, 20.5], [-149.0, 21.0]]]}
        });
        let collection = AdvisoryCollection::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                kzak.clone(),
                {"type": "Feature", "properties": {"firId": "OTHER"}, "geometry": null},
                {"type": "Feature", "properties": {"hazard": "TURB"}, "geometry": null},
            ]
        }))
        .unwrap();

        let filtered = filter_by_fir(collection.features, "KZAK");

        assert_eq!(filtered.len(), 1);
        assert_eq_sorted!(serde_json::to_value(&filtered[0]).unwrap(), kzak);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let features = vec![
            feature(json!({"properties": {"firId": "kzak"}})),
            feature(json!({"properties": {"firId": "KZAK "}})),
            feature(json!({"properties": null})),
            feature(json!({})),
        ];

        assert!(filter_by_fir(features, "KZAK").is_empty());
    }

    #[test]
    fn test_filter_keeps_order() {
        let features = vec![
            feature(json!({"properties": {"firId": "KZAK", "seriesId": "A"}})),
            feature(json!({"properties": {"firId": "PAZA", "seriesId": "B"}})),
            feature(json!({"properties": {"firId": "KZAK", "seriesId": "C"}})),
        ];

        let series = filter_by_fir(features, "KZAK")
            .iter()
            .map(|feature| feature.property("seriesId").cloned())
            .collect::<Vec<_>>();

        assert_eq!(series, vec![Some(json!("A")), Some(json!("C"))]);
    }

    #[test]
    fn test_missing_features_key() {
        let result = AdvisoryCollection::from_value(json!({"type": "FeatureCollection"}));

        assert!(matches!(result, Err(TransformError::Collection(_))));
    }

    #[test]
    fn test_rings() {
        let feature = feature(json!({
            "properties": {"firId": "KZAK"},
            "geometry": {"coordinates": [
                [[-122.5, 37.0], [-122.0, 37.5]],
                [[170, -5.25]]
            ]}
        }));

        let rings = feature.rings().unwrap();

        let dec = |s| Decimal::from_str(s).unwrap();
        assert_eq!(
            rings,
            vec![
                vec![
                    Position {
                        lng: dec("-122.5"),
                        lat: dec("37.0"),
                    },
                    Position {
                        lng: dec("-122.0"),
                        lat: dec("37.5"),
                    },
                ],
                vec![Position {
                    lng: dec("170"),
                    lat: dec("-5.25"),
                }],
            ]
        );
        assert_eq!(rings[0][0].point_string(), "+37.000-122.500");
    }

    #[test]
    fn test_rings_errors() {
        let no_geometry = feature(json!({"properties": {"firId": "KZAK", "seriesId": "B 1"}}));
        let err = no_geometry.rings().unwrap_err();
        assert!(matches!(err, TransformError::MissingCoordinates(ref name) if name == "KZAK B 1"));

        let three_d = feature(json!({"geometry": {"coordinates": [[[1.0, 2.0, 3.0]]]}}));
        assert!(matches!(three_d.rings(), Err(TransformError::RingShape(_))));

        let flat = feature(json!({"geometry": {"coordinates": [[1.0, 2.0]]}}));
        assert!(matches!(flat.rings(), Err(TransformError::RingShape(_))));
    }
}
