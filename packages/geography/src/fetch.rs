//! Boundary collection reader.
//!
//! Fetches a standard `GeoJSON` `FeatureCollection` either over HTTP or
//! from disk and converts each feature into a [`BoundaryPolygon`].

use geo::MultiPolygon;
use geojson::{Feature, GeoJson, feature::Id};
use housing_map_geography_models::{BoundarySource, NAME_PROPERTY};

use crate::{BoundaryPolygon, GeoError};

/// Reads the boundary collection described by `source`.
///
/// # Errors
///
/// Returns [`GeoError`] if the request fails, the server answers with a
/// non-success status, the file cannot be read, or the body is not a
/// `GeoJSON` `FeatureCollection`.
pub async fn fetch_boundaries(
    client: &reqwest::Client,
    source: &BoundarySource,
) -> Result<Vec<BoundaryPolygon>, GeoError> {
    log::info!("Fetching state boundaries from {source}");

    let body = match source {
        BoundarySource::Url { url } => {
            let resp = client.get(url).send().await?.error_for_status()?;
            resp.text().await?
        }
        BoundarySource::File { path } => tokio::fs::read_to_string(path).await?,
    };

    log::debug!("Read {} bytes of boundary GeoJSON", body.len());

    let boundaries = parse_boundaries(&body)?;
    log::info!("Loaded {} state boundaries", boundaries.len());
    Ok(boundaries)
}

/// Parses a `GeoJSON` `FeatureCollection` body into boundary polygons.
///
/// Features without an id or without a polygonal geometry are skipped.
///
/// # Errors
///
/// Returns [`GeoError`] if the body is not valid `GeoJSON` or is not a
/// `FeatureCollection`.
pub fn parse_boundaries(body: &str) -> Result<Vec<BoundaryPolygon>, GeoError> {
    let GeoJson::FeatureCollection(collection) = body.parse::<GeoJson>()? else {
        return Err(GeoError::Conversion {
            message: "Boundary GeoJSON is not a FeatureCollection".to_string(),
        });
    };

    Ok(collection
        .features
        .into_iter()
        .filter_map(boundary_from_feature)
        .collect())
}

fn boundary_from_feature(feature: Feature) -> Option<BoundaryPolygon> {
    let id = match &feature.id {
        Some(Id::String(s)) => s.clone(),
        Some(Id::Number(n)) => n.to_string(),
        None => {
            log::warn!("Skipping boundary feature without an id");
            return None;
        }
    };

    let name = feature
        .property(NAME_PROPERTY)
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| id.clone(), str::to_string);

    let Some(geometry) = feature.geometry.and_then(to_multipolygon) else {
        log::warn!("Skipping boundary {id}: missing or non-polygonal geometry");
        return None;
    };

    Some(BoundaryPolygon { id, name, geometry })
}

/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "id": "CO",
          "properties": { "name": "Colorado" },
          "geometry": {
            "type": "Polygon",
            "coordinates": [[[-109.0, 41.0], [-102.0, 41.0], [-102.0, 37.0], [-109.0, 37.0], [-109.0, 41.0]]]
          }
        },
        {
          "type": "Feature",
          "id": "HI",
          "properties": {},
          "geometry": {
            "type": "MultiPolygon",
            "coordinates": [
              [[[-155.0, 19.0], [-154.8, 19.5], [-155.5, 20.0], [-155.0, 19.0]]],
              [[[-156.0, 20.5], [-156.2, 20.9], [-156.6, 20.8], [-156.0, 20.5]]]
            ]
          }
        },
        {
          "type": "Feature",
          "properties": { "name": "No id" },
          "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
        },
        {
          "type": "Feature",
          "id": "XX",
          "properties": { "name": "Pointy" },
          "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
        }
      ]
    }"#;

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let boundaries = parse_boundaries(STATES).unwrap();

        assert_eq!(boundaries.len(), 2);
        assert_eq!(boundaries[0].id, "CO");
        assert_eq!(boundaries[0].name, "Colorado");
        assert_eq!(boundaries[0].geometry.0.len(), 1);
        assert_eq!(boundaries[1].id, "HI");
        assert_eq!(boundaries[1].name, "HI", "name falls back to the id");
        assert_eq!(boundaries[1].geometry.0.len(), 2);
    }

    #[test]
    fn rejects_non_collection() {
        let err = parse_boundaries(r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#).unwrap_err();
        assert!(matches!(err, GeoError::Conversion { .. }));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(parse_boundaries("not json").is_err());
    }

    #[tokio::test]
    async fn reads_file_source() {
        let path = std::env::temp_dir().join(format!(
            "housing_map_boundaries_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, STATES).unwrap();

        let source = BoundarySource::File {
            path: path.to_string_lossy().into_owned(),
        };
        let boundaries = fetch_boundaries(&reqwest::Client::new(), &source)
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(boundaries.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_fatal() {
        let source = BoundarySource::File {
            path: "/definitely/not/here/states.json".to_string(),
        };
        let err = fetch_boundaries(&reqwest::Client::new(), &source)
            .await
            .unwrap_err();
        assert!(matches!(err, GeoError::Io(_)));
    }
}
