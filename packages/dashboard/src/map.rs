//! Map composition and click hit-testing.
//!
//! Joins state boundaries to their per-state means for the choropleth,
//! turns geo-joined cities into circle markers, and tags every feature
//! with the [`Interaction`] a click on it produces.

use std::collections::BTreeMap;

use geo::{Distance as _, Haversine, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, feature::Id};
use housing_map_dashboard_models::Interaction;
use housing_map_dashboard_models::config::MapConfig;
use housing_map_dashboard_models::map::{
    ChoroplethLayer, INTERACTION_PROPERTY, Legend, MapArtifact, MarkerLayer, MarkerStyle,
    TileLayer, TileTheme,
};
use housing_map_geography::BoundaryPolygon;
use housing_map_geography_models::NAME_PROPERTY;
use housing_map_housing::geo_join::CityGeoRecord;
use housing_map_housing_models::{
    COL_DAYS_ON_MARKET, COL_DENSITY, COL_POPULATION, COL_REGION_NAME, COL_STATE_CODE,
    StateAggregate,
};
use housing_map_spatial::StateIndex;

/// Six-class `PuBuGn` colour scale, lightest first.
pub const PUBUGN: [&str; 6] = [
    "#f6eff7", "#d0d1e6", "#a6bddb", "#67a9cf", "#1c9099", "#016c59",
];

/// Feature property holding the polygon fill colour.
pub const FILL_COLOR_PROPERTY: &str = "fillColor";

/// Feature property holding the circle radius in metres.
pub const RADIUS_PROPERTY: &str = "radius";

const LEGEND_NAME: &str = "Day On Market";
const MARKER_LAYER_NAME: &str = "Cities";
const CHOROPLETH_LAYER_NAME: &str = "choropleth";

/// Builds the full interactive map for one date.
#[must_use]
pub fn compose_map(
    config: &MapConfig,
    boundaries: &[BoundaryPolygon],
    states: &[StateAggregate],
    cities: &[CityGeoRecord],
) -> MapArtifact {
    MapArtifact {
        center: config.center,
        zoom: config.zoom,
        scroll_wheel_zoom: false,
        width: config.width,
        height: config.height,
        tile_layers: vec![
            TileLayer {
                theme: TileTheme::DarkMatter,
                name: "dark mode".to_string(),
                control: true,
            },
            TileLayer {
                theme: TileTheme::Positron,
                name: "light mode".to_string(),
                control: true,
            },
        ],
        layer_control_collapsed: true,
        choropleth: choropleth_layer(boundaries, states),
        markers: marker_layer(cities, config.marker_radius_scale),
    }
}

/// Tooltip text of a state polygon.
#[must_use]
pub fn state_label(days_on_market: Option<f64>) -> String {
    days_on_market.map_or_else(
        || "State Avg DaysOnMarket: no data".to_string(),
        |v| format!("State Avg DaysOnMarket: {v:.2}"),
    )
}

/// Linear colour bins between the smallest and largest state mean.
struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    fn from_states(states: &[StateAggregate]) -> Option<Self> {
        let values = states.iter().filter_map(|s| s.days_on_market);
        let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, v| {
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        })?;
        Some(Self { min, max })
    }

    #[allow(clippy::cast_precision_loss)]
    fn thresholds(&self) -> Vec<f64> {
        let step = (self.max - self.min) / PUBUGN.len() as f64;
        (0..=PUBUGN.len())
            .map(|i| self.min + step * i as f64)
            .collect()
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn color(&self, value: f64) -> &'static str {
        let span = self.max - self.min;
        let bin = if span > 0.0 {
            (((value - self.min) / span) * PUBUGN.len() as f64).floor() as usize
        } else {
            0
        };
        PUBUGN[bin.min(PUBUGN.len() - 1)]
    }
}

fn choropleth_layer(boundaries: &[BoundaryPolygon], states: &[StateAggregate]) -> ChoroplethLayer {
    let by_code: BTreeMap<&str, &StateAggregate> =
        states.iter().map(|s| (s.state_code.as_str(), s)).collect();
    let scale = ColorScale::from_states(states);

    let features = boundaries
        .iter()
        .map(|boundary| {
            let days_on_market = by_code
                .get(boundary.id.as_str())
                .and_then(|s| s.days_on_market);
            if days_on_market.is_none() {
                log::debug!("No days-on-market data for boundary {}", boundary.id);
            }

            let fill = match (&scale, days_on_market) {
                (Some(scale), Some(v)) => JsonValue::from(scale.color(v)),
                _ => JsonValue::Null,
            };

            let mut properties = JsonObject::new();
            properties.insert(NAME_PROPERTY.to_string(), boundary.name.clone().into());
            properties.insert(
                COL_DAYS_ON_MARKET.to_string(),
                state_label(days_on_market).into(),
            );
            properties.insert(FILL_COLOR_PROPERTY.to_string(), fill);
            properties.insert(
                INTERACTION_PROPERTY.to_string(),
                interaction_value(&Interaction::PolygonClick {
                    name: boundary.name.clone(),
                }),
            );

            Feature {
                bbox: None,
                geometry: Some(Geometry::new((&boundary.geometry).into())),
                id: Some(Id::String(boundary.id.clone())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let legend = Legend {
        name: LEGEND_NAME.to_string(),
        thresholds: scale.as_ref().map(ColorScale::thresholds).unwrap_or_default(),
        colors: PUBUGN.iter().map(ToString::to_string).collect(),
    };

    ChoroplethLayer {
        name: CHOROPLETH_LAYER_NAME.to_string(),
        features: collection(features),
        fill_opacity: 0.7,
        line_opacity: 0.2,
        tooltip_fields: vec![NAME_PROPERTY.to_string(), COL_DAYS_ON_MARKET.to_string()],
        legend,
    }
}

fn marker_layer(cities: &[CityGeoRecord], radius_scale: f64) -> MarkerLayer {
    let features = cities
        .iter()
        .map(|city| {
            let mut properties = JsonObject::new();
            properties.insert(COL_REGION_NAME.to_string(), city.region_name.clone().into());
            properties.insert(COL_STATE_CODE.to_string(), city.state_code.clone().into());
            properties.insert(COL_POPULATION.to_string(), city.population.into());
            properties.insert(COL_DENSITY.to_string(), city.density.into());
            properties.insert(COL_DAYS_ON_MARKET.to_string(), city.days_on_market.into());
            properties.insert(
                RADIUS_PROPERTY.to_string(),
                marker_radius(city.days_on_market, radius_scale).into(),
            );
            properties.insert(
                INTERACTION_PROPERTY.to_string(),
                interaction_value(&Interaction::CityClick {
                    region_name: city.region_name.clone(),
                    state_code: city.state_code.clone(),
                }),
            );

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::Point(vec![
                    city.location.x(),
                    city.location.y(),
                ]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let fields: Vec<String> = [COL_REGION_NAME, COL_POPULATION, COL_DENSITY, COL_DAYS_ON_MARKET]
        .iter()
        .map(ToString::to_string)
        .collect();

    MarkerLayer {
        name: MARKER_LAYER_NAME.to_string(),
        features: collection(features),
        style: MarkerStyle {
            fill_color: "orange".to_string(),
            fill_opacity: 0.4,
            color: "black".to_string(),
            weight: 1.0,
            highlight_fill_opacity: 0.8,
        },
        tooltip_fields: fields.clone(),
        popup_fields: fields,
        zoom_on_click: false,
    }
}

/// Circle radius in metres for a city's days on market.
#[must_use]
pub fn marker_radius(days_on_market: f64, radius_scale: f64) -> f64 {
    days_on_market * radius_scale
}

fn interaction_value(interaction: &Interaction) -> JsonValue {
    serde_json::to_value(interaction).unwrap_or_default()
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Resolves a clicked coordinate to the feature drawn on top there.
///
/// City markers sit above the state polygons, so a click inside a marker
/// circle selects the city; otherwise the containing state is selected.
pub struct MapHitTester<'a> {
    cities: &'a [CityGeoRecord],
    states: StateIndex,
    radius_scale: f64,
}

impl<'a> MapHitTester<'a> {
    /// Indexes the boundaries and markers of the current run.
    #[must_use]
    pub fn new(
        cities: &'a [CityGeoRecord],
        boundaries: &[BoundaryPolygon],
        radius_scale: f64,
    ) -> Self {
        let states = StateIndex::new(boundaries);
        if states.is_empty() {
            log::warn!("No state boundaries to hit-test against");
        } else {
            log::debug!(
                "Hit-testing {} markers and {} states",
                cities.len(),
                states.len()
            );
        }

        Self {
            cities,
            states,
            radius_scale,
        }
    }

    /// The interaction a click at `(lng, lat)` produces.
    #[must_use]
    pub fn interaction_at(&self, lng: f64, lat: f64) -> Interaction {
        let clicked = Point::new(lng, lat);

        let nearest_marker = self
            .cities
            .iter()
            .map(|city| (city, Haversine.distance(city.location, clicked)))
            .filter(|(city, distance)| {
                *distance <= marker_radius(city.days_on_market, self.radius_scale)
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b));

        if let Some((city, _)) = nearest_marker {
            return Interaction::CityClick {
                region_name: city.region_name.clone(),
                state_code: city.state_code.clone(),
            };
        }

        self.states
            .lookup_state(lng, lat)
            .map_or(Interaction::None, |hit| Interaction::PolygonClick {
                name: hit.name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use geo::{LineString, MultiPolygon, Polygon};

    use super::*;

    fn config() -> MapConfig {
        MapConfig {
            center: [38.0, -102.0],
            zoom: 4,
            marker_radius_scale: 400.0,
            width: 700,
            height: 450,
        }
    }

    fn square(id: &str, name: &str, min: (f64, f64), max: (f64, f64)) -> BoundaryPolygon {
        let ring = LineString::from(vec![
            (min.0, min.1),
            (max.0, min.1),
            (max.0, max.1),
            (min.0, max.1),
            (min.0, min.1),
        ]);
        BoundaryPolygon {
            id: id.to_string(),
            name: name.to_string(),
            geometry: MultiPolygon(vec![Polygon::new(ring, vec![])]),
        }
    }

    fn aggregate(code: &str, dom: Option<f64>) -> StateAggregate {
        StateAggregate {
            state_code: code.to_string(),
            days_on_market: dom,
            population: Some(1.0),
            density: Some(1.0),
        }
    }

    fn city(name: &str, code: &str, lng: f64, lat: f64, dom: f64) -> CityGeoRecord {
        CityGeoRecord {
            region_name: name.to_string(),
            state_code: code.to_string(),
            population: 1000.0,
            density: 10.0,
            location: Point::new(lng, lat),
            days_on_market: dom,
        }
    }

    fn boundaries() -> Vec<BoundaryPolygon> {
        vec![
            square("CO", "Colorado", (-109.0, 37.0), (-102.0, 41.0)),
            square("KS", "Kansas", (-102.0, 37.0), (-94.6, 40.0)),
            square("NE", "Nebraska", (-104.0, 40.0), (-95.3, 43.0)),
        ]
    }

    fn property<'a>(feature: &'a Feature, key: &str) -> &'a JsonValue {
        feature.property(key).unwrap()
    }

    #[test]
    fn choropleth_attaches_two_decimal_label() {
        let map = compose_map(
            &config(),
            &boundaries(),
            &[aggregate("CO", Some(15.0)), aggregate("KS", Some(30.456))],
            &[],
        );

        let features = &map.choropleth.features.features;
        assert_eq!(features.len(), 3);
        assert_eq!(
            property(&features[0], COL_DAYS_ON_MARKET),
            "State Avg DaysOnMarket: 15.00"
        );
        assert_eq!(
            property(&features[1], COL_DAYS_ON_MARKET),
            "State Avg DaysOnMarket: 30.46"
        );
        assert_eq!(property(&features[0], NAME_PROPERTY), "Colorado");
        assert_eq!(
            property(&features[0], INTERACTION_PROPERTY),
            &serde_json::json!({"kind": "polygon_click", "name": "Colorado"})
        );
    }

    #[test]
    fn boundary_without_aggregate_renders_no_data() {
        let map = compose_map(&config(), &boundaries(), &[aggregate("CO", Some(15.0))], &[]);

        let nebraska = &map.choropleth.features.features[2];
        assert_eq!(
            property(nebraska, COL_DAYS_ON_MARKET),
            "State Avg DaysOnMarket: no data"
        );
        assert!(property(nebraska, FILL_COLOR_PROPERTY).is_null());
    }

    #[test]
    fn fill_colors_span_the_scale() {
        let map = compose_map(
            &config(),
            &boundaries(),
            &[
                aggregate("CO", Some(10.0)),
                aggregate("KS", Some(70.0)),
                aggregate("NE", Some(40.0)),
            ],
            &[],
        );

        let features = &map.choropleth.features.features;
        assert_eq!(property(&features[0], FILL_COLOR_PROPERTY), PUBUGN[0]);
        assert_eq!(property(&features[1], FILL_COLOR_PROPERTY), PUBUGN[5]);
        assert_eq!(property(&features[2], FILL_COLOR_PROPERTY), PUBUGN[3]);
        assert_eq!(map.choropleth.legend.thresholds.len(), PUBUGN.len() + 1);
        assert!((map.choropleth.legend.thresholds[0] - 10.0).abs() < f64::EPSILON);
        assert!((map.choropleth.legend.thresholds[6] - 70.0).abs() < 1e-9);
    }

    #[test]
    fn marker_radius_scales_with_metric() {
        let map = compose_map(
            &config(),
            &[],
            &[],
            &[city("Denver", "CO", -104.99, 39.74, 25.0)],
        );

        let marker = &map.markers.features.features[0];
        assert_eq!(property(marker, RADIUS_PROPERTY).as_f64(), Some(10_000.0));
        assert_eq!(property(marker, COL_REGION_NAME), "Denver");
        assert_eq!(
            property(marker, INTERACTION_PROPERTY),
            &serde_json::json!({"kind": "city_click", "regionName": "Denver", "stateCode": "CO"})
        );
        assert_eq!(
            marker.geometry.as_ref().map(|g| g.value.clone()),
            Some(geojson::Value::Point(vec![-104.99, 39.74]))
        );
    }

    #[test]
    fn map_layout_defaults() {
        let map = compose_map(&config(), &[], &[], &[]);
        assert_eq!(map.center, [38.0, -102.0]);
        assert_eq!(map.zoom, 4);
        assert!(!map.scroll_wheel_zoom);
        assert_eq!(map.tile_layers.len(), 2);
        assert!(map.choropleth.legend.thresholds.is_empty());
    }

    #[test]
    fn hit_test_prefers_markers_over_polygons() {
        let cities = vec![city("Denver", "CO", -104.99, 39.74, 25.0)];
        let boundaries = boundaries();
        let tester = MapHitTester::new(&cities, &boundaries, 400.0);

        // ~1.1 km away, inside the 10 km circle.
        assert_eq!(
            tester.interaction_at(-104.99, 39.75),
            Interaction::CityClick {
                region_name: "Denver".to_string(),
                state_code: "CO".to_string(),
            }
        );
        assert_eq!(
            tester.interaction_at(-106.0, 38.5),
            Interaction::PolygonClick {
                name: "Colorado".to_string()
            }
        );
        assert_eq!(tester.interaction_at(0.0, 0.0), Interaction::None);
    }
}
