#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! In-memory spatial index over state boundaries.
//!
//! Builds an R-tree of the state polygons fetched for the current run and
//! answers "which state contains this point" for map click hit-testing.

use geo::{BoundingRect, Contains, MultiPolygon};
use housing_map_geography::BoundaryPolygon;
use rstar::{AABB, RTree, RTreeObject};

/// A boundary polygon stored in the R-tree with its metadata.
struct StateEntry {
    id: String,
    name: String,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl RTreeObject for StateEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// The state a point fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHit<'a> {
    /// State code (`feature.id`).
    pub id: &'a str,
    /// Display name.
    pub name: &'a str,
}

/// R-tree of state outlines.
pub struct StateIndex {
    states: RTree<StateEntry>,
}

impl StateIndex {
    /// Builds the index from the boundaries of the current run.
    #[must_use]
    pub fn new(boundaries: &[BoundaryPolygon]) -> Self {
        let entries: Vec<StateEntry> = boundaries
            .iter()
            .map(|b| StateEntry {
                id: b.id.clone(),
                name: b.name.clone(),
                envelope: compute_envelope(&b.geometry),
                polygon: b.geometry.clone(),
            })
            .collect();

        let states = RTree::bulk_load(entries);
        log::debug!("Loaded {} state boundaries into spatial index", states.size());

        Self { states }
    }

    /// Look up the state containing a point.
    ///
    /// States do not overlap, so first match wins.
    #[must_use]
    pub fn lookup_state(&self, lng: f64, lat: f64) -> Option<StateHit<'_>> {
        let point = geo::Point::new(lng, lat);
        let query_env = AABB::from_point([lng, lat]);

        self.states
            .locate_in_envelope_intersecting(&query_env)
            .find(|entry| entry.polygon.contains(&point))
            .map(|entry| StateHit {
                id: &entry.id,
                name: &entry.name,
            })
    }

    /// Number of indexed states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.size()
    }

    /// Whether the index holds no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute the bounding box envelope for a [`MultiPolygon`].
fn compute_envelope(mp: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}

#[cfg(test)]
mod tests {
    use geo::{LineString, Polygon};

    use super::*;

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

    #[test]
    fn finds_containing_state() {
        let index = StateIndex::new(&[
            square("CO", "Colorado", (-109.0, 37.0), (-102.0, 41.0)),
            square("KS", "Kansas", (-102.0, 37.0), (-94.6, 40.0)),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(
            index.lookup_state(-105.0, 39.7),
            Some(StateHit {
                id: "CO",
                name: "Colorado"
            })
        );
        assert_eq!(index.lookup_state(-97.3, 37.7).map(|h| h.id), Some("KS"));
    }

    #[test]
    fn point_outside_every_state_misses() {
        let index = StateIndex::new(&[square("CO", "Colorado", (-109.0, 37.0), (-102.0, 41.0))]);
        assert_eq!(index.lookup_state(0.0, 0.0), None);
    }

    #[test]
    fn empty_index() {
        let index = StateIndex::new(&[]);
        assert!(index.is_empty());
        assert_eq!(index.lookup_state(-105.0, 39.7), None);
    }
}
