use crate::point::GeoPoint;
use geo::Point;
use serde::{Deserialize, Serialize};

/// A latitude/longitude box, typically the visible map viewport.
///
/// Unlike an axis-aligned `geo::Rect`, the longitude range is allowed to
/// wrap: when `min_lng > max_lng` the box spans the ±180° meridian and covers
/// `[min_lng, 180]` together with `[-180, max_lng]`.
///
/// `min_lat <= max_lat` is a precondition the caller upholds; it is not
/// checked here.
///
/// # Examples
///
/// ```
/// use mediamap_types::bbox::BoundingBox;
/// use mediamap_types::point::GeoPoint;
///
/// let pacific = BoundingBox::new(-10.0, 170.0, 10.0, -170.0);
/// assert!(pacific.contains(&GeoPoint::new(0.0, 175.0)));
/// assert!(pacific.contains(&GeoPoint::new(0.0, -175.0)));
/// assert!(!pacific.contains(&GeoPoint::new(0.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Southern edge
    pub min_lat: f64,
    /// Western edge
    pub min_lng: f64,
    /// Northern edge
    pub max_lat: f64,
    /// Eastern edge
    pub max_lng: f64,
}

impl BoundingBox {
    /// Create a box from its south-west and north-east corners.
    ///
    /// # Arguments
    ///
    /// * `min_lat` - Southern edge
    /// * `min_lng` - Western edge
    /// * `max_lat` - Northern edge
    /// * `max_lng` - Eastern edge (smaller than `min_lng` for a wrapping box)
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
        }
    }

    /// Whether the box wraps across the antimeridian.
    #[inline]
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lng > self.max_lng
    }

    /// All edges finite and `min_lat <= max_lat`.
    pub fn is_well_formed(&self) -> bool {
        [self.min_lat, self.min_lng, self.max_lat, self.max_lng]
            .iter()
            .all(|v| v.is_finite())
            && self.min_lat <= self.max_lat
    }

    /// Planar midpoint of the edges (x = longitude, y = latitude).
    ///
    /// This is the arithmetic mean of the raw edge values, so for a wrapping
    /// box it lands on the far side of the globe. Callers sorting by distance
    /// to this center rely on that exact value.
    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.min_lng + self.max_lng) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    #[inline]
    fn lat_in_range(&self, lat: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat
    }

    #[inline]
    fn lng_in_range(&self, lng: f64) -> bool {
        if self.crosses_antimeridian() {
            lng >= self.min_lng || lng <= self.max_lng
        } else {
            lng >= self.min_lng && lng <= self.max_lng
        }
    }

    /// Inclusive membership test on all four edges.
    ///
    /// Points with a missing or non-finite coordinate are never contained.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        match point.lat_lng() {
            Some((lat, lng)) => self.lat_in_range(lat) && self.lng_in_range(lng),
            None => false,
        }
    }
}
