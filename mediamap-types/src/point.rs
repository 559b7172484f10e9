use geo::Point;
use serde::{Deserialize, Serialize};

/// A possibly-incomplete geographic coordinate pair.
///
/// Resource metadata frequently lacks a location, or carries a half-filled
/// one. A `GeoPoint` keeps both halves optional and only yields a usable
/// [`geo::Point`] when both are present and finite.
///
/// # Examples
///
/// ```
/// use mediamap_types::point::GeoPoint;
///
/// let tokyo = GeoPoint::new(35.6895, 139.6917);
/// assert!(tokyo.is_valid());
///
/// let half = GeoPoint { latitude: Some(35.0), longitude: None };
/// assert!(!half.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
}

impl GeoPoint {
    /// Create a point with both coordinates set.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// A point with no coordinates.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Both coordinates present and finite (NaN and infinities are rejected).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lat_lng().is_some()
    }

    /// The `(latitude, longitude)` pair when valid.
    #[inline]
    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }

    /// Convert to a `geo::Point` (x = longitude, y = latitude) when valid.
    pub fn to_point(&self) -> Option<Point<f64>> {
        self.lat_lng().map(|(lat, lng)| Point::new(lng, lat))
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<(f64, f64)> for GeoPoint {
    /// Interprets the tuple as `(latitude, longitude)`.
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}
