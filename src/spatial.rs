//! Coordinate validation, bounding-box membership and radius search.
//!
//! These are the gates every other module runs records through before doing
//! any distance math: a record either has a usable point or it is silently
//! left out.

use crate::error::{MediamapError, Result};
use mediamap_types::bbox::BoundingBox;
use mediamap_types::point::GeoPoint;
use mediamap_types::resource::GeoRecord;

/// Check that both coordinates are present and finite.
///
/// # Examples
///
/// ```rust
/// use mediamap::spatial::is_valid_coordinate;
///
/// assert!(is_valid_coordinate(Some(35.0), Some(139.0)));
/// assert!(!is_valid_coordinate(Some(f64::NAN), Some(139.0)));
/// assert!(!is_valid_coordinate(None, Some(139.0)));
/// ```
#[inline]
pub fn is_valid_coordinate(latitude: Option<f64>, longitude: Option<f64>) -> bool {
    GeoPoint {
        latitude,
        longitude,
    }
    .is_valid()
}

/// Check whether a point lies inside a bounding box, edges included.
///
/// Handles boxes crossing the antimeridian (`min_lng > max_lng`), which cover
/// `[min_lng, 180]` and `[-180, max_lng]`. Invalid points are never inside.
///
/// # Examples
///
/// ```rust
/// use mediamap::spatial::point_within_bbox;
/// use mediamap::{BoundingBox, GeoPoint};
///
/// let bbox = BoundingBox::new(-10.0, 170.0, 10.0, -170.0);
/// assert!(point_within_bbox(&GeoPoint::new(0.0, 175.0), &bbox));
/// assert!(!point_within_bbox(&GeoPoint::new(0.0, 0.0), &bbox));
/// ```
#[inline]
pub fn point_within_bbox(point: &GeoPoint, bbox: &BoundingBox) -> bool {
    bbox.contains(point)
}

/// Check whether a record's detail coordinates lie inside a bounding box.
///
/// Records without detail metadata or with missing/non-finite coordinates
/// return `false`.
pub fn is_within_bbox<R: GeoRecord + ?Sized>(record: &R, bbox: &BoundingBox) -> bool {
    point_within_bbox(&record.geo_point(), bbox)
}

/// Keep the records inside `bbox`, in input order.
///
/// With no box every record is kept.
///
/// # Examples
///
/// ```rust
/// use mediamap::spatial::filter_by_bbox;
/// use mediamap::{BoundingBox, DetailMeta};
///
/// let records = vec![
///     DetailMeta::new("kyoto").with_location(35.01, 135.76),
///     DetailMeta::new("paris").with_location(48.85, 2.35),
/// ];
/// let japan = BoundingBox::new(24.0, 122.0, 46.0, 146.0);
///
/// let inside = filter_by_bbox(&records, Some(&japan));
/// assert_eq!(inside.len(), 1);
/// assert_eq!(inside[0].resource_id, "kyoto");
/// assert_eq!(filter_by_bbox(&records, None).len(), 2);
/// ```
pub fn filter_by_bbox<'a, R, I>(records: I, bbox: Option<&BoundingBox>) -> Vec<&'a R>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    match bbox {
        Some(bbox) => records
            .into_iter()
            .filter(|record| is_within_bbox(*record, bbox))
            .collect(),
        None => records.into_iter().collect(),
    }
}

/// Create a bounding box, validating its edges.
///
/// Longitudes may be given with `min_lng > max_lng` to describe a box that
/// wraps the antimeridian; only the latitude order is enforced.
///
/// # Errors
///
/// Returns an error if any edge is non-finite or `min_lat > max_lat`.
///
/// # Examples
///
/// ```rust
/// use mediamap::spatial::bounding_box;
///
/// assert!(bounding_box(-10.0, 170.0, 10.0, -170.0).is_ok());
/// assert!(bounding_box(10.0, 0.0, -10.0, 1.0).is_err());
/// ```
pub fn bounding_box(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Result<BoundingBox> {
    for (name, value) in [
        ("min_lat", min_lat),
        ("min_lng", min_lng),
        ("max_lat", max_lat),
        ("max_lng", max_lng),
    ] {
        if !value.is_finite() {
            return Err(MediamapError::InvalidInput(format!(
                "{} must be finite, got: {}",
                name, value
            )));
        }
    }

    if min_lat > max_lat {
        return Err(MediamapError::InvalidInput(format!(
            "min_lat ({}) must be <= max_lat ({})",
            min_lat, max_lat
        )));
    }

    Ok(BoundingBox::new(min_lat, min_lng, max_lat, max_lng))
}

/// Great-circle distance in kilometres.
pub fn haversine_km(from: &geo::Point<f64>, to: &geo::Point<f64>) -> f64 {
    use geo::Distance;
    geo::Haversine.distance(*from, *to) / 1000.0
}

/// Search radius used by map zoom-to-nearby when none is given.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 1.0;

/// Mean Earth radius used by `geo::Haversine`, in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Box covering every point within `radius_km` of `(lat, lng)`.
///
/// `None` when the circle reaches a pole, in which case every longitude
/// qualifies and only the exact distance test applies.
fn radius_bounds(lat: f64, lng: f64, radius_km: f64) -> Option<BoundingBox> {
    let angular = radius_km / EARTH_RADIUS_KM;
    let lat_delta = angular.to_degrees() * (1.0 + 1e-9);
    if lat.abs() + lat_delta >= 90.0 {
        return None;
    }

    let ratio = angular.sin() / lat.to_radians().cos();
    if ratio >= 1.0 {
        return None;
    }
    let lng_delta = ratio.asin().to_degrees() * (1.0 + 1e-9);

    let wrap = |value: f64| (value + 180.0).rem_euclid(360.0) - 180.0;
    Some(BoundingBox::new(
        lat - lat_delta,
        wrap(lng - lng_delta),
        lat + lat_delta,
        wrap(lng + lng_delta),
    ))
}

/// Records within `radius_km` (great-circle, inclusive) of `center`.
///
/// Candidates are first narrowed with a bounding box around the circle, then
/// checked by haversine distance. Records sitting exactly on the center and
/// records without valid coordinates are left out. Input order is kept.
/// An invalid center or a negative/non-finite radius yields nothing.
///
/// # Examples
///
/// ```rust
/// use mediamap::spatial::nearby_records;
/// use mediamap::{DetailMeta, GeoPoint};
///
/// let tokyo_station = GeoPoint::new(35.6812, 139.7671);
/// let records = vec![
///     DetailMeta::new("station").with_location(35.6812, 139.7671),
///     DetailMeta::new("ginza").with_location(35.6717, 139.7650),
///     DetailMeta::new("shinjuku").with_location(35.6896, 139.7006),
/// ];
///
/// let nearby = nearby_records(&records, &tokyo_station, 1.5);
/// assert_eq!(nearby.len(), 1);
/// assert_eq!(nearby[0].resource_id, "ginza");
/// ```
pub fn nearby_records<'a, R, I>(records: I, center: &GeoPoint, radius_km: f64) -> Vec<&'a R>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let Some((lat, lng)) = center.lat_lng() else {
        return Vec::new();
    };
    if !radius_km.is_finite() || radius_km < 0.0 {
        log::debug!("Ignoring nearby search with radius {} km", radius_km);
        return Vec::new();
    }

    let origin = geo::Point::new(lng, lat);
    let bounds = radius_bounds(lat, lng, radius_km);

    records
        .into_iter()
        .filter(|record| {
            let point = record.geo_point();
            let Some((p_lat, p_lng)) = point.lat_lng() else {
                return false;
            };
            if p_lat == lat && p_lng == lng {
                return false;
            }
            if let Some(bounds) = &bounds
                && !bounds.contains(&point)
            {
                return false;
            }
            haversine_km(&origin, &geo::Point::new(p_lng, p_lat)) <= radius_km
        })
        .collect()
}
