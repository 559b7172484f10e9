//! Time-ordered travel paths built from geo-tagged resources.
//!
//! Each located, dated resource becomes one point of the path. Points are
//! ordered by recording time and annotated with the heading and average speed
//! of the leg they belong to.

use crate::spatial::haversine_km;
use geo::{Bearing, Haversine, Point};
use mediamap_types::resource::GeoRecord;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

const UNTITLED: &str = "Untitled";

/// One stop on a trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub lat: f64,
    pub lng: f64,
    pub recorded_at: SystemTime,
    pub resource_id: String,
    /// Position of the resource in the input sequence
    pub resource_index: usize,
    pub title: String,
    /// Initial great-circle bearing of the leg, degrees clockwise from north
    pub direction: Option<f64>,
    /// Average speed over the leg in km/h
    pub speed: Option<f64>,
}

impl TrajectoryPoint {
    /// As a `geo::Point` (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

/// Bearing from `from` to `to` in degrees, normalized to `[0, 360)`.
pub fn bearing(from: &TrajectoryPoint, to: &TrajectoryPoint) -> f64 {
    Haversine.bearing(from.point(), to.point()).rem_euclid(360.0)
}

/// Average speed from `from` to `to` in km/h.
///
/// Zero when the second point is not strictly later than the first.
pub fn speed_kmh(from: &TrajectoryPoint, to: &TrajectoryPoint) -> f64 {
    let hours = match to.recorded_at.duration_since(from.recorded_at) {
        Ok(elapsed) => elapsed.as_secs_f64() / 3600.0,
        Err(_) => 0.0,
    };
    if hours > 0.0 {
        haversine_km(&from.point(), &to.point()) / hours
    } else {
        0.0
    }
}

/// Build a trajectory from records, oldest first.
///
/// Records missing valid coordinates or a recording time are skipped. With
/// two or more points, every point is annotated with the leg ending at it;
/// the first point borrows the leg to the second. A lone point carries no
/// direction or speed.
///
/// # Examples
///
/// ```rust
/// use mediamap::trajectory::build_trajectory;
/// use mediamap::DetailMeta;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let start = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
/// let records = vec![
///     DetailMeta::new("osaka")
///         .with_location(34.6937, 135.5023)
///         .with_recorded(start + Duration::from_secs(3600)),
///     DetailMeta::new("kyoto")
///         .with_location(35.0116, 135.7681)
///         .with_recorded(start),
/// ];
///
/// let path = build_trajectory(&records);
/// assert_eq!(path[0].resource_id, "kyoto");
/// assert_eq!(path[1].resource_id, "osaka");
/// // Heading roughly south-west
/// let heading = path[1].direction.unwrap();
/// assert!(heading > 180.0 && heading < 270.0);
/// ```
pub fn build_trajectory<'a, R, I>(records: I) -> Vec<TrajectoryPoint>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut points: Vec<TrajectoryPoint> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let detail = record.detail_meta()?;
            let (lat, lng) = detail.geo_point().lat_lng()?;
            let recorded_at = detail.recorded_date_time?;
            Some(TrajectoryPoint {
                lat,
                lng,
                recorded_at,
                resource_id: record.resource_id().to_string(),
                resource_index: index,
                title: detail.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
                direction: None,
                speed: None,
            })
        })
        .collect();

    points.sort_by_key(|p| p.recorded_at);
    enrich(&mut points);
    points
}

/// Fill in direction and speed for each point.
pub fn enrich(points: &mut [TrajectoryPoint]) {
    if points.len() < 2 {
        return;
    }

    let legs: Vec<(f64, f64)> = (0..points.len())
        .map(|i| {
            let (from, to) = if i == 0 {
                (&points[0], &points[1])
            } else {
                (&points[i - 1], &points[i])
            };
            (bearing(from, to), speed_kmh(from, to))
        })
        .collect();

    for (point, (direction, speed)) in points.iter_mut().zip(legs) {
        point.direction = Some(direction);
        point.speed = Some(speed);
    }
}
