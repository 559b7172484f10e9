//! Ordering and sampling records by closeness to a bounding box's center.
//!
//! Distances here are planar, in degrees: the center is the arithmetic
//! midpoint of the box edges and the distance is `hypot(Δlat, Δlng)`. That is
//! only an approximation of ground distance, but it is what the map views sort
//! by at the zoom levels they use.

use mediamap_types::bbox::BoundingBox;
use mediamap_types::point::GeoPoint;
use mediamap_types::resource::GeoRecord;
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Ordering;

/// Nearest candidates considered per requested sample.
pub const DEFAULT_CANDIDATE_FACTOR: usize = 2;

/// Planar distance (degrees) from a point to the box center.
///
/// Returns `None` when the point has no valid coordinates.
///
/// # Examples
///
/// ```rust
/// use mediamap::proximity::center_distance;
/// use mediamap::{BoundingBox, GeoPoint};
///
/// let bbox = BoundingBox::new(-10.0, -10.0, 10.0, 10.0);
/// assert_eq!(center_distance(&GeoPoint::new(3.0, 4.0), &bbox), Some(5.0));
/// assert_eq!(center_distance(&GeoPoint::unset(), &bbox), None);
/// ```
pub fn center_distance(point: &GeoPoint, bbox: &BoundingBox) -> Option<f64> {
    let (lat, lng) = point.lat_lng()?;
    let center = bbox.center();
    Some((lat - center.y()).hypot(lng - center.x()))
}

fn by_distance(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Sort records by distance to the box center, nearest first.
///
/// The sort is stable. Records without valid coordinates are placed after
/// every located record, in their input order.
///
/// # Examples
///
/// ```rust
/// use mediamap::proximity::sort_by_center_distance;
/// use mediamap::{BoundingBox, DetailMeta};
///
/// let records = vec![
///     DetailMeta::new("far").with_location(9.0, 9.0),
///     DetailMeta::new("nowhere"),
///     DetailMeta::new("near").with_location(0.5, 0.5),
/// ];
/// let bbox = BoundingBox::new(-10.0, -10.0, 10.0, 10.0);
///
/// let sorted = sort_by_center_distance(&records, &bbox);
/// let ids: Vec<_> = sorted.iter().map(|r| r.resource_id.as_str()).collect();
/// assert_eq!(ids, vec!["near", "far", "nowhere"]);
/// ```
pub fn sort_by_center_distance<'a, R, I>(records: I, bbox: &BoundingBox) -> Vec<&'a R>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut keyed: Vec<(Option<f64>, &'a R)> = records
        .into_iter()
        .map(|record| (center_distance(&record.geo_point(), bbox), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => by_distance(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Randomly pick up to `limit` records from those nearest the box center.
///
/// Located records are ranked by center distance, the nearest
/// `candidate_factor * limit` are shuffled with `rng`, and the first `limit`
/// of the shuffle are returned. Records without valid coordinates are never
/// returned.
pub fn sample_near_center_with_factor<'a, R, I, G>(
    records: I,
    bbox: &BoundingBox,
    limit: usize,
    candidate_factor: usize,
    rng: &mut G,
) -> Vec<&'a R>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
    G: Rng + ?Sized,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(f64, &'a R)> = records
        .into_iter()
        .filter_map(|record| center_distance(&record.geo_point(), bbox).map(|d| (d, record)))
        .collect();

    candidates.sort_by(|(a, _), (b, _)| by_distance(a, b));
    candidates.truncate(limit.saturating_mul(candidate_factor.max(1)));
    candidates.shuffle(rng);

    candidates
        .into_iter()
        .take(limit)
        .map(|(_, record)| record)
        .collect()
}

/// Randomly pick up to `limit` records among the `2 * limit` nearest the box
/// center, using the given random source.
///
/// # Examples
///
/// ```rust
/// use mediamap::proximity::sample_near_center_with;
/// use mediamap::{BoundingBox, DetailMeta};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let records: Vec<_> = (0..10)
///     .map(|i| DetailMeta::new(format!("r{i}")).with_location(i as f64, i as f64))
///     .collect();
/// let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let picked = sample_near_center_with(&records, &bbox, 3, &mut rng);
/// assert_eq!(picked.len(), 3);
/// // Only the six nearest records are candidates.
/// assert!(picked.iter().all(|r| r.latitude.unwrap() < 6.0));
/// ```
pub fn sample_near_center_with<'a, R, I, G>(
    records: I,
    bbox: &BoundingBox,
    limit: usize,
    rng: &mut G,
) -> Vec<&'a R>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
    G: Rng + ?Sized,
{
    sample_near_center_with_factor(records, bbox, limit, DEFAULT_CANDIDATE_FACTOR, rng)
}

/// [`sample_near_center_with`] using the thread-local random source.
pub fn sample_near_center<'a, R, I>(records: I, bbox: &BoundingBox, limit: usize) -> Vec<&'a R>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    sample_near_center_with(records, bbox, limit, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediamap_types::resource::DetailMeta;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn grid(n: usize) -> Vec<DetailMeta> {
        (0..n)
            .map(|i| DetailMeta::new(format!("r{}", i)).with_location(i as f64, 0.0))
            .collect()
    }

    fn ids(records: &[&DetailMeta]) -> Vec<String> {
        records.iter().map(|r| r.resource_id.clone()).collect()
    }

    #[test]
    fn test_center_distance_uses_midpoint() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 20.0);
        let d = center_distance(&GeoPoint::new(5.0, 10.0), &bbox).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_sort_ascending() {
        let records = vec![
            DetailMeta::new("c").with_location(3.0, 0.0),
            DetailMeta::new("a").with_location(1.0, 0.0),
            DetailMeta::new("b").with_location(-2.0, 0.0),
        ];
        let bbox = BoundingBox::new(-10.0, -10.0, 10.0, 10.0);
        assert_eq!(ids(&sort_by_center_distance(&records, &bbox)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let records = vec![
            DetailMeta::new("east").with_location(0.0, 1.0),
            DetailMeta::new("north").with_location(1.0, 0.0),
            DetailMeta::new("west").with_location(0.0, -1.0),
        ];
        let bbox = BoundingBox::new(-10.0, -10.0, 10.0, 10.0);
        assert_eq!(
            ids(&sort_by_center_distance(&records, &bbox)),
            vec!["east", "north", "west"]
        );
    }

    #[test]
    fn test_sort_invalid_last_in_input_order() {
        let records = vec![
            DetailMeta::new("x1"),
            DetailMeta::new("far").with_location(5.0, 5.0),
            DetailMeta::new("x2").with_location(f64::NAN, 0.0),
            DetailMeta::new("near").with_location(0.0, 0.0),
        ];
        let bbox = BoundingBox::new(-10.0, -10.0, 10.0, 10.0);
        assert_eq!(
            ids(&sort_by_center_distance(&records, &bbox)),
            vec!["near", "far", "x1", "x2"]
        );
    }

    #[test]
    fn test_sort_idempotent() {
        let mut records = grid(8);
        records.reverse();
        records.push(DetailMeta::new("unplaced"));
        let bbox = BoundingBox::new(2.0, -1.0, 4.0, 1.0);

        let once = sort_by_center_distance(&records, &bbox);
        let twice = sort_by_center_distance(once.iter().copied(), &bbox);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_sample_returns_distinct_members() {
        let records = grid(10);
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(42);

        let sample = sample_near_center_with(&records, &bbox, 3, &mut rng);
        assert_eq!(sample.len(), 3);

        let unique: HashSet<_> = sample.iter().map(|r| r.resource_id.clone()).collect();
        assert_eq!(unique.len(), 3);
        for r in &sample {
            assert!(records.iter().any(|orig| std::ptr::eq(orig, *r)));
        }
    }

    #[test]
    fn test_sample_draws_from_nearest_candidates() {
        let records = grid(20);
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sample = sample_near_center_with(&records, &bbox, 4, &mut rng);
            assert!(sample.iter().all(|r| r.latitude.unwrap() < 8.0));
        }
    }

    #[test]
    fn test_sample_varies_across_seeds() {
        let records = grid(20);
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);

        let distinct: HashSet<Vec<String>> = (0..20)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                ids(&sample_near_center_with(&records, &bbox, 3, &mut rng))
            })
            .collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn test_sample_limit_larger_than_input() {
        let mut records = grid(4);
        records.push(DetailMeta::new("unplaced"));
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);

        let sample = sample_near_center(&records, &bbox, 10);
        assert_eq!(sample.len(), 4);
        assert!(sample.iter().all(|r| r.resource_id != "unplaced"));
    }

    #[test]
    fn test_sample_excludes_nan() {
        let records = vec![
            DetailMeta::new("nan").with_location(f64::NAN, 0.0),
            DetailMeta::new("ok").with_location(0.0, 0.0),
        ];
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
        let sample = sample_near_center(&records, &bbox, 5);
        assert_eq!(ids(&sample), vec!["ok"]);
    }

    #[test]
    fn test_sample_zero_limit() {
        let records = grid(3);
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
        assert!(sample_near_center(&records, &bbox, 0).is_empty());
    }

    #[test]
    fn test_sample_same_seed_same_result() {
        let records = grid(30);
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
        let a = sample_near_center_with(&records, &bbox, 5, &mut StdRng::seed_from_u64(9));
        let b = sample_near_center_with(&records, &bbox, 5, &mut StdRng::seed_from_u64(9));
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn test_sample_custom_factor() {
        let records = grid(30);
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(3);
        let sample = sample_near_center_with_factor(&records, &bbox, 3, 1, &mut rng);
        let mut got = ids(&sample);
        got.sort();
        assert_eq!(got, vec!["r0", "r1", "r2"]);
    }
}
