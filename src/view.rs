//! The map/grid view pipeline: region filter, viewport filter, ordering and
//! pagination.

use crate::config::Config;
use crate::proximity::{sample_near_center_with_factor, sort_by_center_distance};
use crate::region::filter_by_region;
use crate::spatial::filter_by_bbox;
use mediamap_types::bbox::BoundingBox;
use mediamap_types::resource::GeoRecord;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::SystemTime;

/// How the resources of a view are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    /// Most recently added first
    #[default]
    Newest,
    /// Nearest to the viewport center first
    Center,
    /// Random picks among the resources nearest the viewport center
    CenterRandom,
    /// Uniformly random order
    Shuffle,
    /// Most recently recorded first
    #[serde(alias = "Recorded")]
    Recorded,
}

/// What a view is asked to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewQuery {
    pub country: Option<String>,
    pub state: Option<String>,
    /// Current map viewport; `None` before the map has reported one
    pub bbox: Option<BoundingBox>,
    pub sort: SortStrategy,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    pub candidate_factor: usize,
}

impl MapViewQuery {
    /// First page with the configured sort strategy and page size.
    pub fn from_config(config: &Config) -> Self {
        Self {
            country: None,
            state: None,
            bbox: None,
            sort: config.view.sort_strategy,
            page: 1,
            page_size: config.view.page_size,
            candidate_factor: config.view.candidate_factor,
        }
    }

    pub fn with_region(mut self, country: Option<&str>, state: Option<&str>) -> Self {
        self.country = country.map(str::to_string);
        self.state = state.map(str::to_string);
        self
    }

    /// Move the viewport. The page resets to the first one.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self.page = 1;
        self
    }

    pub fn with_sort(mut self, sort: SortStrategy) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

impl Default for MapViewQuery {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// One page of a resolved view.
#[derive(Debug, Clone)]
pub struct MapViewPage<'a, R> {
    /// Resources on this page, in display order
    pub items: Vec<&'a R>,
    /// Resources matching the region filter
    pub region_count: usize,
    /// Resources matching both the region filter and the viewport
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<'a, R> MapViewPage<'a, R> {
    /// Number of pages needed for `total_count` resources.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(self.page_size)
        }
    }
}

/// Descending by timestamp, undated records last, stable otherwise.
fn newest_first<R, F>(records: &mut [&R], timestamp: F)
where
    F: Fn(&R) -> Option<SystemTime>,
{
    records.sort_by(|a, b| match (timestamp(*a), timestamp(*b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn recorded_at<R: GeoRecord>(record: &R) -> Option<SystemTime> {
    record.detail_meta().and_then(|d| d.recorded_date_time)
}

/// Order records for display.
pub fn order_records<'a, R, G>(
    mut records: Vec<&'a R>,
    sort: SortStrategy,
    bbox: Option<&BoundingBox>,
    sample_limit: usize,
    candidate_factor: usize,
    rng: &mut G,
) -> Vec<&'a R>
where
    R: GeoRecord + 'a,
    G: Rng + ?Sized,
{
    match (sort, bbox) {
        (SortStrategy::Newest, _) => {
            newest_first(&mut records, |r: &R| r.created_at());
            records
        }
        (SortStrategy::Recorded, _) => {
            newest_first(&mut records, recorded_at::<R>);
            records
        }
        (SortStrategy::Shuffle, _) => {
            records.shuffle(rng);
            records
        }
        (SortStrategy::Center, Some(bbox)) => sort_by_center_distance(records, bbox),
        (SortStrategy::CenterRandom, Some(bbox)) => {
            sample_near_center_with_factor(records, bbox, sample_limit, candidate_factor, rng)
        }
        (SortStrategy::Center | SortStrategy::CenterRandom, None) => records,
    }
}

/// Run the full view pipeline over `records`.
///
/// 1. keep records in the requested country/state,
/// 2. keep records inside the viewport (all, when there is none),
/// 3. order them by the requested strategy,
/// 4. cut out the requested page.
///
/// `CenterRandom` draws `2 * page_size` resources around the viewport center
/// before paginating, so later pages may be short or empty.
///
/// # Examples
///
/// ```rust
/// use mediamap::view::{resolve_view, MapViewQuery, SortStrategy};
/// use mediamap::{BoundingBox, DetailMeta};
///
/// let records: Vec<_> = (0..5)
///     .map(|i| {
///         DetailMeta::new(format!("r{i}"))
///             .with_location(i as f64, 0.0)
///             .with_region("Japan", "Tokyo", "Chiyoda")
///     })
///     .collect();
///
/// let mut query = MapViewQuery::default()
///     .with_region(Some("Japan"), None)
///     .with_bbox(BoundingBox::new(-0.5, -1.0, 3.5, 1.0))
///     .with_sort(SortStrategy::Center);
/// query.page_size = 2;
///
/// let page = resolve_view(&records, &query, &mut rand::rng());
/// assert_eq!(page.total_count, 4);
/// assert_eq!(page.page_count(), 2);
/// assert_eq!(page.items.len(), 2);
/// ```
pub fn resolve_view<'a, R, I, G>(records: I, query: &MapViewQuery, rng: &mut G) -> MapViewPage<'a, R>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
    G: Rng + ?Sized,
{
    let region_filtered = filter_by_region(records, query.country.as_deref(), query.state.as_deref());
    let region_count = region_filtered.len();

    let filtered = filter_by_bbox(region_filtered, query.bbox.as_ref());
    let total_count = filtered.len();

    let ordered = order_records(
        filtered,
        query.sort,
        query.bbox.as_ref(),
        query.page_size.saturating_mul(2),
        query.candidate_factor,
        rng,
    );

    let page = query.page.max(1);
    let start = (page - 1).saturating_mul(query.page_size).min(ordered.len());
    let end = start.saturating_add(query.page_size).min(ordered.len());

    log::debug!(
        "Resolved view page {} ({} of {} in viewport, {} in region)",
        page,
        end - start,
        total_count,
        region_count
    );

    MapViewPage {
        items: ordered[start..end].to_vec(),
        region_count,
        total_count,
        page,
        page_size: query.page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediamap_types::resource::{DetailMeta, Resource, ResourceKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::{Duration, UNIX_EPOCH};

    fn ids<R: GeoRecord>(records: &[&R]) -> Vec<String> {
        records.iter().map(|r| r.resource_id().to_string()).collect()
    }

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn photo(id: &str, lat: f64, created: Option<u64>) -> Resource {
        let mut r = Resource::new(id, ResourceKind::Images).with_detail(
            DetailMeta::new(id)
                .with_location(lat, 0.0)
                .with_region("Japan", "Tokyo", "Chiyoda"),
        );
        r.created_at = created.map(at);
        r
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn test_sort_strategy_serde() {
        assert_eq!(
            serde_json::to_string(&SortStrategy::CenterRandom).unwrap(),
            r#""center-random""#
        );
        let legacy: SortStrategy = serde_json::from_str(r#""Recorded""#).unwrap();
        assert_eq!(legacy, SortStrategy::Recorded);
    }

    #[test]
    fn test_newest_first_undated_last() {
        let records = vec![
            photo("old", 0.0, Some(10)),
            photo("undated", 0.0, None),
            photo("new", 0.0, Some(20)),
        ];
        let query = MapViewQuery::default();
        let page = resolve_view(&records, &query, &mut rng());
        assert_eq!(ids(&page.items), vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_recorded_descending() {
        let records = vec![
            DetailMeta::new("a").with_recorded(at(5)),
            DetailMeta::new("b"),
            DetailMeta::new("c").with_recorded(at(50)),
        ];
        let query = MapViewQuery::default().with_sort(SortStrategy::Recorded);
        let page = resolve_view(&records, &query, &mut rng());
        assert_eq!(ids(&page.items), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_region_then_bbox_counts() {
        let mut records: Vec<_> = (0..6).map(|i| photo(&format!("r{}", i), i as f64, None)).collect();
        records.push(
            Resource::new("paris", ResourceKind::Images).with_detail(
                DetailMeta::new("paris")
                    .with_location(1.0, 0.0)
                    .with_region("France", "Île-de-France", "Paris"),
            ),
        );

        let query = MapViewQuery::default()
            .with_region(Some("Japan"), None)
            .with_bbox(BoundingBox::new(0.0, -1.0, 2.0, 1.0));
        let page = resolve_view(&records, &query, &mut rng());

        assert_eq!(page.region_count, 6);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn test_center_without_bbox_keeps_order() {
        let records = vec![photo("b", 5.0, None), photo("a", 0.0, None)];
        let query = MapViewQuery::default().with_sort(SortStrategy::Center);
        let page = resolve_view(&records, &query, &mut rng());
        assert_eq!(ids(&page.items), vec!["b", "a"]);
    }

    #[test]
    fn test_center_with_bbox() {
        let records = vec![photo("far", 5.0, None), photo("near", 0.1, None)];
        let query = MapViewQuery::default()
            .with_sort(SortStrategy::Center)
            .with_bbox(BoundingBox::new(-10.0, -10.0, 10.0, 10.0));
        let page = resolve_view(&records, &query, &mut rng());
        assert_eq!(ids(&page.items), vec!["near", "far"]);
    }

    #[test]
    fn test_center_random_draws_double_page() {
        let records: Vec<_> = (0..50).map(|i| photo(&format!("r{}", i), i as f64 * 0.1, None)).collect();
        let mut query = MapViewQuery::default()
            .with_sort(SortStrategy::CenterRandom)
            .with_bbox(BoundingBox::new(-1.0, -1.0, 1.0, 1.0));
        query.page_size = 5;

        let first = resolve_view(&records, &query, &mut rng());
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.total_count, 11);

        let third = resolve_view(&records, &query.clone().with_page(3), &mut rng());
        assert!(third.items.is_empty());
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let records: Vec<_> = (0..10).map(|i| photo(&format!("r{}", i), 0.0, None)).collect();
        let query = MapViewQuery::default().with_sort(SortStrategy::Shuffle);
        let page = resolve_view(&records, &query, &mut rng());

        let mut got = ids(&page.items);
        got.sort();
        let mut want: Vec<_> = records.iter().map(|r| r.resource_id.clone()).collect();
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn test_pagination() {
        let records: Vec<_> = (0..7).map(|i| photo(&format!("r{}", i), 0.0, Some(100 - i))).collect();
        let mut query = MapViewQuery::default();
        query.page_size = 3;

        let page = resolve_view(&records, &query.clone().with_page(3), &mut rng());
        assert_eq!(ids(&page.items), vec!["r6"]);
        assert_eq!(page.page_count(), 3);

        let page_zero = resolve_view(&records, &query.clone().with_page(0), &mut rng());
        assert_eq!(page_zero.page, 1);
        assert_eq!(ids(&page_zero.items), vec!["r0", "r1", "r2"]);

        let beyond = resolve_view(&records, &query.with_page(9), &mut rng());
        assert!(beyond.items.is_empty());
    }

    #[test]
    fn test_query_from_config() {
        let config = Config::default()
            .with_page_size(12)
            .with_sort_strategy(SortStrategy::Shuffle);
        let query = MapViewQuery::from_config(&config);
        assert_eq!(query.page_size, 12);
        assert_eq!(query.sort, SortStrategy::Shuffle);
        assert_eq!(query.page, 1);
    }
}
