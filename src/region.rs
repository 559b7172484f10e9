//! Grouping and filtering of records by administrative region.
//!
//! The map drills down World → Country → State. At each level records are
//! bucketed by the next administrative field (country, then state, then
//! city); records outside the active filter land in the [`UNKNOWN_REGION`]
//! bucket.

use mediamap_types::resource::{DetailMeta, GeoRecord};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket key for missing administrative fields and for records that do not
/// match the active country/state.
pub const UNKNOWN_REGION: &str = "Unknown";

/// The zoom level a region map is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    /// Group by country
    World,
    /// Group by state within the active country
    Country,
    /// Group by city within the active state
    State,
}

impl RegionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionType::World => "world",
            RegionType::Country => "country",
            RegionType::State => "state",
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "world" => Ok(RegionType::World),
            "country" => Ok(RegionType::Country),
            "state" => Ok(RegionType::State),
            other => Err(format!("Unknown region type: {}", other)),
        }
    }
}

/// Records bucketed by region name.
///
/// Buckets iterate in the order their key was first seen; records inside a
/// bucket keep their input order.
#[derive(Debug, Clone)]
pub struct RegionGroups<'a, R> {
    buckets: Vec<(String, Vec<&'a R>)>,
    index: FxHashMap<String, usize>,
}

impl<'a, R> Default for RegionGroups<'a, R> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<'a, R> RegionGroups<'a, R> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, key: &str, record: &'a R) {
        match self.index.get(key) {
            Some(&slot) => self.buckets[slot].1.push(record),
            None => {
                self.index.insert(key.to_string(), self.buckets.len());
                self.buckets.push((key.to_string(), vec![record]));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[&'a R]> {
        self.index
            .get(key)
            .map(|&slot| self.buckets[slot].1.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a R])> {
        self.buckets
            .iter()
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of grouped records across all buckets.
    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn into_vec(self) -> Vec<(String, Vec<&'a R>)> {
        self.buckets
    }
}

fn field_or_unknown(value: Option<&String>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v.as_str(),
        _ => UNKNOWN_REGION,
    }
}

fn active(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.is_empty())
}

/// Bucket key for one record's detail metadata at the given level.
fn group_key<'d>(
    detail: &'d DetailMeta,
    region_type: RegionType,
    active_country: Option<&str>,
    active_state: Option<&str>,
) -> &'d str {
    let country = field_or_unknown(detail.country.as_ref());
    let state = field_or_unknown(detail.state.as_ref());
    let city = field_or_unknown(detail.city.as_ref());

    match region_type {
        RegionType::World => country,
        RegionType::Country => match active(active_country) {
            Some(filter) if filter == country => state,
            _ => UNKNOWN_REGION,
        },
        RegionType::State => match active(active_state) {
            Some(filter) if filter == state => city,
            _ => UNKNOWN_REGION,
        },
    }
}

/// Bucket records by region for the given zoom level.
///
/// - `World`: by country.
/// - `Country`: by state, for records in `active_country`; others go to
///   `"Unknown"`.
/// - `State`: by city, for records in `active_state`; others go to
///   `"Unknown"`.
///
/// Records without detail metadata are skipped. Missing or empty
/// country/state/city values count as `"Unknown"`.
///
/// # Examples
///
/// ```rust
/// use mediamap::region::{group_by_region, RegionType};
/// use mediamap::DetailMeta;
///
/// let records = vec![
///     DetailMeta::new("a").with_region("Japan", "Kyoto", "Gion"),
///     DetailMeta::new("b").with_region("Japan", "Osaka", "Kita"),
///     DetailMeta::new("c").with_region("France", "Île-de-France", "Paris"),
/// ];
///
/// let groups = group_by_region(&records, RegionType::World, None, None);
/// assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["Japan", "France"]);
/// assert_eq!(groups.get("Japan").unwrap().len(), 2);
/// ```
pub fn group_by_region<'a, R, I>(
    records: I,
    region_type: RegionType,
    active_country: Option<&str>,
    active_state: Option<&str>,
) -> RegionGroups<'a, R>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut groups = RegionGroups::new();
    for record in records {
        let Some(detail) = record.detail_meta() else {
            continue;
        };
        let key = group_key(detail, region_type, active_country, active_state);
        groups.push(key, record);
    }
    groups
}

/// Like [`group_by_region`], taking the level as its route name.
///
/// An unrecognized level groups nothing and returns an empty result rather
/// than an error, so newer zoom levels degrade to an empty map.
pub fn group_by_region_name<'a, R, I>(
    records: I,
    region_type: &str,
    active_country: Option<&str>,
    active_state: Option<&str>,
) -> RegionGroups<'a, R>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    match region_type.parse::<RegionType>() {
        Ok(region_type) => group_by_region(records, region_type, active_country, active_state),
        Err(e) => {
            log::debug!("{}; no records grouped", e);
            RegionGroups::new()
        }
    }
}

/// Keep records matching the given country and state exactly.
///
/// A `None` or empty filter matches everything. When any filter is active,
/// records without detail metadata are dropped.
pub fn filter_by_region<'a, R, I>(
    records: I,
    country: Option<&str>,
    state: Option<&str>,
) -> Vec<&'a R>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let country = active(country);
    let state = active(state);

    records
        .into_iter()
        .filter(|record| {
            let detail = record.detail_meta();
            field_matches(country, detail.and_then(|d| d.country.as_deref()))
                && field_matches(state, detail.and_then(|d| d.state.as_deref()))
        })
        .collect()
}

fn field_matches(filter: Option<&str>, value: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(wanted) => value == Some(wanted),
    }
}
