//! GeoJSON export of resources as map markers.

use crate::Result;
use crate::region::UNKNOWN_REGION;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use mediamap_types::resource::GeoRecord;
use serde_json::json;

/// Point feature for one record, or `None` without valid coordinates.
///
/// Properties carry `resourceId`, `title`, `country`, `state` and `city`;
/// missing region fields are reported as `"Unknown"`.
pub fn to_feature<R: GeoRecord + ?Sized>(record: &R) -> Option<Feature> {
    let detail = record.detail_meta()?;
    let (lat, lng) = detail.geo_point().lat_lng()?;

    let region = |field: &Option<String>| match field.as_deref() {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNKNOWN_REGION.to_string(),
    };

    let mut properties = JsonObject::new();
    properties.insert("resourceId".to_string(), json!(record.resource_id()));
    properties.insert("title".to_string(), json!(detail.title));
    properties.insert("country".to_string(), json!(region(&detail.country)));
    properties.insert("state".to_string(), json!(region(&detail.state)));
    properties.insert("city".to_string(), json!(region(&detail.city)));

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry {
            bbox: None,
            value: Value::Point(vec![lng, lat]),
            foreign_members: None,
        }),
        id: Some(Id::String(record.resource_id().to_string())),
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Marker collection for all located records, in input order.
pub fn to_feature_collection<'a, R, I>(records: I) -> FeatureCollection
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let features: Vec<Feature> = records.into_iter().filter_map(to_feature).collect();
    log::debug!("Built {} map markers", features.len());

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Serialized marker collection.
pub fn to_geojson_string<'a, R, I>(records: I) -> Result<String>
where
    R: GeoRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    Ok(serde_json::to_string(&to_feature_collection(records))?)
}
