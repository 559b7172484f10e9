use crate::point::GeoPoint;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// The media kinds a library can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Books,
    Documents,
    #[default]
    Images,
    Music,
    Videos,
}

/// Per-resource descriptive metadata, including where it was recorded.
///
/// Every field apart from the id is optional; the storage API returns
/// `null` for anything the user never filled in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailMeta {
    pub resource_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub storage_location: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub recorded_date_time: Option<SystemTime>,
}

impl DetailMeta {
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set country, state and city in one go.
    pub fn with_region(
        mut self,
        country: impl Into<String>,
        state: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.country = Some(country.into());
        self.state = Some(state.into());
        self.city = Some(city.into());
        self
    }

    pub fn with_recorded(mut self, recorded: SystemTime) -> Self {
        self.recorded_date_time = Some(recorded);
        self
    }

    /// The recorded coordinates, valid or not.
    pub fn geo_point(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// A media resource as returned by the storage API.
///
/// Timestamps travel as RFC 3339 strings, see [`crate::timestamp`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub resource_id: String,
    #[serde(default)]
    pub resource_kind: ResourceKind,
    #[serde(default, with = "crate::timestamp")]
    pub created_at: Option<SystemTime>,
    #[serde(default, with = "crate::timestamp")]
    pub updated_at: Option<SystemTime>,
    #[serde(default)]
    pub detail_meta: Option<DetailMeta>,
}

impl Resource {
    pub fn new(resource_id: impl Into<String>, resource_kind: ResourceKind) -> Self {
        Self {
            resource_id: resource_id.into(),
            resource_kind,
            created_at: None,
            updated_at: None,
            detail_meta: None,
        }
    }

    /// Attach detail metadata. The detail's id is aligned with the resource's.
    pub fn with_detail(mut self, mut detail: DetailMeta) -> Self {
        detail.resource_id.clone_from(&self.resource_id);
        self.detail_meta = Some(detail);
        self
    }

    pub fn with_created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Read-only view of a record the geo algorithms can work with.
///
/// Implemented for [`Resource`] and [`DetailMeta`]; callers with their own
/// record types implement it to reuse the grouping and proximity functions
/// without converting.
pub trait GeoRecord {
    fn resource_id(&self) -> &str;

    fn detail_meta(&self) -> Option<&DetailMeta>;

    fn created_at(&self) -> Option<SystemTime> {
        None
    }

    /// Coordinates from the detail metadata, unset when there is none.
    fn geo_point(&self) -> GeoPoint {
        self.detail_meta()
            .map(DetailMeta::geo_point)
            .unwrap_or_default()
    }
}

impl GeoRecord for Resource {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn detail_meta(&self) -> Option<&DetailMeta> {
        self.detail_meta.as_ref()
    }

    fn created_at(&self) -> Option<SystemTime> {
        self.created_at
    }
}

impl GeoRecord for DetailMeta {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn detail_meta(&self) -> Option<&DetailMeta> {
        Some(self)
    }
}

impl<T: GeoRecord + ?Sized> GeoRecord for &T {
    fn resource_id(&self) -> &str {
        (**self).resource_id()
    }

    fn detail_meta(&self) -> Option<&DetailMeta> {
        (**self).detail_meta()
    }

    fn created_at(&self) -> Option<SystemTime> {
        (**self).created_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_resource_without_detail_has_no_point() {
        let r = Resource::new("r1", ResourceKind::Images);
        assert!(!r.geo_point().is_valid());
    }

    #[test]
    fn test_with_detail_aligns_id() {
        let r = Resource::new("r1", ResourceKind::Images)
            .with_detail(DetailMeta::new("other").with_location(1.0, 2.0));
        assert_eq!(r.detail_meta().unwrap().resource_id, "r1");
        assert_eq!(r.geo_point(), GeoPoint::new(1.0, 2.0));
    }

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "resourceId": "abc",
            "resourceKind": "videos",
            "detailMeta": {
                "resourceId": "abc",
                "title": "Harbour",
                "country": "Japan",
                "state": null,
                "latitude": 34.69,
                "longitude": 135.19
            }
        }"#;
        let r: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(r.resource_kind, ResourceKind::Videos);
        let detail = r.detail_meta().unwrap();
        assert_eq!(detail.country.as_deref(), Some("Japan"));
        assert!(detail.state.is_none());
        assert!(r.geo_point().is_valid());
    }

    #[test]
    fn test_deserialize_api_timestamps() {
        let json = r#"{
            "resourceId": "a",
            "resourceKind": "images",
            "createdAt": "2024-05-02T08:30:00.123+09:00",
            "updatedAt": null,
            "detailMeta": {
                "resourceId": "a",
                "recordedDateTime": "2024-05-01T10:00:00Z"
            }
        }"#;
        let r: Resource = serde_json::from_str(json).unwrap();

        assert_eq!(
            r.created_at,
            Some(UNIX_EPOCH + Duration::from_millis(1_714_606_200_123))
        );
        assert!(r.updated_at.is_none());
        assert_eq!(
            r.detail_meta().unwrap().recorded_date_time,
            Some(UNIX_EPOCH + Duration::from_secs(1_714_557_600))
        );
    }

    #[test]
    fn test_timestamps_as_epoch_millis_and_blank() {
        let detail: DetailMeta =
            serde_json::from_str(r#"{ "resourceId": "a", "recordedDateTime": 1714557600000 }"#).unwrap();
        assert_eq!(
            detail.recorded_date_time,
            Some(UNIX_EPOCH + Duration::from_secs(1_714_557_600))
        );

        let blank: DetailMeta =
            serde_json::from_str(r#"{ "resourceId": "a", "recordedDateTime": "" }"#).unwrap();
        assert!(blank.recorded_date_time.is_none());
    }

    #[test]
    fn test_invalid_timestamp_is_an_error() {
        let result: Result<DetailMeta, _> =
            serde_json::from_str(r#"{ "resourceId": "a", "recordedDateTime": "last summer" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_timestamps_as_rfc3339() {
        let r = Resource::new("a", ResourceKind::Music)
            .with_created_at(UNIX_EPOCH + Duration::from_secs(1_714_557_600))
            .with_detail(DetailMeta::new("a"));
        let json = serde_json::to_value(&r).unwrap();

        assert_eq!(json["createdAt"], "2024-05-01T10:00:00.000Z");
        assert!(json["updatedAt"].is_null());
        assert!(json["detailMeta"]["recordedDateTime"].is_null());

        let back: Resource = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }
}
