//! Spatial organization of geo-tagged media resources for map and grid views.
//!
//! ```rust
//! use mediamap::{BoundingBox, DetailMeta, RegionType};
//! use mediamap::region::group_by_region;
//! use mediamap::spatial::filter_by_bbox;
//!
//! let photos = vec![
//!     DetailMeta::new("a").with_location(35.68, 139.76).with_region("Japan", "Tokyo", "Chiyoda"),
//!     DetailMeta::new("b").with_location(48.85, 2.35).with_region("France", "Île-de-France", "Paris"),
//!     DetailMeta::new("c"),
//! ];
//!
//! let by_country = group_by_region(&photos, RegionType::World, None, None);
//! assert_eq!(by_country.len(), 3);
//! assert_eq!(by_country.get("Unknown").map(|g| g.len()), Some(1));
//!
//! let asia = BoundingBox::new(0.0, 60.0, 60.0, 180.0);
//! let visible = filter_by_bbox(&photos, Some(&asia));
//! assert_eq!(visible.len(), 1);
//! ```

pub mod centers;
pub mod config;
pub mod error;
#[cfg(feature = "geojson")]
pub mod markers;
pub mod proximity;
pub mod region;
pub mod spatial;
pub mod thumbnail;
pub mod trajectory;
pub mod view;

pub use config::{Config, ThumbnailConfig, ViewConfig};
pub use error::{MediamapError, Result};

pub use geo::Point;

pub use mediamap_types::bbox::BoundingBox;
pub use mediamap_types::point::GeoPoint;
pub use mediamap_types::resource::{DetailMeta, GeoRecord, Resource, ResourceKind};

pub use region::{RegionGroups, RegionType, UNKNOWN_REGION};
pub use spatial::{bounding_box, filter_by_bbox, is_valid_coordinate, is_within_bbox, nearby_records};
pub use thumbnail::{ThumbnailCache, ThumbnailStats};
pub use trajectory::{TrajectoryPoint, build_trajectory};
pub use view::{MapViewPage, MapViewQuery, SortStrategy, resolve_view};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{MediamapError, Result};

    pub use crate::{BoundingBox, DetailMeta, GeoPoint, GeoRecord, Resource, ResourceKind};

    pub use crate::region::{RegionType, filter_by_region, group_by_region, group_by_region_name};

    pub use crate::spatial::{bounding_box, filter_by_bbox, is_within_bbox, nearby_records};

    pub use crate::proximity::{sample_near_center, sort_by_center_distance};

    pub use crate::{Config, MapViewQuery, SortStrategy, ThumbnailCache, resolve_view};

    pub use geo::Point;
}
