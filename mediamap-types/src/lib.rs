//! # mediamap-types
//!
//! Core data types for geo-tagged media resources.
//!
//! This crate provides the plain, serializable records that the `mediamap`
//! algorithms operate on:
//!
//! - **Point types**: `GeoPoint`, an optional latitude/longitude pair
//! - **Bounding box types**: `BoundingBox`, a lat/lng box that may wrap the antimeridian
//! - **Resource types**: `Resource`, `DetailMeta`, `ResourceKind`
//! - **The `GeoRecord` trait**: the read-only view every algorithm is generic over
//! - **Timestamps**: RFC 3339 wire format for the resource dates
//!
//! All types are serializable with Serde and convert to the `geo` crate's
//! primitives where that makes sense.
//!
//! ## Examples
//!
//! ```rust
//! use mediamap_types::bbox::BoundingBox;
//! use mediamap_types::point::GeoPoint;
//!
//! // Box wrapping the antimeridian around Fiji
//! let fiji = BoundingBox::new(-21.0, 176.0, -12.0, -178.0);
//! assert!(fiji.crosses_antimeridian());
//!
//! let suva = GeoPoint::new(-18.1416, 178.4419);
//! assert!(suva.is_valid());
//! ```

pub mod bbox;
pub mod point;
pub mod resource;
pub mod timestamp;
