#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
//! `proj-esri` turns the projection strings found in ESRI `.prj` files into
//! PROJ parameters, and reprojects coordinates between the resulting systems.
//!
//! An ESRI projection string looks like
//!
//! ```text
//! PROJCS["WGS_1984_UTM_Zone_10N",GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",
//!     SPHEROID["WGS_1984",6378137.0,298.257223563]],...],
//!     PROJECTION["Transverse_Mercator"],PARAMETER["False_Easting",500000.0],...]
//! ```
//!
//! and translates to
//!
//! ```text
//! +proj=tmerc +datum=WGS84 +ellps=WGS84 +a=6378137.0 +rf=298.257223563 +x_0=500000.0 ...
//! ```
//!
//! Only the projection, datum, spheroid and the common projection parameters
//! (`False_Easting`, `False_Northing`, `Central_Meridian`, `Standard_Parallel_1`,
//! `Standard_Parallel_2`, `Scale_Factor`, `Latitude_Of_Origin`) are read.
//! Units are not translated.
//!
//! # Usage
//!
//! The projection math itself is done by a [`ReferenceSystemEngine`]:
//!
//! - [`Proj4rsEngine`] (feature `proj4rs`, enabled by default) is pure Rust;
//! - [`LibProjEngine`] (feature `libproj`) links against `libproj` through `proj-sys`.
//!   Enable `bundled_proj` to build `libproj` from source.
//!
//! Wrap an engine in a [`CrsFactory`], then build reference systems with
//! [`CrsFactory::from_esri`], [`CrsFactory::from_definition`] or
//! [`CrsFactory::from_projection`] and reproject with
//! [`CrsFactory::reproject_point`], [`CrsFactory::reproject`] or
//! [`CrsFactory::reproject_range`]. Coordinates are modified in place; when the
//! source system is geographic, longitudes are first wrapped into `[-180, 180]`.
//!
//! Anything implementing [`Coord`] can be reprojected: `(T, T)`, `[T; 2]`,
//! [`Point`] and, with the `geo-types` feature, `geo_types::Coord` and
//! `geo_types::Point`.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "proj4rs")]
//! # fn main() -> Result<(), proj_esri::ProjError> {
//! use proj_esri::{CrsFactory, Proj4rsEngine};
//!
//! let prj = r#"PROJCS["WGS_1984_UTM_Zone_10N",GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],PARAMETER["False_Easting",500000.0],PARAMETER["False_Northing",0.0],PARAMETER["Central_Meridian",-123.0],PARAMETER["Scale_Factor",0.9996],PARAMETER["Latitude_Of_Origin",0.0],UNIT["Meter",1.0]]"#;
//!
//! let factory = CrsFactory::new(Proj4rsEngine);
//! let utm = factory.from_esri(prj)?;
//! let wgs84 = factory.from_definition("+proj=longlat +datum=WGS84")?;
//!
//! let mut coords: Vec<(f64, f64)> = vec![(-123.0, 45.0), (-122.5, 45.5)];
//! factory.reproject(&mut coords, &wgs84, &utm)?;
//! assert!((coords[0].0 - 500_000.0).abs() < 1e-3);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "proj4rs"))]
//! # fn main() {}
//! ```

mod engine;
mod error;
pub mod extract;
mod factory;
#[cfg(feature = "geo-types")]
mod geo_types;
#[cfg(feature = "libproj")]
mod libproj;
mod params;
#[cfg(feature = "proj4rs")]
mod proj4rs_engine;
mod registry;
mod reproject;
mod scale;

pub use crate::engine::CoordinateTransform;
pub use crate::engine::ReferenceSystem;
pub use crate::engine::ReferenceSystemEngine;
pub use crate::error::EngineError;
pub use crate::error::ProjError;
pub use crate::factory::{CrsFactory, DEFAULT_ID, is_lon_lat};
#[cfg(feature = "libproj")]
pub use crate::libproj::{LibProjEngine, LibProjSystem, LibProjTransform};
pub use crate::params::{AliasTable, ParameterSet, esri_to_parameters};
#[cfg(feature = "proj4rs")]
pub use crate::proj4rs_engine::{Proj4rsEngine, Proj4rsSystem, Proj4rsTransform};
pub use crate::registry::{EsriRegistry, ProjectionKind, ProjectionRegistry};
pub use crate::reproject::{
    Coord, CoordinateType, Point, reproject, reproject_coord, reproject_point, reproject_range,
    wrap_longitude,
};
pub use crate::scale::{WGS84_ECCENTRICITY, scale_factor_from_standard_parallel};
