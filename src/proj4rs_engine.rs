//! A pure-Rust engine over [`proj4rs`].

use std::fmt;

use proj4rs::Proj;

use crate::engine::{
    CoordinateTransform, ReferenceSystem, ReferenceSystemEngine, render_definition,
};
use crate::{EngineError, ParameterSet};

/// Builds reference systems with `proj4rs`.
///
/// `proj4rs` works in radians for geographic systems; this engine takes and
/// returns degrees and converts at the boundary.
///
/// `proj4rs` reads the scale factor from `+k` only, so a `k_0` parameter is
/// handed to it as `k`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Proj4rsEngine;

/// A reference system built by [`Proj4rsEngine`].
pub struct Proj4rsSystem {
    id: String,
    definition: String,
    projection: String,
    proj: Proj,
}

impl Proj4rsSystem {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The definition string `proj4rs` was given.
    pub fn definition(&self) -> &str {
        &self.definition
    }
}

impl fmt::Debug for Proj4rsSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proj4rsSystem")
            .field("id", &self.id)
            .field("definition", &self.definition)
            .finish()
    }
}

impl ReferenceSystem for Proj4rsSystem {
    fn is_geographic(&self) -> bool {
        self.proj.is_latlong()
    }

    fn projection_name(&self) -> &str {
        &self.projection
    }
}

/// A transform between two [`Proj4rsSystem`]s.
pub struct Proj4rsTransform<'a> {
    src: &'a Proj4rsSystem,
    dst: &'a Proj4rsSystem,
}

impl CoordinateTransform for Proj4rsTransform<'_> {
    fn apply(&self, coord: (f64, f64)) -> Result<(f64, f64), EngineError> {
        let src_is_geo = self.src.proj.is_latlong();
        let dst_is_geo = self.dst.proj.is_latlong();
        let mut point = if src_is_geo {
            (coord.0.to_radians(), coord.1.to_radians())
        } else {
            coord
        };

        proj4rs::transform::transform(&self.src.proj, &self.dst.proj, &mut point)
            .map_err(|e| EngineError::new(e.to_string()))?;

        if dst_is_geo {
            Ok((point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok(point)
        }
    }
}

impl ReferenceSystemEngine for Proj4rsEngine {
    type System = Proj4rsSystem;
    type Transform<'a> = Proj4rsTransform<'a>;

    fn create_from_parameters(
        &self,
        id: &str,
        params: &ParameterSet,
    ) -> Result<Proj4rsSystem, EngineError> {
        let projection = params
            .get("proj")
            .ok_or_else(|| EngineError::new(format!("{id}: missing +proj")))?
            .to_string();
        let definition = render_definition(&proj4rs_parameters(params));
        let proj = Proj::from_proj_string(&definition)
            .map_err(|e| EngineError::new(format!("{id}: {definition}: {e}")))?;
        Ok(Proj4rsSystem {
            id: id.to_string(),
            definition,
            projection,
            proj,
        })
    }

    fn create_transform<'a>(
        &'a self,
        source: &'a Proj4rsSystem,
        dest: &'a Proj4rsSystem,
    ) -> Result<Proj4rsTransform<'a>, EngineError> {
        Ok(Proj4rsTransform {
            src: source,
            dst: dest,
        })
    }
}

/// `params` with the keys `proj4rs` spells differently renamed.
fn proj4rs_parameters(params: &ParameterSet) -> ParameterSet {
    params
        .iter()
        .map(|(k, v)| (if k == "k_0" { "k" } else { k }, v))
        .collect()
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{CrsFactory, ProjError};

    const UTM_10N: &str = r#"PROJCS["WGS_1984_UTM_Zone_10N",GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],PARAMETER["False_Easting",500000.0],PARAMETER["False_Northing",0.0],PARAMETER["Central_Meridian",-123.0],PARAMETER["Scale_Factor",0.9996],PARAMETER["Latitude_Of_Origin",0.0],UNIT["Meter",1.0]]"#;

    #[test]
    fn test_longlat_to_mercator() {
        let factory = CrsFactory::new(Proj4rsEngine);
        let wgs84 = factory.from_definition("+proj=longlat +datum=WGS84").unwrap();
        let merc = factory.from_definition("+proj=merc +datum=WGS84").unwrap();
        assert!(wgs84.is_geographic());
        assert!(!merc.is_geographic());

        let p = factory.reproject_point(10.0, 0.0, &wgs84, &merc).unwrap();
        assert_relative_eq!(p.x, 1_113_194.907_932_7, epsilon = 1e-3);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_esri_utm_roundtrip() {
        let factory = CrsFactory::new(Proj4rsEngine);
        let utm = factory.from_esri(UTM_10N).unwrap();
        let wgs84 = factory.from_definition("+proj=longlat +datum=WGS84").unwrap();
        assert_eq!(utm.projection_name(), "tmerc");

        let mut coords = [(-123.0, 45.0), (237.0, 45.0)];
        factory.reproject(&mut coords, &wgs84, &utm).unwrap();
        for (e, n) in coords {
            assert_relative_eq!(e, 500_000.0, epsilon = 1e-3);
            assert_relative_eq!(n, 4_982_950.400, epsilon = 1e-2);
        }

        factory.reproject(&mut coords, &utm, &wgs84).unwrap();
        for (lon, lat) in coords {
            assert_relative_eq!(lon, -123.0, epsilon = 1e-8);
            assert_relative_eq!(lat, 45.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_scale_factor_reaches_proj4rs() {
        let factory = CrsFactory::new(Proj4rsEngine);
        let wgs84 = factory.from_definition("+proj=longlat +datum=WGS84").unwrap();
        let unscaled = factory
            .from_definition("+proj=tmerc +lon_0=-123 +datum=WGS84")
            .unwrap();
        let scaled = factory
            .from_definition("+proj=tmerc +lon_0=-123 +k_0=0.9996 +datum=WGS84")
            .unwrap();
        assert!(scaled.definition().contains("+k=0.9996"));
        assert!(!scaled.definition().contains("k_0"));

        let p = factory.reproject_point(-123.0, 45.0, &wgs84, &unscaled).unwrap();
        assert_relative_eq!(p.y, 4_984_944.378, epsilon = 1e-2);
        let p = factory.reproject_point(-123.0, 45.0, &wgs84, &scaled).unwrap();
        assert_relative_eq!(p.y, 4_982_950.400, epsilon = 1e-2);
    }

    #[test]
    fn test_proj4rs_parameters_keeps_order() {
        let params: ParameterSet = [("proj", "tmerc"), ("k_0", "0.9996"), ("x_0", "500000")]
            .into_iter()
            .collect();
        let renamed = proj4rs_parameters(&params);
        assert_eq!(
            renamed.iter().collect::<Vec<_>>(),
            [("proj", "tmerc"), ("k", "0.9996"), ("x_0", "500000")]
        );
        assert_eq!(params.get("k_0"), Some("0.9996"));
    }

    #[test]
    fn test_identity() {
        let factory = CrsFactory::new(Proj4rsEngine);
        let wgs84 = factory.from_definition("+proj=longlat +datum=WGS84").unwrap();
        let mut coords = [[12.5, 41.9], [-74.0, 40.7]];
        factory.reproject(&mut coords, &wgs84, &wgs84).unwrap();
        assert_relative_eq!(coords[0][0], 12.5, epsilon = 1e-9);
        assert_relative_eq!(coords[0][1], 41.9, epsilon = 1e-9);
        assert_relative_eq!(coords[1][0], -74.0, epsilon = 1e-9);
        assert_relative_eq!(coords[1][1], 40.7, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_definition() {
        let factory = CrsFactory::new(Proj4rsEngine);
        assert!(matches!(
            factory.from_definition("+proj=not_a_projection"),
            Err(ProjError::InvalidReferenceSystem(_))
        ));
        assert!(matches!(
            factory.from_definition("+datum=WGS84"),
            Err(ProjError::InvalidReferenceSystem(_))
        ));
    }
}
