use std::f64::consts::FRAC_PI_4;

/// First eccentricity of the WGS84 ellipsoid, as used by [`scale_factor_from_standard_parallel`].
pub const WGS84_ECCENTRICITY: f64 = 0.081819191;

/// Scale factor at the pole of a polar stereographic projection whose true-scale
/// latitude is `standard_parallel` (degrees).
///
/// This is the `k0` of Snyder's polar stereographic formulas (21-32 to 21-35),
/// with `mF = cos φ / sqrt(1 - e² sin² φ)` and the isometric term `tF` taken in
/// its northern or southern form according to the sign of the latitude.
/// The result is `1` at either pole and about `0.5017` at the equator.
///
/// The latitude is not range-checked; `±90` exactly divides by a vanishing `tF`.
///
/// ```
/// use proj_esri::scale_factor_from_standard_parallel;
///
/// // EPSG:3413, NSIDC Sea Ice Polar Stereographic North
/// let k0 = scale_factor_from_standard_parallel(70.0);
/// assert!((k0 - 0.96986).abs() < 1e-5);
/// ```
pub fn scale_factor_from_standard_parallel(standard_parallel: f64) -> f64 {
    let e = WGS84_ECCENTRICITY;
    let phi = standard_parallel.to_radians();
    let e_sin = e * phi.sin();
    let ratio = ((1.0 + e_sin) / (1.0 - e_sin)).powf(e / 2.0);

    let t_f = if phi > 0.0 {
        (FRAC_PI_4 - phi / 2.0).tan() * ratio
    } else {
        (FRAC_PI_4 + phi / 2.0).tan() / ratio
    };
    let m_f = phi.cos() / (1.0 - e_sin * e_sin).sqrt();

    m_f * ((1.0 + e).powf(1.0 + e) * (1.0 - e).powf(1.0 - e)).sqrt() / (2.0 * t_f)
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_equator() {
        let k0 = scale_factor_from_standard_parallel(0.0);
        let expected = ((1.0 + WGS84_ECCENTRICITY).powf(1.0 + WGS84_ECCENTRICITY)
            * (1.0 - WGS84_ECCENTRICITY).powf(1.0 - WGS84_ECCENTRICITY))
        .sqrt()
            / 2.0;
        assert_relative_eq!(k0, expected, epsilon = 1e-15);
        assert_relative_eq!(k0, 0.50168, epsilon = 1e-5);
    }

    #[test]
    fn test_near_pole_is_true_scale() {
        assert_relative_eq!(scale_factor_from_standard_parallel(89.9999), 1.0, epsilon = 1e-6);
        assert_relative_eq!(scale_factor_from_standard_parallel(-89.9999), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_known_values() {
        // EPSG:3031 Antarctic Polar Stereographic, true scale at 71°S
        assert_relative_eq!(scale_factor_from_standard_parallel(-71.0), 0.97277, epsilon = 1e-5);
        // EPSG:3413, true scale at 70°N
        assert_relative_eq!(scale_factor_from_standard_parallel(70.0), 0.96986, epsilon = 1e-5);
    }

    #[test]
    fn test_symmetric_between_hemispheres() {
        for lat in [1.0, 15.0, 30.0, 45.0, 60.0, 71.0, 85.0] {
            let north = scale_factor_from_standard_parallel(lat);
            let south = scale_factor_from_standard_parallel(-lat);
            assert_relative_eq!(north, south, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_increases_towards_pole() {
        let mut previous = scale_factor_from_standard_parallel(0.0);
        for lat in (5..90).step_by(5) {
            let k0 = scale_factor_from_standard_parallel(lat as f64);
            assert!(k0 > previous, "k0 at {lat} = {k0}");
            previous = k0;
        }
    }
}
