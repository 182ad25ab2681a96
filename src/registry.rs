use std::fmt;

/// Projections that can be named in an ESRI projection string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    LongLat,
    AlbersEqualArea,
    AzimuthalEquidistant,
    CylindricalEqualArea,
    EquidistantConic,
    EquidistantCylindrical,
    Geostationary,
    Gnomonic,
    HotineObliqueMercator,
    LambertAzimuthalEqualArea,
    LambertConformalConic,
    Mercator,
    MillerCylindrical,
    Mollweide,
    ObliqueStereographic,
    Orthographic,
    Robinson,
    Sinusoidal,
    Stereographic,
    TransverseMercator,
}

impl ProjectionKind {
    /// The PROJ `+proj=` name for this projection.
    pub fn proj_name(self) -> &'static str {
        match self {
            ProjectionKind::LongLat => "longlat",
            ProjectionKind::AlbersEqualArea => "aea",
            ProjectionKind::AzimuthalEquidistant => "aeqd",
            ProjectionKind::CylindricalEqualArea => "cea",
            ProjectionKind::EquidistantConic => "eqdc",
            ProjectionKind::EquidistantCylindrical => "eqc",
            ProjectionKind::Geostationary => "geos",
            ProjectionKind::Gnomonic => "gnom",
            ProjectionKind::HotineObliqueMercator => "omerc",
            ProjectionKind::LambertAzimuthalEqualArea => "laea",
            ProjectionKind::LambertConformalConic => "lcc",
            ProjectionKind::Mercator => "merc",
            ProjectionKind::MillerCylindrical => "mill",
            ProjectionKind::Mollweide => "moll",
            ProjectionKind::ObliqueStereographic => "sterea",
            ProjectionKind::Orthographic => "ortho",
            ProjectionKind::Robinson => "robin",
            ProjectionKind::Sinusoidal => "sinu",
            ProjectionKind::Stereographic => "stere",
            ProjectionKind::TransverseMercator => "tmerc",
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.proj_name())
    }
}

/// Maps the projection names used by ESRI to canonical PROJ names.
pub trait ProjectionRegistry {
    /// Look up the projection named in a `PROJECTION["..."]` section.
    fn resolve_esri_name(&self, name: &str) -> Option<ProjectionKind>;

    /// The `+proj=` value for a resolved projection.
    fn canonical_key(&self, kind: ProjectionKind) -> &str {
        kind.proj_name()
    }
}

const ESRI_NAMES: &[(&str, ProjectionKind)] = &[
    ("Albers", ProjectionKind::AlbersEqualArea),
    ("Albers_Conic_Equal_Area", ProjectionKind::AlbersEqualArea),
    ("Azimuthal_Equidistant", ProjectionKind::AzimuthalEquidistant),
    ("Cylindrical_Equal_Area", ProjectionKind::CylindricalEqualArea),
    ("Behrmann", ProjectionKind::CylindricalEqualArea),
    ("Equidistant_Conic", ProjectionKind::EquidistantConic),
    ("Equidistant_Cylindrical", ProjectionKind::EquidistantCylindrical),
    ("Plate_Carree", ProjectionKind::EquidistantCylindrical),
    ("Geostationary_Satellite", ProjectionKind::Geostationary),
    ("Gnomonic", ProjectionKind::Gnomonic),
    ("Hotine_Oblique_Mercator", ProjectionKind::HotineObliqueMercator),
    (
        "Hotine_Oblique_Mercator_Azimuth_Natural_Origin",
        ProjectionKind::HotineObliqueMercator,
    ),
    (
        "Hotine_Oblique_Mercator_Azimuth_Center",
        ProjectionKind::HotineObliqueMercator,
    ),
    (
        "Lambert_Azimuthal_Equal_Area",
        ProjectionKind::LambertAzimuthalEqualArea,
    ),
    ("Lambert_Conformal_Conic", ProjectionKind::LambertConformalConic),
    ("Lambert_Conformal_Conic_1SP", ProjectionKind::LambertConformalConic),
    ("Lambert_Conformal_Conic_2SP", ProjectionKind::LambertConformalConic),
    ("Mercator", ProjectionKind::Mercator),
    ("Mercator_1SP", ProjectionKind::Mercator),
    ("Mercator_2SP", ProjectionKind::Mercator),
    ("Miller_Cylindrical", ProjectionKind::MillerCylindrical),
    ("Mollweide", ProjectionKind::Mollweide),
    ("Double_Stereographic", ProjectionKind::ObliqueStereographic),
    ("Oblique_Stereographic", ProjectionKind::ObliqueStereographic),
    ("Orthographic", ProjectionKind::Orthographic),
    ("Robinson", ProjectionKind::Robinson),
    ("Sinusoidal", ProjectionKind::Sinusoidal),
    ("Stereographic", ProjectionKind::Stereographic),
    ("Stereographic_North_Pole", ProjectionKind::Stereographic),
    ("Stereographic_South_Pole", ProjectionKind::Stereographic),
    ("Polar_Stereographic", ProjectionKind::Stereographic),
    ("Transverse_Mercator", ProjectionKind::TransverseMercator),
    ("Gauss_Kruger", ProjectionKind::TransverseMercator),
];

/// The built-in table of ESRI projection names.
///
/// Names are matched ignoring ASCII case.
#[derive(Clone, Copy, Debug, Default)]
pub struct EsriRegistry;

impl ProjectionRegistry for EsriRegistry {
    fn resolve_esri_name(&self, name: &str) -> Option<ProjectionKind> {
        ESRI_NAMES
            .iter()
            .find(|(esri, _)| esri.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
    }
}
