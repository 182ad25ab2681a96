use std::fmt::Debug;

use num_traits::Float;
use tracing::debug;

use crate::engine::{CoordinateTransform, ReferenceSystem, ReferenceSystemEngine};
use crate::ProjError;

/// The scalar type of a coordinate.
pub trait CoordinateType: Float + Copy + PartialOrd + Debug {}
impl<T: Float + Copy + PartialOrd + Debug> CoordinateType for T {}

/// Anything that can be read and rebuilt as an `(x, y)` pair.
///
/// `x` is the longitude (or easting) and `y` the latitude (or northing).
pub trait Coord<T: CoordinateType> {
    fn x(&self) -> T;
    fn y(&self) -> T;
    fn from_xy(x: T, y: T) -> Self;
}

impl<T: CoordinateType> Coord<T> for (T, T) {
    fn x(&self) -> T {
        self.0
    }
    fn y(&self) -> T {
        self.1
    }
    fn from_xy(x: T, y: T) -> Self {
        (x, y)
    }
}

impl<T: CoordinateType> Coord<T> for [T; 2] {
    fn x(&self) -> T {
        self[0]
    }
    fn y(&self) -> T {
        self[1]
    }
    fn from_xy(x: T, y: T) -> Self {
        [x, y]
    }
}

/// A single reprojected position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl Coord<f64> for Point {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
    fn from_xy(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Bring a longitude back into `[-180, 180]` with a single 360° step.
///
/// Values more than one turn out of range stay out of range.
pub fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Reproject a single `(x, y)` position from `source` to `dest`.
pub fn reproject_point<E: ReferenceSystemEngine>(
    engine: &E,
    x: f64,
    y: f64,
    source: &E::System,
    dest: &E::System,
) -> Result<Point, ProjError> {
    let mut points = [Point::new(x, y)];
    reproject(engine, &mut points, source, dest)?;
    Ok(points[0])
}

/// Reproject a single coordinate from `source` to `dest`.
pub fn reproject_coord<E, C, T>(
    engine: &E,
    coord: C,
    source: &E::System,
    dest: &E::System,
) -> Result<C, ProjError>
where
    E: ReferenceSystemEngine,
    C: Coord<T>,
    T: CoordinateType,
{
    let mut coords = [coord];
    reproject(engine, &mut coords, source, dest)?;
    let [coord] = coords;
    Ok(coord)
}

/// Reproject every coordinate in `coords` in place.
pub fn reproject<E, C, T>(
    engine: &E,
    coords: &mut [C],
    source: &E::System,
    dest: &E::System,
) -> Result<(), ProjError>
where
    E: ReferenceSystemEngine,
    C: Coord<T>,
    T: CoordinateType,
{
    let len = coords.len();
    reproject_range(engine, coords, source, dest, 0, len)
}

/// Reproject `count` coordinates starting at `start`, in place.
///
/// A range reaching past the end of `coords` is cut short at the end; it is not
/// an error. When `source` is geographic, longitudes in the range are wrapped
/// into `[-180, 180]` (see [`wrap_longitude`]) before any coordinate is
/// transformed. If a coordinate fails to transform, the coordinates before it
/// have already been written.
pub fn reproject_range<E, C, T>(
    engine: &E,
    coords: &mut [C],
    source: &E::System,
    dest: &E::System,
    start: usize,
    count: usize,
) -> Result<(), ProjError>
where
    E: ReferenceSystemEngine,
    C: Coord<T>,
    T: CoordinateType,
{
    let transform = engine.create_transform(source, dest).map_err(|cause| {
        ProjError::UnsupportedTransform {
            source_name: source.projection_name().to_string(),
            dest_name: dest.projection_name().to_string(),
            cause,
        }
    })?;

    let len = coords.len();
    let end = start.saturating_add(count).min(len);
    let Some(range) = coords.get_mut(start..end) else {
        debug!(start, count, len, "reprojection range starts past the end");
        return Ok(());
    };
    if end - start < count {
        debug!(start, count, len = end - start, "reprojection range clamped");
    }

    if source.is_geographic() {
        for coord in range.iter_mut() {
            let lon = to_f64(coord.x())?;
            let wrapped = wrap_longitude(lon);
            if wrapped != lon {
                *coord = C::from_xy(from_f64(wrapped)?, coord.y());
            }
        }
    }

    for coord in range.iter_mut() {
        let (x, y) = transform
            .apply((to_f64(coord.x())?, to_f64(coord.y())?))
            .map_err(ProjError::TransformFailed)?;
        *coord = C::from_xy(from_f64(x)?, from_f64(y)?);
    }
    Ok(())
}

fn to_f64<T: CoordinateType>(value: T) -> Result<f64, ProjError> {
    value.to_f64().ok_or(ProjError::FloatConversion)
}

fn from_f64<T: CoordinateType>(value: f64) -> Result<T, ProjError> {
    T::from(value).ok_or(ProjError::FloatConversion)
}
