#[cfg_attr(feature = "proj4rs", doc = r##"
```rust
use approx::assert_relative_eq;
use geo_types::coord;
use proj_esri::{CrsFactory, Proj4rsEngine};

let factory = CrsFactory::new(Proj4rsEngine);
let wgs84 = factory.from_definition("+proj=longlat +datum=WGS84").unwrap();
let merc = factory.from_definition("+proj=merc +datum=WGS84").unwrap();
let result = factory
    .reproject_coord(coord! { x: 10.0f64, y: 0.0f64 }, &wgs84, &merc)
    .unwrap();
assert_relative_eq!(result.x, 1_113_194.907_932_7, epsilon = 1e-3);
assert_relative_eq!(result.y, 0.0, epsilon = 1e-6);
```
"##)]
impl<T: crate::CoordinateType + geo_types::CoordNum> crate::Coord<T> for geo_types::Coord<T> {
    fn x(&self) -> T {
        self.x
    }
    fn y(&self) -> T {
        self.y
    }
    fn from_xy(x: T, y: T) -> Self {
        Self { x, y }
    }
}

#[cfg_attr(feature = "proj4rs", doc = r##"
```rust
use approx::assert_relative_eq;
use geo_types::Point;
use proj_esri::{CrsFactory, Proj4rsEngine};

let factory = CrsFactory::new(Proj4rsEngine);
let wgs84 = factory.from_definition("+proj=longlat +datum=WGS84").unwrap();
let merc = factory.from_definition("+proj=merc +datum=WGS84").unwrap();
let mut points = vec![Point::new(-190.0f64, 0.0f64), Point::new(10.0, 0.0)];
factory.reproject(&mut points, &wgs84, &merc).unwrap();
assert_relative_eq!(points[0].x(), 18_924_313.434_856_5, epsilon = 1e-3);
assert_relative_eq!(points[1].x(), 1_113_194.907_932_7, epsilon = 1e-3);
```
"##)]
impl<T: crate::CoordinateType + geo_types::CoordNum> crate::Coord<T> for geo_types::Point<T> {
    fn x(&self) -> T {
        geo_types::Point::x(*self)
    }
    fn y(&self) -> T {
        geo_types::Point::y(*self)
    }
    fn from_xy(x: T, y: T) -> Self {
        Self::new(x, y)
    }
}

impl From<crate::Point> for geo_types::Point<f64> {
    fn from(p: crate::Point) -> Self {
        geo_types::Point::new(p.x, p.y)
    }
}

impl From<crate::Point> for geo_types::Coord<f64> {
    fn from(p: crate::Point) -> Self {
        geo_types::Coord { x: p.x, y: p.y }
    }
}

#[cfg(test)]
mod test {
    use crate::Point;

    #[test]
    fn test_point_conversions() {
        let p = Point::new(1.5, -2.0);
        assert_eq!(geo_types::Point::from(p), geo_types::Point::new(1.5, -2.0));
        assert_eq!(
            geo_types::Coord::from(p),
            geo_types::Coord { x: 1.5, y: -2.0 }
        );
    }
}
