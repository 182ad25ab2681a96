//! The capabilities this crate needs from a projection library.
//!
//! Building reference systems and transforming coordinates between them is
//! delegated entirely to a [`ReferenceSystemEngine`]. The crate ships one engine
//! over [`proj4rs`](https://docs.rs/proj4rs) (feature `proj4rs`, on by default)
//! and one over the PROJ C library (feature `libproj`).

use crate::{EngineError, ParameterSet};

/// A reference system built by an engine.
pub trait ReferenceSystem {
    /// `true` for unprojected (longitude/latitude) systems.
    fn is_geographic(&self) -> bool;

    /// The `+proj=` name of the system's projection, e.g. `longlat` or `tmerc`.
    fn projection_name(&self) -> &str;
}

/// A transformation between two reference systems.
///
/// Geographic coordinates are `(longitude, latitude)` in degrees; projected
/// coordinates are `(easting, northing)` in the system's units.
pub trait CoordinateTransform {
    fn apply(&self, coord: (f64, f64)) -> Result<(f64, f64), EngineError>;
}

pub trait ReferenceSystemEngine {
    type System: ReferenceSystem;
    type Transform<'a>: CoordinateTransform
    where
        Self: 'a;

    /// Build a reference system from named parameters, tagged with `id`.
    fn create_from_parameters(
        &self,
        id: &str,
        params: &ParameterSet,
    ) -> Result<Self::System, EngineError>;

    /// Find a transformation from `source` to `dest`.
    fn create_transform<'a>(
        &'a self,
        source: &'a Self::System,
        dest: &'a Self::System,
    ) -> Result<Self::Transform<'a>, EngineError>;
}

/// Parse a `+key=value` definition into parameters.
///
/// Flags without a value (`+no_defs`) are kept with an empty value and
/// rendered back without the `=`.
pub(crate) fn parse_definition(definition: &str) -> Result<ParameterSet, EngineError> {
    let mut params = ParameterSet::new();
    for token in definition.split_whitespace() {
        let token = token
            .strip_prefix('+')
            .ok_or_else(|| EngineError::new(format!("expected `+key=value`, found `{token}`")))?;
        match token.split_once('=') {
            Some((key, value)) => params.insert(key, value),
            None => params.insert(token, ""),
        }
    }
    Ok(params)
}

/// Render parameters the way PROJ expects them, omitting `=` for flags.
pub(crate) fn render_definition(params: &ParameterSet) -> String {
    params
        .iter()
        .map(|(k, v)| {
            if v.is_empty() {
                format!("+{k}")
            } else {
                format!("+{k}={v}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// An engine that records what it is asked to build and transforms by a fixed
/// offset. Used to test the crate without projection math.
#[cfg(test)]
pub(crate) mod stub {
    use std::cell::RefCell;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub struct StubSystem {
        pub id: String,
        pub params: ParameterSet,
    }

    impl ReferenceSystem for StubSystem {
        fn is_geographic(&self) -> bool {
            self.projection_name() == "longlat"
        }

        fn projection_name(&self) -> &str {
            self.params.get("proj").unwrap_or_default()
        }
    }

    /// Adds `offset` to both components, or fails for one specific input.
    pub struct StubTransform {
        pub offset: f64,
        pub fail_on: Option<(f64, f64)>,
    }

    impl CoordinateTransform for StubTransform {
        fn apply(&self, coord: (f64, f64)) -> Result<(f64, f64), EngineError> {
            if self.fail_on == Some(coord) {
                return Err(EngineError::new("stub failure"));
            }
            Ok((coord.0 + self.offset, coord.1 + self.offset))
        }
    }

    #[derive(Default)]
    pub struct StubEngine {
        pub received: RefCell<Vec<(String, ParameterSet)>>,
        pub offset: f64,
        pub fail_on: Option<(f64, f64)>,
        pub reject_parameters: bool,
        pub reject_transforms: bool,
    }

    impl StubEngine {
        pub fn identity() -> Self {
            Self::default()
        }

        pub fn system(&self, definition: &str) -> StubSystem {
            StubSystem {
                id: "test".to_string(),
                params: parse_definition(definition).unwrap(),
            }
        }
    }

    impl ReferenceSystemEngine for StubEngine {
        type System = StubSystem;
        type Transform<'a> = StubTransform;

        fn create_from_parameters(
            &self,
            id: &str,
            params: &ParameterSet,
        ) -> Result<StubSystem, EngineError> {
            self.received
                .borrow_mut()
                .push((id.to_string(), params.clone()));
            if self.reject_parameters {
                return Err(EngineError::new("stub rejects everything"));
            }
            Ok(StubSystem {
                id: id.to_string(),
                params: params.clone(),
            })
        }

        fn create_transform<'a>(
            &'a self,
            _source: &'a StubSystem,
            _dest: &'a StubSystem,
        ) -> Result<StubTransform, EngineError> {
            if self.reject_transforms {
                return Err(EngineError::new("no path"));
            }
            Ok(StubTransform {
                offset: self.offset,
                fail_on: self.fail_on,
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_definition() {
        let params = parse_definition("+proj=longlat +datum=WGS84 +no_defs").unwrap();
        assert_eq!(params.get("proj"), Some("longlat"));
        assert_eq!(params.get("datum"), Some("WGS84"));
        assert_eq!(params.get("no_defs"), Some(""));
        assert_eq!(
            render_definition(&params),
            "+proj=longlat +datum=WGS84 +no_defs"
        );
    }

    #[test]
    fn test_parse_definition_rejects_bare_words() {
        assert!(parse_definition("proj=longlat").is_err());
    }
}
