use tracing::debug;

use crate::engine::{ReferenceSystem, ReferenceSystemEngine, parse_definition};
use crate::params::{AliasTable, esri_to_parameters};
use crate::registry::{EsriRegistry, ProjectionKind, ProjectionRegistry};
use crate::reproject::{self, Coord, CoordinateType, Point};
use crate::{ParameterSet, ProjError};

/// The identifier given to every reference system built by a [`CrsFactory`]
/// unless another one is configured.
pub const DEFAULT_ID: &str = "custom";

/// Builds reference systems from ESRI projection strings and PROJ definitions,
/// and reprojects coordinates between them.
///
#[cfg_attr(feature = "proj4rs", doc = r##"
# Examples

```
use proj_esri::{CrsFactory, Proj4rsEngine};

let factory = CrsFactory::new(Proj4rsEngine);
let wgs84 = factory
    .from_esri(r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]]]"#)
    .unwrap();
let merc = factory.from_definition("+proj=merc+datum=WGS84").unwrap();

// 190°E is wrapped to 170°W before projecting
let p = factory.reproject_point(190.0, 0.0, &wgs84, &merc).unwrap();
assert!((p.x + 18_924_313.43).abs() < 0.1);
```
"##)]
pub struct CrsFactory<E, R = EsriRegistry> {
    engine: E,
    registry: R,
    aliases: AliasTable,
    id: String,
}

impl<E: ReferenceSystemEngine> CrsFactory<E> {
    pub fn new(engine: E) -> Self {
        CrsFactory {
            engine,
            registry: EsriRegistry,
            aliases: AliasTable::default(),
            id: DEFAULT_ID.to_string(),
        }
    }
}

impl<E, R> CrsFactory<E, R>
where
    E: ReferenceSystemEngine,
    R: ProjectionRegistry,
{
    /// Resolve ESRI projection names through `registry` instead of the built-in table.
    pub fn with_registry<R2: ProjectionRegistry>(self, registry: R2) -> CrsFactory<E, R2> {
        CrsFactory {
            engine: self.engine,
            registry,
            aliases: self.aliases,
            id: self.id,
        }
    }

    /// Resolve datum and spheroid names through `aliases`.
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Tag built reference systems with `id` instead of [`DEFAULT_ID`].
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Translate an ESRI projection string without building a reference system.
    pub fn esri_parameters(&self, esri: &str) -> Result<ParameterSet, ProjError> {
        esri_to_parameters(esri, &self.registry, &self.aliases)
    }

    /// Build a reference system from an ESRI projection string.
    pub fn from_esri(&self, esri: &str) -> Result<E::System, ProjError> {
        let params = self.esri_parameters(esri)?;
        self.from_parameters(&params)
    }

    /// Build a reference system from a PROJ definition such as
    /// `+proj=lcc +lat_1=30 +lat_2=62`.
    ///
    /// Tokens may be run together (`+proj=merc+lon_0=10`); a space is put in
    /// front of every `+` before the definition is handed to the engine.
    pub fn from_definition(&self, definition: &str) -> Result<E::System, ProjError> {
        let normalized = definition.replace('+', " +");
        let params =
            parse_definition(normalized.trim()).map_err(ProjError::InvalidReferenceSystem)?;
        self.from_parameters(&params)
    }

    /// Build a reference system for `kind` with no further parameters.
    pub fn from_projection(&self, kind: ProjectionKind) -> Result<E::System, ProjError> {
        let params: ParameterSet = [("proj", self.registry.canonical_key(kind))]
            .into_iter()
            .collect();
        self.from_parameters(&params)
    }

    pub fn from_parameters(&self, params: &ParameterSet) -> Result<E::System, ProjError> {
        debug!(id = %self.id, definition = %params, "building reference system");
        self.engine
            .create_from_parameters(&self.id, params)
            .map_err(ProjError::InvalidReferenceSystem)
    }

    pub fn reproject_point(
        &self,
        x: f64,
        y: f64,
        source: &E::System,
        dest: &E::System,
    ) -> Result<Point, ProjError> {
        reproject::reproject_point(&self.engine, x, y, source, dest)
    }

    pub fn reproject_coord<C, T>(
        &self,
        coord: C,
        source: &E::System,
        dest: &E::System,
    ) -> Result<C, ProjError>
    where
        C: Coord<T>,
        T: CoordinateType,
    {
        reproject::reproject_coord(&self.engine, coord, source, dest)
    }

    pub fn reproject<C, T>(
        &self,
        coords: &mut [C],
        source: &E::System,
        dest: &E::System,
    ) -> Result<(), ProjError>
    where
        C: Coord<T>,
        T: CoordinateType,
    {
        reproject::reproject(&self.engine, coords, source, dest)
    }

    pub fn reproject_range<C, T>(
        &self,
        coords: &mut [C],
        source: &E::System,
        dest: &E::System,
        start: usize,
        count: usize,
    ) -> Result<(), ProjError>
    where
        C: Coord<T>,
        T: CoordinateType,
    {
        reproject::reproject_range(&self.engine, coords, source, dest, start, count)
    }
}

/// `true` if `system` is the `longlat` pseudo-projection.
pub fn is_lon_lat<S: ReferenceSystem + ?Sized>(system: &S) -> bool {
    system.projection_name() == ProjectionKind::LongLat.proj_name()
}
