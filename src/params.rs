use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::extract;
use crate::registry::{ProjectionKind, ProjectionRegistry};
use crate::ProjError;

/// A set of PROJ parameters, keyed by their canonical name (`proj`, `lon_0`, ...).
///
/// Keys are unique: inserting an existing key replaces its value in place. The
/// iteration order is the order in which keys were first inserted, which only
/// matters for the readability of the rendered definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render each entry as a `+key=value` argument.
    pub fn to_args(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("+{k}={v}")).collect()
    }

    /// Render the set as a single PROJ definition string.
    ///
    /// ```
    /// use proj_esri::ParameterSet;
    ///
    /// let mut params = ParameterSet::new();
    /// params.insert("proj", "merc");
    /// params.insert("lon_0", "10");
    /// assert_eq!(params.to_definition(), "+proj=merc +lon_0=10");
    /// ```
    pub fn to_definition(&self) -> String {
        self.to_args().join(" ")
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_definition())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParameterSet::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Canonical names for ESRI datum and spheroid names.
///
/// Explicit entries are looked up first, then the fallback, and a name with
/// neither is passed through unchanged. The default table has no entries and
/// a `WGS84` fallback, so every datum and spheroid resolves to `WGS84`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasTable {
    datums: HashMap<String, String>,
    spheroids: HashMap<String, String>,
    fallback: Option<String>,
}

impl AliasTable {
    /// Every datum and spheroid resolves to `WGS84`.
    pub fn collapsing() -> Self {
        AliasTable {
            datums: HashMap::new(),
            spheroids: HashMap::new(),
            fallback: Some("WGS84".to_string()),
        }
    }

    /// Names resolve to themselves unless an entry is added for them.
    pub fn passthrough() -> Self {
        AliasTable {
            datums: HashMap::new(),
            spheroids: HashMap::new(),
            fallback: None,
        }
    }

    pub fn datum(mut self, esri: impl Into<String>, proj: impl Into<String>) -> Self {
        self.datums.insert(esri.into(), proj.into());
        self
    }

    pub fn spheroid(mut self, esri: impl Into<String>, proj: impl Into<String>) -> Self {
        self.spheroids.insert(esri.into(), proj.into());
        self
    }

    pub fn resolve_datum<'a>(&'a self, name: &'a str) -> &'a str {
        Self::resolve(&self.datums, self.fallback.as_deref(), name)
    }

    pub fn resolve_spheroid<'a>(&'a self, name: &'a str) -> &'a str {
        Self::resolve(&self.spheroids, self.fallback.as_deref(), name)
    }

    fn resolve<'a>(
        table: &'a HashMap<String, String>,
        fallback: Option<&'a str>,
        name: &'a str,
    ) -> &'a str {
        table
            .get(name)
            .map(String::as_str)
            .or(fallback)
            .unwrap_or(name)
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        AliasTable::collapsing()
    }
}

/// ESRI parameter names and the PROJ keys they map to.
const NAMED_PARAMETERS: [(&str, &str); 7] = [
    ("False_Easting", "x_0"),
    ("False_Northing", "y_0"),
    ("Central_Meridian", "lon_0"),
    ("Standard_Parallel_1", "lat_1"),
    ("Standard_Parallel_2", "lat_2"),
    ("Scale_Factor", "k_0"),
    ("Latitude_Of_Origin", "lat_0"),
];

/// Translate an ESRI projection string into PROJ parameters.
///
/// * Without a `PROJCS` marker the string describes a geographic system and
///   `proj` is `longlat`; otherwise the `PROJECTION` name is resolved through
///   `registry`.
/// * `DATUM` and `SPHEROID` names are resolved through `aliases`; the spheroid's
///   semi-major axis and inverse flattening are copied verbatim to `a` and `rf`.
/// * Projection parameters are copied verbatim; their numeric text is only
///   checked when an engine parses the result.
///
/// Units are not translated.
pub fn esri_to_parameters<R>(
    esri: &str,
    registry: &R,
    aliases: &AliasTable,
) -> Result<ParameterSet, ProjError>
where
    R: ProjectionRegistry + ?Sized,
{
    let mut params = ParameterSet::new();

    if !esri.contains("PROJCS") {
        params.insert("proj", ProjectionKind::LongLat.proj_name());
    } else {
        let name = extract::projection_name(esri)?.ok_or_else(|| {
            ProjError::MalformedDescriptor("PROJCS without a PROJECTION section".to_string())
        })?;
        let kind = registry
            .resolve_esri_name(name)
            .ok_or_else(|| ProjError::UnknownProjection(name.to_string()))?;
        params.insert("proj", registry.canonical_key(kind));
    }

    if let Some(datum) = extract::datum_name(esri) {
        params.insert("datum", aliases.resolve_datum(datum));
    }

    if let Some(body) = extract::section(esri, "SPHEROID")? {
        let terms = extract::section_terms(body)?;
        let [name, a, rf, ..] = terms.as_slice() else {
            return Err(ProjError::MalformedDescriptor(format!(
                "SPHEROID needs a name, semi-major axis and inverse flattening: `{body}`"
            )));
        };
        params.insert("ellps", aliases.resolve_spheroid(name));
        params.insert("a", *a);
        params.insert("rf", *rf);
    }

    for (esri_name, key) in NAMED_PARAMETERS {
        if let Some(value) = extract::parameter(esri, esri_name)? {
            params.insert(key, value);
        }
    }

    debug!(definition = %params, "translated ESRI projection string");
    Ok(params)
}
