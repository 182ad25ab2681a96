//! Literal field extraction from ESRI projection strings.
//!
//! ESRI `.prj` files hold a bracketed, comma-delimited description such as
//!
//! ```text
//! PROJCS["WGS_1984_UTM_Zone_10N",GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",
//!     SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],
//!     UNIT["Degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],
//!     PARAMETER["False_Easting",500000.0],PARAMETER["Central_Meridian",-123.0],...]
//! ```
//!
//! Only the handful of fields we need are pulled out, using the first occurrence
//! of each keyword and fixed offsets from it. This is not a WKT parser.

use crate::ProjError;

/// Return the value of the first `PARAMETER["<name>",<value>]` entry.
///
/// The keyword match is ASCII case-insensitive and is a prefix match on the
/// parameter name. The value runs from just after the name's closing quote and
/// comma up to the character before the next comma (i.e. without the closing
/// bracket), and is returned verbatim.
///
/// ```
/// let esri = r#"PROJECTION["Mercator"],PARAMETER["False_Easting",500000],PARAMETER["False_Northing",0]"#;
/// assert_eq!(
///     proj_esri::extract::parameter(esri, "False_Easting").unwrap().as_deref(),
///     Some("500000")
/// );
/// ```
pub fn parameter(esri: &str, name: &str) -> Result<Option<String>, ProjError> {
    let pattern = format!("PARAMETER[\"{name}").to_ascii_lowercase();
    // ASCII lowercasing keeps byte offsets aligned with the original string
    let Some(found) = esri.to_ascii_lowercase().find(&pattern) else {
        return Ok(None);
    };
    // skip `PARAMETER["`, the name and `",`
    let start = found + 13 + name.len();
    let end = esri
        .get(start..)
        .and_then(|rest| rest.find(','))
        .map(|comma| start + comma)
        .and_then(|comma| comma.checked_sub(1))
        .ok_or_else(|| malformed(format!("no value delimiter after parameter `{name}`")))?;
    slice(esri, start, end).map(|value| Some(value.to_string()))
}

/// Return the quoted name in the first `PROJECTION["<name>"]` section.
pub fn projection_name(esri: &str) -> Result<Option<&str>, ProjError> {
    let Some(found) = esri.find("PROJECTION") else {
        return Ok(None);
    };
    // skip `PROJECTION["`, stop before `"]`
    let start = found + 12;
    let end = closing_bracket(esri, start, "PROJECTION")?
        .checked_sub(1)
        .ok_or_else(|| malformed("empty PROJECTION section"))?;
    slice(esri, start, end).map(Some)
}

/// Return the quoted name in the first `DATUM["<name>",...]` section.
///
/// A `DATUM` keyword that is not followed by a comma-terminated name yields
/// `None` rather than an error.
pub fn datum_name(esri: &str) -> Option<&str> {
    let found = esri.find("DATUM")?;
    // skip `DATUM["`, stop before `",`
    let start = found + 7;
    let comma = start + esri.get(start..)?.find(',')?;
    let end = comma.checked_sub(1)?;
    if end > start { esri.get(start..end) } else { None }
}

/// Return the raw body of the first `<keyword>[...]` section, up to the first
/// closing bracket after the keyword.
///
/// Returns `None` if the keyword is absent or the body is empty.
///
/// ```
/// let esri = r#"DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]]"#;
/// assert_eq!(
///     proj_esri::extract::section(esri, "SPHEROID").unwrap(),
///     Some(r#""WGS_1984",6378137.0,298.257223563"#)
/// );
/// ```
pub fn section<'a>(esri: &'a str, keyword: &str) -> Result<Option<&'a str>, ProjError> {
    let Some(found) = esri.find(keyword) else {
        return Ok(None);
    };
    // skip `<keyword>[`
    let start = found + keyword.len() + 1;
    let end = closing_bracket(esri, start, keyword)?;
    if end > start {
        slice(esri, start, end).map(Some)
    } else {
        Ok(None)
    }
}

/// Split a section body on commas, stripping the surrounding quotes from the
/// first (name) term.
pub fn section_terms(body: &str) -> Result<Vec<&str>, ProjError> {
    let mut terms: Vec<&str> = body.split(',').collect();
    let name = terms[0];
    terms[0] = name
        .get(1..name.len().saturating_sub(1))
        .filter(|_| name.len() >= 2)
        .ok_or_else(|| malformed(format!("unquoted section name `{name}`")))?;
    Ok(terms)
}

fn closing_bracket(esri: &str, start: usize, keyword: &str) -> Result<usize, ProjError> {
    esri.get(start..)
        .and_then(|rest| rest.find(']'))
        .map(|offset| start + offset)
        .ok_or_else(|| malformed(format!("unterminated {keyword} section")))
}

fn slice(esri: &str, start: usize, end: usize) -> Result<&str, ProjError> {
    if end < start {
        return Err(malformed(format!("field range {start}..{end} is inverted")));
    }
    esri.get(start..end)
        .ok_or_else(|| malformed(format!("field range {start}..{end} is not on a character boundary")))
}

fn malformed(reason: impl Into<String>) -> ProjError {
    ProjError::MalformedDescriptor(reason.into())
}
