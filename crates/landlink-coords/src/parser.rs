//! Scene descriptor parsing and validation.
//!
//! The companion process owns a textual descriptor listing the parcels a
//! scene occupies: entries separated by `;`, each entry an `x,y` pair of
//! base-10 integers. [`parse`] is lenient about whitespace and empty
//! entries; [`validate`] is the strict form used before accepting
//! operator input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::coordinate::{Coordinate, SceneParcels};

static ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+,-?\d+$").expect("entry pattern compiles"));

/// Descriptor errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// Entry is not an `x,y` pair of base-10 integers
    #[error("invalid coordinate entry: '{0}'")]
    InvalidCoordinate(String),
}

/// Parse a descriptor into an ordered parcel sequence.
///
/// Splits on `;`, trims whitespace, parses each half of every entry as a
/// base-10 integer. The result re-renders canonically: no leading zeros,
/// `-0` collapsed to `0`. Empty entries (trailing `;`, blank descriptor)
/// are skipped.
pub fn parse(text: &str) -> Result<SceneParcels, CoordinateError> {
    let mut coordinates = Vec::new();
    for entry in text.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        coordinates.push(entry.parse::<Coordinate>()?);
    }
    Ok(SceneParcels::new(coordinates))
}

/// Validate a descriptor without building coordinates.
///
/// An empty or whitespace-only descriptor is vacuously valid. Otherwise
/// every `;`-delimited entry must match `^-?\d+,-?\d+$` (surrounding
/// whitespace tolerated) or the call fails naming the offending entry.
pub fn validate(text: &str) -> Result<(), CoordinateError> {
    if text.trim().is_empty() {
        return Ok(());
    }
    for entry in text.split(';') {
        let entry = entry.trim();
        if !ENTRY_RE.is_match(entry) {
            return Err(CoordinateError::InvalidCoordinate(entry.to_string()));
        }
    }
    Ok(())
}
