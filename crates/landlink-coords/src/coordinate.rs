//! Coordinate and parcel-set types.

use std::fmt;
use std::str::FromStr;

use crate::parser::CoordinateError;

/// A single parcel coordinate.
///
/// The canonical textual form is `"x,y"`: base-10, no leading zeros,
/// `-0` collapsed to `0`. Both properties fall out of integer parsing
/// and printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    /// Create a coordinate pair
    #[inline]
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let entry = s.trim();
        let invalid = || CoordinateError::InvalidCoordinate(entry.to_string());
        let (x, y) = entry.split_once(',').ok_or_else(invalid)?;
        Ok(Self::new(
            x.trim().parse::<i64>().map_err(|_| invalid())?,
            y.trim().parse::<i64>().map_err(|_| invalid())?,
        ))
    }
}

/// Ordered sequence of parcel coordinates for one scene.
///
/// Derived from the scene descriptor via [`crate::parse`]. A valid link
/// session requires a non-empty sequence; that check belongs to the
/// session controller, not to this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneParcels(Vec<Coordinate>);

impl SceneParcels {
    /// Wrap an already-parsed coordinate sequence
    #[inline]
    #[must_use]
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }

    /// Number of parcels
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence holds no parcels
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First parcel in descriptor order
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<Coordinate> {
        self.0.first().copied()
    }

    /// Iterate over the parcels in descriptor order
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.0.iter().copied()
    }

    /// All x components, in descriptor order
    #[must_use]
    pub fn xs(&self) -> Vec<i64> {
        self.0.iter().map(|c| c.x).collect()
    }

    /// All y components, in descriptor order
    #[must_use]
    pub fn ys(&self) -> Vec<i64> {
        self.0.iter().map(|c| c.y).collect()
    }

    /// Canonical string forms, in descriptor order
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(Coordinate::to_string).collect()
    }
}

impl From<Vec<Coordinate>> for SceneParcels {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self::new(coordinates)
    }
}

impl fmt::Display for SceneParcels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_strings().join("; "))
    }
}
