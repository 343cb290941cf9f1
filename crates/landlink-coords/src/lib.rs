//! Parcel coordinate model
//!
//! Normalized parcel coordinates and the textual scene descriptor they
//! come from:
//!
//! - [`Coordinate`]: a single `(x, y)` parcel coordinate
//! - [`SceneParcels`]: the ordered parcel sequence of one scene
//! - [`parse`] / [`validate`]: handling of the comma/semicolon-delimited
//!   descriptor owned by the local companion process

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod coordinate;
mod parser;

pub use coordinate::{Coordinate, SceneParcels};
pub use parser::{parse, validate, CoordinateError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
