//! Land metadata codec
//!
//! The on-chain metadata slot for a parcel holds a small versioned
//! textual blob. This crate owns its model and round-trip codec:
//!
//! - [`LandData`]: decoded parcel metadata
//! - [`encode`] / [`decode`]: deterministic blob round-trip;
//!   `decode(encode(d)) == d` for all valid `d`
//!
//! Decode failure is an explicit [`DecodeError`]; on-chain slots are
//! frequently uninitialized, so callers treat that as "no prior data"
//! rather than aborting.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod codec;
mod data;

pub use codec::{decode, encode, DecodeError};
pub use data::{LandData, CURRENT_VERSION};
