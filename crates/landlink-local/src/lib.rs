//! Local companion process client
//!
//! The companion process owns the scene files and orchestrates the link
//! session from the operator side. This crate holds the narrow client
//! surface over it:
//!
//! - [`LocalApi`]: scene metadata, content key, peer id, close
//!   notification
//! - [`LocalClient`]: the HTTP implementation
//! - [`Pinner`] / [`PinningCoordinator`]: content retention requests
//!
//! Fetches are single request/response with no retries: the companion
//! process is local and assumed reachable once the session starts, and a
//! silent retry could mask a stale or crashed process.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod api;
mod client;
mod pin;

pub use api::{LocalApi, LocalServiceError, SceneManifest, SceneMetadata};
pub use client::LocalClient;
pub use pin::{Pinner, PinningCoordinator};
