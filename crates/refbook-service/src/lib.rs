//! # refbook-service
//!
//! HTTP lookup service for versioned reference dictionaries.
//!
//! The service answers three questions over data held by a
//! [`RefbookQuery`](refbook_loader::RefbookQuery) backend:
//!
//! - which refbooks exist (optionally as of a date)
//! - what elements a refbook version holds (explicit or current)
//! - whether a code/value pair exists in a refbook version
//!
//! Version resolution lives in [`resolver`], element queries in [`lookup`]
//! and refbook listing in [`listing`]. [`RefbookServer`] ties them to a
//! store and a [`Clock`], and [`api::router`] exposes them over HTTP.

#![warn(missing_docs)]

pub mod api;
mod clock;
mod config;
mod error;
pub mod listing;
pub mod lookup;
pub mod resolver;
mod server;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ServiceConfig;
pub use error::{LookupError, LookupResult, VersionMiss};
pub use server::RefbookServer;


// Re-export loader types for convenience
pub use refbook_loader::{RefbookQuery, RefbookStore};
