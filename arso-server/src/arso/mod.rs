//! ARSO upstream access.
//!
//! ARSO publishes its data as human-oriented documents rather than an API:
//! - the earthquake bulletin is an HTML page with a table of recent events
//! - weather observations are one XML document per station, discovered by
//!   scanning an HTML index page for links
//!
//! Everything here converts those documents into the typed records the web
//! layer serves. Station identifiers are rehashed into opaque tokens so the
//! raw upstream IDs never appear in our URLs.

mod client;
mod error;
mod quakes;
mod stations;
mod token;
mod types;

pub use client::{ArsoClient, ArsoConfig};
pub use error::ArsoError;
pub use token::station_token;
pub use types::{MetData, ObservationDoc, Quake, Station};
